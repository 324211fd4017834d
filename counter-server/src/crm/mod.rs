//! Customer relationship tracking
//!
//! Settling an order as PAID emits a [`CustomerVisit`] onto an mpsc channel;
//! a background worker folds it into the customers table. The emit is
//! fire-and-forget: a full channel or a dead worker is logged and dropped,
//! it never fails or rolls back the order update.

mod worker;

pub use worker::CrmWorker;

use tokio::sync::mpsc;

/// One settled order, as handed to the CRM worker
#[derive(Debug, Clone)]
pub struct CustomerVisit {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub amount: f64,
    /// Unix millis at settlement
    pub at: i64,
}

/// Producer half of the CRM pipeline. Cheap to clone; the receiver goes to
/// a [`CrmWorker`] spawned at startup.
#[derive(Clone, Debug)]
pub struct CrmService {
    tx: mpsc::Sender<CustomerVisit>,
}

impl CrmService {
    pub fn new(buffer_size: usize) -> (Self, mpsc::Receiver<CustomerVisit>) {
        let (tx, rx) = mpsc::channel(buffer_size);
        (Self { tx }, rx)
    }

    /// Queue a visit for the worker. Never blocks the caller.
    pub fn notify_paid(
        &self,
        customer_name: Option<String>,
        customer_phone: Option<String>,
        amount: f64,
    ) {
        let visit = CustomerVisit {
            customer_name,
            customer_phone,
            amount,
            at: shared::util::now_millis(),
        };
        if let Err(e) = self.tx.try_send(visit) {
            tracing::warn!("CRM visit dropped: {e}");
        }
    }
}
