//! CRM background worker
//!
//! Consumes [`CustomerVisit`]s and upserts customer records. Exits when the
//! channel closes. Write failures are logged and swallowed; the order that
//! triggered the visit has long been committed.

use sqlx::SqlitePool;
use tokio::sync::mpsc;

use super::CustomerVisit;
use crate::db::repository::customers;

pub struct CrmWorker {
    pool: SqlitePool,
}

impl CrmWorker {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Run until the channel closes.
    pub async fn run(self, mut rx: mpsc::Receiver<CustomerVisit>) {
        tracing::info!("CRM worker started");

        while let Some(visit) = rx.recv().await {
            let phone = normalize_phone(visit.customer_phone.as_deref().unwrap_or(""));
            if phone.is_empty() {
                tracing::debug!("CRM visit without usable phone, skipping");
                continue;
            }
            let name = visit
                .customer_name
                .as_deref()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or("Guest");

            match customers::record_visit(&self.pool, name, &phone, visit.amount, visit.at).await {
                Ok(()) => {
                    tracing::debug!(phone = %phone, amount = visit.amount, "Customer visit recorded");
                }
                Err(e) => {
                    tracing::error!("Failed to record customer visit: {e}");
                }
            }
        }

        tracing::info!("CRM channel closed, worker stopping");
    }
}

/// Keep digits and a leading `+`; everything else (spaces, dashes,
/// parentheses) is formatting noise.
fn normalize_phone(raw: &str) -> String {
    raw.trim()
        .char_indices()
        .filter(|(i, c)| c.is_ascii_digit() || (*i == 0 && *c == '+'))
        .map(|(_, c)| c)
        .collect()
}
