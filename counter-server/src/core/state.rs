use sqlx::SqlitePool;

use crate::core::Config;
use crate::crm::{CrmService, CrmWorker};
use crate::db::DbService;

/// Shared handles for every request handler. Clone is shallow; the pool
/// and the CRM sender are reference-counted internally.
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub crm: CrmService,
}

impl ServerState {
    /// Initialize the data directory, database and services, and spawn the
    /// CRM worker.
    ///
    /// # Panics
    ///
    /// Panics when the data directory cannot be created or the database
    /// fails to open; the server is useless without either.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_data_dir()
            .expect("Failed to create data directory");

        let db_path = config.db_path();
        let db_path_str = db_path.to_string_lossy();
        let db = DbService::new(&db_path_str)
            .await
            .expect("Failed to initialize database");

        let (crm, crm_rx) = CrmService::new(config.crm_buffer_size);
        let worker = CrmWorker::new(db.pool.clone());
        tokio::spawn(async move {
            worker.run(crm_rx).await;
        });

        Self {
            config: config.clone(),
            db,
            crm,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }
}
