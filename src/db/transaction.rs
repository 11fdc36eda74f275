/*!
 * Unit of Work
 *
 * Wraps a database transaction behind `begin` / `commit` / `rollback`.
 * Every multi-step mutation runs inside one `Transaction`; dropping a
 * transaction without committing rolls it back.
 */

use crate::errors::ServiceError;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};
use uuid::Uuid;

/// Factory for transactions sharing one pool and one deadline.
#[derive(Clone, Debug)]
pub struct UnitOfWork {
    db: Arc<DatabaseConnection>,
    timeout: Duration,
}

/// An open unit of work.
pub struct Transaction {
    txn: DatabaseTransaction,
    id: Uuid,
    started: Instant,
}

impl UnitOfWork {
    pub fn new(db: Arc<DatabaseConnection>, timeout: Duration) -> Self {
        Self { db, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn begin(&self) -> Result<Transaction, ServiceError> {
        let txn = self.db.begin().await.map_err(|e| {
            error!(error = %e, "Failed to begin transaction");
            ServiceError::db_error(e)
        })?;
        let id = Uuid::new_v4();
        debug!(transaction_id = %id, "Transaction started");
        Ok(Transaction {
            txn,
            id,
            started: Instant::now(),
        })
    }

    /// Bounds `work` by the configured deadline. An expired deadline drops the
    /// in-flight future, so pending lock waits are abandoned.
    pub async fn within_deadline<F, T>(&self, operation: &str, work: F) -> Result<T, ServiceError>
    where
        F: Future<Output = Result<T, ServiceError>>,
    {
        match tokio::time::timeout(self.timeout, work).await {
            Ok(result) => result,
            Err(_) => {
                warn!(operation, timeout = ?self.timeout, "Unit of work exceeded its deadline");
                Err(ServiceError::Timeout(format!(
                    "{} exceeded {:?}",
                    operation, self.timeout
                )))
            }
        }
    }
}

impl Transaction {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Connection handle for statements that belong to this unit of work.
    pub fn conn(&self) -> &DatabaseTransaction {
        &self.txn
    }

    pub async fn commit(self) -> Result<(), ServiceError> {
        let id = self.id;
        let elapsed = self.started.elapsed();
        self.txn.commit().await.map_err(|e| {
            error!(transaction_id = %id, error = %e, "Transaction commit failed");
            ServiceError::db_error(e)
        })?;
        debug!(transaction_id = %id, "Transaction committed in {:?}", elapsed);
        Ok(())
    }

    pub async fn rollback(self) -> Result<(), ServiceError> {
        let id = self.id;
        let elapsed = self.started.elapsed();
        self.txn.rollback().await.map_err(|e| {
            error!(transaction_id = %id, error = %e, "Transaction rollback failed");
            ServiceError::db_error(e)
        })?;
        warn!(transaction_id = %id, "Transaction rolled back after {:?}", elapsed);
        Ok(())
    }

    /// Commits on `Ok`, rolls back on `Err` and hands the original error back.
    pub async fn finish<T>(self, outcome: Result<T, ServiceError>) -> Result<T, ServiceError> {
        match outcome {
            Ok(value) => {
                self.commit().await?;
                Ok(value)
            }
            Err(err) => {
                // The caller's error wins over a rollback failure.
                if let Err(rollback_err) = self.rollback().await {
                    error!(error = %rollback_err, "Rollback after failure did not complete");
                }
                Err(err)
            }
        }
    }
}
