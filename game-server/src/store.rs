use std::future::Future;
use std::time::Duration;

use game_persistence::{GameRepository, PlayerRepository};
use game_types::GameError;
use sea_orm::{DatabaseConnection, DbErr};
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Timed out or lost the connection twice in a row
    #[error("{operation} failed: {reason}")]
    Unavailable {
        operation: &'static str,
        reason: String,
    },
    /// The database answered with an error that retrying won't fix
    #[error("{operation} failed: {source}")]
    Rejected {
        operation: &'static str,
        #[source]
        source: DbErr,
    },
}

impl From<StoreError> for GameError {
    fn from(err: StoreError) -> Self {
        GameError::StorageUnavailable {
            message: err.to_string(),
        }
    }
}

/// Repositories plus the policy every storage call runs under
#[derive(Clone)]
pub struct Store {
    pub games: GameRepository,
    pub players: PlayerRepository,
    timeout: Duration,
}

fn is_transient(err: &DbErr) -> bool {
    matches!(err, DbErr::Conn(_) | DbErr::ConnectionAcquire(_))
}

impl Store {
    pub fn new(db: DatabaseConnection, timeout: Duration) -> Self {
        Self {
            games: GameRepository::new(db.clone()),
            players: PlayerRepository::new(db),
            timeout,
        }
    }

    /// Run a storage call bounded by the timeout, retrying once on a timeout
    /// or connection error.
    ///
    /// A write whose first attempt timed out may still have committed. Its
    /// retry can then report a failure for a write that was applied.
    pub async fn call<T, F, Fut>(&self, operation: &'static str, call: F) -> Result<T, StoreError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, DbErr>>,
    {
        let mut retried = false;
        loop {
            let reason = match tokio::time::timeout(self.timeout, call()).await {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(source)) if !is_transient(&source) => {
                    return Err(StoreError::Rejected { operation, source });
                }
                Ok(Err(err)) => err.to_string(),
                Err(_) => format!("timed out after {:?}", self.timeout),
            };

            if retried {
                return Err(StoreError::Unavailable { operation, reason });
            }
            warn!("{} failed ({}), retrying once", operation, reason);
            retried = true;
        }
    }
}
