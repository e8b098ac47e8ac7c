//! Per-session write serialization.
//!
//! Mutations load a snapshot, apply a pure domain operation and store the
//! result. Two such sequences on the same session must not interleave, so
//! every write runs under the session's own lock. Different sessions never
//! contend.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::estimation::{EstimationError, EstimationSession};
use crate::domain::foundation::SessionId;
use crate::ports::EstimationSessionRepository;

/// Registry of one async mutex per session.
#[derive(Debug, Default)]
pub struct SessionLocks {
    locks: Mutex<HashMap<SessionId, Arc<Mutex<()>>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive write access to one session.
    pub async fn acquire(&self, session_id: SessionId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.entry(session_id).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Drops the lock entry of a session that no longer exists.
    pub async fn forget(&self, session_id: &SessionId) {
        self.locks.lock().await.remove(session_id);
    }

    pub async fn tracked_sessions(&self) -> usize {
        self.locks.lock().await.len()
    }
}

/// Loads a session, applies `operation` and persists the new snapshot,
/// all under the session's lock.
///
/// Nothing is written when `operation` fails.
pub(crate) async fn update_session<F>(
    repository: &dyn EstimationSessionRepository,
    locks: &SessionLocks,
    session_id: SessionId,
    operation: F,
) -> Result<EstimationSession, EstimationError>
where
    F: FnOnce(&EstimationSession) -> Result<EstimationSession, EstimationError>,
{
    let _guard = locks.acquire(session_id).await;

    let current = repository
        .find_by_id(&session_id)
        .await?
        .ok_or_else(|| EstimationError::not_found(session_id))?;

    let next = operation(&current)?;

    if next != current {
        repository.update(&next).await?;
    }

    Ok(next)
}
