use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use super::keeper::SessionKeeper;
use super::store::SessionStore;
use super::{Session, SessionRequest};
use crate::config::PoolConfig;
use crate::error::Result;

/// Outcome of an admission attempt.
///
/// A rejected session has already been destroyed; its record is returned
/// for the identity and index fields.
#[derive(Debug, Clone)]
pub enum Admission {
    Granted(Session),
    Rejected(Session),
}

impl Admission {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted(_))
    }

    pub fn session(&self) -> &Session {
        match self {
            Self::Granted(session) | Self::Rejected(session) => session,
        }
    }
}

/// Counting admission over shared coordination-service sessions.
///
/// The gate holds no state of its own: the service's session list is the
/// only arbiter, so independent processes pointed at the same service
/// coordinate without ever talking to each other. The capacity bound is
/// best-effort; concurrent attempts can transiently overshoot it by at
/// most the number of in-flight acquirers.
pub struct AdmissionGate<S> {
    store: Arc<S>,
}

impl<S> AdmissionGate<S>
where
    S: SessionStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Try to occupy one slot in the named pool.
    ///
    /// A session is created first and then counted against its
    /// competitors, inclusive of itself. Creating before counting keeps
    /// the overshoot under concurrent attempts bounded by the number of
    /// simultaneous acquirers; counting first would leave it unbounded.
    /// The count itself is a point-in-time snapshot that can be stale by
    /// the time the decision lands.
    ///
    /// An admitted caller owns the session: it starts the keep-alive and
    /// eventually [`release`](AdmissionGate::release)s it. On rejection
    /// the session is destroyed here, and a failing destroy surfaces as
    /// the call's error since the slot may still be occupied.
    pub async fn check_access(&self, resource: &str, pool: &PoolConfig) -> Result<Admission> {
        let request = SessionRequest {
            name: Some(resource.to_string()),
            ttl: Some(pool.ttl.clone()),
            node: pool.node.clone(),
            checks: if pool.checks.is_empty() {
                None
            } else {
                Some(pool.checks.clone())
            },
            lock_delay: pool.lock_delay.clone(),
        };
        let session = self.store.create_session(&request).await?;

        let sessions = self.store.list_sessions().await?;
        let held = sessions.iter().filter(|s| s.name == resource).count();

        if held <= pool.capacity {
            debug!(resource, held, capacity = pool.capacity, "admission granted");
            return Ok(Admission::Granted(session));
        }

        self.store.destroy_session(&session.id).await?;
        debug!(resource, held, capacity = pool.capacity, "admission rejected");
        Ok(Admission::Rejected(session))
    }

    /// Give a slot back explicitly. Releasing an already-expired session
    /// is fine.
    pub async fn release(&self, id: &str) -> Result<()> {
        self.store.destroy_session(id).await
    }

    /// Spawn the renewal loop for an admitted session. The keeper carries
    /// the cancellation signal and counters; the handle resolves once the
    /// loop has stopped.
    pub fn start_keep_alive(
        &self,
        session: Session,
        period: Duration,
    ) -> (Arc<SessionKeeper<S>>, JoinHandle<()>) {
        let keeper = Arc::new(SessionKeeper::new(self.store.clone(), session, period));
        let handle = keeper.clone().start();
        (keeper, handle)
    }
}
