use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::warn;

use super::store::SessionStore;
use super::Session;
use crate::error::Error;

/// Keeps one admitted session alive by renewing it on a fixed period.
///
/// Renewal failures never stop the loop; a session whose renewals keep
/// failing is left to lapse on its own TTL, and the failure counter is the
/// signal an operator watches for a degrading session. Only [`stop`] ends
/// the loop.
///
/// [`stop`]: SessionKeeper::stop
pub struct SessionKeeper<S> {
    store: Arc<S>,
    session: Session,
    period: Duration,

    renewals: AtomicU64,
    failed_renewals: AtomicU64,

    cancelled: AtomicBool,
    cancel_signal: Notify,
}

impl<S> SessionKeeper<S>
where
    S: SessionStore + 'static,
{
    pub(crate) fn new(store: Arc<S>, session: Session, period: Duration) -> Self {
        Self {
            store,
            session,
            period,
            renewals: AtomicU64::new(0),
            failed_renewals: AtomicU64::new(0),
            cancelled: AtomicBool::new(false),
            cancel_signal: Notify::new(),
        }
    }

    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move { self.run().await })
    }

    /// Runs until [`stop`](SessionKeeper::stop) is called, blocking only on
    /// the next tick or the cancellation signal, whichever arrives first.
    pub async fn run(&self) {
        while !self.cancelled.load(Ordering::SeqCst) {
            tokio::select! {
                biased;
                _ = self.cancel_signal.notified() => break,
                _ = tokio::time::sleep(self.period) => {}
            }

            // A renewal in flight when cancellation arrives is allowed to
            // finish; the permit stored by `stop` ends the loop before the
            // next tick is scheduled.
            match self.store.renew_session(&self.session).await {
                Ok(_) => {
                    self.renewals.fetch_add(1, Ordering::SeqCst);
                }
                Err(Error::SessionNotFound { ref id }) => {
                    self.failed_renewals.fetch_add(1, Ordering::SeqCst);
                    warn!(id = %id, "session is gone; renewals cannot succeed until it is recreated");
                }
                Err(err) => {
                    self.failed_renewals.fetch_add(1, Ordering::SeqCst);
                    warn!(id = %self.session.id, error = %err, "session renewal failed");
                }
            }
        }
    }

    /// Signal cancellation. No further renewals are issued once this
    /// returns; await the handle from [`start`](SessionKeeper::start) to
    /// observe completion.
    pub fn stop(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.cancel_signal.notify_one();
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn renewals(&self) -> u64 {
        self.renewals.load(Ordering::SeqCst)
    }

    /// Swallowed renewal failures since the loop started.
    pub fn failed_renewals(&self) -> u64 {
        self.failed_renewals.load(Ordering::SeqCst)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
