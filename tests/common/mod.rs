//! In-memory stand-in for the coordination service.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use consul_gate::{Error, Result, Session, SessionRequest, SessionStore};

/// Linearizable by default. [`freeze_lists`](FakeStore::freeze_lists)
/// switches every later list call to a frozen snapshot plus one entry for
/// the caller's own freshly created session, modeling the stale-read
/// window the real service exposes to concurrent acquirers.
#[derive(Default)]
pub struct FakeStore {
    sessions: Mutex<Vec<Session>>,
    next_index: AtomicI64,
    snapshot: Mutex<Option<(Vec<Session>, i64)>>,
    renew_delay: Mutex<Option<Duration>>,
    fail_creates: AtomicBool,
    fail_destroys: AtomicBool,
}

impl FakeStore {
    pub fn new() -> Self {
        Self {
            next_index: AtomicI64::new(1),
            ..Self::default()
        }
    }

    pub fn freeze_lists(&self) {
        let sessions = self.sessions.lock().unwrap();
        let frozen_at = self.next_index.load(Ordering::SeqCst);
        *self.snapshot.lock().unwrap() = Some((sessions.clone(), frozen_at));
    }

    pub fn fail_creates(&self) {
        self.fail_creates.store(true, Ordering::SeqCst);
    }

    pub fn fail_destroys(&self) {
        self.fail_destroys.store(true, Ordering::SeqCst);
    }

    pub fn set_renew_delay(&self, delay: Duration) {
        *self.renew_delay.lock().unwrap() = Some(delay);
    }

    pub fn session_count(&self, name: &str) -> usize {
        self.sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.name == name)
            .count()
    }
}

#[async_trait]
impl SessionStore for FakeStore {
    async fn create_session(&self, request: &SessionRequest) -> Result<Session> {
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(Error::Transport {
                url: "fake://session/create".to_string(),
                message: "injected create failure".to_string(),
            });
        }

        let index = self.next_index.fetch_add(1, Ordering::SeqCst);
        let session = Session {
            id: format!("fake-{index}"),
            name: request.name.clone().unwrap_or_default(),
            node: request.node.clone().unwrap_or_else(|| "fake-node".to_string()),
            checks: request.checks.clone().unwrap_or_default(),
            lock_delay: 0,
            behavior: "release".to_string(),
            ttl: request.ttl.clone().unwrap_or_default(),
            create_index: index,
            modify_index: index,
        };
        self.sessions.lock().unwrap().push(session.clone());
        Ok(session)
    }

    async fn renew_session(&self, session: &Session) -> Result<Session> {
        let delay = *self.renew_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut sessions = self.sessions.lock().unwrap();
        match sessions.iter_mut().find(|s| s.id == session.id) {
            Some(stored) => {
                stored.modify_index = self.next_index.fetch_add(1, Ordering::SeqCst);
                Ok(stored.clone())
            }
            None => Err(Error::SessionNotFound {
                id: session.id.clone(),
            }),
        }
    }

    async fn destroy_session(&self, id: &str) -> Result<()> {
        if self.fail_destroys.load(Ordering::SeqCst) {
            return Err(Error::Transport {
                url: "fake://session/destroy".to_string(),
                message: "injected destroy failure".to_string(),
            });
        }

        // Destroying an unknown id stays successful, like the service.
        self.sessions.lock().unwrap().retain(|s| s.id != id);
        Ok(())
    }

    async fn list_sessions(&self) -> Result<Vec<Session>> {
        let snapshot = self.snapshot.lock().unwrap().clone();
        let sessions = self.sessions.lock().unwrap();

        match snapshot {
            Some((mut frozen, frozen_at)) => {
                // The caller's own create is visible to it, the other
                // in-flight creates are not.
                if let Some(own) = sessions.iter().filter(|s| s.create_index >= frozen_at).last() {
                    frozen.push(own.clone());
                }
                Ok(frozen)
            }
            None => Ok(sessions.clone()),
        }
    }
}
