//! Counting admission control on top of a coordination service's
//! ephemeral sessions.
//!
//! Independent processes that share nothing but a coordination service
//! agent can bound how many of them concurrently hold a named resource.
//! An admission attempt creates a session named for the resource, counts
//! the live sessions sharing that name, and either keeps its slot or
//! destroys the session again. An admitted holder runs a keep-alive loop
//! so the session outlives its TTL for as long as the work takes; once the
//! loop is cancelled the session is released explicitly or simply expires.
//!
//! This is a counting semaphore, not a lock: the count is taken from a
//! point-in-time snapshot of the session list, so concurrent acquirers can
//! transiently overshoot the capacity by at most the number of in-flight
//! attempts. That bound is deliberate; a strict guarantee would need a
//! serializing primitive this crate intentionally avoids.
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use consul_gate::{Admission, AdmissionGate, ClientConfig, HttpSessionClient, PoolConfig};
//!
//! #[tokio::main]
//! async fn main() -> consul_gate::Result<()> {
//!     let client = Arc::new(HttpSessionClient::new(ClientConfig::default())?);
//!     let gate = AdmissionGate::new(client);
//!     let pool = PoolConfig::new(2, "15s", Duration::from_secs(5));
//!
//!     match gate.check_access("db-writer", &pool).await? {
//!         Admission::Granted(session) => {
//!             let id = session.id.clone();
//!             let (keeper, task) = gate.start_keep_alive(session, pool.renew_period);
//!
//!             // ... do the guarded work ...
//!
//!             keeper.stop();
//!             let _ = task.await;
//!             gate.release(&id).await?;
//!         }
//!         Admission::Rejected(_) => {
//!             // the pool is full; try again later
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod session;

pub use config::{ClientConfig, PoolConfig};
pub use error::{Error, Result};
pub use session::{
    Admission, AdmissionGate, HttpSessionClient, Session, SessionKeeper, SessionRequest,
    SessionStore,
};
