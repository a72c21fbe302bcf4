use std::time::Duration;

/// Connection settings for the coordination service agent.
///
/// The base URL is injected here rather than baked into the client, so one
/// process can talk to agents on different hosts or ports. Timeouts are
/// enforced by the transport; the session client itself never waits
/// indefinitely.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Endpoint prefix the session paths are joined onto,
    /// e.g. `http://127.0.0.1:8500/v1/`.
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8500/v1/".to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
            user_agent: format!("consul_gate/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Admission parameters for one resource pool.
///
/// Passed per call, so a single gate can serve pools with different
/// capacities, TTLs, and renewal cadences.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum number of simultaneously live sessions sharing the
    /// resource name.
    pub capacity: usize,
    /// Session TTL in the service's duration format, e.g. `"15s"`.
    pub ttl: String,
    /// How often an admitted session is renewed.
    pub renew_period: Duration,
    /// Node to bind created sessions to; the agent's own node when unset.
    pub node: Option<String>,
    /// Health checks tied to created sessions.
    pub checks: Vec<String>,
    /// Grace period before a released name can be taken again, in the
    /// service's duration format.
    pub lock_delay: Option<String>,
}

impl PoolConfig {
    pub fn new(capacity: usize, ttl: impl Into<String>, renew_period: Duration) -> Self {
        Self {
            capacity,
            ttl: ttl.into(),
            renew_period,
            node: None,
            checks: Vec::new(),
            lock_delay: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_the_local_agent() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8500/v1/");
        assert!(config.timeout > config.connect_timeout);
    }
}
