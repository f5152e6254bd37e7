use std::net::SocketAddr;

/// Settings for the relay process.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub bind: SocketAddr,
    /// Allow any origin, method and header. Browser receivers served from a
    /// different origin need this.
    pub cors_permissive: bool,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8000)),
            cors_permissive: true,
        }
    }
}
