use crate::transport::TransportConfig;

pub const DEFAULT_ENDPOINT: &str = "/wso";
pub const DEFAULT_OUTBOX_CAPACITY: usize = 256;

/// Settings of one worker process.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Coordinator `host[:port]`.
    pub coordinator_host: String,
    /// Zone the worker announces, used by the coordinator to pick workers.
    pub zone: String,
    /// Use `wss` instead of `ws`.
    pub secure: bool,
    pub endpoint: String,
    /// Packets that may wait for the socket writer before sends start failing.
    pub outbox_capacity: usize,
    pub transport: TransportConfig,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            coordinator_host: "localhost:8000".to_owned(),
            zone: String::new(),
            secure: false,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            outbox_capacity: DEFAULT_OUTBOX_CAPACITY,
            transport: TransportConfig::default(),
        }
    }
}

impl WorkerConfig {
    pub fn coordinator_url(&self) -> String {
        let scheme = if self.secure { "wss" } else { "ws" };
        let endpoint = self.endpoint.trim_start_matches('/');
        format!(
            "{}://{}/{}?zone={}",
            scheme, self.coordinator_host, endpoint, self.zone
        )
    }
}
