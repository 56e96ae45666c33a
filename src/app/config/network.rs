use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NetworkConfig {
    /// Per-request timeout in seconds
    #[serde(default = "NetworkConfig::default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "NetworkConfig::default_user_agent")]
    pub user_agent: String,
}

impl NetworkConfig {
    fn default_timeout_secs() -> u64 {
        15
    }

    fn default_user_agent() -> String {
        format!("swipedeck/{}", env!("CARGO_PKG_VERSION"))
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: Self::default_timeout_secs(),
            user_agent: Self::default_user_agent(),
        }
    }
}
