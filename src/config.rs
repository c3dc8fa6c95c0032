use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable that overrides `wallet.url`.
pub const WALLET_URL_ENV: &str = "NIMBO_WALLET_URL";

/// Gateway configuration, fixed at construction time
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct GatewayConfig {
    pub wallet: WalletRpcConfig,
    #[serde(default)]
    pub scanning: ScanningConfig,
    #[serde(default)]
    pub withdrawal: WithdrawalConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WalletRpcConfig {
    /// Wallet JSON-RPC endpoint, e.g. `http://127.0.0.1:8070/json_rpc`
    pub url: String,
    #[serde(default = "WalletRpcConfig::default_timeout_ms")]
    pub timeout_ms: u64,
}

impl WalletRpcConfig {
    pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

    fn default_timeout_ms() -> u64 {
        Self::DEFAULT_TIMEOUT_MS
    }
}

impl Default for WalletRpcConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_ms: Self::DEFAULT_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScanningConfig {
    /// Trailing blocks checked on every scan
    pub block_window: u64,
}

impl ScanningConfig {
    pub const DEFAULT_BLOCK_WINDOW: u64 = 250;
}

impl Default for ScanningConfig {
    fn default() -> Self {
        Self {
            block_window: Self::DEFAULT_BLOCK_WINDOW,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WithdrawalConfig {
    /// Network fee in minor units
    pub fee: u64,
}

impl WithdrawalConfig {
    pub const DEFAULT_FEE: u64 = 5000;
}

impl Default for WithdrawalConfig {
    fn default() -> Self {
        Self {
            fee: Self::DEFAULT_FEE,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    /// `hourly`, `daily`, anything else never rotates
    pub rotation: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: "./logs".to_string(),
            log_file: "nimbo-gateway.log".to_string(),
            use_json: false,
            rotation: "daily".to_string(),
        }
    }
}

impl GatewayConfig {
    /// Config pointing at `url` with every other setting defaulted
    pub fn with_wallet_url(url: impl Into<String>) -> Self {
        Self {
            wallet: WalletRpcConfig {
                url: url.into(),
                ..WalletRpcConfig::default()
            },
            ..Self::default()
        }
    }

    /// Load configuration from YAML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let mut config: GatewayConfig =
            serde_yaml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        if let Ok(url) = std::env::var(WALLET_URL_ENV)
            && !url.trim().is_empty()
        {
            config.wallet.url = url;
        }
        Ok(config)
    }
}
