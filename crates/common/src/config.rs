use std::net::SocketAddr;
use std::time::Duration;

/// Application configuration, resolved once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,

    /// Stellar network name passed to every CLI call (default: testnet)
    pub network: String,

    /// Fixed source account for read-only contract calls.
    /// When unset, the requesting user is used as the source account.
    pub source_account: Option<String>,

    /// Subscription contract identifier
    pub subscription_contract_id: String,

    /// Payment (token) contract identifier
    pub payment_contract_id: String,

    /// Path or name of the `stellar` CLI binary
    pub stellar_bin: String,

    /// Deadline applied to the whole aggregation of one request (default: 20s)
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary key lookup.
    ///
    /// Values are trimmed; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let or_default = |key: &str, fallback: &str| get(key).unwrap_or_else(|| fallback.to_string());

        let bind_addr = parse_bind_addr(&or_default("BACKEND_ADDR", ":8080"))?;

        let request_timeout_secs: u64 = or_default("REQUEST_TIMEOUT_SECS", "20")
            .parse()
            .map_err(|_| anyhow::anyhow!("REQUEST_TIMEOUT_SECS must be a valid u64"))?;
        if request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be greater than zero");
        }

        let payment_contract_id = get("PAYMENT_CONTRACT_ID")
            .unwrap_or_else(|| or_default("TOKENIZATION_CONTRACT_ID", "tokenization"));

        Ok(Self {
            bind_addr,
            network: or_default("STELLAR_NETWORK", "testnet"),
            source_account: get("STELLAR_SOURCE"),
            subscription_contract_id: or_default("SUBSCRIPTION_CONTRACT_ID", "subscription"),
            payment_contract_id,
            stellar_bin: or_default("STELLAR_BIN", "stellar"),
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }
}

/// Parse a listen address. A bare `:port` binds all interfaces.
fn parse_bind_addr(raw: &str) -> anyhow::Result<SocketAddr> {
    let candidate = match raw.strip_prefix(':') {
        Some(port) => format!("0.0.0.0:{}", port),
        None => raw.to_string(),
    };
    candidate
        .parse()
        .map_err(|_| anyhow::anyhow!("BACKEND_ADDR must be host:port or :port, got '{}'", raw))
}
