/// Contract configuration loaded from environment variables.
///
/// All fields have defaults suitable for local runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractConfig {
    /// Page size used when a list request asks for none (default: `0`, unbounded).
    pub default_page_limit: u64,
    /// Upper bound on any requested page size (default: `1000`, `0` disables).
    pub max_page_limit: u64,
    /// Emit logs as JSON lines (default: `false`).
    pub log_json: bool,
    /// Caller principal for the local binary (default: `local-user`).
    pub caller_id: String,
    /// Caller organization for the local binary (default: `Org1MSP`).
    pub caller_org: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            default_page_limit: 0,
            max_page_limit: 1000,
            log_json: false,
            caller_id: "local-user".into(),
            caller_org: "Org1MSP".into(),
        }
    }
}

impl ContractConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default      |
    /// |--------------------------------|--------------|
    /// | `AGRITRACE_DEFAULT_PAGE_LIMIT` | `0`          |
    /// | `AGRITRACE_MAX_PAGE_LIMIT`     | `1000`       |
    /// | `AGRITRACE_LOG_JSON`           | `false`      |
    /// | `AGRITRACE_CALLER_ID`          | `local-user` |
    /// | `AGRITRACE_CALLER_ORG`         | `Org1MSP`    |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let default_page_limit: u64 = std::env::var("AGRITRACE_DEFAULT_PAGE_LIMIT")
            .unwrap_or_else(|_| defaults.default_page_limit.to_string())
            .parse()
            .expect("AGRITRACE_DEFAULT_PAGE_LIMIT must be a valid u64");

        let max_page_limit: u64 = std::env::var("AGRITRACE_MAX_PAGE_LIMIT")
            .unwrap_or_else(|_| defaults.max_page_limit.to_string())
            .parse()
            .expect("AGRITRACE_MAX_PAGE_LIMIT must be a valid u64");

        let log_json: bool = std::env::var("AGRITRACE_LOG_JSON")
            .unwrap_or_else(|_| defaults.log_json.to_string())
            .parse()
            .expect("AGRITRACE_LOG_JSON must be true or false");

        let caller_id = std::env::var("AGRITRACE_CALLER_ID").unwrap_or(defaults.caller_id);
        let caller_org = std::env::var("AGRITRACE_CALLER_ORG").unwrap_or(defaults.caller_org);

        Self {
            default_page_limit,
            max_page_limit,
            log_json,
            caller_id,
            caller_org,
        }
    }
}
