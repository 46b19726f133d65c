use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// How the staff owner of a company location is discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffResolution {
    /// Scan up to ten company contacts; the first one carrying the metafield wins.
    Contacts,
    /// Read only the company's designated main contact.
    MainContact,
}

impl std::fmt::Display for StaffResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StaffResolution::Contacts => write!(f, "contacts"),
            StaffResolution::MainContact => write!(f, "main_contact"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub shopify_store_domain: String,
    pub shopify_admin_token: String,
    pub shopify_api_version: String,
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub assign_service_url: String,
    pub assign_service_token: Option<String>,
    pub api_keys: Vec<String>,
    pub staff_directory_path: PathBuf,
    pub staff_resolution: StaffResolution,
    pub staff_metafield_namespace: String,
    pub staff_metafield_key: String,
    pub http_timeout_secs: u64,
    pub read_max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub dispatch_concurrency: usize,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl AppConfig {
    /// Admin GraphQL endpoint for the configured store and API version.
    #[must_use]
    pub fn shopify_graphql_endpoint(&self) -> String {
        let domain = self
            .shopify_store_domain
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/');
        format!(
            "https://{domain}/admin/api/{}/graphql.json",
            self.shopify_api_version
        )
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("shopify_store_domain", &self.shopify_store_domain)
            .field("shopify_admin_token", &"[redacted]")
            .field("shopify_api_version", &self.shopify_api_version)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("bind_addr", &self.bind_addr)
            .field("assign_service_url", &self.assign_service_url)
            .field(
                "assign_service_token",
                &self.assign_service_token.as_ref().map(|_| "[redacted]"),
            )
            .field("api_keys", &format_args!("[{} redacted]", self.api_keys.len()))
            .field("staff_directory_path", &self.staff_directory_path)
            .field("staff_resolution", &self.staff_resolution)
            .field("staff_metafield_namespace", &self.staff_metafield_namespace)
            .field("staff_metafield_key", &self.staff_metafield_key)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("read_max_retries", &self.read_max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("dispatch_concurrency", &self.dispatch_concurrency)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}
