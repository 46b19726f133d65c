use crate::app_config::{AppConfig, Environment, StaffResolution};
use crate::ConfigError;

/// Upper bound on in-flight assignment dispatches; the Admin API rate limit
/// makes wider fan-out unsafe.
const MAX_DISPATCH_CONCURRENCY: usize = 5;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files. Use it in
/// tests or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let shopify_store_domain = require("SHOPIFY_STORE_DOMAIN")?;
    let shopify_admin_token = require("SHOPIFY_ADMIN_TOKEN")?;
    let shopify_api_version = or_default("SHOPIFY_API_VERSION", "2025-04");
    let database_url = lookup("DATABASE_URL").ok().filter(|v| !v.trim().is_empty());

    let env = parse_environment(&or_default("STAFFSYNC_ENV", "development"))?;
    let log_level = or_default("STAFFSYNC_LOG_LEVEL", "info");

    // Hosting platforms hand out a bare PORT; an explicit bind address wins.
    let default_bind = match lookup("PORT").ok().filter(|p| !p.trim().is_empty()) {
        Some(port) => format!("0.0.0.0:{}", port.trim()),
        None => "0.0.0.0:8080".to_string(),
    };
    let bind_addr = or_default("STAFFSYNC_BIND_ADDR", &default_bind)
        .parse::<SocketAddr>()
        .map_err(|e| invalid("STAFFSYNC_BIND_ADDR", e.to_string()))?;

    let assign_service_url = or_default("STAFFSYNC_ASSIGN_SERVICE_URL", "http://127.0.0.1:8080")
        .trim_end_matches('/')
        .to_string();
    let assign_service_token = lookup("STAFFSYNC_ASSIGN_SERVICE_TOKEN")
        .ok()
        .filter(|v| !v.trim().is_empty());
    let api_keys = or_default("STAFFSYNC_API_KEYS", "")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect();

    let staff_directory_path = PathBuf::from(or_default(
        "STAFFSYNC_STAFF_DIRECTORY_PATH",
        "./config/staff.yaml",
    ));
    let staff_resolution = parse_staff_resolution(&or_default(
        "STAFFSYNC_STAFF_RESOLUTION",
        "contacts",
    ))?;
    let staff_metafield_namespace = or_default("STAFFSYNC_STAFF_METAFIELD_NAMESPACE", "custom");
    let staff_metafield_key = or_default("STAFFSYNC_STAFF_METAFIELD_KEY", "assigned_staff_email");

    let http_timeout_secs = parse_u64("STAFFSYNC_HTTP_TIMEOUT_SECS", "30")?;
    if http_timeout_secs == 0 {
        return Err(invalid(
            "STAFFSYNC_HTTP_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }
    let read_max_retries = parse_u32("STAFFSYNC_READ_MAX_RETRIES", "1")?;
    let retry_backoff_base_ms = parse_u64("STAFFSYNC_RETRY_BACKOFF_BASE_MS", "500")?;
    let dispatch_concurrency = parse_usize("STAFFSYNC_DISPATCH_CONCURRENCY", "5")?
        .clamp(1, MAX_DISPATCH_CONCURRENCY);

    let db_max_connections = parse_u32("STAFFSYNC_DB_MAX_CONNECTIONS", "2")?;
    let db_min_connections = parse_u32("STAFFSYNC_DB_MIN_CONNECTIONS", "0")?;
    if db_min_connections > db_max_connections {
        return Err(invalid(
            "STAFFSYNC_DB_MIN_CONNECTIONS",
            format!("must not exceed STAFFSYNC_DB_MAX_CONNECTIONS ({db_max_connections})"),
        ));
    }
    let db_acquire_timeout_secs = parse_u64("STAFFSYNC_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    Ok(AppConfig {
        env,
        log_level,
        shopify_store_domain,
        shopify_admin_token,
        shopify_api_version,
        database_url,
        bind_addr,
        assign_service_url,
        assign_service_token,
        api_keys,
        staff_directory_path,
        staff_resolution,
        staff_metafield_namespace,
        staff_metafield_key,
        http_timeout_secs,
        read_max_retries,
        retry_backoff_base_ms,
        dispatch_concurrency,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STAFFSYNC_ENV".to_string(),
            reason: format!("expected development, test, or production; got \"{other}\""),
        }),
    }
}

fn parse_staff_resolution(s: &str) -> Result<StaffResolution, ConfigError> {
    match s {
        "contacts" => Ok(StaffResolution::Contacts),
        "main_contact" => Ok(StaffResolution::MainContact),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STAFFSYNC_STAFF_RESOLUTION".to_string(),
            reason: format!("expected contacts or main_contact; got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
