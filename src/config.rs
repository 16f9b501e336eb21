use std::net::IpAddr;

use ipnet::IpNet;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub trusted_proxies: Vec<IpNet>,
    /// Upper bound on `limit` for audit-log queries.
    pub audit_page_max: i64,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;
        let jwt_secret = env_required("JWT_SECRET")?;

        let host: IpAddr = env_or("CREWBASE_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid CREWBASE_HOST: {e}"))?;

        let port: u16 = env_or("CREWBASE_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid CREWBASE_PORT: {e}"))?;

        let max_body_size: usize = env_or("CREWBASE_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid CREWBASE_MAX_BODY_SIZE: {e}"))?;

        let trusted_proxies: Vec<IpNet> = env_or("CREWBASE_TRUSTED_PROXIES", "")
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                s.trim()
                    .parse()
                    .map_err(|e| format!("Invalid CREWBASE_TRUSTED_PROXIES entry '{s}': {e}"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let audit_page_max: i64 = env_or("CREWBASE_AUDIT_PAGE_MAX", "200")
            .parse()
            .map_err(|e| format!("Invalid CREWBASE_AUDIT_PAGE_MAX: {e}"))?;

        let log_level = env_or("CREWBASE_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            jwt_secret,
            host,
            port,
            max_body_size,
            trusted_proxies,
            audit_page_max,
            log_level,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
