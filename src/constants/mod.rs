pub const MIB: usize = 1024 * 1024;
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

pub struct Env {
    pub database_url: String,
    pub max_upload_bytes: usize,
    pub db_min_connections: u32,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub auto_migrate: bool,
    pub frontend_url: Option<String>,
    pub ip: String,
    pub port: u16,
    pub workers: usize,
}

impl Env {
    fn new() -> Self {
        let database_url = std::env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set in .env file or environment variable");

        let max_upload_mb = std::env::var("MAX_UPLOAD_MB")
            .unwrap_or_else(|_| "16".to_string())
            .parse::<usize>()
            .expect("MAX_UPLOAD_MB must be a valid usize integer");
        let max_upload_bytes = mib_to_bytes(max_upload_mb)
            .expect("MAX_UPLOAD_MB is too large to express in bytes");

        let db_min_connections = std::env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| "1".to_string())
            .parse::<u32>()
            .expect("DB_MIN_CONNECTIONS must be a valid u32 integer");
        let db_max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()
            .expect("DB_MAX_CONNECTIONS must be a valid u32 integer");
        let db_acquire_timeout_secs = std::env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .expect("DB_ACQUIRE_TIMEOUT_SECS must be a valid u64 integer");

        let auto_migrate = std::env::var("AUTO_MIGRATE")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);

        let frontend_url = std::env::var("FRONTEND_URL").ok().filter(|v| !v.is_empty());
        let ip = std::env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .expect("PORT must be a valid u16 integer");
        let workers = std::env::var("WORKERS")
            .unwrap_or_else(|_| "2".to_string())
            .parse::<usize>()
            .expect("WORKERS must be a valid usize integer");

        Env {
            database_url,
            max_upload_bytes,
            db_min_connections,
            db_max_connections,
            db_acquire_timeout_secs,
            auto_migrate,
            frontend_url,
            ip,
            port,
            workers,
        }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

fn mib_to_bytes(mb: usize) -> Option<usize> {
    mb.checked_mul(MIB)
}

fn parse_flag(value: &str) -> bool {
    !matches!(value.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_accepts_common_spellings() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(parse_flag("yes"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(" OFF "));
        assert!(!parse_flag("0"));
    }

    #[test]
    fn test_upload_cap_overflow_is_rejected() {
        assert_eq!(mib_to_bytes(16), Some(16 * 1024 * 1024));
        assert_eq!(mib_to_bytes(0), Some(0));
        assert_eq!(mib_to_bytes(usize::MAX), None);
        assert_eq!(mib_to_bytes(usize::MAX / MIB + 1), None);
    }
}
