use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use axum::http::HeaderValue;
use env_helpers::get_env_default;

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// JSON file holding the waitlist array.
    pub waitlist_file: PathBuf,
    /// Directory the landing page and its assets are served from.
    pub static_dir: PathBuf,
    /// `None` allows any origin.
    pub cors_origin: Option<HeaderValue>,
    /// When set, JSON logs are also written to this file.
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port: u16 = get_env_default("PORT", 3000);
        let host: IpAddr = get_env_default("BIND_HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED));

        let waitlist_file: String = get_env_default("WAITLIST_FILE", "waitlist.json".to_string());
        let static_dir: String = get_env_default("STATIC_DIR", "public".to_string());

        let cors_origin: String = get_env_default("CORS_ORIGIN", "*".to_string());
        let cors_origin = match cors_origin.trim() {
            "*" => None,
            origin => Some(
                origin
                    .parse()
                    .expect("CORS_ORIGIN must be a valid header value"),
            ),
        };

        let log_file: Option<PathBuf> = std::env::var("LOG_FILE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Self {
            bind_addr: SocketAddr::new(host, port),
            waitlist_file: PathBuf::from(waitlist_file),
            static_dir: PathBuf::from(static_dir),
            cors_origin,
            log_file,
        }
    }
}
