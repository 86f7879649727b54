pub mod aladhan_api;

pub use aladhan_api::{AladhanApi, TimingsSource, parse_timings};

/// Shared outbound HTTP client. Transport defaults apply (no timeout override).
pub fn build_http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(concat!("adhan-push/", env!("CARGO_PKG_VERSION")))
        .build()
}
