use std::env;
use std::num::NonZeroU32;
use std::time::Duration;

use nonzero_ext::nonzero;

use crate::error::AppError;
use crate::riot::Platform;

#[derive(Debug, Clone)]
pub struct Config {
    pub riot_api_key: String,
    pub riot_platform: Platform,
    /// Overrides the platform host, mostly useful for proxies and tests.
    pub riot_base_url: Option<String>,
    pub riot_rate_limit_per_second: NonZeroU32,
    pub database_url: String,
    pub bind_addr: String,
    pub posts_per_page: u32,
    pub match_history_end_index: u32,
    pub backfill_burst: u32,
    pub backfill_pause: Duration,
    pub mail_admin: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        const DEFAULT_POSTS_PER_PAGE: u32 = 5;
        const DEFAULT_MATCH_HISTORY_END_INDEX: u32 = 50;
        const DEFAULT_BACKFILL_BURST: u32 = 7;
        const DEFAULT_BACKFILL_PAUSE_SECS: u64 = 5;

        let riot_api_key = env::var("RIOT_API_KEY")
            .map_err(|_| AppError::Config("RIOT_API_KEY must be set".into()))?;

        let riot_platform = env::var("RIOT_PLATFORM")
            .ok()
            .map(|v| v.parse())
            .transpose()?
            .unwrap_or(Platform::NA1);

        let riot_base_url = env::var("RIOT_BASE_URL").ok().filter(|v| !v.is_empty());

        let riot_rate_limit_per_second = env::var("RIOT_RATE_LIMIT_PER_SECOND")
            .ok()
            .and_then(|v| v.parse().ok())
            .and_then(NonZeroU32::new)
            .unwrap_or(nonzero!(20_u32));

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:ogpp.db".into());

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());

        let posts_per_page = parse_or("POSTS_PER_PAGE", DEFAULT_POSTS_PER_PAGE).max(1);

        let match_history_end_index =
            parse_or("MATCH_HISTORY_END_INDEX", DEFAULT_MATCH_HISTORY_END_INDEX);

        let backfill_burst = parse_or("BACKFILL_BURST", DEFAULT_BACKFILL_BURST).max(1);

        let backfill_pause =
            Duration::from_secs(parse_or("BACKFILL_PAUSE_SECS", DEFAULT_BACKFILL_PAUSE_SECS));

        let mail_admin = env::var("MAIL_ADMIN").ok().filter(|v| !v.is_empty());

        Ok(Self {
            riot_api_key,
            riot_platform,
            riot_base_url,
            riot_rate_limit_per_second,
            database_url,
            bind_addr,
            posts_per_page,
            match_history_end_index,
            backfill_burst,
            backfill_pause,
            mail_admin,
        })
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
