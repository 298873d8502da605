use std::sync::Arc;

use ogpp::config::Config;
use ogpp::db::{self, Repository};
use ogpp::error::AppError;
use ogpp::logging;
use ogpp::mail::{LogTransport, Mailer};
use ogpp::riot::RiotClient;
use ogpp::sync::Syncer;
use ogpp::web::{self, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = Config::from_env()?;
    logging::init("ogpp")?;

    info!(platform = %config.riot_platform, "🐙 Starting ogpp");

    let pool = db::connect(&config.database_url).await?;
    let repository = Repository::new(pool);

    let mut riot = RiotClient::new(
        config.riot_api_key.clone(),
        config.riot_platform,
        config.riot_rate_limit_per_second,
    );
    if let Some(base_url) = &config.riot_base_url {
        riot = riot.with_base_url(base_url.as_str());
    }

    let syncer = Syncer::new(repository, riot)
        .with_history_end_index(config.match_history_end_index)
        .with_throttle(config.backfill_burst, config.backfill_pause);
    let mailer = Mailer::new(Arc::new(LogTransport), config.mail_admin.clone());

    let state = Arc::new(AppState::new(syncer, mailer, config.posts_per_page));
    web::serve(state, &config.bind_addr).await
}
