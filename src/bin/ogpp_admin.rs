//! Maintenance commands for the ogpp database.
//!
//! ```text
//! ogpp-admin census
//! ogpp-admin unique-players
//! ogpp-admin dedupe [summoner name]
//! ogpp-admin backfill-ranked
//! ogpp-admin wipe --yes
//! ```

use std::process::ExitCode;

use ogpp::config::Config;
use ogpp::db::{self, Repository, indexed_name};
use ogpp::error::AppError;
use ogpp::logging;
use ogpp::riot::RiotClient;
use ogpp::sync::Syncer;
use tracing::error;

const USAGE: &str = "usage: ogpp-admin <census | unique-players | dedupe [name] | backfill-ranked | wipe --yes>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Census,
    UniquePlayers,
    Dedupe,
    BackfillRanked,
    Wipe,
}

impl Command {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "census" => Some(Self::Census),
            "unique-players" => Some(Self::UniquePlayers),
            "dedupe" => Some(Self::Dedupe),
            "backfill-ranked" => Some(Self::BackfillRanked),
            "wipe" => Some(Self::Wipe),
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(name) = args.first() else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };
    let Some(command) = Command::parse(name) else {
        eprintln!("unknown command {name}\n{USAGE}");
        return ExitCode::FAILURE;
    };

    match run(command, &args[1..]).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = ?e, "🛠️ ❌ Command failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, rest: &[String]) -> Result<(), AppError> {
    let config = Config::from_env()?;
    logging::init("ogpp-admin")?;

    let repository = Repository::new(db::connect(&config.database_url).await?);

    match command {
        Command::Census => {
            let counts = repository.table_counts().await?;
            for (table, count) in &counts {
                println!("{table} has {count} entries.");
            }
            let populated = counts.iter().filter(|(_, count)| *count > 0).count();
            println!("{populated} tables contain entries.");
        }
        Command::UniquePlayers => {
            println!("{}", repository.unique_player_count().await?);
        }
        Command::Dedupe => {
            let summoner_id = match rest.first() {
                Some(name) => {
                    let summoner = repository
                        .find_summoner(&indexed_name(name))
                        .await?
                        .ok_or_else(|| AppError::SummonerNotFound(name.clone()))?;
                    Some(summoner.id)
                }
                None => None,
            };
            let removed = repository.remove_duplicate_match_refs(summoner_id).await?;
            println!("Removed {removed} duplicated match references.");
        }
        Command::BackfillRanked => {
            let mut riot = RiotClient::new(
                config.riot_api_key.clone(),
                config.riot_platform,
                config.riot_rate_limit_per_second,
            );
            if let Some(base_url) = &config.riot_base_url {
                riot = riot.with_base_url(base_url.as_str());
            }
            let syncer = Syncer::new(repository, riot)
                .with_throttle(config.backfill_burst, config.backfill_pause);

            match syncer.populate_ranked_matches().await? {
                Some(total) => println!("Stored {total} matches."),
                None => println!("Backfill aborted, see the log."),
            }
        }
        Command::Wipe => {
            if !rest.iter().any(|a| a == "--yes") {
                println!("Refusing to wipe without --yes.");
                return Ok(());
            }
            repository.wipe().await?;
            println!("Done.");
        }
    }

    Ok(())
}
