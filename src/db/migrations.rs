use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::error::AppError;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS summoners (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    indexed_name TEXT UNIQUE NOT NULL,
    level INTEGER NOT NULL DEFAULT 0,
    profile_icon INTEGER NOT NULL DEFAULT 0,
    account_id TEXT UNIQUE NOT NULL,
    summoner_id TEXT UNIQUE NOT NULL,
    highest_rank TEXT NOT NULL DEFAULT 'unranked',
    rank_division TEXT NOT NULL DEFAULT '',
    position TEXT NOT NULL DEFAULT 'none',
    points INTEGER NOT NULL DEFAULT 0,
    wins INTEGER NOT NULL DEFAULT 0,
    losses INTEGER NOT NULL DEFAULT 0,
    ranked_mode TEXT NOT NULL DEFAULT 'none',
    created_at INTEGER NOT NULL DEFAULT (unixepoch())
);

CREATE TABLE IF NOT EXISTS match_references (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    summoner_id INTEGER NOT NULL,
    match_id INTEGER NOT NULL,
    lane_played TEXT NOT NULL DEFAULT '',
    champion_played TEXT NOT NULL,
    game_mode INTEGER NOT NULL,
    timestamp REAL NOT NULL,
    FOREIGN KEY (summoner_id) REFERENCES summoners(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS matches (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    match_id INTEGER UNIQUE NOT NULL,
    game_mode INTEGER NOT NULL,
    timestamp REAL NOT NULL
);

CREATE TABLE IF NOT EXISTS participants (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    game_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    indexed_name TEXT NOT NULL,
    current_rank TEXT NOT NULL DEFAULT 'unranked',
    champion_played TEXT NOT NULL,
    champion_level INTEGER NOT NULL DEFAULT 0,
    win INTEGER NOT NULL DEFAULT 0,
    team_id INTEGER NOT NULL,
    participant_id INTEGER NOT NULL,
    spell1 TEXT NOT NULL DEFAULT '',
    spell2 TEXT NOT NULL DEFAULT '',
    item1 INTEGER NOT NULL DEFAULT 0,
    item2 INTEGER NOT NULL DEFAULT 0,
    item3 INTEGER NOT NULL DEFAULT 0,
    item4 INTEGER NOT NULL DEFAULT 0,
    item5 INTEGER NOT NULL DEFAULT 0,
    item6 INTEGER NOT NULL DEFAULT 0,
    item7 INTEGER NOT NULL DEFAULT 0,
    kills INTEGER NOT NULL DEFAULT 0,
    deaths INTEGER NOT NULL DEFAULT 0,
    assists INTEGER NOT NULL DEFAULT 0,
    damage_dealt INTEGER NOT NULL DEFAULT 0,
    damage_healed INTEGER NOT NULL DEFAULT 0,
    gold_earned INTEGER NOT NULL DEFAULT 0,
    gold_spent INTEGER NOT NULL DEFAULT 0,
    FOREIGN KEY (game_id) REFERENCES matches(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_match_references_timeline ON match_references(summoner_id, timestamp);
CREATE INDEX IF NOT EXISTS idx_participants_game ON participants(game_id);
CREATE INDEX IF NOT EXISTS idx_participants_indexed_name ON participants(indexed_name);
"#;

/// Keeps the earliest row of every (summoner, match) pair.
pub(super) const DEDUPE_MATCH_REFERENCES: &str = r#"
DELETE FROM match_references
WHERE id NOT IN (
    SELECT MIN(id) FROM match_references GROUP BY summoner_id, match_id
)
"#;

const UNIQUE_MATCH_REFERENCES: &str = r#"
CREATE UNIQUE INDEX IF NOT EXISTS idx_match_references_unique
    ON match_references(summoner_id, match_id)
"#;

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;

    // Older databases may hold duplicates that would block the unique index.
    let removed = sqlx::query(DEDUPE_MATCH_REFERENCES)
        .execute(pool)
        .await?
        .rows_affected();
    if removed > 0 {
        warn!(removed, "🗄️ Removed duplicated match references");
    }

    sqlx::raw_sql(UNIQUE_MATCH_REFERENCES).execute(pool).await?;

    info!("🗄️ Database migrations completed");
    Ok(())
}
