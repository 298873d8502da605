use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::migrations::DEDUPE_MATCH_REFERENCES;
use super::models::{
    MatchRecord, MatchReference, NewMatch, NewMatchReference, NewSummoner, Page, Participant,
    RankInfo, Summoner, indexed_name,
};
use crate::error::AppError;
use crate::game::RANKED_QUEUES;
use crate::stats::ChampionGame;

const SUMMONER_COLUMNS: &str = "id, name, indexed_name, level, profile_icon, account_id, \
    summoner_id, highest_rank, rank_division, position, points, wins, losses, ranked_mode";

const MATCH_REF_COLUMNS: &str =
    "id, summoner_id, match_id, lane_played, champion_played, game_mode, timestamp";

const PARTICIPANT_COLUMNS: &str = "id, game_id, name, indexed_name, current_rank, \
    champion_played, champion_level, win, team_id, participant_id, spell1, spell2, \
    item1, item2, item3, item4, item5, item6, item7, kills, deaths, assists, \
    damage_dealt, damage_healed, gold_earned, gold_spent";

/// Filters of a summoner's match history listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryFilter {
    pub queue: Option<i32>,
    pub champion: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // === Summoner operations ===

    pub async fn find_summoner(&self, indexed_name: &str) -> Result<Option<Summoner>, AppError> {
        let summoner = sqlx::query_as::<_, Summoner>(&format!(
            "SELECT {SUMMONER_COLUMNS} FROM summoners WHERE indexed_name = ?"
        ))
        .bind(indexed_name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(summoner)
    }

    /// Stores a summoner; a known account (renamed since) is updated in place.
    pub async fn insert_summoner(&self, new: &NewSummoner) -> Result<Summoner, AppError> {
        let query = format!(
            r#"
            INSERT INTO summoners (
                name, indexed_name, level, profile_icon, account_id, summoner_id,
                highest_rank, rank_division, position, points, wins, losses, ranked_mode
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(account_id) DO UPDATE SET
                name = excluded.name,
                indexed_name = excluded.indexed_name,
                level = excluded.level,
                profile_icon = excluded.profile_icon,
                highest_rank = excluded.highest_rank,
                rank_division = excluded.rank_division,
                position = excluded.position,
                points = excluded.points,
                wins = excluded.wins,
                losses = excluded.losses,
                ranked_mode = excluded.ranked_mode
            RETURNING {SUMMONER_COLUMNS}
            "#
        );

        let summoner = sqlx::query_as::<_, Summoner>(&query)
            .bind(&new.name)
            .bind(indexed_name(&new.name))
            .bind(new.level)
            .bind(new.profile_icon)
            .bind(&new.account_id)
            .bind(&new.summoner_id)
            .bind(&new.rank.tier)
            .bind(&new.rank.division)
            .bind(&new.rank.position)
            .bind(new.rank.league_points)
            .bind(new.rank.wins)
            .bind(new.rank.losses)
            .bind(&new.rank.queue_type)
            .fetch_one(&self.pool)
            .await?;
        Ok(summoner)
    }

    pub async fn update_summoner_profile(
        &self,
        summoner_id: i64,
        level: i64,
        profile_icon: i32,
        rank: &RankInfo,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE summoners SET
                level = ?,
                profile_icon = ?,
                highest_rank = ?,
                rank_division = ?,
                position = ?,
                points = ?,
                wins = ?,
                losses = ?,
                ranked_mode = ?
            WHERE id = ?
            "#,
        )
        .bind(level)
        .bind(profile_icon)
        .bind(&rank.tier)
        .bind(&rank.division)
        .bind(&rank.position)
        .bind(rank.league_points)
        .bind(rank.wins)
        .bind(rank.losses)
        .bind(&rank.queue_type)
        .bind(summoner_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    // === Match reference operations ===

    /// Inserts references in one transaction, skipping pairs already stored.
    /// Returns the number of new rows.
    pub async fn insert_match_refs(
        &self,
        summoner_id: i64,
        refs: &[NewMatchReference],
    ) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for r in refs {
            inserted += sqlx::query(
                r#"
                INSERT OR IGNORE INTO match_references
                    (summoner_id, match_id, lane_played, champion_played, game_mode, timestamp)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(summoner_id)
            .bind(r.match_id)
            .bind(&r.lane_played)
            .bind(&r.champion_played)
            .bind(r.game_mode)
            .bind(r.timestamp)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    pub async fn match_ref_exists(&self, summoner_id: i64, match_id: i64) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, i32>(
            "SELECT 1 FROM match_references WHERE summoner_id = ? AND match_id = ?",
        )
        .bind(summoner_id)
        .bind(match_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(exists.is_some())
    }

    pub async fn count_match_refs(&self, summoner_id: i64) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM match_references WHERE summoner_id = ?",
        )
        .bind(summoner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Newest-first page of a summoner's history. `page` starts at 1.
    pub async fn match_refs_page(
        &self,
        summoner_id: i64,
        filter: &HistoryFilter,
        page: u32,
        per_page: u32,
    ) -> Result<Page<MatchReference>, AppError> {
        let page = page.max(1);

        let mut count = QueryBuilder::<Sqlite>::new(
            "SELECT COUNT(*) FROM match_references WHERE summoner_id = ",
        );
        count.push_bind(summoner_id);
        push_history_filter(&mut count, filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let mut select = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {MATCH_REF_COLUMNS} FROM match_references WHERE summoner_id = "
        ));
        select.push_bind(summoner_id);
        push_history_filter(&mut select, filter);
        select.push(" ORDER BY timestamp DESC, id ASC LIMIT ");
        select.push_bind(i64::from(per_page));
        select.push(" OFFSET ");
        select.push_bind(i64::from(page - 1) * i64::from(per_page));
        let items = select
            .build_query_as::<MatchReference>()
            .fetch_all(&self.pool)
            .await?;

        Ok(Page {
            items,
            page,
            per_page,
            total,
        })
    }

    /// Every ranked reference of every summoner, newest first.
    pub async fn all_ranked_match_refs(&self) -> Result<Vec<MatchReference>, AppError> {
        let refs = sqlx::query_as::<_, MatchReference>(&format!(
            "SELECT {MATCH_REF_COLUMNS} FROM match_references
             WHERE game_mode IN (?, ?)
             ORDER BY timestamp DESC"
        ))
        .bind(RANKED_QUEUES[0])
        .bind(RANKED_QUEUES[1])
        .fetch_all(&self.pool)
        .await?;
        Ok(refs)
    }

    pub async fn latest_match_ref_with_champion(
        &self,
        summoner_id: i64,
        champion: &str,
    ) -> Result<Option<MatchReference>, AppError> {
        let latest = sqlx::query_as::<_, MatchReference>(&format!(
            "SELECT {MATCH_REF_COLUMNS} FROM match_references
             WHERE summoner_id = ? AND champion_played = ?
             ORDER BY timestamp DESC
             LIMIT 1"
        ))
        .bind(summoner_id)
        .bind(champion)
        .fetch_optional(&self.pool)
        .await?;
        Ok(latest)
    }

    /// Deletes duplicated (summoner, match) rows, keeping the earliest one.
    /// `None` repairs every summoner.
    pub async fn remove_duplicate_match_refs(
        &self,
        summoner_id: Option<i64>,
    ) -> Result<u64, AppError> {
        let removed = match summoner_id {
            Some(id) => sqlx::query(
                r#"
                DELETE FROM match_references
                WHERE summoner_id = ?1 AND id NOT IN (
                    SELECT MIN(id) FROM match_references
                    WHERE summoner_id = ?1
                    GROUP BY match_id
                )
                "#,
            )
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected(),
            None => sqlx::query(DEDUPE_MATCH_REFERENCES)
                .execute(&self.pool)
                .await?
                .rows_affected(),
        };
        Ok(removed)
    }

    // === Match operations ===

    pub async fn find_match(&self, match_id: i64) -> Result<Option<MatchRecord>, AppError> {
        let record = sqlx::query_as::<_, MatchRecord>(
            "SELECT id, match_id, game_mode, timestamp FROM matches WHERE match_id = ?",
        )
        .bind(match_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    pub async fn participants_of(&self, game_id: i64) -> Result<Vec<Participant>, AppError> {
        let participants = sqlx::query_as::<_, Participant>(&format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE game_id = ? ORDER BY participant_id"
        ))
        .bind(game_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(participants)
    }

    /// Stores a match and its participants atomically. A match already stored
    /// by a concurrent request is returned as is, participants untouched.
    pub async fn insert_match(&self, new: &NewMatch) -> Result<MatchRecord, AppError> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_as::<_, MatchRecord>(
            r#"
            INSERT INTO matches (match_id, game_mode, timestamp)
            VALUES (?, ?, ?)
            ON CONFLICT(match_id) DO NOTHING
            RETURNING id, match_id, game_mode, timestamp
            "#,
        )
        .bind(new.match_id)
        .bind(new.game_mode)
        .bind(new.timestamp)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(record) = inserted else {
            let existing = sqlx::query_as::<_, MatchRecord>(
                "SELECT id, match_id, game_mode, timestamp FROM matches WHERE match_id = ?",
            )
            .bind(new.match_id)
            .fetch_one(&mut *tx)
            .await?;
            tx.commit().await?;
            return Ok(existing);
        };

        for p in &new.participants {
            sqlx::query(
                r#"
                INSERT INTO participants (
                    game_id, name, indexed_name, champion_played, champion_level, win,
                    team_id, participant_id, spell1, spell2,
                    item1, item2, item3, item4, item5, item6, item7,
                    kills, deaths, assists, damage_dealt, damage_healed, gold_earned, gold_spent
                )
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(record.id)
            .bind(&p.name)
            .bind(indexed_name(&p.name))
            .bind(&p.champion_played)
            .bind(p.champion_level)
            .bind(p.win)
            .bind(p.team_id)
            .bind(p.participant_id)
            .bind(&p.spell1)
            .bind(&p.spell2)
            .bind(p.items[0])
            .bind(p.items[1])
            .bind(p.items[2])
            .bind(p.items[3])
            .bind(p.items[4])
            .bind(p.items[5])
            .bind(p.items[6])
            .bind(p.kills)
            .bind(p.deaths)
            .bind(p.assists)
            .bind(p.damage_dealt)
            .bind(p.damage_healed)
            .bind(p.gold_earned)
            .bind(p.gold_spent)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(record)
    }

    /// Copies the stored rank of known summoners onto their participant rows
    /// of one match. Unknown players keep their current label.
    pub async fn refresh_participant_ranks(&self, game_id: i64) -> Result<u64, AppError> {
        let updated = sqlx::query(
            r#"
            UPDATE participants SET current_rank = (
                SELECT TRIM(s.highest_rank || ' ' || s.rank_division)
                FROM summoners s
                WHERE s.indexed_name = participants.indexed_name
            )
            WHERE game_id = ? AND EXISTS (
                SELECT 1 FROM summoners s WHERE s.indexed_name = participants.indexed_name
            )
            "#,
        )
        .bind(game_id)
        .execute(&self.pool)
        .await?
        .rows_affected();
        Ok(updated)
    }

    /// The summoner's own line of every stored ranked game, newest first.
    pub async fn ranked_champion_games(
        &self,
        summoner: &Summoner,
    ) -> Result<Vec<ChampionGame>, AppError> {
        let games = sqlx::query_as::<_, ChampionGame>(
            r#"
            SELECT r.champion_played, p.kills, p.deaths, p.assists, p.win
            FROM match_references r
            INNER JOIN matches m ON m.match_id = r.match_id
            INNER JOIN participants p ON p.game_id = m.id AND p.indexed_name = ?
            WHERE r.summoner_id = ? AND r.game_mode IN (?, ?)
            ORDER BY r.timestamp DESC
            "#,
        )
        .bind(&summoner.indexed_name)
        .bind(summoner.id)
        .bind(RANKED_QUEUES[0])
        .bind(RANKED_QUEUES[1])
        .fetch_all(&self.pool)
        .await?;
        Ok(games)
    }

    // === Administration ===

    /// Row count per table, in dependency order.
    pub async fn table_counts(&self) -> Result<Vec<(&'static str, i64)>, AppError> {
        let mut counts = Vec::new();
        for table in ["summoners", "match_references", "matches", "participants"] {
            let count = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
                .fetch_one(&self.pool)
                .await?;
            counts.push((table, count));
        }
        Ok(counts)
    }

    pub async fn unique_player_count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(DISTINCT name) FROM participants")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Empties every table.
    pub async fn wipe(&self) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        for table in ["participants", "matches", "match_references", "summoners"] {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}

fn push_history_filter(builder: &mut QueryBuilder<'_, Sqlite>, filter: &HistoryFilter) {
    if let Some(queue) = filter.queue {
        builder.push(" AND game_mode = ");
        builder.push_bind(queue);
    }
    if let Some(champion) = &filter.champion {
        builder.push(" AND champion_played = ");
        builder.push_bind(champion.clone());
    }
}
