use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, instrument};

use super::{Syncer, absorb_storage_error};
use crate::db::{MatchRecord, MatchReference, NewMatch, NewParticipant, Participant};
use crate::error::AppError;
use crate::game::{champion_name, spell_name};
use crate::riot::MatchDto;

/// A stored match together with its ten players.
#[derive(Debug, Clone, Serialize)]
pub struct MatchDetail {
    pub record: MatchRecord,
    pub participants: Vec<Participant>,
}

fn to_new_match(dto: &MatchDto, timestamp: f64) -> NewMatch {
    let participants = dto
        .players()
        .map(|(p, player)| NewParticipant {
            name: player.map(|pl| pl.summoner_name.clone()).unwrap_or_default(),
            champion_played: champion_name(p.champion_id).to_string(),
            champion_level: p.stats.champ_level,
            win: p.stats.win,
            team_id: p.team_id,
            participant_id: p.participant_id,
            spell1: spell_name(p.spell1_id).to_string(),
            spell2: spell_name(p.spell2_id).to_string(),
            items: p.stats.items(),
            kills: p.stats.kills,
            deaths: p.stats.deaths,
            assists: p.stats.assists,
            damage_dealt: p.stats.total_damage_dealt,
            damage_healed: p.stats.total_heal,
            gold_earned: p.stats.gold_earned,
            gold_spent: p.stats.gold_spent,
        })
        .collect();

    NewMatch {
        match_id: dto.game_id,
        game_mode: dto.queue_id,
        timestamp,
        participants,
    }
}

/// `2 hours 05 minutes 09 seconds`
fn format_elapsed(secs: u64) -> String {
    format!(
        "{} hours {:02} minutes {:02} seconds",
        secs / 3600,
        secs % 3600 / 60,
        secs % 60
    )
}

impl Syncer {
    /// Detailed matches for a page of references, fetching the ones not stored yet.
    #[instrument(skip_all, fields(refs = refs.len()))]
    pub async fn get_match_stats(
        &self,
        refs: &[MatchReference],
    ) -> Result<Option<Vec<MatchDetail>>, AppError> {
        absorb_storage_error(self.match_details(refs).await)
    }

    async fn match_details(&self, refs: &[MatchReference]) -> Result<Vec<MatchDetail>, AppError> {
        let mut details = Vec::with_capacity(refs.len());

        for r in refs {
            let record = match self.db.find_match(r.match_id).await? {
                Some(record) => record,
                None => self.fetch_and_store(r).await?,
            };

            self.db.refresh_participant_ranks(record.id).await?;
            let participants = self.db.participants_of(record.id).await?;
            details.push(MatchDetail {
                record,
                participants,
            });
        }

        Ok(details)
    }

    async fn fetch_and_store(&self, r: &MatchReference) -> Result<MatchRecord, AppError> {
        let dto = self.riot.get_match(r.match_id).await?;
        self.throttle.lock().await.record_fetch().await;

        let record = self.db.insert_match(&to_new_match(&dto, r.timestamp)).await?;
        debug!(match_id = record.match_id, "⚔️ Match stored");
        Ok(record)
    }

    /// Stores the details of every ranked reference still missing them.
    /// Returns how many matches were fetched.
    #[instrument(skip(self))]
    pub async fn populate_ranked_matches(&self) -> Result<Option<u64>, AppError> {
        absorb_storage_error(self.backfill_ranked().await)
    }

    async fn backfill_ranked(&self) -> Result<u64, AppError> {
        let refs = self.db.all_ranked_match_refs().await?;
        info!(references = refs.len(), "⚔️ Ranked backfill started");

        let start = Instant::now();
        let mut total = 0;

        for r in &refs {
            if self.db.find_match(r.match_id).await?.is_some() {
                debug!(match_id = r.match_id, "⚔️ Already stored, skipping");
                continue;
            }
            self.fetch_and_store(r).await?;
            total += 1;
        }

        info!(
            total,
            elapsed = %format_elapsed(start.elapsed().as_secs()),
            "⚔️ ✅ Ranked backfill finished"
        );
        Ok(total)
    }
}
