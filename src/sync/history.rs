use tracing::{debug, info, instrument};

use super::{Syncer, absorb_storage_error};
use crate::db::{NewMatchReference, Summoner};
use crate::error::AppError;
use crate::game::champion_name;
use crate::riot::{MatchListQuery, MatchReferenceDto};

fn to_new_reference(dto: &MatchReferenceDto) -> NewMatchReference {
    NewMatchReference {
        match_id: dto.game_id,
        lane_played: dto.lane.clone(),
        champion_played: champion_name(dto.champion).to_string(),
        game_mode: dto.queue,
        timestamp: dto.timestamp as f64 / 1000.0,
    }
}

impl Syncer {
    /// Stores the summoner's recent history. Returns how many references were new.
    #[instrument(skip_all, fields(summoner = %summoner.name))]
    pub async fn populate_match_history(
        &self,
        summoner: &Summoner,
    ) -> Result<Option<u64>, AppError> {
        absorb_storage_error(self.fetch_match_history(summoner).await)
    }

    pub(super) async fn fetch_match_history(&self, summoner: &Summoner) -> Result<u64, AppError> {
        let list = self
            .riot
            .get_match_list(&summoner.account_id, &self.history_query())
            .await?;

        let refs: Vec<_> = list.matches.iter().map(to_new_reference).collect();
        let inserted = self.db.insert_match_refs(summoner.id, &refs).await?;

        info!(fetched = refs.len(), inserted, "📜 Match history populated");
        Ok(inserted)
    }

    /// Stores entries newer than the newest one already known.
    #[instrument(skip_all, fields(summoner = %summoner.name))]
    pub async fn update_match_history(
        &self,
        summoner: &Summoner,
    ) -> Result<Option<u64>, AppError> {
        absorb_storage_error(self.fetch_new_history(summoner).await)
    }

    async fn fetch_new_history(&self, summoner: &Summoner) -> Result<u64, AppError> {
        let list = self
            .riot
            .get_match_list(&summoner.account_id, &self.history_query())
            .await?;

        let mut fresh = Vec::new();
        for dto in &list.matches {
            if self.db.match_ref_exists(summoner.id, dto.game_id).await? {
                debug!(match_id = dto.game_id, "📜 Reached a known match");
                break;
            }
            fresh.push(to_new_reference(dto));
        }

        if fresh.is_empty() {
            debug!("📜 History already up to date");
            return Ok(0);
        }

        let inserted = self.db.insert_match_refs(summoner.id, &fresh).await?;
        info!(inserted, "📜 Match history updated");
        Ok(inserted)
    }

    fn history_query(&self) -> MatchListQuery {
        MatchListQuery {
            end_index: Some(self.history_end_index),
            ..Default::default()
        }
    }
}
