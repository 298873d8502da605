use tracing::{debug, info, instrument};

use super::{Syncer, absorb_storage_error};
use crate::db::{NewSummoner, RankInfo, Summoner, indexed_name};
use crate::error::AppError;
use crate::game::rank_weight;
use crate::riot::LeagueEntryDto;

/// Picks the entry with the heaviest tier, division and LP.
/// An empty listing yields the unranked placeholder.
pub fn select_highest_rank(entries: &[LeagueEntryDto]) -> RankInfo {
    entries
        .iter()
        .max_by_key(|e| rank_weight(&e.tier, &e.rank, e.league_points))
        .map(|e| RankInfo {
            tier: e.tier.clone(),
            division: e.rank.clone(),
            league_points: e.league_points,
            wins: e.wins,
            losses: e.losses,
            queue_type: e.queue_type.clone(),
            position: e.position.clone().unwrap_or_else(|| "none".to_string()),
        })
        .unwrap_or_else(RankInfo::unranked)
}

impl Syncer {
    /// Stored summoner for `name`, fetched and stored with its history on a miss.
    #[instrument(skip(self))]
    pub async fn grab_summoner(&self, name: &str) -> Result<Option<Summoner>, AppError> {
        absorb_storage_error(self.lookup_or_fetch(name).await)
    }

    async fn lookup_or_fetch(&self, name: &str) -> Result<Summoner, AppError> {
        let key = indexed_name(name);
        if let Some(summoner) = self.db.find_summoner(&key).await? {
            debug!(summoner_id = summoner.id, "🔎 Summoner served from store");
            return Ok(summoner);
        }

        let dto = self.riot.get_summoner_by_name(name).await?;
        let entries = self.riot.get_league_entries(&dto.id).await?;
        let rank = select_highest_rank(&entries);

        let summoner = self
            .db
            .insert_summoner(&NewSummoner {
                name: dto.name,
                level: dto.summoner_level,
                profile_icon: dto.profile_icon_id,
                account_id: dto.account_id,
                summoner_id: dto.id,
                rank,
            })
            .await?;

        info!(
            summoner_id = summoner.id,
            name = %summoner.name,
            rank = %summoner.rank(),
            "🔎 ✅ New summoner stored"
        );

        self.fetch_match_history(&summoner).await?;
        Ok(summoner)
    }

    /// Re-reads level, icon and rank from upstream. Returns the updated row.
    #[instrument(skip_all, fields(summoner = %summoner.name))]
    pub async fn update_summoner_info(
        &self,
        summoner: &Summoner,
    ) -> Result<Option<Summoner>, AppError> {
        absorb_storage_error(self.refresh_info(summoner).await)
    }

    async fn refresh_info(&self, summoner: &Summoner) -> Result<Summoner, AppError> {
        let dto = self.riot.get_summoner_by_name(&summoner.name).await?;
        let entries = self.riot.get_league_entries(&dto.id).await?;
        let rank = select_highest_rank(&entries);

        self.db
            .update_summoner_profile(summoner.id, dto.summoner_level, dto.profile_icon_id, &rank)
            .await?;
        debug!(tier = %rank.tier, division = %rank.division, "🔎 Summoner info refreshed");

        Ok(Summoner {
            level: dto.summoner_level,
            profile_icon: dto.profile_icon_id,
            highest_rank: rank.tier,
            rank_division: rank.division,
            position: rank.position,
            points: rank.league_points,
            wins: rank.wins,
            losses: rank.losses,
            ranked_mode: rank.queue_type,
            ..summoner.clone()
        })
    }

    /// New history entries plus fresh summoner info, for the refresh action.
    #[instrument(skip(self))]
    pub async fn update_summoner_page(&self, name: &str) -> Result<Option<Summoner>, AppError> {
        let Some(summoner) = self.grab_summoner(name).await? else {
            return Ok(None);
        };

        if self.update_match_history(&summoner).await?.is_none() {
            return Ok(None);
        }
        self.update_summoner_info(&summoner).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(queue: &str, tier: &str, rank: &str, lp: i32) -> LeagueEntryDto {
        LeagueEntryDto {
            queue_type: queue.into(),
            tier: tier.into(),
            rank: rank.into(),
            league_points: lp,
            wins: 10,
            losses: 5,
            position: None,
        }
    }

    #[test]
    fn highest_weight_wins() {
        let rank = select_highest_rank(&[
            entry("RANKED_FLEX_SR", "GOLD", "I", 99),
            entry("RANKED_SOLO_5x5", "PLATINUM", "IV", 0),
            entry("RANKED_FLEX_TT", "GOLD", "II", 100),
        ]);
        assert_eq!(rank.tier, "PLATINUM");
        assert_eq!(rank.queue_type, "RANKED_SOLO_5x5");
        assert_eq!(rank.position, "none");
    }

    #[test]
    fn points_decide_between_equal_divisions() {
        let rank = select_highest_rank(&[
            entry("RANKED_SOLO_5x5", "SILVER", "II", 10),
            entry("RANKED_FLEX_SR", "SILVER", "II", 60),
        ]);
        assert_eq!(rank.queue_type, "RANKED_FLEX_SR");
    }

    #[test]
    fn empty_listing_is_unranked() {
        assert_eq!(select_highest_rank(&[]), RankInfo::unranked());
    }
}
