use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{MatchView, Pagination, RankedStats, SummonerView};
use crate::db::{HistoryFilter, Summoner};
use crate::error::AppError;
use crate::game::{champion_id, champion_name, queue_id};
use crate::sync::{Syncer, absorb_storage_error};

const ALL: &str = "all";

/// Query string of a profile page. Missing filters mean `all`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileQuery {
    pub page: Option<u32>,
    pub queue: Option<String>,
    pub champion: Option<String>,
}

impl ProfileQuery {
    fn selected(value: &Option<String>) -> Option<&str> {
        value.as_deref().filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(ALL))
    }

    fn history_filter(&self) -> Result<HistoryFilter, AppError> {
        let queue = Self::selected(&self.queue)
            .map(|q| queue_id(q).ok_or_else(|| AppError::InvalidQueue(q.to_string())))
            .transpose()?;

        Ok(HistoryFilter {
            queue,
            champion: Self::selected(&self.champion).map(canonical_champion),
        })
    }

    /// Filters carried over into pagination links.
    fn link_params(&self) -> Vec<(&'static str, &str)> {
        let mut params = Vec::new();
        if let Some(queue) = Self::selected(&self.queue) {
            params.push(("queue", queue));
        }
        if let Some(champion) = Self::selected(&self.champion) {
            params.push(("champion", champion));
        }
        params
    }
}

/// `ahri` and `AHRI` both filter on the stored `Ahri`.
fn canonical_champion(name: &str) -> String {
    champion_id(name)
        .map(champion_name)
        .unwrap_or(name)
        .to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct SummonerPage {
    pub title: String,
    pub summoner: SummonerView,
    pub ranked_stats: RankedStats,
    pub matches: Vec<MatchView>,
    pub pagination: Pagination,
}

/// Everything a profile page shows. `None` when the store failed on the way.
#[instrument(skip(syncer, query))]
pub async fn summoner_page(
    syncer: &Syncer,
    name: &str,
    query: &ProfileQuery,
    per_page: u32,
) -> Result<Option<SummonerPage>, AppError> {
    let filter = query.history_filter()?;

    let Some(summoner) = syncer.grab_summoner(name).await? else {
        return Ok(None);
    };

    absorb_storage_error(assemble(syncer, summoner, query, &filter, per_page).await)
}

async fn assemble(
    syncer: &Syncer,
    summoner: Summoner,
    query: &ProfileQuery,
    filter: &HistoryFilter,
    per_page: u32,
) -> Result<SummonerPage, AppError> {
    let db = syncer.db();

    if db.count_match_refs(summoner.id).await? == 0 {
        debug!("📜 No stored history, populating");
        syncer.populate_match_history(&summoner).await?;
    }

    let page = db
        .match_refs_page(summoner.id, filter, query.page.unwrap_or(1), per_page)
        .await?;

    let details = syncer.get_match_stats(&page.items).await?.unwrap_or_default();
    let matches = details
        .into_iter()
        .map(|d| MatchView::new(&d.record, d.participants, &summoner.indexed_name))
        .collect();

    let games = db.ranked_champion_games(&summoner).await?;

    let base_path = format!("/summoner/{}", urlencoding::encode(&summoner.name));
    let pagination = Pagination::new(&page, &base_path, &query.link_params());

    Ok(SummonerPage {
        title: format!("Profile Page of {}", summoner.name),
        summoner: SummonerView::from(&summoner),
        ranked_stats: RankedStats::from_games(&games),
        matches,
        pagination,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_means_no_filter() {
        let query = ProfileQuery {
            page: None,
            queue: Some("all".into()),
            champion: Some("ALL".into()),
        };
        assert_eq!(query.history_filter().unwrap(), HistoryFilter::default());
        assert!(query.link_params().is_empty());
    }

    #[test]
    fn queue_keys_resolve_to_ids() {
        let query = ProfileQuery {
            page: Some(2),
            queue: Some("RANKED_SOLO".into()),
            champion: Some("ahri".into()),
        };
        let filter = query.history_filter().unwrap();
        assert_eq!(filter.queue, Some(420));
        assert_eq!(filter.champion.as_deref(), Some("Ahri"));
        assert_eq!(
            query.link_params(),
            vec![("queue", "RANKED_SOLO"), ("champion", "ahri")]
        );
    }

    #[test]
    fn unknown_queue_is_rejected() {
        let query = ProfileQuery {
            queue: Some("SPEED_RUN".into()),
            ..Default::default()
        };
        assert!(matches!(query.history_filter(), Err(AppError::InvalidQueue(_))));
    }
}
