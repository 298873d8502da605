use crate::error::AppError;
use crate::riot::client::RiotClient;
use crate::riot::types::{MatchDto, MatchlistDto};

/// Optional filters of the match list endpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchListQuery {
    pub end_index: Option<u32>,
    pub queue: Option<i32>,
    pub champion: Option<i32>,
}

impl MatchListQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(end_index) = self.end_index {
            params.push(("endIndex", end_index.to_string()));
        }
        if let Some(queue) = self.queue {
            params.push(("queue", queue.to_string()));
        }
        if let Some(champion) = self.champion {
            params.push(("champion", champion.to_string()));
        }
        params
    }
}

impl RiotClient {
    /// Get the match list of an account, newest first.
    pub async fn get_match_list(
        &self,
        account_id: &str,
        query: &MatchListQuery,
    ) -> Result<MatchlistDto, AppError> {
        let path = format!(
            "/lol/match/v4/matchlists/by-account/{}",
            urlencoding::encode(account_id)
        );

        self.get(&path, &query.params()).await
    }

    /// Get match details by game id
    pub async fn get_match(&self, game_id: i64) -> Result<MatchDto, AppError> {
        let path = format!("/lol/match/v4/matches/{game_id}");

        self.get(&path, &[]).await
    }
}
