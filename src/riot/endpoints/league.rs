use crate::error::AppError;
use crate::riot::client::RiotClient;
use crate::riot::types::{LeagueEntryDto, LeagueGroup, LeagueListDto};

impl RiotClient {
    /// Get every ranked position of a summoner by encrypted summoner id
    pub async fn get_league_entries(
        &self,
        summoner_id: &str,
    ) -> Result<Vec<LeagueEntryDto>, AppError> {
        let path = format!(
            "/lol/league/v4/entries/by-summoner/{}",
            urlencoding::encode(summoner_id)
        );

        self.get(&path, &[]).await
    }

    /// Get the apex league (challenger, grandmaster, master) of a ranked queue
    pub async fn get_league_list(
        &self,
        group: LeagueGroup,
        queue: &str,
    ) -> Result<LeagueListDto, AppError> {
        let path = format!(
            "/lol/league/v4/{}/by-queue/{}",
            group.path_segment(),
            urlencoding::encode(queue)
        );

        self.get(&path, &[]).await
    }
}
