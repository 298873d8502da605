use crate::error::AppError;
use crate::riot::client::RiotClient;
use crate::riot::types::SummonerDto;

impl RiotClient {
    /// Get summoner account data (ids, level, icon) by display name.
    pub async fn get_summoner_by_name(&self, name: &str) -> Result<SummonerDto, AppError> {
        let path = format!(
            "/lol/summoner/v4/summoners/by-name/{}",
            urlencoding::encode(name)
        );

        self.get(&path, &[]).await.map_err(|e| {
            if matches!(&e, AppError::RiotApi { status: 404, .. }) {
                AppError::SummonerNotFound(name.to_string())
            } else {
                e
            }
        })
    }
}
