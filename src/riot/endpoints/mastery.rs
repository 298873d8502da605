use crate::error::AppError;
use crate::riot::client::RiotClient;
use crate::riot::types::ChampionMasteryDto;

impl RiotClient {
    pub async fn get_champion_masteries(
        &self,
        summoner_id: &str,
    ) -> Result<Vec<ChampionMasteryDto>, AppError> {
        let path = format!(
            "/lol/champion-mastery/v4/champion-masteries/by-summoner/{}",
            urlencoding::encode(summoner_id)
        );

        self.get(&path, &[]).await
    }
}
