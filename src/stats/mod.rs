//! Aggregates and display views assembled from stored and fetched data.

mod champions;
mod leaderboard;
mod masteries;
mod pagination;
mod profile;
mod views;

pub use champions::{ChampionGame, ChampionSummary, ChampionView, RankedStats, top_champions};
pub use leaderboard::{LeaderboardRow, leaderboard, rank_league_entries};
pub use masteries::{MasteryView, champion_masteries};
pub use pagination::{PageLink, Pagination};
pub use profile::{ProfileQuery, SummonerPage, summoner_page};
pub use views::{MatchView, SummonerView};

/// `(kills + assists) / deaths`; a deathless game counts as `kills + assists`.
pub fn kda_ratio(kills: i32, deaths: i32, assists: i32) -> f64 {
    let takedowns = f64::from(kills + assists);
    if deaths == 0 {
        takedowns
    } else {
        takedowns / f64::from(deaths)
    }
}
