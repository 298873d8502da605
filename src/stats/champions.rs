use std::collections::HashMap;

use serde::Serialize;
use sqlx::FromRow;

use super::kda_ratio;

const TOP_CHAMPIONS: usize = 5;

/// The summoner's own line in one stored ranked game.
#[derive(Debug, Clone, FromRow)]
pub struct ChampionGame {
    pub champion_played: String,
    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    pub win: bool,
}

impl ChampionGame {
    fn avg_kda(&self) -> f64 {
        (kda_ratio(self.kills, self.deaths, self.assists) * 100.0).round() / 100.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChampionSummary {
    pub name: String,
    pub games: u32,
    pub wins: u32,
    kda_sum: f64,
}

impl ChampionSummary {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            games: 0,
            wins: 0,
            kda_sum: 0.0,
        }
    }

    /// Share of games won, in `0.0..=1.0`.
    pub fn win_rate(&self) -> f64 {
        match self.games {
            0 => 0.0,
            games => f64::from(self.wins) / f64::from(games),
        }
    }

    pub fn avg_kda(&self) -> f64 {
        match self.games {
            0 => self.kda_sum,
            games => self.kda_sum / f64::from(games),
        }
    }
}

/// Per-champion totals, most played first, at most five.
pub fn top_champions(games: &[ChampionGame]) -> Vec<ChampionSummary> {
    let mut by_champion: HashMap<&str, ChampionSummary> = HashMap::new();

    for game in games {
        let summary = by_champion
            .entry(game.champion_played.as_str())
            .or_insert_with(|| ChampionSummary::new(&game.champion_played));
        summary.games += 1;
        summary.kda_sum += game.avg_kda();
        if game.win {
            summary.wins += 1;
        }
    }

    let mut champions: Vec<_> = by_champion.into_values().collect();
    champions.sort_by(|a, b| b.games.cmp(&a.games).then_with(|| a.name.cmp(&b.name)));
    champions.truncate(TOP_CHAMPIONS);
    champions
}

#[derive(Debug, Clone, Serialize)]
pub struct ChampionView {
    pub name: String,
    pub win_rate: String,
    pub avg_kda: String,
    pub total_played: u32,
    pub img: String,
}

impl From<&ChampionSummary> for ChampionView {
    fn from(summary: &ChampionSummary) -> Self {
        Self {
            name: summary.name.clone(),
            win_rate: format!("{:.2}% Winrate", summary.win_rate() * 100.0),
            avg_kda: format!("{:.2}", summary.avg_kda()),
            total_played: summary.games,
            img: format!("img/champion/{}.png", summary.name),
        }
    }
}

/// Ranked sidebar of a profile page.
#[derive(Debug, Clone, Serialize)]
pub struct RankedStats {
    pub champions: Vec<ChampionView>,
    pub win_loss: String,
    pub win_ratio: String,
}

impl RankedStats {
    /// Overall totals cover every game, the champion list only the top five.
    pub fn from_games(games: &[ChampionGame]) -> Self {
        let total = games.len();
        let wins = games.iter().filter(|g| g.win).count();

        let win_ratio = match total {
            0 => String::new(),
            total => format!("{}% Winrate", wins * 100 / total),
        };

        Self {
            champions: top_champions(games).iter().map(ChampionView::from).collect(),
            win_loss: format!("{}W/{}L", wins, total - wins),
            win_ratio,
        }
    }
}
