use serde::Serialize;

use crate::db::{MatchRecord, Participant, Summoner};
use crate::game::{BLUE_SIDE, RED_SIDE};

#[derive(Debug, Clone, Serialize)]
pub struct SummonerView {
    pub name: String,
    pub profile_icon: String,
    pub level: i64,
    pub rank: String,
    pub points: String,
    pub win_loss: String,
    pub win_ratio: String,
}

impl From<&Summoner> for SummonerView {
    fn from(s: &Summoner) -> Self {
        let (points, win_loss, win_ratio) = if s.is_ranked() {
            (
                format!("{}LP", s.points),
                format!("{}W/{}L", s.wins, s.losses),
                format!("{}% Winrate", s.ranked_win_ratio()),
            )
        } else {
            Default::default()
        };

        Self {
            name: s.name.clone(),
            profile_icon: format!("img/profileicon/{}.png", s.profile_icon),
            level: s.level,
            rank: s.rank(),
            points,
            win_loss,
            win_ratio,
        }
    }
}

/// One game of a history page, split into teams.
#[derive(Debug, Clone, Serialize)]
pub struct MatchView {
    pub match_id: i64,
    pub game_mode: i32,
    pub queue_type: &'static str,
    pub timestamp: f64,
    pub date: String,
    pub players: Vec<Participant>,
    pub blue_side: Vec<Participant>,
    pub red_side: Vec<Participant>,
    /// `Victory` or `Defeat` from the viewed summoner's side.
    pub win: &'static str,
}

impl MatchView {
    pub fn new(record: &MatchRecord, players: Vec<Participant>, viewer: &str) -> Self {
        let side = |team_id| {
            players
                .iter()
                .filter(|p| p.team_id == team_id)
                .cloned()
                .collect::<Vec<_>>()
        };
        let blue_side = side(BLUE_SIDE);
        let red_side = side(RED_SIDE);

        let won = players
            .iter()
            .find(|p| p.indexed_name == viewer)
            .is_some_and(|p| p.win);

        Self {
            match_id: record.match_id,
            game_mode: record.game_mode,
            queue_type: record.queue_type(),
            timestamp: record.timestamp,
            date: record.date(),
            blue_side,
            red_side,
            players,
            win: if won { "Victory" } else { "Defeat" },
        }
    }
}
