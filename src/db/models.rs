use chrono::DateTime;
use serde::Serialize;
use sqlx::FromRow;

use crate::game::{self, UNRANKED};
use crate::stats::kda_ratio;

/// Lookup key of a display name: spaces removed, lowercased.
pub fn indexed_name(name: &str) -> String {
    name.replace(' ', "").to_lowercase()
}

/// Render a unix timestamp (seconds) like `Sun 03/10/2019 10:57PM`, in UTC.
pub fn format_timestamp(timestamp: f64) -> String {
    let secs = timestamp.trunc() as i64;
    let nanos = (timestamp.fract() * 1e9) as u32;
    DateTime::from_timestamp(secs, nanos)
        .map(|dt| dt.format("%a %m/%d/%Y %I:%M%p").to_string())
        .unwrap_or_default()
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Summoner {
    pub id: i64,
    pub name: String,
    pub indexed_name: String,
    pub level: i64,
    pub profile_icon: i32,
    pub account_id: String,
    pub summoner_id: String,
    pub highest_rank: String,
    pub rank_division: String,
    pub position: String,
    pub points: i32,
    pub wins: i32,
    pub losses: i32,
    pub ranked_mode: String,
}

impl Summoner {
    pub fn rank(&self) -> String {
        format!("{} {}", self.highest_rank, self.rank_division)
    }

    pub fn is_ranked(&self) -> bool {
        !self.highest_rank.eq_ignore_ascii_case(UNRANKED)
    }

    pub fn ranked_games_total(&self) -> i32 {
        self.wins + self.losses
    }

    /// Whole-percent win ratio; 100 when no ranked game was played.
    pub fn ranked_win_ratio(&self) -> i32 {
        match self.ranked_games_total() {
            0 => 100,
            total => self.wins * 100 / total,
        }
    }
}

/// The ranked position a summoner is displayed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankInfo {
    pub tier: String,
    pub division: String,
    pub league_points: i32,
    pub wins: i32,
    pub losses: i32,
    pub queue_type: String,
    pub position: String,
}

impl RankInfo {
    pub fn unranked() -> Self {
        Self {
            tier: UNRANKED.to_string(),
            division: String::new(),
            league_points: 0,
            wins: 0,
            losses: 0,
            queue_type: "none".to_string(),
            position: "none".to_string(),
        }
    }
}

/// Account data as fetched from upstream, ready to be stored.
#[derive(Debug, Clone)]
pub struct NewSummoner {
    pub name: String,
    pub level: i64,
    pub profile_icon: i32,
    pub account_id: String,
    pub summoner_id: String,
    pub rank: RankInfo,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MatchReference {
    pub id: i64,
    pub summoner_id: i64,
    pub match_id: i64,
    pub lane_played: String,
    pub champion_played: String,
    pub game_mode: i32,
    pub timestamp: f64,
}

impl MatchReference {
    pub fn queue_type(&self) -> &'static str {
        game::queue_name(self.game_mode)
    }

    pub fn date(&self) -> String {
        format_timestamp(self.timestamp)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMatchReference {
    pub match_id: i64,
    pub lane_played: String,
    pub champion_played: String,
    pub game_mode: i32,
    /// Seconds since epoch.
    pub timestamp: f64,
}

/// Detailed match, shared by every summoner that played in it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MatchRecord {
    pub id: i64,
    pub match_id: i64,
    pub game_mode: i32,
    pub timestamp: f64,
}

impl MatchRecord {
    pub fn queue_type(&self) -> &'static str {
        game::queue_name(self.game_mode)
    }

    pub fn date(&self) -> String {
        format_timestamp(self.timestamp)
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Participant {
    pub id: i64,
    pub game_id: i64,
    pub name: String,
    pub indexed_name: String,
    pub current_rank: String,
    pub champion_played: String,
    pub champion_level: i32,
    pub win: bool,
    pub team_id: i32,
    pub participant_id: i32,
    pub spell1: String,
    pub spell2: String,
    pub item1: i32,
    pub item2: i32,
    pub item3: i32,
    pub item4: i32,
    pub item5: i32,
    pub item6: i32,
    pub item7: i32,
    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    pub damage_dealt: i64,
    pub damage_healed: i64,
    pub gold_earned: i64,
    pub gold_spent: i64,
}

impl Participant {
    pub fn items(&self) -> [i32; 7] {
        [
            self.item1, self.item2, self.item3, self.item4, self.item5, self.item6, self.item7,
        ]
    }

    /// KDA rounded to two decimals.
    pub fn avg_kda(&self) -> f64 {
        (kda_ratio(self.kills, self.deaths, self.assists) * 100.0).round() / 100.0
    }

    pub fn kda(&self) -> String {
        format!("{}/{}/{}", self.kills, self.deaths, self.assists)
    }
}

#[derive(Debug, Clone)]
pub struct NewMatch {
    pub match_id: i64,
    pub game_mode: i32,
    pub timestamp: f64,
    pub participants: Vec<NewParticipant>,
}

#[derive(Debug, Clone)]
pub struct NewParticipant {
    pub name: String,
    pub champion_played: String,
    pub champion_level: i32,
    pub win: bool,
    pub team_id: i32,
    pub participant_id: i32,
    pub spell1: String,
    pub spell2: String,
    pub items: [i32; 7],
    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    pub damage_dealt: i64,
    pub damage_healed: i64,
    pub gold_earned: i64,
    pub gold_spent: i64,
}

/// One page of an ordered query.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn pages(&self) -> u32 {
        if self.per_page == 0 || self.total <= 0 {
            return 0;
        }
        (self.total as u64).div_ceil(u64::from(self.per_page)) as u32
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages()
    }
}
