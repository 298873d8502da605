use std::str::FromStr;

use serde::Deserialize;

use crate::error::AppError;

// ============================================================================
// Summoner-v4
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummonerDto {
    /// Encrypted summoner id, used by League-v4 and Champion-Mastery-v4.
    pub id: String,
    /// Encrypted account id, used by Match-v4.
    pub account_id: String,
    pub name: String,
    pub profile_icon_id: i32,
    pub summoner_level: i64,
}

// ============================================================================
// League-v4
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntryDto {
    pub queue_type: String,
    pub tier: String,
    pub rank: String,
    pub league_points: i32,
    pub wins: i32,
    pub losses: i32,
    #[serde(default)]
    pub position: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueListDto {
    pub entries: Vec<LeagueItemDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueItemDto {
    pub summoner_name: String,
    pub league_points: i32,
    pub wins: i32,
    pub losses: i32,
}

/// Apex league a leaderboard is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeagueGroup {
    Challenger,
    Grandmaster,
    Master,
}

impl LeagueGroup {
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Challenger => "challengerleagues",
            Self::Grandmaster => "grandmasterleagues",
            Self::Master => "masterleagues",
        }
    }
}

impl FromStr for LeagueGroup {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "challenger" | "challengers" => Ok(Self::Challenger),
            "grandmaster" | "grandmasters" => Ok(Self::Grandmaster),
            "master" | "masters" => Ok(Self::Master),
            _ => Err(AppError::InvalidQueue(format!("unknown league group {s}"))),
        }
    }
}

// ============================================================================
// Champion-Mastery-v4
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionMasteryDto {
    pub champion_id: i32,
    pub champion_level: i32,
    pub champion_points: i64,
}

// ============================================================================
// Match-v4
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchlistDto {
    pub matches: Vec<MatchReferenceDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReferenceDto {
    pub game_id: i64,
    pub champion: i32,
    pub queue: i32,
    /// Milliseconds since epoch.
    pub timestamp: i64,
    #[serde(default)]
    pub lane: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDto {
    pub game_id: i64,
    pub queue_id: i32,
    pub participants: Vec<ParticipantDto>,
    pub participant_identities: Vec<ParticipantIdentityDto>,
}

impl MatchDto {
    /// Pairs each participant with the identity sharing its participant id.
    pub fn players(&self) -> impl Iterator<Item = (&ParticipantDto, Option<&PlayerDto>)> {
        self.participants.iter().map(|p| {
            let identity = self
                .participant_identities
                .iter()
                .find(|id| id.participant_id == p.participant_id)
                .map(|id| &id.player);
            (p, identity)
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub participant_id: i32,
    pub team_id: i32,
    pub champion_id: i32,
    pub spell1_id: i32,
    pub spell2_id: i32,
    pub stats: ParticipantStatsDto,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantStatsDto {
    pub champ_level: i32,
    pub win: bool,
    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    #[serde(default)]
    pub total_damage_dealt: i64,
    #[serde(default)]
    pub total_heal: i64,
    #[serde(default)]
    pub gold_earned: i64,
    #[serde(default)]
    pub gold_spent: i64,
    // Items (6 slots + ward)
    #[serde(default)]
    pub item0: i32,
    #[serde(default)]
    pub item1: i32,
    #[serde(default)]
    pub item2: i32,
    #[serde(default)]
    pub item3: i32,
    #[serde(default)]
    pub item4: i32,
    #[serde(default)]
    pub item5: i32,
    #[serde(default)]
    pub item6: i32,
}

impl ParticipantStatsDto {
    pub fn items(&self) -> [i32; 7] {
        [
            self.item0, self.item1, self.item2, self.item3, self.item4, self.item5, self.item6,
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantIdentityDto {
    pub participant_id: i32,
    pub player: PlayerDto,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDto {
    pub summoner_name: String,
}
