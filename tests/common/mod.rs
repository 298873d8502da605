#![allow(dead_code)]

use std::num::NonZeroU32;
use std::time::Duration;

use httpmock::prelude::*;
use serde_json::{Value, json};

use ogpp::db::{self, Repository};
use ogpp::riot::{Platform, RiotClient};
use ogpp::sync::Syncer;

pub const API_KEY: &str = "test-key";

pub async fn syncer(server: &MockServer) -> Syncer {
    let pool = db::connect("sqlite::memory:").await.unwrap();
    let riot = RiotClient::new(
        API_KEY.to_string(),
        Platform::NA1,
        NonZeroU32::new(1000).unwrap(),
    )
    .with_base_url(server.base_url());

    Syncer::new(Repository::new(pool), riot)
        .with_history_end_index(50)
        .with_throttle(7, Duration::from_millis(1))
}

pub fn summoner_json(name: &str) -> Value {
    json!({
        "id": format!("sum-{name}"),
        "accountId": format!("acc-{name}"),
        "puuid": format!("puuid-{name}"),
        "name": name,
        "profileIconId": 588,
        "summonerLevel": 101
    })
}

pub fn league_entry(queue: &str, tier: &str, rank: &str, lp: i32) -> Value {
    json!({
        "leagueId": "league",
        "queueType": queue,
        "tier": tier,
        "rank": rank,
        "summonerId": "sum",
        "summonerName": "whoever",
        "leaguePoints": lp,
        "wins": 30,
        "losses": 20,
        "veteran": false,
        "inactive": false,
        "freshBlood": false,
        "hotStreak": false
    })
}

/// `(game id, champion id, queue, timestamp in ms)`, newest first.
pub fn match_list(entries: &[(i64, i32, i32, i64)]) -> Value {
    let matches: Vec<_> = entries
        .iter()
        .map(|(game_id, champion, queue, timestamp)| {
            json!({
                "platformId": "NA1",
                "gameId": game_id,
                "champion": champion,
                "queue": queue,
                "season": 13,
                "timestamp": timestamp,
                "role": "SOLO",
                "lane": "MID"
            })
        })
        .collect();

    json!({
        "matches": matches,
        "startIndex": 0,
        "endIndex": entries.len(),
        "totalGames": entries.len()
    })
}

/// `(summoner name, champion id, team id, win, kills, deaths, assists)`
pub fn match_detail(game_id: i64, queue: i32, players: &[(&str, i32, i32, bool, i32, i32, i32)]) -> Value {
    let participants: Vec<_> = players
        .iter()
        .enumerate()
        .map(|(i, (_, champion, team, win, kills, deaths, assists))| {
            json!({
                "participantId": i + 1,
                "teamId": team,
                "championId": champion,
                "spell1Id": 4,
                "spell2Id": 14,
                "stats": {
                    "participantId": i + 1,
                    "champLevel": 18,
                    "win": win,
                    "kills": kills,
                    "deaths": deaths,
                    "assists": assists,
                    "totalDamageDealt": 100000,
                    "totalHeal": 5000,
                    "goldEarned": 12000,
                    "goldSpent": 11000,
                    "item0": 3089,
                    "item1": 3020,
                    "item6": 3340
                }
            })
        })
        .collect();

    let identities: Vec<_> = players
        .iter()
        .enumerate()
        .map(|(i, (name, ..))| {
            json!({
                "participantId": i + 1,
                "player": {
                    "summonerName": name,
                    "accountId": format!("acc-{name}"),
                    "summonerId": format!("sum-{name}")
                }
            })
        })
        .collect();

    json!({
        "gameId": game_id,
        "platformId": "NA1",
        "gameCreation": 1_552_258_646_000i64,
        "gameDuration": 1800,
        "queueId": queue,
        "mapId": 11,
        "participants": participants,
        "participantIdentities": identities
    })
}
