mod common;

use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;

use common::*;
use ogpp::db::HistoryFilter;
use ogpp::error::AppError;
use ogpp::stats::RankedStats;

const AHRI: i32 = 103;
const LUX: i32 = 99;

#[tokio::test]
async fn lookup_hits_upstream_once_per_normalized_name() {
    let server = MockServer::start_async().await;
    let syncer = syncer(&server).await;

    let summoner_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/lol/summoner/v4/summoners/by-name/SomeBody")
                .query_param("api_key", API_KEY);
            then.status(200).json_body(summoner_json("SomeBody"));
        })
        .await;
    let league_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/lol/league/v4/entries/by-summoner/sum-SomeBody");
            then.status(200).json_body(json!([
                league_entry("RANKED_FLEX_SR", "GOLD", "I", 80),
                league_entry("RANKED_SOLO_5x5", "PLATINUM", "IV", 12),
            ]));
        })
        .await;
    let history_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/lol/match/v4/matchlists/by-account/acc-SomeBody")
                .query_param("endIndex", "50");
            then.status(200)
                .json_body(match_list(&[(2, AHRI, 420, 2_000), (1, LUX, 450, 1_000)]));
        })
        .await;

    let first = syncer.grab_summoner("SomeBody").await.unwrap().unwrap();
    let second = syncer.grab_summoner(" some body ").await.unwrap().unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.rank(), "PLATINUM IV");
    assert_eq!(first.ranked_mode, "RANKED_SOLO_5x5");
    assert_eq!(syncer.db().count_match_refs(first.id).await.unwrap(), 2);

    summoner_mock.assert_hits_async(1).await;
    league_mock.assert_hits_async(1).await;
    history_mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn summoner_without_league_entries_is_unranked() {
    let server = MockServer::start_async().await;
    let syncer = syncer(&server).await;

    server
        .mock_async(|when, then| {
            when.path("/lol/summoner/v4/summoners/by-name/Newbie");
            then.status(200).json_body(summoner_json("Newbie"));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.path("/lol/league/v4/entries/by-summoner/sum-Newbie");
            then.status(200).json_body(json!([]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.path("/lol/match/v4/matchlists/by-account/acc-Newbie");
            then.status(200).json_body(match_list(&[]));
        })
        .await;

    let summoner = syncer.grab_summoner("Newbie").await.unwrap().unwrap();
    assert!(!summoner.is_ranked());
    assert_eq!(summoner.highest_rank, "unranked");
    assert_eq!(summoner.rank_division, "");
    assert_eq!(summoner.ranked_mode, "none");
    assert_eq!(summoner.position, "none");
    assert_eq!(summoner.points, 0);
}

#[tokio::test]
async fn unknown_summoner_is_reported() {
    let server = MockServer::start_async().await;
    let syncer = syncer(&server).await;

    server
        .mock_async(|when, then| {
            when.path("/lol/summoner/v4/summoners/by-name/Nobody");
            then.status(404)
                .json_body(json!({ "status": { "message": "Data not found", "status_code": 404 } }));
        })
        .await;

    let err = syncer.grab_summoner("Nobody").await.unwrap_err();
    assert!(matches!(err, AppError::SummonerNotFound(_)));
}

#[tokio::test]
async fn storage_failure_aborts_without_error() {
    let server = MockServer::start_async().await;
    let syncer = syncer(&server).await;

    let summoner_mock = server
        .mock_async(|when, then| {
            when.path("/lol/summoner/v4/summoners/by-name/SomeBody");
            then.status(200).json_body(summoner_json("SomeBody"));
        })
        .await;

    syncer.db().pool().close().await;

    assert!(syncer.grab_summoner("SomeBody").await.unwrap().is_none());
    summoner_mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn repeated_history_fetches_never_duplicate() {
    let server = MockServer::start_async().await;
    let syncer = syncer(&server).await;

    server
        .mock_async(|when, then| {
            when.path("/lol/summoner/v4/summoners/by-name/SomeBody");
            then.status(200).json_body(summoner_json("SomeBody"));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.path("/lol/league/v4/entries/by-summoner/sum-SomeBody");
            then.status(200).json_body(json!([]));
        })
        .await;
    let history_mock = server
        .mock_async(|when, then| {
            when.path("/lol/match/v4/matchlists/by-account/acc-SomeBody");
            then.status(200).json_body(match_list(&[
                (3, AHRI, 420, 3_000),
                (2, AHRI, 420, 2_000),
                (1, LUX, 440, 1_000),
            ]));
        })
        .await;

    let summoner = syncer.grab_summoner("SomeBody").await.unwrap().unwrap();
    assert_eq!(syncer.populate_match_history(&summoner).await.unwrap(), Some(0));
    assert_eq!(syncer.populate_match_history(&summoner).await.unwrap(), Some(0));

    assert_eq!(syncer.db().count_match_refs(summoner.id).await.unwrap(), 3);
    history_mock.assert_hits_async(3).await;
}

#[tokio::test]
async fn incremental_refresh_stops_at_first_known_match() {
    let server = MockServer::start_async().await;
    let syncer = syncer(&server).await;

    server
        .mock_async(|when, then| {
            when.path("/lol/summoner/v4/summoners/by-name/SomeBody");
            then.status(200).json_body(summoner_json("SomeBody"));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.path("/lol/league/v4/entries/by-summoner/sum-SomeBody");
            then.status(200).json_body(json!([]));
        })
        .await;
    let mut initial = server
        .mock_async(|when, then| {
            when.path("/lol/match/v4/matchlists/by-account/acc-SomeBody");
            then.status(200)
                .json_body(match_list(&[(3, AHRI, 420, 3_000), (2, AHRI, 420, 2_000)]));
        })
        .await;

    let summoner = syncer.grab_summoner("SomeBody").await.unwrap().unwrap();
    initial.delete_async().await;

    // 99 sits behind a known match and must not be reached.
    server
        .mock_async(|when, then| {
            when.path("/lol/match/v4/matchlists/by-account/acc-SomeBody");
            then.status(200).json_body(match_list(&[
                (5, LUX, 420, 5_000),
                (4, LUX, 420, 4_000),
                (3, AHRI, 420, 3_000),
                (99, AHRI, 420, 500),
            ]));
        })
        .await;

    let inserted = syncer.update_match_history(&summoner).await.unwrap();
    assert_eq!(inserted, Some(2));

    let db = syncer.db();
    assert_eq!(db.count_match_refs(summoner.id).await.unwrap(), 4);
    assert!(db.match_ref_exists(summoner.id, 5).await.unwrap());
    assert!(!db.match_ref_exists(summoner.id, 99).await.unwrap());

    let page = db
        .match_refs_page(summoner.id, &HistoryFilter::default(), 1, 5)
        .await
        .unwrap();
    let ids: Vec<_> = page.items.iter().map(|r| r.match_id).collect();
    assert_eq!(ids, vec![5, 4, 3, 2]);
    assert_eq!(page.items[0].timestamp, 5.0);
}

#[tokio::test]
async fn backfill_stores_once_and_refreshes_known_ranks() {
    let server = MockServer::start_async().await;
    let syncer = syncer(&server).await;

    server
        .mock_async(|when, then| {
            when.path("/lol/summoner/v4/summoners/by-name/SomeBody");
            then.status(200).json_body(summoner_json("SomeBody"));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.path("/lol/league/v4/entries/by-summoner/sum-SomeBody");
            then.status(200)
                .json_body(json!([league_entry("RANKED_SOLO_5x5", "GOLD", "II", 40)]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.path("/lol/match/v4/matchlists/by-account/acc-SomeBody");
            then.status(200)
                .json_body(match_list(&[(11, AHRI, 420, 2_000), (10, LUX, 440, 1_000)]));
        })
        .await;
    let game_11 = server
        .mock_async(|when, then| {
            when.path("/lol/match/v4/matches/11");
            then.status(200).json_body(match_detail(
                11,
                420,
                &[
                    ("SomeBody", AHRI, 100, true, 10, 0, 5),
                    ("Stranger", LUX, 200, false, 1, 5, 2),
                ],
            ));
        })
        .await;
    let game_10 = server
        .mock_async(|when, then| {
            when.path("/lol/match/v4/matches/10");
            then.status(200).json_body(match_detail(
                10,
                440,
                &[
                    ("Stranger", AHRI, 100, true, 4, 2, 4),
                    ("SomeBody", LUX, 200, false, 2, 4, 6),
                ],
            ));
        })
        .await;

    let summoner = syncer.grab_summoner("SomeBody").await.unwrap().unwrap();
    let page = syncer
        .db()
        .match_refs_page(summoner.id, &HistoryFilter::default(), 1, 5)
        .await
        .unwrap();

    let first = syncer.get_match_stats(&page.items).await.unwrap().unwrap();
    let second = syncer.get_match_stats(&page.items).await.unwrap().unwrap();

    game_11.assert_hits_async(1).await;
    game_10.assert_hits_async(1).await;
    assert_eq!(first.len(), 2);
    assert_eq!(second[0].record.match_id, 11);
    assert_eq!(second[0].record.timestamp, 2.0);

    let players = &second[0].participants;
    assert_eq!(players.len(), 2);
    assert_eq!(players[0].current_rank, "GOLD II");
    assert_eq!(players[0].kda(), "10/0/5");
    assert_eq!(players[0].avg_kda(), 15.0);
    assert_eq!(players[0].spell1, "Flash");
    assert_eq!(players[1].current_rank, "unranked");

    let games = syncer.db().ranked_champion_games(&summoner).await.unwrap();
    let stats = RankedStats::from_games(&games);
    assert_eq!(stats.win_loss, "1W/1L");
    assert_eq!(stats.win_ratio, "50% Winrate");
    assert_eq!(stats.champions.len(), 2);
}

#[tokio::test]
async fn concurrent_viewers_of_a_shared_match_both_get_it() {
    let server = MockServer::start_async().await;
    let syncer = syncer(&server).await;

    for name in ["Alpha", "Beta"] {
        server
            .mock_async(|when, then| {
                when.path(format!("/lol/summoner/v4/summoners/by-name/{name}"));
                then.status(200).json_body(summoner_json(name));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.path(format!("/lol/league/v4/entries/by-summoner/sum-{name}"));
                then.status(200).json_body(json!([]));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.path(format!("/lol/match/v4/matchlists/by-account/acc-{name}"));
                then.status(200)
                    .json_body(match_list(&[(77, AHRI, 420, 7_000)]));
            })
            .await;
    }
    server
        .mock_async(|when, then| {
            when.path("/lol/match/v4/matches/77");
            then.status(200)
                .delay(Duration::from_millis(100))
                .json_body(match_detail(
                    77,
                    420,
                    &[
                        ("Alpha", AHRI, 100, true, 5, 1, 3),
                        ("Beta", LUX, 200, false, 1, 5, 1),
                    ],
                ));
        })
        .await;

    let alpha = syncer.grab_summoner("Alpha").await.unwrap().unwrap();
    let beta = syncer.grab_summoner("Beta").await.unwrap().unwrap();
    let db = syncer.db();
    let alpha_page = db
        .match_refs_page(alpha.id, &HistoryFilter::default(), 1, 5)
        .await
        .unwrap();
    let beta_page = db
        .match_refs_page(beta.id, &HistoryFilter::default(), 1, 5)
        .await
        .unwrap();

    let (for_alpha, for_beta) = tokio::join!(
        syncer.get_match_stats(&alpha_page.items),
        syncer.get_match_stats(&beta_page.items),
    );
    let for_alpha = for_alpha.unwrap().unwrap();
    let for_beta = for_beta.unwrap().unwrap();

    assert_eq!(for_alpha[0].record.id, for_beta[0].record.id);
    assert_eq!(for_alpha[0].participants.len(), 2);
    assert_eq!(for_beta[0].participants.len(), 2);
}

#[tokio::test]
async fn ranked_backfill_skips_stored_and_non_ranked_games() {
    let server = MockServer::start_async().await;
    let syncer = syncer(&server).await;

    server
        .mock_async(|when, then| {
            when.path("/lol/summoner/v4/summoners/by-name/SomeBody");
            then.status(200).json_body(summoner_json("SomeBody"));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.path("/lol/league/v4/entries/by-summoner/sum-SomeBody");
            then.status(200).json_body(json!([]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.path("/lol/match/v4/matchlists/by-account/acc-SomeBody");
            then.status(200).json_body(match_list(&[
                (22, AHRI, 420, 3_000),
                (21, AHRI, 450, 2_000),
                (20, LUX, 440, 1_000),
            ]));
        })
        .await;

    let mut detail_mocks = Vec::new();
    for (game_id, queue) in [(22, 420), (20, 440)] {
        let mock = server
            .mock_async(|when, then| {
                when.path(format!("/lol/match/v4/matches/{game_id}"));
                then.status(200).json_body(match_detail(
                    game_id,
                    queue,
                    &[("SomeBody", AHRI, 100, true, 1, 1, 1)],
                ));
            })
            .await;
        detail_mocks.push(mock);
    }
    let aram = server
        .mock_async(|when, then| {
            when.path("/lol/match/v4/matches/21");
            then.status(200);
        })
        .await;

    syncer.grab_summoner("SomeBody").await.unwrap().unwrap();

    assert_eq!(syncer.populate_ranked_matches().await.unwrap(), Some(2));
    assert_eq!(syncer.populate_ranked_matches().await.unwrap(), Some(0));

    for mock in &detail_mocks {
        mock.assert_hits_async(1).await;
    }
    aram.assert_hits_async(0).await;
}

#[tokio::test]
async fn refresh_updates_rank_and_history() {
    let server = MockServer::start_async().await;
    let syncer = syncer(&server).await;

    server
        .mock_async(|when, then| {
            when.path("/lol/summoner/v4/summoners/by-name/SomeBody");
            then.status(200).json_body(summoner_json("SomeBody"));
        })
        .await;
    let mut unranked = server
        .mock_async(|when, then| {
            when.path("/lol/league/v4/entries/by-summoner/sum-SomeBody");
            then.status(200).json_body(json!([]));
        })
        .await;
    let mut history = server
        .mock_async(|when, then| {
            when.path("/lol/match/v4/matchlists/by-account/acc-SomeBody");
            then.status(200).json_body(match_list(&[(1, AHRI, 420, 1_000)]));
        })
        .await;

    let before = syncer.grab_summoner("SomeBody").await.unwrap().unwrap();
    assert!(!before.is_ranked());
    unranked.delete_async().await;
    history.delete_async().await;

    server
        .mock_async(|when, then| {
            when.path("/lol/league/v4/entries/by-summoner/sum-SomeBody");
            then.status(200)
                .json_body(json!([league_entry("RANKED_SOLO_5x5", "SILVER", "III", 55)]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.path("/lol/match/v4/matchlists/by-account/acc-SomeBody");
            then.status(200)
                .json_body(match_list(&[(2, LUX, 420, 2_000), (1, AHRI, 420, 1_000)]));
        })
        .await;

    let after = syncer.update_summoner_page("SomeBody").await.unwrap().unwrap();
    assert_eq!(after.id, before.id);
    assert_eq!(after.rank(), "SILVER III");
    assert_eq!(after.points, 55);

    let stored = syncer.db().find_summoner("somebody").await.unwrap().unwrap();
    assert_eq!(stored.rank(), "SILVER III");
    assert_eq!(syncer.db().count_match_refs(stored.id).await.unwrap(), 2);
}

#[tokio::test]
async fn leaderboard_is_ordered_by_points() {
    let server = MockServer::start_async().await;
    let syncer = syncer(&server).await;

    let league = server
        .mock_async(|when, then| {
            when.path("/lol/league/v4/challengerleagues/by-queue/RANKED_SOLO_5x5");
            then.status(200).json_body(json!({
                "tier": "CHALLENGER",
                "leagueId": "league",
                "queue": "RANKED_SOLO_5x5",
                "name": "Some League",
                "entries": [
                    { "summonerId": "a", "summonerName": "Second", "leaguePoints": 900, "rank": "I", "wins": 90, "losses": 10 },
                    { "summonerId": "b", "summonerName": "First", "leaguePoints": 1200, "rank": "I", "wins": 50, "losses": 50 },
                    { "summonerId": "c", "summonerName": "Third", "leaguePoints": 300, "rank": "I", "wins": 2, "losses": 1 }
                ]
            }));
        })
        .await;

    let rows = ogpp::stats::leaderboard(
        syncer.riot(),
        ogpp::riot::LeagueGroup::Challenger,
        "RANKED_SOLO_5x5",
    )
    .await
    .unwrap();

    let names: Vec<_> = rows.iter().map(|r| (r.rank, r.name.as_str())).collect();
    assert_eq!(names, vec![(1, "First"), (2, "Second"), (3, "Third")]);
    assert_eq!(rows[0].winrate, "50.00%");
    assert_eq!(rows[2].winrate, "66.67%");
    league.assert_async().await;
}

#[tokio::test]
async fn leaderboard_rejects_unknown_queues() {
    let server = MockServer::start_async().await;
    let syncer = syncer(&server).await;

    let err = ogpp::stats::leaderboard(syncer.riot(), ogpp::riot::LeagueGroup::Master, "ARAM")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidQueue(_)));
}
