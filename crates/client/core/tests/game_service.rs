use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use client_core::{
    DataFetcher, FetchError, GameService, PollEvent, Poller, RawResponse, ResultCache, Transport,
    TransportError,
};
use game_core::payload::{self, Encoding};
use game_core::{GameError, GameMap, GameStep, MatchRecord, SuccessPayload, TeamLogs};
use serde_json::json;

/// In-memory backend: canned responses per path, every request recorded.
#[derive(Default)]
struct MockTransport {
    responses: Mutex<HashMap<String, VecDeque<Result<RawResponse, TransportError>>>>,
    requests: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl MockTransport {
    fn respond(&self, path: &str, response: Result<RawResponse, TransportError>) {
        self.responses
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(response);
    }

    fn respond_json(&self, path: &str, body: serde_json::Value) {
        self.respond(path, Ok(RawResponse::new(200, "OK", body.to_string())));
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn requests(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<RawResponse, TransportError> {
        self.requests.lock().unwrap().push((
            path.to_string(),
            query.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
        ));

        self.responses
            .lock()
            .unwrap()
            .get_mut(path)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(TransportError::Network(format!("no canned response for {}", path))))
    }
}

fn service(transport: &Arc<MockTransport>, capacity: usize) -> GameService {
    let fetcher = DataFetcher::new(transport.clone());
    GameService::new(fetcher, ResultCache::new(capacity))
}

fn success_payload() -> SuccessPayload {
    SuccessPayload {
        max_move_count: 2,
        matches: vec![MatchRecord {
            offense_team_id: "t1".into(),
            defense_team_id: "t2".into(),
            logs: TeamLogs::default(),
            steps: vec![
                GameStep {
                    score: 0.0,
                    vision_radius: Some(1),
                    logs: vec![],
                    map: GameMap::new(vec![vec![2, 0], vec![0, 3]]),
                },
                GameStep {
                    score: 4.5,
                    vision_radius: Some(1),
                    logs: vec!["moved".into()],
                    map: GameMap::new(vec![vec![-1, 0], vec![2, 3]]),
                },
            ],
        }],
    }
}

fn game_body(id: &str, is_error: bool, extra: serde_json::Value) -> serde_json::Value {
    let mut body = json!({
        "id": id,
        "startTime": "2024-03-01T10:00:00Z",
        "endTime": "2024-03-01T10:02:05Z",
        "team1Id": "t1",
        "team2Id": "t2",
        "winnerId": "t1",
        "team1Score": 4.5,
        "team2Score": 1.0,
        "isError": is_error,
    });
    if let (Some(body), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
        body.extend(extra.clone());
    }
    body
}

#[tokio::test]
async fn cold_miss_fetches_once_then_serves_from_cache() {
    let transport = Arc::new(MockTransport::default());
    let game_data = payload::encode(&success_payload(), Encoding::Base64GzipJson)
        .expect("payload should encode");
    transport.respond_json("game/get", game_body("g1", false, json!({ "gameData": game_data })));

    let service = service(&transport, 25);

    let first = service.fetch_or_get("g1").await.expect("first fetch should succeed");
    assert_eq!(transport.request_count(), 1);
    assert_eq!(first.success(), Some(&success_payload()));

    let second = service.fetch_or_get("g1").await.expect("cache hit should succeed");
    assert_eq!(transport.request_count(), 1);
    assert!(Arc::ptr_eq(&first, &second));

    let peeked = service.peek("g1").expect("record should be cached");
    assert!(Arc::ptr_eq(&first, &peeked));

    let requests = transport.requests();
    assert_eq!(requests[0].0, "game/get");
    assert_eq!(requests[0].1, vec![("id".to_string(), "g1".to_string())]);
}

#[tokio::test]
async fn peek_never_touches_the_network() {
    let transport = Arc::new(MockTransport::default());
    let service = service(&transport, 25);

    assert!(service.peek("missing").is_none());
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn failed_fetch_leaves_cache_untouched() {
    let transport = Arc::new(MockTransport::default());
    transport.respond(
        "game/get",
        Ok(RawResponse::new(500, "Internal Server Error", "boom")),
    );
    transport.respond("game/get", Err(TransportError::Network("reset".into())));

    let service = service(&transport, 25);

    let err = service.fetch_or_get("g1").await.unwrap_err();
    assert_eq!(
        err,
        FetchError::Server {
            status: 500,
            reason: "Internal Server Error".into()
        }
    );
    assert!(service.peek("g1").is_none());

    let err = service.fetch_or_get("g1").await.unwrap_err();
    assert!(matches!(err, FetchError::Transport { .. }));
    assert!(service.cached_ids().is_empty());
    assert_eq!(transport.request_count(), 2);
}

#[tokio::test]
async fn game_ended_propagates_to_caller() {
    let transport = Arc::new(MockTransport::default());
    transport.respond("game/get", Ok(RawResponse::new(403, "Forbidden", "Forbidden\n")));

    let service = service(&transport, 25);
    let err = service.fetch_or_get("g1").await.unwrap_err();

    assert!(err.game_ended());
    assert_eq!(err.reason(), "Forbidden");
    assert!(service.peek("g1").is_none());
}

#[tokio::test]
async fn error_record_without_error_data_becomes_nodata() {
    let transport = Arc::new(MockTransport::default());
    transport.respond_json("game/get", game_body("g1", true, json!({})));

    let service = service(&transport, 25);
    let record = service.fetch_or_get("g1").await.expect("fetch should succeed");

    assert!(record.is_error());
    assert_eq!(record.error(), Some(&GameError::NoData));
    assert!(service.peek("g1").is_some());
}

#[tokio::test]
async fn success_record_without_game_data_becomes_nodata_error() {
    let transport = Arc::new(MockTransport::default());
    transport.respond_json("game/get", game_body("g1", false, json!({ "gameData": "" })));

    let service = service(&transport, 25);
    let record = service.fetch_or_get("g1").await.expect("fetch should succeed");

    assert!(record.is_error());
    assert!(record.base().is_error);
    assert_eq!(record.error(), Some(&GameError::NoData));
}

#[tokio::test]
async fn error_payload_is_decoded_from_base64() {
    let error = GameError::Simple {
        message: "container crashed".into(),
    };
    let error_data = payload::encode(&error, Encoding::Base64Json).expect("payload should encode");

    let transport = Arc::new(MockTransport::default());
    transport.respond_json("game/get", game_body("g1", true, json!({ "errorData": error_data })));

    let service = service(&transport, 25);
    let record = service.fetch_or_get("g1").await.expect("fetch should succeed");

    assert_eq!(record.error(), Some(&error));
}

#[tokio::test]
async fn cache_evicts_in_insertion_order_through_the_service() {
    let transport = Arc::new(MockTransport::default());
    for id in ["a", "b", "c"] {
        transport.respond_json("game/get", game_body(id, true, json!({})));
    }

    let service = service(&transport, 2);
    for id in ["a", "b", "c"] {
        service.fetch_or_get(id).await.expect("fetch should succeed");
    }

    assert_eq!(service.cached_ids(), vec!["b".to_string(), "c".to_string()]);
    assert!(service.peek("a").is_none());
}

#[tokio::test]
async fn leaderboard_sends_paging_query() {
    let transport = Arc::new(MockTransport::default());
    transport.respond_json(
        "game/list",
        json!({
            "results": [game_body("g1", false, json!({}))],
            "totalGameCount": 41,
        }),
    );

    let fetcher = DataFetcher::new(transport.clone());
    let page = fetcher.leaderboard(10, 3).await.expect("leaderboard should load");

    assert_eq!(page.total_game_count, 41);
    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].winner_id.as_deref(), Some("t1"));

    let requests = transport.requests();
    assert_eq!(requests[0].0, "game/list");
    assert_eq!(
        requests[0].1,
        vec![
            ("limit".to_string(), "10".to_string()),
            ("page".to_string(), "3".to_string()),
        ]
    );
}

#[tokio::test]
async fn stats_poller_stops_when_competition_ends() {
    let transport = Arc::new(MockTransport::default());
    transport.respond_json(
        "stats",
        json!({
            "totalGames": 12,
            "endTime": "2024-03-01T18:00:00Z",
            "rankingInfo": { "updatePeriod": 60, "results": [] },
        }),
    );
    transport.respond("stats", Ok(RawResponse::new(403, "Forbidden", "Forbidden")));

    let fetcher = DataFetcher::new(transport.clone());
    let (handle, mut events) = Poller::spawn("stats", Duration::from_millis(10), move || {
        let fetcher = fetcher.clone();
        async move { fetcher.stats().await }
    });

    let wait = Duration::from_secs(2);
    match tokio::time::timeout(wait, events.recv()).await.expect("first poll") {
        Some(PollEvent::Updated(stats)) => assert_eq!(stats.total_games, 12),
        other => panic!("unexpected event: {:?}", other),
    }
    assert_eq!(
        tokio::time::timeout(wait, events.recv()).await.expect("second poll"),
        Some(PollEvent::Ended)
    );
    assert_eq!(tokio::time::timeout(wait, events.recv()).await.expect("close"), None);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(transport.request_count(), 2);
    assert!(handle.is_finished());
}
