use std::sync::Arc;

use chrono::{TimeZone, Utc};
use clubhub_api::credentials::{ADMIN_PROFILE, ADMIN_TOKEN};
use clubhub_api::types::{AdminCredentials, MatchInput, MatchResult, MemberInput, TimeControl};
use clubhub_api::{Client, CredentialStore, LeaderboardQuery, MemoryCredentialStore};
use serde_json::json;
use wiremock::matchers::{any, body_json, header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[tokio::test]
async fn get_members_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/members"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("members.json")))
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri()).unwrap();
    let members = client.get_members().await.unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0].name, "Anika Rahman");
}

#[tokio::test]
async fn get_members_wrong_shape_is_classified() {
    let mock_server = MockServer::start().await;

    // A wrapped list where a bare list is expected.
    Mock::given(method("GET"))
        .and(path("/api/members"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"members": []})))
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri()).unwrap();
    let err = client.get_members().await.unwrap_err();
    assert_eq!(err.status(), 200);
    assert!(!err.is_server_error());
    assert!(err.message().starts_with("Unexpected response from server"));
}

#[tokio::test]
async fn get_member_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/members/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Member not found"})))
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri()).unwrap();
    let err = client.get_member("nope").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.message(), "Member not found");
}

#[tokio::test]
async fn get_leaderboard_sends_time_control() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/leaderboard"))
        .and(query_param("time_control", "blitz"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("leaderboard.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri()).unwrap();
    let board = client
        .get_leaderboard(&LeaderboardQuery::default().with_time_control(TimeControl::Blitz))
        .await
        .unwrap();
    assert_eq!(board.leaderboard[0].rank, 1);
}

#[tokio::test]
async fn login_stores_token_and_profile() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/admin/login"))
        .and(body_json(json!({"username": "root", "password": "hunter2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "jwt-abc",
            "admin": {"id": "a1", "username": "root", "email": "root@cu.ac.bd"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    let client = Client::with_credentials(&mock_server.uri(), store.clone()).unwrap();
    assert!(!client.is_logged_in());

    let session = client
        .login_admin(&AdminCredentials {
            username: "root".into(),
            password: "hunter2".into(),
        })
        .await
        .unwrap();
    assert_eq!(session.admin.username, "root");
    assert_eq!(store.get(ADMIN_TOKEN).as_deref(), Some("jwt-abc"));
    let profile: serde_json::Value =
        serde_json::from_str(&store.get(ADMIN_PROFILE).unwrap()).unwrap();
    assert_eq!(profile["email"], "root@cu.ac.bd");
    assert!(client.is_logged_in());

    client.logout();
    assert!(store.is_empty());
}

#[tokio::test]
async fn admin_calls_attach_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/stats"))
        .and(header("authorization", "Bearer jwt-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "members": 42, "tournaments": 3, "matches": 120, "news": 7
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    store.set(ADMIN_TOKEN, "jwt-abc");
    let client = Client::with_credentials(&mock_server.uri(), store).unwrap();
    let stats = client.get_stats().await.unwrap();
    assert_eq!(stats.members, 42);
    assert_eq!(stats.news, 7);
}

#[tokio::test]
async fn admin_calls_without_session_fail_locally() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri()).unwrap();
    let err = client.delete_member("m1").await.unwrap_err();
    assert!(err.is_auth_error());
    assert_eq!(err.message(), "Not logged in. Please login first.");
}

#[tokio::test]
async fn expired_session_during_admin_call_logs_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/admin/members"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Token expired"})))
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    store.set(ADMIN_TOKEN, "stale");
    let client = Client::with_credentials(&mock_server.uri(), store).unwrap();
    let err = client
        .create_member(&MemberInput {
            name: "New".into(),
            department: "CSE".into(),
            chess_com_username: "new_player".into(),
            email: "new@cu.ac.bd".into(),
            phone: None,
        })
        .await
        .unwrap_err();
    assert!(err.is_auth_error());
    assert!(!client.is_logged_in());
}

#[tokio::test]
async fn create_match_serializes_pgn_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/admin/matches"))
        .and(body_json(json!({
            "player1_id": "p1",
            "player2_id": "p2",
            "result": "0-1",
            "date": "2024-04-12T10:30:00Z"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "m-9",
            "player1_id": "p1",
            "player1_name": "Anika",
            "player2_id": "p2",
            "player2_name": "Tanvir",
            "result": "0-1",
            "date": "2024-04-12T10:30:00Z",
            "tournament_name": null,
            "created_at": "2024-04-12T11:00:00Z"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    store.set(ADMIN_TOKEN, "jwt");
    let client = Client::with_credentials(&mock_server.uri(), store).unwrap();
    let created = client
        .create_match(&MatchInput {
            player1_id: "p1".into(),
            player2_id: "p2".into(),
            result: MatchResult::BlackWins,
            date: Utc.with_ymd_and_hms(2024, 4, 12, 10, 30, 0).unwrap(),
            tournament_name: None,
        })
        .await
        .unwrap();
    assert_eq!(created.id, "m-9");
    assert_eq!(created.result, MatchResult::BlackWins);
}

#[tokio::test]
async fn ids_cannot_escape_their_resource() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path_regex(r"^/api/admin/members/[^/]+$"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Member not found"})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(any())
        .and(path_regex(r"^/api/admin/news"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "deleted"})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    store.set(ADMIN_TOKEN, "admin-jwt");
    let client = Client::with_credentials(&mock_server.uri(), store).unwrap();

    let err = client.delete_member("../news/abc").await.unwrap_err();
    assert!(err.is_not_found());

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/api/admin/members/..%2Fnews%2Fabc");
}

#[tokio::test]
async fn dot_ids_fail_locally() {
    let mock_server = MockServer::start().await;

    let store = Arc::new(MemoryCredentialStore::new());
    store.set(ADMIN_TOKEN, "admin-jwt");
    let client = Client::with_credentials(&mock_server.uri(), store).unwrap();

    let err = client.delete_news("..").await.unwrap_err();
    assert_eq!(err.status(), 400);
    let err = client.get_member("").await.unwrap_err();
    assert_eq!(err.status(), 400);
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn matches_with_free_text_results_still_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/matches"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("matches.json")))
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri()).unwrap();
    let matches = client.get_matches().await.unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].result, MatchResult::Draw);
    assert_eq!(matches[1].result, MatchResult::Other("adjourned".to_string()));
}
