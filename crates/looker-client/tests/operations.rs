use std::sync::Arc;

use looker_client::{
    fetch_look_sql, ConnectionConfig, LookerClient, MemorySource, StalenessUpdate,
};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

const TOKEN: &str = "fancy-pancy-access-token";

fn client_for(host: impl Into<String>) -> LookerClient {
    let source = MemorySource::new().with_connection(
        "looker_default",
        ConnectionConfig::new(host, "looker_api_client_id", "looker_api_client_secret"),
    );
    LookerClient::new(Arc::new(source)).expect("client")
}

async fn mock_login(server: &mut ServerGuard) -> mockito::Mock {
    server
        .mock("POST", "/login")
        .with_status(200)
        .with_body(json!({"access_token": TOKEN}).to_string())
        .create_async()
        .await
}

#[tokio::test]
async fn staleness_update_patches_the_datagroup() {
    let mut server = Server::new_async().await;
    mock_login(&mut server).await;
    let patch = server
        .mock("PATCH", "/api/3.0/datagroups/42")
        .match_header("authorization", format!("token {TOKEN}").as_str())
        .match_body(Matcher::PartialJson(json!({"stale_before": 1_700_000_000})))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = client_for(server.url());
    let response = StalenessUpdate::new(Some(42))
        .stale_before(1_700_000_000)
        .run(&client)
        .await
        .expect("update datagroup");

    assert_eq!(response.status, 200);
    patch.assert_async().await;
}

#[tokio::test]
async fn staleness_update_requires_a_datagroup_id() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/login")
        .expect(0)
        .create_async()
        .await;

    let client = client_for(server.url());
    let err = StalenessUpdate::new(None)
        .run(&client)
        .await
        .expect_err("no id");

    assert!(err.is_configuration());
    assert_eq!(err.to_string(), "datagroup_id not provided");
    login.assert_async().await;
}

#[tokio::test]
async fn staleness_update_rejects_statuses_above_ok() {
    let mut server = Server::new_async().await;
    mock_login(&mut server).await;
    server
        .mock("PATCH", "/api/3.0/datagroups/42")
        .with_status(204)
        .create_async()
        .await;

    let client = client_for(server.url());
    let err = StalenessUpdate::new(Some(42))
        .run(&client)
        .await
        .expect_err("204 is above 200");

    assert_eq!(err.to_string(), "204:No Content");
}

#[tokio::test]
async fn look_sql_returns_the_body_text() {
    let sql = "SELECT * FROM music_albums\nWHERE artist = \"cardi b\"\n";

    let mut server = Server::new_async().await;
    mock_login(&mut server).await;
    let run_sql = server
        .mock("GET", "/api/3.0/looks/1234/run/sql")
        .match_header("authorization", format!("token {TOKEN}").as_str())
        .with_status(200)
        .with_body(sql)
        .create_async()
        .await;

    let client = client_for(server.url());
    let query = fetch_look_sql(&client, Some(1234)).await.expect("look sql");

    assert_eq!(query, sql);
    run_sql.assert_async().await;
}

#[tokio::test]
async fn look_sql_requires_a_look_id() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/login")
        .expect(0)
        .create_async()
        .await;

    let client = client_for(server.url());
    let err = fetch_look_sql(&client, None).await.expect_err("no id");

    assert!(err.is_configuration());
    assert_eq!(err.to_string(), "look_id not provided");
    login.assert_async().await;
}

#[tokio::test]
async fn look_sql_propagates_dispatch_failures() {
    let mut server = Server::new_async().await;
    mock_login(&mut server).await;
    server
        .mock("GET", "/api/3.0/looks/134/run/sql")
        .with_status(400)
        .with_body("unknown look")
        .create_async()
        .await;

    let client = client_for(server.url());
    let err = fetch_look_sql(&client, Some(134)).await.expect_err("400");

    assert!(err.is_request());
    assert_eq!(err.to_string(), "400:Bad Request");
}
