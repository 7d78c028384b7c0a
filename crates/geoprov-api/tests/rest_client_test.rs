#![allow(clippy::unwrap_used)]
// Integration tests for `RestClient` using wiremock.

use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{basic_auth, body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use geoprov_api::{CreateOutcome, Credentials, Error, FeatureLayer, PostgisStore, RestClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, RestClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/geoserver", server.uri())).unwrap();
    let client = RestClient::with_client(
        reqwest::Client::new(),
        base_url,
        Credentials::new("admin", SecretString::from("geoserver")),
    )
    .unwrap();
    (server, client)
}

fn rest_path(suffix: &str) -> String {
    format!("/geoserver/rest/{suffix}")
}

// ── About tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_exists_true_on_version_answer() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(rest_path("about/version.json")))
        .and(basic_auth("admin", "geoserver"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "about": {
                "resource": [
                    { "@name": "GeoServer", "Version": "2.24.1" },
                    { "@name": "GeoTools", "Version": 30.1 }
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client.exists().await);
}

#[tokio::test]
async fn test_exists_false_on_rejected_credentials() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(rest_path("about/version.json")))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    assert!(!client.exists().await);
}

#[tokio::test]
async fn test_exists_false_when_unreachable() {
    let client = RestClient::with_client(
        reqwest::Client::new(),
        Url::parse("http://127.0.0.1:9/geoserver").unwrap(),
        Credentials::new("admin", SecretString::from("geoserver")),
    )
    .unwrap();

    assert!(!client.exists().await);
}

#[tokio::test]
async fn test_about_version_malformed_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(rest_path("about/version.json")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let result = client.about_version().await;
    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
    assert!(!client.exists().await);
}

// ── Security tests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_create_user_created() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(rest_path("security/usergroup/users")))
        .and(body_json(json!({
            "org.geoserver.rest.model.users.User": {
                "userName": "ops",
                "password": "s3cret",
                "enabled": true
            }
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client
        .create_user("ops", &SecretString::from("s3cret"))
        .await
        .unwrap();
    assert_eq!(outcome, CreateOutcome::Created);
}

#[tokio::test]
async fn test_create_user_already_exists() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(rest_path("security/usergroup/users")))
        .respond_with(ResponseTemplate::new(500).set_body_string("User already exists: ops"))
        .mount(&server)
        .await;

    let outcome = client
        .create_user("ops", &SecretString::from("s3cret"))
        .await
        .unwrap();
    assert_eq!(outcome, CreateOutcome::AlreadyExists);
}

#[tokio::test]
async fn test_associate_user_role() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(rest_path("security/roles/role/ADMIN/user/ops")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client.associate_user_role("ops", "ADMIN").await.unwrap();
}

#[tokio::test]
async fn test_update_user_disables_account() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(rest_path("security/usergroup/user/admin")))
        .and(body_json(json!({
            "org.geoserver.rest.model.users.User": {
                "password": "geoserver",
                "enabled": false
            }
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client
        .update_user("admin", &SecretString::from("geoserver"), false)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_use_credentials_changes_basic_auth() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(rest_path("workspaces")))
        .and(basic_auth("ops", "s3cret"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    client.use_credentials(Credentials::new("ops", SecretString::from("s3cret")));
    let outcome = client.create_workspace("osm").await.unwrap();
    assert!(outcome.is_created());
}

// ── Workspace tests ─────────────────────────────────────────────────

#[tokio::test]
async fn test_create_workspace_created() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(rest_path("workspaces")))
        .and(body_json(json!({ "workspace": { "name": "station" } })))
        .respond_with(ResponseTemplate::new(201).set_body_string("station"))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client.create_workspace("station").await.unwrap();
    assert_eq!(outcome, CreateOutcome::Created);
}

#[tokio::test]
async fn test_create_workspace_conflict_is_already_exists() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(rest_path("workspaces")))
        .respond_with(
            ResponseTemplate::new(409).set_body_string("Workspace 'station' already exists"),
        )
        .mount(&server)
        .await;

    let outcome = client.create_workspace("station").await.unwrap();
    assert_eq!(outcome, CreateOutcome::AlreadyExists);
}

#[tokio::test]
async fn test_create_workspace_server_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(rest_path("workspaces")))
        .respond_with(ResponseTemplate::new(500).set_body_string("invalid name"))
        .mount(&server)
        .await;

    match client.create_workspace("bad name").await {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("invalid name"), "got: {message}");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_create_workspace_unauthorized() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.create_workspace("osm").await;
    assert!(
        matches!(result, Err(ref e) if e.is_auth_failure()),
        "expected Authentication error, got: {result:?}"
    );
}

// ── Data store tests ────────────────────────────────────────────────

fn postgis() -> PostgisStore {
    PostgisStore {
        name: "postgis".into(),
        host: "db".into(),
        port: 5432,
        user: "postgres".into(),
        password: SecretString::from("pg-secret"),
        schema: "public".into(),
        database: "gis".into(),
    }
}

#[tokio::test]
async fn test_create_postgis_store() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(rest_path("workspaces/station/datastores")))
        .and(body_partial_json(json!({
            "dataStore": { "name": "postgis", "type": "PostGIS", "enabled": true }
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    client
        .create_postgis_store("station", &postgis())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_postgis_store_duplicate_is_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(rest_path("workspaces/station/datastores")))
        .respond_with(
            ResponseTemplate::new(500).set_body_string("Store 'postgis' already exists"),
        )
        .mount(&server)
        .await;

    let result = client.create_postgis_store("station", &postgis()).await;
    assert!(
        matches!(result, Err(Error::Api { status: 500, .. })),
        "expected Api error, got: {result:?}"
    );
}

// ── Layer tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_publish_feature_type() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(rest_path(
            "workspaces/station/datastores/postgis/featuretypes",
        )))
        .and(body_json(json!({
            "featureType": {
                "name": "stations",
                "nativeName": "station_points",
                "title": "Stations",
                "srs": "EPSG:4326",
                "enabled": true
            }
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let layer = FeatureLayer {
        workspace: "station".into(),
        store: "postgis".into(),
        native_name: "station_points".into(),
        name: "stations".into(),
        title: "Stations".into(),
        srs: "EPSG:4326".into(),
    };
    client.publish_feature_type(&layer).await.unwrap();
}
