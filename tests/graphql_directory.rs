//! Integration tests for the GraphQL atom directory against a mock indexer

#![cfg(feature = "client")]

use guild_sdk::{
    AtomDirectory, AtomReader, ChainError, DirectoryConfig, GraphqlAtomDirectory, GuildCatalog,
    TermId,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ID_A: &str = "0x1111111111111111111111111111111111111111111111111111111111111111";
const ID_B: &str = "0x2222222222222222222222222222222222222222222222222222222222222222";

fn directory(server: &MockServer) -> GraphqlAtomDirectory {
    GraphqlAtomDirectory::new(DirectoryConfig {
        graphql_url: format!("{}/v1/graphql", server.uri()),
        api_key: None,
        timeout_secs: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn test_find_atom_ids_ranks_by_candidate_order() {
    let server = MockServer::start().await;
    let caip = "caip10:eip155:1155:0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
    let plain = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    Mock::given(method("POST"))
        .and(path("/v1/graphql"))
        .and(body_partial_json(json!({ "variables": { "data": [caip, plain] } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "atoms": [
                { "term_id": ID_B, "data": plain },
                { "term_id": ID_A, "data": caip }
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let matches = directory(&server)
        .find_atom_ids(&[caip.to_string(), plain.to_string()])
        .await
        .unwrap();

    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].term_id, ID_A.parse::<TermId>().unwrap());
    assert_eq!(matches[0].data.as_deref(), Some(caip));
    assert_eq!(matches[1].term_id, ID_B.parse::<TermId>().unwrap());
}

#[tokio::test]
async fn test_find_atom_ids_empty_candidates_skips_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let matches = directory(&server).find_atom_ids(&[]).await.unwrap();
    assert!(matches.is_empty());
}

#[tokio::test]
async fn test_graphql_errors_are_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{ "message": "field not found" }, { "message": "bad query" }]
        })))
        .mount(&server)
        .await;

    let err = directory(&server)
        .find_atom_ids(&["x".to_string()])
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ChainError::InvalidResponse("field not found; bad query".to_string())
    );
}

#[tokio::test]
async fn test_http_failure_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = directory(&server)
        .find_atom_ids(&["x".to_string()])
        .await
        .unwrap_err();
    assert_eq!(err, ChainError::Network("HTTP 500 - boom".to_string()));
}

#[tokio::test]
async fn test_api_key_sent_as_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "atoms": [] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let directory = GraphqlAtomDirectory::new(DirectoryConfig {
        graphql_url: server.uri(),
        api_key: Some("secret".to_string()),
        timeout_secs: 5,
    })
    .unwrap();

    let matches = directory.find_atom_ids(&["x".to_string()]).await.unwrap();
    assert!(matches.is_empty());
}

#[tokio::test]
async fn test_fetch_atom_null_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "atom": null }
        })))
        .mount(&server)
        .await;

    let atom = directory(&server)
        .fetch_atom(&ID_A.parse().unwrap())
        .await
        .unwrap();
    assert!(atom.is_none());
}

#[tokio::test]
async fn test_catalog_loads_through_directory() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": { "id": ID_A } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "atom": {
                "term_id": ID_A,
                "label": "Rust Guild",
                "value": { "thing": { "description": "Crabs", "image": "crab.png" } },
                "term": { "vaults": [
                    { "positions_aggregate": { "aggregate": { "count": 12 } } }
                ]}
            }}
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": { "id": ID_B } })))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let ids: Vec<TermId> = [ID_A, ID_B].iter().map(|id| id.parse().unwrap()).collect();
    let catalog = GuildCatalog::load(&directory(&server), &ids).await;

    let atoms = catalog.atoms();
    assert_eq!(atoms.len(), 2);
    assert_eq!(atoms[0].name, "Rust Guild");
    assert_eq!(atoms[0].description, "Crabs");
    assert_eq!(atoms[0].image, "crab.png");
    assert_eq!(atoms[0].positions_count, Some(12));
    assert_eq!(atoms[1].name, "Unknown Atom");

    let guilds = catalog.guilds();
    assert_eq!(guilds[0].name, "Rust Guild");
    assert_eq!(guilds[1].id, ids[1]);
}
