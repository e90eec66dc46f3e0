//! Integration tests for the API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. Each test gets its own scratch directory for the
//! collection files and the public front-end, so creates never touch the
//! real `data/` directory.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Map, Number, Value, json};
use tempfile::TempDir;
use tower::ServiceExt;
use zookeepr_api::router::build_router;
use zookeepr_api::state::AppState;
use zookeepr_store::RecordStore;
use zookeepr_store::file::write_collection;
use zookeepr_types::{Animal, RecordId, Zookeeper};

fn animal(id: &str, name: &str, species: &str, diet: &str, traits: &[&str]) -> Animal {
    Animal {
        id: RecordId::from(id),
        name: name.to_owned(),
        species: species.to_owned(),
        diet: diet.to_owned(),
        personality_traits: traits.iter().map(|t| (*t).to_owned()).collect(),
        extra: Map::new(),
    }
}

fn keeper(id: &str, name: &str, age: u64, favorite: &str) -> Zookeeper {
    Zookeeper {
        id: RecordId::from(id),
        name: name.to_owned(),
        age: Number::from(age),
        favorite_animal: Some(favorite.to_owned()),
        extra: Map::new(),
    }
}

async fn make_test_state() -> (Arc<AppState>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data");
    let public = dir.path().join("public");

    let animals = vec![
        animal("0", "Novak", "bear", "omnivore", &["impish", "sassy", "brave"]),
        animal("1", "Alex", "gorilla", "herbivore", &["volatile", "prideful", "loving"]),
        animal("2", "Gumbo", "bear", "omnivore", &["sassy", "hungry"]),
    ];
    let zookeepers = vec![
        keeper("0", "Kim", 28, "dolphin"),
        keeper("1", "Raksha", 31, "penguin"),
    ];

    let animals_path = data.join("animals.json");
    let zookeepers_path = data.join("zookeepers.json");
    write_collection(&animals_path, &animals).await.unwrap();
    write_collection(&zookeepers_path, &zookeepers).await.unwrap();

    std::fs::create_dir_all(public.join("assets/js")).unwrap();
    std::fs::write(public.join("index.html"), "<h1>home</h1>").unwrap();
    std::fs::write(public.join("animals.html"), "<h1>animals</h1>").unwrap();
    std::fs::write(public.join("zookeepers.html"), "<h1>zookeepers</h1>").unwrap();
    std::fs::write(public.join("assets/js/animals.js"), "console.log('animals');").unwrap();

    let state = AppState::new(
        RecordStore::load(animals_path).await.unwrap(),
        RecordStore::load(zookeepers_path).await.unwrap(),
        public,
    );

    (Arc::new(state), dir)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn persisted(path: &Path, collection: &str) -> Vec<Value> {
    let text = tokio::fs::read_to_string(path).await.unwrap();
    let doc: Value = serde_json::from_str(&text).unwrap();
    doc[collection].as_array().unwrap().clone()
}

// =========================================================================
// Animals
// =========================================================================

#[tokio::test]
async fn test_list_animals_without_query_returns_all() {
    let (state, _dir) = make_test_state().await;
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/api/animals").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json.as_array().unwrap().len(), 3);
    assert_eq!(json[0]["personalityTraits"][0], "impish");
}

#[tokio::test]
async fn test_list_animals_filter_by_repeated_traits() {
    let (state, _dir) = make_test_state().await;
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::get("/api/animals?personalityTraits=sassy&personalityTraits=hungry")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Gumbo"]);
}

#[tokio::test]
async fn test_list_animals_combined_filters() {
    let (state, _dir) = make_test_state().await;
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::get("/api/animals?species=bear&diet=omnivore&personalityTraits=brave")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["name"], "Novak");
}

#[tokio::test]
async fn test_list_animals_ignores_empty_and_unknown_params() {
    let (state, _dir) = make_test_state().await;
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::get("/api/animals?diet=&colour=brown")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_get_animal_by_id() {
    let (state, _dir) = make_test_state().await;
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/api/animals/1").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["name"], "Alex");
}

#[tokio::test]
async fn test_get_animal_not_found_has_empty_body() {
    let (state, _dir) = make_test_state().await;
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/api/animals/99").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_to_string(response.into_body()).await.is_empty());
}

#[tokio::test]
async fn test_create_animal_assigns_id_and_persists() {
    let (state, dir) = make_test_state().await;
    let router = build_router(Arc::clone(&state));
    let path = dir.path().join("data/animals.json");
    assert_eq!(persisted(&path, "animals").await.len(), 3);

    let body = json!({
        "name": "Rex",
        "species": "dog",
        "diet": "omnivore",
        "personalityTraits": ["loyal"]
    });
    let response = router
        .oneshot(post_json("/api/animals", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["id"], "3");
    assert_eq!(json["name"], "Rex");

    let on_disk = persisted(&path, "animals").await;
    assert_eq!(on_disk.len(), 4);
    assert_eq!(on_disk[3]["id"], "3");
    assert_eq!(state.animals.read().await.len(), 4);
}

#[tokio::test]
async fn test_created_animal_is_retrievable() {
    let (state, _dir) = make_test_state().await;

    let body = json!({
        "name": "Rex",
        "species": "dog",
        "diet": "omnivore",
        "personalityTraits": ["loyal"],
        "collar": "red"
    });
    let response = build_router(Arc::clone(&state))
        .oneshot(post_json("/api/animals", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = build_router(state)
        .oneshot(Request::get("/api/animals/3").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["collar"], "red");
}

#[tokio::test]
async fn test_create_animal_write_failure_is_500() {
    let (state, dir) = make_test_state().await;
    let unwritable = dir.path().join("not-a-file.json");
    std::fs::create_dir(&unwritable).unwrap();

    let existing = state.animals.read().await.records().to_vec();
    let state = Arc::new(AppState::new(
        RecordStore::from_records(&unwritable, existing),
        RecordStore::from_records(
            dir.path().join("data/zookeepers.json"),
            state.zookeepers.read().await.records().to_vec(),
        ),
        dir.path().join("public"),
    ));
    let router = build_router(Arc::clone(&state));

    let body = json!({
        "name": "Rex",
        "species": "dinosaur",
        "diet": "carnivore",
        "personalityTraits": ["loud"]
    });
    let response = router.oneshot(post_json("/api/animals", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], 500);
    assert_eq!(json["error"], "internal server error");
    assert!(!json.to_string().contains("not-a-file"));
    assert_eq!(state.animals.read().await.len(), 3);
}

#[tokio::test]
async fn test_create_animal_rejects_malformed_body() {
    let (state, dir) = make_test_state().await;
    let router = build_router(Arc::clone(&state));

    let body = json!({ "name": "Rex", "species": "dog", "personalityTraits": "loyal" });
    let response = router
        .oneshot(post_json("/api/animals", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let text = body_to_string(response.into_body()).await;
    assert!(text.starts_with("The animal is not properly formatted."));
    assert!(text.contains("`diet` is required"));
    assert!(text.contains("`personalityTraits` must be an array of strings"));

    assert_eq!(state.animals.read().await.len(), 3);
    assert_eq!(persisted(&dir.path().join("data/animals.json"), "animals").await.len(), 3);
}

#[tokio::test]
async fn test_create_animal_rejects_non_object_body() {
    let (state, _dir) = make_test_state().await;
    let router = build_router(state);

    let response = router
        .oneshot(post_json("/api/animals", &json!(["Rex"])))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

// =========================================================================
// Zookeepers
// =========================================================================

#[tokio::test]
async fn test_list_zookeepers_filter_by_favorite_animal() {
    let (state, _dir) = make_test_state().await;
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::get("/api/zookeepers?favoriteAnimal=dolphin")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["name"], "Kim");
}

#[tokio::test]
async fn test_list_zookeepers_filter_by_age() {
    let (state, _dir) = make_test_state().await;
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/api/zookeepers?age=31").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["name"], "Raksha");
    assert_eq!(json[0]["age"], 31);
}

#[tokio::test]
async fn test_get_zookeeper_by_id() {
    let (state, _dir) = make_test_state().await;
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/api/zookeepers/0").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["name"], "Kim");
}

#[tokio::test]
async fn test_get_zookeeper_not_found() {
    let (state, _dir) = make_test_state().await;
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/api/zookeepers/7").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_zookeeper() {
    let (state, dir) = make_test_state().await;
    let router = build_router(state);

    let body = json!({ "name": "Michael", "age": 28, "favoriteAnimal": "koala" });
    let response = router
        .oneshot(post_json("/api/zookeepers", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["id"], "2");
    assert_eq!(json["age"], 28);

    let on_disk = persisted(&dir.path().join("data/zookeepers.json"), "zookeepers").await;
    assert_eq!(on_disk.len(), 3);
    assert_eq!(on_disk[2]["favoriteAnimal"], "koala");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_get_distinct_ids() {
    const CREATES: usize = 32;

    let (state, dir) = make_test_state().await;
    let router = build_router(Arc::clone(&state));

    let mut tasks = tokio::task::JoinSet::new();
    for n in 0..CREATES {
        let router = router.clone();
        tasks.spawn(async move {
            let body = json!({ "name": format!("Keeper {n}"), "age": 30, "favoriteAnimal": "otter" });
            let response = router.oneshot(post_json("/api/zookeepers", &body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let json = body_to_json(response.into_body()).await;
            json["id"].as_str().unwrap().to_owned()
        });
    }

    let mut ids = Vec::with_capacity(CREATES);
    while let Some(id) = tasks.join_next().await {
        ids.push(id.unwrap());
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), CREATES);

    assert_eq!(state.zookeepers.read().await.len(), CREATES + 2);
    let on_disk = persisted(&dir.path().join("data/zookeepers.json"), "zookeepers").await;
    assert_eq!(on_disk.len(), CREATES + 2);
}

#[tokio::test]
async fn test_create_zookeeper_rejects_string_age() {
    let (state, _dir) = make_test_state().await;
    let router = build_router(Arc::clone(&state));

    let body = json!({ "name": "Raksha", "age": "31", "favoriteAnimal": "penguin" });
    let response = router
        .oneshot(post_json("/api/zookeepers", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let text = body_to_string(response.into_body()).await;
    assert!(text.starts_with("The zookeeper is not properly formatted."));
    assert!(text.contains("`age` must be a number"));
    assert_eq!(state.zookeepers.read().await.len(), 2);
}

// =========================================================================
// Front-end
// =========================================================================

#[tokio::test]
async fn test_index_served_at_root() {
    let (state, _dir) = make_test_state().await;
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.contains("text/html"));
    assert_eq!(body_to_string(response.into_body()).await, "<h1>home</h1>");
}

#[tokio::test]
async fn test_pages_served_by_name() {
    let (state, _dir) = make_test_state().await;

    for (uri, expected) in [
        ("/animals", "<h1>animals</h1>"),
        ("/zookeepers", "<h1>zookeepers</h1>"),
    ] {
        let response = build_router(Arc::clone(&state))
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_to_string(response.into_body()).await, expected);
    }
}

#[tokio::test]
async fn test_assets_served_from_public_dir() {
    let (state, _dir) = make_test_state().await;
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/assets/js/animals.js").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_to_string(response.into_body()).await,
        "console.log('animals');"
    );
}

#[tokio::test]
async fn test_unknown_path_falls_back_to_index() {
    let (state, _dir) = make_test_state().await;
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/no/such/page").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_string(response.into_body()).await, "<h1>home</h1>");
}
