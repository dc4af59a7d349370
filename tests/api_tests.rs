use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use machipoke::config::Config;
use serde_json::{Value, json};
use tower::ServiceExt;

const OWNER: &str = "demo-user";

async fn spawn_app() -> Router {
    let db_path =
        std::env::temp_dir().join(format!("machipoke-api-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());

    let state = machipoke::api::create_app_state_from_config(config, None)
        .await
        .expect("failed to create app state");
    machipoke::api::router(state).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, user: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn lane() -> Value {
    json!({
        "name": "Secret Cherry Blossom Lane",
        "description": "Known mostly to locals",
        "latitude": 35.689,
        "longitude": 139.692,
        "categoryIds": ["nature", "photo"],
        "photos": ["/api/images/sample-sakura.jpg"],
        "bestSeasons": ["spring"],
        "hiddenGemRating": 4
    })
}

fn cafe() -> Value {
    json!({
        "name": "Old House Cafe",
        "description": "A cafe in a 150-year-old house",
        "latitude": 35.021,
        "longitude": 135.759,
        "address": "Kyoto",
        "categoryIds": ["food", "history"],
        "photos": ["/api/images/sample-cafe.jpg"],
        "hiddenGemRating": 5
    })
}

async fn create(app: &Router, body: &Value) -> String {
    let (status, json) = send(app, json_request("POST", "/api/spots", Some(OWNER), body)).await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    json["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = spawn_app().await;

    let (status, json) = send(&app, get("/api/health/live")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "alive");

    let (status, json) = send(&app, get("/api/health/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["ready"], true);
}

#[tokio::test]
async fn test_create_and_fetch_spot() {
    let app = spawn_app().await;
    let id = create(&app, &lane()).await;

    let (status, json) = send(&app, get(&format!("/api/spots/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["name"], "Secret Cherry Blossom Lane");
    assert_eq!(json["data"]["categoryIds"], json!(["nature", "photo"]));
    assert_eq!(json["data"]["bestSeasons"], json!(["spring"]));
    assert_eq!(json["data"]["visitCount"], 0);
    assert_eq!(json["data"]["userId"], OWNER);
    assert!(json["data"].get("distanceKm").is_none());

    let (status, json) = send(&app, get("/api/spots/does-not-exist")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_create_requires_user_and_valid_input() {
    let app = spawn_app().await;

    let (status, _) = send(&app, json_request("POST", "/api/spots", None, &lane())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let mut bad = lane();
    bad["hiddenGemRating"] = json!(6);
    let (status, json) = send(&app, json_request("POST", "/api/spots", Some(OWNER), &bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("rating"));

    let mut bad = lane();
    bad["latitude"] = json!(91.0);
    let (status, _) = send(&app, json_request("POST", "/api/spots", Some(OWNER), &bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut bad = lane();
    bad["categoryIds"] = json!(["volcanoes"]);
    let (status, json) = send(&app, json_request("POST", "/api/spots", Some(OWNER), &bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("volcanoes"));
}

#[tokio::test]
async fn test_search_endpoints() {
    let app = spawn_app().await;
    let lane_id = create(&app, &lane()).await;
    let cafe_id = create(&app, &cafe()).await;

    let (status, json) = send(
        &app,
        get("/api/spots?lat=35.689&lon=139.692&radius_km=10"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["totalCount"], 1);
    assert_eq!(json["data"]["hasMore"], false);
    assert_eq!(json["data"]["spots"][0]["id"], lane_id.as_str());
    assert_eq!(json["data"]["spots"][0]["distanceKm"], 0.0);

    let (_, json) = send(&app, get("/api/spots?category_ids=food,history")).await;
    assert_eq!(json["data"]["totalCount"], 1);
    assert_eq!(json["data"]["spots"][0]["id"], cafe_id.as_str());

    let (_, json) = send(&app, get("/api/spots?limit=1")).await;
    assert_eq!(json["data"]["totalCount"], 2);
    assert_eq!(json["data"]["hasMore"], true);
    assert_eq!(json["data"]["spots"].as_array().unwrap().len(), 1);

    let (status, _) = send(&app, get("/api/spots?limit=101")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, get("/api/spots?sort_by=random")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, get("/api/spots?lat=35.0")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let body = json!({
        "query": "cafe",
        "nearbyLatitude": 35.021,
        "nearbyLongitude": 135.759,
        "radiusKm": 5,
        "sortBy": "hiddenGem"
    });
    let (status, json) = send(&app, json_request("POST", "/api/spots/search", None, &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["totalCount"], 1);
    assert_eq!(json["data"]["spots"][0]["id"], cafe_id.as_str());

    let (status, json) = send(
        &app,
        get("/api/spots/nearby?lat=35.021&lon=135.759&radius_km=500"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["totalCount"], 2);
    assert!(json["data"]["spots"][0]["distanceKm"].is_number());

    let (_, json) = send(&app, get(&format!("/api/users/{OWNER}/spots"))).await;
    assert_eq!(json["data"]["totalCount"], 2);

    let (_, json) = send(&app, get("/api/categories/nature/spots")).await;
    assert_eq!(json["data"]["totalCount"], 1);

    let (status, _) = send(&app, get("/api/categories/volcanoes/spots")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_and_delete_check_ownership() {
    let app = spawn_app().await;
    let id = create(&app, &lane()).await;
    let uri = format!("/api/spots/{id}");

    let changes = json!({ "name": "Cherry Lane", "hiddenGemRating": 5 });

    let (status, _) = send(&app, json_request("PUT", &uri, Some("intruder"), &changes)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, json) = send(&app, json_request("PUT", &uri, Some(OWNER), &changes)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["name"], "Cherry Lane");
    assert_eq!(json["data"]["hiddenGemRating"], 5);
    assert_eq!(json["data"]["categoryIds"], json!(["nature", "photo"]));

    let delete = |user: &str| {
        Request::builder()
            .method("DELETE")
            .uri(&uri)
            .header("x-user-id", user)
            .body(Body::empty())
            .unwrap()
    };

    let (status, _) = send(&app, delete("intruder")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, delete(OWNER)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, delete(OWNER)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_visit_save_and_lists() {
    let app = spawn_app().await;
    let id = create(&app, &cafe()).await;

    let visit = Request::builder()
        .method("POST")
        .uri(format!("/api/spots/{id}/visit"))
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(&app, visit).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["visitCount"], 1);

    let list_body = json!({ "name": "Kyoto trip" });
    let (status, json) = send(
        &app,
        json_request("POST", "/api/lists", Some("traveler"), &list_body),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let list_id = json["data"]["id"].as_str().unwrap().to_string();

    let save_uri = format!("/api/spots/{id}/save");
    let (status, json) = send(
        &app,
        json_request("POST", &save_uri, Some("traveler"), &json!({ "listId": list_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["saveCount"], 1);

    let bare_save = Request::builder()
        .method("POST")
        .uri(&save_uri)
        .header("x-user-id", "traveler")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(&app, bare_save).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["saveCount"], 2);

    let (status, _) = send(&app, json_request("POST", &save_uri, None, &json!({}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let own_view = Request::builder()
        .uri("/api/users/traveler/lists")
        .header("x-user-id", "traveler")
        .body(Body::empty())
        .unwrap();
    let (_, json) = send(&app, own_view).await;
    assert_eq!(json["data"][0]["name"], "Kyoto trip");
    assert_eq!(json["data"][0]["spotIds"], json!([id]));

    // Private lists are hidden from other users.
    let (_, json) = send(&app, get("/api/users/traveler/lists")).await;
    assert_eq!(json["data"], json!([]));

    let missing = Request::builder()
        .method("POST")
        .uri("/api/spots/nope/visit")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, missing).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comments() {
    let app = spawn_app().await;
    let id = create(&app, &lane()).await;
    let uri = format!("/api/spots/{id}/comments");

    let (status, json) = send(
        &app,
        json_request("POST", &uri, Some("traveler"), &json!({ "content": "Go at dawn" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["userId"], "traveler");

    let (status, _) = send(
        &app,
        json_request("POST", &uri, Some("traveler"), &json!({ "content": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["content"], "Go at dawn");

    let (status, _) = send(&app, get("/api/spots/nope/comments")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_categories() {
    let app = spawn_app().await;

    let (status, json) = send(&app, get("/api/categories")).await;
    assert_eq!(status, StatusCode::OK);

    let categories = json["data"].as_array().unwrap();
    assert_eq!(categories.len(), 9);
    assert!(
        categories
            .iter()
            .any(|c| c["id"] == "photo" && c["iconName"] == "camera")
    );
}
