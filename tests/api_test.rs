// HTTP client tests: run HttpUserService against an in-process axum server
// that mimics the placeholder /users resource.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

use usrdesk::api::{Address, ApiError, Company, HttpUserService, User, UserPayload, UserService};

#[derive(Default)]
struct Store {
    users: Vec<User>,
    /// Raw JSON bodies received on POST/PUT, in order.
    bodies: Vec<Value>,
}

type Shared = Arc<Mutex<Store>>;

fn seed_user(id: u64, name: &str) -> User {
    User {
        id,
        name: name.into(),
        username: format!("{}{id}", name.to_lowercase()),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: "1-770-736-8031 x56442".into(),
        website: "hildegard.org".into(),
        company: Company { name: "Romaguera-Crona".into() },
        address: Address { street: "Kulas Light".into(), city: "Gwenborough".into() },
    }
}

fn from_payload(id: u64, p: UserPayload) -> User {
    User {
        id,
        name: p.name,
        username: p.username,
        email: p.email,
        phone: p.phone,
        website: p.website,
        company: p.company,
        address: p.address,
    }
}

async fn list(State(s): State<Shared>) -> Json<Vec<User>> {
    Json(s.lock().unwrap().users.clone())
}

async fn fetch(State(s): State<Shared>, Path(id): Path<u64>) -> Result<Json<User>, StatusCode> {
    let store = s.lock().unwrap();
    store.users.iter().find(|u| u.id == id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn create(State(s): State<Shared>, Json(body): Json<Value>) -> Result<(StatusCode, Json<User>), StatusCode> {
    let payload: UserPayload = serde_json::from_value(body.clone()).map_err(|_| StatusCode::BAD_REQUEST)?;
    let mut store = s.lock().unwrap();
    store.bodies.push(body);
    let id = store.users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
    let user = from_payload(id, payload);
    store.users.push(user.clone());
    Ok((StatusCode::CREATED, Json(user)))
}

async fn update(
    State(s): State<Shared>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Result<Json<User>, StatusCode> {
    let payload: UserPayload = serde_json::from_value(body.clone()).map_err(|_| StatusCode::BAD_REQUEST)?;
    let mut store = s.lock().unwrap();
    store.bodies.push(body);
    let slot = store.users.iter_mut().find(|u| u.id == id).ok_or(StatusCode::NOT_FOUND)?;
    *slot = from_payload(id, payload);
    Ok(Json(slot.clone()))
}

async fn remove(State(s): State<Shared>, Path(id): Path<u64>) -> StatusCode {
    let mut store = s.lock().unwrap();
    let before = store.users.len();
    store.users.retain(|u| u.id != id);
    if store.users.len() == before { StatusCode::NOT_FOUND } else { StatusCode::OK }
}

async fn broken() -> &'static str {
    "this is not json"
}

/// Start the fake service on an ephemeral port and return a client for it.
async fn start_server(users: Vec<User>) -> (HttpUserService, Shared) {
    let store: Shared = Arc::new(Mutex::new(Store { users, bodies: Vec::new() }));
    let app = Router::new()
        .route("/users", get(list).post(create))
        .route("/users/{id}", get(fetch).put(update).delete(remove))
        .route("/broken/users", get(broken))
        .with_state(store.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = HttpUserService::new(format!("http://{addr}/"), Duration::from_secs(5)).unwrap();
    (client, store)
}

#[tokio::test]
async fn list_and_get() {
    let (client, _) = start_server(vec![seed_user(1, "Leanne"), seed_user(2, "Ervin")]).await;
    assert!(!client.base_url().ends_with('/'));

    let users = client.list_users().await.unwrap();
    assert_eq!(users.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1, 2]);

    let one = client.get_user(2).await.unwrap();
    assert_eq!(one.name, "Ervin");
    assert_eq!(one.address_line(), "Kulas Light, Gwenborough");
}

#[tokio::test]
async fn missing_user_maps_to_server_error() {
    let (client, _) = start_server(vec![seed_user(1, "Leanne")]).await;
    match client.get_user(42).await {
        Err(ApiError::Server { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected 404, got {other:?}"),
    }
    assert!(matches!(client.delete_user(42).await, Err(ApiError::Server { status: 404, .. })));
}

#[tokio::test]
async fn create_sends_no_id_and_returns_server_record() {
    let (client, store) = start_server(vec![seed_user(1, "Leanne"), seed_user(2, "Ervin")]).await;
    let payload = UserPayload {
        id: None,
        name: "Grace Hopper".into(),
        username: "USER-7QX2A".into(),
        email: "grace@example.com".into(),
        phone: "202-555-0147".into(),
        website: String::new(),
        company: Company { name: "Navy".into() },
        address: Address { street: "Pier 1".into(), city: "Arlington".into() },
    };
    let created = client.create_user(&payload).await.unwrap();
    assert_eq!(created.id, 3);
    assert_eq!(created.username, "USER-7QX2A");

    let store = store.lock().unwrap();
    let body = &store.bodies[0];
    assert!(body.get("id").is_none());
    assert_eq!(body["company"]["name"], "Navy");
    assert_eq!(body["address"]["city"], "Arlington");
}

#[tokio::test]
async fn update_and_delete() {
    let (client, store) = start_server(vec![seed_user(1, "Leanne"), seed_user(2, "Ervin")]).await;

    let mut payload = UserPayload {
        id: Some(2),
        name: "Ervin Howell".into(),
        username: "ervin2".into(),
        email: "ervin@example.com".into(),
        phone: "010-692-6593 x09125".into(),
        website: "anastasia.net".into(),
        company: Company { name: "Deckow-Crist".into() },
        address: Address { street: "Victor Plains".into(), city: "Wisokyburgh".into() },
    };
    let updated = client.update_user(2, &payload).await.unwrap();
    assert_eq!(updated.name, "Ervin Howell");
    assert_eq!(store.lock().unwrap().bodies[0]["id"], 2);

    payload.id = Some(9);
    assert!(matches!(
        client.update_user(9, &payload).await,
        Err(ApiError::Server { status: 404, .. })
    ));

    client.delete_user(1).await.unwrap();
    let left = client.list_users().await.unwrap();
    assert_eq!(left.iter().map(|u| u.id).collect::<Vec<_>>(), vec![2]);
}

#[tokio::test]
async fn undecodable_body_is_decode_error() {
    let (client, _) = start_server(Vec::new()).await;
    let broken = HttpUserService::new(format!("{}/broken", client.base_url()), Duration::from_secs(5)).unwrap();
    assert!(matches!(broken.list_users().await, Err(ApiError::Decode(_))));
}

#[tokio::test]
async fn unreachable_host_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = HttpUserService::new(format!("http://{addr}"), Duration::from_secs(2)).unwrap();
    assert!(matches!(client.list_users().await, Err(ApiError::Network(_))));
}
