//! Stub Tracksy backend and map services for router tests.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, Method, Request, Response, StatusCode, Uri};
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceExt;

use tracksy_web::config::Config;
use tracksy_web::routes::create_router;
use tracksy_web::utils::flash::Flash;
use tracksy_web::AppState;

pub const PASSWORD: &str = "secret1";

/// Every call the stub received, as `(path, body)`.
#[derive(Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<(String, Value)>>>,
}

impl Recorder {
    fn push(&self, path: &str, body: Value) {
        self.calls.lock().unwrap().push((path.to_string(), body));
    }

    pub fn bodies(&self, path: &str) -> Vec<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, body)| body.clone())
            .collect()
    }

    /// Every path the stub was called on, in order.
    pub fn paths(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(p, _)| p.clone())
            .collect()
    }
}

pub fn token_for(role: &str) -> String {
    let now = Utc::now();
    let claims = json!({
        "userId": format!("{}-1", role.to_lowercase()),
        "email": format!("{}@tracksy.app", role.to_lowercase()),
        "role": role,
        "iat": now.timestamp(),
        "exp": (now + Duration::hours(1)).timestamp(),
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"backend-secret"),
    )
    .unwrap()
}

fn ride(id: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "rider": {"_id": "rider-1", "name": "Sami", "email": "rider@tracksy.app"},
        "startRide": {"lat": 23.81, "lang": 90.41},
        "endRide": {"lat": 23.87, "lang": 90.40},
        "distance": 7.2,
        "fare": 240.0,
        "rideStatus": status,
        "createdAt": "2025-10-01T10:00:00Z"
    })
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["password"] != PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "message": "Password does not match"})),
        );
    }
    let email = body["email"].as_str().unwrap_or_default();
    let role = match email.split('@').next() {
        Some("admin") => "Admin",
        Some("driver") => "Driver",
        _ => "Rider",
    };
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "User Login Successfully",
            "data": {"accessToken": token_for(role), "refreshToken": "refresh-abc"}
        })),
    )
}

async fn all_rides() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "",
        "data": {
            "data": [ride("r-req", "requested"), ride("r-acc", "accepted"), ride("r-done", "completed")],
            "meta": {"page": 1, "limit": 10, "total": 3, "totalPage": 1}
        }
    }))
}

fn transitioned(recorder: &Recorder, path: &str, body: Value, status: &str) -> Json<Value> {
    recorder.push(path, body.clone());
    Json(json!({
        "success": true,
        "message": "",
        "data": {"_id": body["rideId"], "rideStatus": status}
    }))
}

async fn accept_ride(State(recorder): State<Recorder>, Json(body): Json<Value>) -> Json<Value> {
    transitioned(&recorder, "/ride/accept-ride", body, "accepted")
}

async fn start_ride(State(recorder): State<Recorder>, Json(body): Json<Value>) -> Json<Value> {
    transitioned(&recorder, "/ride/start-ride", body, "started")
}

async fn complete_ride(State(recorder): State<Recorder>, Json(body): Json<Value>) -> Json<Value> {
    transitioned(&recorder, "/ride/complete-ride", body, "completed")
}

async fn cancel_ride(State(recorder): State<Recorder>, Json(body): Json<Value>) -> Json<Value> {
    transitioned(&recorder, "/ride/cancel-ride", body, "cancelled")
}

fn ok(message: &str) -> Json<Value> {
    Json(json!({"success": true, "message": message, "data": {}}))
}

/// Text fields, the `data` part parsed as JSON, and file parts as
/// `[field, file name]` in the order they arrived.
async fn read_multipart(mut multipart: Multipart) -> Value {
    let mut fields = serde_json::Map::new();
    let mut files = Vec::new();
    let mut data = Value::Null;
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                field.bytes().await.unwrap();
                files.push(json!([name, file_name]));
            }
            None => {
                let text = field.text().await.unwrap();
                if name == "data" {
                    data = serde_json::from_str(&text).unwrap();
                } else {
                    fields.insert(name, Value::String(text));
                }
            }
        }
    }
    json!({"data": data, "fields": fields, "files": files})
}

/// Sign-ups with a `taken@` email are refused the way the backend does.
async fn register(recorder: Recorder, path: &str, multipart: Multipart) -> (StatusCode, Json<Value>) {
    let body = read_multipart(multipart).await;
    recorder.push(path, body.clone());
    if body["data"]["email"] == "taken@tracksy.app" {
        return (
            StatusCode::CONFLICT,
            Json(json!({"success": false, "message": "User already exists"})),
        );
    }
    (StatusCode::CREATED, ok("User registered"))
}

async fn register_rider(
    State(recorder): State<Recorder>,
    multipart: Multipart,
) -> (StatusCode, Json<Value>) {
    register(recorder, "/auth/register-rider", multipart).await
}

async fn register_driver(
    State(recorder): State<Recorder>,
    multipart: Multipart,
) -> (StatusCode, Json<Value>) {
    register(recorder, "/auth/register-driver", multipart).await
}

async fn change_verification(
    State(recorder): State<Recorder>,
    Json(body): Json<Value>,
) -> Json<Value> {
    recorder.push("/user/change-verification", body);
    ok("")
}

async fn delete_user(State(recorder): State<Recorder>, Path(id): Path<String>) -> Json<Value> {
    recorder.push(&format!("/user/delete/{id}"), Value::Null);
    ok("User deleted")
}

async fn create_rating(State(recorder): State<Recorder>, Json(body): Json<Value>) -> Json<Value> {
    recorder.push("/rating/create", body);
    Json(json!({"success": true, "message": "Rating created"}))
}

async fn create_vehicle(State(recorder): State<Recorder>, multipart: Multipart) -> Json<Value> {
    let body = read_multipart(multipart).await;
    recorder.push("/user/driver/create/vehicle", body);
    ok("")
}

async fn delete_vehicle(State(recorder): State<Recorder>, Path(id): Path<String>) -> Json<Value> {
    recorder.push(&format!("/user/driver/delete/vehicle/{id}"), Value::Null);
    ok("")
}

/// One completed ride on whatever page was asked for.
async fn completed_rides(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let page: u32 = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    Json(json!({
        "success": true,
        "message": "",
        "data": {
            "data": [ride("r-done", "completed")],
            "meta": {"page": page, "limit": 5, "total": 1, "totalPage": u32::MAX}
        }
    }))
}

/// Anything the stub does not serve is recorded as `METHOD /path` and answered 404.
async fn unknown(State(recorder): State<Recorder>, method: Method, uri: Uri) -> StatusCode {
    recorder.push(&format!("{method} {}", uri.path()), Value::Null);
    StatusCode::NOT_FOUND
}

async fn create_ride(State(recorder): State<Recorder>, Json(body): Json<Value>) -> Json<Value> {
    recorder.push("/ride/create", body.clone());
    if body["promoCode"] == "EXPIRED" {
        return Json(json!({"success": false, "message": "Invalid promo code"}));
    }
    Json(json!({"success": true, "message": "Ride created successfully", "data": ride("r-new", "requested")}))
}

/// Nominatim: points at latitude zero have no address.
async fn reverse(Query(query): Query<HashMap<String, String>>) -> Response<Body> {
    let lat: f64 = query.get("lat").and_then(|v| v.parse().ok()).unwrap_or_default();
    if lat == 0.0 {
        return Response::builder()
            .status(StatusCode::SERVICE_UNAVAILABLE)
            .body(Body::from("busy"))
            .unwrap();
    }
    Response::builder()
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"display_name": format!("Road near {lat:.2}, Dhaka")}).to_string(),
        ))
        .unwrap()
}

async fn route(Path(_coords): Path<String>) -> Json<Value> {
    Json(json!({
        "code": "Ok",
        "routes": [{
            "distance": 7200.0,
            "duration": 1110.0,
            "geometry": {"type": "LineString", "coordinates": [[90.41, 23.81], [90.40, 23.87]]}
        }]
    }))
}

pub struct TestApp {
    pub router: Router,
    pub recorder: Recorder,
}

/// Starts the stub on an ephemeral port and builds the app against it.
pub async fn spawn_app() -> TestApp {
    let recorder = Recorder::default();
    let stub = Router::new()
        .route("/auth/login", post(login))
        .route("/ride/get-all", get(all_rides))
        .route("/ride/create", post(create_ride))
        .route("/ride/accept-ride", post(accept_ride))
        .route("/ride/start-ride", post(start_ride))
        .route("/ride/complete-ride", post(complete_ride))
        .route("/ride/cancel-ride", post(cancel_ride))
        .route("/auth/register-rider", post(register_rider))
        .route("/auth/register-driver", post(register_driver))
        .route("/user/change-verification", patch(change_verification))
        .route("/user/delete/{id}", delete(delete_user))
        .route("/user/driver-complete-ride", get(completed_rides))
        .route("/user/driver/create/vehicle", post(create_vehicle))
        .route("/user/driver/delete/vehicle/{id}", delete(delete_vehicle))
        .route("/rating/create", post(create_rating))
        .route("/reverse", get(reverse))
        .route("/route/v1/driving/{coords}", get(route))
        .fallback(unknown)
        .with_state(recorder.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, stub).await.unwrap();
    });

    let config = Config::for_backend(&format!("http://{addr}"));
    let state = AppState::new(config).expect("state");
    TestApp {
        router: create_router(state),
        recorder,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.expect("response")
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::COOKIE, format!("accessToken={token}"));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, token: Option<&str>, form: &str) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(token) = token {
            builder = builder.header(header::COOKIE, format!("accessToken={token}"));
        }
        self.send(builder.body(Body::from(form.to_string())).unwrap())
            .await
    }

    /// Posts `multipart/form-data`; `files` are `(field, file name, bytes)`.
    pub async fn post_multipart(
        &self,
        uri: &str,
        token: Option<&str>,
        fields: &[(&str, &str)],
        files: &[(&str, &str, &[u8])],
    ) -> Response<Body> {
        const BOUNDARY: &str = "tracksy-test-boundary";
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        for (name, file_name, bytes) in files {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );
        if let Some(token) = token {
            builder = builder.header(header::COOKIE, format!("accessToken={token}"));
        }
        self.send(builder.body(Body::from(body)).unwrap()).await
    }
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// Value of the named `Set-Cookie`, if the response sets it.
pub fn set_cookie(response: &Response<Body>, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| Cookie::parse(v.to_string()).ok())
        .find(|c| c.name() == name)
        .map(|c| c.value().to_string())
}

pub fn flash(response: &Response<Body>) -> Option<Flash> {
    let value = set_cookie(response, "flash")?;
    let jar = CookieJar::new().add(Cookie::new("flash", value));
    Flash::take(jar).1
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
