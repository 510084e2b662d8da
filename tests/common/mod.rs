use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use uuid::Uuid;

/// How the stub bank answers authorization calls.
#[derive(Clone, Copy, Debug)]
pub enum BankBehavior {
    Authorize,
    Decline,
    ServerError,
    EmptyBody,
    MalformedBody,
}

/// Serves a stub bank on an ephemeral port and returns its payments URL.
pub async fn spawn_bank(behavior: BankBehavior) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = Router::new().route(
        "/payments",
        post(move |Json(_body): Json<Value>| async move { answer(behavior) }),
    );

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/payments")
}

fn answer(behavior: BankBehavior) -> Response {
    match behavior {
        BankBehavior::Authorize => Json(json!({
            "authorized": true,
            "authorization_code": Uuid::new_v4().to_string(),
        }))
        .into_response(),
        BankBehavior::Decline => Json(json!({
            "authorized": false,
            "authorization_code": null,
        }))
        .into_response(),
        BankBehavior::ServerError => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        BankBehavior::EmptyBody => StatusCode::OK.into_response(),
        BankBehavior::MalformedBody => "not json".into_response(),
    }
}
