#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use tonic::Status;
use tower::ServiceExt;

use task_gateway::app::build_router;
use task_gateway::config::Config;
use task_gateway::rpc::proto;
use task_gateway::rpc::{BackendClient, CredentialBackend, TaskBackend};
use task_gateway::services::auth::TokenVerifier;
use task_gateway::state::AppState;

pub const SECRET: &str = "integration-secret";

/// In-memory stand-in for both backend services. Records every call that
/// would have gone over the network.
#[derive(Default)]
pub struct RecordingBackend {
    pub credential_calls: Mutex<Vec<String>>,
    pub task_calls: Mutex<Vec<(&'static str, i64)>>,
    pub fail_with: Option<Status>,
}

impl RecordingBackend {
    pub fn failing(status: Status) -> Self {
        Self {
            fail_with: Some(status),
            ..Default::default()
        }
    }

    pub fn task_calls(&self) -> Vec<(&'static str, i64)> {
        self.task_calls.lock().unwrap().clone()
    }

    pub fn credential_calls(&self) -> Vec<String> {
        self.credential_calls.lock().unwrap().clone()
    }

    fn task(&self, op: &'static str, owner: i64) -> Result<(), Status> {
        self.task_calls.lock().unwrap().push((op, owner));
        match &self.fail_with {
            Some(status) => Err(status.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CredentialBackend for RecordingBackend {
    async fn register(
        &self,
        req: proto::RegisterRequest,
    ) -> Result<proto::RegisterResponse, Status> {
        self.credential_calls.lock().unwrap().push(req.email);
        Ok(proto::RegisterResponse {
            message: "user registered".into(),
        })
    }

    async fn login(&self, req: proto::LoginRequest) -> Result<proto::LoginResponse, Status> {
        self.credential_calls.lock().unwrap().push(req.email.clone());
        Ok(proto::LoginResponse {
            token: format!("issued-for-{}", req.email),
        })
    }
}

#[async_trait]
impl TaskBackend for RecordingBackend {
    async fn create_task(
        &self,
        req: proto::CreateRequest,
    ) -> Result<proto::CreateResponse, Status> {
        self.task("create", req.userid)?;
        Ok(proto::CreateResponse {
            id: 101,
            message: "task created".into(),
        })
    }

    async fn delete_task(
        &self,
        req: proto::DeleteRequest,
    ) -> Result<proto::DeleteResponse, Status> {
        self.task("delete", req.userid)?;
        Ok(proto::DeleteResponse {
            message: format!("task {} deleted", req.id),
        })
    }

    async fn done_task(&self, req: proto::DoneRequest) -> Result<proto::DoneResponse, Status> {
        self.task("done", req.userid)?;
        Ok(proto::DoneResponse {
            message: format!("task {} done", req.id),
        })
    }

    async fn get_all_tasks(
        &self,
        req: proto::GetAllRequest,
    ) -> Result<proto::GetAllResponse, Status> {
        self.task("list", req.userid)?;
        Ok(proto::GetAllResponse {
            tasks: vec![
                proto::Task {
                    id: 9,
                    title: "second".into(),
                    description: "b".into(),
                    done: true,
                    uid: req.userid,
                },
                proto::Task {
                    id: 4,
                    title: "first".into(),
                    description: "a".into(),
                    done: false,
                    uid: req.userid,
                },
            ],
        })
    }
}

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "GRPC_API_AUTH_PORT" => Some("localhost:44044".into()),
        "GRPC_API_DB_PORT" => Some("localhost:44045".into()),
        "SECRET_KEY" => Some(SECRET.into()),
        _ => None,
    })
    .unwrap()
}

pub fn app(backend: Arc<RecordingBackend>) -> Router {
    let client = BackendClient::new(backend.clone(), backend);
    let state = AppState::new(
        Arc::new(client),
        Arc::new(TokenVerifier::new(SECRET.as_bytes())),
    );
    build_router(state, &test_config())
}

pub fn token_for(uid: i64) -> String {
    sign(serde_json::json!({ "uid": uid }), SECRET)
}

pub fn sign(claims: serde_json::Value, secret: &str) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub async fn send(app: Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, body)
}

pub fn post_json(path: &str, token: Option<&str>, body: &str) -> Request<Body> {
    let mut req = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json");
    if let Some(token) = token {
        req = req.header("authorization", format!("Bearer {token}"));
    }
    req.body(Body::from(body.to_string())).unwrap()
}

pub fn get(path: &str, token: Option<&str>) -> Request<Body> {
    let mut req = Request::builder().method("GET").uri(path);
    if let Some(token) = token {
        req = req.header("authorization", format!("Bearer {token}"));
    }
    req.body(Body::empty()).unwrap()
}
