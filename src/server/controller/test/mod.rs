use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tempfile::TempDir;
use test_utils::{builder::TestBuilder, context::TestContext, factory};
use tower::ServiceExt;
use uuid::Uuid;

use crate::server::{
    config::test_config,
    router::router,
    service::{auth::token::issue_token, rbac::RbacService, storage::LocalStorage},
    state::AppState,
};

mod auth;

/// Whole application over an in-memory database, plus an admin bearer token.
struct TestApp {
    _test: TestContext,
    _storage: TempDir,
    db: DatabaseConnection,
    app: Router,
    admin_token: String,
}

impl TestApp {
    async fn new() -> Self {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.clone().unwrap();
        let storage = tempfile::tempdir().unwrap();

        let config = test_config();
        let admin_role = RbacService::new(&db).seed().await.unwrap();
        let admin = factory::user::create_user(&db).await.unwrap();
        factory::role::assign_role(&db, admin.id, admin_role.id)
            .await
            .unwrap();
        let (admin_token, _) = issue_token(admin.id, &config).unwrap();

        let state = AppState::new(
            db.clone(),
            config,
            Arc::new(LocalStorage::new(storage.path())),
            None,
        );

        Self {
            _test: test,
            _storage: storage,
            db,
            app: router(state),
            admin_token,
        }
    }

    /// Issues a token for a fresh user holding no roles.
    async fn plain_user_token(&self) -> String {
        let user = factory::user::create_user(&self.db).await.unwrap();
        let (token, _) = issue_token(user.id, &test_config()).unwrap();

        token
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, body)
    }

    /// Sends a request authenticated as the seeded admin.
    async fn admin(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let token = self.admin_token.clone();
        self.send(method, uri, Some(&token), body).await
    }
}

fn id_of(body: &Value) -> Uuid {
    body["data"]["id"]
        .as_str()
        .and_then(|id| id.parse().ok())
        .unwrap()
}
