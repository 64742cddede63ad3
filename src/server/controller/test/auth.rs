use super::*;

/// Tests that a password mismatch on registration writes nothing.
///
/// Expected: 400 on register, then 401 when logging in with the same credentials
#[tokio::test]
async fn register_mismatch_leaves_no_account() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({
                "username": "mallory",
                "email": "mallory@example.com",
                "password": "password-one",
                "confirm_password": "password-two"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");

    let (status, _) = app
        .send(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "login": "mallory", "password": "password-one" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

/// Tests the register, login and `/me` round trip.
///
/// Expected: 201, then a bearer token that resolves to the same user
#[tokio::test]
async fn register_login_and_me() {
    let app = TestApp::new().await;

    let (status, registered) = app
        .send(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({
                "username": "carol",
                "email": "carol@example.com",
                "password": "correct-horse",
                "confirm_password": "correct-horse"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, login) = app
        .send(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "login": "carol@example.com", "password": "correct-horse" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(login["data"]["token_type"], "Bearer");
    let token = login["data"]["access_token"].as_str().unwrap().to_string();

    let (status, me) = app
        .send(Method::GET, "/api/v1/auth/me", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["data"]["id"], registered["data"]["id"]);
}

/// Tests that protected endpoints reject anonymous and unprivileged callers.
///
/// Expected: 401 without a token, 403 for a user without a `users:read` policy
#[tokio::test]
async fn protected_endpoints_check_token_and_policy() {
    let app = TestApp::new().await;

    let (status, _) = app.send(Method::GET, "/api/v1/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = app.plain_user_token().await;
    let (status, body) = app
        .send(Method::GET, "/api/v1/users", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["status"], "error");

    let (status, _) = app.admin(Method::GET, "/api/v1/users", None).await;
    assert_eq!(status, StatusCode::OK);
}
