//! End-to-end flows: signup, login, store and item creation, shopping list.

use axum::http::StatusCode;

use greengrocer_integration_tests::{TestClient, body_string, location};

/// Sign up and log in as the given user.
async fn login_as(client: &mut TestClient, username: &str, password: &str) {
    let response = client
        .post_form("/signup", &[("username", username), ("password", password)])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let response = client
        .post_form(
            "/login",
            &[("username", username), ("password", password), ("next", "")],
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn health_endpoints_respond() {
    let mut client = TestClient::new().await;

    let response = client.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");

    let response = client.get("/health/ready").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn homepage_is_public_and_lists_stores() {
    let mut client = TestClient::new().await;

    let response = client.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Grocery Stores"));
    assert!(body.contains("No stores yet"));
}

#[tokio::test]
async fn signup_redirects_to_login_without_auto_login() {
    let mut client = TestClient::new().await;

    // A short password is fine; only presence is required.
    let response = client
        .post_form("/signup", &[("username", "alice"), ("password", "pw123")])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    // Still unauthenticated: protected pages bounce to login.
    let response = client.get("/new_store").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?next=%2Fnew_store");
}

#[tokio::test]
async fn duplicate_signup_is_rejected() {
    let mut client = TestClient::new().await;

    let response = client
        .post_form("/signup", &[("username", "alice"), ("password", "pw123")])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = client
        .post_form("/signup", &[("username", "alice"), ("password", "other")])
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("That username is taken"));
}

#[tokio::test]
async fn login_errors_distinguish_unknown_user_from_bad_password() {
    let mut client = TestClient::new().await;

    client
        .post_form("/signup", &[("username", "bob"), ("password", "secret1")])
        .await;

    let response = client
        .post_form(
            "/login",
            &[("username", "nobody"), ("password", "secret1"), ("next", "")],
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("No user with that username"));

    let response = client
        .post_form(
            "/login",
            &[("username", "bob"), ("password", "wrong"), ("next", "")],
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    // The apostrophe in "doesn't" is HTML-escaped, so match around it.
    let body = body_string(response).await;
    assert!(body.contains("Password doesn"));
    assert!(body.contains("t match"));
}

#[tokio::test]
async fn login_honors_next_redirect_target() {
    let mut client = TestClient::new().await;

    client
        .post_form("/signup", &[("username", "bob"), ("password", "secret1")])
        .await;

    let response = client
        .post_form(
            "/login",
            &[
                ("username", "bob"),
                ("password", "secret1"),
                ("next", "/shopping_list"),
            ],
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/shopping_list");
}

#[tokio::test]
async fn login_rejects_offsite_next_target() {
    let mut client = TestClient::new().await;

    client
        .post_form("/signup", &[("username", "bob"), ("password", "secret1")])
        .await;

    let response = client
        .post_form(
            "/login",
            &[
                ("username", "bob"),
                ("password", "secret1"),
                ("next", "https://evil.example/"),
            ],
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn store_form_validation_errors_rerender_inline() {
    let mut client = TestClient::new().await;
    login_as(&mut client, "bob", "secret1").await;

    let response = client
        .post_form("/new_store", &[("title", "ab"), ("address", "")])
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Title must be at least 3 characters"));
    assert!(body.contains("Address is required"));
}

#[tokio::test]
async fn signup_rejects_empty_password() {
    let mut client = TestClient::new().await;

    let response = client
        .post_form("/signup", &[("username", "alice"), ("password", "")])
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Password is required"));
}

#[tokio::test]
async fn store_title_length_is_counted_in_characters() {
    let mut client = TestClient::new().await;
    login_as(&mut client, "bob", "secret1").await;

    // Two accented characters are four bytes but still below the minimum.
    let response = client
        .post_form("/new_store", &[("title", "éé"), ("address", "1 Main St")])
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Title must be at least 3 characters"));

    // Eighty accented characters exceed 80 bytes but fit the bound.
    let long_title = "é".repeat(80);
    let response = client
        .post_form("/new_store", &[("title", &long_title), ("address", "1 Main St")])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/store/"));
}

#[tokio::test]
async fn auth_pages_show_logged_in_nav() {
    let mut client = TestClient::new().await;
    login_as(&mut client, "bob", "secret1").await;

    for path in ["/login", "/signup"] {
        let response = client.get(path).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("Log Out"), "{path} nav should reflect the session");
        assert!(body.contains("bob"));
    }
}

#[tokio::test]
async fn missing_store_is_not_found() {
    let mut client = TestClient::new().await;
    login_as(&mut client, "bob", "secret1").await;

    let response = client.get("/store/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn full_shopping_flow() {
    let mut client = TestClient::new().await;
    login_as(&mut client, "bob", "secret1").await;

    // Create a store.
    let response = client
        .post_form(
            "/new_store",
            &[("title", "Corner Mart"), ("address", "1 Main St")],
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let store_path = location(&response).to_string();
    assert!(store_path.starts_with("/store/"));

    let response = client.get(&store_path).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("New store created successfully!"));
    assert!(body.contains("Corner Mart"));

    // Create an item at that store.
    let store_id = store_path.rsplit('/').next().unwrap();
    let response = client
        .post_form(
            "/new_item",
            &[
                ("name", "Apples"),
                ("price", "1.50"),
                ("category", "Produce"),
                ("photo_url", "https://example.com/apples.jpg"),
                ("store_id", store_id),
            ],
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let item_path = location(&response).to_string();
    assert!(item_path.starts_with("/item/"));

    let response = client.get(&item_path).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Apples"));
    assert!(body.contains("$1.50"));

    // Add the item to the shopping list.
    let item_id = item_path.rsplit('/').next().unwrap();
    let response = client
        .post_form(&format!("/add_to_shopping_list/{item_id}"), &[])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/shopping_list");

    // The list shows exactly one entry named Apples.
    let response = client.get("/shopping_list").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    let entries = body.matches(&format!("/item/{item_id}\"")).count();
    assert_eq!(entries, 1);
    assert!(body.contains("Apples"));
}

#[tokio::test]
async fn store_edit_updates_title_and_address() {
    let mut client = TestClient::new().await;
    login_as(&mut client, "bob", "secret1").await;

    let response = client
        .post_form("/new_store", &[("title", "Old Name"), ("address", "Old Addr")])
        .await;
    let store_path = location(&response).to_string();

    let response = client
        .post_form(&store_path, &[("title", "New Name"), ("address", "New Addr")])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), store_path);

    let response = client.get(&store_path).await;
    let body = body_string(response).await;
    assert!(body.contains("Store updated successfully!"));
    assert!(body.contains("New Name"));
    assert!(body.contains("New Addr"));
}

#[tokio::test]
async fn logout_ends_the_session() {
    let mut client = TestClient::new().await;
    login_as(&mut client, "bob", "secret1").await;

    let response = client.get("/logout").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let response = client.get("/shopping_list").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/login?next="));
}
