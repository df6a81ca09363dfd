//! Shopping list behavior: idempotent adds, no-op removes, per-user lists.

use axum::http::StatusCode;

use greengrocer_integration_tests::{TestClient, body_string, location};

/// Sign up, log in, and create one store with one item. Returns the item id.
async fn seed_item(client: &mut TestClient, username: &str) -> String {
    client
        .post_form("/signup", &[("username", username), ("password", "secret1")])
        .await;
    client
        .post_form(
            "/login",
            &[("username", username), ("password", "secret1"), ("next", "")],
        )
        .await;

    let response = client
        .post_form(
            "/new_store",
            &[("title", "Corner Mart"), ("address", "1 Main St")],
        )
        .await;
    let store_id = location(&response).rsplit('/').next().unwrap().to_string();

    let response = client
        .post_form(
            "/new_item",
            &[
                ("name", "Apples"),
                ("price", "1.50"),
                ("category", "Produce"),
                ("photo_url", "https://example.com/apples.jpg"),
                ("store_id", &store_id),
            ],
        )
        .await;
    location(&response).rsplit('/').next().unwrap().to_string()
}

#[tokio::test]
async fn adding_twice_keeps_one_entry_and_notices() {
    let mut client = TestClient::new().await;
    let item_id = seed_item(&mut client, "bob").await;

    let response = client
        .post_form(&format!("/add_to_shopping_list/{item_id}"), &[])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = client.get("/shopping_list").await;
    let body = body_string(response).await;
    assert!(body.contains("Added Apples to your shopping list."));

    // Second add is not an error; it flashes an "already present" notice.
    let response = client
        .post_form(&format!("/add_to_shopping_list/{item_id}"), &[])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = client.get("/shopping_list").await;
    let body = body_string(response).await;
    assert!(body.contains("Apples is already on your shopping list."));
    assert_eq!(body.matches(&format!("/item/{item_id}\"")).count(), 1);
}

#[tokio::test]
async fn removing_absent_item_is_a_noop() {
    let mut client = TestClient::new().await;
    let item_id = seed_item(&mut client, "bob").await;

    let response = client
        .post_form(&format!("/remove_from_shopping_list/{item_id}"), &[])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/shopping_list");

    let response = client.get("/shopping_list").await;
    let body = body_string(response).await;
    assert!(body.contains("Your shopping list is empty"));
}

#[tokio::test]
async fn remove_deletes_the_entry() {
    let mut client = TestClient::new().await;
    let item_id = seed_item(&mut client, "bob").await;

    client
        .post_form(&format!("/add_to_shopping_list/{item_id}"), &[])
        .await;
    let response = client
        .post_form(&format!("/remove_from_shopping_list/{item_id}"), &[])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = client.get("/shopping_list").await;
    let body = body_string(response).await;
    assert!(body.contains("Removed from your shopping list."));
    assert!(body.contains("Your shopping list is empty"));
}

#[tokio::test]
async fn adding_missing_item_is_not_found() {
    let mut client = TestClient::new().await;
    seed_item(&mut client, "bob").await;

    let response = client.post_form("/add_to_shopping_list/999", &[]).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn shopping_list_requires_login() {
    let mut client = TestClient::new().await;

    let response = client.get("/shopping_list").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?next=%2Fshopping_list");

    let response = client.post_form("/add_to_shopping_list/1", &[]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/login?next="));
}
