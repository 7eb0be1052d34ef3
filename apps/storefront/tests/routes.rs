//! End-to-end tests driving the router in-process.

use axum::body::Body;
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use paddock_db::{Database, DbConfig};
use storefront::flash::FLASH_COOKIE;
use storefront::{router, AppState, StorefrontConfig};

const BOUNDARY: &str = "paddock-test-boundary";

struct TestApp {
    app: Router,
    db: Database,
    uploads: TempDir,
}

async fn test_app() -> TestApp {
    test_app_with_limit(16 * 1024 * 1024).await
}

async fn test_app_with_limit(max_upload_bytes: usize) -> TestApp {
    let uploads = tempfile::tempdir().unwrap();

    let mut config = StorefrontConfig::default();
    config.storage.upload_dir = uploads.path().to_path_buf();
    config.storage.max_upload_bytes = max_upload_bytes;
    config.security.secret_key = "test-secret".to_string();

    let db = Database::open(DbConfig::in_memory()).await.unwrap();
    let state = AppState::new(config, db.clone()).unwrap();
    state.uploads.ensure_dir().await.unwrap();

    TestApp {
        app: router(state),
        db,
        uploads,
    }
}

enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a [u8]),
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(file_name, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"image\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn horse_parts<'a>(
    name: &'a str,
    price: &'a str,
    file: Option<(&'a str, &'a [u8])>,
) -> Vec<Part<'a>> {
    let mut parts = vec![
        Part::Text("name", name),
        Part::Text("description", "Gentle mare"),
        Part::Text("price", price),
    ];
    if let Some((file_name, bytes)) = file {
        parts.push(Part::File(file_name, bytes));
    }
    parts
}

fn file<'a>(file_name: &'a str, bytes: &'a [u8]) -> Option<(&'a str, &'a [u8])> {
    Some((file_name, bytes))
}

impl TestApp {
    async fn send(&self, request: Request<Body>) -> Response {
        self.app.clone().oneshot(request).await.unwrap()
    }

    async fn get(&self, uri: &str) -> Response {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    async fn get_with_cookie(&self, uri: &str, cookie: &str) -> Response {
        self.send(
            Request::get(uri)
                .header(COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    async fn post_form(&self, uri: &str, parts: &[Part<'_>]) -> Response {
        let body = multipart_body(parts);
        self.send(
            Request::post(uri)
                .header(CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
                .header(CONTENT_LENGTH, body.len())
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    async fn create_bella(&self) -> i64 {
        let res = self
            .post_form("/add", &horse_parts("Bella", "1200.0", file("bella.jpg", b"jpeg-bytes")))
            .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        self.db.horses().list_all().await.unwrap().last().unwrap().id
    }

    async fn cart_len(&self) -> usize {
        self.db.cart().list_lines().await.unwrap().len()
    }

    fn uploaded_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.uploads.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

fn location(res: &Response) -> &str {
    res.headers().get(LOCATION).unwrap().to_str().unwrap()
}

/// `name=value` of the flash cookie set by a response.
fn flash_cookie(res: &Response) -> String {
    res.headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(FLASH_COOKIE))
        .and_then(|v| v.split(';').next())
        .unwrap()
        .to_string()
}

async fn body_text(res: Response) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// =============================================================================
// Listing and creating
// =============================================================================

#[tokio::test]
async fn empty_index() {
    let app = test_app().await;

    let res = app.get("/").await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_text(res).await.contains("No horses listed yet"));
}

#[tokio::test]
async fn add_form_renders() {
    let app = test_app().await;

    let res = app.get("/add").await;

    assert_eq!(res.status(), StatusCode::OK);
    let html = body_text(res).await;
    assert!(html.contains("enctype=\"multipart/form-data\""));
    assert!(html.contains("name=\"image\""));
}

#[tokio::test]
async fn create_list_cart_delete_round_trip() {
    let app = test_app().await;

    let res = app
        .post_form("/add", &horse_parts("Bella", "1200.0", file("bella.jpg", b"jpeg-bytes")))
        .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/");
    let cookie = flash_cookie(&res);

    let horses = app.db.horses().list_all().await.unwrap();
    assert_eq!(horses.len(), 1);
    let bella = &horses[0];
    assert_eq!(bella.name, "Bella");
    assert_eq!(bella.description, "Gentle mare");
    assert_eq!(bella.price, 1200.0);
    assert_eq!(bella.image.as_deref(), Some("bella.jpg"));
    assert_eq!(app.uploaded_files(), vec!["bella.jpg".to_string()]);

    // The flash shows once on the next page, and the cookie is cleared
    let res = app.get_with_cookie("/", &cookie).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(flash_cookie(&res).ends_with('='));
    let html = body_text(res).await;
    assert!(html.contains("Horse added successfully!"));
    assert!(html.contains("Bella"));
    assert!(html.contains("1200.0"));

    let res = app.get(&format!("/add_to_cart/{}", bella.id)).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/");

    let res = app.get_with_cookie("/cart", &flash_cookie(&res)).await;
    let html = body_text(res).await;
    assert!(html.contains("Horse added to cart!"));
    assert!(html.contains("Bella"));
    assert_eq!(html.matches("/remove_from_cart/").count(), 1);

    let res = app.get(&format!("/delete/{}", bella.id)).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/");

    let html = body_text(app.get("/cart").await).await;
    assert!(html.contains("Your cart is empty"));
    assert_eq!(app.cart_len().await, 0);
    assert_eq!(app.get(&format!("/edit/{}", bella.id)).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_sanitizes_filename() {
    let app = test_app().await;

    let res = app
        .post_form("/add", &horse_parts("Ghost", "7800", file("../../My Ghost.png", b"png")))
        .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let horses = app.db.horses().list_all().await.unwrap();
    assert_eq!(horses[0].image.as_deref(), Some("My_Ghost.png"));
    assert_eq!(app.uploaded_files(), vec!["My_Ghost.png".to_string()]);
}

#[tokio::test]
async fn uploaded_image_is_served() {
    let app = test_app().await;
    app.create_bella().await;

    let res = app.get("/static/uploads/bella.jpg").await;

    assert_eq!(res.status(), StatusCode::OK);
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"jpeg-bytes");
}

// =============================================================================
// Create failures
// =============================================================================

#[tokio::test]
async fn create_with_empty_filename_writes_nothing() {
    let app = test_app().await;

    let res = app
        .post_form("/add", &horse_parts("Bella", "1200.0", file("", b"")))
        .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/add");
    let html = body_text(app.get_with_cookie("/add", &flash_cookie(&res)).await).await;
    assert!(html.contains("No selected file"));
    assert_eq!(app.db.horses().count().await.unwrap(), 0);
    assert!(app.uploaded_files().is_empty());
}

#[tokio::test]
async fn create_with_unusable_filename_writes_nothing() {
    let app = test_app().await;

    let res = app
        .post_form("/add", &horse_parts("Bella", "1200.0", file("../..", b"jpeg")))
        .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/add");
    let html = body_text(app.get_with_cookie("/add", &flash_cookie(&res)).await).await;
    // the flash text is autoescaped, "/" included
    assert!(html.contains("Invalid file name: ..&#x2F;.."));
    assert_eq!(app.db.horses().count().await.unwrap(), 0);
    assert!(app.uploaded_files().is_empty());
}

#[tokio::test]
async fn create_without_file_part() {
    let app = test_app().await;

    let res = app.post_form("/add", &horse_parts("Bella", "1200.0", None)).await;

    assert_eq!(location(&res), "/add");
    let html = body_text(app.get_with_cookie("/add", &flash_cookie(&res)).await).await;
    assert!(html.contains("No file part"));
    assert_eq!(app.db.horses().count().await.unwrap(), 0);
}

#[tokio::test]
async fn create_with_blank_name_saves_no_file() {
    let app = test_app().await;

    let res = app
        .post_form("/add", &horse_parts("   ", "1200.0", file("bella.jpg", b"jpeg")))
        .await;

    assert_eq!(location(&res), "/add");
    let html = body_text(app.get_with_cookie("/add", &flash_cookie(&res)).await).await;
    assert!(html.contains("name is required"));
    assert_eq!(app.db.horses().count().await.unwrap(), 0);
    assert!(app.uploaded_files().is_empty());
}

#[tokio::test]
async fn create_with_bad_price_is_400() {
    let app = test_app().await;

    let res = app
        .post_form("/add", &horse_parts("Bella", "a lot", file("bella.jpg", b"jpeg")))
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.db.horses().count().await.unwrap(), 0);
    assert!(app.uploaded_files().is_empty());
}

#[tokio::test]
async fn create_with_missing_field_is_400() {
    let app = test_app().await;

    let res = app
        .post_form(
            "/add",
            &[Part::Text("name", "Bella"), Part::File("bella.jpg", b"jpeg")],
        )
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.db.horses().count().await.unwrap(), 0);
}

#[tokio::test]
async fn oversized_upload_is_413() {
    let app = test_app_with_limit(1024).await;
    let big = vec![0u8; 4096];

    let res = app
        .post_form("/add", &horse_parts("Bella", "1200.0", file("bella.jpg", &big)))
        .await;

    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(app.db.horses().count().await.unwrap(), 0);
}

// =============================================================================
// Editing and deleting
// =============================================================================

#[tokio::test]
async fn edit_form_is_prefilled() {
    let app = test_app().await;
    let id = app.create_bella().await;

    let res = app.get(&format!("/edit/{id}")).await;

    assert_eq!(res.status(), StatusCode::OK);
    let html = body_text(res).await;
    assert!(html.contains("value=\"Bella\""));
    assert!(html.contains("Gentle mare"));
}

#[tokio::test]
async fn update_without_file_keeps_image() {
    let app = test_app().await;
    let id = app.create_bella().await;

    let res = app
        .post_form(&format!("/edit/{id}"), &horse_parts("Bella Rose", "1350.5", file("", b"")))
        .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/");
    let html = body_text(app.get_with_cookie("/", &flash_cookie(&res)).await).await;
    assert!(html.contains("Horse updated successfully!"));

    let horse = app.db.horses().get_by_id(id).await.unwrap().unwrap();
    assert_eq!(horse.name, "Bella Rose");
    assert_eq!(horse.price, 1350.5);
    assert_eq!(horse.image.as_deref(), Some("bella.jpg"));
}

#[tokio::test]
async fn update_with_file_replaces_image() {
    let app = test_app().await;
    let id = app.create_bella().await;

    let res = app
        .post_form(&format!("/edit/{id}"), &horse_parts("Bella", "1200", file("new bella.jpg", b"new")))
        .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let horse = app.db.horses().get_by_id(id).await.unwrap().unwrap();
    assert_eq!(horse.image.as_deref(), Some("new_bella.jpg"));
    assert_eq!(
        app.uploaded_files(),
        vec!["bella.jpg".to_string(), "new_bella.jpg".to_string()]
    );
}

#[tokio::test]
async fn update_with_unusable_filename_changes_nothing() {
    let app = test_app().await;
    let id = app.create_bella().await;

    let res = app
        .post_form(&format!("/edit/{id}"), &horse_parts("Bella Rose", "900", file("../..", b"new")))
        .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), format!("/edit/{id}"));
    let html = body_text(
        app.get_with_cookie(&format!("/edit/{id}"), &flash_cookie(&res))
            .await,
    )
    .await;
    // the flash text is autoescaped, "/" included
    assert!(html.contains("Invalid file name: ..&#x2F;.."));

    let horse = app.db.horses().get_by_id(id).await.unwrap().unwrap();
    assert_eq!(horse.name, "Bella");
    assert_eq!(horse.price, 1200.0);
    assert_eq!(horse.image.as_deref(), Some("bella.jpg"));
    assert_eq!(app.uploaded_files(), vec!["bella.jpg".to_string()]);
}

#[tokio::test]
async fn update_with_blank_description_goes_back_to_form() {
    let app = test_app().await;
    let id = app.create_bella().await;

    let res = app
        .post_form(
            &format!("/edit/{id}"),
            &[
                Part::Text("name", "Bella"),
                Part::Text("description", ""),
                Part::Text("price", "1200"),
            ],
        )
        .await;

    assert_eq!(location(&res), format!("/edit/{id}"));
    let horse = app.db.horses().get_by_id(id).await.unwrap().unwrap();
    assert_eq!(horse.description, "Gentle mare");
}

#[tokio::test]
async fn update_unknown_horse_is_404() {
    let app = test_app().await;

    let res = app
        .post_form("/edit/999", &horse_parts("Bella", "1200", None))
        .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let html = body_text(res).await;
    assert!(html.contains("Horse 999 does not exist"));
    assert!(!html.contains("not found: Horse"));
}

#[tokio::test]
async fn update_with_bad_price_is_400() {
    let app = test_app().await;
    let id = app.create_bella().await;

    let res = app
        .post_form(&format!("/edit/{id}"), &horse_parts("Bella", "NaN", None))
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let horse = app.db.horses().get_by_id(id).await.unwrap().unwrap();
    assert_eq!(horse.price, 1200.0);
}

#[tokio::test]
async fn unknown_and_malformed_ids_are_404() {
    let app = test_app().await;

    assert_eq!(app.get("/edit/42").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.get("/edit/abc").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.get("/delete/42").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.get("/delete/1.5").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.get("/remove_from_cart/x").await.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn adding_twice_gives_two_entries() {
    let app = test_app().await;
    let id = app.create_bella().await;

    app.get(&format!("/add_to_cart/{id}")).await;
    app.get(&format!("/add_to_cart/{id}")).await;

    let lines = app.db.cart().list_lines().await.unwrap();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|line| line.horse_id == id));
    assert_ne!(lines[0].entry_id, lines[1].entry_id);

    let html = body_text(app.get("/cart").await).await;
    assert_eq!(html.matches("/remove_from_cart/").count(), 2);
}

#[tokio::test]
async fn add_unknown_horse_to_cart_is_404() {
    let app = test_app().await;

    let res = app.get("/add_to_cart/77").await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.cart_len().await, 0);
}

#[tokio::test]
async fn remove_from_cart() {
    let app = test_app().await;
    let id = app.create_bella().await;
    let first = app.db.cart().add(id).await.unwrap();
    app.db.cart().add(id).await.unwrap();

    let res = app.get(&format!("/remove_from_cart/{}", first.id)).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/cart");
    let html = body_text(app.get_with_cookie("/cart", &flash_cookie(&res)).await).await;
    assert!(html.contains("Horse removed from cart!"));
    assert_eq!(app.cart_len().await, 1);
}

#[tokio::test]
async fn remove_unknown_entry_leaves_cart_alone() {
    let app = test_app().await;
    let id = app.create_bella().await;
    let entry = app.db.cart().add(id).await.unwrap();

    let res = app.get(&format!("/remove_from_cart/{}", entry.id + 1)).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.cart_len().await, 1);
}

// =============================================================================
// Flash cookie
// =============================================================================

#[tokio::test]
async fn forged_flash_cookie_is_ignored() {
    let app = test_app().await;

    let res = app
        .get_with_cookie("/", &format!("{FLASH_COOKIE}=WyJoYWNrZWQiXQ.bm90LWEtc2lnbmF0dXJl"))
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(!body_text(res).await.contains("hacked"));
}

#[tokio::test]
async fn messages_accumulate_across_redirects() {
    let app = test_app().await;
    let id = app.create_bella().await;

    let first = app.get(&format!("/add_to_cart/{id}")).await;
    let second = app
        .get_with_cookie(&format!("/add_to_cart/{id}"), &flash_cookie(&first))
        .await;

    let html = body_text(app.get_with_cookie("/", &flash_cookie(&second)).await).await;
    assert_eq!(html.matches("Horse added to cart!").count(), 2);
}
