//! Multi-request visitor flows through the storefront router.

#![allow(clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use kicklabs_integration_tests::{
    DesignBehavior, FAKE_IMAGE_DATA, FakeGenAi, Multipart, TestApp, body_text, location,
};
use kicklabs_storefront::genai::FALLBACK_REPLY;

fn app() -> TestApp {
    TestApp::new(FakeGenAi::new(Some("Leather, every time.")))
}

/// The first `line_id` hidden input on the cart page.
fn first_line_id(cart_page: &str) -> String {
    let marker = "name=\"line_id\" value=\"";
    let start = cart_page.find(marker).unwrap() + marker.len();
    let rest = &cart_page[start..];
    rest[..rest.find('"').unwrap()].to_string()
}

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn test_cart_add_update_remove() {
    let mut app = app();

    let response = app.post_form("/cart/add", "product_id=1").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/cart");
    app.post_form("/cart/add", "product_id=1").await;

    let (_, page) = app.page("/cart").await;
    assert!(page.contains("Dhaka Dash Sneakers"));
    assert!(page.contains("Subtotal NPR 7,600"));

    let (_, badge) = app.page("/cart/count").await;
    assert!(badge.contains(">2<"));

    let line_id = first_line_id(&page);
    app.post_form("/cart/update", &format!("line_id={line_id}&quantity=3"))
        .await;
    let (_, page) = app.page("/cart").await;
    assert!(page.contains("Subtotal NPR 11,400"));

    let response = app
        .post_form("/cart/remove", &format!("line_id={line_id}"))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let (_, page) = app.page("/cart").await;
    assert!(!page.contains("Dhaka Dash Sneakers"));
}

#[tokio::test]
async fn test_cart_quantity_zero_removes_line() {
    let mut app = app();
    app.post_form("/cart/add", "product_id=2").await;

    let (_, page) = app.page("/cart").await;
    let line_id = first_line_id(&page);
    app.post_form("/cart/update", &format!("line_id={line_id}&quantity=0"))
        .await;

    let (_, badge) = app.page("/cart/count").await;
    assert!(!badge.contains("badge"));
}

#[tokio::test]
async fn test_cart_add_rejects_unknown_product_and_bad_line() {
    let mut app = app();

    let response = app.post_form("/cart/add", "product_id=42").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .post_form("/cart/update", "line_id=not-a-uuid&quantity=1")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cart_update_above_line_limit_is_rejected() {
    let mut app = app();
    app.post_form("/cart/add", "product_id=2").await;
    let (_, page) = app.page("/cart").await;
    let line_id = first_line_id(&page);

    for quantity in ["100", "4294967295"] {
        let response = app
            .post_form("/cart/update", &format!("line_id={line_id}&quantity={quantity}"))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let response = app
        .post_form("/cart/update", &format!("line_id={line_id}&quantity=99"))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    app.post_form("/cart/add", "product_id=2").await;

    let (_, badge) = app.page("/cart/count").await;
    assert!(badge.contains(">99<"));
}

#[tokio::test]
async fn test_cart_add_return_to_stays_on_site() {
    let mut app = app();

    let response = app
        .post_form("/cart/add", "product_id=1&return_to=%2Fshop%3Ftag%3DSneakers")
        .await;
    assert_eq!(location(&response), "/shop?tag=Sneakers");

    for target in ["%2F%2Fevil.example", "%2F%5Cevil.example", "https%3A%2F%2Fevil.example"] {
        let response = app
            .post_form("/cart/add", &format!("product_id=1&return_to={target}"))
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/cart");
    }
}

#[tokio::test]
async fn test_customizable_product_redirects_to_workshop() {
    let mut app = app();

    let response = app.post_form("/cart/add", "product_id=7").await;
    assert_eq!(location(&response), "/customize");

    let (_, badge) = app.page("/cart/count").await;
    assert!(!badge.contains("badge"));
}

#[tokio::test]
async fn test_htmx_add_returns_badge() {
    let mut app = app();

    let builder = Request::post("/cart/add")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header("hx-request", "true");
    let response = app.send(builder, Body::from("product_id=4")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("hx-trigger").unwrap(), "cart-updated");
    assert!(body_text(response).await.contains(">1<"));
}

// =============================================================================
// Design workshop
// =============================================================================

#[tokio::test]
async fn test_generate_standard_design_and_add_to_cart() {
    let mut app = app();

    let response = app
        .post_form(
            "/customize/generate",
            "prompt=Yeti+footprints+on+snow&material=suede&lace_style=braided&lace_color=sky&resolution=1K",
        )
        .await;
    assert_eq!(location(&response), "/customize");

    let (_, page) = app.page("/customize").await;
    assert!(page.contains(FAKE_IMAGE_DATA));
    assert!(page.contains("Yeti footprints on snow"));

    let response = app.post_form("/customize/add-to-cart", "").await;
    assert_eq!(location(&response), "/customize");

    let (_, cart) = app.page("/cart").await;
    assert!(cart.contains("Design-Your-Own Dreamer"));
    assert!(cart.contains("Subtotal NPR 6,500"));
}

#[tokio::test]
async fn test_pro_render_asks_for_key_until_one_is_selected() {
    let mut app = app();

    app.post_form("/customize/generate", "prompt=Temple+gold+rhinos&resolution=4K")
        .await;
    let (_, page) = app.page("/customize").await;
    assert!(page.contains("Authorization Required"));
    assert!(!page.contains(FAKE_IMAGE_DATA));

    let response = app
        .post_form("/customize/credential", "api_key=AIzaSyVisitorProjectKey")
        .await;
    assert_eq!(location(&response), "/customize");
    let (_, page) = app.page("/customize").await;
    assert!(!page.contains("Authorization Required"));

    app.post_form("/customize/generate", "prompt=Temple+gold+rhinos&resolution=4K")
        .await;
    let (_, page) = app.page("/customize").await;
    assert!(page.contains(FAKE_IMAGE_DATA));
}

#[tokio::test]
async fn test_generate_without_prompt_reports_missing_prompt() {
    let mut app = app();

    app.post_form("/customize/generate", "prompt=++").await;
    let (_, page) = app.page("/customize").await;
    assert!(page.contains("Describe your design or pick a theme first."));
}

#[tokio::test]
async fn test_theme_folds_into_prompt() {
    let mut app = app();

    app.post_form("/customize/theme", "prompt=Bright+colours&theme=Yeti+Footprints")
        .await;
    let (_, page) = app.page("/customize").await;
    assert!(page.contains("Bright colours, Yeti Footprints"));

    let response = app
        .post_form("/customize/theme", "prompt=x&theme=Dragons")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_failed_render_shows_notice() {
    let mut app = TestApp::new(FakeGenAi::new(None).with_design(DesignBehavior::Broken));

    app.post_form("/customize/generate", "prompt=Rhododendron+blossoms")
        .await;
    let (_, page) = app.page("/customize").await;
    assert!(page.contains("notice error"));
}

#[tokio::test]
async fn test_add_to_cart_without_design_is_rejected() {
    let response = app().post_form("/customize/add-to-cart", "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_workshop_option_is_rejected() {
    let response = app()
        .post_form("/customize/generate", "prompt=Tigers&material=plastic")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Restoration
// =============================================================================

#[tokio::test]
async fn test_restoration_quote_with_photo() {
    let mut app = app();
    let (content_type, body) = Multipart::default()
        .file("photo", "shoe.png", "image/png", b"\x89PNG\r\n")
        .text("shoe_type", "Sneakers")
        .text("size", "6")
        .text("condition", "medium")
        .text("service", "deep")
        .text("service", "stain")
        .text("service", "lace")
        .finish();

    let builder = Request::post("/restoration").header(header::CONTENT_TYPE, content_type);
    let response = app.send(builder, body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_text(response).await;
    assert!(page.contains("NPR 1,039"));
    assert!(page.contains("Multi-service discount applied!"));
    assert!(page.contains("data:image/png;base64,"));
}

#[tokio::test]
async fn test_restoration_quote_without_photo() {
    let mut app = app();
    let (content_type, body) = Multipart::default()
        .text("condition", "heavy")
        .finish();

    let builder = Request::post("/restoration").header(header::CONTENT_TYPE, content_type);
    let page = body_text(app.send(builder, body).await).await;
    assert!(page.contains("Please upload a shoe photo first!"));
}

#[tokio::test]
async fn test_restoration_rejects_non_image_upload() {
    let mut app = app();
    let (content_type, body) = Multipart::default()
        .file("photo", "notes.txt", "text/plain", b"hello")
        .finish();

    let builder = Request::post("/restoration").header(header::CONTENT_TYPE, content_type);
    let response = app.send(builder, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_restoration_booking() {
    let mut app = app();

    let response = app
        .post_form("/restoration/book", "condition=damage&service=glue")
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_text(response).await;
    assert!(page.contains("Your restoration pickup has been booked."));
    assert!(page.contains("NPR 1,299"));
}

// =============================================================================
// Assistant
// =============================================================================

#[tokio::test]
async fn test_assistant_conversation() {
    let mut app = app();

    let response = app
        .post_form("/assistant", "message=Which+material+for+monsoon%3F")
        .await;
    assert_eq!(location(&response), "/assistant");

    let (_, page) = app.page("/assistant").await;
    assert!(page.contains("Which material for monsoon?"));
    assert!(page.contains("Leather, every time."));
    assert_eq!(app.genai.queries(), ["Which material for monsoon?"]);

    app.post_form("/assistant/clear", "").await;
    let (_, page) = app.page("/assistant").await;
    assert!(!page.contains("Leather, every time."));
}

#[tokio::test]
async fn test_assistant_failure_uses_fallback_reply() {
    let mut app = TestApp::new(FakeGenAi::new(None));

    app.post_form("/assistant", "message=Hello").await;
    let (_, page) = app.page("/assistant").await;
    assert!(page.contains(FALLBACK_REPLY));
}

#[tokio::test]
async fn test_assistant_rejects_empty_question() {
    let response = app().post_form("/assistant", "message=+++").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
