//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /shop                   - Product grid with filter sidebar (filter state in the query)
//! GET  /products/{id}          - Product detail
//!
//! # Cart
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add a ready-made product
//! POST /cart/update            - Set a line's quantity (0 removes)
//! POST /cart/remove            - Remove a line
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Design workshop
//! GET  /customize              - Workshop page
//! POST /customize/theme        - Fold a heritage theme into the brief
//! POST /customize/generate     - Render a design (rate limited)
//! POST /customize/credential   - Select a visitor API key for pro renders
//! POST /customize/credential/clear - Forget the visitor API key
//! POST /customize/add-to-cart  - Add the last render to the cart
//!
//! # Restoration
//! GET  /restoration            - Quote form
//! POST /restoration            - Quote from photo, shoe details and services (multipart)
//! POST /restoration/book       - Request a pickup (rate limited)
//!
//! # Assistant
//! GET  /assistant              - Transcript
//! POST /assistant              - Ask a question (rate limited)
//! POST /assistant/clear        - Start over
//!
//! # Pages
//! GET  /about, /faq, /size-chart, /returns, /shipping - Markdown content
//! GET  /contact, POST /contact           - Contact form (POST rate limited)
//! GET  /track-order, POST /track-order   - Order lookup (POST rate limited)
//! ```

pub mod assistant;
pub mod cart;
pub mod contact;
pub mod customize;
pub mod home;
pub mod pages;
pub mod products;
pub mod restoration;
pub mod track_order;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{StatusCode, Uri},
    response::IntoResponse,
    routing::{get, post},
};
use kicklabs_core::{Cart, Route};
use tower_sessions::Session;

use crate::filters;
use crate::middleware::{form_rate_limiter, generation_rate_limiter};
use crate::models::session::load_cart;
use crate::state::AppState;

/// A navigation entry.
#[derive(Debug, Clone)]
pub struct NavLink {
    pub label: &'static str,
    pub path: &'static str,
    pub active: bool,
}

impl NavLink {
    fn new(route: Route, current: Option<Route>) -> Self {
        Self {
            label: route.label(),
            path: route.path(),
            active: current == Some(route),
        }
    }
}

/// Data every page needs for the shared layout.
#[derive(Debug, Clone)]
pub struct Layout {
    pub title: String,
    pub primary: Vec<NavLink>,
    pub secondary: Vec<NavLink>,
    pub help: Vec<NavLink>,
    pub cart_path: &'static str,
    pub cart_active: bool,
    pub cart_count: u32,
    pub assistant_path: &'static str,
}

impl Layout {
    /// Build the layout for a page; `current` highlights its nav entry.
    #[must_use]
    pub fn new(title: impl Into<String>, current: Option<Route>, cart: &Cart) -> Self {
        let links = |routes: &[Route]| {
            routes
                .iter()
                .map(|r| NavLink::new(*r, current))
                .collect::<Vec<_>>()
        };

        Self {
            title: title.into(),
            primary: links(&Route::PRIMARY),
            secondary: links(&Route::SECONDARY),
            help: links(&Route::HELP),
            cart_path: Route::Cart.path(),
            cart_active: current == Some(Route::Cart),
            cart_count: cart.item_count(),
            assistant_path: assistant::ASSISTANT_PATH,
        }
    }

    /// Build the layout, reading the cart count from the session.
    pub async fn load(session: &Session, title: impl Into<String>, current: Option<Route>) -> Self {
        Self::new(title, current, &load_cart(session).await)
    }
}

/// 404 page template.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub layout: Layout,
    pub path: String,
}

/// Fallback for unknown paths.
pub async fn not_found(session: Session, uri: Uri) -> impl IntoResponse {
    let layout = Layout::load(&session, "Page Not Found", None).await;
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            layout,
            path: uri.path().to_string(),
        },
    )
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the design workshop routes router.
pub fn customize_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(customize::show))
        .route("/theme", post(customize::theme))
        .route(
            "/generate",
            post(customize::generate).layer(generation_rate_limiter()),
        )
        .route("/credential", post(customize::select_credential))
        .route("/credential/clear", post(customize::clear_credential))
        .route("/add-to-cart", post(customize::add_to_cart))
}

/// Create the restoration routes router.
pub fn restoration_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(restoration::show)
                .post(restoration::quote)
                .layer(DefaultBodyLimit::max(restoration::MAX_UPLOAD_BYTES)),
        )
        .route("/book", post(restoration::book).layer(form_rate_limiter()))
}

/// Create the assistant routes router.
pub fn assistant_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(assistant::show).merge(post(assistant::ask).layer(generation_rate_limiter())),
        )
        .route("/clear", post(assistant::clear))
}

/// Create the contact and order lookup routes router.
pub fn form_routes() -> Router<AppState> {
    Router::new()
        .route(
            Route::Contact.path(),
            get(contact::show).merge(post(contact::submit).layer(form_rate_limiter())),
        )
        .route(
            Route::TrackOrder.path(),
            get(track_order::show).merge(post(track_order::lookup).layer(form_rate_limiter())),
        )
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(Route::Home.path(), get(home::home))
        .route(Route::Shop.path(), get(products::shop))
        .route("/products/{id}", get(products::show))
        .nest(Route::Cart.path(), cart_routes())
        .nest(Route::Customize.path(), customize_routes())
        .nest(Route::Restoration.path(), restoration_routes())
        .nest(assistant::ASSISTANT_PATH, assistant_routes())
        .merge(form_routes())
        .merge(pages::router())
        .fallback(not_found)
}
