//! Static content page route handlers.
//!
//! Serves the markdown pages (about, FAQ, size chart, returns, shipping).

use askama::Template;
use askama_web::WebTemplate;
use axum::{Router, extract::State, response::IntoResponse, routing::get};
use kicklabs_core::Route;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::routes::Layout;
use crate::state::AppState;

/// Content page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/content.html")]
pub struct ContentPageTemplate {
    pub layout: Layout,
    pub title: String,
    pub description: String,
    pub updated_at: Option<String>,
    pub content_html: String,
}

/// The markdown page backing a route, if it is a content page.
#[must_use]
pub const fn content_slug(route: Route) -> Option<&'static str> {
    match route {
        Route::About | Route::Faq | Route::SizeChart | Route::Returns | Route::Shipping => {
            Some(route.slug())
        }
        Route::Home
        | Route::Shop
        | Route::Customize
        | Route::Restoration
        | Route::Cart
        | Route::Contact
        | Route::TrackOrder => None,
    }
}

/// Serve the content page for a route.
///
/// # Errors
///
/// Returns 404 if the route has no content page or the page wasn't loaded.
#[instrument(skip(state, session))]
pub async fn show(state: AppState, session: Session, route: Route) -> Result<impl IntoResponse> {
    let page = content_slug(route)
        .and_then(|slug| state.content().get_page(slug))
        .ok_or_else(|| AppError::NotFound(format!("page {}", route.path())))?;

    Ok(ContentPageTemplate {
        layout: Layout::load(&session, page.meta.title.clone(), Some(route)).await,
        title: page.meta.title.clone(),
        description: page.meta.description.clone().unwrap_or_default(),
        updated_at: page.meta.updated_at.map(|d| d.format("%B %-d, %Y").to_string()),
        content_html: page.content_html.clone(),
    })
}

/// One GET route per content page.
pub fn router() -> Router<AppState> {
    Route::ALL
        .into_iter()
        .filter(|route| content_slug(*route).is_some())
        .fold(Router::new(), |router, route| {
            router.route(
                route.path(),
                get(move |State(state): State<AppState>, session: Session| {
                    show(state, session, route)
                }),
            )
        })
}
