//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use kicklabs_core::Route;
use tower_sessions::Session;
use tracing::instrument;

use crate::filters;
use crate::routes::Layout;
use crate::routes::products::ProductCard;
use crate::state::AppState;

/// Number of products in the featured grid.
const FEATURED_COUNT: usize = 4;

/// Lifestyle photography for the hero gallery.
const HERO_IMAGES: [&str; 3] = [
    "https://images.unsplash.com/photo-1595950653106-6c9ebd614d3a?ixlib=rb-4.0.3&auto=format&fit=crop&w=1950&q=80",
    "https://images.unsplash.com/photo-1514989940723-e8e51635b782?ixlib=rb-4.0.3&auto=format&fit=crop&w=1950&q=80",
    "https://images.unsplash.com/photo-1516478177764-9fe5bd7e9717?ixlib=rb-4.0.3&auto=format&fit=crop&w=1950&q=80",
];

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: Layout,
    pub featured: Vec<ProductCard>,
    pub hero_images: &'static [&'static str],
    pub shop_href: &'static str,
    pub customize_href: &'static str,
}

/// Display the home page.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let featured = state
        .catalog()
        .featured(FEATURED_COUNT)
        .iter()
        .map(ProductCard::from)
        .collect();

    HomeTemplate {
        layout: Layout::load(&session, "Walk with Pride, Step with Culture", Some(Route::Home))
            .await,
        featured,
        hero_images: &HERO_IMAGES,
        shop_href: Route::Shop.path(),
        customize_href: Route::Customize.path(),
    }
}
