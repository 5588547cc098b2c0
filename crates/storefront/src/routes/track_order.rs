//! Order lookup route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, http::StatusCode, response::IntoResponse};
use kicklabs_core::Route;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::filters;
use crate::routes::Layout;

/// Longest order reference we accept, e.g. `KICK-88210`.
const MAX_ORDER_ID_LEN: usize = 32;

/// Order lookup form data.
#[derive(Debug, Default, Deserialize)]
pub struct TrackOrderForm {
    #[serde(default)]
    pub order_id: String,
}

/// Track order page template.
#[derive(Template, WebTemplate)]
#[template(path = "track_order.html")]
pub struct TrackOrderTemplate {
    pub layout: Layout,
    pub form: TrackOrderForm,
    pub error: Option<String>,
    /// The normalised order reference that was looked up.
    pub acknowledged: Option<String>,
}

/// Upper-case the reference and check it is plausible.
fn normalize_order_id(raw: &str) -> Option<String> {
    let id = raw.trim().trim_start_matches('#').to_ascii_uppercase();
    let valid = !id.is_empty()
        && id.len() <= MAX_ORDER_ID_LEN
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    valid.then_some(id)
}

async fn layout(session: &Session) -> Layout {
    Layout::load(session, "Track Your Order", Some(Route::TrackOrder)).await
}

/// Display the lookup form.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    TrackOrderTemplate {
        layout: layout(&session).await,
        form: TrackOrderForm::default(),
        error: None,
        acknowledged: None,
    }
}

/// Acknowledge an order lookup.
#[instrument(skip(session, form))]
pub async fn lookup(session: Session, Form(form): Form<TrackOrderForm>) -> impl IntoResponse {
    let layout = layout(&session).await;

    let Some(order_id) = normalize_order_id(&form.order_id) else {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            TrackOrderTemplate {
                layout,
                form,
                error: Some("Please enter the order number from your confirmation email.".to_string()),
                acknowledged: None,
            },
        );
    };

    tracing::info!(%order_id, "Order lookup requested");
    (
        StatusCode::OK,
        TrackOrderTemplate {
            layout,
            form: TrackOrderForm::default(),
            error: None,
            acknowledged: Some(order_id),
        },
    )
}
