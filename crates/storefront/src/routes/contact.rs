//! Contact form route handlers.
//!
//! Messages are acknowledged and logged; there is no mail backend.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, http::StatusCode, response::IntoResponse};
use kicklabs_core::{Email, Route};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::add_breadcrumb;
use crate::filters;
use crate::routes::Layout;

/// Contact form data.
#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub layout: Layout,
    pub form: ContactForm,
    pub errors: Vec<String>,
    /// Set once a valid message was received.
    pub sent: bool,
}

impl ContactForm {
    fn validate(&self) -> Result<Email, Vec<String>> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push("Please tell us your name.".to_string());
        }
        if self.message.trim().is_empty() {
            errors.push("Please write a message.".to_string());
        }
        let email = match Email::parse(&self.email) {
            Ok(email) => Some(email),
            Err(e) => {
                errors.push(format!("Email: {e}"));
                None
            }
        };

        match email {
            Some(email) if errors.is_empty() => Ok(email),
            _ => Err(errors),
        }
    }
}

async fn layout(session: &Session) -> Layout {
    Layout::load(session, "Contact Us", Some(Route::Contact)).await
}

/// Display the contact form.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    ContactTemplate {
        layout: layout(&session).await,
        form: ContactForm::default(),
        errors: Vec::new(),
        sent: false,
    }
}

/// Accept a contact message.
///
/// Invalid input re-renders the form with the entered values and a 422.
#[instrument(skip(session, form))]
pub async fn submit(session: Session, Form(form): Form<ContactForm>) -> impl IntoResponse {
    let layout = layout(&session).await;

    match form.validate() {
        Ok(email) => {
            tracing::info!(domain = email.domain(), "Contact message received");
            add_breadcrumb("contact", "Contact message received", None);
            (
                StatusCode::OK,
                ContactTemplate {
                    layout,
                    form: ContactForm::default(),
                    errors: Vec::new(),
                    sent: true,
                },
            )
        }
        Err(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            ContactTemplate {
                layout,
                form,
                errors,
                sent: false,
            },
        ),
    }
}
