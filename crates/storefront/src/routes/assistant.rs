//! Footwear assistant route handlers.
//!
//! Each question is sent on its own; the transcript is kept in the session for
//! display only.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use kicklabs_core::ChatMessage;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::genai::FALLBACK_REPLY;
use crate::models::session::{load_chat, save_chat};
use crate::routes::Layout;
use crate::state::AppState;

/// Where the assistant lives.
pub const ASSISTANT_PATH: &str = "/assistant";

/// Longest accepted question, in characters.
const MAX_QUESTION_CHARS: usize = 2_000;

/// Assistant page template.
#[derive(Template, WebTemplate)]
#[template(path = "assistant.html")]
pub struct AssistantTemplate {
    pub layout: Layout,
    pub messages: Vec<ChatMessage>,
    pub action: &'static str,
}

/// Question form data.
#[derive(Debug, Deserialize)]
pub struct AskForm {
    pub message: String,
}

/// Display the transcript.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    AssistantTemplate {
        layout: Layout::load(&session, "Design Assistant", None).await,
        messages: load_chat(&session).await,
        action: ASSISTANT_PATH,
    }
}

/// Ask the assistant a question.
///
/// A failed model call still records a reply, the fixed fallback text.
///
/// # Errors
///
/// Returns 400 for an empty or oversized question, or an error if the session
/// store fails.
#[instrument(skip(state, session, form))]
pub async fn ask(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AskForm>,
) -> Result<Redirect> {
    let question = form.message.trim();
    if question.is_empty() {
        return Err(AppError::BadRequest("message is required".to_string()));
    }
    if question.chars().count() > MAX_QUESTION_CHARS {
        return Err(AppError::BadRequest("message is too long".to_string()));
    }

    let mut chat = load_chat(&session).await;
    chat.push(ChatMessage::user(question));

    let reply = match state.genai().advise(question).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!(error = %e, "Assistant call failed, sending fallback reply");
            FALLBACK_REPLY.to_string()
        }
    };
    chat.push(ChatMessage::assistant(reply));

    save_chat(&session, &chat).await?;
    Ok(Redirect::to(ASSISTANT_PATH))
}

/// Start a new conversation.
///
/// # Errors
///
/// Returns an error if the session store fails.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Redirect> {
    save_chat(&session, &[]).await?;
    Ok(Redirect::to(ASSISTANT_PATH))
}

