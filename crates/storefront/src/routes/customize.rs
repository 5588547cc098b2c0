//! Design workshop route handlers.
//!
//! The visitor's brief, chosen resolution and last render live in the session
//! (see [`WorkshopState`]). Every action is a plain form post followed by a
//! redirect back to the workshop, which renders from that state.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use kicklabs_core::design::THEMES;
use kicklabs_core::{CustomDesign, DesignPrompt, LaceColor, LaceStyle, Material, Resolution, Route};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::genai::{DesignRequest, GenAiError};
use crate::models::session::{load_cart, load_credential, load_workshop, save_cart, save_workshop};
use crate::models::{WorkshopState, WorkshopStatus};
use crate::routes::Layout;
use crate::state::AppState;

/// One choice in a workshop picker.
#[derive(Debug, Clone)]
pub struct OptionView {
    pub id: &'static str,
    pub name: &'static str,
    /// Tagline for materials, swatch colour for lace colours.
    pub detail: &'static str,
    pub selected: bool,
}

/// A resolution choice; pro choices need a visitor key.
#[derive(Debug, Clone)]
pub struct ResolutionView {
    pub id: &'static str,
    pub pro: bool,
    pub selected: bool,
}

/// Workshop page template.
#[derive(Template, WebTemplate)]
#[template(path = "customize.html")]
pub struct CustomizeTemplate {
    pub layout: Layout,
    pub prompt: String,
    pub themes: &'static [&'static str],
    pub materials: Vec<OptionView>,
    pub lace_styles: Vec<OptionView>,
    pub lace_colors: Vec<OptionView>,
    pub resolutions: Vec<ResolutionView>,
    /// The brief as the model will see it.
    pub enriched: String,
    pub design: Option<CustomDesign>,
    pub status: WorkshopStatus,
    pub has_credential: bool,
    /// Price of the blank a custom design is printed on.
    pub base_price: Option<String>,
}

/// The workshop form. Theme buttons post the same form with `theme` set.
#[derive(Debug, Default, Deserialize)]
pub struct WorkshopForm {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub lace_style: Option<String>,
    #[serde(default)]
    pub lace_color: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
}

impl WorkshopForm {
    /// Fold the submitted selections into the stored workshop state.
    ///
    /// Omitted pickers keep their previous value.
    fn apply(&self, workshop: &mut WorkshopState) -> Result<()> {
        let brief = &mut workshop.brief;
        brief.prompt = self.prompt.trim().to_string();
        if let Some(material) = &self.material {
            brief.material = material.parse()?;
        }
        if let Some(style) = &self.lace_style {
            brief.lace_style = style.parse()?;
        }
        if let Some(color) = &self.lace_color {
            brief.lace_color = color.parse()?;
        }
        if let Some(resolution) = &self.resolution {
            workshop.resolution = resolution.parse()?;
        }
        Ok(())
    }
}

/// Credential selection form.
#[derive(Debug, Deserialize)]
pub struct CredentialForm {
    pub api_key: String,
}

fn picker<T: Copy + PartialEq>(
    all: &[T],
    current: T,
    view: impl Fn(T) -> (&'static str, &'static str, &'static str),
) -> Vec<OptionView> {
    all.iter()
        .map(|option| {
            let (id, name, detail) = view(*option);
            OptionView {
                id,
                name,
                detail,
                selected: *option == current,
            }
        })
        .collect()
}

impl CustomizeTemplate {
    fn new(layout: Layout, workshop: WorkshopState, has_credential: bool) -> Self {
        let brief: &DesignPrompt = &workshop.brief;
        let enriched = if brief.is_blank() {
            String::new()
        } else {
            brief.enriched()
        };

        Self {
            layout,
            prompt: brief.prompt.clone(),
            themes: &THEMES,
            materials: picker(Material::ALL, brief.material, |m| (m.id(), m.name(), m.tagline())),
            lace_styles: picker(LaceStyle::ALL, brief.lace_style, |s| (s.id(), s.name(), "")),
            lace_colors: picker(LaceColor::ALL, brief.lace_color, |c| (c.id(), c.name(), c.hex())),
            resolutions: Resolution::ALL
                .iter()
                .map(|r| ResolutionView {
                    id: r.image_size(),
                    pro: r.is_pro(),
                    selected: *r == workshop.resolution,
                })
                .collect(),
            enriched,
            design: workshop.design,
            status: workshop.status,
            has_credential,
            base_price: None,
        }
    }
}

fn back_to_workshop() -> Redirect {
    Redirect::to(Route::Customize.path())
}

/// Display the workshop.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let layout = Layout::load(&session, "Design Workshop", Some(Route::Customize)).await;
    let workshop = load_workshop(&session).await;
    let has_credential = load_credential(&session).await.is_some();

    let mut page = CustomizeTemplate::new(layout, workshop, has_credential);
    page.base_price = state.catalog().design_base().map(|p| p.price.display());
    page
}

/// Fold a heritage theme into the brief.
///
/// # Errors
///
/// Returns 400 for an unknown option id, or an error if the session store fails.
#[instrument(skip(session))]
pub async fn theme(session: Session, Form(form): Form<WorkshopForm>) -> Result<Redirect> {
    let mut workshop = load_workshop(&session).await;
    form.apply(&mut workshop)?;

    match form.theme.as_deref() {
        Some(theme) if THEMES.iter().any(|t| *t == theme) => workshop.brief.add_theme(theme),
        Some(theme) => return Err(AppError::BadRequest(format!("unknown theme: {theme}"))),
        None => {}
    }
    workshop.status = WorkshopStatus::Idle;

    save_workshop(&session, &workshop).await?;
    Ok(back_to_workshop())
}

/// Render a design from the brief.
///
/// Credential problems and model failures are reported on the workshop page
/// rather than as error responses.
///
/// # Errors
///
/// Returns 400 for an unknown option id, or an error if the session store fails.
#[instrument(skip(state, session, form), fields(resolution = tracing::field::Empty))]
pub async fn generate(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<WorkshopForm>,
) -> Result<Redirect> {
    let mut workshop = load_workshop(&session).await;
    form.apply(&mut workshop)?;
    tracing::Span::current().record("resolution", workshop.resolution.image_size());

    if workshop.brief.is_blank() {
        workshop.status = WorkshopStatus::MissingPrompt;
        save_workshop(&session, &workshop).await?;
        return Ok(back_to_workshop());
    }

    let request = DesignRequest {
        prompt: workshop.brief.clone(),
        resolution: workshop.resolution,
    };
    let credential = load_credential(&session).await;

    match state.genai().generate_design(&request, credential.as_ref()).await {
        Ok(image) => {
            tracing::info!("Design rendered");
            workshop.design = Some(CustomDesign {
                prompt: workshop.brief.prompt.clone(),
                image_url: image.data_url(),
            });
            workshop.status = WorkshopStatus::Idle;
        }
        Err(GenAiError::AuthorizationRequired(reason)) => {
            tracing::info!(?reason, "Design needs a visitor API key");
            workshop.status = WorkshopStatus::NeedsKey;
        }
        Err(e) => {
            let event_id = sentry::capture_error(&e);
            tracing::error!(error = %e, sentry_event_id = %event_id, "Design generation failed");
            workshop.status = WorkshopStatus::Failed;
        }
    }

    save_workshop(&session, &workshop).await?;
    Ok(back_to_workshop())
}

/// Store a visitor API key for pro renders.
///
/// # Errors
///
/// Returns 400 for a blank key, or an error if the session store fails.
#[instrument(skip(session, form))]
pub async fn select_credential(
    session: Session,
    Form(form): Form<CredentialForm>,
) -> Result<Redirect> {
    if form.api_key.trim().is_empty() {
        return Err(AppError::BadRequest("API key is required".to_string()));
    }
    crate::models::session::save_credential(&session, &form.api_key).await?;

    let mut workshop = load_workshop(&session).await;
    if workshop.status == WorkshopStatus::NeedsKey {
        workshop.status = WorkshopStatus::Idle;
        save_workshop(&session, &workshop).await?;
    }

    add_breadcrumb("workshop", "Visitor API key selected", None);
    Ok(back_to_workshop())
}

/// Forget the visitor API key.
///
/// # Errors
///
/// Returns an error if the session store fails.
#[instrument(skip(session))]
pub async fn clear_credential(session: Session) -> Result<Redirect> {
    crate::models::session::clear_credential(&session).await?;
    Ok(back_to_workshop())
}

/// Add the last render to the cart as a custom line.
///
/// # Errors
///
/// Returns 400 when there is no render yet, or an error if the session store fails.
#[instrument(skip(state, session))]
pub async fn add_to_cart(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    let mut workshop = load_workshop(&session).await;
    let design = workshop
        .design
        .clone()
        .ok_or_else(|| AppError::BadRequest("no design to add".to_string()))?;
    let base = state
        .catalog()
        .design_base()
        .ok_or_else(|| AppError::Internal("catalog has no customizable product".to_string()))?;

    let mut cart = load_cart(&session).await;
    let line_id = cart.add_custom(base, design);
    save_cart(&session, &cart).await?;

    workshop.status = WorkshopStatus::AddedToCart;
    save_workshop(&session, &workshop).await?;

    let line = line_id.to_string();
    add_breadcrumb("cart", "Added custom design", Some(&[("line_id", line.as_str())]));
    Ok(back_to_workshop())
}
