//! Shoe restoration estimate route handlers.
//!
//! The quote form is multipart because it carries the shoe photo. Nothing is
//! stored: the photo is echoed back as a preview and the estimate is computed
//! from the submitted selections on every post.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{
        Multipart,
        multipart::{Field, MultipartError},
    },
    response::IntoResponse,
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use kicklabs_core::restoration::{
    BUNDLE_DISCOUNT_PERCENT, KID_SIZES, RestorationEstimate, estimate,
};
use kicklabs_core::{Condition, Price, Route, Service, ServiceSelection, ShoeType};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::routes::Layout;

/// Largest accepted quote upload, photo included.
pub const MAX_UPLOAD_BYTES: usize = 8 * 1024 * 1024;

/// Shown when the quote form is submitted without a photo.
pub const MISSING_PHOTO_NOTICE: &str = "Please upload a shoe photo first!";

/// Shown after a pickup is requested.
pub const BOOKED_NOTICE: &str = "Namaste! Your restoration pickup has been booked. Our agent will contact you shortly to coordinate the pickup.";

/// A select or radio choice.
#[derive(Debug, Clone)]
pub struct ChoiceView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// A condition radio card.
#[derive(Debug, Clone)]
pub struct ConditionView {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub turnaround: &'static str,
    pub base_cost: String,
    pub selected: bool,
}

/// A service checkbox card.
#[derive(Debug, Clone)]
pub struct ServiceView {
    pub id: &'static str,
    pub label: &'static str,
    /// `FREE` or `+ NPR 250`.
    pub cost: String,
    pub mandatory: bool,
    pub selected: bool,
}

/// One priced line of the breakdown.
#[derive(Debug, Clone)]
pub struct EstimateLine {
    pub label: &'static str,
    pub cost: String,
}

/// The estimate panel.
#[derive(Debug, Clone)]
pub struct EstimateView {
    pub condition_id: &'static str,
    pub condition_label: &'static str,
    pub base: String,
    /// Paid add-ons only; free services are not itemised.
    pub addons: Vec<EstimateLine>,
    pub service_ids: Vec<&'static str>,
    pub discount: Option<String>,
    pub discount_percent: u32,
    pub total: String,
    pub turnaround: &'static str,
}

impl From<&RestorationEstimate> for EstimateView {
    fn from(quote: &RestorationEstimate) -> Self {
        Self {
            condition_id: quote.condition.id(),
            condition_label: quote.condition.label(),
            base: quote.base.display(),
            addons: quote
                .services
                .iter()
                .filter(|s| s.cost() != Price::ZERO)
                .map(|s| EstimateLine {
                    label: s.label(),
                    cost: s.cost().display(),
                })
                .collect(),
            service_ids: quote.services.iter().map(Service::id).collect(),
            discount: quote.has_discount().then(|| quote.discount.display()),
            discount_percent: BUNDLE_DISCOUNT_PERCENT,
            total: quote.total.display(),
            turnaround: quote.turnaround,
        }
    }
}

/// Restoration page template.
#[derive(Template, WebTemplate)]
#[template(path = "restoration.html")]
pub struct RestorationTemplate {
    pub layout: Layout,
    pub shoe_types: Vec<ChoiceView>,
    pub sizes: Vec<ChoiceView>,
    pub conditions: Vec<ConditionView>,
    pub services: Vec<ServiceView>,
    pub photo_preview: Option<String>,
    pub estimate: Option<EstimateView>,
    pub notice: Option<&'static str>,
}

/// An uploaded shoe photo.
#[derive(Debug, Clone)]
struct Photo {
    content_type: String,
    bytes: Vec<u8>,
}

impl Photo {
    fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.content_type, STANDARD.encode(&self.bytes))
    }
}

/// The submitted quote form.
#[derive(Debug, Clone)]
struct QuoteRequest {
    photo: Option<Photo>,
    shoe_type: ShoeType,
    size: u8,
    condition: Condition,
    selection: ServiceSelection,
}

impl Default for QuoteRequest {
    fn default() -> Self {
        Self {
            photo: None,
            shoe_type: ShoeType::default(),
            size: 5,
            condition: Condition::default(),
            selection: ServiceSelection::new(),
        }
    }
}

fn multipart_error(err: &MultipartError) -> AppError {
    AppError::BadRequest(format!("invalid upload: {err}"))
}

async fn field_text(field: Field<'_>) -> Result<String> {
    field.text().await.map_err(|e| multipart_error(&e))
}

fn parse_size(raw: &str) -> Result<u8> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .filter(|size| KID_SIZES.contains(size))
        .ok_or_else(|| AppError::BadRequest(format!("unknown size: {raw}")))
}

impl QuoteRequest {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self> {
        let mut request = Self::default();
        let mut services = Vec::new();

        while let Some(field) = multipart.next_field().await.map_err(|e| multipart_error(&e))? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "photo" => {
                    let content_type = field.content_type().unwrap_or_default().to_string();
                    let bytes = field.bytes().await.map_err(|e| multipart_error(&e))?;
                    // Browsers send an empty part when no file was chosen.
                    if bytes.is_empty() {
                        continue;
                    }
                    if !content_type.starts_with("image/") {
                        return Err(AppError::BadRequest("photo must be an image".to_string()));
                    }
                    request.photo = Some(Photo {
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
                "shoe_type" => request.shoe_type = field_text(field).await?.parse()?,
                "size" => request.size = parse_size(&field_text(field).await?)?,
                "condition" => request.condition = field_text(field).await?.parse()?,
                "service" => services.push(field_text(field).await?.parse::<Service>()?),
                other => tracing::debug!(field = other, "Ignoring unknown quote field"),
            }
        }

        request.selection = ServiceSelection::with(services);
        Ok(request)
    }
}

impl RestorationTemplate {
    fn new(layout: Layout, request: &QuoteRequest) -> Self {
        Self {
            layout,
            shoe_types: ShoeType::ALL
                .iter()
                .map(|t| ChoiceView {
                    value: t.label().to_string(),
                    label: t.label().to_string(),
                    selected: *t == request.shoe_type,
                })
                .collect(),
            sizes: KID_SIZES
                .map(|size| ChoiceView {
                    value: size.to_string(),
                    label: format!("Size {size}"),
                    selected: size == request.size,
                })
                .collect(),
            conditions: Condition::ALL
                .iter()
                .map(|c| ConditionView {
                    id: c.id(),
                    label: c.label(),
                    description: c.description(),
                    turnaround: c.turnaround(),
                    base_cost: c.base_cost().display(),
                    selected: *c == request.condition,
                })
                .collect(),
            services: Service::ALL
                .iter()
                .map(|s| ServiceView {
                    id: s.id(),
                    label: s.label(),
                    cost: if s.cost() == Price::ZERO {
                        "FREE".to_string()
                    } else {
                        format!("+ {}", s.cost().display())
                    },
                    mandatory: s.is_mandatory(),
                    selected: request.selection.contains(*s),
                })
                .collect(),
            photo_preview: request.photo.as_ref().map(Photo::data_url),
            estimate: None,
            notice: None,
        }
    }
}

async fn layout(session: &Session) -> Layout {
    Layout::load(session, "Shoe Restoration", Some(Route::Restoration)).await
}

/// Display the empty quote form.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    RestorationTemplate::new(layout(&session).await, &QuoteRequest::default())
}

/// Quote a restoration from the uploaded form.
///
/// Without a photo the form is shown again with a notice instead of an estimate.
///
/// # Errors
///
/// Returns 400 for a malformed upload or an unknown option.
#[instrument(skip(session, multipart))]
pub async fn quote(session: Session, multipart: Multipart) -> Result<impl IntoResponse> {
    let request = QuoteRequest::from_multipart(multipart).await?;
    let mut page = RestorationTemplate::new(layout(&session).await, &request);

    if request.photo.is_none() {
        page.notice = Some(MISSING_PHOTO_NOTICE);
        return Ok(page);
    }

    let quote = estimate(request.condition, &request.selection);
    tracing::info!(
        condition = request.condition.id(),
        services = quote.services.len(),
        total = quote.total.whole_units(),
        shoe_type = %request.shoe_type,
        size = request.size,
        "Restoration quoted"
    );
    page.estimate = Some(EstimateView::from(&quote));
    Ok(page)
}

/// Request a pickup for a quoted restoration.
///
/// The booking form repeats the quoted condition and services so the
/// acknowledgement can show the same estimate.
///
/// # Errors
///
/// Returns 400 for an unknown condition or service.
#[instrument(skip(session, form))]
pub async fn book(
    session: Session,
    Form(form): Form<Vec<(String, String)>>,
) -> Result<impl IntoResponse> {
    let mut request = QuoteRequest::default();
    let mut services = Vec::new();
    for (key, value) in &form {
        match key.as_str() {
            "condition" => request.condition = value.parse()?,
            "service" => services.push(value.parse::<Service>()?),
            _ => {}
        }
    }
    request.selection = ServiceSelection::with(services);

    let quote = estimate(request.condition, &request.selection);
    let total = quote.total.whole_units().to_string();
    add_breadcrumb("restoration", "Pickup booked", Some(&[("total", total.as_str())]));
    tracing::info!(condition = request.condition.id(), total = %total, "Restoration pickup booked");

    let mut page = RestorationTemplate::new(layout(&session).await, &request);
    page.estimate = Some(EstimateView::from(&quote));
    page.notice = Some(BOOKED_NOTICE);
    Ok(page)
}
