//! Cart route handlers.
//!
//! The cart lives in the visitor session. Forms work without JavaScript; an
//! HTMX add request gets the count badge back instead of a redirect.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use kicklabs_core::{Cart, CartLine, LineId, MAX_LINE_QUANTITY, ProductId, Route};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::models::session::{load_cart, save_cart};
use crate::routes::Layout;
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub line_id: String,
    pub name: String,
    pub brand: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    /// The workshop prompt, for custom designs.
    pub design_prompt: Option<String>,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            line_id: line.id.to_string(),
            name: line.product.name.clone(),
            brand: line.product.brand.clone(),
            image: line.image().to_string(),
            quantity: line.quantity,
            price: line.product.price.display(),
            line_price: line.line_total().display(),
            design_prompt: line.custom_design.as_ref().map(|d| d.prompt.clone()),
        }
    }
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            subtotal: cart.subtotal().display(),
            item_count: cart.item_count(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: u32,
    /// Where to send the visitor afterwards; defaults to the cart.
    #[serde(default)]
    pub return_to: Option<String>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub line_id: String,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub line_id: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub layout: Layout,
    pub cart: CartView,
    pub shop_href: &'static str,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Only same-site relative paths are followed after a form post.
///
/// Browsers treat `\` like `/` and drop tabs and newlines in a `Location`
/// header, so `/\host` and `/\t/host` are scheme-relative URLs too. Any
/// backslash or control character is refused.
fn safe_return_path(return_to: Option<&str>) -> &str {
    match return_to {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.chars().any(|c| c == '\\' || c.is_control()) =>
        {
            path
        }
        _ => Route::Cart.path(),
    }
}

fn is_htmx(headers: &HeaderMap) -> bool {
    headers.contains_key("hx-request")
}

fn parse_line_id(raw: &str) -> Result<LineId> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("invalid line id: {raw}")))
}

/// Display cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;

    CartShowTemplate {
        layout: Layout::new("Shopping Bag", Some(Route::Cart), &cart),
        cart: CartView::from(&cart),
        shop_href: Route::Shop.path(),
    }
}

/// Add a ready-made product to the cart.
///
/// Customizable products are designed first, so they redirect to the workshop.
///
/// # Errors
///
/// Returns 404 for an unknown product, or an error if the session store fails.
#[instrument(skip(state, session, headers))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let product = state
        .catalog()
        .get(ProductId::new(form.product_id))
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    if product.is_customizable() {
        return Ok(Redirect::to(Route::Customize.path()).into_response());
    }

    let mut cart = load_cart(&session).await;
    cart.add(product);
    save_cart(&session, &cart).await?;

    let product_id = form.product_id.to_string();
    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", product_id.as_str())]));

    if is_htmx(&headers) {
        return Ok((
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartCountTemplate {
                count: cart.item_count(),
            },
        )
            .into_response());
    }

    Ok(Redirect::to(safe_return_path(form.return_to.as_deref())).into_response())
}

/// Set a line's quantity; zero removes the line.
///
/// # Errors
///
/// Returns 400 for a malformed line id or a quantity above
/// [`MAX_LINE_QUANTITY`], or an error if the session store fails.
#[instrument(skip(session))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> Result<Redirect> {
    let line_id = parse_line_id(&form.line_id)?;
    if form.quantity > MAX_LINE_QUANTITY {
        return Err(AppError::BadRequest(format!(
            "quantity {} is above the limit of {MAX_LINE_QUANTITY}",
            form.quantity
        )));
    }

    let mut cart = load_cart(&session).await;
    if cart.set_quantity(line_id, form.quantity) {
        save_cart(&session, &cart).await?;
    } else {
        tracing::debug!(%line_id, "Update for a line that is not in the cart");
    }

    Ok(Redirect::to(Route::Cart.path()))
}

/// Remove a line from the cart.
///
/// # Errors
///
/// Returns 400 for a malformed line id, or an error if the session store fails.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Redirect> {
    let line_id = parse_line_id(&form.line_id)?;

    let mut cart = load_cart(&session).await;
    if cart.remove(line_id) {
        save_cart(&session, &cart).await?;
    }

    Ok(Redirect::to(Route::Cart.path()))
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    CartCountTemplate {
        count: load_cart(&session).await.item_count(),
    }
}
