//! Shop and product detail route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use kicklabs_core::{Category, Product, ProductFilter, ProductId, Route};
use tower_sessions::Session;
use tracing::instrument;
use url::form_urlencoded;

use crate::error::{AppError, Result};
use crate::filters;
use crate::routes::Layout;
use crate::state::AppState;

/// Product card data for templates.
#[derive(Debug, Clone)]
pub struct ProductCard {
    pub id: u32,
    pub name: String,
    pub brand: String,
    pub price: String,
    pub image: String,
    pub description: String,
    pub tags: Vec<String>,
    pub customizable: bool,
    pub detail_path: String,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_u32(),
            name: product.name.clone(),
            brand: product.brand.clone(),
            price: product.price.display(),
            image: product.image.clone(),
            description: product.description.clone(),
            tags: product.tags.clone(),
            customizable: product.is_customizable(),
            detail_path: format!("/products/{}", product.id),
        }
    }
}

/// A clickable sidebar option that links to the toggled filter.
#[derive(Debug, Clone)]
pub struct FilterOption {
    pub label: String,
    pub href: String,
    pub selected: bool,
}

/// Shop sidebar state.
#[derive(Debug, Clone)]
pub struct FilterView {
    pub categories: Vec<FilterOption>,
    pub tags: Vec<FilterOption>,
    pub brands: Vec<FilterOption>,
    pub search: String,
    pub max_price: i64,
    /// Hidden inputs that carry category, tag and brand selections through the search form.
    pub carried: Vec<(&'static str, String)>,
    pub is_default: bool,
}

/// Shop page URL for a filter.
#[must_use]
pub fn shop_href(filter: &ProductFilter) -> String {
    let pairs = filter.to_pairs();
    if pairs.is_empty() {
        return Route::Shop.path().to_string();
    }
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    format!("{}?{query}", Route::Shop.path())
}

impl FilterView {
    fn new(filter: &ProductFilter, tags: &[&str], brands: &[&str]) -> Self {
        let with = |f: &dyn Fn(&mut ProductFilter)| {
            let mut next = filter.clone();
            f(&mut next);
            shop_href(&next)
        };

        let all = FilterOption {
            label: "All".to_string(),
            href: with(&|f| f.category = None),
            selected: filter.category.is_none(),
        };
        let categories = std::iter::once(all)
            .chain(Category::ALL.iter().map(|c| FilterOption {
                label: c.label().to_string(),
                href: with(&|f| f.category = Some(*c)),
                selected: filter.category == Some(*c),
            }))
            .collect();

        Self {
            categories,
            tags: tags
                .iter()
                .map(|t| FilterOption {
                    label: (*t).to_string(),
                    href: with(&|f| f.toggle_tag(t)),
                    selected: filter.has_tag(t),
                })
                .collect(),
            brands: brands
                .iter()
                .map(|b| FilterOption {
                    label: (*b).to_string(),
                    href: with(&|f| f.toggle_brand(b)),
                    selected: filter.has_brand(b),
                })
                .collect(),
            search: filter.search.clone(),
            max_price: filter.max_price.whole_units(),
            carried: filter
                .to_pairs()
                .into_iter()
                .filter(|(k, _)| matches!(*k, "tag" | "brand" | "category"))
                .collect(),
            is_default: filter.is_default(),
        }
    }
}

/// Shop page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/shop.html")]
pub struct ShopTemplate {
    pub layout: Layout,
    pub filter: FilterView,
    pub products: Vec<ProductCard>,
    pub clear_href: &'static str,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub layout: Layout,
    pub product: ProductCard,
    pub images: Vec<String>,
    pub customize_href: &'static str,
}

/// Display the shop page.
///
/// Filter state is carried in the query string; see [`ProductFilter::from_pairs`].
#[instrument(skip(state, session, query))]
pub async fn shop(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    let filter = ProductFilter::from_pairs(query);
    let catalog = state.catalog();
    let products: Vec<ProductCard> = catalog
        .filter(&filter)
        .into_iter()
        .map(ProductCard::from)
        .collect();

    tracing::debug!(results = products.len(), "Filtered catalog");

    ShopTemplate {
        layout: Layout::load(&session, "Shop", Some(Route::Shop)).await,
        filter: FilterView::new(&filter, &catalog.all_tags(), &catalog.all_brands()),
        products,
        clear_href: Route::Shop.path(),
    }
}

/// Display a product.
///
/// # Errors
///
/// Returns 404 if the product doesn't exist.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<u32>,
) -> Result<impl IntoResponse> {
    let product = state
        .catalog()
        .get(ProductId::new(id))
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(ProductShowTemplate {
        layout: Layout::load(&session, product.name.clone(), Some(Route::Shop)).await,
        product: ProductCard::from(product),
        images: product.images.clone(),
        customize_href: Route::Customize.path(),
    })
}
