use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use storefront_catalog::{Facet, ProductSelector, SearchCriteria};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_groups))
        .route("/:group/categories", get(list_categories))
        .route("/:group/subcategories", get(list_sub_categories))
        .route("/:group/product-types", get(list_product_types))
        .route("/:group/filters", get(get_facets))
        .route("/:group/fits", get(get_fits))
        .route("/:group/colors", get(get_colors))
        .route("/:group/sizes", get(get_sizes))
        .route("/:group/necklines", get(get_necklines))
        .route("/:group/sleeves", get(get_sleeves))
        .route("/:group/products", get(search_products))
        .route("/:group/products/:product_id", get(get_product_detail))
        .route("/:group/products/:product_id/colors", get(get_available_colors))
        .route("/:group/products/:product_id/sizes", get(get_available_sizes))
}

pub async fn list_groups(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.catalog().list_groups().await {
        Ok(groups) => (StatusCode::OK, Json(groups)).into_response(),
        Err(e) => errors::query_error_to_response(e),
    }
}

pub async fn list_categories(
    Extension(services): Extension<Arc<AppServices>>,
    Path(group): Path<String>,
) -> axum::response::Response {
    match services.catalog().list_categories(&group).await {
        Ok(categories) => (StatusCode::OK, Json(categories)).into_response(),
        Err(e) => errors::query_error_to_response(e),
    }
}

pub async fn list_sub_categories(
    Extension(services): Extension<Arc<AppServices>>,
    Path(group): Path<String>,
    Query(query): Query<dto::CategoryQuery>,
) -> axum::response::Response {
    let entries = services
        .catalog()
        .list_sub_categories(&group, &query.category)
        .await;
    (StatusCode::OK, Json(entries)).into_response()
}

pub async fn list_product_types(
    Extension(services): Extension<Arc<AppServices>>,
    Path(group): Path<String>,
    Query(query): Query<dto::ProductTypesQuery>,
) -> axum::response::Response {
    let types = services
        .catalog()
        .list_product_types(&group, &query.category, &query.sub_category)
        .await;
    (StatusCode::OK, Json(types)).into_response()
}

pub async fn get_facets(
    Extension(services): Extension<Arc<AppServices>>,
    Path(group): Path<String>,
    Query(selector): Query<ProductSelector>,
) -> axum::response::Response {
    let facets = services.catalog().get_facets(&group, &selector).await;
    (StatusCode::OK, Json(facets)).into_response()
}

async fn facet_values(
    services: &AppServices,
    group: &str,
    selector: &ProductSelector,
    facet: Facet,
) -> axum::response::Response {
    let values = services.catalog().get_facet(group, selector, facet).await;
    (StatusCode::OK, Json(values)).into_response()
}

pub async fn get_fits(
    Extension(services): Extension<Arc<AppServices>>,
    Path(group): Path<String>,
    Query(selector): Query<ProductSelector>,
) -> axum::response::Response {
    facet_values(&services, &group, &selector, Facet::Fit).await
}

pub async fn get_colors(
    Extension(services): Extension<Arc<AppServices>>,
    Path(group): Path<String>,
    Query(selector): Query<ProductSelector>,
) -> axum::response::Response {
    facet_values(&services, &group, &selector, Facet::Color).await
}

pub async fn get_sizes(
    Extension(services): Extension<Arc<AppServices>>,
    Path(group): Path<String>,
    Query(selector): Query<ProductSelector>,
) -> axum::response::Response {
    facet_values(&services, &group, &selector, Facet::Size).await
}

pub async fn get_necklines(
    Extension(services): Extension<Arc<AppServices>>,
    Path(group): Path<String>,
    Query(selector): Query<ProductSelector>,
) -> axum::response::Response {
    facet_values(&services, &group, &selector, Facet::Neckline).await
}

pub async fn get_sleeves(
    Extension(services): Extension<Arc<AppServices>>,
    Path(group): Path<String>,
    Query(selector): Query<ProductSelector>,
) -> axum::response::Response {
    facet_values(&services, &group, &selector, Facet::Sleeves).await
}

pub async fn search_products(
    Extension(services): Extension<Arc<AppServices>>,
    Path(group): Path<String>,
    Query(criteria): Query<SearchCriteria>,
) -> axum::response::Response {
    let listings = services.catalog().search_products(&group, &criteria).await;
    (StatusCode::OK, Json(listings)).into_response()
}

pub async fn get_available_colors(
    Extension(services): Extension<Arc<AppServices>>,
    Path((group, product_id)): Path<(String, String)>,
) -> axum::response::Response {
    let colors = services
        .catalog()
        .get_available_colors(&group, &product_id)
        .await;
    (StatusCode::OK, Json(colors)).into_response()
}

pub async fn get_available_sizes(
    Extension(services): Extension<Arc<AppServices>>,
    Path((group, product_id)): Path<(String, String)>,
    Query(query): Query<dto::ColorQuery>,
) -> axum::response::Response {
    let sizes = services
        .catalog()
        .get_available_sizes(&group, &product_id, &query.color)
        .await;
    (StatusCode::OK, Json(sizes)).into_response()
}

pub async fn get_product_detail(
    Extension(services): Extension<Arc<AppServices>>,
    Path((group, product_id)): Path<(String, String)>,
    Query(query): Query<dto::ProductDetailQuery>,
) -> axum::response::Response {
    match services
        .catalog()
        .get_product_detail(&group, &product_id, query.size.as_deref(), &query.color)
        .await
    {
        Some(detail) => (StatusCode::OK, Json(detail)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
    }
}
