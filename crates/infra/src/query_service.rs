//! Catalog query pipeline (application-level orchestration).
//!
//! Every operation follows the same flow:
//!
//! ```text
//! group name
//!   ↓
//! 1. Resolve the brand line (closed `Group` enum → backing collection)
//!   ↓
//! 2. Build a `DocumentFilter` from the hierarchy position / narrowing filters
//!   ↓
//! 3. Fetch matching documents from the `CatalogStore`
//!   ↓
//! 4. Aggregate in-process (pure functions from `storefront-catalog`)
//!   ↓
//! 5. Shape the response (per-brand facet policy, reference lists)
//! ```
//!
//! ## Failure conventions
//!
//! Internally each operation is a `Result<_, QueryError>`. At the public
//! boundary the observed per-operation contracts are kept:
//!
//! - `list_groups` propagates store failures.
//! - `list_categories` propagates only `QueryError::UnsupportedGroup`.
//! - `get_product_detail` returns `None` for every failure.
//! - everything else returns its empty/default shape.
//!
//! Every swallowed error is logged with `tracing::warn!`.

use std::sync::Arc;

use thiserror::Error;
use tracing::instrument;

use storefront_catalog::{
    facets::distinct_values,
    filter::non_empty,
    hierarchy::{distinct_categories, distinct_sub_categories, product_types_by_gender},
    AvailableColors, AvailableSizes, CategoryEntry, DocumentFilter, Facet, FacetResponse,
    FacetShape, FacetValues, GenderProductTypes, GroupEntry, ProductDetail, ProductListing,
    ProductSelector, ReferenceData, SearchCriteria, SubCategoryEntry,
};
use storefront_catalog::availability::{
    LOOKUP_FAILED_MESSAGE, PRODUCT_NOT_FOUND_MESSAGE, UNKNOWN_GROUP_MESSAGE,
};
use storefront_core::{CatalogError, Group};

use crate::store::{CatalogStore, CatalogStoreError};

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("unsupported group name: {0}")]
    UnsupportedGroup(String),

    #[error("missing required filter: {0}")]
    MissingFilter(&'static str),

    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] CatalogStoreError),
}

impl From<CatalogError> for QueryError {
    fn from(value: CatalogError) -> Self {
        match value {
            CatalogError::UnsupportedGroup(name) => QueryError::UnsupportedGroup(name),
            CatalogError::MissingFilter(name) => QueryError::MissingFilter(name),
            CatalogError::NotFound => QueryError::NotFound,
        }
    }
}

/// Read-only catalog query service over a `CatalogStore`.
///
/// Stateless apart from the injected store and the shared reference lists;
/// calls are independent and may run concurrently.
#[derive(Debug)]
pub struct CatalogQueryService<S> {
    store: S,
    reference: Arc<ReferenceData>,
}

impl<S> CatalogQueryService<S>
where
    S: CatalogStore,
{
    pub fn new(store: S) -> Self {
        Self::with_reference(store, ReferenceData::shared())
    }

    pub fn with_reference(store: S, reference: Arc<ReferenceData>) -> Self {
        Self { store, reference }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// One entry per group in fixed order, imaged from a live representative document.
    #[instrument(skip(self))]
    pub async fn list_groups(&self) -> Result<Vec<GroupEntry>, QueryError> {
        let mut entries = Vec::with_capacity(Group::ALL.len());

        for group in Group::ALL {
            let filter = DocumentFilter::live().with_group_name(group.as_str());
            let representative = self.store.find_one(group, &filter).await.map_err(|e| {
                tracing::error!(group = %group, error = %e, "failed to fetch group image");
                e
            })?;
            entries.push(GroupEntry::from_representative(
                group,
                representative.as_ref(),
                &self.reference.default_group_image_url,
            ));
        }

        Ok(entries)
    }

    /// Distinct live categories. Fails only for an unknown group.
    #[instrument(skip(self))]
    pub async fn list_categories(&self, group: &str) -> Result<Vec<CategoryEntry>, QueryError> {
        let group = resolve(group)?;
        let result = self
            .store
            .find(group, &DocumentFilter::live())
            .await
            .map(|docs| distinct_categories(&docs));
        Ok(soften("list_categories", group.as_str(), result.map_err(QueryError::from)))
    }

    #[instrument(skip(self))]
    pub async fn list_sub_categories(&self, group: &str, category: &str) -> Vec<SubCategoryEntry> {
        soften(
            "list_sub_categories",
            group,
            self.fetch_sub_categories(group, category).await,
        )
    }

    #[instrument(skip(self))]
    pub async fn list_product_types(
        &self,
        group: &str,
        category: &str,
        sub_category: &str,
    ) -> Vec<GenderProductTypes> {
        soften(
            "list_product_types",
            group,
            self.fetch_product_types(group, category, sub_category).await,
        )
    }

    /// All facets in one pass, shaped by the brand's facet policy.
    #[instrument(skip(self))]
    pub async fn get_facets(&self, group: &str, selector: &ProductSelector) -> FacetResponse {
        self.fetch_facets(group, selector).await.unwrap_or_else(|e| {
            tracing::warn!(group, error = %e, "get_facets failed; returning empty filters");
            FacetResponse::empty()
        })
    }

    /// Distinct values of one facet with no stock threshold.
    #[instrument(skip(self))]
    pub async fn get_facet(&self, group: &str, selector: &ProductSelector, facet: Facet) -> Vec<String> {
        soften(
            facet.as_str(),
            group,
            self.fetch_facet(group, selector, facet).await,
        )
    }

    pub async fn get_fits(&self, group: &str, selector: &ProductSelector) -> Vec<String> {
        self.get_facet(group, selector, Facet::Fit).await
    }

    pub async fn get_colors(&self, group: &str, selector: &ProductSelector) -> Vec<String> {
        self.get_facet(group, selector, Facet::Color).await
    }

    pub async fn get_sizes(&self, group: &str, selector: &ProductSelector) -> Vec<String> {
        self.get_facet(group, selector, Facet::Size).await
    }

    pub async fn get_necklines(&self, group: &str, selector: &ProductSelector) -> Vec<String> {
        self.get_facet(group, selector, Facet::Neckline).await
    }

    pub async fn get_sleeves(&self, group: &str, selector: &ProductSelector) -> Vec<String> {
        self.get_facet(group, selector, Facet::Sleeves).await
    }

    /// Matching products with narrowed `variants` and full-stock `available`.
    #[instrument(skip(self))]
    pub async fn search_products(&self, group: &str, criteria: &SearchCriteria) -> Vec<ProductListing> {
        soften(
            "search_products",
            group,
            self.fetch_listings(group, criteria).await,
        )
    }

    #[instrument(skip(self))]
    pub async fn get_available_colors(&self, group: &str, product_id: &str) -> AvailableColors {
        let Ok(resolved) = resolve(group) else {
            tracing::warn!(group, "get_available_colors: invalid group name");
            return AvailableColors::unknown_group();
        };

        match self
            .store
            .find_one(resolved, &DocumentFilter::by_product_id(product_id))
            .await
        {
            Ok(product) => {
                if product.is_none() {
                    tracing::info!(group, product_id, "product not found");
                }
                AvailableColors::for_product(product.as_ref())
            }
            Err(e) => {
                tracing::warn!(group, product_id, error = %e, "failed to fetch product details");
                AvailableColors::lookup_failed()
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn get_available_sizes(&self, group: &str, product_id: &str, color: &str) -> AvailableSizes {
        let Ok(resolved) = resolve(group) else {
            tracing::warn!(group, "get_available_sizes: invalid group name");
            return AvailableSizes::unavailable(UNKNOWN_GROUP_MESSAGE);
        };

        match self
            .store
            .find_one(resolved, &DocumentFilter::by_product_id(product_id))
            .await
        {
            Ok(Some(product)) => AvailableSizes::for_color(&product, color),
            Ok(None) => {
                tracing::info!(group, product_id, "product not found");
                AvailableSizes::unavailable(PRODUCT_NOT_FOUND_MESSAGE)
            }
            Err(e) => {
                tracing::warn!(group, product_id, error = %e, "failed to fetch product details");
                AvailableSizes::unavailable(LOOKUP_FAILED_MESSAGE)
            }
        }
    }

    /// The product narrowed to one color variant, or `None` when it cannot be produced.
    ///
    /// `size` is accepted for interface stability; matching is on color only.
    #[instrument(skip(self))]
    pub async fn get_product_detail(
        &self,
        group: &str,
        product_id: &str,
        size: Option<&str>,
        color: &str,
    ) -> Option<ProductDetail> {
        match self.fetch_detail(group, product_id, color).await {
            Ok(detail) => Some(detail),
            Err(QueryError::NotFound) => {
                tracing::info!(group, product_id, "product not found");
                None
            }
            Err(e) => {
                tracing::warn!(group, product_id, error = %e, "get_product_detail failed");
                None
            }
        }
    }

    async fn fetch_sub_categories(
        &self,
        group: &str,
        category: &str,
    ) -> Result<Vec<SubCategoryEntry>, QueryError> {
        let group = resolve(group)?;
        if category.is_empty() {
            return Err(CatalogError::missing_filter("category").into());
        }
        let docs = self
            .store
            .find(group, &DocumentFilter::all().with_category(category))
            .await?;
        Ok(distinct_sub_categories(&docs))
    }

    async fn fetch_product_types(
        &self,
        group: &str,
        category: &str,
        sub_category: &str,
    ) -> Result<Vec<GenderProductTypes>, QueryError> {
        let group = resolve(group)?;
        let filter = DocumentFilter::all()
            .with_category(category)
            .with_sub_category(sub_category);
        let docs = self.store.find(group, &filter).await?;
        Ok(product_types_by_gender(&docs))
    }

    async fn fetch_facets(
        &self,
        group: &str,
        selector: &ProductSelector,
    ) -> Result<FacetResponse, QueryError> {
        let group = resolve(group)?;
        let docs = self.store.find(group, &selector.to_filter()).await?;
        let shape = FacetShape::select(
            group,
            &selector.category,
            non_empty(selector.product_type.as_deref()),
        );
        Ok(shape.render(FacetValues::collect(&docs)))
    }

    async fn fetch_facet(
        &self,
        group: &str,
        selector: &ProductSelector,
        facet: Facet,
    ) -> Result<Vec<String>, QueryError> {
        let group = resolve(group)?;
        selector.require_complete()?;
        let docs = self.store.find(group, &selector.to_filter()).await?;
        Ok(distinct_values(&docs, facet))
    }

    async fn fetch_listings(
        &self,
        group: &str,
        criteria: &SearchCriteria,
    ) -> Result<Vec<ProductListing>, QueryError> {
        let group = resolve(group)?;
        let docs = self.store.find(group, &criteria.to_filter()).await?;
        Ok(docs
            .into_iter()
            .map(|p| ProductListing::build(p, criteria.color(), criteria.size(), &self.reference))
            .collect())
    }

    async fn fetch_detail(
        &self,
        group: &str,
        product_id: &str,
        color: &str,
    ) -> Result<ProductDetail, QueryError> {
        let group = resolve(group)?;
        let mut filter = DocumentFilter::by_product_id(product_id);
        if let Some(color) = non_empty(Some(color)) {
            filter = filter.with_variant_color(color);
        }
        let product = self
            .store
            .find_one(group, &filter)
            .await?
            .ok_or_else(CatalogError::not_found)?;
        Ok(ProductDetail::build(product, color, &self.reference))
    }
}

fn resolve(group: &str) -> Result<Group, QueryError> {
    Ok(group.parse::<Group>()?)
}

/// Collapse a failure into the operation's empty result, logging it.
fn soften<T: Default>(operation: &str, group: &str, result: Result<T, QueryError>) -> T {
    result.unwrap_or_else(|e| {
        tracing::warn!(operation, group, error = %e, "catalog query failed; returning empty result");
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use storefront_catalog::{NamedImage, Product, Variant, VariantSize};

    use crate::store::InMemoryCatalogStore;

    /// Store whose every call fails.
    struct FailingStore;

    #[async_trait::async_trait]
    impl CatalogStore for FailingStore {
        async fn find_one(
            &self,
            _group: Group,
            _filter: &DocumentFilter,
        ) -> Result<Option<Product>, CatalogStoreError> {
            Err(CatalogStoreError::Unavailable("connection refused".to_string()))
        }

        async fn find(
            &self,
            _group: Group,
            _filter: &DocumentFilter,
        ) -> Result<Vec<Product>, CatalogStoreError> {
            Err(CatalogStoreError::Unavailable("connection refused".to_string()))
        }
    }

    fn scrub(id: &str, category: &str, variants: Vec<Variant>) -> Product {
        let mut p = Product::new(id);
        p.group = Some(NamedImage::new("HEAL", "heal.png"));
        p.category = Some(NamedImage::new(category, format!("{category}.png")));
        p.sub_category = Some(NamedImage::new("TOPS", "tops.png"));
        p.fabric = Some("COTTON".into());
        p.sleeves = Some("LONG".into());
        p.variants = variants;
        p
    }

    fn heal_service() -> CatalogQueryService<InMemoryCatalogStore> {
        let store = InMemoryCatalogStore::new();
        store.extend(
            Group::Heal,
            [
                scrub("H-1", "COATS", vec![Variant::new("WHITE", vec![VariantSize::new("M", 6)])]),
                scrub("H-2", "SCRUBS", vec![Variant::new("RED", vec![VariantSize::new("S", 2)])]),
            ],
        );
        CatalogQueryService::new(store)
    }

    #[tokio::test]
    async fn list_categories_rejects_unknown_group() {
        let service = heal_service();
        let err = service.list_categories("NOPE").await.unwrap_err();
        assert!(matches!(err, QueryError::UnsupportedGroup(name) if name == "NOPE"));
    }

    #[tokio::test]
    async fn list_categories_swallows_store_failures() {
        let service = CatalogQueryService::new(FailingStore);
        assert!(service.list_categories("HEAL").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_groups_propagates_store_failures() {
        let service = CatalogQueryService::new(FailingStore);
        assert!(matches!(
            service.list_groups().await,
            Err(QueryError::Store(CatalogStoreError::Unavailable(_)))
        ));
    }

    #[tokio::test]
    async fn soft_operations_return_empty_on_store_failure() {
        let service = CatalogQueryService::new(FailingStore);
        let selector = ProductSelector::new("SCRUBS", "TOPS");

        assert!(service.list_sub_categories("HEAL", "SCRUBS").await.is_empty());
        assert!(service.list_product_types("HEAL", "SCRUBS", "TOPS").await.is_empty());
        assert!(service.get_colors("HEAL", &selector).await.is_empty());
        assert!(service
            .search_products("HEAL", &SearchCriteria::new(selector.clone()))
            .await
            .is_empty());
        assert_eq!(
            serde_json::to_value(service.get_facets("HEAL", &selector).await).unwrap(),
            json!({ "filters": {} })
        );
        assert_eq!(
            service.get_available_colors("HEAL", "H-1").await,
            AvailableColors::lookup_failed()
        );
        assert_eq!(
            service.get_available_sizes("HEAL", "H-1", "RED").await.message(),
            LOOKUP_FAILED_MESSAGE
        );
        assert!(service.get_product_detail("HEAL", "H-1", None, "RED").await.is_none());
    }

    #[tokio::test]
    async fn single_facets_require_category_and_sub_category() {
        let service = heal_service();
        assert!(service
            .get_sleeves("HEAL", &ProductSelector::new("COATS", ""))
            .await
            .is_empty());
        assert!(service
            .get_colors("HEAL", &ProductSelector::new("", "TOPS"))
            .await
            .is_empty());
        assert_eq!(
            service
                .get_sleeves("HEAL", &ProductSelector::new("COATS", "TOPS"))
                .await,
            vec!["LONG".to_string()]
        );
    }

    #[tokio::test]
    async fn get_sizes_ignores_stock_threshold() {
        let service = heal_service();
        assert_eq!(
            service
                .get_sizes("HEAL", &ProductSelector::new("SCRUBS", "TOPS"))
                .await,
            vec!["S".to_string()]
        );
    }

    #[tokio::test]
    async fn list_groups_falls_back_to_default_image() {
        let service = heal_service();
        let groups = service.list_groups().await.unwrap();
        assert_eq!(groups.len(), Group::ALL.len());
        assert_eq!(groups[0].group_name, "HEAL");
        assert_eq!(groups[0].image_url, "heal.png");
        assert!(groups[1..]
            .iter()
            .all(|g| g.image_url == service.reference().default_group_image_url));
    }

    #[tokio::test]
    async fn search_narrows_variants_but_not_availability() {
        let store = InMemoryCatalogStore::new();
        store.insert(
            Group::Heal,
            scrub(
                "H-3",
                "SCRUBS",
                vec![
                    Variant::new("RED", vec![VariantSize::new("M", 9)]),
                    Variant::new("BLUE", vec![VariantSize::new("L", 3)]),
                ],
            ),
        );
        let service = CatalogQueryService::new(store);

        let mut criteria = SearchCriteria::new(ProductSelector::new("SCRUBS", "TOPS"));
        criteria.color = Some("BLUE".into());
        let listings = service.search_products("HEAL", &criteria).await;

        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].product.variants.len(), 1);
        assert_eq!(listings[0].available.len(), 2);
    }

    #[tokio::test]
    async fn heal_coats_facets_omit_colors() {
        let service = heal_service();
        let facets = service
            .get_facets("HEAL", &ProductSelector::new("COATS", "TOPS"))
            .await;
        assert_eq!(
            serde_json::to_value(facets).unwrap(),
            json!({ "fabrics": ["COTTON"], "sleeves": ["LONG"], "sizes": ["M"] })
        );
    }

    #[tokio::test]
    async fn unknown_group_shapes_for_product_lookups() {
        let service = heal_service();
        assert_eq!(
            serde_json::to_value(service.get_available_colors("NOPE", "H-1").await).unwrap(),
            json!({ "colors": [] })
        );
        assert_eq!(
            serde_json::to_value(service.get_available_sizes("NOPE", "H-1", "RED").await).unwrap(),
            json!({ "sizes": [], "message": UNKNOWN_GROUP_MESSAGE })
        );
        assert!(service.get_product_detail("NOPE", "H-1", None, "RED").await.is_none());
    }

    #[tokio::test]
    async fn product_detail_is_none_for_missing_product_or_color() {
        let service = heal_service();
        assert!(service.get_product_detail("HEAL", "H-404", None, "RED").await.is_none());
        assert!(service.get_product_detail("HEAL", "H-2", Some("M"), "BLUE").await.is_none());
        assert!(service.get_product_detail("HEAL", "H-2", Some("M"), "RED").await.is_some());
    }
}
