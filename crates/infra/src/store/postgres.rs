//! Postgres-backed catalog store.
//!
//! Each group's collection is a table of JSONB documents:
//!
//! ```sql
//! CREATE TABLE heal_products (id BIGSERIAL PRIMARY KEY, document JSONB NOT NULL);
//! ```
//!
//! `DocumentFilter`s are translated to a single JSONB containment predicate
//! (`document @> $1`). Containment on the `variants` array holds when *some*
//! element contains the given object, which is exactly "some variant has this
//! color". Rows are returned in `id` order, the store's storage order.
//!
//! Live-only filters add `NOT (document @> '{"isDeleted": true}')`, so a
//! document without an `isDeleted` key counts as live, as `DocumentFilter::matches`
//! requires. A row whose document does not decode is skipped with a warning
//! carrying its id.
//!
//! ## Error Mapping
//!
//! | SQLx Error | CatalogStoreError |
//! |------------|-------------------|
//! | PoolClosed / PoolTimedOut / Io | `Unavailable` |
//! | anything else | `Query` |
//! | document does not deserialize | row skipped, `warn!` |

use std::sync::Arc;

use serde_json::{json, Map, Value as JsonValue};
use sqlx::PgPool;
use tracing::instrument;

use storefront_catalog::{DocumentFilter, Product};
use storefront_core::Group;

use super::{CatalogStore, CatalogStoreError};

/// Postgres-backed catalog store (one JSONB table per group).
///
/// ## Thread Safety
///
/// Uses the SQLx connection pool, which is `Send + Sync`.
#[derive(Debug, Clone)]
pub struct PostgresCatalogStore {
    pool: Arc<PgPool>,
}

impl PostgresCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Create the per-group tables and containment indexes if they are missing.
    pub async fn ensure_schema(&self) -> Result<(), CatalogStoreError> {
        for group in Group::ALL {
            let table = group.collection();
            sqlx::query(&format!(
                "CREATE TABLE IF NOT EXISTS {table} (id BIGSERIAL PRIMARY KEY, document JSONB NOT NULL)"
            ))
            .execute(&*self.pool)
            .await
            .map_err(map_sqlx_error)?;

            sqlx::query(&format!(
                "CREATE INDEX IF NOT EXISTS {table}_document_idx ON {table} USING GIN (document jsonb_path_ops)"
            ))
            .execute(&*self.pool)
            .await
            .map_err(map_sqlx_error)?;
        }
        Ok(())
    }

    /// Append a document to a group's collection.
    #[instrument(skip(self, product), fields(group = %group, product_id = %product.product_id))]
    pub async fn insert(&self, group: Group, product: &Product) -> Result<(), CatalogStoreError> {
        let document =
            serde_json::to_value(product).map_err(|e| CatalogStoreError::Decode(e.to_string()))?;

        sqlx::query(&format!(
            "INSERT INTO {} (document) VALUES ($1)",
            group.collection()
        ))
        .bind(document)
        .execute(&*self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn fetch(
        &self,
        group: Group,
        filter: &DocumentFilter,
        limit: Option<i64>,
    ) -> Result<Vec<Product>, CatalogStoreError> {
        let mut sql = format!(
            "SELECT id, document FROM {} WHERE {} ORDER BY id",
            group.collection(),
            where_clause(filter)
        );
        if limit.is_some() {
            sql.push_str(" LIMIT $2");
        }

        let mut query = sqlx::query_as::<_, (i64, JsonValue)>(&sql).bind(containment(filter));
        if let Some(limit) = limit {
            query = query.bind(limit);
        }

        let rows = query.fetch_all(&*self.pool).await.map_err(map_sqlx_error)?;

        Ok(decode_rows(group, rows))
    }
}

#[async_trait::async_trait]
impl CatalogStore for PostgresCatalogStore {
    /// First decodable row of the first match; an undecodable first match yields `None`.
    #[instrument(skip(self, filter), fields(group = %group))]
    async fn find_one(
        &self,
        group: Group,
        filter: &DocumentFilter,
    ) -> Result<Option<Product>, CatalogStoreError> {
        Ok(self.fetch(group, filter, Some(1)).await?.into_iter().next())
    }

    #[instrument(skip(self, filter), fields(group = %group))]
    async fn find(
        &self,
        group: Group,
        filter: &DocumentFilter,
    ) -> Result<Vec<Product>, CatalogStoreError> {
        self.fetch(group, filter, None).await
    }
}

/// JSONB object that a matching document must contain.
pub fn containment(filter: &DocumentFilter) -> JsonValue {
    let mut doc = Map::new();

    let mut put = |key: &str, value: &Option<String>| {
        if let Some(v) = value {
            doc.insert(key.to_string(), json!(v));
        }
    };
    put("productId", &filter.product_id);
    put("gender", &filter.gender);
    put("fit", &filter.fit);
    put("neckline", &filter.neckline);
    put("sleeves", &filter.sleeves);

    let nested = [
        ("group", "name", &filter.group_name),
        ("category", "name", &filter.category),
        ("subCategory", "name", &filter.sub_category),
        ("productType", "type", &filter.product_type),
    ];
    for (outer, inner, value) in nested {
        if let Some(v) = value {
            let mut field = Map::new();
            field.insert(inner.to_string(), json!(v));
            doc.insert(outer.to_string(), JsonValue::Object(field));
        }
    }

    if let Some(color) = &filter.variant_color {
        doc.insert("variants".to_string(), json!([{ "color": color }]));
    }

    JsonValue::Object(doc)
}

/// SQL predicate for `filter`; `$1` binds [`containment`].
pub fn where_clause(filter: &DocumentFilter) -> &'static str {
    if filter.exclude_deleted {
        r#"document @> $1 AND NOT (document @> '{"isDeleted": true}')"#
    } else {
        "document @> $1"
    }
}

/// Decode fetched rows, skipping documents that are not valid products.
fn decode_rows(group: Group, rows: Vec<(i64, JsonValue)>) -> Vec<Product> {
    rows.into_iter()
        .filter_map(|(id, doc)| match serde_json::from_value(doc) {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::warn!(group = %group, row_id = id, error = %e, "skipping undecodable catalog document");
                None
            }
        })
        .collect()
}

fn map_sqlx_error(err: sqlx::Error) -> CatalogStoreError {
    let message = err.to_string();
    match err {
        sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
            CatalogStoreError::Unavailable(message)
        }
        _ => CatalogStoreError::Query(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_catalog::ProductSelector;

    #[test]
    fn empty_filter_contains_nothing() {
        assert_eq!(containment(&DocumentFilter::all()), json!({}));
    }

    #[test]
    fn selector_translates_to_nested_containment() {
        let filter = ProductSelector::new("SCRUBS", "TOPS")
            .with_gender("WOMEN")
            .with_product_type("V-NECK")
            .to_filter();

        assert_eq!(
            containment(&filter),
            json!({
                "category": { "name": "SCRUBS" },
                "subCategory": { "name": "TOPS" },
                "gender": "WOMEN",
                "productType": { "type": "V-NECK" }
            })
        );
    }

    #[test]
    fn live_group_lookup_and_variant_color() {
        let filter = DocumentFilter::live()
            .with_group_name("HEAL")
            .with_variant_color("RED");

        assert_eq!(
            containment(&filter),
            json!({
                "group": { "name": "HEAL" },
                "variants": [ { "color": "RED" } ]
            })
        );
        assert_eq!(
            where_clause(&filter),
            r#"document @> $1 AND NOT (document @> '{"isDeleted": true}')"#
        );
        assert_eq!(where_clause(&DocumentFilter::all()), "document @> $1");
    }

    /// JSONB `@>`: objects by key subset, arrays by "every needle element is
    /// contained in some element", scalars by equality.
    fn jsonb_contains(doc: &JsonValue, needle: &JsonValue) -> bool {
        match (doc, needle) {
            (JsonValue::Object(d), JsonValue::Object(n)) => n
                .iter()
                .all(|(k, v)| d.get(k).is_some_and(|dv| jsonb_contains(dv, v))),
            (JsonValue::Array(d), JsonValue::Array(n)) => n
                .iter()
                .all(|v| d.iter().any(|dv| jsonb_contains(dv, v))),
            _ => doc == needle,
        }
    }

    /// What the SQL predicate from `where_clause` selects.
    fn sql_selects(doc: &JsonValue, filter: &DocumentFilter) -> bool {
        jsonb_contains(doc, &containment(filter))
            && !(filter.exclude_deleted && jsonb_contains(doc, &json!({ "isDeleted": true })))
    }

    #[test]
    fn live_filter_agrees_with_in_memory_semantics() {
        let documents = [
            json!({ "productId": "P-1", "group": { "name": "HEAL" } }),
            json!({ "productId": "P-2", "group": { "name": "HEAL" }, "isDeleted": false }),
            json!({ "productId": "P-3", "group": { "name": "HEAL" }, "isDeleted": true }),
        ];
        let filters = [
            DocumentFilter::live(),
            DocumentFilter::live().with_group_name("HEAL"),
            DocumentFilter::all(),
        ];

        for doc in &documents {
            let product: Product = serde_json::from_value(doc.clone()).unwrap();
            for filter in &filters {
                assert_eq!(
                    sql_selects(doc, filter),
                    filter.matches(&product),
                    "document {doc} under {filter:?}"
                );
            }
        }
        assert!(sql_selects(&documents[0], &DocumentFilter::live()));
    }

    #[test]
    fn undecodable_rows_are_skipped() {
        let rows = vec![
            (1, json!({ "productId": "P-1" })),
            (
                2,
                json!({
                    "productId": "P-2",
                    "variants": [ { "color": "RED", "variantSizes": [ { "size": "M", "quantity": -1 } ] } ]
                }),
            ),
            (3, json!({ "productId": "P-3" })),
        ];

        let ids: Vec<_> = decode_rows(Group::Heal, rows)
            .into_iter()
            .map(|p| p.product_id.0)
            .collect();
        assert_eq!(ids, vec!["P-1", "P-3"]);
    }
}
