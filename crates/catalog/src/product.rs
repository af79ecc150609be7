use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Opaque external product identifier, unique within one group's collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// `{name, imageUrl}` pair used for group, category and subCategory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl NamedImage {
    pub fn new(name: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            image_url: Some(image_url.into()),
        }
    }
}

/// `{type, imageUrl}` pair describing the product type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductType {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ProductType {
    pub fn new(kind: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            image_url: Some(image_url.into()),
        }
    }
}

/// Stock for one size of a variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSize {
    pub size: String,
    pub quantity: u32,
}

impl VariantSize {
    pub fn new(size: impl Into<String>, quantity: u32) -> Self {
        Self {
            size: size.into(),
            quantity,
        }
    }
}

/// A color variant of a product with its per-size stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub variant_sizes: Vec<VariantSize>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Variant {
    pub fn new(color: impl Into<String>, sizes: Vec<VariantSize>) -> Self {
        Self {
            color: Some(color.into()),
            is_deleted: false,
            variant_sizes: sizes,
            extra: Map::new(),
        }
    }

    pub fn deleted(mut self) -> Self {
        self.is_deleted = true;
        self
    }

    pub fn has_color(&self, color: &str) -> bool {
        self.color.as_deref() == Some(color)
    }

    pub fn has_size(&self, size: &str) -> bool {
        self.variant_sizes.iter().any(|s| s.size == size)
    }
}

/// A catalog product document.
///
/// Fields the query layer does not interpret are kept in `extra` so the raw
/// document can be passed through to callers unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: ProductId,
    #[serde(rename = "product_name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<NamedImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<NamedImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<NamedImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<ProductType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neckline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleeves: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fabric: Option<String>,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Product {
    /// Bare document with only an identifier; used as a builder seed.
    pub fn new(product_id: impl Into<String>) -> Self {
        Self {
            product_id: ProductId::new(product_id),
            name: None,
            description: None,
            group: None,
            category: None,
            sub_category: None,
            gender: None,
            product_type: None,
            fit: None,
            neckline: None,
            sleeves: None,
            fabric: None,
            is_deleted: false,
            variants: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().and_then(|c| c.name.as_deref())
    }

    pub fn sub_category_name(&self) -> Option<&str> {
        self.sub_category.as_ref().and_then(|c| c.name.as_deref())
    }

    pub fn group_name(&self) -> Option<&str> {
        self.group.as_ref().and_then(|g| g.name.as_deref())
    }

    pub fn product_type_name(&self) -> Option<&str> {
        self.product_type.as_ref().and_then(|t| t.kind.as_deref())
    }

    /// Variants that are still offered (not soft-deleted).
    pub fn live_variants(&self) -> impl Iterator<Item = &Variant> {
        self.variants.iter().filter(|v| !v.is_deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_store_document_layout() {
        let doc = serde_json::json!({
            "productId": "P-100",
            "product_name": "Classic Scrub Top",
            "group": { "name": "HEAL", "imageUrl": "g.png" },
            "category": { "name": "SCRUBS", "imageUrl": "c.png" },
            "subCategory": { "name": "TOPS", "imageUrl": "s.png" },
            "gender": "WOMEN",
            "productType": { "type": "V-NECK", "imageUrl": "t.png" },
            "fabric": "POLY COTTON",
            "isDeleted": false,
            "variants": [
                { "color": "RED", "isDeleted": false,
                  "variantSizes": [ { "size": "M", "quantity": 10 } ] }
            ],
            "price": 1999
        });

        let product: Product = serde_json::from_value(doc).unwrap();
        assert_eq!(product.product_id.as_str(), "P-100");
        assert_eq!(product.name.as_deref(), Some("Classic Scrub Top"));
        assert_eq!(product.category_name(), Some("SCRUBS"));
        assert_eq!(product.product_type_name(), Some("V-NECK"));
        assert_eq!(product.variants[0].variant_sizes[0], VariantSize::new("M", 10));
        assert_eq!(product.extra.get("price"), Some(&serde_json::json!(1999)));
    }

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let doc = serde_json::json!({
            "productId": "P-1",
            "sku": "ABC",
            "variants": [ { "color": "RED", "variantSizes": [], "barcode": "123" } ]
        });
        let product: Product = serde_json::from_value(doc).unwrap();
        let out = serde_json::to_value(&product).unwrap();
        assert_eq!(out["sku"], "ABC");
        assert_eq!(out["variants"][0]["barcode"], "123");
        assert_eq!(out["isDeleted"], false);
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let doc = serde_json::json!({
            "productId": "P-1",
            "variants": [ { "color": "RED", "variantSizes": [ { "size": "M", "quantity": -1 } ] } ]
        });
        assert!(serde_json::from_value::<Product>(doc).is_err());
    }

    #[test]
    fn live_variants_skip_deleted() {
        let mut product = Product::new("P-1");
        product.variants = vec![
            Variant::new("RED", vec![]),
            Variant::new("BLUE", vec![]).deleted(),
        ];
        let colors: Vec<_> = product
            .live_variants()
            .filter_map(|v| v.color.as_deref())
            .collect();
        assert_eq!(colors, vec!["RED"]);
    }
}
