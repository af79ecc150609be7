//! Per-product availability: variant narrowing and color/size stock breakdowns.

use serde::Serialize;

use crate::product::{Product, Variant, VariantSize};
use crate::reference::ReferenceData;
use crate::unique::Distinct;

pub const SIZES_FOUND_MESSAGE: &str = "Sizes retrieved successfully.";
pub const NO_SIZES_MESSAGE: &str = "No sizes found for the specified color.";
pub const UNKNOWN_GROUP_MESSAGE: &str = "Invalid groupName or model not found.";
pub const PRODUCT_NOT_FOUND_MESSAGE: &str = "Product not found.";
pub const LOOKUP_FAILED_MESSAGE: &str = "Failed to fetch product details.";
pub const NO_MATCHING_VARIANT_MESSAGE: &str =
    "This product has no variants available with the given size and color combination.";

/// Full stock for one color, across all of its live variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorAvailability {
    pub color: String,
    #[serde(rename = "sizesAndQty")]
    pub sizes_and_qty: Vec<VariantSize>,
}

/// Live variants grouped by color in first-seen order, every size listed
/// including zero quantities.
pub fn available_by_color(product: &Product) -> Vec<ColorAvailability> {
    let mut out: Vec<ColorAvailability> = Vec::new();

    for variant in product.live_variants() {
        let Some(color) = variant.color.as_deref() else {
            continue;
        };
        let idx = match out.iter().position(|a| a.color == color) {
            Some(idx) => idx,
            None => {
                out.push(ColorAvailability {
                    color: color.to_string(),
                    sizes_and_qty: Vec::new(),
                });
                out.len() - 1
            }
        };
        out[idx]
            .sizes_and_qty
            .extend(variant.variant_sizes.iter().cloned());
    }

    out
}

/// Variants matching the optional color and size; deleted variants are not excluded.
pub fn narrow_variants(variants: &[Variant], color: Option<&str>, size: Option<&str>) -> Vec<Variant> {
    variants
        .iter()
        .filter(|v| color.is_none_or(|c| v.has_color(c)))
        .filter(|v| size.is_none_or(|s| v.has_size(s)))
        .cloned()
        .collect()
}

/// Distinct colors over every variant, deleted ones included.
pub fn variant_colors(product: &Product) -> Vec<String> {
    product
        .variants
        .iter()
        .filter_map(|v| v.color.clone())
        .collect::<Distinct<_>>()
        .into_vec()
}

/// In-stock sizes for a color across its live variants.
///
/// A size seen in several variants keeps its first position and the last quantity.
pub fn in_stock_sizes(product: &Product, color: &str) -> Vec<VariantSize> {
    let mut out: Vec<VariantSize> = Vec::new();

    for variant in product.live_variants().filter(|v| v.has_color(color)) {
        for entry in variant.variant_sizes.iter().filter(|s| s.quantity > 0) {
            match out.iter_mut().find(|s| s.size == entry.size) {
                Some(existing) => existing.quantity = entry.quantity,
                None => out.push(entry.clone()),
            }
        }
    }

    out
}

/// Search hit: the document with narrowed variants plus reference lists and full stock.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListing {
    #[serde(flatten)]
    pub product: Product,
    pub all_sizes: Vec<String>,
    pub all_colors: Vec<String>,
    pub available: Vec<ColorAvailability>,
}

impl ProductListing {
    pub fn build(
        mut product: Product,
        color: Option<&str>,
        size: Option<&str>,
        reference: &ReferenceData,
    ) -> Self {
        let available = available_by_color(&product);
        product.variants = narrow_variants(&product.variants, color, size);

        Self {
            product,
            all_sizes: reference.sizes.clone(),
            all_colors: reference.colors.clone(),
            available,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AvailableColors {
    /// Also used, empty, when the product does not exist.
    Found {
        #[serde(rename = "AvaColors")]
        colors: Vec<String>,
    },
    UnknownGroup {
        colors: Vec<String>,
    },
    LookupFailed {
        sizes: Vec<String>,
        colors: Vec<String>,
    },
}

impl AvailableColors {
    pub fn unknown_group() -> Self {
        AvailableColors::UnknownGroup { colors: Vec::new() }
    }

    pub fn lookup_failed() -> Self {
        AvailableColors::LookupFailed {
            sizes: Vec::new(),
            colors: Vec::new(),
        }
    }

    pub fn for_product(product: Option<&Product>) -> Self {
        AvailableColors::Found {
            colors: product.map(variant_colors).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AvailableSizes {
    Found {
        #[serde(rename = "avaSizesAndQty")]
        sizes: Vec<VariantSize>,
        message: String,
    },
    Unavailable {
        sizes: Vec<VariantSize>,
        message: String,
    },
}

impl AvailableSizes {
    pub fn for_color(product: &Product, color: &str) -> Self {
        let sizes = in_stock_sizes(product, color);
        let message = if sizes.is_empty() {
            NO_SIZES_MESSAGE
        } else {
            SIZES_FOUND_MESSAGE
        };
        AvailableSizes::Found {
            sizes,
            message: message.to_string(),
        }
    }

    pub fn unavailable(message: &str) -> Self {
        AvailableSizes::Unavailable {
            sizes: Vec::new(),
            message: message.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AvailableSizes::Found { message, .. } | AvailableSizes::Unavailable { message, .. } => {
                message
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProductDetail {
    Variant {
        #[serde(rename = "productDetails")]
        product: Product,
        sizes: Vec<String>,
        colors: Vec<String>,
        available: Vec<ColorAvailability>,
    },
    NoMatchingVariant {
        message: String,
        available: Vec<ColorAvailability>,
    },
}

impl ProductDetail {
    /// Narrows the document to the first variant of `color`.
    pub fn build(mut product: Product, color: &str, reference: &ReferenceData) -> Self {
        let available = available_by_color(&product);

        match product.variants.iter().find(|v| v.has_color(color)).cloned() {
            Some(variant) => {
                product.variants = vec![variant];
                ProductDetail::Variant {
                    product,
                    sizes: reference.sizes.clone(),
                    colors: reference.colors.clone(),
                    available,
                }
            }
            None => ProductDetail::NoMatchingVariant {
                message: NO_MATCHING_VARIANT_MESSAGE.to_string(),
                available,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn red_and_blue() -> Product {
        let mut p = Product::new("P-1");
        p.variants = vec![
            Variant::new("RED", vec![VariantSize::new("M", 10)]),
            Variant::new("BLUE", vec![VariantSize::new("M", 0)]),
        ];
        p
    }

    #[test]
    fn listing_narrows_variants_but_keeps_full_availability() {
        let listing = ProductListing::build(red_and_blue(), Some("RED"), None, &ReferenceData::default());

        assert_eq!(listing.product.variants.len(), 1);
        assert!(listing.product.variants[0].has_color("RED"));

        let colors: Vec<_> = listing.available.iter().map(|a| a.color.as_str()).collect();
        assert_eq!(colors, vec!["RED", "BLUE"]);
        assert_eq!(listing.available[1].sizes_and_qty, vec![VariantSize::new("M", 0)]);
    }

    #[test]
    fn listing_serializes_flat_with_reference_lists() {
        let listing = ProductListing::build(red_and_blue(), None, Some("XL"), &ReferenceData::default());
        let json = serde_json::to_value(&listing).unwrap();

        assert_eq!(json["productId"], "P-1");
        assert_eq!(json["variants"], json!([]));
        assert_eq!(json["allSizes"], json!(["S", "M", "L", "XL", "XXL"]));
        assert_eq!(json["allColors"].as_array().unwrap().len(), 9);
        assert_eq!(json["available"][0]["sizesAndQty"][0], json!({ "size": "M", "quantity": 10 }));
    }

    #[test]
    fn availability_merges_variants_of_the_same_color_and_skips_deleted() {
        let mut p = Product::new("P-1");
        p.variants = vec![
            Variant::new("RED", vec![VariantSize::new("S", 1)]),
            Variant::new("GREEN", vec![VariantSize::new("S", 4)]).deleted(),
            Variant::new("RED", vec![VariantSize::new("L", 2)]),
        ];

        let available = available_by_color(&p);
        assert_eq!(available.len(), 1);
        assert_eq!(
            available[0].sizes_and_qty,
            vec![VariantSize::new("S", 1), VariantSize::new("L", 2)]
        );
    }

    #[test]
    fn colors_include_deleted_variants() {
        let mut p = red_and_blue();
        p.variants[1] = p.variants[1].clone().deleted();
        assert_eq!(variant_colors(&p), vec!["RED", "BLUE"]);
    }

    #[test]
    fn sizes_for_color_with_no_stock_reports_message() {
        let sizes = AvailableSizes::for_color(&red_and_blue(), "BLUE");
        assert_eq!(
            serde_json::to_value(&sizes).unwrap(),
            json!({ "avaSizesAndQty": [], "message": "No sizes found for the specified color." })
        );
    }

    #[test]
    fn sizes_for_color_keep_first_position_and_last_quantity() {
        let mut p = Product::new("P-1");
        p.variants = vec![
            Variant::new("RED", vec![VariantSize::new("M", 3), VariantSize::new("S", 1)]),
            Variant::new("RED", vec![VariantSize::new("M", 7), VariantSize::new("L", 0)]),
            Variant::new("RED", vec![VariantSize::new("XL", 9)]).deleted(),
        ];

        let sizes = AvailableSizes::for_color(&p, "RED");
        assert_eq!(sizes.message(), SIZES_FOUND_MESSAGE);
        assert_eq!(
            sizes,
            AvailableSizes::Found {
                sizes: vec![VariantSize::new("M", 7), VariantSize::new("S", 1)],
                message: SIZES_FOUND_MESSAGE.to_string(),
            }
        );
    }

    #[test]
    fn color_responses_use_their_own_keys() {
        assert_eq!(
            serde_json::to_value(AvailableColors::for_product(None)).unwrap(),
            json!({ "AvaColors": [] })
        );
        assert_eq!(
            serde_json::to_value(AvailableColors::unknown_group()).unwrap(),
            json!({ "colors": [] })
        );
        assert_eq!(
            serde_json::to_value(AvailableColors::lookup_failed()).unwrap(),
            json!({ "sizes": [], "colors": [] })
        );
    }

    #[test]
    fn detail_keeps_only_the_requested_color() {
        let detail = ProductDetail::build(red_and_blue(), "BLUE", &ReferenceData::default());
        let json = serde_json::to_value(&detail).unwrap();

        assert_eq!(json["productDetails"]["variants"].as_array().unwrap().len(), 1);
        assert_eq!(json["productDetails"]["variants"][0]["color"], "BLUE");
        assert_eq!(json["sizes"], json!(["S", "M", "L", "XL", "XXL"]));
        assert_eq!(json["available"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn detail_without_matching_variant_reports_message() {
        let detail = ProductDetail::build(red_and_blue(), "GREEN", &ReferenceData::default());
        match detail {
            ProductDetail::NoMatchingVariant { message, available } => {
                assert_eq!(message, NO_MATCHING_VARIANT_MESSAGE);
                assert_eq!(available.len(), 2);
            }
            other => panic!("expected NoMatchingVariant, got {other:?}"),
        }
    }
}
