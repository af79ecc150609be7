//! Faceted filter extraction and the per-brand response shape policy.

use serde::Serialize;

use storefront_core::Group;

use crate::product::Product;
use crate::unique::Distinct;

/// Sizes only count towards the combined facet set when more than this many
/// units are on hand for a variant.
pub const ORDERABLE_QUANTITY_THRESHOLD: u32 = 5;

/// Single facets that can be queried on their own.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Facet {
    Fit,
    Color,
    Size,
    Neckline,
    Sleeves,
}

impl Facet {
    pub fn as_str(&self) -> &'static str {
        match self {
            Facet::Fit => "fits",
            Facet::Color => "colors",
            Facet::Size => "sizes",
            Facet::Neckline => "necklines",
            Facet::Sleeves => "sleeves",
        }
    }
}

/// Distinct values of one facet across `products`, with no stock threshold.
///
/// Colors come from every variant and sizes from every variant size.
pub fn distinct_values<'a>(products: impl IntoIterator<Item = &'a Product>, facet: Facet) -> Vec<String> {
    let mut values = Distinct::new();

    for product in products {
        match facet {
            Facet::Fit => values.extend(product.fit.clone()),
            Facet::Neckline => values.extend(product.neckline.clone()),
            Facet::Sleeves => values.extend(product.sleeves.clone()),
            Facet::Color => values.extend(product.variants.iter().filter_map(|v| v.color.clone())),
            Facet::Size => values.extend(
                product
                    .variants
                    .iter()
                    .flat_map(|v| v.variant_sizes.iter().map(|s| s.size.clone())),
            ),
        }
    }

    values.into_vec()
}

/// All facet value sets, computed in one pass over the matching documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetValues {
    pub fits: Vec<String>,
    pub fabrics: Vec<String>,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub necklines: Vec<String>,
    pub sleeves: Vec<String>,
}

impl FacetValues {
    pub fn collect<'a>(products: impl IntoIterator<Item = &'a Product>) -> Self {
        let mut fits = Distinct::new();
        let mut fabrics = Distinct::new();
        let mut colors = Distinct::new();
        let mut sizes = Distinct::new();
        let mut necklines = Distinct::new();
        let mut sleeves = Distinct::new();

        for product in products {
            fits.extend(product.fit.clone());
            fabrics.extend(product.fabric.clone());
            necklines.extend(product.neckline.clone());
            sleeves.extend(product.sleeves.clone());

            for variant in &product.variants {
                colors.extend(variant.color.clone());
                sizes.extend(
                    variant
                        .variant_sizes
                        .iter()
                        .filter(|s| s.quantity > ORDERABLE_QUANTITY_THRESHOLD)
                        .map(|s| s.size.clone()),
                );
            }
        }

        Self {
            fits: fits.into_vec(),
            fabrics: fabrics.into_vec(),
            colors: colors.into_vec(),
            sizes: sizes.into_vec(),
            necklines: necklines.into_vec(),
            sleeves: sleeves.into_vec(),
        }
    }
}

/// Which facets a brand exposes, and how they are nested.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FacetShape {
    /// HEAL coats: `{fabrics, sleeves, sizes}`.
    HealCoats,
    /// HEAL, other categories: `{fabrics, colors, sizes}`.
    Heal,
    /// `{colors, sizes}`.
    ColorsAndSizes,
    /// SPIRIT jackets and jersey t-shirts: `{filters: {colors, sizes, necklines, sleeves}}`.
    SpiritFeatured,
    /// TOGS: `{filters: {fits, colors, sizes}}`.
    Togs,
    /// `{filters: {fits, colors, sizes, necklines, sleeves}}`.
    Full,
}

const SPIRIT_FEATURED_TYPES: [&str; 2] = ["JACKETS", "JERSEY T-SHIRT"];

impl FacetShape {
    pub fn select(group: Group, category: &str, product_type: Option<&str>) -> Self {
        match group {
            Group::Heal if category == "COATS" => FacetShape::HealCoats,
            Group::Heal => FacetShape::Heal,
            Group::WorkWearUniforms | Group::Shield => FacetShape::ColorsAndSizes,
            Group::Spirit => match product_type {
                Some(t) if SPIRIT_FEATURED_TYPES.contains(&t) => FacetShape::SpiritFeatured,
                _ => FacetShape::ColorsAndSizes,
            },
            Group::Togs => FacetShape::Togs,
            Group::Elite => FacetShape::Full,
        }
    }

    pub fn render(&self, values: FacetValues) -> FacetResponse {
        let FacetValues {
            fits,
            fabrics,
            colors,
            sizes,
            necklines,
            sleeves,
        } = values;

        match self {
            FacetShape::HealCoats => FacetResponse::FabricsSleevesSizes {
                fabrics,
                sleeves,
                sizes,
            },
            FacetShape::Heal => FacetResponse::FabricsColorsSizes {
                fabrics,
                colors,
                sizes,
            },
            FacetShape::ColorsAndSizes => FacetResponse::ColorsSizes { colors, sizes },
            FacetShape::SpiritFeatured => FacetResponse::Nested {
                filters: FacetFilters {
                    colors: Some(colors),
                    sizes: Some(sizes),
                    necklines: Some(necklines),
                    sleeves: Some(sleeves),
                    ..FacetFilters::default()
                },
            },
            FacetShape::Togs => FacetResponse::Nested {
                filters: FacetFilters {
                    fits: Some(fits),
                    colors: Some(colors),
                    sizes: Some(sizes),
                    ..FacetFilters::default()
                },
            },
            FacetShape::Full => FacetResponse::Nested {
                filters: FacetFilters {
                    fits: Some(fits),
                    colors: Some(colors),
                    sizes: Some(sizes),
                    necklines: Some(necklines),
                    sleeves: Some(sleeves),
                },
            },
        }
    }
}

/// Facets nested under `filters`; absent keys are not part of the brand's shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fits: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub necklines: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleeves: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FacetResponse {
    FabricsSleevesSizes {
        fabrics: Vec<String>,
        sleeves: Vec<String>,
        sizes: Vec<String>,
    },
    FabricsColorsSizes {
        fabrics: Vec<String>,
        colors: Vec<String>,
        sizes: Vec<String>,
    },
    ColorsSizes {
        colors: Vec<String>,
        sizes: Vec<String>,
    },
    Nested {
        filters: FacetFilters,
    },
}

impl FacetResponse {
    /// `{filters: {}}`, returned when the facets could not be computed.
    pub fn empty() -> Self {
        FacetResponse::Nested {
            filters: FacetFilters::default(),
        }
    }
}
