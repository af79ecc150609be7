//! Equality-match filters understood by every catalog store.

use serde::Deserialize;

use storefront_core::{CatalogError, CatalogResult};

use crate::product::Product;

/// Treat empty strings as "no constraint", the way query-string inputs arrive.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Hierarchy position shared by the facet and search operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSelector {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sub_category: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub product_type: Option<String>,
}

impl ProductSelector {
    pub fn new(category: impl Into<String>, sub_category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            sub_category: sub_category.into(),
            gender: None,
            product_type: None,
        }
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn with_product_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = Some(product_type.into());
        self
    }

    /// Both mandatory hierarchy levels are present.
    pub fn is_complete(&self) -> bool {
        self.require_complete().is_ok()
    }

    /// Fails with the first missing mandatory hierarchy level.
    pub fn require_complete(&self) -> CatalogResult<()> {
        if self.category.is_empty() {
            return Err(CatalogError::missing_filter("category"));
        }
        if self.sub_category.is_empty() {
            return Err(CatalogError::missing_filter("subCategory"));
        }
        Ok(())
    }

    pub fn to_filter(&self) -> DocumentFilter {
        DocumentFilter {
            category: Some(self.category.clone()),
            sub_category: Some(self.sub_category.clone()),
            gender: non_empty(self.gender.as_deref()).map(str::to_owned),
            product_type: non_empty(self.product_type.as_deref()).map(str::to_owned),
            ..DocumentFilter::default()
        }
    }
}

/// Narrowing filters for product search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    #[serde(flatten)]
    pub selector: ProductSelector,
    #[serde(default)]
    pub fit: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub neckline: Option<String>,
    #[serde(default)]
    pub sleeves: Option<String>,
}

impl SearchCriteria {
    pub fn new(selector: ProductSelector) -> Self {
        Self {
            selector,
            ..Self::default()
        }
    }

    /// Document-level part of the search; color and size narrow variants only.
    pub fn to_filter(&self) -> DocumentFilter {
        DocumentFilter {
            fit: non_empty(self.fit.as_deref()).map(str::to_owned),
            neckline: non_empty(self.neckline.as_deref()).map(str::to_owned),
            sleeves: non_empty(self.sleeves.as_deref()).map(str::to_owned),
            ..self.selector.to_filter()
        }
    }

    pub fn color(&self) -> Option<&str> {
        non_empty(self.color.as_deref())
    }

    pub fn size(&self) -> Option<&str> {
        non_empty(self.size.as_deref())
    }
}

/// Conjunction of equality constraints on a product document.
///
/// `None` means "unconstrained". `matches` is the reference semantics that
/// store implementations must agree with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFilter {
    pub product_id: Option<String>,
    pub group_name: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub gender: Option<String>,
    pub product_type: Option<String>,
    pub fit: Option<String>,
    pub neckline: Option<String>,
    pub sleeves: Option<String>,
    /// At least one variant (deleted or not) has this color.
    pub variant_color: Option<String>,
    pub exclude_deleted: bool,
}

impl DocumentFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn live() -> Self {
        Self {
            exclude_deleted: true,
            ..Self::default()
        }
    }

    pub fn by_product_id(product_id: impl Into<String>) -> Self {
        Self {
            product_id: Some(product_id.into()),
            ..Self::default()
        }
    }

    pub fn with_group_name(mut self, name: impl Into<String>) -> Self {
        self.group_name = Some(name.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_sub_category(mut self, sub_category: impl Into<String>) -> Self {
        self.sub_category = Some(sub_category.into());
        self
    }

    pub fn with_variant_color(mut self, color: impl Into<String>) -> Self {
        self.variant_color = Some(color.into());
        self
    }

    pub fn matches(&self, product: &Product) -> bool {
        fn eq(expected: &Option<String>, actual: Option<&str>) -> bool {
            match expected {
                Some(e) => actual == Some(e.as_str()),
                None => true,
            }
        }

        if self.exclude_deleted && product.is_deleted {
            return false;
        }

        eq(&self.product_id, Some(product.product_id.as_str()))
            && eq(&self.group_name, product.group_name())
            && eq(&self.category, product.category_name())
            && eq(&self.sub_category, product.sub_category_name())
            && eq(&self.gender, product.gender.as_deref())
            && eq(&self.product_type, product.product_type_name())
            && eq(&self.fit, product.fit.as_deref())
            && eq(&self.neckline, product.neckline.as_deref())
            && eq(&self.sleeves, product.sleeves.as_deref())
            && match &self.variant_color {
                Some(color) => product.variants.iter().any(|v| v.has_color(color)),
                None => true,
            }
    }
}
