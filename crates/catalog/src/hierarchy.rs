//! Hierarchy listings: group → category → subcategory → gender → product type.
//!
//! Uniqueness is first-wins over the order documents are handed in, which is
//! the store's storage order.

use serde::Serialize;

use storefront_core::Group;

use crate::product::{Product, ProductType};
use crate::unique::Distinct;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupEntry {
    pub group_name: String,
    pub image_url: String,
}

impl GroupEntry {
    /// Entry for `group`, taking the image from a representative document when it has one.
    pub fn from_representative(
        group: Group,
        representative: Option<&Product>,
        default_image_url: &str,
    ) -> Self {
        let image_url = representative
            .and_then(|p| p.group.as_ref())
            .and_then(|g| g.image_url.as_deref())
            .filter(|url| !url.is_empty())
            .unwrap_or(default_image_url);

        Self {
            group_name: group.as_str().to_string(),
            image_url: image_url.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryEntry {
    pub category: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryEntry {
    pub sub_category: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenderProductTypes {
    /// `None` collects documents without a gender.
    pub gender: Option<String>,
    pub product_types: Vec<ProductType>,
}

/// One entry per distinct category name; the image comes from the first document seen.
pub fn distinct_categories<'a>(products: impl IntoIterator<Item = &'a Product>) -> Vec<CategoryEntry> {
    let mut names = Distinct::new();
    let mut out = Vec::new();

    for product in products {
        let name = product.category_name().map(str::to_owned);
        if names.insert(name.clone()) {
            out.push(CategoryEntry {
                category: name,
                image_url: product.category.as_ref().and_then(|c| c.image_url.clone()),
            });
        }
    }

    out
}

/// Distinct `(subCategory, imageUrl)` pairs.
pub fn distinct_sub_categories<'a>(
    products: impl IntoIterator<Item = &'a Product>,
) -> Vec<SubCategoryEntry> {
    products
        .into_iter()
        .map(|p| SubCategoryEntry {
            sub_category: p.sub_category_name().map(str::to_owned),
            image_url: p.sub_category.as_ref().and_then(|s| s.image_url.clone()),
        })
        .collect::<Distinct<_>>()
        .into_vec()
}

/// Product types grouped by gender, genders in first-seen order.
pub fn product_types_by_gender<'a>(
    products: impl IntoIterator<Item = &'a Product>,
) -> Vec<GenderProductTypes> {
    let mut genders: Vec<(Option<String>, Distinct<ProductType>)> = Vec::new();

    for product in products {
        let idx = match genders.iter().position(|(g, _)| *g == product.gender) {
            Some(idx) => idx,
            None => {
                genders.push((product.gender.clone(), Distinct::new()));
                genders.len() - 1
            }
        };
        if let Some(product_type) = &product.product_type {
            genders[idx].1.insert(product_type.clone());
        }
    }

    genders
        .into_iter()
        .map(|(gender, types)| GenderProductTypes {
            gender,
            product_types: types.into_vec(),
        })
        .collect()
}
