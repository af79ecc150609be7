use serde::Deserialize;

// -------------------------
// Query-string DTOs
// -------------------------
//
// Facet and search queries deserialize straight into `ProductSelector` /
// `SearchCriteria`; the ones below cover the remaining routes.

#[derive(Debug, Default, Deserialize)]
pub struct CategoryQuery {
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTypesQuery {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sub_category: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ColorQuery {
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductDetailQuery {
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: String,
}
