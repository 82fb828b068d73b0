use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    category_tree::CategoryNode,
    models::{Category, Product},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HomePage {
    pub latest_products: Vec<Product>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SearchPage {
    pub query: String,
    pub results: Vec<Product>,
}

/// Products of a single category. `category` is `None` and `error` is set
/// when the id does not resolve.
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryPage {
    pub category: Option<Category>,
    pub full_path: Option<String>,
    pub products: Vec<Product>,
    pub error: Option<String>,
}

/// A collection page built from a section's category subtree.
#[derive(Debug, Serialize, ToSchema)]
pub struct SectionPage {
    pub category_name: String,
    pub products: Vec<Product>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CategoryTreeList {
    #[schema(value_type = Vec<CategoryNode>)]
    pub items: Vec<CategoryNode>,
}
