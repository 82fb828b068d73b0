use crate::{
    category_tree::CategoryTree,
    dto::catalog::{CategoryPage, CategoryTreeList, HomePage, ProductList, SearchPage},
    error::AppResult,
    models::CategoryId,
    state::AppState,
    store::{ProductFilter, ProductOrder},
};

/// Number of latest products featured on the home page.
pub const HOME_LATEST_LIMIT: u64 = 6;

pub async fn home(state: &AppState) -> AppResult<HomePage> {
    let latest_products = state
        .catalog
        .products(ProductFilter::latest().limit(HOME_LATEST_LIMIT))
        .await?;
    Ok(HomePage { latest_products })
}

/// Name search. An empty query finds nothing rather than everything.
pub async fn search(state: &AppState, query: Option<String>) -> AppResult<SearchPage> {
    let query = query.unwrap_or_default();
    let results = if query.is_empty() {
        Vec::new()
    } else {
        state.catalog.search_by_name(&query).await?
    };
    Ok(SearchPage { query, results })
}

pub async fn discounts(state: &AppState) -> AppResult<ProductList> {
    let items = state.catalog.products(ProductFilter::discounted()).await?;
    Ok(ProductList { items })
}

pub async fn latest(state: &AppState) -> AppResult<ProductList> {
    let items = state
        .catalog
        .products(ProductFilter::latest().order_by(ProductOrder::IdDesc))
        .await?;
    Ok(ProductList { items })
}

/// Products filed directly under one category; sub-categories are not included.
pub async fn category_page(state: &AppState, id: CategoryId) -> AppResult<CategoryPage> {
    let tree = CategoryTree::new(state.categories.all().await?);
    let Some(category) = tree.get(id).cloned() else {
        tracing::debug!(category_id = id, "category not found");
        return Ok(CategoryPage {
            category: None,
            full_path: None,
            products: Vec::new(),
            error: Some("Category not found".to_string()),
        });
    };

    let products = state
        .catalog
        .products(ProductFilter::in_categories(vec![id]))
        .await?;
    Ok(CategoryPage {
        full_path: tree.full_path(id),
        category: Some(category),
        products,
        error: None,
    })
}

pub async fn category_tree(state: &AppState) -> AppResult<CategoryTreeList> {
    let tree = CategoryTree::new(state.categories.all().await?);
    Ok(CategoryTreeList { items: tree.nodes() })
}
