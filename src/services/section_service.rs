//! Collection pages built from a whole category subtree.

use std::collections::{HashSet, VecDeque};

use crate::{
    dto::catalog::SectionPage,
    error::AppResult,
    models::{Category, Product},
    state::AppState,
    store::{CatalogStore, CategoryStore, ProductFilter, StoreResult},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Footwear,
    Jewellery,
    Clothes,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Footwear, Section::Jewellery, Section::Clothes];

    /// Exact name of the root category the section aggregates.
    pub fn root_name(self) -> &'static str {
        match self {
            Section::Footwear => "Footwear",
            Section::Jewellery => "Jewellery",
            Section::Clothes => "Clothes",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionOutcome {
    /// No category carries the requested root name.
    NotFound,
    Found {
        root: Category,
        /// The root and all of its descendants.
        categories: Vec<Category>,
        products: Vec<Product>,
    },
}

/// Every category reachable from `root` through child links, `root` first.
///
/// Each category is visited once, so parent cycles cannot loop forever.
pub async fn collect_descendants(
    store: &dyn CategoryStore,
    root: Category,
) -> StoreResult<Vec<Category>> {
    let mut seen = HashSet::from([root.id]);
    let mut queue = VecDeque::from([root.id]);
    let mut collected = vec![root];

    while let Some(parent) = queue.pop_front() {
        for child in store.children_of(parent).await? {
            if seen.insert(child.id) {
                queue.push_back(child.id);
                collected.push(child);
            }
        }
    }
    Ok(collected)
}

/// Products attached anywhere in the subtree rooted at the category named `root_name`.
pub async fn aggregate(
    categories: &dyn CategoryStore,
    catalog: &dyn CatalogStore,
    root_name: &str,
) -> StoreResult<SectionOutcome> {
    let Some(root) = categories.category_by_name(root_name).await? else {
        return Ok(SectionOutcome::NotFound);
    };

    let subtree = collect_descendants(categories, root.clone()).await?;
    let ids = subtree.iter().map(|category| category.id).collect();
    let products = catalog.products(ProductFilter::in_categories(ids)).await?;

    tracing::debug!(
        root = root_name,
        categories = subtree.len(),
        products = products.len(),
        "aggregated section"
    );
    Ok(SectionOutcome::Found {
        root,
        categories: subtree,
        products,
    })
}

pub async fn section_page(state: &AppState, section: Section) -> AppResult<SectionPage> {
    let name = section.root_name();
    let page = match aggregate(state.categories.as_ref(), state.catalog.as_ref(), name).await? {
        SectionOutcome::Found { products, .. } => SectionPage {
            category_name: format!("{name} Collection"),
            products,
            error: None,
        },
        SectionOutcome::NotFound => SectionPage {
            category_name: name.to_string(),
            products: Vec::new(),
            error: Some(format!("{name} category not found")),
        },
    };
    Ok(page)
}
