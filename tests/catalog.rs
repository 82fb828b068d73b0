mod common;

use common::{Fixture, price};

use axum_storefront::{
    services::catalog_service::{self, HOME_LATEST_LIMIT},
    store::memory::NewProduct,
};

#[tokio::test]
async fn home_shows_at_most_six_latest_products() {
    let fx = Fixture::new().await;
    let mut latest = Vec::new();
    for n in 0..8 {
        let product = fx
            .catalog
            .add_product(NewProduct::new(format!("New Arrival {n}"), price(1000), fx.clothes.id).latest())
            .await;
        latest.push(product.id);
    }
    fx.product("Old Stock", 500, &fx.clothes).await;

    let page = catalog_service::home(&fx.state).await.unwrap();
    assert_eq!(page.latest_products.len(), HOME_LATEST_LIMIT as usize);
    assert!(page.latest_products.iter().all(|p| p.is_latest));
    assert_eq!(page.latest_products[0].id, *latest.last().unwrap());
}

#[tokio::test]
async fn empty_search_finds_nothing() {
    let fx = Fixture::new().await;
    fx.product("Loafer", 3999, &fx.casual).await;

    for query in [None, Some(String::new())] {
        let page = catalog_service::search(&fx.state, query).await.unwrap();
        assert_eq!(page.query, "");
        assert!(page.results.is_empty());
    }
}

#[tokio::test]
async fn search_matches_name_fragments_case_insensitively() {
    let fx = Fixture::new().await;
    let loafer = fx.product("Suede Loafer", 3999, &fx.casual).await;
    let boot = fx.product("LOAFER Boot", 4999, &fx.formal).await;
    fx.product("Stiletto", 4500, &fx.heels).await;

    let page = catalog_service::search(&fx.state, Some("loaf".to_string()))
        .await
        .unwrap();
    assert_eq!(page.query, "loaf");
    let mut ids: Vec<_> = page.results.iter().map(|p| p.id).collect();
    ids.sort();
    assert_eq!(ids, vec![loafer.id, boot.id]);
}

#[tokio::test]
async fn discounts_lists_only_discounted_products() {
    let fx = Fixture::new().await;
    let sale = fx
        .catalog
        .add_product(NewProduct::new("Sale Kurta", price(800), fx.clothes.id).discounted())
        .await;
    fx.product("Full Price Kurta", 1200, &fx.clothes).await;

    let list = catalog_service::discounts(&fx.state).await.unwrap();
    assert_eq!(list.items.len(), 1);
    assert_eq!(list.items[0].id, sale.id);
}

#[tokio::test]
async fn latest_is_ordered_newest_id_first() {
    let fx = Fixture::new().await;
    let first = fx
        .catalog
        .add_product(NewProduct::new("First", price(100), fx.clothes.id).latest())
        .await;
    fx.product("Not Latest", 100, &fx.clothes).await;
    let second = fx
        .catalog
        .add_product(NewProduct::new("Second", price(100), fx.clothes.id).latest())
        .await;

    let list = catalog_service::latest(&fx.state).await.unwrap();
    let ids: Vec<_> = list.items.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[tokio::test]
async fn category_page_lists_direct_products_with_full_path() {
    let fx = Fixture::new().await;
    let loafer = fx.product("Loafer", 3999, &fx.casual).await;
    fx.product("Brush", 199, &fx.mens).await;

    let page = catalog_service::category_page(&fx.state, fx.casual.id)
        .await
        .unwrap();
    assert!(page.error.is_none());
    assert_eq!(page.category.map(|c| c.id), Some(fx.casual.id));
    assert_eq!(
        page.full_path.as_deref(),
        Some("Footwear > Men's Footwear > Casual")
    );
    assert_eq!(page.products.len(), 1);
    assert_eq!(page.products[0].id, loafer.id);

    let parent = catalog_service::category_page(&fx.state, fx.mens.id)
        .await
        .unwrap();
    assert_eq!(parent.products.len(), 1);
    assert_eq!(parent.products[0].name, "Brush");
}

#[tokio::test]
async fn unknown_category_reports_an_error() {
    let fx = Fixture::new().await;
    let page = catalog_service::category_page(&fx.state, 4040).await.unwrap();
    assert!(page.category.is_none());
    assert!(page.products.is_empty());
    assert_eq!(page.error.as_deref(), Some("Category not found"));
}

#[tokio::test]
async fn category_tree_nests_roots_and_children() {
    let fx = Fixture::new().await;
    let tree = catalog_service::category_tree(&fx.state).await.unwrap();

    let names: Vec<_> = tree.items.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["Clothes", "Footwear", "Jewellery"]);

    let footwear = &tree.items[1];
    assert_eq!(footwear.children.len(), 2);
    let mens = &footwear.children[0];
    assert_eq!(mens.full_path, "Footwear > Men's Footwear");
    assert_eq!(mens.children.len(), 2);
}

#[tokio::test]
async fn deleting_a_category_removes_its_subtree_and_products() {
    let fx = Fixture::new().await;
    let loafer = fx.product("Loafer", 3999, &fx.casual).await;
    let heel = fx.product("Stiletto", 4500, &fx.heels).await;

    assert!(fx.catalog.delete_category(fx.mens.id).await);

    let gone = catalog_service::category_page(&fx.state, fx.casual.id)
        .await
        .unwrap();
    assert!(gone.category.is_none());

    let results = catalog_service::search(&fx.state, Some("o".to_string()))
        .await
        .unwrap()
        .results;
    assert!(results.iter().all(|p| p.id != loafer.id));
    assert!(results.iter().any(|p| p.id == heel.id));
}
