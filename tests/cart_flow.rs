mod common;

use common::{Fixture, price};

use axum_storefront::{
    services::cart_service::{add_to_cart, load_cart, notify, remove_from_cart, update_quantity, view_cart},
    session::SessionId,
};

#[tokio::test]
async fn repeated_adds_and_increases_accumulate() {
    let fx = Fixture::new().await;
    let boot = fx.product("Leather Boot", 4999, &fx.casual).await;
    let session = SessionId::new();

    for _ in 0..3 {
        add_to_cart(&fx.state, session, boot.id).await.unwrap();
    }
    for _ in 0..2 {
        let result = update_quantity(&fx.state, session, boot.id, "increase")
            .await
            .unwrap();
        assert!(result.success);
    }

    let cart = load_cart(&fx.state, session).await.unwrap();
    assert_eq!(cart.quantity(boot.id), Some(5));
}

#[tokio::test]
async fn add_reports_product_name_and_count() {
    let fx = Fixture::new().await;
    let boot = fx.product("Leather Boot", 4999, &fx.casual).await;
    let session = SessionId::new();

    let first = add_to_cart(&fx.state, session, boot.id).await.unwrap();
    assert!(first.changed);
    assert!(first.result.success);
    assert_eq!(first.result.message, "Leather Boot added to cart!");
    assert_eq!(first.result.cart_count, 1);

    let second = add_to_cart(&fx.state, session, boot.id).await.unwrap();
    assert_eq!(second.result.cart_count, 2);
}

#[tokio::test]
async fn decrease_never_drops_below_one() {
    let fx = Fixture::new().await;
    let ring = fx.product("Silver Payal", 1500, &fx.payal).await;
    let session = SessionId::new();
    add_to_cart(&fx.state, session, ring.id).await.unwrap();

    let result = update_quantity(&fx.state, session, ring.id, "decrease")
        .await
        .unwrap();
    assert!(!result.success);
    assert_eq!(result.message, "Invalid action or quantity");
    assert!(result.new_quantity.is_none());

    let cart = load_cart(&fx.state, session).await.unwrap();
    assert_eq!(cart.quantity(ring.id), Some(1));
}

#[tokio::test]
async fn decrease_from_two_reports_new_totals() {
    let fx = Fixture::new().await;
    let ring = fx.product("Silver Payal", 1500, &fx.payal).await;
    let session = SessionId::new();
    add_to_cart(&fx.state, session, ring.id).await.unwrap();
    add_to_cart(&fx.state, session, ring.id).await.unwrap();

    let result = update_quantity(&fx.state, session, ring.id, "decrease")
        .await
        .unwrap();
    assert!(result.success);
    assert_eq!(result.message, "Quantity decreased!");
    assert_eq!(result.new_quantity, Some(1));
    assert_eq!(result.new_subtotal, Some(price(1500)));
    assert_eq!(result.cart_count, Some(1));
}

#[tokio::test]
async fn remove_drops_the_entry_and_its_count() {
    let fx = Fixture::new().await;
    let boot = fx.product("Leather Boot", 4999, &fx.casual).await;
    let heel = fx.product("Stiletto", 3000, &fx.heels).await;
    let session = SessionId::new();
    add_to_cart(&fx.state, session, boot.id).await.unwrap();
    add_to_cart(&fx.state, session, boot.id).await.unwrap();
    add_to_cart(&fx.state, session, heel.id).await.unwrap();

    let change = remove_from_cart(&fx.state, session, boot.id).await.unwrap();
    assert!(change.changed);
    assert_eq!(change.result.message, "Item removed from cart!");
    assert_eq!(change.result.cart_count, 1);

    let page = view_cart(&fx.state, session).await.unwrap();
    assert_eq!(page.cart_items.len(), 1);
    assert_eq!(page.cart_items[0].product.id, heel.id);
    assert_eq!(page.cart_count, 1);
}

#[tokio::test]
async fn removing_an_absent_product_changes_nothing() {
    let fx = Fixture::new().await;
    let session = SessionId::new();

    let change = remove_from_cart(&fx.state, session, 404).await.unwrap();
    assert!(!change.changed);
    assert!(change.result.success);
    assert_eq!(change.result.cart_count, 0);
}

#[tokio::test]
async fn cart_page_totals_include_ten_percent_tax() {
    let fx = Fixture::new().await;
    let a = fx.product("Kurta", 1000, &fx.clothes).await;
    let b = fx.product("Anklet", 500, &fx.payal).await;
    let session = SessionId::new();
    add_to_cart(&fx.state, session, a.id).await.unwrap();
    add_to_cart(&fx.state, session, a.id).await.unwrap();
    add_to_cart(&fx.state, session, b.id).await.unwrap();

    let page = view_cart(&fx.state, session).await.unwrap();
    assert_eq!(page.total_price, price(2500));
    assert_eq!(page.tax, price(250));
    assert_eq!(page.grand_total, price(2750));
    assert_eq!(page.cart_count, 3);

    let line = page
        .cart_items
        .iter()
        .find(|line| line.product.id == a.id)
        .unwrap();
    assert_eq!(line.quantity, 2);
    assert_eq!(line.subtotal, price(2000));
}

#[tokio::test]
async fn update_returns_repriced_cart() {
    let fx = Fixture::new().await;
    let a = fx.product("Kurta", 1000, &fx.clothes).await;
    let b = fx.product("Anklet", 500, &fx.payal).await;
    let session = SessionId::new();
    add_to_cart(&fx.state, session, a.id).await.unwrap();
    add_to_cart(&fx.state, session, a.id).await.unwrap();
    add_to_cart(&fx.state, session, b.id).await.unwrap();

    let result = update_quantity(&fx.state, session, a.id, "increase")
        .await
        .unwrap();
    assert!(result.success);
    assert_eq!(result.message, "Quantity increased!");
    assert_eq!(result.new_quantity, Some(3));
    assert_eq!(result.new_subtotal, Some(price(3000)));
    assert_eq!(result.total_price, Some(price(3500)));
    assert_eq!(result.tax, Some(price(350)));
    assert_eq!(result.grand_total, Some(price(3850)));
    assert_eq!(result.cart_count, Some(4));
}

#[tokio::test]
async fn update_rejects_absent_products_and_unknown_actions() {
    let fx = Fixture::new().await;
    let a = fx.product("Kurta", 1000, &fx.clothes).await;
    let session = SessionId::new();

    let missing = update_quantity(&fx.state, session, a.id, "increase")
        .await
        .unwrap();
    assert!(!missing.success);
    assert_eq!(missing.message, "Product not in cart");

    add_to_cart(&fx.state, session, a.id).await.unwrap();
    for action in ["", "double", "INCREASE"] {
        let result = update_quantity(&fx.state, session, a.id, action).await.unwrap();
        assert!(!result.success, "action {action:?} should be rejected");
        assert_eq!(result.message, "Invalid action or quantity");
    }

    let cart = load_cart(&fx.state, session).await.unwrap();
    assert_eq!(cart.quantity(a.id), Some(1));
}

#[tokio::test]
async fn deleted_products_are_pruned_when_the_cart_is_viewed() {
    let fx = Fixture::new().await;
    let a = fx.product("Kurta", 1000, &fx.clothes).await;
    let b = fx.product("Anklet", 500, &fx.payal).await;
    let session = SessionId::new();
    add_to_cart(&fx.state, session, a.id).await.unwrap();
    add_to_cart(&fx.state, session, a.id).await.unwrap();
    add_to_cart(&fx.state, session, b.id).await.unwrap();

    assert!(fx.catalog.delete_product(b.id).await);

    let page = view_cart(&fx.state, session).await.unwrap();
    assert_eq!(page.cart_items.len(), 1);
    assert_eq!(page.total_price, price(2000));
    assert_eq!(page.tax, price(200));
    assert_eq!(page.grand_total, price(2200));
    assert_eq!(page.cart_count, 2);

    let cart = load_cart(&fx.state, session).await.unwrap();
    assert!(!cart.contains(b.id));
    assert_eq!(cart.count(), 2);
}

#[tokio::test]
async fn updating_a_deleted_product_reports_not_found() {
    let fx = Fixture::new().await;
    let a = fx.product("Kurta", 1000, &fx.clothes).await;
    let session = SessionId::new();
    add_to_cart(&fx.state, session, a.id).await.unwrap();
    fx.catalog.delete_product(a.id).await;

    let result = update_quantity(&fx.state, session, a.id, "increase")
        .await
        .unwrap();
    assert!(!result.success);
    assert_eq!(result.message, "Product not found");

    let cart = load_cart(&fx.state, session).await.unwrap();
    assert!(cart.is_empty());
}

#[tokio::test]
async fn unknown_product_is_recorded_then_pruned() {
    let fx = Fixture::new().await;
    let session = SessionId::new();

    let change = add_to_cart(&fx.state, session, 9999).await.unwrap();
    assert!(change.result.success);
    assert_eq!(change.result.message, "Item added to cart!");
    assert_eq!(change.result.cart_count, 1);
    assert!(load_cart(&fx.state, session).await.unwrap().contains(9999));

    let page = view_cart(&fx.state, session).await.unwrap();
    assert!(page.cart_items.is_empty());
    assert_eq!(page.cart_count, 0);
    assert!(load_cart(&fx.state, session).await.unwrap().is_empty());
}

#[tokio::test]
async fn viewing_an_empty_cart_stores_nothing() {
    let fx = Fixture::new().await;

    for _ in 0..100 {
        let page = view_cart(&fx.state, SessionId::new()).await.unwrap();
        assert!(page.cart_items.is_empty());
    }

    assert!(fx.sessions.is_empty().await);
}

#[tokio::test]
async fn viewing_a_reconciled_cart_writes_nothing_new() {
    let fx = Fixture::new().await;
    let a = fx.product("Kurta", 1000, &fx.clothes).await;
    let session = SessionId::new();
    add_to_cart(&fx.state, session, a.id).await.unwrap();

    view_cart(&fx.state, session).await.unwrap();
    view_cart(&fx.state, session).await.unwrap();

    assert_eq!(fx.sessions.len().await, 1);
    assert_eq!(load_cart(&fx.state, session).await.unwrap().quantity(a.id), Some(1));
}

#[tokio::test]
async fn flash_messages_are_shown_once() {
    let fx = Fixture::new().await;
    let session = SessionId::new();
    notify(&fx.state, session, "Kurta added to cart!").await.unwrap();
    notify(&fx.state, session, "Item removed from cart!").await.unwrap();

    let page = view_cart(&fx.state, session).await.unwrap();
    assert_eq!(
        page.messages,
        vec!["Kurta added to cart!", "Item removed from cart!"]
    );

    let again = view_cart(&fx.state, session).await.unwrap();
    assert!(again.messages.is_empty());
}

#[tokio::test]
async fn sessions_do_not_share_carts() {
    let fx = Fixture::new().await;
    let a = fx.product("Kurta", 1000, &fx.clothes).await;
    let alice = SessionId::new();
    let bob = SessionId::new();

    add_to_cart(&fx.state, alice, a.id).await.unwrap();

    assert_eq!(view_cart(&fx.state, alice).await.unwrap().cart_count, 1);
    assert_eq!(view_cart(&fx.state, bob).await.unwrap().cart_count, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_updates_on_one_session_are_not_lost() {
    let fx = Fixture::new().await;
    let a = fx.product("Kurta", 1000, &fx.clothes).await;
    let session = SessionId::new();
    add_to_cart(&fx.state, session, a.id).await.unwrap();

    let tasks: Vec<_> = (0..20)
        .map(|_| {
            let state = fx.state.clone();
            tokio::spawn(async move {
                update_quantity(&state, session, a.id, "increase")
                    .await
                    .unwrap()
            })
        })
        .collect();
    for task in tasks {
        assert!(task.await.unwrap().success);
    }

    let cart = load_cart(&fx.state, session).await.unwrap();
    assert_eq!(cart.quantity(a.id), Some(21));
    assert!(fx.state.session_locks.tracked() <= 1);
}
