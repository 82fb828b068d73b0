use std::collections::HashMap;

use crate::{
    cart::{CART_SESSION_KEY, Cart},
    dto::cart::{CartActionResult, CartPage, CartUpdateResult},
    error::AppResult,
    models::{Product, ProductId},
    pricing::{CartLine, CartTotals},
    session::{SessionId, load_or_default, push_message, store_value, take_messages},
    state::AppState,
    store::{CatalogStore, ProductFilter, StoreResult},
};

/// Outcome of an add or remove, shared by the redirect and JSON entry points.
#[derive(Debug)]
pub struct CartChange {
    /// Whether the stored cart was modified.
    pub changed: bool,
    pub result: CartActionResult,
}

pub async fn add_to_cart(
    state: &AppState,
    session: SessionId,
    product_id: ProductId,
) -> AppResult<CartChange> {
    let product = state.catalog.product(product_id).await?;

    let _guard = state.session_locks.acquire(session).await;
    let mut cart = load_cart(state, session).await?;
    let quantity = match cart.add(product_id) {
        Ok(quantity) => quantity,
        Err(err) => {
            tracing::debug!(%session, product_id, error = %err, "cart add rejected");
            return Ok(CartChange {
                changed: false,
                result: CartActionResult {
                    success: false,
                    message: err.to_string(),
                    cart_count: cart.count(),
                },
            });
        }
    };
    save_cart(state, session, &cart).await?;

    tracing::debug!(%session, product_id, quantity, "added to cart");
    let message = match product {
        Some(product) => format!("{} added to cart!", product.name),
        None => "Item added to cart!".to_string(),
    };
    Ok(CartChange {
        changed: true,
        result: CartActionResult {
            success: true,
            message,
            cart_count: cart.count(),
        },
    })
}

pub async fn remove_from_cart(
    state: &AppState,
    session: SessionId,
    product_id: ProductId,
) -> AppResult<CartChange> {
    let _guard = state.session_locks.acquire(session).await;
    let mut cart = load_cart(state, session).await?;
    let changed = cart.remove(product_id);
    if changed {
        save_cart(state, session, &cart).await?;
        tracing::debug!(%session, product_id, "removed from cart");
    }

    Ok(CartChange {
        changed,
        result: CartActionResult {
            success: true,
            message: "Item removed from cart!".to_string(),
            cart_count: cart.count(),
        },
    })
}

/// Applies `action` to the entry for `product_id` and reprices the cart.
///
/// Invalid operations come back as a failed [`CartUpdateResult`], not an error.
pub async fn update_quantity(
    state: &AppState,
    session: SessionId,
    product_id: ProductId,
    action: &str,
) -> AppResult<CartUpdateResult> {
    let _guard = state.session_locks.acquire(session).await;
    let mut cart = load_cart(state, session).await?;

    let (action, quantity) = match cart.update(product_id, action) {
        Ok(applied) => applied,
        Err(err) => {
            tracing::debug!(%session, product_id, error = %err, "cart update rejected");
            return Ok(CartUpdateResult::failed(err.to_string()));
        }
    };

    let lines = price_lines(state.catalog.as_ref(), &mut cart).await?;
    save_cart(state, session, &cart).await?;
    tracing::debug!(%session, product_id, quantity, ?action, "cart quantity updated");

    let Some(line) = lines.iter().find(|line| line.product.id == product_id) else {
        return Ok(CartUpdateResult::failed("Product not found"));
    };
    let totals = CartTotals::from_lines(&lines);
    Ok(CartUpdateResult::updated(action.confirmation(), line, totals))
}

/// Reconciles and prices the cart, consuming any pending flash messages.
///
/// The session is only written when reconciliation pruned an entry or a
/// message was consumed, so viewing an empty cart stores nothing.
pub async fn view_cart(state: &AppState, session: SessionId) -> AppResult<CartPage> {
    let _guard = state.session_locks.acquire(session).await;
    let mut cart = load_cart(state, session).await?;
    let before = cart.len();
    let lines = price_lines(state.catalog.as_ref(), &mut cart).await?;
    if cart.len() != before {
        save_cart(state, session, &cart).await?;
    }
    let messages = take_messages(state.sessions.as_ref(), session).await?;
    Ok(CartPage::new(lines, messages))
}

/// Queues a flash message for the next cart page.
pub async fn notify(state: &AppState, session: SessionId, message: &str) -> AppResult<()> {
    let _guard = state.session_locks.acquire(session).await;
    push_message(state.sessions.as_ref(), session, message).await?;
    Ok(())
}

/// Resolves every cart entry against the catalog.
///
/// Entries whose product no longer exists are removed from `cart`; the caller
/// is responsible for writing the pruned cart back.
pub async fn price_lines(catalog: &dyn CatalogStore, cart: &mut Cart) -> StoreResult<Vec<CartLine>> {
    if cart.is_empty() {
        return Ok(Vec::new());
    }

    let products: HashMap<ProductId, Product> = catalog
        .products(ProductFilter::with_ids(cart.product_ids()))
        .await?
        .into_iter()
        .map(|product| (product.id, product))
        .collect();

    let pruned = cart.retain_products(|id| products.contains_key(&id));
    if !pruned.is_empty() {
        tracing::warn!(?pruned, "dropping cart entries for products no longer in the catalog");
    }

    let lines = cart
        .iter()
        .filter_map(|(id, quantity)| {
            products
                .get(&id)
                .map(|product| CartLine::new(product.clone(), quantity))
        })
        .collect();
    Ok(lines)
}

pub async fn load_cart(state: &AppState, session: SessionId) -> AppResult<Cart> {
    let cart = load_or_default(state.sessions.as_ref(), session, CART_SESSION_KEY).await?;
    Ok(cart)
}

async fn save_cart(state: &AppState, session: SessionId, cart: &Cart) -> AppResult<()> {
    store_value(state.sessions.as_ref(), session, CART_SESSION_KEY, cart).await?;
    Ok(())
}
