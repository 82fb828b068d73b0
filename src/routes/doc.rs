use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{ApiKey, ApiKeyValue, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    category_tree::CategoryNode,
    dto::{
        cart::{CartActionResult, CartPage, CartUpdateForm, CartUpdateResult},
        catalog::{CategoryPage, CategoryTreeList, HomePage, ProductList, SearchPage},
    },
    middleware::session::SESSION_COOKIE,
    models::{Category, Product},
    pricing::{CartLine, CartTotals},
    response::{ApiResponse, Meta},
    routes::{cart, catalog, health, sections},
};

struct SessionCookieAddon;

impl Modify for SessionCookieAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE,
                "Issued automatically on the first request",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        catalog::home,
        catalog::search,
        catalog::discounts,
        catalog::latest,
        catalog::category,
        catalog::categories,
        sections::footwear,
        sections::jewellery,
        sections::clothes,
        cart::view_cart,
        cart::add_and_redirect,
        cart::remove_and_redirect,
        cart::add_to_cart,
        cart::remove_from_cart,
        cart::update_cart
    ),
    components(
        schemas(
            Category,
            Product,
            CategoryNode,
            CartLine,
            CartTotals,
            CartPage,
            CartActionResult,
            CartUpdateForm,
            CartUpdateResult,
            HomePage,
            SearchPage,
            CategoryPage,
            CategoryTreeList,
            ProductList,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<CartPage>
        )
    ),
    security(
        ("session_cookie" = [])
    ),
    modifiers(&SessionCookieAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Catalog", description = "Product listing and search endpoints"),
        (name = "Sections", description = "Collection pages spanning a category subtree"),
        (name = "Cart", description = "Session cart endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
