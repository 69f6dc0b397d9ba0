//! App Router

use salvo::Router;

use crate::{auth, carts, orders, products};

pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("products")
                .get(products::handlers::index::handler)
                .post(products::handlers::create::handler)
                .push(Router::with_path("{uuid}").get(products::handlers::get::handler)),
        )
        .push(
            Router::with_path("cart")
                .get(carts::handlers::get::handler)
                .delete(carts::handlers::clear::handler)
                .push(
                    Router::with_path("items")
                        .post(carts::items::handlers::create::handler)
                        .push(
                            Router::with_path("{product}")
                                .put(carts::items::handlers::update::handler)
                                .delete(carts::items::handlers::delete::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("orders")
                .get(orders::handlers::index::handler)
                .post(orders::handlers::create::handler)
                // Registered before the {uuid} routes so "seller" is
                // never captured as an order id.
                .push(Router::with_path("seller/orders").get(orders::handlers::seller::handler))
                .push(
                    Router::with_path("{uuid}")
                        .get(orders::handlers::get::handler)
                        .push(Router::with_path("pay").put(orders::handlers::pay::handler))
                        .push(Router::with_path("deliver").put(orders::handlers::deliver::handler))
                        .push(Router::with_path("status").put(orders::handlers::status::handler)),
                ),
        )
}
