//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use storefront_app::{
    auth::{Identity, MockAuthService, Role},
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            models::{Cart, CartItem},
        },
        orders::{
            MockOrdersService,
            models::{Order, OrderItem, OrderStatus, PaymentMethod, ShippingAddress},
        },
        pagination::{PageRequest, Paginated},
        products::{MockProductsService, models::Product},
    },
};

use crate::state::State;

pub(crate) const TEST_BUYER: Identity = Identity::new(Uuid::from_u128(1), Role::User);
pub(crate) const TEST_SELLER: Identity = Identity::new(Uuid::from_u128(2), Role::Seller);
pub(crate) const TEST_ADMIN: Identity = Identity::new(Uuid::from_u128(3), Role::Admin);

/// Middleware that plants a fixed identity, standing in for the auth
/// middleware in handler tests.
pub(crate) struct InjectIdentity(pub(crate) Identity);

#[salvo::handler]
impl InjectIdentity {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.inject(self.0);
        ctrl.call_next(req, depot, res).await;
    }
}

fn app_context(
    auth: MockAuthService,
    products: MockProductsService,
    carts: MockCartsService,
    orders: MockOrdersService,
) -> AppContext {
    AppContext {
        auth: Arc::new(auth),
        products: Arc::new(products),
        carts: Arc::new(carts),
        orders: Arc::new(orders),
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    Arc::new(State::new(app_context(
        auth,
        MockProductsService::new(),
        MockCartsService::new(),
        MockOrdersService::new(),
    )))
}

pub(crate) fn state_with_products(products: MockProductsService) -> Arc<State> {
    Arc::new(State::new(app_context(
        MockAuthService::new(),
        products,
        MockCartsService::new(),
        MockOrdersService::new(),
    )))
}

pub(crate) fn state_with_carts(carts: MockCartsService) -> Arc<State> {
    Arc::new(State::new(app_context(
        MockAuthService::new(),
        MockProductsService::new(),
        carts,
        MockOrdersService::new(),
    )))
}

pub(crate) fn state_with_orders(orders: MockOrdersService) -> Arc<State> {
    Arc::new(State::new(app_context(
        MockAuthService::new(),
        MockProductsService::new(),
        MockCartsService::new(),
        orders,
    )))
}

/// A service with mocked state and a fixed caller identity.
pub(crate) fn service_as(identity: Identity, state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(InjectIdentity(identity))
            .push(route),
    )
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    service_as(TEST_BUYER, state_with_products(products), route)
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    service_as(TEST_BUYER, state_with_carts(carts), route)
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    service_as(TEST_BUYER, state_with_orders(orders), route)
}

pub(crate) fn make_product(uuid: Uuid) -> Product {
    Product {
        uuid,
        title: "Walnut Desk".to_string(),
        price: 20_00,
        stock: 5,
        is_active: true,
        seller_uuid: TEST_SELLER.user,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_cart(user: Uuid) -> Cart {
    Cart {
        user_uuid: user,
        total_amount: 25_00,
        items: vec![CartItem {
            uuid: Uuid::from_u128(10),
            product_uuid: Uuid::from_u128(11),
            title: "Mug".to_string(),
            quantity: 2,
            price: 12_50,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order(uuid: Uuid, user: Uuid) -> Order {
    Order {
        uuid,
        user_uuid: user,
        items: vec![OrderItem {
            uuid: Uuid::from_u128(20),
            product_uuid: Uuid::from_u128(21),
            title: "Mug".to_string(),
            quantity: 1,
            unit_price: 10_00,
            seller_uuid: TEST_SELLER.user,
        }],
        shipping_address: ShippingAddress {
            street: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "OR".to_string(),
            zip_code: "97477".to_string(),
            country: "USA".to_string(),
        },
        payment_method: PaymentMethod::CreditCard,
        items_total: 10_00,
        shipping_price: 10_00,
        tax_price: 1_00,
        total_amount: 21_00,
        order_status: OrderStatus::Pending,
        is_paid: false,
        paid_at: None,
        payment_result: None,
        is_delivered: false,
        delivered_at: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn one_page<T>(items: Vec<T>, total: u64) -> Paginated<T> {
    Paginated::new(items, PageRequest::default(), total)
}
