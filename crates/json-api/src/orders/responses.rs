//! Order response bodies.

use std::string::ToString;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::models::{Order, OrderItem, PaymentResult, ShippingAddress};

/// Order Response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    pub items: Vec<OrderItemResponse>,
    pub shipping_address: ShippingAddressResponse,
    pub payment_method: String,

    /// All price fields are integer cents
    pub items_total: u64,
    pub shipping_price: u64,
    pub tax_price: u64,
    pub total_amount: u64,

    pub order_status: String,
    pub is_paid: bool,
    pub paid_at: Option<String>,
    pub payment_result: Option<PaymentResultResponse>,
    pub is_delivered: bool,
    pub delivered_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            uuid: order.uuid,
            user_uuid: order.user_uuid,
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
            shipping_address: order.shipping_address.into(),
            payment_method: order.payment_method.as_str().to_string(),
            items_total: order.items_total,
            shipping_price: order.shipping_price,
            tax_price: order.tax_price,
            total_amount: order.total_amount,
            order_status: order.order_status.as_str().to_string(),
            is_paid: order.is_paid,
            paid_at: order.paid_at.as_ref().map(ToString::to_string),
            payment_result: order.payment_result.map(PaymentResultResponse::from),
            is_delivered: order.is_delivered,
            delivered_at: order.delivered_at.as_ref().map(ToString::to_string),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub title: String,
    pub quantity: u64,

    /// Unit price captured at placement time, in cents
    pub unit_price: u64,

    pub seller_uuid: Uuid,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            uuid: item.uuid,
            product_uuid: item.product_uuid,
            title: item.title,
            quantity: item.quantity,
            unit_price: item.unit_price,
            seller_uuid: item.seller_uuid,
        }
    }
}

/// Shipping Address Response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShippingAddressResponse {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl From<ShippingAddress> for ShippingAddressResponse {
    fn from(address: ShippingAddress) -> Self {
        Self {
            street: address.street,
            city: address.city,
            state: address.state,
            zip_code: address.zip_code,
            country: address.country,
        }
    }
}

/// Payment Result Response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaymentResultResponse {
    pub id: String,
    pub status: String,
}

impl From<PaymentResult> for PaymentResultResponse {
    fn from(payment: PaymentResult) -> Self {
        Self {
            id: payment.id,
            status: payment.status,
        }
    }
}
