//! Order Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Order Model
///
/// Line items and price fields are immutable after creation; only the
/// fulfilment fields (`order_status`, payment, delivery) change later.
#[derive(Debug, Clone)]
pub struct Order {
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    pub items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub items_total: u64,
    pub shipping_price: u64,
    pub tax_price: u64,
    pub total_amount: u64,
    pub order_status: OrderStatus,
    pub is_paid: bool,
    pub paid_at: Option<Timestamp>,
    pub payment_result: Option<PaymentResult>,
    pub is_delivered: bool,
    pub delivered_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order line item: a snapshot of the product at placement time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub title: String,
    pub quantity: u64,
    pub unit_price: u64,
    pub seller_uuid: Uuid,
}

/// New Order Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
}

/// Shipping Address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// Payment confirmation as supplied by the caller. Never verified here;
/// a real gateway integration would replace this input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentConfirmation {
    pub payment_id: Option<String>,
}

/// Recorded payment confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentResult {
    pub id: String,
    pub status: String,
}

/// Order Status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Debug, Error)]
#[error("invalid order status")]
pub struct InvalidOrderStatusError;

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = InvalidOrderStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Pending" => Ok(Self::Pending),
            "Processing" => Ok(Self::Processing),
            "Shipped" => Ok(Self::Shipped),
            "Delivered" => Ok(Self::Delivered),
            "Cancelled" => Ok(Self::Cancelled),
            _ => Err(InvalidOrderStatusError),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment Method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Credit Card")]
    CreditCard,

    #[serde(rename = "Debit Card")]
    DebitCard,

    PayPal,

    #[serde(rename = "Cash on Delivery")]
    CashOnDelivery,
}

#[derive(Debug, Error)]
#[error("invalid payment method")]
pub struct InvalidPaymentMethodError;

impl PaymentMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreditCard => "Credit Card",
            Self::DebitCard => "Debit Card",
            Self::PayPal => "PayPal",
            Self::CashOnDelivery => "Cash on Delivery",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = InvalidPaymentMethodError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Credit Card" => Ok(Self::CreditCard),
            "Debit Card" => Ok(Self::DebitCard),
            "PayPal" => Ok(Self::PayPal),
            "Cash on Delivery" => Ok(Self::CashOnDelivery),
            _ => Err(InvalidPaymentMethodError),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
