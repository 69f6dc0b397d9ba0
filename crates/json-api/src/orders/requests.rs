//! Order request bodies.

use serde::{Deserialize, Serialize};

use storefront_app::domain::orders::models::{NewOrder, PaymentMethod, ShippingAddress};

use crate::responses::FieldError;

/// Place Order Request
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlaceOrderRequest {
    #[serde(default)]
    pub shipping_address: ShippingAddressBody,

    #[serde(default)]
    pub payment_method: String,
}

/// Shipping Address body
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShippingAddressBody {
    #[serde(default)]
    pub street: String,

    #[serde(default)]
    pub city: String,

    #[serde(default)]
    pub state: String,

    #[serde(default)]
    pub zip_code: String,

    #[serde(default)]
    pub country: String,
}

impl PlaceOrderRequest {
    /// Field-level validation mirroring the REST contract: every blank
    /// address field is reported, and the payment method must be one of
    /// the enumerated values.
    pub(crate) fn validate(self) -> Result<NewOrder, Vec<FieldError>> {
        let mut errors = Vec::new();

        let address = &self.shipping_address;

        for (field, value, message) in [
            ("shippingAddress.street", &address.street, "Street address is required"),
            ("shippingAddress.city", &address.city, "City is required"),
            ("shippingAddress.state", &address.state, "State is required"),
            ("shippingAddress.zipCode", &address.zip_code, "Zip code is required"),
            ("shippingAddress.country", &address.country, "Country is required"),
        ] {
            if value.trim().is_empty() {
                errors.push(FieldError::new(field, message));
            }
        }

        let payment_method = match self.payment_method.parse::<PaymentMethod>() {
            Ok(method) => Some(method),
            Err(_invalid) => {
                errors.push(FieldError::new("paymentMethod", "Invalid payment method"));

                None
            }
        };

        match (payment_method, errors.is_empty()) {
            (Some(payment_method), true) => Ok(NewOrder {
                shipping_address: ShippingAddress {
                    street: self.shipping_address.street,
                    city: self.shipping_address.city,
                    state: self.shipping_address.state,
                    zip_code: self.shipping_address.zip_code,
                    country: self.shipping_address.country,
                },
                payment_method,
            }),
            _ => Err(errors),
        }
    }
}

/// Pay Order Request
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PayOrderRequest {
    #[serde(default)]
    pub payment_id: Option<String>,
}

/// Set Order Status Request
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct SetStatusRequest {
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> PlaceOrderRequest {
        PlaceOrderRequest {
            shipping_address: ShippingAddressBody {
                street: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                state: "OR".to_string(),
                zip_code: "97477".to_string(),
                country: "USA".to_string(),
            },
            payment_method: "PayPal".to_string(),
        }
    }

    #[test]
    fn valid_request_converts_to_new_order() {
        let order = valid_request().validate().expect("request should validate");

        assert_eq!(order.payment_method, PaymentMethod::PayPal);
        assert_eq!(order.shipping_address.street, "1 Main St");
    }

    #[test]
    fn blank_fields_are_each_reported() {
        let request = PlaceOrderRequest {
            payment_method: "PayPal".to_string(),
            ..PlaceOrderRequest::default()
        };

        let errors = request.validate().expect_err("blank address should fail");

        assert_eq!(errors.len(), 5);
        assert!(errors.iter().any(|e| e.field == "shippingAddress.street"));
        assert!(errors.iter().any(|e| e.field == "shippingAddress.zipCode"));
    }

    #[test]
    fn unknown_payment_method_is_reported() {
        let request = PlaceOrderRequest {
            payment_method: "Barter".to_string(),
            ..valid_request()
        };

        let errors = request.validate().expect_err("bad method should fail");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().map(|e| e.field.as_str()), Some("paymentMethod"));
    }

    #[test]
    fn whitespace_only_fields_count_as_blank() {
        let mut request = valid_request();

        request.shipping_address.city = "   ".to_string();

        let errors = request.validate().expect_err("blank city should fail");

        assert!(errors.iter().any(|e| e.field == "shippingAddress.city"));
    }
}
