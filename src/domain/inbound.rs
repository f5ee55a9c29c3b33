use serde::{Deserialize, Deserializer};

/// Treats an explicit JSON `null` the same as an absent field.
///
/// Shopify sends `null` for unset strings and objects (e.g. `fulfillment_status`
/// on unfulfilled orders), and those must map to the zero value rather than
/// fail the parse.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// An order as delivered by the commerce platform's order webhook.
///
/// Money fields are kept as the decimal strings the platform sends.
#[derive(Debug, Deserialize, PartialEq, Clone, Default)]
#[serde(default)]
pub struct InboundOrder {
    #[serde(deserialize_with = "nullable")]
    pub id: i64,
    #[serde(deserialize_with = "nullable")]
    pub order_number: i64,
    #[serde(deserialize_with = "nullable")]
    pub email: String,
    #[serde(deserialize_with = "nullable")]
    pub created_at: String,
    #[serde(deserialize_with = "nullable")]
    pub updated_at: String,
    #[serde(deserialize_with = "nullable")]
    pub total_price: String,
    #[serde(deserialize_with = "nullable")]
    pub subtotal_price: String,
    #[serde(deserialize_with = "nullable")]
    pub total_tax: String,
    #[serde(deserialize_with = "nullable")]
    pub currency: String,
    #[serde(deserialize_with = "nullable")]
    pub financial_status: String,
    #[serde(deserialize_with = "nullable")]
    pub fulfillment_status: String,
    #[serde(deserialize_with = "nullable")]
    pub customer: Customer,
    #[serde(deserialize_with = "nullable")]
    pub line_items: Vec<LineItem>,
    #[serde(deserialize_with = "nullable")]
    pub shipping_address: PostalAddress,
    #[serde(deserialize_with = "nullable")]
    pub billing_address: PostalAddress,
}

impl InboundOrder {
    /// Parses a raw webhook body. Only structural validity is checked.
    ///
    /// A bare `null` body yields the empty order.
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice::<Option<Self>>(body).map(Option::unwrap_or_default)
    }
}

#[derive(Debug, Deserialize, PartialEq, Clone, Default)]
#[serde(default)]
pub struct Customer {
    #[serde(deserialize_with = "nullable")]
    pub id: i64,
    #[serde(deserialize_with = "nullable")]
    pub email: String,
    #[serde(deserialize_with = "nullable")]
    pub first_name: String,
    #[serde(deserialize_with = "nullable")]
    pub last_name: String,
    #[serde(deserialize_with = "nullable")]
    pub phone: String,
}

#[derive(Debug, Deserialize, PartialEq, Clone, Default)]
#[serde(default)]
pub struct LineItem {
    #[serde(deserialize_with = "nullable")]
    pub id: i64,
    #[serde(deserialize_with = "nullable")]
    pub product_id: i64,
    #[serde(deserialize_with = "nullable")]
    pub variant_id: i64,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub quantity: u32,
    #[serde(deserialize_with = "nullable")]
    pub price: String,
    #[serde(deserialize_with = "nullable")]
    pub sku: String,
    #[serde(deserialize_with = "nullable")]
    pub variant_title: String,
    #[serde(deserialize_with = "nullable")]
    pub fulfillment_service: String,
}

#[derive(Debug, Deserialize, PartialEq, Clone, Default)]
#[serde(default)]
pub struct PostalAddress {
    #[serde(deserialize_with = "nullable")]
    pub first_name: String,
    #[serde(deserialize_with = "nullable")]
    pub last_name: String,
    #[serde(deserialize_with = "nullable")]
    pub company: String,
    #[serde(deserialize_with = "nullable")]
    pub address1: String,
    #[serde(deserialize_with = "nullable")]
    pub address2: String,
    #[serde(deserialize_with = "nullable")]
    pub city: String,
    #[serde(deserialize_with = "nullable")]
    pub province: String,
    #[serde(deserialize_with = "nullable")]
    pub country: String,
    #[serde(deserialize_with = "nullable")]
    pub zip: String,
    #[serde(deserialize_with = "nullable")]
    pub phone: String,
    #[serde(deserialize_with = "nullable")]
    pub province_code: String,
    #[serde(deserialize_with = "nullable")]
    pub country_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_order() {
        let body = br#"{"id": 12345, "order_number": 1001, "total_price": "150.00",
            "line_items": [{"sku": "TEST-SKU-001", "quantity": 2, "price": "65.00"}]}"#;

        let order = InboundOrder::from_slice(body).expect("Failed to parse order");

        assert_eq!(order.id, 12345);
        assert_eq!(order.order_number, 1001);
        assert_eq!(order.total_price, "150.00");
        assert_eq!(order.line_items.len(), 1);
        assert_eq!(order.line_items[0].quantity, 2);
        assert_eq!(order.customer, Customer::default());
        assert_eq!(order.shipping_address, PostalAddress::default());
    }

    #[test]
    fn test_null_fields_become_defaults() {
        let body = br#"{"id": 1, "fulfillment_status": null, "customer": null,
            "billing_address": null, "line_items": null}"#;

        let order = InboundOrder::from_slice(body).unwrap();

        assert_eq!(order.fulfillment_status, "");
        assert_eq!(order.customer, Customer::default());
        assert_eq!(order.billing_address, PostalAddress::default());
        assert!(order.line_items.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let body = br#"{"id": 7, "tags": "vip", "note_attributes": []}"#;
        let order = InboundOrder::from_slice(body).unwrap();
        assert_eq!(order.id, 7);
    }

    #[test]
    fn test_null_body_is_empty_order() {
        assert_eq!(InboundOrder::from_slice(b"null").unwrap(), InboundOrder::default());
        assert_eq!(InboundOrder::from_slice(b" null ").unwrap(), InboundOrder::default());
    }

    #[test]
    fn test_malformed_body_is_rejected() {
        assert!(InboundOrder::from_slice(b"{not json").is_err());
        assert!(InboundOrder::from_slice(br#"{"id": "abc"}"#).is_err());
        assert!(InboundOrder::from_slice(br#"{"line_items": [{"quantity": -1}]}"#).is_err());
        assert!(InboundOrder::from_slice(b"").is_err());
    }
}
