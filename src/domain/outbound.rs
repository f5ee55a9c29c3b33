use serde::Serialize;

/// The ERP's view of an order.
///
/// Every field is always present. Values the inbound order did not carry are
/// empty strings, so the encoded envelope has the same shape for every order.
#[derive(Debug, Serialize, PartialEq, Clone, Default)]
pub struct OutboundOrder {
    pub order_id: String,
    pub order_number: String,
    pub customer_email: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub order_date: String,
    pub total_amount: String,
    pub subtotal_amount: String,
    pub tax_amount: String,
    pub currency: String,
    pub payment_status: String,
    pub fulfillment_status: String,
    pub items: Vec<OutboundItem>,
    pub shipping_address: OutboundAddress,
    pub billing_address: OutboundAddress,
    /// RFC 3339 UTC time at which the order was transformed.
    pub timestamp: String,
}

#[derive(Debug, Serialize, PartialEq, Clone, Default)]
pub struct OutboundItem {
    pub sku: String,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub variant_title: String,
}

#[derive(Debug, Serialize, PartialEq, Clone, Default)]
pub struct OutboundAddress {
    pub name: String,
    pub company: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
}
