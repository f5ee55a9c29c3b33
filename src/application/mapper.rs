use crate::domain::inbound::{InboundOrder, LineItem, PostalAddress};
use crate::domain::outbound::{OutboundAddress, OutboundItem, OutboundOrder};
use chrono::{DateTime, SecondsFormat, Utc};

/// Joins name parts with a single space. Empty parts are not trimmed, so a
/// missing first name yields a leading space.
fn display_name(first: &str, last: &str) -> String {
    format!("{} {}", first, last)
}

fn map_address(address: &PostalAddress) -> OutboundAddress {
    OutboundAddress {
        name: display_name(&address.first_name, &address.last_name),
        company: address.company.clone(),
        address_line1: address.address1.clone(),
        address_line2: address.address2.clone(),
        city: address.city.clone(),
        state: address.province.clone(),
        postal_code: address.zip.clone(),
        country: address.country.clone(),
        phone: address.phone.clone(),
    }
}

fn map_item(item: &LineItem) -> OutboundItem {
    OutboundItem {
        sku: item.sku.clone(),
        product_name: item.title.clone(),
        quantity: item.quantity,
        unit_price: item.price.clone(),
        variant_title: item.variant_title.clone(),
    }
}

/// Maps an inbound order, stamping it with the current UTC time.
pub fn map(order: &InboundOrder) -> OutboundOrder {
    map_at(order, Utc::now())
}

/// Maps an inbound order, stamping it with `captured_at`.
///
/// Money and status values are copied verbatim. No field is ever dropped.
pub fn map_at(order: &InboundOrder, captured_at: DateTime<Utc>) -> OutboundOrder {
    OutboundOrder {
        order_id: order.id.to_string(),
        order_number: order.order_number.to_string(),
        customer_email: order.email.clone(),
        customer_name: display_name(&order.customer.first_name, &order.customer.last_name),
        customer_phone: order.customer.phone.clone(),
        order_date: order.created_at.clone(),
        total_amount: order.total_price.clone(),
        subtotal_amount: order.subtotal_price.clone(),
        tax_amount: order.total_tax.clone(),
        currency: order.currency.clone(),
        payment_status: order.financial_status.clone(),
        fulfillment_status: order.fulfillment_status.clone(),
        items: order.line_items.iter().map(map_item).collect(),
        shipping_address: map_address(&order.shipping_address),
        billing_address: map_address(&order.billing_address),
        timestamp: captured_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    }
}
