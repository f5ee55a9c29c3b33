use crate::domain::outbound::{OutboundAddress, OutboundItem, OutboundOrder};
use std::borrow::Cow;

pub const SOAP_NAMESPACE: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const SERVICE_NAMESPACE: &str = "http://tempuri.org/";

/// Escapes text for embedding in XML element content or attribute values.
///
/// Covers `& < > ' "`, matching the entity forms the ERP service has been
/// accepting (`&#39;` and `&#34;` for the quotes).
pub fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '\'', '"']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&#39;"),
            '"' => escaped.push_str("&#34;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Line-oriented builder: two spaces per nesting level, `\n` between lines,
/// no trailing newline.
struct EnvelopeWriter {
    out: String,
}

impl EnvelopeWriter {
    fn new() -> Self {
        Self {
            out: String::with_capacity(4096),
        }
    }

    fn line(&mut self, depth: usize, text: &str) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        for _ in 0..depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
    }

    fn field(&mut self, depth: usize, name: &str, value: &str) {
        let text = format!("<tem:{name}>{}</tem:{name}>", escape(value));
        self.line(depth, &text);
    }

    fn address(&mut self, depth: usize, name: &str, address: &OutboundAddress) {
        self.line(depth, &format!("<tem:{name}>"));
        let depth = depth + 1;
        self.field(depth, "Name", &address.name);
        self.field(depth, "Company", &address.company);
        self.field(depth, "AddressLine1", &address.address_line1);
        self.field(depth, "AddressLine2", &address.address_line2);
        self.field(depth, "City", &address.city);
        self.field(depth, "State", &address.state);
        self.field(depth, "PostalCode", &address.postal_code);
        self.field(depth, "Country", &address.country);
        self.field(depth, "Phone", &address.phone);
        self.line(depth - 1, &format!("</tem:{name}>"));
    }

    fn item(&mut self, depth: usize, item: &OutboundItem) {
        self.line(depth, "<tem:Item>");
        self.field(depth + 1, "SKU", &item.sku);
        self.field(depth + 1, "ProductName", &item.product_name);
        self.field(depth + 1, "Quantity", &item.quantity.to_string());
        self.field(depth + 1, "UnitPrice", &item.unit_price);
        self.field(depth + 1, "VariantTitle", &item.variant_title);
        self.line(depth, "</tem:Item>");
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Serialises an outbound order as a `CreateOrder` SOAP 1.1 request.
///
/// The layout (element order, nesting and indentation) is fixed by the ERP
/// service contract. The order's own `timestamp` is embedded as is, so equal
/// orders always encode to identical bytes.
pub fn encode(order: &OutboundOrder) -> String {
    let mut w = EnvelopeWriter::new();
    w.line(0, r#"<?xml version="1.0" encoding="utf-8"?>"#);
    w.line(0, &format!(r#"<soap:Envelope xmlns:soap="{SOAP_NAMESPACE}" "#));
    w.line(0, &format!(r#"               xmlns:tem="{SERVICE_NAMESPACE}">"#));
    w.line(1, "<soap:Header/>");
    w.line(1, "<soap:Body>");
    w.line(2, "<tem:CreateOrder>");
    w.line(3, "<tem:order>");

    w.field(4, "OrderID", &order.order_id);
    w.field(4, "OrderNumber", &order.order_number);
    w.field(4, "CustomerEmail", &order.customer_email);
    w.field(4, "CustomerName", &order.customer_name);
    w.field(4, "CustomerPhone", &order.customer_phone);
    w.field(4, "OrderDate", &order.order_date);
    w.field(4, "TotalAmount", &order.total_amount);
    w.field(4, "SubtotalAmount", &order.subtotal_amount);
    w.field(4, "TaxAmount", &order.tax_amount);
    w.field(4, "Currency", &order.currency);
    w.field(4, "PaymentStatus", &order.payment_status);
    w.field(4, "FulfillmentStatus", &order.fulfillment_status);
    w.address(4, "ShippingAddress", &order.shipping_address);
    w.address(4, "BillingAddress", &order.billing_address);

    w.line(4, "<tem:Items>");
    for item in &order.items {
        w.item(5, item);
    }
    w.line(4, "</tem:Items>");
    w.field(4, "Timestamp", &order.timestamp);

    w.line(3, "</tem:order>");
    w.line(2, "</tem:CreateOrder>");
    w.line(1, "</soap:Body>");
    w.line(0, "</soap:Envelope>");
    w.finish()
}
