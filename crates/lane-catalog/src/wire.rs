//! # Wire Payloads
//!
//! Serde types matching the Catalog & Pricing Service JSON byte-for-byte.
//! Field names follow the service contract (`prd_id`, `prmid`,
//! `plan_discount`, `emp_cd`, ...), so the domain types in lane-core stay
//! free of wire spelling.
//!
//! All monetary wire fields are plain JSON numbers. Values are integers
//! end-to-end inside the register; formatting for display never happens
//! before serialization, so there is nothing to parse back.

use serde::{Deserialize, Serialize};

use lane_core::{Money, Product, Promotion, Tax, TaxRate};

// =============================================================================
// Product Lookup Payloads
// =============================================================================

/// `GET /prd/{code}` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPayload {
    pub prd_id: String,
    /// Some deployments echo the code back; fall back to the scanned one.
    #[serde(default)]
    pub code: Option<String>,
    pub name: String,
    pub price: i64,
}

impl ProductPayload {
    /// Builds the domain product, keeping the scanned code when the service
    /// did not echo one.
    pub fn into_product(self, scanned_code: &str) -> Product {
        Product {
            product_id: self.prd_id,
            code: self.code.unwrap_or_else(|| scanned_code.to_string()),
            name: self.name,
            unit_price: Money::from_yen(self.price),
        }
    }
}

/// `GET /prd_ex/{code}` response body: product plus optional promotion plan.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductExPayload {
    pub prd_id: String,
    #[serde(default)]
    pub code: Option<String>,
    pub name: String,
    pub price: i64,

    /// Promotion id; empty or absent means no plan is attached.
    #[serde(default)]
    pub prmid: Option<String>,
    #[serde(default)]
    pub plan_name: Option<String>,
    #[serde(default)]
    pub plan_percent: Option<f64>,
    /// Nullable on the wire; a null discount reads as 0.
    #[serde(default)]
    pub plan_discount: Option<i64>,
}

impl ProductExPayload {
    /// Splits into the domain product and its optional promotion.
    ///
    /// A promotion exists exactly when `prmid` is present and non-empty;
    /// `plan_discount: null` becomes a zero discount on a still-present plan.
    pub fn into_parts(self, scanned_code: &str) -> (Product, Option<Promotion>) {
        let product = Product {
            product_id: self.prd_id,
            code: self.code.unwrap_or_else(|| scanned_code.to_string()),
            name: self.name,
            unit_price: Money::from_yen(self.price),
        };

        let promotion = match self.prmid {
            Some(prmid) if !prmid.is_empty() => Some(Promotion {
                promotion_id: prmid,
                plan_name: self.plan_name.unwrap_or_default(),
                discount_amount: Money::from_yen(self.plan_discount.unwrap_or(0)),
                plan_percent: self.plan_percent.unwrap_or(0.0),
            }),
            _ => None,
        };

        (product, promotion)
    }
}

// =============================================================================
// Tax Payload
// =============================================================================

/// `GET /tax` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxPayload {
    #[serde(default)]
    pub id: i64,
    pub code: String,
    pub name: String,
    pub percent: f64,
}

impl From<TaxPayload> for Tax {
    fn from(payload: TaxPayload) -> Self {
        Tax {
            code: payload.code,
            name: payload.name,
            rate: TaxRate::from_percent(payload.percent),
        }
    }
}

// =============================================================================
// Checkout Payloads
// =============================================================================

/// One submitted cart line. `price` is the *effective* unit price and
/// `total_price` the line total, both plain numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutLine {
    #[serde(rename = "prdId")]
    pub prd_id: String,
    pub code: String,
    pub name: String,
    pub price: i64,
    pub quantity: i64,
    #[serde(rename = "totalPrice")]
    pub total_price: i64,
}

/// `POST /checkout` request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub cart: Vec<CheckoutLine>,
    pub emp_cd: String,
    pub store_cd: String,
    pub pos_no: String,
    pub tax_code: String,
    pub tax_percent: f64,
}

/// `POST /checkout` success body: the service's confirmed totals.
///
/// `total_amount` may carry a sub-yen fraction (the service applies the rate
/// in floating point); the register floors it at the receipt boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutResponse {
    pub total_amount: f64,
    pub total_amount_ex_tax: f64,
}

/// Error body shape the service uses for non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorPayload {
    pub detail: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_payload_decodes_service_json() {
        let json = r#"{"prd_id":"P-001","name":"おーいお茶","price":150}"#;
        let payload: ProductPayload = serde_json::from_str(json).unwrap();
        let product = payload.into_product("4901085141434");

        assert_eq!(product.product_id, "P-001");
        assert_eq!(product.code, "4901085141434"); // scanned code kept
        assert_eq!(product.unit_price.yen(), 150);
    }

    #[test]
    fn test_product_ex_with_promotion() {
        let json = r#"{
            "prd_id": "P-002",
            "name": "ソフラン",
            "price": 300,
            "prmid": "PRM-9",
            "plan_name": "spring sale",
            "plan_percent": 10,
            "plan_discount": 30
        }"#;
        let payload: ProductExPayload = serde_json::from_str(json).unwrap();
        let (product, promotion) = payload.into_parts("4903301235118");

        assert_eq!(product.unit_price.yen(), 300);
        let promotion = promotion.unwrap();
        assert_eq!(promotion.promotion_id, "PRM-9");
        assert_eq!(promotion.discount_amount.yen(), 30);
    }

    #[test]
    fn test_product_ex_null_discount_reads_as_zero() {
        let json = r#"{
            "prd_id": "P-003",
            "name": "item",
            "price": 200,
            "prmid": "PRM-1",
            "plan_name": "plan",
            "plan_percent": 0,
            "plan_discount": null
        }"#;
        let payload: ProductExPayload = serde_json::from_str(json).unwrap();
        let (_, promotion) = payload.into_parts("c");

        let promotion = promotion.unwrap();
        assert!(promotion.discount_amount.is_zero());
        assert!(!promotion.discounts());
    }

    #[test]
    fn test_product_ex_empty_prmid_means_no_promotion() {
        let json = r#"{"prd_id":"P-004","name":"item","price":100,"prmid":""}"#;
        let payload: ProductExPayload = serde_json::from_str(json).unwrap();
        let (_, promotion) = payload.into_parts("c");
        assert!(promotion.is_none());

        let json = r#"{"prd_id":"P-005","name":"item","price":100}"#;
        let payload: ProductExPayload = serde_json::from_str(json).unwrap();
        let (_, promotion) = payload.into_parts("c");
        assert!(promotion.is_none());
    }

    #[test]
    fn test_tax_payload_conversion() {
        let json = r#"{"id":1,"code":"01","name":"消費税","percent":10}"#;
        let payload: TaxPayload = serde_json::from_str(json).unwrap();
        let tax: Tax = payload.into();

        assert_eq!(tax.code, "01");
        assert_eq!(tax.rate.bps(), 1000);
    }

    #[test]
    fn test_checkout_request_wire_field_names() {
        let request = CheckoutRequest {
            cart: vec![CheckoutLine {
                prd_id: "P-001".into(),
                code: "C-1".into(),
                name: "item".into(),
                price: 450,
                quantity: 2,
                total_price: 900,
            }],
            emp_cd: "9999999999".into(),
            store_cd: "30".into(),
            pos_no: "90".into(),
            tax_code: "01".into(),
            tax_percent: 10.0,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["cart"][0]["prdId"], "P-001");
        assert_eq!(json["cart"][0]["totalPrice"], 900);
        assert_eq!(json["emp_cd"], "9999999999");
        // numeric fields are plain JSON numbers, not strings
        assert!(json["cart"][0]["price"].is_i64());
        assert!(json["tax_percent"].is_f64());
    }
}
