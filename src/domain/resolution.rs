use rust_decimal::Decimal;
use serde::Serialize;

/// Fully resolved price for one product in the requested currency.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PriceResult {
    /// Identifier of the priced product.
    pub product_id: i32,
    /// Price to charge, rounded to the currency's minor unit.
    pub price: Decimal,
    /// Regular price in the same currency, for strikethrough display.
    pub original_price: Decimal,
    /// ISO 4217 code the amounts are expressed in.
    pub currency: String,
    /// Whether a sale price was applied.
    pub on_sale: bool,
    /// Threshold of the quantity tier that fired, if any.
    pub applied_tier: Option<i32>,
    /// Identifier of the price list the winning record belongs to.
    pub price_list_id: i32,
}

/// Per-product outcome of a batch resolution.
///
/// Batch calls succeed partially: products without an applicable price
/// come back as [`BatchEntry::Unavailable`] next to priced siblings.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchEntry {
    /// The product resolved to a price.
    Priced(PriceResult),
    /// No applicable price record was found for the product.
    Unavailable,
}

impl BatchEntry {
    /// The resolved price, when available.
    pub fn price_result(&self) -> Option<&PriceResult> {
        match self {
            BatchEntry::Priced(result) => Some(result),
            BatchEntry::Unavailable => None,
        }
    }
}
