use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Domain representation of a price list.
///
/// A price list scopes a set of per-product prices to one currency and,
/// optionally, to one customer group. When several lists carry a price for
/// the same product, `priority` breaks the conflict within a specificity
/// tier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceList {
    /// Unique identifier of the price list.
    pub id: i32,
    /// Human-readable name of the price list.
    pub name: String,
    /// ISO 4217 code of the currency all prices in this list are quoted in.
    pub currency: String,
    /// Customer group this list applies to, `None` meaning all customers.
    pub customer_group_id: Option<String>,
    /// Conflict-resolution priority; higher wins.
    pub priority: i32,
    /// Whether the list participates in price resolution.
    pub is_active: bool,
    /// Timestamp for when the price list record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the price list record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new price list.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPriceList {
    /// Human-readable name of the price list.
    pub name: String,
    /// ISO 4217 code of the list currency.
    pub currency: String,
    /// Customer group the list is scoped to, if any.
    pub customer_group_id: Option<String>,
    /// Conflict-resolution priority; higher wins.
    pub priority: i32,
    /// Whether the list participates in price resolution.
    pub is_active: bool,
}

impl NewPriceList {
    /// Construct a new general-purpose price list payload.
    pub fn new(name: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            currency: currency.into().trim().to_uppercase(),
            customer_group_id: None,
            priority: 0,
            is_active: true,
        }
    }

    /// Scope the list to a customer group.
    pub fn for_customer_group(mut self, group: impl Into<String>) -> Self {
        self.customer_group_id = Some(group.into());
        self
    }

    /// Set the conflict-resolution priority.
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Mark the list as inactive on creation.
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}
