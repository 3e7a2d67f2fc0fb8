use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Quantity-threshold discount attached to a product price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceTier {
    /// Unique identifier of the tier record.
    pub id: i32,
    /// Owning product price identifier.
    pub product_price_id: i32,
    /// Smallest quantity at which this tier applies.
    pub min_quantity: i32,
    /// Tier price in the smallest currency unit.
    pub price_cents: i64,
    /// Timestamp for when the tier record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the tier record.
    pub updated_at: NaiveDateTime,
}

impl PriceTier {
    /// Tier price as a decimal amount in major units.
    pub fn price(&self) -> Decimal {
        Decimal::new(self.price_cents, 2)
    }
}

/// Domain representation of one product's entry in a price list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductPrice {
    /// Unique identifier of the product price record.
    pub id: i32,
    /// Identifier of the priced product.
    pub product_id: i32,
    /// Owning price list identifier.
    pub price_list_id: i32,
    /// Regular price in the smallest currency unit.
    pub base_price_cents: i64,
    /// Optional sale price in the smallest currency unit.
    pub sale_price_cents: Option<i64>,
    /// Start of the sale window; `None` means unbounded in the past.
    pub sale_starts_at: Option<NaiveDateTime>,
    /// End of the sale window; `None` means unbounded in the future.
    pub sale_ends_at: Option<NaiveDateTime>,
    /// Whether this record participates in price resolution.
    pub is_active: bool,
    /// Quantity tiers ordered by ascending threshold.
    pub tiers: Vec<PriceTier>,
    /// Timestamp for when the record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the record.
    pub updated_at: NaiveDateTime,
}

impl ProductPrice {
    /// Regular price as a decimal amount in major units.
    pub fn base_price(&self) -> Decimal {
        Decimal::new(self.base_price_cents, 2)
    }

    /// Sale price as a decimal amount in major units, when set.
    pub fn sale_price(&self) -> Option<Decimal> {
        self.sale_price_cents.map(|cents| Decimal::new(cents, 2))
    }

    /// Whether a sale price is set and `now` falls inside the sale window.
    /// A missing bound is treated as unbounded on that side.
    pub fn sale_active(&self, now: NaiveDateTime) -> bool {
        if self.sale_price_cents.is_none() {
            return false;
        }
        let after_start = self.sale_starts_at.is_none_or(|start| now >= start);
        let before_end = self.sale_ends_at.is_none_or(|end| now <= end);
        after_start && before_end
    }

    /// The tier with the largest threshold not exceeding `quantity`.
    /// Selection is by threshold only; tier prices are taken as stored.
    pub fn tier_for(&self, quantity: i32) -> Option<&PriceTier> {
        self.tiers
            .iter()
            .filter(|tier| tier.min_quantity <= quantity)
            .max_by_key(|tier| tier.min_quantity)
    }
}

/// Payload required to insert a new product price into a price list.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProductPrice {
    /// Identifier of the priced product.
    pub product_id: i32,
    /// Owning price list identifier.
    pub price_list_id: i32,
    /// Regular price in the smallest currency unit.
    pub base_price_cents: i64,
    /// Optional sale price in the smallest currency unit.
    pub sale_price_cents: Option<i64>,
    /// Start of the sale window, if bounded.
    pub sale_starts_at: Option<NaiveDateTime>,
    /// End of the sale window, if bounded.
    pub sale_ends_at: Option<NaiveDateTime>,
    /// Whether the record participates in price resolution.
    pub is_active: bool,
    /// Quantity tiers to create alongside the price record.
    pub tiers: Vec<NewPriceTier>,
}

impl NewProductPrice {
    /// Construct an active price payload with no sale and no tiers.
    pub fn new(product_id: i32, price_list_id: i32, base_price_cents: i64) -> Self {
        Self {
            product_id,
            price_list_id,
            base_price_cents,
            sale_price_cents: None,
            sale_starts_at: None,
            sale_ends_at: None,
            is_active: true,
            tiers: Vec::new(),
        }
    }

    /// Attach a sale price with an optionally bounded window.
    pub fn with_sale(
        mut self,
        sale_price_cents: i64,
        starts_at: Option<NaiveDateTime>,
        ends_at: Option<NaiveDateTime>,
    ) -> Self {
        self.sale_price_cents = Some(sale_price_cents);
        self.sale_starts_at = starts_at;
        self.sale_ends_at = ends_at;
        self
    }

    /// Attach a quantity tier.
    pub fn with_tier(mut self, min_quantity: i32, price_cents: i64) -> Self {
        self.tiers.push(NewPriceTier {
            min_quantity,
            price_cents,
        });
        self
    }

    /// Mark the record as inactive on creation.
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// Payload for one quantity tier created with a product price.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPriceTier {
    /// Smallest quantity at which the tier applies.
    pub min_quantity: i32,
    /// Tier price in the smallest currency unit.
    pub price_cents: i64,
}

/// Query definition used to load the price candidates for one product.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceCandidateQuery {
    /// Identifier of the product being priced.
    pub product_id: i32,
    /// Customer group of the caller; `None` restricts the query to
    /// general lists.
    pub customer_group_id: Option<String>,
}

impl PriceCandidateQuery {
    /// Construct a query for a caller with no customer group.
    pub fn new(product_id: i32) -> Self {
        Self {
            product_id,
            customer_group_id: None,
        }
    }

    /// Also admit lists scoped to the given customer group.
    pub fn for_customer_group(mut self, group: impl Into<String>) -> Self {
        self.customer_group_id = Some(group.into());
        self
    }
}

/// A product price joined with the pricing attributes of its owning list.
///
/// This is what the candidate query returns: everything the selector and
/// calculator need without going back to the database.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceCandidate {
    /// The product price record, tiers attached.
    pub price: ProductPrice,
    /// Currency the owning list quotes prices in.
    pub currency: String,
    /// Customer group the owning list is scoped to, if any.
    pub customer_group_id: Option<String>,
    /// Priority of the owning list.
    pub priority: i32,
}

impl PriceCandidate {
    /// Whether the owning list targets a specific customer group.
    pub fn is_group_specific(&self) -> bool {
        self.customer_group_id.is_some()
    }
}
