use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product_price::{
    NewProductPrice as DomainNewProductPrice, PriceTier as DomainPriceTier,
    ProductPrice as DomainProductPrice,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::product_prices)]
pub struct ProductPrice {
    pub id: i32,
    pub product_id: i32,
    pub price_list_id: i32,
    pub base_price_cents: i64,
    pub sale_price_cents: Option<i64>,
    pub sale_starts_at: Option<NaiveDateTime>,
    pub sale_ends_at: Option<NaiveDateTime>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_prices)]
pub struct NewProductPrice {
    pub product_id: i32,
    pub price_list_id: i32,
    pub base_price_cents: i64,
    pub sale_price_cents: Option<i64>,
    pub sale_starts_at: Option<NaiveDateTime>,
    pub sale_ends_at: Option<NaiveDateTime>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::price_tiers)]
#[diesel(belongs_to(ProductPrice))]
pub struct PriceTier {
    pub id: i32,
    pub product_price_id: i32,
    pub min_quantity: i32,
    pub price_cents: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::price_tiers)]
pub struct NewPriceTier {
    pub product_price_id: i32,
    pub min_quantity: i32,
    pub price_cents: i64,
}

impl From<PriceTier> for DomainPriceTier {
    fn from(value: PriceTier) -> Self {
        Self {
            id: value.id,
            product_price_id: value.product_price_id,
            min_quantity: value.min_quantity,
            price_cents: value.price_cents,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl ProductPrice {
    /// Combine the row with its tier rows into a domain record.
    pub fn into_domain(self, tiers: Vec<PriceTier>) -> DomainProductPrice {
        DomainProductPrice {
            id: self.id,
            product_id: self.product_id,
            price_list_id: self.price_list_id,
            base_price_cents: self.base_price_cents,
            sale_price_cents: self.sale_price_cents,
            sale_starts_at: self.sale_starts_at,
            sale_ends_at: self.sale_ends_at,
            is_active: self.is_active,
            tiers: tiers.into_iter().map(Into::into).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<&DomainNewProductPrice> for NewProductPrice {
    fn from(value: &DomainNewProductPrice) -> Self {
        Self {
            product_id: value.product_id,
            price_list_id: value.price_list_id,
            base_price_cents: value.base_price_cents,
            sale_price_cents: value.sale_price_cents,
            sale_starts_at: value.sale_starts_at,
            sale_ends_at: value.sale_ends_at,
            is_active: value.is_active,
        }
    }
}
