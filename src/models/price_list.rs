use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::price_list::{NewPriceList as DomainNewPriceList, PriceList as DomainPriceList};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::price_lists)]
pub struct PriceList {
    pub id: i32,
    pub name: String,
    pub currency: String,
    pub customer_group_id: Option<String>,
    pub priority: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::price_lists)]
pub struct NewPriceList<'a> {
    pub name: &'a str,
    pub currency: &'a str,
    pub customer_group_id: Option<&'a str>,
    pub priority: i32,
    pub is_active: bool,
}

impl From<PriceList> for DomainPriceList {
    fn from(value: PriceList) -> Self {
        Self {
            id: value.id,
            name: value.name,
            currency: value.currency,
            customer_group_id: value.customer_group_id,
            priority: value.priority,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewPriceList> for NewPriceList<'a> {
    fn from(value: &'a DomainNewPriceList) -> Self {
        Self {
            name: value.name.as_str(),
            currency: value.currency.as_str(),
            customer_group_id: value.customer_group_id.as_deref(),
            priority: value.priority,
            is_active: value.is_active,
        }
    }
}
