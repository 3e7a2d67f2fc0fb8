use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::domain::currency::{Currency as DomainCurrency, NewCurrencyRate};
use crate::repository::errors::RepositoryError;

/// Rates are persisted as decimal strings; SQLite has no exact numeric
/// type and floating-point storage would corrupt conversion results.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::currencies)]
pub struct Currency {
    pub id: i32,
    pub code: String,
    pub rate: String,
    pub is_base: bool,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::currencies)]
pub struct NewCurrency<'a> {
    pub code: &'a str,
    pub rate: String,
    pub is_base: bool,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Currency> for DomainCurrency {
    type Error = RepositoryError;

    fn try_from(value: Currency) -> Result<Self, Self::Error> {
        let rate = Decimal::from_str(&value.rate).map_err(|err| {
            RepositoryError::Conversion(format!(
                "currency {} has an unparsable rate {:?}: {err}",
                value.code, value.rate
            ))
        })?;

        Ok(Self {
            id: value.id,
            code: value.code,
            rate,
            is_base: value.is_base,
            updated_at: value.updated_at,
        })
    }
}

impl<'a> From<&'a NewCurrencyRate> for NewCurrency<'a> {
    fn from(value: &'a NewCurrencyRate) -> Self {
        Self {
            code: value.code.as_str(),
            rate: value.rate.to_string(),
            is_base: value.is_base,
            updated_at: value.updated_at,
        }
    }
}
