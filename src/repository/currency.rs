use diesel::prelude::*;

use crate::{
    domain::currency::{Currency as DomainCurrency, NewCurrencyRate},
    models::currency::{Currency as DbCurrency, NewCurrency as DbNewCurrency},
    repository::{CurrencyReader, CurrencyWriter, DieselRepository, errors::RepositoryResult},
};

impl CurrencyReader for DieselRepository {
    fn list_currencies(&self) -> RepositoryResult<Vec<DomainCurrency>> {
        use crate::schema::currencies;

        let mut conn = self.conn()?;
        let rows = currencies::table
            .order(currencies::code.asc())
            .load::<DbCurrency>(&mut conn)?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}

impl CurrencyWriter for DieselRepository {
    fn upsert_rates(&self, rates: &[NewCurrencyRate]) -> RepositoryResult<usize> {
        use crate::schema::currencies;

        let mut conn = self.conn()?;
        conn.transaction(|conn| {
            let mut written = 0usize;
            for rate in rates {
                let row = DbNewCurrency::from(rate);
                written += diesel::insert_into(currencies::table)
                    .values(&row)
                    .on_conflict(currencies::code)
                    .do_update()
                    .set((
                        currencies::rate.eq(&row.rate),
                        currencies::is_base.eq(row.is_base),
                        currencies::updated_at.eq(row.updated_at),
                    ))
                    .execute(conn)?;
            }
            Ok::<usize, diesel::result::Error>(written)
        })
        .map_err(Into::into)
    }
}
