use std::collections::HashMap;

use diesel::prelude::*;

use crate::{
    domain::product_price::{
        NewProductPrice as DomainNewProductPrice, PriceCandidate, PriceCandidateQuery,
        ProductPrice as DomainProductPrice,
    },
    models::price_list::PriceList as DbPriceList,
    models::product_price::{
        NewPriceTier as DbNewPriceTier, NewProductPrice as DbNewProductPrice,
        PriceTier as DbPriceTier, ProductPrice as DbProductPrice,
    },
    repository::{
        DieselRepository, ProductPriceReader, ProductPriceWriter, errors::RepositoryResult,
    },
};

impl ProductPriceReader for DieselRepository {
    fn list_price_candidates(
        &self,
        query: PriceCandidateQuery,
    ) -> RepositoryResult<Vec<PriceCandidate>> {
        use crate::schema::{price_lists, price_tiers, product_prices};

        let mut conn = self.conn()?;

        let mut stmt = product_prices::table
            .inner_join(price_lists::table)
            .filter(product_prices::product_id.eq(query.product_id))
            .filter(product_prices::is_active.eq(true))
            .filter(price_lists::is_active.eq(true))
            .into_boxed::<diesel::sqlite::Sqlite>();

        stmt = match query.customer_group_id {
            Some(group) => stmt.filter(
                price_lists::customer_group_id
                    .is_null()
                    .or(price_lists::customer_group_id.eq(group)),
            ),
            None => stmt.filter(price_lists::customer_group_id.is_null()),
        };

        let rows = stmt
            .select((DbProductPrice::as_select(), DbPriceList::as_select()))
            .load::<(DbProductPrice, DbPriceList)>(&mut conn)?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let price_ids: Vec<i32> = rows.iter().map(|(price, _)| price.id).collect();
        let tier_rows = price_tiers::table
            .filter(price_tiers::product_price_id.eq_any(&price_ids))
            .order(price_tiers::min_quantity.asc())
            .load::<DbPriceTier>(&mut conn)?;

        let mut tiers_by_price: HashMap<i32, Vec<DbPriceTier>> = HashMap::new();
        for tier in tier_rows {
            tiers_by_price
                .entry(tier.product_price_id)
                .or_default()
                .push(tier);
        }

        let candidates = rows
            .into_iter()
            .map(|(price, list)| {
                let tiers = tiers_by_price.remove(&price.id).unwrap_or_default();
                PriceCandidate {
                    price: price.into_domain(tiers),
                    currency: list.currency,
                    customer_group_id: list.customer_group_id,
                    priority: list.priority,
                }
            })
            .collect();

        Ok(candidates)
    }
}

impl ProductPriceWriter for DieselRepository {
    fn create_product_price(
        &self,
        new_price: &DomainNewProductPrice,
    ) -> RepositoryResult<DomainProductPrice> {
        use crate::schema::{price_tiers, product_prices};

        let mut conn = self.conn()?;
        conn.transaction(|conn| {
            let db_new = DbNewProductPrice::from(new_price);

            let created = diesel::insert_into(product_prices::table)
                .values(&db_new)
                .get_result::<DbProductPrice>(conn)?;

            if !new_price.tiers.is_empty() {
                let tier_rows: Vec<DbNewPriceTier> = new_price
                    .tiers
                    .iter()
                    .map(|tier| DbNewPriceTier {
                        product_price_id: created.id,
                        min_quantity: tier.min_quantity,
                        price_cents: tier.price_cents,
                    })
                    .collect();

                diesel::insert_into(price_tiers::table)
                    .values(&tier_rows)
                    .execute(conn)?;
            }

            let tiers = price_tiers::table
                .filter(price_tiers::product_price_id.eq(created.id))
                .order(price_tiers::min_quantity.asc())
                .load::<DbPriceTier>(conn)?;

            Ok::<DomainProductPrice, diesel::result::Error>(created.into_domain(tiers))
        })
        .map_err(Into::into)
    }
}
