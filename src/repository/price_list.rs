use diesel::prelude::*;

use crate::{
    domain::price_list::{NewPriceList as DomainNewPriceList, PriceList as DomainPriceList},
    models::price_list::{NewPriceList as DbNewPriceList, PriceList as DbPriceList},
    repository::{DieselRepository, PriceListReader, PriceListWriter, errors::RepositoryResult},
};

impl PriceListReader for DieselRepository {
    fn get_price_list_by_id(&self, id: i32) -> RepositoryResult<Option<DomainPriceList>> {
        use crate::schema::price_lists;

        let mut conn = self.conn()?;
        let price_list = price_lists::table
            .filter(price_lists::id.eq(id))
            .first::<DbPriceList>(&mut conn)
            .optional()?;

        Ok(price_list.map(Into::into))
    }

    fn list_price_lists(&self) -> RepositoryResult<Vec<DomainPriceList>> {
        use crate::schema::price_lists;

        let mut conn = self.conn()?;
        let rows = price_lists::table
            .order((price_lists::priority.desc(), price_lists::name.asc()))
            .load::<DbPriceList>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

impl PriceListWriter for DieselRepository {
    fn create_price_list(&self, new_list: &DomainNewPriceList) -> RepositoryResult<DomainPriceList> {
        use crate::schema::price_lists;

        let mut conn = self.conn()?;
        let db_new = DbNewPriceList::from(new_list);

        let created = diesel::insert_into(price_lists::table)
            .values(&db_new)
            .get_result::<DbPriceList>(&mut conn)?;

        Ok(created.into())
    }
}
