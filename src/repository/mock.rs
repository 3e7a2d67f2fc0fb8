use mockall::mock;

use super::{
    CurrencyReader, CurrencyWriter, PriceListReader, PriceListWriter, ProductPriceReader,
    ProductPriceWriter,
};
use crate::domain::{
    currency::{Currency, NewCurrencyRate},
    price_list::{NewPriceList, PriceList},
    product_price::{NewProductPrice, PriceCandidate, PriceCandidateQuery, ProductPrice},
};
use crate::repository::errors::RepositoryResult;

mock! {
    pub CurrencyReader {}

    impl CurrencyReader for CurrencyReader {
        fn list_currencies(&self) -> RepositoryResult<Vec<Currency>>;
    }
}

mock! {
    pub CurrencyWriter {}

    impl CurrencyWriter for CurrencyWriter {
        fn upsert_rates(&self, rates: &[NewCurrencyRate]) -> RepositoryResult<usize>;
    }
}

mock! {
    pub PriceListReader {}

    impl PriceListReader for PriceListReader {
        fn get_price_list_by_id(&self, id: i32) -> RepositoryResult<Option<PriceList>>;
        fn list_price_lists(&self) -> RepositoryResult<Vec<PriceList>>;
    }
}

mock! {
    pub PriceListWriter {}

    impl PriceListWriter for PriceListWriter {
        fn create_price_list(&self, new_list: &NewPriceList) -> RepositoryResult<PriceList>;
    }
}

mock! {
    pub ProductPriceReader {}

    impl ProductPriceReader for ProductPriceReader {
        fn list_price_candidates(
            &self,
            query: PriceCandidateQuery,
        ) -> RepositoryResult<Vec<PriceCandidate>>;
    }
}

mock! {
    pub ProductPriceWriter {}

    impl ProductPriceWriter for ProductPriceWriter {
        fn create_product_price(&self, new_price: &NewProductPrice) -> RepositoryResult<ProductPrice>;
    }
}
