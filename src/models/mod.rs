pub mod currency;
pub mod price_list;
pub mod product_price;
