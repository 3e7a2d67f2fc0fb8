use diesel::prelude::*;

use storefront_pricing::schema::{currencies, price_lists};

mod common;

#[test]
fn test_harness_migrates_pricing_tables_and_cleans_up() {
    let base = "test_pricing_harness.db";

    {
        let test_db = common::TestDb::new(base);
        let mut conn = test_db.pool().get().expect("pooled connection");

        // Migrations ran: the pricing tables exist and start empty.
        let currency_count: i64 = currencies::table.count().get_result(&mut conn).unwrap();
        assert_eq!(currency_count, 0);
        let list_count: i64 = price_lists::table.count().get_result(&mut conn).unwrap();
        assert_eq!(list_count, 0);
    }

    // Dropping the harness removes the database and its WAL siblings.
    assert!(!std::path::Path::new(base).exists());
    assert!(!std::path::Path::new(&format!("{base}-shm")).exists());
    assert!(!std::path::Path::new(&format!("{base}-wal")).exists());
}
