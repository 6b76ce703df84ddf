//! Integration tests for schema reset and the all-or-nothing CSV load.

mod common;

use common::Fixture;
use ecom_pipeline::loader::{load_all, LoadConfig};
use ecom_pipeline::store::{Store, LOAD_ORDER};
use ecom_pipeline::PipelineError;
use std::fs;
use tempfile::TempDir;

fn config_for(dir: &TempDir) -> LoadConfig {
    LoadConfig {
        data_dir: dir.path().to_path_buf(),
        progress: false,
    }
}

fn assert_all_tables_empty(store: &Store) {
    for (table, count) in store.row_counts().unwrap() {
        assert_eq!(count, 0, "{} should be empty", table);
    }
}

// =============================================================================
// Schema reset
// =============================================================================

#[test]
fn test_reset_twice_yields_identical_empty_schema() {
    let dir = TempDir::new().unwrap();
    let store = Store::open(&dir.path().join("shop.duckdb")).unwrap();

    store.reset_schema().unwrap();
    let first = store.describe_schema().unwrap();
    let first_counts = store.row_counts().unwrap();

    store.reset_schema().unwrap();
    let second = store.describe_schema().unwrap();
    let second_counts = store.row_counts().unwrap();

    assert_eq!(first, second);
    assert_eq!(first_counts, second_counts);
    assert_all_tables_empty(&store);
}

#[test]
fn test_reset_after_load_discards_data() {
    let data = Fixture::default().write();
    let mut store = Store::open_in_memory().unwrap();
    load_all(&mut store, &config_for(&data)).unwrap();

    store.reset_schema().unwrap();
    assert_all_tables_empty(&store);
}

// =============================================================================
// Successful loads
// =============================================================================

#[test]
fn test_load_fixture() {
    let data = Fixture::default().write();
    let mut store = Store::open_in_memory().unwrap();

    let stats = load_all(&mut store, &config_for(&data)).unwrap();

    assert_eq!(stats.tables_loaded, 5);
    assert_eq!(stats.rows_inserted, 1 + 4 + 2 + 3 + 2);
    assert_eq!(
        stats.per_table,
        vec![
            ("categories", 1),
            ("users", 4),
            ("products", 2),
            ("orders", 3),
            ("order_items", 2)
        ]
    );
    assert_eq!(
        store.row_counts().unwrap(),
        vec![
            ("categories", 1),
            ("users", 4),
            ("products", 2),
            ("orders", 3),
            ("order_items", 2)
        ]
    );
}

#[test]
fn test_load_casts_values() {
    let data = Fixture::default().write();
    let mut store = Store::open_in_memory().unwrap();
    load_all(&mut store, &config_for(&data)).unwrap();

    let price_cents: i64 = store
        .connection()
        .query_row(
            "SELECT CAST(price * 100 AS BIGINT) FROM products WHERE product_id = 'P002'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(price_cents, 250);

    let quantity: i32 = store
        .connection()
        .query_row(
            "SELECT quantity FROM order_items WHERE order_item_id = 'OI002'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(quantity, 4);
}

#[test]
fn test_reload_replaces_previous_data() {
    let data = Fixture::default().write();
    let mut store = Store::open_in_memory().unwrap();
    load_all(&mut store, &config_for(&data)).unwrap();

    // Second load of the same files must not hit duplicate keys
    let stats = load_all(&mut store, &config_for(&data)).unwrap();
    assert_eq!(stats.rows_inserted, 12);
    assert_eq!(store.row_count(&LOAD_ORDER[1]).unwrap(), 4);
}

#[test]
fn test_load_generated_dataset_into_file_store() {
    let data_dir = TempDir::new().unwrap();
    let dataset = shop_data_gen::Generator::new(shop_data_gen::GeneratorConfig::default())
        .generate()
        .unwrap();
    shop_data_gen::write_dataset(data_dir.path(), &dataset).unwrap();

    let db_dir = TempDir::new().unwrap();
    let db_path = db_dir.path().join("ecommerce.duckdb");
    {
        let mut store = Store::open(&db_path).unwrap();
        let stats = load_all(&mut store, &config_for(&data_dir)).unwrap();
        assert_eq!(stats.rows_inserted, 340);
    }

    // Committed data survives reopening
    let store = Store::open_existing(&db_path).unwrap();
    assert_eq!(
        store.row_counts().unwrap(),
        vec![
            ("categories", 50),
            ("users", 60),
            ("products", 75),
            ("orders", 65),
            ("order_items", 90)
        ]
    );
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_dangling_order_id_aborts_entire_load() {
    let fixture = Fixture {
        order_items: "order_item_id,order_id,product_id,quantity\n\
                      OI001,O001,P001,1\n\
                      OI002,O999,P002,4\n",
        ..Default::default()
    };
    let data = fixture.write();
    let mut store = Store::open_in_memory().unwrap();

    let err = load_all(&mut store, &config_for(&data)).unwrap_err();
    match err {
        PipelineError::ConstraintViolation { table, key, .. } => {
            assert_eq!(table, "order_items");
            assert_eq!(key, "OI002");
        }
        other => panic!("unexpected error: {other}"),
    }

    // The reset was rolled back with the inserts
    assert!(!store.has_schema().unwrap());
}

#[test]
fn test_failed_first_load_leaves_no_schema_in_file_store() {
    let fixture = Fixture {
        order_items: "order_item_id,order_id,product_id,quantity\nOI001,O999,P001,1\n",
        ..Default::default()
    };
    let data = fixture.write();
    let db_dir = TempDir::new().unwrap();
    let db_path = db_dir.path().join("ecommerce.duckdb");

    {
        let mut store = Store::open(&db_path).unwrap();
        assert!(load_all(&mut store, &config_for(&data)).is_err());
    }

    let store = Store::open_existing(&db_path).unwrap();
    assert!(!store.has_schema().unwrap());
}

#[test]
fn test_failed_reload_keeps_previous_data() {
    let good = Fixture::default().write();
    let bad = Fixture {
        order_items: "order_item_id,order_id,product_id,quantity\n\
                      OI001,O001,P001,1\n\
                      OI002,O999,P002,4\n",
        ..Default::default()
    }
    .write();
    let mut store = Store::open_in_memory().unwrap();

    load_all(&mut store, &config_for(&good)).unwrap();
    let before = store.row_counts().unwrap();

    let err = load_all(&mut store, &config_for(&bad)).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::ConstraintViolation {
            table: "order_items",
            ..
        }
    ));
    assert_eq!(store.row_counts().unwrap(), before);
    assert_eq!(store.row_count(&LOAD_ORDER[1]).unwrap(), 4);
}

#[test]
fn test_failed_reload_keeps_previous_data_in_file_store() {
    let good = Fixture::default().write();
    let bad = Fixture {
        categories: "category_id,category_name\nCAT001,Category 1\nCAT001,Again\n",
        ..Default::default()
    }
    .write();
    let db_dir = TempDir::new().unwrap();
    let db_path = db_dir.path().join("ecommerce.duckdb");

    {
        let mut store = Store::open(&db_path).unwrap();
        load_all(&mut store, &config_for(&good)).unwrap();
        assert!(load_all(&mut store, &config_for(&bad)).is_err());
    }

    let store = Store::open_existing(&db_path).unwrap();
    assert_eq!(
        store.row_counts().unwrap(),
        vec![
            ("categories", 1),
            ("users", 4),
            ("products", 2),
            ("orders", 3),
            ("order_items", 2)
        ]
    );
}

#[test]
fn test_duplicate_key_rejected() {
    let fixture = Fixture {
        categories: "category_id,category_name\nCAT001,Category 1\nCAT001,Category 1 again\n",
        ..Default::default()
    };
    let data = fixture.write();
    let mut store = Store::open_in_memory().unwrap();

    let err = load_all(&mut store, &config_for(&data)).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::ConstraintViolation {
            table: "categories",
            ..
        }
    ));
    assert!(!store.has_schema().unwrap());
}

#[test]
fn test_short_row_violates_not_null() {
    let fixture = Fixture {
        users: "user_id,username,email,created_at\nU001,bob,bob@example.com\n",
        orders: "order_id,user_id,order_date,status\n",
        order_items: "order_item_id,order_id,product_id,quantity\n",
        ..Default::default()
    };
    let data = fixture.write();
    let mut store = Store::open_in_memory().unwrap();

    let err = load_all(&mut store, &config_for(&data)).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::ConstraintViolation { table: "users", .. }
    ));
}

#[test]
fn test_zero_quantity_rejected_by_store() {
    let fixture = Fixture {
        order_items: "order_item_id,order_id,product_id,quantity\nOI001,O001,P001,0\n",
        ..Default::default()
    };
    let data = fixture.write();
    let mut store = Store::open_in_memory().unwrap();

    let err = load_all(&mut store, &config_for(&data)).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::ConstraintViolation {
            table: "order_items",
            ..
        }
    ));
    assert!(!store.has_schema().unwrap());
}

#[test]
fn test_unknown_status_rejected_by_store() {
    let fixture = Fixture {
        orders: "order_id,user_id,order_date,status\nO001,U001,2022-05-01 10:00:00,lost\n",
        order_items: "order_item_id,order_id,product_id,quantity\n",
        ..Default::default()
    };
    let data = fixture.write();
    let mut store = Store::open_in_memory().unwrap();

    let err = load_all(&mut store, &config_for(&data)).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::ConstraintViolation { table: "orders", .. }
    ));
}

#[test]
fn test_missing_input_file_leaves_store_untouched() {
    let data = Fixture::default().write();
    fs::remove_file(data.path().join("orders.csv")).unwrap();
    let mut store = Store::open_in_memory().unwrap();

    let err = load_all(&mut store, &config_for(&data)).unwrap_err();
    match &err {
        PipelineError::MissingInputFile { path, .. } => {
            assert!(path.ends_with("orders.csv"));
        }
        other => panic!("unexpected error: {other}"),
    }
    // Files are read before the reset
    assert!(!store.has_schema().unwrap());
}

#[test]
fn test_missing_column_is_schema_mismatch() {
    let fixture = Fixture {
        products: "product_id,name,category_id\nP001,Product 1,CAT001\n",
        ..Default::default()
    };
    let data = fixture.write();
    let mut store = Store::open_in_memory().unwrap();

    let err = load_all(&mut store, &config_for(&data)).unwrap_err();
    match &err {
        PipelineError::SchemaMismatch { path, missing } => {
            assert!(path.ends_with("products.csv"));
            assert_eq!(missing, &vec!["price".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("missing fields: price"));
    assert!(!store.has_schema().unwrap());
}

#[test]
fn test_extra_columns_and_reordered_header_accepted() {
    let fixture = Fixture {
        categories: "category_name,note,category_id\nCategory 1,extra,CAT001\n",
        ..Default::default()
    };
    let data = fixture.write();
    let mut store = Store::open_in_memory().unwrap();

    load_all(&mut store, &config_for(&data)).unwrap();
    let name: String = store
        .connection()
        .query_row(
            "SELECT category_name FROM categories WHERE category_id = 'CAT001'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(name, "Category 1");
}
