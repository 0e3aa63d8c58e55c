use catalog_core::db::open_db_in_memory;
use catalog_core::{
    default_products, CatalogError, CatalogService, CatalogState, Product, ProductStore,
    ProductValidationError, SqliteProductStore, StoreLocation,
};
use std::collections::HashSet;

fn memory_service() -> CatalogService<SqliteProductStore> {
    CatalogService::new(SqliteProductStore::new(StoreLocation::Memory))
}

fn product(id: &str, category: &str) -> Product {
    Product {
        id: id.to_string(),
        title: format!("Item {id}"),
        description: "Made to order in the workshop.".to_string(),
        image_url: "https://example.com/item.png".to_string(),
        external_url: "https://example.com/listing".to_string(),
        category: category.to_string(),
        price: 5.0,
    }
}

#[test]
fn empty_store_is_seeded_and_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let location = StoreLocation::File(dir.path().join("catalog.sqlite3"));

    let mut first = CatalogService::new(SqliteProductStore::new(location.clone()));
    assert_eq!(first.state(), CatalogState::Uninitialized);
    assert_eq!(first.load_all(), default_products());
    assert_eq!(first.state(), CatalogState::Loaded);
    drop(first);

    let mut second = CatalogService::new(SqliteProductStore::new(location));
    assert_eq!(second.load_all(), default_products());
    assert_eq!(second.store().get_all().unwrap().len(), 6);
}

#[test]
fn unavailable_store_degrades_to_seed() {
    let dir = tempfile::tempdir().unwrap();
    let location = StoreLocation::File(dir.path().join("no").join("such").join("dir.db"));
    let mut service = CatalogService::new(SqliteProductStore::new(location));

    assert_eq!(service.load_all(), default_products());
    assert_eq!(service.list_categories().len(), 5);

    let err = service.add(product("n", "Garden")).unwrap_err();
    assert!(matches!(err, CatalogError::StorageUnavailable(_)));
}

#[test]
fn add_then_load_includes_product_exactly_once() {
    let mut service = memory_service();
    service.load_all();
    service.add(product("100", "Garden")).unwrap();

    let loaded = service.load_all();
    assert_eq!(loaded.iter().filter(|p| p.id == "100").count(), 1);
    assert_eq!(loaded.len(), 7);
}

#[test]
fn add_duplicate_id_fails_and_leaves_store_unchanged() {
    let mut service = memory_service();
    service.load_all();
    let before = service.store().get_all().unwrap();

    let err = service.add(product("1", "Garden")).unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateId(id) if id == "1"));
    assert_eq!(service.store().get_all().unwrap(), before);
    assert_eq!(service.products(), before);
}

#[test]
fn add_invalid_product_is_rejected() {
    let mut service = memory_service();
    service.load_all();
    let mut invalid = product("101", "Garden");
    invalid.id = String::new();

    let err = service.add(invalid).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::InvalidProduct(ProductValidationError::EmptyId)
    ));
}

#[test]
fn update_missing_id_fails_and_leaves_store_unchanged() {
    let mut service = memory_service();
    service.load_all();
    let before = service.store().get_all().unwrap();

    let err = service.update(product("missing", "Garden")).unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(id) if id == "missing"));
    assert_eq!(service.store().get_all().unwrap(), before);
}

#[test]
fn update_replaces_full_record() {
    let mut service = memory_service();
    service.load_all();
    service.add(product("200", "Garden")).unwrap();

    let mut edited = product("200", "Outdoor");
    edited.title = "Weatherproof Planter".to_string();
    edited.price = 42.0;
    service.update(edited.clone()).unwrap();

    let loaded = service.load_all();
    let stored: Vec<&Product> = loaded.iter().filter(|p| p.id == "200").collect();
    assert_eq!(stored, vec![&edited]);
    assert_eq!(service.get("200"), Some(edited));
}

#[test]
fn remove_is_idempotent() {
    let mut once = memory_service();
    once.load_all();
    once.remove("3").unwrap();

    let mut twice = memory_service();
    twice.load_all();
    twice.remove("3").unwrap();
    twice.remove("3").unwrap();

    assert_eq!(once.load_all(), twice.load_all());
    assert_eq!(twice.products().len(), 5);
    assert!(twice.get("3").is_none());
}

#[test]
fn removing_every_product_reseeds_on_next_load() {
    let mut service = memory_service();
    for product in service.load_all() {
        service.remove(&product.id).unwrap();
    }
    assert!(service.products().is_empty());

    assert_eq!(service.load_all(), default_products());
}

#[test]
fn categories_follow_cache_changes_in_first_seen_order() {
    let mut service = memory_service();
    service.load_all();
    assert_eq!(
        service.list_categories(),
        vec!["Home", "Accessories", "Clothing", "Kitchen", "Art"]
    );

    service.add(product("300", "Garden")).unwrap();
    service.add(product("301", "Home")).unwrap();
    service.remove("3").unwrap();

    let categories = service.list_categories();
    assert_eq!(categories, vec!["Home", "Clothing", "Kitchen", "Art", "Garden"]);
    let unique: HashSet<&String> = categories.iter().collect();
    assert_eq!(unique.len(), categories.len());
}

#[test]
fn filter_by_category_applies_all_sentinel_and_exact_match() {
    let mut service = memory_service();
    service.load_all();

    assert_eq!(service.filter_by_category("all").len(), 6);

    let home = service.filter_by_category("Home");
    let ids: Vec<&str> = home.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);

    assert!(service.filter_by_category("HOME").is_empty());
}

#[test]
fn reset_to_defaults_restores_seed_catalog() {
    let mut service = memory_service();
    service.load_all();
    service.add(product("400", "Garden")).unwrap();
    service.remove("1").unwrap();

    assert_eq!(service.reset_to_defaults().unwrap(), default_products());
    assert_eq!(service.store().get_all().unwrap(), default_products());
}

#[test]
fn unparsable_row_can_be_removed_and_real_contents_reload() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO products (id, title, description, image_url, external_url, category, price)
         VALUES ('a', 'Oak Stool', 'Three-legged oak stool.', 'https://x.test/a.png', 'https://x.test/a', 'Home', 80.0),
                ('x', 'Rug', 'Wool rug woven by hand.', 'nope', 'https://x.test/x', 'Home', 3.0);",
        [],
    )
    .unwrap();
    let mut service =
        CatalogService::new(SqliteProductStore::from_connection(StoreLocation::Memory, conn));

    assert_eq!(service.load_all(), default_products());
    assert_eq!(service.state(), CatalogState::Uninitialized);

    service.remove("x").unwrap();

    let loaded = service.load_all();
    assert_eq!(service.state(), CatalogState::Loaded);
    let ids: Vec<&str> = loaded.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["a"]);
}
