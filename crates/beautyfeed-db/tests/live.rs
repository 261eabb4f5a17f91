//! Live integration tests for beautyfeed-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness. The `migrations` path is relative to the crate root
//! (`crates/beautyfeed-db/`), so `"../../migrations"` resolves to the
//! workspace migration directory.

use beautyfeed_core::{AttributeValue, CanonicalAttributes, NewCategory, NewProduct};
use beautyfeed_db::{
    count_brands, count_categories, count_products, find_brand_by_name,
    get_category_by_external_id, get_product_by_external_id, insert_brand, link_category_parent,
    upsert_category, upsert_product, DbError,
};
use rust_decimal::Decimal;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn make_category(external_id: &str, name: &str) -> NewCategory {
    NewCategory {
        external_id: external_id.to_string(),
        name: name.to_string(),
        slug: format!("category-{external_id}"),
    }
}

fn make_product(external_id: &str) -> NewProduct {
    let mut attributes = CanonicalAttributes::new();
    attributes.set("Стать", AttributeValue::Single("Жіночий".to_string()));
    attributes.set(
        "Тип шкіри",
        AttributeValue::Multiple(vec!["Суха".to_string(), "Нормальна".to_string()]),
    );

    NewProduct {
        external_id: external_id.to_string(),
        name: "Крем для обличчя".to_string(),
        slug: format!("krem-dlya-oblichchya-{external_id}"),
        description: Some("Зволожуючий крем".to_string()),
        price: Decimal::new(24_950, 2),
        old_price: None,
        currency: "UAH".to_string(),
        in_stock: true,
        brand_id: None,
        category_id: None,
        images: vec![format!("https://cdn.example.com/{external_id}.jpg")],
        attributes,
        vendor_code: Some(format!("VC-{external_id}")),
    }
}

// ---------------------------------------------------------------------------
// Section 1: Brands
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn insert_brand_then_find_by_exact_name(pool: sqlx::PgPool) {
    let inserted = insert_brand(&pool, "Nivea", "nivea-123456")
        .await
        .expect("insert_brand failed");

    let found = find_brand_by_name(&pool, "Nivea")
        .await
        .expect("find_brand_by_name failed")
        .expect("brand should exist");

    assert_eq!(found.id, inserted.id);
    assert_eq!(found.slug, "nivea-123456");
}

#[sqlx::test(migrations = "../../migrations")]
async fn find_brand_by_name_is_case_sensitive(pool: sqlx::PgPool) {
    insert_brand(&pool, "Nivea", "nivea-123456")
        .await
        .expect("insert_brand failed");

    let found = find_brand_by_name(&pool, "NIVEA")
        .await
        .expect("find_brand_by_name failed");

    assert!(found.is_none(), "brand lookup must match case exactly");
}

#[sqlx::test(migrations = "../../migrations")]
async fn insert_brand_rejects_duplicate_name(pool: sqlx::PgPool) {
    insert_brand(&pool, "Nivea", "nivea-111111")
        .await
        .expect("first insert_brand failed");

    let result = insert_brand(&pool, "Nivea", "nivea-222222").await;

    assert!(matches!(result, Err(DbError::Sqlx(_))));
    assert_eq!(count_brands(&pool).await.expect("count failed"), 1);
}

// ---------------------------------------------------------------------------
// Section 2: Categories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn upsert_category_is_idempotent_on_external_id(pool: sqlx::PgPool) {
    let first = upsert_category(&pool, &make_category("1", "Догляд"))
        .await
        .expect("first upsert failed");
    let second = upsert_category(&pool, &make_category("1", "Догляд за шкірою"))
        .await
        .expect("second upsert failed");

    assert_eq!(first, second);
    assert_eq!(count_categories(&pool).await.expect("count failed"), 1);

    let row = get_category_by_external_id(&pool, "1")
        .await
        .expect("get failed")
        .expect("category should exist");
    assert_eq!(row.name, "Догляд за шкірою");
    assert_eq!(row.level, 0);
    assert!(row.parent_id.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn link_category_parent_sets_parent_and_level(pool: sqlx::PgPool) {
    let parent = upsert_category(&pool, &make_category("1", "Догляд"))
        .await
        .expect("parent upsert failed");
    let child = upsert_category(&pool, &make_category("2", "Обличчя"))
        .await
        .expect("child upsert failed");

    link_category_parent(&pool, child, parent, 1)
        .await
        .expect("link failed");

    let row = get_category_by_external_id(&pool, "2")
        .await
        .expect("get failed")
        .expect("category should exist");
    assert_eq!(row.parent_id, Some(parent));
    assert_eq!(row.level, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn upsert_category_clears_previous_parent_link(pool: sqlx::PgPool) {
    let parent = upsert_category(&pool, &make_category("1", "Догляд"))
        .await
        .expect("parent upsert failed");
    let child = upsert_category(&pool, &make_category("2", "Обличчя"))
        .await
        .expect("child upsert failed");
    link_category_parent(&pool, child, parent, 1)
        .await
        .expect("link failed");

    // A later feed lists "2" with a parent that is not in the feed, so the
    // link pass never touches it.
    let again = upsert_category(&pool, &make_category("2", "Обличчя"))
        .await
        .expect("re-upsert failed");

    let row = get_category_by_external_id(&pool, "2")
        .await
        .expect("get failed")
        .expect("category should exist");
    assert_eq!(again, child);
    assert_eq!(row.parent_id, None);
    assert_eq!(row.level, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn link_category_parent_unknown_id_is_not_found(pool: sqlx::PgPool) {
    let parent = upsert_category(&pool, &make_category("1", "Догляд"))
        .await
        .expect("parent upsert failed");

    let result = link_category_parent(&pool, parent + 1000, parent, 1).await;

    assert!(matches!(result, Err(DbError::NotFound)));
}

// ---------------------------------------------------------------------------
// Section 3: Products
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn upsert_product_round_trips_all_columns(pool: sqlx::PgPool) {
    let brand = insert_brand(&pool, "Nivea", "nivea-123456")
        .await
        .expect("insert_brand failed");
    let category = upsert_category(&pool, &make_category("5", "Креми"))
        .await
        .expect("upsert_category failed");

    let mut product = make_product("1001");
    product.brand_id = Some(brand.id);
    product.category_id = Some(category);
    product.old_price = Some(Decimal::new(29_900, 2));

    let id = upsert_product(&pool, &product)
        .await
        .expect("upsert_product failed");

    let row = get_product_by_external_id(&pool, "1001")
        .await
        .expect("get failed")
        .expect("product should exist");

    assert_eq!(row.id, id);
    assert_eq!(row.price, Decimal::new(24_950, 2));
    assert_eq!(row.old_price, Some(Decimal::new(29_900, 2)));
    assert_eq!(row.currency, "UAH");
    assert!(row.in_stock);
    assert_eq!(row.brand_id, Some(brand.id));
    assert_eq!(row.category_id, Some(category));
    assert_eq!(row.images, vec!["https://cdn.example.com/1001.jpg"]);
    assert_eq!(row.attributes["Стать"], "Жіночий");
    assert_eq!(
        row.attributes["Тип шкіри"],
        serde_json::json!(["Суха", "Нормальна"])
    );
    assert_eq!(row.vendor_code.as_deref(), Some("VC-1001"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn upsert_product_twice_updates_single_row(pool: sqlx::PgPool) {
    let first = upsert_product(&pool, &make_product("1001"))
        .await
        .expect("first upsert failed");

    let mut changed = make_product("1001");
    changed.price = Decimal::new(19_900, 2);
    changed.in_stock = false;
    let second = upsert_product(&pool, &changed)
        .await
        .expect("second upsert failed");

    assert_eq!(first, second);
    assert_eq!(count_products(&pool).await.expect("count failed"), 1);

    let row = get_product_by_external_id(&pool, "1001")
        .await
        .expect("get failed")
        .expect("product should exist");
    assert_eq!(row.price, Decimal::new(19_900, 2));
    assert!(!row.in_stock);
    assert!(row.updated_at >= row.created_at);
}

#[sqlx::test(migrations = "../../migrations")]
async fn upsert_product_rejects_negative_price(pool: sqlx::PgPool) {
    let mut product = make_product("1001");
    product.price = Decimal::new(-100, 2);

    let result = upsert_product(&pool, &product).await;

    assert!(matches!(result, Err(DbError::Sqlx(_))));
}

#[sqlx::test(migrations = "../../migrations")]
async fn get_product_by_unknown_external_id_returns_none(pool: sqlx::PgPool) {
    let row = get_product_by_external_id(&pool, "missing")
        .await
        .expect("get failed");
    assert!(row.is_none());
}
