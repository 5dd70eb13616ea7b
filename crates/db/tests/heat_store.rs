//! Integration tests for the Heat Store.
//!
//! Exercises `HeatRepo` against a real database: defaults on insert,
//! uniqueness, replacement updates, ordering and lookups.

use assert_matches::assert_matches;
use heatlog_core::heat::HeatRef;
use heatlog_db::models::heat::{CreateHeat, UpdateHeat};
use heatlog_db::repositories::HeatRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_heat(number: &str) -> CreateHeat {
    CreateHeat {
        heat_number: number.to_string(),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bootstrap_health_check(pool: PgPool) {
    heatlog_db::health_check(&pool).await.unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_applies_defaults(pool: PgPool) {
    let input = CreateHeat {
        customer: Some("Acme".into()),
        ..new_heat("A1234567")
    };
    let heat = HeatRepo::create(&pool, &input).await.unwrap();

    assert!(heat.id > 0);
    assert_eq!(heat.heat_number, "A1234567");
    assert_eq!(heat.customer, "Acme");
    assert_eq!(heat.alloy, "");
    assert_eq!(heat.diameter, None);
    assert_eq!(heat.length, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_then_read_back(pool: PgPool) {
    let input = CreateHeat {
        heat_number: "A7654321".into(),
        customer: Some("Forge Co".into()),
        alloy: Some("Ti-6Al-4V".into()),
        diameter: Some(152.4),
        length: Some(4200.0),
    };
    HeatRepo::create(&pool, &input).await.unwrap();

    let heat = HeatRepo::find_by_number(&pool, "A7654321")
        .await
        .unwrap()
        .expect("heat should exist");
    assert_eq!(heat.customer, "Forge Co");
    assert_eq!(heat.alloy, "Ti-6Al-4V");
    assert_eq!(heat.diameter, Some(152.4));
    assert_eq!(heat.length, Some(4200.0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_heat_number_violates_unique_constraint(pool: PgPool) {
    HeatRepo::create(&pool, &new_heat("A1111111")).await.unwrap();
    let err = HeatRepo::create(&pool, &new_heat("A1111111"))
        .await
        .unwrap_err();

    assert_matches!(&err, sqlx::Error::Database(db_err) => {
        assert_eq!(db_err.code().as_deref(), Some("23505"));
        assert_eq!(db_err.constraint(), Some("uq_heats_heat_number"));
    });
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_heat_number_rejected_by_check_constraint(pool: PgPool) {
    let result = HeatRepo::create(&pool, &new_heat("B1234567")).await;
    assert!(result.is_err());

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM heats")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_replaces_all_fields(pool: PgPool) {
    let input = CreateHeat {
        customer: Some("Acme".into()),
        alloy: Some("718".into()),
        diameter: Some(100.0),
        ..new_heat("A2222222")
    };
    HeatRepo::create(&pool, &input).await.unwrap();

    let update = UpdateHeat {
        alloy: Some("625".into()),
        length: Some(900.0),
        ..Default::default()
    };
    let heat = HeatRepo::update_by_number(&pool, "A2222222", &update)
        .await
        .unwrap()
        .expect("row should be updated");

    assert_eq!(heat.customer, "");
    assert_eq!(heat.alloy, "625");
    assert_eq!(heat.diameter, None);
    assert_eq!(heat.length, Some(900.0));
    assert!(heat.updated_at >= heat.created_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_unknown_heat_returns_none(pool: PgPool) {
    let result = HeatRepo::update_by_number(&pool, "A9999999", &UpdateHeat::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_newest_first(pool: PgPool) {
    for number in ["A0000001", "A0000002", "A0000003"] {
        HeatRepo::create(&pool, &new_heat(number)).await.unwrap();
    }

    let heats = HeatRepo::list(&pool).await.unwrap();
    let numbers: Vec<&str> = heats.iter().map(|h| h.heat_number.as_str()).collect();
    assert_eq!(numbers, vec!["A0000003", "A0000002", "A0000001"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_resolve_by_id_and_number(pool: PgPool) {
    let created = HeatRepo::create(&pool, &new_heat("A3333333")).await.unwrap();

    let by_id = HeatRepo::resolve(&pool, &HeatRef::Id(created.id))
        .await
        .unwrap()
        .unwrap();
    let by_number = HeatRepo::resolve(&pool, &HeatRef::Number("A3333333".into()))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(by_id.id, by_number.id);
    assert!(HeatRepo::resolve(&pool, &HeatRef::Id(created.id + 1000))
        .await
        .unwrap()
        .is_none());
}
