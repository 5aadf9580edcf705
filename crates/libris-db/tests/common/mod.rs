//! Helpers shared by the scenario tests.
#![allow(dead_code)]

use libris_auth::MIN_COST;
use libris_config::LibrisConfig;
use libris_db::LibraryDb;
use libris_db::bootstrap::SeededFixtures;
use libris_db::service::LibraryService;

pub fn test_config() -> LibrisConfig {
    let mut config = LibrisConfig::default();
    config.auth.bcrypt_cost = MIN_COST;
    config
}

/// Empty in-memory service.
pub async fn test_service() -> LibraryService {
    let db = LibraryDb::open_in_memory().await.unwrap();
    LibraryService::from_db(db, &test_config())
}

/// Service in the state every suite test starts from: base category and
/// author (both id 1) and an open transaction.
pub async fn reset_service() -> LibraryService {
    let svc = test_service().await;
    svc.db().reset_test_database().await.unwrap();
    svc
}

/// Service loaded with the fixture dataset.
pub async fn seeded_service() -> (LibraryService, SeededFixtures) {
    let svc = test_service().await;
    let seeded = svc.db().seed_fixtures(MIN_COST).await.unwrap();
    (svc, seeded)
}

/// `SELECT COUNT(*)` helper.
pub async fn count(svc: &LibraryService, sql: &str) -> i64 {
    let mut rows = svc.db().conn().query(sql, ()).await.unwrap();
    rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap()
}
