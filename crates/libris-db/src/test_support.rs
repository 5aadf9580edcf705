//! Shared test utilities for libris-db unit tests.

pub(crate) mod helpers {
    use libris_auth::MIN_COST;
    use libris_config::LibrisConfig;

    use crate::LibraryDb;
    use crate::bootstrap::SeededFixtures;
    use crate::service::LibraryService;

    /// Config with the cheapest bcrypt cost so hashing stays fast.
    pub fn test_config() -> LibrisConfig {
        let mut config = LibrisConfig::default();
        config.auth.bcrypt_cost = MIN_COST;
        config
    }

    /// In-memory service with an empty schema.
    pub async fn test_service() -> LibraryService {
        let db = LibraryDb::open_in_memory().await.unwrap();
        LibraryService::from_db(db, &test_config())
    }

    /// In-memory service loaded with the fixture dataset.
    pub async fn seeded_service() -> (LibraryService, SeededFixtures) {
        let svc = test_service().await;
        let seeded = svc.db().seed_fixtures(MIN_COST).await.unwrap();
        (svc, seeded)
    }
}
