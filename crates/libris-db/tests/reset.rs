//! The reset / seed / roll back cycle against an on-disk database.

mod common;

use libris_auth::MIN_COST;
use libris_db::LibraryDb;
use libris_db::bootstrap::{BASE_AUTHOR, BASE_CATEGORY};
use libris_db::service::LibraryService;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use common::{count, test_config};

async fn on_disk(dir: &TempDir) -> LibraryService {
    let path = dir.path().join("library_test.db");
    let db = LibraryDb::open_local(path.to_str().unwrap()).await.unwrap();
    LibraryService::from_db(db, &test_config())
}

#[tokio::test]
async fn rolled_back_test_leaves_base_state() {
    let dir = TempDir::new().unwrap();
    let svc = on_disk(&dir).await;
    svc.db().seed_fixtures(MIN_COST).await.unwrap();

    svc.db().reset_test_database().await.unwrap();
    svc.create_author("Scratch Author").await.unwrap();
    assert_eq!(svc.count_authors().await.unwrap(), 2);
    svc.db().rollback_transaction().await;

    let authors = svc.list_authors().await.unwrap();
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].name, BASE_AUTHOR);
    assert_eq!(svc.get_category(1).await.unwrap().name, BASE_CATEGORY);
}

#[tokio::test]
async fn committed_reset_survives_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let svc = on_disk(&dir).await;
        svc.db().seed_fixtures(MIN_COST).await.unwrap();
        svc.db().reset_test_database().await.unwrap();
        svc.db().commit_transaction().await.unwrap();
    }

    let svc = on_disk(&dir).await;
    assert_eq!(count(&svc, "SELECT COUNT(*) FROM tblstudents").await, 0);
    assert_eq!(count(&svc, "SELECT COUNT(*) FROM tblcategory").await, 1);
    assert_eq!(count(&svc, "SELECT COUNT(*) FROM tblauthors").await, 1);
}

#[tokio::test]
async fn recreate_then_seed() {
    let dir = TempDir::new().unwrap();
    let svc = on_disk(&dir).await;
    svc.db().seed_fixtures(MIN_COST).await.unwrap();

    svc.db().recreate_schema().await.unwrap();
    let seeded = svc.db().seed_fixtures(MIN_COST).await.unwrap();

    assert_eq!(seeded.admin_id, 1);
    assert_eq!(seeded.book_ids, [1, 2]);
    assert_eq!(count(&svc, "SELECT COUNT(*) FROM tblbooks").await, 2);
}
