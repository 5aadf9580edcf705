//! `init`, `seed`, `reset`, `truncate`, and `status`.

use libris_db::LibraryDb;
use libris_db::service::LibraryService;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InitArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct TableCount {
    pub table: &'static str,
    pub rows: u64,
}

#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub foreign_keys: bool,
    pub tables: Vec<String>,
    pub counts: Vec<TableCount>,
}

/// Handle `libris init`. Opening the database already applied migrations.
pub async fn init(
    args: &InitArgs,
    service: &LibraryService,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if args.fresh {
        service.db().recreate_schema().await?;
        tracing::info!("schema recreated");
    }
    output(&collect_status(service.db()).await?, flags.format)
}

/// Handle `libris seed`.
pub async fn seed(service: &LibraryService, flags: &GlobalFlags) -> anyhow::Result<()> {
    let seeded = service.db().seed_fixtures(service.auth().bcrypt_cost).await?;
    output(&seeded, flags.format)
}

/// Handle `libris reset`. The reset leaves a transaction open for test
/// isolation; the CLI commits it so the base state persists.
pub async fn reset(service: &LibraryService, flags: &GlobalFlags) -> anyhow::Result<()> {
    service.db().reset_test_database().await?;
    service.db().commit_transaction().await?;
    output(&collect_status(service.db()).await?, flags.format)
}

/// Handle `libris truncate`.
pub async fn truncate(service: &LibraryService, flags: &GlobalFlags) -> anyhow::Result<()> {
    service.db().truncate_all().await?;
    output(&collect_status(service.db()).await?, flags.format)
}

/// Handle `libris status`.
pub async fn status(service: &LibraryService, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&collect_status(service.db()).await?, flags.format)
}

pub async fn collect_status(db: &LibraryDb) -> anyhow::Result<StatusReport> {
    let counts = db
        .row_counts()
        .await?
        .into_iter()
        .map(|(table, rows)| TableCount {
            table: table.as_str(),
            rows,
        })
        .collect();
    Ok(StatusReport {
        foreign_keys: db.foreign_keys_enabled().await?,
        tables: db.existing_tables().await?,
        counts,
    })
}
