use libris_db::service::LibraryService;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    service: &LibraryService,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Init(args) => commands::database::init(&args, service, flags).await,
        Commands::Seed => commands::database::seed(service, flags).await,
        Commands::Reset => commands::database::reset(service, flags).await,
        Commands::Truncate => commands::database::truncate(service, flags).await,
        Commands::Status => commands::database::status(service, flags).await,
        Commands::Books(args) => commands::books::list(&args, service, flags).await,
        Commands::Students { action } => commands::students::handle(&action, service, flags).await,
        Commands::Issued(args) => commands::issued::list(&args, service, flags).await,
    }
}
