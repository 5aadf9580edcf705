use libris_db::service::LibraryService;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::StudentCommands;
use crate::output::output;

/// Handle `libris students`.
pub async fn handle(
    action: &StudentCommands,
    service: &LibraryService,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        StudentCommands::Search { pattern } => {
            let students = service.search_students(pattern).await?;
            output(&students, flags.format)
        }
        StudentCommands::Get { id } => {
            let student = service.get_student(*id).await?;
            output(&student, flags.format)
        }
    }
}
