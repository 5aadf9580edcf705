use libris_db::service::LibraryService;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::IssuedArgs;
use crate::output::output;

/// Handle `libris issued`.
pub async fn list(
    args: &IssuedArgs,
    service: &LibraryService,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let issues = if args.current {
        service.current_issues_for_student(args.student).await?
    } else if args.returned {
        service.returned_books_for_student(args.student).await?
    } else {
        service.issued_books_for_student(args.student).await?
    };
    output(&issues, flags.format)
}
