use libris_core::pagination::PageRequest;
use libris_db::repos::book::BookFilter;
use libris_db::service::LibraryService;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::BooksArgs;
use crate::output::output;

/// Handle `libris books`.
pub async fn list(
    args: &BooksArgs,
    service: &LibraryService,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let per_page = args
        .per_page
        .unwrap_or(service.library().default_page_size);
    let request = PageRequest::new(args.page, per_page)?;
    let filter = BookFilter {
        name_prefix: args.prefix.clone(),
        category_id: args.category,
        author_id: args.author,
    };
    let page = service.list_books(&filter, request).await?;
    output(&page, flags.format)
}
