//! Search command implementation.

use crate::cli::SearchArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::Session;
use marginalia_render::search_all;

/// Execute the search command.
pub fn execute_search(args: SearchArgs, session: &Session, formatter: &Formatter) -> Result<String> {
    if args.query.trim().is_empty() {
        return Err(CliError::InvalidInput("Query must not be empty".to_string()));
    }

    let record = session.load_record(&args.file)?;
    let mut hits = search_all(&record, &args.query);
    if let Some(limit) = args.limit {
        hits.truncate(limit);
    }
    formatter.format_hits(&record, &hits)
}
