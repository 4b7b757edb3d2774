//! Show command implementation.

use crate::cli::ShowArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::Session;
use marginalia_domain::resolve_connection;

/// Execute the show command.
///
/// The name is looked up as a primary name or alias first, then as part of
/// a primary name.
pub fn execute_show(args: ShowArgs, session: &Session, formatter: &Formatter) -> Result<String> {
    let record = session.load_record(&args.file)?;
    let (category, entity) = match record.find_entity(&args.name) {
        Some(found) => found,
        None => resolve_connection(&record, &args.name)
            .map(|resolved| (resolved.category, resolved.entity))
            .ok_or_else(|| CliError::NotFound(format!("No entity named '{}'", args.name)))?,
    };
    formatter.format_entity(&record, category, entity)
}
