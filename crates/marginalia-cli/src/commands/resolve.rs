//! Resolve command implementation.

use crate::cli::ResolveArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::Session;
use marginalia_domain::resolve_connection;

/// Execute the resolve command.
pub fn execute_resolve(args: ResolveArgs, session: &Session, formatter: &Formatter) -> Result<String> {
    let record = session.load_record(&args.file)?;
    let resolved = resolve_connection(&record, &args.connection)
        .ok_or_else(|| CliError::NotFound(format!("No entity matches '{}'", args.connection)))?;
    formatter.format_connection(&record, &resolved)
}
