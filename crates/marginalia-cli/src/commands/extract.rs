//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;

/// Execute the extract command.
///
/// Prints the record as stored, so alias overrides are not applied.
pub fn execute_extract(args: ExtractArgs, session: &Session, formatter: &Formatter) -> Result<String> {
    let record = session.load_stored_record(&args.file)?;
    formatter.format_record(&record)
}
