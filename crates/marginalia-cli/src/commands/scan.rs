//! Scan command implementation.

use crate::cli::ScanArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::{read_input, Session};

/// Execute the scan command.
pub fn execute_scan(args: ScanArgs, session: &Session, formatter: &Formatter) -> Result<String> {
    if args.file.as_os_str() == "-" && args.chapter.as_os_str() == "-" {
        return Err(CliError::InvalidInput(
            "Record and chapter cannot both be read from stdin".to_string(),
        ));
    }
    if args.limit == Some(0) {
        return Err(CliError::InvalidInput("Limit must be at least 1".to_string()));
    }

    let record = session.load_record(&args.file)?;
    let chapter = read_input(&args.chapter)?;

    let mut mentions = session.matcher().find_items_in_chapter(&record, &chapter);
    if let Some(limit) = args.limit {
        mentions.truncate(limit);
    }
    formatter.format_mentions(&record, &mentions)
}
