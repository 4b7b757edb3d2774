//! Merge command implementation.

use crate::cli::MergeArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::Session;

/// Execute the merge command.
///
/// The merged record is always JSON, ready to be stored again. With
/// `--output` it is written to that file and a summary is printed instead.
pub fn execute_merge(args: MergeArgs, session: &Session, formatter: &Formatter) -> Result<String> {
    if args.base.as_os_str() == "-" && args.partial.as_os_str() == "-" {
        return Err(CliError::InvalidInput(
            "Base and partial records cannot both be read from stdin".to_string(),
        ));
    }

    let mut record = session.load_stored_record(&args.base)?;
    let partial = session.load_stored_record(&args.partial)?;
    let summary = record.merge(partial);

    let json = serde_json::to_string_pretty(&record.to_json())?;
    match args.output {
        Some(path) => {
            std::fs::write(&path, json + "\n")?;
            tracing::info!("Wrote merged record to {}", path.display());
            Ok(formatter.merge_result(&summary))
        }
        None => Ok(json),
    }
}
