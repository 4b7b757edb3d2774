//! Render command implementation.

use crate::cli::RenderArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;
use marginalia_render::render_markdown;

/// Execute the render command.
pub fn execute_render(args: RenderArgs, session: &Session, formatter: &Formatter) -> Result<String> {
    let record = session.load_record(&args.file)?;
    let markdown = render_markdown(&record, args.title.as_deref(), args.progress.as_deref());
    formatter.format_markdown(markdown)
}
