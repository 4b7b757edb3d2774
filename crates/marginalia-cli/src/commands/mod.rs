//! Command implementations.
//!
//! Each command returns the text to print; `main` writes it to stdout.

pub mod extract;
pub mod merge;
pub mod render;
pub mod resolve;
pub mod scan;
pub mod search;
pub mod show;

pub use self::extract::execute_extract;
pub use self::merge::execute_merge;
pub use self::render::execute_render;
pub use self::resolve::execute_resolve;
pub use self::scan::execute_scan;
pub use self::search::execute_search;
pub use self::show::execute_show;

use crate::cli::Command;
use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;

/// Run one parsed command.
pub fn execute(command: Command, session: &Session, formatter: &Formatter) -> Result<String> {
    match command {
        Command::Extract(args) => execute_extract(args, session, formatter),
        Command::Merge(args) => execute_merge(args, session, formatter),
        Command::Render(args) => execute_render(args, session, formatter),
        Command::Scan(args) => execute_scan(args, session, formatter),
        Command::Search(args) => execute_search(args, session, formatter),
        Command::Resolve(args) => execute_resolve(args, session, formatter),
        Command::Show(args) => execute_show(args, session, formatter),
    }
}
