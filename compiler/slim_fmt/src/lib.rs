//! Slim Formatter
//!
//! Human-readable rendering of slim expression trees, for logs, test
//! failures and debugging sessions.
//!
//! The output is a C#-flavoured expression syntax:
//!
//! ```text
//! (x, y) => Program.Max((x + 1), y)
//! { Int32 i; (i = 0); loop(break: exit) { ((i < 10) ? (i += 1) : break exit) }; i }
//! ```
//!
//! Parameters and labels print their names. Unnamed ones get generated
//! names (`p0`, `p1`, ... and `L0`, `L1`, ...) that are stable within one
//! call: every occurrence of the same node prints the same name.
//!
//! # Modules
//!
//! - [`options`]: [`FormatOptions`], the printer configuration
//! - `printer`: the transformer that does the rendering

pub mod options;
mod printer;

pub use options::{FormatOptions, INDENT_WIDTH};

use slim_ir::{ExpressionSlim, SlimTransformer};

use crate::printer::Printer;

/// Print `node` on one line.
pub fn print(node: &ExpressionSlim) -> String {
    print_with(node, FormatOptions::default())
}

/// Print `node` with explicit options.
#[tracing::instrument(level = "debug", skip_all)]
pub fn print_with(node: &ExpressionSlim, options: FormatOptions) -> String {
    // The printer's hooks never fail; an error here would come from the
    // traversal itself, so it is rendered in place of the tree.
    Printer::new(options)
        .visit(node)
        .unwrap_or_else(|error| format!("<{error}>"))
}
