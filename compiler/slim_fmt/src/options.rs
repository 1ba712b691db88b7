//! Printer configuration.

/// Spaces per indentation level.
pub const INDENT_WIDTH: usize = 4;

/// Configuration for [`crate::print_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Indentation size in spaces for multi-line bodies.
    /// Defaults to [`INDENT_WIDTH`].
    pub indent: usize,

    /// Put each statement of a block, loop, switch or try body on its own
    /// line. Off by default: the whole tree prints on one line.
    pub multiline_blocks: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent: INDENT_WIDTH,
            multiline_blocks: false,
        }
    }
}

impl FormatOptions {
    /// Multi-line bodies with the default indentation.
    pub fn multiline() -> Self {
        Self {
            multiline_blocks: true,
            ..Default::default()
        }
    }
}
