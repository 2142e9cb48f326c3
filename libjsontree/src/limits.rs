//! Resource limits for a parse session.

/// Bounds applied while parsing.
///
/// Nesting is bounded because the grammar recurses once per container
/// level; input size is bounded so a session can refuse oversized buffers
/// up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of nested objects/arrays, root included.
    pub max_nesting_depth: usize,
    /// Maximum input size in bytes.
    pub max_input_size: usize,
}

impl Limits {
    /// Default nesting depth.
    pub const DEFAULT_NESTING_DEPTH: usize = 128;
    /// Default input size (16 MiB).
    pub const DEFAULT_INPUT_SIZE: usize = 16 * 1024 * 1024;

    /// No limits beyond what memory and stack allow.
    pub const fn unlimited() -> Self {
        Self {
            max_nesting_depth: usize::MAX,
            max_input_size: usize::MAX,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_nesting_depth: Self::DEFAULT_NESTING_DEPTH,
            max_input_size: Self::DEFAULT_INPUT_SIZE,
        }
    }
}
