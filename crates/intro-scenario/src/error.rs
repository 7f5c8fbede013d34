//! Error types for grid layouts
//!
//! Parsing never fails on data: missing sections and malformed rows only
//! yield less output. A layout that cannot describe a sheet is rejected when
//! it is built.

/// Column layout configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// Two roles share one column
    #[error("columns '{first}' and '{second}' both use index {index}")]
    DuplicateColumn {
        /// First role
        first: &'static str,
        /// Second role
        second: &'static str,
        /// Shared column index
        index: usize,
    },

    /// Column reference is not a spreadsheet column letter
    #[error("invalid column reference: '{0}'")]
    InvalidColumn(String),
}
