//! Error type shared by the cost model and both aligners.
//!
//! Every failure here is a usage or configuration defect. Nothing is retried
//! and a failed call never leaves a partially computed result behind.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, AlignError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlignError {
    /// A sequence contains a symbol that is not part of the configured alphabet.
    #[error("symbol {symbol:?}{} is not in the alphabet", describe_position(.position))]
    UnknownSymbol {
        /// The offending symbol.
        symbol: char,
        /// Zero-based position inside the sequence being encoded, `None` for
        /// a lookup of a single symbol.
        position: Option<usize>,
    },

    /// The substitution matrix is not square with side equal to the alphabet size.
    #[error("substitution matrix must be {expected}x{expected}, {}", describe_mismatch(.found, .row))]
    DimensionMismatch {
        /// Alphabet size.
        expected: usize,
        /// Offending length (number of rows, or length of `row`).
        found: usize,
        /// Row whose length is wrong, `None` when the row count itself is wrong.
        row: Option<usize>,
    },

    /// A result accessor ran before `compute_alignment`.
    #[error("alignment has not been computed yet")]
    NotComputed,

    /// The alphabet lists the same symbol twice.
    #[error("symbol {symbol:?} appears more than once in the alphabet")]
    DuplicateSymbol { symbol: char },

    /// A gap or substitution cost is NaN or infinite.
    #[error("costs must be finite, got {value}")]
    NonFiniteCost { value: f64 },

    /// The linear-space aligner was asked to compute without a cost model.
    #[error("no cost model has been set")]
    MissingCostModel,

    /// `CostModelBuilder::build` was called before every part was supplied.
    #[error("cost model is missing its {missing}")]
    IncompleteCostModel { missing: &'static str },

    /// A prefix-cost query fell outside the table.
    #[error("cell ({row}, {col}) is outside a {rows}x{cols} table")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

fn describe_position(position: &Option<usize>) -> String {
    match position {
        Some(p) => format!(" at position {p}"),
        None => String::new(),
    }
}

fn describe_mismatch(found: &usize, row: &Option<usize>) -> String {
    match row {
        Some(r) => format!("row {r} has {found} entries"),
        None => format!("got {found} rows"),
    }
}
