//! Optimal-cost global alignment of two symbol sequences.
//!
//! Given an alphabet, a substitution cost matrix and a gap cost, this crate
//! finds the cheapest way to interleave two sequences with gaps so that they
//! line up column by column.
//!
//! ## Core idea
//! 1. Describe the costs with a [`CostModel`] (alphabet order defines the
//!    matrix layout).
//! 2. Use [`AlignmentTable`] to get the optimal cost *and* one optimal
//!    alignment, in O(m·n) time and space.
//! 3. Use [`LinearSpaceAligner`] when only the cost is needed; it evaluates the
//!    same recurrence with two columns, O(min(m,n)) space.
//!
//! Both aligners share one recurrence step and the same tie-break order
//! (diagonal, then leaving the `X` symbol unmatched, then leaving the `Y`
//! symbol unmatched), so they always agree on the optimal cost.
//!
//! ## Quick start
//! ```
//! use dp_align::{align, align_cost, AlphabetIndex, CostModel};
//!
//! let alphabet = AlphabetIndex::new("aemn".chars()).unwrap();
//! let matrix = [
//!     [0.0, 1.0, 3.0, 3.0],
//!     [1.0, 0.0, 3.0, 3.0],
//!     [3.0, 3.0, 0.0, 1.0],
//!     [3.0, 3.0, 1.0, 0.0],
//! ];
//! let model = CostModel::new(alphabet, &matrix, 2.0).unwrap();
//!
//! let (cost, alignment) = align("mean", "name", &model).unwrap();
//! assert_eq!(cost, 6.0);
//! assert_eq!(alignment.aligned_strings(), ("mean-".to_string(), "n-ame".to_string()));
//! assert_eq!(align_cost("mean", "name", &model).unwrap(), cost);
//! ```
//!
//! ## Errors
//! Every fallible operation returns [`AlignError`]: unknown symbols, a matrix
//! that does not match the alphabet, non-finite costs, or asking for a result
//! before it has been computed.

pub mod alignment;
pub mod builder;
pub mod cost_model;
pub mod error;
pub mod linear;
pub mod recurrence;
pub mod table;
pub mod traits;
pub mod utils;

pub use crate::alignment::{Alignment, EditOp, GAP_MARKER};
pub use crate::builder::CostModelBuilder;
pub use crate::cost_model::{AlphabetIndex, CostModel};
pub use crate::error::{AlignError, Result};
pub use crate::linear::LinearSpaceAligner;
pub use crate::recurrence::Origin;
pub use crate::table::AlignmentTable;
pub use crate::traits::OptimalCost;

/// Optimal cost and one optimal alignment of `x` against `y`.
pub fn align(x: &str, y: &str, model: &CostModel) -> Result<(f64, Alignment)> {
    let mut table = AlignmentTable::new(x, y);
    table.compute_alignment(model)?;
    Ok((table.optimal_cost()?, table.reconstruct_alignment()?))
}

/// Optimal cost of aligning `x` against `y`, in linear space.
pub fn align_cost(x: &str, y: &str, model: &CostModel) -> Result<f64> {
    let mut aligner = LinearSpaceAligner::new(x, y);
    aligner.set_cost_model(model);
    aligner.compute_alignment()?;
    aligner.optimal_alignment_cost()
}
