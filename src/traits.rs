//! Shared interface of the two aligners.
//!
//! Both [`AlignmentTable`](crate::table::AlignmentTable) and
//! [`LinearSpaceAligner`](crate::linear::LinearSpaceAligner) evaluate the same
//! recurrence, so once computed they must report the same optimal cost for the
//! same inputs and [`CostModel`](crate::cost_model::CostModel). This trait lets
//! callers and tests treat them uniformly for that one query.

use crate::error::Result;

/// Anything that can report the optimal global alignment cost it computed.
pub trait OptimalCost {
    /// Optimal cost of aligning the full sequences.
    ///
    /// Must return [`AlignError::NotComputed`](crate::error::AlignError::NotComputed)
    /// until the implementor's computation step has succeeded, and never a
    /// stale value from an earlier configuration.
    fn optimal_cost(&self) -> Result<f64>;
}
