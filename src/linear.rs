//! Cost-only global alignment in linear space.
//!
//! The recurrence for column `j` only reads column `j-1` and the cells already
//! written in column `j`, so two columns are enough to reach the final cost.
//! Columns run along the shorter sequence, bounding memory by
//! `min(|X|, |Y|) + 1` cells per column.
//!
//! No backtracking pointers are kept. Callers that need a witness alignment
//! must use [`AlignmentTable`](crate::table::AlignmentTable).

use crate::cost_model::CostModel;
use crate::error::{AlignError, Result};
use crate::recurrence::{gap_run, step};
use crate::traits::OptimalCost;

/// Two-column aligner that only reports the optimal cost.
///
/// ```
/// use dp_align::{AlphabetIndex, CostModel, LinearSpaceAligner};
///
/// let alphabet = AlphabetIndex::new("stop".chars()).unwrap();
/// let model = CostModel::uniform(alphabet, 0.0, 1.0, 0.5).unwrap();
///
/// let mut aligner = LinearSpaceAligner::new("stop", "top");
/// aligner.set_cost_model(&model);
/// aligner.compute_alignment().unwrap();
/// assert_eq!(aligner.optimal_alignment_cost().unwrap(), 0.5);
/// ```
#[derive(Clone, Debug)]
pub struct LinearSpaceAligner<'m> {
    /// The not-longer input; one column cell per prefix of it.
    short: Vec<char>,
    /// The not-shorter input; one column per prefix of it.
    long: Vec<char>,
    /// True when `short` is the caller's second sequence.
    swapped: bool,
    model: Option<&'m CostModel>,
    previous: Vec<f64>,
    current: Vec<f64>,
    result: Option<f64>,
}

impl<'m> LinearSpaceAligner<'m> {
    /// Prepare to align `x` against `y`.
    ///
    /// The shorter sequence becomes the column axis. Substitution costs are
    /// still looked up as `cost(x_symbol, y_symbol)`, so an asymmetric matrix
    /// gives the same answer as the full table on `(x, y)`.
    pub fn new(x: &str, y: &str) -> Self {
        let x: Vec<char> = x.chars().collect();
        let y: Vec<char> = y.chars().collect();
        let swapped = x.len() > y.len();
        let (short, long) = if swapped { (y, x) } else { (x, y) };
        let height = short.len() + 1;
        Self {
            short,
            long,
            swapped,
            model: None,
            previous: vec![0.0; height],
            current: vec![0.0; height],
            result: None,
        }
    }

    /// Number of cells in each of the two live columns.
    pub fn column_len(&self) -> usize {
        self.previous.len()
    }

    /// Whether the inputs were swapped to put the shorter one on the columns.
    pub fn is_swapped(&self) -> bool {
        self.swapped
    }

    /// Attach `model` and reset column 0 to the accumulated gap run.
    ///
    /// Any previously computed cost is discarded.
    pub fn set_cost_model(&mut self, model: &'m CostModel) {
        self.reset_base_column(model.gap_cost());
        self.model = Some(model);
        self.result = None;
    }

    /// Run the recurrence column by column.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            level = "debug",
            name = "linear_space_aligner",
            skip(self),
            fields(height = self.short.len(), width = self.long.len(), swapped = self.swapped)
        )
    )]
    pub fn compute_alignment(&mut self) -> Result<()> {
        let model = self.model.ok_or(AlignError::MissingCostModel)?;
        self.result = None;

        let (x, y) = if self.swapped {
            (&self.long, &self.short)
        } else {
            (&self.short, &self.long)
        };
        let xs = model.alphabet().encode(x.iter().copied())?;
        let ys = model.alphabet().encode(y.iter().copied())?;
        let (short, long) = if self.swapped { (ys, xs) } else { (xs, ys) };
        let gap = model.gap_cost();

        // Recompute from scratch so repeated calls see the base column again.
        self.reset_base_column(gap);

        let swapped = self.swapped;
        let substitution = |s: usize, l: usize| {
            if swapped {
                model.cost_by_index(l, s)
            } else {
                model.cost_by_index(s, l)
            }
        };

        for (j, &lj) in long.iter().enumerate() {
            let j = j + 1;
            self.current[0] = self.previous[0] + gap;
            for i in 1..self.current.len() {
                let (value, _) = step(
                    substitution(short[i - 1], lj),
                    gap,
                    self.previous[i - 1],
                    self.previous[i],
                    self.current[i - 1],
                );
                self.current[i] = value;
            }
            std::mem::swap(&mut self.previous, &mut self.current);
            #[cfg(feature = "tracing")]
            tracing::trace!(column = j, "column filled");
        }

        let cost = self.previous[self.previous.len() - 1];
        self.result = Some(cost);
        #[cfg(feature = "tracing")]
        tracing::debug!(cost, "columns filled");
        Ok(())
    }

    fn reset_base_column(&mut self, gap: f64) {
        for (cell, value) in self.previous.iter_mut().zip(gap_run(gap)) {
            *cell = value;
        }
    }

    /// Value at the last row of the last column.
    pub fn optimal_alignment_cost(&self) -> Result<f64> {
        self.result.ok_or(AlignError::NotComputed)
    }
}

impl OptimalCost for LinearSpaceAligner<'_> {
    fn optimal_cost(&self) -> Result<f64> {
        self.optimal_alignment_cost()
    }
}
