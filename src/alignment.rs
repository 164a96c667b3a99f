//! Witness alignments produced by [`AlignmentTable`](crate::table::AlignmentTable).

use crate::cost_model::CostModel;
use crate::error::Result;

/// Marker used for the unmatched side of a gap column.
pub const GAP_MARKER: char = '-';

/// One column of an alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditOp {
    /// `x` aligned against `y` (a match when they are equal).
    Substitute(char, char),
    /// `x` from the first sequence aligned against a gap.
    DeleteFromX(char),
    /// `y` from the second sequence aligned against a gap.
    InsertIntoY(char),
}

impl EditOp {
    /// Cost of this column under `model`.
    pub fn cost(&self, model: &CostModel) -> Result<f64> {
        match *self {
            EditOp::Substitute(x, y) => model.substitution_cost(x, y),
            EditOp::DeleteFromX(_) | EditOp::InsertIntoY(_) => Ok(model.gap_cost()),
        }
    }

    pub fn is_gap(&self) -> bool {
        !matches!(self, EditOp::Substitute(..))
    }
}

/// Left-to-right list of edit operations turning `X` into `Y`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Alignment {
    ops: Vec<EditOp>,
}

impl Alignment {
    pub fn new(ops: Vec<EditOp>) -> Self {
        Self { ops }
    }

    pub fn ops(&self) -> &[EditOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<EditOp> {
        self.ops
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Sum of the column costs, accumulated left to right.
    pub fn cost(&self, model: &CostModel) -> Result<f64> {
        self.ops
            .iter()
            .try_fold(0.0, |acc, op| Ok(acc + op.cost(model)?))
    }

    /// Columns where equal symbols were aligned.
    pub fn matches(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, EditOp::Substitute(x, y) if x == y))
            .count()
    }

    /// Columns where different symbols were aligned.
    pub fn substitutions(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, EditOp::Substitute(x, y) if x != y))
            .count()
    }

    pub fn gaps(&self) -> usize {
        self.ops.iter().filter(|op| op.is_gap()).count()
    }

    /// Both rows of the alignment using [`GAP_MARKER`].
    pub fn aligned_strings(&self) -> (String, String) {
        self.render_with(GAP_MARKER)
    }

    /// Both rows of the alignment, padding gaps with `marker`.
    ///
    /// The two strings always have the same number of `char`s.
    pub fn render_with(&self, marker: char) -> (String, String) {
        let mut top = String::with_capacity(self.ops.len());
        let mut bottom = String::with_capacity(self.ops.len());
        for op in &self.ops {
            let (x, y) = match *op {
                EditOp::Substitute(x, y) => (x, y),
                EditOp::DeleteFromX(x) => (x, marker),
                EditOp::InsertIntoY(y) => (marker, y),
            };
            top.push(x);
            bottom.push(y);
        }
        (top, bottom)
    }

    /// The first sequence, recovered by dropping insertions.
    pub fn source(&self) -> String {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                EditOp::Substitute(x, _) | EditOp::DeleteFromX(x) => Some(x),
                EditOp::InsertIntoY(_) => None,
            })
            .collect()
    }

    /// The second sequence, recovered by dropping deletions.
    pub fn target(&self) -> String {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                EditOp::Substitute(_, y) | EditOp::InsertIntoY(y) => Some(y),
                EditOp::DeleteFromX(_) => None,
            })
            .collect()
    }
}
