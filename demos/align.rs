//! Example: optimal alignment with a hand-written substitution matrix.
//!
//! Run with:
//! `cargo run --example align`

use dp_align::{AlignmentTable, AlphabetIndex, CostModel, LinearSpaceAligner};

fn main() -> dp_align::Result<()> {
    let x = "mean";
    let y = "name";

    // Vowels and nasals are cheap to confuse with each other, expensive across.
    let alphabet = AlphabetIndex::new(['a', 'e', 'm', 'n'])?;
    let matrix = [
        [0.0, 1.0, 3.0, 3.0],
        [1.0, 0.0, 3.0, 3.0],
        [3.0, 3.0, 0.0, 1.0],
        [3.0, 3.0, 1.0, 0.0],
    ];
    let model = CostModel::new(alphabet, &matrix, 2.0)?;

    let mut table = AlignmentTable::new(x, y);
    table.compute_alignment(&model)?;
    let alignment = table.reconstruct_alignment()?;
    let (top, bottom) = alignment.aligned_strings();

    println!("Optimal alignment cost: {}", table.optimal_cost()?);
    println!("X': {top}");
    println!("Y': {bottom}");
    println!(
        "columns={} matches={} substitutions={} gaps={}",
        alignment.len(),
        alignment.matches(),
        alignment.substitutions(),
        alignment.gaps()
    );

    let mut linear = LinearSpaceAligner::new(x, y);
    linear.set_cost_model(&model);
    linear.compute_alignment()?;
    println!(
        "Linear-space cost: {} (column length {})",
        linear.optimal_alignment_cost()?,
        linear.column_len()
    );

    Ok(())
}
