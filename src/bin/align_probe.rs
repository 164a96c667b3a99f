//! Runs both aligners on deterministic DNA of growing length.
//!
//! The linear-space aligner runs at every size. Up to `--verify-limit` the
//! full table runs as well, and each row records the table cost, the
//! re-summed witness cost and the shape of the witness next to the linear
//! cost. The process exits with status 1 if any checked row disagrees.

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use dp_align::{AlignmentTable, AlphabetIndex, CostModel, LinearSpaceAligner};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

const SIZES: &[usize] = &[256, 512, 1024, 2048, 4096, 8192, 16384];

fn main() -> ExitCode {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("align_probe: {err}");
            print_usage();
            return ExitCode::from(2);
        }
    };

    let result = scenarios(options.gap).and_then(|scenarios| {
        let mut sys = System::new();
        let mut rows = Vec::new();
        for scenario in &scenarios {
            eprintln!("{} (gap {})", scenario.name, options.gap);
            for &len in SIZES {
                let row = run_size(scenario, len, options.verify_limit, &mut sys)?;
                eprintln!("  len={len:<6} {}", row.verdict());
                rows.push(row);
            }
        }
        Ok(rows)
    });
    let rows = match result {
        Ok(rows) => rows,
        Err(err) => {
            eprintln!("align_probe: {err}");
            return ExitCode::from(2);
        }
    };

    match options.format {
        Format::Csv => write_csv(&rows),
        Format::Table => write_table(&rows),
    }

    let checked = rows.iter().filter(|r| r.table.is_some()).count();
    let disagreements = rows.iter().filter(|r| r.agrees() == Some(false)).count();
    eprintln!(
        "{} rows, {checked} checked against the full table, {disagreements} disagreements",
        rows.len()
    );
    if disagreements > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[derive(Clone, Copy)]
enum Format {
    Csv,
    Table,
}

struct Options {
    format: Format,
    verify_limit: usize,
    gap: f64,
}

impl Options {
    /// `Ok(None)` means help was requested.
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Option<Self>, String> {
        let mut options = Options {
            format: Format::Csv,
            verify_limit: 2048,
            gap: 1.0,
        };
        while let Some(arg) = args.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
                None => (arg.clone(), None),
            };
            if flag == "-h" || flag == "--help" {
                return Ok(None);
            }
            let value = match inline {
                Some(value) => value,
                None => args.next().ok_or_else(|| format!("{flag} needs a value"))?,
            };
            match flag.as_str() {
                "--format" => {
                    options.format = match value.as_str() {
                        "csv" => Format::Csv,
                        "table" => Format::Table,
                        other => return Err(format!("unknown format '{other}'")),
                    }
                }
                "--verify-limit" => {
                    options.verify_limit = value
                        .parse()
                        .map_err(|_| format!("verify limit '{value}' is not a length"))?
                }
                "--gap" => {
                    options.gap = value
                        .parse()
                        .map_err(|_| format!("gap cost '{value}' is not a number"))?
                }
                _ => return Err(format!("unrecognized argument '{flag}'")),
            }
        }
        Ok(Some(options))
    }
}

fn print_usage() {
    eprintln!(
        "\
Usage: align_probe [--format csv|table] [--verify-limit N] [--gap COST]

  --format        stdout layout (default csv)
  --verify-limit  longest X that also runs the full table (default 2048)
  --gap           gap cost shared by every scenario (default 1.0)"
    );
}

struct Scenario {
    name: &'static str,
    model: CostModel,
    /// Phase shift of Y's generator relative to X's.
    shift: usize,
}

fn scenarios(gap: f64) -> dp_align::Result<Vec<Scenario>> {
    let dna = || AlphabetIndex::new("ACGT".chars());
    // Transitions (A<->G, C<->T) are cheaper than transversions.
    let transition = [
        [0.0, 2.0, 1.0, 2.0],
        [2.0, 0.0, 2.0, 1.0],
        [1.0, 2.0, 0.0, 2.0],
        [2.0, 1.0, 2.0, 0.0],
    ];
    let asymmetric = [
        [0.0, 1.0, 3.0, 2.0],
        [4.0, 0.0, 1.0, 3.0],
        [2.0, 4.0, 0.0, 1.0],
        [1.0, 2.0, 4.0, 0.0],
    ];
    Ok(vec![
        Scenario {
            name: "unit_cost",
            model: CostModel::uniform(dna()?, 0.0, 1.0, gap)?,
            shift: 1,
        },
        Scenario {
            name: "transition_weighted",
            model: CostModel::new(dna()?, &transition, gap)?,
            shift: 2,
        },
        Scenario {
            name: "asymmetric",
            model: CostModel::new(dna()?, &asymmetric, gap)?,
            shift: 3,
        },
    ])
}

/// Full-table results for one pair of sequences.
struct TableCheck {
    cost: f64,
    witness_cost: f64,
    witness_gaps: usize,
    witness_substitutions: usize,
    seconds: f64,
    rss_growth_kib: u64,
}

struct Row {
    scenario: &'static str,
    x_len: usize,
    y_len: usize,
    linear_cost: f64,
    linear_seconds: f64,
    table: Option<TableCheck>,
}

impl Row {
    /// `None` when the full table was skipped.
    fn agrees(&self) -> Option<bool> {
        self.table
            .as_ref()
            .map(|t| t.cost == self.linear_cost && t.witness_cost == self.linear_cost)
    }

    fn verdict(&self) -> String {
        match (&self.table, self.agrees()) {
            (Some(t), Some(true)) => format!(
                "cost {} in {:.3}s, table agrees ({} gaps, {} substitutions)",
                self.linear_cost, self.linear_seconds, t.witness_gaps, t.witness_substitutions
            ),
            (Some(t), _) => format!(
                "MISMATCH linear {} table {} witness {}",
                self.linear_cost, t.cost, t.witness_cost
            ),
            (None, _) => format!(
                "cost {} in {:.3}s, table skipped",
                self.linear_cost, self.linear_seconds
            ),
        }
    }
}

fn run_size(
    scenario: &Scenario,
    len: usize,
    verify_limit: usize,
    sys: &mut System,
) -> dp_align::Result<Row> {
    let x = dna_sequence(len, 0);
    let y = dna_sequence(len + len / 8, scenario.shift);

    let started = Instant::now();
    let mut linear = LinearSpaceAligner::new(&x, &y);
    linear.set_cost_model(&scenario.model);
    linear.compute_alignment()?;
    let linear_cost = linear.optimal_alignment_cost()?;
    let linear_seconds = started.elapsed().as_secs_f64();

    let table = if len <= verify_limit {
        let rss_before = resident_kib(sys);
        let started = Instant::now();
        let mut table = AlignmentTable::new(&x, &y);
        table.compute_alignment(&scenario.model)?;
        let witness = table.reconstruct_alignment()?;
        let seconds = started.elapsed().as_secs_f64();
        let rss_growth_kib = resident_kib(sys).saturating_sub(rss_before);
        Some(TableCheck {
            cost: table.optimal_cost()?,
            witness_cost: witness.cost(&scenario.model)?,
            witness_gaps: witness.gaps(),
            witness_substitutions: witness.substitutions(),
            seconds,
            rss_growth_kib,
        })
    } else {
        None
    };

    Ok(Row {
        scenario: scenario.name,
        x_len: len,
        y_len: y.len(),
        linear_cost,
        linear_seconds,
        table,
    })
}

const COLUMNS: [&str; 11] = [
    "scenario",
    "x_len",
    "y_len",
    "linear_cost",
    "linear_s",
    "table_cost",
    "witness_cost",
    "witness_gaps",
    "table_s",
    "table_rss_kib",
    "agrees",
];

fn cells(row: &Row) -> [String; 11] {
    let table = row.table.as_ref();
    let dash = |cell: Option<String>| cell.unwrap_or_else(|| "-".to_string());
    [
        row.scenario.to_string(),
        row.x_len.to_string(),
        row.y_len.to_string(),
        row.linear_cost.to_string(),
        format!("{:.3}", row.linear_seconds),
        dash(table.map(|t| t.cost.to_string())),
        dash(table.map(|t| t.witness_cost.to_string())),
        dash(table.map(|t| t.witness_gaps.to_string())),
        dash(table.map(|t| format!("{:.3}", t.seconds))),
        dash(table.map(|t| t.rss_growth_kib.to_string())),
        dash(row.agrees().map(|ok| if ok { "yes" } else { "no" }.to_string())),
    ]
}

fn write_csv(rows: &[Row]) {
    println!("{}", COLUMNS.join(","));
    for row in rows {
        println!("{}", cells(row).join(","));
    }
}

fn write_table(rows: &[Row]) {
    let header = COLUMNS.map(String::from);
    let rendered: Vec<[String; 11]> = rows.iter().map(cells).collect();
    let mut widths = [0usize; 11];
    for line in std::iter::once(&header).chain(&rendered) {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.len());
        }
    }
    for line in std::iter::once(&header).chain(&rendered) {
        println!("{}", right_aligned(line, &widths));
    }
}

fn right_aligned(line: &[String], widths: &[usize]) -> String {
    line.iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:>width$}"))
        .collect::<Vec<_>>()
        .join("  ")
}

fn resident_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    get_current_pid()
        .ok()
        .and_then(|pid| sys.process(pid))
        .map_or(0, |process| process.memory() / 1024)
}

/// Periodic but non-trivial DNA; `shift` moves Y out of phase with X.
fn dna_sequence(len: usize, shift: usize) -> String {
    const BASES: &[u8] = b"ACGT";
    (0..len)
        .map(|i| BASES[(i * 7 / 3 + shift) % BASES.len()] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn parses_inline_and_separate_values() {
        let options = Options::parse(args(&["--gap=0.5", "--verify-limit", "64"]))
            .unwrap()
            .unwrap();
        assert_eq!(options.gap, 0.5);
        assert_eq!(options.verify_limit, 64);
        assert!(Options::parse(args(&["--help"])).unwrap().is_none());
        assert!(Options::parse(args(&["--format", "json"])).is_err());
        assert!(Options::parse(args(&["--gap"])).is_err());
    }

    #[test]
    fn checked_rows_carry_witness_columns() {
        let scenarios = scenarios(0.1).unwrap();
        let mut sys = System::new();
        let row = run_size(&scenarios[2], 24, 24, &mut sys).unwrap();
        assert_eq!(row.agrees(), Some(true));
        let line = cells(&row);
        assert_eq!(line[0], "asymmetric");
        assert_eq!(line[2], "27");
        assert_eq!(line[3], line[5]);
        assert_eq!(line[3], line[6]);
        assert_eq!(line[10], "yes");

        let skipped = run_size(&scenarios[0], 24, 8, &mut sys).unwrap();
        assert_eq!(skipped.agrees(), None);
        assert_eq!(cells(&skipped)[5], "-");
    }
}
