use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

use pushworld::puzzle::{plan_to_string, Puzzle, StateSet};
use pushworld::search::{solve_with_visited, PlannerMode};
use pushworld::solution::{save_report, PlanRecord, PlanReport};

const USAGE: &str = "Usage: benchmark_rgd <puzzle_dir> <output.json> [mode]

Solves every .pwp puzzle in <puzzle_dir> and writes a JSON report with the
plan, visited-state count and runtime of each. The optional [mode] is \"RGD\"
(default) or \"N+RGD\".";

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 && args.len() != 4 {
        eprintln!("{USAGE}");
        std::process::exit(2);
    }

    let mode: PlannerMode = match args.get(3).map_or("RGD", String::as_str).parse() {
        Ok(mode) => mode,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    };

    match run(&args[1], &args[2], mode) {
        Ok(report) => {
            let solved = report.records.iter().filter(|r| r.solved).count();
            println!("solved {}/{} puzzles", solved, report.records.len());
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn run(
    puzzle_dir: &str,
    output: &str,
    mode: PlannerMode,
) -> Result<PlanReport, pushworld::error::PlannerError> {
    let mut puzzle_paths: Vec<PathBuf> = std::fs::read_dir(puzzle_dir)
        .map_err(|e| pushworld::error::PlannerError::Io {
            path: puzzle_dir.to_string(),
            error: e.to_string(),
        })?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "pwp"))
        .collect();
    puzzle_paths.sort();

    let mut records = Vec::with_capacity(puzzle_paths.len());

    for path in puzzle_paths {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let puzzle = Rc::new(Puzzle::from_file(&path)?);
        let mut visited = StateSet::default();

        let start = Instant::now();
        let plan = solve_with_visited(&puzzle, mode, &mut visited)?;
        let runtime_ms = start.elapsed().as_millis() as u64;

        println!(
            "{name}: {} ({} states, {runtime_ms} ms)",
            plan.as_deref().map_or("NO SOLUTION".to_string(), plan_to_string),
            visited.len(),
        );

        records.push(PlanRecord {
            puzzle: name,
            mode: mode.name().to_string(),
            solved: plan.is_some(),
            plan: plan.as_deref().map(plan_to_string).unwrap_or_default(),
            visited_states: visited.len() as u64,
            runtime_ms,
        });
    }

    let report = PlanReport::new(records);
    save_report(output, &report)?;
    Ok(report)
}
