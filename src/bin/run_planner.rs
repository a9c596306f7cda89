use std::rc::Rc;

use pushworld::puzzle::{plan_to_string, Puzzle};
use pushworld::search::{solve, PlannerMode};

const USAGE: &str = "Usage: run_planner <mode> <puzzle>

Prints a plan of (L)eft, (R)ight, (U)p, (D)own actions that solves the given
PushWorld puzzle, or prints \"NO SOLUTION\" if no solution exists.

Options:
    <mode>   : \"RGD\"   - The recursive graph distance heuristic.
               \"N+RGD\" - A lexicographic combination of the novelty
                          heuristic with the RGD heuristic.
    <puzzle> : The path of a PushWorld file in .pwp format.";

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("{USAGE}");
        std::process::exit(2);
    }

    let mode: PlannerMode = match args[1].parse() {
        Ok(mode) => mode,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    };

    let result = Puzzle::from_file(&args[2])
        .map(Rc::new)
        .and_then(|puzzle| solve(&puzzle, mode));

    match result {
        Ok(Some(plan)) => println!("{}", plan_to_string(&plan)),
        Ok(None) => println!("NO SOLUTION"),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
