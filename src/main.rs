// vim: set ai et ts=4 sw=4 sts=4:
mod grid;
mod line;
mod puzzle;
mod util;

use std::fs;
use std::io;
use std::process;

use clap::{App, Arg, ArgMatches};
use log::error;
use yaml_rust::YamlLoader;

use self::puzzle::{Outcome, Puzzle, Solver};
use self::util::is_a_tty;

// name, row descriptor, column descriptor; runs separated by commas,
// lines by colons
const BUILTIN_PUZZLES: [(&str, &str, &str); 3] = [
    ("dolphin",
     "8:7,3:16:11,4:13,2:14,2:18:8,4:6,4:5,5:4,2,2:4,3,1:3,2,1:3,2:3,2:2,1,4:2,1,4:2,1,4:3,1,4:5,4:11:10:5:5:6",
     "1:2:2:4:11:13:15:9,3:8,3:7,5,2:7,3,4:6,2,3:8,3,2:13,2:10,2:5,5,3:4,1,4,6:1,2,2,8:3,1,10:3,1,4,4:2,1,2,3:2,1,2:2,1:2,1:1"),
    ("cupcake",
     "5:1,3:2,3:5,2:2,2,2:7,4:2,2,2:7,4:2,2,2:7,6:2,3,3:2,5:8,1,1:1,1,1,1,1:1,1,1,1,1:1,1,1,1,1:3,1,1,1,7:2,1,1,3:3,1,2:8",
     "3,1:7,1:4,1,7:3,1,1,1,2:2,1,1,1,1,2:1,2,1,1,1,8:2,1,1,1,1,1,1:1,1,1,1,1,1,1:2,1,1,1,1,8:3,1,1,1,1,1,1:3,1,1,1,1,1:4,1,1,9:4,1,1,2:13:4,1:2,1:1:1:1:1"),
    ("weird man",
     "4,3:6,1,2:4,1,3,1:2,1,2,3:6,2,3:2,3,4:2,8,2:2,2,2,4,2:1,2,2,5:3,2,4,2:2,2,5:2,2:2,4:4,1:2,9:1,2:7,3,5:4,2,1,1:8,1,1:2,1,1",
     "3:2,1:2,2,2:2,2,4:1,2,4:1,1,4,3:1,1,6,1,1:8,1,1,1:8,5,1:3,2,3,1:3,1,4,2:2,1,2,9:2,2,1,1,3:3,1,2,1,4:2,1,2,1,1:1,2,1,1,1,4:3,1,1,1,1,1:1,2,5,1,1:2,1,4,1,1:3,1,1"),
];

fn main() {
    let matches = App::new("picross")
        .version("0.1.0")
        .about("solves nonogram puzzles by line-by-line deduction")
        .arg(Arg::with_name("puzzle")
                 .help("name of a built-in puzzle (see --list)")
                 .index(1))
        .arg(Arg::with_name("file")
                 .short("f")
                 .long("file")
                 .takes_value(true)
                 .value_name("PATH")
                 .help("load a puzzle from a YAML file with 'rows' and 'cols' lists"))
        .arg(Arg::with_name("list")
                 .short("l")
                 .long("list")
                 .help("list the built-in puzzles"))
        .arg(Arg::with_name("verbose")
                 .short("v")
                 .multiple(true)
                 .help("increase log verbosity (-v info, -vv debug, -vvv trace)"))
        .arg(Arg::with_name("no-color")
                 .long("no-color")
                 .help("disable colored output"))
        .arg(Arg::with_name("max-rounds")
                 .long("max-rounds")
                 .takes_value(true)
                 .value_name("N")
                 .help("give up after N propagation rounds"))
        .get_matches();

    if let Err(err) = setup_logging(matches.occurrences_of("verbose")) {
        eprintln!("failed to set up logging: {}", err);
        process::exit(1);
    }

    if matches.is_present("list") {
        for (name, _, _) in BUILTIN_PUZZLES.iter() {
            println!("{}", name);
        }
        return;
    }

    if let Err(message) = run(&matches) {
        error!("{}", message);
        process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), String> {
    let puzzle = load_puzzle(matches)?;
    let emit_color = !matches.is_present("no-color") && is_a_tty(io::stdout());
    let max_rounds = matches.value_of("max-rounds")
                            .map(|v| v.parse::<usize>()
                                      .map_err(|_| format!("--max-rounds: {:?} is not a number", v)))
                            .transpose()?;

    let mut solver = Solver::new(puzzle);
    while !solver.is_done() {
        if let Some(limit) = max_rounds {
            if solver.rounds() >= limit {
                break;
            }
        }
        solver.round().map_err(|e| e.to_string())?;
    }

    println!("{}", solver.puzzle.render(emit_color));
    let report = solver.report();
    if !solver.is_done() {
        println!("gave up after {} rounds ({} squares settled)",
                 report.rounds, report.cells_changed);
    } else {
        match report.outcome {
            Outcome::Solved =>
                println!("solved in {} rounds ({} squares settled)",
                         report.rounds, report.cells_changed),
            Outcome::Stalled =>
                println!("stalled after {} rounds ({} squares settled); \
                          the rest needs more than line-by-line deduction",
                         report.rounds, report.cells_changed),
        }
    }
    Ok(())
}

fn load_puzzle(matches: &ArgMatches) -> Result<Puzzle, String> {
    if let Some(path) = matches.value_of("file") {
        let text = fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path, e))?;
        let docs = YamlLoader::load_from_str(&text).map_err(|e| format!("{}: not valid YAML: {}", path, e))?;
        let doc = docs.get(0).ok_or_else(|| format!("{}: empty document", path))?;
        return Puzzle::from_yaml(doc).map_err(|e| e.to_string());
    }
    if let Some(name) = matches.value_of("puzzle") {
        let key = name.to_lowercase();
        for (pname, rows, cols) in BUILTIN_PUZZLES.iter() {
            if *pname == key {
                return Puzzle::from_descriptors(rows, cols).map_err(|e| e.to_string());
            }
        }
        return Err(format!("no built-in puzzle named {:?}; try --list", name));
    }
    Err(String::from("nothing to solve: give a puzzle name or --file (see --help)"))
}

fn setup_logging(verbosity: u64) -> Result<(), fern::InitError> {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{:5}] {}", record.level(), message))
        })
        .level(level)
        .chain(io::stderr())
        .apply()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::BUILTIN_PUZZLES;
    use crate::puzzle::Puzzle;

    #[test]
    fn every_builtin_puzzle_parses() {
        for (name, rows, cols) in BUILTIN_PUZZLES.iter() {
            let puzzle = Puzzle::from_descriptors(rows, cols)
                .unwrap_or_else(|e| panic!("{}: {}", name, e));
            assert!(puzzle.width() > 0 && puzzle.height() > 0, "{}", name);
        }
    }
}
