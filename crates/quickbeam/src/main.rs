//! Command-line driver for Quickbeam
//!
//! Runs a program given on the command line or in a file, replays the
//! built-in sample programs, or starts an interactive session.

mod repl;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use quickbeam::{Bindings, ErrorKind, EvalContext, Interpreter, QuickbeamError, ERROR_OUTPUT};
use serde::Serialize;
use tracing::{warn, Level};

/// Sample programs replayed by `--demo`, in order, on one session.
const DEMO_PROGRAMS: [&str; 4] = [
    "x = 001;",
    "x_2 = 0;",
    "x = 0 y = x; z = ---(x+y);",
    "x = 1; y = 2; z = ---(x+y)*(x+-y);",
];

/// quickbeam runs tiny integer assignment programs such as `x = 1; y = -(x+2)*3;`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Program text to run. Starts an interactive session when omitted.
    program: Option<String>,

    /// Read the program from a file instead.
    #[arg(short, long, value_name = "PATH", conflicts_with = "program")]
    file: Option<PathBuf>,

    /// Replay the built-in sample programs on one shared session.
    #[arg(long, conflicts_with_all = ["program", "file"])]
    demo: bool,

    /// Print a JSON report instead of `name = value` lines.
    #[arg(long)]
    json: bool,

    /// Print the parsed program as JSON instead of running it.
    #[arg(long)]
    dump_ast: bool,

    /// Undo every assignment of a program that fails part way.
    #[arg(long)]
    atomic: bool,

    /// Maximum nesting depth for parentheses, negations and operands.
    #[arg(long, default_value_t = quickbeam::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON.
    #[arg(long)]
    log_json: bool,
}

/// JSON shape printed by `--json`.
#[derive(Serialize)]
#[serde(untagged)]
enum Report {
    Success { bindings: Bindings },
    Failure { error: ErrorReport },
}

#[derive(Serialize)]
struct ErrorReport {
    kind: ErrorKind,
    message: String,
}

impl From<std::result::Result<Bindings, QuickbeamError>> for Report {
    fn from(outcome: std::result::Result<Bindings, QuickbeamError>) -> Self {
        match outcome {
            Ok(bindings) => Report::Success { bindings },
            Err(err) => Report::Failure {
                error: ErrorReport {
                    kind: err.kind(),
                    message: err.to_string(),
                },
            },
        }
    }
}

fn init_logging(verbose: u8, json: bool) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Execute `program` and render the outcome as plain lines or JSON.
pub(crate) fn render(interp: &mut Interpreter, program: &str, json: bool) -> Result<String> {
    let outcome = interp.execute(program);
    if let Err(err) = &outcome {
        warn!(kind = %err.kind(), error = %err, "program failed");
    }

    if json {
        return Ok(serde_json::to_string(&Report::from(outcome))?);
    }
    Ok(match outcome {
        Ok(bindings) => bindings.to_string(),
        Err(_) => ERROR_OUTPUT.to_string(),
    })
}

fn print_output(output: &str) {
    if !output.is_empty() {
        println!("{}", output);
    }
}

fn run_demo(interp: &mut Interpreter, json: bool) -> Result<()> {
    for program in DEMO_PROGRAMS {
        println!("Input: {}", program.trim());
        print_output(&render(interp, program, json)?);
        println!();
    }
    Ok(())
}

fn dump_ast(interp: &Interpreter, program: &str) -> Result<()> {
    match interp.parse(program) {
        Ok(parsed) => println!("{}", serde_json::to_string_pretty(&parsed)?),
        Err(err) => {
            warn!(kind = %err.kind(), error = %err, "program failed to parse");
            println!("{}", ERROR_OUTPUT);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.log_json);

    let ctx = EvalContext::with_max_depth(args.max_depth)
        .atomic(args.atomic)
        .trace(args.verbose >= 2);
    let mut interp = Interpreter::with_context(ctx);

    if args.demo {
        return run_demo(&mut interp, args.json);
    }

    let program = match (args.program, args.file) {
        (Some(program), _) => program,
        (None, Some(path)) => fs::read_to_string(&path)
            .with_context(|| format!("failed to read program from {}", path.display()))?,
        (None, None) => return repl::run(&mut interp, args.json),
    };

    if args.dump_ast {
        return dump_ast(&interp, &program);
    }

    print_output(&render(&mut interp, &program, args.json)?);
    Ok(())
}
