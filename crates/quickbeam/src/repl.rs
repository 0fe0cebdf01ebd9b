//! Interactive session
//!
//! Every line is run as a program against one interpreter, so assignments
//! accumulate. Lines starting with `:` are meta-commands.

use anyhow::Result;
use quickbeam::{Interpreter, VERSION};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::render;

/// REPL command metadata.
#[derive(Debug, Clone, Copy)]
struct ReplCommand {
    /// Command name (without leading colon)
    name: &'static str,

    /// Argument placeholder shown in help
    usage: &'static str,

    /// Short description of what the command does
    description: &'static str,
}

const COMMANDS: &[ReplCommand] = &[
    ReplCommand {
        name: "help",
        usage: "",
        description: "show this message",
    },
    ReplCommand {
        name: "env",
        usage: "",
        description: "list every variable in the session",
    },
    ReplCommand {
        name: "reset",
        usage: "",
        description: "forget every variable",
    },
    ReplCommand {
        name: "ast",
        usage: " PROGRAM",
        description: "show how PROGRAM parses, without running it",
    },
    ReplCommand {
        name: "tokens",
        usage: " PROGRAM",
        description: "show the tokens of PROGRAM",
    },
    ReplCommand {
        name: "quit",
        usage: "",
        description: "leave the session (also :q or Ctrl-D)",
    },
];

/// What the loop should do after a line.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Print(String),
    Quit,
}

/// Run the read-eval-print loop until `:quit` or end of input.
pub fn run(interp: &mut Interpreter, json: bool) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    println!("quickbeam {} (:help for commands)", VERSION);

    loop {
        match editor.readline("qb> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line)?;

                match dispatch(interp, line, json)? {
                    Flow::Print(output) if !output.is_empty() => println!("{}", output),
                    Flow::Print(_) => {}
                    Flow::Quit => break,
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn dispatch(interp: &mut Interpreter, line: &str, json: bool) -> Result<Flow> {
    let Some(command) = line.strip_prefix(':') else {
        return Ok(Flow::Print(render(interp, line, json)?));
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    let output = match name {
        "q" | "quit" => return Ok(Flow::Quit),
        "help" => help_text(),
        "env" => interp.environment().bindings().to_string(),
        "reset" => {
            interp.reset();
            String::new()
        }
        "ast" => match interp.parse(arg) {
            Ok(program) => program.to_string(),
            Err(err) => err.to_string(),
        },
        "tokens" => match interp.tokenize(arg) {
            Ok(tokens) => tokens
                .iter()
                .map(|t| format!("{:?} {}", t.kind, t))
                .collect::<Vec<_>>()
                .join("\n"),
            Err(err) => err.to_string(),
        },
        other => format!("unknown command `:{}`, try :help", other),
    };
    Ok(Flow::Print(output))
}

fn help_text() -> String {
    let mut lines = vec!["Enter assignments such as `x = 1; y = -(x + 2) * 3;`".to_string()];
    for cmd in COMMANDS {
        lines.push(format!(
            "  :{:<16} {}",
            format!("{}{}", cmd.name, cmd.usage),
            cmd.description
        ));
    }
    lines.join("\n")
}
