//! Interactive front end
//!
//! Reads one line at a time and runs it against a long-lived environment.
//! Errors are reported and the session carries on; an empty line ends it.

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::diagnostics;
use crate::interp::{Environment, Host, Interpreter, StdHost, Value};

const PROMPT: &str = "-> ";

const HELP: &str = "\
Commands:
  :help, :h    Show this help
  :env         List visible variables
  :quit, :q    Exit the REPL (so does an empty line)";

/// What a single REPL line produced
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The session should end
    Quit,
    /// The line evaluated to a value worth showing
    Value(Value),
    /// The line ran for its side effects only
    Nothing,
    /// Text produced by a `:` command
    Info(String),
}

/// A REPL session: one environment shared by every line
pub struct Session<H: Host> {
    env: Environment,
    host: H,
}

impl<H: Host> Session<H> {
    pub fn new(host: H) -> Self {
        Self {
            env: Environment::new(),
            host,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Run one line of input
    pub fn eval_line(&mut self, line: &str) -> diagnostics::Result<Outcome> {
        let trimmed = line.trim();
        match trimmed {
            "" | ":quit" | ":q" => return Ok(Outcome::Quit),
            ":help" | ":h" => return Ok(Outcome::Info(HELP.to_string())),
            ":env" => return Ok(Outcome::Info(self.describe_env())),
            _ => {}
        }

        let value = Interpreter::new(&mut self.env, &mut self.host).run(trimmed)?;
        if value.is_nil() {
            Ok(Outcome::Nothing)
        } else {
            Ok(Outcome::Value(value))
        }
    }

    fn describe_env(&self) -> String {
        let bindings = self.env.bindings();
        if bindings.is_empty() {
            return "(no variables)".to_string();
        }
        bindings
            .iter()
            .map(|(name, value)| match value {
                Value::Str(s) => format!("{} = {:?}", name, s),
                other => format!("{} = {}", name, other),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Run the interactive REPL on the terminal
pub fn run(history: Option<&Path>) -> Result<()> {
    println!("scrawl REPL v{}", crate::VERSION);
    println!("Type :help for help, an empty line to exit");
    println!();

    let mut editor = DefaultEditor::new().into_diagnostic()?;
    if let Some(path) = history {
        if let Err(e) = editor.load_history(path) {
            tracing::debug!("no history loaded from {:?}: {}", path, e);
        }
    }

    let mut session = Session::new(StdHost);

    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e).into_diagnostic(),
        };

        if !line.trim().is_empty() {
            editor.add_history_entry(line.as_str()).into_diagnostic()?;
        }

        match session.eval_line(&line) {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Value(value)) => println!("{}", value),
            Ok(Outcome::Info(text)) => println!("{}", text),
            Ok(Outcome::Nothing) => {}
            Err(err) => {
                tracing::debug!(stage = err.stage(), "line failed");
                eprintln!("{:?}", miette::Report::new(err));
            }
        }
    }

    if let Some(path) = history {
        editor.save_history(path).into_diagnostic()?;
    }

    println!("Goodbye!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Error;
    use crate::interp::CaptureHost;
    use pretty_assertions::assert_eq;

    fn session() -> Session<CaptureHost> {
        Session::new(CaptureHost::new())
    }

    #[test]
    fn test_empty_line_quits() {
        let mut s = session();
        assert_eq!(s.eval_line("").unwrap(), Outcome::Quit);
        assert_eq!(s.eval_line("   \t").unwrap(), Outcome::Quit);
    }

    #[test]
    fn test_state_survives_between_lines() {
        let mut s = session();
        assert_eq!(s.eval_line("let x = 2;").unwrap(), Outcome::Nothing);
        assert_eq!(s.eval_line("x * 21;").unwrap(), Outcome::Value(Value::Int(42)));
    }

    #[test]
    fn test_error_does_not_end_session() {
        let mut s = session();
        assert_eq!(s.eval_line("{ let z; y = 1; }").unwrap_err(), Error::name_not_found("y"));
        assert_eq!(s.env().depth(), 1);
        assert_eq!(s.eval_line("let y = 1;").unwrap(), Outcome::Nothing);
        assert_eq!(s.eval_line("print y;").unwrap(), Outcome::Nothing);
        assert_eq!(s.host().output(), ["1"]);
    }

    #[test]
    fn test_output_goes_to_host() {
        let mut s = session();
        s.eval_line("print \"a\";").unwrap();
        s.host.clear_output();
        s.eval_line("print \"b\";").unwrap();
        assert_eq!(s.host().output(), ["b"]);
    }

    #[test]
    fn test_env_command_lists_bindings() {
        let mut s = session();
        s.eval_line("let a = \"hi\";").unwrap();
        s.eval_line("let b;").unwrap();
        assert_eq!(
            s.eval_line(":env").unwrap(),
            Outcome::Info("a = \"hi\"\nb = nil".to_string())
        );
    }
}
