//! REPL (Read-Eval-Print Loop) for aug

use crate::error::report_error;
use crate::interp::{Interpreter, Outcome, ScopeStack};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::fmt::Write as _;
use std::path::PathBuf;

const PROMPT: &str = "> ";
const HISTORY_FILE: &str = ".aug_history";
const SOURCE_NAME: &str = "<repl>";

/// REPL state
pub struct Repl {
    editor: DefaultEditor,
    interpreter: Interpreter,
    history_path: Option<PathBuf>,
}

impl Repl {
    /// Create a new REPL
    pub fn new() -> RlResult<Self> {
        let editor = DefaultEditor::new()?;
        let interpreter = Interpreter::new();

        // Try to find history file in home directory
        let history_path = dirs_home().map(|h| h.join(HISTORY_FILE));

        let mut repl = Repl {
            editor,
            interpreter,
            history_path,
        };

        // Missing history is normal on first start
        if let Some(ref path) = repl.history_path {
            let _ = repl.editor.load_history(path);
        }

        Ok(repl)
    }

    /// Run the REPL
    pub fn run(&mut self) -> RlResult<()> {
        println!("aug REPL v{}", env!("CARGO_PKG_VERSION"));
        println!("Type :help for help, :quit to exit.\n");

        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    let _ = self.editor.add_history_entry(line);

                    let done = if line.starts_with(':') {
                        self.handle_command(line)
                    } else {
                        self.eval_line(line)
                    };
                    if done {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Goodbye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {err}");
                    break;
                }
            }
        }

        if let Some(ref path) = self.history_path {
            let _ = self.editor.save_history(path);
        }

        Ok(())
    }

    /// Handle REPL commands (starting with :). Returns true to end the session.
    fn handle_command(&mut self, cmd: &str) -> bool {
        match cmd {
            ":quit" | ":q" => {
                println!("Goodbye!");
                true
            }
            ":help" | ":h" | ":?" => {
                print_help();
                false
            }
            ":vars" | ":v" => {
                print!("{}", format_vars(self.interpreter.scopes()));
                false
            }
            ":clear" => {
                self.interpreter.reset();
                println!("All variables cleared.");
                false
            }
            _ => {
                println!("Unknown command: {cmd}");
                println!("Type :help for help.");
                false
            }
        }
    }

    /// Run one line as a program fragment. Returns true when it executed `exit`.
    fn eval_line(&mut self, line: &str) -> bool {
        match crate::run_source(&mut self.interpreter, line) {
            Ok(Outcome::Completed) => false,
            Ok(Outcome::Exited) => {
                println!("Goodbye!");
                true
            }
            Err(err) => {
                report_error(SOURCE_NAME, line, &err);
                false
            }
        }
    }
}

impl Default for Repl {
    fn default() -> Self {
        Self::new().expect("Failed to create REPL")
    }
}

fn print_help() {
    println!("aug REPL Commands:");
    println!("  :help, :h, :?   Show this help");
    println!("  :quit, :q       Exit the REPL");
    println!("  :vars, :v       List global variables");
    println!("  :clear          Drop every variable");
    println!();
    println!("Each line runs as a program; variables persist between lines.");
    println!("  x := 6 * 7; print(x)");
    println!("  for i := 1 to 3 do print(concatenate(\"#\", \"!\"))");
    println!("  exit            End the session");
}

/// One `name = value` line per global, sorted by name
fn format_vars(scopes: &ScopeStack) -> String {
    let globals = scopes.globals();
    if globals.is_empty() {
        return "(no variables)\n".to_string();
    }
    let mut out = String::new();
    for (name, value) in globals {
        let _ = writeln!(out, "{name} : {} = {value}", value.type_name());
    }
    out
}

/// Get home directory
fn dirs_home() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        std::env::var("USERPROFILE").ok().map(PathBuf::from)
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOME").ok().map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::Value;

    #[test]
    fn test_handle_command_quit() {
        let mut repl = Repl::new().unwrap();
        assert!(repl.handle_command(":quit"));
        assert!(repl.handle_command(":q"));
    }

    #[test]
    fn test_handle_command_non_quit() {
        let mut repl = Repl::new().unwrap();
        assert!(!repl.handle_command(":help"));
        assert!(!repl.handle_command(":vars"));
        assert!(!repl.handle_command(":unknown"));
    }

    #[test]
    fn test_globals_persist_between_lines() {
        let mut repl = Repl::new().unwrap();
        assert!(!repl.eval_line("x := 40"));
        assert!(!repl.eval_line("x := x + 2"));
        assert_eq!(repl.interpreter.scopes().get("x"), Some(&Value::Int(42)));
    }

    #[test]
    fn test_errors_do_not_end_session() {
        let mut repl = Repl::new().unwrap();
        assert!(!repl.eval_line("x := 1 / 0"));
        assert!(!repl.eval_line("x := "));
        assert!(!repl.eval_line("y := \"ok\""));
        assert!(repl.interpreter.scopes().contains("y"));
    }

    #[test]
    fn test_exit_ends_session() {
        let mut repl = Repl::new().unwrap();
        assert!(repl.eval_line("exit"));
    }

    #[test]
    fn test_clear_drops_bindings() {
        let mut repl = Repl::new().unwrap();
        repl.eval_line("x := 1");
        assert!(!repl.handle_command(":clear"));
        assert!(!repl.interpreter.scopes().contains("x"));
    }

    #[test]
    fn test_format_vars() {
        let mut scopes = ScopeStack::new();
        assert_eq!(format_vars(&scopes), "(no variables)\n");

        scopes.set("name", Value::from("ada")).unwrap();
        scopes.set("count", Value::Int(3)).unwrap();
        assert_eq!(
            format_vars(&scopes),
            "count : integer = 3\nname : string = ada\n"
        );
    }

    #[test]
    fn test_history_file_name() {
        let repl = Repl::new().unwrap();
        if let Some(path) = repl.history_path {
            assert!(path.to_string_lossy().ends_with(".aug_history"));
        }
    }
}
