//! REPL (Read-Eval-Print Loop) for Plorth

use crate::context::Context;
use crate::runtime::Runtime;
use crate::value;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;

const PROMPT: &str = "> ";
const HISTORY_FILE: &str = ".plorth_history";

/// REPL state
pub struct Repl {
    editor: DefaultEditor,
    context: Context,
    history_path: Option<PathBuf>,
}

impl Repl {
    /// Create a new REPL with a fresh runtime and one persistent context
    pub fn new() -> RlResult<Self> {
        let editor = DefaultEditor::new()?;
        let runtime = Runtime::new();
        let context = runtime.new_context();

        let history_path = std::env::var_os("HOME").map(|home| PathBuf::from(home).join(HISTORY_FILE));

        let mut repl = Repl {
            editor,
            context,
            history_path,
        };

        if let Some(ref path) = repl.history_path {
            let _ = repl.editor.load_history(path);
        }

        Ok(repl)
    }

    /// Run the REPL
    pub fn run(&mut self) -> RlResult<()> {
        println!("Plorth REPL");
        println!("Type :help for help, :quit to exit.\n");

        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    let _ = self.editor.add_history_entry(line);

                    if line.starts_with(':') && !line.starts_with(": ") {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    self.eval_input(line);
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

    /// Compile and execute one line against the persistent context
    fn eval_input(&mut self, line: &str) {
        let Some(quote) = self.context.compile(line) else {
            self.report_pending_error();
            return;
        };

        self.context.call(&quote);
        if self.context.error().is_some() {
            self.report_pending_error();
        } else {
            self.print_stack();
        }
    }

    fn report_pending_error(&mut self) {
        if let Some(error) = self.context.error() {
            eprintln!("{}", error.display_with_filename(None));
        }
        self.context.clear_error();
    }

    fn print_stack(&self) {
        let size = self.context.size();

        for (i, value) in self.context.data().iter().enumerate() {
            println!("{}: {}", size - i, value::to_source(value));
        }
    }

    /// Handle REPL commands (starting with :)
    fn handle_command(&mut self, cmd: &str) -> bool {
        match cmd {
            ":quit" | ":q" | ":exit" => {
                println!("Goodbye!");
                true
            }
            ":help" | ":h" | ":?" => {
                self.print_help();
                false
            }
            ":stack" | ":s" => {
                if self.context.is_empty() {
                    println!("Stack is empty.");
                } else {
                    self.print_stack();
                }
                false
            }
            ":clear" => {
                self.context.clear();
                false
            }
            ":words" => {
                let mut names: Vec<String> = self
                    .context
                    .dictionary()
                    .keys()
                    .cloned()
                    .chain(self.context.runtime().global_names())
                    .collect();

                names.sort();
                names.dedup();
                println!("{}", names.join(" "));
                false
            }
            _ => {
                println!("Unknown command: {cmd}");
                println!("Type :help for help.");
                false
            }
        }
    }

    /// Print help message
    fn print_help(&self) {
        println!("Plorth REPL Commands:");
        println!("  :help, :h, :?   Show this help");
        println!("  :stack, :s      Show the data stack");
        println!("  :clear          Clear the data stack");
        println!("  :words          List known words");
        println!("  :quit, :q       Exit the REPL");
    }
}
