use crate::cli::parser::Commands;
use crate::cli::session::{Flow, Session};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::header;
use std::io::{self, BufRead, IsTerminal, Write};

const PROMPT: &str = "logbook> ";

/// Handle the `session` command
///
/// Lines are read from stdin one at a time so that an overwrite
/// confirmation during `export` can read its own answer.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Session { file } = cmd {
        let interactive = io::stdin().is_terminal();
        let mut session = Session::new(cfg);

        if interactive {
            header("logbook session (type `help` for commands)");
        }

        if let Some(f) = file {
            session.open_reporting(f);
        }

        let stdin = io::stdin();
        loop {
            if interactive {
                print!("{PROMPT}");
                io::stdout().flush().ok();
            }

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                break;
            }

            if session.execute_reporting(&line) == Flow::Quit {
                break;
            }
        }
    }
    Ok(())
}
