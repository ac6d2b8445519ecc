//! aacburn - batch AAC converter and disc-burn stager
//!
//! Converts every recognized audio file in a folder to AAC through an
//! external encoder, then stages the results (plus any manually added
//! files) for an external burning tool. This file is only the
//! interactive front end; the workflow itself lives in `session`.

mod burning;
mod config;
mod conversion;
mod logging;
mod session;
#[cfg(test)]
mod test_support;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use config::ToolConfig;
use session::Session;

const ATTRIBUTION_URL: &str = "https://github.com/zinzied";

fn print_help() {
    println!("Commands:");
    println!("  input <dir>     select the input folder");
    println!("  output <dir>    select the output folder");
    println!("  convert         convert all recognized audio files to AAC");
    println!("  add <file>...   add files to burn manually");
    println!("  burn            stage files and start burning");
    println!("  status          show the latest status line");
    println!("  log             show the full status log");
    println!("  about           show attribution");
    println!("  quit            exit");
}

/// Run one conversion batch, echoing progress as it arrives
fn run_conversion(session: &mut Session, tools: &ToolConfig) {
    let handle = match session.start_conversion(tools) {
        Ok(handle) => handle,
        Err(e) => {
            println!("{}", e);
            return;
        }
    };

    while let Some(event) = handle.recv() {
        println!("{}", session.record_event(&event));
    }
}

fn handle_command(session: &mut Session, tools: &ToolConfig, line: &str) -> bool {
    let mut parts = line.split_whitespace();
    let command = match parts.next() {
        Some(c) => c,
        None => return true,
    };
    let rest: Vec<&str> = parts.collect();

    match command {
        "input" if !rest.is_empty() => {
            if let Err(e) = session.select_input(PathBuf::from(rest.join(" "))) {
                println!("{}", e);
            }
        }
        "output" if !rest.is_empty() => {
            if let Err(e) = session.select_output(PathBuf::from(rest.join(" "))) {
                println!("{}", e);
            }
        }
        "convert" => run_conversion(session, tools),
        "add" if !rest.is_empty() => {
            let paths = rest.iter().map(PathBuf::from).collect();
            let count = session.add_files(paths);
            println!("{} files added manually.", count);
        }
        "burn" => match session.burn(tools) {
            Ok(()) => println!("Burning process started."),
            Err(e) => println!("{}", e),
        },
        "status" => {
            let show = |label: &str, dir: Option<&std::path::Path>| match dir {
                Some(d) => println!("{}: {}", label, d.display()),
                None => println!("{}: Not selected", label),
            };
            show("Input folder", session.input_dir());
            show("Output folder", session.output_dir());
            println!("{}", session.status_log().last().unwrap_or("(no status)"));
        }
        "log" => {
            for entry in session.status_log().lines() {
                println!("{}", entry);
            }
        }
        "about" => {
            // Attribution is shown on request only, never opened
            // automatically at startup.
            println!("aacburn - {}", ATTRIBUTION_URL);
            if let Some(log_path) = logging::get_log_file_path() {
                println!("Log file: {}", log_path.display());
            }
        }
        "help" => print_help(),
        "quit" | "exit" => return false,
        _ => {
            println!("Unknown command. Type 'help' for a list.");
        }
    }
    true
}

fn main() {
    logging::init_logging();

    let tools = ToolConfig::load_or_create();
    if let Err(e) = tools.verify_encoder() {
        log::warn!("{}", e);
        println!("Warning: {} (conversion will fail until configured)", e);
    }

    let mut session = Session::new();
    println!("aacburn - convert audio folders to AAC and burn them to disc");
    print_help();

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {
                if !handle_command(&mut session, &tools, line.trim()) {
                    break;
                }
            }
            Err(e) => {
                eprintln!("Failed to read input: {}", e);
                break;
            }
        }
    }

    log::info!("=== aacburn session ended ===");
}
