//! # Calculator Console
//!
//! Entry point for the `calc` binary.

use calc_console::{parse_args, usage, Console, ConsoleError};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("calc");

    let options = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("{}", usage(program));
        process::exit(2);
    });
    if options.help {
        println!("{}", usage(program));
        return;
    }

    let mut console = Console::from_options(&options).unwrap_or_else(|e| {
        eprintln!("Failed to start calculator: {}", e);
        process::exit(1);
    });

    let stdout = io::stdout();
    let mut output = stdout.lock();
    let result = match &options.script_path {
        Some(path) => File::open(path)
            .map_err(ConsoleError::from)
            .and_then(|file| console.run(BufReader::new(file), &mut output)),
        None => console.run(io::stdin().lock(), &mut output),
    };

    if options.trace {
        if let Err(e) = console.write_trace(&mut io::stderr()) {
            eprintln!("Failed to write trace: {}", e);
        }
    }

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
