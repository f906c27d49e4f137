//! Blub CLI: print and run Blub assembly programs.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Usage, input or assembly error
//! - 3: Runtime error

mod commands;

use std::process;

use blub_cli::logger;

fn main() {
    let mut args: Vec<String> = std::env::args().collect();
    if let Err(e) = logger::init(logger::take_verbosity(&mut args)) {
        eprintln!("warning: {e}");
    }

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "run" => commands::run(&args[2..]),
        "print" => commands::print(&args[2..]),
        "check" => commands::check(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            process::exit(0);
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

fn print_usage() {
    eprintln!("Usage: blub [-v|-vv] <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run <prog.blub> [--listing]   Execute a program (optionally list it first)");
    eprintln!("  print <prog.blub>             Print the numbered program listing");
    eprintln!("  check <prog.blub>             Assemble a program and report its size");
}
