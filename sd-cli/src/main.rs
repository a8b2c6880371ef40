//! sd CLI — run, assemble, and disassemble character programs.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Input/usage/assembly error
//! - 2: Runtime error

mod commands;

use std::process;

use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "run" => commands::run(&args[2..]),
        "assemble" => commands::assemble(&args[2..]),
        "disassemble" => commands::disassemble(&args[2..]),
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

/// Log to stderr so stdout carries only program output.
///
/// `RUST_LOG` overrides the default `warn` filter; `RUST_LOG=sd_vm=trace`
/// logs every executed instruction.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

pub(crate) fn print_usage() {
    eprintln!("Usage: sd <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run [program]                        Run a program file (stdin if omitted or '-')");
    eprintln!("  assemble <input.sda> [-o output.sd]  Assemble mnemonic text to a program");
    eprintln!("  disassemble [program]                Print the mnemonic listing of a program");
}
