//! CLI command implementations.

use std::fs;
use std::io::{self, Read, Write};

use sd_common::Program;
use tracing::debug;

/// Run a program and write its output bytes to stdout.
pub fn run(args: &[String]) -> Result<(), i32> {
    let text = read_source(args.first())?;

    if text.is_empty() {
        eprintln!("error: empty program");
        crate::print_usage();
        return Err(1);
    }

    let program = Program::parse(&text);
    debug!(instructions = program.len(), "loaded program");

    match sd_vm::run(&program) {
        Ok(bytes) => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(&bytes)
                .and_then(|()| stdout.flush())
                .map_err(|e| {
                    eprintln!("error: cannot write output: {e}");
                    1
                })
        }
        Err(e) => {
            eprintln!("runtime error: {}: {e}", e.kind());
            Err(2)
        }
    }
}

/// Assemble a mnemonic text file into a character program.
pub fn assemble(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: assemble requires an input file");
        eprintln!("Usage: sd assemble <input.sda> [-o output.sd]");
        return Err(1);
    }

    let input = &args[0];

    let output = if args.len() >= 3 && args[1] == "-o" {
        args[2].clone()
    } else if let Some(stem) = input.strip_suffix(".sda") {
        format!("{stem}.sd")
    } else {
        format!("{input}.sd")
    };

    let text = fs::read_to_string(input).map_err(|e| {
        eprintln!("error: cannot read '{input}': {e}");
        1
    })?;

    let program = sd_assembler::assemble(&text).map_err(|e| {
        eprintln!("error: {e}");
        1
    })?;

    fs::write(&output, program.to_text()).map_err(|e| {
        eprintln!("error: cannot write '{output}': {e}");
        1
    })?;

    eprintln!("assembled {} instructions -> {output}", program.len());
    Ok(())
}

/// Print the canonical mnemonic listing of a program.
pub fn disassemble(args: &[String]) -> Result<(), i32> {
    let text = read_source(args.first())?;
    let program = Program::parse(&text);
    print!("{}", sd_assembler::disassemble(&program));
    Ok(())
}

/// Read program text from a file, or from stdin when no path (or `-`)
/// is given.
fn read_source(path: Option<&String>) -> Result<String, i32> {
    match path.map(String::as_str) {
        None | Some("-") => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).map_err(|e| {
                eprintln!("error: cannot read stdin: {e}");
                1
            })?;
            Ok(text)
        }
        Some(path) => fs::read_to_string(path).map_err(|e| {
            eprintln!("error: cannot read '{path}': {e}");
            1
        }),
    }
}
