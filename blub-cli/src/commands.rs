//! CLI command implementations.

use std::io::{self, Write};
use std::path::Path;

use blub_cli::{load_program, CliError};
use blub_common::Program;

/// Execute a program, writing `prnt` output to stdout.
pub fn run(args: &[String]) -> Result<(), i32> {
    let Some(input) = args.first() else {
        eprintln!("error: run requires an input file");
        eprintln!("Usage: blub run <prog.blub> [--listing]");
        return Err(1);
    };

    let mut listing = false;
    for flag in &args[1..] {
        match flag.as_str() {
            "--listing" => listing = true,
            other => {
                eprintln!("error: unknown option '{other}'");
                return Err(1);
            }
        }
    }

    let program = load(input)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if listing {
        emit(&mut out, &blub_assembler::listing(&program))?;
        emit(&mut out, "Result:\n")?;
    }

    blub_vm::run(&program, &mut out)
        .map_err(|e| report(CliError::from(e)))?;
    out.flush().map_err(write_failed)
}

/// Print the numbered listing of a program.
pub fn print(args: &[String]) -> Result<(), i32> {
    let Some(input) = args.first() else {
        eprintln!("error: print requires an input file");
        eprintln!("Usage: blub print <prog.blub>");
        return Err(1);
    };

    let program = load(input)?;
    emit(&mut io::stdout().lock(), &blub_assembler::listing(&program))
}

/// Assemble a program without running it.
pub fn check(args: &[String]) -> Result<(), i32> {
    let Some(input) = args.first() else {
        eprintln!("error: check requires an input file");
        eprintln!("Usage: blub check <prog.blub>");
        return Err(1);
    };

    let program = load(input)?;
    let summary = format!("OK: {input} ({} instructions)\n", program.len());
    emit(&mut io::stdout().lock(), &summary)
}

// --- Helpers ---

fn load(input: &str) -> Result<Program, i32> {
    load_program(Path::new(input)).map_err(report)
}

/// Print an error and map it to its exit code.
fn report(e: CliError) -> i32 {
    match e {
        CliError::Runtime(_) => eprintln!("runtime error: {e}"),
        _ => eprintln!("error: {e}"),
    }
    e.exit_code()
}

/// Write `text` to `out` and flush, reporting a failed write as exit code 1.
fn emit(out: &mut dyn Write, text: &str) -> Result<(), i32> {
    out.write_all(text.as_bytes())
        .and_then(|()| out.flush())
        .map_err(write_failed)
}

fn write_failed(e: io::Error) -> i32 {
    eprintln!("error: cannot write output: {e}");
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A sink whose reader has gone away.
    struct Closed;

    impl Write for Closed {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn emit_writes_and_flushes() {
        let mut out = Vec::new();
        assert_eq!(emit(&mut out, "1    prnt r0\n"), Ok(()));
        assert_eq!(out, b"1    prnt r0\n");
    }

    #[test]
    fn emit_reports_closed_output() {
        assert_eq!(emit(&mut Closed, "OK\n"), Err(1));
    }
}
