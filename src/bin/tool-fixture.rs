//! For `bobtest`s tests only
//!
//! Stands in for both the compiler and the snapshot tool.  Every invocation is
//! appended to the file named by `FIXTURE_LOG` as `<cwd>\t<args>`.  Any
//! argument naming an existing file containing an `exit=<code>` line makes the
//! fixture exit with that code; otherwise `-o <path>` is honoured by writing an
//! empty file there.

use std::env;
use std::error::Error;
use std::io;
use std::io::Write;
use std::path::Path;
use std::process;

fn requested_exit(args: &[String]) -> Result<Option<i32>, Box<dyn Error>> {
    for arg in args {
        let path = Path::new(arg);
        if !path.is_file() {
            continue;
        }
        let text = std::fs::read_to_string(path)?;
        for line in text.lines() {
            if let Some(code) = line.trim().strip_prefix("exit=") {
                return Ok(Some(code.parse()?));
            }
        }
    }
    Ok(None)
}

fn run() -> Result<i32, Box<dyn Error>> {
    let args: Vec<String> = env::args().skip(1).collect();

    if let Ok(log) = env::var("FIXTURE_LOG") {
        let cwd = env::current_dir()?;
        let mut log = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log)?;
        writeln!(log, "{}\t{}", cwd.display(), args.join(" "))?;
    }

    if let Some(code) = requested_exit(&args)? {
        return Ok(code);
    }

    if let Some(output) = args
        .iter()
        .position(|a| a == "-o")
        .and_then(|i| args.get(i + 1))
    {
        std::fs::write(output, "")?;
    }

    Ok(0)
}

fn main() {
    let code = match run() {
        Ok(code) => code,
        Err(ref e) => {
            write!(&mut io::stderr(), "{e}").expect("writing to stderr won't fail");
            1
        }
    };
    process::exit(code);
}
