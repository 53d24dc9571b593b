use std::io::Write;

fn main() {
    let code = match std::env::current_dir() {
        Ok(cwd) => bobtest::cli::run(std::env::args_os().skip(1), &cwd),
        Err(err) => {
            let _ = writeln!(
                std::io::stderr(),
                "ERROR: could not determine the current directory: {err}"
            );
            1
        }
    };
    let _ = std::io::stdout().flush();
    std::process::exit(code);
}
