//! Command-line entry point: `bobtest [record|replay]`

use std::ffi::OsString;
use std::path::Path;

use crate::macros::println;

/// More than one positional argument was given
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Usage {
    pub extra: usize,
}

impl std::fmt::Display for Usage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let palette = crate::Palette::current();
        writeln!(f, "Usage: bobtest <{}|{}>", crate::Mode::RECORD, crate::Mode::REPLAY)?;
        write!(f, "{} too many arguments provided", palette.error("ERROR:"))
    }
}

impl std::error::Error for Usage {}

/// Pick the mode from the arguments following the program name
///
/// No argument selects `default`; a single argument is taken verbatim.
pub fn parse_args(
    args: impl IntoIterator<Item = impl Into<OsString>>,
    default: crate::Mode,
) -> Result<crate::Mode, Usage> {
    let mut args = args.into_iter().map(Into::into);
    let Some(first) = args.next() else {
        return Ok(default);
    };
    let extra = args.count();
    if extra == 0 {
        Ok(crate::Mode::new(first))
    } else {
        Err(Usage { extra })
    }
}

/// Run the whole suite from `cwd` and report the process exit code
///
/// `args` excludes the program name.
pub fn run(args: impl IntoIterator<Item = impl Into<OsString>>, cwd: &Path) -> i32 {
    let palette = crate::Palette::current();

    let mode = match parse_args(args, crate::Mode::replay()) {
        Ok(mode) => mode,
        Err(usage) => {
            println!("{usage}");
            return 1;
        }
    };
    if !mode.is_known() {
        println!(
            "{} `{}` is neither `{}` nor `{}`, passing it on as-is",
            palette.warn("WARNING:"),
            mode,
            crate::Mode::RECORD,
            crate::Mode::REPLAY
        );
    }

    let (config, examples) = match prepare(cwd) {
        Ok(prepared) => prepared,
        Err(err) => {
            println!("{} {}", palette.error("ERROR:"), err);
            return 1;
        }
    };

    let toolchain = crate::System::new(&config, cwd);
    let mut runner = crate::Runner::new(toolchain, crate::Layout::from(&config));
    match runner.run(&examples, &mode) {
        Ok(summary) => {
            println!("{summary}");
            0
        }
        Err(failure) => {
            println!("{} {}", palette.error("ERROR:"), failure);
            failure.exit_code()
        }
    }
}

fn prepare(cwd: &Path) -> Result<(crate::schema::Config, Vec<crate::Example>), crate::Error> {
    let config = crate::schema::Config::discover(cwd)?;
    let examples = crate::discover::discover(&cwd.join(&config.examples_dir))?;
    let examples = examples
        .into_iter()
        .map(|example| example.relative_to(cwd))
        .collect();
    Ok((config, examples))
}
