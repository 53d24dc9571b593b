//! The external programs the runner shells out to

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use crate::macros::println;

/// How a compiler or snapshot tool invocation ended
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    /// Exited with a non-zero code
    Code(i32),
    /// Killed by a signal, if the platform reports one
    Interrupted(Option<i32>),
}

impl CommandStatus {
    pub fn from_exit(status: std::process::ExitStatus) -> Self {
        if status.success() {
            Self::Success
        } else if let Some(code) = status.code() {
            Self::Code(code)
        } else {
            Self::Interrupted(signal(status))
        }
    }

    pub fn success(self) -> bool {
        matches!(self, Self::Success | Self::Code(0))
    }

    /// The code this process should exit with to pass the status on
    ///
    /// Signals follow the shell convention of `128 + signal`.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Code(code) => code,
            Self::Interrupted(Some(signal)) => 128 + signal,
            Self::Interrupted(None) => 1,
        }
    }
}

impl std::fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => "success".fmt(f),
            Self::Code(code) => write!(f, "exit code {code}"),
            Self::Interrupted(Some(signal)) => write!(f, "interrupted by signal {signal}"),
            Self::Interrupted(None) => "interrupted".fmt(f),
        }
    }
}

#[cfg(unix)]
fn signal(status: std::process::ExitStatus) -> Option<i32> {
    std::os::unix::process::ExitStatusExt::signal(&status)
}

#[cfg(not(unix))]
fn signal(_status: std::process::ExitStatus) -> Option<i32> {
    None
}

/// The two programs an example run needs
///
/// [`System`] spawns real processes; tests substitute a recording fake.
pub trait Toolchain {
    /// Compile `source` into the executable `output`
    fn compile(&mut self, source: &Path, output: &Path) -> Result<CommandStatus, crate::Error>;

    /// Run the snapshot tool as `<tool> <mode> <list>` from within `cwd`
    fn run_snapshot_tool(
        &mut self,
        mode: &crate::Mode,
        list: &Path,
        cwd: &Path,
    ) -> Result<CommandStatus, crate::Error>;
}

impl<T: Toolchain + ?Sized> Toolchain for &mut T {
    fn compile(&mut self, source: &Path, output: &Path) -> Result<CommandStatus, crate::Error> {
        (**self).compile(source, output)
    }

    fn run_snapshot_tool(
        &mut self,
        mode: &crate::Mode,
        list: &Path,
        cwd: &Path,
    ) -> Result<CommandStatus, crate::Error> {
        (**self).run_snapshot_tool(mode, list, cwd)
    }
}

/// Spawn the configured compiler and snapshot tool, inheriting stdio
///
/// Relative paths handed to it are resolved against `root`, the directory the
/// suite was started from.
#[derive(Clone, Debug)]
pub struct System {
    root: PathBuf,
    compiler: String,
    compiler_args: Vec<String>,
    tool: PathBuf,
}

impl System {
    pub fn new(config: &crate::schema::Config, root: &Path) -> Self {
        let root = std::path::absolute(root).unwrap_or_else(|_| root.to_owned());
        let tool = normalize(&root.join(&config.tool));
        Self {
            root,
            compiler: config.compiler.clone(),
            compiler_args: config.compiler_args.clone(),
            tool,
        }
    }

    /// Path of the snapshot tool as seen from `cwd`
    pub fn tool_from(&self, cwd: &Path) -> PathBuf {
        let cwd = self.root.join(cwd);
        let cwd = std::fs::canonicalize(&cwd).unwrap_or_else(|_| normalize(&cwd));
        let relative = relative_path(&self.tool, &cwd);
        if relative.is_relative() && relative.parent() == Some(Path::new("")) {
            Path::new(".").join(relative)
        } else {
            relative
        }
    }

    fn spawn(
        &self,
        label: &str,
        program: &OsStr,
        args: &[&OsStr],
        cwd: &Path,
        shown_cwd: Option<&Path>,
    ) -> Result<CommandStatus, crate::Error> {
        let palette = crate::Palette::current();
        let line = render(std::iter::once(program).chain(args.iter().copied()));
        match shown_cwd {
            Some(shown_cwd) => println!(
                "{} {} {}",
                palette.info(label),
                palette.hint(format_args!("[{}]", shown_cwd.display())),
                line
            ),
            None => println!("{} {}", palette.info(label), line),
        }

        debug!("Spawning in `{}`", cwd.display());
        let status = std::process::Command::new(program)
            .args(args)
            .current_dir(cwd)
            .status()
            .map_err(|e| {
                crate::Error::new(format!(
                    "could not run `{}`: {}",
                    program.to_string_lossy(),
                    e
                ))
            })?;
        let status = CommandStatus::from_exit(status);
        debug!("`{}` finished: {}", program.to_string_lossy(), status);
        Ok(status)
    }
}

impl Toolchain for System {
    fn compile(&mut self, source: &Path, output: &Path) -> Result<CommandStatus, crate::Error> {
        let mut args: Vec<&OsStr> = self.compiler_args.iter().map(OsStr::new).collect();
        args.extend([source.as_os_str(), OsStr::new("-o"), output.as_os_str()]);
        self.spawn(
            "COMPILING:",
            OsStr::new(&self.compiler),
            &args,
            &self.root,
            None,
        )
    }

    fn run_snapshot_tool(
        &mut self,
        mode: &crate::Mode,
        list: &Path,
        cwd: &Path,
    ) -> Result<CommandStatus, crate::Error> {
        let tool = self.tool_from(cwd);
        self.spawn(
            "RUNNING:",
            tool.as_os_str(),
            &[mode.as_os_str(), list.as_os_str()],
            &self.root.join(cwd),
            Some(cwd),
        )
    }
}

/// Shell-quote a command line for display
pub fn render<'a>(parts: impl IntoIterator<Item = &'a OsStr>) -> String {
    let parts: Vec<_> = parts.into_iter().map(|p| p.to_string_lossy()).collect();
    shlex::try_join(parts.iter().map(|p| &**p)).unwrap_or_else(|_| parts.join(" "))
}

/// Lexically resolve `.` and `..`
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            _ => normalized.push(component),
        }
    }
    normalized
}

/// Path that reaches `path` when starting from the directory `base`
///
/// Both are expected to be absolute.  When they share no root, `path` is
/// returned unchanged.
pub fn relative_path(path: &Path, base: &Path) -> PathBuf {
    let path = normalize(path);
    let base = normalize(base);

    let foreign = match (path.components().next(), base.components().next()) {
        (Some(Component::Prefix(a)), Some(Component::Prefix(b))) => a != b,
        _ => false,
    };
    if foreign {
        return path;
    }

    let mut path_components = path.components().peekable();
    let mut base_components = base.components().peekable();
    while let (Some(a), Some(b)) = (path_components.peek(), base_components.peek()) {
        if a != b {
            break;
        }
        path_components.next();
        base_components.next();
    }

    let mut relative: PathBuf = base_components.map(|_| Component::ParentDir).collect();
    relative.extend(path_components);
    if relative.as_os_str().is_empty() {
        relative.push(Component::CurDir);
    }
    relative
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn relative_to_repo_root() {
        assert_eq!(
            relative_path(
                Path::new("/repo/rere.py"),
                Path::new("/repo/simple-examples/cli")
            ),
            Path::new("../../rere.py")
        );
    }

    #[test]
    fn relative_into_sibling() {
        assert_eq!(
            relative_path(Path::new("/a/b/tool"), Path::new("/a/c/d")),
            Path::new("../../b/tool")
        );
    }

    #[test]
    fn relative_below_base() {
        assert_eq!(
            relative_path(Path::new("/a/b/tool"), Path::new("/a")),
            Path::new("b/tool")
        );
    }

    #[test]
    fn relative_same_dir() {
        assert_eq!(
            relative_path(Path::new("/a/b"), Path::new("/a/b")),
            Path::new(".")
        );
    }

    #[test]
    fn relative_with_dots() {
        assert_eq!(
            relative_path(
                Path::new("/repo/./tools/../rere.py"),
                Path::new("/repo/simple-examples/./cli")
            ),
            Path::new("../../rere.py")
        );
    }

    #[test]
    fn tool_path_from_example() {
        let root = tempfile::tempdir().unwrap();
        let root = std::fs::canonicalize(root.path()).unwrap();
        std::fs::create_dir_all(root.join("simple-examples").join("cli")).unwrap();

        let system = System::new(&crate::schema::Config::default(), &root);
        assert_eq!(
            system.tool_from(Path::new("simple-examples/cli")),
            Path::new("../../rere.py")
        );
    }

    #[test]
    fn tool_path_never_bare() {
        let root = tempfile::tempdir().unwrap();
        let root = std::fs::canonicalize(root.path()).unwrap();
        std::fs::create_dir_all(root.join("simple-examples").join("cli")).unwrap();

        let config = crate::schema::Config {
            tool: PathBuf::from("simple-examples/cli/rere.py"),
            ..Default::default()
        };
        let system = System::new(&config, &root);
        assert_eq!(
            system.tool_from(Path::new("simple-examples/cli")),
            Path::new("./rere.py")
        );
    }

    #[test]
    fn render_plain() {
        let line = render(
            [
                "g++",
                "simple-examples/cli/bob.cpp",
                "-o",
                "simple-examples/cli/bob",
            ]
            .map(OsStr::new),
        );
        assert_eq!(
            line,
            "g++ simple-examples/cli/bob.cpp -o simple-examples/cli/bob"
        );
    }

    #[test]
    fn render_quotes_spaces() {
        let line = render(["../../rere.py", "replay", "my tests.list"].map(OsStr::new));
        assert_eq!(line, "../../rere.py replay 'my tests.list'");
    }

    #[test]
    fn status_exit_codes() {
        assert_eq!(CommandStatus::Success.exit_code(), 0);
        assert_eq!(CommandStatus::Code(3).exit_code(), 3);
        assert_eq!(CommandStatus::Interrupted(Some(9)).exit_code(), 137);
        assert_eq!(CommandStatus::Interrupted(None).exit_code(), 1);
        assert!(CommandStatus::Code(0).success());
        assert!(!CommandStatus::Code(2).success());
    }

    #[test]
    #[cfg(unix)]
    fn status_from_process() {
        let status = std::process::Command::new("sh")
            .args(["-c", "exit 7"])
            .status()
            .unwrap();
        assert_eq!(CommandStatus::from_exit(status), CommandStatus::Code(7));

        let status = std::process::Command::new("sh")
            .args(["-c", "kill -9 $$"])
            .status()
            .unwrap();
        assert_eq!(
            CommandStatus::from_exit(status),
            CommandStatus::Interrupted(Some(9))
        );
    }
}
