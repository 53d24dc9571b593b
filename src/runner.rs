use std::path::{Path, PathBuf};

use crate::{CommandStatus, Example, Mode, Toolchain};

/// File names looked up inside every example
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub source: PathBuf,
    pub binary: PathBuf,
    pub test_list: PathBuf,
}

impl Default for Layout {
    fn default() -> Self {
        Self::from(&crate::schema::Config::default())
    }
}

impl From<&crate::schema::Config> for Layout {
    fn from(config: &crate::schema::Config) -> Self {
        Self {
            source: config.source.clone(),
            binary: config.binary.clone(),
            test_list: config.test_list.clone(),
        }
    }
}

/// Compile every example, then hand each one to the snapshot tool
///
/// Both phases walk the examples in order and stop at the first failure.
#[derive(Debug)]
pub struct Runner<T> {
    toolchain: T,
    layout: Layout,
}

impl<T: Toolchain> Runner<T> {
    pub fn new(toolchain: T, layout: Layout) -> Self {
        Self { toolchain, layout }
    }

    pub fn into_toolchain(self) -> T {
        self.toolchain
    }

    pub fn run(&mut self, examples: &[Example], mode: &Mode) -> Result<Summary, Failure> {
        if examples.is_empty() {
            let palette = crate::Palette::current();
            crate::macros::println!("{}", palette.warn("There are no examples to test"));
        }

        self.build_all(examples)?;
        self.test_all(examples, mode)?;

        Ok(Summary {
            mode: mode.clone(),
            examples: examples.to_vec(),
        })
    }

    pub fn build_all(&mut self, examples: &[Example]) -> Result<(), Failure> {
        examples
            .iter()
            .try_for_each(|example| self.build(example))
    }

    pub fn test_all(&mut self, examples: &[Example], mode: &Mode) -> Result<(), Failure> {
        examples
            .iter()
            .try_for_each(|example| self.test(example, mode))
    }

    fn build(&mut self, example: &Example) -> Result<(), Failure> {
        let source = example.path().join(&self.layout.source);
        let output = example.path().join(&self.layout.binary);
        debug!("Building {}", example);
        let status = self.toolchain.compile(&source, &output);
        Failure::check(Phase::Build, example, status)
    }

    fn test(&mut self, example: &Example, mode: &Mode) -> Result<(), Failure> {
        debug!("Testing {} ({})", example, mode);
        let status = self
            .toolchain
            .run_snapshot_tool(mode, &self.layout.test_list, example.path());
        Failure::check(Phase::Test, example, status)
    }
}

/// Every example compiled and passed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub mode: Mode,
    pub examples: Vec<Example>,
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let palette = crate::Palette::current();

        writeln!(f)?;
        for example in &self.examples {
            writeln!(f, "    {}", palette.info(format_args!("[✓] {example}")))?;
        }
        writeln!(f)?;
        let noun = if self.examples.len() == 1 {
            "example"
        } else {
            "examples"
        };
        write!(
            f,
            "{} {} {}",
            self.examples.len(),
            noun,
            palette.info(self.mode.done())
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Build,
    Test,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reason {
    /// The program ran and reported failure
    Exit(CommandStatus),
    /// The program could not be started
    Spawn(crate::Error),
}

/// The first example that did not make it, and why
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure {
    pub phase: Phase,
    pub example: Example,
    pub reason: Reason,
}

impl Failure {
    fn check(
        phase: Phase,
        example: &Example,
        status: Result<CommandStatus, crate::Error>,
    ) -> Result<(), Failure> {
        let reason = match status {
            Ok(status) if status.success() => return Ok(()),
            Ok(status) => Reason::Exit(status),
            Err(err) => Reason::Spawn(err),
        };
        Err(Self {
            phase,
            example: example.clone(),
            reason,
        })
    }

    pub fn path(&self) -> &Path {
        self.example.path()
    }

    /// Exit code for the whole run: the failing program's own code
    pub fn exit_code(&self) -> i32 {
        match &self.reason {
            Reason::Exit(status) => match status.exit_code() {
                0 => 1,
                code => code,
            },
            Reason::Spawn(_) => 1,
        }
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.phase {
            Phase::Build => write!(f, "Compilation failed in {}", self.example)?,
            Phase::Test => write!(f, "Test failed in {}", self.example)?,
        }
        match &self.reason {
            Reason::Exit(status @ CommandStatus::Interrupted(_)) => write!(f, " ({status})"),
            Reason::Exit(_) => Ok(()),
            Reason::Spawn(err) => write!(f, ": {err}"),
        }
    }
}

impl std::error::Error for Failure {}
