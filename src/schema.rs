//! `bobtest.toml` Schema
//!
//! [`Config`] is the top-level item.  The file is optional; every key falls
//! back to the layout of the bob repository.

use std::path::{Path, PathBuf};

/// Top-level data in `bobtest.toml`
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Config {
    /// Directory whose immediate subdirectories are the examples
    pub examples_dir: PathBuf,
    /// Compiler invoked as `<compiler> <compiler-args>... <source> -o <binary>`
    pub compiler: String,
    pub compiler_args: Vec<String>,
    /// Source file, relative to each example
    pub source: PathBuf,
    /// Executable produced next to the source
    pub binary: PathBuf,
    /// Snapshot tool, relative to the directory `bobtest` runs from
    pub tool: PathBuf,
    /// List file handed to the snapshot tool, relative to each example
    pub test_list: PathBuf,
}

impl Config {
    pub const FILE_NAME: &'static str = "bobtest.toml";

    /// Load `bobtest.toml` from `dir`, or the defaults when there is none
    pub fn discover(dir: &Path) -> Result<Self, crate::Error> {
        let path = dir.join(Self::FILE_NAME);
        if path.exists() {
            Self::load(&path)
        } else {
            debug!("No {} in `{}`, using defaults", Self::FILE_NAME, dir.display());
            Ok(Self::default())
        }
    }

    pub fn load(path: &Path) -> Result<Self, crate::Error> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| crate::Error::new(format!("failed to read `{}`: {}", path.display(), e)))?;
        Self::parse_toml(&raw)
            .map_err(|e| crate::Error::new(format!("invalid `{}`: {}", path.display(), e)))
    }

    fn parse_toml(s: &str) -> Result<Self, crate::Error> {
        toml_edit::de::from_str(s).map_err(|e| e.to_string().into())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            examples_dir: PathBuf::from("simple-examples"),
            compiler: "g++".to_owned(),
            compiler_args: Vec::new(),
            source: PathBuf::from("bob.cpp"),
            binary: PathBuf::from("bob"),
            tool: PathBuf::from("rere.py"),
            test_list: PathBuf::from("test.list"),
        }
    }
}

impl std::str::FromStr for Config {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_toml(s)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_toml_minimal() {
        let expected = Config::default();
        let actual = Config::parse_toml("").unwrap();
        assert_eq!(expected, actual);
    }

    #[test]
    fn parse_toml_compiler() {
        let expected = Config {
            compiler: "clang++".into(),
            compiler_args: vec!["-std=c++17".into(), "-Wall".into()],
            ..Default::default()
        };
        let actual = Config::parse_toml(
            "
compiler = 'clang++'
compiler-args = ['-std=c++17', '-Wall']
",
        )
        .unwrap();
        assert_eq!(expected, actual);
    }

    #[test]
    fn parse_toml_layout() {
        let expected = Config {
            examples_dir: "examples".into(),
            tool: "tools/rere.py".into(),
            test_list: "cases.list".into(),
            ..Default::default()
        };
        let actual = Config::parse_toml(
            "
examples-dir = 'examples'
tool = 'tools/rere.py'
test-list = 'cases.list'
",
        )
        .unwrap();
        assert_eq!(expected, actual);
    }

    #[test]
    fn parse_toml_unknown_key() {
        let err = Config::parse_toml("timeout = 5").unwrap_err();
        assert!(err.to_string().contains("timeout"), "{err}");
    }

    #[test]
    fn parse_toml_wrong_type() {
        assert!(Config::parse_toml("compiler-args = '-Wall'").is_err());
    }

    #[test]
    fn discover_without_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::discover(dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn discover_with_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(Config::FILE_NAME), "binary = 'bob.out'\n").unwrap();

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.binary, Path::new("bob.out"));
        assert_eq!(config.source, Path::new("bob.cpp"));
    }

    #[test]
    fn discover_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(Config::FILE_NAME), "compiler = [").unwrap();

        let err = Config::discover(dir.path()).unwrap_err();
        assert!(err.to_string().contains(Config::FILE_NAME), "{err}");
    }
}
