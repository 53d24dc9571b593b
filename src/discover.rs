//! Find the example projects to build and test

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// One example project: a directory holding `bob.cpp` and `test.list`
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Example {
    path: PathBuf,
}

impl Example {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> std::borrow::Cow<'_, str> {
        self.path
            .file_name()
            .unwrap_or(self.path.as_os_str())
            .to_string_lossy()
    }

    /// Express the path relative to `base` when it lives underneath it
    pub fn relative_to(self, base: &Path) -> Self {
        match self.path.strip_prefix(base) {
            Ok(relative) if !relative.as_os_str().is_empty() => Self::new(relative),
            _ => self,
        }
    }
}

impl std::fmt::Display for Example {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.path.display().fmt(f)
    }
}

/// List the immediate subdirectories of `root`, sorted by path
///
/// Plain files next to the examples are skipped, and so is anything deeper
/// than one level.
pub fn discover(root: &Path) -> Result<Vec<Example>, crate::Error> {
    if !root.is_dir() {
        return Err(crate::Error::new(format!(
            "examples directory `{}` does not exist",
            root.display()
        )));
    }

    let pattern = format!(
        "{}/*",
        glob::Pattern::escape(&root.to_string_lossy()).trim_end_matches('/')
    );
    debug!("Discovering examples with `{}`", pattern);
    let paths = glob::glob(&pattern).map_err(|e| crate::Error::new(e.to_string()))?;

    let mut examples = BTreeSet::new();
    for path in paths {
        let path = path.map_err(|e| {
            crate::Error::new(format!(
                "failed to read `{}`: {}",
                e.path().display(),
                e.error()
            ))
        })?;
        if path.is_dir() {
            examples.insert(Example::new(path));
        } else {
            debug!("Skipping `{}`: not a directory", path.display());
        }
    }

    Ok(examples.into_iter().collect())
}
