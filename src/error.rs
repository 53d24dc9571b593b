/// Anything that stops the run before a single example is compiled
///
/// Unreadable configuration, a missing examples root, or a subprocess that
/// could not be spawned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    inner: String,
}

impl Error {
    pub fn new(inner: impl Into<String>) -> Self {
        Self {
            inner: inner.into(),
        }
    }

    pub fn into_string(self) -> String {
        self.inner
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.inner.fmt(f)
    }
}

impl std::error::Error for Error {}

impl From<String> for Error {
    fn from(inner: String) -> Self {
        Self::new(inner)
    }
}

impl From<&'_ str> for Error {
    fn from(inner: &'_ str) -> Self {
        Self::new(inner)
    }
}
