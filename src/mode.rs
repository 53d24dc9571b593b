use std::ffi::{OsStr, OsString};

/// What the snapshot tool should do with each `test.list`
///
/// `record` captures fresh expected output and `replay` compares against it.
/// The value is forwarded verbatim; the tool is the one that decides whether
/// anything else is valid.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mode(OsString);

impl Mode {
    pub const RECORD: &'static str = "record";
    pub const REPLAY: &'static str = "replay";

    pub fn new(raw: impl Into<OsString>) -> Self {
        Self(raw.into())
    }

    pub fn record() -> Self {
        Self::new(Self::RECORD)
    }

    pub fn replay() -> Self {
        Self::new(Self::REPLAY)
    }

    pub fn as_os_str(&self) -> &OsStr {
        &self.0
    }

    /// Whether this is one of the values the snapshot tool documents
    pub fn is_known(&self) -> bool {
        self.0 == Self::RECORD || self.0 == Self::REPLAY
    }

    /// Past tense, for the closing summary
    pub(crate) fn done(&self) -> String {
        if self.0 == Self::RECORD {
            "recorded".to_owned()
        } else if self.0 == Self::REPLAY {
            "replayed".to_owned()
        } else {
            format!("ran `{}`", self)
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.to_string_lossy().fmt(f)
    }
}

impl AsRef<OsStr> for Mode {
    fn as_ref(&self) -> &OsStr {
        self.as_os_str()
    }
}

impl From<&'_ str> for Mode {
    fn from(raw: &'_ str) -> Self {
        Self::new(raw)
    }
}
