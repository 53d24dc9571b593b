#[cfg(feature = "color")]
#[allow(unused_imports)]
pub(crate) use anstream::{eprint, eprintln, println};
#[cfg(not(feature = "color"))]
#[allow(unused_imports)]
pub(crate) use std::{eprint, eprintln, println};

/// Feature-flag controlled tracing of what the runner is about to do
#[cfg(feature = "debug")]
#[allow(unused_macros)]
macro_rules! debug {
    ($($arg:tt)*) => ({
        $crate::macros::eprint!("[{:>w$}] \t", module_path!(), w = 28);
        $crate::macros::eprintln!($($arg)*);
    })
}

/// Feature-flag controlled tracing of what the runner is about to do
#[cfg(not(feature = "debug"))]
#[allow(unused_macros)]
macro_rules! debug {
    ($($arg:tt)*) => {};
}
