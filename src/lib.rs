//! # Compile the example projects and drive their snapshot tests
//!
//! `bobtest` walks the immediate subdirectories of an examples root
//! (`simple-examples` by default), compiles `bob.cpp` in each of them, and then
//! hands every example's `test.list` to the snapshot tool (`rere.py`) in either
//! `record` or `replay` mode.
//!
//! ```console
//! $ bobtest            # replay
//! $ bobtest record
//! ```
//!
//! Everything runs sequentially and the first failure ends the run: the
//! process exits with the failing compiler's or tool's exit code.
//!
//! ## Layout
//!
//! The defaults can be overridden with a `bobtest.toml` next to the examples
//! root:
//!
//! ```toml
//! examples-dir = "simple-examples"
//! compiler = "g++"
//! compiler-args = ["-std=c++17"]
//! tool = "rere.py"
//! ```
//!
//! See [`schema::Config`] for every key.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[macro_use]
mod macros;

pub mod cli;
pub mod discover;
pub mod schema;
pub mod toolchain;

mod color;
mod error;
mod mode;
mod runner;

pub use discover::Example;
pub use error::Error;
pub use mode::Mode;
pub use runner::{Failure, Layout, Phase, Reason, Runner, Summary};
pub use toolchain::{CommandStatus, System, Toolchain};

pub(crate) use color::Palette;
