//! CLI support for the `lfind` binary.

pub mod args;
pub mod logging;
pub mod output;
pub mod run;
