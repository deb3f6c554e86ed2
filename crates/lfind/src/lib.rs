//! lfind: ad-hoc local search
//!
//! lfind builds a throwaway full-text index over file names, file contents, or lines
//! piped on stdin, answers one or more queries against it, and deletes it again. Nothing
//! persists between runs, so results always reflect the filesystem as it is right now.

#![warn(missing_docs)]

pub mod cli;
