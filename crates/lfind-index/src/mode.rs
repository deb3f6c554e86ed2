//! Search mode selection and the searcher factory.

use std::{fmt, io::BufRead};

use tracing::debug;

use crate::{
    ContentSearcher, IndexError, LineStreamSearcher, MetadataSearcher, SearchOptions, Searcher,
};

/// Which kind of records a run indexes. Chosen once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchMode {
    /// File and directory names under a root.
    Metadata,
    /// Extracted text of files under a root.
    Content,
    /// Lines read from piped input.
    PipedLines,
}

impl SearchMode {
    /// Chooses a mode. Piped input wins over the content flag, because once stdin is
    /// consumed as data it cannot also supply queries or be ignored.
    pub fn select(piped: bool, content: bool) -> Self {
        if piped {
            Self::PipedLines
        } else if content {
            Self::Content
        } else {
            Self::Metadata
        }
    }

    /// Chooses a mode by probing stdin.
    pub fn detect(content: bool) -> Self {
        let mode = Self::select(stdin_has_data(), content);
        debug!(mode = %mode, "selected search mode");
        mode
    }

    /// Short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Metadata => "metadata",
            Self::Content => "content",
            Self::PipedLines => "lines",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Builds the searcher for `mode`. `input` is consumed only in [`SearchMode::PipedLines`].
pub fn build_searcher<R: BufRead>(
    mode: SearchMode,
    options: &SearchOptions,
    input: R,
) -> Result<Box<dyn Searcher>, IndexError> {
    Ok(match mode {
        SearchMode::Metadata => Box::new(MetadataSearcher::build(options)?),
        SearchMode::Content => Box::new(ContentSearcher::build(options)?),
        SearchMode::PipedLines => Box::new(LineStreamSearcher::build(input, options)?),
    })
}

/// How long to wait for a pipe whose writer has not produced anything yet.
#[cfg(unix)]
const PIPE_GRACE_MS: libc::c_int = 200;

/// True when stdin has bytes that can be read without blocking.
///
/// A terminal, `/dev/null`, and a closed empty pipe all answer `false`. A pipe that is
/// still empty gets a short grace period, so `producer | lfind` works even when the
/// producer is slow to start.
#[cfg(unix)]
pub fn stdin_has_data() -> bool {
    use std::{
        io::{self, IsTerminal},
        os::fd::AsRawFd,
    };

    let stdin = io::stdin();
    if stdin.is_terminal() {
        return false;
    }
    let fd = stdin.as_raw_fd();

    let mut poll_fd = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };
    // SAFETY: `poll_fd` is a valid, exclusively borrowed pollfd and the count is 1.
    let ready = unsafe { libc::poll(&raw mut poll_fd, 1, PIPE_GRACE_MS) };
    if ready <= 0 {
        return false;
    }

    let mut available: libc::c_int = 0;
    // SAFETY: FIONREAD writes a single c_int through the pointer.
    let status = unsafe { libc::ioctl(fd, libc::FIONREAD, &raw mut available) };
    status == 0 && available > 0
}

/// True when stdin is not a terminal.
#[cfg(not(unix))]
pub fn stdin_has_data() -> bool {
    use std::io::{self, IsTerminal};

    !io::stdin().is_terminal()
}
