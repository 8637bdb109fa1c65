//! The flag-control step, behind a trait so tests can make it fail.

use std::io;
use std::os::fd::{AsRawFd, BorrowedFd};

/// Marks an open descriptor non-blocking.
pub trait FlagControl {
    fn set_nonblocking(&self, fd: BorrowedFd<'_>) -> io::Result<()>;
}

/// `fcntl(2)` with `F_SETFL` and `O_NONBLOCK`.
///
/// The status flag word is replaced with `O_NONBLOCK` rather than merged
/// with the current flags; the probe only asks whether the call is accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fcntl;

impl FlagControl for Fcntl {
    fn set_nonblocking(&self, fd: BorrowedFd<'_>) -> io::Result<()> {
        let result = unsafe { libc::fcntl(fd.as_raw_fd(), libc::F_SETFL, libc::O_NONBLOCK) };
        if result == -1 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}
