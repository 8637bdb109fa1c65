//! Turning a probe result into process output.
//!
//! Success: rendered constants on stdout, nothing on stderr.
//! Failure: fixed status line on stdout, system diagnostic on stderr.

use crate::exit_codes::ExitCode;
use crate::probe::ProbeError;
use nbprobe_common::{render, OutputFormat, PlatformConstants};
use std::io::{self, Write};
use tracing::{debug, error};

/// Write the outcome of a probe run and pick the exit code.
pub fn report<O, E>(
    result: &Result<PlatformConstants, ProbeError>,
    format: OutputFormat,
    stdout: &mut O,
    stderr: &mut E,
) -> ExitCode
where
    O: Write,
    E: Write,
{
    match result {
        Ok(constants) => match write_success(constants, format, stdout) {
            Ok(()) => ExitCode::Confirmed,
            Err(e) => {
                error!(error = %e, "failed to write probe result");
                // Logging may be off; the caller still needs to see why exit is 3
                let _ = writeln!(stderr, "failed to write probe result: {e}");
                let _ = stderr.flush();
                ExitCode::IoError
            }
        },
        Err(err) => {
            debug!(kind = ?err.kind(), error = %err, "probe failed");
            let _ = write_failure(err, stdout, stderr);
            err.exit_code()
        }
    }
}

fn write_success<O: Write>(
    constants: &PlatformConstants,
    format: OutputFormat,
    stdout: &mut O,
) -> io::Result<()> {
    let rendered = render(constants, format).map_err(io::Error::other)?;
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()
}

/// Both channels are attempted even if the first fails; returns the first error.
fn write_failure<O: Write, E: Write>(
    err: &ProbeError,
    stdout: &mut O,
    stderr: &mut E,
) -> io::Result<()> {
    let status = writeln!(stdout, "{}", err.status_line()).and_then(|()| stdout.flush());
    if let Err(e) = &status {
        error!(error = %e, "failed to write status line to stdout");
    }

    let diagnostic = writeln!(stderr, "{}", err.diagnostic()).and_then(|()| stderr.flush());
    if let Err(e) = &diagnostic {
        error!(error = %e, "failed to write diagnostic to stderr");
    }

    status.and(diagnostic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn run(
        result: Result<PlatformConstants, ProbeError>,
        format: OutputFormat,
    ) -> (ExitCode, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = report(&result, format, &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    /// Writer whose every write fails, like a closed pipe.
    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_success_prints_exact_wire_line() {
        let (code, out, err) = run(Ok(PlatformConstants::new(0, 4, 2048)), OutputFormat::Plain);
        assert_eq!(code, ExitCode::Confirmed);
        assert_eq!(out, "0 4 2048");
        assert!(err.is_empty());
    }

    #[test]
    fn test_success_json() {
        let (code, out, _) = run(Ok(PlatformConstants::new(0, 4, 2048)), OutputFormat::Json);
        assert_eq!(code, ExitCode::Confirmed);
        assert!(out.ends_with('\n'));
        let back: PlatformConstants = serde_json::from_str(&out).unwrap();
        assert_eq!(back, PlatformConstants::new(0, 4, 2048));
    }

    #[test]
    fn test_open_failure_output() {
        let result = Err(ProbeError::OpenFailed {
            path: PathBuf::from("/nonexistent"),
            source: io::Error::from_raw_os_error(libc::ENOENT),
        });
        let (code, out, err) = run(result, OutputFormat::Plain);
        assert_eq!(code, ExitCode::Unsupported);
        assert_eq!(out, "failed to open test file\n");
        assert!(err.starts_with("open(\"/nonexistent\"): "));
        assert!(err.ends_with('\n'));
    }

    #[test]
    fn test_control_failure_output_ignores_format() {
        let result = Err(ProbeError::ControlFailed {
            source: io::Error::from_raw_os_error(libc::EBADF),
        });
        let (code, out, err) = run(result, OutputFormat::Json);
        assert_eq!(code, ExitCode::Unsupported);
        assert_eq!(out, "failed to execute fcntl\n");
        assert!(err.starts_with("fcntl(fd, F_SETFL, O_NONBLOCK): "));
    }

    #[test]
    fn test_unwritable_stdout_is_io_error() {
        let mut err = Vec::new();
        let code = report(
            &Ok(PlatformConstants::new(0, 4, 2048)),
            OutputFormat::Plain,
            &mut Broken,
            &mut err,
        );
        assert_eq!(code, ExitCode::IoError);
        let err = String::from_utf8(err).unwrap();
        assert!(err.starts_with("failed to write probe result: "), "stderr was {err:?}");
    }

    #[test]
    fn test_unwritable_stdout_keeps_failure_status() {
        let result = Err(ProbeError::ControlFailed {
            source: io::Error::from_raw_os_error(libc::EBADF),
        });
        let mut err = Vec::new();
        let code = report(&result, OutputFormat::Plain, &mut Broken, &mut err);
        assert_eq!(code, ExitCode::Unsupported);
    }

    #[test]
    fn test_unwritable_stdout_still_writes_diagnostic() {
        let result = Err(ProbeError::OpenFailed {
            path: PathBuf::from("/nope"),
            source: io::Error::from_raw_os_error(libc::ENOENT),
        });
        let mut err = Vec::new();
        let code = report(&result, OutputFormat::Plain, &mut Broken, &mut err);

        assert_eq!(code, ExitCode::Unsupported);
        let err = String::from_utf8(err).unwrap();
        assert!(err.starts_with("open(\"/nope\"): "), "stderr was {err:?}");
    }

    #[test]
    fn test_unwritable_stderr_still_writes_status_line() {
        let failure = ProbeError::ControlFailed {
            source: io::Error::from_raw_os_error(libc::EBADF),
        };
        let mut out = Vec::new();
        let err = write_failure(&failure, &mut out, &mut Broken);

        assert!(err.is_err());
        assert_eq!(String::from_utf8(out).unwrap(), "failed to execute fcntl\n");
    }
}
