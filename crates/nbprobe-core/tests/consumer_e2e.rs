//! Runs the real nbprobe binary through the build-script consumer.

use nbprobe_core::consumer::{invoke, invoke_command, write_consts, ConsumeError};
use nbprobe_core::PlatformConstants;
use std::path::Path;
use std::process::Command;

fn probe_path() -> &'static Path {
    Path::new(env!("CARGO_BIN_EXE_nbprobe"))
}

#[test]
fn consumer_reads_host_constants() {
    let constants = invoke(probe_path()).expect("probe should succeed");
    assert_eq!(constants, PlatformConstants::host());
}

#[test]
fn consumer_reports_open_failure() {
    let mut cmd = Command::new(probe_path());
    cmd.args(["--reference-path", "/nonexistent/nbprobe"]);

    let err = invoke_command(cmd).unwrap_err();
    match &err {
        ConsumeError::Failed { status, stdout, stderr } => {
            assert_eq!(status.code(), Some(1));
            assert_eq!(stdout, "failed to open test file\n");
            assert!(stderr.contains("open(\"/nonexistent/nbprobe\")"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn consumer_output_is_includable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("consts.rs");

    let constants = invoke(probe_path()).unwrap();
    write_consts(&path, &constants).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.contains(&format!(
        "pub const STDIN_FILENO: ::core::ffi::c_int = {};",
        constants.stdin_fileno
    )));
}
