//! Shared test utilities for integration tests.
//!
//! Provides helpers for writing markdown fixtures into temporary
//! directories and running the qcmark binary.

#![allow(dead_code)]

use anyhow::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Creates temporary workspace directory for fixtures and output.
pub fn create_workspace() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Writes file to workspace, creating parent directories as needed.
///
/// # Returns
///
/// Full path of the written file
///
/// # Errors
///
/// Returns error if directory creation or file write fails
pub fn write_file(root: &Path, path: &str, content: &str) -> Result<PathBuf> {
    let file_path = root.join(path);
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Runs the qcmark binary with arguments and optional stdin content.
///
/// # Errors
///
/// Returns error if the process cannot be spawned or awaited
pub fn run_qcmark(args: &[&str], stdin: Option<&str>) -> Result<Output> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_qcmark"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    {
        let mut pipe = child
            .stdin
            .take()
            .ok_or_else(|| anyhow::anyhow!("Child stdin was not captured"))?;
        if let Some(input) = stdin {
            pipe.write_all(input.as_bytes())?;
        }
    }

    Ok(child.wait_with_output()?)
}
