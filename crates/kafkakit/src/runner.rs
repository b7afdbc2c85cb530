//! Command execution for the Kafka tools.
//!
//! The [`CommandRunner`] trait is the seam between argument building and the
//! operating system, so tests can record invocations instead of running them.

use crate::error::{Error, Result};
use std::path::Path;
use std::process::Command;

/// Runs an external program and returns its stdout.
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, failing on a non-zero exit status.
    fn run(&self, program: &str, args: &[String]) -> Result<String>;

    /// Whether a file exists on the host running the commands.
    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Runner backed by [`std::process::Command`].
///
/// Programs are resolved on `PATH` at each call, so a tool is only required
/// once something actually runs it.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<String> {
        let program = resolve_tool(program)?;
        log::debug!("Running {} {}", program, args.join(" "));

        let output = Command::new(&program)
            .args(args)
            .output()
            .map_err(|e| Error::CommandFailed {
                message: format!("failed to execute {program}"),
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::CommandFailed {
                message: format!("{program} exited with {}", output.status),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Resolve a tool name on `PATH`. Paths containing a separator are used as-is.
pub fn resolve_tool(tool: &str) -> Result<String> {
    if tool.contains(std::path::MAIN_SEPARATOR) {
        return Ok(tool.to_string());
    }
    which::which(tool)
        .map(|p| p.display().to_string())
        .map_err(|_| Error::ToolNotFound(tool.to_string()))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_tool_keeps_paths() {
        let sep = std::path::MAIN_SEPARATOR;
        let path = format!("{sep}bin{sep}kafka-topics");
        assert_eq!(resolve_tool(&path).unwrap(), path);
    }

    #[test]
    fn test_resolve_tool_missing() {
        let err = resolve_tool("kafka-tool-that-does-not-exist").unwrap_err();
        assert!(matches!(err, Error::ToolNotFound(_)));
    }

    #[test]
    fn test_process_runner_reports_missing_tool() {
        let err = ProcessRunner
            .run("kafka-tool-that-does-not-exist", &[])
            .unwrap_err();
        assert!(matches!(err, Error::ToolNotFound(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_process_runner_reports_failure() {
        let err = ProcessRunner
            .run("sh", &["-c".to_string(), "echo oops >&2; exit 3".to_string()])
            .unwrap_err();
        assert!(err.to_string().contains("oops"));
    }

    #[cfg(unix)]
    #[test]
    fn test_process_runner_captures_stdout() {
        let out = ProcessRunner
            .run("sh", &["-c".to_string(), "echo hello".to_string()])
            .unwrap();
        assert_eq!(out.trim(), "hello");
    }
}
