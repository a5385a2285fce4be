//! Subprocess-backed executor
//!
//! Spawns the configured liquidctl executable for every operation and maps
//! process outcomes onto the local error taxonomy at this boundary.

use crate::domain::DutyCycle;
use crate::error::UtilityError;
use crate::liquidctl::traits::LiquidctlExecutor;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Executor that drives the real liquidctl CLI
pub struct CliExecutor {
    exe: PathBuf,
    config_file: Option<PathBuf>,
    timeout: Duration,
}

impl CliExecutor {
    /// Create a new executor for the given executable path
    pub fn new<P: AsRef<Path>>(exe: P, config_file: Option<PathBuf>, timeout: Duration) -> Self {
        Self {
            exe: exe.as_ref().to_path_buf(),
            config_file,
            timeout,
        }
    }

    /// Path of the configured executable
    pub fn exe(&self) -> &Path {
        &self.exe
    }

    fn base_command(&self) -> Command {
        let mut cmd = Command::new(&self.exe);
        if let Some(config) = &self.config_file {
            cmd.arg("--config").arg(config);
        }
        cmd
    }

    /// Spawn the utility with the given arguments and collect stdout
    pub(crate) fn run(&self, args: &[&str]) -> Result<String, UtilityError> {
        let mut cmd = self.base_command();
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        log::debug!("invoking {} {}", self.exe.display(), args.join(" "));

        let child = cmd
            .spawn()
            .map_err(|e| UtilityError::Unreachable(format!("{}: {}", self.exe.display(), e)))?;

        wait_with_timeout(child, self.timeout)
    }
}

impl LiquidctlExecutor for CliExecutor {
    fn probe(&self) -> Result<String, UtilityError> {
        self.run(&["--version"]).map(|out| out.trim().to_string())
    }

    fn initialize_all(&self) -> Result<(), UtilityError> {
        self.run(&["initialize", "all"]).map(|_| ())
    }

    fn status(&self) -> Result<String, UtilityError> {
        self.run(&["status", "--json"])
    }

    fn set_duty(
        &self,
        address: &str,
        channel: &str,
        duty: DutyCycle,
    ) -> Result<(), UtilityError> {
        let duty = duty.as_percentage().to_string();
        self.run(&["--address", address, "set", channel, "speed", &duty])
            .map(|_| ())
    }
}

/// Wait for the child to exit, force-killing it past the deadline
fn wait_with_timeout(mut child: Child, timeout: Duration) -> Result<String, UtilityError> {
    let deadline = Instant::now() + timeout;

    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                let stdout = read_stream(child.stdout.take());
                if status.success() {
                    return Ok(stdout);
                }
                let stderr = read_stream(child.stderr.take());
                return Err(UtilityError::CommandFailed {
                    status: status.code().unwrap_or(-1),
                    stderr: stderr.trim().to_string(),
                });
            }
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(UtilityError::Timeout(timeout.as_secs()));
                }
                std::thread::sleep(EXIT_POLL_INTERVAL);
            }
            Err(e) => {
                let _ = child.kill();
                return Err(UtilityError::Io(e.to_string()));
            }
        }
    }
}

fn read_stream<R: Read>(stream: Option<R>) -> String {
    let mut out = String::new();
    if let Some(mut stream) = stream {
        let _ = stream.read_to_string(&mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn executor(exe: &str, timeout_ms: u64) -> CliExecutor {
        CliExecutor::new(exe, None, Duration::from_millis(timeout_ms))
    }

    #[test]
    fn test_missing_executable_is_unreachable() {
        let exec = executor("/nonexistent/liquidctl", 1000);
        assert!(matches!(
            exec.run(&["--version"]),
            Err(UtilityError::Unreachable(_))
        ));
    }

    #[test]
    fn test_run_collects_stdout() {
        let exec = executor("echo", 5000);
        let out = exec.run(&["hello"]).unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[test]
    fn test_nonzero_exit_is_command_failed() {
        let exec = executor("false", 5000);
        match exec.run(&[]) {
            Err(UtilityError::CommandFailed { status, .. }) => assert_ne!(status, 0),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_slow_process_times_out() {
        let exec = executor("sleep", 200);
        assert!(matches!(exec.run(&["5"]), Err(UtilityError::Timeout(_))));
    }

    #[test]
    fn test_config_file_flag_is_passed() {
        let exec = CliExecutor::new(
            "echo",
            Some(PathBuf::from("/tmp/liquidctl.toml")),
            Duration::from_secs(5),
        );
        let out = exec.run(&["status"]).unwrap();
        assert!(out.contains("--config"));
        assert!(out.contains("/tmp/liquidctl.toml"));
        assert!(out.contains("status"));
    }

    #[test]
    #[ignore = "Requires liquidctl on PATH"]
    fn test_real_probe() {
        let exec = executor("liquidctl", 10_000);
        let version = exec.probe().unwrap();
        assert!(!version.is_empty());
    }
}
