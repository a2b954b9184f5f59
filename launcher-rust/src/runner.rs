use anyhow::{Context, Result};
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;

use crate::{
    alert::{self, Alert},
    config,
};

/// Exit code recorded when a process could not be started or ended without
/// reporting one.
pub const SPAWN_FAILURE_CODE: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessResult {
    pub exit_code: i32,
}

impl ProcessResult {
    pub fn from_status(status: ExitStatus) -> Self {
        Self {
            exit_code: status.code().unwrap_or(SPAWN_FAILURE_CODE),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LaunchError {
    #[error("runtime probe failed (exit {exit_code})")]
    RuntimeUnavailable { exit_code: i32 },
    #[error("application failed (exit {exit_code})")]
    LaunchFailed { exit_code: i32 },
}

impl LaunchError {
    pub fn alert(&self) -> Alert {
        match self {
            LaunchError::RuntimeUnavailable { .. } => alert::RUNTIME_REQUIRED,
            LaunchError::LaunchFailed { .. } => alert::LAUNCH_FAILED,
        }
    }
}

pub type Outcome = std::result::Result<(), LaunchError>;

/// Launcher exit status. A failed launch still exits 0; only a missing
/// runtime exits 1.
pub fn exit_code(outcome: &Outcome) -> u8 {
    match outcome {
        Ok(()) => 0,
        Err(LaunchError::RuntimeUnavailable { .. }) => 1,
        Err(LaunchError::LaunchFailed { .. }) => 0,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launch {
    pub runtime: String,
    pub version_flag: String,
    pub archive_flag: String,
    pub archive: String,
}

impl Default for Launch {
    fn default() -> Self {
        Self {
            runtime: config::RUNTIME.to_string(),
            version_flag: config::VERSION_FLAG.to_string(),
            archive_flag: config::ARCHIVE_FLAG.to_string(),
            archive: config::ARCHIVE.to_string(),
        }
    }
}

impl Launch {
    /// `java -version` with every stream detached.
    pub fn probe_command(&self) -> Command {
        let mut cmd = Command::new(&self.runtime);
        cmd.arg(&self.version_flag)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            const CREATE_NO_WINDOW: u32 = 0x08000000;
            cmd.creation_flags(CREATE_NO_WINDOW);
        }
        cmd
    }

    /// `java -jar <archive>`; the application shares the launcher's streams.
    pub fn app_command(&self) -> Command {
        let mut cmd = Command::new(&self.runtime);
        cmd.arg(&self.archive_flag)
            .arg(&self.archive)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        cmd
    }
}

pub fn run(launch: &Launch) -> Outcome {
    run_with_deps(launch, execute, alert::show)
}

pub fn run_with_deps(
    launch: &Launch,
    mut exec: impl FnMut(&mut Command) -> Result<ProcessResult>,
    mut notify: impl FnMut(&Alert),
) -> Outcome {
    let probe = settle(exec(&mut launch.probe_command()), "runtime probe");
    if !probe.success() {
        let err = LaunchError::RuntimeUnavailable {
            exit_code: probe.exit_code,
        };
        tracing::info!("{err}");
        notify(&err.alert());
        return Err(err);
    }

    let app = settle(exec(&mut launch.app_command()), "application");
    if !app.success() {
        let err = LaunchError::LaunchFailed {
            exit_code: app.exit_code,
        };
        tracing::info!("{err}");
        notify(&err.alert());
        return Err(err);
    }

    Ok(())
}

fn execute(cmd: &mut Command) -> Result<ProcessResult> {
    let status = cmd
        .status()
        .with_context(|| format!("spawn {}", cmd.get_program().to_string_lossy()))?;
    Ok(ProcessResult::from_status(status))
}

// A process that never ran counts as a failed one.
fn settle(result: Result<ProcessResult>, label: &str) -> ProcessResult {
    match result {
        Ok(res) => {
            tracing::debug!(exit_code = res.exit_code, "{label} finished");
            res
        }
        Err(err) => {
            tracing::debug!(error = %format!("{err:#}"), "{label} could not be started");
            ProcessResult {
                exit_code: SPAWN_FAILURE_CODE,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn default_launch_uses_compiled_commands() {
        let launch = Launch::default();
        assert_eq!(launch.runtime, config::RUNTIME);
        assert_eq!(launch.archive, config::ARCHIVE);
    }

    #[test]
    fn probe_command_queries_version() {
        let launch = Launch::default();
        let cmd = launch.probe_command();
        assert_eq!(cmd.get_program().to_string_lossy(), launch.runtime);
        assert_eq!(args(&cmd), vec![launch.version_flag.clone()]);
    }

    #[test]
    fn app_command_runs_archive() {
        let launch = Launch {
            runtime: "java".to_string(),
            version_flag: "-version".to_string(),
            archive_flag: "-jar".to_string(),
            archive: "isstracker-1.0.jar".to_string(),
        };
        let cmd = launch.app_command();
        assert_eq!(cmd.get_program().to_string_lossy(), "java");
        assert_eq!(args(&cmd), vec!["-jar", "isstracker-1.0.jar"]);
    }

    #[test]
    fn exit_code_is_asymmetric() {
        assert_eq!(exit_code(&Ok(())), 0);
        assert_eq!(
            exit_code(&Err(LaunchError::RuntimeUnavailable { exit_code: 127 })),
            1
        );
        assert_eq!(exit_code(&Err(LaunchError::LaunchFailed { exit_code: 2 })), 0);
    }

    #[test]
    fn errors_select_their_alert() {
        assert_eq!(
            LaunchError::RuntimeUnavailable { exit_code: 1 }.alert(),
            alert::RUNTIME_REQUIRED
        );
        assert_eq!(
            LaunchError::LaunchFailed { exit_code: 1 }.alert(),
            alert::LAUNCH_FAILED
        );
    }

    #[test]
    fn spawn_error_settles_as_failure() {
        let res = settle(Err(anyhow::anyhow!("not found")), "probe");
        assert_eq!(res.exit_code, SPAWN_FAILURE_CODE);
        assert!(!res.success());
    }

    #[cfg(unix)]
    #[test]
    fn from_status_reads_exit_code() {
        use std::os::unix::process::ExitStatusExt;
        assert!(ProcessResult::from_status(ExitStatus::from_raw(0)).success());
        assert_eq!(
            ProcessResult::from_status(ExitStatus::from_raw(127 << 8)).exit_code,
            127
        );
        // Killed by SIGKILL: no exit code.
        assert_eq!(
            ProcessResult::from_status(ExitStatus::from_raw(9)).exit_code,
            SPAWN_FAILURE_CODE
        );
    }

    #[cfg(unix)]
    #[test]
    fn execute_reports_missing_program() {
        let mut cmd = Command::new("/nonexistent/definitely-not-java");
        let err = execute(&mut cmd).unwrap_err();
        assert!(err.to_string().contains("spawn /nonexistent/definitely-not-java"));
    }
}
