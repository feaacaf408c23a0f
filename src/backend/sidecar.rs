//! Research backend sidecar management

use std::io;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use crate::config::BackendSettings;

/// Manages a locally launched backend process
pub struct Sidecar {
    process: Option<Child>,
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl Sidecar {
    pub fn new(program: &str, args: &[String], working_dir: Option<PathBuf>) -> Self {
        Self {
            process: None,
            program: program.to_string(),
            args: args.to_vec(),
            working_dir,
        }
    }

    /// Build a sidecar if the settings name a launch command
    pub fn from_settings(settings: &BackendSettings) -> Option<Self> {
        let program = settings.command.as_deref()?.trim();
        if program.is_empty() {
            return None;
        }
        Some(Self::new(program, &settings.args, settings.working_dir.clone()))
    }

    /// Start the backend
    pub fn start(&mut self) -> io::Result<()> {
        if self.is_running() {
            return Ok(());
        }

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        let child = command.spawn()?;
        tracing::info!("Started backend: {} {}", self.program, self.args.join(" "));
        self.process = Some(child);
        Ok(())
    }

    /// Stop the backend
    pub fn stop(&mut self) {
        if let Some(mut process) = self.process.take() {
            let _ = process.kill();
            let _ = process.wait();
            tracing::info!("Stopped backend");
        }
    }

    /// Check if backend is running
    pub fn is_running(&mut self) -> bool {
        if let Some(ref mut process) = self.process {
            match process.try_wait() {
                Ok(Some(status)) => {
                    tracing::warn!("Backend exited: {}", status);
                    self.process = None;
                    false
                }
                Ok(None) => true,
                Err(_) => false,
            }
        } else {
            false
        }
    }
}

impl Drop for Sidecar {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_means_no_sidecar() {
        let settings = BackendSettings::default();
        assert!(Sidecar::from_settings(&settings).is_none());

        let blank = BackendSettings {
            command: Some("  ".into()),
            ..BackendSettings::default()
        };
        assert!(Sidecar::from_settings(&blank).is_none());
    }

    #[test]
    fn test_missing_binary_fails_to_start() {
        let mut sidecar = Sidecar::new("arxiv-agent-no-such-backend", &[], None);
        assert!(sidecar.start().is_err());
        assert!(!sidecar.is_running());
    }

    #[cfg(unix)]
    #[test]
    fn test_start_and_stop() {
        let mut sidecar = Sidecar::new("sleep", &["30".to_string()], None);
        sidecar.start().unwrap();
        assert!(sidecar.is_running());
        sidecar.stop();
        assert!(!sidecar.is_running());
    }
}
