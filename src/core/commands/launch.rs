//! Detached process launch.

use std::env;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::result::Invocation;
use crate::config::LAUNCH_DELAY_MS;
use crate::core::error::LaunchError;
use crate::models::PlatformProfile;

/// Hands invocations to the system shell without blocking the caller.
#[derive(Clone, Debug)]
pub struct Launcher {
    /// Pause before the shell is started, so "not found" feedback can render
    delay: Duration,
    /// Log the invocation instead of running it
    dry_run: bool,
    windows: bool,
}

impl Launcher {
    pub fn new(profile: &PlatformProfile) -> Self {
        Self {
            delay: Duration::from_millis(LAUNCH_DELAY_MS),
            dry_run: false,
            windows: profile.is_windows(),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Apply the working directory to this process and start the command on
    /// a background thread.
    ///
    /// Returns `None` in dry-run mode. The launched process is never waited
    /// on by the caller; the thread only reaps it.
    pub fn launch(&self, invocation: &Invocation) -> Option<JoinHandle<()>> {
        if self.dry_run {
            tracing::info!(command = %invocation.command, "dry run, not launching");
            return None;
        }

        if let Some(dir) = &invocation.working_dir
            && let Err(err) = env::set_current_dir(dir)
        {
            tracing::warn!("cannot change directory to {}: {}", dir.display(), err);
        }

        tracing::info!(command = %invocation.command, "launching");
        let mut command = self.shell_command(&invocation.command);
        if let Some(dir) = &invocation.working_dir {
            command.current_dir(dir);
        }
        let delay = self.delay;
        let line = invocation.command.clone();

        Some(thread::spawn(move || {
            thread::sleep(delay);
            match command.spawn() {
                Ok(mut child) => {
                    let _ = child.wait();
                }
                Err(source) => {
                    let err = LaunchError::Spawn {
                        command: line,
                        source,
                    };
                    tracing::warn!("{}", err);
                }
            }
        }))
    }

    fn shell_command(&self, line: &str) -> Command {
        let mut command = if self.windows {
            let mut command = Command::new("cmd");
            command.arg("/C").arg(line);
            command
        } else {
            let mut command = Command::new("sh");
            command.arg("-c").arg(line);
            command
        };
        command.stdin(Stdio::null());
        command
    }
}
