//! Best-effort desktop notifications.
//!
//! Nothing here can fail from the caller's point of view: a missing
//! notification daemon, a missing binary, or a non-zero exit are logged at
//! `debug` and otherwise ignored.

use std::process::{Command, Stdio};

use tracing::debug;

pub const APP_NAME: &str = "Task Master";

/// A single desktop notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub timeout_secs: u32,
}

impl Notification {
    pub fn task_added(text: &str, timeout_secs: u32) -> Self {
        Notification {
            title: "Task added".to_string(),
            message: format!("Added: {}", text),
            timeout_secs,
        }
    }

    pub fn task_completed(text: &str, timeout_secs: u32) -> Self {
        Notification {
            title: "Task completed".to_string(),
            message: format!("Completed: {}", text),
            timeout_secs,
        }
    }
}

/// Something that can show a notification.
pub trait Notifier {
    fn notify(&self, notification: &Notification);
}

/// Discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _notification: &Notification) {}
}

/// Shows notifications through the platform's notifier command
/// (`notify-send` on Linux and the BSDs, `osascript` on macOS).
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, notification: &Notification) {
        let Some(mut cmd) = platform_command(std::env::consts::OS, notification) else {
            debug!(os = std::env::consts::OS, "no desktop notifier for this platform");
            return;
        };
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        match cmd.spawn() {
            Ok(mut child) => {
                // Reap in the background so the UI never waits on the daemon
                std::thread::spawn(move || match child.wait() {
                    Ok(status) if !status.success() => {
                        debug!(%status, "notifier exited unsuccessfully")
                    }
                    Err(e) => debug!(error = %e, "could not wait for notifier"),
                    Ok(_) => {}
                });
            }
            Err(e) => debug!(error = %e, "could not spawn notifier"),
        }
    }
}

/// Build the notifier command for `os`, or `None` where there is none.
fn platform_command(os: &str, n: &Notification) -> Option<Command> {
    match os {
        "linux" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" => {
            let mut cmd = Command::new("notify-send");
            cmd.arg("--app-name")
                .arg(APP_NAME)
                .arg("--expire-time")
                .arg((u64::from(n.timeout_secs) * 1000).to_string())
                .arg(&n.title)
                .arg(&n.message);
            Some(cmd)
        }
        "macos" => {
            let mut cmd = Command::new("osascript");
            cmd.arg("-e").arg(format!(
                "display notification \"{}\" with title \"{}\"",
                applescript_escape(&n.message),
                applescript_escape(&n.title),
            ));
            Some(cmd)
        }
        _ => None,
    }
}

fn applescript_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn notification_messages() {
        let n = Notification::task_added("Buy bread", 2);
        assert_eq!(n.title, "Task added");
        assert_eq!(n.message, "Added: Buy bread");
        let n = Notification::task_completed("Buy bread", 2);
        assert_eq!(n.title, "Task completed");
        assert_eq!(n.message, "Completed: Buy bread");
    }

    #[test]
    fn linux_uses_notify_send() {
        let n = Notification::task_added("x", 2);
        let cmd = platform_command("linux", &n).unwrap();
        assert_eq!(cmd.get_program(), "notify-send");
        assert_eq!(
            args(&cmd),
            vec!["--app-name", APP_NAME, "--expire-time", "2000", "Task added", "Added: x"]
        );
    }

    #[test]
    fn macos_escapes_quotes() {
        let n = Notification::task_added("say \"hi\"", 2);
        let cmd = platform_command("macos", &n).unwrap();
        assert_eq!(cmd.get_program(), "osascript");
        assert_eq!(
            args(&cmd)[1],
            "display notification \"Added: say \\\"hi\\\"\" with title \"Task added\""
        );
    }

    #[test]
    fn unknown_platform_has_no_command() {
        let n = Notification::task_added("x", 2);
        assert!(platform_command("windows", &n).is_none());
    }
}
