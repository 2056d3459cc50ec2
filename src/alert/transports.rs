// src/alert/transports.rs

use std::process::Stdio;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// One way of putting an alert in front of the user.
///
/// Implementations must be infallible to *call*: any failure is reported
/// through the returned `Result` and handled by the dispatcher, never by
/// panicking or blocking.
#[async_trait]
pub trait Transport: Send + Sync {
    fn name(&self) -> &'static str;

    async fn deliver(&self, prompt: &str) -> Result<()>;
}

/// One shell-level mechanism for writing text to the clipboard.
#[derive(Debug, Clone, Copy)]
pub struct ClipboardProvider {
    pub name: &'static str,
    pub program: &'static str,
    pub args: &'static [&'static str],
}

/// Clipboard transport: an ordered chain of providers tried in sequence
/// until one succeeds.
pub struct ClipboardTransport {
    providers: Vec<ClipboardProvider>,
}

impl ClipboardTransport {
    /// The provider chain for the current operating system family.
    pub fn platform_default() -> Self {
        let providers = if cfg!(target_os = "macos") {
            vec![ClipboardProvider {
                name: "pbcopy",
                program: "pbcopy",
                args: &[],
            }]
        } else if cfg!(windows) {
            vec![ClipboardProvider {
                name: "clip",
                program: "clip",
                args: &[],
            }]
        } else {
            // Wayland first, then the X11 options.
            vec![
                ClipboardProvider {
                    name: "wl-copy",
                    program: "wl-copy",
                    args: &[],
                },
                ClipboardProvider {
                    name: "xclip",
                    program: "xclip",
                    args: &["-selection", "clipboard"],
                },
                ClipboardProvider {
                    name: "xsel",
                    program: "xsel",
                    args: &["--clipboard", "--input"],
                },
            ]
        };

        Self { providers }
    }

    /// Build a transport with an explicit provider chain.
    pub fn with_providers(providers: Vec<ClipboardProvider>) -> Self {
        Self { providers }
    }
}

#[async_trait]
impl Transport for ClipboardTransport {
    fn name(&self) -> &'static str {
        "clipboard"
    }

    async fn deliver(&self, prompt: &str) -> Result<()> {
        let mut last_err = None;

        for provider in &self.providers {
            match pipe_to_command(provider, prompt).await {
                Ok(()) => {
                    debug!(provider = provider.name, "clipboard write succeeded");
                    return Ok(());
                }
                Err(err) => {
                    debug!(
                        provider = provider.name,
                        error = %err,
                        "clipboard provider failed, trying next"
                    );
                    last_err = Some(err);
                }
            }
        }

        Err(last_err
            .unwrap_or_else(|| anyhow!("no clipboard provider configured for this platform")))
    }
}

/// Pipe `input` into the provider's stdin and require a zero exit status.
async fn pipe_to_command(provider: &ClipboardProvider, input: &str) -> Result<()> {
    let mut child = Command::new(provider.program)
        .args(provider.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("spawning {}", provider.program))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(input.as_bytes())
            .await
            .with_context(|| format!("writing to {} stdin", provider.program))?;
        // Close stdin so the child sees EOF.
        drop(stdin);
    }

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for {}", provider.program))?;

    if !status.success() {
        bail!(
            "{} exited with status {}",
            provider.program,
            status.code().unwrap_or(-1)
        );
    }

    Ok(())
}

/// Desktop toast transport via the platform's shell notifier.
pub struct DesktopToastTransport {
    title: String,
}

impl DesktopToastTransport {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

#[async_trait]
impl Transport for DesktopToastTransport {
    fn name(&self) -> &'static str {
        "desktop-toast"
    }

    async fn deliver(&self, prompt: &str) -> Result<()> {
        let mut cmd = if cfg!(target_os = "macos") {
            let script = format!(
                "display notification \"{}\" with title \"{}\"",
                applescript_escape(prompt),
                applescript_escape(&self.title)
            );
            let mut c = Command::new("osascript");
            c.arg("-e").arg(script);
            c
        } else if cfg!(windows) {
            let mut c = Command::new("msg");
            c.arg("*").arg(prompt);
            c
        } else {
            let mut c = Command::new("notify-send");
            c.arg(&self.title).arg(prompt);
            c
        };

        let status = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .context("spawning desktop notifier")?;

        if !status.success() {
            bail!(
                "desktop notifier exited with status {}",
                status.code().unwrap_or(-1)
            );
        }

        Ok(())
    }
}

/// Escape a string for embedding in a double-quoted AppleScript literal.
fn applescript_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
