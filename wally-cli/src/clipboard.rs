//! Clipboard access with a fallback path.
//!
//! The system clipboard (through `arboard`) is preferred. When it cannot be
//! opened, typically a headless session or a desktop without a clipboard
//! service, the text is piped into a copy command such as `xclip` instead.
//! The mechanism is chosen on every call: while the system clipboard is
//! unavailable it is probed again before each copy.

use std::fmt;
use std::io::Write;
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard write failed: {0}")]
    Write(String),

    #[error("copy command `{command}` could not run: {source}")]
    LegacySpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("copy command `{command}` exited with {status}")]
    LegacyRejected { command: String, status: ExitStatus },

    #[error("no copy command configured")]
    NoLegacyCommand,
}

/// Which mechanism carried out a copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mechanism {
    Modern,
    Legacy,
}

impl fmt::Display for Mechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Modern => f.write_str("system clipboard"),
            Self::Legacy => f.write_str("copy command"),
        }
    }
}

/// Something that can place text on the clipboard
pub trait ClipboardWriter {
    fn copy(&mut self, text: &str) -> Result<Mechanism, ClipboardError>;
}

/// Legacy copy command fed through stdin, e.g. `xclip -selection clipboard`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl LegacyCommand {
    /// Parse a whitespace separated command line
    pub fn parse(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Platform default copy command
    pub fn platform_default() -> Self {
        let line = if cfg!(target_os = "macos") {
            "pbcopy"
        } else if cfg!(target_os = "windows") {
            "clip"
        } else {
            "xclip -selection clipboard"
        };
        // Non-empty literal, always parses.
        Self::parse(line).unwrap_or(Self {
            program: line.to_string(),
            args: Vec::new(),
        })
    }

    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn run(&self, text: &str) -> Result<(), ClipboardError> {
        let spawn_error = |source| ClipboardError::LegacySpawn {
            command: self.command_line(),
            source,
        };

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(spawn_error)?;

        // A command that exits early closes the pipe; its exit status is the
        // more useful error in that case.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };

        let status = child.wait().map_err(spawn_error)?;
        if !status.success() {
            return Err(ClipboardError::LegacyRejected {
                command: self.command_line(),
                status,
            });
        }
        written.map_err(spawn_error)
    }
}

/// Opens the system clipboard, failing when the session has none
pub type ModernOpener = fn() -> Result<arboard::Clipboard, arboard::Error>;

/// Clipboard adapter preferring the system clipboard over the copy command.
///
/// An opened system clipboard is kept for the adapter's lifetime; on X11 the
/// copied text only lives as long as its owning handle.
pub struct ClipboardAdapter {
    legacy: Option<LegacyCommand>,
    open_modern: ModernOpener,
    modern: Option<arboard::Clipboard>,
    hold_until_replaced: bool,
}

impl ClipboardAdapter {
    pub fn new(legacy: Option<LegacyCommand>) -> Self {
        Self::with_modern_opener(legacy, arboard::Clipboard::new)
    }

    pub fn with_modern_opener(legacy: Option<LegacyCommand>, open_modern: ModernOpener) -> Self {
        Self {
            legacy,
            open_modern,
            modern: None,
            hold_until_replaced: false,
        }
    }

    /// Block each system clipboard write until another program takes the
    /// selection over. Needed on Linux when the process exits right after
    /// copying.
    pub fn hold_until_replaced(mut self, hold: bool) -> Self {
        self.hold_until_replaced = hold;
        self
    }

    /// System clipboard handle, opened on first use and retried on later
    /// calls while unavailable
    fn modern(&mut self) -> Option<&mut arboard::Clipboard> {
        if self.modern.is_none() {
            match (self.open_modern)() {
                Ok(clipboard) => self.modern = Some(clipboard),
                Err(e) => debug!("System clipboard unavailable ({}), falling back", e),
            }
        }
        self.modern.as_mut()
    }
}

fn write_modern(
    clipboard: &mut arboard::Clipboard,
    text: &str,
    hold_until_replaced: bool,
) -> Result<(), arboard::Error> {
    #[cfg(target_os = "linux")]
    {
        if hold_until_replaced {
            use arboard::SetExtLinux;
            tracing::info!("Holding clipboard contents until another program replaces them");
            return clipboard.set().wait().text(text.to_string());
        }
    }
    #[cfg(not(target_os = "linux"))]
    let _ = hold_until_replaced;

    clipboard.set_text(text.to_string())
}

impl ClipboardWriter for ClipboardAdapter {
    fn copy(&mut self, text: &str) -> Result<Mechanism, ClipboardError> {
        let hold = self.hold_until_replaced;
        let modern_result = self
            .modern()
            .map(|clipboard| write_modern(clipboard, text, hold));

        match modern_result {
            Some(Ok(())) => Ok(Mechanism::Modern),
            Some(Err(e)) => {
                // Reopen on the next call.
                self.modern = None;
                Err(ClipboardError::Write(e.to_string()))
            }
            None => {
                let command = self.legacy.as_ref().ok_or(ClipboardError::NoLegacyCommand)?;
                command.run(text)?;
                Ok(Mechanism::Legacy)
            }
        }
    }
}
