//! System clipboard
//!
//! One-shot write by piping into whichever clipboard tool is installed.

use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

use crate::error::{PolishError, PolishResult};

/// Tools tried in order: (program, args)
const TOOLS: [(&str, &[&str]); 4] = [
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("pbcopy", &[]),
];

/// Copy text to the clipboard, returning the tool that took it
pub fn copy(text: &str) -> PolishResult<&'static str> {
    copy_with(&TOOLS, text)
}

/// Try each tool in turn until one accepts the whole text and exits cleanly.
///
/// A tool that is missing, exits early, or fails is skipped; every spawned
/// child is waited on.
fn copy_with<'a>(tools: &[(&'a str, &[&str])], text: &str) -> PolishResult<&'a str> {
    if text.is_empty() {
        return Err(PolishError::Clipboard("nothing to copy".to_string()));
    }

    for &(program, args) in tools {
        let Ok(mut child) = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        else {
            continue;
        };

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(text.as_bytes()) {
                debug!("Writing to {} failed: {}", program, e);
                drop(stdin);
                let _ = child.wait();
                continue;
            }
        }

        match child.wait() {
            Ok(status) if status.success() => {
                debug!("📋 Copied {} bytes with {}", text.len(), program);
                return Ok(program);
            }
            Ok(status) => debug!("{} exited with {}", program, status),
            Err(e) => debug!("Waiting on {} failed: {}", program, e),
        }
    }

    let tried: Vec<&str> = tools.iter().map(|(program, _)| *program).collect();
    Err(PolishError::Clipboard(format!(
        "No clipboard command found (tried {})",
        tried.join(", ")
    )))
}
