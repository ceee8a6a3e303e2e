use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};

/// Commit messages of `from..target` in `dir`, one entry per commit, in the
/// order `git log` reports them.
pub fn commit_messages(dir: &Path, from: &str, target: &str) -> Result<Vec<String>> {
    let range = format!("{}..{}", from, target);
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(["log", "-z", "--format=%B", &range])
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()
        .map_err(|e| Error::History(format!("Failed to run git: {}", e)))?;

    if !output.status.success() {
        return Err(Error::History(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    Ok(split_log(&String::from_utf8_lossy(&output.stdout)))
}

fn split_log(log: &str) -> Vec<String> {
    log.split('\0')
        .map(|message| message.trim_matches('\n'))
        .filter(|message| !message.is_empty())
        .map(str::to_string)
        .collect()
}
