//! Measurement through Marp CLI and a headless browser probe.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::{FixConfig, Viewport};
use crate::error::{Error, Result};
use crate::measure::{OverflowProbe, OverflowReport};

/// The Node script run against the rendered HTML.
const PROBE_SCRIPT: &str = include_str!("probe.cjs");

/// Measures a deck by rendering it with Marp CLI and inspecting the HTML
/// in headless Chromium.
///
/// Each measurement works in a fresh scratch directory under the
/// configured temp dir, removed when the measurement finishes.
#[derive(Debug, Clone)]
pub struct MarpProbe {
    marp_command: Vec<String>,
    node_command: Vec<String>,
    temp_dir: PathBuf,
    viewport: Viewport,
}

impl MarpProbe {
    /// Create a probe using `npx @marp-team/marp-cli` and `node`.
    pub fn new(config: &FixConfig) -> Self {
        Self {
            marp_command: vec!["npx".to_string(), "@marp-team/marp-cli".to_string()],
            node_command: vec!["node".to_string()],
            temp_dir: config.temp_dir.clone(),
            viewport: config.viewport,
        }
    }

    /// Override the Marp CLI invocation, e.g. a globally installed `marp`.
    pub fn with_marp_command(mut self, command: Vec<String>) -> Self {
        self.marp_command = command;
        self
    }

    /// Override the Node invocation running the probe script.
    pub fn with_node_command(mut self, command: Vec<String>) -> Self {
        self.node_command = command;
        self
    }

    fn render_html(&self, markdown_path: &Path, html_path: &Path) -> Result<()> {
        let (program, args) = split_command(&self.marp_command)?;
        log::debug!("rendering {} with {}", markdown_path.display(), program);
        let output = Command::new(program)
            .args(args)
            .args(["--html", "--allow-local-files", "--output"])
            .arg(html_path)
            .arg(markdown_path)
            .output()
            .map_err(|e| spawn_error(program, "install @marp-team/marp-cli", e))?;

        if !output.status.success() {
            return Err(Error::ToolFailed(format!(
                "marp-cli exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(())
    }

    fn run_probe(&self, script_path: &Path, html_path: &Path) -> Result<Vec<OverflowReport>> {
        let (program, args) = split_command(&self.node_command)?;
        log::debug!("probing {} with {}", html_path.display(), program);
        let output = Command::new(program)
            .args(args)
            .arg(script_path)
            .arg(html_path)
            .arg(self.viewport.width.to_string())
            .arg(self.viewport.height.to_string())
            .output()
            .map_err(|e| spawn_error(program, "install Node.js and puppeteer", e))?;

        if !output.status.success() {
            return Err(Error::ToolFailed(format!(
                "probe exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        serde_json::from_slice(&output.stdout)
            .map_err(|e| Error::ProbeOutput(e.to_string()))
    }
}

impl OverflowProbe for MarpProbe {
    fn measure(&self, markdown: &str) -> Result<Vec<OverflowReport>> {
        fs::create_dir_all(&self.temp_dir)?;
        let scratch = tempfile::Builder::new()
            .prefix("slidefit-")
            .tempdir_in(&self.temp_dir)?;

        let markdown_path = scratch.path().join("deck.md");
        fs::write(&markdown_path, markdown)?;
        let html_path = scratch.path().join("deck.html");
        self.render_html(&markdown_path, &html_path)?;

        let script_path = scratch.path().join("probe.cjs");
        fs::write(&script_path, PROBE_SCRIPT)?;
        let reports = self.run_probe(&script_path, &html_path)?;
        log::debug!("measured {} slides", reports.len());
        Ok(reports)
    }
}

fn split_command(command: &[String]) -> Result<(&str, &[String])> {
    match command.split_first() {
        Some((program, args)) => Ok((program.as_str(), args)),
        None => Err(Error::ToolMissing("empty command line".to_string())),
    }
}

fn spawn_error(program: &str, hint: &str, err: io::Error) -> Error {
    match err.kind() {
        io::ErrorKind::NotFound => Error::ToolMissing(format!("{} ({})", program, hint)),
        _ => Error::ToolFailed(format!("failed to spawn {}: {}", program, err)),
    }
}
