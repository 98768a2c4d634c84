//! npm registry query via the `npm` command line

use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::NpmConfig;
use crate::version::error::RegistryError;
use crate::version::registry::PackageQuery;

/// Runs `npm show <package> versions --no-color`
pub struct NpmQuery {
    command: String,
    package: String,
    timeout_ms: Option<u64>,
}

impl NpmQuery {
    pub fn new(config: &NpmConfig, timeout_ms: Option<u64>) -> Self {
        Self {
            command: config.command.clone(),
            package: config.package.clone(),
            timeout_ms,
        }
    }

    fn args(&self) -> [&str; 4] {
        ["show", &self.package, "versions", "--no-color"]
    }

    fn command_line(&self) -> String {
        format!("{} {}", self.command, self.args().join(" "))
    }
}

impl Default for NpmQuery {
    fn default() -> Self {
        Self::new(&NpmConfig::default(), None)
    }
}

/// Parse the array literal npm prints, e.g. `[ '1.76.0', '1.77.0' ]`.
///
/// Quotes, brackets and line breaks are ignored; a single bare version is
/// accepted as a one-element list.
pub fn parse_version_list(stdout: &str) -> Vec<String> {
    stdout
        .split(|c: char| c == ',' || c == '\n' || c == '\r')
        .map(|item| {
            item.trim()
                .trim_matches(|c: char| matches!(c, '[' | ']' | '\'' | '"') || c.is_whitespace())
        })
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[async_trait::async_trait]
impl PackageQuery for NpmQuery {
    async fn query_versions(&self) -> Result<Vec<String>, RegistryError> {
        let command_line = self.command_line();
        debug!("Running `{}`", command_line);

        let mut command = Command::new(&self.command);
        command.args(self.args()).kill_on_drop(true);
        let output = command.output();

        let output = match self.timeout_ms {
            Some(timeout_ms) => tokio::time::timeout(Duration::from_millis(timeout_ms), output)
                .await
                .map_err(|_| RegistryError::Timeout {
                    command: command_line.clone(),
                    timeout_ms,
                })?,
            None => output.await,
        }
        .map_err(|source| RegistryError::Spawn {
            command: command_line.clone(),
            source,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!("`{}` failed: {}", command_line, stderr);
            return Err(RegistryError::CommandFailed {
                command: command_line,
                code: output.status.code(),
                stderr,
            });
        }

        Ok(parse_version_list(&String::from_utf8_lossy(&output.stdout)))
    }
}
