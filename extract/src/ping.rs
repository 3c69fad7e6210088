//! Ping collaborator.
//!
//! [`PingBackend`] is the seam between the auto-ping workflow and whatever
//! actually sends ICMP. [`SystemPing`] shells out to the OS `ping` binary,
//! one child per address, fanned out on a dedicated rayon pool.

use std::io::Read;
use std::process::{Command, Stdio};
use std::time::Duration;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use wait_timeout::ChildExt;

use crate::error::{Result, SiftError};
use netsift_core::is_ipv4_shape;

/// Knobs for one ping batch.
///
/// # Examples
///
/// ```
/// use netsift_extract::ping::PingSettings;
///
/// let settings = PingSettings::default();
/// assert_eq!(settings.count, 4);
/// assert_eq!(settings.concurrency, 10);
/// assert_eq!(settings.timeout_secs, 60);
/// assert!(!settings.analyze);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PingSettings {
    /// Echo requests per address.
    pub count: u32,
    /// Addresses pinged at the same time.
    pub concurrency: usize,
    /// Upper bound on one address's ping run.
    pub timeout_secs: u64,
    /// Run the status analysis over the collected outputs.
    pub analyze: bool,
}

impl Default for PingSettings {
    fn default() -> Self {
        Self {
            count: 4,
            concurrency: 10,
            timeout_secs: 60,
            analyze: false,
        }
    }
}

impl PingSettings {
    /// Rejects settings that cannot drive a batch.
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(SiftError::InvalidInput("ping count must be at least 1".into()));
        }
        if self.concurrency == 0 {
            return Err(SiftError::InvalidInput(
                "ping concurrency must be at least 1".into(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(SiftError::InvalidInput("ping timeout must be at least 1s".into()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Console output of pinging one address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawPingResult {
    pub ip: String,
    /// Whether `ping` ran to completion within the timeout, whatever its
    /// exit code. Reachability is read from `output`.
    pub success: bool,
    pub output: String,
}

impl RawPingResult {
    pub fn failed(ip: &str, output: impl Into<String>) -> Self {
        Self {
            ip: ip.to_string(),
            success: false,
            output: output.into(),
        }
    }

    /// Result of a `ping` run that exited on its own: stdout followed by
    /// stderr.
    pub fn completed(ip: &str, stdout: &[u8], stderr: &[u8]) -> Self {
        let mut output = String::from_utf8_lossy(stdout).into_owned();
        output.push_str(&String::from_utf8_lossy(stderr));
        Self {
            ip: ip.to_string(),
            success: true,
            output,
        }
    }
}

/// Sends pings for a batch of addresses.
///
/// Implementations return one result per requested address, in any order.
/// An `Err` means the batch as a whole could not run.
pub trait PingBackend {
    fn ping_all(&self, ips: &[String], settings: &PingSettings) -> Result<Vec<RawPingResult>>;
}

/// Runs the operating system's `ping` binary.
#[derive(Debug, Clone, Default)]
pub struct SystemPing;

impl PingBackend for SystemPing {
    fn ping_all(&self, ips: &[String], settings: &PingSettings) -> Result<Vec<RawPingResult>> {
        settings.validate()?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(settings.concurrency)
            .build()
            .map_err(|e| SiftError::Collaborator(format!("failed to build ping pool: {e}")))?;

        info!(
            hosts = ips.len(),
            concurrency = settings.concurrency,
            count = settings.count,
            "Starting ping batch"
        );
        let results: Vec<RawPingResult> =
            pool.install(|| ips.par_iter().map(|ip| ping_one(ip, settings)).collect());
        info!(
            hosts = results.len(),
            completed = results.iter().filter(|r| r.success).count(),
            "Finished ping batch"
        );

        Ok(results)
    }
}

fn count_flag() -> &'static str {
    if cfg!(windows) { "-n" } else { "-c" }
}

fn ping_one(ip: &str, settings: &PingSettings) -> RawPingResult {
    if !is_ipv4_shape(ip) {
        debug!(ip, "Refusing to ping malformed address");
        return RawPingResult::failed(ip, format!("Error: invalid address {ip}"));
    }

    let spawned = Command::new("ping")
        .arg(count_flag())
        .arg(settings.count.to_string())
        .arg(ip)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn();
    let mut child = match spawned {
        Ok(child) => child,
        Err(e) => {
            debug!(ip, error = %e, "Failed to spawn ping");
            return RawPingResult::failed(ip, format!("Error: {e}"));
        }
    };

    // Drain both pipes off-thread so a chatty child cannot block on a full
    // pipe while we wait for it.
    let stdout_thread = child.stdout.take().map(|mut pipe| {
        std::thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    });
    let stderr_thread = child.stderr.take().map(|mut pipe| {
        std::thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    });

    let status = match child.wait_timeout(settings.timeout()) {
        Ok(Some(status)) => status,
        Ok(None) => {
            warn!(ip, timeout_secs = settings.timeout_secs, "Ping timed out");
            let _ = child.kill();
            let _ = child.wait();
            return RawPingResult::failed(ip, format!("Ping timed out for {ip}"));
        }
        Err(e) => {
            let _ = child.kill();
            let _ = child.wait();
            return RawPingResult::failed(ip, format!("Error: {e}"));
        }
    };

    let stdout = stdout_thread
        .and_then(|t| t.join().ok())
        .unwrap_or_default();
    let stderr = stderr_thread
        .and_then(|t| t.join().ok())
        .unwrap_or_default();

    debug!(ip, code = ?status.code(), "Ping finished");
    RawPingResult::completed(ip, &stdout, &stderr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_settings_are_rejected() {
        let settings = PingSettings {
            concurrency: 0,
            ..PingSettings::default()
        };
        assert!(matches!(settings.validate(), Err(SiftError::InvalidInput(_))));

        let settings = PingSettings {
            count: 0,
            ..PingSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_unanswered_host_still_completes() {
        let stdout = b"PING 192.0.2.1 (192.0.2.1) 56(84) bytes of data.\n\n--- 192.0.2.1 ping statistics ---\n4 packets transmitted, 0 received, 100% packet loss, time 3062ms\n";
        let result = RawPingResult::completed("192.0.2.1", stdout, b"");
        assert!(result.success);
        assert!(result.output.ends_with("100% packet loss, time 3062ms\n"));
    }

    #[test]
    fn test_completed_output_keeps_stderr() {
        let result = RawPingResult::completed("10.0.0.1", b"PING 10.0.0.1\n", b"ping: sendmsg: Network is unreachable\n");
        assert!(result.success);
        assert_eq!(result.output, "PING 10.0.0.1\nping: sendmsg: Network is unreachable\n");
    }

    #[test]
    fn test_malformed_address_never_reaches_the_os() {
        let result = ping_one("10.0.0.1; rm -rf /", &PingSettings::default());
        assert!(!result.success);
        assert!(result.output.starts_with("Error: invalid address"));
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        let settings: PingSettings = serde_yaml::from_str("count: 2").unwrap();
        assert_eq!(settings.count, 2);
        assert_eq!(settings.concurrency, 10);
        assert_eq!(settings.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_empty_batch_spawns_nothing() {
        let results = SystemPing.ping_all(&[], &PingSettings::default()).unwrap();
        assert!(results.is_empty());
    }
}
