//! Neighbor table reader.
//!
//! Runs the host's address-resolution listing (`arp -a` by default) and
//! extracts `(ip, mac)` pairs from its text output. Two line shapes are
//! understood:
//!
//! ```text
//! gateway (192.168.0.1) at a4:2b:b0:11:22:33 [ether] on eth0     # Linux / BSD / macOS
//!   192.168.0.1           a4-2b-b0-11-22-33     dynamic          # Windows
//! ```
//!
//! Anything else (interface headers, `(incomplete)` entries, blank lines)
//! is skipped without error.

use crate::neighbor::mac::MacAddress;
use crate::utils::ip_utils::is_valid_ipv4;
use log::debug;
use regex::Regex;
use std::process::{Command, ExitStatus};
use std::sync::LazyLock;

static UNIX_ENTRY: LazyLock<Regex> = LazyLock::new(||
    Regex::new(r"\((\d{1,3}(?:\.\d{1,3}){3})\)\s+at\s+([0-9A-Fa-f]{1,2}(?:[:-][0-9A-Fa-f]{1,2}){5})\b").unwrap()
);

static WINDOWS_ENTRY: LazyLock<Regex> = LazyLock::new(||
    Regex::new(r"^\s*(\d{1,3}(?:\.\d{1,3}){3})\s+([0-9A-Fa-f]{2}(?:[:-][0-9A-Fa-f]{2}){5})\b").unwrap()
);

/// One entry of the neighbor table, MAC in canonical form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressPair {
    pub ip: String,
    pub mac: String,
}

/// Errors raised when the neighbor table cannot be obtained
#[derive(Debug, thiserror::Error)]
pub enum NeighborTableError {
    #[error("failed to run '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' exited with {status}: {stderr}")]
    Status {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("'{command}' produced output that is not valid UTF-8")]
    InvalidOutput { command: String },
}

/// Anything that can produce the current neighbor table
pub trait NeighborSource {
    fn read(&self) -> Result<Vec<AddressPair>, NeighborTableError>;
}

/// Neighbor table backed by an external command such as `arp -a`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArpCommand {
    program: String,
    args: Vec<String>,
}

impl ArpCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        ArpCommand {
            program: program.into(),
            args,
        }
    }

    /// Build from a `[program, args...]` list as found in the configuration.
    /// Returns `None` for an empty list.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(ArpCommand::new(program.clone(), args.to_vec()))
    }

    /// Command line as it would be typed, used in error messages
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for ArpCommand {
    fn default() -> Self {
        ArpCommand::new("arp", vec!["-a".to_string()])
    }
}

impl NeighborSource for ArpCommand {
    /// Run the command once and parse its standard output.
    ///
    /// Blocks until the command exits; no timeout is applied.
    fn read(&self) -> Result<Vec<AddressPair>, NeighborTableError> {
        let command = self.command_line();
        debug!("Reading neighbor table with '{}'", command);

        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|source| NeighborTableError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(NeighborTableError::Status {
                command,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|_| NeighborTableError::InvalidOutput { command })?;

        let pairs = parse_neighbor_table(&stdout);
        debug!("Neighbor table holds {} usable entries", pairs.len());
        Ok(pairs)
    }
}

/// Parse `arp -a` style text into address pairs, in line order.
///
/// # Examples
/// ```
/// use lfcompose::neighbor::parse_neighbor_table;
///
/// let pairs = parse_neighbor_table("? (10.0.0.5) at aa:bb:cc:dd:ee:ff [ether] on eth0\n");
/// assert_eq!(pairs[0].ip, "10.0.0.5");
/// assert_eq!(pairs[0].mac, "AA:BB:CC:DD:EE:FF");
/// ```
pub fn parse_neighbor_table(text: &str) -> Vec<AddressPair> {
    text.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<AddressPair> {
    let captures = UNIX_ENTRY
        .captures(line)
        .or_else(|| WINDOWS_ENTRY.captures(line))?;

    let ip = captures.get(1)?.as_str();
    if !is_valid_ipv4(ip) {
        return None;
    }
    let mac: MacAddress = captures.get(2)?.as_str().parse().ok()?;

    Some(AddressPair {
        ip: ip.to_string(),
        mac: mac.to_string(),
    })
}
