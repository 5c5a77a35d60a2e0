use crate::neighbor::ArpCommand;
use crate::registry::DEFAULT_FALLBACK_IP;
use crate::utils::validation::{validate_client_macs, validate_fallback_ip};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level configuration structure that mirrors the YAML configuration
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Capture devices, in node index order
    #[serde(default)]
    pub clients: Vec<ClientConfig>,
    /// How device addresses are looked up
    #[serde(default)]
    pub resolver: ResolverSettings,
    /// Shape of the generated program
    #[serde(default)]
    pub composer: ComposerSettings,
}

/// One physical capture device
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ClientConfig {
    pub mac_address: String,
}

/// Neighbor table command and fallback policy
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ResolverSettings {
    /// Program and arguments that list the neighbor table
    pub command: Vec<String>,
    /// Address assigned to devices missing from the neighbor table
    pub fallback_ip: String,
}

/// Names and parameters used when composing the program
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ComposerSettings {
    /// Name of the federated main reactor
    pub reactor_name: String,
    /// LF target language
    pub target: String,
    /// Period between capture triggers (e.g. "1s", "500ms")
    #[serde(with = "humantime_serde")]
    pub capture_rate: Duration,
    /// Account used in the `at user@host` placement of each node
    pub deploy_user: String,
    /// Reactor class of the coordinator
    pub coordinator_class: String,
    /// Reactor class of every capture node
    pub node_class: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid client configuration: {0}")]
    InvalidClient(String),
    #[error("Invalid resolver configuration: {0}")]
    InvalidResolver(String),
    #[error("Invalid composer configuration: {0}")]
    InvalidComposer(String),
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_client_macs(&self.device_macs()).map_err(ValidationError::InvalidClient)?;

        if self.resolver.command.is_empty() || self.resolver.command[0].trim().is_empty() {
            return Err(ValidationError::InvalidResolver(
                "command must name a program".to_string(),
            ));
        }
        validate_fallback_ip(&self.resolver.fallback_ip).map_err(ValidationError::InvalidResolver)?;

        self.composer.validate()
    }

    /// Configured device MACs in node order, as written
    pub fn device_macs(&self) -> Vec<String> {
        self.clients.iter().map(|client| client.mac_address.clone()).collect()
    }

    /// Neighbor table command described by the resolver settings
    pub fn arp_command(&self) -> ArpCommand {
        ArpCommand::from_argv(&self.resolver.command).unwrap_or_default()
    }
}

impl ComposerSettings {
    fn validate(&self) -> Result<(), ValidationError> {
        let identifiers = [
            ("reactor_name", &self.reactor_name),
            ("target", &self.target),
            ("coordinator_class", &self.coordinator_class),
            ("node_class", &self.node_class),
        ];
        for (field, value) in identifiers {
            if !is_identifier(value) {
                return Err(ValidationError::InvalidComposer(format!(
                    "{} '{}' is not a valid identifier",
                    field, value
                )));
            }
        }

        if self.deploy_user.is_empty() || self.deploy_user.contains(|c: char| c.is_whitespace() || c == '@') {
            return Err(ValidationError::InvalidComposer(format!(
                "deploy_user '{}' is not a valid user name",
                self.deploy_user
            )));
        }

        if self.capture_rate.is_zero() {
            return Err(ValidationError::InvalidComposer(
                "capture_rate must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Default implementations
impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            command: vec!["arp".to_string(), "-a".to_string()],
            fallback_ip: DEFAULT_FALLBACK_IP.to_string(),
        }
    }
}

impl Default for ComposerSettings {
    fn default() -> Self {
        Self {
            reactor_name: "MotionTrackingArena".to_string(),
            target: "Python".to_string(),
            capture_rate: Duration::from_secs(1),
            deploy_user: "linguafranca".to_string(),
            coordinator_class: "MainScheduler".to_string(),
            node_class: "CaptureNode".to_string(),
        }
    }
}
