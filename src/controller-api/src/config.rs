use serde::{Deserialize, Serialize};
use std::{fmt, fs, io, path};

#[derive(Debug)]
pub struct ConfigError(String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "bad controller configuration ({})", self.0)
    }
}

impl std::error::Error for ConfigError {}

/// Settings for talking to the controller REST endpoint.
///
/// Read-only for the lifetime of a command. Missing YAML keys take their
/// [default](#impl-Default) values.
#[derive(Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ClientConfiguration {
    pub controller_rest_uri: String,
    pub tls_enabled: bool,
    pub truststore: Option<path::PathBuf>,
    /// Fail context creation if the trust store cannot be loaded, instead of
    /// continuing with the system trust roots
    pub strict_truststore: bool,
    pub auth_enabled: bool,
    pub user_name: Option<String>,
    #[serde(skip_serializing)]
    pub password: Option<String>,
}

impl Default for ClientConfiguration {
    fn default() -> Self {
        ClientConfiguration {
            controller_rest_uri: super::CONTROLLER_REST_URI.to_string(),
            tls_enabled: false,
            truststore: None,
            strict_truststore: false,
            auth_enabled: false,
            user_name: None,
            password: None,
        }
    }
}

impl fmt::Debug for ClientConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ClientConfiguration")
            .field("controller_rest_uri", &self.controller_rest_uri)
            .field("tls_enabled", &self.tls_enabled)
            .field("truststore", &self.truststore)
            .field("strict_truststore", &self.strict_truststore)
            .field("auth_enabled", &self.auth_enabled)
            .field("user_name", &self.user_name)
            .field("password", &self.password.as_ref().map(|_| "<hidden>"))
            .finish()
    }
}

impl ClientConfiguration {
    pub fn from_path<P: AsRef<path::Path>>(p: P) -> Result<Self, serde_yaml::Error> {
        let file = fs::File::open(p.as_ref()).map_err(serde::de::Error::custom)?;
        let config = serde_yaml::from_reader(io::BufReader::new(file))?;
        log::debug!("read configuration: {}", p.as_ref().display());
        Ok(config)
    }
    /// Check that the TLS and authentication settings are complete
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.controller_rest_uri.is_empty() {
            return Err(ConfigError("missing controller REST URI".to_string()));
        }
        if self.tls_enabled && self.truststore.is_none() {
            return Err(ConfigError(
                "TLS is enabled but no trust store is set".to_string(),
            ));
        }
        if self.auth_enabled && (self.user_name.is_none() || self.password.is_none()) {
            return Err(ConfigError(
                "authentication is enabled but user name or password is missing".to_string(),
            ));
        }
        Ok(())
    }
}
