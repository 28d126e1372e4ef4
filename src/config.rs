//! Issuer parameter ingestion from configuration.
//!
//! All binary fields are hex strings. An odd number of digits is left-padded
//! with a single `0`.
//!
//! ```toml
//! uid_p = "687474703a2f2f697373756572"
//! hash = "SHA-256"
//! specification = ""
//! encodings = [true, false]
//! device_protected = false
//! generators = ["<g0>", "<g1>", "<g2>", "<gt>"]
//!
//! [group]
//! p = "<p>"
//! q = "<q>"
//! g = "<g>"
//! ```

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::primitives::{decode_hex, HashAlgorithm, Subgroup};
use crate::protocol::IssuerParameters;
use crate::{Error, Result};

/// Hex-encoded subgroup domain `(p, q, g)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
    /// Field order.
    pub p: String,
    /// Subgroup order.
    pub q: String,
    /// Subgroup generator.
    pub g: String,
}

/// Serialized form of [`IssuerParameters`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuerParametersConfig {
    /// Parameters identifier.
    pub uid_p: String,
    /// Hash algorithm name, `SHA-256` by default.
    #[serde(default = "default_hash")]
    pub hash: String,
    /// Application specification.
    #[serde(default)]
    pub specification: String,
    /// Per-attribute encoding flags; `true` hashes the attribute.
    #[serde(default)]
    pub encodings: Vec<bool>,
    /// Whether tokens are bound to a device.
    #[serde(default)]
    pub device_protected: bool,
    /// Generators `(g0, g1, ..., gn, gt[, gd])`.
    pub generators: Vec<String>,
    /// Subgroup domain.
    pub group: GroupConfig,
}

/// Keys taken verbatim from the environment, so an all-digit hex value stays
/// a string with its leading zeros.
const STRING_KEYS: [&str; 6] = ["uid_p", "hash", "specification", "group.p", "group.q", "group.g"];

fn env() -> Env {
    Env::prefixed("UPROVE_").split("__")
}

fn default_hash() -> String {
    HashAlgorithm::default().name().to_string()
}

impl IssuerParametersConfig {
    /// Loads configuration from `.env` file, TOML file, and environment variables.
    ///
    /// Configuration priority (highest to lowest):
    /// 1. Environment variables with `UPROVE_` prefix, nested keys separated
    ///    by `__` (e.g. `UPROVE_GROUP__P`)
    /// 2. TOML configuration file (if exists)
    /// 3. `.env` file (if exists)
    ///
    /// The TOML file path can be set via the `UPROVE_CONFIG_PATH` environment
    /// variable and defaults to `./config/issuer.toml`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a required field is missing or malformed.
    pub fn from_env() -> Result<Self> {
        // a missing .env file is fine
        let _ = dotenvy::dotenv();

        let config_path = std::env::var("UPROVE_CONFIG_PATH")
            .unwrap_or_else(|_| "config/issuer.toml".to_string());

        let figment = Figment::new()
            .merge(Toml::file(&config_path))
            .merge(env().ignore(&STRING_KEYS));

        env()
            .only(&STRING_KEYS)
            .iter()
            .fold(figment, |figment, (key, value)| {
                figment.merge(Serialized::default(key.as_str(), value))
            })
            .extract()
            .map_err(config_error)
    }

    /// Parses configuration from a TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Figment::from(Toml::string(toml))
            .extract()
            .map_err(config_error)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file does not exist or is malformed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::Config(format!(
                "configuration file not found: {}",
                path.display()
            )));
        }

        Figment::from(Toml::file(path))
            .extract()
            .map_err(config_error)
    }

    /// Decodes and validates the configured parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEncoding`] for malformed hex,
    /// [`Error::UnsupportedHash`] for an unknown hash name, and any error from
    /// [`Subgroup::new`] or [`IssuerParameters::new`].
    pub fn build(&self) -> Result<IssuerParameters> {
        let subgroup = Subgroup::from_hex(&self.group.p, &self.group.q, &self.group.g)?;
        let hash_algorithm = HashAlgorithm::from_name(&self.hash)?;
        let generators = self
            .generators
            .iter()
            .map(|generator| decode_hex(generator).map(|bytes| BigUint::from_bytes_be(&bytes)))
            .collect::<Result<Vec<_>>>()?;

        IssuerParameters::new(
            decode_hex(&self.uid_p)?,
            subgroup,
            hash_algorithm,
            generators,
            self.encodings.clone(),
            decode_hex(&self.specification)?,
            self.device_protected,
        )
    }
}

impl From<&IssuerParameters> for IssuerParametersConfig {
    fn from(params: &IssuerParameters) -> Self {
        let subgroup = params.subgroup();
        Self {
            uid_p: hex::encode(params.uid_p()),
            hash: params.hash_algorithm().name().to_string(),
            specification: hex::encode(params.specification()),
            encodings: params.encodings().to_vec(),
            device_protected: params.is_device_protected(),
            generators: params.generators().iter().map(integer_hex).collect(),
            group: GroupConfig {
                p: integer_hex(subgroup.p()),
                q: integer_hex(subgroup.q()),
                g: integer_hex(subgroup.g()),
            },
        }
    }
}

fn integer_hex(value: &BigUint) -> String {
    hex::encode(value.to_bytes_be())
}

fn config_error(error: figment::Error) -> Error {
    Error::Config(error.to_string())
}
