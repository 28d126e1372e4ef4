//! Length-prefixed hash transcript for Fiat-Shamir challenges.
//!
//! Every update is framed the same way on both sides of the protocol: octet
//! strings carry a big-endian 32-bit length prefix, integers are encoded as
//! their minimal big-endian octet string, and lists carry their element count.
//! The order and framing of updates is part of the wire contract.

use core::fmt;
use core::str::FromStr;

use num_bigint::BigUint;
use sha2::{Digest, Sha256, Sha384, Sha512};

use super::{IntegerGroup, Subgroup};
use crate::{Error, Result};

/// Hash function backing a [`Transcript`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// SHA-256.
    #[default]
    Sha256,
    /// SHA-384.
    Sha384,
    /// SHA-512.
    Sha512,
}

impl HashAlgorithm {
    /// Returns the canonical identifier, e.g. `SHA-256`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
        }
    }

    /// Returns the digest length in bytes.
    pub fn output_len(self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    /// Parses an algorithm name. Accepts `SHA-256` as well as `sha256`.
    pub fn from_name(name: &str) -> Result<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            _ => Err(Error::UnsupportedHash(name.to_string())),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone)]
enum HashState {
    Sha256(Sha256),
    Sha384(Sha384),
    Sha512(Sha512),
}

impl HashState {
    fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Sha256 => Self::Sha256(Sha256::new()),
            HashAlgorithm::Sha384 => Self::Sha384(Sha384::new()),
            HashAlgorithm::Sha512 => Self::Sha512(Sha512::new()),
        }
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            Self::Sha256(h) => h.update(data),
            Self::Sha384(h) => h.update(data),
            Self::Sha512(h) => h.update(data),
        }
    }

    fn finalize(self) -> Vec<u8> {
        match self {
            Self::Sha256(h) => h.finalize().to_vec(),
            Self::Sha384(h) => h.finalize().to_vec(),
            Self::Sha512(h) => h.finalize().to_vec(),
        }
    }
}

/// Streaming hash transcript.
///
/// Updates are fed straight into the running hash state; [`Transcript::digest`]
/// consumes the transcript.
#[derive(Clone)]
pub struct Transcript {
    algorithm: HashAlgorithm,
    state: HashState,
}

impl Transcript {
    /// Creates an empty transcript over the given hash algorithm.
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            state: HashState::new(algorithm),
        }
    }

    /// Returns the hash algorithm.
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Appends a single byte.
    pub fn update_byte(&mut self, byte: u8) {
        self.state.update(&[byte]);
    }

    /// Appends a big-endian 32-bit integer.
    pub fn update_u32(&mut self, value: u32) {
        self.state.update(&value.to_be_bytes());
    }

    /// Appends a null field, encoded as a zero length.
    pub fn update_null(&mut self) {
        self.update_u32(0);
    }

    /// Appends a length-prefixed octet string.
    pub fn update_octet_string(&mut self, bytes: &[u8]) {
        self.update_length(bytes.len());
        self.state.update(bytes);
    }

    /// Appends a hex-encoded octet string, left-padding odd digit counts.
    pub fn update_octet_string_hex(&mut self, hex_str: &str) -> Result<()> {
        let bytes = decode_hex(hex_str)?;
        self.update_octet_string(&bytes);
        Ok(())
    }

    /// Appends bytes without a length prefix.
    pub fn update_raw(&mut self, bytes: &[u8]) {
        self.state.update(bytes);
    }

    /// Appends an integer as its minimal big-endian octet string.
    ///
    /// Zero is encoded as the single byte `0x00`.
    pub fn update_integer(&mut self, value: &BigUint) {
        self.update_octet_string(&value.to_bytes_be());
    }

    /// Appends the subgroup description `(p, q, g)`.
    pub fn update_subgroup(&mut self, subgroup: &Subgroup) {
        self.update_integer(subgroup.p());
        self.update_integer(subgroup.q());
        self.update_integer(subgroup.g());
    }

    /// Appends a list of booleans, one byte each.
    pub fn update_list_of_booleans(&mut self, list: &[bool]) {
        self.update_length(list.len());
        for value in list {
            self.update_byte(u8::from(*value));
        }
    }

    /// Appends a list of bytes.
    pub fn update_list_of_bytes(&mut self, list: &[u8]) {
        self.update_length(list.len());
        self.state.update(list);
    }

    /// Appends a list of octet strings.
    pub fn update_list_of_octet_strings<T: AsRef<[u8]>>(&mut self, list: &[T]) {
        self.update_length(list.len());
        for item in list {
            self.update_octet_string(item.as_ref());
        }
    }

    /// Appends a list of integers.
    pub fn update_list_of_integers<'a, I>(&mut self, list: I)
    where
        I: IntoIterator<Item = &'a BigUint>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = list.into_iter();
        self.update_length(iter.len());
        for value in iter {
            self.update_integer(value);
        }
    }

    /// Finalizes the transcript and returns the raw digest.
    pub fn digest(self) -> Vec<u8> {
        self.state.finalize()
    }

    /// Finalizes the transcript and returns the lowercase hex digest.
    pub fn digest_hex(self) -> String {
        hex::encode(self.digest())
    }

    /// Finalizes the transcript and reduces the digest into `group`.
    pub fn challenge_scalar(self, group: &IntegerGroup) -> BigUint {
        group.reduce_bytes(&self.digest())
    }

    fn update_length(&mut self, len: usize) {
        let len = u32::try_from(len)
            .unwrap_or_else(|_| unreachable!("transcript fields are shorter than 4 GiB"));
        self.update_u32(len);
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new(HashAlgorithm::default())
    }
}

impl fmt::Debug for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transcript")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

/// Decodes a hex octet string. An odd number of digits is left-padded with `0`.
pub fn decode_hex(hex_str: &str) -> Result<Vec<u8>> {
    let result = if hex_str.len() % 2 == 1 {
        hex::decode(format!("0{hex_str}"))
    } else {
        hex::decode(hex_str)
    };
    result.map_err(|e| Error::InvalidEncoding(format!("{hex_str:?}: {e}")))
}
