//! Error types for U-Prove issuance.

/// Main error types for the library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid subgroup domain parameters were provided.
    #[error("Invalid group parameters: {0}")]
    InvalidParams(String),

    /// Issuer parameters are inconsistent with their subgroup or key.
    #[error("Invalid issuer parameters: {0}")]
    InvalidIssuerParams(String),

    /// The named hash algorithm is not supported.
    #[error("Unsupported hash algorithm: {0}")]
    UnsupportedHash(String),

    /// An octet string could not be decoded.
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Verifiable generator derivation found no usable element.
    #[error("Generator derivation exhausted after {0} attempts")]
    GeneratorDerivationExhausted(u32),

    /// A scalar value is invalid or out of range.
    #[error("Invalid scalar: {0}")]
    InvalidScalar(String),

    /// A group element is invalid or not in the correct range.
    #[error("Invalid group element: {0}")]
    InvalidGroupElement(String),

    /// The number of attributes does not match the issuer parameters.
    #[error("Attribute count mismatch: expected {expected}, got {got}")]
    AttributeCountMismatch {
        /// Number of attribute slots in the issuer parameters.
        expected: usize,
        /// Number of attributes supplied.
        got: usize,
    },

    /// A deterministic scalar source has no values left.
    #[error("Scalar source exhausted")]
    ScalarSourceExhausted,

    /// A protocol or token verification equation did not hold.
    #[error("Verification failed: {0}")]
    VerificationFailed(String),
}

impl Error {
    /// Returns `true` for failures caused by a bad parameter set.
    ///
    /// The remedy is to fix the configuration and rebuild the parameters.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidParams(_)
                | Self::InvalidIssuerParams(_)
                | Self::UnsupportedHash(_)
                | Self::InvalidEncoding(_)
                | Self::Config(_)
                | Self::GeneratorDerivationExhausted(_)
        )
    }

    /// Returns `true` for a rejected issuance response or token.
    ///
    /// The remedy is to abort the issuance run or reject the credential.
    pub fn is_verification_error(&self) -> bool {
        matches!(self, Self::VerificationFailed(_))
    }
}

/// Result type alias for the library.
pub type Result<T> = core::result::Result<T, Error>;
