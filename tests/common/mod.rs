//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use num_bigint::BigUint;
use uprove::{
    FixedScalars, HashAlgorithm, IssuerParameters, IssuerPrivateKey, SecureRng, Subgroup,
};

/// Initialize test tracing (call once at the beginning of tests).
///
/// Only logs from this crate are shown. Subsequent calls are safe and will be
/// ignored.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::new("uprove=trace");

    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(filter)
        .try_init();
}

pub const P: &str = "81867feebc4eba3d8e0e8a77c78861256b8cf911ce0dd0030a302b6e0ba1233e94d4cf10768b98ee194b029e8ad733620561fd23db7d48fc5927ccc7c42a7b9b";
pub const Q: &str = "a9d9a5102ec746997017125e07c3e62447ce57f5";
pub const G: &str = "131daee45d3506d383b3ba38611c1a28c68e415551954c5ba27ed55d613b2804b698a40d62d7f89ab7367bdab4549fd4197523554c73d2b9dbb0db351dd2fe3";

/// Context the attribute and token-information generators are derived from.
pub const GENERATOR_CONTEXT: &[u8] = b"uprove-test-vectors";

pub const Y0: &str = "3e1ac6e4e5b1f3a7c0d1b2a39485766f5e4d3c2b";
pub const UID_P: &[u8] = b"http://issuer/uprove/issuerparams/software";
pub const SPECIFICATION: &[u8] = b"application specification";
pub const TI: &[u8] = b"token information";
pub const PI: &[u8] = b"prover information";

pub const W: &str = "1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3d4e";
pub const ALPHA: &str = "7a6b5c4d3e2f10213243546576879a0b1c2d3e4f";
pub const BETA1: &str = "f1e2d3c4b5a69788796a5b4c3d2e1f00112233";
pub const BETA2: &str = "5566778899aabbccddeeff00112233445566778";

pub const FINGERPRINT: &str = "87dc7d72a4109f8f5b3af6114c44654fcdc61aa36fbf25752851a5ce1903e1ad";
pub const GAMMA: &str = "1805402cf9d2695c21b550ff8e003d43734755acfca2e252f8192b86e6422932708bd6002c320a6c365ce7e0949ae41b0f1fb65f1e2de3443043cca2a88fb0ee";
pub const SIGMA_Z: &str = "127acd52be28efb8f0c222edbf1c98db13585c7cbc8f1b0610bcb2568ea574bf8dd5891962d593ca7619b3fc424f73c5c68b3db42063caf44b6112253afd840b";
pub const SIGMA_A: &str = "501744a39e6d2fde87bb270e654def0326a9d2dbdb550017eef5cc25f873c56791a08622b01b7839e7c4b32c887672fb1f43d71d3d4cc5e3fac7295ee99f9c45";
pub const SIGMA_B: &str = "6ea3276762e688b39e8e256e700c4c427237dfefa7b21679d50f1ac96a61582969c755196aebf40e133392118c265e3debb3c870fabe78e9c27ac844469bf28d";
pub const H: &str = "436daf27af8ba08636c4dbe67f94e92c092d5898538bc56f983ed421c00aa80f51395f751042010e1cbcf3fd2cf45d301ab32b679627748ecb3bdf78a06302e3";
pub const SIGMA_Z_PRIME: &str = "71f17d992562d1514f4d5c861ea470e45b96bdf8dc8e66bf91d9f796c157d7ddf8502638454a8c1970f661e66f940968838a04895ff850690ac00fbd23fe77a0";
pub const SIGMA_A_PRIME: &str = "5daadf648c38731787c867d0d4343eb19be826e8c56644e97d4c34b3065954c46697e8c540272cbe7fc4bfbc54a4e70bd38fb0b518d063fb98129756f1e21f79";
pub const SIGMA_B_PRIME: &str = "a1e4c280e64999092c25dc7f54a0cc1d2bea2950393a3539e75eedcdf7e3e979caccd5f1bf577dbbe34f556826fcdcd6c4bb74fe650418729ee1932616a1c06";
pub const SIGMA_C_PRIME: &str = "45eb661922dadf6c6956b649433fc85e1a791df1";
pub const SIGMA_C: &str = "46dd48ece7908603f1d020a48f7cf67d1a8a4024";
pub const SIGMA_R: &str = "a88a13c86d3dddc4e1027775d1ede690738d31eb";
pub const SIGMA_R_PRIME: &str = "406d630c81142e83eca5507cb3c23a07115416e";
pub const TOKEN_ID: &str = "883efb295bb37b2137ae4dec34c6c2380114fc33394927dd41bb4a0fe6543b15";

pub fn n(hex_str: &str) -> BigUint {
    BigUint::parse_bytes(hex_str.as_bytes(), 16).unwrap()
}

pub fn subgroup() -> Subgroup {
    Subgroup::from_hex(P, Q, G).unwrap()
}

pub fn issuer_key() -> IssuerPrivateKey {
    IssuerPrivateKey::from_scalar(&subgroup(), n(Y0)).unwrap()
}

pub fn attributes() -> Vec<Vec<u8>> {
    vec![b"Alice Smith".to_vec(), vec![0x2a]]
}

/// Issuer parameters with one hashed and one direct attribute.
///
/// `g1`, `g2` and `gt` are derived from [`GENERATOR_CONTEXT`].
pub fn issuer_parameters() -> Arc<IssuerParameters> {
    let subgroup = subgroup();
    let mut generators = vec![issuer_key().public_key(&subgroup)];
    generators.extend(
        subgroup
            .derive_generators(HashAlgorithm::Sha256, GENERATOR_CONTEXT, 3)
            .unwrap(),
    );

    Arc::new(
        IssuerParameters::new(
            UID_P.to_vec(),
            subgroup,
            HashAlgorithm::Sha256,
            generators,
            vec![true, false],
            SPECIFICATION.to_vec(),
            false,
        )
        .unwrap(),
    )
}

/// Issuer nonce followed by the prover's blinding factors, in draw order.
pub fn vector_scalars() -> (FixedScalars, FixedScalars) {
    (
        FixedScalars::new([n(W)]),
        FixedScalars::new([n(ALPHA), n(BETA1), n(BETA2)]),
    )
}

/// Issuer parameters with `attribute_count` hashed attributes on the RFC 5114
/// domain, with a freshly generated key.
pub fn random_parameters(
    attribute_count: u8,
    device_protected: bool,
) -> (Arc<IssuerParameters>, IssuerPrivateKey) {
    let mut rng = SecureRng::new();
    let subgroup = Subgroup::rfc5114_2048_256();
    let key = IssuerPrivateKey::generate(&subgroup, &mut rng).unwrap();

    let derived = attribute_count + 1 + u8::from(device_protected);
    let mut generators = vec![key.public_key(&subgroup)];
    generators.extend(
        subgroup
            .derive_generators(HashAlgorithm::Sha256, b"random-parameters", derived)
            .unwrap(),
    );

    let params = IssuerParameters::new(
        b"random issuer".to_vec(),
        subgroup,
        HashAlgorithm::Sha256,
        generators,
        vec![true; usize::from(attribute_count)],
        Vec::new(),
        device_protected,
    )
    .unwrap();

    (Arc::new(params), key)
}
