//! Deterministic issuance vectors shared by the protocol unit tests.

use num_bigint::BigUint;

use crate::primitives::{HashAlgorithm, Subgroup};
use crate::protocol::IssuerParameters;

pub(crate) const P: &str = "81867feebc4eba3d8e0e8a77c78861256b8cf911ce0dd0030a302b6e0ba1233e94d4cf10768b98ee194b029e8ad733620561fd23db7d48fc5927ccc7c42a7b9b";
pub(crate) const Q: &str = "a9d9a5102ec746997017125e07c3e62447ce57f5";
pub(crate) const G: &str = "131daee45d3506d383b3ba38611c1a28c68e415551954c5ba27ed55d613b2804b698a40d62d7f89ab7367bdab4549fd4197523554c73d2b9dbb0db351dd2fe3";

pub(crate) const Y0: &str = "3e1ac6e4e5b1f3a7c0d1b2a39485766f5e4d3c2b";
pub(crate) const G0: &str = "1f80ea5e84f83f75047c0ccef16583d919fac227616b96b2dface6eb8ee65cae3a8141f4ecfbee68e79e906110ffeb1b1df43bf354133fd64877e2f950dd1076";
pub(crate) const G1: &str = "47dd81c06936c4720c1f84cc46952df2d8bb687733cc237ca70c94e2e65777f3d4b58774154ffe64a4bdd6f7299749eaef6ffd5dbf5086ff3133a98739bf0e66";
pub(crate) const G2: &str = "9cc1b7e6f1000b1d1c766609f4be434e97a0c36e01498a3e872d3cf9505d583fdf5f6b007f72fd87d6debb8014343561d865201a54d80bb198427b5c1807346";
pub(crate) const GT: &str = "f294ad611e6482d6a78af9c9d4d668c9bc35587662fc684f22f51faa2a3bdafbb694f30dc2098fff66aa6894519cc1d86a3efd19e1c1599850eef17d274d6ed";

pub(crate) const UID_P: &[u8] = b"http://issuer/uprove/issuerparams/software";
pub(crate) const SPECIFICATION: &[u8] = b"application specification";
pub(crate) const TI: &[u8] = b"token information";
pub(crate) const PI: &[u8] = b"prover information";

pub(crate) const W: &str = "1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3d4e";
pub(crate) const ALPHA: &str = "7a6b5c4d3e2f10213243546576879a0b1c2d3e4f";
pub(crate) const BETA1: &str = "f1e2d3c4b5a69788796a5b4c3d2e1f00112233";
pub(crate) const BETA2: &str = "5566778899aabbccddeeff00112233445566778";

pub(crate) const XT: &str = "888d484a88272256015307783dc5f13d32d8dac2";
pub(crate) const X1: &str = "18fafacad25193688679486832d45d308dcbf7fa";
pub(crate) const GAMMA: &str = "1805402cf9d2695c21b550ff8e003d43734755acfca2e252f8192b86e6422932708bd6002c320a6c365ce7e0949ae41b0f1fb65f1e2de3443043cca2a88fb0ee";
pub(crate) const SIGMA_Z: &str = "127acd52be28efb8f0c222edbf1c98db13585c7cbc8f1b0610bcb2568ea574bf8dd5891962d593ca7619b3fc424f73c5c68b3db42063caf44b6112253afd840b";
pub(crate) const SIGMA_A: &str = "501744a39e6d2fde87bb270e654def0326a9d2dbdb550017eef5cc25f873c56791a08622b01b7839e7c4b32c887672fb1f43d71d3d4cc5e3fac7295ee99f9c45";
pub(crate) const SIGMA_B: &str = "6ea3276762e688b39e8e256e700c4c427237dfefa7b21679d50f1ac96a61582969c755196aebf40e133392118c265e3debb3c870fabe78e9c27ac844469bf28d";
pub(crate) const H: &str = "436daf27af8ba08636c4dbe67f94e92c092d5898538bc56f983ed421c00aa80f51395f751042010e1cbcf3fd2cf45d301ab32b679627748ecb3bdf78a06302e3";
pub(crate) const SIGMA_Z_PRIME: &str = "71f17d992562d1514f4d5c861ea470e45b96bdf8dc8e66bf91d9f796c157d7ddf8502638454a8c1970f661e66f940968838a04895ff850690ac00fbd23fe77a0";
pub(crate) const SIGMA_A_PRIME: &str = "5daadf648c38731787c867d0d4343eb19be826e8c56644e97d4c34b3065954c46697e8c540272cbe7fc4bfbc54a4e70bd38fb0b518d063fb98129756f1e21f79";
pub(crate) const SIGMA_B_PRIME: &str = "a1e4c280e64999092c25dc7f54a0cc1d2bea2950393a3539e75eedcdf7e3e979caccd5f1bf577dbbe34f556826fcdcd6c4bb74fe650418729ee1932616a1c06";
pub(crate) const SIGMA_C_PRIME: &str = "45eb661922dadf6c6956b649433fc85e1a791df1";
pub(crate) const SIGMA_C: &str = "46dd48ece7908603f1d020a48f7cf67d1a8a4024";
pub(crate) const SIGMA_R: &str = "a88a13c86d3dddc4e1027775d1ede690738d31eb";
pub(crate) const SIGMA_R_PRIME: &str = "406d630c81142e83eca5507cb3c23a07115416e";
pub(crate) const TOKEN_ID: &str = "883efb295bb37b2137ae4dec34c6c2380114fc33394927dd41bb4a0fe6543b15";

pub(crate) fn n(hex_str: &str) -> BigUint {
    BigUint::parse_bytes(hex_str.as_bytes(), 16).unwrap()
}

pub(crate) fn subgroup() -> Subgroup {
    Subgroup::from_hex(P, Q, G).unwrap()
}

pub(crate) fn attributes() -> Vec<Vec<u8>> {
    vec![b"Alice Smith".to_vec(), vec![0x2a]]
}

pub(crate) fn issuer_parameters() -> IssuerParameters {
    IssuerParameters::new(
        UID_P.to_vec(),
        subgroup(),
        HashAlgorithm::Sha256,
        vec![n(G0), n(G1), n(G2), n(GT)],
        vec![true, false],
        SPECIFICATION.to_vec(),
        false,
    )
    .unwrap()
}
