/// RFC 5114 MODP domain (2048-bit, 256-bit order).
pub mod rfc5114;
/// Validated prime-order subgroup domains.
pub mod subgroup;

pub use subgroup::Subgroup;
