/// Modular integer arithmetic.
pub mod field;
/// Probabilistic primality testing.
pub mod prime;
/// Cryptographically secure randomness and secret scalars.
pub mod rng;

pub use field::IntegerGroup;
pub use prime::{is_probable_prime, MILLER_RABIN_ROUNDS};
pub use rng::{FixedScalars, ScalarSource, SecretScalar, SecureRng};
