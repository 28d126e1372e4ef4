//! End-to-end U-Prove token issuance.
//!
//! This example demonstrates:
//! - Generating an issuer key and deriving generators on the RFC 5114 domain
//! - Running the three-move issuance between an issuer and a prover
//! - Verifying the resulting token
//!
//! Set `RUST_LOG=uprove=trace` to watch the state transitions.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use uprove::{
    HashAlgorithm, Issuer, IssuerParameters, IssuerParametersConfig, IssuerPrivateKey, Prover,
    SecureRng, Subgroup, Verifier,
};

fn main() -> uprove::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("U-Prove Issuance Example\n");

    println!("Step 1: Issuer sets up parameters");
    let mut rng = SecureRng::new();
    let subgroup = Subgroup::rfc5114_2048_256();
    let key = IssuerPrivateKey::generate(&subgroup, &mut rng)?;

    let mut generators = vec![key.public_key(&subgroup)];
    generators.extend(subgroup.derive_generators(HashAlgorithm::Sha256, b"demo issuer", 3)?);

    let params = Arc::new(IssuerParameters::new(
        b"https://issuer.example/params".to_vec(),
        subgroup,
        HashAlgorithm::Sha256,
        generators,
        vec![true, false],
        b"demo specification".to_vec(),
        false,
    )?);
    println!("  Fingerprint: {}", params.hash_hex());

    let exported = IssuerParametersConfig::from(params.as_ref());
    println!("  Exported {} generators for distribution\n", exported.generators.len());

    println!("Step 2: Both parties agree on attributes and token information");
    let attributes = [b"Alice".to_vec(), vec![0x07, 0xd0]];
    let ti = b"valid until 2030";
    let pi = b"presentation nonce";
    let issuer = Issuer::new(params.clone(), &key, &attributes, ti)?;
    let prover = Prover::new(params.clone(), &attributes, ti, pi)?;
    println!("  Both computed the same commitment: {}\n", issuer.gamma() == prover.gamma());

    println!("Step 3: Issuer sends first message");
    let (issuer, first) = issuer.generate_first_message(&mut rng)?;

    println!("Step 4: Prover blinds and sends the challenge");
    let (prover, second) = prover
        .parse_first_message(first)?
        .generate_second_message(&mut rng)?;

    println!("Step 5: Issuer responds");
    let third = issuer.parse_second_message(&second)?.generate_third_message();

    println!("Step 6: Prover unblinds the response into a token\n");
    let token = prover.parse_third_message(&third)?.generate_token()?;

    println!("Step 7: Any verifier checks the token");
    let verifier = Verifier::new(params);
    verifier.verify(&token)?;
    println!("  Token {} is valid", verifier.token_id(&token));

    Ok(())
}
