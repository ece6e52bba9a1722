use rand::SeedableRng;
use rand::rngs::StdRng;
use vault::{EnrollParams, SecretPolynomial, Vault};

fn main() {
    // A 80-dimension enrollment vector: ten chunks of eight features with
    // distinct sign patterns, standing in for an external extractor.
    let mut features = Vec::with_capacity(80);
    for chunk in 0..10u32 {
        for bit in 0..8 {
            let sign = if (chunk + 1) >> bit & 1 == 1 { 1.0 } else { -1.0 };
            features.push(sign * (0.3 + 0.01 * bit as f64));
        }
    }

    let params = EnrollParams {
        degree: 8,
        point_count: 10,
        chaff_count: 100,
    };

    let secret = SecretPolynomial::derive(&features, params.degree).expect("derive");
    let mut rng = StdRng::seed_from_u64(42);
    let vault = Vault::build(&secret, &features, &params, &mut rng).expect("build");

    // Persist and restore the vault as the storage layer would.
    let vault_bytes = bincode::serialize(&vault).expect("serialize vault");
    let restored: Vault = bincode::deserialize(&vault_bytes).expect("deserialize vault");

    // A fresh sample with the same sign pattern but different magnitudes
    // still unlocks; an unrelated sample does not.
    let noisy: Vec<f64> = features.iter().map(|v| v * 1.2 + v.signum() * 0.02).collect();
    let accepted = restored
        .unlock(&noisy, &params.unlock_params())
        .expect("unlock");
    assert!(accepted);

    let stranger: Vec<f64> = features.iter().map(|v| -v).collect();
    let rejected = restored
        .unlock(&stranger, &params.unlock_params())
        .expect("unlock");
    assert!(!rejected);

    println!(
        "vault: {} points, {} bytes serialized, genuine sample accepted, stranger rejected",
        restored.points.len(),
        vault_bytes.len()
    );
}
