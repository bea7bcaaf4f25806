//! Run with
//!
//! ```not_rust
//! RUST_LOG=jwtseal=debug cargo run --example basic
//! ```

use std::sync::Arc;
use std::time::Duration;

use jwtseal::{
    AlgorithmId, AlgorithmPolicy, Claims, GenerateOptions, Key, SystemRandomSource,
    TokenAssembler, TokenInspector, VerifyOptions, VirtualClock,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> jwtseal::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,jwtseal=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let clock = Arc::new(VirtualClock::starting_now());
    let assembler = TokenAssembler::new(Arc::clone(&clock), SystemRandomSource::new());
    let inspector = TokenInspector::new(Arc::clone(&clock));

    let key = Key::symmetric(b"demo-secret-do-not-use-in-production");
    let mut claims = Claims::new();
    claims
        .set_string("iss", "https://issuer.example")
        .set_string("sub", "user-1");

    let token = assembler.generate(
        &claims,
        &key,
        &GenerateOptions::new()
            .algorithm(AlgorithmId::HS256)
            .lifetime(Duration::from_secs(60))
            .key_id("demo"),
    )?;
    tracing::info!("issued {token}");

    let options = VerifyOptions::new(AlgorithmPolicy::hs256_only());
    let (header, verified) = inspector.verify(&token, &key, &options)?;
    tracing::info!(kid = header.key_id(), sub = verified.subject(), "token accepted");

    clock.advance(Duration::from_secs(60));
    if let Err(e) = inspector.verify(&token, &key, &options) {
        tracing::warn!("token rejected after one minute: {e}");
    }

    Ok(())
}
