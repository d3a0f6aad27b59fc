//! Depth Levels — run the same pair of identifiers at every pipeline
//! depth and show where each one stops.
//!
//! Run with:
//!   cargo run --example depth_levels -p aid-verify

use std::sync::Arc;

use aid_verify::store::MemoryStore;
use aid_verify::{AgentVerifier, Aid, Event, Seal, VerificationDepth, VerifierConfig};

#[tokio::main]
async fn main() {
    // A world with a sealed delegation but no credentials at all. The
    // shallow depths pass; the full chain cannot.
    let agent = Aid::derive(b"depth-demo-agent");
    let holder = Aid::derive(b"depth-demo-holder");

    let mut store = MemoryStore::new();
    let inception = Event::delegated_inception(agent.clone(), holder.clone());
    let seal = Seal::committing_to(&inception);
    store.insert_kel(agent.clone(), vec![inception]);
    store.insert_kel(
        holder.clone(),
        vec![
            Event::inception(holder.clone()),
            Event::interaction(holder.clone(), 1, vec![seal]),
        ],
    );

    let store = Arc::new(store);
    let verifier = AgentVerifier::new(
        store.clone(),
        store.clone(),
        store,
        VerifierConfig::default(),
    );

    for depth in [
        VerificationDepth::FormatOnly,
        VerificationDepth::ExistenceOnly,
        VerificationDepth::DelegationOnly,
        VerificationDepth::FullChain,
    ] {
        let result = verifier
            .verify_at_depth(agent.as_str(), holder.as_str(), depth)
            .await
            .expect("in-memory stores never fault");

        print!(
            "{:<16} {}",
            depth.to_string(),
            if result.valid { "VALID" } else { "INVALID" }
        );
        match &result.failure_reason {
            Some(reason) => println!("  ({reason})"),
            None => println!(),
        }
    }
}
