//! Verify Delegation — build two key event logs, issue a credential
//! chain, verify the delegation end to end, then revoke and watch the
//! verdict flip.
//!
//! Run with:
//!   cargo run --example verify_delegation -p aid-verify

use std::sync::Arc;

use aid_verify::store::MemoryStore;
use aid_verify::{
    AgentVerifier, Aid, Credential, CredentialSchema, Event, RevocationReason, Seal,
    VerifierConfig,
};

#[tokio::main]
async fn main() {
    // ── 1. Create the ecosystem parties ─────────────────────────────────────
    //
    // Five autonomic identifiers: the ecosystem root, a qualified issuer,
    // a legal entity, the person holding an official role there, and the
    // agent that person delegated.
    let root = Aid::derive(b"ecosystem-root");
    let qvi = Aid::derive(b"qualified-issuer");
    let legal_entity = Aid::derive(b"acme-corp");
    let holder = Aid::derive(b"acme-compliance-officer");
    let agent = Aid::derive(b"acme-compliance-agent");

    println!("Parties");
    println!("  Root:   {root}");
    println!("  QVI:    {qvi}");
    println!("  LE:     {legal_entity}");
    println!("  Holder: {holder}");
    println!("  Agent:  {agent}");
    println!();

    // ── 2. Build both key event logs ────────────────────────────────────────
    //
    // The agent starts from a delegated inception naming the holder as
    // its delegator. The holder approves by anchoring a seal of that
    // event into its own log; the seal commits to the event's digest, so
    // neither side can swap the event out afterwards.
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
    println!("Key event logs written ({} logs)", store.num_kels());

    // ── 3. Issue the credential chain ───────────────────────────────────────
    //
    // Leaf to root: the legal entity gave the holder an OOR credential,
    // the issuer vouched for the legal entity, and the root qualified
    // the issuer.
    let oor = Credential::new(legal_entity.clone(), holder.clone(), CredentialSchema::Oor);
    let le = Credential::new(qvi.clone(), legal_entity.clone(), CredentialSchema::Le);
    let qvi_cred = Credential::new(root.clone(), qvi.clone(), CredentialSchema::Qvi);

    let le_said = le.said.clone();
    store.insert_credential(oor);
    store.insert_credential(le);
    store.insert_credential(qvi_cred);
    println!("Credentials issued ({})", store.num_credentials());
    println!();

    // ── 4. Verify the delegation ────────────────────────────────────────────
    let store = Arc::new(store);
    let verifier = AgentVerifier::new(
        store.clone(),
        store.clone(),
        store.clone(),
        VerifierConfig::default(),
    );

    let result = verifier
        .verify_agent_delegation(agent.as_str(), holder.as_str())
        .await
        .expect("stores are in memory, verification completes");

    println!(
        "Verdict: {}",
        if result.valid { "VALID" } else { "INVALID" }
    );
    if let Some(chain) = &result.chain {
        println!("Chain ({} links, leaf to root):", chain.len());
        for (i, credential) in chain.iter().enumerate() {
            println!(
                "  [{i}] {:<4} issued by {}",
                credential.schema.as_str(),
                credential.issuer
            );
        }
    }
    println!();

    // ── 5. Revoke the legal-entity credential and verify again ──────────────
    //
    // One revoked link anywhere in the chain rejects the whole
    // delegation, even though the key event logs are untouched.
    let mut revoked_world = (*store).clone();
    revoked_world.revoke(le_said, qvi.clone(), RevocationReason::Compromised);

    let revoked_store = Arc::new(revoked_world);
    let verifier = AgentVerifier::new(
        revoked_store.clone(),
        revoked_store.clone(),
        revoked_store,
        VerifierConfig::default(),
    );

    let result = verifier
        .verify_agent_delegation(agent.as_str(), holder.as_str())
        .await
        .expect("verification completes");

    println!(
        "After revoking the LE credential: {}",
        if result.valid { "VALID" } else { "INVALID" }
    );
    if let Some(reason) = &result.failure_reason {
        println!("  Reason: {reason}");
    }
}
