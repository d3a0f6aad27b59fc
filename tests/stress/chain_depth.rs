//! Stress test: credential chains at every permitted depth, plus the
//! rejection bounds on either side and the cycle guard.

use std::sync::Arc;

use aid_verify::store::MemoryStore;
use aid_verify::{
    walk_chain, AgentVerifier, Aid, Credential, CredentialSchema, Event, Seal, VerifierConfig,
    VerifyError, MAX_CHAIN_LEN, MIN_CHAIN_LEN,
};

/// Schema for link `i` of a linear chain, leaf first.
fn schema_for(i: usize) -> CredentialSchema {
    match i {
        0 => CredentialSchema::Oor,
        1 => CredentialSchema::Le,
        2 => CredentialSchema::Qvi,
        _ => CredentialSchema::Other(format!("HOP{i}")),
    }
}

/// Build a linear chain of `n` credentials in a fresh store.
///
/// Returns the store, the participating parties (holder first), and the
/// leaf credential.
fn linear_world(tag: &str, n: usize) -> (MemoryStore, Vec<Aid>, Credential) {
    let mut store = MemoryStore::new();
    let parties: Vec<Aid> = (0..=n)
        .map(|i| Aid::derive(format!("{tag}-party-{i}").as_bytes()))
        .collect();

    let mut leaf = None;
    for i in 0..n {
        let cred = Credential::new(parties[i + 1].clone(), parties[i].clone(), schema_for(i));
        if i == 0 {
            leaf = Some(cred.clone());
        }
        store.insert_credential(cred);
    }

    (store, parties, leaf.expect("n >= 1"))
}

#[tokio::test]
async fn chains_walk_at_every_permitted_length() {
    for n in MIN_CHAIN_LEN..=MAX_CHAIN_LEN {
        let (store, parties, leaf) = linear_world(&format!("len-{n}"), n);

        let chain = walk_chain(&store, leaf)
            .await
            .unwrap_or_else(|e| panic!("length {n} should walk, got {e}"));

        assert_eq!(chain.len(), n, "length {n} chain resolves completely");

        // Leaf-to-root order: link i binds party i to its issuer.
        for (i, credential) in chain.iter().enumerate() {
            assert_eq!(credential.subject, parties[i], "link {i} subject at length {n}");
            assert_eq!(credential.issuer, parties[i + 1], "link {i} issuer at length {n}");
        }
        assert_eq!(chain.leaf().map(|c| &c.subject), Some(&parties[0]));
        assert_eq!(chain.root().map(|c| &c.issuer), Some(&parties[n]));
    }
}

#[tokio::test]
async fn chain_below_minimum_is_too_short() {
    for n in 1..MIN_CHAIN_LEN {
        let (store, _, leaf) = linear_world(&format!("short-{n}"), n);

        match walk_chain(&store, leaf).await {
            Err(VerifyError::ChainTooShort { length }) => assert_eq!(length, n),
            other => panic!("length {n} should be too short, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn chain_above_maximum_is_too_long() {
    let n = MAX_CHAIN_LEN + 1;
    let (store, _, leaf) = linear_world("long", n);

    match walk_chain(&store, leaf).await {
        Err(VerifyError::ChainTooLong { length }) => {
            assert_eq!(length, MAX_CHAIN_LEN + 1, "rejected at the first excess link")
        }
        other => panic!("length {n} should be too long, got {other:?}"),
    }
}

#[tokio::test]
async fn credential_cycle_is_cut_off() {
    // a <- b <- c <- a: every issuer holds a credential, so the walk
    // never terminates on its own.
    let mut store = MemoryStore::new();
    let a = Aid::derive(b"cycle-a");
    let b = Aid::derive(b"cycle-b");
    let c = Aid::derive(b"cycle-c");

    let leaf = Credential::new(b.clone(), a.clone(), CredentialSchema::Oor);
    store.insert_credential(leaf.clone());
    store.insert_credential(Credential::new(c.clone(), b, CredentialSchema::Le));
    store.insert_credential(Credential::new(a, c, CredentialSchema::Qvi));

    match walk_chain(&store, leaf).await {
        Err(VerifyError::ChainTooLong { length }) => assert_eq!(length, MAX_CHAIN_LEN + 1),
        other => panic!("a cycle must hit the length guard, got {other:?}"),
    }
}

#[tokio::test]
async fn full_verification_at_maximum_chain_depth() {
    // End-to-end: a sealed delegation whose holder sits at the bottom of
    // a maximum-length chain.
    let (mut store, parties, _) = linear_world("deep-e2e", MAX_CHAIN_LEN);
    let holder = parties[0].clone();
    let agent = Aid::derive(b"deep-e2e-agent");

    let icp = Event::delegated_inception(agent.clone(), holder.clone());
    let seal = Seal::committing_to(&icp);
    store.insert_kel(agent.clone(), vec![icp]);
    store.insert_kel(
        holder.clone(),
        vec![
            Event::inception(holder.clone()),
            Event::interaction(holder.clone(), 1, vec![seal]),
        ],
    );

    let store = Arc::new(store);
    let engine = AgentVerifier::new(
        store.clone(),
        store.clone(),
        store,
        VerifierConfig::default(),
    );

    let result = engine
        .verify_agent_delegation(agent.as_str(), holder.as_str())
        .await
        .expect("verification completes");

    assert!(result.valid, "a maximum-depth chain should verify end to end");
    assert_eq!(result.chain.map(|c| c.len()), Some(MAX_CHAIN_LEN));
}
