//! Integration test: verification over the on-disk store.
//!
//! Same lifecycle as the in-memory flow, but every record round-trips
//! through JSON files, the store is reopened between writes and reads,
//! and a corrupted record must surface as a fault rather than a verdict.

use std::sync::Arc;

use tempfile::TempDir;

use aid_verify::store::FileStore;
use aid_verify::{
    AgentVerifier, Aid, Credential, CredentialSchema, Event, RevocationReason, RevocationRecord,
    Seal, VerifierConfig, VerifyError,
};

struct DiskWorld {
    agent: Aid,
    holder: Aid,
    legal_entity: Aid,
    root: Aid,
    leaf_said: aid_verify::Said,
}

/// Write a complete valid world into `store` and return its parties.
fn write_world(store: &FileStore, tag: &str) -> DiskWorld {
    let agent = Aid::derive(format!("{tag}-agent").as_bytes());
    let holder = Aid::derive(format!("{tag}-holder").as_bytes());
    let legal_entity = Aid::derive(format!("{tag}-le").as_bytes());
    let qvi = Aid::derive(format!("{tag}-qvi").as_bytes());
    let root = Aid::derive(format!("{tag}-root").as_bytes());

    let icp = Event::delegated_inception(agent.clone(), holder.clone());
    let seal = Seal::committing_to(&icp);
    store.save_kel(&agent, &[icp]).expect("agent KEL saves");
    store
        .save_kel(
            &holder,
            &[
                Event::inception(holder.clone()),
                Event::interaction(holder.clone(), 1, vec![seal]),
            ],
        )
        .expect("holder KEL saves");

    let leaf = Credential::new(legal_entity.clone(), holder.clone(), CredentialSchema::Oor);
    let leaf_said = leaf.said.clone();
    store.save_credential(&leaf).expect("OOR saves");
    store
        .save_credential(&Credential::new(
            qvi.clone(),
            legal_entity.clone(),
            CredentialSchema::Le,
        ))
        .expect("LE saves");
    store
        .save_credential(&Credential::new(
            root.clone(),
            qvi.clone(),
            CredentialSchema::Qvi,
        ))
        .expect("QVI saves");

    DiskWorld {
        agent,
        holder,
        legal_entity,
        root,
        leaf_said,
    }
}

fn engine_over(store: FileStore) -> AgentVerifier {
    let store = Arc::new(store);
    AgentVerifier::new(
        store.clone(),
        store.clone(),
        store,
        VerifierConfig::default(),
    )
}

#[tokio::test]
async fn full_workflow_over_on_disk_store() {
    let dir = TempDir::new().expect("tempdir");
    let store = FileStore::new(dir.path()).expect("store opens");
    let world = write_world(&store, "disk");

    let result = engine_over(store)
        .verify_agent_delegation(world.agent.as_str(), world.holder.as_str())
        .await
        .expect("healthy disk store, verification completes");

    assert!(result.valid, "the on-disk world should verify");
    let chain = result.chain.expect("full-chain pass carries the chain");
    assert_eq!(chain.len(), 3);
    assert_eq!(chain.root().map(|c| &c.issuer), Some(&world.root));
}

#[tokio::test]
async fn reopened_store_serves_the_same_verdict() {
    let dir = TempDir::new().expect("tempdir");
    let world = {
        let store = FileStore::new(dir.path()).expect("store opens");
        write_world(&store, "reopen")
    };

    // A second handle over the same directory sees everything.
    let reopened = FileStore::new(dir.path()).expect("store reopens");
    let result = engine_over(reopened)
        .verify_agent_delegation(world.agent.as_str(), world.holder.as_str())
        .await
        .expect("verification completes");

    assert!(result.valid, "records persist across store handles");
}

#[tokio::test]
async fn on_disk_revocation_flips_the_verdict() {
    let dir = TempDir::new().expect("tempdir");
    let store = FileStore::new(dir.path()).expect("store opens");
    let world = write_world(&store, "disk-revoke");

    let engine = engine_over(store.clone());
    let before = engine
        .verify_agent_delegation(world.agent.as_str(), world.holder.as_str())
        .await
        .expect("verification completes");
    assert!(before.valid);

    store
        .save_revocation(&RevocationRecord::new(
            world.leaf_said.clone(),
            world.legal_entity.clone(),
            RevocationReason::Misissued,
        ))
        .expect("revocation saves");

    let after = engine
        .verify_agent_delegation(world.agent.as_str(), world.holder.as_str())
        .await
        .expect("verification completes");

    assert!(!after.valid);
    match after.failure_reason {
        Some(VerifyError::RevokedCredential { chain_index, said }) => {
            assert_eq!(chain_index, 0, "the leaf is the revoked link");
            assert_eq!(said, world.leaf_said);
        }
        other => panic!("expected RevokedCredential, got {other:?}"),
    }
}

#[tokio::test]
async fn corrupt_kel_is_a_fault_not_a_verdict() {
    let dir = TempDir::new().expect("tempdir");
    let store = FileStore::new(dir.path()).expect("store opens");
    let world = write_world(&store, "corrupt");

    let kel_file = dir
        .path()
        .join("kels")
        .join(format!("{}.json", world.agent.as_str()));
    std::fs::write(&kel_file, "{ not json").expect("clobber the KEL file");

    let err = engine_over(store)
        .verify_agent_delegation(world.agent.as_str(), world.holder.as_str())
        .await
        .expect_err("an unreadable record must not become a verdict");

    assert!(err.is_accessor_fault());
    assert!(matches!(err, VerifyError::AccessorUnavailable(_)));
}

#[tokio::test]
async fn empty_store_rejects_with_unknown_identifier() {
    let dir = TempDir::new().expect("tempdir");
    let store = FileStore::new(dir.path()).expect("store opens");

    let agent = Aid::derive(b"empty-agent");
    let holder = Aid::derive(b"empty-holder");

    let result = engine_over(store)
        .verify_agent_delegation(agent.as_str(), holder.as_str())
        .await
        .expect("an absent record is a verdict, not a fault");

    assert!(!result.valid);
    match result.failure_reason {
        Some(VerifyError::UnknownIdentifier { aid }) => assert_eq!(aid, agent),
        other => panic!("expected UnknownIdentifier, got {other:?}"),
    }
}
