//! AID Verify CLI — `aidv` command.
//!
//! Operator tooling over a local store directory: run delegation
//! verifications, inspect key event logs, and resolve credential chains.
//!
//! Exit codes: 0 when the requested operation succeeds (and, for
//! `verify`, the verdict is valid), 2 when `verify` reaches an invalid
//! verdict, 1 for anything that kept an operation from completing.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use aid_verify::store::{CredentialStore, FileStore};
use aid_verify::time::micros_to_rfc3339;
use aid_verify::{
    walk_chain, AgentVerifier, Aid, CredentialChain, CredentialSchema, KeyState,
    VerificationDepth, VerificationResult, VerifierConfig,
};

// ── Directory helpers ─────────────────────────────────────────────────────────

/// Resolve the store directory: `--store`, then `$AIDV_STORE_DIR`, then
/// `~/.aid-verify/store`.
fn store_dir(flag: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = flag {
        return dir;
    }
    if let Ok(dir) = std::env::var("AIDV_STORE_DIR") {
        return PathBuf::from(dir);
    }
    let home = std::env::var("HOME").expect("HOME not set");
    PathBuf::from(home).join(".aid-verify").join("store")
}

fn open_store(dir: &Path) -> Result<FileStore> {
    FileStore::new(dir).with_context(|| format!("failed to open store at {}", dir.display()))
}

fn open_verifier(dir: &Path) -> Result<AgentVerifier> {
    let store = Arc::new(open_store(dir)?);
    Ok(AgentVerifier::new(
        store.clone(),
        store.clone(),
        store,
        VerifierConfig::default(),
    ))
}

// ── CLI structure ─────────────────────────────────────────────────────────────

/// AID Verify CLI — verify agent delegations and credential chains
/// against a local store directory.
#[derive(Parser, Debug)]
#[command(
    name = "aidv",
    about = "AID delegation verification CLI",
    version,
    long_about = "aidv — AID Verify CLI\n\nVerify that an agent AID is delegated by an OOR credential holder,\ninspect key event logs, and resolve credential chains from a local\nstore directory."
)]
struct Cli {
    /// Store directory (default: $AIDV_STORE_DIR, then ~/.aid-verify/store)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Verify an agent AID against its claimed OOR holder
    Verify {
        /// Agent AID (the delegated identifier)
        agent: String,

        /// OOR holder AID (the claimed delegator)
        holder: String,

        /// Pipeline depth (format_only, existence_only, delegation_only, full_chain)
        #[arg(long)]
        depth: Option<String>,
    },

    /// Print an identifier's key event log and derived key state
    Kel {
        /// Identifier to inspect
        aid: String,
    },

    /// Resolve and print the credential chain from a subject's leaf credential
    Chain {
        /// Subject AID holding the leaf credential
        subject: String,

        /// Leaf credential schema (OOR, LE, QVI, ...)
        #[arg(long, default_value = "OOR")]
        schema: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let dir = store_dir(cli.store);
    let json = cli.json;

    let result = match cli.command {
        Commands::Verify {
            agent,
            holder,
            depth,
        } => cmd_verify(&dir, &agent, &holder, depth.as_deref(), json).await,
        Commands::Kel { aid } => cmd_kel(&dir, &aid, json),
        Commands::Chain { subject, schema } => cmd_chain(&dir, &subject, &schema, json).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

// ── Command implementations ───────────────────────────────────────────────────

/// `aidv verify AGENT HOLDER [--depth DEPTH]`
async fn cmd_verify(
    dir: &Path,
    agent: &str,
    holder: &str,
    depth: Option<&str>,
    json: bool,
) -> Result<()> {
    let verifier = open_verifier(dir)?;

    let result = match depth {
        Some(s) => {
            let depth = s.parse::<VerificationDepth>().map_err(|e| anyhow!(e))?;
            verifier.verify_at_depth(agent, holder, depth).await
        }
        None => verifier.verify_agent_delegation(agent, holder).await,
    }
    .context("verification could not be completed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }

    if !result.valid {
        std::process::exit(2);
    }
    Ok(())
}

fn print_result(result: &VerificationResult) {
    println!(
        "Verification: {}",
        if result.valid { "VALID" } else { "INVALID" }
    );
    println!("  Agent:     {}", result.subject_aid);
    println!("  Delegator: {}", result.delegator_aid);
    println!("  Depth:     {}", result.depth);
    println!("  At:        {}", micros_to_rfc3339(result.verified_at));

    if let Some(ref chain) = result.chain {
        print_chain(chain, None);
    }
    if let Some(ref reason) = result.failure_reason {
        println!("  Reason:    {reason}");
    }
}

/// `aidv kel AID`
fn cmd_kel(dir: &Path, aid: &str, json: bool) -> Result<()> {
    let aid = Aid::parse(aid)?;
    let store = open_store(dir)?;
    let events = store
        .load_kel(&aid)?
        .ok_or_else(|| anyhow!("no key event log for {aid}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    println!("Key event log for {aid} ({} event(s)):", events.len());
    for event in &events {
        let mut line = format!("  [{}] {}", event.sequence, event.event_type);
        if let Some(ref delegator) = event.delegator {
            line.push_str(&format!("  di={delegator}"));
        }
        if !event.anchors.is_empty() {
            line.push_str(&format!("  anchors={}", event.anchors.len()));
        }
        println!("{line}");
    }

    if let Some(state) = KeyState::from_events(&events) {
        println!("Key state:");
        println!("  Latest sequence: {}", state.latest_sequence);
        println!("  Delegated:       {}", state.is_delegated);
        match state.delegator {
            Some(delegator) => println!("  Delegator:       {delegator}"),
            None => println!("  Delegator:       none"),
        }
    }

    Ok(())
}

/// `aidv chain SUBJECT [--schema SCHEMA]`
async fn cmd_chain(dir: &Path, subject: &str, schema: &str, json: bool) -> Result<()> {
    let subject = Aid::parse(subject)?;
    let schema = CredentialSchema::from(schema);
    let store = open_store(dir)?;

    let leaf = store
        .credential_by_subject_and_schema(&subject, &schema)
        .await?
        .ok_or_else(|| anyhow!("no {schema} credential for subject {subject}"))?;
    let chain = walk_chain(&store, leaf).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&chain)?);
        return Ok(());
    }

    println!("Credential chain for {subject} ({} links, leaf to root):", chain.len());
    print_chain(&chain, Some(&store));
    Ok(())
}

/// Print chain links, one per line, annotating revoked credentials when
/// a store is available to ask.
fn print_chain(chain: &CredentialChain, store: Option<&FileStore>) {
    for (index, credential) in chain.iter().enumerate() {
        let revoked = store
            .and_then(|s| s.load_revocation(&credential.said).ok().flatten())
            .map(|record| format!("  REVOKED ({})", record.reason.as_str()))
            .unwrap_or_default();
        println!(
            "  [{index}] {:<8} {}  issuer {} -> subject {}{revoked}",
            credential.schema.as_str(),
            credential.said,
            credential.issuer,
            credential.subject,
        );
    }
}
