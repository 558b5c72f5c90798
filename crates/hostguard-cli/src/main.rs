//! Hostguard CLI - SSH host key verification against known_hosts files

use anyhow::{bail, Context, Result};
use clap::Parser;
use hostguard_core::{
    hostname, Fingerprint, HashKind, HostKeyVerifier, PresentedCertificate, TrustStore, Verdict,
    VerifierConfig,
};
use hostguard_store::TrustedKey;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hostguard")]
#[command(about = "Hostguard - SSH host key verification against known_hosts")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Parse a known_hosts file and list its entries
    Check {
        /// known_hosts file path
        file: PathBuf,
    },
    /// Print the known_hosts lookup form of HOST[:PORT]
    Normalize {
        /// Host, optionally with port
        host: String,
    },
    /// Print the fingerprints of an OpenSSH public key line
    Fingerprint {
        /// Key line, e.g. "ssh-ed25519 AAAA... comment"
        key: String,
    },
    /// Verify a host key against a known_hosts file
    Verify(VerifyArgs),
}

#[derive(clap::Args)]
struct VerifyArgs {
    /// known_hosts file path
    #[arg(long)]
    known_hosts: PathBuf,

    /// Configured host, optionally with port
    #[arg(long)]
    host: String,

    /// Hostname as reported by the server (defaults to the configured host)
    #[arg(long)]
    presented_hostname: Option<String>,

    /// Presented public key as an OpenSSH key line
    #[arg(long, conflicts_with = "fingerprint")]
    key: Option<String>,

    /// Presented fingerprint, e.g. SHA256:... (repeatable)
    #[arg(long)]
    fingerprint: Vec<String>,

    /// Verifier configuration (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the verdict as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Check { file }) => {
            print!("{}", check_report(&file)?);
        }
        Some(Commands::Normalize { host }) => {
            println!("{}", hostname::normalize(&host));
        }
        Some(Commands::Fingerprint { key }) => {
            print!("{}", fingerprint_report(&key)?);
        }
        Some(Commands::Verify(args)) => {
            let verdict = run_verify(&args)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&verdict)?);
            } else {
                println!("{}", verdict);
            }
            if verdict.is_rejected() {
                return Ok(ExitCode::FAILURE);
            }
        }
        None => {
            println!("Hostguard v{} - Use --help for commands", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn load_store(path: &Path) -> Result<TrustStore> {
    let blob = std::fs::read(path)
        .with_context(|| format!("reading known_hosts file {}", path.display()))?;
    TrustStore::parse(&blob).with_context(|| format!("parsing {}", path.display()))
}

/// One line per entry: line, marker, patterns, key type, SHA256 fingerprint.
fn check_report(path: &Path) -> Result<String> {
    let store = load_store(path)?;
    let mut out = String::new();
    for entry in &store {
        let marker = entry.marker().map(|m| m.as_str()).unwrap_or("-");
        writeln!(
            out,
            "{:>4}  {:<16} {}  {}  {}",
            entry.line(),
            marker,
            entry.patterns_string(),
            entry.key().key_type(),
            entry.key().fingerprint(HashKind::Sha256)
        )?;
    }
    writeln!(out, "{} entries", store.len())?;
    Ok(out)
}

fn fingerprint_report(key_line: &str) -> Result<String> {
    let key = TrustedKey::from_openssh(key_line.trim()).context("parsing public key")?;
    let mut out = String::new();
    for kind in HashKind::ALL {
        writeln!(out, "{} {}", key.fingerprint(kind), key.key_type())?;
    }
    Ok(out)
}

fn run_verify(args: &VerifyArgs) -> Result<Verdict> {
    let config = match &args.config {
        Some(path) => VerifierConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => VerifierConfig::default(),
    };

    let presented_hostname = args
        .presented_hostname
        .clone()
        .unwrap_or_else(|| args.host.clone());

    let cert = if let Some(key_line) = &args.key {
        let key = TrustedKey::from_openssh(key_line.trim()).context("parsing --key")?;
        PresentedCertificate::from_host_key(presented_hostname, key.as_bytes().to_vec())
    } else if !args.fingerprint.is_empty() {
        let mut cert = PresentedCertificate::new(presented_hostname);
        for text in &args.fingerprint {
            let fp: Fingerprint = text
                .parse()
                .with_context(|| format!("parsing fingerprint '{}'", text))?;
            cert = cert.with_fingerprint(fp);
        }
        cert
    } else {
        bail!("either --key or --fingerprint is required");
    };

    debug!(
        "Verifying '{}' with {} presented fingerprints",
        args.host,
        cert.fingerprints().len()
    );

    let blob = std::fs::read(&args.known_hosts)
        .with_context(|| format!("reading known_hosts file {}", args.known_hosts.display()))?;
    Ok(HostKeyVerifier::new(config).verify_known_hosts(&args.host, &blob, Some(&cert)))
}
