use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
mod auth;
use credhash::{CredentialHasher, HashConfiguration, Hasher, KeyedAlgorithm, SecurityRecord};
use serde::Serialize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, clap::Args)]
struct HashArgs {
    /// Keyed digest for new records
    #[arg(long, global = true, env = "CREDHASH_ALGORITHM", default_value = "HMACSHA256")]
    algorithm: KeyedAlgorithm,

    /// PBKDF2 iterations for new records
    #[arg(long, global = true, env = "CREDHASH_ITERATIONS", default_value_t = 10_000)]
    iterations: u32,

    /// Derived key length in bytes
    #[arg(long, global = true, env = "CREDHASH_KEY_SIZE", default_value_t = 32)]
    key_size: usize,

    /// Salt length in bytes
    #[arg(long, global = true, env = "CREDHASH_SALT_SIZE", default_value_t = 16)]
    salt_size: usize,
}

impl HashArgs {
    fn to_configuration(&self) -> Result<HashConfiguration> {
        HashConfiguration::builder()
            .algorithm(self.algorithm)
            .iterations(self.iterations)
            .key_size(self.key_size)
            .salt_size(self.salt_size)
            .build()
            .context("invalid hash configuration")
    }
}

#[derive(Debug, Parser)]
#[command(name = "credhash")]
#[command(
    version,
    about = "Create and verify salted, iterated, keyed password digests."
)]
struct Cli {
    #[command(flatten)]
    hash: HashArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Hashes a password into a new security record
    Create,

    /// Checks a password against a security record
    #[command(arg_required_else_help = true)]
    Validate { record: String },

    /// Prints the parameters a security record was created with
    #[command(arg_required_else_help = true)]
    Inspect { record: String },

    /// Reports whether a record was made with other parameters than the configured ones
    #[command(arg_required_else_help = true)]
    NeedsRehash { record: String },
}

#[derive(Serialize)]
struct RecordInfo {
    #[serde(flatten)]
    parameters: HashConfiguration,
    digest_size: usize,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    match args.command {
        Commands::Create => {
            let hasher = Hasher::new(args.hash.to_configuration()?);
            let password = auth::read_password()?;
            let record = hasher
                .create(&password)
                .context("failed to create security record")?;
            println!("{record}");
        }
        Commands::Validate { record } => {
            let record: SecurityRecord = record
                .trim()
                .parse()
                .context("could not evaluate security record")?;
            // every parameter comes from the record, the hash flags are not consulted
            let hasher = Hasher::new(record.parameters()?);
            let password = auth::read_password()?;
            let valid = hasher
                .validate_record(&password, &record)
                .context("could not evaluate security record")?;
            if !valid {
                println!("invalid");
                return Ok(ExitCode::FAILURE);
            }
            println!("valid");
        }
        Commands::Inspect { record } => {
            let record: SecurityRecord = record
                .trim()
                .parse()
                .context("could not evaluate security record")?;
            let info = RecordInfo {
                parameters: record.parameters()?,
                digest_size: record.digest().len(),
            };
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Commands::NeedsRehash { record } => {
            let hasher = Hasher::new(args.hash.to_configuration()?);
            let stale = hasher
                .needs_rehash(record.trim())
                .context("could not evaluate security record")?;
            println!("{}", if stale { "yes" } else { "no" });
        }
    }

    Ok(ExitCode::SUCCESS)
}
