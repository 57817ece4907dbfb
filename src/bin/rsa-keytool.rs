use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use auth_gateway::services::crypto::{self, DEFAULT_KEY_BITS};
use clap::{Args, Parser, Subcommand};

/// RSA helper for operators: generate key pairs and encrypt/decrypt
/// payloads the same way the gateway's crypto service does.
///
/// Keys are base64 text (X.509 public / PKCS#8 private). Pass the text
/// directly or `@path/to/file` to read it from disk.
#[derive(Parser, Debug)]
#[command(name = "rsa-keytool", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a new key pair
    Keygen {
        /// Modulus size in bits
        #[arg(long, default_value_t = DEFAULT_KEY_BITS)]
        bits: usize,

        /// Print as JSON ({"public_key","private_key"})
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Encrypt with a public key (decrypt with the private key)
    PublicEncrypt(Payload),
    /// Decrypt with a public key (payload produced by private-encrypt)
    PublicDecrypt(Payload),
    /// Encrypt with a private key (decrypt with the public key)
    PrivateEncrypt(Payload),
    /// Decrypt with a private key (payload produced by public-encrypt)
    PrivateDecrypt(Payload),
    /// Print the SHA-256 fingerprint of a public key
    Fingerprint {
        #[arg(long)]
        key: String,
    },
}

#[derive(Args, Debug)]
struct Payload {
    /// Key text, or @FILE
    #[arg(long)]
    key: String,

    /// Plaintext (encrypt) or base64 ciphertext (decrypt)
    #[arg(long)]
    text: String,
}

fn read_key(arg: &str) -> Result<String> {
    match arg.strip_prefix('@') {
        Some(path) => {
            let path = PathBuf::from(path);
            fs::read_to_string(&path).with_context(|| format!("reading key from {}", path.display()))
        }
        None => Ok(arg.to_string()),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let output = match cli.command {
        Command::Keygen { bits, json } => {
            let pair = crypto::generate_key_pair(bits)?;
            if json {
                serde_json::to_string_pretty(&pair)?
            } else {
                format!(
                    "public key:  {}\nprivate key: {}",
                    pair.public_key, pair.private_key
                )
            }
        }
        Command::PublicEncrypt(p) => crypto::public_encrypt(&p.text, &read_key(&p.key)?)?,
        Command::PublicDecrypt(p) => crypto::public_decrypt(&p.text, &read_key(&p.key)?)?,
        Command::PrivateEncrypt(p) => crypto::private_encrypt(&p.text, &read_key(&p.key)?)?,
        Command::PrivateDecrypt(p) => crypto::private_decrypt(&p.text, &read_key(&p.key)?)?,
        Command::Fingerprint { key } => crypto::key_fingerprint(&read_key(&key)?)?,
    };

    println!("{}", output);
    Ok(())
}
