//! Polish - Grammar and tone correction from the terminal
//!
//! Sends text to Gemini and prints the corrected version.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Read;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use polish::config::{self, Config};
use polish::core::{Corrector, Tone};
use polish::credential::{self, Credential, CredentialStore, FileCredentialStore};
use polish::{clipboard, output};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Correct grammar, spelling and punctuation
    Fix {
        /// Text to correct (read from stdin when omitted)
        text: Option<String>,

        /// Tone of the corrected text
        #[arg(short, long, value_enum)]
        tone: Option<Tone>,

        /// Also explain the major changes
        #[arg(short, long)]
        explain: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Copy the corrected text to the clipboard
        #[arg(short, long)]
        copy: bool,
    },

    /// Manage the Gemini API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum KeyAction {
    /// Save the API key
    Set { key: String },
    /// Show a masked hint of the saved key
    Show,
    /// Print where the key is stored
    Path,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the configuration file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Parse the config without side effects so a corrupt file can be
    // reported once logging is up
    let config_path = config::config_path();
    let read = Config::read_from(&config_path);

    // Setup logging: RUST_LOG wins, then --verbose, then the config level
    let default_level = if args.verbose {
        "debug".to_string()
    } else {
        read.as_ref()
            .map(|c| c.log_level.to_lowercase())
            .unwrap_or_else(|_| config::DEFAULT_LOG_LEVEL.to_lowercase())
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match read {
        Ok(config) => config,
        Err(e) if e.is::<serde_json::Error>() => Config::recover(&config_path, &e),
        Err(e) => return Err(e),
    };

    debug!("✏️ Polish v{} starting...", env!("CARGO_PKG_VERSION"));

    let store = FileCredentialStore::open_default();

    match args.command {
        Commands::Fix {
            text,
            tone,
            explain,
            json,
            copy,
        } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            if args.verbose {
                eprintln!("{}", output::char_count(&text));
            }

            let tone = tone.unwrap_or(config.default_tone);
            let explain = explain || config.explain_by_default;
            let credential = credential::resolve(&store)?;

            let corrector = Corrector::from_config(&config);
            let result = match corrector
                .correct(&text, credential.as_ref(), tone, explain)
                .await
            {
                Ok(result) => result,
                Err(e) => {
                    eprintln!("{}", output::render_error(&e));
                    std::process::exit(1);
                }
            };

            if json {
                println!("{}", output::render_json(&result)?);
            } else {
                println!("{}", output::render(&result, explain));
            }

            if copy {
                match clipboard::copy(&result.corrected_text) {
                    Ok(tool) => info!("📋 Copied to clipboard via {}", tool),
                    Err(e) => warn!("Failed to copy: {}", e),
                }
            }
        }

        Commands::Key { action } => match action {
            KeyAction::Set { key } => {
                let key = key.trim();
                if key.is_empty() {
                    eprintln!("Please enter a valid API Key.");
                    std::process::exit(1);
                }
                store.set(Credential::new(key))?;
                println!("API Key saved!");
            }
            KeyAction::Show => match store.get()? {
                Some(cred) => println!("{}", cred.masked()),
                None => println!("No API key set. Run: polish key set <KEY>"),
            },
            KeyAction::Path => println!("{}", store.path().display()),
        },

        Commands::Config { action } => match action {
            ConfigAction::Show => println!("{}", serde_json::to_string_pretty(&config)?),
            ConfigAction::Path => println!("{}", config_path.display()),
        },
    }

    Ok(())
}
