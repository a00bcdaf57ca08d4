use clap::{Parser, Subcommand};

/// Scoopika console - login gate and LLM engine registry
#[derive(Parser)]
#[command(name = "scoopika")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory for session and engine files. Defaults to ~/.scoopika
    #[arg(long, env = "SCOOPIKA_DATA_DIR", global = true)]
    pub data_dir: Option<String>,

    /// Extra engines file (JSON). Defaults to <data dir>/engines.json
    #[arg(long, env = "SCOOPIKA_ENGINES_FILE", global = true)]
    pub engines_file: Option<String>,

    /// Model list used for json prompts: "faithful" or "text-alias"
    #[arg(long, env = "SCOOPIKA_JSON_OPTIONS", global = true)]
    pub json_options: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the login page and registry API
    Serve {
        /// Address to listen on
        #[arg(long, env = "SCOOPIKA_BIND")]
        bind: Option<String>,

        /// Open the login page in the browser once listening
        #[arg(long)]
        open: bool,
    },
    /// List engines serving a modality
    Engines {
        /// Modality: text, image or json
        #[arg(short = 't', long = "type")]
        kind: String,
    },
    /// Show option descriptors for a model
    Options {
        /// Modality: text, image or json
        #[arg(short = 't', long = "type")]
        kind: String,

        /// Provider key (e.g. openai)
        #[arg(short, long)]
        client: String,

        /// Model id (e.g. gpt-3.5-turbo)
        #[arg(short, long)]
        model: String,

        /// Print default values only
        #[arg(long)]
        defaults: bool,
    },
    /// Create a local session
    Login {
        /// User name recorded in the session
        #[arg(short, long)]
        user: String,
    },
    /// Remove the local session
    Logout,
    /// Show current session status
    Status,
}
