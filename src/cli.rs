use clap::{Parser, Subcommand};

/// `essaycoach` — essay-writing practice with LLM-backed feedback.
#[derive(Parser, Debug)]
#[command(name = "essaycoach")]
#[command(version = "0.1.0")]
#[command(about = "Write practice essays and get structured feedback.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the feedback gateway server
    Serve {
        /// Port to listen on (defaults to PORT env, then config, then 3001)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Write an essay interactively and request feedback
    Write {
        /// Gateway base URL (defaults to the configured one)
        #[arg(long)]
        gateway: Option<String>,
    },

    /// Check that the gateway is reachable
    Health {
        /// Gateway base URL (defaults to the configured one)
        #[arg(long)]
        gateway: Option<String>,
    },
}
