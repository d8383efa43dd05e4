use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cafemetrics")]
#[command(author, version, about = "Cafeteria analytics service with an AI assistant", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP analytics service
    Serve {
        /// Bind address (defaults to the configured host)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Ask a single question from the command line
    Ask {
        question: String,

        /// Override the analysis window in days
        #[arg(short, long)]
        days: Option<f64>,
    },
}
