use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(about = "Playground build helpers - trunk must be installed")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(about = "Build the frontend and serve it with the gateway")]
    Launch {
        /// Extra arguments passed through to playground-launcher
        #[arg(last = true)]
        launcher_args: Vec<String>,
    },
    #[command(about = "Assemble a release bundle under ./playground")]
    Dist { target_triple: Option<String> },
}
