use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lrud")]
#[command(about = "Directional focus navigation over nested row/column layouts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Execute a command against a layout and output the resulting layout
    Execute {
        /// Path to the JSON layout file
        #[arg(short, long)]
        layout: String,
        /// Command to execute (e.g., "right", "focus:NODE_1", "sequence:[down,down]")
        #[arg(short = 'x', long)]
        command: String,
        /// Output file for the resulting layout (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Run a navigation script
    Test {
        /// Path to the script file
        #[arg(short, long)]
        script: String,
        /// Layout to start from (the script may also load one with `layout:`)
        #[arg(short, long)]
        layout: Option<String>,
        /// Log every step to stderr
        #[arg(short, long)]
        verbose: bool,
        /// Write tree dumps instead of verifying them
        #[arg(long)]
        overwrite: bool,
    },
    /// Print the node locations and the tree of a layout
    Inspect {
        /// Path to the JSON layout file
        #[arg(short, long)]
        layout: String,
    },
}
