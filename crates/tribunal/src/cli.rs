use {alloy::primitives::U256, std::path::PathBuf};

#[derive(Debug, clap::Parser)]
pub struct Args {
    /// The log filter.
    #[clap(long, env, default_value = "warn,tribunal=info,mandate=debug,price_curve=debug")]
    pub log: String,

    /// At which log level logs should be printed to stderr instead of stdout.
    #[clap(long, env)]
    pub stderr_threshold: Option<tracing::Level>,

    /// Whether to use JSON format for the logs.
    #[clap(long, env, default_value = "false")]
    pub use_json_logs: bool,

    /// Path to the mandate and auction configuration. This file should be in
    /// TOML format, see `crates/tribunal/example.toml`.
    #[clap(long, env)]
    pub config: PathBuf,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Print the mandate's type strings and type hashes.
    Mandate,
    /// Hash the configured mandate value, and the claim built around it when
    /// a `[compact]` section is present.
    Hash,
    /// Evaluate the auction's combined price curve.
    Curve {
        /// Blocks elapsed since the auction's target block.
        #[clap(long)]
        blocks_passed: u64,
    },
    /// Derive fill and claim amounts for a fill at the given block.
    Amounts {
        #[clap(long)]
        fill_block: u64,

        /// Priority fee per gas of the fill transaction, in wei.
        #[clap(long, default_value = "0")]
        priority_fee: U256,
    },
}
