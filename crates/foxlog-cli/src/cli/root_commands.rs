use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Create the collection, validator and indexes, then print a summary.
    Bootstrap(BootstrapArgs),
    /// Print the indexes currently on the collection.
    Indexes,
    /// Print the validator and index plan as JSON without connecting.
    Schema(SchemaArgs),
}

/// Arguments for `foxlog bootstrap`.
#[derive(Clone, Debug, Default, Args)]
pub struct BootstrapArgs {
    /// Skip inserting the test record.
    #[arg(long)]
    pub no_seed: bool,

    /// Also create the expiration index on createdTime.
    #[arg(long)]
    pub ttl: bool,

    /// Drop the collection first. Deletes every stored log.
    #[arg(long)]
    pub drop: bool,
}

/// Arguments for `foxlog schema`.
#[derive(Clone, Debug, Default, Args)]
pub struct SchemaArgs {
    /// Include the expiration index in the printed plan.
    #[arg(long)]
    pub ttl: bool,
}
