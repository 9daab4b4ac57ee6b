use std::path::PathBuf;

/// Global flags available before or after subcommands.
#[derive(Clone, Debug, Default)]
pub struct GlobalFlags {
    pub config: Option<PathBuf>,
    pub uri: Option<String>,
    pub database: Option<String>,
    pub quiet: bool,
}
