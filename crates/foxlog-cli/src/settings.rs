use anyhow::Context;
use foxlog_config::FoxlogConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration, then apply `--uri` and `--database`.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<FoxlogConfig> {
    let config = FoxlogConfig::load_with_dotenv(flags.config.as_deref())
        .context("failed to load foxlog configuration")?;
    with_flag_overrides(config, flags)
}

fn with_flag_overrides(mut config: FoxlogConfig, flags: &GlobalFlags) -> anyhow::Result<FoxlogConfig> {
    if let Some(uri) = &flags.uri {
        config.mongodb.uri.clone_from(uri);
    }
    if let Some(database) = &flags.database {
        config.bootstrap.database.clone_from(database);
    }
    config
        .validate()
        .context("invalid command-line override")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn flags_override_loaded_values() {
        let flags = GlobalFlags {
            uri: Some("mongodb://db.internal:27017".to_string()),
            database: Some("staging_logs".to_string()),
            ..GlobalFlags::default()
        };

        let config = with_flag_overrides(FoxlogConfig::default(), &flags).unwrap();

        assert_eq!(config.mongodb.uri, "mongodb://db.internal:27017");
        assert_eq!(config.bootstrap.database, "staging_logs");
        assert_eq!(config.bootstrap.collection, "error_logs");
    }

    #[test]
    fn absent_flags_keep_config() {
        let config = with_flag_overrides(FoxlogConfig::default(), &GlobalFlags::default()).unwrap();
        assert_eq!(config.mongodb.uri, "mongodb://localhost:27017");
        assert_eq!(config.bootstrap.database, "foxnas_logs");
    }

    #[test]
    fn bad_uri_flag_is_rejected() {
        let flags = GlobalFlags {
            uri: Some("http://localhost:27017".to_string()),
            ..GlobalFlags::default()
        };
        let error = with_flag_overrides(FoxlogConfig::default(), &flags).unwrap_err();
        assert!(format!("{error:#}").contains("mongodb.uri"));
    }
}
