use libris_config::LibrisConfig;

use crate::cli::GlobalFlags;

pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<LibrisConfig> {
    let mut config = LibrisConfig::load_with_dotenv().map_err(anyhow::Error::from)?;
    if flags.no_foreign_keys {
        config.database.foreign_keys = false;
    }
    Ok(config)
}

/// `--db` wins, then `--test` selects the configured test database, then the
/// configured main database.
pub fn database_path(flags: &GlobalFlags, config: &LibrisConfig) -> String {
    if let Some(path) = &flags.db {
        return path.clone();
    }
    if flags.test {
        config.database.test_path.clone()
    } else {
        config.database.path.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::database_path;
    use crate::cli::{GlobalFlags, OutputFormat};
    use libris_config::LibrisConfig;

    fn flags(db: Option<&str>, test: bool) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            quiet: false,
            verbose: false,
            db: db.map(str::to_string),
            test,
            no_foreign_keys: false,
        }
    }

    #[test]
    fn explicit_db_wins() {
        let config = LibrisConfig::default();
        assert_eq!(database_path(&flags(Some("x.db"), true), &config), "x.db");
    }

    #[test]
    fn test_flag_selects_test_path() {
        let config = LibrisConfig::default();
        assert_eq!(database_path(&flags(None, true), &config), "library_test.db");
        assert_eq!(database_path(&flags(None, false), &config), "library.db");
    }
}
