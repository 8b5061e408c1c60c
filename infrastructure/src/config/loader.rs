//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Project-level file names, checked in order
const PROJECT_FILES: [&str; 2] = ["consortium.toml", ".consortium.toml"];

/// Prefix for environment overrides (`CONSORTIUM_DISPATCH__OFFLINE=true`)
const ENV_PREFIX: &str = "CONSORTIUM_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `CONSORTIUM_*` environment variables (`__` separates sections)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./consortium.toml` or `./.consortium.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/consortium/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path).extract().map_err(Box::new)
    }

    fn figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// `$XDG_CONFIG_HOME/consortium/config.toml`, or the platform equivalent
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("consortium").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for --show-config)
    pub fn print_config_sources(config_path: Option<&Path>) {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] {}* variables", ENV_PREFIX);

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] Explicit: {}", mark, path.display());
        }

        match Self::project_config_path() {
            Some(path) => println!("  [FOUND] Project: {}", path.display()),
            None => println!("  [     ] Project: ./consortium.toml or ./.consortium.toml"),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            println!("  [{}] Global:  {}", mark, path.display());
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consortium_domain::{OutputFormat, ProviderId};

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.conversation.default_rounds, 2);
        assert!(!config.dispatch.offline);
        assert_eq!(config.quota.daily_token_limit, 100_000);
    }

    #[test]
    fn test_global_config_path_names_the_app() {
        if let Some(path) = ConfigLoader::global_config_path() {
            assert!(path.ends_with("consortium/config.toml"));
        }
    }

    #[test]
    fn test_explicit_file_and_env_override() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                r#"
[dispatch]
priority = ["groq"]

[output]
format = "report"
"#,
            )?;
            jail.set_env("CONSORTIUM_DISPATCH__OFFLINE", "true");
            jail.set_env("CONSORTIUM_QUOTA__DAILY_TOKEN_LIMIT", "5000");

            let config = ConfigLoader::load(Some(Path::new("custom.toml"))).map_err(|e| *e)?;
            assert!(config.dispatch.offline);
            assert_eq!(config.quota.daily_token_limit, 5000);
            assert_eq!(config.output.format, Some(OutputFormat::Report));
            let (ids, _) = config.dispatch.parse_priority();
            assert_eq!(ids, vec![ProviderId::Groq]);
            // untouched sections keep defaults
            assert_eq!(config.conversation.max_rounds, 5);
            Ok(())
        });
    }

    #[test]
    fn test_project_file_is_picked_up() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(".consortium.toml", "[conversation]\ndefault_rounds = 4\n")?;
            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.conversation.default_rounds, 4);
            Ok(())
        });
    }
}
