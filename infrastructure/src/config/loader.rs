//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Project-level config file name, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "chat-gateway.toml";

/// Prefix for environment overrides, e.g. `CHAT_GATEWAY_PROVIDER__REGION`.
pub const ENV_PREFIX: &str = "CHAT_GATEWAY_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `CHAT_GATEWAY_<SECTION>__<KEY>`
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./chat-gateway.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/chat-gateway/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        // An explicit path that does not exist is an error, not a silent skip.
        if let Some(path) = config_path
            && !path.is_file()
        {
            return Err(Box::new(figment::Error::from(format!(
                "config file not found: {}",
                path.display()
            ))));
        }
        Self::figment(config_path).extract().map_err(Box::new)
    }

    /// Defaults plus environment overrides only (for --no-config)
    pub fn load_defaults() -> Result<FileConfig, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Self::env())
            .extract()
            .map_err(Box::new)
    }

    fn figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(project_path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(project_path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Self::env())
    }

    fn env() -> Env {
        Env::prefixed(ENV_PREFIX).split("__")
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/chat-gateway/config.toml if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("chat-gateway").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        let path = PathBuf::from(PROJECT_CONFIG_FILE);
        path.exists().then_some(path)
    }

    /// Describe the config file locations in priority order (for --show-config)
    pub fn config_sources(config_path: Option<&Path>) -> Vec<String> {
        let mut sources = vec![format!("[env]   {ENV_PREFIX}<SECTION>__<KEY>")];

        if let Some(path) = config_path {
            sources.push(format!("[FOUND] Explicit: {}", path.display()));
        }

        match Self::project_config_path() {
            Some(path) => sources.push(format!("[FOUND] Project: {}", path.display())),
            None => sources.push(format!("[     ] Project: ./{PROJECT_CONFIG_FILE}")),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            sources.push(format!("[{mark}] Global:  {}", path.display()));
        }

        sources.push("[     ] Default: built-in defaults".to_string());
        sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    /// Point the global config lookup into the jail so a developer's own
    /// `~/.config/chat-gateway/config.toml` never leaks into a test.
    fn isolate_global_config(jail: &mut Jail) {
        let config_home = jail.directory().display().to_string();
        jail.set_env("XDG_CONFIG_HOME", config_home);
    }

    #[test]
    fn test_load_defaults() {
        Jail::expect_with(|_jail| {
            let config = ConfigLoader::load_defaults().map_err(|e| *e)?;
            assert_eq!(config, FileConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("chat-gateway"));
    }

    #[test]
    fn test_project_file_is_merged() {
        Jail::expect_with(|jail| {
            isolate_global_config(jail);
            jail.create_file(
                PROJECT_CONFIG_FILE,
                r#"
[provider]
region = "eu-west-1"

[resilience]
max_retries = 4
"#,
            )?;

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.provider.region, "eu-west-1");
            assert_eq!(config.resilience.max_retries, 4);
            assert_eq!(config.resilience.timeout_seconds, 30);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_overrides_project_file() {
        Jail::expect_with(|jail| {
            isolate_global_config(jail);
            jail.create_file(PROJECT_CONFIG_FILE, "[server]\nbind = \"127.0.0.1:1111\"\n")?;
            jail.create_file("custom.toml", "[server]\nbind = \"127.0.0.1:2222\"\n")?;

            let config = ConfigLoader::load(Some(Path::new("custom.toml"))).map_err(|e| *e)?;
            assert_eq!(config.server.bind, "127.0.0.1:2222");
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        Jail::expect_with(|jail| {
            isolate_global_config(jail);
            assert!(ConfigLoader::load(Some(Path::new("does-not-exist.toml"))).is_err());
            Ok(())
        });
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_global_file_read_from_config_home_and_overridden_by_project() {
        Jail::expect_with(|jail| {
            isolate_global_config(jail);
            std::fs::create_dir_all(jail.directory().join("chat-gateway")).unwrap();
            jail.create_file(
                "chat-gateway/config.toml",
                "[provider]\nregion = \"eu-west-1\"\nprofile = \"global\"\n",
            )?;
            jail.create_file(PROJECT_CONFIG_FILE, "[provider]\nregion = \"ap-south-1\"\n")?;

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.provider.profile.as_deref(), Some("global"));
            assert_eq!(config.provider.region, "ap-south-1");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_files() {
        Jail::expect_with(|jail| {
            isolate_global_config(jail);
            jail.create_file(PROJECT_CONFIG_FILE, "[provider]\nregion = \"eu-west-1\"\n")?;
            jail.set_env("CHAT_GATEWAY_PROVIDER__REGION", "ap-northeast-1");
            jail.set_env("CHAT_GATEWAY_RESILIENCE__TIMEOUT_SECONDS", "5");

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.provider.region, "ap-northeast-1");
            assert_eq!(config.resilience.timeout_seconds, 5);
            Ok(())
        });
    }

    #[test]
    fn test_env_applies_without_config_files() {
        Jail::expect_with(|jail| {
            jail.set_env("CHAT_GATEWAY_SERVER__BIND", "127.0.0.1:3000");

            let config = ConfigLoader::load_defaults().map_err(|e| *e)?;
            assert_eq!(config.server.bind, "127.0.0.1:3000");
            Ok(())
        });
    }

    #[test]
    fn test_config_sources_lists_defaults_last() {
        let sources = ConfigLoader::config_sources(None);
        assert!(sources[0].contains(ENV_PREFIX));
        assert!(sources.last().unwrap().contains("Default"));
    }
}
