//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_FILES: [&str; 2] = ["council.toml", ".council.toml"];
const ENV_PREFIX: &str = "COUNCIL_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. `COUNCIL_` environment variables (`COUNCIL_DIAGNOSIS__TEMPERATURE=0.2`)
    /// 3. Project root: `./council.toml` or `./.council.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/clinical-council/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        let global = Self::global_config_path().filter(|p| p.exists());
        let project = Self::project_config_path();

        Self::figment(global.as_deref(), project.as_deref())
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge_explicit(config_path)
            .extract()
            .map_err(Box::new)
    }

    /// Merge file sources without consulting the environment.
    pub fn load_files(
        global: Option<&Path>,
        project: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(global, project)
            .merge_explicit(explicit)
            .extract()
            .map_err(Box::new)
    }

    fn figment(global: Option<&Path>, project: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));
        if let Some(path) = global {
            figment = figment.merge(Toml::file(path));
        }
        if let Some(path) = project {
            figment = figment.merge(Toml::file(path));
        }
        figment
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/clinical-council/config.toml if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("clinical-council").join("config.toml"))
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

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] Explicit: {}", mark, path.display());
        }

        let env_vars: Vec<String> = std::env::vars()
            .map(|(key, _)| key)
            .filter(|key| key.starts_with(ENV_PREFIX))
            .collect();
        if env_vars.is_empty() {
            println!("  [     ] Env:      {}*", ENV_PREFIX);
        } else {
            println!("  [FOUND] Env:      {}", env_vars.join(", "));
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project:  {}", path.display());
        } else {
            println!("  [     ] Project:  ./council.toml or ./.council.toml");
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "" };
            println!("  [{:<5}] Global:   {}", mark, path.display());
        }

        println!("  [     ] Default:  built-in defaults");
    }
}

trait MergeExplicit {
    fn merge_explicit(self, path: Option<&Path>) -> Self;
}

impl MergeExplicit for Figment {
    fn merge_explicit(self, path: Option<&Path>) -> Self {
        match path {
            Some(path) => self.merge(Toml::file(path)),
            None => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::OutputFormat;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.diagnosis.temperature, 0.1);
        assert_eq!(config.discussion.rounds, 2);
        assert!(config.output.color);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("clinical-council"));
    }

    #[test]
    fn test_no_files_yields_defaults() {
        let config = ConfigLoader::load_files(None, None, None).unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_later_sources_override_earlier_ones() {
        let dir = tempfile::tempdir().unwrap();
        let global = write(
            dir.path(),
            "global.toml",
            "[diagnosis]\ntemperature = 0.3\ndefault_specialty = \"Neurology\"\n",
        );
        let project = write(dir.path(), "council.toml", "[diagnosis]\ntemperature = 0.5\n");
        let explicit = write(dir.path(), "explicit.toml", "[output]\nformat = \"json\"\n");

        let config =
            ConfigLoader::load_files(Some(&global), Some(&project), Some(&explicit)).unwrap();

        assert_eq!(config.diagnosis.temperature, 0.5);
        assert_eq!(config.diagnosis.default_specialty, "Neurology");
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert_eq!(config.diagnosis.max_tokens, 1500);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = write(dir.path(), "bad.toml", "[diagnosis]\ntemperature = \"hot\"\n");

        assert!(ConfigLoader::load_files(None, None, Some(&explicit)).is_err());
    }
}
