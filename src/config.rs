use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory scanned recursively for declaration manifests
    #[serde(default = "default_manifests_dir")]
    pub manifests: String,
    /// Root directory generated artifacts are written under
    #[serde(default = "default_output_dir")]
    pub output: String,
}

fn default_manifests_dir() -> String {
    "steps".to_string()
}

fn default_output_dir() -> String {
    "generated".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            manifests: default_manifests_dir(),
            output: default_output_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Logical namespace artifacts are written under
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Root sentinel type where field flattening stops
    #[serde(default = "default_root_type")]
    pub root_type: String,
}

fn default_namespace() -> String {
    "steps".to_string()
}

fn default_root_type() -> String {
    "java.lang.Object".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            root_type: default_root_type(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (overridden by RUST_LOG or --debug)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Write logs to a file under the output root instead of stderr
    #[serde(default)]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: false,
        }
    }
}

impl Config {
    /// Path to the project config file within the working directory
    pub fn project_config_path() -> PathBuf {
        PathBuf::from("stepgen.toml")
    }

    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Start with embedded defaults so stepgen works without config files
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        // Project config in the working directory (primary config location)
        let project_config = Self::project_config_path();
        if project_config.exists() {
            builder = builder.add_source(config::File::from(project_config));
        }

        // User config in ~/.config/stepgen/ (optional global overrides)
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("stepgen").join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment variables with STEPGEN_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("STEPGEN")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Get absolute path to the manifests directory
    pub fn manifests_path(&self) -> PathBuf {
        resolve_path(&self.paths.manifests)
    }

    /// Get absolute path to the artifact output root
    pub fn output_path(&self) -> PathBuf {
        resolve_path(&self.paths.output)
    }

    /// Get absolute path to the logs directory
    pub fn logs_path(&self) -> PathBuf {
        self.output_path().join("logs")
    }
}

fn resolve_path(path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        std::env::current_dir().unwrap_or_default().join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.paths.manifests, "steps");
        assert_eq!(config.paths.output, "generated");
        assert_eq!(config.generator.namespace, "steps");
        assert_eq!(config.generator.root_type, "java.lang.Object");
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.to_file);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
[generator]
namespace = "io.acme.steps"
"#,
        )
        .unwrap();

        assert_eq!(config.generator.namespace, "io.acme.steps");
        assert_eq!(config.generator.root_type, "java.lang.Object");
        assert_eq!(config.paths.manifests, "steps");
    }

    #[test]
    fn test_relative_paths_resolve_under_cwd() {
        let config = Config::default();
        assert!(config.manifests_path().is_absolute());
        assert!(config.output_path().is_absolute());
        assert!(config.logs_path().ends_with("logs"));
    }

    #[test]
    fn test_absolute_paths_kept() {
        let mut config = Config::default();
        config.paths.output = "/tmp/stepgen-out".to_string();
        assert_eq!(config.output_path(), PathBuf::from("/tmp/stepgen-out"));
    }
}
