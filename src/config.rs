// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub github: GithubConfig,
    pub filter: FilterConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GithubConfig {
    pub api_base: String,
    pub archive_base: String,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub extra_patterns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub extension: String,
    pub separator: String,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("REPODOC")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            github: GithubConfig {
                api_base: "https://api.github.com".to_string(),
                archive_base: "https://github.com".to_string(),
                token: None,
            },
            filter: FilterConfig {
                extra_patterns: vec![],
            },
            output: OutputConfig {
                extension: "md".to_string(),
                separator: "---".to_string(),
            },
        }
    }

    fn validate(&self) -> Result<()> {
        for url in [&self.github.api_base, &self.github.archive_base] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(PipelineError::Config(format!(
                    "base URL must start with http:// or https://: {}",
                    url
                )));
            }
        }

        if self.output.extension.is_empty() {
            return Err(PipelineError::Config(
                "output extension must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
