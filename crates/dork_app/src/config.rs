use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use dork_engine::{DelayRange, EngineSettings, FetchSettings, ProviderRegistry};
use dork_logging::dork_info;
use serde::{Deserialize, Serialize};

/// Settings read from the optional RON file; every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub workers: usize,
    pub providers: Vec<String>,
    pub output_dir: PathBuf,
    pub delay_min_ms: u64,
    pub delay_max_ms: u64,
    pub request_timeout_secs: u64,
    /// Replacement URL templates keyed by provider id.
    pub provider_templates: BTreeMap<String, String>,
    pub log_to_file: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workers: 10,
            providers: ProviderRegistry::builtin().ids().map(str::to_string).collect(),
            output_dir: PathBuf::from("."),
            delay_min_ms: 1_000,
            delay_max_ms: 3_000,
            request_timeout_secs: 15,
            provider_templates: BTreeMap::new(),
            log_to_file: false,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = ron::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        dork_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Command-line values win over the file.
    pub fn apply_overrides(
        &mut self,
        workers: Option<usize>,
        providers: Option<Vec<String>>,
        output_dir: Option<PathBuf>,
    ) {
        if let Some(workers) = workers {
            self.workers = workers;
        }
        if let Some(providers) = providers {
            self.providers = providers
                .into_iter()
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect();
        }
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
    }

    pub fn registry(&self) -> Result<ProviderRegistry> {
        let mut registry = ProviderRegistry::builtin();
        for (id, template) in &self.provider_templates {
            if !registry.override_template(id, template.clone()) {
                bail!("provider_templates names unknown provider '{id}'");
            }
        }
        Ok(registry)
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..FetchSettings::default()
        }
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            delay: DelayRange::new(
                Duration::from_millis(self.delay_min_ms),
                Duration::from_millis(self.delay_max_ms),
            ),
            output_dir: self.output_dir.clone(),
            ..EngineSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_select_every_builtin_provider() {
        let config = AppConfig::default();
        assert_eq!(config.workers, 10);
        assert_eq!(
            config.providers,
            vec!["bing", "duckduckgo", "yahoo", "aol", "google-api", "bing-news", "naver", "yandex"]
        );
        assert_eq!(config.engine_settings().delay, DelayRange::default());
    }

    #[test]
    fn partial_ron_file_keeps_remaining_defaults() {
        let config: AppConfig = ron::from_str(
            r#"(
                workers: 4,
                providers: ["yandex", "bing"],
                provider_templates: {
                    "google-api": "https://example.test/cse?q={query}&start={offset}",
                },
            )"#,
        )
        .unwrap();

        assert_eq!(config.workers, 4);
        assert_eq!(config.providers, vec!["yandex", "bing"]);
        assert_eq!(config.delay_max_ms, 3_000);
        assert_eq!(config.request_timeout_secs, 15);

        let registry = config.registry().unwrap();
        let google = registry.get("google-api").unwrap();
        assert_eq!(
            google.build_url("inurl:x", 1),
            "https://example.test/cse?q=inurl%3Ax&start=11"
        );
    }

    #[test]
    fn unknown_template_override_is_rejected() {
        let config = AppConfig {
            provider_templates: BTreeMap::from([("altavista".to_string(), "x".to_string())]),
            ..AppConfig::default()
        };
        assert!(config.registry().is_err());
    }

    #[test]
    fn cli_values_override_file_values() {
        let mut config = AppConfig::default();
        config.apply_overrides(
            Some(2),
            Some(vec![" naver".to_string(), "".to_string(), "aol ".to_string()]),
            Some(PathBuf::from("out")),
        );
        assert_eq!(config.workers, 2);
        assert_eq!(config.providers, vec!["naver", "aol"]);
        assert_eq!(config.engine_settings().output_dir, PathBuf::from("out"));

        config.apply_overrides(None, None, None);
        assert_eq!(config.workers, 2);
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(&dir.path().join("absent.ron")).unwrap_err();
        assert!(err.to_string().contains("absent.ron"));
    }
}
