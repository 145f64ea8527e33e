use recommender::{DEFAULT_TOP_K_PER_OBJECTIVE, EmbedderConfig, EmbedderKind, SkillCatalog};
use serde::Deserialize;
use std::{env, fs, path::Path, path::PathBuf, time::Duration};
use tracing::{info, warn};

/// Placeholder catalog of future-of-jobs skills used when none is configured
const DEFAULT_SKILLS: [&str; 4] = [
    "AI & Big Data",
    "Cybersecurity",
    "Cloud Computing",
    "Analytical Thinking",
];

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TnaConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub catalog: CatalogConfig,
    pub recommendation: RecommendationConfig,
    pub embedder: EmbedderConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            cors_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("organizations.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub skills: SkillCatalog,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            skills: SkillCatalog::new(DEFAULT_SKILLS),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
    pub top_k_per_objective: usize,
    /// Zero disables the timeout
    pub embed_timeout_secs: u64,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            top_k_per_objective: DEFAULT_TOP_K_PER_OBJECTIVE,
            embed_timeout_secs: 30,
        }
    }
}

impl RecommendationConfig {
    pub fn embed_timeout(&self) -> Option<Duration> {
        (self.embed_timeout_secs > 0).then(|| Duration::from_secs(self.embed_timeout_secs))
    }
}

/// Load the config file named by `TNA_CONFIG_PATH` (default `tna.yaml`),
/// then apply environment overrides.
pub fn load() -> TnaConfig {
    let path = env::var("TNA_CONFIG_PATH").unwrap_or_else(|_| "tna.yaml".to_string());
    let mut config = load_file(Path::new(&path));

    apply_env_overrides(&mut config, |key| env::var(key).ok());

    info!(
        bind_addr = %config.server.bind_addr,
        store_path = %config.storage.path.display(),
        catalog_size = config.catalog.skills.len(),
        top_k = config.recommendation.top_k_per_objective,
        embedder = %config.embedder.kind,
        "TNA config loaded"
    );

    config
}

/// Parse a config file, falling back to defaults when it is missing or invalid.
pub fn load_file(path: &Path) -> TnaConfig {
    match fs::read_to_string(path) {
        Ok(contents) => match serde_yaml::from_str::<TnaConfig>(&contents) {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, path = %path.display(), "Failed to parse TNA config, using defaults");
                TnaConfig::default()
            }
        },
        Err(err) => {
            warn!(error = %err, path = %path.display(), "TNA config not found, using defaults");
            TnaConfig::default()
        }
    }
}

pub fn apply_env_overrides<F>(config: &mut TnaConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup("TNA_BIND_ADDR") {
        config.server.bind_addr = value;
    }

    if let Some(value) = lookup("TNA_CORS_ORIGINS") {
        config.server.cors_origins = value
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();
    }

    if let Some(value) = lookup("TNA_STORE_PATH") {
        config.storage.path = PathBuf::from(value);
    }

    if let Some(value) = lookup("TNA_SKILL_CATALOG") {
        match serde_json::from_str::<Vec<String>>(&value) {
            Ok(skills) => {
                config.catalog.skills = SkillCatalog::new(skills);
            }
            Err(err) => {
                warn!(error = %err, "Failed to parse TNA_SKILL_CATALOG override");
            }
        }
    }

    if let Some(value) = lookup("TNA_TOP_K") {
        match value.parse::<usize>() {
            Ok(top_k) => {
                config.recommendation.top_k_per_objective = top_k;
            }
            Err(err) => {
                warn!(error = %err, "Failed to parse TNA_TOP_K override");
            }
        }
    }

    if let Some(value) = lookup("TNA_EMBED_TIMEOUT_SECS") {
        match value.parse::<u64>() {
            Ok(secs) => {
                config.recommendation.embed_timeout_secs = secs;
            }
            Err(err) => {
                warn!(error = %err, "Failed to parse TNA_EMBED_TIMEOUT_SECS override");
            }
        }
    }

    if let Some(value) = lookup("TNA_EMBEDDER") {
        match value.parse::<EmbedderKind>() {
            Ok(kind) => {
                config.embedder.kind = kind;
            }
            Err(err) => {
                warn!(error = %err, "Failed to parse TNA_EMBEDDER override");
            }
        }
    }

    for warning in config.embedder.ollama.apply_env_overrides(&lookup) {
        warn!("{}", warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = TnaConfig::default();
        assert_eq!(config.catalog.skills.len(), 4);
        assert_eq!(config.recommendation.top_k_per_objective, 5);
        assert_eq!(config.recommendation.embed_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.embedder.kind, EmbedderKind::Ollama);
        assert_eq!(config.storage.path, PathBuf::from("organizations.json"));
    }

    #[test]
    fn test_yaml_overrides_selected_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
catalog:
  skills: ["Leadership", "Cloud Computing", "Leadership"]
recommendation:
  top_k_per_objective: 2
  embed_timeout_secs: 0
embedder:
  kind: hash
  hash_dimension: 64
"#
        )
        .unwrap();

        let config = load_file(file.path());

        assert_eq!(config.catalog.skills.len(), 2);
        assert_eq!(config.recommendation.top_k_per_objective, 2);
        assert_eq!(config.recommendation.embed_timeout(), None);
        assert_eq!(config.embedder.kind, EmbedderKind::Hash);
        assert_eq!(config.embedder.hash_dimension, 64);
        assert_eq!(config.server.bind_addr, "0.0.0.0:8000");
    }

    #[test]
    fn test_invalid_or_missing_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "catalog: [not, a, mapping").unwrap();
        assert_eq!(load_file(file.path()).catalog.skills.len(), 4);

        let missing = load_file(Path::new("/definitely/not/here/tna.yaml"));
        assert_eq!(missing.recommendation.top_k_per_objective, 5);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = TnaConfig::default();
        apply_env_overrides(
            &mut config,
            lookup_from(&[
                ("TNA_BIND_ADDR", "127.0.0.1:9000"),
                ("TNA_CORS_ORIGINS", "http://a.test, http://b.test,"),
                ("TNA_STORE_PATH", "data/org.json"),
                ("TNA_SKILL_CATALOG", r#"["Negotiation"]"#),
                ("TNA_TOP_K", "3"),
                ("TNA_EMBEDDER", "hash"),
                ("OLLAMA_PORT", "12000"),
            ]),
        );

        assert_eq!(config.server.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.server.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.storage.path, PathBuf::from("data/org.json"));
        assert_eq!(config.catalog.skills.labels(), &["Negotiation".to_string()]);
        assert_eq!(config.recommendation.top_k_per_objective, 3);
        assert_eq!(config.embedder.kind, EmbedderKind::Hash);
        assert_eq!(config.embedder.ollama.port, 12000);
    }

    #[test]
    fn test_unparseable_env_overrides_are_ignored() {
        let mut config = TnaConfig::default();
        apply_env_overrides(
            &mut config,
            lookup_from(&[
                ("TNA_SKILL_CATALOG", "Negotiation"),
                ("TNA_TOP_K", "many"),
                ("TNA_EMBEDDER", "word2vec"),
            ]),
        );

        assert_eq!(config.catalog.skills.len(), 4);
        assert_eq!(config.recommendation.top_k_per_objective, 5);
        assert_eq!(config.embedder.kind, EmbedderKind::Ollama);
    }
}
