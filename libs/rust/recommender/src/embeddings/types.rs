use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default Ollama embedding model
const DEFAULT_OLLAMA_MODEL: &str = "all-minilm";

/// Default batch size for embedding generation
const DEFAULT_BATCH_SIZE: usize = 32;

const DEFAULT_OLLAMA_HOST: &str = "http://localhost";
const DEFAULT_OLLAMA_PORT: u16 = 11434;
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
const DEFAULT_HASH_DIMENSION: usize = 256;

/// Which provider implementation to construct
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedderKind {
    #[default]
    Ollama,
    #[serde(rename = "fastembed")]
    FastEmbed,
    Hash,
}

impl EmbedderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmbedderKind::Ollama => "ollama",
            EmbedderKind::FastEmbed => "fastembed",
            EmbedderKind::Hash => "hash",
        }
    }
}

impl std::fmt::Display for EmbedderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EmbedderKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "ollama" => Ok(EmbedderKind::Ollama),
            "fastembed" => Ok(EmbedderKind::FastEmbed),
            "hash" => Ok(EmbedderKind::Hash),
            other => Err(format!("unknown embedder kind: {other}")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbedderConfig {
    pub kind: EmbedderKind,
    pub ollama: OllamaConfig,
    pub hash_dimension: usize,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            kind: EmbedderKind::default(),
            ollama: OllamaConfig::default(),
            hash_dimension: DEFAULT_HASH_DIMENSION,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    pub host: String,
    pub port: u16,
    pub model: String,
    pub batch_size: usize,
    pub max_retries: u32,
    pub request_timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_OLLAMA_HOST.to_string(),
            port: DEFAULT_OLLAMA_PORT,
            model: DEFAULT_OLLAMA_MODEL.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            max_retries: DEFAULT_MAX_RETRIES,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl OllamaConfig {
    /// Base URL of the server, adding `http://` when the host has no scheme.
    pub fn base_url(&self) -> String {
        let host = self.host.trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            format!("{}:{}", host, self.port)
        } else {
            format!("http://{}:{}", host, self.port)
        }
    }

    /// Apply `OLLAMA_HOST`, `OLLAMA_PORT`, `OLLAMA_EMBEDDING_MODEL` and
    /// `OLLAMA_BATCH_SIZE`. Values that fail to parse are returned as warnings
    /// and leave the field untouched.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Vec<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut warnings = Vec::new();

        if let Some(host) = lookup("OLLAMA_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("OLLAMA_PORT") {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => warnings.push(format!("Failed to parse OLLAMA_PORT override: {port}")),
            }
        }
        if let Some(model) = lookup("OLLAMA_EMBEDDING_MODEL") {
            self.model = model;
        }
        if let Some(batch_size) = lookup("OLLAMA_BATCH_SIZE") {
            match batch_size.parse::<usize>() {
                Ok(size) if size > 0 => self.batch_size = size,
                _ => warnings.push(format!(
                    "Failed to parse OLLAMA_BATCH_SIZE override: {batch_size}"
                )),
            }
        }

        warnings
    }
}
