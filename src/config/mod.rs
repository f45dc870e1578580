use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

/// Model the original deployment shipped with; used whenever
/// `OPENROUTER_MODEL` is unset.
const DEFAULT_MODEL: &str = "meta-llama/llama-3.1-8b-instruct";

/// Ordered fallback list for the chat endpoint: primary, then two fallbacks.
const DEFAULT_FALLBACK_MODELS: &str = "meta-llama/llama-3.1-8b-instruct,\
                                       mistralai/mistral-7b-instruct-v0.3,\
                                       google/gemma-2-9b-it";

#[derive(Debug, Clone, Deserialize)]
pub struct CommonConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    5001
}

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// OpenRouter API key. May be empty: requests are still sent and the
    /// upstream rejection is relayed, never blocked locally.
    pub api_key: String,
    /// Value for the `HTTP-Referer` attribution header.
    pub referer: String,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Model used by the single-shot task and email operations.
    pub default_model: String,
    /// Models tried in order by the chat endpoint.
    pub fallback_models: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PersonaConfig {
    pub common: CommonConfig,
    pub upstream: UpstreamConfig,
    pub models: ModelConfig,
}

impl PersonaConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let common = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()?;

        let fallback_models = get_env("OPENROUTER_FALLBACK_MODELS", DEFAULT_FALLBACK_MODELS)
            .split(',')
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .collect();

        Ok(PersonaConfig {
            common,
            upstream: UpstreamConfig {
                api_key: get_env("OPENROUTER_KEY", ""),
                referer: get_env("OPENROUTER_REFERER", "http://localhost:5001"),
            },
            models: ModelConfig {
                default_model: get_env("OPENROUTER_MODEL", DEFAULT_MODEL),
                fallback_models,
            },
        })
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
