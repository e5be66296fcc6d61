//! Configuration loading and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env
//! vars. The cleaner's tunables live here because the discard list embeds
//! domain knowledge (language, generic vision labels) that deployments
//! localize without touching code.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_"));

        Ok(Self { figment })
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// Cleaner tunables from the `[detection]` table, falling back to the
    /// built-in defaults when the table is absent.
    pub fn cleaner(&self) -> CleanerConfig {
        self.get("detection").unwrap_or_default()
    }
}

/// Tunables for the ingredient cleaner.
///
/// `discard` lists generic, non-actionable labels the vision model tends
/// to emit ("botella", "comida") that never map to a cookable ingredient.
/// Entries are compared against both the canonical and the raw lower-cased
/// detection name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanerConfig {
    pub min_confidence: f32,
    pub discard: Vec<String>,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.5,
            discard: DEFAULT_DISCARD.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

const DEFAULT_DISCARD: &[&str] = &[
    "ensalada de frutas",
    "ensalada de pasta",
    "mermelada de frutas",
    "aderezo para ensalada",
    "fiambre",
    "verduras de hoja",
    "hierbas",
    "aceite de cocina",
    "botella",
    "verdura",
    "comida",
    "bebida embotellada",
    "agua",
];

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}
