//! Persona capability table read from YAML.
//!
//! ```yaml
//! sage:
//!   methods: [tarot, oracle]
//!   locales: [en, es]
//! ```

use std::path::Path;

use arcana_core::error::DomainError;
use arcana_interpretation::domain::persona::StaticPersonaRegistry;
use tracing::info;

/// Reads the persona table at `path`.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the file cannot be read and
/// `DomainError::Validation` if it does not parse.
pub async fn load_personas(path: impl AsRef<Path>) -> Result<StaticPersonaRegistry, DomainError> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        DomainError::Infrastructure(format!("cannot read {}: {e}", path.display()))
    })?;
    let registry: StaticPersonaRegistry = serde_yaml::from_str(&contents)
        .map_err(|e| DomainError::Validation(format!("persona table: {e}")))?;
    info!(path = %path.display(), personas = registry.len(), "persona table loaded");
    Ok(registry)
}
