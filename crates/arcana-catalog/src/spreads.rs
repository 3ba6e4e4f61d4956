//! Spread catalog read from a YAML list of spread schemas.

use std::collections::HashMap;
use std::path::Path;

use arcana_core::error::DomainError;
use arcana_core::repository::SpreadRepository;
use arcana_core::spread::Spread;
use async_trait::async_trait;
use tracing::info;

/// Spreads loaded once from a YAML file.
#[derive(Debug, Clone, Default)]
pub struct FileSpreadRepository {
    spreads: HashMap<String, Spread>,
}

impl FileSpreadRepository {
    /// Reads and validates the catalog at `path`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the file cannot be read and
    /// `DomainError::Validation` if it does not parse, a spread is invalid,
    /// or two spreads share an id.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            DomainError::Infrastructure(format!("cannot read {}: {e}", path.display()))
        })?;
        let repository = Self::from_yaml(&contents)?;
        info!(path = %path.display(), spreads = repository.len(), "spread catalog loaded");
        Ok(repository)
    }

    /// Parses a catalog document.
    ///
    /// # Errors
    ///
    /// As [`Self::load`], minus the I/O failure.
    pub fn from_yaml(contents: &str) -> Result<Self, DomainError> {
        let list: Vec<Spread> = serde_yaml::from_str(contents)
            .map_err(|e| DomainError::Validation(format!("spread catalog: {e}")))?;

        let mut spreads = HashMap::with_capacity(list.len());
        for spread in list {
            spread.validate()?;
            if spreads.contains_key(&spread.id) {
                return Err(DomainError::Validation(format!(
                    "duplicate spread id {}",
                    spread.id
                )));
            }
            spreads.insert(spread.id.clone(), spread);
        }
        Ok(Self { spreads })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.spreads.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spreads.is_empty()
    }
}

#[async_trait]
impl SpreadRepository for FileSpreadRepository {
    async fn load_spread(&self, spread_id: &str) -> Result<Option<Spread>, DomainError> {
        Ok(self.spreads.get(spread_id).cloned())
    }

    async fn count_spreads(&self) -> Result<usize, DomainError> {
        Ok(self.spreads.len())
    }
}
