use serde::Deserialize;

use super::domain::{Concurso, FacetName, Level, Sphere, Status};

const BUNDLED_DATASET: &str = include_str!("../../data/concursos.json");

/// One selectable value for a facet, paired with its display label.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FacetOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    areas: Vec<String>,
    concursos: Vec<Concurso>,
}

/// The full announcement collection plus the vocabularies that feed the filter panel.
/// Loaded once at startup and never replaced.
#[derive(Debug)]
pub struct ConcursoCatalog {
    concursos: Vec<Concurso>,
    areas: Vec<String>,
}

impl ConcursoCatalog {
    /// Parse and validate the dataset bundled into the binary.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_DATASET)
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(raw)?;
        Self::from_parts(document.concursos, document.areas)
    }

    pub fn from_parts(concursos: Vec<Concurso>, areas: Vec<String>) -> Result<Self, CatalogError> {
        for concurso in &concursos {
            if concurso.registration_start > concurso.registration_end {
                return Err(CatalogError::InvalidRegistrationWindow {
                    id: concurso.id.clone(),
                });
            }
            if concurso.levels.is_empty() {
                return Err(CatalogError::EmptyLevels {
                    id: concurso.id.clone(),
                });
            }
            if concurso.areas.is_empty() {
                return Err(CatalogError::EmptyAreas {
                    id: concurso.id.clone(),
                });
            }
        }

        Ok(Self { concursos, areas })
    }

    /// All records in document order.
    pub fn concursos(&self) -> &[Concurso] {
        &self.concursos
    }

    pub fn len(&self) -> usize {
        self.concursos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concursos.is_empty()
    }

    /// Area vocabulary as declared by the dataset.
    pub fn areas(&self) -> &[String] {
        &self.areas
    }

    /// Selectable values for a facet: closed enums for level/sphere/status,
    /// the dataset vocabulary for areas.
    pub fn facet_options(&self, facet: FacetName) -> Vec<FacetOption> {
        match facet {
            FacetName::Level => Level::ordered()
                .into_iter()
                .map(|level| FacetOption {
                    value: level.as_str().to_string(),
                    label: level.label().to_string(),
                })
                .collect(),
            FacetName::Sphere => Sphere::ordered()
                .into_iter()
                .map(|sphere| FacetOption {
                    value: sphere.as_str().to_string(),
                    label: sphere.label().to_string(),
                })
                .collect(),
            FacetName::Area => self
                .areas
                .iter()
                .map(|area| FacetOption {
                    value: area.clone(),
                    label: capitalize(area),
                })
                .collect(),
            FacetName::Status => Status::ordered()
                .into_iter()
                .map(|status| FacetOption {
                    value: status.as_str().to_string(),
                    label: status.label().to_string(),
                })
                .collect(),
        }
    }

    /// Display label for a selected facet value, falling back to the raw value
    /// when it is not part of the vocabulary.
    pub fn value_label(&self, facet: FacetName, value: &str) -> String {
        self.facet_options(facet)
            .into_iter()
            .find(|option| option.value == value)
            .map(|option| option.label)
            .unwrap_or_else(|| value.to_string())
    }
}

fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Error enumeration for dataset loading failures.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("dataset is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("concurso {id} has registration_start after registration_end")]
    InvalidRegistrationWindow { id: String },
    #[error("concurso {id} declares no schooling level")]
    EmptyLevels { id: String },
    #[error("concurso {id} declares no area")]
    EmptyAreas { id: String },
}
