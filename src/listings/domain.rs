use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Government sphere responsible for the announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sphere {
    Federal,
    State,
    Municipal,
}

impl Sphere {
    pub const fn ordered() -> [Self; 3] {
        [Self::Federal, Self::State, Self::Municipal]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Federal => "federal",
            Self::State => "state",
            Self::Municipal => "municipal",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Federal => "Federal",
            Self::State => "Estadual",
            Self::Municipal => "Municipal",
        }
    }
}

/// Schooling level required by at least one offered position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Secondary,
    Technical,
    Higher,
}

impl Level {
    pub const fn ordered() -> [Self; 3] {
        [Self::Secondary, Self::Technical, Self::Higher]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Secondary => "secondary",
            Self::Technical => "technical",
            Self::Higher => "higher",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Secondary => "Ensino Médio",
            Self::Technical => "Técnico",
            Self::Higher => "Superior",
        }
    }
}

/// Lifecycle stage of the announcement's registration window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Open,
    Upcoming,
    InProgress,
    Closed,
}

impl Status {
    pub const fn ordered() -> [Self; 4] {
        [Self::Open, Self::Upcoming, Self::InProgress, Self::Closed]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Upcoming => "upcoming",
            Self::InProgress => "in_progress",
            Self::Closed => "closed",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Inscrições Abertas",
            Self::Upcoming => "Abre Proximamente",
            Self::InProgress => "Em Andamento",
            Self::Closed => "Encerrado",
        }
    }
}

/// The four filterable dimensions of the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetName {
    Level,
    Sphere,
    Area,
    Status,
}

impl FacetName {
    pub const fn ordered() -> [Self; 4] {
        [Self::Level, Self::Sphere, Self::Area, Self::Status]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Level => "Nível",
            Self::Sphere => "Esfera",
            Self::Area => "Área",
            Self::Status => "Situação",
        }
    }
}

/// A single public-sector exam announcement, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concurso {
    pub id: String,
    pub title: String,
    pub organization: String,
    pub location: String,
    pub sphere: Sphere,
    pub levels: Vec<Level>,
    pub areas: Vec<String>,
    pub salary: String,
    pub openings: u32,
    pub registration_start: NaiveDate,
    pub registration_end: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_date: Option<NaiveDate>,
    pub status: Status,
    pub detail_link: String,
}

impl Concurso {
    /// Days left to register, clamped at zero. Only meaningful while registration is open.
    pub fn days_remaining(&self, today: NaiveDate) -> Option<i64> {
        if self.status != Status::Open {
            return None;
        }
        Some((self.registration_end - today).num_days().max(0))
    }
}
