use chrono::NaiveDate;
use serde::Serialize;

use super::domain::{Concurso, Level, Sphere, Status};

/// Presentation-ready projection of a record, labels resolved and the
/// registration countdown computed.
#[derive(Debug, Clone, Serialize)]
pub struct ConcursoCardView {
    pub id: String,
    pub title: String,
    pub organization: String,
    pub location: String,
    pub sphere: Sphere,
    pub sphere_label: String,
    pub levels: Vec<Level>,
    pub level_labels: Vec<String>,
    pub areas: Vec<String>,
    pub salary: String,
    pub openings: u32,
    pub registration_start: NaiveDate,
    pub registration_end: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_date: Option<NaiveDate>,
    pub status: Status,
    pub status_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_remaining: Option<i64>,
    pub detail_link: String,
}

impl ConcursoCardView {
    pub fn from_record(concurso: &Concurso, today: NaiveDate) -> Self {
        Self {
            id: concurso.id.clone(),
            title: concurso.title.clone(),
            organization: concurso.organization.clone(),
            location: concurso.location.clone(),
            sphere: concurso.sphere,
            sphere_label: concurso.sphere.label().to_string(),
            levels: concurso.levels.clone(),
            level_labels: concurso
                .levels
                .iter()
                .map(|level| level.label().to_string())
                .collect(),
            areas: concurso.areas.clone(),
            salary: concurso.salary.clone(),
            openings: concurso.openings,
            registration_start: concurso.registration_start,
            registration_end: concurso.registration_end,
            exam_date: concurso.exam_date,
            status: concurso.status,
            status_label: concurso.status.label().to_string(),
            days_remaining: concurso.days_remaining(today),
            detail_link: concurso.detail_link.clone(),
        }
    }
}
