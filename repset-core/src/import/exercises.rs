use std::collections::HashSet;

use serde::Deserialize;
use tracing::warn;

use repset_model::{NewExercise, normalize_title};

use crate::error::{CatalogError, Result};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExerciseRow {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Desc")]
    description: String,
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "BodyPart")]
    body_part: String,
    #[serde(rename = "Equipment")]
    equipment: String,
    #[serde(rename = "Level")]
    level: String,
    #[serde(rename = "Rating")]
    rating: String,
    #[serde(rename = "RatingDesc")]
    rating_description: String,
}

/// Absent ratings default to 0.0; so do unparseable ones, with a warning,
/// rather than dropping an otherwise usable row.
fn parse_rating(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(value) => value,
        Err(_) => {
            warn!(value = trimmed, "unparseable rating in CSV row, defaulting to 0.0");
            0.0
        }
    }
}

/// Decode a flat exercise sheet into insert payloads.
///
/// Titles are normalized; rows whose title is empty after normalization or
/// duplicates an earlier row in the same batch are skipped (first occurrence
/// wins).
pub fn parse_exercises_csv(data: &[u8]) -> Result<Vec<NewExercise>> {
    let mut reader = csv::Reader::from_reader(data);
    let mut seen_titles = HashSet::new();
    let mut exercises = Vec::new();

    for row in reader.deserialize::<ExerciseRow>() {
        let row = row.map_err(|e| CatalogError::Validation(format!("malformed CSV: {e}")))?;

        let title = normalize_title(&row.title);
        if title.is_empty() || !seen_titles.insert(title.clone()) {
            continue;
        }

        exercises.push(NewExercise {
            title,
            description: row.description.trim().to_string(),
            kind: row.kind.trim().to_string(),
            body_part: row.body_part.trim().to_string(),
            equipment: row.equipment.trim().to_string(),
            level: row.level.trim().to_string(),
            rating: parse_rating(&row.rating),
            rating_description: row.rating_description.trim().to_string(),
            gif_url: String::new(),
            searched_gifs: Vec::new(),
        });
    }

    Ok(exercises)
}
