use serde::{Deserialize, Serialize};

use crate::ids::ExerciseID;
use crate::title::NormalizedTitle;

/// A stored exercise document.
///
/// Wire field names (`type`, `gifUrl`, `searchedGifs`) are part of the public
/// contract and kept verbatim via serde renames.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub body_part: String,
    pub equipment: String,
    pub level: String,
    pub rating: f64,
    pub rating_description: String,
    #[serde(rename = "gifUrl")]
    pub gif_url: String,
    #[serde(rename = "searchedGifs")]
    pub searched_gifs: Vec<String>,
}

impl Exercise {
    /// Attach a store-assigned identifier to an insert payload.
    pub fn from_new(id: ExerciseID, new: NewExercise) -> Self {
        Exercise {
            id,
            title: new.title,
            description: new.description,
            kind: new.kind,
            body_part: new.body_part,
            equipment: new.equipment,
            level: new.level,
            rating: new.rating,
            rating_description: new.rating_description,
            gif_url: new.gif_url,
            searched_gifs: new.searched_gifs,
        }
    }
}

/// Insert payload for an exercise.
///
/// Every field defaults, so the unvalidated insert endpoint accepts whatever
/// subset of the document a client sends; unknown keys are dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NewExercise {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub body_part: String,
    pub equipment: String,
    pub level: String,
    pub rating: f64,
    pub rating_description: String,
    #[serde(rename = "gifUrl")]
    pub gif_url: String,
    #[serde(rename = "searchedGifs")]
    pub searched_gifs: Vec<String>,
}

impl NewExercise {
    /// Document created on a cache miss during image enrichment: empty
    /// metadata, the fetched image list, first URL as the primary gif.
    pub fn from_search(title: &NormalizedTitle, gifs: Vec<String>) -> Self {
        NewExercise {
            title: title.as_str().to_string(),
            gif_url: gifs.first().cloned().unwrap_or_default(),
            searched_gifs: gifs,
            ..NewExercise::default()
        }
    }
}
