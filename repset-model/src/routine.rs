use serde::{Deserialize, Serialize};

use crate::ids::RoutineID;

/// One `[set, reps, weight]` line of an exercise table, kept as raw strings
/// the way the source sheets carry them.
pub type SetTriple = [String; 3];

/// One exercise inside a muscle group, with its ordered set table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseEntry {
    pub title: String,
    pub table: Vec<SetTriple>,
}

/// A named muscle group and the exercises assigned to it, in encounter order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MuscleGroup {
    pub title: String,
    pub exercises: Vec<ExerciseEntry>,
}

/// A stored workout routine.
///
/// Two creation paths produce two shapes: manually created routines carry
/// `exercise_ids`, CSV-imported ones carry the nested `groups` tree. Empty
/// collections stay off the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Routine {
    pub id: RoutineID,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exercise_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<MuscleGroup>,
}

/// Client payload for creating or replacing a routine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoutineDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub exercise_ids: Vec<String>,
}

/// Full insert payload for a routine; the CSV importer is the only producer
/// of a non-empty `groups` tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewRoutine {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exercise_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<MuscleGroup>,
}

impl From<RoutineDraft> for NewRoutine {
    fn from(draft: RoutineDraft) -> Self {
        NewRoutine {
            name: draft.name,
            description: draft.description,
            exercise_ids: draft.exercise_ids,
            groups: Vec::new(),
        }
    }
}

impl Routine {
    pub fn from_new(id: RoutineID, new: NewRoutine) -> Self {
        Routine {
            id,
            name: new.name,
            description: new.description,
            exercise_ids: new.exercise_ids,
            groups: new.groups,
        }
    }
}
