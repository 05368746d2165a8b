use serde::Deserialize;

use repset_model::{ExerciseEntry, MuscleGroup, NewRoutine};

use crate::error::{CatalogError, Result};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RoutineRow {
    #[serde(rename = "Routine")]
    routine: String,
    #[serde(rename = "MuscleGroup")]
    muscle_group: String,
    #[serde(rename = "Exercise")]
    exercise: String,
    #[serde(rename = "Set")]
    set: String,
    #[serde(rename = "Reps")]
    reps: String,
    #[serde(rename = "Weight")]
    weight: String,
}

/// Fold a routine sheet into nested routine documents.
///
/// Grouping is exact string equality on routine, muscle group, and exercise
/// names (trimmed, never normalized); rows missing any of the three are
/// skipped. Routines, groups, exercises, and set lines all keep first
/// encounter order.
pub fn parse_routines_csv(data: &[u8]) -> Result<Vec<NewRoutine>> {
    let mut reader = csv::Reader::from_reader(data);
    let mut routines: Vec<NewRoutine> = Vec::new();

    for row in reader.deserialize::<RoutineRow>() {
        let row = row.map_err(|e| CatalogError::Validation(format!("malformed CSV: {e}")))?;

        let name = row.routine.trim();
        let group_title = row.muscle_group.trim();
        let exercise_title = row.exercise.trim();
        if name.is_empty() || group_title.is_empty() || exercise_title.is_empty() {
            continue;
        }

        let routine_idx = match routines.iter().position(|r| r.name == name) {
            Some(idx) => idx,
            None => {
                routines.push(NewRoutine {
                    name: name.to_string(),
                    ..NewRoutine::default()
                });
                routines.len() - 1
            }
        };
        let groups = &mut routines[routine_idx].groups;

        let group_idx = match groups.iter().position(|g| g.title == group_title) {
            Some(idx) => idx,
            None => {
                groups.push(MuscleGroup {
                    title: group_title.to_string(),
                    exercises: Vec::new(),
                });
                groups.len() - 1
            }
        };
        let exercises = &mut groups[group_idx].exercises;

        let exercise_idx = match exercises.iter().position(|e| e.title == exercise_title) {
            Some(idx) => idx,
            None => {
                exercises.push(ExerciseEntry {
                    title: exercise_title.to_string(),
                    table: Vec::new(),
                });
                exercises.len() - 1
            }
        };

        exercises[exercise_idx].table.push([
            row.set.trim().to_string(),
            row.reps.trim().to_string(),
            row.weight.trim().to_string(),
        ]);
    }

    Ok(routines)
}
