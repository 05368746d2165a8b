use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ModelError;

/// Strongly typed ID for exercise documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExerciseID(pub Uuid);

impl Default for ExerciseID {
    fn default() -> Self {
        Self::new()
    }
}

impl ExerciseID {
    pub fn new() -> Self {
        ExerciseID(Uuid::now_v7())
    }

    /// Parse a client-supplied identifier. Malformed input is a validation
    /// failure, never a not-found.
    pub fn parse_str(raw: &str) -> Result<Self, ModelError> {
        Uuid::parse_str(raw.trim())
            .map(ExerciseID)
            .map_err(|_| ModelError::InvalidId(raw.to_string()))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl AsRef<Uuid> for ExerciseID {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for ExerciseID {
    fn from(value: Uuid) -> Self {
        ExerciseID(value)
    }
}

impl std::fmt::Display for ExerciseID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly typed ID for routine documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoutineID(pub Uuid);

impl Default for RoutineID {
    fn default() -> Self {
        Self::new()
    }
}

impl RoutineID {
    pub fn new() -> Self {
        RoutineID(Uuid::now_v7())
    }

    pub fn parse_str(raw: &str) -> Result<Self, ModelError> {
        Uuid::parse_str(raw.trim())
            .map(RoutineID)
            .map_err(|_| ModelError::InvalidId(raw.to_string()))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl AsRef<Uuid> for RoutineID {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for RoutineID {
    fn from(value: Uuid) -> Self {
        RoutineID(value)
    }
}

impl std::fmt::Display for RoutineID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
