use async_trait::async_trait;

use repset_model::{NewRoutine, Routine, RoutineID};

use crate::error::Result;

#[async_trait]
pub trait RoutineRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Routine>>;

    async fn insert(&self, routine: NewRoutine) -> Result<RoutineID>;

    /// Bulk insert; returns the assigned identifiers in input order.
    async fn insert_many(&self, routines: Vec<NewRoutine>) -> Result<Vec<RoutineID>>;

    /// Full-document replace. Returns false when no row matched.
    async fn replace(&self, id: RoutineID, routine: NewRoutine) -> Result<bool>;
}
