use async_trait::async_trait;

use repset_model::{Exercise, ExerciseID, NewExercise, NormalizedTitle};

use crate::error::Result;

#[async_trait]
pub trait ExerciseRepository: Send + Sync {
    /// Case-insensitive exact match on the normalized title.
    async fn find_by_title(&self, title: &NormalizedTitle) -> Result<Option<Exercise>>;

    async fn find_by_id(&self, id: ExerciseID) -> Result<Option<Exercise>>;

    /// Every stored title, unsorted; ordering is the caller's concern.
    async fn list_titles(&self) -> Result<Vec<String>>;

    async fn list_all(&self) -> Result<Vec<Exercise>>;

    async fn insert(&self, exercise: NewExercise) -> Result<ExerciseID>;

    /// Bulk insert; returns the number of rows written.
    async fn insert_many(&self, exercises: Vec<NewExercise>) -> Result<u64>;

    /// Replace the stored image list of the record matching `title`, making
    /// the first URL the primary gif.
    async fn set_images(&self, title: &NormalizedTitle, gifs: &[String]) -> Result<()>;

    /// Update the primary gif URL by identifier. Returns false when no row
    /// matched.
    async fn update_gif_url(&self, id: ExerciseID, gif_url: &str) -> Result<bool>;
}
