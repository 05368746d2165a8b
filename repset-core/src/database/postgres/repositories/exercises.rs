use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use repset_model::{Exercise, ExerciseID, NewExercise, NormalizedTitle};

use crate::database::ports::exercises::ExerciseRepository;
use crate::error::Result;

const EXERCISE_COLUMNS: &str = "id, title, description, kind, body_part, equipment, level, \
     rating, rating_description, gif_url, searched_gifs";

#[derive(Debug, Clone)]
pub struct PostgresExerciseRepository {
    pool: PgPool,
}

impl PostgresExerciseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn map_row(row: &PgRow) -> Result<Exercise> {
        let id: Uuid = row.try_get("id")?;
        let searched_gifs: serde_json::Value = row.try_get("searched_gifs")?;
        let searched_gifs: Vec<String> = serde_json::from_value(searched_gifs)?;

        Ok(Exercise {
            id: ExerciseID(id),
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            kind: row.try_get("kind")?,
            body_part: row.try_get("body_part")?,
            equipment: row.try_get("equipment")?,
            level: row.try_get("level")?,
            rating: row.try_get("rating")?,
            rating_description: row.try_get("rating_description")?,
            gif_url: row.try_get("gif_url")?,
            searched_gifs,
        })
    }
}

#[async_trait]
impl ExerciseRepository for PostgresExerciseRepository {
    async fn find_by_title(&self, title: &NormalizedTitle) -> Result<Option<Exercise>> {
        let query = format!(
            "SELECT {EXERCISE_COLUMNS} FROM exercises WHERE lower(title) = lower($1) LIMIT 1"
        );
        let row = sqlx::query(&query)
            .bind(title.as_str())
            .fetch_optional(self.pool())
            .await?;

        row.map(|row| Self::map_row(&row)).transpose()
    }

    async fn find_by_id(&self, id: ExerciseID) -> Result<Option<Exercise>> {
        let query = format!("SELECT {EXERCISE_COLUMNS} FROM exercises WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(id.to_uuid())
            .fetch_optional(self.pool())
            .await?;

        row.map(|row| Self::map_row(&row)).transpose()
    }

    async fn list_titles(&self) -> Result<Vec<String>> {
        let titles = sqlx::query_scalar("SELECT title FROM exercises")
            .fetch_all(self.pool())
            .await?;
        Ok(titles)
    }

    async fn list_all(&self) -> Result<Vec<Exercise>> {
        let query = format!("SELECT {EXERCISE_COLUMNS} FROM exercises ORDER BY created_at");
        let rows = sqlx::query(&query).fetch_all(self.pool()).await?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn insert(&self, exercise: NewExercise) -> Result<ExerciseID> {
        let id = ExerciseID::new();
        sqlx::query(
            r#"
            INSERT INTO exercises
                (id, title, description, kind, body_part, equipment, level,
                 rating, rating_description, gif_url, searched_gifs)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(id.to_uuid())
        .bind(&exercise.title)
        .bind(&exercise.description)
        .bind(&exercise.kind)
        .bind(&exercise.body_part)
        .bind(&exercise.equipment)
        .bind(&exercise.level)
        .bind(exercise.rating)
        .bind(&exercise.rating_description)
        .bind(&exercise.gif_url)
        .bind(serde_json::to_value(&exercise.searched_gifs)?)
        .execute(self.pool())
        .await?;

        Ok(id)
    }

    async fn insert_many(&self, exercises: Vec<NewExercise>) -> Result<u64> {
        let mut tx = self.pool().begin().await?;
        let mut inserted = 0u64;

        for exercise in exercises {
            let result = sqlx::query(
                r#"
                INSERT INTO exercises
                    (id, title, description, kind, body_part, equipment, level,
                     rating, rating_description, gif_url, searched_gifs)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                "#,
            )
            .bind(ExerciseID::new().to_uuid())
            .bind(&exercise.title)
            .bind(&exercise.description)
            .bind(&exercise.kind)
            .bind(&exercise.body_part)
            .bind(&exercise.equipment)
            .bind(&exercise.level)
            .bind(exercise.rating)
            .bind(&exercise.rating_description)
            .bind(&exercise.gif_url)
            .bind(serde_json::to_value(&exercise.searched_gifs)?)
            .execute(&mut *tx)
            .await?;

            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn set_images(&self, title: &NormalizedTitle, gifs: &[String]) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE exercises
            SET searched_gifs = $2, gif_url = $3
            WHERE lower(title) = lower($1)
            "#,
        )
        .bind(title.as_str())
        .bind(serde_json::to_value(gifs)?)
        .bind(gifs.first().map(String::as_str).unwrap_or_default())
        .execute(self.pool())
        .await?;

        Ok(())
    }

    async fn update_gif_url(&self, id: ExerciseID, gif_url: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE exercises SET gif_url = $2 WHERE id = $1")
            .bind(id.to_uuid())
            .bind(gif_url)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
