use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use repset_model::{MuscleGroup, NewRoutine, Routine, RoutineID};

use crate::database::ports::routines::RoutineRepository;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct PostgresRoutineRepository {
    pool: PgPool,
}

impl PostgresRoutineRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn map_row(row: &PgRow) -> Result<Routine> {
        let id: Uuid = row.try_get("id")?;
        let exercise_ids: serde_json::Value = row.try_get("exercise_ids")?;
        let exercise_ids: Vec<String> = serde_json::from_value(exercise_ids)?;
        let muscle_groups: serde_json::Value = row.try_get("muscle_groups")?;
        let groups: Vec<MuscleGroup> = serde_json::from_value(muscle_groups)?;

        Ok(Routine {
            id: RoutineID(id),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            exercise_ids,
            groups,
        })
    }
}

#[async_trait]
impl RoutineRepository for PostgresRoutineRepository {
    async fn list_all(&self) -> Result<Vec<Routine>> {
        let rows = sqlx::query(
            "SELECT id, name, description, exercise_ids, muscle_groups \
             FROM routines ORDER BY created_at",
        )
        .fetch_all(self.pool())
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn insert(&self, routine: NewRoutine) -> Result<RoutineID> {
        let id = RoutineID::new();
        sqlx::query(
            r#"
            INSERT INTO routines (id, name, description, exercise_ids, muscle_groups)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id.to_uuid())
        .bind(&routine.name)
        .bind(&routine.description)
        .bind(serde_json::to_value(&routine.exercise_ids)?)
        .bind(serde_json::to_value(&routine.groups)?)
        .execute(self.pool())
        .await?;

        Ok(id)
    }

    async fn insert_many(&self, routines: Vec<NewRoutine>) -> Result<Vec<RoutineID>> {
        let mut tx = self.pool().begin().await?;
        let mut ids = Vec::with_capacity(routines.len());

        for routine in routines {
            let id = RoutineID::new();
            sqlx::query(
                r#"
                INSERT INTO routines (id, name, description, exercise_ids, muscle_groups)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(id.to_uuid())
            .bind(&routine.name)
            .bind(&routine.description)
            .bind(serde_json::to_value(&routine.exercise_ids)?)
            .bind(serde_json::to_value(&routine.groups)?)
            .execute(&mut *tx)
            .await?;

            ids.push(id);
        }

        tx.commit().await?;
        Ok(ids)
    }

    async fn replace(&self, id: RoutineID, routine: NewRoutine) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE routines
            SET name = $2, description = $3, exercise_ids = $4, muscle_groups = $5
            WHERE id = $1
            "#,
        )
        .bind(id.to_uuid())
        .bind(&routine.name)
        .bind(&routine.description)
        .bind(serde_json::to_value(&routine.exercise_ids)?)
        .bind(serde_json::to_value(&routine.groups)?)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
