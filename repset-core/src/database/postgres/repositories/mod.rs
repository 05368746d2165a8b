mod exercises;
mod routines;

pub use exercises::PostgresExerciseRepository;
pub use routines::PostgresRoutineRepository;
