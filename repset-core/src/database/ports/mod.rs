pub mod exercises;
pub mod routines;

pub use exercises::ExerciseRepository;
pub use routines::RoutineRepository;
