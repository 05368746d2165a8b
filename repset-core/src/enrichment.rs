use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use repset_model::{Exercise, NewExercise, NormalizedTitle};

use crate::database::ports::exercises::ExerciseRepository;
use crate::error::{CatalogError, Result};
use crate::providers::ImageSearchPort;

/// Where an enriched exercise came from. Serialized values are part of the
/// response contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentSource {
    /// The stored record already carried images; nothing was written.
    Db,
    /// The stored record had no images; search results were persisted onto it.
    GoogleUpdate,
    /// No stored record existed; one was created from the search results.
    GoogleInsert,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnrichedExercise {
    pub source: EnrichmentSource,
    pub exercise: Exercise,
}

/// Read-through cache over the exercise store, keyed by normalized title.
///
/// The store is consulted first; the external image search runs only on a
/// miss or when the stored record has an empty image list, and its results
/// are written back so the next lookup is served locally. Entries are never
/// refreshed once populated.
pub struct EnrichmentService {
    exercises: Arc<dyn ExerciseRepository>,
    search: Arc<dyn ImageSearchPort>,
}

impl std::fmt::Debug for EnrichmentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnrichmentService").finish_non_exhaustive()
    }
}

impl EnrichmentService {
    pub fn new(exercises: Arc<dyn ExerciseRepository>, search: Arc<dyn ImageSearchPort>) -> Self {
        Self { exercises, search }
    }

    pub async fn find_or_enrich(&self, title: &NormalizedTitle) -> Result<EnrichedExercise> {
        if let Some(existing) = self.exercises.find_by_title(title).await? {
            if !existing.searched_gifs.is_empty() {
                return Ok(EnrichedExercise {
                    source: EnrichmentSource::Db,
                    exercise: existing,
                });
            }

            let gifs = self.search.search_gifs(title).await?;
            if gifs.is_empty() {
                return Err(CatalogError::NotFound(format!(
                    "no images found for '{title}'"
                )));
            }

            debug!(%title, count = gifs.len(), "persisting searched images onto existing record");
            self.exercises.set_images(title, &gifs).await?;

            let mut exercise = existing;
            exercise.gif_url = gifs.first().cloned().unwrap_or_default();
            exercise.searched_gifs = gifs;
            return Ok(EnrichedExercise {
                source: EnrichmentSource::GoogleUpdate,
                exercise,
            });
        }

        let gifs = self.search.search_gifs(title).await?;
        if gifs.is_empty() {
            return Err(CatalogError::NotFound(format!(
                "no images found for '{title}'"
            )));
        }

        debug!(%title, count = gifs.len(), "creating record from search results");
        let new = NewExercise::from_search(title, gifs);
        let id = self.exercises.insert(new.clone()).await?;

        Ok(EnrichedExercise {
            source: EnrichmentSource::GoogleInsert,
            exercise: Exercise::from_new(id, new),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use repset_model::ExerciseID;

    use super::*;
    use crate::providers::ProviderError;

    #[derive(Default)]
    struct InMemoryExercises {
        records: Mutex<Vec<Exercise>>,
    }

    impl InMemoryExercises {
        fn with(records: Vec<Exercise>) -> Arc<Self> {
            Arc::new(Self {
                records: Mutex::new(records),
            })
        }

        fn snapshot(&self) -> Vec<Exercise> {
            self.records.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ExerciseRepository for InMemoryExercises {
        async fn find_by_title(&self, title: &NormalizedTitle) -> Result<Option<Exercise>> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .find(|e| e.title.eq_ignore_ascii_case(title.as_str()))
                .cloned())
        }

        async fn find_by_id(&self, id: ExerciseID) -> Result<Option<Exercise>> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .find(|e| e.id == id)
                .cloned())
        }

        async fn list_titles(&self) -> Result<Vec<String>> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .map(|e| e.title.clone())
                .collect())
        }

        async fn list_all(&self) -> Result<Vec<Exercise>> {
            Ok(self.snapshot())
        }

        async fn insert(&self, exercise: NewExercise) -> Result<ExerciseID> {
            let id = ExerciseID::new();
            self.records
                .lock()
                .unwrap()
                .push(Exercise::from_new(id, exercise));
            Ok(id)
        }

        async fn insert_many(&self, exercises: Vec<NewExercise>) -> Result<u64> {
            let count = exercises.len() as u64;
            for exercise in exercises {
                self.insert(exercise).await?;
            }
            Ok(count)
        }

        async fn set_images(&self, title: &NormalizedTitle, gifs: &[String]) -> Result<()> {
            let mut records = self.records.lock().unwrap();
            if let Some(record) = records
                .iter_mut()
                .find(|e| e.title.eq_ignore_ascii_case(title.as_str()))
            {
                record.searched_gifs = gifs.to_vec();
                record.gif_url = gifs.first().cloned().unwrap_or_default();
            }
            Ok(())
        }

        async fn update_gif_url(&self, id: ExerciseID, gif_url: &str) -> Result<bool> {
            let mut records = self.records.lock().unwrap();
            match records.iter_mut().find(|e| e.id == id) {
                Some(record) => {
                    record.gif_url = gif_url.to_string();
                    Ok(true)
                }
                None => Ok(false),
            }
        }
    }

    struct ScriptedSearch {
        results: Vec<String>,
        calls: AtomicUsize,
    }

    impl ScriptedSearch {
        fn returning(results: Vec<&str>) -> Arc<Self> {
            Arc::new(Self {
                results: results.into_iter().map(String::from).collect(),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ImageSearchPort for ScriptedSearch {
        async fn search_gifs(&self, _title: &NormalizedTitle) -> Result<Vec<String>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.results.clone())
        }
    }

    fn stored_exercise(title: &str, gifs: Vec<&str>) -> Exercise {
        Exercise::from_new(
            ExerciseID::new(),
            NewExercise {
                title: title.to_string(),
                gif_url: gifs.first().map(|s| s.to_string()).unwrap_or_default(),
                searched_gifs: gifs.into_iter().map(String::from).collect(),
                ..NewExercise::default()
            },
        )
    }

    #[tokio::test]
    async fn stored_record_with_images_short_circuits() {
        let repo = InMemoryExercises::with(vec![stored_exercise(
            "Bench Press",
            vec!["https://a.test/1.gif"],
        )]);
        let search = ScriptedSearch::returning(vec!["https://a.test/other.gif"]);
        let service = EnrichmentService::new(repo.clone(), search.clone());

        let title = NormalizedTitle::new("bench press").unwrap();
        let enriched = service.find_or_enrich(&title).await.unwrap();

        assert_eq!(enriched.source, EnrichmentSource::Db);
        assert_eq!(enriched.exercise.searched_gifs, vec!["https://a.test/1.gif"]);
        assert_eq!(search.calls(), 0, "no outbound call on a warm cache hit");
    }

    #[tokio::test]
    async fn stored_record_without_images_is_backfilled() {
        let repo = InMemoryExercises::with(vec![stored_exercise("Bench Press", vec![])]);
        let search =
            ScriptedSearch::returning(vec!["https://a.test/1.gif", "https://a.test/2.gif"]);
        let service = EnrichmentService::new(repo.clone(), search.clone());

        let title = NormalizedTitle::new("Bench Press").unwrap();
        let enriched = service.find_or_enrich(&title).await.unwrap();

        assert_eq!(enriched.source, EnrichmentSource::GoogleUpdate);
        assert_eq!(enriched.exercise.gif_url, "https://a.test/1.gif");
        assert_eq!(enriched.exercise.searched_gifs.len(), 2);

        let stored = repo.snapshot();
        assert_eq!(stored[0].gif_url, "https://a.test/1.gif");
        assert_eq!(stored[0].searched_gifs.len(), 2);
    }

    #[tokio::test]
    async fn miss_with_results_creates_a_record() {
        let repo = InMemoryExercises::with(vec![]);
        let search = ScriptedSearch::returning(vec!["https://a.test/1.gif"]);
        let service = EnrichmentService::new(repo.clone(), search.clone());

        let title = NormalizedTitle::new("goblet squat").unwrap();
        let enriched = service.find_or_enrich(&title).await.unwrap();

        assert_eq!(enriched.source, EnrichmentSource::GoogleInsert);
        assert_eq!(enriched.exercise.title, "Goblet Squat");
        assert!(enriched.exercise.description.is_empty());

        let stored = repo.snapshot();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, enriched.exercise.id);
    }

    #[tokio::test]
    async fn empty_search_result_never_creates_or_mutates() {
        let repo = InMemoryExercises::with(vec![stored_exercise("Bench Press", vec![])]);
        let search = ScriptedSearch::returning(vec![]);
        let service = EnrichmentService::new(repo.clone(), search.clone());

        let hit = NormalizedTitle::new("bench press").unwrap();
        let err = service.find_or_enrich(&hit).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));

        let miss = NormalizedTitle::new("nonexistent move").unwrap();
        let err = service.find_or_enrich(&miss).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));

        let stored = repo.snapshot();
        assert_eq!(stored.len(), 1, "no record created on an empty result");
        assert!(stored[0].searched_gifs.is_empty(), "no record mutated");
    }
}
