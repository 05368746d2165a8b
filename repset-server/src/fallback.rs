use std::fs;
use std::path::Path;

use tracing::{info, warn};

use repset_model::Routine;

/// Static routine dataset served by `GET /routines` when the store was
/// unreachable at startup.
///
/// Loaded once during boot and read-only afterwards; the active flag never
/// flips at runtime. Every other endpoint keeps talking to the (lazy) pool
/// and surfaces store errors per-request.
#[derive(Debug, Default)]
pub struct FallbackRoutines {
    routines: Vec<Routine>,
    active: bool,
}

impl FallbackRoutines {
    /// The store answered at startup; the fallback never serves.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Arm the fallback from a JSON file. A missing or malformed file arms
    /// it with an empty dataset rather than failing the boot.
    pub fn load(path: &Path) -> Self {
        let routines = match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<Vec<Routine>>(&contents) {
                Ok(routines) => {
                    info!(
                        path = %path.display(),
                        count = routines.len(),
                        "loaded fallback routines"
                    );
                    routines
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "failed to parse fallback routines file");
                    Vec::new()
                }
            },
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to read fallback routines file");
                Vec::new()
            }
        };

        Self {
            routines,
            active: true,
        }
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn routines(&self) -> &[Routine] {
        &self.routines
    }
}
