//! Run statistics
//!
//! Persisted to LocalStorage, tracks attempts and the best distance reached.

use serde::{Deserialize, Serialize};

use crate::sim::Outcome;

/// Aggregate results across runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunRecords {
    /// Runs that ended (collision or finish)
    pub attempts: u32,
    pub collisions: u32,
    pub finishes: u32,
    /// Furthest distance reached in any run
    pub best_distance: f32,
    /// Collisions per obstacle index
    #[serde(default)]
    pub hits_by_obstacle: Vec<u32>,
}

impl RunRecords {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "lane_runner_records";

    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one run result in. Returns true if it set a new best distance.
    pub fn record(&mut self, outcome: &Outcome) -> bool {
        self.attempts += 1;
        match *outcome {
            Outcome::Collision { obstacle_index, .. } => {
                self.collisions += 1;
                if self.hits_by_obstacle.len() <= obstacle_index {
                    self.hits_by_obstacle.resize(obstacle_index + 1, 0);
                }
                self.hits_by_obstacle[obstacle_index] += 1;
            }
            Outcome::Finished { .. } => self.finishes += 1,
        }

        let distance = outcome.distance();
        if distance > self.best_distance {
            self.best_distance = distance;
            true
        } else {
            false
        }
    }

    /// Obstacle responsible for the most collisions (lowest index on ties)
    pub fn deadliest_obstacle(&self) -> Option<usize> {
        self.hits_by_obstacle
            .iter()
            .enumerate()
            .filter(|(_, hits)| **hits > 0)
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))
            .map(|(i, _)| i)
    }

    /// Fraction of attempts that reached the finish
    pub fn finish_rate(&self) -> f32 {
        if self.attempts == 0 {
            0.0
        } else {
            self.finishes as f32 / self.attempts as f32
        }
    }

    pub fn is_empty(&self) -> bool {
        self.attempts == 0
    }

    /// Load records from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(records) = serde_json::from_str::<RunRecords>(&json) {
                    log::info!("Loaded records ({} attempts)", records.attempts);
                    return records;
                }
            }
        }

        log::info!("No records found, starting fresh");
        Self::new()
    }

    /// Save records to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Records saved (best {:.1})", self.best_distance);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
