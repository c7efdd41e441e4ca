//! Configuration parameters for the Artificial Bee Colony search.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration settings for the ABC optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Number of food sources (and of employed and onlooker bees)
    pub num_bees: usize,
    /// Consecutive non-improving trials before a food source is abandoned
    pub limit: u32,
    /// Number of generations to run
    pub max_iter: usize,
    /// Optional seed for the random number generator
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            num_bees: 30,
            limit: 20,
            max_iter: 200,
            seed: None,
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Config::default()
    }

    /// Set the number of bees (food sources).
    pub fn with_num_bees(mut self, num_bees: usize) -> Self {
        self.num_bees = num_bees;
        self
    }

    /// Set the abandonment limit.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Set the number of generations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that the parameters describe a runnable search.
    pub fn validate(&self) -> Result<()> {
        if self.num_bees == 0 {
            return Err(Error::InvalidConfig(
                "num_bees must be at least 1".to_string(),
            ));
        }
        if self.limit == 0 {
            return Err(Error::InvalidConfig("limit must be at least 1".to_string()));
        }
        Ok(())
    }
}
