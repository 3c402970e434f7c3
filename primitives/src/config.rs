use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{consts::SRS_ORDER, errors::KzgError};

/// Settings shared by the prover and the verifier: where the SRS lives, how
/// much of it to load, and how many workers to use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KzgConfig {
    /// File of G1 points, 64 bytes each.
    pub g1_path: PathBuf,
    /// File of G2 points, 128 bytes each.
    pub g2_path: Option<PathBuf>,
    /// File holding the last points of the G2 SRS. When unset, the trailing
    /// points are read from `g2_path`, which must then hold all `srs_order` points.
    pub g2_trailing_path: Option<PathBuf>,
    /// File of `[tau^(2^i)]_2` for `i = 0, 1, ...`, enough for verification
    /// without a full G2 SRS.
    pub g2_power_of_2_path: Option<PathBuf>,
    /// Directory for precomputed SRS tables.
    pub cache_dir: Option<PathBuf>,
    /// Order of the full SRS (number of points in the trusted setup).
    pub srs_order: u64,
    /// Number of leading points to load; bounds the largest blob.
    pub srs_number_to_load: u64,
    pub num_worker: usize,
    pub load_g2_points: bool,
    /// Build tables for every cached parameter pair at startup.
    pub preload_encoder: bool,
    /// Log per-blob timings at info level instead of debug.
    pub verbose: bool,
}

impl Default for KzgConfig {
    fn default() -> Self {
        Self {
            g1_path: PathBuf::new(),
            g2_path: None,
            g2_trailing_path: None,
            g2_power_of_2_path: None,
            cache_dir: None,
            srs_order: SRS_ORDER,
            srs_number_to_load: 0,
            num_worker: num_cpus::get(),
            load_g2_points: false,
            preload_encoder: false,
            verbose: false,
        }
    }
}

impl KzgConfig {
    pub fn new(g1_path: impl AsRef<Path>, srs_order: u64, srs_number_to_load: u64) -> Self {
        Self {
            g1_path: g1_path.as_ref().to_path_buf(),
            srs_order,
            srs_number_to_load,
            ..Default::default()
        }
    }

    pub fn with_g2_path(mut self, path: impl AsRef<Path>) -> Self {
        self.g2_path = Some(path.as_ref().to_path_buf());
        self.load_g2_points = true;
        self
    }

    pub fn with_g2_trailing_path(mut self, path: impl AsRef<Path>) -> Self {
        self.g2_trailing_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_g2_power_of_2_path(mut self, path: impl AsRef<Path>) -> Self {
        self.g2_power_of_2_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_cache_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cache_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn with_num_worker(mut self, num_worker: usize) -> Self {
        self.num_worker = num_worker;
        self
    }

    pub fn with_preload_encoder(mut self, preload: bool) -> Self {
        self.preload_encoder = preload;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn validate(&self) -> Result<(), KzgError> {
        if self.srs_number_to_load == 0 {
            return Err(KzgError::ConfigError(
                "srs_number_to_load must be greater than 0".to_string(),
            ));
        }
        if self.srs_number_to_load > self.srs_order {
            return Err(KzgError::ConfigError(format!(
                "srs_number_to_load {} exceeds srs_order {}",
                self.srs_number_to_load, self.srs_order
            )));
        }
        if self.num_worker == 0 {
            return Err(KzgError::ConfigError(
                "num_worker must be greater than 0".to_string(),
            ));
        }
        if self.load_g2_points && self.g2_path.is_none() {
            return Err(KzgError::ConfigError(
                "g2_path is empty, but load_g2_points is set".to_string(),
            ));
        }
        if self.preload_encoder && self.cache_dir.is_none() {
            return Err(KzgError::ConfigError(
                "preload_encoder requires a cache_dir".to_string(),
            ));
        }
        Ok(())
    }
}
