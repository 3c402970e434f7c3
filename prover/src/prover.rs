use std::{
    collections::HashMap,
    sync::{Arc, Mutex, RwLock},
    time::Instant,
};

use ark_bn254::{Fr, G1Affine};
use rayon::{ThreadPool, ThreadPoolBuilder};
use rust_da_kzg_primitives::{
    config::KzgConfig,
    errors::KzgError,
    frame::{BlobCommitments, Frame},
    helpers::{next_power_of_two, to_fr_array},
    params::EncodingParams,
    srs::SRS,
};
use tracing::{debug, info};

use crate::{
    kzg::KZG,
    multiproof::ParametrizedProver,
    srs_table::{get_all_precomputed_srs_map, SrsTable},
};

/// Entry point of the encoding side. Owns the SRS, a thread pool sized by
/// `num_worker`, and one [ParametrizedProver] per encoding params seen so far.
#[derive(Debug)]
pub struct Prover {
    config: KzgConfig,
    srs: Arc<SRS>,
    kzg: KZG,
    pool: Arc<ThreadPool>,
    encoders: RwLock<HashMap<EncodingParams, Arc<ParametrizedProver>>>,
    // Held while building a missing encoder so that only one thread does it.
    build_lock: Mutex<()>,
}

impl Prover {
    /// Loads the SRS described by `config` and, with `preload_encoder`,
    /// builds an encoder for every table found in the cache directory.
    pub fn new(config: KzgConfig) -> Result<Self, KzgError> {
        let srs = SRS::new(&config)?;
        Self::from_srs(config, Arc::new(srs))
    }

    /// Same as [Prover::new] with an SRS that is already loaded.
    pub fn from_srs(config: KzgConfig, srs: Arc<SRS>) -> Result<Self, KzgError> {
        if config.num_worker == 0 {
            return Err(KzgError::ConfigError(
                "num_worker must be at least 1".to_string(),
            ));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.num_worker)
            .thread_name(|i| format!("kzg-prover-{}", i))
            .build()
            .map_err(|e| KzgError::ConfigError(e.to_string()))?;

        let prover = Self {
            kzg: KZG::new(srs.clone()),
            srs,
            pool: Arc::new(pool),
            encoders: RwLock::new(HashMap::new()),
            build_lock: Mutex::new(()),
            config,
        };
        info!(
            g1_points = prover.srs.g1.len(),
            srs_order = prover.srs.order,
            num_worker = prover.config.num_worker,
            "created prover"
        );

        if prover.config.preload_encoder {
            prover.preload_all_encoders()?;
        }
        Ok(prover)
    }

    pub fn srs(&self) -> &SRS {
        &self.srs
    }

    pub fn srs_order(&self) -> u64 {
        self.srs.order
    }

    pub fn kzg(&self) -> &KZG {
        &self.kzg
    }

    /// Builds an encoder for every table stored in the cache directory.
    /// Returns the params that were loaded.
    pub fn preload_all_encoders(&self) -> Result<Vec<EncodingParams>, KzgError> {
        let dir = self.config.cache_dir.as_ref().ok_or_else(|| {
            KzgError::ConfigError("preloading encoders needs a cache_dir".to_string())
        })?;
        let start = Instant::now();
        let params = get_all_precomputed_srs_map(dir)?;
        info!(tables = params.len(), "detected precomputed srs tables");
        for p in &params {
            self.get_kzg_encoder(*p)?;
        }
        info!(
            tables = params.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "preloaded encoders"
        );
        Ok(params)
    }

    /// The cached [ParametrizedProver] for `params`, building it on first use.
    pub fn get_kzg_encoder(
        &self,
        params: EncodingParams,
    ) -> Result<Arc<ParametrizedProver>, KzgError> {
        params.validate_against_srs(self.srs.order)?;

        if let Some(enc) = self.read_encoders()?.get(&params) {
            return Ok(enc.clone());
        }

        let _guard = self
            .build_lock
            .lock()
            .map_err(|_| KzgError::GenericError("encoder build lock poisoned".to_string()))?;
        // Another thread may have built it while we waited for the lock.
        if let Some(enc) = self.read_encoders()?.get(&params) {
            return Ok(enc.clone());
        }

        let start = Instant::now();
        let table = SrsTable::new(self.config.cache_dir.as_deref(), &self.srs.g1);
        let enc = Arc::new(ParametrizedProver::new(
            params,
            self.kzg.clone(),
            &table,
            self.pool.clone(),
            self.config.verbose,
        )?);
        info!(
            %params,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "built encoder"
        );

        self.encoders
            .write()
            .map_err(|_| KzgError::GenericError("encoder cache poisoned".to_string()))?
            .insert(params, enc.clone());
        Ok(enc)
    }

    fn read_encoders(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<EncodingParams, Arc<ParametrizedProver>>>, KzgError>
    {
        self.encoders
            .read()
            .map_err(|_| KzgError::GenericError("encoder cache poisoned".to_string()))
    }

    /// Encodes `data` into frames with proofs, and computes the blob
    /// commitments.
    pub fn encode_and_prove(
        &self,
        data: &[u8],
        params: EncodingParams,
    ) -> Result<(BlobCommitments, Vec<Frame>, Vec<u32>), KzgError> {
        let coeffs = self.symbols_for(data, params)?;
        let enc = self.get_kzg_encoder(params)?;
        enc.encode(&coeffs)
    }

    /// Frames with proofs, without the commitments.
    pub fn get_frames(
        &self,
        data: &[u8],
        params: EncodingParams,
    ) -> Result<(Vec<Frame>, Vec<u32>), KzgError> {
        let coeffs = self.symbols_for(data, params)?;
        let enc = self.get_kzg_encoder(params)?;
        enc.get_frames(&coeffs)
    }

    /// Proofs in natural coset order, see
    /// [ParametrizedProver::compute_multi_frame_proofs].
    pub fn get_multi_frame_proofs(
        &self,
        data: &[u8],
        params: EncodingParams,
    ) -> Result<Vec<G1Affine>, KzgError> {
        let coeffs = self.symbols_for(data, params)?;
        let enc = self.get_kzg_encoder(params)?;
        enc.compute_multi_frame_proofs(&coeffs)
    }

    /// Commitments to `data` where the length is rounded up to the next power
    /// of two.
    pub fn get_commitments_for_padded_length(
        &self,
        data: &[u8],
    ) -> Result<BlobCommitments, KzgError> {
        let coeffs = to_fr_array(data)?;
        let length = next_power_of_two(coeffs.len() as u64);
        self.pool
            .install(|| self.kzg.get_commitments(&coeffs, length))
    }

    /// Recovers the original bytes from frames. `indices[k]` is the chunk
    /// index of `frames[k]`, its position in the list returned on encode.
    pub fn decode(
        &self,
        frames: &[Frame],
        indices: &[u32],
        params: EncodingParams,
        max_input_size: u64,
    ) -> Result<Vec<u8>, KzgError> {
        let enc = self.get_kzg_encoder(params)?;
        let indices: Vec<u64> = indices.iter().map(|i| *i as u64).collect();
        let start = Instant::now();
        let data = self
            .pool
            .install(|| enc.encoder().decode(frames, &indices, max_input_size))?;
        debug!(
            frames = frames.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "decoded frames"
        );
        Ok(data)
    }

    fn symbols_for(&self, data: &[u8], params: EncodingParams) -> Result<Vec<Fr>, KzgError> {
        let coeffs = to_fr_array(data)?;
        params.validate_blob_length(coeffs.len() as u64)?;
        Ok(coeffs)
    }
}
