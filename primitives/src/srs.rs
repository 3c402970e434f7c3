use std::{
    fs::File,
    io::{BufReader, Read, Seek, SeekFrom},
    path::Path,
    time::Instant,
};

use ark_bn254::{G1Affine, G2Affine};
use ark_ec::AffineRepr;
use crossbeam_channel::unbounded;
use tracing::{debug, info};

use crate::{
    config::KzgConfig,
    errors::{KzgError, SrsError},
    traits::ReadPointFromBytes,
};

/// Represents the Structured Reference String (SRS) used in KZG commitments.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct SRS {
    // Points are in monomial form: g1[i] = [tau^i]_1.
    pub g1: Vec<G1Affine>,
    /// Leading G2 points, g2[i] = [tau^i]_2. Empty when G2 was not loaded.
    pub g2: Vec<G2Affine>,
    /// The last `g2_trailing.len()` points of the full G2 SRS, so
    /// g2_trailing[i] = [tau^(order - g2_trailing.len() + i)]_2.
    pub g2_trailing: Vec<G2Affine>,
    /// g2_power_of_2[i] = [tau^(2^i)]_2.
    pub g2_power_of_2: Vec<G2Affine>,
    /// The order of the SRS.
    pub order: u64,
}

impl SRS {
    /// Loads the SRS described by `config`. G1 is always read; the G2 tables
    /// are read when their paths are configured.
    pub fn new(config: &KzgConfig) -> Result<Self, KzgError> {
        config.validate()?;
        let to_load = config.srs_number_to_load;

        let start = Instant::now();
        let g1 = read_g1_points(&config.g1_path, to_load, config.num_worker)?;
        info!(
            points = g1.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "loaded G1 SRS points"
        );

        let mut srs = Self {
            g1,
            order: config.srs_order,
            ..Default::default()
        };

        if config.load_g2_points {
            if let Some(g2_path) = &config.g2_path {
                let start = Instant::now();
                srs.g2 = read_g2_points(g2_path, to_load, config.num_worker)?;
                srs.g2_trailing = match &config.g2_trailing_path {
                    Some(trailing_path) => {
                        let available = number_of_points_in_file::<G2Affine>(trailing_path)?;
                        if available < to_load {
                            return Err(SrsError::InsufficientPoints {
                                requested: to_load,
                                available,
                            }
                            .into());
                        }
                        read_g2_point_section(
                            trailing_path,
                            available - to_load,
                            available,
                            config.num_worker,
                        )?
                    },
                    None => {
                        let available = number_of_points_in_file::<G2Affine>(g2_path)?;
                        if available < config.srs_order {
                            return Err(SrsError::InsufficientPoints {
                                requested: config.srs_order,
                                available,
                            }
                            .into());
                        }
                        read_g2_point_section(
                            g2_path,
                            config.srs_order - to_load,
                            config.srs_order,
                            config.num_worker,
                        )?
                    },
                };
                info!(
                    points = srs.g2.len(),
                    trailing = srs.g2_trailing.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "loaded G2 SRS points"
                );
            }
        }

        if let Some(path) = &config.g2_power_of_2_path {
            let available = number_of_points_in_file::<G2Affine>(path)?;
            srs.g2_power_of_2 = read_g2_points(path, available, config.num_worker)?;
            debug!(points = available, "loaded G2 power of 2 points");
        }

        Ok(srs)
    }

    /// Builds an SRS from points already in memory.
    pub fn from_parts(
        g1: Vec<G1Affine>,
        g2: Vec<G2Affine>,
        g2_trailing: Vec<G2Affine>,
        order: u64,
    ) -> Result<Self, KzgError> {
        if g1.len() as u64 > order || g2.len() as u64 > order || g2_trailing.len() as u64 > order {
            return Err(KzgError::InsufficientSrs {
                requested: g1.len().max(g2.len()).max(g2_trailing.len()) as u64,
                loaded: order,
            });
        }
        Ok(Self {
            g1,
            g2,
            g2_trailing,
            g2_power_of_2: Vec::new(),
            order,
        })
    }

    pub fn with_g2_power_of_2(mut self, points: Vec<G2Affine>) -> Self {
        self.g2_power_of_2 = points;
        self
    }

    pub fn g1_at(&self, index: u64) -> Option<G1Affine> {
        self.g1.get(usize::try_from(index).ok()?).copied()
    }

    /// `[tau^index]_2`, taken from whichever loaded table covers it.
    pub fn g2_at(&self, index: u64) -> Option<G2Affine> {
        if index == 0 {
            return Some(G2Affine::generator());
        }
        if let Some(p) = self.g2.get(usize::try_from(index).ok()?) {
            return Some(*p);
        }
        let trailing_start = self.order.checked_sub(self.g2_trailing.len() as u64)?;
        if index >= trailing_start && index < self.order {
            return self.g2_trailing.get((index - trailing_start) as usize).copied();
        }
        if index.is_power_of_two() {
            return self
                .g2_power_of_2
                .get(index.trailing_zeros() as usize)
                .copied();
        }
        None
    }
}

/// Number of points of type `P` stored in the file at `path`.
pub fn number_of_points_in_file<P: ReadPointFromBytes>(
    path: impl AsRef<Path>,
) -> Result<u64, SrsError> {
    let len = std::fs::metadata(path.as_ref())?.len();
    let width = P::SERIALIZED_SIZE as u64;
    if len % width != 0 {
        return Err(SrsError::InvalidRange(format!(
            "file {} has length {} which is not a multiple of {}",
            path.as_ref().display(),
            len,
            width
        )));
    }
    Ok(len / width)
}

pub fn read_g1_points(
    path: impl AsRef<Path>,
    n: u64,
    num_workers: usize,
) -> Result<Vec<G1Affine>, SrsError> {
    read_point_section::<G1Affine>(path.as_ref(), 0, n, num_workers)
}

pub fn read_g2_points(
    path: impl AsRef<Path>,
    n: u64,
    num_workers: usize,
) -> Result<Vec<G2Affine>, SrsError> {
    read_point_section::<G2Affine>(path.as_ref(), 0, n, num_workers)
}

/// Points `[from, to)` of a G1 file.
pub fn read_g1_point_section(
    path: impl AsRef<Path>,
    from: u64,
    to: u64,
    num_workers: usize,
) -> Result<Vec<G1Affine>, SrsError> {
    read_point_section::<G1Affine>(path.as_ref(), from, to, num_workers)
}

/// Points `[from, to)` of a G2 file.
pub fn read_g2_point_section(
    path: impl AsRef<Path>,
    from: u64,
    to: u64,
    num_workers: usize,
) -> Result<Vec<G2Affine>, SrsError> {
    read_point_section::<G2Affine>(path.as_ref(), from, to, num_workers)
}

/// Reads the single G1 point at `index`, for callers that need one point
/// beyond the loaded prefix.
pub fn read_g1_point(path: impl AsRef<Path>, index: u64) -> Result<G1Affine, SrsError> {
    let points = read_point_section::<G1Affine>(path.as_ref(), index, index + 1, 1)?;
    points
        .into_iter()
        .next()
        .ok_or(SrsError::InsufficientPoints {
            requested: index + 1,
            available: index,
        })
}

// Reads the raw bytes of points [from, to) in one buffered read, then splits
// the parsing across `num_workers` scoped threads. Each worker owns a disjoint
// slice of the output and reports its outcome on the channel.
fn read_point_section<P: ReadPointFromBytes + Send>(
    path: &Path,
    from: u64,
    to: u64,
    num_workers: usize,
) -> Result<Vec<P>, SrsError> {
    if from > to {
        return Err(SrsError::InvalidRange(format!(
            "start {} is after end {}",
            from, to
        )));
    }
    let width = P::SERIALIZED_SIZE;
    let available = number_of_points_in_file::<P>(path)?;
    if to > available {
        return Err(SrsError::InsufficientPoints {
            requested: to,
            available,
        });
    }

    let count = (to - from) as usize;
    if count == 0 {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    reader.seek(SeekFrom::Start(from * width as u64))?;
    let mut buf = vec![0u8; count * width];
    reader.read_exact(&mut buf)?;

    let num_workers = num_workers.clamp(1, count);
    let per_worker = count.div_ceil(num_workers);
    let mut points = vec![P::zero(); count];
    let (sender, receiver) = unbounded::<(usize, Result<(), SrsError>)>();

    std::thread::scope(|s| {
        for (worker, (out, bytes)) in points
            .chunks_mut(per_worker)
            .zip(buf.chunks(per_worker * width))
            .enumerate()
        {
            let sender = sender.clone();
            s.spawn(move || {
                let first = from + (worker * per_worker) as u64;
                let result = out
                    .iter_mut()
                    .zip(bytes.chunks_exact(width))
                    .enumerate()
                    .try_for_each(|(k, (slot, raw))| {
                        *slot = P::read_point_from_bytes_be(raw).map_err(|e| {
                            SrsError::InvalidPoint {
                                index: first + k as u64,
                                reason: e.to_string(),
                            }
                        })?;
                        Ok(())
                    });
                // The receiver outlives the scope, so this cannot fail.
                let _ = sender.send((worker, result));
            });
        }
    });
    drop(sender);

    let mut reports: Vec<(usize, Result<(), SrsError>)> = receiver.iter().collect();
    let spawned = count.div_ceil(per_worker);
    if reports.len() != spawned {
        return Err(SrsError::WorkerFailed(format!(
            "{} of {} workers reported",
            reports.len(),
            spawned
        )));
    }
    reports.sort_by_key(|(worker, _)| *worker);
    for (_, result) in reports {
        result?;
    }
    Ok(points)
}
