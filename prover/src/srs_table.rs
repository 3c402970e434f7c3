//! Precomputed SRS sub-tables for the amortized multi-proof.
//!
//! For parameters `(num_chunks, chunk_length)` the table has one row per
//! residue class `j < chunk_length`. Row `j` is the G1 FFT (of size
//! `2 * num_chunks`) of the SRS points `[tau^(m - l - j - i*l)]_1`,
//! `i = 0, 1, ...`, padded with the identity, where `m = num_evaluations - 1`
//! and `l = chunk_length`.

use std::{
    fs,
    io::{BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
    time::Instant,
};

use ark_bn254::{G1Affine, G1Projective};
use ark_ec::{AffineRepr, CurveGroup};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use rayon::prelude::*;
use rust_da_kzg_primitives::{
    consts::{SIZE_OF_G1_AFFINE_UNCOMPRESSED, SRS_TABLE_COSET_PREFIX, SRS_TABLE_DIM_PREFIX},
    errors::{KzgError, SrsError},
    fft::FFTSettings,
    helpers::{g1_point_to_bytes_be, is_power_of_two},
    params::EncodingParams,
    traits::ReadPointFromBytes,
};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct SrsTable<'a> {
    cache_dir: Option<PathBuf>,
    s1: &'a [G1Affine],
}

impl<'a> SrsTable<'a> {
    pub fn new(cache_dir: Option<&Path>, s1: &'a [G1Affine]) -> Self {
        Self {
            cache_dir: cache_dir.map(Path::to_path_buf),
            s1,
        }
    }

    /// Returns `chunk_length` rows of `2 * num_chunks` points, from the cache
    /// directory when a table for these dimensions was stored there before.
    pub fn get_sub_tables(
        &self,
        num_chunks: u64,
        chunk_length: u64,
    ) -> Result<Vec<Vec<G1Affine>>, KzgError> {
        let params = EncodingParams::new(chunk_length, num_chunks);
        params.validate()?;

        let cache_path = self
            .cache_dir
            .as_ref()
            .map(|dir| dir.join(table_file_name(num_chunks, chunk_length)));

        if let Some(path) = cache_path.as_ref().filter(|p| p.exists()) {
            let start = Instant::now();
            match read_table(path, chunk_length, 2 * num_chunks) {
                Ok(table) => {
                    info!(
                        num_chunks,
                        chunk_length,
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "loaded srs table from cache"
                    );
                    return Ok(table);
                },
                Err(e) => warn!(
                    path = %path.display(),
                    error = %e,
                    "unreadable srs table cache, recomputing"
                ),
            }
        }

        let start = Instant::now();
        let table = self.precompute_sub_table(num_chunks, chunk_length)?;
        info!(
            num_chunks,
            chunk_length,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "precomputed srs table"
        );

        if let Some(path) = cache_path {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir).map_err(SrsError::from)?;
            }
            write_table(&path, &table)?;
        }
        Ok(table)
    }

    fn precompute_sub_table(
        &self,
        num_chunks: u64,
        chunk_length: u64,
    ) -> Result<Vec<Vec<G1Affine>>, KzgError> {
        let n = num_chunks * chunk_length;
        let l = chunk_length;
        let dim_e = num_chunks as usize;
        // highest power read is tau^(m - l)
        let required = n.saturating_sub(l);
        if (self.s1.len() as u64) < required {
            return Err(KzgError::InsufficientSrs {
                requested: required,
                loaded: self.s1.len() as u64,
            });
        }

        let m = n - 1;
        let fft_settings = FFTSettings::with_width(2 * num_chunks)?;

        (0..l)
            .into_par_iter()
            .map(|j| -> Result<Vec<G1Affine>, KzgError> {
                let mut points = vec![G1Projective::default(); 2 * dim_e];
                for (i, point) in points.iter_mut().enumerate().take(dim_e) {
                    let offset = l + j + i as u64 * l;
                    if offset > m {
                        break;
                    }
                    *point = self.s1[(m - offset) as usize].into_group();
                }
                let transformed = fft_settings.fft_g1(&points, false)?;
                Ok(G1Projective::normalize_batch(&transformed))
            })
            .collect()
    }
}

/// `dimE{num_chunks}.coset{chunk_length}`
pub fn table_file_name(num_chunks: u64, chunk_length: u64) -> String {
    format!(
        "{}{}.{}{}",
        SRS_TABLE_DIM_PREFIX, num_chunks, SRS_TABLE_COSET_PREFIX, chunk_length
    )
}

fn parse_table_file_name(name: &str) -> Option<EncodingParams> {
    let (dim, coset) = name.split_once('.')?;
    let num_chunks: u64 = dim.strip_prefix(SRS_TABLE_DIM_PREFIX)?.parse().ok()?;
    let chunk_length: u64 = coset.strip_prefix(SRS_TABLE_COSET_PREFIX)?.parse().ok()?;
    if !is_power_of_two(num_chunks) || !is_power_of_two(chunk_length) {
        return None;
    }
    Some(EncodingParams::new(chunk_length, num_chunks))
}

/// Lists the parameters of every table stored in `dir`. Files that do not
/// follow the naming scheme are skipped.
pub fn get_all_precomputed_srs_map(dir: &Path) -> Result<Vec<EncodingParams>, KzgError> {
    let mut tables = Vec::new();
    for entry in fs::read_dir(dir).map_err(SrsError::from)? {
        let entry = entry.map_err(SrsError::from)?;
        let name = entry.file_name();
        match name.to_str().and_then(parse_table_file_name) {
            Some(params) => tables.push(params),
            None => warn!(file = ?name, "skipping file in srs table directory"),
        }
    }
    tables.sort();
    Ok(tables)
}

// Layout: u32 BE rows || u32 BE cols || rows * cols uncompressed points, row major.
fn write_table(path: &Path, table: &[Vec<G1Affine>]) -> Result<(), KzgError> {
    let cols = table.first().map_or(0, Vec::len);
    let file = fs::File::create(path).map_err(SrsError::from)?;
    let mut writer = BufWriter::new(file);
    writer
        .write_u32::<BigEndian>(table.len() as u32)
        .map_err(SrsError::from)?;
    writer
        .write_u32::<BigEndian>(cols as u32)
        .map_err(SrsError::from)?;
    for row in table {
        for point in row {
            writer
                .write_all(&g1_point_to_bytes_be(point))
                .map_err(SrsError::from)?;
        }
    }
    writer.flush().map_err(SrsError::from)?;
    Ok(())
}

fn read_table(path: &Path, rows: u64, cols: u64) -> Result<Vec<Vec<G1Affine>>, SrsError> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let stored_rows = reader.read_u32::<BigEndian>()? as u64;
    let stored_cols = reader.read_u32::<BigEndian>()? as u64;
    if stored_rows != rows || stored_cols != cols {
        return Err(SrsError::InvalidRange(format!(
            "table is {}x{}, expected {}x{}",
            stored_rows, stored_cols, rows, cols
        )));
    }

    let row_bytes = cols as usize * SIZE_OF_G1_AFFINE_UNCOMPRESSED;
    let mut buf = vec![0u8; rows as usize * row_bytes];
    reader.read_exact(&mut buf)?;
    let mut rest = Vec::new();
    if reader.read_to_end(&mut rest)? != 0 {
        return Err(SrsError::InvalidRange(format!(
            "{} trailing bytes after table",
            rest.len()
        )));
    }

    buf.par_chunks(row_bytes)
        .enumerate()
        .map(|(row, bytes)| {
            bytes
                .chunks_exact(SIZE_OF_G1_AFFINE_UNCOMPRESSED)
                .enumerate()
                .map(|(col, raw)| {
                    G1Affine::read_point_from_bytes_be(raw).map_err(|e| SrsError::InvalidPoint {
                        index: row as u64 * cols + col as u64,
                        reason: e.to_string(),
                    })
                })
                .collect::<Result<Vec<G1Affine>, SrsError>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_round_trip() {
        let name = table_file_name(16, 4);
        assert_eq!(name, "dimE16.coset4");
        assert_eq!(
            parse_table_file_name(&name),
            Some(EncodingParams::new(4, 16))
        );
        assert_eq!(parse_table_file_name("dimE16.coset3"), None);
        assert_eq!(parse_table_file_name("README"), None);
        assert_eq!(parse_table_file_name("dimEx.coset4"), None);
    }
}
