//! Builds small structured reference strings from a known secret, and writes
//! them in the on-disk layout read by [crate::srs]. Only for tests and benches.

use std::{fs, io, path::Path};

use ark_bn254::{Fr, G1Affine, G1Projective, G2Affine, G2Projective};
use ark_ec::{CurveGroup, PrimeGroup};
use ark_ff::Field;

use crate::{
    config::KzgConfig,
    helpers::{compute_powers, g1_point_to_bytes_be, g2_point_to_bytes_be},
    srs::SRS,
};

pub const G1_FILE: &str = "g1.point";
pub const G2_FILE: &str = "g2.point";
pub const G2_TRAILING_FILE: &str = "g2.trailing.point";
pub const G2_POWER_OF_2_FILE: &str = "g2.point.powerOf2";

fn g1_powers(powers: &[Fr]) -> Vec<G1Affine> {
    let g = G1Projective::generator();
    let projective: Vec<G1Projective> = powers.iter().map(|p| g * p).collect();
    G1Projective::normalize_batch(&projective)
}

fn g2_powers(powers: &[Fr]) -> Vec<G2Affine> {
    let g = G2Projective::generator();
    let projective: Vec<G2Projective> = powers.iter().map(|p| g * p).collect();
    G2Projective::normalize_batch(&projective)
}

// [tau^(2^i)]_2 for every power of two up to `order`.
fn g2_power_of_2(tau: Fr, order: u64) -> Vec<G2Affine> {
    let mut exps = Vec::new();
    let mut current = tau;
    let mut power = 1u64;
    while power <= order {
        exps.push(current);
        current.square_in_place();
        power <<= 1;
    }
    g2_powers(&exps)
}

/// An SRS of the given `order` with `n_g1` G1 points, `n_g2` leading and
/// trailing G2 points, and the full G2 power of 2 table.
pub fn srs_from_secret(tau: Fr, n_g1: usize, n_g2: usize, order: u64) -> SRS {
    let powers = compute_powers(&tau, order as usize);
    SRS {
        g1: g1_powers(&powers[..n_g1]),
        g2: g2_powers(&powers[..n_g2]),
        g2_trailing: g2_powers(&powers[order as usize - n_g2..]),
        g2_power_of_2: g2_power_of_2(tau, order),
        order,
    }
}

/// Writes the full G1 and G2 tables of an SRS of `order` points, a trailing G2
/// file of `n_trailing` points and the power of 2 table into `dir`. Returns a
/// config loading `to_load` points from them.
pub fn write_srs_files(
    dir: &Path,
    tau: Fr,
    order: u64,
    n_trailing: u64,
    to_load: u64,
) -> io::Result<KzgConfig> {
    let powers = compute_powers(&tau, order as usize);
    let g1 = g1_powers(&powers);
    let g2 = g2_powers(&powers);

    let g1_bytes: Vec<u8> = g1.iter().flat_map(g1_point_to_bytes_be).collect();
    let g2_bytes: Vec<u8> = g2.iter().flat_map(g2_point_to_bytes_be).collect();
    let trailing_bytes: Vec<u8> = g2[(order - n_trailing) as usize..]
        .iter()
        .flat_map(g2_point_to_bytes_be)
        .collect();
    let pow2_bytes: Vec<u8> = g2_power_of_2(tau, order)
        .iter()
        .flat_map(g2_point_to_bytes_be)
        .collect();

    fs::write(dir.join(G1_FILE), g1_bytes)?;
    fs::write(dir.join(G2_FILE), g2_bytes)?;
    fs::write(dir.join(G2_TRAILING_FILE), trailing_bytes)?;
    fs::write(dir.join(G2_POWER_OF_2_FILE), pow2_bytes)?;

    Ok(KzgConfig::new(dir.join(G1_FILE), order, to_load)
        .with_g2_path(dir.join(G2_FILE))
        .with_g2_trailing_path(dir.join(G2_TRAILING_FILE))
        .with_g2_power_of_2_path(dir.join(G2_POWER_OF_2_FILE))
        .with_num_worker(2))
}
