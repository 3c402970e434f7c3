#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ark_bn254::{Fr, G1Affine};
    use ark_ec::AffineRepr;
    use ark_std::One;
    use lazy_static::lazy_static;
    use rust_da_kzg_primitives::{
        config::KzgConfig,
        errors::{KzgError, ParamsError, RsError},
        frame::{BlobCommitments, Frame},
        helpers::pad_payload,
        params::EncodingParams,
        srs::SRS,
        testing::{srs_from_secret, write_srs_files},
    };
    use rust_da_kzg_prover::prover::Prover;
    use rust_da_kzg_verifier::verify::{verify_frame_impl, Verifier};

    const ORDER: u64 = 256;

    const GETTYSBURG_ADDRESS_BYTES: &[u8] = "Fourscore and seven years ago our fathers brought forth, on this continent, a new nation, conceived in liberty, and dedicated to the proposition that all men are created equal. Now we are engaged in a great civil war, testing whether that nation, or any nation so conceived, and so dedicated, can long endure. We are met on a great battle-field of that war. We have come to dedicate a portion of that field, as a final resting-place for those who here gave their lives, that that nation might live. It is altogether fitting and proper that we should do this. But, in a larger sense, we cannot dedicate, we cannot consecrate, we cannot hallow, this ground. The brave men, living and dead, who struggled here, have consecrated it far above our poor power to add or detract. The world will little note, nor long remember what we say here, but it can never forget what they did here. It is for us the living, rather, to be dedicated here to the unfinished work which they who fought here have thus far so nobly advanced. It is rather for us to be here dedicated to the great task remaining before us, that from these honored dead we take increased devotion to that cause for which they here gave the last full measure of devotion, that we here highly resolve that these dead shall not have died in vain, that this nation, under God, shall have a new birth of freedom, and that government of the people, by the people, for the people, shall not perish from the earth. Abraham Lincoln, 1863....".as_bytes();

    fn tau() -> Fr {
        Fr::from(0x1234_5678u64)
    }

    lazy_static! {
        static ref SRS_INSTANCE: Arc<SRS> = Arc::new(srs_from_secret(tau(), 256, 256, ORDER));
        static ref PROVER: Prover = Prover::from_srs(
            KzgConfig::new("unused", ORDER, ORDER).with_num_worker(2),
            SRS_INSTANCE.clone()
        )
        .unwrap();
        static ref VERIFIER: Verifier = Verifier::from_srs(SRS_INSTANCE.clone());
        static ref ENCODED: (EncodingParams, BlobCommitments, Vec<Frame>) = {
            let padded = pad_payload(GETTYSBURG_ADDRESS_BYTES);
            let params = EncodingParams::from_sys_par(2, 2, padded.len() as u64);
            let (commitments, frames, _) = PROVER.encode_and_prove(&padded, params).unwrap();
            (params, commitments, frames)
        };
    }

    fn all_indices(n: usize) -> Vec<u32> {
        (0..n as u32).collect()
    }

    #[test]
    fn test_encoded_frames_verify() {
        let (params, commitments, frames) = &*ENCODED;
        VERIFIER
            .verify_frames(frames, &all_indices(frames.len()), commitments, *params)
            .unwrap();
        for (i, frame) in frames.iter().enumerate() {
            assert!(verify_frame_impl(
                &commitments.commitment,
                frame,
                i as u64,
                *params,
                &SRS_INSTANCE
            )
            .unwrap());
        }
    }

    #[test]
    fn test_tampered_frames_fail() {
        let (params, commitments, frames) = &*ENCODED;

        let mut tampered = frames.clone();
        tampered[2].coeffs[5] += Fr::one();
        assert_eq!(
            VERIFIER.verify_frames(&tampered, &all_indices(4), commitments, *params),
            Err(KzgError::ProofInvalid(
                "frame 2 failed verification".to_string()
            ))
        );

        let mut swapped = frames[1].clone();
        swapped.proof = frames[0].proof;
        assert!(!verify_frame_impl(&commitments.commitment, &swapped, 1, *params, &SRS_INSTANCE)
            .unwrap());

        // right frame, wrong position
        assert!(
            !verify_frame_impl(&commitments.commitment, &frames[1], 2, *params, &SRS_INSTANCE)
                .unwrap()
        );

        let other = G1Affine::generator();
        assert!(!verify_frame_impl(&other, &frames[0], 0, *params, &SRS_INSTANCE).unwrap());
    }

    #[test]
    fn test_frame_input_errors() {
        let (params, commitments, frames) = &*ENCODED;
        let short = Frame::new(frames[0].proof, frames[0].coeffs[..16].to_vec());
        assert_eq!(
            verify_frame_impl(&commitments.commitment, &short, 0, *params, &SRS_INSTANCE),
            Err(KzgError::RsError(RsError::InvalidFrameLength {
                expected: 32,
                actual: 16
            }))
        );
        assert!(matches!(
            verify_frame_impl(&commitments.commitment, &frames[0], 4, *params, &SRS_INSTANCE),
            Err(KzgError::ParamsError(ParamsError::InvalidChunkIndex { .. }))
        ));
        assert!(matches!(
            VERIFIER.verify_frames(frames, &[0, 1], commitments, *params),
            Err(KzgError::RsError(RsError::MismatchedInputs { .. }))
        ));
    }

    #[test]
    fn test_verify_with_power_of_2_table_only() {
        // [tau^32]_2 is only available from the power of 2 table
        let srs = Arc::new(srs_from_secret(tau(), 32, 1, ORDER));
        assert_eq!(srs.g2.len(), 1);
        let verifier = Verifier::from_srs(srs);
        let (params, commitments, frames) = &*ENCODED;
        verifier
            .verify_frames(frames, &all_indices(4), commitments, *params)
            .unwrap();
    }

    #[test]
    fn test_length_proof() {
        let (_, commitments, _) = &*ENCODED;
        assert_eq!(commitments.length, 48);
        assert!(VERIFIER.verify_blob_length(commitments).unwrap());
        assert!(!VERIFIER
            .verify_length_proof(&commitments.length_commitment, &commitments.length_proof, 64)
            .unwrap());
        assert!(matches!(
            VERIFIER.verify_length_proof(
                &commitments.length_commitment,
                &commitments.length_proof,
                0
            ),
            Err(KzgError::InconsistentParameters(_))
        ));
        assert!(matches!(
            VERIFIER.verify_length_proof(
                &commitments.length_commitment,
                &commitments.length_proof,
                ORDER + 1
            ),
            Err(KzgError::InconsistentParameters(_))
        ));

        let padded_length = PROVER
            .get_commitments_for_padded_length(&pad_payload(GETTYSBURG_ADDRESS_BYTES))
            .unwrap();
        assert!(VERIFIER.verify_blob_length(&padded_length).unwrap());
    }

    #[test]
    fn test_length_proof_reads_shifted_point_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_srs_files(dir.path(), tau(), 128, 16, 16).unwrap();
        let verifier = Verifier::new(&config).unwrap();
        assert_eq!(verifier.srs().g1.len(), 16);

        let prover = Prover::from_srs(
            KzgConfig::new("unused", 128, 128).with_num_worker(1),
            Arc::new(srs_from_secret(tau(), 128, 128, 128)),
        )
        .unwrap();
        let commitments = prover
            .get_commitments_for_padded_length(&pad_payload(b"a short blob of data"))
            .unwrap();
        assert_eq!(commitments.length, 1);
        assert!(verifier.verify_blob_length(&commitments).unwrap());

        let in_memory_only = Verifier::from_srs(Arc::new(srs_from_secret(tau(), 16, 16, 128)));
        assert!(matches!(
            in_memory_only.verify_blob_length(&commitments),
            Err(KzgError::InsufficientSrs { .. })
        ));
    }

    #[test]
    fn test_commit_equivalence() {
        let (_, commitments, _) = &*ENCODED;
        assert!(VERIFIER
            .verify_commit_equivalence(&commitments.commitment, &commitments.length_commitment)
            .unwrap());

        let other = PROVER
            .get_commitments_for_padded_length(&pad_payload(b"some other blob"))
            .unwrap();
        assert!(!VERIFIER
            .verify_commit_equivalence(&commitments.commitment, &other.length_commitment)
            .unwrap());

        assert!(VERIFIER
            .verify_commit_equivalence_batch(&[*commitments, other])
            .unwrap());
        let mut mixed = other;
        mixed.commitment = commitments.commitment;
        assert!(!VERIFIER
            .verify_commit_equivalence_batch(&[*commitments, mixed])
            .unwrap());
        assert_eq!(
            VERIFIER.verify_commit_equivalence_batch(&[]),
            Err(KzgError::EmptyBatch)
        );
    }
}
