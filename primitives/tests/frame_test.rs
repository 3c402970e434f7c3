#[cfg(test)]
mod tests {
    use ark_bn254::{Fr, G1Affine, G1Projective};
    use ark_ec::{AffineRepr, CurveGroup, PrimeGroup};
    use ark_ff::UniformRand;
    use rust_da_kzg_primitives::{
        errors::FrameError,
        frame::{decode_frames, encode_frames, Frame},
    };

    fn random_frame(len: usize) -> Frame {
        let mut rng = rand::thread_rng();
        let proof = (G1Projective::generator() * Fr::rand(&mut rng)).into_affine();
        let coeffs = (0..len).map(|_| Fr::rand(&mut rng)).collect();
        Frame::new(proof, coeffs)
    }

    #[test]
    fn test_frame_encoding_layout() {
        let frame = random_frame(4);
        let bytes = frame.encode();
        assert_eq!(bytes.len(), frame.encoded_len());
        assert_eq!(bytes.len(), 64 + 4 + 4 * 32);
        assert_eq!(&bytes[64..68], &[0, 0, 0, 4]);
        assert_eq!(Frame::decode(&bytes).unwrap(), frame);
    }

    #[test]
    fn test_identity_proof_frame() {
        let frame = Frame::new(G1Affine::identity(), vec![Fr::from(9u64)]);
        let decoded = Frame::decode(&frame.encode()).unwrap();
        assert!(decoded.proof.is_zero());
        assert_eq!(decoded.coeffs, vec![Fr::from(9u64)]);
        assert_eq!(Frame::default().length(), 0);
    }

    #[test]
    fn test_frame_list_mixed_lengths() {
        let frames = vec![random_frame(2), random_frame(8), random_frame(0)];
        let bytes = encode_frames(&frames);
        assert_eq!(decode_frames(&bytes).unwrap(), frames);
        assert!(decode_frames(&encode_frames(&[])).unwrap().is_empty());
    }

    #[test]
    fn test_truncated_and_trailing() {
        let frame = random_frame(3);
        let bytes = frame.encode();

        assert!(matches!(
            Frame::decode(&bytes[..10]),
            Err(FrameError::Truncated { .. })
        ));
        assert!(matches!(
            Frame::decode(&bytes[..bytes.len() - 1]),
            Err(FrameError::Truncated { .. })
        ));

        let mut extra = bytes.clone();
        extra.push(0);
        assert_eq!(Frame::decode(&extra), Err(FrameError::TrailingBytes(1)));

        let mut list = encode_frames(&[frame]);
        list[3] = 2;
        assert!(decode_frames(&list).is_err());
    }

    #[test]
    fn test_non_canonical_coefficient() {
        let frame = random_frame(2);
        let mut bytes = frame.encode();
        // second coefficient becomes 2^256 - 1
        let start = 64 + 4 + 32;
        bytes[start..start + 32].copy_from_slice(&[0xff; 32]);
        assert_eq!(
            Frame::decode(&bytes),
            Err(FrameError::InvalidFieldElement(1))
        );
    }

    #[test]
    fn test_invalid_proof() {
        let frame = random_frame(1);
        let mut bytes = frame.encode();
        bytes[63] ^= 1;
        assert!(matches!(
            Frame::decode(&bytes),
            Err(FrameError::InvalidPoint(_))
        ));
    }
}
