#[cfg(test)]
mod tests {
    use ark_bn254::Fr;
    use ark_ec::AffineRepr;
    use ark_ff::UniformRand;
    use rand::Rng;
    use rust_da_kzg_primitives::{
        errors::{KzgError, RsError},
        helpers::{
            pad_payload, remove_empty_byte_from_padded_bytes_unchecked, to_byte_array,
            to_fr_array,
        },
        params::EncodingParams,
        recovery::eval_poly_at,
        rs::Encoder,
    };

    const GETTYSBURG_ADDRESS_BYTES: &[u8] = "Fourscore and seven years ago our fathers brought forth, on this continent, a new nation, conceived in liberty, and dedicated to the proposition that all men are created equal. Now we are engaged in a great civil war, testing whether that nation, or any nation so conceived, and so dedicated, can long endure. We are met on a great battle-field of that war. We have come to dedicate a portion of that field, as a final resting-place for those who here gave their lives, that that nation might live. It is altogether fitting and proper that we should do this. But, in a larger sense, we cannot dedicate, we cannot consecrate, we cannot hallow, this ground. The brave men, living and dead, who struggled here, have consecrated it far above our poor power to add or detract. The world will little note, nor long remember what we say here, but it can never forget what they did here. It is for us the living, rather, to be dedicated here to the unfinished work which they who fought here have thus far so nobly advanced. It is rather for us to be here dedicated to the great task remaining before us, that from these honored dead we take increased devotion to that cause for which they here gave the last full measure of devotion, that we here highly resolve that these dead shall not have died in vain, that this nation, under God, shall have a new birth of freedom, and that government of the people, by the people, for the people, shall not perish from the earth. Abraham Lincoln, 1863....".as_bytes();

    fn encoder() -> (Encoder, Vec<u8>) {
        let padded = pad_payload(GETTYSBURG_ADDRESS_BYTES);
        let params = EncodingParams::from_sys_par(2, 2, padded.len() as u64);
        (Encoder::new(params).unwrap(), padded)
    }

    #[test]
    fn test_params_for_text() {
        let (enc, padded) = encoder();
        assert_eq!(padded.len(), 1536);
        assert_eq!(enc.params(), EncodingParams::new(32, 4));
        assert_eq!(enc.params().num_evaluations(), 128);
    }

    #[test]
    fn test_encode_shape() {
        let (enc, padded) = encoder();
        let (frames, indices) = enc.encode_bytes(&padded).unwrap();
        assert_eq!(frames.len(), 4);
        assert_eq!(indices, vec![0, 2, 1, 3]);
        for frame in &frames {
            assert_eq!(frame.length(), 32);
            assert!(frame.proof.is_zero());
        }
    }

    #[test]
    fn test_frames_interpolate_their_cosets() {
        let (enc, padded) = encoder();
        let coeffs = to_fr_array(&padded).unwrap();
        let (frames, indices) = enc.encode(&coeffs).unwrap();
        let roots = &enc.fft_settings().expanded_roots_of_unity;
        let num_chunks = enc.params().num_chunks as usize;

        for (frame, j) in frames.iter().zip(indices.iter()) {
            for t in 0..frame.length() {
                let x = roots[*j as usize + t * num_chunks];
                assert_eq!(
                    eval_poly_at(&frame.coeffs, &x),
                    eval_poly_at(&coeffs, &x),
                    "coset {} point {}",
                    j,
                    t
                );
            }
        }
    }

    #[test]
    fn test_decode_from_any_two_chunks() {
        let (enc, padded) = encoder();
        let (frames, _) = enc.encode_bytes(&padded).unwrap();
        let max_input_size = padded.len() as u64;

        for a in 0..4usize {
            for b in (a + 1)..4 {
                let subset = vec![frames[a].clone(), frames[b].clone()];
                let decoded = enc
                    .decode(&subset, &[a as u64, b as u64], max_input_size)
                    .unwrap();
                assert_eq!(decoded, padded, "chunks {} and {}", a, b);
                assert_eq!(
                    remove_empty_byte_from_padded_bytes_unchecked(&decoded),
                    GETTYSBURG_ADDRESS_BYTES
                );
            }
        }
    }

    #[test]
    fn test_decode_with_all_chunks_in_any_order() {
        let (enc, padded) = encoder();
        let (frames, _) = enc.encode_bytes(&padded).unwrap();
        let order = [3u64, 1, 0, 2];
        let shuffled: Vec<_> = order.iter().map(|i| frames[*i as usize].clone()).collect();
        let decoded = enc.decode(&shuffled, &order, padded.len() as u64).unwrap();
        assert_eq!(decoded, padded);
    }

    #[test]
    fn test_decode_random_polynomial() {
        let mut rng = rand::thread_rng();
        let enc = Encoder::new(EncodingParams::new(4, 8)).unwrap();
        let coeffs: Vec<Fr> = (0..12).map(|_| Fr::rand(&mut rng)).collect();
        let (frames, _) = enc.encode(&coeffs).unwrap();

        // 12 symbols over chunks of 4 need 3 chunks
        let picked = [7u64, 2, 5];
        let subset: Vec<_> = picked.iter().map(|i| frames[*i as usize].clone()).collect();
        let decoded = enc.decode_to_coeffs(&subset, &picked, 12 * 32).unwrap();
        assert_eq!(&decoded[..12], coeffs.as_slice());
        assert!(decoded[12..].iter().all(|c| *c == Fr::from(0u64)));
    }

    #[test]
    fn test_insufficient_chunks() {
        let (enc, padded) = encoder();
        let (frames, _) = enc.encode_bytes(&padded).unwrap();
        let max_input_size = padded.len() as u64;

        let err = enc
            .decode(&frames[..1], &[0], max_input_size)
            .unwrap_err();
        assert_eq!(
            err,
            RsError::InsufficientChunks {
                required: 2,
                received: 1
            }
        );

        // the same chunk twice only counts once
        let twice = vec![frames[1].clone(), frames[1].clone()];
        assert!(matches!(
            enc.decode(&twice, &[1, 1], max_input_size),
            Err(RsError::InsufficientChunks { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_bad_inputs() {
        let (enc, padded) = encoder();
        let (frames, _) = enc.encode_bytes(&padded).unwrap();
        let max_input_size = padded.len() as u64;

        assert!(matches!(
            enc.decode(&frames[..2], &[0], max_input_size),
            Err(RsError::MismatchedInputs { .. })
        ));

        let mut short = frames[0].clone();
        short.coeffs.pop();
        assert!(matches!(
            enc.decode(&[short, frames[1].clone()], &[0, 1], max_input_size),
            Err(RsError::InvalidFrameLength { .. })
        ));

        assert!(enc
            .decode(&frames[..2], &[0, 9], max_input_size)
            .is_err());
    }

    #[test]
    fn test_encode_bytes_rejects_non_canonical_chunks() {
        let enc = Encoder::new(EncodingParams::new(2, 4)).unwrap();

        // raw text is not padded: 'F' = 0x46 puts the first chunk above the modulus
        let raw = &GETTYSBURG_ADDRESS_BYTES[..64];
        assert!(matches!(
            enc.encode_bytes(raw),
            Err(KzgError::InvalidFieldElement(_))
        ));

        let mut data = pad_payload(&GETTYSBURG_ADDRESS_BYTES[..62]);
        data[32..64].copy_from_slice(&[0xff; 32]);
        assert!(matches!(
            enc.encode_bytes(&data),
            Err(KzgError::InvalidFieldElement(msg)) if msg.contains("position 1")
        ));

        // a short trailing chunk is right-padded with zeroes, so its leading
        // bytes must still fit
        let mut data = pad_payload(&GETTYSBURG_ADDRESS_BYTES[..31]);
        data.extend_from_slice(&[0xff; 5]);
        assert!(matches!(
            enc.encode_bytes(&data),
            Err(KzgError::InvalidFieldElement(_))
        ));
    }

    #[test]
    fn test_unaligned_canonical_bytes_round_trip() {
        let mut rng = rand::thread_rng();
        let enc = Encoder::new(EncodingParams::new(4, 8)).unwrap();

        let symbols: Vec<Fr> = (0..11).map(|_| Fr::rand(&mut rng)).collect();
        let mut data = to_byte_array(&symbols, symbols.len() * 32);
        // partial trailing chunk, leading byte below the top byte of the modulus
        data.push(0x2f);
        data.extend((0..6).map(|_| rng.gen::<u8>()));
        assert_eq!(data.len(), 11 * 32 + 7);

        let (frames, _) = enc.encode_bytes(&data).unwrap();
        // 12 symbols over chunks of 4 need 3 chunks
        let picked = [6u64, 1, 4];
        let subset: Vec<_> = picked.iter().map(|i| frames[*i as usize].clone()).collect();
        let decoded = enc.decode(&subset, &picked, data.len() as u64).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_decode_empty_input() {
        let enc = Encoder::new(EncodingParams::new(4, 8)).unwrap();
        assert_eq!(enc.decode_to_coeffs(&[], &[], 0).unwrap(), Vec::<Fr>::new());
        assert!(enc.decode(&[], &[], 0).unwrap().is_empty());
    }

    #[test]
    fn test_input_too_large() {
        let enc = Encoder::new(EncodingParams::new(2, 2)).unwrap();
        assert!(matches!(
            enc.encode(&[Fr::from(1u64); 5]),
            Err(RsError::InputTooLarge { .. })
        ));
    }

    #[test]
    fn test_invalid_params() {
        assert!(Encoder::new(EncodingParams::new(3, 8)).is_err());
        assert!(Encoder::new(EncodingParams::new(0, 8)).is_err());
    }
}
