#[cfg(test)]
mod tests {
    use rust_da_kzg_primitives::{
        errors::ParamsError,
        params::{get_leading_coset_index, get_num_sys, EncodingParams},
    };

    #[test]
    fn test_from_sys_par() {
        let params = EncodingParams::from_sys_par(2, 2, 1536);
        assert_eq!(params, EncodingParams::new(32, 4));

        // 3 + 5 nodes round up to 8, 100 symbols over 3 round up to 64
        let params = EncodingParams::from_sys_par(3, 5, 3200);
        assert_eq!(params, EncodingParams::new(64, 8));

        assert_eq!(
            EncodingParams::from_mins(5, 9),
            EncodingParams::new(8, 16)
        );
    }

    #[test]
    fn test_validate() {
        assert!(EncodingParams::new(4, 4).validate().is_ok());
        assert!(matches!(
            EncodingParams::new(3, 8).validate(),
            Err(ParamsError::NotPowerOfTwo { .. })
        ));
        assert!(matches!(
            EncodingParams::new(0, 8).validate(),
            Err(ParamsError::ZeroDimension { .. })
        ));
        assert!(matches!(
            EncodingParams::new(1 << 40, 1 << 40).validate(),
            Err(ParamsError::Overflow { .. })
        ));
    }

    #[test]
    fn test_validate_against_srs() {
        assert_eq!(
            EncodingParams::new(4, 4).validate_against_srs(8),
            Err(ParamsError::ExceedsSrsOrder {
                num_evaluations: 16,
                srs_order: 8
            })
        );
        assert!(EncodingParams::new(4, 4).validate_against_srs(16).is_ok());
    }

    #[test]
    fn test_validate_blob_length() {
        let params = EncodingParams::new(4, 4);
        assert!(params.validate_blob_length(16).is_ok());
        assert!(matches!(
            params.validate_blob_length(17),
            Err(ParamsError::BlobTooLarge { .. })
        ));
    }

    #[test]
    fn test_num_sys() {
        assert_eq!(get_num_sys(1536, 32), 2);
        assert_eq!(get_num_sys(1537, 32), 2);
        assert_eq!(get_num_sys(2049, 32), 3);
        assert_eq!(get_num_sys(0, 32), 0);
    }

    #[test]
    fn test_leading_coset_index() {
        let indices: Vec<u64> = (0..8)
            .map(|i| get_leading_coset_index(i, 8).unwrap())
            .collect();
        assert_eq!(indices, vec![0, 4, 2, 6, 1, 5, 3, 7]);
        assert_eq!(get_leading_coset_index(0, 1).unwrap(), 0);
        assert!(get_leading_coset_index(8, 8).is_err());
        assert!(get_leading_coset_index(0, 6).is_err());
    }

    #[test]
    fn test_display_and_serde() {
        let params = EncodingParams::new(32, 4);
        assert_eq!(params.to_string(), "chunk_length: 32, num_chunks: 4");
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(
            serde_json::from_str::<EncodingParams>(&json).unwrap(),
            params
        );
    }
}
