#[cfg(test)]
mod tests {
    use ark_bn254::Fr;
    use ark_std::{One, Zero};
    use rust_da_kzg_primitives::{
        blob::Blob,
        consts::BYTES_PER_FIELD_ELEMENT,
        fft::FFTSettings,
        polynomial::PolynomialCoeffForm,
    };

    const GETTYSBURG_ADDRESS_BYTES: &[u8] = "Fourscore and seven years ago our fathers brought forth, on this continent, a new nation, conceived in liberty, and dedicated to the proposition that all men are created equal. Now we are engaged in a great civil war, testing whether that nation, or any nation so conceived, and so dedicated, can long endure. We are met on a great battle-field of that war. We have come to dedicate a portion of that field, as a final resting-place for those who here gave their lives, that that nation might live. It is altogether fitting and proper that we should do this. But, in a larger sense, we cannot dedicate, we cannot consecrate, we cannot hallow, this ground. The brave men, living and dead, who struggled here, have consecrated it far above our poor power to add or detract. The world will little note, nor long remember what we say here, but it can never forget what they did here. It is for us the living, rather, to be dedicated here to the unfinished work which they who fought here have thus far so nobly advanced. It is rather for us to be here dedicated to the great task remaining before us, that from these honored dead we take increased devotion to that cause for which they here gave the last full measure of devotion, that we here highly resolve that these dead shall not have died in vain, that this nation, under God, shall have a new birth of freedom, and that government of the people, by the people, for the people, shall not perish from the earth. Abraham Lincoln, 1863....".as_bytes();

    #[test]
    fn test_blob_to_coeff_form() {
        let blob = Blob::from_raw_data(GETTYSBURG_ADDRESS_BYTES);
        let poly_coeff = blob.to_polynomial_coeff_form().unwrap();
        assert_eq!(poly_coeff.len(), 64);
        assert_eq!(poly_coeff.len_underlying_blob_field_elements(), 48);
        assert_eq!(poly_coeff.to_bytes_be(), blob.data());
    }

    #[test]
    fn test_polynomial_lengths() {
        let poly = PolynomialCoeffForm::new(vec![Fr::one(); 5]);
        assert_eq!(poly.len(), 8);
        assert_eq!(poly.len_underlying_blob_bytes(), 5 * BYTES_PER_FIELD_ELEMENT);
        assert_eq!(poly.len_underlying_blob_field_elements(), 5);
        assert_eq!(poly.unpadded_coeffs(), &[Fr::one(); 5]);
        assert!(poly.coeffs()[5..].iter().all(Fr::is_zero));

        let poly = PolynomialCoeffForm::new(vec![Fr::one(); 4]);
        assert_eq!(poly.len(), 4, "powers of two are not padded");
    }

    #[test]
    fn test_coeff_form_evaluates_through_fft() {
        let mut coeffs = vec![Fr::zero(); 16];
        coeffs[0] = Fr::from(7u64);
        let poly = PolynomialCoeffForm::new(coeffs);
        let fs = FFTSettings::with_width(poly.len() as u64).unwrap();
        let evals = fs.fft_fr(poly.coeffs(), false).unwrap();
        assert!(evals.iter().all(|e| *e == Fr::from(7u64)));
        assert_eq!(fs.fft_fr(&evals, true).unwrap(), poly.coeffs());
    }

    #[test]
    fn test_is_empty() {
        let poly = PolynomialCoeffForm::new(vec![]);
        // an empty input is still padded to a single zero coefficient
        assert_eq!(poly.len(), 1);
        assert!(!poly.is_empty());
        assert_eq!(poly.len_underlying_blob_bytes(), 0);
        assert!(poly.to_bytes_be().is_empty());
    }
}
