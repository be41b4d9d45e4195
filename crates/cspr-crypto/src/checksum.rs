//! CEP57 checksummed hex encoding.
//!
//! Hex letters are upper- or lower-cased according to the bits of the
//! Blake2b-256 digest of the encoded bytes, so a transcription error in a
//! hand-typed string is very likely to be detected without adding any
//! characters. Inputs longer than [`SMALL_BYTES_COUNT`] are encoded as plain
//! lowercase hex.
//!
//! # Example
//!
//! ```rust
//! use cspr_crypto::checksum::{self, ChecksumStatus};
//!
//! let encoded = checksum::encode(&[0xab; 32]);
//! let (bytes, status) = checksum::decode(&encoded).unwrap();
//! assert_eq!(bytes, vec![0xab; 32]);
//! assert_eq!(status, ChecksumStatus::ValidChecksum);
//! ```

use crate::{blake2b256, CryptoError};

/// Largest input (in bytes) that gets a checksum
pub const SMALL_BYTES_COUNT: usize = 75;

const HEX_CHARS: [char; 22] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'A', 'B', 'C',
    'D', 'E', 'F',
];

/// Outcome of checking a hex string against its CEP57 checksum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumStatus {
    /// Too long to carry a checksum, or single-case input
    NoChecksum,
    /// Letter case matches the checksum
    ValidChecksum,
    /// Mixed-case input whose letter case does not match
    InvalidChecksum,
}

/// Split bytes into nibbles, high nibble first
fn bytes_to_nibbles(input: &[u8]) -> impl Iterator<Item = u8> + '_ {
    input
        .iter()
        .flat_map(|byte| [4u8, 0].into_iter().map(move |offset| (byte >> offset) & 0x0f))
}

/// Cycle through the bits of `bytes`, least significant bit first
fn bytes_to_bits_cycle(bytes: [u8; 32]) -> impl Iterator<Item = bool> {
    bytes
        .into_iter()
        .cycle()
        .flat_map(|byte| (0..8u8).map(move |offset| (byte >> offset) & 0x01 == 0x01))
}

/// Encode bytes as CEP57 checksummed hex
pub fn encode(input: &[u8]) -> String {
    if input.len() > SMALL_BYTES_COUNT {
        return hex::encode(input);
    }

    let mut hash_bits = bytes_to_bits_cycle(*blake2b256(input).as_bytes());
    bytes_to_nibbles(input)
        .map(|mut nibble| {
            // Only letters consume a digest bit.
            if nibble >= 10 && hash_bits.next().unwrap_or(true) {
                nibble += 6;
            }
            HEX_CHARS[nibble as usize]
        })
        .collect()
}

/// Check whether a hex string carries a checksum (contains both upper- and
/// lowercase letters). Fails if any character is not a hex digit.
pub fn has_checksum(input: &str) -> Result<bool, CryptoError> {
    let mut has_upper = false;
    let mut has_lower = false;

    for c in input.chars() {
        match c {
            '0'..='9' => {}
            'a'..='f' => has_lower = true,
            'A'..='F' => has_upper = true,
            _ => {
                return Err(CryptoError::InvalidHex(format!(
                    "invalid character {:?} in {:?}",
                    c, input
                )))
            }
        }
    }

    Ok(has_upper && has_lower)
}

/// Decode hex in any letter case and report its checksum status.
///
/// The bytes are returned whatever the status is; callers decide whether
/// [`ChecksumStatus::InvalidChecksum`] is fatal.
pub fn decode(input: &str) -> Result<(Vec<u8>, ChecksumStatus), CryptoError> {
    let bytes = hex::decode(input).map_err(|e| CryptoError::InvalidHex(e.to_string()))?;

    if bytes.len() > SMALL_BYTES_COUNT || !has_checksum(input)? {
        return Ok((bytes, ChecksumStatus::NoChecksum));
    }

    let status = if encode(&bytes) == input {
        ChecksumStatus::ValidChecksum
    } else {
        ChecksumStatus::InvalidChecksum
    };
    Ok((bytes, status))
}

/// Decode hex, rejecting mixed-case input with a bad checksum
pub fn decode_strict(input: &str) -> Result<Vec<u8>, CryptoError> {
    match decode(input)? {
        (_, ChecksumStatus::InvalidChecksum) => Err(CryptoError::ChecksumMismatch),
        (bytes, _) => Ok(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const VALID: &str = "010c3Fe81B7b862E50C77EF9A958a05BfA98444F26f96f23d37A13c96244cFB7";

    #[test]
    fn test_decode_valid_checksum() {
        let (bytes, status) = decode(VALID).unwrap();
        assert_eq!(status, ChecksumStatus::ValidChecksum);
        assert_eq!(bytes.len(), 32);
        assert_eq!(encode(&bytes), VALID);
    }

    #[test]
    fn test_decode_single_case_has_no_checksum() {
        let (_, status) = decode(&VALID.to_uppercase()).unwrap();
        assert_eq!(status, ChecksumStatus::NoChecksum);

        let (_, status) = decode(&VALID.to_lowercase()).unwrap();
        assert_eq!(status, ChecksumStatus::NoChecksum);
    }

    #[test]
    fn test_decode_invalid_checksum() {
        // Flip the case of the first letter
        let corrupted = VALID.replacen("c3F", "c3f", 1);
        let (bytes, status) = decode(&corrupted).unwrap();
        assert_eq!(status, ChecksumStatus::InvalidChecksum);
        // Bytes are still returned
        assert_eq!(hex::encode(&bytes), VALID.to_lowercase());
    }

    #[test]
    fn test_decode_strict() {
        assert!(decode_strict(VALID).is_ok());
        assert!(decode_strict(&VALID.to_lowercase()).is_ok());
        let corrupted = VALID.replacen("c3F", "c3f", 1);
        assert_eq!(decode_strict(&corrupted), Err(CryptoError::ChecksumMismatch));
    }

    #[test]
    fn test_encode_known_vectors() {
        assert_eq!(
            encode(&[0xab; 32]),
            "aBAbabABaBabaBaBaBABABabaBababABAbabAbaBabAbAbaBAbABababABabABAB"
        );
        // Digits never consume a digest bit
        let input: Vec<u8> = (1..=20).collect();
        assert_eq!(encode(&input), "0102030405060708090A0B0C0d0e0f1011121314");
    }

    #[test]
    fn test_encode_at_size_limit_is_checksummed() {
        let encoded = encode(&[0xfa; SMALL_BYTES_COUNT]);
        assert!(has_checksum(&encoded).unwrap());
        assert!(encoded.starts_with("FAfafaFafafAfaFafaFAFAFaf"));
    }

    #[test]
    fn test_encode_large_input_is_lowercase() {
        let input: Vec<u8> = (0..107u8).map(|i| i.wrapping_mul(37).wrapping_add(0xa0)).collect();
        let encoded = encode(&input);
        assert_eq!(encoded, hex::encode(&input));
        assert_eq!(encoded, encoded.to_lowercase());

        let (bytes, status) = decode(&encoded).unwrap();
        assert_eq!(bytes, input);
        assert_eq!(status, ChecksumStatus::NoChecksum);

        // Large inputs never get a checksum, whatever their case
        let (_, status) = decode(&encoded.to_uppercase()).unwrap();
        assert_eq!(status, ChecksumStatus::NoChecksum);
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode(&[]), "");
        assert_eq!(decode("").unwrap(), (vec![], ChecksumStatus::NoChecksum));
    }

    #[test]
    fn test_has_checksum() {
        assert!(has_checksum("aB").unwrap());
        assert!(!has_checksum("ab").unwrap());
        assert!(!has_checksum("AB").unwrap());
        assert!(!has_checksum("0123456789").unwrap());
        assert!(has_checksum("xyz").is_err());
        assert!(has_checksum("0x12").is_err());
    }

    #[test]
    fn test_decode_invalid_hex() {
        assert!(matches!(decode("zz"), Err(CryptoError::InvalidHex(_))));
        assert!(matches!(decode("abc"), Err(CryptoError::InvalidHex(_))));
    }

    proptest! {
        #[test]
        fn prop_checksum_roundtrip(bytes in proptest::collection::vec(any::<u8>(), 0..=SMALL_BYTES_COUNT)) {
            let encoded = encode(&bytes);
            prop_assert_eq!(&encoded, &encode(&bytes));
            let (decoded, status) = decode(&encoded).unwrap();
            prop_assert_eq!(decoded, bytes);
            prop_assert_ne!(status, ChecksumStatus::InvalidChecksum);
            if has_checksum(&encoded).unwrap() {
                prop_assert_eq!(status, ChecksumStatus::ValidChecksum);
            }
        }

        #[test]
        fn prop_large_inputs_are_plain_hex(bytes in proptest::collection::vec(any::<u8>(), 76..200)) {
            let encoded = encode(&bytes);
            prop_assert_eq!(encoded.to_lowercase(), encoded.clone());
            let (decoded, status) = decode(&encoded).unwrap();
            prop_assert_eq!(decoded, bytes);
            prop_assert_eq!(status, ChecksumStatus::NoChecksum);
        }
    }
}
