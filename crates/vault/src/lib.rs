//! # The Vault: Content Digest Verification
//!
//! Enforces the integrity gate: no byte of an IFC file is trusted until the
//! SHA-256 digest stored in its header matches the file contents.
//!
//! ## Coverage
//! The digest covers everything after the signature and the checksum field
//! itself, i.e. `[4 + 32, file_len)`. The scan is a single linear pass over
//! the borrowed buffer in fixed-size chunks; nothing is copied.

use common::layout::CHECKSUM_COVERAGE_START;
use common::{ByteView, IfcError};
use sha2::{Digest, Sha256};

/// SHA-256 digest as stored in the header.
pub type Sha256Digest = [u8; 32];

/// Bytes fed to the hasher per update.
const CHUNK_SIZE: usize = 64 * 1024;

/// Digest-based integrity checks for IFC buffers.
pub struct IntegrityOracle;

impl IntegrityOracle {
    /// Computes the digest of the checksum-covered range.
    ///
    /// Buffers shorter than the covered range's start hash as empty.
    pub fn digest(view: ByteView<'_>) -> Sha256Digest {
        let covered = view
            .as_bytes()
            .get(CHECKSUM_COVERAGE_START..)
            .unwrap_or_default();

        let mut hasher = Sha256::new();
        for chunk in covered.chunks(CHUNK_SIZE) {
            hasher.update(chunk);
        }
        hasher.finalize().into()
    }

    /// Verifies `view` against the stored digest `expected`.
    ///
    /// Any disagreement, including a buffer too short to contain the covered
    /// range, is `ChecksumMismatch`.
    pub fn verify(view: ByteView<'_>, expected: &Sha256Digest) -> Result<(), IfcError> {
        let actual = Self::digest(view);
        if view.len() < CHECKSUM_COVERAGE_START || actual != *expected {
            log::debug!(
                "checksum mismatch: stored {} computed {}",
                hex::encode(expected),
                hex::encode(actual)
            );
            return Err(IfcError::ChecksumMismatch {
                expected: *expected,
                actual,
            });
        }
        log::trace!("checksum {} verified", hex::encode(actual));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 36 bytes of signature + checksum slot followed by `payload`, with the
    /// slot filled with the payload's digest.
    fn sealed(payload: &[u8]) -> Vec<u8> {
        let mut bytes = vec![0x54, 0x51, 0x45, 0x1a];
        bytes.extend_from_slice(&[0u8; 32]);
        bytes.extend_from_slice(payload);
        let digest: [u8; 32] = Sha256::digest(payload).into();
        bytes[4..36].copy_from_slice(&digest);
        bytes
    }

    fn stored(bytes: &[u8]) -> Sha256Digest {
        bytes[4..36].try_into().unwrap()
    }

    #[test]
    fn test_valid_digest_accepted() {
        let bytes = sealed(b"header, strings and partitions");
        assert!(IntegrityOracle::verify(ByteView::new(&bytes), &stored(&bytes)).is_ok());
    }

    #[test]
    fn test_empty_coverage_accepted() {
        let bytes = sealed(b"");
        assert_eq!(bytes.len(), 36);
        assert!(IntegrityOracle::verify(ByteView::new(&bytes), &stored(&bytes)).is_ok());
    }

    #[test]
    fn test_every_covered_byte_matters() {
        let bytes = sealed(b"0123456789abcdef");
        let expected = stored(&bytes);
        for i in 36..bytes.len() {
            let mut tampered = bytes.clone();
            tampered[i] ^= 0x01;
            let err = IntegrityOracle::verify(ByteView::new(&tampered), &expected).unwrap_err();
            assert!(matches!(err, IfcError::ChecksumMismatch { .. }), "byte {i}");
        }
    }

    #[test]
    fn test_signature_not_covered() {
        let mut bytes = sealed(b"payload");
        let expected = stored(&bytes);
        bytes[0] = 0x00;
        assert!(IntegrityOracle::verify(ByteView::new(&bytes), &expected).is_ok());
    }

    #[test]
    fn test_short_buffer_rejected() {
        let bytes = sealed(b"");
        let expected = stored(&bytes);
        let err = IntegrityOracle::verify(ByteView::new(&bytes[..20]), &expected).unwrap_err();
        assert!(matches!(err, IfcError::ChecksumMismatch { .. }));
        assert!(IntegrityOracle::verify(ByteView::new(&[]), &expected).is_err());
    }

    #[test]
    fn test_digest_spans_chunks() {
        let payload: Vec<u8> = (0..(CHUNK_SIZE * 2 + 17)).map(|i| i as u8).collect();
        let bytes = sealed(&payload);
        let expected: [u8; 32] = Sha256::digest(&payload).into();
        assert_eq!(IntegrityOracle::digest(ByteView::new(&bytes)), expected);
    }
}
