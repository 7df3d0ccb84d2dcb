use crate::error::Error;

/// Require `signature` to appear in `bytes` starting at `offset`.
pub fn check_magic(bytes: &[u8], offset: usize, signature: &[u8]) -> Result<(), Error> {
    let found = offset
        .checked_add(signature.len())
        .and_then(|end| bytes.get(offset..end));

    match found {
        Some(found) if found == signature => Ok(()),
        found => Err(Error::MagicMismatch {
            offset,
            expected: signature.to_vec(),
            found: found
                .map(<[u8]>::to_vec)
                .unwrap_or_else(|| bytes.get(offset..).unwrap_or_default().to_vec()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_matching_signature() {
        assert!(check_magic(b"BUP2....", 0, b"BUP2").is_ok());
        assert!(check_magic(b"..BUP2", 2, b"BUP2").is_ok());
    }

    #[test]
    fn rejects_wrong_bytes() {
        let err = check_magic(b"BUP1abcd", 0, b"BUP2").unwrap_err();
        assert_eq!(
            err,
            Error::MagicMismatch {
                offset: 0,
                expected: b"BUP2".to_vec(),
                found: b"BUP1".to_vec(),
            }
        );
    }

    #[test]
    fn rejects_short_buffer() {
        let err = check_magic(b"BU", 0, b"BUP2").unwrap_err();
        assert!(matches!(err, Error::MagicMismatch { found, .. } if found == b"BU"));

        assert!(check_magic(b"BUP2", 9, b"BUP2").is_err());
    }
}
