//! Little-endian byte helpers. Every integer serialized by this crate is
//! little-endian.

pub(crate) fn u64_to_bytes(value: u64) -> [u8; 8] {
    value.to_le_bytes()
}

pub(crate) fn bytes_to_u64(bytes: &[u8]) -> u64 {
    u64::from_le_bytes(
        bytes
            .try_into()
            .expect("Index out of bounds or incorrect length"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u64_round_trip() {
        let value = 0x0102_0304_0506_0708_u64;
        let bytes = u64_to_bytes(value);
        assert_eq!(bytes[0], 0x08);
        assert_eq!(bytes[7], 0x01);
        assert_eq!(bytes_to_u64(&bytes), value);
    }
}
