use crate::error::FormatError;

/// Sequential reader over an in-memory SN3 blob.
///
/// Every read advances `offset`; a read that would run past the end fails
/// with `FormatError::Truncated` and leaves the offset where it was.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        ByteReader { bytes, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    /// Borrows the next `n` bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], FormatError> {
        if n > self.remaining() {
            return Err(FormatError::Truncated {
                offset: self.offset,
                needed: n,
                available: self.remaining(),
            });
        }
        let start = self.offset;
        self.offset += n;
        Ok(&self.bytes[start..self.offset])
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], FormatError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, FormatError> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Reads a big-endian u32, most significant byte first.
    pub fn read_u32_be(&mut self) -> Result<u32, FormatError> {
        Ok(self
            .read_array::<4>()?
            .iter()
            .fold(0u32, |acc, &b| (acc << 8) | u32::from(b)))
    }

    /// Fills `dst` completely from the next `dst.len()` bytes.
    pub fn read_into(&mut self, dst: &mut [u8]) -> Result<(), FormatError> {
        dst.copy_from_slice(self.read_bytes(dst.len())?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn big_endian_dimensions() {
        let mut r = ByteReader::new(&[0x00, 0x00, 0x00, 0x0A, 0x00, 0x00, 0x03, 0xE8]);
        assert_eq!(r.read_u32_be().unwrap(), 10);
        assert_eq!(r.read_u32_be().unwrap(), 1000);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn tracks_offset() {
        let mut r = ByteReader::new(&[1, 2, 3, 4, 5]);
        assert_eq!(r.read_u8().unwrap(), 1);
        assert_eq!(r.read_bytes(2).unwrap(), &[2, 3]);
        assert_eq!(r.offset(), 3);
        assert_eq!(r.remaining(), 2);
    }

    #[test]
    fn short_read_reports_and_does_not_advance() {
        let mut r = ByteReader::new(&[1, 2, 3]);
        r.read_u8().unwrap();
        match r.read_u32_be() {
            Err(FormatError::Truncated { offset, needed, available }) => {
                assert_eq!((offset, needed, available), (1, 4, 2));
            }
            other => panic!("expected truncation, got {:?}", other),
        }
        assert_eq!(r.offset(), 1);
    }

    #[test]
    fn read_into_fills_destination() {
        let mut r = ByteReader::new(&[9, 8, 7, 6]);
        let mut dst = [0u8; 3];
        r.read_into(&mut dst).unwrap();
        assert_eq!(dst, [9, 8, 7]);
        assert!(r.read_into(&mut [0u8; 2]).is_err());
    }
}
