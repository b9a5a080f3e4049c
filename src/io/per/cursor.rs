use crate::io::per::Error;

/// Read position over a borrowed octet slice, owned by the caller and threaded through
/// successive decode calls. Reads either consume all octets they need or nothing.
#[derive(Debug, Clone)]
pub struct OctetCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> OctetCursor<'a> {
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        OctetCursor { data, position: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.position..]
    }

    #[inline]
    pub fn octets_remaining(&self) -> usize {
        self.data.len() - self.position
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Looks at the next `len` octets without consuming them.
    pub fn peek(&self, len: usize) -> Result<&'a [u8], Error> {
        let remaining = self.remaining();
        if remaining.len() < len {
            Err(Error::underflow(len, remaining.len()))
        } else {
            Ok(&remaining[..len])
        }
    }

    pub fn read_octet(&mut self) -> Result<u8, Error> {
        let octet = self.peek(1)?[0];
        self.position += 1;
        Ok(octet)
    }

    pub fn read_octets(&mut self, len: usize) -> Result<&'a [u8], Error> {
        let octets = self.peek(len)?;
        self.position += len;
        Ok(octets)
    }

    #[inline]
    pub(crate) fn advance(&mut self, len: usize) {
        debug_assert!(len <= self.octets_remaining());
        self.position += len;
    }
}

impl<'a> From<&'a [u8]> for OctetCursor<'a> {
    #[inline]
    fn from(data: &'a [u8]) -> Self {
        OctetCursor::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_advance() {
        let data = [0x01, 0x02, 0x03];
        let mut cursor = OctetCursor::new(&data);
        assert_eq!(0x01, cursor.read_octet().unwrap());
        assert_eq!(&[0x02, 0x03], cursor.read_octets(2).unwrap());
        assert!(cursor.is_exhausted());
        assert_eq!(3, cursor.position());
    }

    #[test]
    fn test_underflow_does_not_advance() {
        let data = [0x01];
        let mut cursor = OctetCursor::new(&data);
        let error = cursor.read_octets(2).unwrap_err();
        assert!(error.is_underflow());
        assert_eq!(0, cursor.position());
        assert_eq!(1, cursor.octets_remaining());
    }
}
