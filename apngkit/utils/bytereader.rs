use crate::utils::error::{PngError, PngResult};

/// Big-endian cursor over an in-memory byte slice.
///
/// Running out of input is reported as a `Format` error naming `context`,
/// since every caller is parsing a fixed container layout.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    position: usize,
    context: &'static str,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8], context: &'static str) -> Self {
        ByteReader {
            data,
            position: 0,
            context,
        }
    }

    pub fn bytes_left(&self) -> usize {
        self.data.len() - self.position
    }

    pub fn is_empty(&self) -> bool {
        self.bytes_left() == 0
    }

    /// Reads `n` bytes without copying them.
    pub fn read_bytes(&mut self, n: usize) -> PngResult<&'a [u8]> {
        if n > self.bytes_left() {
            return Err(PngError::format(format!(
                "Unexpected end of {}: needed {} bytes at offset {}, {} left",
                self.context,
                n,
                self.position,
                self.bytes_left()
            )));
        }

        let bytes = &self.data[self.position..self.position + n];
        self.position += n;

        Ok(bytes)
    }

    pub fn read_array<const N: usize>(&mut self) -> PngResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> PngResult<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> PngResult<u16> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> PngResult<u32> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    /// Returns everything that has not been consumed yet.
    pub fn read_to_end(&mut self) -> &'a [u8] {
        let rest = &self.data[self.position..];
        self.position = self.data.len();
        rest
    }
}
