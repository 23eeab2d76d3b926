// Forward-only reader over a Borsh encoded buffer

// ========== ERROR TYPES ==========

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// A field runs past the end of the buffer
    UnexpectedEnd,
    /// Action tag outside the known schema
    UnknownAction(u8),
    /// Invalid enum or Option tag
    InvalidTag(u8),
    /// Bytes left over after a fully decoded action
    TrailingData,
    /// Amount does not fit its display field
    AmountTooLong,
}

impl From<arrayvec::CapacityError> for ParseError {
    fn from(_: arrayvec::CapacityError) -> Self {
        ParseError::AmountTooLong
    }
}

// ========== READER ==========

pub struct BorshReader<'a> {
    data: &'a [u8],
    processed: usize,
}

impl<'a> BorshReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, processed: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.processed
    }

    fn check(&self, size: usize) -> Result<(), ParseError> {
        // Written against the remaining length so `size` cannot wrap
        if size > self.remaining() {
            return Err(ParseError::UnexpectedEnd);
        }
        Ok(())
    }

    pub fn read_bytes(&mut self, size: usize) -> Result<&'a [u8], ParseError> {
        self.check(size)?;
        let data: &'a [u8] = self.data;
        let out = &data[self.processed..self.processed + size];
        self.processed += size;
        Ok(out)
    }

    pub fn read_fixed<const N: usize>(&mut self) -> Result<[u8; N], ParseError> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn skip(&mut self, size: usize) -> Result<(), ParseError> {
        self.read_bytes(size).map(|_| ())
    }

    pub fn read_u8(&mut self) -> Result<u8, ParseError> {
        Ok(self.read_fixed::<1>()?[0])
    }

    pub fn read_u32(&mut self) -> Result<u32, ParseError> {
        Ok(u32::from_le_bytes(self.read_fixed()?))
    }

    pub fn read_u64(&mut self) -> Result<u64, ParseError> {
        Ok(u64::from_le_bytes(self.read_fixed()?))
    }

    /// Borsh `Option` tag
    pub fn read_bool(&mut self) -> Result<bool, ParseError> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            t => Err(ParseError::InvalidTag(t)),
        }
    }

    /// u32 length prefix followed by that many bytes
    pub fn read_buffer(&mut self) -> Result<&'a [u8], ParseError> {
        let len = self.read_u32()? as usize;
        self.read_bytes(len)
    }

    pub fn finish(&self) -> Result<(), ParseError> {
        if self.remaining() != 0 {
            return Err(ParseError::TrailingData);
        }
        Ok(())
    }
}
