//! Bounds-checked cursor over an input slice.

use crate::error::{Result, SchemaError};

/// A cursor that never reads past the end of the slice it was given.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    input: &'a [u8],
}

impl<'a> Reader<'a> {
    /// Create a reader over `input`.
    pub fn new(input: &'a [u8]) -> Self {
        Self { input }
    }

    /// Number of bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.input.len()
    }

    /// Consume exactly `n` bytes.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.input.len() < n {
            return Err(SchemaError::UnexpectedEof {
                needed: n,
                remaining: self.input.len(),
            });
        }
        let (head, tail) = self.input.split_at(n);
        self.input = tail;
        Ok(head)
    }

    /// Consume exactly `N` bytes into an array.
    pub fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.take(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.take_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.take_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.take_array()?))
    }

    pub fn read_u128(&mut self) -> Result<u128> {
        Ok(u128::from_le_bytes(self.take_array()?))
    }

    /// Read a u32 length prefix as `usize`.
    pub fn read_len(&mut self) -> Result<usize> {
        Ok(self.read_u32()? as usize)
    }

    /// Fail unless every byte has been consumed.
    pub fn finish(self) -> Result<()> {
        if self.input.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::TrailingBytes(self.input.len()))
        }
    }
}

/// Append a u32 length prefix.
pub fn write_len(out: &mut Vec<u8>, len: usize) -> Result<()> {
    let len: u32 = len
        .try_into()
        .map_err(|_| SchemaError::LengthOverflow(len))?;
    out.extend_from_slice(&len.to_le_bytes());
    Ok(())
}
