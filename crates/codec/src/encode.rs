//! Encode/decode traits and their primitive implementations.
//!
//! Integers are fixed-width little-endian. Strings and sequences carry a u32
//! length prefix, options a single presence byte, fixed arrays nothing.

use crate::error::{Result, SchemaError};
use crate::reader::{write_len, Reader};

/// Types with a canonical binary encoding.
pub trait Encode {
    /// Append the encoding of `self` to `out`.
    fn encode_to(&self, out: &mut Vec<u8>) -> Result<()>;

    /// Encode `self` into a fresh buffer.
    fn encode(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.encode_to(&mut out)?;
        Ok(out)
    }
}

/// Types that can be read back from their canonical encoding.
pub trait Decode: Sized {
    /// Decode one value, consuming only its own bytes.
    fn decode_from(reader: &mut Reader<'_>) -> Result<Self>;

    /// Decode a value that must span the whole of `bytes`.
    fn decode(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(bytes);
        let value = Self::decode_from(&mut reader)?;
        reader.finish()?;
        Ok(value)
    }
}

macro_rules! impl_int {
    ($($ty:ty => $read:ident),* $(,)?) => {
        $(
            impl Encode for $ty {
                fn encode_to(&self, out: &mut Vec<u8>) -> Result<()> {
                    out.extend_from_slice(&self.to_le_bytes());
                    Ok(())
                }
            }

            impl Decode for $ty {
                fn decode_from(reader: &mut Reader<'_>) -> Result<Self> {
                    reader.$read()
                }
            }
        )*
    };
}

impl_int! {
    u8 => read_u8,
    u16 => read_u16,
    u32 => read_u32,
    u64 => read_u64,
    u128 => read_u128,
}

impl Encode for str {
    fn encode_to(&self, out: &mut Vec<u8>) -> Result<()> {
        write_len(out, self.len())?;
        out.extend_from_slice(self.as_bytes());
        Ok(())
    }
}

impl Encode for String {
    fn encode_to(&self, out: &mut Vec<u8>) -> Result<()> {
        self.as_str().encode_to(out)
    }
}

impl Decode for String {
    fn decode_from(reader: &mut Reader<'_>) -> Result<Self> {
        let len = reader.read_len()?;
        let bytes = reader.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| SchemaError::InvalidUtf8)
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode_to(&self, out: &mut Vec<u8>) -> Result<()> {
        write_len(out, self.len())?;
        for item in self {
            item.encode_to(out)?;
        }
        Ok(())
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode_from(reader: &mut Reader<'_>) -> Result<Self> {
        let len = reader.read_len()?;
        // the prefix is untrusted; never reserve more than the input could hold
        let mut items = Vec::with_capacity(len.min(reader.remaining()));
        for _ in 0..len {
            items.push(T::decode_from(reader)?);
        }
        Ok(items)
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encode_to(&self, out: &mut Vec<u8>) -> Result<()> {
        match self {
            None => {
                out.push(0);
                Ok(())
            }
            Some(value) => {
                out.push(1);
                value.encode_to(out)
            }
        }
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode_from(reader: &mut Reader<'_>) -> Result<Self> {
        match reader.read_u8()? {
            0 => Ok(None),
            1 => Ok(Some(T::decode_from(reader)?)),
            tag => Err(SchemaError::InvalidOptionTag(tag)),
        }
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode_to(&self, out: &mut Vec<u8>) -> Result<()> {
        for item in self {
            item.encode_to(out)?;
        }
        Ok(())
    }
}

impl<T: Decode, const N: usize> Decode for [T; N] {
    fn decode_from(reader: &mut Reader<'_>) -> Result<Self> {
        let mut items = Vec::with_capacity(N);
        for _ in 0..N {
            items.push(T::decode_from(reader)?);
        }
        items.try_into().map_err(|items: Vec<T>| SchemaError::LengthMismatch {
            what: "fixed array",
            expected: N,
            actual: items.len(),
        })
    }
}

/// Copy a slice into a fixed-size array, failing on any other length.
pub fn fixed_bytes<const N: usize>(what: &'static str, bytes: &[u8]) -> Result<[u8; N]> {
    bytes.try_into().map_err(|_| SchemaError::LengthMismatch {
        what,
        expected: N,
        actual: bytes.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_are_little_endian() {
        assert_eq!(0xABu8.encode().unwrap(), vec![0xAB]);
        assert_eq!(0x0102u16.encode().unwrap(), vec![0x02, 0x01]);
        assert_eq!(1u32.encode().unwrap(), vec![1, 0, 0, 0]);
        assert_eq!(u64::MAX.encode().unwrap(), vec![0xFF; 8]);

        let mut expected = vec![0u8; 16];
        expected[0] = 123;
        assert_eq!(123u128.encode().unwrap(), expected);
    }

    #[test]
    fn test_u128_decode() {
        let value = 1_000_000_000_000_000_000_000_000u128;
        let bytes = value.to_le_bytes();
        assert_eq!(u128::decode(&bytes).unwrap(), value);
    }

    #[test]
    fn test_string_has_u32_prefix_and_no_terminator() {
        let bytes = "abc".to_string().encode().unwrap();
        assert_eq!(bytes, vec![3, 0, 0, 0, b'a', b'b', b'c']);
        assert_eq!(String::decode(&bytes).unwrap(), "abc");
    }

    #[test]
    fn test_string_invalid_utf8() {
        let bytes = [2, 0, 0, 0, 0xC3, 0x28];
        assert_eq!(String::decode(&bytes), Err(SchemaError::InvalidUtf8));
    }

    #[test]
    fn test_string_truncated() {
        let bytes = [5, 0, 0, 0, b'a', b'b'];
        assert_eq!(
            String::decode(&bytes),
            Err(SchemaError::UnexpectedEof {
                needed: 5,
                remaining: 2
            })
        );
    }

    #[test]
    fn test_vec_prefix_counts_elements() {
        let bytes = vec![1u16, 2, 3].encode().unwrap();
        assert_eq!(bytes, vec![3, 0, 0, 0, 1, 0, 2, 0, 3, 0]);
        assert_eq!(Vec::<u16>::decode(&bytes).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_vec_huge_prefix_does_not_allocate_or_panic() {
        let bytes = [0xFF, 0xFF, 0xFF, 0xFF, 1];
        assert!(matches!(
            Vec::<u64>::decode(&bytes),
            Err(SchemaError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_option_presence_byte() {
        assert_eq!(None::<u8>.encode().unwrap(), vec![0]);
        assert_eq!(Some(7u8).encode().unwrap(), vec![1, 7]);
        assert_eq!(Option::<u8>::decode(&[1, 7]).unwrap(), Some(7));
        assert_eq!(Option::<u8>::decode(&[0]).unwrap(), None);
        assert_eq!(
            Option::<u8>::decode(&[2, 7]),
            Err(SchemaError::InvalidOptionTag(2))
        );
    }

    #[test]
    fn test_fixed_array_has_no_prefix() {
        let bytes = [9u8; 4].encode().unwrap();
        assert_eq!(bytes, vec![9, 9, 9, 9]);
        assert_eq!(<[u8; 4]>::decode(&bytes).unwrap(), [9u8; 4]);
        assert!(matches!(
            <[u8; 4]>::decode(&bytes[..3]),
            Err(SchemaError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_top_level_decode_rejects_trailing_bytes() {
        assert_eq!(u8::decode(&[1, 2]), Err(SchemaError::TrailingBytes(1)));
    }

    #[test]
    fn test_fixed_bytes_checks_length() {
        assert_eq!(fixed_bytes::<3>("test", &[1, 2, 3]).unwrap(), [1, 2, 3]);
        assert_eq!(
            fixed_bytes::<3>("test", &[1, 2]),
            Err(SchemaError::LengthMismatch {
                what: "test",
                expected: 3,
                actual: 2
            })
        );
    }
}
