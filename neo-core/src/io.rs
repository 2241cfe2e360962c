//! Binary serialization helpers (Neo variable-length encoding).

/// Returns the number of bytes required to encode `value` using Neo variable-length encoding.
#[inline]
pub fn get_var_size(value: u64) -> usize {
    if value < 0xFD {
        1
    } else if value <= 0xFFFF {
        1 + 2
    } else if value <= 0xFFFF_FFFF {
        1 + 4
    } else {
        1 + 8
    }
}

/// Returns the size contribution for a byte slice encoded with `write_var_bytes`.
#[inline]
pub fn get_var_size_bytes(bytes: &[u8]) -> usize {
    get_var_size(bytes.len() as u64) + bytes.len()
}

/// Returns the encoded size of a length-prefixed array of serializable items.
#[inline]
pub fn get_var_size_serializable_slice<T: Serializable>(values: &[T]) -> usize {
    get_var_size(values.len() as u64) + values.iter().map(Serializable::size).sum::<usize>()
}

/// A value with a fixed binary encoding.
pub trait Serializable {
    /// Encoded size in bytes.
    fn size(&self) -> usize;

    fn serialize(&self, writer: &mut BinaryWriter);

    fn to_array(&self) -> Vec<u8> {
        let mut writer = BinaryWriter::with_capacity(self.size());
        self.serialize(&mut writer);
        writer.into_bytes()
    }
}

/// Little-endian writer over an owned buffer.
///
/// ```rust
/// use neo_core::io::BinaryWriter;
/// let mut writer = BinaryWriter::new();
/// writer.write_u32(42);
/// writer.write_var_bytes(b"neo");
/// assert_eq!(writer.into_bytes(), vec![42, 0, 0, 0, 3, b'n', b'e', b'o']);
/// ```
#[derive(Debug, Default)]
pub struct BinaryWriter {
    buffer: Vec<u8>,
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_bytes(&mut self, value: &[u8]) {
        self.buffer.extend_from_slice(value);
    }

    pub fn write_var_int(&mut self, value: u64) {
        if value < 0xFD {
            self.write_u8(value as u8);
        } else if value <= 0xFFFF {
            self.write_u8(0xFD);
            self.buffer.extend_from_slice(&(value as u16).to_le_bytes());
        } else if value <= 0xFFFF_FFFF {
            self.write_u8(0xFE);
            self.write_u32(value as u32);
        } else {
            self.write_u8(0xFF);
            self.write_u64(value);
        }
    }

    pub fn write_var_bytes(&mut self, value: &[u8]) {
        self.write_var_int(value.len() as u64);
        self.write_bytes(value);
    }

    pub fn write_serializable_slice<T: Serializable>(&mut self, values: &[T]) {
        self.write_var_int(values.len() as u64);
        for value in values {
            value.serialize(self);
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn var_int_sizes_match_encoding() {
        for value in [0u64, 0xFC, 0xFD, 0xFFFF, 0x1_0000, 0xFFFF_FFFF, 0x1_0000_0000] {
            let mut writer = BinaryWriter::new();
            writer.write_var_int(value);
            assert_eq!(writer.len(), get_var_size(value), "value {value:#x}");
        }
    }

    #[test]
    fn var_bytes_prefixes_length() {
        let data = vec![7u8; 300];
        let mut writer = BinaryWriter::new();
        writer.write_var_bytes(&data);
        let bytes = writer.into_bytes();
        assert_eq!(&bytes[..3], &[0xFD, 0x2C, 0x01]);
        assert_eq!(bytes.len(), get_var_size_bytes(&data));
    }
}
