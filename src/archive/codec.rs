use binary_rw::{BinaryError, BinaryReader, BinaryWriter, Endian};

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;

/// Byte order of every multi-byte field: the host's own.
pub const NATIVE_ENDIAN: Endian = if cfg!(target_endian = "big") {
    Endian::Big
} else {
    Endian::Little
};

/// Primitive copied to and from the stream at its exact width.
pub trait Fixed: Sized {
    const WIDTH: usize;

    fn write_to(self, writer: &mut BinaryWriter) -> std::result::Result<usize, BinaryError>;
    fn read_from(reader: &mut BinaryReader) -> std::result::Result<Self, BinaryError>;
}

impl Fixed for u8 {
    const WIDTH: usize = 1;

    fn write_to(self, writer: &mut BinaryWriter) -> std::result::Result<usize, BinaryError> {
        writer.write_u8(self)
    }

    fn read_from(reader: &mut BinaryReader) -> std::result::Result<Self, BinaryError> {
        reader.read_u8()
    }
}

impl Fixed for u64 {
    const WIDTH: usize = 8;

    fn write_to(self, writer: &mut BinaryWriter) -> std::result::Result<usize, BinaryError> {
        writer.write_u64(self)
    }

    fn read_from(reader: &mut BinaryReader) -> std::result::Result<Self, BinaryError> {
        reader.read_u64()
    }
}

pub fn write_fixed<T: Fixed>(writer: &mut BinaryWriter, value: T) -> Result<()> {
    value.write_to(writer)?;
    Ok(())
}

pub fn read_fixed<T: Fixed>(reader: &mut BinaryReader) -> Result<T> {
    T::read_from(reader).map_err(|_| Error::InvalidData)
}

/// Raw bytes with no length prefix; the reader supplies the size.
pub fn write_text<B: AsRef<[u8]>>(writer: &mut BinaryWriter, text: B) -> Result<()> {
    writer.write_bytes(text.as_ref())?;
    Ok(())
}

pub fn read_text(reader: &mut BinaryReader, size: usize) -> Result<Vec<u8>> {
    reader.read_bytes(size).map_err(|_| Error::InvalidData)
}

/// Writes every `(symbol, count)` pair in ascending symbol order.
pub fn write_table(writer: &mut BinaryWriter, table: &FrequencyTable) -> Result<()> {
    for (symbol, count) in table {
        write_fixed(writer, symbol)?;
        write_fixed(writer, count)?;
    }
    Ok(())
}

/// Reads exactly `size` pairs. A symbol listed twice makes the table ambiguous
/// and is rejected, as are counts whose sum overflows a `u64`.
pub fn read_table(reader: &mut BinaryReader, size: usize) -> Result<FrequencyTable> {
    let mut table = FrequencyTable::new();
    for _ in 0..size {
        let symbol = read_fixed::<u8>(reader)?;
        let count = read_fixed::<u64>(reader)?;
        if table.insert(symbol, count).is_some() {
            return Err(Error::InvalidData);
        }
    }
    if table.checked_total().is_none() {
        return Err(Error::InvalidData);
    }
    Ok(table)
}

/// Encoded size of a table with `size` entries.
pub fn table_len(size: usize) -> usize {
    size * (u8::WIDTH + u64::WIDTH)
}

#[cfg(test)]
mod tests {
    use binary_rw::{MemoryStream, SeekStream};

    use super::*;

    fn written<F>(write: F) -> Vec<u8>
    where
        F: FnOnce(&mut BinaryWriter) -> Result<()>,
    {
        let mut stream = MemoryStream::new();
        let mut writer = BinaryWriter::new(&mut stream, NATIVE_ENDIAN);
        write(&mut writer).unwrap();
        stream.into()
    }

    #[test]
    fn test_fixed_width() {
        let bytes = written(|w| {
            write_fixed(w, 0xABu8)?;
            write_fixed(w, 0x0102030405060708u64)
        });
        assert_eq!(bytes.len(), u8::WIDTH + u64::WIDTH);
        assert_eq!(bytes[0], 0xAB);
        assert_eq!(bytes[1..], 0x0102030405060708u64.to_ne_bytes());
    }

    #[test]
    fn test_fixed_read_back() {
        let bytes = written(|w| write_fixed(w, 42u64));
        let mut stream = MemoryStream::from(bytes);
        let mut reader = BinaryReader::new(&mut stream, NATIVE_ENDIAN);
        assert_eq!(read_fixed::<u64>(&mut reader).unwrap(), 42);
    }

    #[test]
    fn test_fixed_short_read() {
        let mut stream = MemoryStream::from(vec![1u8, 2, 3]);
        let mut reader = BinaryReader::new(&mut stream, NATIVE_ENDIAN);
        assert!(matches!(
            read_fixed::<u64>(&mut reader),
            Err(Error::InvalidData)
        ));
    }

    #[test]
    fn test_text_has_no_prefix() {
        let bytes = written(|w| write_text(w, "SHF"));
        assert_eq!(bytes, b"SHF");

        let mut stream = MemoryStream::from(b"SHFrest".to_vec());
        let mut reader = BinaryReader::new(&mut stream, NATIVE_ENDIAN);
        assert_eq!(read_text(&mut reader, 3).unwrap(), b"SHF");
        assert_eq!(stream.tell().unwrap(), 3);
    }

    #[test]
    fn test_table_layout() {
        let table = [(b'b', 2), (b'a', 3)].into_iter().collect::<FrequencyTable>();
        let bytes = written(|w| write_table(w, &table));

        assert_eq!(bytes.len(), table_len(2));
        assert_eq!(bytes[0], b'a');
        assert_eq!(bytes[1..9], 3u64.to_ne_bytes());
        assert_eq!(bytes[9], b'b');
        assert_eq!(bytes[10..18], 2u64.to_ne_bytes());
    }

    #[test]
    fn test_table_read_back() {
        let table = FrequencyTable::collect(&b"mississippi"[..]).unwrap();
        let bytes = written(|w| write_table(w, &table));

        let mut stream = MemoryStream::from(bytes);
        let mut reader = BinaryReader::new(&mut stream, NATIVE_ENDIAN);
        assert_eq!(read_table(&mut reader, table.len()).unwrap(), table);
    }

    #[test]
    fn test_table_count_overflow() {
        let mut bytes = vec![b'a'];
        bytes.extend(u64::MAX.to_ne_bytes());
        bytes.push(b'b');
        bytes.extend(1u64.to_ne_bytes());

        let mut stream = MemoryStream::from(bytes);
        let mut reader = BinaryReader::new(&mut stream, NATIVE_ENDIAN);
        assert!(matches!(
            read_table(&mut reader, 2),
            Err(Error::InvalidData)
        ));
    }

    #[test]
    fn test_table_duplicate_symbol() {
        let mut bytes = Vec::new();
        for _ in 0..2 {
            bytes.push(b'x');
            bytes.extend(1u64.to_ne_bytes());
        }

        let mut stream = MemoryStream::from(bytes);
        let mut reader = BinaryReader::new(&mut stream, NATIVE_ENDIAN);
        assert!(matches!(
            read_table(&mut reader, 2),
            Err(Error::InvalidData)
        ));
    }
}
