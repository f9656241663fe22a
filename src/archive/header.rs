use binary_rw::{BinaryReader, BinaryWriter, ReadStream, WriteStream};
use log::debug;

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;

use super::codec::{
    read_fixed, read_table, read_text, table_len, write_fixed, write_table, write_text, Fixed,
    NATIVE_ENDIAN,
};

pub const MAGIC: &[u8; 3] = b"SHF";

/// Archive preamble: the magic, the number of distinct symbols, then one
/// `(symbol, count)` pair per symbol.
///
/// | Offset   | Field        | Width        |
/// |----------|--------------|--------------|
/// | 0        | `"SHF"`      | 3            |
/// | 3        | symbol count | 8            |
/// | 11       | entries      | 9 each       |
/// | 11 + 9n  | packed bits  | remainder    |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub table: FrequencyTable,
}

impl Header {
    pub fn new(table: FrequencyTable) -> Self {
        Self { table }
    }

    /// Byte length of a header holding `symbol_count` entries, i.e. the offset
    /// of the first packed byte.
    pub fn encoded_len(symbol_count: usize) -> usize {
        MAGIC.len() + u64::WIDTH + table_len(symbol_count)
    }

    pub fn byte_len(&self) -> usize {
        Self::encoded_len(self.table.len())
    }

    pub fn write<W: WriteStream>(&self, stream: &mut W) -> Result<()> {
        let mut writer = BinaryWriter::new(stream, NATIVE_ENDIAN);

        write_text(&mut writer, MAGIC)?;
        write_fixed(&mut writer, self.table.len() as u64)?;
        write_table(&mut writer, &self.table)?;

        debug!(
            "wrote header: {} symbols, {} bytes",
            self.table.len(),
            self.byte_len()
        );
        Ok(())
    }

    /// Validates the magic and reads back the frequency table. A header that
    /// is cut short reads as invalid data.
    pub fn read<R: ReadStream>(stream: &mut R) -> Result<Self> {
        let mut reader = BinaryReader::new(stream, NATIVE_ENDIAN);

        let magic = read_text(&mut reader, MAGIC.len())?;
        if magic != MAGIC {
            return Err(Error::InvalidData);
        }

        let symbol_count = read_fixed::<u64>(&mut reader)?;
        if symbol_count > 256 {
            return Err(Error::InvalidData);
        }
        let table = read_table(&mut reader, symbol_count as usize)?;

        debug!("read header: {} symbols", table.len());
        Ok(Self { table })
    }
}

impl From<FrequencyTable> for Header {
    fn from(table: FrequencyTable) -> Self {
        Self::new(table)
    }
}
