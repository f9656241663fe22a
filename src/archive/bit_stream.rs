use std::io::{self, Read, Write};

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use crate::huffman::Code;

/// Packs codes into bytes, most significant bit first.
pub struct BitSink<W: Write> {
    writer: BitWriter<W, BigEndian>,
    bits_written: u64,
}

impl<W: Write> BitSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BitWriter::endian(writer, BigEndian),
            bits_written: 0,
        }
    }

    pub fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        self.writer.write_bit(bit)?;
        self.bits_written += 1;
        Ok(())
    }

    pub fn write_code(&mut self, code: &Code) -> io::Result<()> {
        for &bit in code.bits() {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    /// Payload bits so far, not counting the padding `finish` adds.
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Zero-pads and emits a trailing partial byte, whatever its value, then
    /// hands back the inner writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.byte_align()?;
        let mut writer = self.writer.into_writer();
        writer.flush()?;
        Ok(writer)
    }
}

/// Yields bits most significant first, reporting end of input as `None`.
pub struct BitSource<R: Read> {
    reader: BitReader<R, BigEndian>,
}

impl<R: Read> BitSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BitReader::endian(reader, BigEndian),
        }
    }

    pub fn next_bit(&mut self) -> io::Result<Option<bool>> {
        match self.reader.read_bit() {
            Ok(bit) => Ok(Some(bit)),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(bits: &str) -> Code {
        Code::from(bits.chars().map(|c| c == '1').collect::<Vec<_>>())
    }

    fn pack(codes: &[&str]) -> (Vec<u8>, u64) {
        let mut sink = BitSink::new(Vec::new());
        for bits in codes {
            sink.write_code(&code(bits)).unwrap();
        }
        let bits = sink.bits_written();
        (sink.finish().unwrap(), bits)
    }

    #[test]
    fn test_msb_first() {
        let (bytes, bits) = pack(&["1", "0", "11", "0000", "1"]);
        assert_eq!(bits, 9);
        assert_eq!(bytes, vec![0b1011_0000, 0b1000_0000]);
    }

    #[test]
    fn test_full_byte_no_padding() {
        let (bytes, bits) = pack(&["1010", "0101"]);
        assert_eq!(bits, 8);
        assert_eq!(bytes, vec![0b1010_0101]);
    }

    #[test]
    fn test_zero_partial_byte_is_kept() {
        let (bytes, bits) = pack(&["11111111", "00"]);
        assert_eq!(bits, 10);
        assert_eq!(bytes, vec![0xFF, 0x00]);
    }

    #[test]
    fn test_nothing_written() {
        let (bytes, bits) = pack(&["", ""]);
        assert_eq!(bits, 0);
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_source_reads_until_end() {
        let data = [0b1100_0001u8];
        let mut source = BitSource::new(&data[..]);
        let mut bits = Vec::new();
        while let Some(bit) = source.next_bit().unwrap() {
            bits.push(bit);
        }
        assert_eq!(
            bits,
            vec![true, true, false, false, false, false, false, true]
        );
        assert_eq!(source.next_bit().unwrap(), None);
    }
}
