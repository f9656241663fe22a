use std::io::{self, BufReader, BufWriter, Read, Write};

use binary_rw::{ReadStream, SeekStream, WriteStream};
use log::debug;

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::huffman::{CodeTable, HuffmanTree};

use super::bit_stream::{BitSink, BitSource};
use super::header::Header;

/// Writes the header for `table`, then the packed codes of every byte of
/// `input`. Returns the number of bytes written to `output`.
pub fn encode<R: Read, W: WriteStream>(
    table: &FrequencyTable,
    codes: &CodeTable,
    input: R,
    output: &mut W,
) -> Result<u64> {
    let header = Header::from(table.clone());
    header.write(output)?;

    let mut sink = BitSink::new(BufWriter::new(&mut *output));
    for byte in BufReader::new(input).bytes() {
        let symbol = byte?;
        let code = codes.get(symbol).ok_or(Error::InvalidData)?;
        sink.write_code(code)?;
    }

    let bits = sink.bits_written();
    sink.finish()?;
    let packed = (bits + 7) / 8;
    debug!("packed {bits} bits into {packed} bytes");

    Ok(header.byte_len() as u64 + packed)
}

/// Reads and validates the header at the current position of `input`.
pub fn read_header<R: ReadStream>(input: &mut R) -> Result<FrequencyTable> {
    let Header { table } = Header::read(input)?;
    if table.is_empty() {
        return Err(Error::InvalidData);
    }
    Ok(table)
}

/// Walks the packed bits that follow the header through `huffman` until
/// `table.total()` symbols are out. Returns that symbol count.
///
/// The output length is whatever the header's counts add up to. With a single
/// distinct symbol no bits are read at all: the symbol is repeated that many
/// times, streamed in fixed-size chunks, so a crafted header can make the
/// output arbitrarily large. Callers that restore untrusted archives should
/// check `table.total()` from [`read_header`] against their own limit first.
pub fn decode<R: ReadStream, W: Write>(
    table: &FrequencyTable,
    huffman: &HuffmanTree,
    input: &mut R,
    output: W,
) -> Result<u64> {
    if table.is_empty() {
        return Err(Error::InvalidData);
    }

    let total_symbols = table.checked_total().ok_or(Error::InvalidData)?;
    input.seek(Header::encoded_len(table.len()))?;

    let mut output = BufWriter::new(output);
    let root = huffman.root();

    if huffman.is_leaf(root) {
        let symbol = huffman.symbol(root).ok_or(Error::InvalidData)?;
        io::copy(&mut io::repeat(symbol).take(total_symbols), &mut output)?;
    } else {
        let mut source = BitSource::new(BufReader::new(&mut *input));
        let mut current = root;
        let mut emitted = 0u64;

        while emitted < total_symbols {
            // Running out of bits before every symbol is out means the archive was cut short
            let bit = source.next_bit()?.ok_or(Error::InvalidData)?;
            current = huffman.step(current, bit).ok_or(Error::InvalidData)?;

            if let Some(symbol) = huffman.symbol(current) {
                output.write_all(&[symbol])?;
                current = root;
                emitted += 1;
            }
        }
    }

    output.flush()?;
    debug!("decoded {total_symbols} symbols");
    Ok(total_symbols)
}
