//! Static Huffman archiver for the "SHF" file format.
//!
//! An archive starts with a header holding the frequency of every byte value
//! of the source, followed by the source's Huffman codes packed most
//! significant bit first. The decoder rebuilds the exact same tree from the
//! header, so the tree itself is never stored.
//!
//! ```no_run
//! shf_archiver::compress("original.txt", "compressed.shf")?;
//! shf_archiver::decompress("compressed.shf", "decompressed.txt")?;
//! # Ok::<(), shf_archiver::Error>(())
//! ```

pub mod archive;
mod error;
pub mod frequency;
pub mod huffman;

use std::fs::File;
use std::path::Path;

use binary_rw::FileStream;
use log::info;

pub use error::{Error, Result};
pub use frequency::FrequencyTable;

use archive::{decode, encode, read_header};
use huffman::{CodeTable, HuffmanTree};

/// Outcome of one [`compress`] or [`decompress`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub bytes_in: u64,
    pub bytes_out: u64,
    pub symbols: usize,
}

fn open_input(path: &Path) -> Result<File> {
    File::open(path).map_err(|_| Error::InvalidInputFile)
}

/// Compresses `input` into a new archive at `output`.
///
/// The input is read twice: once to count symbols, once to encode them. An
/// empty input is rejected with [`Error::InvalidData`] before the output is
/// created.
pub fn compress<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<Summary> {
    let input = input.as_ref();

    let table = FrequencyTable::collect(open_input(input)?)?;
    let huffman = HuffmanTree::build(&table)?;
    let codes = CodeTable::from_tree(&huffman);

    let mut stream = FileStream::new(File::create(output.as_ref())?);
    let bytes_out = encode(&table, &codes, open_input(input)?, &mut stream)?;

    let summary = Summary {
        bytes_in: table.total(),
        bytes_out,
        symbols: table.len(),
    };
    info!(
        "compressed {} -> {} bytes ({} symbols)",
        summary.bytes_in, summary.bytes_out, summary.symbols
    );
    Ok(summary)
}

/// Restores the archive at `input` into `output`.
///
/// The header is validated before the output is created, so a file that is
/// not an archive leaves nothing behind.
pub fn decompress<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<Summary> {
    let input = open_input(input.as_ref())?;
    let bytes_in = input.metadata()?.len();
    let mut stream = FileStream::new(input);

    let table = read_header(&mut stream)?;
    let huffman = HuffmanTree::build(&table)?;

    let output = File::create(output.as_ref())?;
    let bytes_out = decode(&table, &huffman, &mut stream, output)?;

    let summary = Summary {
        bytes_in,
        bytes_out,
        symbols: table.len(),
    };
    info!(
        "decompressed {} -> {} bytes ({} symbols)",
        summary.bytes_in, summary.bytes_out, summary.symbols
    );
    Ok(summary)
}

/// Reads the header of the archive at `path` and derives its code table.
pub fn inspect<P: AsRef<Path>>(path: P) -> Result<(FrequencyTable, CodeTable)> {
    let mut stream = FileStream::new(open_input(path.as_ref())?);
    let table = read_header(&mut stream)?;
    let codes = CodeTable::from_tree(&HuffmanTree::build(&table)?);
    Ok((table, codes))
}
