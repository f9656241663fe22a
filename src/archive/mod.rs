mod bit_stream;
pub mod codec;
mod header;
mod stream;

pub use bit_stream::{BitSink, BitSource};
pub use header::{Header, MAGIC};
pub use stream::{decode, encode, read_header};
