mod builder;
mod codes;
mod tree;

pub use builder::{HuffmanTree, Weighted};
pub use codes::{Code, CodeTable};
pub use tree::{NodeId, Side, Tree};
