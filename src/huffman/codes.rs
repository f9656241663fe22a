use std::collections::BTreeMap;
use std::fmt;

use log::trace;

use super::builder::HuffmanTree;
use super::tree::Side;

/// Root-to-leaf path of a symbol: `false` for a left edge, `true` for a right one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn starts_with(&self, other: &Code) -> bool {
        self.bits.starts_with(&other.bits)
    }
}

impl From<Vec<bool>> for Code {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    /// Derives every leaf's code by climbing parent links to the root and
    /// reversing the collected path.
    pub fn from_tree(huffman: &HuffmanTree) -> Self {
        let tree = huffman.tree();
        let mut codes = BTreeMap::new();

        for leaf in tree.leaves() {
            let Some(symbol) = huffman.symbol(leaf) else {
                continue;
            };

            let mut bits = Vec::new();
            let mut current = leaf;
            while let Some(parent) = tree.parent(current) {
                bits.push(tree.side(current) == Some(Side::Right));
                current = parent;
            }
            bits.reverse();

            codes.insert(symbol, Code::from(bits));
        }

        let table = Self { codes };
        trace!("code table:\n{table}");
        table
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }
}

impl fmt::Display for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, code) in self.iter() {
            writeln!(f, "\t{symbol:#04X}\t{}\t{code}", printable(symbol))?;
        }
        Ok(())
    }
}

fn printable(symbol: u8) -> String {
    match symbol {
        0x21..=0x7E => format!("'{}'", symbol as char),
        _ => format!("{:?}", symbol as char),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;

    fn codes(bytes: &[u8]) -> CodeTable {
        let table = FrequencyTable::collect(bytes).unwrap();
        CodeTable::from_tree(&HuffmanTree::build(&table).unwrap())
    }

    fn code(table: &CodeTable, symbol: u8) -> String {
        table.get(symbol).unwrap().to_string()
    }

    #[test]
    fn test_codes_aaabbc() {
        let table = codes(b"aaabbc");
        assert_eq!(code(&table, b'a'), "0");
        assert_eq!(code(&table, b'b'), "10");
        assert_eq!(code(&table, b'c'), "11");
    }

    #[test]
    fn test_codes_equal_weights() {
        let table = codes(b"abcd");
        assert_eq!(code(&table, b'a'), "01");
        assert_eq!(code(&table, b'b'), "00");
        assert_eq!(code(&table, b'c'), "11");
        assert_eq!(code(&table, b'd'), "10");
    }

    #[test]
    fn test_codes_single_symbol() {
        let table = codes(b"qqq");
        assert_eq!(table.len(), 1);
        assert!(table.get(b'q').unwrap().is_empty());
    }

    #[test]
    fn test_codes_prefix_free() {
        let source = (0u32..2000)
            .map(|i| ((i * i + 7 * i) % 97) as u8)
            .collect::<Vec<_>>();
        let table = codes(&source);

        for (a, code_a) in table.iter() {
            for (b, code_b) in table.iter() {
                if a != b {
                    assert!(!code_a.starts_with(code_b), "{a} / {b}");
                }
            }
        }
    }

    #[test]
    fn test_codes_lengths_follow_weight() {
        let table = codes(b"aaaaaaaabbbbccd");
        assert!(table.get(b'a').unwrap().len() <= table.get(b'b').unwrap().len());
        assert!(table.get(b'b').unwrap().len() <= table.get(b'c').unwrap().len());
        assert!(table.get(b'c').unwrap().len() <= table.get(b'd').unwrap().len());
    }

    #[test]
    fn test_display() {
        let table = codes(b"aaabbc");
        assert_eq!(
            table.to_string(),
            "\t0x61\t'a'\t0\n\t0x62\t'b'\t10\n\t0x63\t'c'\t11\n"
        );
    }
}
