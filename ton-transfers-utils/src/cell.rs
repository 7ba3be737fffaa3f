use anyhow::Result;
use ton_types::UInt256;

/// Deserializes a bag of cells and returns the representation hash of its root
pub fn boc_repr_hash(boc: &[u8]) -> Result<UInt256> {
    let cell = ton_types::deserialize_tree_of_cells(&mut std::io::Cursor::new(boc))?;
    Ok(cell.repr_hash())
}
