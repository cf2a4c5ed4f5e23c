use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_cbor::from_slice;

#[cfg(not(any(rust_analyzer, doc)))]
static BLOCKS: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/definitions.cbor"));

#[cfg(any(rust_analyzer, doc))]
static BLOCKS: &[u8] = &[];

/// Legacy numeric id and data value of a named block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mapping {
    pub id: u8,
    pub data: u8,
}

#[derive(Deserialize)]
struct DefinitionEntry {
    name: String,
    id: u8,
    data: u8,
}

#[derive(Deserialize)]
struct DefinitionsFile {
    blocks: Vec<DefinitionEntry>,
}

static BLOCK_NAMES_MAP: Lazy<IndexMap<String, Mapping>> = Lazy::new(|| {
    // Produced by build.rs from the same crate; a decode failure is a build defect.
    let file: DefinitionsFile = from_slice(BLOCKS).expect("Failed to parse definitions.cbor");

    let mut map: IndexMap<String, Mapping> = IndexMap::with_capacity(file.blocks.len());
    for block in file.blocks {
        map.entry(block.name)
            .or_insert(Mapping { id: block.id, data: block.data });
    }
    map
});

/// Resolves a block name without namespace, e.g. `stone`, `white_wool` or
/// `oak_log[axis=x]`. A stateful name without its `[...]` part resolves to
/// the first listed state.
pub fn lookup(name: &str) -> Option<Mapping> {
    BLOCK_NAMES_MAP.get(name).copied()
}

/// Number of names the table resolves.
pub fn len() -> usize {
    BLOCK_NAMES_MAP.len()
}
