//! Compiles `definitions/legacy.json` into the CBOR block table that
//! `src/definitions` embeds with `include_bytes!`.

use std::{env, fs, path::Path};

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

const SOURCE: &str = "definitions/legacy.json";

#[derive(Deserialize)]
struct LegacyFile {
    /// `"<id>:<data>"` -> `"<namespace>:<name>[<state>]"`
    blocks: IndexMap<String, String>,
}

#[derive(Serialize)]
struct Mapping {
    name: String,
    id: u8,
    data: u8,
}

#[derive(Serialize)]
struct DefinitionsFile {
    blocks: Vec<Mapping>,
}

fn parse_key(key: &str) -> Result<(u8, u8), Box<dyn std::error::Error>> {
    let (id, data) = key
        .split_once(':')
        .ok_or_else(|| format!("malformed block key '{key}'"))?;
    Ok((id.parse()?, data.parse()?))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed={SOURCE}");
    println!("cargo:rerun-if-changed=build.rs");

    let legacy: LegacyFile = serde_json::from_str(&fs::read_to_string(SOURCE)?)?;

    let mut blocks: Vec<Mapping> = Vec::with_capacity(legacy.blocks.len());
    let mut defaults: IndexSet<String> = IndexSet::new();

    for (key, value) in legacy.blocks.iter() {
        let (id, data) = parse_key(key)?;
        let name = value.split_once(':').map_or(value.as_str(), |(_, n)| n);
        blocks.push(Mapping { name: name.to_owned(), id, data });

        // The bare name of a stateful block resolves to its first variant.
        if let Some((base, _)) = name.split_once('[') {
            if defaults.insert(base.to_owned()) {
                blocks.push(Mapping { name: base.to_owned(), id, data });
            }
        }
    }

    // Stable sort keeps the first entry of equal names in front.
    blocks.sort_by(|a, b| a.name.cmp(&b.name));

    let out = Path::new(&env::var("OUT_DIR")?).join("definitions.cbor");
    fs::write(out, serde_cbor::to_vec(&DefinitionsFile { blocks })?)?;

    Ok(())
}
