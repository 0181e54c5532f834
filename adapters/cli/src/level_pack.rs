//! TOML level packs.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use rulegrid_core::Grid;

const SUPPORTED_PACK_VERSION: u32 = 1;
const BUNDLED_PACK: &str = include_str!("../levels/default.toml");

/// Named level ready to be handed to the world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Level {
    pub(crate) name: String,
    pub(crate) grid: Grid,
}

#[derive(Debug, serde::Deserialize)]
struct Pack {
    version: u32,
    levels: Vec<LevelEntry>,
}

#[derive(Debug, serde::Deserialize)]
struct LevelEntry {
    name: String,
    rows: Vec<String>,
}

/// Levels shipped inside the binary.
pub(crate) fn bundled() -> Result<Vec<Level>> {
    parse_pack(BUNDLED_PACK).context("bundled level pack is invalid")
}

/// Loads the pack stored at `path`.
pub(crate) fn from_path(path: &Path) -> Result<Vec<Level>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read level pack at {}", path.display()))?;
    parse_pack(&contents).with_context(|| format!("invalid level pack {}", path.display()))
}

fn parse_pack(contents: &str) -> Result<Vec<Level>> {
    let pack: Pack = toml::from_str(contents).context("failed to parse level pack toml")?;
    if pack.version != SUPPORTED_PACK_VERSION {
        bail!(
            "unsupported level pack version {}; expected {}",
            pack.version,
            SUPPORTED_PACK_VERSION
        );
    }
    if pack.levels.is_empty() {
        bail!("level pack contains no levels");
    }

    pack.levels
        .into_iter()
        .map(|entry| {
            let grid = Grid::parse(&entry.rows.join("\n"))
                .with_context(|| format!("level `{}` has an invalid layout", entry.name))?;
            Ok(Level {
                name: entry.name,
                grid,
            })
        })
        .collect()
}
