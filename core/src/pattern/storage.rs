//! Binary pattern database files.
//!
//! Layout, little-endian:
//!
//! ```text
//! magic      4 bytes  "TPDB"
//! version    u8       1
//! dimension  u8
//! goal       dimension² bytes, tile per cell
//! tile count u8
//! tiles      tile count bytes
//! complete   u8       1 when the build covered every abstract state
//! entries    u64
//! entry      u64 abstract key, u8 distance (repeated)
//! ```

use super::PatternDatabase;
use super::build::DistanceTable;
use crate::error::{PuzzleError, Result};
use crate::puzzle::Board;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use memmap2::Mmap;
use rustc_hash::FxHashMap;
use std::fs::File;
use std::io::{BufWriter, Cursor, Read, Write};
use std::path::{Path, PathBuf};

const MAGIC: &[u8; 4] = b"TPDB";
const VERSION: u8 = 1;
const ENTRY_BYTES: usize = 9;

pub fn open_memory_mapped_file(file_path: &Path) -> std::io::Result<Mmap> {
    let file = File::open(file_path)?;
    unsafe { Mmap::map(&file) }
}

pub fn save(database: &PatternDatabase, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("pdb.tmp");
    {
        let mut writer = BufWriter::new(File::create(&temp_path)?);
        let goal = database.goal();
        writer.write_all(MAGIC)?;
        writer.write_u8(VERSION)?;
        writer.write_u8(goal.dimension() as u8)?;
        writer.write_all(goal.tiles())?;
        writer.write_u8(database.tiles().len() as u8)?;
        writer.write_all(database.tiles())?;
        writer.write_u8(u8::from(database.stats().complete))?;

        let mut entries: Vec<(u64, u8)> = database.entries().collect();
        entries.sort_unstable();
        writer.write_u64::<LittleEndian>(entries.len() as u64)?;
        for (key, distance) in entries {
            writer.write_u64::<LittleEndian>(key)?;
            writer.write_u8(distance)?;
        }
        writer.flush()?;
    }
    std::fs::rename(&temp_path, path)?;
    Ok(())
}

pub fn load(path: &Path) -> Result<PatternDatabase> {
    let data = open_memory_mapped_file(path)?;
    let corrupt = |reason: &str| PuzzleError::CorruptDatabase {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };
    let truncated = |_: std::io::Error| corrupt("truncated");

    let mut cursor = Cursor::new(&data[..]);
    let mut magic = [0u8; 4];
    cursor.read_exact(&mut magic).map_err(truncated)?;
    if &magic != MAGIC {
        return Err(corrupt("bad magic"));
    }
    let version = cursor.read_u8().map_err(truncated)?;
    if version != VERSION {
        return Err(corrupt(&format!("unsupported version {version}")));
    }

    let dimension = cursor.read_u8().map_err(truncated)? as usize;
    let mut goal_tiles = vec![0u8; dimension * dimension];
    cursor.read_exact(&mut goal_tiles).map_err(truncated)?;
    let goal = Board::new(dimension, &goal_tiles).map_err(|error| corrupt(&error.to_string()))?;

    let tile_count = cursor.read_u8().map_err(truncated)? as usize;
    let mut tiles = vec![0u8; tile_count];
    cursor.read_exact(&mut tiles).map_err(truncated)?;
    let complete = cursor.read_u8().map_err(truncated)? == 1;

    let entry_count = cursor.read_u64::<LittleEndian>().map_err(truncated)? as usize;
    let remaining = data.len() - cursor.position() as usize;
    if entry_count.checked_mul(ENTRY_BYTES) != Some(remaining) {
        return Err(corrupt("entry count does not match file size"));
    }

    let mut table: DistanceTable = FxHashMap::default();
    table.reserve(entry_count);
    for _ in 0..entry_count {
        let key = cursor.read_u64::<LittleEndian>().map_err(truncated)?;
        let distance = cursor.read_u8().map_err(truncated)?;
        table.insert(key, distance);
    }

    PatternDatabase::from_table(&goal, &tiles, table, complete).map_err(|error| corrupt(&error.to_string()))
}

/// File for partition `index` of a composite stored under `prefix`.
pub fn partition_path(prefix: &Path, index: usize) -> PathBuf {
    let stem = prefix
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "pattern".to_string());
    prefix.with_file_name(format!("{stem}_{index}.pdb"))
}
