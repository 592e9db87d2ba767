use super::MAX_PATTERN_TILES;
use crate::error::{PuzzleError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Preset tile splits for disjoint pattern databases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PartitionScheme {
    /// 2x2: all three tiles together
    Whole,
    /// 3x3: {1..4} and {5..8}
    FourFour,
    /// 4x4: {1..5}, {6..10}, {11..15}
    FiveFiveFive,
    /// 4x4: {1..6}, {7..12}, {13..15}
    SixSixThree,
    /// 4x4: {1..7}, {8..15}
    SevenEight,
}

impl PartitionScheme {
    pub fn dimension(self) -> usize {
        match self {
            PartitionScheme::Whole => 2,
            PartitionScheme::FourFour => 3,
            PartitionScheme::FiveFiveFive | PartitionScheme::SixSixThree | PartitionScheme::SevenEight => 4,
        }
    }

    pub fn partitions(self) -> Vec<Vec<u8>> {
        let ranges: &[(u8, u8)] = match self {
            PartitionScheme::Whole => &[(1, 3)],
            PartitionScheme::FourFour => &[(1, 4), (5, 8)],
            PartitionScheme::FiveFiveFive => &[(1, 5), (6, 10), (11, 15)],
            PartitionScheme::SixSixThree => &[(1, 6), (7, 12), (13, 15)],
            PartitionScheme::SevenEight => &[(1, 7), (8, 15)],
        };
        ranges.iter().map(|&(low, high)| (low..=high).collect()).collect()
    }

    /// Default split for a board size.
    pub fn for_dimension(dimension: usize) -> Result<Self> {
        match dimension {
            2 => Ok(PartitionScheme::Whole),
            3 => Ok(PartitionScheme::FourFour),
            4 => Ok(PartitionScheme::FiveFiveFive),
            other => Err(PuzzleError::UnsupportedDimension(other)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PartitionScheme::Whole => "whole",
            PartitionScheme::FourFour => "4-4",
            PartitionScheme::FiveFiveFive => "5-5-5",
            PartitionScheme::SixSixThree => "6-6-3",
            PartitionScheme::SevenEight => "7-8",
        }
    }
}

impl fmt::Display for PartitionScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartitionScheme {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "whole" => Ok(PartitionScheme::Whole),
            "4-4" | "four-four" => Ok(PartitionScheme::FourFour),
            "5-5-5" | "five-five-five" => Ok(PartitionScheme::FiveFiveFive),
            "6-6-3" | "six-six-three" => Ok(PartitionScheme::SixSixThree),
            "7-8" | "seven-eight" => Ok(PartitionScheme::SevenEight),
            _ => Err(PuzzleError::InvalidPartition(format!("unknown scheme '{s}'"))),
        }
    }
}

/// Partitions must be pairwise disjoint and together cover every non-blank tile.
pub fn validate_partitions(dimension: usize, partitions: &[Vec<u8>]) -> Result<()> {
    let cells = dimension * dimension;
    if partitions.is_empty() {
        return Err(PuzzleError::InvalidPartition("no partitions".into()));
    }

    let mut covered = 0u32;
    for (index, partition) in partitions.iter().enumerate() {
        if partition.is_empty() {
            return Err(PuzzleError::InvalidPartition(format!("partition {index} is empty")));
        }
        if partition.len() > MAX_PATTERN_TILES {
            return Err(PuzzleError::InvalidPartition(format!(
                "partition {index} has {} tiles, at most {MAX_PATTERN_TILES} are supported",
                partition.len()
            )));
        }
        for &tile in partition {
            if tile == 0 || tile as usize >= cells {
                return Err(PuzzleError::InvalidPartition(format!(
                    "tile {tile} in partition {index} is not a movable tile"
                )));
            }
            if covered & (1 << tile) != 0 {
                return Err(PuzzleError::InvalidPartition(format!(
                    "tile {tile} appears in more than one partition"
                )));
            }
            covered |= 1 << tile;
        }
    }

    let missing: Vec<usize> = (1..cells).filter(|&tile| covered & (1 << tile) == 0).collect();
    if !missing.is_empty() {
        return Err(PuzzleError::InvalidPartition(format!("tiles {missing:?} are not covered")));
    }
    Ok(())
}
