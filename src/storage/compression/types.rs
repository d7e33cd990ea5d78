/// Compression types considered by the planner
///
/// The set is closed: every candidate column group is priced under each of
/// these encodings and the cheapest one wins.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column-group encoding identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CompressionType {
    /// Dictionary encoding with a 1-byte code per row
    /// Best for: up to 255 distinct tuples
    Dict1,

    /// Dictionary encoding with a 2-byte code per row
    /// Best for: up to 65534 distinct tuples
    Dict2,

    /// Run-length encoding of each tuple's row offsets
    /// Best for: sorted or clustered data
    RunLength,

    /// Segmented offset lists per tuple
    /// Best for: many distinct tuples over sparse data
    OffsetList,

    /// Dense or sparse row storage, no encoding
    Uncompressed,
}

impl CompressionType {
    /// Number of compression types
    pub const COUNT: usize = 5;

    /// All compression types in enum order
    pub const ALL: [CompressionType; Self::COUNT] = [
        CompressionType::Dict1,
        CompressionType::Dict2,
        CompressionType::RunLength,
        CompressionType::OffsetList,
        CompressionType::Uncompressed,
    ];

    /// Returns human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            CompressionType::Dict1 => "DDC1",
            CompressionType::Dict2 => "DDC2",
            CompressionType::RunLength => "RLE",
            CompressionType::OffsetList => "OLE",
            CompressionType::Uncompressed => "Uncompressed",
        }
    }

    /// Position of this type in `ALL`
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for CompressionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Estimated size in bytes per compression type
///
/// `u64::MAX` marks an encoding that cannot represent the column group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompressionSizes([u64; CompressionType::COUNT]);

impl CompressionSizes {
    pub fn new(sizes: [u64; CompressionType::COUNT]) -> Self {
        Self(sizes)
    }

    /// Builds the table by pricing every type once
    pub fn try_from_fn<E, F>(mut price: F) -> Result<Self, E>
    where
        F: FnMut(CompressionType) -> Result<u64, E>,
    {
        let mut sizes = [0u64; CompressionType::COUNT];
        for ct in CompressionType::ALL {
            sizes[ct.index()] = price(ct)?;
        }
        Ok(Self(sizes))
    }

    pub fn get(&self, ct: CompressionType) -> u64 {
        self.0[ct.index()]
    }

    /// Whether the encoding can represent the group at all
    pub fn is_feasible(&self, ct: CompressionType) -> bool {
        self.get(ct) != u64::MAX
    }

    /// Iterates (type, size) pairs in enum order
    pub fn iter(&self) -> impl Iterator<Item = (CompressionType, u64)> + '_ {
        CompressionType::ALL.iter().map(move |ct| (*ct, self.get(*ct)))
    }

    /// Cheapest type and its size; ties keep the earlier type
    pub fn min(&self) -> (CompressionType, u64) {
        let mut best = (CompressionType::ALL[0], self.0[0]);
        for (ct, size) in self.iter().skip(1) {
            if size < best.1 {
                best = (ct, size);
            }
        }
        best
    }
}
