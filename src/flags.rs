//! Scratch flag state shared by the bulk graph algorithms.
//!
//! Flags are not part of an [`crate::Area`]. Each algorithm run owns a [`FlagMap`]; a fresh
//! map is the reset state, so no pass can observe marks left behind by another.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use rustc_hash::FxHashMap;

use crate::model::AreaId;

/// Bitmask of per-area marks.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AreaFlags(u32);

impl AreaFlags {
    /// No mark.
    pub const NONE: AreaFlags = AreaFlags(0);
    /// Selected by the running pass.
    pub const SET: AreaFlags = AreaFlags(1);
    /// On the current DFS path.
    pub const PROCESSING: AreaFlags = AreaFlags(2);
    /// Fully explored by the cycle check.
    pub const FINISHED: AreaFlags = AreaFlags(4);
    /// Finalized by the overlap reset.
    pub const PROCESSED: AreaFlags = AreaFlags(8);
    /// Free for caller-defined passes; no built-in algorithm sets it.
    pub const REVERSED: AreaFlags = AreaFlags(16);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn from_bits(bits: u32) -> Self {
        AreaFlags(bits)
    }

    /// True when every bit of `other` is set.
    pub const fn contains(self, other: AreaFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: AreaFlags) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    pub fn remove(&mut self, other: AreaFlags) {
        self.0 &= !other.0;
    }
}

impl BitOr for AreaFlags {
    type Output = AreaFlags;

    fn bitor(self, rhs: AreaFlags) -> AreaFlags {
        AreaFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for AreaFlags {
    fn bitor_assign(&mut self, rhs: AreaFlags) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for AreaFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(AreaFlags, &str); 5] = [
            (AreaFlags::SET, "SET"),
            (AreaFlags::PROCESSING, "PROCESSING"),
            (AreaFlags::FINISHED, "FINISHED"),
            (AreaFlags::PROCESSED, "PROCESSED"),
            (AreaFlags::REVERSED, "REVERSED"),
        ];
        if self.is_none() {
            return f.write_str("NONE");
        }
        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Per-run flag storage keyed by area id. Missing entries read as [`AreaFlags::NONE`].
#[derive(Debug, Default, Clone)]
pub struct FlagMap {
    flags: FxHashMap<AreaId, AreaFlags>,
}

impl FlagMap {
    /// An all-`NONE` map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flags of `id`; `NONE` when never marked.
    pub fn get(&self, id: AreaId) -> AreaFlags {
        self.flags.get(&id).copied().unwrap_or_default()
    }

    /// Overwrites the flags of `id`.
    pub fn set(&mut self, id: AreaId, flags: AreaFlags) {
        if flags.is_none() {
            self.flags.remove(&id);
        } else {
            self.flags.insert(id, flags);
        }
    }

    /// ORs `flags` into the flags of `id`.
    pub fn insert(&mut self, id: AreaId, flags: AreaFlags) {
        *self.flags.entry(id).or_default() |= flags;
    }

    pub fn contains(&self, id: AreaId, flags: AreaFlags) -> bool {
        self.get(id).contains(flags)
    }

    /// Back to the all-`NONE` state.
    pub fn reset(&mut self) {
        self.flags.clear();
    }

    pub fn is_clear(&self) -> bool {
        self.flags.is_empty()
    }

    /// Ids whose flags contain every bit of `flags`, ascending.
    pub fn ids_with(&self, flags: AreaFlags) -> Vec<AreaId> {
        let mut ids: Vec<AreaId> = self
            .flags
            .iter()
            .filter(|(_, value)| value.contains(flags))
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        ids
    }

    pub(crate) fn any_with(&self, flags: AreaFlags) -> bool {
        self.flags.values().any(|value| value.intersects(flags))
    }
}
