//! Stable element identities.
//!
//! Ids are 32-bit one-at-a-time hashes so that the same declaration produces
//! the same id in every frame and in every process.

/// Identity of an element within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementId(pub u32);

/// Label of the implicit container every frame's top-level elements live in.
pub const ROOT_CONTAINER_LABEL: &str = "llay__RootContainer";

fn mix(mut hash: u32, byte: u32) -> u32 {
    hash = hash.wrapping_add(byte);
    hash = hash.wrapping_add(hash << 10);
    hash ^ (hash >> 6)
}

fn finish(mut hash: u32) -> u32 {
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash = hash.wrapping_add(hash << 15);
    // Zero is reserved so a defaulted id never collides with a real one.
    hash.wrapping_add(1)
}

fn hash_label(label: &str, seed: u32) -> u32 {
    label.bytes().fold(seed, |hash, byte| mix(hash, byte as u32))
}

impl ElementId {
    /// Id of an explicitly labelled element.
    pub fn from_label(label: &str) -> Self {
        Self(finish(hash_label(label, 0)))
    }

    /// Id of the `index`-th element sharing a label, for repeated items.
    pub fn indexed(label: &str, index: u32) -> Self {
        Self(finish(mix(hash_label(label, 0), index)))
    }

    /// Id of an anonymous element: its ordinal among the parent's children,
    /// seeded with the parent's id.
    pub fn anonymous(parent: ElementId, ordinal: u32) -> Self {
        Self(finish(mix(parent.0, ordinal.wrapping_add(48))))
    }

    /// Id of the implicit root container.
    pub fn root() -> Self {
        Self::from_label(ROOT_CONTAINER_LABEL)
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
