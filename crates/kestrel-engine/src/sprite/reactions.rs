use bitflags::bitflags;
use smallvec::SmallVec;

bitflags! {
    /// Sprite properties whose mutation can trigger a recompute.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct Property: u16 {
        const SCALE         = 1 << 0;
        const SCALE_X       = 1 << 1;
        const SCALE_Y       = 1 << 2;
        const RECT          = 1 << 3;
        const FLIP_X        = 1 << 4;
        const FLIP_Y        = 1 << 5;
        const TEXTURE_ATLAS = 1 << 6;
        const POSITION      = 1 << 7;
        const ANCHOR_POINT  = 1 << 8;
        const VISIBLE       = 1 << 9;
        const Z_INDEX       = 1 << 10;
    }
}

/// Derived state a sprite knows how to rebuild.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Reaction {
    /// Move the quad registration to the current atlas.
    UpdateTextureQuad,
    /// Rebuild draw/texture rects from rect + flips.
    UpdateQuad,
}

/// Per-sprite dependency table: which reactions watch which properties.
///
/// Reactions fire in registration order, each at most once per notification,
/// however many of its watched properties changed together.
#[derive(Debug, Clone, Default)]
pub struct Reactions {
    entries: SmallVec<[(Reaction, Property); 4]>,
}

impl Reactions {
    pub fn new() -> Self {
        Self::default()
    }

    /// The table every sprite starts with.
    pub fn sprite() -> Self {
        let mut r = Self::new();
        r.watch(Reaction::UpdateTextureQuad, Property::TEXTURE_ATLAS);
        r.watch(
            Reaction::UpdateQuad,
            Property::SCALE
                | Property::SCALE_X
                | Property::SCALE_Y
                | Property::RECT
                | Property::FLIP_X
                | Property::FLIP_Y,
        );
        r
    }

    /// Adds `properties` to the watch set of `reaction`.
    pub fn watch(&mut self, reaction: Reaction, properties: Property) {
        match self.entries.iter_mut().find(|(r, _)| *r == reaction) {
            Some((_, watched)) => *watched |= properties,
            None => self.entries.push((reaction, properties)),
        }
    }

    /// Properties `reaction` currently watches.
    pub fn watched_by(&self, reaction: Reaction) -> Property {
        self.entries
            .iter()
            .find(|(r, _)| *r == reaction)
            .map_or(Property::empty(), |(_, p)| *p)
    }

    /// Reactions due after `changed`, in registration order.
    pub fn triggered(&self, changed: Property) -> SmallVec<[Reaction; 4]> {
        self.entries
            .iter()
            .filter(|(_, watched)| watched.intersects(changed))
            .map(|(r, _)| *r)
            .collect()
    }
}
