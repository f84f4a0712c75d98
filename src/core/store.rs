//! Ordered in-memory collection of placed items plus the single selection.
//!
//! The store is the authoritative source for every item's target transform.
//! It never fails: operations on ids it does not know are no-ops. Media
//! sources owned by items are handed to a [`ReleaseMedia`] hook whenever the
//! store stops referencing them.

use super::constants::{DEFAULT_PLACEMENT, MIN_SCALE};
use super::layout::{facing_rotation, ring_position, LayoutConfig};
use super::media::{IngestedFile, MediaKind, MediaSource};
use glam::Vec3;

#[derive(Clone, Debug, PartialEq)]
pub struct SpatialItem {
    pub id: String,
    pub source: MediaSource,
    pub kind: MediaKind,
    pub name: String,
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
}

impl SpatialItem {
    pub fn new(id: impl Into<String>, source: MediaSource, kind: MediaKind) -> Self {
        Self {
            id: id.into(),
            source,
            kind,
            name: String::new(),
            position: Vec3::from(DEFAULT_PLACEMENT),
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

/// Fields to merge into an existing item. `None` leaves a field untouched.
#[derive(Clone, Debug, Default)]
pub struct ItemPatch {
    pub position: Option<Vec3>,
    pub rotation: Option<Vec3>,
    pub scale: Option<f32>,
    pub name: Option<String>,
    pub source: Option<MediaSource>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
    /// New items appear in front of the viewer and become selected.
    Fixed,
    /// Items are laid out on rings by index and reflowed on every change.
    Ring(LayoutConfig),
}

impl Placement {
    /// `?layout=ring` (or `gallery`) selects the ring layout.
    pub fn from_query(search: &str) -> Self {
        let query = search.trim_start_matches('?');
        let ring = query.split('&').any(|pair| {
            matches!(
                pair.split_once('='),
                Some(("layout", "ring")) | Some(("layout", "gallery"))
            )
        });
        if ring {
            Placement::Ring(LayoutConfig::default())
        } else {
            Placement::Fixed
        }
    }

    /// Multi-file uploads only make sense when items spread out; fixed
    /// placement would stack them all on one spot.
    pub fn accepts_gallery(&self) -> bool {
        matches!(self, Placement::Ring(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Receives media sources the store no longer references.
pub trait ReleaseMedia {
    fn release(&mut self, source: &MediaSource);
}

/// Release hook for stores whose sources own nothing external.
#[derive(Default)]
pub struct NoRelease;

impl ReleaseMedia for NoRelease {
    fn release(&mut self, _source: &MediaSource) {}
}

impl IngestedFile {
    /// Build the item record for this file. Ring placement positions are
    /// provisional; the store reflows them on insert.
    pub fn into_item(self, id: impl Into<String>) -> SpatialItem {
        let kind = self.kind();
        let mut item = SpatialItem::new(id, self.source, kind);
        item.name = self.name;
        item
    }
}

// Non-finite scales collapse to the minimum.
fn clamp_scale(scale: f32) -> f32 {
    if scale.is_finite() {
        scale.max(MIN_SCALE)
    } else {
        MIN_SCALE
    }
}

pub struct ItemStore {
    items: Vec<SpatialItem>,
    selected: Option<String>,
    placement: Placement,
    releaser: Box<dyn ReleaseMedia>,
}

impl ItemStore {
    pub fn new(placement: Placement) -> Self {
        Self::with_releaser(placement, Box::new(NoRelease))
    }

    pub fn with_releaser(placement: Placement, releaser: Box<dyn ReleaseMedia>) -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            placement,
            releaser,
        }
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn items(&self) -> &[SpatialItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&SpatialItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected(&self) -> Option<&SpatialItem> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    /// Display label: the item's name, or `Item <first 4 id chars>`.
    pub fn label(&self, id: &str) -> Option<String> {
        self.get(id).map(|item| {
            if item.name.is_empty() {
                format!("Item {}", item.id.chars().take(4).collect::<String>())
            } else {
                item.name.clone()
            }
        })
    }

    /// Append an item. Returns `false` when the id is already present; the
    /// rejected item's source is released unless the existing item shares it.
    pub fn add(&mut self, mut item: SpatialItem) -> bool {
        if let Some(existing) = self.get(&item.id) {
            log::warn!("[store] duplicate id {} rejected", item.id);
            let shared = existing.source == item.source;
            if !shared {
                self.releaser.release(&item.source);
            }
            return false;
        }
        item.scale = clamp_scale(item.scale);
        let id = item.id.clone();
        self.items.push(item);
        log::info!("[store] added {} (total {})", id, self.items.len());
        match self.placement {
            Placement::Fixed => self.selected = Some(id),
            Placement::Ring(config) => self.reflow(&config),
        }
        true
    }

    /// Remove an item, releasing its media. Unknown ids are ignored.
    pub fn remove(&mut self, id: &str) -> Option<SpatialItem> {
        let index = self.index_of(id)?;
        let item = self.items.remove(index);
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        self.releaser.release(&item.source);
        if let Placement::Ring(config) = self.placement {
            self.reflow(&config);
        }
        log::info!("[store] removed {} (total {})", id, self.items.len());
        Some(item)
    }

    /// Remove every item and clear the selection.
    pub fn clear(&mut self) {
        for item in self.items.drain(..) {
            self.releaser.release(&item.source);
        }
        self.selected = None;
    }

    /// Merge `patch` into the item with `id`. The id itself never changes.
    pub fn update(&mut self, id: &str, patch: ItemPatch) -> bool {
        let Some(item) = self.items.iter_mut().find(|i| i.id == id) else {
            return false;
        };
        if let Some(p) = patch.position {
            item.position = p;
        }
        if let Some(r) = patch.rotation {
            item.rotation = r;
        }
        if let Some(s) = patch.scale {
            item.scale = clamp_scale(s);
        }
        if let Some(n) = patch.name {
            item.name = n;
        }
        if let Some(src) = patch.source {
            if src != item.source {
                let old = std::mem::replace(&mut item.source, src);
                self.releaser.release(&old);
            }
        }
        true
    }

    /// Set or clear the selection. Selecting an unknown id leaves the current
    /// selection as it was.
    pub fn select(&mut self, id: Option<&str>) {
        match id {
            None => self.selected = None,
            Some(id) if self.index_of(id).is_some() => self.selected = Some(id.to_string()),
            Some(id) => log::debug!("[store] select ignored for unknown id {}", id),
        }
    }

    /// Move the selected item along one axis.
    pub fn nudge_selected(&mut self, axis: Axis, delta: f32) -> bool {
        let Some(item) = self.selected() else {
            return false;
        };
        let mut position = item.position;
        match axis {
            Axis::X => position.x += delta,
            Axis::Y => position.y += delta,
            Axis::Z => position.z += delta,
        }
        let id = item.id.clone();
        self.update(
            &id,
            ItemPatch {
                position: Some(position),
                ..Default::default()
            },
        )
    }

    /// Grow or shrink the selected item; the result never drops below
    /// [`MIN_SCALE`].
    pub fn scale_selected(&mut self, delta: f32) -> bool {
        let Some(item) = self.selected() else {
            return false;
        };
        let scale = clamp_scale(item.scale + delta);
        let id = item.id.clone();
        self.update(
            &id,
            ItemPatch {
                scale: Some(scale),
                ..Default::default()
            },
        )
    }

    /// Recompute every item's position from its index.
    fn reflow(&mut self, config: &LayoutConfig) {
        for (index, item) in self.items.iter_mut().enumerate() {
            item.position = ring_position(index, config);
            item.rotation = facing_rotation(item.position);
        }
    }
}

impl Drop for ItemStore {
    fn drop(&mut self) {
        self.clear();
    }
}
