//! Shared membership of live tiles.
//!
//! A [`Registry`] is a cheap handle; clones share the same member list. It
//! holds weak references only, so it never keeps a tile alive. Member count
//! drives layout: every member gets `viewport.width / count`.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::host::Host;
use crate::tile::TileState;

/// Identity of a tile within its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(u64);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile-{}", self.0)
    }
}

struct Member<H: Host> {
    id: TileId,
    tile: Weak<RefCell<TileState<H>>>,
}

struct Inner<H: Host> {
    members: RefCell<Vec<Member<H>>>,
    next_id: Cell<u64>,
}

/// Live-membership set shared by a group of tiles.
pub struct Registry<H: Host> {
    inner: Rc<Inner<H>>,
}

impl<H: Host> Clone for Registry<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<H: Host> Default for Registry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Host> Registry<H> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Inner {
                members: RefCell::new(Vec::new()),
                next_id: Cell::new(1),
            }),
        }
    }

    pub(crate) fn allocate_id(&self) -> TileId {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        TileId(id)
    }

    /// Number of live members. Entries whose tile was dropped are pruned.
    pub fn len(&self) -> usize {
        self.prune();
        self.inner.members.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.prune();
        self.inner.members.borrow().iter().any(|m| m.id == id)
    }

    /// Live member ids in join order.
    pub fn ids(&self) -> Vec<TileId> {
        self.prune();
        self.inner.members.borrow().iter().map(|m| m.id).collect()
    }

    pub(crate) fn join(&self, id: TileId, tile: Weak<RefCell<TileState<H>>>) {
        let mut members = self.inner.members.borrow_mut();
        if members.iter().any(|m| m.id == id) {
            return;
        }
        members.push(Member { id, tile });
        tracing::debug!(%id, members = members.len(), "tile joined registry");
    }

    pub(crate) fn leave(&self, id: TileId) -> bool {
        let mut members = self.inner.members.borrow_mut();
        let before = members.len();
        members.retain(|m| m.id != id);
        let removed = members.len() != before;
        if removed {
            tracing::debug!(%id, members = members.len(), "tile left registry");
        }
        removed
    }

    /// Recomputes layout on every live member.
    pub fn renormalize(&self) {
        let live: Vec<(TileId, Rc<RefCell<TileState<H>>>)> = {
            self.prune();
            self.inner
                .members
                .borrow()
                .iter()
                .filter_map(|m| m.tile.upgrade().map(|tile| (m.id, tile)))
                .collect()
        };
        let count = live.len();
        tracing::debug!(count, "renormalizing tile layout");

        for (id, tile) in live {
            let Ok(mut state) = tile.try_borrow_mut() else {
                tracing::warn!(%id, "tile busy during renormalize, skipping");
                continue;
            };
            if let Err(e) = state.on_membership_change(count) {
                tracing::warn!(%id, error = %e, "layout update failed");
            }
        }
    }

    fn prune(&self) {
        self.inner
            .members
            .borrow_mut()
            .retain(|m| m.tile.strong_count() > 0);
    }
}
