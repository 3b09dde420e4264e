//! Icon Elements
//!
//! The output sink of rendering: an icon holds the most recently rendered
//! item and the container slots it occupies. Icons are cheap handles; clones
//! share state, so a texture callback firing on another thread writes into
//! the same icon the menu displays.

use crate::context::Context;
use crate::item::ItemStack;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Container dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    pub width: usize,
    pub height: usize,
}

impl Scale {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Standard chest row layout
    pub fn chest(rows: usize) -> Self {
        Self::new(9, rows)
    }

    pub fn size(&self) -> usize {
        self.width * self.height
    }
}

/// One position inside a container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pos {
    Index(usize),
    Coord { x: usize, y: usize },
}

/// Declared placement of a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot(Vec<Pos>);

impl Slot {
    pub fn new(positions: Vec<Pos>) -> Self {
        Slot(positions)
    }

    pub fn index(index: usize) -> Self {
        Slot(vec![Pos::Index(index)])
    }

    pub fn positions(&self) -> &[Pos] {
        &self.0
    }

    /// Flat indexes within `scale`; out-of-bounds positions are dropped.
    pub fn flat_release(&self, scale: &Scale) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.0.len());
        for pos in &self.0 {
            let flat = match *pos {
                Pos::Index(i) => Some(i),
                Pos::Coord { x, y } if x < scale.width && y < scale.height => {
                    Some(y * scale.width + x)
                }
                Pos::Coord { .. } => None,
            };
            if let Some(i) = flat.filter(|i| *i < scale.size()) {
                if !out.contains(&i) {
                    out.push(i);
                }
            }
        }
        out
    }
}

/// Callback receiving a texture's base item
pub type ItemCallback = Box<dyn FnOnce(ItemStack) + Send + 'static>;

/// Produces the base item a frame renders on top of
///
/// Implementations may call back immediately or later from any thread, or
/// never when the source cannot produce an item.
pub trait TextureSource: Send + Sync {
    fn generate_item(&self, context: &Context, callback: ItemCallback);
}

struct IconState {
    context: Context,
    item: RwLock<ItemStack>,
    slots: RwLock<Vec<usize>>,
}

/// Render target for one menu element
#[derive(Clone)]
pub struct IconElement {
    state: Arc<IconState>,
}

impl IconElement {
    pub fn new(context: Context, item: ItemStack) -> Self {
        Self {
            state: Arc::new(IconState {
                context,
                item: RwLock::new(item),
                slots: RwLock::new(Vec::new()),
            }),
        }
    }

    pub fn context(&self) -> &Context {
        &self.state.context
    }

    pub fn item_stack(&self) -> ItemStack {
        self.state.item.read().clone()
    }

    pub fn set_item_stack(&self, item: ItemStack) {
        *self.state.item.write() = item;
    }

    pub fn slots(&self) -> Vec<usize> {
        self.state.slots.read().clone()
    }

    pub fn set_slots(&self, slots: Vec<usize>) {
        *self.state.slots.write() = slots;
    }
}

impl fmt::Debug for IconElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IconElement")
            .field("context", &self.state.context)
            .field("slots", &*self.state.slots.read())
            .finish()
    }
}
