//! Regions of a board and the arena they live in.

use std::ops::Index;

use ndarray::{Array2, AssignElem};
use serde::Serialize;

use crate::color::Color;
use crate::location::Location;
use crate::symbol::{SymbolID, MAX_SYMBOLS};

/// Handle to a [`CellNode`] stored in a [`NodeArena`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(pub(crate) usize);

/// Per-symbol reachability flags, one bit per symbol.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize)]
pub struct PathFlags(u16);

const _: () = assert!(MAX_SYMBOLS <= u16::BITS as usize);

impl PathFlags {
    /// Whether `symbol` reached this region.
    pub fn get(&self, symbol: SymbolID) -> bool {
        self.0 & (1 << symbol) != 0
    }

    /// Mark `symbol` as having reached this region.
    pub fn set(&mut self, symbol: SymbolID) {
        self.0 |= 1 << symbol;
    }

    /// Unmark every symbol.
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Whether any symbol reached this region.
    pub fn any(&self) -> bool {
        self.0 != 0
    }

    /// Symbols whose flag is set, ascending.
    pub fn symbols(&self) -> impl Iterator<Item = SymbolID> + '_ {
        (0..MAX_SYMBOLS).filter(|s| self.get(*s))
    }
}

/// A rectangular region of the board: either a single 1x1 cell or a merge of equally sized regions.
#[derive(Clone, Debug)]
pub struct CellNode {
    pub(crate) pos: Location,
    pub(crate) dim: Location,
    pub(crate) color: Color,
    pub(crate) paths: PathFlags,
    pub(crate) children: Vec<NodeId>,
}

impl CellNode {
    pub(crate) fn leaf(pos: Location, color: Color) -> Self {
        Self {
            pos,
            dim: Location::UNIT,
            color,
            paths: PathFlags::default(),
            children: Vec::new(),
        }
    }

    /// Top-left cell.
    pub fn pos(&self) -> Location {
        self.pos
    }

    /// Width and height in cells.
    pub fn dim(&self) -> Location {
        self.dim
    }

    /// The corner opposite [`pos`](Self::pos), i.e. the bottom-right cell inside this region.
    pub fn opp(&self) -> Location {
        self.pos + self.dim - Location::UNIT
    }

    /// For merged regions, the majority color fixed at merge time.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Symbols whose flood reached this region at the last connectivity update.
    pub fn paths(&self) -> PathFlags {
        self.paths
    }

    /// The regions this one was merged from; empty for a single cell.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether this is an original, never merged, cell.
    pub fn is_leaf(&self) -> bool {
        self.dim == Location::UNIT
    }

    /// Whether `location` lies inside this region.
    pub fn contains(&self, location: Location) -> bool {
        let opp = self.opp();
        (self.pos.0..=opp.0).contains(&location.0) && (self.pos.1..=opp.1).contains(&location.1)
    }

    /// Write the color of every leaf under this node into `colors`, indexed `(y, x)`.
    pub fn write_colors(&self, arena: &NodeArena, colors: &mut Array2<Color>) {
        if self.is_leaf() {
            if let Some(slot) = colors.get_mut(self.pos.as_index()) {
                slot.assign_elem(self.color);
            }
            return;
        }

        for child in self.children.iter().filter_map(|id| arena.get(*id)) {
            child.write_colors(arena, colors);
        }
    }
}

/// Slot storage for every live [`CellNode`] of a board.
///
/// Freed slots are recycled, so a [`NodeId`] must not be used after the node it names is freed.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    slots: Vec<Option<CellNode>>,
    free: Vec<usize>,
}

impl NodeArena {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn alloc(&mut self, node: CellNode) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(node);
                NodeId(index)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// The node behind `id`, or `None` once it has been freed.
    pub fn get(&self, id: NodeId) -> Option<&CellNode> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut CellNode> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Free only `id`, handing back the node so its children can be reinstated.
    pub(crate) fn free(&mut self, id: NodeId) -> Option<CellNode> {
        let node = self.slots.get_mut(id.0).and_then(Option::take)?;
        self.free.push(id.0);
        Some(node)
    }

    /// Free `id` and everything it owns. Returns the number of nodes freed.
    pub(crate) fn destroy_subtree(&mut self, id: NodeId) -> usize {
        let mut pending = vec![id];
        let mut freed = 0;
        while let Some(next) = pending.pop() {
            if let Some(node) = self.free(next) {
                pending.extend(node.children);
                freed += 1;
            }
        }
        freed
    }

    /// Number of live nodes.
    pub fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}

impl Index<NodeId> for NodeArena {
    type Output = CellNode;

    fn index(&self, id: NodeId) -> &Self::Output {
        match self.get(id) {
            Some(node) => node,
            None => panic!("stale node handle {id:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merged(arena: &mut NodeArena) -> NodeId {
        let a = arena.alloc(CellNode::leaf(Location(0, 0), Color::Red));
        let b = arena.alloc(CellNode::leaf(Location(1, 0), Color::Indigo));
        arena.alloc(CellNode {
            pos: Location(0, 0),
            dim: Location(2, 1),
            color: Color::Red,
            paths: PathFlags::default(),
            children: vec![a, b],
        })
    }

    #[test]
    fn destroy_subtree_frees_children() {
        let mut arena = NodeArena::default();
        let parent = merged(&mut arena);
        assert_eq!(arena.live(), 3);
        assert_eq!(arena.destroy_subtree(parent), 3);
        assert_eq!(arena.live(), 0);
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut arena = NodeArena::default();
        let parent = merged(&mut arena);
        arena.free(parent);
        let again = arena.alloc(CellNode::leaf(Location(5, 5), Color::White));
        assert_eq!(again, parent);
        assert_eq!(arena.get(again).map(CellNode::pos), Some(Location(5, 5)));
    }

    #[test]
    fn write_colors_recurses_into_children() {
        let mut arena = NodeArena::default();
        let parent = merged(&mut arena);
        let mut colors = Array2::from_elem((1, 2), Color::White);
        arena.get(parent).unwrap().write_colors(&arena, &mut colors);
        assert_eq!(colors.into_raw_vec(), vec![Color::Red, Color::Indigo]);
    }

    #[test]
    fn geometry() {
        let node = CellNode {
            pos: Location(1, 2),
            dim: Location(2, 3),
            color: Color::Green,
            paths: PathFlags::default(),
            children: Vec::new(),
        };
        assert_eq!(node.opp(), Location(2, 4));
        assert!(node.contains(Location(2, 4)));
        assert!(!node.contains(Location(3, 4)));
        assert!(!node.is_leaf());
    }

    #[test]
    fn path_flags() {
        let mut flags = PathFlags::default();
        flags.set(3);
        flags.set(15);
        assert!(flags.get(3) && flags.get(15) && !flags.get(0));
        assert_eq!(flags.symbols().collect::<Vec<_>>(), vec![3, 15]);
        flags.clear();
        assert!(!flags.any());
    }
}
