//! Path propagation: which regions each symbol reaches, and whether the board is won.

use std::collections::HashSet;

use itertools::Itertools;
use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Bfs;
use serde::Serialize;
use unordered_pair::UnorderedPair;

use crate::board::Board;
use crate::cell::NodeId;
use crate::location::Location;
use crate::symbol::SymbolID;

/// The outcome of propagating every symbol's path through a board.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Connectivity {
    /// Per symbol, in board order: whether the flood from its start reached its end.
    pub satisfied: Vec<bool>,
    /// Every symbol is satisfied.
    pub won: bool,
}

impl Board {
    /// Top-level regions as vertices, joined wherever two adjacent regions share a color.
    pub(crate) fn color_graph(&self) -> UnGraphMap<NodeId, ()> {
        let regions = self.top_level();
        let edges = regions.iter()
            .flat_map(|id| {
                let color = self.node(*id).color;
                self.adjacent(*id)
                    .into_iter()
                    .filter(move |other| self.node(*other).color == color)
                    .map(move |other| UnorderedPair(*id, other))
            })
            .collect::<HashSet<UnorderedPair<NodeId>>>();

        let mut graph = UnGraphMap::with_capacity(regions.len(), edges.len());
        for id in regions {
            graph.add_node(id);
        }
        for UnorderedPair(a, b) in edges {
            graph.add_edge(a, b, ());
        }

        graph
    }

    /// Mark `ident` on the region at `seed` and everything reachable from it, if that region has the symbol's color.
    fn flood(&mut self, graph: &UnGraphMap<NodeId, ()>, ident: SymbolID, seed: Location, index: usize) {
        let origin = self.at(seed);
        if self.node(origin).color != self.symbols[index].color {
            return;
        }

        // explicit queue, visited set local to this walk
        let mut bfs = Bfs::new(graph, origin);
        while let Some(id) = bfs.next(graph) {
            if let Some(node) = self.arena.get_mut(id) {
                node.paths.set(ident);
            }
        }
    }

    /// Recompute every region's path flags and report which symbols are satisfied.
    ///
    /// For each symbol, the flood from its start runs first; the symbol is satisfied if that flood reached its end.
    /// The end then floods too, so both endpoints' regions carry the flag even when they are apart.
    pub fn update_path(&mut self) -> Connectivity {
        let regions = self.top_level();
        for id in regions.iter() {
            if let Some(node) = self.arena.get_mut(*id) {
                node.paths.clear();
            }
        }

        let graph = self.color_graph();
        let satisfied = (0..self.symbols.len())
            .map(|index| {
                let symbol = self.symbols[index];
                self.flood(&graph, symbol.ident, symbol.start, index);
                let reached = self.node_at(symbol.end).paths.get(symbol.ident);
                self.flood(&graph, symbol.ident, symbol.end, index);
                reached
            })
            .collect_vec();

        Connectivity {
            won: satisfied.iter().all(|s| *s),
            satisfied,
        }
    }
}

/// Same as [`Board::update_path`].
pub fn recompute_connectivity(board: &mut Board) -> Connectivity {
    board.update_path()
}
