//! Explicit game trees for exercising the search without chess rules.

use chess_core::Rules;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::eval::Evaluator;
use crate::score::Score;

/// A game whose positions are the nodes of a fixed tree.
///
/// Moves are child node ids, the side to move alternates with depth and the
/// static value of every node is stored from the root player's perspective.
#[derive(Debug, Clone)]
pub struct TreeGame {
    children: Vec<Vec<usize>>,
    values: Vec<Score>,
    terminal: Vec<bool>,
    path: Vec<usize>,
    /// When set, `undo_move` silently does nothing.
    pub leak_undo: bool,
}

impl TreeGame {
    pub fn new(root_value: Score) -> Self {
        Self {
            children: vec![Vec::new()],
            values: vec![root_value],
            terminal: vec![false],
            path: vec![0],
            leak_undo: false,
        }
    }

    pub fn add_node(&mut self, parent: usize, value: Score) -> usize {
        let id = self.values.len();
        self.children.push(Vec::new());
        self.values.push(value);
        self.terminal.push(false);
        self.children[parent].push(id);
        id
    }

    /// Adds one child per value under `parent` and returns their ids.
    pub fn add_leaves(&mut self, parent: usize, values: &[Score]) -> Vec<usize> {
        values.iter().map(|&v| self.add_node(parent, v)).collect()
    }

    pub fn set_terminal(&mut self, node: usize) {
        self.terminal[node] = true;
    }

    /// Random tree of the given depth. Some inner nodes end the game early and
    /// some have no children without being terminal.
    pub fn random(seed: u64, depth: u8, max_branching: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = Self::new(rng.gen_range(-100..=100));
        let mut frontier = vec![0];

        for _ in 0..depth {
            let mut next = Vec::new();
            for &node in &frontier {
                if node != 0 && rng.gen_bool(0.08) {
                    game.set_terminal(node);
                    continue;
                }
                let branching = if node == 0 {
                    max_branching
                } else {
                    rng.gen_range(0..=max_branching)
                };
                for _ in 0..branching {
                    next.push(game.add_node(node, rng.gen_range(-100..=100)));
                }
            }
            frontier = next;
        }
        game
    }

    pub fn current(&self) -> usize {
        self.path[self.path.len() - 1]
    }

    pub fn value(&self, node: usize) -> Score {
        self.values[node]
    }
}

impl Rules for TreeGame {
    type Move = usize;
    type Side = bool;
    type Key = usize;

    fn side_to_move(&self) -> bool {
        self.path.len() % 2 == 1
    }

    fn legal_moves(&self) -> Vec<usize> {
        self.children[self.current()].clone()
    }

    fn apply_move(&mut self, mv: usize) {
        self.path.push(mv);
    }

    fn undo_move(&mut self) -> Option<usize> {
        if self.leak_undo || self.path.len() == 1 {
            return None;
        }
        self.path.pop()
    }

    fn is_terminal(&self) -> bool {
        self.terminal[self.current()]
    }

    fn position_key(&self) -> usize {
        self.current()
    }
}

/// Reads the stored node value; `true` is the root player's side.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeEvaluator;

impl Evaluator<TreeGame> for TreeEvaluator {
    fn evaluate(&self, game: &TreeGame, side: bool) -> Score {
        let value = game.value(game.current());
        if side {
            value
        } else {
            -value
        }
    }

    fn terminal_score(&self, game: &TreeGame, side: bool) -> Score {
        self.evaluate(game, side)
    }
}
