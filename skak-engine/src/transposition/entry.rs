use skak_core::Move;

use crate::evaluation::Evaluation;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Exact,
    Lowerbound,
    Upperbound,
}

#[derive(Clone, Copy)]
pub struct TTEntry {
    zobrist: u64,
    depth: u8,
    score: Evaluation,
    node_type: NodeType,
    best_move: Option<Move>,
}

impl TTEntry {
    pub fn new(zobrist: u64, depth: u8, score: Evaluation, node_type: NodeType, best_move: Option<Move>) -> Self {
        Self { zobrist, depth, score, node_type, best_move }
    }

    pub fn zobrist(&self) -> u64 {
        self.zobrist
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn score(&self) -> Evaluation {
        self.score
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn best_move(&self) -> Option<Move> {
        self.best_move
    }
}
