use crate::rules::{MoveGuard, Rules};

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`.
pub fn perft<R: Rules>(rules: &mut R, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = rules.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for mv in moves {
        let mut child = MoveGuard::new(rules, mv);
        nodes += perft(&mut *child, depth - 1);
    }
    nodes
}
