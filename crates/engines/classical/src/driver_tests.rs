use super::*;
use crate::eval::PieceSquareEvaluator;
use crate::score::MATE_SCORE;
use crate::test_tree::{TreeEvaluator, TreeGame};
use chess_core::{Game, SearchError};

const CACHE_CAPACITY: usize = 1 << 12;

/// Move 1 looks best at one ply but loses at two; move 3 is the reverse.
fn trap_tree() -> TreeGame {
    let mut game = TreeGame::new(0);
    let bait = game.add_node(0, 10);
    game.add_leaves(bait, &[-50]);
    let quiet = game.add_node(0, 0);
    game.add_leaves(quiet, &[5]);
    game
}

#[test]
fn test_single_ply_takes_the_bait() {
    let mut game = trap_tree();
    let mut cache = TranspositionCache::new(CACHE_CAPACITY);
    let result = choose_move(&mut game, &TreeEvaluator, &mut cache, 1).unwrap();

    assert_eq!(result.best_move, Some(1));
    assert_eq!(result.score, 10);
    assert_eq!(result.depth, 1);
}

#[test]
fn test_deeper_iteration_replaces_shallow_choice() {
    let mut game = trap_tree();
    let mut cache = TranspositionCache::new(CACHE_CAPACITY);
    let result = choose_move(&mut game, &TreeEvaluator, &mut cache, 2).unwrap();

    assert_eq!(result.best_move, Some(3));
    assert_eq!(result.score, 5);
    assert_eq!(result.depth, 2);
    assert!(result.nodes > 0);
}

#[test]
fn test_chosen_move_is_committed() {
    let mut game = trap_tree();
    let mut cache = TranspositionCache::new(CACHE_CAPACITY);
    choose_move(&mut game, &TreeEvaluator, &mut cache, 2).unwrap();

    assert_eq!(game.current(), 3);
    assert_eq!(game.undo_move(), Some(3));
    assert_eq!(game.current(), 0);
}

#[test]
fn test_ties_go_to_first_move() {
    let mut game = TreeGame::new(0);
    game.add_leaves(0, &[7, 7, 3]);
    let mut cache = TranspositionCache::new(CACHE_CAPACITY);
    let result = choose_move(&mut game, &TreeEvaluator, &mut cache, 3).unwrap();

    assert_eq!(result.best_move, Some(1));
    assert_eq!(result.score, 7);
}

#[test]
fn test_zero_depth_still_searches_one_ply() {
    let mut game = trap_tree();
    let mut cache = TranspositionCache::new(CACHE_CAPACITY);
    let result = choose_move(&mut game, &TreeEvaluator, &mut cache, 0).unwrap();

    assert_eq!(result.best_move, Some(1));
    assert_eq!(result.depth, 1);
}

#[test]
fn test_terminal_root_has_no_move() {
    let mut game = trap_tree();
    game.set_terminal(0);
    let mut cache = TranspositionCache::new(CACHE_CAPACITY);
    let result = choose_move(&mut game, &TreeEvaluator, &mut cache, 3).unwrap();

    assert_eq!(result.best_move, None);
    assert_eq!(result.depth, 0);
    assert_eq!(game.current(), 0);
}

#[test]
fn test_childless_root_has_no_move() {
    let mut game = TreeGame::new(-12);
    let mut cache = TranspositionCache::new(CACHE_CAPACITY);
    let result = choose_move(&mut game, &TreeEvaluator, &mut cache, 3).unwrap();

    assert_eq!(result.best_move, None);
    assert_eq!(result.score, -12);
}

#[test]
fn test_broken_undo_is_reported() {
    let mut game = trap_tree();
    game.leak_undo = true;
    let mut cache = TranspositionCache::new(CACHE_CAPACITY);
    let err = choose_move(&mut game, &TreeEvaluator, &mut cache, 2).unwrap_err();

    assert!(matches!(err, SearchError::InconsistentState { .. }));
}

#[test]
fn test_results_match_without_cache() {
    for seed in 0..25 {
        let mut cached_game = TreeGame::random(seed, 4, 4);
        let mut plain_game = cached_game.clone();

        let mut cache = TranspositionCache::new(CACHE_CAPACITY);
        let mut disabled = TranspositionCache::disabled();
        let with_cache = choose_move(&mut cached_game, &TreeEvaluator, &mut cache, 4).unwrap();
        let without = choose_move(&mut plain_game, &TreeEvaluator, &mut disabled, 4).unwrap();

        assert_eq!(with_cache.best_move, without.best_move, "seed {seed}");
        assert_eq!(with_cache.score, without.score, "seed {seed}");
    }
}

#[test]
fn test_finds_mate_in_one_on_board() {
    let mut game = Game::from_fen("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1").unwrap();
    let mut cache = TranspositionCache::new(CACHE_CAPACITY);
    let result = choose_move(&mut game, &PieceSquareEvaluator::new(), &mut cache, 2).unwrap();

    assert_eq!(result.best_move.map(|mv| mv.to_string()).as_deref(), Some("e1e8"));
    assert_eq!(result.score, MATE_SCORE - 1);
    assert!(game.is_terminal());
}
