use super::*;
use classical_engine::EngineConfig;

impl<W: Write> Session<W> {
    fn game(&self) -> &Game {
        &self.game
    }

    fn into_output(self) -> W {
        self.out
    }
}

fn session() -> Session<Vec<u8>> {
    let engine = ClassicalEngine::with_config(EngineConfig {
        max_depth: 2,
        ..EngineConfig::default()
    });
    Session::new(engine, Vec::new())
}

fn run(session: &mut Session<Vec<u8>>, lines: &[&str]) -> Vec<Flow> {
    lines
        .iter()
        .map(|line| session.handle_line(line).unwrap())
        .collect()
}

fn output(session: Session<Vec<u8>>) -> String {
    String::from_utf8(session.into_output()).unwrap()
}

#[test]
fn test_handshake() {
    let mut s = session();
    run(&mut s, &["uci", "isready"]);
    let out = output(s);

    assert!(out.starts_with("id name Classical"));
    assert!(out.contains("option name Depth type spin default 2 min 1 max 10"));
    assert!(out.contains("option name Hash type spin default 256 min 0 max 4096"));
    assert!(out.contains("uciok\n"));
    assert!(out.ends_with("readyok\n"));
}

#[test]
fn test_go_reports_mating_move() {
    let mut s = session();
    run(
        &mut s,
        &["position fen 6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1", "go"],
    );
    let out = output(s);
    assert!(out.ends_with("bestmove e1e8\n"), "{out}");
}

#[test]
fn test_position_accepts_uci_castling() {
    let mut s = session();
    run(
        &mut s,
        &["position fen 4k3/8/8/8/8/8/8/4K2R w K - 0 1 moves e1g1", "go depth 1"],
    );
    assert_eq!(s.game().ply_count(), 2);
}

#[test]
fn test_go_on_finished_game_reports_null_move() {
    let mut s = session();
    run(&mut s, &["position fen k7/8/1Q6/8/8/8/8/1K6 b - - 0 1", "go"]);
    assert!(output(s).ends_with("bestmove 0000\n"));
}

#[test]
fn test_go_depth_is_temporary() {
    let mut s = session();
    run(&mut s, &["position startpos moves e2e4", "go depth 1"]);
    assert_eq!(s.engine.config().max_depth, 2);
    assert_eq!(s.game().ply_count(), 2);
    assert!(output(s).contains("info depth 1 "));
}

#[test]
fn test_setoption_changes_depth() {
    let mut s = session();
    run(&mut s, &["setoption name Depth value 3", "go"]);
    assert_eq!(s.engine.config().max_depth, 3);
    assert!(output(s).contains("info depth 3 "));
}

#[test]
fn test_bad_position_keeps_session_alive() {
    let mut s = session();
    let flows = run(&mut s, &["position fen not a fen", "position startpos moves e2e5", "isready"]);
    assert!(flows.iter().all(|&flow| flow == Flow::Continue));
    assert!(output(s).ends_with("readyok\n"));
}

#[test]
fn test_quit_stops_loop() {
    let mut s = session();
    assert_eq!(run(&mut s, &["", "quit"]), vec![Flow::Continue, Flow::Quit]);
}

#[test]
fn test_ucinewgame_resets_game() {
    let mut s = session();
    run(&mut s, &["position startpos moves e2e4 e7e5", "ucinewgame"]);
    assert_eq!(s.game().ply_count(), 0);
}

#[test]
fn test_setoption_hash_takes_megabytes() {
    let mut s = session();
    run(&mut s, &["setoption name Hash value 16", "uci"]);
    assert_eq!(s.engine.hash_megabytes(), 16);
    assert!(output(s).contains("option name Hash type spin default 16 min 0 max 4096"));
}
