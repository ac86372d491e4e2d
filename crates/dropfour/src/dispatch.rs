//! Inbound frame dispatch: the protocol state machine.
//!
//! Every inbound text frame lands here, gets decoded, and is folded into
//! the session store. The flow per frame:
//!   1. Decode failure → alert + log the raw payload, discard.
//!   2. Server-reported error → alert with the server's text, discard.
//!   3. Otherwise dispatch on the frame variant (see the arms below).
//!
//! No frame is ever answered and nothing here retries; all failure turns
//! into a notification plus a log line.

use std::sync::Arc;

use dropfour_protocol::{decode_frame, Move, Player, ServerFrame};
use dropfour_state::{AlgorithmCatalog, Screen, SessionStore};

use crate::Notifier;

/// Maps the end frame's winner field to a terminal screen:
/// 0 draw, 1 human win, anything else machine win.
fn screen_for_winner(winner: i64) -> Screen {
    match winner {
        0 => Screen::Draw,
        1 => Screen::Winner,
        _ => Screen::Loser,
    }
}

/// Folds decoded frames into the session store.
///
/// Runs entirely inside the inbound event loop: everything is synchronous,
/// so frames are processed one at a time in arrival order. Game frames are
/// applied unconditionally even before the handshake — the server enforces
/// no ordering and neither does the client.
pub(crate) struct Dispatcher {
    store: SessionStore,
    catalog: AlgorithmCatalog,
    notifier: Arc<dyn Notifier>,
}

impl Dispatcher {
    pub(crate) fn new(
        store: SessionStore,
        catalog: AlgorithmCatalog,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            catalog,
            notifier,
        }
    }

    /// Handles one inbound text frame.
    pub(crate) fn handle_frame(&self, raw: &str) {
        let frame = match decode_frame(raw) {
            Ok(frame) => frame,
            Err(e) => {
                self.notifier.alert("Received malformed data from server.");
                tracing::error!(error = %e, payload = raw, "malformed frame");
                return;
            }
        };

        match frame {
            ServerFrame::ServerError { message } => {
                self.notifier.alert(&message);
            }
            ServerFrame::ConnectionEstablished { algorithms } => {
                self.catalog.resolve(algorithms);
            }
            ServerFrame::HumanMove { board, column } => {
                self.store.set_board(board);
                self.store.push_move(Move {
                    player: Player::Human,
                    column,
                });
            }
            ServerFrame::ComputerMove { board, column } => {
                self.store.set_board(board);
                self.store.push_move(Move {
                    player: Player::Machine,
                    column,
                });
            }
            ServerFrame::GameOver { board, winner } => {
                self.store.set_board(board);
                self.store.set_screen(screen_for_winner(winner));
            }
            ServerFrame::GameStarted {
                algorithm,
                difficulty,
            } => {
                tracing::info!(algorithm, difficulty, "server acknowledged game start");
            }
            ServerFrame::Unrecognized { status } => {
                tracing::warn!(status, "unknown status from server");
            }
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use dropfour_protocol::{Board, Cell, COLUMNS, ROWS};
    use std::sync::Mutex;

    /// Records alerts instead of showing them.
    #[derive(Default)]
    struct RecordingNotifier {
        alerts: Mutex<Vec<String>>,
    }

    impl RecordingNotifier {
        fn alerts(&self) -> Vec<String> {
            self.alerts.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn alert(&self, message: &str) {
            self.alerts.lock().unwrap().push(message.to_owned());
        }
    }

    struct Fixture {
        store: SessionStore,
        catalog: AlgorithmCatalog,
        notifier: Arc<RecordingNotifier>,
        dispatcher: Dispatcher,
    }

    fn fixture() -> Fixture {
        let store = SessionStore::new();
        let catalog = AlgorithmCatalog::new();
        let notifier = Arc::new(RecordingNotifier::default());
        let dispatcher = Dispatcher::new(
            store.clone(),
            catalog.clone(),
            Arc::clone(&notifier) as Arc<dyn Notifier>,
        );
        Fixture {
            store,
            catalog,
            notifier,
            dispatcher,
        }
    }

    /// An empty grid, JSON-encoded once (the nested wire form).
    fn nested_board() -> String {
        serde_json::to_string(&vec![vec![0u8; COLUMNS]; ROWS]).unwrap()
    }

    fn move_frame(status: &str, column: usize) -> String {
        serde_json::json!({
            "status": status,
            "board": nested_board(),
            "position": column,
        })
        .to_string()
    }

    fn end_frame(winner: i64) -> String {
        serde_json::json!({
            "status": "end",
            "board": nested_board(),
            "winner": winner,
        })
        .to_string()
    }

    #[test]
    fn test_handshake_resolves_catalog() {
        let f = fixture();
        f.dispatcher.handle_frame(
            r#"{"status":"connection_established","algorithms":["minimax","random"]}"#,
        );
        assert_eq!(
            f.catalog.peek(),
            Some(vec!["minimax".to_owned(), "random".to_owned()])
        );
    }

    #[test]
    fn test_second_handshake_keeps_the_first_catalog() {
        let f = fixture();
        f.dispatcher
            .handle_frame(r#"{"status":"connection_established","algorithms":["minimax"]}"#);
        f.dispatcher
            .handle_frame(r#"{"status":"connection_established","algorithms":["random"]}"#);
        assert_eq!(f.catalog.peek(), Some(vec!["minimax".to_owned()]));
    }

    #[test]
    fn test_move_log_is_newest_first_in_arrival_order() {
        let f = fixture();
        f.dispatcher.handle_frame(&move_frame("human_move", 3));
        f.dispatcher.handle_frame(&move_frame("computer_move", 4));
        f.dispatcher.handle_frame(&move_frame("human_move", 0));

        let log = f.store.moves();
        assert_eq!(
            log,
            vec![
                Move { player: Player::Human, column: 0 },
                Move { player: Player::Machine, column: 4 },
                Move { player: Player::Human, column: 3 },
            ]
        );
    }

    #[test]
    fn test_moves_are_applied_even_before_the_handshake() {
        let f = fixture();
        f.dispatcher.handle_frame(&move_frame("human_move", 2));
        assert_eq!(f.store.moves().len(), 1);
        assert!(!f.catalog.is_resolved());
    }

    #[test]
    fn test_malformed_frame_mutates_nothing_and_alerts() {
        let f = fixture();
        f.dispatcher.handle_frame("{not json");

        assert_eq!(f.store.board(), Board::default());
        assert!(f.store.moves().is_empty());
        assert_eq!(f.store.screen(), Screen::AlgorithmSelect);
        assert!(!f.catalog.is_resolved());
        assert_eq!(
            f.notifier.alerts(),
            vec!["Received malformed data from server.".to_owned()]
        );
    }

    #[test]
    fn test_move_frame_with_bad_board_mutates_nothing() {
        let f = fixture();
        let raw = serde_json::json!({
            "status": "human_move",
            "board": "[[0,1]]",
            "position": 0,
        })
        .to_string();
        f.dispatcher.handle_frame(&raw);

        assert!(f.store.moves().is_empty());
        assert_eq!(f.store.board(), Board::default());
        assert_eq!(f.notifier.alerts().len(), 1);
    }

    #[test]
    fn test_server_error_is_surfaced_verbatim() {
        let f = fixture();
        f.dispatcher
            .handle_frame(r#"{"error":"Invalid input. Please choose algorithm from: MiniMax"}"#);
        assert_eq!(
            f.notifier.alerts(),
            vec!["Invalid input. Please choose algorithm from: MiniMax".to_owned()]
        );
        assert_eq!(f.store.screen(), Screen::AlgorithmSelect);
    }

    #[test]
    fn test_end_frame_winner_mapping() {
        for (winner, expected) in [
            (0, Screen::Draw),
            (1, Screen::Winner),
            (2, Screen::Loser),
            (7, Screen::Loser),
        ] {
            let f = fixture();
            f.dispatcher.handle_frame(&end_frame(winner));
            assert_eq!(f.store.screen(), expected, "winner={winner}");
        }
    }

    #[test]
    fn test_unknown_status_mutates_nothing_and_stays_quiet() {
        let f = fixture();
        f.dispatcher
            .handle_frame(r#"{"status":"spectator_joined","count":3}"#);

        assert!(f.notifier.alerts().is_empty());
        assert!(f.store.moves().is_empty());
        assert_eq!(f.store.screen(), Screen::AlgorithmSelect);
    }

    #[test]
    fn test_game_started_is_log_only() {
        let f = fixture();
        f.dispatcher
            .handle_frame(r#"{"status":"game_started","algorithm":"MCTS","difficulty":2}"#);
        assert!(f.notifier.alerts().is_empty());
        assert!(f.store.moves().is_empty());
    }

    #[test]
    fn test_full_session_scenario() {
        let f = fixture();

        f.dispatcher.handle_frame(
            r#"{"status":"connection_established","algorithms":["minimax","random"]}"#,
        );
        assert_eq!(
            f.catalog.peek(),
            Some(vec!["minimax".to_owned(), "random".to_owned()])
        );

        let mut grid = vec![vec![0u8; COLUMNS]; ROWS];
        grid[5][3] = 1;
        let raw = serde_json::json!({
            "status": "human_move",
            "board": serde_json::to_string(&grid).unwrap(),
            "position": 3,
        })
        .to_string();
        f.dispatcher.handle_frame(&raw);

        assert_eq!(f.store.board().cell(5, 3), Cell::Human);
        assert_eq!(
            f.store.moves(),
            vec![Move { player: Player::Human, column: 3 }]
        );

        f.dispatcher.handle_frame(&end_frame(1));
        assert_eq!(f.store.screen(), Screen::Winner);
    }
}
