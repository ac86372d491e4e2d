//! The session state store: board, move log, and active screen.

use dropfour_protocol::{Board, Move};
use tokio::sync::watch;

/// Which top-level view should be active.
///
/// Exactly one is active at a time. The connection layer only ever selects
/// the three terminal screens; [`Screen::InGame`] is entered from the UI
/// side via [`SessionStore::begin_game`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Pick an opponent algorithm (the initial screen).
    #[default]
    AlgorithmSelect,
    /// A game is in progress.
    InGame,
    /// Game over, nobody won.
    Draw,
    /// Game over, the human won.
    Winner,
    /// Game over, the machine won.
    Loser,
}

/// Reactive session state.
///
/// Each container is a watch channel: writers replace the value, readers
/// either take a snapshot or subscribe for changes. Cloning the store
/// clones handles onto the same underlying channels.
#[derive(Debug, Clone)]
pub struct SessionStore {
    board: watch::Sender<Board>,
    moves: watch::Sender<Vec<Move>>,
    screen: watch::Sender<Screen>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            board: watch::Sender::new(Board::default()),
            moves: watch::Sender::new(Vec::new()),
            screen: watch::Sender::new(Screen::default()),
        }
    }

    /// Snapshot of the current board.
    pub fn board(&self) -> Board {
        *self.board.borrow()
    }

    /// Snapshot of the move log, newest first.
    pub fn moves(&self) -> Vec<Move> {
        self.moves.borrow().clone()
    }

    /// The currently active screen.
    pub fn screen(&self) -> Screen {
        *self.screen.borrow()
    }

    /// Subscribes to board replacements.
    pub fn watch_board(&self) -> watch::Receiver<Board> {
        self.board.subscribe()
    }

    /// Subscribes to move-log changes.
    pub fn watch_moves(&self) -> watch::Receiver<Vec<Move>> {
        self.moves.subscribe()
    }

    /// Subscribes to screen transitions.
    pub fn watch_screen(&self) -> watch::Receiver<Screen> {
        self.screen.subscribe()
    }

    /// Replaces the board wholesale.
    pub fn set_board(&self, board: Board) {
        self.board.send_replace(board);
    }

    /// Prepends a move; the log reads newest-first.
    pub fn push_move(&self, mv: Move) {
        self.moves.send_modify(|log| log.insert(0, mv));
    }

    /// Switches the active screen.
    pub fn set_screen(&self, screen: Screen) {
        tracing::debug!(?screen, "screen changed");
        self.screen.send_replace(screen);
    }

    /// Clears the board and move log and switches to the in-game screen.
    ///
    /// Called from the UI side when a new game begins; the connection layer
    /// never resets state on its own.
    pub fn begin_game(&self) {
        self.board.send_replace(Board::default());
        self.moves.send_modify(Vec::clear);
        self.set_screen(Screen::InGame);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
