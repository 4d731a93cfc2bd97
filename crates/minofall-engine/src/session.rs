use rand::SeedableRng as _;
use rand_pcg::Pcg64Mcg;

use crate::{
    ConfigError,
    board::{GameBoard, MoveMode, Spawn},
    catalog::random_kind,
    config::GameConfig,
    grid::Grid,
    placement::RotationMode,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Paused,
    GameOver,
}

/// Player input understood by [`GameSession::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SoftDrop,
    MoveLeft,
    MoveRight,
    Rotate(RotationMode),
    HardDrop,
}

/// What the front-end has to do after a command.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CommandOutcome {
    /// The automatic drop timer must restart a full interval from now, so a
    /// piece spawned by this command does not fall immediately.
    pub reset_drop_timer: bool,
    pub cleared_rows: usize,
}

/// One game: a board, its configuration and the piece generator.
///
/// The session implements the timer and input rules; the front-end only
/// forwards ticks and commands and redraws from [`GameSession::rendered_grid`].
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    board: GameBoard,
    rng: Pcg64Mcg,
    session_state: SessionState,
}

impl GameSession {
    /// Starts a session with a generator seeded from the OS.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, Pcg64Mcg::from_os_rng())
    }

    /// Starts a session whose piece sequence is fully determined by `seed`.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, Pcg64Mcg::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: Pcg64Mcg) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = GameBoard::new(config.size()).map_err(ConfigError::BoardSize)?;
        let mut this = Self {
            config,
            board,
            rng,
            session_state: SessionState::Playing,
        };
        let spawn = this.next_spawn();
        this.board.set_mino(Some(spawn.kind), spawn.detail);
        this.check_top_out();
        Ok(this)
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &GameBoard {
        &self.board
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub fn rendered_grid(&self) -> Grid {
        self.board.rendered_grid()
    }

    pub fn toggle_pause(&mut self) {
        self.session_state = match self.session_state {
            SessionState::Playing => SessionState::Paused,
            SessionState::Paused => SessionState::Playing,
            SessionState::GameOver => SessionState::GameOver,
        };
    }

    /// Automatic fall, called once per drop interval.
    ///
    /// Returns the number of rows cleared.
    pub fn tick(&mut self) -> usize {
        if !self.session_state.is_playing() {
            return 0;
        }
        if self.board.soft_drop().is_blocked() {
            self.lock_and_spawn();
            return self.clear_full_rows();
        }
        0
    }

    pub fn apply(&mut self, command: Command) -> CommandOutcome {
        if !self.session_state.is_playing() {
            return CommandOutcome::default();
        }
        let reset_drop_timer = match command {
            Command::SoftDrop => {
                if self.board.soft_drop().is_blocked() {
                    self.lock_and_spawn();
                }
                true
            }
            Command::MoveLeft => {
                self.board.move_mino(MoveMode::Left);
                false
            }
            Command::MoveRight => {
                self.board.move_mino(MoveMode::Right);
                false
            }
            Command::Rotate(mode) => {
                self.board.rotate_mino(mode);
                false
            }
            Command::HardDrop => {
                let next = self.next_spawn();
                self.board.hard_drop(true, Some(next));
                true
            }
        };
        CommandOutcome {
            reset_drop_timer,
            cleared_rows: self.clear_full_rows(),
        }
    }

    fn next_spawn(&mut self) -> Spawn {
        let kind = random_kind(&mut self.rng);
        tracing::debug!(?kind, "next piece");
        Spawn::at(kind, self.config.spawn_origin())
    }

    fn lock_and_spawn(&mut self) {
        let next = self.next_spawn();
        self.board.lock(Some(next));
    }

    fn clear_full_rows(&mut self) -> usize {
        let rows = self.board.full_rows();
        let cleared = self.board.clear_rows(&rows);
        self.check_top_out();
        cleared
    }

    fn check_top_out(&mut self) {
        if self.board.validate().is_blocked() {
            tracing::info!("spawned piece is blocked; game over");
            self.session_state = SessionState::GameOver;
        }
    }
}
