//! Application state and input rules.

use tracing::{debug, info};
use twenty48_grid::{Game, MoveOutcome};

use crate::config::Palette;
use crate::input::Command;

/// Main application state.
pub struct App {
    game: Game,
    palette: Palette,
    should_quit: bool,
}

impl App {
    pub fn new(game: Game, palette: Palette) -> Self {
        Self { game, palette, should_quit: false }
    }

    /// Gets the current game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Apply one command. Moves are dropped once the game is over, and
    /// restart is only offered while it is.
    pub fn handle(&mut self, command: Command) {
        match command {
            Command::Move(direction) => {
                if self.game.is_over() {
                    debug!(%direction, "ignoring move after game over");
                    return;
                }
                if self.game.apply_move(direction) == MoveOutcome::Finished {
                    info!(score = self.game.score(), grid = %self.game.grid(), "no moves left");
                }
            }
            Command::Restart => {
                if self.game.is_over() {
                    self.game.restart();
                } else {
                    debug!("restart ignored while playing");
                }
            }
            Command::Quit => {
                info!(score = self.game.score(), "quitting");
                self.should_quit = true;
            }
        }
    }
}
