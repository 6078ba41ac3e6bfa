//! Game engine logic and state management.
//!
//! This module drives the [`core`](crate::core) data structures through a game:
//!
//! - [`ScoreTracker`] - score, cleared lines and level
//! - [`GravityTimer`] - restartable periodic gravity deadline
//! - [`PieceSpawner`] - current/next piece queue with a seedable RNG
//! - [`GameController`] - state machine tying board, score, timer and UI together
//!
//! # Game Flow
//!
//! 1. [`GameController::new_game`] resets the score, builds a board and starts gravity
//! 2. Player commands and gravity ticks move the falling piece
//! 3. A piece that cannot move down is locked, completed rows clear and score
//! 4. The queued piece becomes the falling piece and a new one is queued
//! 5. When the new piece has no legal placement, the loss is reported
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use bricks_engine::{Command, GameConfig, GameController, GameState};
//! # use bricks_engine::{Color, GameUi, RenderSink, ScoreState, SurfaceBoundsError};
//! # #[derive(Default)]
//! # struct Null;
//! # impl RenderSink for Null {
//! #     fn clear(&mut self) {}
//! #     fn draw_outlined_cell(
//! #         &mut self,
//! #         _: i32,
//! #         _: i32,
//! #         _: Color,
//! #     ) -> Result<(), SurfaceBoundsError> {
//! #         Ok(())
//! #     }
//! #     fn draw_filled_cell(
//! #         &mut self,
//! #         _: i32,
//! #         _: i32,
//! #         _: Color,
//! #     ) -> Result<(), SurfaceBoundsError> {
//! #         Ok(())
//! #     }
//! # }
//! # #[derive(Default)]
//! # struct NullUi(Null, Null);
//! # impl GameUi for NullUi {
//! #     type Surface = Null;
//! #     fn board_surface(&mut self) -> &mut Null { &mut self.0 }
//! #     fn preview_surface(&mut self) -> &mut Null { &mut self.1 }
//! #     fn show_score(&mut self, _: ScoreState) {}
//! #     fn notify_loss(&mut self, _: ScoreState) {}
//! # }
//!
//! let mut game = GameController::new(GameConfig::default(), NullUi::default()).unwrap();
//! game.new_game();
//! assert_eq!(game.state(), GameState::Running);
//!
//! game.handle_command(Command::Left);
//! game.advance(Duration::from_millis(900));
//! ```

pub use self::{controller::*, score::*, spawner::*, timer::*};

mod controller;
mod score;
mod spawner;
mod timer;
