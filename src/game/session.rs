use std::time::Duration;

use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::dialog::{DialogAction, DialogOutcome, DialogPrompt};

use super::config::GameConfig;
use super::direction::Direction;
use super::grid::{Cell, Grid};
use super::snake::Snake;

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    Finished,
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    /// The snake ran into its own body
    SelfCollision,
    /// The snake covers every cell, leaving nowhere to spawn an apple
    BoardFull,
}

/// Result of a game tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    /// Whether the snake advanced this tick (false when not running)
    pub advanced: bool,
    /// Whether an apple was consumed this tick
    pub ate_apple: bool,
    /// Set on the tick that ends the game
    pub ended: Option<GameEnd>,
}

/// How an exit request was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitRequest {
    /// Game already over: the host can be notified right away
    LeaveNow,
    /// A confirmation prompt opened and the game paused behind it
    Confirming,
    /// A prompt is already on screen; nothing changed
    Ignored,
}

/// Lifecycle transition picked from a dialog outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResolution {
    /// Prompt closed, game running again
    Resumed,
    /// Session reset and running again
    Restarted,
    /// Session is done; the host should tear it down
    LeftGame { confirmed: bool },
    /// Prompt closed, the finished board stays on screen
    Closed,
}

/// All state of one game, advanced one step per scheduler tick
///
/// Generic over the random source so tests can pin apple placement with a
/// seeded RNG.
#[derive(Debug)]
pub struct GameSession<R = ThreadRng> {
    grid: Grid,
    snake: Snake,
    apple: Option<Cell>,
    eaten_apples: Vec<Cell>,
    direction: Direction,
    input_locked: bool,
    score: u32,
    phase: Phase,
    end: Option<GameEnd>,
    dialog: Option<DialogPrompt>,
    config: GameConfig,
    rng: R,
}

impl GameSession<ThreadRng> {
    /// Start a new game: default snake, one apple, running
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameSession<R> {
    /// Start a new game with the given random source
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let mut session = Self {
            grid: Grid::new(config.width),
            snake: Snake::starting(),
            apple: None,
            eaten_apples: Vec::new(),
            direction: Direction::Right,
            input_locked: false,
            score: 0,
            phase: Phase::Running,
            end: None,
            dialog: None,
            config,
            rng,
        };
        session.apple = session.spawn_apple();
        session
    }

    /// Apply a steering input; returns whether the heading changed
    ///
    /// The first direction key of a tick claims the input lock even when the
    /// reversal check then rejects it; later keys in the same tick are
    /// dropped until the next tick releases the lock.
    pub fn steer(&mut self, candidate: Direction) -> bool {
        if self.phase != Phase::Running || self.input_locked {
            return false;
        }
        self.input_locked = true;
        if candidate.is_opposite(self.direction) {
            return false;
        }
        self.direction = candidate;
        true
    }

    /// Advance the game by one step
    pub fn tick(&mut self) -> TickResult {
        if self.phase != Phase::Running {
            return TickResult {
                advanced: false,
                ate_apple: false,
                ended: None,
            };
        }
        self.input_locked = false;

        let next_head = self.grid.step(self.snake.head(), self.direction);

        // The tail cell is only safe to enter when it is about to vacate,
        // which it will not while growth is pending.
        let hits_body = self.snake.contains(next_head) && next_head != self.snake.tail();
        let hits_tail = next_head == self.snake.tail() && !self.eaten_apples.is_empty();
        if hits_body || hits_tail {
            self.finish(GameEnd::SelfCollision);
            return TickResult {
                advanced: false,
                ate_apple: false,
                ended: Some(GameEnd::SelfCollision),
            };
        }

        self.snake.advance(next_head);
        self.absorb_pending();

        let mut ate_apple = false;
        let mut ended = None;
        if let Some(apple) = self.apple {
            if self.snake.contains(apple) {
                ate_apple = true;
                self.score += 1;
                self.eaten_apples.push(apple);
                self.apple = self.spawn_apple();
                if self.apple.is_none() {
                    self.finish(GameEnd::BoardFull);
                    ended = Some(GameEnd::BoardFull);
                }
            }
        }

        TickResult {
            advanced: true,
            ate_apple,
            ended,
        }
    }

    /// Suspend the game; a no-op unless running
    pub fn pause(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::Paused;
        }
    }

    /// Continue a paused game; a no-op while a prompt is open
    pub fn resume(&mut self) {
        if self.phase == Phase::Paused && self.dialog.is_none() {
            self.phase = Phase::Running;
        }
    }

    /// Reset to a fresh game on the same board and speed
    pub fn restart(&mut self) {
        self.snake = Snake::starting();
        self.direction = Direction::Right;
        self.score = 0;
        self.eaten_apples.clear();
        self.input_locked = false;
        self.end = None;
        self.dialog = None;
        self.phase = Phase::Running;
        self.apple = self.spawn_apple();
    }

    /// Ask to leave the game
    ///
    /// A finished game is left immediately; otherwise the game pauses behind
    /// a confirmation prompt.
    pub fn request_exit(&mut self) -> ExitRequest {
        if self.dialog.is_some() {
            return ExitRequest::Ignored;
        }
        if self.phase == Phase::Finished {
            return ExitRequest::LeaveNow;
        }
        self.pause();
        self.dialog = Some(DialogPrompt::confirm_exit());
        ExitRequest::Confirming
    }

    /// Apply the player's answer to the open prompt
    ///
    /// The outcome's action tag alone picks the next lifecycle transition;
    /// dismissal falls back to the prompt's safe default action.
    pub fn resolve_dialog(&mut self, outcome: DialogOutcome) -> DialogResolution {
        let Some(prompt) = self.dialog.take() else {
            return DialogResolution::Closed;
        };
        match prompt.action_for(outcome) {
            DialogAction::ResumeGame => {
                self.resume();
                DialogResolution::Resumed
            }
            DialogAction::Restart => {
                self.restart();
                DialogResolution::Restarted
            }
            DialogAction::ToMainMenu => DialogResolution::LeftGame { confirmed: true },
            DialogAction::ClosePopup => DialogResolution::Closed,
        }
    }

    fn finish(&mut self, end: GameEnd) {
        self.phase = Phase::Finished;
        self.end = Some(end);
        self.dialog = Some(match end {
            GameEnd::SelfCollision => DialogPrompt::game_over(self.score),
            GameEnd::BoardFull => DialogPrompt::victory(self.score),
        });
    }

    /// Re-attach consumed apples whose cells the body has passed over
    fn absorb_pending(&mut self) {
        if self.eaten_apples.is_empty() {
            return;
        }
        let mut still_pending = Vec::with_capacity(self.eaten_apples.len());
        for cell in std::mem::take(&mut self.eaten_apples) {
            if self.snake.contains(cell) {
                still_pending.push(cell);
            } else {
                self.snake.grow_tail(cell);
            }
        }
        self.eaten_apples = still_pending;
    }

    /// Pick a uniformly random cell the snake does not occupy
    fn spawn_apple(&mut self) -> Option<Cell> {
        let empty: Vec<Cell> = self
            .grid
            .cells()
            .filter(|&cell| !self.snake.contains(cell))
            .collect();
        empty.choose(&mut self.rng).copied()
    }

    /// Board layout for this session
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Body cells, tail first
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Current apple cell, if one is placed
    pub fn apple(&self) -> Option<Cell> {
        self.apple
    }

    /// Apples eaten so far
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the game has reached a terminal state
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// How the game ended, once it has
    pub fn end(&self) -> Option<GameEnd> {
        self.end
    }

    /// The prompt currently blocking gameplay, if any
    pub fn dialog(&self) -> Option<&DialogPrompt> {
        self.dialog.as_ref()
    }

    /// Configuration this session was started with
    pub fn config(&self) -> GameConfig {
        self.config
    }

    /// Time between two ticks at this session's speed
    pub fn tick_interval(&self) -> Duration {
        self.config.tick_interval()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::GameSpeed;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn session(width: u16) -> GameSession<StdRng> {
        let config = GameConfig::new(width, GameSpeed::Normal).unwrap();
        GameSession::with_rng(config, StdRng::seed_from_u64(42))
    }

    fn assert_no_duplicates(snake: &Snake) {
        let cells: Vec<Cell> = snake.cells().collect();
        let unique: HashSet<Cell> = cells.iter().copied().collect();
        assert_eq!(unique.len(), cells.len(), "duplicate cell in {cells:?}");
    }

    #[test]
    fn test_new_session() {
        let session = session(10);
        assert_eq!(session.phase(), Phase::Running);
        assert_eq!(session.score(), 0);
        assert_eq!(session.snake().cells().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert_eq!(session.direction, Direction::Right);

        let apple = session.apple().expect("fresh board has an apple");
        assert!(!session.snake().contains(apple));
        assert!((1..=100).contains(&apple));
    }

    #[test]
    fn test_walk_to_apple_and_delayed_growth() {
        let mut session = session(10);
        session.apple = Some(9);

        session.tick();
        assert_eq!(session.snake().cells().collect::<Vec<_>>(), vec![2, 3, 4, 5, 6]);

        session.tick();
        session.tick();
        let result = session.tick();

        // Head reached the apple at 9: scored, growth deferred.
        assert!(result.ate_apple);
        assert_eq!(session.score(), 1);
        assert_eq!(session.snake().len(), 5);
        assert_eq!(session.snake().head(), 9);
        assert_eq!(session.eaten_apples, vec![9]);
        assert!(session.apple().is_some(), "a new apple respawned");

        // Park the next apple out of the walk's way.
        session.apple = Some(55);

        // Cell 9 stays part of the body for the next four ticks; the
        // segment is absorbed on the tick the tail moves past it.
        for _ in 0..4 {
            session.tick();
            assert_eq!(session.snake().len(), 5);
            assert_no_duplicates(session.snake());
        }
        let result = session.tick();
        assert!(result.advanced);
        assert_eq!(session.snake().len(), 6);
        assert!(session.eaten_apples.is_empty());
        assert_eq!(
            session.snake().cells().collect::<Vec<_>>(),
            vec![9, 10, 1, 2, 3, 4]
        );
        assert_no_duplicates(session.snake());
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn test_left_edge_wraps_without_collision() {
        let mut session = session(10);
        session.snake = Snake::from_cells([5, 4, 3, 2, 1]);
        session.direction = Direction::Left;
        session.apple = Some(55);

        let result = session.tick();

        assert!(result.advanced);
        assert!(result.ended.is_none());
        assert_eq!(session.snake().head(), 10);
        assert_eq!(
            session.snake().cells().collect::<Vec<_>>(),
            vec![4, 3, 2, 1, 10]
        );
    }

    #[test]
    fn test_self_collision_ends_the_game_once() {
        let mut session = session(10);
        // Head at 12 moving up lands on 2, an interior body cell.
        session.snake = Snake::from_cells([1, 2, 3, 13, 12]);
        session.direction = Direction::Up;
        session.apple = Some(55);

        let result = session.tick();
        assert_eq!(result.ended, Some(GameEnd::SelfCollision));
        assert!(!result.advanced);
        assert_eq!(session.phase(), Phase::Finished);
        assert!(session.is_finished());
        assert_eq!(session.end(), Some(GameEnd::SelfCollision));
        let prompt = session.dialog().expect("game over prompt is open");
        assert!(prompt.message.contains("Game over"));

        // Later ticks must not move anything.
        let body: Vec<Cell> = session.snake().cells().collect();
        let result = session.tick();
        assert!(!result.advanced);
        assert_eq!(result.ended, None);
        assert_eq!(session.snake().cells().collect::<Vec<_>>(), body);
    }

    #[test]
    fn test_tail_cell_is_safe_when_vacating() {
        // A width-5 board starts with the top row full; the first wrap moves
        // the head onto the tail cell exactly as the tail leaves it.
        let mut session = session(5);
        session.apple = Some(13);

        let result = session.tick();

        assert!(result.advanced);
        assert!(result.ended.is_none());
        assert_eq!(
            session.snake().cells().collect::<Vec<_>>(),
            vec![2, 3, 4, 5, 1]
        );
    }

    #[test]
    fn test_tail_cell_is_fatal_while_growth_pending() {
        let mut session = session(5);
        session.apple = Some(13);
        session.eaten_apples = vec![3];

        let result = session.tick();

        assert_eq!(result.ended, Some(GameEnd::SelfCollision));
        assert_eq!(session.phase(), Phase::Finished);
    }

    #[test]
    fn test_three_apples_grow_three_segments() {
        let mut session = session(10);

        for apple in [6, 7, 8] {
            session.apple = Some(apple);
            let result = session.tick();
            assert!(result.ate_apple);
            assert_no_duplicates(session.snake());
        }
        assert_eq!(session.score(), 3);
        assert_eq!(session.eaten_apples, vec![6, 7, 8]);

        session.apple = Some(55);
        for _ in 0..9 {
            let result = session.tick();
            assert!(result.ended.is_none());
            assert_no_duplicates(session.snake());
        }

        assert!(session.eaten_apples.is_empty());
        assert_eq!(session.snake().len(), 8);
        assert_eq!(session.score(), 3);
    }

    #[test]
    fn test_full_board_is_a_win() {
        let mut session = session(5);
        session.snake = Snake::from_cells(1..=24);
        session.direction = Direction::Right;
        session.apple = Some(25);
        session.eaten_apples = vec![1];

        let result = session.tick();

        assert!(result.ate_apple);
        assert_eq!(result.ended, Some(GameEnd::BoardFull));
        assert_eq!(session.phase(), Phase::Finished);
        assert_eq!(session.end(), Some(GameEnd::BoardFull));
        assert_eq!(session.snake().len(), 25);
        assert_eq!(session.apple(), None);
        let prompt = session.dialog().expect("victory prompt is open");
        assert!(prompt.message.contains("won"));
        assert_no_duplicates(session.snake());
    }

    #[test]
    fn test_reversal_is_rejected_but_claims_the_lock() {
        let mut session = session(10);

        assert!(!session.steer(Direction::Left));
        assert_eq!(session.direction, Direction::Right);
        // The rejected reversal still consumed this tick's input.
        assert!(!session.steer(Direction::Up));
        assert_eq!(session.direction, Direction::Right);

        session.tick();
        assert!(session.steer(Direction::Up));
        assert_eq!(session.direction, Direction::Up);
    }

    #[test]
    fn test_second_input_in_a_tick_is_dropped() {
        let mut session = session(10);

        assert!(session.steer(Direction::Down));
        assert!(!session.steer(Direction::Right));
        assert_eq!(session.direction, Direction::Down);

        session.tick();
        assert!(session.steer(Direction::Right));
    }

    #[test]
    fn test_steer_ignored_unless_running() {
        let mut session = session(10);
        session.pause();
        assert!(!session.steer(Direction::Up));
        assert_eq!(session.direction, Direction::Right);
    }

    #[test]
    fn test_pause_and_resume_are_idempotent() {
        let mut session = session(10);

        session.pause();
        session.pause();
        assert_eq!(session.phase(), Phase::Paused);

        let before: Vec<Cell> = session.snake().cells().collect();
        let result = session.tick();
        assert!(!result.advanced);
        assert_eq!(session.snake().cells().collect::<Vec<_>>(), before);

        session.resume();
        session.resume();
        assert_eq!(session.phase(), Phase::Running);
    }

    #[test]
    fn test_exit_request_pauses_behind_a_prompt() {
        let mut session = session(10);

        assert_eq!(session.request_exit(), ExitRequest::Confirming);
        assert_eq!(session.phase(), Phase::Paused);
        assert!(session.dialog().is_some());

        // A second request while the prompt is open changes nothing.
        assert_eq!(session.request_exit(), ExitRequest::Ignored);

        let resolution = session.resolve_dialog(DialogOutcome::Dismissed);
        assert_eq!(resolution, DialogResolution::Resumed);
        assert_eq!(session.phase(), Phase::Running);
        assert!(session.dialog().is_none());
    }

    #[test]
    fn test_exit_request_confirmed_leaves_the_game() {
        let mut session = session(10);

        session.request_exit();
        let resolution =
            session.resolve_dialog(DialogOutcome::Chosen(DialogAction::ToMainMenu));
        assert_eq!(resolution, DialogResolution::LeftGame { confirmed: true });
    }

    #[test]
    fn test_exit_request_on_finished_game_is_immediate() {
        let mut session = session(10);
        session.snake = Snake::from_cells([1, 2, 3, 13, 12]);
        session.direction = Direction::Up;
        session.tick();

        // First close the game-over prompt, then leave.
        session.resolve_dialog(DialogOutcome::Chosen(DialogAction::ClosePopup));
        assert_eq!(session.phase(), Phase::Finished);
        assert_eq!(session.request_exit(), ExitRequest::LeaveNow);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut session = session(10);
        session.apple = Some(6);
        session.tick();
        session.steer(Direction::Down);
        session.snake = Snake::from_cells([1, 2, 3, 13, 12]);
        session.direction = Direction::Up;
        session.tick();
        assert_eq!(session.phase(), Phase::Finished);

        let resolution = session.resolve_dialog(DialogOutcome::Chosen(DialogAction::Restart));
        assert_eq!(resolution, DialogResolution::Restarted);

        assert_eq!(session.phase(), Phase::Running);
        assert_eq!(session.score(), 0);
        assert_eq!(session.direction, Direction::Right);
        assert_eq!(session.snake().cells().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert!(session.eaten_apples.is_empty());
        assert!(session.end().is_none());
        assert!(session.dialog().is_none());
        let apple = session.apple().expect("restart spawns a fresh apple");
        assert!(!session.snake().contains(apple));
    }

    #[test]
    fn test_spawned_apples_avoid_the_snake() {
        let mut session = session(5);
        session.snake = Snake::from_cells(1..=20);

        for _ in 0..50 {
            let apple = session.spawn_apple().expect("five cells remain empty");
            assert!((21..=25).contains(&apple));
        }
    }

    #[test]
    fn test_close_popup_keeps_the_finished_board() {
        let mut session = session(10);
        session.snake = Snake::from_cells([1, 2, 3, 13, 12]);
        session.direction = Direction::Up;
        session.tick();

        let resolution =
            session.resolve_dialog(DialogOutcome::Chosen(DialogAction::ClosePopup));
        assert_eq!(resolution, DialogResolution::Closed);
        assert_eq!(session.phase(), Phase::Finished);
        assert!(session.dialog().is_none());
    }
}
