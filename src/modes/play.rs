use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::info;

use crate::dialog::DialogOutcome;
use crate::game::{
    DialogResolution, ExitRequest, GameConfig, GameEnd, GameSession, GameSpeed, Phase, MAX_WIDTH,
    MIN_WIDTH,
};
use crate::input::{DialogKey, GameKey, InputHandler, MenuKey};
use crate::metrics::SessionStats;
use crate::render::Renderer;
use crate::scheduler::TickTimer;

/// Settings picked on the main menu before a game starts
#[derive(Debug, Clone, Copy)]
pub struct MenuState {
    pub width: u16,
    pub speed: GameSpeed,
    width_selected: bool,
}

impl MenuState {
    pub fn new(defaults: GameConfig) -> Self {
        Self {
            width: defaults.width,
            speed: defaults.speed,
            width_selected: true,
        }
    }

    pub fn is_width_selected(&self) -> bool {
        self.width_selected
    }

    pub fn toggle_field(&mut self) {
        self.width_selected = !self.width_selected;
    }

    pub fn increase(&mut self) {
        if self.width_selected {
            self.width = (self.width + 1).min(MAX_WIDTH);
        } else {
            self.speed = self.speed.faster();
        }
    }

    pub fn decrease(&mut self) {
        if self.width_selected {
            self.width = self.width.saturating_sub(1).max(MIN_WIDTH);
        } else {
            self.speed = self.speed.slower();
        }
    }

    /// The menu only offers in-range values, so this cannot fail
    pub fn config(&self) -> GameConfig {
        GameConfig {
            width: self.width,
            speed: self.speed,
        }
    }
}

enum Screen {
    Menu(MenuState),
    Game(GameSession),
}

pub struct PlayMode {
    screen: Screen,
    stats: SessionStats,
    renderer: Renderer,
    input: InputHandler,
    defaults: GameConfig,
    dialog_cursor: usize,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(defaults: GameConfig) -> Self {
        Self {
            screen: Screen::Menu(MenuState::new(defaults)),
            stats: SessionStats::new(),
            renderer: Renderer::new(),
            input: InputHandler::new(),
            defaults,
            dialog_cursor: 0,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run the event loop with cleanup
        let result = self.run_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;
        info!(games = self.stats.games_played, "session ended");

        result
    }

    async fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Game ticks follow the session's speed; the timer only runs while
        // a game does.
        let mut tick_timer = TickTimer::new();
        self.sync_timer(&mut tick_timer);

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.advance_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.render_screen(frame);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            self.sync_timer(&mut tick_timer);

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Keep the tick timer in step with the lifecycle
    ///
    /// Stopping and restarting around a pause means the next step always
    /// lands one full period after resuming.
    fn sync_timer(&self, timer: &mut TickTimer) {
        match &self.screen {
            Screen::Game(session) if session.phase() == Phase::Running => {
                if !timer.is_running() {
                    timer.start(session.tick_interval());
                }
            }
            _ => timer.stop(),
        }
    }

    fn render_screen(&self, frame: &mut Frame) {
        match &self.screen {
            Screen::Menu(menu) => self.renderer.render_menu(frame, menu, &self.stats),
            Screen::Game(session) => {
                self.renderer
                    .render_game(frame, session, &self.stats, self.dialog_cursor)
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else { return };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        if matches!(self.screen, Screen::Menu(_)) {
            self.handle_menu_key(key);
            return;
        }
        let dialog_open = matches!(&self.screen, Screen::Game(session) if session.dialog().is_some());
        if dialog_open {
            self.handle_dialog_key(key);
        } else {
            self.handle_game_key(key);
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        let Screen::Menu(menu) = &mut self.screen else {
            return;
        };

        match self.input.menu_key(key) {
            MenuKey::PrevField | MenuKey::NextField => menu.toggle_field(),
            MenuKey::Increase => menu.increase(),
            MenuKey::Decrease => menu.decrease(),
            MenuKey::Start => {
                let config = menu.config();
                self.start_game(config);
            }
            MenuKey::Quit | MenuKey::ForceQuit => self.should_quit = true,
            MenuKey::None => {}
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent) {
        let Screen::Game(session) = &mut self.screen else {
            return;
        };

        match self.input.game_key(key) {
            GameKey::Steer(direction) => {
                session.steer(direction);
            }
            GameKey::TogglePause => match session.phase() {
                Phase::Running => {
                    session.pause();
                    self.stats.on_pause();
                }
                Phase::Paused => {
                    session.resume();
                    self.stats.on_resume();
                }
                Phase::Finished => {}
            },
            GameKey::Restart => {
                session.restart();
                self.dialog_cursor = 0;
                self.stats.on_game_start();
            }
            GameKey::RequestExit => match session.request_exit() {
                ExitRequest::Confirming => {
                    self.dialog_cursor = 0;
                    self.stats.on_pause();
                }
                ExitRequest::LeaveNow => self.leave_to_menu(true),
                ExitRequest::Ignored => {}
            },
            GameKey::ForceQuit => self.should_quit = true,
            GameKey::None => {}
        }
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) {
        let Screen::Game(session) = &mut self.screen else {
            return;
        };
        let button_count = match session.dialog() {
            Some(prompt) => prompt.buttons.len(),
            None => return,
        };

        match self.input.dialog_key(key) {
            DialogKey::NextButton => {
                self.dialog_cursor = (self.dialog_cursor + 1) % button_count;
            }
            DialogKey::PrevButton => {
                self.dialog_cursor = (self.dialog_cursor + button_count - 1) % button_count;
            }
            DialogKey::Confirm => {
                let chosen = session
                    .dialog()
                    .and_then(|prompt| prompt.buttons.get(self.dialog_cursor))
                    .map(|button| button.action);
                let Some(action) = chosen else { return };
                let resolution = session.resolve_dialog(DialogOutcome::Chosen(action));
                self.apply_resolution(resolution);
            }
            DialogKey::Dismiss => {
                let resolution = session.resolve_dialog(DialogOutcome::Dismissed);
                self.apply_resolution(resolution);
            }
            DialogKey::ForceQuit => self.should_quit = true,
            DialogKey::None => {}
        }
    }

    fn apply_resolution(&mut self, resolution: DialogResolution) {
        self.dialog_cursor = 0;
        match resolution {
            DialogResolution::Resumed => self.stats.on_resume(),
            DialogResolution::Restarted => self.stats.on_game_start(),
            DialogResolution::LeftGame { confirmed } => self.leave_to_menu(confirmed),
            DialogResolution::Closed => {}
        }
    }

    fn start_game(&mut self, config: GameConfig) {
        info!(width = config.width, speed = config.speed.as_str(), "new game");
        self.stats.on_game_start();
        self.dialog_cursor = 0;
        self.screen = Screen::Game(GameSession::new(config));
    }

    /// Tear the session down and tell the embedding layer why
    fn leave_to_menu(&mut self, confirmed: bool) {
        if let Screen::Game(session) = &self.screen {
            info!(confirmed, score = session.score(), "left game");
        }
        self.stats.on_pause();
        self.dialog_cursor = 0;
        self.screen = Screen::Menu(MenuState::new(self.defaults));
    }

    fn advance_game(&mut self) {
        let Screen::Game(session) = &mut self.screen else {
            return;
        };

        let result = session.tick();
        if let Some(end) = result.ended {
            let score = session.score();
            let length = session.snake().len() as u16;
            self.dialog_cursor = 0;
            self.stats.on_game_over(score, length);
            match end {
                GameEnd::SelfCollision => info!(score, length, "game over"),
                GameEnd::BoardFull => info!(score, "board full, game won"),
            }
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
