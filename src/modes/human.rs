use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stderr, stderr};
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval, interval_at};
use tracing::{debug, info};

use crate::game::{Difficulty, GameConfig, GameLoop};
use crate::input::{InputHandler, KeyAction, MenuKey};
use crate::metrics::GameMetrics;
use crate::modes::screen::{
    ConfirmCancel, ConfirmOutcome, DifficultyMenu, DifficultyOutcome, GameOverMenu, NamePrompt,
    PromptOutcome, RunChoice, Screen,
};
use crate::render::{Renderer, View};
use crate::score::{BestScore, DEFAULT_SCORE_FILE, ScoreStore};

/// Redraw period, independent of the game speed
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

/// Settings for a play session
#[derive(Debug, Clone)]
pub struct PlayOptions {
    /// Player name; when set the name prompt is skipped
    pub player: Option<String>,
    /// Speed of the first run; when set the first difficulty menu is skipped
    pub difficulty: Option<Difficulty>,
    /// Where the best score is kept
    pub score_file: PathBuf,
    pub game_config: GameConfig,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            player: None,
            difficulty: None,
            score_file: PathBuf::from(DEFAULT_SCORE_FILE),
            game_config: GameConfig::default(),
        }
    }
}

/// Where a screen wants to go next
enum Transition {
    Stay,
    Show(Screen),
    StartRun,
    Quit,
}

pub struct HumanMode {
    game: GameLoop,
    store: ScoreStore,
    best: BestScore,
    player: Option<String>,
    difficulty: Difficulty,
    screen: Screen,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    /// Set when the tick timer must restart, at a run start or speed change
    retime: bool,
}

impl HumanMode {
    pub fn new(options: PlayOptions) -> Self {
        let store = ScoreStore::new(options.score_file);
        let best = store.load_best();
        let player = options
            .player
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        let mut mode = Self {
            game: GameLoop::new(options.game_config),
            store,
            best,
            player,
            difficulty: options.difficulty.unwrap_or_default(),
            screen: Screen::Playing,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            retime: false,
        };

        match (mode.player.is_some(), options.difficulty.is_some()) {
            (false, _) => mode.screen = Screen::NamePrompt(NamePrompt::new()),
            (true, false) => mode.screen = Screen::DifficultyMenu(DifficultyMenu::new()),
            (true, true) => mode.start_run(),
        }
        mode
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

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = self.tick_timer();
        let mut render_timer = interval(RENDER_INTERVAL);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    self.on_terminal_event(maybe_event);
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.on_tick();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let snapshot = self.game.snapshot(self.best.score, &self.best.player);
                    let view = View {
                        screen: &self.screen,
                        snapshot: &snapshot,
                        config: self.game.config(),
                        metrics: &self.metrics,
                        difficulty: self.difficulty,
                        player: self.player.as_deref().unwrap_or("-"),
                    };
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &view);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            if self.retime {
                tick_timer = self.tick_timer();
                self.retime = false;
            }
        }

        Ok(())
    }

    /// Timer for the current difficulty; the first tick lands one period
    /// from now.
    fn tick_timer(&self) -> Interval {
        let period = self.difficulty.tick_interval();
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        timer
    }

    /// Advance the game if a run is on screen
    fn on_tick(&mut self) {
        if self.screen != Screen::Playing {
            return;
        }

        let result = self.game.tick();
        if result.ate_apple {
            debug!(score = self.game.score(), "apple eaten");
        }
        if let Some(cause) = result.collision {
            info!(score = self.game.score(), ?cause, "run over");
            self.finish_run();
        }
    }

    fn finish_run(&mut self) {
        self.metrics.on_run_over();

        let score = self.game.score();
        let player = self.player.as_deref().unwrap_or_default();
        let previous = self.best.score;
        self.best = self.store.record_run(&self.best, player, score);

        self.screen = Screen::GameOver(GameOverMenu::new(score, self.best.score > previous));
    }

    fn start_run(&mut self) {
        self.game.initialize();
        self.metrics.on_run_start();
        self.screen = Screen::Playing;
        self.retime = true;
        info!(
            player = self.player.as_deref().unwrap_or_default(),
            difficulty = self.difficulty.as_str(),
            "run started"
        );
    }

    /// One item from the terminal event stream; a closed stream ends the session.
    fn on_terminal_event(&mut self, maybe_event: Option<io::Result<Event>>) {
        match maybe_event {
            Some(Ok(event)) => self.handle_event(event),
            Some(Err(err)) => debug!(error = ?err, "terminal event error"),
            None => {
                info!("terminal event stream closed");
                self.should_quit = true;
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.screen == Screen::Playing {
            match self.input_handler.handle_key_event(key) {
                KeyAction::Move(direction) => self.game.set_direction(direction),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
            return;
        }

        let menu_key = self.input_handler.handle_menu_key(key);
        if menu_key == MenuKey::Interrupt {
            self.should_quit = true;
            return;
        }

        match self.menu_transition(menu_key) {
            Transition::Stay => {}
            Transition::Show(screen) => self.screen = screen,
            Transition::StartRun => self.start_run(),
            Transition::Quit => self.should_quit = true,
        }
    }

    fn menu_transition(&mut self, key: MenuKey) -> Transition {
        match &mut self.screen {
            Screen::NamePrompt(prompt) => match prompt.handle(key) {
                PromptOutcome::Pending => Transition::Stay,
                PromptOutcome::Submitted(name) => {
                    info!(player = %name, "player registered");
                    self.player = Some(name);
                    Transition::Show(Screen::DifficultyMenu(DifficultyMenu::new()))
                }
                PromptOutcome::Cancelled => {
                    Transition::Show(Screen::ConfirmCancel(ConfirmCancel::new(prompt.clone())))
                }
            },
            Screen::ConfirmCancel(confirm) => match confirm.handle(key) {
                ConfirmOutcome::Pending => Transition::Stay,
                ConfirmOutcome::Exit => Transition::Quit,
                ConfirmOutcome::Resume => {
                    Transition::Show(Screen::NamePrompt(confirm.prompt.clone()))
                }
            },
            Screen::DifficultyMenu(menu) => match menu.handle(key) {
                DifficultyOutcome::Pending => Transition::Stay,
                DifficultyOutcome::Chosen(difficulty) => {
                    self.difficulty = difficulty;
                    Transition::StartRun
                }
                DifficultyOutcome::Interrupted => Transition::Quit,
            },
            Screen::GameOver(menu) => match menu.handle(key) {
                None => Transition::Stay,
                Some(RunChoice::PlayAgain) => Transition::StartRun,
                Some(RunChoice::ChangeDifficulty) => {
                    Transition::Show(Screen::DifficultyMenu(DifficultyMenu::new()))
                }
                Some(RunChoice::Quit) => Transition::Quit,
            },
            Screen::Playing => Transition::Stay,
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
