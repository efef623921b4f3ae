use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::event::Event;
use log::{debug, info, warn};

use crate::clock::{StopSignal, Ticker};
use crate::config::Config;
use crate::engine::{Board, BoardError, Game, Snapshot, TickOutcome};
use crate::input::{intent_for, Intent};
use crate::render;
use crate::term::{TermInt, TermManager};

// Every change to the game, ticks included, goes through here on one thread.
pub struct Controller {
    game: Game,
    config: Config,
    stop: StopSignal,
}

impl Controller {
    pub fn new(config: Config, term_size: (TermInt, TermInt), stop: StopSignal) -> Result<Self, BoardError> {
        let (w, h) = config.board_size(term_size.0, term_size.1);
        let board = Board::new(w as i32, h as i32)?;
        let game = new_game(&config, board);
        Ok(Controller { game, config, stop })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    pub fn stop_signal(&self) -> &StopSignal {
        &self.stop
    }

    // True if the screen needs a redraw
    pub fn apply(&mut self, intent: Intent) -> bool {
        debug!("intent {:?} in state {:?}", intent, self.game.state());

        match intent {
            Intent::Steer(d) => self.game.set_direction(d),
            Intent::TogglePause => self.game.toggle_pause(),
            Intent::Restart => {
                self.game = new_game(&self.config, self.game.board());
                info!("new game on a {}x{} board", self.game.board().width(), self.game.board().height());
            }
            Intent::Quit => {
                self.stop.raise();
                return false;
            }
        }
        true
    }

    pub fn resize(&mut self, term_width: TermInt, term_height: TermInt) {
        let (w, h) = if self.config.resizable {
            (term_width, term_height)
        } else {
            self.config.board_size(term_width, term_height)
        };

        match self.game.on_resize(w as i32, h as i32) {
            Ok(()) => info!("board is now {}x{}", w, h),
            Err(e) => warn!("keeping the old board: {}", e),
        }
    }
}

fn new_game(config: &Config, board: Board) -> Game {
    match config.seed {
        Some(seed) => Game::with_seed(board, config.tick, seed),
        None => Game::new(board, config.tick),
    }
}

pub struct Session {
    term: TermManager,
    controller: Controller,
    ticker: Ticker,
    active: bool,
}

impl Session {
    pub fn new(config: Config, stop: StopSignal) -> Result<Self> {
        let term = TermManager::new().context("could not read the terminal size")?;
        let controller =
            Controller::new(config, term.size(), stop).context("the terminal is too small for the board")?;
        let ticker = Ticker::new(controller.game().tick_interval(), Instant::now());

        Ok(Session { term, controller, ticker, active: false })
    }

    pub fn run(&mut self) -> Result<()> {
        // Setup can fail halfway, with the alternate screen already entered
        self.active = true;
        let result = self.term.setup().context("could not set up the terminal").and_then(|_| self.event_loop());

        self.active = false;
        let restored = self.term.restore().context("could not restore the terminal");
        finish(result, restored)
    }

    fn event_loop(&mut self) -> Result<()> {
        let board = self.controller.game().board();
        info!("starting on a {}x{} board", board.width(), board.height());
        self.redraw()?;

        let mut frame: Option<Snapshot> = None;

        while !self.controller.stop_signal().is_raised() {
            let wait = self.ticker.time_until_next(Instant::now());
            if let Some(event) = self.term.next_event(wait)? {
                self.handle_event(event)?;
            }

            if self.ticker.due(Instant::now()) {
                if let TickOutcome::Crashed = self.controller.game_mut().tick(&mut frame) {
                    info!("game over, score {}", self.controller.game().score());
                }
                if let Some(snap) = frame.take() {
                    render::draw(&mut self.term, &snap)?;
                }
            }
        }

        info!("quitting with score {}", self.controller.game().score());
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) => {
                let state = self.controller.game().state();
                let Some(intent) = intent_for(state, &key) else {
                    return Ok(());
                };
                if intent == Intent::Restart {
                    self.ticker.reset(Instant::now());
                }
                if self.controller.apply(intent) {
                    self.redraw()?;
                }
            }
            Event::Resize(w, h) => {
                self.term.resize(w, h);
                self.controller.resize(w, h);
                self.redraw()?;
            }
            _ => {}
        }
        Ok(())
    }

    fn redraw(&mut self) -> Result<()> {
        render::draw(&mut self.term, &self.controller.game().snapshot()).context("could not draw the board")
    }
}

// A failure in the loop is reported ahead of a failure to restore the screen.
fn finish(result: Result<()>, restored: Result<()>) -> Result<()> {
    result.and(restored)
}

impl Drop for Session {
    fn drop(&mut self) {
        // Only reached with the screen still set up if the loop panicked.
        if self.active {
            let _ = self.term.restore();
        }
    }
}
