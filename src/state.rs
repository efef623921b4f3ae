use std::fmt;

use GameState::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    Paused,
    Lost,
    Started,
}

impl GameState {
    pub fn is_paused(self) -> bool {
        self == Paused
    }

    pub fn is_game_over(self) -> bool {
        self == Lost
    }

    pub fn is_started(self) -> bool {
        self == Started
    }

    // Lost stays Lost, only a new game gets out of it
    pub fn toggled(self) -> GameState {
        match self {
            Started => Paused,
            Paused => Started,
            Lost => Lost,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Started
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Paused => "Game Paused",
            Lost => "You Lost!",
            Started => "Game Started",
        };
        f.write_str(s)
    }
}
