use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::snake::Direction::{self, *};
use crate::state::GameState;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Steer(Direction),
    TogglePause,
    Restart,
    Quit,
}

pub fn intent_for(state: GameState, ev: &KeyEvent) -> Option<Intent> {
    if ev.kind == KeyEventKind::Release {
        return None;
    }
    if is_ctrl_c(ev) {
        return Some(Intent::Quit);
    }

    match state {
        GameState::Started => match ev.code {
            KeyCode::Up | KeyCode::Char('k' | 'K') => Some(Intent::Steer(North)),
            KeyCode::Down | KeyCode::Char('j' | 'J') => Some(Intent::Steer(South)),
            KeyCode::Left | KeyCode::Char('h' | 'H') => Some(Intent::Steer(West)),
            KeyCode::Right | KeyCode::Char('l' | 'L') => Some(Intent::Steer(East)),
            KeyCode::Char('p' | 'P' | '?') => Some(Intent::TogglePause),
            KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(Intent::Quit),
            _ => None,
        },
        GameState::Paused => match ev.code {
            KeyCode::Char('s' | 'S' | 'p' | 'P' | '?') => Some(Intent::TogglePause),
            KeyCode::Char('r' | 'R') => Some(Intent::Restart),
            KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(Intent::Quit),
            _ => None,
        },
        GameState::Lost => match ev.code {
            KeyCode::Char('r' | 'R') => Some(Intent::Restart),
            KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(Intent::Quit),
            _ => None,
        },
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
