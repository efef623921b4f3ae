use std::io::{self, Write};

use crossterm::style::{Color, ContentStyle, Stylize};
use rand::seq::SliceRandom;

use crate::engine::Snapshot;
use crate::snake::{Direction::*, Point};
use crate::state::GameState;
use crate::term::TermManager;

const SNAKE_BODY_CHAR: char = ' ';
const FOOD_CHAR: char = '●';
const FOOD_COLORS: [Color; 3] = [Color::Red, Color::Yellow, Color::Green];

const KEY_HINT: &str = "?/p/P: show help/pause";

const PAUSE_HELP: &[&str] = &[
    "h/←  - left",
    "j/↓  - down",
    "k/↑  - up",
    "l/→  - right",
    "p/P  - pause",
    "r/R  - new game",
    "s/S  - resume",
    "q/Q  - quit",
    "esc  - quit",
];

pub fn draw<W: Write>(term: &mut TermManager<W>, snap: &Snapshot) -> io::Result<()> {
    term.clear()?;

    draw_snake(term, snap)?;
    draw_foods(term, &snap.foods)?;
    draw_border(term, snap)?;
    draw_score(term, snap)?;
    term.print_str_at(Point::new(2, 0), KEY_HINT, ContentStyle::new().with(Color::Yellow))?;

    match snap.state {
        GameState::Paused => {
            let title = GameState::Paused.to_string();
            let mut lines = vec![title.as_str()];
            lines.extend_from_slice(PAUSE_HELP);
            draw_dialog(term, snap, &lines, ContentStyle::new().with(Color::Cyan))?;
        }
        GameState::Lost => {
            let title = GameState::Lost.to_string();
            draw_dialog(term, snap, &[title.as_str(), "r/R to restart"], ContentStyle::new().with(Color::Red))?;
        }
        GameState::Started => {}
    }

    term.flush()
}

fn head_char(snap: &Snapshot) -> char {
    match snap.heading {
        Some(North) => '^',
        Some(South) => 'v',
        Some(West) => '<',
        Some(East) | None => '>',
    }
}

fn draw_snake<W: Write>(term: &mut TermManager<W>, snap: &Snapshot) -> io::Result<()> {
    let head_style = ContentStyle::new().with(Color::Black).on(Color::Cyan);
    let body_style = ContentStyle::new().on(Color::Blue);

    term.print_at(snap.head, head_char(snap), head_style)?;
    for pos in &snap.body {
        term.print_at(*pos, SNAKE_BODY_CHAR, body_style)?;
    }
    Ok(())
}

fn draw_foods<W: Write>(term: &mut TermManager<W>, foods: &[Point]) -> io::Result<()> {
    let mut rng = rand::thread_rng();

    for pos in foods {
        // a fresh color every frame makes the food twinkle
        let color = *FOOD_COLORS.choose(&mut rng).unwrap_or(&Color::Red);
        term.print_at(*pos, FOOD_CHAR, ContentStyle::new().with(color))?;
    }
    Ok(())
}

// The first row is the header, the box starts right under it.
fn draw_border<W: Write>(term: &mut TermManager<W>, snap: &Snapshot) -> io::Result<()> {
    let style = ContentStyle::new().with(Color::Blue).on(Color::Black);
    term.draw_box(Point::new(0, 1), snap.board.width(), snap.board.height() - 1, style)
}

fn draw_score<W: Write>(term: &mut TermManager<W>, snap: &Snapshot) -> io::Result<()> {
    let text = format!("SCORE: {}", snap.score);
    let x = snap.board.width() - text.chars().count() as i32 - 2;
    term.print_str_at(Point::new(x, 0), &text, ContentStyle::new().with(Color::Green).bold())
}

fn draw_dialog<W: Write>(
    term: &mut TermManager<W>,
    snap: &Snapshot,
    lines: &[&str],
    box_style: ContentStyle,
) -> io::Result<()> {
    let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as i32;
    let count = lines.len() as i32;
    let left = snap.board.width() / 2 - widest / 2 - 1;
    let top = snap.board.height() / 2 - 1 - count;
    let text_style = ContentStyle::new().with(Color::White).on(Color::Black);

    // blank out whatever is under the dialog first
    for y in top + 1..top + count + 1 {
        for x in left + 1..left + widest + 3 {
            term.print_at(Point::new(x, y), ' ', text_style)?;
        }
    }
    term.draw_box(Point::new(left, top), widest + 4, count + 2, box_style)?;

    for (i, line) in lines.iter().enumerate() {
        term.print_str_at(Point::new(left + 2, top + 1 + i as i32), line, text_style)?;
    }
    Ok(())
}
