use std::io::{self, stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, Event};
use crossterm::style::{ContentStyle, PrintStyledContent};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, terminal};

use crate::snake::Point;

pub type TermInt = u16;

// Anything drawn outside the visible area is dropped.
pub struct TermManager<W: Write = Stdout> {
    width: TermInt,
    height: TermInt,
    out: W,
}

impl TermManager<Stdout> {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(TermManager { width, height, out: stdout() })
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.out, EnterAlternateScreen, cursor::Hide, cursor::DisableBlinking)?;
        terminal::enable_raw_mode()
    }

    pub fn restore(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.out, cursor::EnableBlinking, cursor::Show, LeaveAlternateScreen)
    }

    pub fn next_event(&self, timeout: Duration) -> io::Result<Option<Event>> {
        if poll(timeout)? {
            read().map(Some)
        } else {
            Ok(None)
        }
    }
}

impl<W: Write> TermManager<W> {
    pub fn with_writer(out: W, width: TermInt, height: TermInt) -> Self {
        TermManager { width, height, out }
    }

    pub fn size(&self) -> (TermInt, TermInt) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: TermInt, height: TermInt) {
        self.width = width;
        self.height = height;
    }

    pub fn clear(&mut self) -> io::Result<()> {
        queue!(self.out, terminal::Clear(ClearType::All))
    }

    pub fn print_at(&mut self, pos: Point, ch: char, style: ContentStyle) -> io::Result<()> {
        match self.cell(pos) {
            Some((x, y)) => queue!(self.out, cursor::MoveTo(x, y), PrintStyledContent(style.apply(ch))),
            None => Ok(()),
        }
    }

    pub fn print_str_at(&mut self, pos: Point, s: &str, style: ContentStyle) -> io::Result<()> {
        let mut start = None;
        let mut visible = String::with_capacity(s.len());

        for (i, ch) in s.chars().enumerate() {
            if let Some(cell) = self.cell(Point::new(pos.x + i as i32, pos.y)) {
                start.get_or_insert(cell);
                visible.push(ch);
            }
        }

        match start {
            Some((x, y)) => queue!(self.out, cursor::MoveTo(x, y), PrintStyledContent(style.apply(visible))),
            None => Ok(()),
        }
    }

    pub fn draw_box(&mut self, top_left: Point, width: i32, height: i32, style: ContentStyle) -> io::Result<()> {
        if width < 2 || height < 2 {
            return Ok(());
        }

        let Point { x: left, y: top } = top_left;
        let (right, bottom) = (left + width - 1, top + height - 1);

        self.print_at(Point::new(left, top), '┏', style)?;
        self.print_at(Point::new(left, bottom), '┗', style)?;
        self.print_at(Point::new(right, top), '┓', style)?;
        self.print_at(Point::new(right, bottom), '┛', style)?;

        for x in left + 1..right {
            self.print_at(Point::new(x, top), '━', style)?;
            self.print_at(Point::new(x, bottom), '━', style)?;
        }
        for y in top + 1..bottom {
            self.print_at(Point::new(left, y), '┃', style)?;
            self.print_at(Point::new(right, y), '┃', style)?;
        }

        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    #[cfg(test)]
    pub(crate) fn writer(&self) -> &W {
        &self.out
    }

    ///////////////////////////////////////////////////////////////////////////

    fn cell(&self, pos: Point) -> Option<(TermInt, TermInt)> {
        let x = TermInt::try_from(pos.x).ok().filter(|x| *x < self.width)?;
        let y = TermInt::try_from(pos.y).ok().filter(|y| *y < self.height)?;
        Some((x, y))
    }
}
