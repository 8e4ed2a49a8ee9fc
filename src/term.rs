use crate::classify::ConsoleCell;
use crossterm::{
    cursor,
    style::{self, Color as TermColor},
    terminal,
};
use std::io::{
    self,
    Write,
};

pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        crossterm::execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        Ok(Self { active: true })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if !self.active {
            return;
        }
        let _ = crossterm::execute!(
            io::stdout(),
            style::ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
        self.active = false;
    }
}

fn palette_color(index: u8) -> TermColor {
    match index & 0x0F {
        0x0 => TermColor::Black,
        0x1 => TermColor::DarkBlue,
        0x2 => TermColor::DarkGreen,
        0x3 => TermColor::DarkCyan,
        0x4 => TermColor::DarkRed,
        0x5 => TermColor::DarkMagenta,
        0x6 => TermColor::DarkYellow,
        0x7 => TermColor::Grey,
        0x8 => TermColor::DarkGrey,
        0x9 => TermColor::Blue,
        0xA => TermColor::Green,
        0xB => TermColor::Cyan,
        0xC => TermColor::Red,
        0xD => TermColor::Magenta,
        0xE => TermColor::Yellow,
        _ => TermColor::White,
    }
}

// An attribute no classifier can produce, so the first frame repaints fully.
const UNSEEN: ConsoleCell = ConsoleCell {
    glyph: 0,
    attr: 0xFFFF,
};

pub struct TerminalPresenter {
    width: usize,
    height: usize,
    prev: Vec<ConsoleCell>,
    first: bool,
}

impl TerminalPresenter {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            prev: vec![UNSEEN; width.saturating_mul(height)],
            first: true,
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.prev.clear();
        self.prev.resize(width.saturating_mul(height), UNSEEN);
        self.first = true;
    }

    pub fn reset(&mut self) {
        self.prev.fill(UNSEEN);
        self.first = true;
    }

    pub fn present<W: Write>(
        &mut self,
        out: &mut W,
        cells: &[ConsoleCell],
        width: usize,
        height: usize,
    ) -> io::Result<()> {
        if width != self.width || height != self.height {
            self.resize(width, height);
        }

        if self.first {
            crossterm::queue!(
                out,
                terminal::Clear(terminal::ClearType::All),
                cursor::MoveTo(0, 0)
            )?;
            self.prev.fill(UNSEEN);
            self.first = false;
        }

        for y in 0..self.height {
            let row_start = y * self.width;
            let mut x = 0;
            while x < self.width {
                let idx = row_start + x;
                if cells[idx] == self.prev[idx] {
                    x += 1;
                    continue;
                }

                // Flush a run of changed cells sharing one attribute.
                let attr = cells[idx].attr;
                let run_start = x;
                let mut s = String::new();
                while x < self.width {
                    let i = row_start + x;
                    let cell = cells[i];
                    if cell == self.prev[i] || cell.attr != attr {
                        break;
                    }
                    self.prev[i] = cell;
                    s.push(char::from_u32(cell.glyph as u32).unwrap_or(' '));
                    x += 1;
                }

                let fg = palette_color((attr & 0x0F) as u8);
                let bg = palette_color(((attr >> 4) & 0x0F) as u8);
                crossterm::queue!(
                    out,
                    cursor::MoveTo(run_start as u16, y as u16),
                    style::SetColors(style::Colors::new(fg, bg)),
                    style::Print(&s)
                )?;
            }
        }

        out.flush()?;
        Ok(())
    }
}

pub struct TerminalTarget {
    presenter: TerminalPresenter,
    out: io::Stdout,
}

impl TerminalTarget {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            presenter: TerminalPresenter::new(width, height),
            out: io::stdout(),
        }
    }

    pub fn reset(&mut self) {
        self.presenter.reset();
    }

    pub fn present(&mut self, cells: &[ConsoleCell], width: usize, height: usize) -> io::Result<()> {
        self.presenter.present(&mut self.out, cells, width, height)
    }
}
