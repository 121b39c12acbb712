//! Terminal presentation shell
//!
//! Renders the world onto a character grid with crossterm, diffing against
//! the previous frame so only changed cells are written. Input arrives as
//! crossterm key/mouse events and is translated into [`InputEvent`]s.
//!
//! Most terminals never report key releases. When the keyboard enhancement
//! protocol is unavailable, a held key is released after its auto-repeat
//! stops arriving.

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, DisableLineWrap, EnableLineWrap, EndSynchronizedUpdate,
        EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use glam::Vec2;

use super::{Color, InputEvent, Key, Presenter, SpriteId};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::Aabb;

/// First synthetic release waits out the OS auto-repeat delay
const FIRST_REPEAT_GRACE: Duration = Duration::from_millis(550);
/// Later releases fire once repeats stop
const REPEAT_GAP: Duration = Duration::from_millis(120);

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    fn blank(bg: Color) -> Self {
        Self { ch: ' ', fg: bg, bg }
    }
}

fn term_color(c: Color) -> style::Color {
    style::Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Result of draining pending terminal events
#[derive(Debug, Default)]
pub struct Polled {
    pub events: Vec<InputEvent>,
    pub quit: bool,
}

pub struct TerminalShell {
    out: Stdout,
    w: u16,
    h: u16,
    cur: Vec<Cell>,
    prev: Vec<Cell>,
    /// Keyboard enhancement active, so real release events arrive
    releases: bool,
    /// Keys considered held, with the time their synthetic release fires
    held: Vec<(Key, Instant)>,
}

impl TerminalShell {
    /// Switch the terminal into raw alternate-screen mode
    pub fn new() -> io::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            EnableMouseCapture,
            terminal::Clear(terminal::ClearType::All)
        )?;

        let releases = matches!(terminal::supports_keyboard_enhancement(), Ok(true));
        if releases {
            execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        log::info!("Terminal shell up, key release events: {}", releases);

        let (w, h) = terminal::size()?;
        let mut shell = Self {
            out,
            w: 0,
            h: 0,
            cur: Vec::new(),
            prev: Vec::new(),
            releases,
            held: Vec::new(),
        };
        shell.resize(w, h);
        Ok(shell)
    }

    fn resize(&mut self, w: u16, h: u16) {
        self.w = w.max(1);
        self.h = h.max(1);
        let n = self.w as usize * self.h as usize;
        self.cur = vec![Cell::blank(Color::BLACK); n];
        // Force a full redraw
        self.prev = vec![
            Cell {
                ch: '\0',
                fg: Color::BLACK,
                bg: Color::BLACK,
            };
            n
        ];
    }

    /// World x to column
    fn col(&self, x: f32) -> i32 {
        (x / SCREEN_WIDTH * self.w as f32).floor() as i32
    }

    /// World y (up) to row (down)
    fn row(&self, y: f32) -> i32 {
        ((1.0 - y / SCREEN_HEIGHT) * self.h as f32).floor() as i32
    }

    /// Cell center back to world space
    fn to_world(&self, column: u16, row: u16) -> Vec2 {
        Vec2::new(
            (column as f32 + 0.5) / self.w as f32 * SCREEN_WIDTH,
            (1.0 - (row as f32 + 0.5) / self.h as f32) * SCREEN_HEIGHT,
        )
    }

    fn put(&mut self, x: i32, y: i32, ch: char, fg: Color, bg: Option<Color>) {
        if x < 0 || y < 0 || x >= self.w as i32 || y >= self.h as i32 {
            return;
        }
        let i = y as usize * self.w as usize + x as usize;
        let bg = bg.unwrap_or(self.cur[i].bg);
        self.cur[i] = Cell { ch, fg, bg };
    }

    /// Cell range covered by a world box, at least one cell
    fn cell_span(&self, rect: &Aabb) -> (i32, i32, i32, i32) {
        let x0 = self.col(rect.left());
        let x1 = (self.col(rect.right()) - 1).max(x0);
        let y0 = self.row(rect.top());
        let y1 = (self.row(rect.bottom()) - 1).max(y0);
        (x0, x1, y0, y1)
    }

    fn fill(&mut self, rect: &Aabb, ch: char, fg: Color, bg: Color) {
        let (x0, x1, y0, y1) = self.cell_span(rect);
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.put(x, y, ch, fg, Some(bg));
            }
        }
    }

    /// Write the changed cells
    pub fn flush(&mut self) -> io::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;
        let mut cur_fg = None::<Color>;
        let mut cur_bg = None::<Color>;

        for y in 0..self.h {
            let row_off = y as usize * self.w as usize;
            for x in 0..self.w {
                let i = row_off + x as usize;
                let a = self.cur[i];
                if a == self.prev[i] {
                    continue;
                }
                queue!(self.out, cursor::MoveTo(x, y))?;
                if cur_fg != Some(a.fg) {
                    queue!(self.out, SetForegroundColor(term_color(a.fg)))?;
                    cur_fg = Some(a.fg);
                }
                if cur_bg != Some(a.bg) {
                    queue!(self.out, SetBackgroundColor(term_color(a.bg)))?;
                    cur_bg = Some(a.bg);
                }
                queue!(self.out, Print(a.ch))?;
            }
        }

        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()?;
        self.prev.copy_from_slice(&self.cur);
        Ok(())
    }

    /// Drain pending terminal events without blocking
    pub fn poll(&mut self) -> io::Result<Polled> {
        let mut polled = Polled::default();
        let now = Instant::now();

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(k) => {
                    let ctrl_c = k.modifiers.contains(KeyModifiers::CONTROL)
                        && matches!(k.code, KeyCode::Char('c'));
                    if ctrl_c || matches!(k.code, KeyCode::Char('q') | KeyCode::Char('Q')) {
                        polled.quit = true;
                        continue;
                    }
                    if matches!(k.code, KeyCode::Enter | KeyCode::Char(' ')) {
                        if k.kind == KeyEventKind::Press {
                            polled.events.push(InputEvent::PointerPress {
                                pos: Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
                            });
                        }
                        continue;
                    }
                    let Some(key) = map_key(k.code) else {
                        continue;
                    };
                    match k.kind {
                        KeyEventKind::Press | KeyEventKind::Repeat => {
                            if let Some(ev) = self.press(key, k.kind, now) {
                                polled.events.push(ev);
                            }
                        }
                        KeyEventKind::Release => {
                            self.held.retain(|(h, _)| *h != key);
                            polled.events.push(InputEvent::KeyRelease(key));
                        }
                    }
                }
                Event::Mouse(m) => {
                    if m.kind == MouseEventKind::Down(MouseButton::Left) {
                        polled.events.push(InputEvent::PointerPress {
                            pos: self.to_world(m.column, m.row),
                        });
                    }
                }
                Event::Resize(w, h) => self.resize(w, h),
                _ => {}
            }
        }

        if !self.releases {
            let (expired, still_held): (Vec<_>, Vec<_>) =
                self.held.drain(..).partition(|(_, at)| *at <= now);
            self.held = still_held;
            polled
                .events
                .extend(expired.into_iter().map(|(key, _)| InputEvent::KeyRelease(key)));
        }

        Ok(polled)
    }

    /// Track a press or auto-repeat; only fresh presses reach the game
    fn press(&mut self, key: Key, kind: KeyEventKind, now: Instant) -> Option<InputEvent> {
        if self.releases {
            return (kind == KeyEventKind::Press).then_some(InputEvent::KeyPress(key));
        }
        match self.held.iter_mut().find(|(h, _)| *h == key) {
            Some((_, at)) => {
                *at = now + REPEAT_GAP;
                None
            }
            None => {
                // A new direction key replaces whichever one was held
                if key.direction().is_some() {
                    self.held.clear();
                    self.held.push((key, now + FIRST_REPEAT_GRACE));
                }
                Some(InputEvent::KeyPress(key))
            }
        }
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::A),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::D),
        KeyCode::Esc => Some(Key::Escape),
        _ => None,
    }
}

impl Drop for TerminalShell {
    fn drop(&mut self) {
        if self.releases {
            let _ = execute!(self.out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(
            self.out,
            DisableMouseCapture,
            EnableLineWrap,
            cursor::Show,
            LeaveAlternateScreen,
            ResetColor
        );
        let _ = terminal::disable_raw_mode();
    }
}

impl Presenter for TerminalShell {
    fn clear(&mut self, color: Color) {
        self.cur.fill(Cell::blank(color));
    }

    fn draw_sprite(&mut self, sprite: SpriteId, bounds: Aabb, _scale: f32) {
        let (ch, fg) = match sprite {
            SpriteId::Note => ('♪', Color::NOTE_FILL),
            SpriteId::Player => ('█', Color::PLAYER_FILL),
        };
        let (x0, x1, y0, y1) = self.cell_span(&bounds);
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.put(x, y, ch, fg, None);
            }
        }
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, _size: f32, color: Color, centered: bool) {
        let len = text.chars().count() as i32;
        let mut x = self.col(pos.x);
        if centered {
            x -= len / 2;
        }
        let y = self.row(pos.y);
        for (i, ch) in text.chars().enumerate() {
            self.put(x + i as i32, y, ch, color, None);
        }
    }

    fn draw_rect(&mut self, rect: Aabb, color: Color) {
        self.fill(&rect, ' ', color, color);
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, _width: f32) {
        let (c0, c1) = (self.col(from.x), self.col(to.x));
        let (r0, r1) = (self.row(from.y), self.row(to.y));
        let steps = (c1 - c0).abs().max((r1 - r0).abs()).max(1);
        let ch = if r0 == r1 { '─' } else if c0 == c1 { '│' } else { '·' };
        for s in 0..=steps {
            let t = s as f32 / steps as f32;
            let x = c0 + ((c1 - c0) as f32 * t).round() as i32;
            let y = r0 + ((r1 - r0) as f32 * t).round() as i32;
            self.put(x, y, ch, color, None);
        }
    }
}
