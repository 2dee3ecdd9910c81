//! Terminal plumbing: raw-mode setup, crossterm event translation, and
//! presenting a framebuffer with half-block glyphs.
//!
//! Each character cell shows two vertically stacked pixels, so a terminal of
//! `cols` x `rows` cells is a `cols` x `rows * 2` pixel window.

use crate::graphics::Framebuffer;
use crate::input::InputEvent;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, execute, queue};
use std::io::{self, Write};

/// Upper half block: foreground paints the top pixel, background the bottom
const HALF_BLOCK: char = '\u{2580}';

/// What the host should do in response to a terminal event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Input(InputEvent),
    ToggleDebug,
    ToggleWireframe,
    Quit,
}

/// Pixel size of a terminal of `cols` x `rows` cells
pub fn pixel_size(cols: u16, rows: u16) -> (u32, u32) {
    (u32::from(cols), u32::from(rows) * 2)
}

/// Current terminal size in cells, preferring `termsize` and falling back to
/// crossterm's query.
pub fn terminal_size() -> io::Result<(u16, u16)> {
    match termsize::get() {
        Some(size) if size.cols > 0 && size.rows > 0 => Ok((size.cols, size.rows)),
        _ => crossterm::terminal::size(),
    }
}

/// Maps a crossterm event to a host action.
///
/// `height` is the current window height in pixels; pointer rows are flipped
/// against it so pointer events arrive with a bottom-left origin.
pub fn translate(event: &Event, height: u32) -> Option<Action> {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Mouse(mouse) => translate_mouse(mouse, height).map(Action::Input),
        Event::Resize(cols, rows) => {
            let (width, height) = pixel_size(*cols, *rows);
            Some(Action::Input(InputEvent::Resize { width, height }))
        }
        _ => None,
    }
}

fn translate_key(key: &KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('d' | 'D') => Some(Action::ToggleDebug),
        KeyCode::Char('w' | 'W') => Some(Action::ToggleWireframe),
        _ => None,
    }
}

fn translate_mouse(mouse: &MouseEvent, height: u32) -> Option<InputEvent> {
    let x = i32::from(mouse.column);
    let y = height as i32 - i32::from(mouse.row) * 2;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::PointerDown { x, y }),
        MouseEventKind::Drag(MouseButton::Left) => Some(InputEvent::PointerMove { x, y }),
        MouseEventKind::Up(MouseButton::Left) => Some(InputEvent::PointerUp),
        MouseEventKind::ScrollUp => Some(InputEvent::ScrollUp),
        MouseEventKind::ScrollDown => Some(InputEvent::ScrollDown),
        _ => None,
    }
}

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb { r, g, b }
}

/// Writes the framebuffer, then any overlay lines in the top-left corner.
pub fn present<W: Write>(out: &mut W, fb: &Framebuffer, overlay: &[String]) -> io::Result<()> {
    let mut last: Option<([u8; 3], [u8; 3])> = None;

    for row in 0..fb.height() / 2 {
        queue!(out, cursor::MoveTo(0, row as u16))?;
        for col in 0..fb.width() {
            let top = fb.pixel(col, row * 2);
            let bottom = fb.pixel(col, row * 2 + 1);
            if last != Some((top, bottom)) {
                queue!(out, SetForegroundColor(rgb(top)), SetBackgroundColor(rgb(bottom)))?;
                last = Some((top, bottom));
            }
            queue!(out, Print(HALF_BLOCK))?;
        }
    }

    if !overlay.is_empty() {
        queue!(
            out,
            SetForegroundColor(Color::White),
            SetBackgroundColor(Color::Black)
        )?;
        for (line, text) in overlay.iter().enumerate() {
            queue!(out, cursor::MoveTo(0, line as u16), Print(text))?;
        }
    }

    queue!(out, ResetColor)?;
    out.flush()
}

/// Raw mode, alternate screen and mouse capture for as long as it lives
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture, cursor::Hide) {
            let _ = disable_raw_mode();
            return Err(err);
        }
        Ok(TerminalGuard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            ResetColor,
            cursor::Show,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = disable_raw_mode();
    }
}
