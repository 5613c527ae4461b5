//! A thin reference host adapter built on `crossterm` and `tui`: renders
//! the framebuffer as half-block Unicode glyphs (two CHIP-8 rows per
//! terminal cell), reads the keyboard in raw mode, and gates the
//! terminal bell as the tone. Entirely optional — any other crate can
//! implement [`crate::devices`] instead.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::ExecutableCommand;
use tui::backend::CrosstermBackend;
use tui::layout::Rect;
use tui::text::{Span, Spans};
use tui::widgets::{Block, Borders, Paragraph};
use tui::Terminal;

use crate::definitions::{display, keypad};
use crate::devices::{AudioGate, ControlEvent, KeyboardSource, VideoOutput};
use crate::error::HostError;

/// Upper and lower half-block glyphs, indexed by `(top, bottom)` pixel
/// state, so two CHIP-8 rows fit in one terminal cell.
const GLYPHS: [[char; 2]; 2] = [[' ', '\u{2584}'], ['\u{2580}', '\u{2588}']];

/// Puts the terminal into raw mode and hands back a `tui` terminal
/// pointed at an alternate screen. Call [`TerminalHost::shutdown`] (or
/// just drop it) to restore the terminal before the process exits.
pub struct TerminalHost {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Pixels per CHIP-8 pixel. Stored for interface completeness; the
    /// half-block renderer always maps one CHIP-8 column to one terminal
    /// column, since a terminal cell has no finer addressable unit.
    vidscale: u32,
}

impl TerminalHost {
    pub fn new(vidscale: u32) -> Result<Self, HostError> {
        enable_raw_mode().map_err(|e| HostError::Video(e.to_string()))?;
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend).map_err(|e| HostError::Video(e.to_string()))?;
        Ok(Self { terminal, vidscale })
    }

    pub fn shutdown(&mut self) {
        let _ = disable_raw_mode();
    }

    pub fn vidscale(&self) -> u32 {
        self.vidscale
    }
}

impl Drop for TerminalHost {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn cell(frame: &[bool; display::RESOLUTION], x: usize, row_pair: usize) -> char {
    let top = frame[(row_pair * 2) * display::WIDTH + x];
    let bottom = frame[(row_pair * 2 + 1) * display::WIDTH + x];
    GLYPHS[top as usize][bottom as usize]
}

impl VideoOutput for TerminalHost {
    fn present(&mut self, frame: &[bool; display::RESOLUTION]) -> Result<(), String> {
        self.terminal
            .draw(|f| {
                let area = f.size();
                let block = Block::default().borders(Borders::ALL).title("chip8");

                let lines: Vec<Spans> = (0..display::HEIGHT / 2)
                    .map(|row_pair| {
                        let line: String = (0..display::WIDTH)
                            .map(|x| cell(frame, x, row_pair))
                            .collect();
                        Spans::from(Span::raw(line))
                    })
                    .collect();

                let paragraph = Paragraph::new(lines).block(block);
                f.render_widget(
                    paragraph,
                    Rect {
                        x: area.x,
                        y: area.y,
                        width: area.width,
                        height: area.height,
                    },
                );
            })
            .map_err(|e| e.to_string())?;
        Ok(())
    }
}

/// Gates the terminal bell — the only "audio" a plain terminal offers
/// without pulling in a dedicated sound backend. `freq_hz` and
/// `amplitude` are accepted for interface completeness per `--audiofreq`
/// and `--ampl`; the bell itself carries neither pitch nor volume.
pub struct TerminalBell {
    active: bool,
    freq_hz: u32,
    amplitude: u32,
}

impl TerminalBell {
    pub fn new(freq_hz: u32, amplitude: u32) -> Self {
        Self {
            active: false,
            freq_hz,
            amplitude,
        }
    }

    pub fn freq_hz(&self) -> u32 {
        self.freq_hz
    }

    pub fn amplitude(&self) -> u32 {
        self.amplitude
    }
}

impl Default for TerminalBell {
    fn default() -> Self {
        Self::new(440, 20000)
    }
}

impl AudioGate for TerminalBell {
    fn set_active(&mut self, on: bool) {
        if on && !self.active {
            let _ = io::stdout().execute(crossterm::style::Print('\u{7}'));
        }
        self.active = on;
    }
}

/// Reads raw-mode key events and maps them onto the 16-key hex keypad via
/// [`keypad::HOST_LAYOUT`]. Keys are "pressed" for exactly one poll after
/// a `KeyDown`-equivalent event — `crossterm` on most terminals only ever
/// reports presses, never releases, so every sampled key reads as held
/// for a single pass and then goes cold unless it is pressed again.
pub struct TerminalKeyboard;

impl TerminalKeyboard {
    pub fn new() -> Self {
        Self
    }

    fn key_to_index(code: KeyCode) -> Option<usize> {
        if let KeyCode::Char(c) = code {
            return keypad::HOST_LAYOUT.iter().position(|&k| k == c);
        }
        None
    }
}

impl Default for TerminalKeyboard {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardSource for TerminalKeyboard {
    fn poll(&mut self) -> Result<([bool; keypad::SIZE], Option<ControlEvent>), String> {
        let mut keys = [false; keypad::SIZE];
        let mut control = None;

        while event::poll(Duration::from_secs(0)).map_err(|e| e.to_string())? {
            match event::read().map_err(|e| e.to_string())? {
                Event::Key(key) => match key.code {
                    KeyCode::Esc => control = Some(ControlEvent::Quit),
                    KeyCode::F(1) => control = Some(ControlEvent::Reload),
                    KeyCode::F(2) => control = Some(ControlEvent::Dump),
                    code => {
                        if let Some(idx) = Self::key_to_index(code) {
                            keys[idx] = true;
                        }
                    }
                },
                _ => {}
            }
        }

        Ok((keys, control))
    }
}
