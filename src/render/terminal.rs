use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue, style, terminal,
};

use crate::{
    foundation::core::{Canvas, Rgba8},
    foundation::error::{HiscoreError, HiscoreResult},
    raster::bitmap::Bitmap,
    render::{Display, DisplayEvent},
};

/// Upper half block: foreground paints the top pixel, background the bottom one.
const HALF_BLOCK: char = '\u{2580}';

/// Colors of one terminal cell: `(upper, lower)` pixel.
pub type CellColors = ([u8; 3], [u8; 3]);

/// Frame presentation on an ANSI terminal, two pixels per character cell.
///
/// Enters raw mode and the alternate screen on open; both are undone on drop.
pub struct TerminalDisplay {
    out: io::Stdout,
    cols: u16,
    rows: u16,
    last: Vec<Option<CellColors>>,
    surround: Rgba8,
    fps: Option<f64>,
}

impl TerminalDisplay {
    /// Take over the terminal; cells not covered by the frame show `surround`.
    pub fn open(surround: Rgba8) -> HiscoreResult<Self> {
        let (cols, rows) = terminal::size().map_err(term_err)?;
        let mut out = io::stdout();
        terminal::enable_raw_mode().map_err(term_err)?;
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )
        .map_err(term_err)?;

        Ok(Self {
            out,
            cols,
            rows,
            last: vec![None; usize::from(cols) * usize::from(rows)],
            surround,
            fps: None,
        })
    }

    /// Terminal size in cells.
    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// Canvas that maps one pixel onto each half cell.
    pub fn native_canvas(&self) -> HiscoreResult<Canvas> {
        Canvas::new(u32::from(self.cols), u32::from(self.rows) * 2)
    }

    fn resize(&mut self, cols: u16, rows: u16) -> HiscoreResult<()> {
        self.cols = cols;
        self.rows = rows;
        self.last = vec![None; usize::from(cols) * usize::from(rows)];
        queue!(self.out, terminal::Clear(terminal::ClearType::All)).map_err(term_err)
    }
}

impl Display for TerminalDisplay {
    fn poll_events(&mut self) -> HiscoreResult<Vec<DisplayEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO).map_err(term_err)? {
            match event::read().map_err(term_err)? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let quit = match key.code {
                        KeyCode::Esc | KeyCode::Char('q') => true,
                        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
                        _ => false,
                    };
                    if quit {
                        events.push(DisplayEvent::Quit);
                    }
                }
                Event::Resize(cols, rows) => self.resize(cols, rows)?,
                _ => {}
            }
        }
        Ok(events)
    }

    fn present(&mut self, frame: &Bitmap) -> HiscoreResult<()> {
        let cells = sample_cells(frame, self.cols, self.rows, self.surround);

        for (i, cell) in cells.iter().enumerate() {
            if self.last[i] == Some(*cell) {
                continue;
            }
            self.last[i] = Some(*cell);

            let col = (i % usize::from(self.cols)) as u16;
            let row = (i / usize::from(self.cols)) as u16;
            let (upper, lower) = *cell;
            queue!(
                self.out,
                cursor::MoveTo(col, row),
                style::SetForegroundColor(rgb(upper)),
                style::SetBackgroundColor(rgb(lower)),
                style::Print(HALF_BLOCK),
            )
            .map_err(term_err)?;
        }

        if let Some(fps) = self.fps.take() {
            let text = format!("{fps:8.4}");
            queue!(
                self.out,
                cursor::MoveTo(0, 0),
                style::ResetColor,
                style::Print(&text),
            )
            .map_err(term_err)?;
            // cells under the text must be repainted next frame
            for slot in self.last.iter_mut().take(text.len()) {
                *slot = None;
            }
        }

        self.out.flush().map_err(term_err)
    }

    fn report_fps(&mut self, fps: f64) -> HiscoreResult<()> {
        self.fps = Some(fps);
        Ok(())
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            style::ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Nearest-neighbour fit of `frame` onto `cols` x `rows` half-block cells.
///
/// The aspect ratio is kept; cells outside the fitted frame get `surround`.
/// Premultiplied channels are used as-is, i.e. the frame is shown over black.
pub fn sample_cells(frame: &Bitmap, cols: u16, rows: u16, surround: Rgba8) -> Vec<CellColors> {
    let cols = u64::from(cols);
    let px_rows = u64::from(rows) * 2;
    let fw = u64::from(frame.width());
    let fh = u64::from(frame.height());
    let outside = [surround.r, surround.g, surround.b];

    let (dw, dh) = if frame.is_empty() {
        (0, 0)
    } else if cols * fh <= px_rows * fw {
        (cols, fh * cols / fw)
    } else {
        (fw * px_rows / fh, px_rows)
    };
    let ox = (cols - dw) / 2;
    let oy = (px_rows - dh) / 2;

    let sample = |px: u64, py: u64| -> [u8; 3] {
        if px < ox || px >= ox + dw || py < oy || py >= oy + dh {
            return outside;
        }
        let sx = ((px - ox) * fw / dw) as u32;
        let sy = ((py - oy) * fh / dh) as u32;
        let [r, g, b, _] = frame.pixel(sx, sy).unwrap_or([0; 4]);
        [r, g, b]
    };

    let mut out = Vec::with_capacity((cols * u64::from(rows)) as usize);
    for row in 0..u64::from(rows) {
        for col in 0..cols {
            out.push((sample(col, row * 2), sample(col, row * 2 + 1)));
        }
    }
    out
}

fn rgb([r, g, b]: [u8; 3]) -> style::Color {
    style::Color::Rgb { r, g, b }
}

fn term_err(e: io::Error) -> HiscoreError {
    HiscoreError::render(format!("terminal: {e}"))
}

#[cfg(test)]
#[path = "../../tests/unit/render/terminal.rs"]
mod tests;
