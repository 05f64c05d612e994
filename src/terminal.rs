use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use flanker::config::ResponseKeys;
use flanker::error::{FlResult, FlankerError};
use flanker::session::{Key, KeyWait, Presenter, Screen};
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};
use tracing::warn;

/// Poll slice while waiting without a timeout.
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Full-screen terminal surface. Raw mode and the alternate screen are
/// restored on drop, including when the session is cancelled.
pub struct TerminalPresenter {
    out: Stdout,
    keys: ResponseKeys,
}

impl TerminalPresenter {
    pub fn new(keys: ResponseKeys) -> FlResult<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, cursor::Hide)?;
        Ok(Self { out, keys })
    }

    fn map_key(&self, ev: &KeyEvent) -> FlResult<Option<Key>> {
        let ctrl = ev.modifiers.contains(KeyModifiers::CONTROL);
        match ev.code {
            KeyCode::Esc => Err(FlankerError::Cancelled),
            KeyCode::Char(c) if ctrl && matches!(c.to_ascii_lowercase(), 'q' | 'c') => {
                Err(FlankerError::Cancelled)
            }
            KeyCode::Char(c) if c.eq_ignore_ascii_case(&self.keys.left_key) => Ok(Some(Key::Left)),
            KeyCode::Char(c) if c.eq_ignore_ascii_case(&self.keys.right_key) => Ok(Some(Key::Right)),
            KeyCode::Char(' ') => Ok(Some(Key::Advance)),
            KeyCode::Char('b') | KeyCode::Char('B') => Ok(Some(Key::Back)),
            _ => Ok(None),
        }
    }

    /// Reads one pending event, if any arrives within `timeout`.
    fn next_key(&self, timeout: Duration) -> FlResult<Option<Key>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(ev) if ev.kind == KeyEventKind::Press => self.map_key(&ev),
            _ => Ok(None),
        }
    }

    fn draw_centered(&mut self, lines: &[(String, Option<Color>)]) -> FlResult<()> {
        let (cols, rows) = terminal::size()?;
        queue!(self.out, terminal::Clear(ClearType::All))?;

        let top = (rows as usize).saturating_sub(lines.len()) / 2;
        for (i, (line, color)) in lines.iter().enumerate() {
            let width = line.chars().count();
            let x = (cols as usize).saturating_sub(width) / 2;
            queue!(self.out, cursor::MoveTo(x as u16, (top + i) as u16))?;
            if let Some(c) = color {
                queue!(self.out, SetForegroundColor(*c), Print(line), ResetColor)?;
            } else {
                queue!(self.out, Print(line))?;
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

fn plain(text: &str) -> Vec<(String, Option<Color>)> {
    text.lines().map(|l| (l.trim().to_string(), None)).collect()
}

impl Presenter for TerminalPresenter {
    fn show(&mut self, screen: &Screen) -> FlResult<()> {
        let lines = match screen {
            Screen::Text(t) | Screen::Feedback(t) => plain(t),
            Screen::RewardCue {
                announcement,
                value,
            } => vec![
                (announcement.clone(), None),
                (String::new(), None),
                (value.clone(), Some(Color::Cyan)),
            ],
            Screen::Fixation => vec![("+".to_string(), None)],
            Screen::Stimulus { glyphs, prompt } => {
                let mut v = Vec::new();
                if let Some(p) = prompt {
                    v.push((p.clone(), None));
                    v.push((String::new(), None));
                }
                v.push((glyphs.clone(), None));
                v
            }
            Screen::Blank => Vec::new(),
        };
        self.draw_centered(&lines)
    }

    fn dwell(&mut self, duration: Duration) -> FlResult<()> {
        let start = Instant::now();
        // Keys pressed during a dwell are dropped, except cancellation.
        while let Some(remaining) = duration.checked_sub(start.elapsed()) {
            if remaining.is_zero() {
                break;
            }
            self.next_key(remaining)?;
        }
        Ok(())
    }

    fn wait_for_key(&mut self, allowed: &[Key], timeout: Option<Duration>) -> FlResult<KeyWait> {
        let start = Instant::now();
        loop {
            let slice = match timeout {
                Some(limit) => match limit.checked_sub(start.elapsed()) {
                    Some(r) if !r.is_zero() => r,
                    _ => {
                        return Ok(KeyWait {
                            key: None,
                            elapsed: start.elapsed(),
                        })
                    }
                },
                None => IDLE_POLL,
            };

            if let Some(key) = self.next_key(slice)? {
                if allowed.contains(&key) {
                    return Ok(KeyWait {
                        key: Some(key),
                        elapsed: start.elapsed(),
                    });
                }
            }
        }
    }

    fn clear_events(&mut self) -> FlResult<()> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(ev) = event::read()? {
                if ev.kind == KeyEventKind::Press {
                    self.map_key(&ev)?;
                }
            }
        }
        Ok(())
    }
}

impl Drop for TerminalPresenter {
    fn drop(&mut self) {
        if let Err(e) = execute!(self.out, cursor::Show, LeaveAlternateScreen) {
            warn!("Failed to leave alternate screen: {}", e);
        }
        if let Err(e) = terminal::disable_raw_mode() {
            warn!("Failed to disable raw mode: {}", e);
        }
    }
}
