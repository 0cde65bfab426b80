//! Host-side state machine for the terminal quiz: which screen is showing,
//! the choice cursor, and how long answer feedback lingers.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use crate::celebration::Celebration;
use crate::error::GameError;
use crate::session::{Session, SessionSummary, Verdict};
use crate::words::PoolOrigin;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Welcome,
    Quiz,
    Feedback,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub verdict: Verdict,
    pub remaining: Duration,
}

#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub state: AppState,
    pub origin: PoolOrigin,
    pub cursor: usize,
    pub feedback: Option<Feedback>,
    pub feedback_delay: Duration,
    pub celebration: Celebration,
    /// Shown on the welcome screen when a start was refused.
    pub notice: Option<String>,
    /// Taken when the last round is advanced, so the time stops there.
    pub final_summary: Option<SessionSummary>,
    viewport: (u16, u16),
}

impl App {
    pub fn new(session: Session, origin: PoolOrigin, feedback_delay: Duration) -> Self {
        Self {
            session,
            state: AppState::Welcome,
            origin,
            cursor: 0,
            feedback: None,
            feedback_delay,
            celebration: Celebration::new(),
            notice: None,
            final_summary: None,
            viewport: (80, 24),
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
    }

    /// Handle one key press. Errors are controller misuse and indicate a
    /// bug in this state machine, not a player mistake.
    pub fn on_key(&mut self, key: KeyEvent) -> Result<Action, GameError> {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return Ok(Action::Quit);
        }
        if key.code == KeyCode::Char('r') {
            self.back_to_welcome();
            return Ok(Action::Continue);
        }

        match self.state {
            AppState::Welcome => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('s') => self.begin()?,
                KeyCode::Char('q') => return Ok(Action::Quit),
                _ => {}
            },
            AppState::Quiz => match key.code {
                KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
                KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => self.move_cursor(1),
                KeyCode::Enter | KeyCode::Char(' ') => self.submit_at(self.cursor)?,
                KeyCode::Char(c @ '1'..='9') => {
                    let index = c as usize - '1' as usize;
                    if index < self.choice_count() {
                        self.cursor = index;
                        self.submit_at(index)?;
                    }
                }
                _ => {}
            },
            AppState::Feedback => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.next_word()?;
                }
            }
            AppState::Summary => match key.code {
                KeyCode::Enter | KeyCode::Char('n') => {
                    self.back_to_welcome();
                    self.begin()?;
                }
                KeyCode::Char('q') => return Ok(Action::Quit),
                _ => {}
            },
        }
        Ok(Action::Continue)
    }

    /// Advance timers: answer feedback pacing and the celebration.
    pub fn on_tick(&mut self, dt: Duration) -> Result<(), GameError> {
        self.celebration.update(dt.as_secs_f64());

        if let Some(feedback) = self.feedback.as_mut() {
            feedback.remaining = feedback.remaining.saturating_sub(dt);
            if feedback.remaining.is_zero() {
                self.next_word()?;
            }
        }
        Ok(())
    }

    pub fn choice_count(&self) -> usize {
        self.session
            .current_round()
            .map_or(0, |round| round.choices.len())
    }

    fn move_cursor(&mut self, delta: isize) {
        let count = self.choice_count();
        if count == 0 {
            return;
        }
        self.cursor = (self.cursor as isize + delta).rem_euclid(count as isize) as usize;
    }

    fn begin(&mut self) -> Result<(), GameError> {
        match self.session.start() {
            Ok(()) => {
                self.notice = None;
                self.cursor = 0;
                self.state = AppState::Quiz;
                Ok(())
            }
            Err(GameError::EmptyPool) => {
                self.notice = Some("The word list is empty; add words and restart.".into());
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn submit_at(&mut self, index: usize) -> Result<(), GameError> {
        let Some(choice) = self
            .session
            .current_round()
            .and_then(|round| round.choices.get(index).cloned())
        else {
            return Ok(());
        };

        let verdict = self.session.submit(&choice)?;
        if self.feedback_delay.is_zero() {
            return self.next_word();
        }
        self.feedback = Some(Feedback {
            verdict,
            remaining: self.feedback_delay,
        });
        self.state = AppState::Feedback;
        Ok(())
    }

    fn next_word(&mut self) -> Result<(), GameError> {
        self.session.advance()?;
        self.feedback = None;
        self.cursor = 0;

        if let Some(summary) = self.session.summary() {
            self.final_summary = Some(summary);
            self.state = AppState::Summary;
            let mut rng = rand::thread_rng();
            let banner = Celebration::banner_for(summary.is_perfect(), &mut rng);
            let (w, h) = self.viewport;
            self.celebration.start(w, h, banner, &mut rng);
        } else {
            self.state = AppState::Quiz;
        }
        Ok(())
    }

    fn back_to_welcome(&mut self) {
        self.session.reset();
        self.celebration.stop();
        self.feedback = None;
        self.final_summary = None;
        self.cursor = 0;
        self.state = AppState::Welcome;
    }
}
