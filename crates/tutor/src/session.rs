use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use stave_domain::{Note, NoteCatalog, StaffMode};
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::input::PitchInput;
use crate::matching::is_match;
use crate::selector::NoteSelector;

/// How long the success readout or the error marker stays up.
pub const PAUSE_WINDOW: Duration = Duration::from_millis(1500);

/// User preferences that steer selection and matching. Supplied by the host.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionSettings {
    pub staff_mode: StaffMode,
    pub strict_mode: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            staff_mode: StaffMode::Both,
            strict_mode: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SessionPhase {
    /// A note is on the staff and waiting for an answer.
    Presenting,
    /// Answered correctly; the next note follows when the window closes.
    SuccessPause,
    /// Answered wrongly; the same note stays and can be retried.
    ErrorPause,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum InputOutcome {
    /// Unmapped key, unknown pitch name or torn-down session.
    Ignored,
    Correct { elapsed_ms: u64 },
    Incorrect,
    /// Evaluated during the success window; has no effect.
    Unscored { matched: bool },
}

/// Read-only view for the presentation layer.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SessionSnapshot {
    pub current_note: Option<Note>,
    pub elapsed_since_shown_ms: Option<u64>,
    pub last_success_elapsed_ms: Option<u64>,
    pub error_active: bool,
    pub phase: SessionPhase,
}

#[derive(Debug, Default)]
struct SessionState {
    current_note: Option<Note>,
    note_shown_at: Option<Instant>,
    last_success_elapsed_ms: Option<u64>,
    error_active: bool,
}

/// The pause transition waiting to fire. At most one exists at a time.
#[derive(Clone, Copy, Debug)]
struct ScheduledTransition {
    due: Instant,
    ends: SessionPhase,
}

/// Owns the session state and performs every transition on it.
///
/// The controller never sleeps: pause windows are deadlines that the host
/// fires through [`SessionController::poll_timers`], sleeping until
/// [`SessionController::next_deadline`] in between.
pub struct SessionController<C: Clock = SystemClock> {
    catalog: Arc<NoteCatalog>,
    selector: NoteSelector,
    clock: C,
    settings: SessionSettings,
    state: SessionState,
    phase: SessionPhase,
    scheduled: Option<ScheduledTransition>,
    torn_down: bool,
}

impl<C: Clock> SessionController<C> {
    /// Starts a session and presents its first note immediately.
    pub fn start(
        catalog: Arc<NoteCatalog>,
        settings: SessionSettings,
        selector: NoteSelector,
        clock: C,
    ) -> Self {
        let mut controller = Self {
            catalog,
            selector,
            clock,
            settings,
            state: SessionState::default(),
            phase: SessionPhase::Presenting,
            scheduled: None,
            torn_down: false,
        };
        info!(
            staff_mode = %settings.staff_mode,
            strict = settings.strict_mode,
            "starting practice session"
        );
        controller.present_next_note();
        controller
    }

    pub fn catalog(&self) -> &NoteCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> SessionSettings {
        self.settings
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Replaces the preferences. The note on the staff and any pending
    /// window are left alone; the staff mode only filters later draws.
    pub fn configure(&mut self, settings: SessionSettings) {
        if settings != self.settings {
            debug!(
                staff_mode = %settings.staff_mode,
                strict = settings.strict_mode,
                "session reconfigured"
            );
        }
        self.settings = settings;
    }

    pub fn handle_physical_key(&mut self, key: char) -> InputOutcome {
        match PitchInput::physical(key) {
            Some(input) => self.handle_input(input),
            None => InputOutcome::Ignored,
        }
    }

    pub fn handle_key_click(&mut self, pitch_name: &str) -> InputOutcome {
        match PitchInput::key_click(pitch_name, &self.catalog) {
            Some(input) => self.handle_input(input),
            None => InputOutcome::Ignored,
        }
    }

    pub fn handle_input(&mut self, input: PitchInput) -> InputOutcome {
        if self.torn_down {
            return InputOutcome::Ignored;
        }
        // A window that is already over must close before the input is judged.
        self.poll_timers();

        let Some(target) = self.state.current_note.as_ref() else {
            return InputOutcome::Ignored;
        };
        let strict = input.strict(self.settings.strict_mode);
        let matched = is_match(&input.pitch, target, strict);
        debug!(
            input = %input.pitch,
            target = %target.pitch,
            strict,
            matched,
            phase = ?self.phase,
            "evaluated input"
        );

        match (self.phase, matched) {
            (SessionPhase::SuccessPause, matched) => InputOutcome::Unscored { matched },
            (_, true) => self.enter_success(),
            (_, false) => self.enter_error(),
        }
    }

    /// Fires the pending transition if its deadline has passed. Returns
    /// whether anything changed.
    pub fn poll_timers(&mut self) -> bool {
        let Some(scheduled) = self.scheduled else {
            return false;
        };
        if self.torn_down || self.clock.now() < scheduled.due {
            return false;
        }
        self.scheduled = None;
        match scheduled.ends {
            SessionPhase::ErrorPause => {
                self.state.error_active = false;
                self.phase = SessionPhase::Presenting;
                debug!("error window closed");
            }
            SessionPhase::SuccessPause => self.present_next_note(),
            SessionPhase::Presenting => {}
        }
        true
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduled.map(|scheduled| scheduled.due)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let now = self.clock.now();
        SessionSnapshot {
            current_note: self.state.current_note.clone(),
            elapsed_since_shown_ms: self
                .state
                .note_shown_at
                .map(|shown_at| millis_between(shown_at, now)),
            last_success_elapsed_ms: self.state.last_success_elapsed_ms,
            error_active: self.state.error_active,
            phase: self.phase,
        }
    }

    /// Cancels the pending window. Nothing mutates the state afterwards.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.scheduled = None;
        info!("practice session torn down");
    }

    fn present_next_note(&mut self) {
        let note = self
            .selector
            .select_next(&self.catalog, self.settings.staff_mode);
        debug!(note = %note.pitch, staff = %note.staff, "presenting note");
        self.state = SessionState {
            current_note: Some(note),
            note_shown_at: Some(self.clock.now()),
            last_success_elapsed_ms: None,
            error_active: false,
        };
        self.phase = SessionPhase::Presenting;
    }

    fn enter_success(&mut self) -> InputOutcome {
        let now = self.clock.now();
        let elapsed_ms = self
            .state
            .note_shown_at
            .map(|shown_at| millis_between(shown_at, now))
            .unwrap_or_default();
        self.state.last_success_elapsed_ms = Some(elapsed_ms);
        self.state.error_active = false;
        self.schedule(now, SessionPhase::SuccessPause);
        debug!(elapsed_ms, "correct answer");
        InputOutcome::Correct { elapsed_ms }
    }

    fn enter_error(&mut self) -> InputOutcome {
        let now = self.clock.now();
        self.state.error_active = true;
        self.schedule(now, SessionPhase::ErrorPause);
        debug!("wrong answer");
        InputOutcome::Incorrect
    }

    fn schedule(&mut self, now: Instant, phase: SessionPhase) {
        self.phase = phase;
        self.scheduled = Some(ScheduledTransition {
            due: now + PAUSE_WINDOW,
            ends: phase,
        });
    }
}

impl<C: Clock> Drop for SessionController<C> {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn millis_between(earlier: Instant, later: Instant) -> u64 {
    u64::try_from(later.saturating_duration_since(earlier).as_millis()).unwrap_or(u64::MAX)
}
