pub mod clock;
pub mod driver;
pub mod input;
pub mod keyboard;
pub mod matching;
pub mod selector;
pub mod session;

pub use clock::{Clock, ManualClock, SystemClock, TokioClock};
pub use driver::{SessionDriver, SessionError, SessionHandle};
pub use input::{physical_key_pitch, InputSource, PitchInput};
pub use keyboard::{is_central_c, key_labels, visible_keys, KeyLabelMode};
pub use matching::is_match;
pub use selector::NoteSelector;
pub use session::{
    InputOutcome, SessionController, SessionPhase, SessionSettings, SessionSnapshot, PAUSE_WINDOW,
};
