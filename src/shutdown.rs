use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, poll, read};

/// Keyboard polling interval for Ctrl+C detection.
const KEYBOARD_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Cooperative stop signal: a shared cancel flag, optionally combined with a
/// holder-local deadline. Workers poll it between requests and between
/// cycles, never mid-request.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl StopSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a combined signal that also fires once `duration` has elapsed.
    /// The shared cancel flag stays shared; the deadline is local to the
    /// returned handle.
    #[must_use]
    pub fn with_deadline(&self, duration: Duration) -> Self {
        Self {
            flag: Arc::clone(&self.flag),
            deadline: Instant::now().checked_add(duration),
        }
    }

    /// Raise the shared cancel flag. Raising an already-raised signal is a
    /// no-op.
    pub fn raise(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_raised(&self) -> bool {
        if self.flag.load(Ordering::SeqCst) {
            return true;
        }
        self.deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// Watch the keyboard for Ctrl+C and raise the shared cancel flag once.
///
/// The run owns the terminal in raw mode, so the interrupt arrives as a key
/// event rather than a signal; the process is never force-killed mid-run.
/// The watcher exits once the flag is raised from any side.
pub fn spawn_cancel_watcher(signal: StopSignal) -> JoinHandle<()> {
    std::thread::spawn(move || {
        loop {
            if signal.is_raised() {
                break;
            }

            let has_event = poll(KEYBOARD_POLL_INTERVAL).unwrap_or_default();

            if has_event
                && let Ok(Event::Key(KeyEvent {
                    code: KeyCode::Char('c'),
                    modifiers: KeyModifiers::CONTROL,
                    ..
                })) = read()
            {
                signal.raise();
                break;
            }
        }
    })
}
