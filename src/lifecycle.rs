//! Process-wide session lifecycle registry
//!
//! Every periodic loop owns exactly one entry here for the lifetime of its
//! session, and the host's teardown hook clears them. Orphaned periodic
//! work after page teardown is the primary failure mode this exists to
//! prevent. The visibility flag is the shared contract for every
//! timer-bearing component: periodic work pauses while the tab is hidden.

use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

lazy_static! {
    static ref SESSIONS: Mutex<HashMap<String, Arc<AtomicBool>>> = Mutex::new(HashMap::new());
}

static VISIBLE: AtomicBool = AtomicBool::new(true);
static NEXT_SESSION: AtomicU64 = AtomicU64::new(1);

/// Allocate a unique session id.
pub fn next_session_id() -> String {
    format!("framegate-{}", NEXT_SESSION.fetch_add(1, Ordering::Relaxed))
}

/// Register (or re-register) the teardown flag for a session.
///
/// Idempotent across repeated session starts: re-registering the same id
/// reuses the existing flag, cleared for the new session.
pub fn register_teardown(session_id: &str) -> Arc<AtomicBool> {
    let mut sessions = SESSIONS.lock().expect("lock poisoned");
    let flag = sessions
        .entry(session_id.to_string())
        .or_insert_with(|| Arc::new(AtomicBool::new(false)))
        .clone();
    flag.store(false, Ordering::Relaxed);
    log::debug!("registered teardown hook for {}", session_id);
    flag
}

/// Remove a session from the registry once it has fully stopped.
pub fn unregister(session_id: &str) {
    let mut sessions = SESSIONS.lock().expect("lock poisoned");
    if sessions.remove(session_id).is_some() {
        log::debug!("unregistered session {}", session_id);
    }
}

/// Request teardown of one session. The owning pipeline observes the flag
/// on its next tick and stops within one clock tick.
pub fn teardown(session_id: &str) {
    let sessions = SESSIONS.lock().expect("lock poisoned");
    if let Some(flag) = sessions.get(session_id) {
        flag.store(true, Ordering::Relaxed);
    }
}

/// Host before-unload hook: request teardown of every active session.
pub fn teardown_all() {
    let sessions = SESSIONS.lock().expect("lock poisoned");
    for flag in sessions.values() {
        flag.store(true, Ordering::Relaxed);
    }
    if !sessions.is_empty() {
        log::info!("teardown requested for {} session(s)", sessions.len());
    }
}

pub fn active_sessions() -> usize {
    SESSIONS.lock().expect("lock poisoned").len()
}

pub fn is_registered(session_id: &str) -> bool {
    SESSIONS.lock().expect("lock poisoned").contains_key(session_id)
}

/// Tab-visibility hook shared by all periodic loops: work pauses while
/// hidden and resumes on the next tick after becoming visible.
pub fn set_visibility(visible: bool) {
    VISIBLE.store(visible, Ordering::Relaxed);
    log::debug!("visibility changed: visible={}", visible);
}

pub fn is_visible() -> bool {
    VISIBLE.load(Ordering::Relaxed)
}
