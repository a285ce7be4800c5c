//! Active media session registry
//!
//! Holds the host's current list of playback-capable sessions. The host's
//! session listener replaces the whole list on each change; readers get an
//! immutable snapshot, so a decision in flight never sees a half-updated
//! list.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tracing::{debug, info};
use trackskip_core::{EndpointRegistry, MediaEndpoint};

type EndpointList = Arc<[Arc<dyn MediaEndpoint>]>;

/// Registry fed by the host's session-change notifications
pub struct ActiveSessions {
    endpoints: RwLock<EndpointList>,
    listening: AtomicBool,
}

impl Default for ActiveSessions {
    fn default() -> Self {
        Self::new()
    }
}

impl ActiveSessions {
    pub fn new() -> Self {
        Self {
            endpoints: RwLock::new(Arc::from(Vec::new())),
            listening: AtomicBool::new(false),
        }
    }

    /// Begin accepting updates, seeded with the sessions active right now
    pub fn start_listening(&self, initial: Vec<Arc<dyn MediaEndpoint>>) {
        self.listening.store(true, Ordering::SeqCst);
        info!(sessions = initial.len(), "Listening for media sessions");
        self.replace(initial);
    }

    /// Stop accepting updates and forget all sessions
    pub fn stop_listening(&self) {
        self.listening.store(false, Ordering::SeqCst);
        self.replace(Vec::new());
        info!("Stopped listening for media sessions");
    }

    /// Host notification: the set of active sessions changed
    ///
    /// `None` means the host reported no list, treated as empty. Ignored
    /// while not listening.
    pub fn on_sessions_changed(&self, sessions: Option<Vec<Arc<dyn MediaEndpoint>>>) {
        if !self.is_listening() {
            debug!("Session change ignored: not listening");
            return;
        }
        let sessions = sessions.unwrap_or_default();
        debug!(sessions = sessions.len(), "Active sessions changed");
        self.replace(sessions);
    }

    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.endpoints().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn replace(&self, sessions: Vec<Arc<dyn MediaEndpoint>>) {
        let list: EndpointList = Arc::from(sessions);
        match self.endpoints.write() {
            Ok(mut guard) => *guard = list,
            Err(poisoned) => *poisoned.into_inner() = list,
        }
    }
}

impl EndpointRegistry for ActiveSessions {
    fn endpoints(&self) -> Arc<[Arc<dyn MediaEndpoint>]> {
        match self.endpoints.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }
}
