//! Observer
//!
//! The editor publishes `open` and `save` events through an event manager;
//! listeners subscribe to the event types they care about and are notified
//! without the editor knowing who they are.

use crate::error::{PlaygroundError, Result};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const OPEN: &str = "open";
pub const SAVE: &str = "save";

pub trait EventListener {
    fn update(&self, event_type: &str, file: &Path, out: &mut dyn Write) -> Result<()>;
}

/// Handle returned by [`EventManager::subscribe`], needed to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct EventManager {
    listeners: HashMap<String, Vec<(SubscriptionId, Box<dyn EventListener>)>>,
    next_id: u64,
}

impl EventManager {
    /// Only the given event types can be subscribed to or fired.
    pub fn new(operations: &[&str]) -> Self {
        Self {
            listeners: operations
                .iter()
                .map(|op| (op.to_string(), Vec::new()))
                .collect(),
            next_id: 0,
        }
    }

    pub fn subscribe(
        &mut self,
        event_type: &str,
        listener: impl EventListener + 'static,
    ) -> Result<SubscriptionId> {
        let id = SubscriptionId(self.next_id);
        let listener: Box<dyn EventListener> = Box::new(listener);
        self.subscribers_mut(event_type)?.push((id, listener));
        self.next_id += 1;
        Ok(id)
    }

    /// Returns false when `id` was not subscribed to `event_type`.
    pub fn unsubscribe(&mut self, event_type: &str, id: SubscriptionId) -> Result<bool> {
        let subscribers = self.subscribers_mut(event_type)?;
        let before = subscribers.len();
        subscribers.retain(|(sub, _)| *sub != id);
        Ok(subscribers.len() != before)
    }

    pub fn subscriber_count(&self, event_type: &str) -> usize {
        self.listeners.get(event_type).map_or(0, Vec::len)
    }

    pub fn notify(&self, event_type: &str, file: &Path, out: &mut dyn Write) -> Result<()> {
        let subscribers = self
            .listeners
            .get(event_type)
            .ok_or_else(|| PlaygroundError::UnknownEvent(event_type.to_string()))?;
        tracing::debug!(event_type, listeners = subscribers.len(), "notify");
        for (_, listener) in subscribers {
            listener.update(event_type, file, out)?;
        }
        Ok(())
    }

    fn subscribers_mut(
        &mut self,
        event_type: &str,
    ) -> Result<&mut Vec<(SubscriptionId, Box<dyn EventListener>)>> {
        self.listeners
            .get_mut(event_type)
            .ok_or_else(|| PlaygroundError::UnknownEvent(event_type.to_string()))
    }
}

pub struct Editor {
    pub events: EventManager,
    file: Option<PathBuf>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self {
            events: EventManager::new(&[OPEN, SAVE]),
            file: None,
        }
    }

    pub fn open_file(&mut self, path: impl Into<PathBuf>, out: &mut dyn Write) -> Result<()> {
        let file = self.file.insert(path.into());
        self.events.notify(OPEN, file.as_path(), out)
    }

    pub fn save_file(&self, out: &mut dyn Write) -> Result<()> {
        let file = self.file.as_deref().ok_or(PlaygroundError::NoFileOpen)?;
        self.events.notify(SAVE, file, out)
    }
}

fn file_name(file: &Path) -> String {
    file.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string())
}

pub struct EmailNotificationListener {
    email: String,
}

impl EmailNotificationListener {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

impl EventListener for EmailNotificationListener {
    fn update(&self, event_type: &str, file: &Path, out: &mut dyn Write) -> Result<()> {
        writeln!(
            out,
            "Email to {}: Someone has performed {} operation with the following file: {}",
            self.email,
            event_type,
            file_name(file)
        )?;
        Ok(())
    }
}

pub struct LogOpenListener {
    log: PathBuf,
}

impl LogOpenListener {
    pub fn new(log: impl Into<PathBuf>) -> Self {
        Self { log: log.into() }
    }
}

impl EventListener for LogOpenListener {
    fn update(&self, event_type: &str, file: &Path, out: &mut dyn Write) -> Result<()> {
        writeln!(
            out,
            "Save to log {}: Someone has performed {} operation with the following file: {}",
            self.log.display(),
            event_type,
            file_name(file)
        )?;
        Ok(())
    }
}
