//! Process-wide named notifications.
//!
//! Screens that mutate shared state (e.g. replacing the current user
//! after a newsletter opt-in) do not talk to dependent screens directly:
//! they post a named notification, and interested screens feed it back
//! into their own view-model inputs. Channels are created lazily per
//! name and live for the life of the center.

use std::collections::HashMap;

use parking_lot::RwLock;

use fundry_core::models::{Project, User};
use fundry_core::signal::{Signal, Sink};

/// A well-known notification name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationName(&'static str);

impl NotificationName {
    /// The current user was replaced in the environment.
    pub const USER_UPDATED: NotificationName = NotificationName("user_updated");
    /// A project was backed in this session.
    pub const PROJECT_BACKED: NotificationName = NotificationName("project_backed");
    /// A project was saved/unsaved in this session.
    pub const PROJECT_SAVED: NotificationName = NotificationName("project_saved");

    pub fn as_str(self) -> &'static str {
        self.0
    }
}

/// Payload carried alongside a notification name.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum NotificationPayload {
    #[default]
    None,
    User(User),
    Project(Project),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub name: NotificationName,
    pub payload: NotificationPayload,
}

impl Notification {
    pub fn named(name: NotificationName) -> Self {
        Self {
            name,
            payload: NotificationPayload::None,
        }
    }

    pub fn with_user(name: NotificationName, user: User) -> Self {
        Self {
            name,
            payload: NotificationPayload::User(user),
        }
    }

    pub fn with_project(name: NotificationName, project: Project) -> Self {
        Self {
            name,
            payload: NotificationPayload::Project(project),
        }
    }
}

/// Name-keyed publish/subscribe hub.
pub struct NotificationCenter {
    channels: RwLock<HashMap<NotificationName, (Signal<Notification>, Sink<Notification>)>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self {
            channels: RwLock::new(HashMap::new()),
        }
    }

    /// Deliver `notification` to every subscriber of its name,
    /// synchronously.
    pub fn post(&self, notification: Notification) {
        tracing::trace!(
            target: "fundry::notifications",
            name = notification.name.as_str(),
            "post"
        );
        let sink = {
            let channels = self.channels.read();
            channels.get(&notification.name).map(|(_, sink)| sink.clone())
        };
        // No subscribers yet: the notification is simply dropped, same as
        // any pub/sub bus.
        if let Some(sink) = sink {
            sink.send(notification);
        }
    }

    /// The stream of notifications posted under `name`.
    pub fn signal(&self, name: NotificationName) -> Signal<Notification> {
        let mut channels = self.channels.write();
        let (signal, _) = channels.entry(name).or_insert_with(Signal::pipe);
        signal.clone()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}
