//! Session Management
//!
//! One explicit session object per UI conversation, passed by reference
//! into the dispatch loop. The store is the only place sessions live; a
//! cleared session is simply deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::message::Conversation;

/// Unique session identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A complete agent session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier
    pub id: SessionId,

    /// Conversation history
    pub conversation: Conversation,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last activity timestamp
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            conversation: Conversation::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create with specific ID
    pub fn with_id(id: SessionId) -> Self {
        let mut session = Self::new();
        session.id = id;
        session
    }

    /// Create with system prompt
    pub fn with_system_prompt(system_prompt: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.conversation = Conversation::with_system_prompt(system_prompt);
        session
    }

    /// Update the activity timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Message count
    pub fn message_count(&self) -> usize {
        self.conversation.len()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Session store trait
pub trait SessionStore: Send + Sync {
    /// Save a session
    fn save(&self, session: &Session) -> crate::Result<()>;

    /// Load a session by ID
    fn load(&self, id: &SessionId) -> crate::Result<Option<Session>>;

    /// Delete a session, discarding all its state
    fn delete(&self, id: &SessionId) -> crate::Result<()>;
}

/// In-memory session store. Nothing survives a restart.
pub struct MemorySessionStore {
    sessions: std::sync::RwLock<std::collections::HashMap<SessionId, Session>>,
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: std::sync::RwLock::new(std::collections::HashMap::new()),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, session: &Session) -> crate::Result<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| crate::AgentError::Session("session store poisoned".into()))?;
        sessions.insert(session.id.clone(), session.clone());
        Ok(())
    }

    fn load(&self, id: &SessionId) -> crate::Result<Option<Session>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| crate::AgentError::Session("session store poisoned".into()))?;
        Ok(sessions.get(id).cloned())
    }

    fn delete(&self, id: &SessionId) -> crate::Result<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| crate::AgentError::Session("session store poisoned".into()))?;
        sessions.remove(id);
        Ok(())
    }
}
