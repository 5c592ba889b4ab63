//! Session lookups and parent/child classification.

use serde::Deserialize;

/// Thin read-only projection of a host session record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Session {
    /// Present on child sessions spawned from another session.
    #[serde(default, rename = "parentID")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Failure to fetch a session record from the host.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Host connection failed: {0}")]
    Connection(String),

    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Malformed session payload: {0}")]
    Malformed(String),
}

/// Read access to host session records.
pub trait SessionSource {
    fn get(&self, session_id: &str) -> Result<Session, LookupError>;
}

/// True when the session has no parent, i.e. it is a root session.
///
/// Lookup failures fail open: when we cannot tell, prefer notifying over
/// staying silent. The failure branch maps to `true` deliberately.
pub fn is_parent_session<S: SessionSource>(source: &S, session_id: &str) -> bool {
    match source.get(session_id) {
        Ok(session) => session.parent_id.is_none(),
        Err(err) => {
            tracing::debug!(
                session = %session_id,
                error = %err,
                "Session lookup failed, assuming root session"
            );
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(Result<Session, LookupError>);

    impl SessionSource for FixedSource {
        fn get(&self, _session_id: &str) -> Result<Session, LookupError> {
            match &self.0 {
                Ok(session) => Ok(session.clone()),
                Err(LookupError::Connection(msg)) => Err(LookupError::Connection(msg.clone())),
                Err(LookupError::NotFound(msg)) => Err(LookupError::NotFound(msg.clone())),
                Err(LookupError::Malformed(msg)) => Err(LookupError::Malformed(msg.clone())),
            }
        }
    }

    #[test]
    fn root_session_is_parent() {
        let source = FixedSource(Ok(Session {
            parent_id: None,
            title: Some("Fix the build".to_string()),
        }));
        assert!(is_parent_session(&source, "ses_1"));
    }

    #[test]
    fn child_session_is_not_parent() {
        let source = FixedSource(Ok(Session {
            parent_id: Some("ses_root".to_string()),
            title: None,
        }));
        assert!(!is_parent_session(&source, "ses_2"));
    }

    #[test]
    fn lookup_failure_fails_open() {
        let source = FixedSource(Err(LookupError::Connection("refused".to_string())));
        assert!(is_parent_session(&source, "ses_3"));

        let source = FixedSource(Err(LookupError::NotFound("ses_3".to_string())));
        assert!(is_parent_session(&source, "ses_3"));
    }
}
