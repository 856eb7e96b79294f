//! Connection and session model for the dashboard's backend handshake.
//!
//! Replaces ambient "current connection" globals with owned values passed to
//! whoever needs them: a [`ConnectionProfile`] describing the target
//! database, [`Credentials`] kept outside the profile so the profile can be
//! logged and serialized safely, and a [`Session`] whose lifecycle
//! (disconnected, connecting, active, closed) is an explicit state machine.
//! An active session issues monotonically increasing [`RequestToken`]s; a
//! fetch result is applied only while its token is still the newest issued,
//! so a slow response cannot overwrite newer state.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// SQL Server's default port, used when a server string carries none.
pub const DEFAULT_PORT: u16 = 1433;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("connection field {field:?} must not be empty")]
    MissingProfileField { field: &'static str },
    #[error("invalid port {value:?} in server address")]
    InvalidPort { value: String },
    #[error("no database connection")]
    NotConnected,
    #[error("invalid session transition from {from:?} to {to:?}")]
    InvalidTransition { from: SessionState, to: SessionState },
}

/// Where to connect, without any secret material.
///
/// Safe to log, persist and echo back to the shell. `port` defaults to
/// [`DEFAULT_PORT`] when absent from a decoded payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionProfile {
    pub server: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub database: String,
    pub username: String,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl ConnectionProfile {
    pub fn validate(&self) -> Result<(), SessionError> {
        for (field, value) in [
            ("server", &self.server),
            ("database", &self.database),
            ("username", &self.username),
        ] {
            if value.trim().is_empty() {
                return Err(SessionError::MissingProfileField { field });
            }
        }
        Ok(())
    }

    /// Driver address string, `server,port` as the SQL Server driver expects.
    pub fn address(&self) -> String {
        format!("{},{}", self.server, self.port)
    }
}

/// Secret half of a connection request.
///
/// Not serializable, and `Debug` is redacted, so the password cannot leak
/// through logging or state dumps.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Wire shape of the shell's connect call.
///
/// All four fields must be non-empty; the server string may carry an
/// explicit port as `host,port`.
#[derive(Clone, Deserialize)]
pub struct ConnectRequest {
    pub server: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for ConnectRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectRequest")
            .field("server", &self.server)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl ConnectRequest {
    /// Splits the request into a loggable profile and its credentials.
    pub fn into_parts(self) -> Result<(ConnectionProfile, Credentials), SessionError> {
        if self.password.trim().is_empty() {
            return Err(SessionError::MissingProfileField { field: "password" });
        }
        let (server, port) = split_server_port(&self.server)?;
        let profile = ConnectionProfile {
            server,
            port,
            database: self.database,
            username: self.username,
        };
        profile.validate()?;
        Ok((
            profile,
            Credentials {
                password: self.password,
            },
        ))
    }
}

fn split_server_port(server: &str) -> Result<(String, u16), SessionError> {
    match server.split_once(',') {
        Some((host, port)) => {
            let parsed = port
                .trim()
                .parse::<u16>()
                .map_err(|_| SessionError::InvalidPort {
                    value: port.trim().to_string(),
                })?;
            Ok((host.trim().to_string(), parsed))
        }
        None => Ok((server.trim().to_string(), DEFAULT_PORT)),
    }
}

/// Acknowledgement sent back to the shell after a successful handshake.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConnectAck {
    pub message: String,
}

impl ConnectAck {
    /// Ack for a session that just went active.
    pub fn for_profile(profile: &ConnectionProfile) -> Self {
        ConnectAck {
            message: format!("connected to {} at {}", profile.database, profile.address()),
        }
    }
}

/// Lifecycle of one backend session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Disconnected,
    Connecting,
    Active,
    Closed,
}

/// Monotonically increasing fetch generation issued by a session.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// One dashboard's connection to the reporting backend.
///
/// State moves disconnected → connecting → active → closed; a failed
/// handshake drops back to disconnected and may retry. Switching to a
/// different database is a new `Session` with a new profile, never a
/// transition of this one. Single-threaded by design: the token sequencer
/// is plain `&mut` state, no atomics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    profile: ConnectionProfile,
    state: SessionState,
    last_token: u64,
}

impl Session {
    /// Starts disconnected; [`Session::begin_connect`] opens the handshake.
    pub fn new(profile: ConnectionProfile) -> Result<Self, SessionError> {
        profile.validate()?;
        Ok(Session {
            profile,
            state: SessionState::Disconnected,
            last_token: 0,
        })
    }

    pub fn profile(&self) -> &ConnectionProfile {
        &self.profile
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn begin_connect(&mut self) -> Result<(), SessionError> {
        self.transition(SessionState::Connecting)
    }

    /// Marks the handshake successful.
    pub fn activate(&mut self) -> Result<(), SessionError> {
        self.transition(SessionState::Active)
    }

    /// Records a failed handshake; the session may connect again.
    pub fn fail(&mut self) -> Result<(), SessionError> {
        self.transition(SessionState::Disconnected)
    }

    /// Closes the session permanently.
    pub fn close(&mut self) -> Result<(), SessionError> {
        self.transition(SessionState::Closed)
    }

    fn transition(&mut self, to: SessionState) -> Result<(), SessionError> {
        use SessionState::*;
        let allowed = matches!(
            (self.state, to),
            (Disconnected, Connecting)
                | (Connecting, Active)
                | (Connecting, Disconnected)
                | (Disconnected, Closed)
                | (Connecting, Closed)
                | (Active, Closed)
        );
        if !allowed {
            return Err(SessionError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        self.state = to;
        Ok(())
    }

    /// Errors with the canonical "no database connection" condition unless
    /// the session is active.
    pub fn ensure_active(&self) -> Result<(), SessionError> {
        if self.state == SessionState::Active {
            Ok(())
        } else {
            Err(SessionError::NotConnected)
        }
    }

    /// Issues the next fetch token. Requires an active session.
    pub fn issue_token(&mut self) -> Result<RequestToken, SessionError> {
        self.ensure_active()?;
        self.last_token += 1;
        Ok(RequestToken(self.last_token))
    }

    /// Whether `token` is still the newest issued.
    pub fn is_latest(&self, token: RequestToken) -> bool {
        token.0 == self.last_token
    }

    /// Passes `result` through only while `token` is still the newest
    /// issued; a stale fetch's result comes back as `None` and must be
    /// dropped, not applied.
    pub fn accept_if_latest<T>(&self, token: RequestToken, result: T) -> Option<T> {
        self.is_latest(token).then_some(result)
    }
}
