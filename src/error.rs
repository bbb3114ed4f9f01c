use thiserror::Error;

/// Result type for AQUOS operations
pub type Result<T> = std::result::Result<T, AquosError>;

/// Errors that can occur when talking to an AQUOS television
#[derive(Error, Debug)]
pub enum AquosError {
    /// I/O error on the underlying stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Connection establishment did not complete within the deadline
    #[error("connect timed out")]
    ConnectTimeout,

    /// Connection was closed and can no longer be used
    #[error("connection already closed")]
    ConnectionClosed,

    /// The device sent a banner that does not match the login protocol
    #[error("failed to login (invalid response: {0:?})")]
    InvalidBanner(String),

    /// The device asked for a login but no username is configured
    #[error("username is not specified")]
    MissingUsername,

    /// The device asked for a password but no password is configured
    #[error("password is not specified")]
    MissingPassword,

    /// The device stopped responding mid-handshake
    #[error("failed to login (device does not respond)")]
    LoginUnresponsive,

    /// The device rejected the configured credentials
    #[error("failed to login ({0})")]
    LoginRejected(String),

    /// The device answered a command with `ERR`
    #[error("device rejected the command")]
    CommandRejected,

    /// A query expected a numeric response and got something else
    #[error("invalid numeric response: {0:?}")]
    InvalidNumber(String),
}
