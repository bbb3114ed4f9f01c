use crate::client::ClientConfig;
use crate::connection::Connection;
use crate::error::{AquosError, Result};

/// Handshake progress. Each state waits on the race between the login
/// timeout and the next line from the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HandshakeState {
    AwaitLoginPrompt,
    AwaitPasswordPrompt,
    AwaitOutcome,
}

/// Run the optional login exchange, once, immediately after connecting.
///
/// The device never acknowledges a successful login; it either prompts,
/// rejects, or stays silent. Silence therefore means different things per
/// state: before any prompt it means "no login required", after the
/// username it means the device hung, and after the password it means the
/// credentials were accepted.
pub(crate) async fn login(conn: &mut Connection, config: &ClientConfig) -> Result<()> {
    let wait = config.login_timeout;
    let mut state = HandshakeState::AwaitLoginPrompt;

    loop {
        let line = conn.recv_timeout(wait).await?;

        state = match (state, line) {
            (HandshakeState::AwaitLoginPrompt, None) => {
                tracing::debug!("no login prompt, login not required");
                return Ok(());
            }
            (HandshakeState::AwaitLoginPrompt, Some(text)) => {
                if !text.contains("Login") {
                    return Err(AquosError::InvalidBanner(text));
                }
                let username = match config.username.as_deref() {
                    Some(u) if !u.is_empty() => u,
                    _ => return Err(AquosError::MissingUsername),
                };
                conn.send_line(username).await?;
                HandshakeState::AwaitPasswordPrompt
            }

            // A prompt was seen, so silence now means the device hung.
            (HandshakeState::AwaitPasswordPrompt, None) => {
                return Err(AquosError::LoginUnresponsive);
            }
            (HandshakeState::AwaitPasswordPrompt, Some(text)) => {
                if !text.contains("Password") {
                    return Err(AquosError::InvalidBanner(text));
                }
                let password = match config.password.as_deref() {
                    Some(p) if !p.is_empty() => p,
                    _ => return Err(AquosError::MissingPassword),
                };
                conn.send_line(password).await?;
                HandshakeState::AwaitOutcome
            }

            // No success message exists; silence is acceptance and any
            // text is the rejection notice.
            (HandshakeState::AwaitOutcome, None) => {
                tracing::debug!("login accepted");
                return Ok(());
            }
            (HandshakeState::AwaitOutcome, Some(text)) => {
                return Err(AquosError::LoginRejected(text));
            }
        };
    }
}
