//! Rust library for controlling Sharp AQUOS televisions
//!
//! AQUOS televisions expose a line-oriented remote-control protocol on a
//! TCP port (10002 by default). This library provides an async client for
//! that protocol: it connects, runs the optional login handshake, queries
//! the set's identity fields, and then issues single-shot control
//! commands: power, input selection, volume, channel, and remote-key
//! emulation.
//!
//! # Quick Start
//!
//! ```no_run
//! use aquos_remote::{AquosClient, ClientConfig, RemoteKey};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig {
//!         username: Some("admin".into()),
//!         password: Some("password".into()),
//!         ..ClientConfig::default()
//!     };
//!
//!     let mut tv = AquosClient::connect("192.168.1.50", 10002, config).await?;
//!     println!("TV Name : {}", tv.name());
//!     println!("Model   : {}", tv.model_name());
//!
//!     tv.set_volume(25).await?;
//!     tv.press(RemoteKey::Play).await?;
//!
//!     tv.close().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Protocol notes
//!
//! Commands are four ASCII characters plus a space-padded argument,
//! terminated by a carriage return; the device answers each command with
//! exactly one line, or the literal `ERR` when it rejects the command.
//! There are no request IDs, so the client keeps strictly one command in
//! flight and pairs each write with the next line the device sends.
//!
//! The login handshake has no positive acknowledgement: the set either
//! prompts for credentials, echoes a rejection, or says nothing. The
//! client runs a short timeout race at each step to tell "login not
//! required" and "login accepted" apart from an unresponsive device.

mod client;
mod codec;
mod connection;
mod error;
mod login;
mod protocol;

// Public exports
pub use client::{AquosClient, ClientConfig, DeviceInfo};
pub use connection::Transport;
pub use error::{AquosError, Result};
pub use protocol::RemoteKey;
