use crate::connection::{Connection, Transport};
use crate::error::{AquosError, Result};
use crate::login;
use crate::protocol::{Command, RemoteKey};
use std::time::Duration;

/// Connection settings, fixed for the lifetime of a session.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Username for the optional login exchange. Leave `None` for
    /// televisions with login disabled.
    pub username: Option<String>,
    /// Password for the optional login exchange.
    pub password: Option<String>,
    /// How long to wait on each login handshake step before treating
    /// silence as the answer.
    pub login_timeout: Duration,
    /// Deadline for establishing the TCP connection.
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            login_timeout: Duration::from_millis(200),
            connect_timeout: Duration::from_secs(30),
        }
    }
}

/// Identity fields reported by the television, fetched once at connect.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub name: String,
    pub model_name: String,
    pub software_version: String,
    pub ip_protocol_version: String,
}

/// Client for controlling a Sharp AQUOS television
///
/// `AquosClient` manages one TCP session to the television's IP control
/// port (10002 by default on the set). Commands are strictly one at a
/// time: the protocol carries no request IDs, so each command's answer is
/// simply the next line the device sends.
///
/// # Example
///
/// ```no_run
/// use aquos_remote::{AquosClient, ClientConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut tv = AquosClient::connect("192.168.1.50", 10002, ClientConfig::default()).await?;
///     println!("connected to {}", tv.name());
///
///     tv.power(true).await?;
///     tv.set_volume(20).await?;
///     println!("volume is {}", tv.volume().await?);
///
///     tv.close().await?;
///     Ok(())
/// }
/// ```
pub struct AquosClient {
    conn: Connection,
    info: DeviceInfo,
}

impl std::fmt::Debug for AquosClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AquosClient")
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

impl AquosClient {
    /// Connect to a television, run the login handshake, and fetch its
    /// identity fields.
    pub async fn connect(host: impl AsRef<str>, port: u16, config: ClientConfig) -> Result<Self> {
        let conn = Connection::connect(host.as_ref(), port, config.connect_timeout).await?;
        Self::bring_up(conn, &config).await
    }

    /// Run a session over an already-established stream.
    ///
    /// Useful for tunnelled links, and for tests that stand in a fake
    /// device over an in-memory pipe.
    pub async fn from_stream(stream: impl Transport + 'static, config: ClientConfig) -> Result<Self> {
        Self::bring_up(Connection::open(Box::new(stream)), &config).await
    }

    async fn bring_up(mut conn: Connection, config: &ClientConfig) -> Result<Self> {
        login::login(&mut conn, config).await?;
        let info = fetch_info(&mut conn).await?;
        tracing::info!(name = %info.name, model = %info.model_name, "connected");
        Ok(Self { conn, info })
    }

    /// Close the connection. Calling this twice is a no-op.
    pub async fn close(&mut self) -> Result<()> {
        self.conn.close().await
    }

    /// TV name as reported by the device
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Model name as reported by the device
    pub fn model_name(&self) -> &str {
        &self.info.model_name
    }

    /// Software version as reported by the device
    pub fn software_version(&self) -> &str {
        &self.info.software_version
    }

    /// IP protocol version as reported by the device
    pub fn ip_protocol_version(&self) -> &str {
        &self.info.ip_protocol_version
    }

    /// All identity fields fetched at connect time
    pub fn info(&self) -> &DeviceInfo {
        &self.info
    }

    /// Turn the television on or off
    pub async fn power(&mut self, on: bool) -> Result<()> {
        self.command("POWR", if on { "1" } else { "0" }).await
    }

    /// Cycle to the next input
    pub async fn toggle_input(&mut self) -> Result<()> {
        self.command("ITGD", "-").await
    }

    /// Switch to the TV tuner input
    pub async fn input_tv(&mut self) -> Result<()> {
        self.command("ITVD", "-").await
    }

    /// Switch to a numbered AV input
    ///
    /// No range check is done here; which numbers exist depends on the
    /// model, and the set answers `ERR` for inputs it does not have.
    pub async fn set_input(&mut self, source: u8) -> Result<()> {
        self.command("IAVD", source.to_string()).await
    }

    /// Step up one channel
    pub async fn channel_up(&mut self) -> Result<()> {
        self.command("CHUP", "-").await
    }

    /// Step down one channel
    pub async fn channel_down(&mut self) -> Result<()> {
        self.command("CHDW", "-").await
    }

    /// Set the volume level
    pub async fn set_volume(&mut self, volume: u8) -> Result<()> {
        self.command("VOLM", volume.to_string()).await
    }

    /// Query the current volume level
    pub async fn volume(&mut self) -> Result<u8> {
        let text = self.conn.command(&Command::new("VOLM", "?")).await?;
        match text.trim().parse() {
            Ok(volume) => Ok(volume),
            Err(_) => Err(AquosError::InvalidNumber(text)),
        }
    }

    /// Toggle audio mute
    pub async fn toggle_mute(&mut self) -> Result<()> {
        self.command("MUTE", "0").await
    }

    /// Emulate a press of a remote-control key
    pub async fn press(&mut self, key: RemoteKey) -> Result<()> {
        self.command("RCKY", key.code().to_string()).await
    }

    async fn command(&mut self, code: &'static str, arg: impl Into<String>) -> Result<()> {
        self.conn.command(&Command::new(code, arg)).await?;
        Ok(())
    }
}

/// The four identity queries the protocol defines, in the order the
/// original firmware documentation lists them.
async fn fetch_info(conn: &mut Connection) -> Result<DeviceInfo> {
    let name = conn.command(&Command::new("TVNM", "1")).await?;
    let model_name = conn.command(&Command::new("MNRD", "1")).await?;
    let software_version = conn.command(&Command::new("SWVN", "1")).await?;
    let ip_protocol_version = conn.command(&Command::new("IPPV", "1")).await?;

    Ok(DeviceInfo {
        name,
        model_name,
        software_version,
        ip_protocol_version,
    })
}
