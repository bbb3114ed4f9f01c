use crate::codec::LineCodec;
use crate::error::{AquosError, Result};
use crate::protocol::Command;
use futures_util::StreamExt;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufWriter, ReadHalf, WriteHalf};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::codec::FramedRead;

/// Byte stream the session engine runs over.
///
/// `TcpStream` in production; anything read/write works, which is how the
/// tests substitute an in-memory pipe for a real television.
pub trait Transport: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T: AsyncRead + AsyncWrite + Unpin + Send> Transport for T {}

/// Low-level session engine: owns the write side of the stream and a
/// background reader task that frames incoming lines.
///
/// The protocol has no request IDs, so a response is correlated with a
/// command purely by arrival order. Every method takes `&mut self`, which
/// makes "at most one outstanding command" a compile-time guarantee rather
/// than a calling convention.
pub(crate) struct Connection {
    /// `None` once the connection has been closed.
    writer: Option<BufWriter<WriteHalf<Box<dyn Transport>>>>,
    lines: mpsc::Receiver<Result<String>>,
    reader: JoinHandle<()>,
}

impl Connection {
    /// Open a TCP connection to the device.
    pub(crate) async fn connect(host: &str, port: u16, deadline: Duration) -> Result<Self> {
        let addr = format!("{host}:{port}");
        tracing::info!("connecting to {addr}");

        let stream = timeout(deadline, TcpStream::connect(&addr))
            .await
            .map_err(|_| AquosError::ConnectTimeout)??;

        Ok(Self::open(Box::new(stream)))
    }

    /// Start a session over an already-established stream.
    pub(crate) fn open(stream: Box<dyn Transport>) -> Self {
        let (read, write) = tokio::io::split(stream);

        // Capacity 1: the reader parks until the previous response has been
        // consumed, so at most one unread record is ever in flight.
        let (tx, rx) = mpsc::channel(1);
        let reader = tokio::spawn(read_loop(read, tx));

        Self {
            writer: Some(BufWriter::new(write)),
            lines: rx,
            reader,
        }
    }

    /// Send a command and wait for its single response line.
    pub(crate) async fn command(&mut self, cmd: &Command) -> Result<String> {
        self.send_line(&cmd.encode()).await?;

        let text = self.recv().await?;
        if text == "ERR" {
            return Err(AquosError::CommandRejected);
        }
        Ok(text)
    }

    /// Write one line followed by the CR terminator, as a single flush.
    pub(crate) async fn send_line(&mut self, line: &str) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or(AquosError::ConnectionClosed)?;

        tracing::debug!(line, "sending");
        writer.write_all(line.as_bytes()).await?;
        writer.write_u8(b'\r').await?;
        writer.flush().await?;
        Ok(())
    }

    /// Wait for the next response line.
    pub(crate) async fn recv(&mut self) -> Result<String> {
        match self.lines.recv().await {
            Some(record) => record,
            None => Err(AquosError::ConnectionClosed),
        }
    }

    /// Wait for the next response line, giving up after `wait`.
    ///
    /// Returns `Ok(None)` when the timeout wins the race.
    pub(crate) async fn recv_timeout(&mut self, wait: Duration) -> Result<Option<String>> {
        match timeout(wait, self.lines.recv()).await {
            Ok(Some(record)) => record.map(Some),
            Ok(None) => Err(AquosError::ConnectionClosed),
            Err(_) => Ok(None),
        }
    }

    /// Shut down the stream. Safe to call more than once.
    pub(crate) async fn close(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            // Shutdown failure leaves the stream unusable either way.
            let _ = writer.shutdown().await;
            self.reader.abort();
        }
        Ok(())
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

/// Reader task: frames lines off the stream and publishes them until the
/// stream ends. Exactly one terminal record is published, after which the
/// channel closes.
async fn read_loop(read: ReadHalf<Box<dyn Transport>>, tx: mpsc::Sender<Result<String>>) {
    let mut frames = FramedRead::new(read, LineCodec);

    loop {
        let record = match frames.next().await {
            Some(Ok(line)) => {
                tracing::debug!(line = %line, "received");
                Ok(line)
            }
            Some(Err(e)) => {
                tracing::debug!("read failed: {e}");
                Err(AquosError::Io(e))
            }
            None => {
                tracing::debug!("stream closed by device");
                Err(AquosError::ConnectionClosed)
            }
        };

        let terminal = record.is_err();
        if tx.send(record).await.is_err() || terminal {
            return;
        }
    }
}
