//! End-to-end session tests against a scripted fake television.
//!
//! The fake device lives on the far end of an in-memory duplex pipe and
//! the tests run on tokio's paused clock, so the login timeout races
//! resolve deterministically without real sleeps.

use aquos_remote::{AquosClient, AquosError, ClientConfig, RemoteKey};
use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream};

/// Read one full command off the wire: 4-character code, argument padded
/// to 4, and the CR terminator.
async fn read_command(far: &mut DuplexStream) -> String {
    let mut buf = [0u8; 9];
    far.read_exact(&mut buf).await.unwrap();
    assert_eq!(buf[8], b'\r', "command not CR-terminated");
    String::from_utf8(buf[..8].to_vec()).unwrap()
}

async fn answer(far: &mut DuplexStream, expect: &str, reply: &str) {
    assert_eq!(read_command(far).await, expect);
    far.write_all(reply.as_bytes()).await.unwrap();
    far.write_all(b"\r").await.unwrap();
}

/// Serve the four identity queries, asserting they arrive in protocol
/// order, one at a time.
async fn serve_identity(far: &mut DuplexStream) {
    answer(far, "TVNM1   ", "LivingRoom").await;
    answer(far, "MNRD1   ", "LC-60LE650U").await;
    answer(far, "SWVN1   ", "1.00").await;
    answer(far, "IPPV1   ", "1").await;
}

fn credentials() -> ClientConfig {
    ClientConfig {
        username: Some("user1".into()),
        password: Some("pass1".into()),
        ..ClientConfig::default()
    }
}

#[tokio::test(start_paused = true)]
async fn connect_without_login_fetches_identity_in_order() {
    let (near, mut far) = tokio::io::duplex(256);

    let device = tokio::spawn(async move {
        // No banner: the client's login timeout elapses first.
        serve_identity(&mut far).await;
        far
    });

    let tv = AquosClient::from_stream(near, ClientConfig::default())
        .await
        .unwrap();

    assert_eq!(tv.name(), "LivingRoom");
    assert_eq!(tv.model_name(), "LC-60LE650U");
    assert_eq!(tv.software_version(), "1.00");
    assert_eq!(tv.ip_protocol_version(), "1");
    device.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn connect_with_login_exchanges_credentials_first() {
    let (near, mut far) = tokio::io::duplex(256);

    let device = tokio::spawn(async move {
        far.write_all(b"Login:").await.unwrap();
        let mut user = [0u8; 6];
        far.read_exact(&mut user).await.unwrap();
        assert_eq!(&user, b"user1\r");

        far.write_all(b"Password:").await.unwrap();
        let mut pass = [0u8; 6];
        far.read_exact(&mut pass).await.unwrap();
        assert_eq!(&pass, b"pass1\r");

        // Silence past the timeout means the login was accepted; the
        // next thing on the wire is the first identity query.
        serve_identity(&mut far).await;
        far
    });

    let tv = AquosClient::from_stream(near, credentials()).await.unwrap();
    assert_eq!(tv.name(), "LivingRoom");
    device.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn commands_round_trip_after_connect() {
    let (near, mut far) = tokio::io::duplex(256);

    let device = tokio::spawn(async move {
        serve_identity(&mut far).await;
        answer(&mut far, "POWR1   ", "OK").await;
        answer(&mut far, "VOLM30  ", "OK").await;
        answer(&mut far, "VOLM?   ", "30").await;
        answer(&mut far, "IAVD2   ", "OK").await;
        answer(&mut far, "CHUP-   ", "OK").await;
        answer(&mut far, "MUTE0   ", "OK").await;
        answer(&mut far, "RCKY4   ", "OK").await;
        far
    });

    let mut tv = AquosClient::from_stream(near, ClientConfig::default())
        .await
        .unwrap();

    tv.power(true).await.unwrap();
    tv.set_volume(30).await.unwrap();
    assert_eq!(tv.volume().await.unwrap(), 30);
    tv.set_input(2).await.unwrap();
    tv.channel_up().await.unwrap();
    tv.toggle_mute().await.unwrap();
    tv.press(RemoteKey::Play).await.unwrap();
    device.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn device_rejection_does_not_kill_the_session() {
    let (near, mut far) = tokio::io::duplex(256);

    let device = tokio::spawn(async move {
        serve_identity(&mut far).await;
        answer(&mut far, "IAVD9   ", "ERR").await;
        answer(&mut far, "VOLM?   ", "12").await;
        far
    });

    let mut tv = AquosClient::from_stream(near, ClientConfig::default())
        .await
        .unwrap();

    let err = tv.set_input(9).await.unwrap_err();
    assert!(matches!(err, AquosError::CommandRejected));

    // The session stays usable after a per-command rejection.
    assert_eq!(tv.volume().await.unwrap(), 12);
    device.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn non_numeric_volume_response_is_a_parse_error() {
    let (near, mut far) = tokio::io::duplex(256);

    let device = tokio::spawn(async move {
        serve_identity(&mut far).await;
        answer(&mut far, "VOLM?   ", "loud").await;
        far
    });

    let mut tv = AquosClient::from_stream(near, ClientConfig::default())
        .await
        .unwrap();

    let err = tv.volume().await.unwrap_err();
    assert!(matches!(err, AquosError::InvalidNumber(text) if text == "loud"));
    device.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn err_during_identity_fetch_aborts_connect() {
    let (near, mut far) = tokio::io::duplex(256);

    let device = tokio::spawn(async move {
        answer(&mut far, "TVNM1   ", "ERR").await;
        far
    });

    let err = AquosClient::from_stream(near, ClientConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AquosError::CommandRejected));
    device.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn stream_closed_mid_session_surfaces_on_every_later_call() {
    let (near, mut far) = tokio::io::duplex(256);

    let device = tokio::spawn(async move {
        serve_identity(&mut far).await;
        // Hang up our write side; the read side stays open so the
        // client's writes still go through and it fails on the reply.
        far.shutdown().await.unwrap();
        far
    });

    let mut tv = AquosClient::from_stream(near, ClientConfig::default())
        .await
        .unwrap();
    let _far = device.await.unwrap();

    let err = tv.volume().await.unwrap_err();
    assert!(matches!(err, AquosError::ConnectionClosed));

    let err = tv.channel_up().await.unwrap_err();
    assert!(matches!(err, AquosError::ConnectionClosed));
}

#[tokio::test(start_paused = true)]
async fn close_twice_is_a_no_op() {
    let (near, mut far) = tokio::io::duplex(256);

    let device = tokio::spawn(async move {
        serve_identity(&mut far).await;
        far
    });

    let mut tv = AquosClient::from_stream(near, ClientConfig::default())
        .await
        .unwrap();
    device.await.unwrap();

    tv.close().await.unwrap();
    tv.close().await.unwrap();
}
