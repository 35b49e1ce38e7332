#![cfg(test)]
use knock_common::config::DEFAULT_GREETING;
use knock_common::error::KnockError;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;

use crate::util::{loopback_config, spawn_server};

/// The server closes first, so its side of the finished connection lingers in TIME_WAIT.
/// Rebinding the same port right away only works with address reuse enabled.
#[tokio::test]
async fn immediate_restart_rebinds_same_port() {
    let first = spawn_server(loopback_config(0)).await.unwrap();
    let port = first.addr.port();

    let mut stream = TcpStream::connect(first.addr).await.unwrap();
    let mut received = String::new();
    stream.read_to_string(&mut received).await.unwrap();
    assert_eq!(received, DEFAULT_GREETING);
    drop(stream);

    first.shutdown().await;

    let second = spawn_server(loopback_config(port))
        .await
        .expect("restarted server should rebind the same port");
    assert_eq!(second.addr.port(), port);

    let mut stream = TcpStream::connect(second.addr).await.unwrap();
    let mut received = String::new();
    stream.read_to_string(&mut received).await.unwrap();
    assert_eq!(received, DEFAULT_GREETING);

    second.shutdown().await;
}

#[tokio::test]
async fn port_held_by_a_live_server_is_a_bind_error() {
    let first = spawn_server(loopback_config(0)).await.unwrap();

    let err = spawn_server(loopback_config(first.addr.port()))
        .await
        .err()
        .expect("second server on a live port must fail");
    let err = err.downcast::<KnockError>().unwrap();
    assert!(matches!(err, KnockError::Bind { .. }));

    first.shutdown().await;
}
