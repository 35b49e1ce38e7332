#![cfg(test)]
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use knock_common::config::{ClientConfig, DEFAULT_BACKLOG, DEFAULT_GREETING, ServerConfig};
use knock_common::network::candidate::FamilyHint;
use knock_common::network::target::Target;
use knock_core::client::{self, Reply};
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;

use crate::util::{loopback_config, spawn_server, wait_until};

const CLIENT_DEADLINE: Duration = Duration::from_secs(10);

fn client_config(target: Target, port: u16) -> ClientConfig {
    ClientConfig {
        target,
        port,
        ..ClientConfig::default()
    }
}

/// A client pointed at "localhost" reaches a server bound on the IPv4 loopback, whatever
/// order the resolver lists the loopback addresses in.
#[tokio::test]
async fn localhost_client_receives_greeting() {
    let server = spawn_server(loopback_config(0)).await.unwrap();

    let target = Target::Name {
        hostname: "localhost".to_string(),
    };
    let reply: Reply = client::fetch_greeting(&client_config(target, server.addr.port()))
        .await
        .unwrap();

    assert_eq!(reply.message, DEFAULT_GREETING);
    assert_eq!(reply.peer.ip(), IpAddr::V4(Ipv4Addr::LOCALHOST));

    server.shutdown().await;
}

/// Without a name the client walks the loopback candidates and still finds the server.
#[tokio::test]
async fn this_host_client_receives_greeting() {
    let server = spawn_server(loopback_config(0)).await.unwrap();

    let reply = client::fetch_greeting(&client_config(Target::ThisHost, server.addr.port()))
        .await
        .unwrap();
    assert_eq!(reply.message, DEFAULT_GREETING);

    server.shutdown().await;
}

#[tokio::test]
async fn wildcard_server_answers_on_loopback() {
    let cfg = ServerConfig {
        port: 0,
        family: FamilyHint::Ipv4,
        ..ServerConfig::default()
    };
    let server = spawn_server(cfg).await.unwrap();
    assert!(server.addr.ip().is_unspecified());

    let target = Target::Address {
        addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
    };
    let reply = client::fetch_greeting(&client_config(target, server.addr.port()))
        .await
        .unwrap();
    assert_eq!(reply.message, DEFAULT_GREETING);

    server.shutdown().await;
}

#[tokio::test]
async fn ipv6_loopback_exchange() {
    let cfg = ServerConfig {
        bind: Target::Address {
            addr: IpAddr::V6(Ipv6Addr::LOCALHOST),
        },
        port: 0,
        ..ServerConfig::default()
    };
    // Hosts without IPv6 loopback cannot run this scenario.
    let Ok(server) = spawn_server(cfg).await else {
        eprintln!("Skipping IPv6 test: ::1 is not bindable here.");
        return;
    };

    let target = Target::Address {
        addr: IpAddr::V6(Ipv6Addr::LOCALHOST),
    };
    let reply = client::fetch_greeting(&client_config(target, server.addr.port()))
        .await
        .unwrap();
    assert_eq!(reply.message, DEFAULT_GREETING);
    assert_eq!(reply.peer.to_string(), "IPv6: ::1");

    server.shutdown().await;
}

/// Connects `clients` streams at once and checks every one of them gets the greeting.
/// Each client has its own deadline so a lost connection fails the test instead of hanging it.
async fn greet_burst(addr: SocketAddr, clients: usize) {
    let mut pending = Vec::with_capacity(clients);
    for _ in 0..clients {
        pending.push(tokio::spawn(async move {
            let mut stream = TcpStream::connect(addr).await?;
            let mut received = String::new();
            stream.read_to_string(&mut received).await?;
            anyhow::Ok(received)
        }));
    }

    for (idx, client) in pending.into_iter().enumerate() {
        let received = tokio::time::timeout(CLIENT_DEADLINE, client)
            .await
            .unwrap_or_else(|_| panic!("client {idx} got no greeting in time"))
            .unwrap()
            .unwrap();
        assert_eq!(received, DEFAULT_GREETING);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_clients_each_get_the_full_greeting() {
    let clients: usize = 8;
    assert!(clients <= DEFAULT_BACKLOG as usize);
    let server = spawn_server(loopback_config(0)).await.unwrap();

    greet_burst(server.addr, clients).await;

    let tally = server.tally.clone();
    assert!(
        wait_until(Duration::from_secs(5), || tally.reclaimed() == clients).await,
        "reaper reclaimed {} of {clients} handlers",
        tally.reclaimed()
    );
    assert_eq!(tally.dispatched(), clients);
    assert_eq!(tally.active(), 0);
    assert_eq!(tally.failed(), 0);

    server.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn deeper_backlog_absorbs_a_larger_burst() {
    let clients: usize = 32;
    let cfg = ServerConfig {
        backlog: 128,
        ..loopback_config(0)
    };
    let server = spawn_server(cfg).await.unwrap();

    greet_burst(server.addr, clients).await;

    let tally = server.tally.clone();
    assert!(
        wait_until(Duration::from_secs(5), || tally.reclaimed() == clients).await,
        "reaper reclaimed {} of {clients} handlers",
        tally.reclaimed()
    );
    assert_eq!(tally.failed(), 0);

    server.shutdown().await;
}

/// A client that vanishes before its greeting is sent must not disturb anyone else.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn aborted_client_does_not_affect_others() {
    let server = spawn_server(loopback_config(0)).await.unwrap();

    let rude = TcpStream::connect(server.addr).await.unwrap();
    drop(rude);

    let target = Target::Address {
        addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
    };
    let reply = client::fetch_greeting(&client_config(target, server.addr.port()))
        .await
        .unwrap();
    assert_eq!(reply.message, DEFAULT_GREETING);

    let tally = server.tally.clone();
    assert!(wait_until(Duration::from_secs(5), || tally.reclaimed() == 2).await);

    server.shutdown().await;
}
