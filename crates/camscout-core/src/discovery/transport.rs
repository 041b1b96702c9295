//! Multicast transport for the probe/match exchange.
//!
//! Uses socket2 for the multicast socket options tokio does not expose,
//! then hands the socket to tokio for the async send and the bounded
//! collection loop.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::{Duration, Instant};

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::UdpSocket;
use tokio::time::timeout;

use crate::error::{DiscoveryError, Result};

/// WS-Discovery multicast group.
pub const MULTICAST_GROUP: Ipv4Addr = Ipv4Addr::new(239, 255, 255, 250);

/// WS-Discovery UDP port.
pub const DISCOVERY_PORT: u16 = 3702;

/// Probes should not leave the local segment.
const MULTICAST_TTL: u32 = 2;

/// How long to collect replies after the probe is sent.
const COLLECT_WINDOW: Duration = Duration::from_secs(1);

/// Reply datagrams larger than this are truncated.
const BUF_SIZE: usize = 8192;

/// Send `payload` to the WS-Discovery group on `interface` and collect the
/// unicast replies arriving within the collection window, in arrival order.
///
/// Any setup or send failure aborts the call. Once collection has started,
/// the window running out is the normal termination condition and a bad
/// datagram ends collection without discarding replies already gathered.
/// The socket and its group membership only live for this call.
pub async fn send_probe(interface: Ipv4Addr, payload: &[u8]) -> Result<Vec<String>> {
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))
        .map_err(DiscoveryError::socket("open socket"))?;
    socket
        .set_nonblocking(true)
        .map_err(DiscoveryError::socket("set socket nonblocking"))?;

    let bind_addr: SocketAddr = (Ipv4Addr::UNSPECIFIED, 0).into();
    socket
        .bind(&bind_addr.into())
        .map_err(DiscoveryError::socket("bind socket"))?;

    socket
        .join_multicast_v4(&MULTICAST_GROUP, &interface)
        .map_err(DiscoveryError::socket("join multicast group"))?;

    // Pin outgoing multicast to the requested interface so replies come
    // back on it instead of whatever the routing table prefers.
    socket
        .set_multicast_if_v4(&interface)
        .map_err(DiscoveryError::socket("set multicast interface"))?;
    socket
        .set_multicast_ttl_v4(MULTICAST_TTL)
        .map_err(DiscoveryError::socket("set multicast TTL"))?;

    let socket = UdpSocket::from_std(socket.into())
        .map_err(DiscoveryError::socket("register socket with runtime"))?;

    let group: SocketAddr = (MULTICAST_GROUP, DISCOVERY_PORT).into();
    socket
        .send_to(payload, group)
        .await
        .map_err(DiscoveryError::socket("send probe"))?;

    Ok(collect_replies(&socket).await)
}

/// Read datagrams until the window elapses. Best-effort: receive errors end
/// collection instead of propagating, so gathered replies survive.
async fn collect_replies(socket: &UdpSocket) -> Vec<String> {
    let mut replies = Vec::new();
    let mut buf = vec![0u8; BUF_SIZE];
    let deadline = Instant::now() + COLLECT_WINDOW;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }

        match timeout(remaining, socket.recv_from(&mut buf)).await {
            Ok(Ok((len, from))) => {
                log::trace!("received {} byte reply from {}", len, from);
                replies.push(String::from_utf8_lossy(&buf[..len]).into_owned());
            }
            Ok(Err(e)) => {
                log::debug!("receive error ended collection: {}", e);
                break;
            }
            Err(_) => break, // window elapsed
        }
    }

    replies
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replies_arrive_within_window() {
        // Loopback responder standing in for a camera: a plain socket bound
        // to an ephemeral port, probed directly instead of via the group.
        let responder = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let responder_addr = responder.local_addr().unwrap();

        let prober = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let prober_addr = prober.local_addr().unwrap();
        prober.send_to(b"probe", responder_addr).await.unwrap();

        let mut buf = [0u8; 64];
        let (_, from) = responder.recv_from(&mut buf).await.unwrap();
        assert_eq!(from, prober_addr);
        responder.send_to(b"<reply/>", from).await.unwrap();

        let replies = collect_replies(&prober).await;
        assert_eq!(replies, vec!["<reply/>".to_string()]);
    }

    #[tokio::test]
    async fn test_no_responders_yields_empty_within_window() {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();

        let start = Instant::now();
        let replies = collect_replies(&socket).await;
        let elapsed = start.elapsed();

        assert!(replies.is_empty());
        assert!(elapsed >= COLLECT_WINDOW);
        assert!(elapsed < COLLECT_WINDOW + Duration::from_millis(500));
    }

    #[tokio::test]
    #[ignore = "needs a multicast-capable interface"]
    async fn test_send_probe_on_loopback() {
        let replies = send_probe(Ipv4Addr::LOCALHOST, b"<probe/>").await.unwrap();
        assert!(replies.is_empty());
    }
}
