//! TCP transport for WHOIS queries.
//!
//! WHOIS (RFC 3912) has no framing: the client writes one CRLF-terminated
//! line and the server streams free text until it closes the connection.
//! End-of-data is signaled only by connection close.

use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::error::TransportError;

/// Read buffer chunk size. WHOIS responses are small; 4 KiB chunks are plenty.
const READ_CHUNK_SIZE: usize = 4096;

/// Send `query_text` to a WHOIS server and collect the full response.
///
/// Opens a TCP connection to `server:port`, writes the query followed by
/// CRLF, then reads until the peer closes. The `timeout` budget covers the
/// whole operation (connect, send, and receive), not just the connect.
///
/// The accumulated bytes are decoded as UTF-8 with invalid sequences
/// replaced - WHOIS guarantees no particular encoding and malformed output
/// must never be a hard failure. The socket is dropped (closed) on every
/// path, success or error.
pub async fn query(
    server: &str,
    port: u16,
    query_text: &str,
    timeout: Duration,
) -> Result<String, TransportError> {
    let deadline = tokio::time::timeout(timeout, query_inner(server, port, query_text));

    match deadline.await {
        Ok(result) => result,
        Err(_) => Err(TransportError::Timeout {
            server: server.to_string(),
            secs: timeout.as_secs_f64(),
        }),
    }
}

async fn query_inner(
    server: &str,
    port: u16,
    query_text: &str,
) -> Result<String, TransportError> {
    let mut stream = TcpStream::connect((server, port))
        .await
        .map_err(|source| TransportError::Connect {
            server: server.to_string(),
            source,
        })?;

    let io_err = |source| TransportError::Io {
        server: server.to_string(),
        source,
    };

    stream
        .write_all(format!("{}\r\n", query_text).as_bytes())
        .await
        .map_err(io_err)?;

    let mut response = Vec::new();
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    loop {
        match stream.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => response.extend_from_slice(&chunk[..n]),
            Err(source) => return Err(io_err(source)),
        }
    }

    Ok(String::from_utf8_lossy(&response).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    /// Spawn a one-shot WHOIS server that records the received query line
    /// and replies with `body` before closing the connection.
    async fn mock_server(body: &'static [u8]) -> (String, u16) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 256];
            let _ = socket.read(&mut buf).await.unwrap();
            socket.write_all(body).await.unwrap();
        });

        (addr.ip().to_string(), addr.port())
    }

    #[tokio::test]
    async fn query_returns_full_response() {
        let (host, port) = mock_server(b"Domain Name: EXAMPLE.COM\r\n").await;

        let resp = query(&host, port, "example.com", Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(resp, "Domain Name: EXAMPLE.COM\r\n");
    }

    #[tokio::test]
    async fn query_sends_crlf_terminated_line() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 256];
            let n = socket.read(&mut buf).await.unwrap();
            buf[..n].to_vec()
        });

        query(
            &addr.ip().to_string(),
            addr.port(),
            "example.com",
            Duration::from_secs(5),
        )
        .await
        .unwrap();

        assert_eq!(server.await.unwrap(), b"example.com\r\n");
    }

    #[tokio::test]
    async fn query_replaces_invalid_utf8() {
        let (host, port) = mock_server(b"ok \xff\xfe bytes\n").await;

        let resp = query(&host, port, "example.com", Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(resp, "ok \u{fffd}\u{fffd} bytes\n");
    }

    #[tokio::test]
    async fn query_times_out_on_silent_server() {
        // Server that accepts but never responds or closes.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            std::future::pending::<()>().await;
        });

        let err = query(
            &addr.ip().to_string(),
            addr.port(),
            "example.com",
            Duration::from_millis(100),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, TransportError::Timeout { .. }));
    }

    #[tokio::test]
    async fn query_reports_connect_failure() {
        // Bind then drop to get a port with nothing listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = query(
            &addr.ip().to_string(),
            addr.port(),
            "example.com",
            Duration::from_secs(5),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, TransportError::Connect { .. }));
    }
}
