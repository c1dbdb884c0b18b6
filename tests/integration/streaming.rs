//! Slow response bodies over a real socket.
//!
//! The attempt timeout must bound the gaps between chunks, never the whole download.

use crate::mock_server::init_tracing;
use deepl_client::{DocumentHandle, ErrorKind, Translator};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Read one request: head plus `content-length` bytes of body.
async fn read_request(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
            let length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                return;
            }
        }
    }
}

/// Serve a single request with a chunked 200 body; each piece is sent after its delay.
async fn serve_paced(pieces: Vec<(Duration, &'static [u8])>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_request(&mut socket).await;
        let head = "HTTP/1.1 200 OK\r\ncontent-type: application/octet-stream\r\n\
                    transfer-encoding: chunked\r\n\r\n";
        if socket.write_all(head.as_bytes()).await.is_err() {
            return;
        }
        for (delay, piece) in pieces {
            tokio::time::sleep(delay).await;
            let mut frame = format!("{:x}\r\n", piece.len()).into_bytes();
            frame.extend_from_slice(piece);
            frame.extend_from_slice(b"\r\n");
            if socket.write_all(&frame).await.is_err() {
                return;
            }
        }
        let _ = socket.write_all(b"0\r\n\r\n").await;
        let _ = socket.flush().await;
    });
    url
}

fn translator(url: &str) -> Translator {
    Translator::builder()
        .auth_key("key")
        .server_url(url)
        .max_retries(0)
        .min_timeout(Duration::from_secs(1))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_slow_download_longer_than_timeout_completes() {
    init_tracing();
    let pieces = vec![(Duration::from_millis(500), &b"abcde"[..]); 6];
    let url = serve_paced(pieces).await;

    let mut sink = Vec::new();
    let written = translator(&url)
        .download_document(&DocumentHandle::new("DOC1", "KEY1"), &mut sink)
        .await
        .unwrap();

    assert_eq!(written, 30);
    assert_eq!(sink.len(), 30);
}

#[tokio::test]
async fn test_stalled_download_fails_with_partial_sink() {
    init_tracing();
    let pieces = vec![
        (Duration::from_millis(100), &b"abcde"[..]),
        (Duration::from_millis(100), &b"abcde"[..]),
        (Duration::from_secs(3), &b"abcde"[..]),
    ];
    let url = serve_paced(pieces).await;

    let mut sink = Vec::new();
    let err = translator(&url)
        .download_document(&DocumentHandle::new("DOC1", "KEY1"), &mut sink)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Connection);
    assert!(!err.is_retryable());
    assert_eq!(sink, b"abcdeabcde");
}
