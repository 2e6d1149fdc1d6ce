use std::time::Duration;

use button_web::board::{Board, OutputState, SimulatedBoard};
use button_web::http::handler::RequestHandler;
use button_web::server::listener::{bind_with_retry, serve};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

#[tokio::test]
async fn test_serves_status_page_over_tcp() {
    let listener = bind_with_retry("127.0.0.1:0", 1, Duration::from_millis(10))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    let hw = SimulatedBoard::default();
    let handler = RequestHandler::new(Board::new(hw.clone()).into_shared());
    let server = tokio::spawn(serve(listener, handler.clone()));

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(b"GET /on HTTP/1.1\r\nHost: board\r\n\r\n").await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.contains("Estado LED: Ligado"));
    assert!(hw.indicator());
    assert_eq!(handler.board().lock().await.output(), OutputState::On);

    server.abort();
}

#[tokio::test]
async fn test_bind_gives_up_after_attempts() {
    let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = taken.local_addr().unwrap().to_string();

    let result = bind_with_retry(&addr, 2, Duration::from_millis(10)).await;

    let err = result.unwrap_err();
    assert!(format!("{:#}", err).contains("after 2 attempts"));
}
