use std::io;
use hdrorder::{HEADER_ORDER_KEY, HeaderMap};
use tokio::io::AsyncWriteExt;

#[tokio::main]
async fn main() -> io::Result<()> {
    env_logger::init();

    let mut headers = HeaderMap::new();
    headers.set("Host", "example.com");
    headers.set("User-Agent", "Mozilla/5.0 (X11; Linux x86_64; rv:131.0) Gecko/20100101 Firefox/131.0");
    headers.set("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8");
    headers.set("Accept-Language", "en-US,en;q=0.5");
    headers.set("Accept-Encoding", "gzip, deflate, br, zstd");
    headers.add("Cookie", "session=1");
    headers.add("Cookie", "theme=dark");
    headers.set("Connection", "keep-alive");
    headers.set("X-Internal-Trace", "d41d8cd9");

    // reference client order, "te" is not present and skipped
    for name in [
        "host",
        "user-agent",
        "accept",
        "accept-language",
        "accept-encoding",
        "connection",
        "cookie",
        "te",
    ] {
        headers.add(HEADER_ORDER_KEY, name);
    }

    let mut stdout = tokio::io::stdout();

    stdout.write_all(b"GET / HTTP/1.1\r\n").await?;
    headers.write_subset_async(&mut stdout, &["X-Internal-Trace"]).await?;
    stdout.write_all(b"\r\n").await?;

    // without the hint, headers are sorted
    headers.take_header_order();
    stdout.write_all(b"GET / HTTP/1.1\r\n").await?;
    headers.write_subset_async(&mut stdout, &["X-Internal-Trace"]).await?;
    stdout.write_all(b"\r\n").await?;

    stdout.flush().await
}
