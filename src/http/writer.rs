use std::io;

use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Writes one response to a stream, then flushes it.
///
/// The writer borrows the rendered bytes only for the duration of
/// [`write_to_stream`](ResponseWriter::write_to_stream); the stream copies
/// what it keeps, so the caller is free to drop the buffer afterwards.
pub struct ResponseWriter<'a> {
    buffer: &'a [u8],
    written: usize,
}

impl<'a> ResponseWriter<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, written: 0 }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "connection closed while writing",
                ));
            }

            self.written += n;
        }

        stream.flush().await
    }
}
