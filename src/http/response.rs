//! Status page renderer.
//!
//! The whole response (status line, headers and document) is formatted into
//! a fixed-capacity buffer. Formatting past the capacity fails with
//! [`RenderError::Overflow`] instead of truncating or growing.

use std::fmt::{self, Write};

use heapless::String;

use crate::board::{HardwareSnapshot, OutputState};

/// Upper bound on the size of a rendered response, in bytes.
pub const RESPONSE_CAPACITY: usize = 1024;

/// Delay before the page reloads itself.
pub const RELOAD_INTERVAL_MS: u32 = 1000;

const STATUS_LINE: &str = "HTTP/1.1 200 OK";
const CONTENT_TYPE: &str = "text/html";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("rendered response exceeds {capacity} bytes")]
    Overflow { capacity: usize },
}

impl From<fmt::Error> for RenderError {
    fn from(_: fmt::Error) -> Self {
        RenderError::Overflow {
            capacity: RESPONSE_CAPACITY,
        }
    }
}

/// A complete HTTP response, ready to be written to the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResponse {
    buf: String<RESPONSE_CAPACITY>,
}

impl RenderedResponse {
    pub fn as_str(&self) -> &str {
        self.buf.as_str()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.buf.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The HTML document, without status line and headers.
    pub fn body(&self) -> &str {
        match self.buf.split_once("\r\n\r\n") {
            Some((_, body)) => body,
            None => "",
        }
    }
}

/// Renders the status page.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    connection_close: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Renderer {
    /// `connection_close` adds a `Connection: close` header, for servers
    /// that close the connection after each response.
    pub fn new(connection_close: bool) -> Self {
        Self { connection_close }
    }

    pub fn render(
        &self,
        snapshot: &HardwareSnapshot,
        output: OutputState,
    ) -> Result<RenderedResponse, RenderError> {
        let mut body: String<RESPONSE_CAPACITY> = String::new();
        write_document(&mut body, snapshot, output)?;

        let mut buf: String<RESPONSE_CAPACITY> = String::new();
        write!(
            buf,
            "{STATUS_LINE}\r\nContent-Type: {CONTENT_TYPE}\r\nContent-Length: {}\r\n",
            body.len()
        )?;
        if self.connection_close {
            buf.push_str("Connection: close\r\n")
                .map_err(|_| fmt::Error)?;
        }
        buf.push_str("\r\n").map_err(|_| fmt::Error)?;
        buf.push_str(&body).map_err(|_| fmt::Error)?;

        Ok(RenderedResponse { buf })
    }
}

/// Renders with the default renderer.
pub fn render(snapshot: &HardwareSnapshot, output: OutputState) -> Result<RenderedResponse, RenderError> {
    Renderer::default().render(snapshot, output)
}

fn write_document(out: &mut impl Write, snapshot: &HardwareSnapshot, output: OutputState) -> fmt::Result {
    write!(
        out,
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang='pt-br'>\n",
            "<head>\n",
            "<script> setTimeout(() => location.reload(), {reload}); </script>\n",
            "<meta charset='UTF-8'>\n",
            "<meta name='viewport' content='width=device-width, initial-scale=1.0'>\n",
            "<title> Atividade 1 </title>\n",
            "</head>\n",
            "<body style='text-align: center'>\n",
            "<h1> Leitura dos status dos botões da placa Bitdoglab </h1>\n",
            "<p class=\"estado_botao_a\">Estado botão A: {a}</p>\n",
            "<p class=\"estado_botao_b\">Estado botão B: {b}</p>\n",
            "<p class=\"estado_led\">Estado LED: {led}</p>\n",
            "<h1> Leitura da temperatura da placa Bitdoglab </h1>\n",
            "<p class=\"temperature\">Temperatura interna: {temp:.2} °C</p>\n",
            "</body>\n",
            "</html>\n",
        ),
        reload = RELOAD_INTERVAL_MS,
        a = snapshot.button_a.label(),
        b = snapshot.button_b.label(),
        led = output.label(),
        temp = snapshot.temperature_c,
    )
}
