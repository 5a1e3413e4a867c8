//! HTML-safe JSON encoding.
//!
//! # Responsibilities
//! - Encode any `Serialize` value to JSON
//! - Escape `<`, `>` and `&` so the output can be embedded in HTML
//!
//! # Design Decisions
//! - Escaping is a `Formatter` wrapper, so compact and pretty layouts share it
//! - Escapes use `\uXXXX` sequences; the output decodes to the original text

use std::io;

use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};
use thiserror::Error;

use crate::config::JsonConfig;

/// Errors produced while encoding JSON.
#[derive(Debug, Error)]
pub enum JsonError {
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Formatter that escapes HTML-significant characters in every string.
#[derive(Debug, Clone, Default)]
pub struct HtmlSafeFormatter<F> {
    inner: F,
}

impl<F: Formatter> HtmlSafeFormatter<F> {
    pub fn new(inner: F) -> Self {
        Self { inner }
    }
}

fn html_escape(byte: u8) -> Option<&'static str> {
    match byte {
        b'<' => Some(r"\u003c"),
        b'>' => Some(r"\u003e"),
        b'&' => Some(r"\u0026"),
        _ => None,
    }
}

impl<F: Formatter> Formatter for HtmlSafeFormatter<F> {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let bytes = fragment.as_bytes();
        let mut start = 0;
        for (i, &byte) in bytes.iter().enumerate() {
            if let Some(escaped) = html_escape(byte) {
                if start < i {
                    writer.write_all(&bytes[start..i])?;
                }
                writer.write_all(escaped.as_bytes())?;
                start = i + 1;
            }
        }
        if start < bytes.len() {
            writer.write_all(&bytes[start..])?;
        }
        Ok(())
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object_key(writer, first)
    }

    fn end_object_key<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object_key(writer)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object_value(writer)
    }
}

/// JSON encoder carrying the configured escaping default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonEncoder {
    escape_html: bool,
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::from_config(&JsonConfig::default())
    }
}

impl JsonEncoder {
    pub fn from_config(config: &JsonConfig) -> Self {
        Self {
            escape_html: config.escape_html,
        }
    }

    pub fn escapes_html(&self) -> bool {
        self.escape_html
    }

    /// Encode `value` compactly into `writer`.
    pub fn to_writer<W, T>(&self, writer: W, value: &T) -> Result<(), JsonError>
    where
        W: io::Write,
        T: ?Sized + Serialize,
    {
        if self.escape_html {
            let mut ser = serde_json::Serializer::with_formatter(
                writer,
                HtmlSafeFormatter::new(CompactFormatter),
            );
            value.serialize(&mut ser)?;
        } else {
            serde_json::to_writer(writer, value)?;
        }
        Ok(())
    }

    /// Encode `value` with two-space indentation into `writer`.
    pub fn to_writer_pretty<W, T>(&self, writer: W, value: &T) -> Result<(), JsonError>
    where
        W: io::Write,
        T: ?Sized + Serialize,
    {
        if self.escape_html {
            let mut ser = serde_json::Serializer::with_formatter(
                writer,
                HtmlSafeFormatter::new(PrettyFormatter::new()),
            );
            value.serialize(&mut ser)?;
        } else {
            serde_json::to_writer_pretty(writer, value)?;
        }
        Ok(())
    }

    pub fn to_string<T: ?Sized + Serialize>(&self, value: &T) -> Result<String, JsonError> {
        let mut buf = Vec::with_capacity(128);
        self.to_writer(&mut buf, value)?;
        // Formatter output is built from valid UTF-8 fragments and ASCII escapes.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn to_string_pretty<T: ?Sized + Serialize>(&self, value: &T) -> Result<String, JsonError> {
        let mut buf = Vec::with_capacity(128);
        self.to_writer_pretty(&mut buf, value)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
