//! Rendering of the diagnostic line written for every received event.
//!
//! The JSON text uses the layout of Python's `json.dumps(obj, indent=2)`:
//! two spaces per nesting level, `": "` between keys and values, and every
//! non-ASCII character escaped as `\uXXXX`. Numbers are written exactly as
//! they were received rather than re-formatted.

use crate::{Result, LOG_PREFIX};
use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter, Serializer};
use std::io;

const INDENT: &[u8] = b"  ";

/// Renders `event` as the complete diagnostic line, prefix and trailing
/// newline included.
///
/// Nothing is produced unless the whole event serializes.
pub fn log_line<T: Serialize + ?Sized>(event: &T) -> Result<Vec<u8>> {
    let mut line = Vec::with_capacity(128);
    line.extend_from_slice(LOG_PREFIX.as_bytes());
    write_pretty(&mut line, event)?;
    line.push(b'\n');
    Ok(line)
}

fn write_pretty<W, T>(writer: W, event: &T) -> Result<()>
where
    W: io::Write,
    T: Serialize + ?Sized,
{
    let mut ser = Serializer::with_formatter(writer, AsciiPrettyFormatter::new());
    event.serialize(&mut ser)?;
    Ok(())
}

/// A [`PrettyFormatter`] that additionally escapes non-ASCII characters.
struct AsciiPrettyFormatter<'a> {
    pretty: PrettyFormatter<'a>,
}

impl<'a> AsciiPrettyFormatter<'a> {
    fn new() -> Self {
        Self {
            pretty: PrettyFormatter::with_indent(INDENT),
        }
    }
}

impl Formatter for AsciiPrettyFormatter<'_> {
    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_object_value(writer)
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            if start < i {
                writer.write_all(fragment[start..i].as_bytes())?;
            }
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}
