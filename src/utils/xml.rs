//! XML writing utilities.
//!
//! Thin helpers over `quick_xml::Writer` used by the SVG and page writers.

use anyhow::{Context, Result};
use quick_xml::{
    Writer,
    events::{BytesEnd, BytesStart, BytesText, Event},
};
use std::io::Cursor;

pub type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// Create a writer, pretty-printed with two spaces unless `compact`.
pub fn create_xml_writer(compact: bool) -> XmlWriter {
    let buffer = Cursor::new(Vec::new());
    if compact {
        Writer::new(buffer)
    } else {
        Writer::new_with_indent(buffer, b' ', 2)
    }
}

/// Finish a writer and return its content as UTF-8.
pub fn into_string(writer: XmlWriter) -> Result<String> {
    String::from_utf8(writer.into_inner().into_inner()).context("XML output is not valid UTF-8")
}

/// Create a configured XML reader from content bytes
#[cfg(test)]
pub fn create_xml_reader(content: &[u8]) -> quick_xml::Reader<&[u8]> {
    let mut reader = quick_xml::Reader::from_reader(content);
    reader.config_mut().trim_text(false);
    reader
}

/// Build a start tag with attributes.
pub fn elem<'a>(tag: &'a str, attrs: &[(&str, &str)]) -> BytesStart<'a> {
    let mut elem = BytesStart::new(tag);
    for (k, v) in attrs {
        elem.push_attribute((*k, *v));
    }
    elem
}

/// Write an empty element with attributes: `<tag attr1="val1" ... />`.
#[inline]
pub fn write_empty_elem(writer: &mut XmlWriter, tag: &str, attrs: &[(&str, &str)]) -> Result<()> {
    writer.write_event(Event::Empty(elem(tag, attrs)))?;
    Ok(())
}

/// Write a start tag with attributes; close it with [`write_end`].
#[inline]
pub fn write_start(writer: &mut XmlWriter, tag: &str, attrs: &[(&str, &str)]) -> Result<()> {
    writer.write_event(Event::Start(elem(tag, attrs)))?;
    Ok(())
}

#[inline]
pub fn write_end(writer: &mut XmlWriter, tag: &str) -> Result<()> {
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Write a text element: `<tag attrs...>text</tag>`. Text is escaped.
#[inline]
pub fn write_text_element(
    writer: &mut XmlWriter,
    tag: &str,
    attrs: &[(&str, &str)],
    text: &str,
) -> Result<()> {
    writer.write_event(Event::Start(elem(tag, attrs)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Format a coordinate with at most two decimals and no trailing zeros.
pub fn fmt_num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_owned();
    }
    let formatted = format!("{value:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_owned(),
        other => other.to_owned(),
    }
}
