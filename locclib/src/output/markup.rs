//! Structural writer for XML and HTML documents.
//!
//! The writer emits one element per line, indented four spaces per nesting
//! level, and escapes every attribute value and text body at the point of
//! insertion using the rules of its [`Dialect`].

use std::borrow::Cow;
use std::io::{self, Write};

use super::escape::{html_attribute_escape, html_escape, xml_attribute_escape, xml_text_escape};

const INDENT: &str = "    ";

/// Escaping rules used by a [`MarkupWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Xml,
    Html,
}

impl Dialect {
    fn escape_attribute(self, value: &str) -> Cow<'_, str> {
        match self {
            Dialect::Xml => xml_attribute_escape(value),
            Dialect::Html => html_attribute_escape(value),
        }
    }

    fn escape_text(self, text: &str) -> Cow<'_, str> {
        match self {
            Dialect::Xml => xml_text_escape(text),
            Dialect::Html => html_escape(text),
        }
    }
}

/// One element attribute. An attribute without a value is not written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr<'a> {
    pub name: &'a str,
    pub value: Option<Cow<'a, str>>,
}

impl<'a> Attr<'a> {
    pub fn new(name: &'a str, value: impl Into<Cow<'a, str>>) -> Self {
        Self {
            name,
            value: Some(value.into()),
        }
    }

    /// Attribute that is omitted when `value` is `None`.
    pub fn opt(name: &'a str, value: Option<&'a str>) -> Self {
        Self {
            name,
            value: value.map(Cow::Borrowed),
        }
    }

    /// Numeric attribute.
    pub fn num(name: &'a str, value: impl ToString) -> Self {
        Self {
            name,
            value: Some(Cow::Owned(value.to_string())),
        }
    }
}

/// Line oriented XML/HTML writer.
pub struct MarkupWriter<W: Write> {
    out: W,
    dialect: Dialect,
    open: Vec<String>,
}

impl<W: Write> MarkupWriter<W> {
    pub fn new(out: W, dialect: Dialect) -> Self {
        Self {
            out,
            dialect,
            open: Vec::new(),
        }
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    fn indent(&mut self) -> io::Result<()> {
        for _ in 0..self.open.len() {
            self.out.write_all(INDENT.as_bytes())?;
        }
        Ok(())
    }

    fn write_tag_open(&mut self, name: &str, attrs: &[Attr<'_>]) -> io::Result<()> {
        write!(self.out, "<{name}")?;
        for attr in attrs {
            if let Some(value) = &attr.value {
                let escaped = self.dialect.escape_attribute(value);
                write!(self.out, " {}=\"{}\"", attr.name, escaped)?;
            }
        }
        Ok(())
    }

    /// Open an element and nest subsequent output inside it.
    pub fn start(&mut self, name: &str, attrs: &[Attr<'_>]) -> io::Result<()> {
        self.indent()?;
        self.write_tag_open(name, attrs)?;
        writeln!(self.out, ">")?;
        self.open.push(name.to_string());
        Ok(())
    }

    /// Close the innermost open element.
    pub fn end(&mut self) -> io::Result<()> {
        let name = self.open.pop().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "no open element to close")
        })?;
        self.indent()?;
        writeln!(self.out, "</{name}>")
    }

    /// Write a self-closing element.
    pub fn empty(&mut self, name: &str, attrs: &[Attr<'_>]) -> io::Result<()> {
        self.indent()?;
        self.write_tag_open(name, attrs)?;
        writeln!(self.out, "/>")
    }

    /// Write an element whose body is escaped text.
    pub fn text_element(&mut self, name: &str, attrs: &[Attr<'_>], text: &str) -> io::Result<()> {
        let escaped = self.dialect.escape_text(text).into_owned();
        self.raw_element(name, attrs, &escaped)
    }

    /// Write an element whose body is already markup.
    pub fn raw_element(&mut self, name: &str, attrs: &[Attr<'_>], markup: &str) -> io::Result<()> {
        self.indent()?;
        self.write_tag_open(name, attrs)?;
        writeln!(self.out, ">{markup}</{name}>")
    }

    /// Write a line verbatim at the current indentation.
    pub fn raw_line(&mut self, line: &str) -> io::Result<()> {
        self.indent()?;
        writeln!(self.out, "{line}")
    }

    pub fn blank_line(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    /// Escape text with this writer's dialect, for building inline markup.
    pub fn escape_text<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.dialect.escape_text(text)
    }

    /// Escape an attribute value with this writer's dialect.
    pub fn escape_attribute<'t>(&self, value: &'t str) -> Cow<'t, str> {
        self.dialect.escape_attribute(value)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(dialect: Dialect, f: impl FnOnce(&mut MarkupWriter<&mut Vec<u8>>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        let mut writer = MarkupWriter::new(&mut buf, dialect);
        f(&mut writer).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_nested_elements() {
        let out = render(Dialect::Xml, |w| {
            w.start("root", &[Attr::new("a", "1")])?;
            w.start("child", &[])?;
            w.empty("leaf", &[Attr::num("n", 3), Attr::opt("missing", None)])?;
            w.end()?;
            w.end()
        });
        assert_eq!(
            out,
            "<root a=\"1\">\n    <child>\n        <leaf n=\"3\"/>\n    </child>\n</root>\n"
        );
    }

    #[test]
    fn test_xml_attribute_values_escaped() {
        let out = render(Dialect::Xml, |w| {
            w.empty("e", &[Attr::new("v", "a \"b\" & <c>")])
        });
        assert_eq!(out, "<e v=\"a &quot;b&quot; &amp; &lt;c&gt;\"/>\n");
    }

    #[test]
    fn test_html_text_and_attributes() {
        let out = render(Dialect::Html, |w| {
            w.text_element("td", &[Attr::new("class", "CountCell")], "R&D \u{E9}")?;
            w.raw_element("td", &[], "<a href=\"x\">y</a>")
        });
        assert_eq!(
            out,
            "<td class=\"CountCell\">R&amp;D &#xE9;</td>\n<td><a href=\"x\">y</a></td>\n"
        );
    }

    #[test]
    fn test_raw_and_blank_lines() {
        let out = render(Dialect::Html, |w| {
            w.start("style", &[])?;
            w.raw_line("body {")?;
            w.blank_line()?;
            w.end()
        });
        assert_eq!(out, "<style>\n    body {\n\n</style>\n");
    }

    #[test]
    fn test_depth_tracks_open_elements() {
        let mut writer = MarkupWriter::new(Vec::new(), Dialect::Xml);
        assert_eq!(writer.depth(), 0);
        writer.start("a", &[]).unwrap();
        writer.start("b", &[]).unwrap();
        assert_eq!(writer.depth(), 2);
        writer.empty("c", &[]).unwrap();
        assert_eq!(writer.depth(), 2);
        writer.end().unwrap();
        writer.end().unwrap();
        assert_eq!(writer.depth(), 0);

        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(out, "<a>\n    <b>\n        <c/>\n    </b>\n</a>\n");
    }

    #[test]
    fn test_unbalanced_end_is_an_error() {
        let mut buf = Vec::new();
        let mut writer = MarkupWriter::new(&mut buf, Dialect::Xml);
        assert_eq!(
            writer.end().unwrap_err().kind(),
            io::ErrorKind::InvalidInput
        );
    }
}
