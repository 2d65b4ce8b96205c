//! HTML `<table>` parser
//!
//! Accepts the outer markup of a single `<table>` holding one `<thead>` with
//! exactly one `<tr>` and a `<tbody>` with any number of rows. The markup
//! must be well-formed; cell text is taken from all descendant text with
//! whitespace runs collapsed to a single space.

use log::trace;
use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};
use crate::model::Table;

use super::Parser;

/// Placeholder filled into the cells a `colspan` covers
const COLSPAN_CONTINUATION: &str = "...";

/// Parser for HTML table markup
pub struct HtmlParser;

#[derive(Debug)]
enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug)]
struct Element {
    name: String,
    colspan: usize,
    children: Vec<Node>,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> std::result::Result<Self, String> {
        let name = String::from_utf8_lossy(start.name().as_ref()).to_lowercase();

        let mut colspan = 1;
        for attr in start.attributes() {
            let attr = attr.map_err(|e| e.to_string())?;
            if attr.key.as_ref().eq_ignore_ascii_case(b"colspan") {
                let value = String::from_utf8_lossy(&attr.value);
                colspan = leading_number(&value);
            }
        }

        Ok(Self {
            name,
            colspan,
            children: Vec::new(),
        })
    }

    fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements().filter(move |element| element.name == name)
    }

    fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
            }
        }
    }

    fn require_single_child<'a>(&'a self, name: &'a str) -> Result<&'a Element> {
        let mut matches = self.children_named(name);
        let first = matches.next().ok_or_else(|| {
            Error::parse(format!("No <{}> found in <{}>", name, self.name))
        })?;
        if matches.next().is_some() {
            return Err(Error::parse(format!(
                "Multiple <{}> found in <{}>",
                name, self.name
            )));
        }
        Ok(first)
    }

    /// One value per child element, plus a continuation cell for each
    /// extra column a `colspan` covers
    fn cell_values(&self) -> Vec<String> {
        let mut row = Vec::new();
        for cell in self.elements() {
            row.push(collapse_whitespace(&cell.text_content()));
            for _ in 1..cell.colspan {
                row.push(COLSPAN_CONTINUATION.to_string());
            }
        }
        row
    }
}

/// Integer value of the leading digits, 0 when there are none
fn leading_number(value: &str) -> usize {
    let digits: String = value
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0)
}

/// Collapse runs of ASCII whitespace; non-breaking spaces are kept
fn collapse_whitespace(text: &str) -> String {
    text.split_ascii_whitespace().collect::<Vec<_>>().join(" ")
}

fn resolve_entity(raw: &str) -> std::result::Result<String, String> {
    if let Some(resolved) = resolve_xml_entity(raw) {
        return Ok(resolved.into());
    }

    if let Some(rest) = raw.strip_prefix('#') {
        let code = if let Some(hex) = rest.strip_prefix('x').or_else(|| rest.strip_prefix('X')) {
            u32::from_str_radix(hex, 16)
        } else {
            rest.parse::<u32>()
        }
        .map_err(|_| format!("Invalid numeric entity: &{};", raw))?;

        return char::from_u32(code)
            .map(|ch| ch.to_string())
            .ok_or_else(|| format!("Invalid Unicode code point: {}", code));
    }

    Err(format!("Entity '{}' not defined", raw))
}

fn invalid_html(detail: impl std::fmt::Display, html: &str) -> Error {
    Error::parse(format!(
        "Invalid HTML string:\n {}\n\n===HTML===\n{}",
        detail, html
    ))
}

fn push_text(stack: &mut [Element], text: String) -> std::result::Result<(), String> {
    match stack.last_mut() {
        Some(current) => {
            current.children.push(Node::Text(text));
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err("Start tag expected, '<' not found".to_string()),
    }
}

fn attach(
    stack: &mut [Element],
    element: Element,
    root: &mut Option<Element>,
) -> std::result::Result<(), String> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Element(element));
    } else if root.is_none() {
        *root = Some(element);
    } else {
        return Err("Extra content at the end of the document".to_string());
    }
    Ok(())
}

/// Build the element tree for a complete document with a single root
fn build_tree(html: &str) -> std::result::Result<Element, String> {
    let mut reader = Reader::from_str(html);
    reader.config_mut().check_end_names = false;

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader.read_event().map_err(|e| e.to_string())?;

        match event {
            Event::Start(ref start) => {
                if root.is_some() && stack.is_empty() {
                    return Err("Extra content at the end of the document".to_string());
                }
                stack.push(Element::from_start(start)?);
            }
            Event::Empty(ref start) => {
                let element = Element::from_start(start)?;
                attach(&mut stack, element, &mut root)?;
            }
            Event::End(ref end) => {
                let name = String::from_utf8_lossy(end.name().as_ref()).to_lowercase();
                let element = stack
                    .pop()
                    .ok_or_else(|| format!("Unexpected end tag : {}", name))?;
                if element.name != name {
                    return Err(format!(
                        "Opening and ending tag mismatch: {} and {}",
                        element.name, name
                    ));
                }
                attach(&mut stack, element, &mut root)?;
            }
            Event::Text(text) => {
                let text = text.decode().map_err(|e| e.to_string())?;
                push_text(&mut stack, text.into_owned())?;
            }
            Event::CData(data) => {
                let text = String::from_utf8_lossy(data.as_ref()).into_owned();
                push_text(&mut stack, text)?;
            }
            Event::GeneralRef(reference) => {
                let raw = reference.decode().map_err(|e| e.to_string())?;
                push_text(&mut stack, resolve_entity(&raw)?)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(format!("Premature end of data in tag {}", open.name));
    }

    root.ok_or_else(|| "Start tag expected, '<' not found".to_string())
}

impl Parser for HtmlParser {
    fn parse_str(&self, html: &str) -> Result<Table> {
        if html.is_empty() {
            return Err(Error::parse("Expected an HTML string"));
        }

        let table = build_tree(html).map_err(|detail| invalid_html(detail, html))?;
        if table.name != "table" {
            return Err(Error::parse(format!(
                "Expected a <table> but got {}",
                table.name
            )));
        }

        let thead = table.require_single_child("thead")?;
        let tbody = table.require_single_child("tbody")?;

        let mut rows = vec![thead.require_single_child("tr")?.cell_values()];
        rows.extend(tbody.children_named("tr").map(Element::cell_values));

        trace!("parsed {} HTML table row(s)", rows.len());
        Table::padded(rows)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "html" | "htm")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EMPTY_CELL;

    fn parse(html: &str) -> Vec<Vec<String>> {
        HtmlParser.parse_str(html).unwrap().rows().to_vec()
    }

    fn parse_err(html: &str) -> String {
        HtmlParser.parse_str(html).unwrap_err().to_string()
    }

    fn single_header(cell: &str) -> String {
        format!(
            "<table><thead><tr><th>{}</th></tr></thead><tbody></tbody></table>",
            cell
        )
    }

    #[test]
    fn test_rejects_empty_string() {
        assert_eq!(parse_err(""), "Expected an HTML string");
    }

    #[test]
    fn test_rejects_malformed_markup() {
        let err = parse_err("just some random stuff");
        assert!(err.starts_with("Invalid HTML string:"));
        assert!(err.contains("Start tag expected"));
        assert!(err.ends_with("===HTML===\njust some random stuff"));

        let err = parse_err("<table><tr></table>");
        assert!(err.contains("tag mismatch"), "{}", err);
        assert!(err.contains("<table><tr></table>"));

        let err = parse_err("<table><thead>");
        assert!(err.starts_with("Invalid HTML string:"), "{}", err);
    }

    #[test]
    fn test_rejects_unexpected_structure() {
        assert_eq!(parse_err("<div></div>"), "Expected a <table> but got div");
        assert_eq!(parse_err("<table></table>"), "No <thead> found in <table>");
        assert_eq!(
            parse_err("<table><thead><tr><th>Stuff</th></tr></thead></table>"),
            "No <tbody> found in <table>"
        );
        assert_eq!(
            parse_err("\n<table>\n  <thead></thead>\n  <tbody></tbody>\n</table>\n"),
            "No <tr> found in <thead>"
        );
        assert_eq!(
            parse_err("<table><thead><tr></tr><tr></tr></thead><tbody></tbody></table>"),
            "Multiple <tr> found in <thead>"
        );
        assert!(parse_err("<table><thead><tr></tr></thead><tbody></tbody></table>")
            .contains("All table rows were empty"));
    }

    #[test]
    fn test_parses_header_and_body_rows() {
        assert_eq!(parse(&single_header("Header1")), [vec!["Header1"]]);
        assert_eq!(
            parse(
                "<table>\
                 <thead><tr><td>Header1</td><th>Header2</th></tr></thead>\
                 <tbody>\
                 <tr><td>1.1</td><td>1.2</td></tr>\
                 <tr><th>2.1</th><td>2.2</td></tr>\
                 </tbody></table>"
            ),
            [
                vec!["Header1", "Header2"],
                vec!["1.1", "1.2"],
                vec!["2.1", "2.2"]
            ]
        );
    }

    #[test]
    fn test_cell_text_content() {
        assert_eq!(
            parse(&single_header("One &amp; Two &gt; None")),
            [vec!["One & Two > None"]]
        );
        assert_eq!(parse(&single_header("Tick &#10003;")), [vec!["Tick ✓"]]);
        assert_eq!(
            parse(&single_header("With <!--Comment --> inside")),
            [vec!["With inside"]]
        );
        assert_eq!(parse(&single_header("It works ✓")), [vec!["It works ✓"]]);
        assert_eq!(
            parse(&single_header("10&#160;kg  &#160;")),
            [vec!["10\u{a0}kg \u{a0}"]]
        );
        assert_eq!(
            parse(&single_header("Nothing between <span></span> this")),
            [vec!["Nothing between this"]]
        );
        assert_eq!(
            parse(&single_header("Nothing <span>between</span> this")),
            [vec!["Nothing between this"]]
        );
    }

    #[test]
    fn test_collapses_whitespace() {
        let html = "<table>   <thead>\n    <tr><td>  Head\t1</td>\n  <td>Head     2\n</td></tr>\n\
                    </thead><tbody><tr><td>Cell\n   1</td>\n\n   <td>Cell\n\n  2</td>\n\t</tr></tbody></table>\n";
        assert_eq!(
            parse(html),
            [vec!["Head 1", "Head 2"], vec!["Cell 1", "Cell 2"]]
        );
    }

    #[test]
    fn test_fills_colspan_with_continuation_mark() {
        let html = "<table><thead>\
                    <tr><th>Col1</th><td>Col2</td><td>Col3</td></tr>\
                    </thead><tbody>\
                    <tr><th colspan=\"2\">Stuff</th><td>Stuff3</td></tr>\
                    </tbody></table>";
        assert_eq!(
            parse(html),
            [vec!["Col1", "Col2", "Col3"], vec!["Stuff", "...", "Stuff3"]]
        );
    }

    #[test]
    fn test_pads_missing_cells_and_empty_rows() {
        let html = "<table><thead><tr><th>Column 1</th></tr></thead><tbody>\
                    <tr><th>Column 1</th><td>Column 2</td></tr>\
                    <tr></tr>\
                    </tbody></table>";
        assert_eq!(
            parse(html),
            [
                vec!["Column 1", EMPTY_CELL],
                vec!["Column 1", "Column 2"],
                vec![EMPTY_CELL, EMPTY_CELL]
            ]
        );
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("3"), 3);
        assert_eq!(leading_number(" 2px"), 2);
        assert_eq!(leading_number("wide"), 0);
    }
}
