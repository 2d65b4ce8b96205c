//! CSV from an HTTP-style response: a content type plus a body

use log::debug;

use crate::error::{Error, Result};
use crate::model::Table;

use super::{CsvParser, Parser};

const CSV_MEDIA_TYPE: &str = "text/csv";

/// Parse a response body as CSV after checking it really is CSV.
///
/// The media type (ignoring parameters such as `charset`) must be exactly
/// `text/csv`, and the body must not look like an HTML page, which is what
/// most servers send back when a download fails.
pub fn parse_csv_response(content_type: &str, body: &str) -> Result<Table> {
    let media_type = content_type.split(';').next().unwrap_or_default();

    if media_type != CSV_MEDIA_TYPE {
        return Err(Error::parse(format!(
            "Expected Content-Type of \"{}\" but got {}",
            CSV_MEDIA_TYPE, content_type
        )));
    }

    if looks_like_html(body) {
        debug!("rejecting HTML body served as {}", content_type);
        return Err(Error::parse(
            "Response text content looks like HTML but CSV data was expected",
        ));
    }

    CsvParser.parse_str(body)
}

/// True when the text starts with an HTML doctype (any case) or ends with
/// `</html>` followed only by whitespace
pub fn looks_like_html(text: &str) -> bool {
    let opens_as_html = text
        .get(..14)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("<!DOCTYPE html"));

    opens_as_html
        || text
            .trim_end_matches(|c: char| c.is_ascii_whitespace())
            .ends_with("</html>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_csv_body() {
        let table = parse_csv_response("text/csv; charset=utf-8", "a,b\n1,2\n").unwrap();
        assert_eq!(table.rows(), [vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn test_rejects_wrong_content_type() {
        let err = parse_csv_response("text/html", "a,b").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expected Content-Type of \"text/csv\" but got text/html"
        );

        for content_type in ["TEXT/CSV", " text/csv", "text/csv ; charset=utf-8"] {
            assert!(
                parse_csv_response(content_type, "a,b").is_err(),
                "accepted {:?}",
                content_type
            );
        }
    }

    #[test]
    fn test_rejects_html_body() {
        for body in [
            "<!DOCTYPE html><html><body>Oops</body></html>",
            "<html><body>Error</body></html>\n",
        ] {
            let err = parse_csv_response("text/csv", body).unwrap_err();
            assert_eq!(
                err.to_string(),
                "Response text content looks like HTML but CSV data was expected"
            );
        }
    }

    #[test]
    fn test_looks_like_html() {
        assert!(looks_like_html("<!doctype HTML>\n<p>hi</p>"));
        assert!(looks_like_html("a,b\n</html>\n\t "));
        assert!(!looks_like_html("  <!DOCTYPE html>\n<p>hi</p>"));
        assert!(!looks_like_html("a,b\n</HTML>"));
        assert!(!looks_like_html("html,body\n1,2"));
        assert!(!looks_like_html(""));
    }
}
