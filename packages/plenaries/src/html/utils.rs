//! Helpers for navigating and extracting data from HTML element trees.

use scraper::{ElementRef, Html, Selector};

/// Compile a static CSS selector.
///
/// Only used with literal selectors, which are known to be valid.
#[allow(clippy::expect_used)]
#[must_use]
pub fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

/// Lowercase tag name of an element (e.g., "h2").
///
/// # Examples
/// ```
/// use scraper::Html;
/// use plenaries::html::{selector, tag_name};
///
/// let html = Html::parse_fragment("<h2><span>01</span></h2>");
/// let h2 = html.select(&selector("h2")).next().unwrap();
/// assert_eq!(tag_name(h2), "h2");
/// ```
#[must_use]
pub fn tag_name<'a>(element: ElementRef<'a>) -> &'a str {
    element.value().name()
}

/// Check if an element has a specific tag name.
#[must_use]
pub fn has_tag(element: ElementRef<'_>, tag: &str) -> bool {
    tag_name(element) == tag
}

/// CSS classes of an element, in document order.
pub fn classes<'a>(element: ElementRef<'a>) -> impl Iterator<Item = &'a str> {
    element
        .value()
        .attr("class")
        .unwrap_or_default()
        .split_whitespace()
}

/// Check if an element carries a CSS class.
///
/// # Examples
/// ```
/// use scraper::Html;
/// use plenaries::html::{has_class, selector};
///
/// let html = Html::parse_fragment(r#"<p class="NormalNL">tekst</p>"#);
/// let p = html.select(&selector("p")).next().unwrap();
/// assert!(has_class(p, "NormalNL"));
/// assert!(!has_class(p, "NormalFR"));
/// ```
#[must_use]
pub fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    classes(element).any(|c| c == class)
}

/// Inline style string of an element.
#[must_use]
pub fn style<'a>(element: ElementRef<'a>) -> Option<&'a str> {
    element.value().attr("style")
}

/// Text of an element and all its descendants, untouched.
#[must_use]
pub fn raw_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().replace("\r\n", "\n")
}

/// Text of an element and its descendants, trimmed.
#[must_use]
pub fn trimmed_text(element: ElementRef<'_>) -> String {
    raw_text(element).trim().to_string()
}

/// Trimmed text with line breaks turned into spaces.
///
/// Word-generated reports break lines inside running text; this puts a
/// heading or paragraph back on one line.
#[must_use]
pub fn flat_text(element: ElementRef<'_>) -> String {
    trimmed_text(element).replace('\n', " ")
}

/// Text of the whole document, with text nodes concatenated as-is.
#[must_use]
pub fn document_text(html: &Html) -> String {
    html.root_element().text().collect()
}

/// Following element siblings of an element, nearest first.
pub fn next_element_siblings<'a>(
    element: ElementRef<'a>,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element.next_siblings().filter_map(ElementRef::wrap)
}

/// Following element siblings up to (excluding) the first one with tag `stop_tag`.
///
/// With this piece of HTML and the first `h1` as start, the two paragraphs
/// are returned:
///
/// ```text
/// <h1>Header 1</h1>
/// <p>Paragraph 1</p>
/// <p>Paragraph 2</p>
/// <h1>Header 2</h1>
/// ```
pub fn siblings_until<'a>(
    start: ElementRef<'a>,
    stop_tag: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    next_element_siblings(start).take_while(move |sibling| !has_tag(*sibling, stop_tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first<'a>(html: &'a Html, css: &'static str) -> ElementRef<'a> {
        html.select(&selector(css)).next().unwrap()
    }

    #[test]
    fn test_tag_name_and_has_tag() {
        let html = Html::parse_fragment("<h1><span>Projets de loi</span></h1>");
        let h1 = first(&html, "h1");
        assert_eq!(tag_name(h1), "h1");
        assert!(has_tag(h1, "h1"));
        assert!(!has_tag(h1, "h2"));
    }

    #[test]
    fn test_classes() {
        let html = Html::parse_fragment(r#"<p class="NormalNL Indent">x</p>"#);
        let p = first(&html, "p");
        let found: Vec<_> = classes(p).collect();
        assert_eq!(found, vec!["NormalNL", "Indent"]);
    }

    #[test]
    fn test_classes_keep_attribute_order() {
        let html = Html::parse_fragment(r#"<p class=" Titre2NL  Bold
            Anchor">x</p><p>y</p>"#);
        let found: Vec<_> = classes(first(&html, "p")).collect();
        assert_eq!(found, vec!["Titre2NL", "Bold", "Anchor"]);
        assert!(has_class(first(&html, "p"), "Bold"));

        let bare = html.select(&selector("p")).nth(1).unwrap();
        assert_eq!(classes(bare).count(), 0);
    }

    #[test]
    fn test_style() {
        let html = Html::parse_fragment(r#"<span style="border:solid windowtext 1.0pt">10</span><b>x</b>"#);
        assert_eq!(
            style(first(&html, "span")),
            Some("border:solid windowtext 1.0pt")
        );
        assert_eq!(style(first(&html, "b")), None);
    }

    #[test]
    fn test_text_variants() {
        let html = Html::parse_fragment("<h2>  <span>01</span>\r\n<span>Projet de\nloi</span>  </h2>");
        let h2 = first(&html, "h2");
        assert_eq!(trimmed_text(h2), "01\nProjet de\nloi");
        assert_eq!(flat_text(h2), "01 Projet de loi");
    }

    #[test]
    fn test_siblings_until_stops_at_tag() {
        let html = Html::parse_fragment(
            "<div><h1>A</h1>text<p>1</p><p>2</p><h1>B</h1><p>3</p></div>",
        );
        let h1 = first(&html, "h1");
        let between: Vec<_> = siblings_until(h1, "h1").map(trimmed_text).collect();
        assert_eq!(between, vec!["1", "2"]);
    }

    #[test]
    fn test_siblings_until_runs_to_end_without_stop() {
        let html = Html::parse_fragment("<div><h2>A</h2><p>1</p><p>2</p></div>");
        let h2 = first(&html, "h2");
        assert_eq!(siblings_until(h2, "h1").count(), 2);
    }

    #[test]
    fn test_document_text_concatenates() {
        let html = Html::parse_document("<html><body><p>Oui 2</p>\n<p>Ja</p></body></html>");
        assert!(document_text(&html).contains("Oui 2\nJa"));
    }
}
