use scraper::{ElementRef, Html, Selector};
use serde::de::DeserializeOwned;

/// All elements matching `css`. Selectors here are literals, so a parse failure
/// simply yields no matches.
pub fn select_all<'a>(root: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(sel) => root.select(&sel).collect(),
        Err(_) => Vec::new(),
    }
}

pub fn select_first<'a>(doc: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let sel = Selector::parse(css).ok()?;
    let first = doc.select(&sel).next();
    first
}

/// Trimmed, whitespace-collapsed text of an element.
pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<Vec<_>>().join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Content of `<meta property="og:title">`.
pub fn og_title(doc: &Html) -> Option<String> {
    let meta = select_first(doc, r#"meta[property="og:title"]"#)?;
    let title = meta.value().attr("content")?.trim();
    if title.is_empty() { None } else { Some(title.to_string()) }
}

#[derive(Debug)]
pub enum EmbeddedJsonError {
    MissingScript,
    Decode(serde_json::Error),
}

/// Decode the first `<script type="application/json">` payload into `T`.
pub fn embedded_json<T: DeserializeOwned>(doc: &Html) -> Result<T, EmbeddedJsonError> {
    let script = select_first(doc, r#"script[type="application/json"]"#).ok_or(EmbeddedJsonError::MissingScript)?;
    let body: String = script.text().collect();
    serde_json::from_str::<T>(&body).map_err(EmbeddedJsonError::Decode)
}
