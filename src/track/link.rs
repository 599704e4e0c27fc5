//! `.xy` link discovery.
//!
//! A small tag scanner that walks `<a ...>` tags and reads their `href`
//! attribute. Only one link pattern matters, so no HTML parser is involved.

use crate::error::{ErrorCode, Result, TrackError};

/// Extension of the upstream track data files.
pub const XY_EXTENSION: &str = ".xy";

/// Returns the href of the first anchor whose path ends in `.xy`.
///
/// Tag and attribute names match case-insensitively; values may be
/// double-quoted, single-quoted or bare. `&amp;` is decoded. Anchors inside
/// comments and `<script>`/`<style>` bodies are not links.
pub fn find_xy_link(html: &str) -> Option<String> {
    let bytes = html.as_bytes();
    // ASCII lowercasing keeps byte offsets aligned with `html`
    let lower = html.to_ascii_lowercase();
    let mut pos = 0;

    while let Some(offset) = html[pos..].find('<') {
        let start = pos + offset + 1;
        pos = start;

        if lower[start..].starts_with("!--") {
            pos = skip_past(&lower, start + 3, "-->")?;
            continue;
        }
        if let Some(tag) = raw_text_tag(&bytes[start..]) {
            pos = skip_past(&lower, start + tag.len(), &format!("</{}", tag))?;
            continue;
        }

        if !is_anchor_open(&bytes[start..]) {
            continue;
        }

        let (href, end) = scan_attributes(html, start + 1);
        pos = end;

        if let Some(href) = href {
            let href = href.trim().replace("&amp;", "&");
            if has_xy_path(&href) {
                return Some(href);
            }
        }
    }

    None
}

/// Resolves `href` against `base_url`.
///
/// Root-relative links are appended to the base, path included, the same
/// way the index page URL is built. Other links are joined as URLs.
pub fn resolve_link(base_url: &str, href: &str) -> Result<String> {
    let base = reqwest::Url::parse(base_url).map_err(|e| {
        TrackError::with_source(
            ErrorCode::LinkNotFound,
            format!("Invalid base URL {}", base_url),
            e,
        )
    })?;

    if href.starts_with('/') && !href.starts_with("//") {
        return Ok(format!("{}{}", base_url.trim_end_matches('/'), href));
    }

    let url = base.join(href).map_err(|e| {
        TrackError::with_source(
            ErrorCode::LinkNotFound,
            format!("Cannot resolve link {} against {}", href, base_url),
            e,
        )
    })?;

    Ok(url.to_string())
}

/// Returns the index just past the first `needle` at or after `from`.
fn skip_past(lower: &str, from: usize, needle: &str) -> Option<usize> {
    lower[from..].find(needle).map(|n| from + n + needle.len())
}

/// Returns `script` or `style` if `rest` opens one of those tags.
fn raw_text_tag(rest: &[u8]) -> Option<&'static str> {
    ["script", "style"].into_iter().find(|tag| {
        rest.len() > tag.len()
            && rest[..tag.len()].eq_ignore_ascii_case(tag.as_bytes())
            && (rest[tag.len()].is_ascii_whitespace() || rest[tag.len()] == b'>')
    })
}

fn is_anchor_open(rest: &[u8]) -> bool {
    matches!(rest.first(), Some(b'a' | b'A'))
        && rest.get(1).is_some_and(|b| b.is_ascii_whitespace())
}

fn has_xy_path(href: &str) -> bool {
    let path = href.split(['?', '#']).next().unwrap_or_default();
    path.ends_with(XY_EXTENSION)
}

/// Reads attributes from `from` up to the closing `>`.
///
/// Returns the first `href` value and the index just past the tag.
fn scan_attributes(html: &str, from: usize) -> (Option<&str>, usize) {
    let bytes = html.as_bytes();
    let len = bytes.len();
    let mut i = from;
    let mut href = None;

    loop {
        while i < len && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }
        if i >= len {
            return (href, len);
        }
        if bytes[i] == b'>' {
            return (href, i + 1);
        }

        let name_start = i;
        while i < len && !bytes[i].is_ascii_whitespace() && !matches!(bytes[i], b'=' | b'>' | b'/')
        {
            i += 1;
        }
        let name = &html[name_start..i];

        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= len || bytes[i] != b'=' {
            // Valueless attribute
            continue;
        }
        i += 1;
        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        let value = match bytes.get(i) {
            Some(&quote @ (b'"' | b'\'')) => {
                let value_start = i + 1;
                let value_end = html[value_start..]
                    .find(quote as char)
                    .map_or(len, |n| value_start + n);
                i = (value_end + 1).min(len);
                &html[value_start..value_end]
            }
            _ => {
                let value_start = i;
                while i < len && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                    i += 1;
                }
                &html[value_start..i]
            }
        };

        if href.is_none() && name.eq_ignore_ascii_case("href") {
            href = Some(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_first_xy_link() {
        let html = r#"
            <html><body>
            <a href="/index.html">home</a>
            <a href="/data/2024_track.xy">today</a>
            <a href="/data/2023_track.xy">older</a>
            </body></html>
        "#;
        assert_eq!(find_xy_link(html).as_deref(), Some("/data/2024_track.xy"));
    }

    #[test]
    fn no_xy_link() {
        let html = r#"<a href="/data/track.csv">csv</a><a name="top">top</a>"#;
        assert!(find_xy_link(html).is_none());
        assert!(find_xy_link("").is_none());
        assert!(find_xy_link("plain text mentioning file.xy").is_none());
    }

    #[test]
    fn tolerates_markup_variations() {
        assert_eq!(
            find_xy_link("<A CLASS='x' HREF='/t/a.xy'>a</A>").as_deref(),
            Some("/t/a.xy")
        );
        assert_eq!(
            find_xy_link("<a\n  target=_blank\n  href=/t/b.xy>b</a>").as_deref(),
            Some("/t/b.xy")
        );
        assert_eq!(
            find_xy_link(r#"<a title="a > b" href="/t/c.xy">c</a>"#).as_deref(),
            Some("/t/c.xy")
        );
        assert_eq!(
            find_xy_link(r#"<a download href="/t/d.xy">d</a>"#).as_deref(),
            Some("/t/d.xy")
        );
    }

    #[test]
    fn ignores_other_tags_starting_with_a() {
        let html = r#"<abbr href="/t/x.xy">x</abbr><area href="/t/y.xy">"#;
        assert!(find_xy_link(html).is_none());
    }

    #[test]
    fn query_string_and_entities() {
        assert_eq!(
            find_xy_link(r#"<a href="/cgi-bin/get?f=track.xy&amp;v=2">q</a>"#),
            None
        );
        assert_eq!(
            find_xy_link(r#"<a href="/t/track.xy?v=2&amp;x=1">q</a>"#).as_deref(),
            Some("/t/track.xy?v=2&x=1")
        );
    }

    #[test]
    fn resolves_root_relative_link_to_base_plus_href() {
        let base = "http://www.atlantis.whoi.edu";
        let href = "/data/foo.xy";
        assert_eq!(resolve_link(base, href).unwrap(), format!("{}{}", base, href));
    }

    #[test]
    fn root_relative_link_keeps_base_path() {
        assert_eq!(
            resolve_link("http://upstream.test/mirror", "/data/foo.xy").unwrap(),
            "http://upstream.test/mirror/data/foo.xy"
        );
        assert_eq!(
            resolve_link("http://upstream.test/mirror/", "/data/foo.xy").unwrap(),
            "http://upstream.test/mirror/data/foo.xy"
        );
    }

    #[test]
    fn skips_commented_out_anchors() {
        let html = r#"<!-- <a href="/old/stale.xy">old</a> --><a href="/data/today.xy">today</a>"#;
        assert_eq!(find_xy_link(html).as_deref(), Some("/data/today.xy"));

        assert!(find_xy_link(r#"<!-- <a href="/old/stale.xy">never closed"#).is_none());
    }

    #[test]
    fn skips_script_and_style_bodies() {
        let html = r#"
            <script type="text/javascript">var s = '<a href="/js/fake.xy">';</script>
            <STYLE>a[href$=".xy"] { color: red }</STYLE>
            <a href="/data/real.xy">real</a>
        "#;
        assert_eq!(find_xy_link(html).as_deref(), Some("/data/real.xy"));
    }

    #[test]
    fn keeps_absolute_links() {
        assert_eq!(
            resolve_link("http://upstream.test", "http://mirror.test/a/b.xy").unwrap(),
            "http://mirror.test/a/b.xy"
        );
    }

    #[test]
    fn invalid_base_is_an_error() {
        let err = resolve_link("not a url", "/x.xy").unwrap_err();
        assert_eq!(err.code, ErrorCode::LinkNotFound);
    }
}
