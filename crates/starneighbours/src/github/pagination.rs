//! Parsing for GitHub's `Link` response header.
//!
//! GitHub Link headers look like:
//! `<https://api.github.com/repos/o/r/stargazers?per_page=100&page=2>; rel="next", <...&page=9>; rel="last"`

/// Pagination information extracted from a `Link` header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkPagination {
    /// The next page number (from rel="next").
    pub next_page: Option<u32>,
    /// The last page number (from rel="last").
    pub last_page: Option<u32>,
}

/// Parse a `Link` header into pagination info.
#[must_use]
pub fn parse_link_header(link_header: &str) -> LinkPagination {
    let mut info = LinkPagination::default();

    for part in link_header.split(',') {
        let part = part.trim();

        let mut url = None;
        let mut rel = None;

        for segment in part.split(';') {
            let segment = segment.trim();
            if segment.starts_with('<') && segment.ends_with('>') {
                url = Some(&segment[1..segment.len() - 1]);
            } else if let Some(rel_value) = segment.strip_prefix("rel=") {
                rel = Some(rel_value.trim_matches('"'));
            }
        }

        if let (Some(url), Some(rel_type)) = (url, rel) {
            if let Some(page_num) = extract_page_from_url(url) {
                match rel_type {
                    "next" => info.next_page = Some(page_num),
                    "last" => info.last_page = Some(page_num),
                    _ => {}
                }
            }
        }
    }

    info
}

/// Extract the `page` query parameter from a URL.
fn extract_page_from_url(url: &str) -> Option<u32> {
    let query_start = url.find('?')?;
    let query = &url[query_start + 1..];

    for param in query.split('&') {
        if let Some(value) = param.strip_prefix("page=") {
            return value.parse().ok();
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_link_header_full() {
        // Real GitHub Link header format
        let header = r#"<https://api.github.com/repos/o/r/stargazers?per_page=100&page=2>; rel="next", <https://api.github.com/repos/o/r/stargazers?per_page=100&page=3>; rel="last""#;

        let info = parse_link_header(header);
        assert_eq!(info.next_page, Some(2));
        assert_eq!(info.last_page, Some(3));
    }

    #[test]
    fn parse_link_header_only_next() {
        let header = r#"<https://api.github.com/users/octocat/starred?per_page=100&page=2>; rel="next""#;

        let info = parse_link_header(header);
        assert_eq!(info.next_page, Some(2));
        assert_eq!(info.last_page, None);
    }

    #[test]
    fn parse_link_header_last_page_has_no_next() {
        let header = r#"<https://api.github.com/users/octocat/starred?per_page=100&page=1>; rel="first", <https://api.github.com/users/octocat/starred?per_page=100&page=8>; rel="prev""#;

        let info = parse_link_header(header);
        assert_eq!(info.next_page, None);
        assert_eq!(info.last_page, None);
    }

    #[test]
    fn parse_link_header_empty() {
        let info = parse_link_header("");
        assert_eq!(info, LinkPagination::default());
    }

    #[test]
    fn extract_page_from_url_variants() {
        assert_eq!(
            extract_page_from_url("https://api.github.com/repos?page=5"),
            Some(5)
        );
        assert_eq!(
            extract_page_from_url("https://api.github.com/repos?per_page=100&page=3"),
            Some(3)
        );
        assert_eq!(
            extract_page_from_url("https://api.github.com/repos?per_page=100"),
            None
        );
        assert_eq!(extract_page_from_url("https://api.github.com/repos"), None);
    }
}
