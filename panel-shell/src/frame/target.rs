use url::Url;

/// Query parameter telling a hosted page it runs inside the shell.
pub const EMBEDDED_PARAM: &str = "embedded";

const EMBEDDED_VALUE: &str = "1";

/// Resolve `raw` against `base` and mark it as embedded.
///
/// An `embedded` parameter that is already present is left alone. When the
/// target cannot be resolved the marker is appended textually instead.
pub fn embedded_url(base: &Url, raw: &str) -> String {
    match base.join(raw) {
        Ok(mut url) => {
            let marked =
                url.query_pairs().any(|(key, _)| key == EMBEDDED_PARAM);
            if !marked {
                url.query_pairs_mut()
                    .append_pair(EMBEDDED_PARAM, EMBEDDED_VALUE);
            }
            url.into()
        },
        Err(err) => {
            log::debug!("target {raw:?} did not resolve: {err}");
            append_marker(raw)
        },
    }
}

fn append_marker(raw: &str) -> String {
    if raw.contains(&format!("{EMBEDDED_PARAM}=")) {
        return raw.to_string();
    }
    let separator = if raw.contains('?') { '&' } else { '?' };
    format!("{raw}{separator}{EMBEDDED_PARAM}={EMBEDDED_VALUE}")
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::{append_marker, embedded_url};

    fn base() -> Url {
        Url::parse("https://panel.example/app/panel.html")
            .expect("base url should parse")
    }

    #[test]
    fn given_relative_target_when_resolved_then_marker_is_appended() {
        assert_eq!(
            embedded_url(&base(), "reports.html"),
            "https://panel.example/app/reports.html?embedded=1"
        );
    }

    #[test]
    fn given_existing_query_when_resolved_then_marker_joins_with_ampersand() {
        assert_eq!(
            embedded_url(&base(), "fiyat.html?tab=2"),
            "https://panel.example/app/fiyat.html?tab=2&embedded=1"
        );
    }

    #[test]
    fn given_marker_already_present_when_resolved_then_url_is_unchanged() {
        assert_eq!(
            embedded_url(&base(), "/up.html?embedded=0"),
            "https://panel.example/up.html?embedded=0"
        );
    }

    #[test]
    fn given_absolute_target_when_resolved_then_base_is_ignored() {
        assert_eq!(
            embedded_url(&base(), "https://other.example/x"),
            "https://other.example/x?embedded=1"
        );
    }

    #[test]
    fn given_unresolvable_target_when_resolved_then_marker_is_concatenated() {
        assert_eq!(embedded_url(&base(), "http://"), "http://?embedded=1");
    }

    #[test]
    fn given_raw_strings_when_marker_appended_then_separator_follows_query() {
        assert_eq!(append_marker("a.html"), "a.html?embedded=1");
        assert_eq!(append_marker("a.html?x=1"), "a.html?x=1&embedded=1");
        assert_eq!(append_marker("a.html?embedded=1"), "a.html?embedded=1");
    }
}
