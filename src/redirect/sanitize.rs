//! Redirect target sanitization.

/// Makes a URL safe for use in a `Location` header.
pub trait UrlSanitizer: Send + Sync {
    fn sanitize(&self, raw: &str) -> String;
}

/// Schemes a redirect target may carry.
pub const ALLOWED_SCHEMES: &[&str] = &[
    "http", "https", "ftp", "ftps", "mailto", "news", "irc", "irc6", "ircs", "gopher", "nntp",
    "feed", "telnet", "mms", "rtsp", "sms", "svn", "tel", "fax", "xmpp", "webcal", "urn",
];

/// Raw URL escaping as the platform applies it to stored URLs.
///
/// Disallowed characters are dropped rather than encoded, and a target with a
/// disallowed scheme becomes the empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct EscUrlRaw;

impl UrlSanitizer for EscUrlRaw {
    fn sanitize(&self, raw: &str) -> String {
        let trimmed = raw.trim_start();
        if trimmed.is_empty() {
            return String::new();
        }

        let url: String = trimmed
            .replace(' ', "%20")
            .chars()
            .filter(|c| is_allowed(*c))
            .collect();
        if url.is_empty() {
            return url;
        }

        let url = if has_scheme_ignore_case(&url, "mailto:") {
            url
        } else {
            strip_encoded_line_breaks(url)
        };
        let url = url.replace(";//", "://");

        if !url.contains(':') {
            if url.starts_with(['/', '#', '?']) || is_php_reference(&url) {
                return url;
            }
            return format!("http://{url}");
        }

        match scheme(&url) {
            Some(scheme) if !ALLOWED_SCHEMES.contains(&scheme.as_str()) => {
                tracing::warn!(scheme = %scheme, "Dropping redirect target with disallowed scheme");
                String::new()
            }
            _ => url,
        }
    }
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || !c.is_ascii() || "-~+_.?#=!&;,/:%@$|*'()[]".contains(c)
}

/// Percent-encoded CR and LF, removed until none remain.
const ENCODED_LINE_BREAKS: [&str; 4] = ["%0d", "%0a", "%0D", "%0A"];

fn strip_encoded_line_breaks(mut url: String) -> String {
    while ENCODED_LINE_BREAKS.iter().any(|seq| url.contains(seq)) {
        for seq in ENCODED_LINE_BREAKS {
            url = url.replace(seq, "");
        }
    }
    url
}

fn has_scheme_ignore_case(url: &str, prefix: &str) -> bool {
    url.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// `name.php` style references stay relative.
fn is_php_reference(url: &str) -> bool {
    match url.find('.') {
        Some(dot) if dot > 0 => {
            url[..dot].chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
                && url
                    .get(dot + 1..dot + 4)
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("php"))
        }
        _ => false,
    }
}

/// The text before the first `:` when it can only be a scheme.
fn scheme(url: &str) -> Option<String> {
    let (head, _) = url.split_once(':')?;
    if !head.is_empty() && head.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(head.to_ascii_lowercase())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn esc(raw: &str) -> String {
        EscUrlRaw.sanitize(raw)
    }

    #[test]
    fn test_relative_paths_pass_through() {
        assert_eq!(esc("/new-page/extra"), "/new-page/extra");
        assert_eq!(esc("/search?q=a&b=c"), "/search?q=a&b=c");
        assert_eq!(esc("index.php?p=1"), "index.php?p=1");
    }

    #[test]
    fn test_spaces_and_disallowed_characters() {
        assert_eq!(esc("  /a b"), "/a%20b");
        assert_eq!(esc("/a<script>\"b\"\n"), "/ascriptb");
        assert_eq!(esc("/caf\u{e9}"), "/caf\u{e9}");
    }

    #[test]
    fn test_scheme_handling() {
        assert_eq!(esc("https://example.com/x"), "https://example.com/x");
        assert_eq!(esc("example.com/x"), "http://example.com/x");
        assert_eq!(esc("javascript:alert(1)"), "");
        assert_eq!(esc("/path?time=12:30"), "/path?time=12:30");
    }

    #[test]
    fn test_encoded_line_breaks_removed() {
        assert_eq!(
            esc("/new-page%0d%0aSet-Cookie:%20a=b"),
            "/new-pageSet-Cookie:%20a=b"
        );
        assert_eq!(esc("/a%0D%0Ab"), "/ab");
        assert_eq!(esc("/a%0%0dAb"), "/ab");
        assert_eq!(esc("mailto:a@example.com?body=x%0Ay"), "mailto:a@example.com?body=x%0Ay");
    }

    #[test]
    fn test_semicolon_scheme_separator() {
        assert_eq!(esc("https;//example.com/x"), "https://example.com/x");
    }

    #[test]
    fn test_empty() {
        assert_eq!(esc(""), "");
        assert_eq!(esc("   "), "");
        assert_eq!(esc("<>"), "");
    }
}
