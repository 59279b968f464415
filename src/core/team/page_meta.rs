use scraper::{Html, Selector};

/// Metadata the host page exposes to scripts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMeta {
    /// Anti-forgery token from `<meta name="csrf-token">`. Empty when the
    /// page carries none.
    pub csrf_token: String,
}

impl PageMeta {
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        Self {
            csrf_token: select_meta(&document, "csrf-token").unwrap_or_default(),
        }
    }
}

fn select_meta(html: &Html, name: &str) -> Option<String> {
    let selector = Selector::parse(&format!("meta[name=\"{name}\"]")).ok()?;

    html.select(&selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(|value| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_csrf_meta() {
        let html = r#"<html><head>
            <meta charset="utf-8">
            <meta name="csrf-token" content="IjA1ZTk2.Zk0x">
        </head><body></body></html>"#;
        assert_eq!(PageMeta::parse(html).csrf_token, "IjA1ZTk2.Zk0x");
    }

    #[test]
    fn test_missing_meta_is_empty_token() {
        let html = "<html><head><title>About</title></head></html>";
        assert_eq!(PageMeta::parse(html), PageMeta::default());
    }

    #[test]
    fn test_meta_without_content_is_empty_token() {
        let html = r#"<head><meta name="csrf-token"></head>"#;
        assert!(PageMeta::parse(html).csrf_token.is_empty());
    }
}
