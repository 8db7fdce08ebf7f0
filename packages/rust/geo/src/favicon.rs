//! Best-effort icon URL derivation from a website cell.

use climatemap_shared::{IconConfig, Result};
use url::Url;

/// Builds icon-service URLs keyed by a website's hostname.
#[derive(Debug, Clone)]
pub struct FaviconResolver {
    template: String,
}

impl Default for FaviconResolver {
    fn default() -> Self {
        Self {
            template: IconConfig::default().service,
        }
    }
}

impl FaviconResolver {
    /// Create a resolver from the `[icons]` config section.
    pub fn from_config(config: &IconConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            template: config.service.clone(),
        })
    }

    /// Icon URL for `website`, or `None` when it is blank or unparseable.
    ///
    /// Scheme-less input (`example.org`) is treated as `https://example.org`.
    /// The result is always an absolute URL.
    pub fn resolve(&self, website: &str) -> Option<String> {
        let website = website.trim();
        if website.is_empty() {
            return None;
        }

        let candidate = if has_scheme(website) {
            website.to_string()
        } else {
            format!("https://{website}")
        };

        let parsed = Url::parse(&candidate).ok()?;
        let host = parsed.host_str().filter(|h| !h.is_empty())?;

        let icon = self.template.replace("{host}", host);
        Url::parse(&icon).ok().map(String::from)
    }
}

/// True when `s` starts with `<scheme>://`.
fn has_scheme(s: &str) -> bool {
    match s.split_once("://") {
        Some((scheme, _)) => {
            scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_domain_gets_https() {
        let resolver = FaviconResolver::default();
        assert_eq!(
            resolver.resolve("example.org").as_deref(),
            Some("https://icons.duckduckgo.com/ip3/example.org.ico")
        );
    }

    #[test]
    fn full_url_keeps_only_hostname() {
        let resolver = FaviconResolver::default();
        assert_eq!(
            resolver.resolve("http://www.example.org/about?x=1").as_deref(),
            Some("https://icons.duckduckgo.com/ip3/www.example.org.ico")
        );
    }

    #[test]
    fn empty_input_is_unavailable() {
        let resolver = FaviconResolver::default();
        assert_eq!(resolver.resolve(""), None);
        assert_eq!(resolver.resolve("   "), None);
    }

    #[test]
    fn malformed_input_is_unavailable() {
        let resolver = FaviconResolver::default();
        assert_eq!(resolver.resolve("not a website"), None);
        assert_eq!(resolver.resolve("https://"), None);
    }

    #[test]
    fn embedded_url_in_path_does_not_count_as_scheme() {
        assert!(!has_scheme("example.org/?next=https://other.org"));
        assert!(has_scheme("HTTPS://example.org"));
    }

    #[test]
    fn custom_template() {
        let config = IconConfig {
            service: "https://www.google.com/s2/favicons?domain={host}".into(),
        };
        let resolver = FaviconResolver::from_config(&config).unwrap();
        assert_eq!(
            resolver.resolve("aquabot.example").as_deref(),
            Some("https://www.google.com/s2/favicons?domain=aquabot.example")
        );
    }

    #[test]
    fn template_without_placeholder_is_rejected() {
        let config = IconConfig {
            service: "https://icons.example.com/x.ico".into(),
        };
        assert!(FaviconResolver::from_config(&config).is_err());
    }
}
