//! `[site.*]` configuration sections.
//!
//! Everything the metadata synthesizer needs to describe the site owner:
//! identity for the Person/profile descriptors, fixed copy for the home and
//! blog-index pages, and the default social-sharing image.
//!
//! # Example
//!
//! ```toml
//! [site.info]
//! author = "Jane Doe"
//! tagline = "Full Stack Engineer"
//! description = "Portfolio of Jane Doe"
//! url = "https://janedoe.dev"
//! og-image = "/og-image.png"
//! profiles = ["https://github.com/janedoe"]
//!
//! [site.blog]
//! title = "Technical Blog & Case Studies"
//! ```

use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;

/// `[site]` wrapper: owner info plus blog-index copy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SiteSectionConfig {
    pub info: SiteInfoConfig,
    pub blog: BlogInfoConfig,
}

/// Site owner metadata used across meta tags, JSON-LD, and robots/sitemap.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SiteInfoConfig {
    /// Owner name, used as author and in page titles.
    pub author: String,

    /// Short role line appended to the home title (e.g. "Full Stack Engineer").
    pub tagline: String,

    /// Home page meta description.
    pub description: String,

    /// Home page keywords.
    pub keywords: Vec<String>,

    /// Public base URL (e.g., "https://example.dev"). Required for build.
    pub url: Option<String>,

    /// Language code for `inLanguage` fields (e.g., "en-US").
    pub language: String,

    /// Contact email, included in the Person descriptor.
    pub email: String,

    /// Twitter handle for `twitter:creator` (e.g., "@janedoe").
    pub twitter: String,

    /// Site-relative path of the default social-sharing image.
    pub og_image: String,

    /// Social profile URLs for the Person `sameAs` list.
    pub profiles: Vec<String>,

    /// Postal address for the Person descriptor.
    pub address: AddressConfig,
}

impl Default for SiteInfoConfig {
    fn default() -> Self {
        Self {
            author: String::new(),
            tagline: String::new(),
            description: String::new(),
            keywords: Vec::new(),
            url: None,
            language: "en-US".into(),
            email: String::new(),
            twitter: String::new(),
            og_image: "/og-image.png".into(),
            profiles: Vec::new(),
            address: AddressConfig::default(),
        }
    }
}

/// Postal address fields for the Person JSON-LD descriptor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AddressConfig {
    pub locality: String,
    pub region: String,
    pub country: String,
}

impl AddressConfig {
    /// True when no address component is set (descriptor is omitted).
    pub fn is_empty(&self) -> bool {
        self.locality.is_empty() && self.region.is_empty() && self.country.is_empty()
    }
}

/// Fixed copy for the blog index page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BlogInfoConfig {
    /// Blog index page title (owner name is appended).
    pub title: String,

    /// Blog index meta description.
    pub description: String,

    /// Blog index keywords.
    pub keywords: Vec<String>,
}

impl Default for BlogInfoConfig {
    fn default() -> Self {
        Self {
            title: "Technical Blog".into(),
            description: String::new(),
            keywords: Vec::new(),
        }
    }
}

impl SiteInfoConfig {
    /// Validate site configuration.
    ///
    /// # Checks
    /// - `url` must be set (all absolute URLs derive from it)
    /// - `url` must be a valid http/https URL with a host
    /// - `author` must be set (titles and descriptors embed it)
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.author.is_empty() {
            diag.error_with_hint(
                "site.info.author",
                "author is not configured",
                "set the site owner's name, e.g.: \"Jane Doe\"",
            );
        }

        let Some(url_str) = &self.url else {
            diag.error_with_hint(
                "site.info.url",
                "public base URL is not configured",
                "set site.info.url, e.g.: \"https://example.dev\"",
            );
            return;
        };

        // URL format check using url crate for strict validation
        match url::Url::parse(url_str) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    diag.error_with_hint(
                        "site.info.url",
                        format!(
                            "scheme '{}' not supported, must be http or https",
                            parsed.scheme()
                        ),
                        "use format like https://example.dev",
                    );
                }
                if parsed.host_str().is_none() {
                    diag.error_with_hint(
                        "site.info.url",
                        "URL must have a valid host",
                        "use format like https://example.dev",
                    );
                }
            }
            Err(e) => {
                diag.error_with_hint(
                    "site.info.url",
                    format!("invalid URL: {}", e),
                    "use format like https://example.dev",
                );
            }
        }
    }

    /// Public base URL without a trailing slash. Empty when unset.
    pub fn base_url(&self) -> &str {
        self.url.as_deref().unwrap_or_default().trim_end_matches('/')
    }

    /// Absolute URL of the default social-sharing image.
    pub fn default_og_image(&self) -> String {
        format!("{}{}", self.base_url(), self.og_image)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ConfigDiagnostics, test_parse_config};

    #[test]
    fn test_site_info_parse() {
        let config = test_parse_config(
            "[site.info]\nauthor = \"Jane\"\nurl = \"https://example.dev/\"\nprofiles = [\"https://github.com/jane\"]",
        );
        assert_eq!(config.site.info.author, "Jane");
        assert_eq!(config.site.info.base_url(), "https://example.dev");
        assert_eq!(config.site.info.profiles.len(), 1);
    }

    #[test]
    fn test_default_og_image_is_absolute() {
        let config =
            test_parse_config("[site.info]\nauthor = \"Jane\"\nurl = \"https://example.dev\"");
        assert_eq!(
            config.site.info.default_og_image(),
            "https://example.dev/og-image.png"
        );
    }

    #[test]
    fn test_validate_missing_url() {
        let config = test_parse_config("[site.info]\nauthor = \"Jane\"");
        let mut diag = ConfigDiagnostics::new();
        config.site.info.validate(&mut diag);
        assert!(diag.into_result().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_scheme() {
        let config =
            test_parse_config("[site.info]\nauthor = \"Jane\"\nurl = \"ftp://example.dev\"");
        let mut diag = ConfigDiagnostics::new();
        config.site.info.validate(&mut diag);
        assert!(diag.into_result().is_err());
    }

    #[test]
    fn test_blog_section_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.site.blog.title, "Technical Blog");
        assert!(config.site.blog.keywords.is_empty());
    }
}
