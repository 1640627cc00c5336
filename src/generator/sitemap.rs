//! Sitemap generation.
//!
//! Generates a sitemap.xml file listing all pages for search engine indexing.
//! Derived from the content store alone - it stays correct even when
//! individual snapshots failed.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.dev/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>1.0</priority>
//!   </url>
//! </urlset>
//! ```

use crate::{config::SiteConfig, content::ContentStore, log, utils::date::DateTimeUtc};
use anyhow::{Context, Result};
use std::borrow::Cow;
use std::fs;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Build sitemap.xml if enabled. Returns whether a file was written.
pub fn build_sitemap(config: &SiteConfig, store: &ContentStore) -> Result<bool> {
    if !config.build.sitemap.enable {
        return Ok(false);
    }
    let sitemap = Sitemap::build(config, store, DateTimeUtc::today());
    sitemap.write(config)?;
    Ok(true)
}

struct Sitemap {
    urls: Vec<UrlEntry>,
}

struct UrlEntry {
    loc: String,
    lastmod: String,
    changefreq: &'static str,
    priority: &'static str,
}

impl Sitemap {
    /// One entry for home and blog index, one per project, one per post.
    ///
    /// Priorities: home 1.0, blog index 0.9, projects 0.9 (top tier) or
    /// 0.8, posts 0.8. `lastmod` falls back to `today` for undated
    /// entities.
    fn build(config: &SiteConfig, store: &ContentStore, today: DateTimeUtc) -> Self {
        let base_url = config.site.info.base_url();
        let today = today.to_iso_date();

        let mut urls = Vec::with_capacity(2 + store.projects.len() + store.posts.len());

        urls.push(UrlEntry {
            loc: format!("{base_url}/"),
            lastmod: today.clone(),
            changefreq: "weekly",
            priority: "1.0",
        });
        urls.push(UrlEntry {
            loc: format!("{base_url}/blog"),
            lastmod: today.clone(),
            changefreq: "weekly",
            priority: "0.9",
        });

        for project in &store.projects {
            urls.push(UrlEntry {
                loc: format!("{base_url}/projects/{}", project.id),
                lastmod: project
                    .last_updated
                    .clone()
                    .unwrap_or_else(|| today.clone()),
                changefreq: "monthly",
                priority: if project.is_top_tier() { "0.9" } else { "0.8" },
            });
        }

        for post in &store.posts {
            urls.push(UrlEntry {
                loc: format!("{base_url}/blog/{}", post.slug),
                lastmod: if post.date.is_empty() {
                    today.clone()
                } else {
                    post.date.clone()
                },
                changefreq: "monthly",
                priority: "0.8",
            });
        }

        Self { urls }
    }

    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push_str("\">\n");

        for entry in self.urls {
            xml.push_str("  <url>\n    <loc>");
            xml.push_str(&escape_xml(&entry.loc));
            xml.push_str("</loc>\n    <lastmod>");
            xml.push_str(&escape_xml(&entry.lastmod));
            xml.push_str("</lastmod>\n    <changefreq>");
            xml.push_str(entry.changefreq);
            xml.push_str("</changefreq>\n    <priority>");
            xml.push_str(entry.priority);
            xml.push_str("</priority>\n  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    fn write(self, config: &SiteConfig) -> Result<()> {
        let sitemap_path = config.dist_join(&config.build.sitemap.path);
        let count = self.urls.len();
        let xml = self.into_xml();

        fs::write(&sitemap_path, xml)
            .with_context(|| format!("Failed to write sitemap to {}", sitemap_path.display()))?;

        log!("sitemap"; "{} ({} URLs)",
            sitemap_path.file_name().unwrap_or_default().to_string_lossy(), count);
        Ok(())
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> Cow<'_, str> {
    // Fast path: check if escaping is needed
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.site.info.url = Some("https://example.dev".into());
        config
    }

    fn demo_store() -> ContentStore {
        ContentStore::from_documents(
            r#"[{"id": "demo", "tier": "tier1", "dateCreated": "2024-01-01"}]"#,
            r#"[{"slug": "hello", "date": "2024-02-01"}]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("<test>"), "&lt;test&gt;");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }

    #[test]
    fn test_sitemap_entry_per_route() {
        let sitemap = Sitemap::build(
            &demo_config(),
            &demo_store(),
            DateTimeUtc::from_ymd(2025, 6, 1),
        );
        let xml = sitemap.into_xml();

        assert_eq!(xml.matches("<url>").count(), 4);
        assert!(xml.contains("<loc>https://example.dev/</loc>"));
        assert!(xml.contains("<loc>https://example.dev/blog</loc>"));
        assert!(xml.contains("<loc>https://example.dev/projects/demo</loc>"));
        assert!(xml.contains("<loc>https://example.dev/blog/hello</loc>"));
    }

    #[test]
    fn test_sitemap_priorities_in_order() {
        let sitemap = Sitemap::build(
            &demo_config(),
            &demo_store(),
            DateTimeUtc::from_ymd(2025, 6, 1),
        );
        let priorities: Vec<_> = sitemap.urls.iter().map(|u| u.priority).collect();
        assert_eq!(priorities, vec!["1.0", "0.9", "0.9", "0.8"]);
    }

    #[test]
    fn test_tier_drives_project_priority() {
        let store = ContentStore::from_documents(
            r#"[{"id": "top", "tier": "tier1"}, {"id": "rest", "tier": "tier2"}, {"id": "none"}]"#,
            "[]",
        )
        .unwrap();
        let sitemap = Sitemap::build(&demo_config(), &store, DateTimeUtc::from_ymd(2025, 6, 1));

        assert_eq!(sitemap.urls[2].priority, "0.9"); // tier1
        assert_eq!(sitemap.urls[3].priority, "0.8"); // tier2
        assert_eq!(sitemap.urls[4].priority, "0.8"); // untiered
    }

    #[test]
    fn test_lastmod_sources() {
        let store = ContentStore::from_documents(
            r#"[{"id": "dated", "lastUpdated": "2024-03-05"}, {"id": "undated"}]"#,
            r#"[{"slug": "post", "date": "2024-02-01"}]"#,
        )
        .unwrap();
        let sitemap = Sitemap::build(&demo_config(), &store, DateTimeUtc::from_ymd(2025, 6, 1));

        assert_eq!(sitemap.urls[2].lastmod, "2024-03-05"); // entity's own date
        assert_eq!(sitemap.urls[3].lastmod, "2025-06-01"); // today fallback
        assert_eq!(sitemap.urls[4].lastmod, "2024-02-01"); // post publish date
    }

    #[test]
    fn test_changefreq_values() {
        let sitemap = Sitemap::build(
            &demo_config(),
            &demo_store(),
            DateTimeUtc::from_ymd(2025, 6, 1),
        );
        let freqs: Vec<_> = sitemap.urls.iter().map(|u| u.changefreq).collect();
        assert_eq!(freqs, vec!["weekly", "weekly", "monthly", "monthly"]);
    }

    #[test]
    fn test_sitemap_empty_store() {
        let store = ContentStore::from_documents("[]", "[]").unwrap();
        let sitemap = Sitemap::build(&demo_config(), &store, DateTimeUtc::from_ymd(2025, 6, 1));
        let xml = sitemap.into_xml();

        // Home and blog index are always present
        assert_eq!(xml.matches("<url>").count(), 2);
        assert!(xml.contains(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#)));
    }

    #[test]
    fn test_sitemap_xml_structure() {
        let sitemap = Sitemap::build(
            &demo_config(),
            &demo_store(),
            DateTimeUtc::from_ymd(2025, 6, 1),
        );
        let xml = sitemap.into_xml();

        let lines: Vec<&str> = xml.lines().collect();
        assert_eq!(lines[0], r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        assert!(lines[1].starts_with("<urlset"));
        assert_eq!(lines.last().unwrap().trim(), "</urlset>");
    }

    #[test]
    fn test_disabled_sitemap_writes_nothing() {
        let mut config = demo_config();
        config.build.sitemap.enable = false;
        let written = build_sitemap(&config, &demo_store()).unwrap();
        assert!(!written);
    }

    #[test]
    fn test_write_to_dist() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = demo_config();
        config.build.dist = dir.path().to_path_buf();

        let written = build_sitemap(&config, &demo_store()).unwrap();
        assert!(written);

        let xml = std::fs::read_to_string(dir.path().join("sitemap.xml")).unwrap();
        assert_eq!(xml.matches("<url>").count(), 4);
    }
}
