//! Snapshot head rewriting.
//!
//! Merges a synthesized `PageMeta` into a rendered snapshot without touching
//! the body the browser produced. All edits are scoped text substitutions
//! anchored to head tags, and the whole pass is idempotent:
//!
//! - exactly one `<title>` in the output, replaced or inserted
//! - description/keywords/author/robots metas and the canonical link are
//!   replaced in place or inserted before `</head>`
//! - every existing `og:*`/`twitter:*` meta is removed before the full
//!   synthesized set is inserted, so stale tags never accumulate
//! - a JSON-LD block is inserted per descriptor unless a block with the same
//!   `@type` is already present (coarse check; two payload descriptors
//!   sharing a `@type` under-insert - known limitation)

use regex::Regex;
use std::sync::OnceLock;

use crate::seo::PageMeta;
use crate::utils::html::{escape, escape_attr};

macro_rules! head_regex {
    ($name:ident, $pattern:expr) => {
        fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| Regex::new($pattern).unwrap())
        }
    };
}

head_regex!(title_re, r"(?s)<title[^>]*>.*?</title>");
head_regex!(description_re, r#"<meta\s+name=["']description["'][^>]*>"#);
head_regex!(keywords_re, r#"<meta\s+name=["']keywords["'][^>]*>"#);
head_regex!(author_re, r#"<meta\s+name=["']author["'][^>]*>"#);
head_regex!(robots_re, r#"<meta\s+name=["']robots["'][^>]*>"#);
head_regex!(canonical_re, r#"<link\s+rel=["']canonical["'][^>]*>"#);
head_regex!(og_re, r#"<meta\s+property=["']og:[^>]*>\s*"#);
head_regex!(twitter_re, r#"<meta\s+name=["']twitter:[^>]*>\s*"#);

/// Rewrite a snapshot's head with the synthesized metadata.
pub fn rewrite(html: &str, meta: &PageMeta) -> String {
    let mut html = html.to_string();

    replace_title(&mut html, meta);
    replace_or_insert(
        &mut html,
        description_re(),
        &format!(
            r#"<meta name="description" content="{}" />"#,
            escape_attr(&meta.description)
        ),
    );
    replace_or_insert(
        &mut html,
        keywords_re(),
        &format!(
            r#"<meta name="keywords" content="{}" />"#,
            escape_attr(&meta.keywords)
        ),
    );
    replace_or_insert(
        &mut html,
        author_re(),
        &format!(
            r#"<meta name="author" content="{}" />"#,
            escape_attr(&meta.author)
        ),
    );
    replace_or_insert(
        &mut html,
        robots_re(),
        r#"<meta name="robots" content="index, follow" />"#,
    );
    replace_or_insert(
        &mut html,
        canonical_re(),
        &format!(
            r#"<link rel="canonical" href="{}" />"#,
            escape_attr(&meta.canonical_url)
        ),
    );

    replace_social_tags(&mut html, meta);
    insert_structured_data(&mut html, meta);

    html
}

/// Replace the first `<title>` (removing any extras), or insert one.
fn replace_title(html: &mut String, meta: &PageMeta) {
    let tag = format!("<title>{}</title>", escape(&meta.title));

    if title_re().is_match(html) {
        let mut seen = false;
        let replaced = title_re()
            .replace_all(html, |_: &regex::Captures| {
                if seen {
                    String::new()
                } else {
                    seen = true;
                    tag.clone()
                }
            })
            .into_owned();
        *html = replaced;
    } else {
        insert_in_head(html, &tag);
    }
}

/// Replace the first match of `re` with `tag`, or insert `tag` before the
/// closing head marker.
fn replace_or_insert(html: &mut String, re: &Regex, tag: &str) {
    if re.is_match(html) {
        // NoExpand: tag text is literal, `$` in content is not a capture ref
        let replaced = re.replace(html, regex::NoExpand(tag)).into_owned();
        *html = replaced;
    } else {
        insert_in_head(html, tag);
    }
}

/// Purge every OG/Twitter meta, then insert the full synthesized set.
fn replace_social_tags(html: &mut String, meta: &PageMeta) {
    let purged = og_re().replace_all(html, "").into_owned();
    *html = purged;
    let purged = twitter_re().replace_all(html, "").into_owned();
    *html = purged;

    let title = escape_attr(&meta.title);
    let description = escape_attr(&meta.description);
    let image = escape_attr(&meta.og_image);
    let url = escape_attr(&meta.canonical_url);

    let mut tags = vec![
        format!(r#"<meta property="og:title" content="{title}" />"#),
        format!(r#"<meta property="og:description" content="{description}" />"#),
        format!(r#"<meta property="og:type" content="{}" />"#, meta.og_type),
        format!(r#"<meta property="og:url" content="{url}" />"#),
        format!(r#"<meta property="og:image" content="{image}" />"#),
        r#"<meta property="og:image:width" content="1200" />"#.to_string(),
        r#"<meta property="og:image:height" content="630" />"#.to_string(),
        format!(r#"<meta property="og:image:alt" content="{title}" />"#),
        format!(
            r#"<meta property="og:site_name" content="{}" />"#,
            escape_attr(&meta.site_name)
        ),
        format!(r#"<meta property="og:locale" content="{}" />"#, escape_attr(&meta.locale)),
        r#"<meta name="twitter:card" content="summary_large_image" />"#.to_string(),
        format!(r#"<meta name="twitter:title" content="{title}" />"#),
        format!(r#"<meta name="twitter:description" content="{description}" />"#),
        format!(r#"<meta name="twitter:image" content="{image}" />"#),
    ];
    if !meta.twitter_creator.is_empty() {
        tags.push(format!(
            r#"<meta name="twitter:creator" content="{}" />"#,
            escape_attr(&meta.twitter_creator)
        ));
    }

    insert_in_head(html, &tags.join("\n    "));
}

/// Insert one JSON-LD block per descriptor, unless a block with the same
/// `@type` already exists in the document.
fn insert_structured_data(html: &mut String, meta: &PageMeta) {
    for descriptor in &meta.structured_data {
        let Some(type_name) = descriptor.get("@type").and_then(|v| v.as_str()) else {
            continue;
        };
        // Coarse guard: matches the marker of both pre-existing blocks and
        // blocks inserted earlier in this loop
        let marker = format!("\"@type\": \"{type_name}\"");
        if html.contains(&marker) {
            continue;
        }

        let Ok(json) = serde_json::to_string_pretty(descriptor) else {
            continue;
        };
        let block = format!("<script type=\"application/ld+json\">\n{json}\n    </script>");
        insert_in_head(html, &block);
    }
}

/// Insert a fragment before the closing head marker.
///
/// Falls back to `</html>` (or plain append) on markup without a head,
/// so a degenerate snapshot still carries its metadata.
fn insert_in_head(html: &mut String, fragment: &str) {
    let insertion = format!("    {fragment}\n    ");
    if let Some(idx) = html.find("</head>") {
        html.insert_str(idx, &insertion);
    } else if let Some(idx) = html.find("</html>") {
        html.insert_str(idx, &insertion);
    } else {
        html.push_str(&insertion);
    }
}
