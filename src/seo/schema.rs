//! JSON-LD descriptor builders (schema.org).
//!
//! Each builder returns a `serde_json::Value` ready for embedding in a
//! `<script type="application/ld+json">` block. Key order is insertion
//! order (serde_json `preserve_order`), so identical inputs serialize to
//! byte-identical descriptors.

use serde_json::{Value, json};

use crate::config::SiteInfoConfig;
use crate::content::{BlogPost, Project};

const SCHEMA_CONTEXT: &str = "https://schema.org";

/// Person descriptor for the site owner.
fn person(site: &SiteInfoConfig) -> Value {
    let mut person = json!({
        "@type": "Person",
        "name": site.author,
        "jobTitle": site.tagline,
        "url": site.base_url(),
        "image": site.default_og_image(),
    });

    let obj = person.as_object_mut().unwrap();
    if !site.profiles.is_empty() {
        obj.insert("sameAs".into(), json!(site.profiles));
    }
    if !site.email.is_empty() {
        obj.insert("email".into(), json!(site.email));
    }
    if !site.address.is_empty() {
        obj.insert(
            "address".into(),
            json!({
                "@type": "PostalAddress",
                "addressLocality": site.address.locality,
                "addressRegion": site.address.region,
                "addressCountry": site.address.country,
            }),
        );
    }
    person
}

/// ProfilePage descriptor for the home route.
pub fn profile_page(site: &SiteInfoConfig) -> Value {
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "ProfilePage",
        "mainEntity": person(site),
    })
}

/// WebSite descriptor for the home route.
pub fn web_site(site: &SiteInfoConfig) -> Value {
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "WebSite",
        "name": format!("{} Portfolio", site.author),
        "url": site.base_url(),
        "description": site.description,
    })
}

/// CollectionPage descriptor for the blog index, listing every post in
/// store order with 1-based positions.
pub fn collection_page(
    site: &SiteInfoConfig,
    title: &str,
    description: &str,
    url: &str,
    posts: &[BlogPost],
) -> Value {
    let base = site.base_url();
    let items: Vec<Value> = posts
        .iter()
        .enumerate()
        .map(|(index, post)| {
            json!({
                "@type": "ListItem",
                "position": index + 1,
                "item": {
                    "@type": "BlogPosting",
                    "headline": post.title,
                    "url": format!("{base}/blog/{}", post.slug),
                    "datePublished": post.date,
                },
            })
        })
        .collect();

    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "CollectionPage",
        "name": title,
        "description": description,
        "url": url,
        "mainEntity": {
            "@type": "ItemList",
            "numberOfItems": posts.len(),
            "itemListElement": items,
        },
        "inLanguage": site.language,
    })
}

/// BreadcrumbList descriptor from (name, url) pairs, positions 1-based.
pub fn breadcrumbs(trail: &[(&str, &str)]) -> Value {
    let items: Vec<Value> = trail
        .iter()
        .enumerate()
        .map(|(index, (name, item))| {
            json!({
                "@type": "ListItem",
                "position": index + 1,
                "name": name,
                "item": item,
            })
        })
        .collect();

    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "BreadcrumbList",
        "itemListElement": items,
    })
}

/// SoftwareApplication descriptor for a project page.
pub fn software_application(site: &SiteInfoConfig, project: &Project, canonical: &str) -> Value {
    let base = site.base_url();

    // Prefer the live demo, then the repository, then the page itself.
    let url = project
        .links
        .demo
        .as_deref()
        .or(project.links.github.as_deref())
        .unwrap_or(canonical);

    let mut descriptor = json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "SoftwareApplication",
        "name": project.title,
        "description": project.description,
        "applicationCategory": "WebApplication",
        "operatingSystem": "Web",
        "offers": {
            "@type": "Offer",
            "price": "0",
            "priceCurrency": "USD",
        },
        "author": {
            "@type": "Person",
            "name": site.author,
            "url": base,
        },
        "datePublished": project.date_created,
        "url": url,
        "programmingLanguage": project.technologies,
        "keywords": project.categories.join(", "),
        "inLanguage": site.language,
    });

    let obj = descriptor.as_object_mut().unwrap();
    if let Some(updated) = &project.last_updated {
        obj.insert("dateModified".into(), json!(updated));
    }
    if let Some(repo) = &project.links.github {
        obj.insert("codeRepository".into(), json!(repo));
    }
    descriptor
}

/// BlogPosting descriptor for a blog post page.
pub fn blog_posting(
    site: &SiteInfoConfig,
    post: &BlogPost,
    canonical: &str,
    og_image: &str,
) -> Value {
    let base = site.base_url();

    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "BlogPosting",
        "headline": post.title,
        "description": post.excerpt,
        "image": og_image,
        "datePublished": post.date,
        "dateModified": post.date,
        "author": {
            "@type": "Person",
            "name": post.author,
            "url": base,
        },
        "publisher": {
            "@type": "Person",
            "name": site.author,
            "url": base,
        },
        "mainEntityOfPage": {
            "@type": "WebPage",
            "@id": canonical,
        },
        "articleSection": post.category,
        "keywords": post.tags.join(", "),
        "wordCount": post.word_count(),
        "timeRequired": post.read_time,
        "inLanguage": site.language,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteInfoConfig {
        SiteInfoConfig {
            author: "Jane Doe".into(),
            tagline: "Full Stack Engineer".into(),
            description: "Portfolio of Jane Doe".into(),
            url: Some("https://example.dev".into()),
            email: "jane@example.dev".into(),
            profiles: vec!["https://github.com/jane".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_profile_page_embeds_person() {
        let value = profile_page(&site());
        assert_eq!(value["@type"], "ProfilePage");
        assert_eq!(value["mainEntity"]["@type"], "Person");
        assert_eq!(value["mainEntity"]["name"], "Jane Doe");
        assert_eq!(value["mainEntity"]["sameAs"][0], "https://github.com/jane");
        // No address configured: descriptor omitted entirely
        assert!(value["mainEntity"].get("address").is_none());
    }

    #[test]
    fn test_web_site() {
        let value = web_site(&site());
        assert_eq!(value["@type"], "WebSite");
        assert_eq!(value["name"], "Jane Doe Portfolio");
        assert_eq!(value["url"], "https://example.dev");
    }

    #[test]
    fn test_collection_page_positions_are_one_based() {
        let posts = vec![
            BlogPost {
                slug: "first".into(),
                title: "First".into(),
                date: "2024-01-01".into(),
                ..Default::default()
            },
            BlogPost {
                slug: "second".into(),
                title: "Second".into(),
                date: "2024-02-01".into(),
                ..Default::default()
            },
        ];
        let value = collection_page(&site(), "Blog", "desc", "https://example.dev/blog", &posts);

        let list = &value["mainEntity"];
        assert_eq!(list["numberOfItems"], 2);
        assert_eq!(list["itemListElement"][0]["position"], 1);
        assert_eq!(list["itemListElement"][1]["position"], 2);
        assert_eq!(
            list["itemListElement"][1]["item"]["url"],
            "https://example.dev/blog/second"
        );
    }

    #[test]
    fn test_breadcrumbs() {
        let value = breadcrumbs(&[
            ("Home", "https://example.dev"),
            ("Blog", "https://example.dev/blog"),
        ]);
        assert_eq!(value["@type"], "BreadcrumbList");
        assert_eq!(value["itemListElement"][0]["name"], "Home");
        assert_eq!(value["itemListElement"][1]["position"], 2);
    }

    #[test]
    fn test_software_application_link_fallbacks() {
        let mut project = Project {
            id: "demo".into(),
            title: "Demo".into(),
            ..Default::default()
        };
        let canonical = "https://example.dev/projects/demo";

        // No links at all: falls back to the page itself
        let value = software_application(&site(), &project, canonical);
        assert_eq!(value["url"], canonical);
        assert!(value.get("codeRepository").is_none());
        assert!(value.get("dateModified").is_none());

        // Repo only
        project.links.github = Some("https://github.com/jane/demo".into());
        let value = software_application(&site(), &project, canonical);
        assert_eq!(value["url"], "https://github.com/jane/demo");
        assert_eq!(value["codeRepository"], "https://github.com/jane/demo");

        // Demo wins over repo
        project.links.demo = Some("https://demo.example.dev".into());
        let value = software_application(&site(), &project, canonical);
        assert_eq!(value["url"], "https://demo.example.dev");
    }

    #[test]
    fn test_blog_posting_word_count() {
        let post = BlogPost {
            slug: "hello".into(),
            title: "Hello".into(),
            content: "alpha beta gamma delta".into(),
            author: "Jane Doe".into(),
            ..Default::default()
        };
        let value = blog_posting(
            &site(),
            &post,
            "https://example.dev/blog/hello",
            "https://example.dev/og-image.png",
        );
        assert_eq!(value["wordCount"], 4);
        assert_eq!(value["mainEntityOfPage"]["@id"], "https://example.dev/blog/hello");
    }
}
