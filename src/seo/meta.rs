//! Metadata synthesis - one `PageMeta` payload per route.
//!
//! `synthesize` is a pure function of its inputs: no I/O, no mutation, and
//! identical inputs produce byte-identical payloads (JSON-LD key order is
//! stable). A route whose entity reference fails to resolve degrades to a
//! minimal payload instead of failing the build.

use crate::config::SiteSectionConfig;
use crate::content::{BlogPost, ContentStore, Entity, Project};
use crate::route::{Route, RouteKind};

use super::schema;

/// Maximum characters of problem statement folded into a description.
const PROBLEM_STATEMENT_CUT: usize = 100;

/// Synthesized SEO payload for one route.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    /// Comma-joined keyword list (may be empty).
    pub keywords: String,
    /// Absolute canonical URL of the page.
    pub canonical_url: String,
    /// Absolute URL of the social-sharing image.
    pub og_image: String,
    /// Open Graph object type (`article` for blog posts, else `website`).
    pub og_type: &'static str,
    /// Site owner, for the author meta tag.
    pub author: String,
    /// `og:site_name` value.
    pub site_name: String,
    /// `og:locale` value (underscore form, e.g. `en_US`).
    pub locale: String,
    /// `twitter:creator` handle; empty when unconfigured.
    pub twitter_creator: String,
    /// JSON-LD descriptors, in insertion order.
    pub structured_data: Vec<serde_json::Value>,
}

/// Shared head fields derived from site config.
fn site_fields(info: &crate::config::SiteInfoConfig) -> (String, String, String, String) {
    (
        info.author.clone(),
        format!("{} Portfolio", info.author),
        info.language.replace('-', "_"),
        info.twitter.clone(),
    )
}

/// Synthesize the metadata payload for a route.
///
/// `entity` is the resolved content entity, or `None` for routes without
/// one (home, blog index) and for dangling references.
pub fn synthesize(
    site: &SiteSectionConfig,
    store: &ContentStore,
    route: &Route,
    entity: Option<Entity<'_>>,
) -> PageMeta {
    let info = &site.info;
    let canonical = format!("{}{}", info.base_url(), route.path());

    match (route.kind(), entity) {
        (RouteKind::Home, _) => home_meta(site, canonical),
        (RouteKind::BlogIndex, _) => blog_index_meta(site, store, canonical),
        (RouteKind::Project, Some(Entity::Project(project))) => {
            project_meta(site, project, canonical)
        }
        (RouteKind::Post, Some(Entity::Post(post))) => post_meta(site, post, canonical),
        // Dangling or mismatched reference: minimal payload, never an error
        _ => fallback_meta(site, route, canonical),
    }
}

fn home_meta(site: &SiteSectionConfig, canonical: String) -> PageMeta {
    let info = &site.info;
    let title = format!("{} - {} | Portfolio", info.author, info.tagline);
    let (author, site_name, locale, twitter_creator) = site_fields(info);

    PageMeta {
        title,
        description: info.description.clone(),
        keywords: join_keywords(info.keywords.iter().map(String::as_str)),
        og_image: info.default_og_image(),
        og_type: "website",
        author,
        site_name,
        locale,
        twitter_creator,
        structured_data: vec![schema::profile_page(info), schema::web_site(info)],
        canonical_url: canonical,
    }
}

fn blog_index_meta(site: &SiteSectionConfig, store: &ContentStore, canonical: String) -> PageMeta {
    let info = &site.info;
    let blog = &site.blog;
    let base = info.base_url();
    let title = format!("{} | {} - Portfolio", blog.title, info.author);

    let structured_data = vec![
        schema::collection_page(info, &blog.title, &blog.description, &canonical, &store.posts),
        schema::breadcrumbs(&[("Home", base), ("Blog", canonical.as_str())]),
    ];

    let (author, site_name, locale, twitter_creator) = site_fields(info);
    PageMeta {
        title,
        description: blog.description.clone(),
        keywords: join_keywords(blog.keywords.iter().map(String::as_str)),
        og_image: info.default_og_image(),
        og_type: "website",
        author,
        site_name,
        locale,
        twitter_creator,
        structured_data,
        canonical_url: canonical,
    }
}

fn project_meta(site: &SiteSectionConfig, project: &Project, canonical: String) -> PageMeta {
    let info = &site.info;
    let base = info.base_url();
    let projects_anchor = format!("{base}/#projects");

    let keywords = join_keywords(
        std::iter::once(project.title.as_str())
            .chain(project.categories.iter().map(String::as_str))
            .chain(project.technologies.iter().map(String::as_str))
            .chain(["Portfolio", info.author.as_str()]),
    );

    let structured_data = vec![
        schema::software_application(info, project, &canonical),
        schema::breadcrumbs(&[
            ("Home", base),
            ("Projects", projects_anchor.as_str()),
            (project.title.as_str(), canonical.as_str()),
        ]),
    ];

    let (author, site_name, locale, twitter_creator) = site_fields(info);
    PageMeta {
        title: format!("{} | {} - Portfolio", project.title, info.author),
        description: project_description(project),
        keywords,
        og_image: info.default_og_image(),
        og_type: "website",
        author,
        site_name,
        locale,
        twitter_creator,
        structured_data,
        canonical_url: canonical,
    }
}

fn post_meta(site: &SiteSectionConfig, post: &BlogPost, canonical: String) -> PageMeta {
    let info = &site.info;
    let base = info.base_url();
    let blog_url = format!("{base}/blog");

    // First declared image wins; fall back to the site default
    let og_image = post
        .images
        .first()
        .map(|image| format!("{base}/images/{image}"))
        .unwrap_or_else(|| info.default_og_image());

    let keywords = join_keywords(
        post.tags
            .iter()
            .map(String::as_str)
            .chain([post.category.as_str(), "Technical Blog", info.author.as_str()]),
    );

    let structured_data = vec![
        schema::blog_posting(info, post, &canonical, &og_image),
        schema::breadcrumbs(&[
            ("Home", base),
            ("Blog", blog_url.as_str()),
            (post.title.as_str(), canonical.as_str()),
        ]),
    ];

    let (author, site_name, locale, twitter_creator) = site_fields(info);
    PageMeta {
        title: format!("{} | {} - Technical Blog", post.title, info.author),
        description: post.excerpt.clone(),
        keywords,
        og_image,
        og_type: "article",
        author,
        site_name,
        locale,
        twitter_creator,
        structured_data,
        canonical_url: canonical,
    }
}

/// Minimal payload for a route whose entity reference did not resolve.
fn fallback_meta(site: &SiteSectionConfig, route: &Route, canonical: String) -> PageMeta {
    let (author, site_name, locale, twitter_creator) = site_fields(&site.info);
    PageMeta {
        title: route.path().to_string(),
        description: String::new(),
        keywords: String::new(),
        og_image: site.info.default_og_image(),
        og_type: "website",
        author,
        site_name,
        locale,
        twitter_creator,
        structured_data: Vec::new(),
        canonical_url: canonical,
    }
}

/// Project description: entity description, first three technologies, and a
/// truncated problem statement.
fn project_description(project: &Project) -> String {
    let mut description = project.description.trim().to_string();

    if !project.technologies.is_empty() {
        let stack = project
            .technologies
            .iter()
            .take(3)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        if !description.is_empty() {
            description.push(' ');
        }
        description.push_str(&format!("Built with {stack}."));
    }

    if let Some(problem) = project.problem_statement.as_deref() {
        let problem = problem.trim();
        if !problem.is_empty() {
            if !description.is_empty() {
                description.push(' ');
            }
            description.push_str(&truncate_chars(problem, PROBLEM_STATEMENT_CUT));
        }
    }

    description
}

/// Cut a string at `max` characters, appending an ellipsis only when the cut
/// actually truncates. Operates on char boundaries.
fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

/// Join keyword fragments with ", ", skipping empty entries so sparse
/// records never produce dangling separators.
fn join_keywords<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BlogInfoConfig, SiteInfoConfig};

    fn site() -> SiteSectionConfig {
        SiteSectionConfig {
            info: SiteInfoConfig {
                author: "Jane Doe".into(),
                tagline: "Full Stack Engineer".into(),
                description: "Portfolio of Jane Doe".into(),
                keywords: vec!["Engineer".into(), "Portfolio".into()],
                url: Some("https://example.dev".into()),
                ..Default::default()
            },
            blog: BlogInfoConfig {
                title: "Technical Blog".into(),
                description: "Deep dives.".into(),
                keywords: vec!["Blog".into()],
            },
        }
    }

    fn store() -> ContentStore {
        ContentStore::from_documents(
            r#"[{
                "id": "demo",
                "title": "Demo App",
                "description": "A demo application.",
                "technologies": ["Rust", "React", "Postgres", "Redis"],
                "categories": ["Web"],
                "tier": "tier1",
                "dateCreated": "2024-01-01",
                "problemStatement": "Deployments were slow."
            }]"#,
            r#"[{
                "slug": "hello",
                "title": "Hello World",
                "excerpt": "The first post.",
                "content": "one two three four five",
                "date": "2024-02-01",
                "author": "Jane Doe",
                "category": "Engineering",
                "tags": ["rust"],
                "readTime": "3 min read"
            }]"#,
        )
        .unwrap()
    }

    fn synthesize_route(route: &Route) -> PageMeta {
        let site = site();
        let store = store();
        let entity = store.entity_for(route);
        synthesize(&site, &store, route, entity)
    }

    #[test]
    fn test_synthesize_is_pure() {
        let site = site();
        let store = store();
        let route = Route::post("hello");
        let entity = store.entity_for(&route);

        let first = synthesize(&site, &store, &route, entity);
        let second = synthesize(&site, &store, &route, entity);

        assert_eq!(first, second);
        // Byte-identical serialization, structured data included
        assert_eq!(
            serde_json::to_string(&first.structured_data).unwrap(),
            serde_json::to_string(&second.structured_data).unwrap()
        );
    }

    #[test]
    fn test_home_meta() {
        let meta = synthesize_route(&Route::home());
        assert_eq!(meta.title, "Jane Doe - Full Stack Engineer | Portfolio");
        assert_eq!(meta.description, "Portfolio of Jane Doe");
        assert_eq!(meta.keywords, "Engineer, Portfolio");
        assert_eq!(meta.canonical_url, "https://example.dev/");
        assert_eq!(meta.og_type, "website");
        assert_eq!(meta.site_name, "Jane Doe Portfolio");
        assert_eq!(meta.locale, "en_US");
        assert_eq!(meta.structured_data.len(), 2);
        assert_eq!(meta.structured_data[0]["@type"], "ProfilePage");
        assert_eq!(meta.structured_data[1]["@type"], "WebSite");
    }

    #[test]
    fn test_blog_index_meta() {
        let meta = synthesize_route(&Route::blog_index());
        assert_eq!(meta.title, "Technical Blog | Jane Doe - Portfolio");
        assert_eq!(meta.canonical_url, "https://example.dev/blog");
        assert_eq!(meta.structured_data[0]["@type"], "CollectionPage");
        assert_eq!(meta.structured_data[0]["mainEntity"]["numberOfItems"], 1);
        assert_eq!(meta.structured_data[1]["@type"], "BreadcrumbList");
        // Breadcrumb trail: Home -> Blog
        let trail = &meta.structured_data[1]["itemListElement"];
        assert_eq!(trail[0]["name"], "Home");
        assert_eq!(trail[1]["name"], "Blog");
    }

    #[test]
    fn test_project_meta() {
        let meta = synthesize_route(&Route::project("demo"));
        assert_eq!(meta.title, "Demo App | Jane Doe - Portfolio");
        // First three technologies only
        assert_eq!(
            meta.description,
            "A demo application. Built with Rust, React, Postgres. Deployments were slow."
        );
        assert_eq!(
            meta.keywords,
            "Demo App, Web, Rust, React, Postgres, Redis, Portfolio, Jane Doe"
        );
        assert_eq!(meta.og_type, "website");
        assert_eq!(meta.structured_data[0]["@type"], "SoftwareApplication");
        // Breadcrumb trail: Home -> Projects -> entity
        let trail = &meta.structured_data[1]["itemListElement"];
        assert_eq!(trail[1]["name"], "Projects");
        assert_eq!(trail[2]["name"], "Demo App");
    }

    #[test]
    fn test_post_meta() {
        let meta = synthesize_route(&Route::post("hello"));
        assert_eq!(meta.title, "Hello World | Jane Doe - Technical Blog");
        assert_eq!(meta.description, "The first post.");
        assert_eq!(meta.keywords, "rust, Engineering, Technical Blog, Jane Doe");
        assert_eq!(meta.og_type, "article");
        // No images: default site image
        assert_eq!(meta.og_image, "https://example.dev/og-image.png");
        assert_eq!(meta.structured_data[0]["@type"], "BlogPosting");
        assert_eq!(meta.structured_data[0]["wordCount"], 5);
    }

    #[test]
    fn test_post_og_image_from_first_image() {
        let site = site();
        let store = ContentStore::from_documents(
            "[]",
            r#"[{"slug": "pics", "title": "Pics", "images": ["cover.png", "other.png"]}]"#,
        )
        .unwrap();
        let route = Route::post("pics");
        let meta = synthesize(&site, &store, &route, store.entity_for(&route));
        assert_eq!(meta.og_image, "https://example.dev/images/cover.png");
    }

    #[test]
    fn test_unresolved_entity_degrades_to_fallback() {
        let meta = synthesize_route(&Route::project("ghost"));
        assert_eq!(meta.title, "/projects/ghost");
        assert_eq!(meta.description, "");
        assert_eq!(meta.keywords, "");
        assert_eq!(meta.og_image, "https://example.dev/og-image.png");
        assert!(meta.structured_data.is_empty());
    }

    #[test]
    fn test_empty_collections_produce_clean_strings() {
        let site = site();
        let store = ContentStore::from_documents(
            r#"[{"id": "bare", "title": "Bare"}]"#,
            "[]",
        )
        .unwrap();
        let route = Route::project("bare");
        let meta = synthesize(&site, &store, &route, store.entity_for(&route));

        // No technologies, no problem statement: no dangling fragments
        assert_eq!(meta.description, "");
        assert_eq!(meta.keywords, "Bare, Portfolio, Jane Doe");
        assert!(!meta.keywords.contains("undefined"));
        assert!(!meta.description.contains("undefined"));
    }

    #[test]
    fn test_problem_statement_truncation() {
        let long = "x".repeat(150);
        let project = Project {
            problem_statement: Some(long),
            ..Default::default()
        };
        let description = project_description(&project);
        assert_eq!(description.chars().count(), 103); // 100 chars + "..."
        assert!(description.ends_with("..."));

        // Short statements are kept verbatim, no ellipsis
        let project = Project {
            problem_statement: Some("Short.".into()),
            ..Default::default()
        };
        assert_eq!(project_description(&project), "Short.");
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("héllo wörld", 100), "héllo wörld");
        let cut = truncate_chars(&"é".repeat(120), 100);
        assert_eq!(cut.chars().count(), 103);
    }
}
