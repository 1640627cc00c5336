//! Content store: the two JSON documents driving the pipeline.
//!
//! Loaded fresh on every build; entity order in the documents is preserved
//! because route enumeration and sitemap output must be deterministic.

use anyhow::{Context, Result, bail};
use rustc_hash::FxHashMap;
use std::fs;

use crate::config::SiteConfig;
use crate::route::{Route, RouteKind};

use super::{BlogPost, Project};

/// In-memory view of the projects and blog documents.
#[derive(Debug)]
pub struct ContentStore {
    pub projects: Vec<Project>,
    pub posts: Vec<BlogPost>,
    project_index: FxHashMap<String, usize>,
    post_index: FxHashMap<String, usize>,
}

/// A resolved content entity behind a route's entity reference.
#[derive(Debug, Clone, Copy)]
pub enum Entity<'a> {
    Project(&'a Project),
    Post(&'a BlogPost),
}

impl ContentStore {
    /// Load both documents from the configured paths.
    pub fn load(config: &SiteConfig) -> Result<Self> {
        let projects = fs::read_to_string(&config.build.projects).with_context(|| {
            format!(
                "Failed to read projects data from {}",
                config.build.projects.display()
            )
        })?;
        let posts = fs::read_to_string(&config.build.posts).with_context(|| {
            format!(
                "Failed to read blog data from {}",
                config.build.posts.display()
            )
        })?;
        Self::from_documents(&projects, &posts)
    }

    /// Parse both documents and build lookup indexes.
    ///
    /// Duplicate ids/slugs are an input-data error: routes and sitemap
    /// entries are keyed on them, so a duplicate is reported rather than
    /// silently resolved to one of the records.
    pub fn from_documents(projects_json: &str, posts_json: &str) -> Result<Self> {
        let projects: Vec<Project> =
            serde_json::from_str(projects_json).context("Failed to parse projects JSON")?;
        let posts: Vec<BlogPost> =
            serde_json::from_str(posts_json).context("Failed to parse blog JSON")?;

        let mut project_index = FxHashMap::default();
        for (i, project) in projects.iter().enumerate() {
            if project.id.is_empty() {
                bail!("project at index {i} has an empty id");
            }
            if project_index.insert(project.id.clone(), i).is_some() {
                bail!("duplicate project id `{}` in projects data", project.id);
            }
        }

        let mut post_index = FxHashMap::default();
        for (i, post) in posts.iter().enumerate() {
            if post.slug.is_empty() {
                bail!("blog post at index {i} has an empty slug");
            }
            if post_index.insert(post.slug.clone(), i).is_some() {
                bail!("duplicate blog post slug `{}` in blog data", post.slug);
            }
        }

        Ok(Self {
            projects,
            posts,
            project_index,
            post_index,
        })
    }

    /// Look up a project by id.
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.project_index.get(id).map(|&i| &self.projects[i])
    }

    /// Look up a blog post by slug.
    pub fn post(&self, slug: &str) -> Option<&BlogPost> {
        self.post_index.get(slug).map(|&i| &self.posts[i])
    }

    /// Resolve the content entity a route refers to.
    ///
    /// Returns `None` for routes without an entity reference (home, blog
    /// index) and for references that do not resolve - the caller degrades
    /// to a fallback payload, never an error.
    pub fn entity_for(&self, route: &Route) -> Option<Entity<'_>> {
        let entity_ref = route.entity_ref()?;
        match route.kind() {
            RouteKind::Project => self.project(entity_ref).map(Entity::Project),
            RouteKind::Post => self.post(entity_ref).map(Entity::Post),
            RouteKind::Home | RouteKind::BlogIndex => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_store() -> ContentStore {
        ContentStore::from_documents(
            r#"[{"id": "demo", "title": "Demo", "tier": "tier1", "dateCreated": "2024-01-01"}]"#,
            r#"[{"slug": "hello", "title": "Hello", "date": "2024-02-01"}]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_load_and_lookup() {
        let store = demo_store();
        assert_eq!(store.projects.len(), 1);
        assert_eq!(store.posts.len(), 1);
        assert_eq!(store.project("demo").unwrap().title, "Demo");
        assert_eq!(store.post("hello").unwrap().title, "Hello");
        assert!(store.project("missing").is_none());
        assert!(store.post("missing").is_none());
    }

    #[test]
    fn test_duplicate_project_id_is_error() {
        let result = ContentStore::from_documents(
            r#"[{"id": "a"}, {"id": "a"}]"#,
            "[]",
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("duplicate project id"));
    }

    #[test]
    fn test_duplicate_post_slug_is_error() {
        let result = ContentStore::from_documents(
            "[]",
            r#"[{"slug": "x"}, {"slug": "x"}]"#,
        );
        assert!(result.unwrap_err().to_string().contains("duplicate blog post slug"));
    }

    #[test]
    fn test_empty_id_is_error() {
        let result = ContentStore::from_documents(r#"[{"title": "untitled"}]"#, "[]");
        assert!(result.unwrap_err().to_string().contains("empty id"));
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(ContentStore::from_documents("{not json", "[]").is_err());
        assert!(ContentStore::from_documents("[]", "nope").is_err());
    }

    #[test]
    fn test_entity_resolution() {
        let store = demo_store();

        let route = Route::project("demo");
        assert!(matches!(
            store.entity_for(&route),
            Some(Entity::Project(p)) if p.id == "demo"
        ));

        let route = Route::post("hello");
        assert!(matches!(
            store.entity_for(&route),
            Some(Entity::Post(p)) if p.slug == "hello"
        ));

        // Unresolvable reference degrades to None
        let route = Route::project("ghost");
        assert!(store.entity_for(&route).is_none());

        // Routes without references resolve to None
        assert!(store.entity_for(&Route::home()).is_none());
        assert!(store.entity_for(&Route::blog_index()).is_none());
    }
}
