//! Route enumeration - the set of pages to pre-render.
//!
//! Routes are derived from the content store in a fixed order (home, blog
//! index, projects in store order, posts in store order) so repeated builds
//! produce stable output and stable diffs.

use std::path::PathBuf;

use crate::content::ContentStore;

/// Which metadata rules apply to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Home,
    BlogIndex,
    Project,
    Post,
}

impl RouteKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::BlogIndex => "blog-index",
            Self::Project => "project",
            Self::Post => "post",
        }
    }
}

/// One page to pre-render.
///
/// # Example
///
/// ```text
/// Route { path: "/projects/demo", kind: Project, entity: Some("demo") }
///   output_file():  projects/demo/index.html
///   encoded_path(): /projects/demo
/// ```
#[derive(Debug, Clone)]
pub struct Route {
    /// URL path, decoded, always starting with `/`, no trailing slash
    /// (except root itself).
    path: String,
    kind: RouteKind,
    /// Project id or blog slug; absent for home/blog index.
    entity: Option<String>,
}

impl Route {
    pub fn home() -> Self {
        Self {
            path: "/".into(),
            kind: RouteKind::Home,
            entity: None,
        }
    }

    pub fn blog_index() -> Self {
        Self {
            path: "/blog".into(),
            kind: RouteKind::BlogIndex,
            entity: None,
        }
    }

    pub fn project(id: &str) -> Self {
        Self {
            path: format!("/projects/{id}"),
            kind: RouteKind::Project,
            entity: Some(id.to_string()),
        }
    }

    pub fn post(slug: &str) -> Self {
        Self {
            path: format!("/blog/{slug}"),
            kind: RouteKind::Post,
            entity: Some(slug.to_string()),
        }
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[inline]
    pub fn kind(&self) -> RouteKind {
        self.kind
    }

    #[inline]
    pub fn entity_ref(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    /// Relative output file for the rendered snapshot.
    ///
    /// Root maps to `index.html`; nested paths to `<segments>/index.html`.
    pub fn output_file(&self) -> PathBuf {
        let trimmed = self.path.trim_matches('/');
        if trimmed.is_empty() {
            PathBuf::from("index.html")
        } else {
            PathBuf::from(trimmed).join("index.html")
        }
    }

    /// Percent-encode the path for browser navigation.
    ///
    /// Internal representation stays decoded; encoding happens only at the
    /// browser boundary.
    pub fn encoded_path(&self) -> String {
        use percent_encoding::{CONTROLS, utf8_percent_encode};

        /// Characters that must not appear raw in a URL path segment.
        const SEGMENT: &percent_encoding::AsciiSet = &CONTROLS
            .add(b' ')
            .add(b'"')
            .add(b'<')
            .add(b'>')
            .add(b'`')
            .add(b'?')
            .add(b'#')
            .add(b'%');

        self.path
            .split('/')
            .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Enumerate every pre-renderable route from the content store.
///
/// Deterministic: same store, same sequence, same order.
pub fn enumerate(store: &ContentStore) -> Vec<Route> {
    let mut routes = Vec::with_capacity(2 + store.projects.len() + store.posts.len());
    routes.push(Route::home());
    routes.push(Route::blog_index());
    routes.extend(store.projects.iter().map(|p| Route::project(&p.id)));
    routes.extend(store.posts.iter().map(|p| Route::post(&p.slug)));
    routes
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    fn store(projects: &[&str], posts: &[&str]) -> ContentStore {
        let projects_json = serde_json::to_string(
            &projects
                .iter()
                .map(|id| serde_json::json!({"id": id}))
                .collect::<Vec<_>>(),
        )
        .unwrap();
        let posts_json = serde_json::to_string(
            &posts
                .iter()
                .map(|slug| serde_json::json!({"slug": slug}))
                .collect::<Vec<_>>(),
        )
        .unwrap();
        ContentStore::from_documents(&projects_json, &posts_json).unwrap()
    }

    #[test]
    fn test_enumerate_order_and_count() {
        let store = store(&["demo"], &["hello"]);
        let routes = enumerate(&store);

        let paths: Vec<_> = routes.iter().map(Route::path).collect();
        assert_eq!(paths, vec!["/", "/blog", "/projects/demo", "/blog/hello"]);
    }

    #[test]
    fn test_enumerate_count_is_2_plus_n_plus_m() {
        let store = store(&["a", "b", "c"], &["x", "y"]);
        let routes = enumerate(&store);
        assert_eq!(routes.len(), 2 + 3 + 2);
    }

    #[test]
    fn test_no_duplicate_output_files() {
        let store = store(&["a", "b", "c"], &["x", "y", "z"]);
        let routes = enumerate(&store);

        let outputs: FxHashSet<_> = routes.iter().map(Route::output_file).collect();
        assert_eq!(outputs.len(), routes.len());
    }

    #[test]
    fn test_enumerate_is_deterministic() {
        let store = store(&["a", "b"], &["x"]);
        let first: Vec<_> = enumerate(&store).iter().map(|r| r.path().to_string()).collect();
        let second: Vec<_> = enumerate(&store).iter().map(|r| r.path().to_string()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_output_file_derivation() {
        assert_eq!(Route::home().output_file(), PathBuf::from("index.html"));
        assert_eq!(
            Route::blog_index().output_file(),
            PathBuf::from("blog/index.html")
        );
        assert_eq!(
            Route::project("demo").output_file(),
            PathBuf::from("projects/demo/index.html")
        );
        assert_eq!(
            Route::post("hello").output_file(),
            PathBuf::from("blog/hello/index.html")
        );
    }

    #[test]
    fn test_encoded_path() {
        assert_eq!(Route::project("demo").encoded_path(), "/projects/demo");
        assert_eq!(
            Route::post("hello world").encoded_path(),
            "/blog/hello%20world"
        );
        assert_eq!(Route::post("50%").encoded_path(), "/blog/50%25");
    }

    #[test]
    fn test_kind_and_entity_ref() {
        assert_eq!(Route::home().kind(), RouteKind::Home);
        assert!(Route::home().entity_ref().is_none());
        assert_eq!(Route::project("demo").entity_ref(), Some("demo"));
        assert_eq!(Route::post("hello").kind(), RouteKind::Post);
    }
}
