//! Derived-output generators.
//!
//! Generates auxiliary files from the content store:
//!
//! - **Sitemap**: search engine indexing (`sitemap.xml`)
//! - **Robots**: crawler policy (`robots.txt`)
//!
//! Both are pure functions of the content store, base URL, and current
//! date - they do not depend on the snapshot phase succeeding.

pub mod robots;
pub mod sitemap;
