//! Configuration section definitions.

mod build;
mod preview;
mod render;
mod site;

pub use build::{BuildSectionConfig, RobotsConfig, SitemapConfig};
pub use preview::PreviewConfig;
pub use render::RenderConfig;
pub use site::{AddressConfig, BlogInfoConfig, SiteInfoConfig, SiteSectionConfig};
