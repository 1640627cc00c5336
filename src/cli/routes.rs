//! `presite routes` - print the enumerated route set.

use anyhow::Result;

use crate::config::SiteConfig;
use crate::content::ContentStore;
use crate::route;

pub fn run_routes(config: &SiteConfig, json: bool) -> Result<()> {
    let store = ContentStore::load(config)?;
    let routes = route::enumerate(&store);

    if json {
        let entries: Vec<_> = routes
            .iter()
            .map(|r| {
                serde_json::json!({
                    "path": r.path(),
                    "kind": r.kind().as_str(),
                    "output": r.output_file(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for r in &routes {
            println!("{}", r.path());
        }
    }
    Ok(())
}
