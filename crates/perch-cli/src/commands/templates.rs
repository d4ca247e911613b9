//! Template listing command

use anyhow::{Context, Result};
use perch_scene::TemplateCatalog;

pub fn run(catalog_path: Option<&str>) -> Result<()> {
    let catalog = match catalog_path {
        Some(path) => TemplateCatalog::load_from_file(path)
            .with_context(|| format!("Failed to load catalog {}", path))?,
        None => TemplateCatalog::builtin(),
    };

    if catalog.is_empty() {
        println!("No templates found");
        return Ok(());
    }

    println!("Templates:");
    for name in catalog.names() {
        let count = catalog
            .get(name)
            .map(|t| t.instantiate().node_count())
            .unwrap_or(0);
        println!("  {} ({} nodes)", name, count);
    }

    Ok(())
}
