//! Template catalog loaded from TOML

use crate::node::Geometry;
use crate::template::{ModelTemplate, ObjectTemplate};
use perch_core::{Color, PerchError, Result, Vec3};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// On-disk layout: a list of `[[template]]` tables
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "template")]
    templates: Vec<ModelTemplate>,
}

/// Named collection of templates the user can pick from
#[derive(Default)]
pub struct TemplateCatalog {
    templates: BTreeMap<String, Arc<dyn ObjectTemplate>>,
}

impl TemplateCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// A small catalog of primitive shapes, usable without any files
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        let defaults = [
            ModelTemplate::new(
                "cup",
                Geometry::Box {
                    width: 0.08,
                    height: 0.1,
                    length: 0.08,
                },
            )
            .with_color(Color::WHITE)
            .with_pivot(Vec3::new(0.0, 0.05, 0.0)),
            ModelTemplate::new("ball", Geometry::Sphere { radius: 0.05 })
                .with_color(Color::from_hex(0xE04040))
                .with_pivot(Vec3::new(0.0, 0.05, 0.0)),
            ModelTemplate::new(
                "crate",
                Geometry::Box {
                    width: 0.2,
                    height: 0.2,
                    length: 0.2,
                },
            )
            .with_color(Color::from_hex(0xA0703C))
            .with_pivot(Vec3::new(0.0, 0.1, 0.0)),
        ];
        for template in defaults {
            // Names above are unique
            let _ = catalog.register(Arc::new(template));
        }
        catalog
    }

    /// Load templates from a catalog file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::load_str(&content).map_err(|e| {
            PerchError::ConfigError(format!("Failed to load catalog {}: {}", path.display(), e))
        })
    }

    /// Parse templates from TOML text
    pub fn load_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)?;
        let mut catalog = Self::new();
        for template in file.templates {
            catalog.register(Arc::new(template))?;
        }
        log::debug!("Loaded {} templates", catalog.len());
        Ok(catalog)
    }

    /// Register a template; names must be unique
    pub fn register(&mut self, template: Arc<dyn ObjectTemplate>) -> Result<()> {
        let name = template.name().to_string();
        if self.templates.contains_key(&name) {
            return Err(PerchError::DuplicateTemplate(name));
        }
        self.templates.insert(name, template);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ObjectTemplate>> {
        self.templates.get(name).cloned()
    }

    /// Look up a template, failing if it is unknown
    pub fn require(&self, name: &str) -> Result<Arc<dyn ObjectTemplate>> {
        self.get(name)
            .ok_or_else(|| PerchError::TemplateNotFound(name.to_string()))
    }

    /// Template names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.templates.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
