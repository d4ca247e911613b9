//! Session script format
//!
//! A script is a TOML file with an optional `[session]` table and a list of
//! `[[step]]` tables, each tagged by `action`. Anchors are referred to by
//! script-local names.

use anyhow::{Context, Result};
use perch_placement::PlacementMode;
use perch_tracking::Viewport;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScriptFile {
    #[serde(default)]
    pub session: ScriptSession,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScriptSession {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub viewport: Option<Viewport>,
    /// Template catalog, relative to the script's directory
    #[serde(default)]
    pub catalog: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Report a tracked camera frame
    Camera {
        position: [f32; 3],
        #[serde(default)]
        yaw: f32,
        #[serde(default)]
        pitch: f32,
    },
    LoseTracking,
    DetectPlane {
        anchor: String,
        position: [f32; 3],
        #[serde(default)]
        center: [f32; 3],
        extent: [f32; 2],
    },
    RefinePlane {
        anchor: String,
        #[serde(default)]
        center: [f32; 3],
        extent: [f32; 2],
    },
    DetectImage {
        anchor: String,
        target: String,
        position: [f32; 3],
    },
    RemoveAnchor {
        anchor: String,
    },
    /// Select a template by name, or clear the selection
    Select {
        #[serde(default)]
        template: Option<String>,
    },
    Mode {
        mode: PlacementMode,
    },
    Press {
        x: f32,
        y: f32,
    },
    Drag {
        x: f32,
        y: f32,
    },
    Release,
    /// Press at `from`, drag to `to` in evenly spaced samples, release
    Stroke {
        from: [f32; 2],
        to: [f32; 2],
        #[serde(default = "default_samples")]
        samples: u32,
    },
    Overlays {
        visible: bool,
    },
    Undo,
    Reset,
}

fn default_samples() -> u32 {
    10
}

impl ScriptFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse script {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
