//! Replay command

use crate::script::{ScriptFile, ScriptSession, Step};
use anyhow::{bail, Context, Result};
use perch_core::{AnchorId, NodeId, Pose, ScreenPoint, Vec3};
use perch_placement::{ArSession, PlacementConfig, PlacementMode, PlacementSource, SessionEvent};
use perch_scene::TemplateCatalog;
use perch_tracking::SimulatedSession;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

pub struct ReplayArgs {
    pub script: String,
    pub config: Option<String>,
    pub format: String,
}

pub fn run(args: ReplayArgs) -> Result<()> {
    let script_path = Path::new(&args.script);
    let script = ScriptFile::load(script_path)?;

    let config = match &args.config {
        Some(path) => PlacementConfig::load_from_file(Path::new(path))
            .with_context(|| format!("Failed to load config {}", path))?,
        None => PlacementConfig::load().context("Failed to load placement config")?,
    };

    // Catalog paths in a script are relative to the script itself
    let catalog = match &script.session.catalog {
        Some(relative) => {
            let base = script_path.parent().unwrap_or_else(|| Path::new("."));
            let path = base.join(relative);
            TemplateCatalog::load_from_file(&path)
                .with_context(|| format!("Failed to load catalog {}", path.display()))?
        }
        None => TemplateCatalog::builtin(),
    };

    let mut replay = Replay::new(&script.session, config, catalog);
    replay.run_steps(&script.steps)?;
    let report = replay.report();

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "text" => print_text(script.session.name.as_deref().unwrap_or(&args.script), &report),
        other => bail!("Unknown format: {}", other),
    }

    Ok(())
}

/// Final state of a replayed session
#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub steps: usize,
    pub mode: PlacementMode,
    pub objects: Vec<ObjectReport>,
    pub overlays: usize,
    pub overlays_visible: bool,
    pub anchors: BTreeMap<String, AnchorId>,
    pub events: Vec<SessionEvent>,
}

#[derive(Debug, Serialize)]
pub struct ObjectReport {
    pub node: NodeId,
    pub template: String,
    pub source: PlacementSource,
    pub position: Vec3,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
}

/// Drives an `ArSession` over a simulated tracker, one script step at a time
pub struct Replay {
    session: ArSession<SimulatedSession>,
    catalog: TemplateCatalog,
    anchors: HashMap<String, AnchorId>,
    events: Vec<SessionEvent>,
    steps: usize,
}

impl Replay {
    pub fn new(settings: &ScriptSession, config: PlacementConfig, catalog: TemplateCatalog) -> Self {
        let tracking = SimulatedSession::new(settings.viewport.unwrap_or_default());
        let mut session = ArSession::new(tracking, config);
        let events = session.drain_events();
        Self {
            session,
            catalog,
            anchors: HashMap::new(),
            events,
            steps: 0,
        }
    }

    pub fn session(&self) -> &ArSession<SimulatedSession> {
        &self.session
    }

    pub fn run_steps(&mut self, steps: &[Step]) -> Result<()> {
        for (i, step) in steps.iter().enumerate() {
            self.apply(step)
                .with_context(|| format!("Step {} ({:?}) failed", i + 1, step))?;
        }
        Ok(())
    }

    /// Apply one step, then deliver whatever anchor events it produced
    pub fn apply(&mut self, step: &Step) -> Result<()> {
        log::debug!("Step {}: {:?}", self.steps + 1, step);

        match step {
            Step::Camera {
                position,
                yaw,
                pitch,
            } => {
                let pose = Pose::from_yaw_pitch(Vec3::from_array(*position), *yaw, *pitch);
                self.session.tracking_mut().set_camera_pose(pose);
            }
            Step::LoseTracking => self.session.tracking_mut().lose_tracking(),
            Step::DetectPlane {
                anchor,
                position,
                center,
                extent,
            } => {
                self.ensure_unused(anchor)?;
                let pose = Pose::from_position(Vec3::from_array(*position));
                match self
                    .session
                    .tracking_mut()
                    .detect_plane(pose, Vec3::from_array(*center), *extent)
                {
                    Some(id) => {
                        self.anchors.insert(anchor.clone(), id);
                    }
                    None => log::warn!("Plane '{}' not detected: surface detection is off", anchor),
                }
            }
            Step::RefinePlane {
                anchor,
                center,
                extent,
            } => {
                let id = self.anchor(anchor)?;
                if !self
                    .session
                    .tracking_mut()
                    .refine_plane(id, Vec3::from_array(*center), *extent)
                {
                    bail!("Anchor '{}' is not a plane", anchor);
                }
            }
            Step::DetectImage {
                anchor,
                target,
                position,
            } => {
                self.ensure_unused(anchor)?;
                let pose = Pose::from_position(Vec3::from_array(*position));
                match self.session.tracking_mut().detect_image(target, pose) {
                    Some(id) => {
                        self.anchors.insert(anchor.clone(), id);
                    }
                    None => log::warn!(
                        "Image '{}' not recognized: '{}' is not an active target",
                        anchor,
                        target
                    ),
                }
            }
            Step::RemoveAnchor { anchor } => {
                let id = self.anchor(anchor)?;
                self.anchors.remove(anchor);
                self.session.tracking_mut().remove_anchor(id);
            }
            Step::Select { template } => {
                let selected = match template {
                    Some(name) => Some(self.catalog.require(name)?),
                    None => None,
                };
                self.session.select_template(selected);
            }
            Step::Mode { mode } => {
                self.session.set_mode(*mode);
            }
            Step::Press { x, y } => {
                self.session.on_interaction_start(ScreenPoint::new(*x, *y));
            }
            Step::Drag { x, y } => {
                self.session.on_interaction_move(ScreenPoint::new(*x, *y));
            }
            Step::Release => self.session.on_interaction_end(),
            Step::Stroke { from, to, samples } => self.stroke(*from, *to, *samples),
            Step::Overlays { visible } => self.session.set_overlay_visibility(*visible),
            Step::Undo => {
                if self.session.undo_last_object().is_none() {
                    log::info!("Nothing to undo");
                }
            }
            Step::Reset => self.session.reset_scene(),
        }

        self.session.pump_tracking();
        self.events.extend(self.session.drain_events());
        self.steps += 1;
        Ok(())
    }

    fn stroke(&mut self, from: [f32; 2], to: [f32; 2], samples: u32) {
        self.session
            .on_interaction_start(ScreenPoint::new(from[0], from[1]));
        for i in 1..=samples {
            let t = i as f32 / samples as f32;
            let point = ScreenPoint::new(
                from[0] + (to[0] - from[0]) * t,
                from[1] + (to[1] - from[1]) * t,
            );
            self.session.on_interaction_move(point);
        }
        self.session.on_interaction_end();
    }

    fn anchor(&self, name: &str) -> Result<AnchorId> {
        self.anchors
            .get(name)
            .copied()
            .with_context(|| format!("Unknown anchor '{}'", name))
    }

    fn ensure_unused(&self, name: &str) -> Result<()> {
        if self.anchors.contains_key(name) {
            bail!("Anchor '{}' is already defined", name);
        }
        Ok(())
    }

    pub fn report(&self) -> ReplayReport {
        let names: HashMap<AnchorId, &String> =
            self.anchors.iter().map(|(name, id)| (*id, name)).collect();
        let scene = self.session.scene();

        let objects = self
            .session
            .placed()
            .iter()
            .map(|object| ObjectReport {
                node: object.node,
                template: object.template.clone(),
                source: object.source,
                position: scene.world_position(object.node).unwrap_or(Vec3::ZERO),
                anchor: object
                    .anchor
                    .and_then(|id| names.get(&id).map(|name| name.to_string())),
            })
            .collect();

        ReplayReport {
            steps: self.steps,
            mode: self.session.mode(),
            objects,
            overlays: self.session.overlay_count(),
            overlays_visible: self.session.overlays_visible(),
            anchors: self
                .anchors
                .iter()
                .map(|(name, id)| (name.clone(), *id))
                .collect(),
            events: self.events.clone(),
        }
    }
}

fn print_text(title: &str, report: &ReplayReport) {
    println!("Session: {}", title);
    println!("  Steps: {}", report.steps);
    println!("  Mode: {}", report.mode);
    println!(
        "  Overlays: {} ({})",
        report.overlays,
        if report.overlays_visible { "visible" } else { "hidden" }
    );
    println!("  Anchors: {}", report.anchors.len());
    println!("  Events: {}", report.events.len());

    if report.objects.is_empty() {
        println!("  No objects placed");
        return;
    }

    println!("  Objects ({}):", report.objects.len());
    for object in &report.objects {
        let p = object.position;
        let attached = match &object.anchor {
            Some(name) => format!(" on '{}'", name),
            None => String::new(),
        };
        println!(
            "    {} {} [{:?}] at ({:.3}, {:.3}, {:.3}){}",
            object.node, object.template, object.source, p.x, p.y, p.z, attached
        );
    }
}
