//! Scripted input sessions.
//!
//! A script seeds the editor with a configuration and a set of entities,
//! then feeds a list of steps through the mode host exactly as the input
//! layer would.

use mapedit_core::{
    ConfigError, Editor, EditorConfig, Entity, ModeError, ModeHost, ModeId, PointerEvent, Scene,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Step {step}: {source}")]
    Mode {
        step: usize,
        #[source]
        source: ModeError,
    },
    #[error("Startup failed: {0}")]
    Startup(ModeError),
}

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplayStep {
    /// Raw pointer input.
    Pointer(PointerEvent),
    /// Toolbar mode selection.
    SetMode { mode: ModeId },
    /// Palette material selection.
    SetMaterial { material: String },
    /// Focus moved to the UI.
    FocusLost,
}

/// A complete session script.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub config: EditorConfig,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub steps: Vec<ReplayStep>,
}

impl ReplayScript {
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// A running editor session driven by script steps.
pub struct Session {
    host: ModeHost,
    steps_applied: usize,
}

impl Session {
    /// Start a session from a script's configuration and entities.
    pub fn new(script: &ReplayScript) -> Result<Self, ReplayError> {
        script.config.validate()?;
        let scene: Scene = script.entities.iter().cloned().collect();
        let editor = Editor::from_config(&script.config).with_scene(scene);
        let host = ModeHost::with_editor(editor, &script.config.initial_mode)
            .map_err(ReplayError::Startup)?;
        Ok(Self {
            host,
            steps_applied: 0,
        })
    }

    /// Apply one step.
    pub fn apply(&mut self, step: &ReplayStep) -> Result<(), ReplayError> {
        let index = self.steps_applied;
        self.steps_applied += 1;
        log::trace!("Step {index}: {step:?}");
        match step {
            ReplayStep::Pointer(event) => self.host.handle_event(event.clone()),
            ReplayStep::SetMode { mode } => self
                .host
                .set_mode(mode)
                .map_err(|source| ReplayError::Mode { step: index, source })?,
            ReplayStep::SetMaterial { material } => {
                self.host.context_mut().set_active_material(material.clone());
            }
            ReplayStep::FocusLost => self.host.focus_lost(),
        }
        Ok(())
    }

    pub fn editor(&self) -> &Editor {
        self.host.context()
    }

    pub fn current_mode(&self) -> Option<&ModeId> {
        self.host.current_mode_id()
    }

    pub fn steps_applied(&self) -> usize {
        self.steps_applied
    }

    /// End the session, tearing down the active mode, and return the scene.
    pub fn finish(mut self) -> Scene {
        self.host.shutdown();
        self.host.context().scene.clone()
    }
}

/// Run a whole script and return the resulting scene.
pub fn run(script: &ReplayScript) -> Result<Scene, ReplayError> {
    let mut session = Session::new(script)?;
    for step in &script.steps {
        session.apply(step)?;
    }
    log::info!(
        "Replayed {} steps, {} entities in scene",
        session.steps_applied(),
        session.editor().scene.len()
    );
    Ok(session.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use mapedit_core::MouseButton;
    use std::io::Write;

    const SCRIPT: &str = r#"{
        "config": { "initial_mode": "add", "active_material": "barrel" },
        "entities": [
            { "material": "crate", "position": { "x": 100.0, "y": 0.0 } }
        ],
        "steps": [
            { "pointer": { "type": "down", "position": { "x": 0.0, "y": 0.0 }, "button": "Left" } },
            { "pointer": { "type": "up", "position": { "x": 0.0, "y": 0.0 }, "button": "Left" } },
            { "set_mode": { "mode": "move" } },
            { "pointer": { "type": "down", "position": { "x": 100.0, "y": 0.0 },
                "button": "Left" } },
            { "pointer": { "type": "move", "position": { "x": 110.0, "y": 5.0 } } },
            { "pointer": { "type": "up", "position": { "x": 120.0, "y": 5.0 }, "button": "Left" } }
        ]
    }"#;

    #[test]
    fn test_run_script() {
        let script = ReplayScript::from_json(SCRIPT).unwrap();
        let scene = run(&script).unwrap();

        assert_eq!(scene.len(), 2);
        let positions: Vec<_> = scene.iter().map(|e| (e.material.as_str(), e.position)).collect();
        assert_eq!(
            positions,
            vec![("crate", Point::new(120.0, 5.0)), ("barrel", Point::ZERO)]
        );
    }

    #[test]
    fn test_focus_lost_reverts_drag() {
        let script = ReplayScript {
            entities: vec![Entity::new("crate", Point::ZERO, kurbo::Vec2::new(1.0, 1.0))],
            config: EditorConfig {
                initial_mode: ModeId::MOVE,
                ..EditorConfig::default()
            },
            steps: vec![
                ReplayStep::Pointer(PointerEvent::Down {
                    position: Point::ZERO,
                    button: MouseButton::Right,
                }),
                ReplayStep::Pointer(PointerEvent::Move {
                    position: Point::new(40.0, 0.0),
                }),
                ReplayStep::FocusLost,
            ],
        };
        let scene = run(&script).unwrap();
        assert_eq!(scene.iter().next().unwrap().position, Point::ZERO);
    }

    #[test]
    fn test_set_material_step() {
        let mut session = Session::new(&ReplayScript {
            config: EditorConfig {
                initial_mode: ModeId::ADD,
                ..EditorConfig::default()
            },
            ..ReplayScript::default()
        })
        .unwrap();

        session
            .apply(&ReplayStep::SetMaterial {
                material: "spawn_point".to_string(),
            })
            .unwrap();
        for event in [
            PointerEvent::Down {
                position: Point::ZERO,
                button: MouseButton::Left,
            },
            PointerEvent::Up {
                position: Point::ZERO,
                button: MouseButton::Left,
            },
        ] {
            session.apply(&ReplayStep::Pointer(event)).unwrap();
        }

        assert_eq!(session.current_mode(), Some(&ModeId::ADD));
        assert!(session.editor().scene.iter().all(Entity::is_spawn_point));
        assert_eq!(session.steps_applied(), 3);
    }

    #[test]
    fn test_unknown_mode_step() {
        let mut session = Session::new(&ReplayScript::default()).unwrap();
        let result = session.apply(&ReplayStep::SetMode {
            mode: ModeId::new("paint"),
        });
        assert!(matches!(result, Err(ReplayError::Mode { step: 0, .. })));
        assert_eq!(session.current_mode(), Some(&ModeId::LOOK));
    }

    #[test]
    fn test_unknown_initial_mode() {
        let script = ReplayScript {
            config: EditorConfig {
                initial_mode: ModeId::new("paint"),
                ..EditorConfig::default()
            },
            ..ReplayScript::default()
        };
        assert!(matches!(Session::new(&script), Err(ReplayError::Startup(_))));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let json = r#"{ "config": { "min_zoom": 10.0, "max_zoom": 1.0 }, "steps": [] }"#;
        let script = ReplayScript::from_json(json).unwrap();
        assert!(matches!(
            run(&script),
            Err(ReplayError::Config(ConfigError::Invalid(_)))
        ));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SCRIPT.as_bytes()).unwrap();

        let script = ReplayScript::load(file.path()).unwrap();
        assert_eq!(script.steps.len(), 6);
        assert_eq!(script.steps[2], ReplayStep::SetMode { mode: ModeId::MOVE });

        assert!(matches!(
            ReplayScript::load("/nonexistent/script.json"),
            Err(ReplayError::Io(_))
        ));
    }
}
