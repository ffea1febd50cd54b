//! Mode identifier to constructor lookup.

use crate::context::EditorContext;
use crate::modes::{
    AddMode, DecorateMode, DupeMode, LookMode, Mode, ModeId, TransformKind, TransformMode,
};
use std::collections::BTreeMap;
use thiserror::Error;

/// Builds a mode, running its setup side effects against the context.
pub type ModeConstructor = fn(&mut dyn EditorContext) -> Box<dyn Mode>;

/// Mode switching errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModeError {
    #[error("Unknown mode: {0}")]
    UnknownMode(ModeId),
}

/// Available modes, keyed by ID.
#[derive(Clone, Default)]
pub struct ModeRegistry {
    constructors: BTreeMap<ModeId, ModeConstructor>,
}

impl std::fmt::Debug for ModeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.constructors.keys()).finish()
    }
}

impl ModeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in mode.
    pub fn with_builtin_modes() -> Self {
        let mut registry = Self::new();
        registry.register(ModeId::ADD, |ctx| Box::new(AddMode::new(ctx)));
        registry.register(ModeId::MOVE, |ctx| {
            Box::new(TransformMode::new(ctx, TransformKind::Move))
        });
        registry.register(ModeId::ROTATE, |ctx| {
            Box::new(TransformMode::new(ctx, TransformKind::Rotate))
        });
        registry.register(ModeId::SCALE, |ctx| {
            Box::new(TransformMode::new(ctx, TransformKind::Scale))
        });
        registry.register(ModeId::DECORATE, |ctx| Box::new(DecorateMode::new(ctx)));
        registry.register(ModeId::LOOK, |ctx| Box::new(LookMode::new(ctx)));
        registry.register(ModeId::DUPE, |ctx| Box::new(DupeMode::new(ctx)));
        registry
    }

    /// Register a constructor, returning the one it replaces.
    pub fn register(
        &mut self,
        id: ModeId,
        constructor: ModeConstructor,
    ) -> Option<ModeConstructor> {
        self.constructors.insert(id, constructor)
    }

    pub fn contains(&self, id: &ModeId) -> bool {
        self.constructors.contains_key(id)
    }

    /// Registered IDs in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &ModeId> {
        self.constructors.keys()
    }

    /// Construct the mode registered under `id`.
    pub fn construct(
        &self,
        id: &ModeId,
        ctx: &mut dyn EditorContext,
    ) -> Result<Box<dyn Mode>, ModeError> {
        let constructor = self
            .constructors
            .get(id)
            .ok_or_else(|| ModeError::UnknownMode(id.clone()))?;
        Ok(constructor(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Editor;

    #[test]
    fn test_builtin_modes() {
        let registry = ModeRegistry::with_builtin_modes();
        let mut editor = Editor::new();
        for id in [
            ModeId::ADD,
            ModeId::MOVE,
            ModeId::ROTATE,
            ModeId::SCALE,
            ModeId::DECORATE,
            ModeId::LOOK,
            ModeId::DUPE,
        ] {
            assert!(registry.contains(&id));
            let mode = registry.construct(&id, &mut editor).unwrap();
            assert_eq!(mode.id(), &id);
        }
        assert_eq!(registry.ids().count(), 7);
    }

    #[test]
    fn test_unknown_mode() {
        let registry = ModeRegistry::new();
        let mut editor = Editor::new();
        let result = registry.construct(&ModeId::new("paint"), &mut editor);
        assert_eq!(result.err(), Some(ModeError::UnknownMode(ModeId::new("paint"))));
        // A failed lookup has no side effects.
        assert_eq!(editor.ui.highlighted().count(), 0);
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = ModeRegistry::new();
        assert!(registry.register(ModeId::LOOK, |ctx| Box::new(LookMode::new(ctx))).is_none());
        assert!(registry.register(ModeId::LOOK, |ctx| Box::new(DupeMode::new(ctx))).is_some());

        let mut editor = Editor::new();
        let mode = registry.construct(&ModeId::LOOK, &mut editor).unwrap();
        assert_eq!(mode.id(), &ModeId::DUPE);
    }
}
