//! Visibility and highlight state for UI elements the modes touch.
//!
//! The widget tree itself lives outside the core. Modes only ever toggle
//! panel visibility and highlight their own toolbar button, so this keeps
//! just that state, keyed by element ID.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// Identifier of a UI element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UiElementId(Cow<'static, str>);

impl UiElementId {
    /// Material picker panel.
    pub const MATERIAL_PANEL: UiElementId = UiElementId::from_static("panel.materials");
    /// Transform readout panel.
    pub const TRANSFORM_PANEL: UiElementId = UiElementId::from_static("panel.transform");

    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UiElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display state of one element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiElement {
    pub visible: bool,
    pub highlighted: bool,
}

/// State of every element touched so far.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    elements: HashMap<UiElementId, UiElement>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of an element, if it has ever been touched.
    pub fn element(&self, id: &UiElementId) -> Option<&UiElement> {
        self.elements.get(id)
    }

    fn element_mut(&mut self, id: &UiElementId) -> &mut UiElement {
        self.elements.entry(id.clone()).or_default()
    }

    pub fn set_visible(&mut self, id: &UiElementId, visible: bool) {
        self.element_mut(id).visible = visible;
    }

    pub fn highlight(&mut self, id: &UiElementId) {
        self.element_mut(id).highlighted = true;
    }

    pub fn unhighlight(&mut self, id: &UiElementId) {
        self.element_mut(id).highlighted = false;
    }

    pub fn is_visible(&self, id: &UiElementId) -> bool {
        self.element(id).is_some_and(|e| e.visible)
    }

    pub fn is_highlighted(&self, id: &UiElementId) -> bool {
        self.element(id).is_some_and(|e| e.highlighted)
    }

    /// IDs of all highlighted elements.
    pub fn highlighted(&self) -> impl Iterator<Item = &UiElementId> {
        self.elements
            .iter()
            .filter(|(_, element)| element.highlighted)
            .map(|(id, _)| id)
    }
}
