//! Document, styling and navigation surface of the host page.

use super::error::PageError;
use crate::style::StyleProperty;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to a document node. Only valid for the document that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A hyperlink as the browser resolves it against the current document.
///
/// Mirrors the anchor element's URL decomposition: `protocol` keeps the
/// trailing colon and `hash` is empty unless the fragment is non-empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Link {
    pub node: Option<NodeId>,
    /// Fully resolved destination, empty when the anchor has no `href`.
    pub href: String,
    pub protocol: String,
    pub pathname: String,
    pub hash: String,
    /// Browsing-context target (`_blank`, `_self`, a window name, or empty).
    pub target: String,
    pub classes: Vec<String>,
}

impl Link {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Whether following the link leaves the current tab.
    ///
    /// `_self`, `_top` and `_parent` stay in the tab; `_blank` and window
    /// names may open a new one.
    pub fn opens_new_context(&self) -> bool {
        let target = self.target.trim();
        !(target.is_empty()
            || ["_self", "_top", "_parent"]
                .iter()
                .any(|same_tab| target.eq_ignore_ascii_case(same_tab)))
    }
}

/// Keyboard modifiers held during a click.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn any(self) -> bool {
        self.ctrl || self.meta || self.shift || self.alt
    }
}

/// A click delivered to the document's capture-phase listener.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClickEvent {
    pub target: NodeId,
    /// 0 is the primary button.
    pub button: u16,
    pub modifiers: Modifiers,
    default_prevented: bool,
}

impl ClickEvent {
    /// Plain primary-button click on `target`.
    pub fn primary(target: NodeId) -> Self {
        Self {
            target,
            button: 0,
            modifiers: Modifiers::default(),
            default_prevented: false,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_button(mut self, button: u16) -> Self {
        self.button = button;
        self
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// The live document of one page load.
pub trait Page {
    /// First node matching `selector`.
    fn query_selector(&self, selector: &str) -> Option<NodeId>;

    /// All nodes carrying `class`, in document order.
    fn query_all_by_class(&self, class: &str) -> Vec<NodeId>;

    /// Closest anchor at or above `target`.
    fn closest_link(&self, target: NodeId) -> Option<Link>;

    /// Path component of the current document URL.
    fn location_path(&self) -> String;

    /// Write an inline style. An empty `value` removes the declaration.
    fn set_style(
        &mut self,
        node: NodeId,
        property: StyleProperty,
        value: &str,
    ) -> Result<(), PageError>;

    fn add_class(&mut self, node: NodeId, class: &str) -> Result<(), PageError>;

    /// Assign the document location. The current document unloads afterwards.
    fn navigate(&mut self, destination: &str);

    /// Write several inline styles, stopping at the first failure.
    fn set_styles(
        &mut self,
        node: NodeId,
        styles: &[(StyleProperty, &str)],
    ) -> Result<(), PageError> {
        for (property, value) in styles {
            self.set_style(node, *property, value)?;
        }
        Ok(())
    }
}
