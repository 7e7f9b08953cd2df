//! Port system for task nodes.
//!
//! Ports are named connection points declared by a task definition. Each port
//! has a [`PortType`] describing the kind of value it accepts (input) or
//! produces (output). An edge may only join an output to an input of the same
//! type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of value flowing through a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PortType {
    /// Plain text (URLs, selectors, HTML, JSON documents).
    String,
    /// A live browser page handle.
    BrowserInstance,
    /// One of a fixed set of options picked in the editor.
    Select,
    /// A reference to a stored credential.
    Credential,
}

impl PortType {
    /// Returns the wire name of this port type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::BrowserInstance => "BROWSER_INSTANCE",
            Self::Select => "SELECT",
            Self::Credential => "CREDENTIAL",
        }
    }
}

impl fmt::Display for PortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An input port declared by a task definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputPort {
    /// The name of this port. Edges address it through their target handle.
    pub name: String,
    /// The accepted value type.
    #[serde(rename = "type")]
    pub port_type: PortType,
    /// Whether the port must be satisfied before the node may run.
    pub required: bool,
    /// Literal-only input: the editor renders no connectable handle.
    #[serde(default)]
    pub hide_handle: bool,
    /// Hint shown next to the input in the editor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helper_text: Option<String>,
}

impl InputPort {
    /// Creates a new required input port.
    #[must_use]
    pub fn required(name: impl Into<String>, port_type: PortType) -> Self {
        Self {
            name: name.into(),
            port_type,
            required: true,
            hide_handle: false,
            helper_text: None,
        }
    }

    /// Creates a new optional input port.
    #[must_use]
    pub fn optional(name: impl Into<String>, port_type: PortType) -> Self {
        Self {
            name: name.into(),
            port_type,
            required: false,
            hide_handle: false,
            helper_text: None,
        }
    }

    /// Marks the port as literal-only.
    #[must_use]
    pub fn hidden_handle(mut self) -> Self {
        self.hide_handle = true;
        self
    }

    /// Sets the editor hint.
    #[must_use]
    pub fn with_helper_text(mut self, text: impl Into<String>) -> Self {
        self.helper_text = Some(text.into());
        self
    }

    /// Returns true if an edge may terminate at this port.
    #[must_use]
    pub fn is_connectable(&self) -> bool {
        !self.hide_handle
    }
}

/// An output port declared by a task definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputPort {
    /// The name of this port. Edges address it through their source handle.
    pub name: String,
    /// The produced value type.
    #[serde(rename = "type")]
    pub port_type: PortType,
}

impl OutputPort {
    /// Creates a new output port.
    #[must_use]
    pub fn new(name: impl Into<String>, port_type: PortType) -> Self {
        Self {
            name: name.into(),
            port_type,
        }
    }
}
