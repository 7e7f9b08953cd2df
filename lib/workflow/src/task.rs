//! Task types and the task registry.
//!
//! Every node in a workflow names a task type. The built-in task types form a
//! closed enum; each variant carries its own [`TaskDefinition`] (declared
//! inputs, outputs and entry-point eligibility).
//!
//! Nodes arriving from the editor name their task type as a string, so the
//! planner resolves them through a [`TaskRegistry`]. A registry is built once
//! at startup and passed by reference; tests substitute their own.

use crate::port::{InputPort, OutputPort, PortType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// The built-in task types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    LaunchBrowser,
    PageToHtml,
    ExtractTextFromElement,
    FillInput,
    ClickElement,
    WaitForElement,
    NavigateUrl,
    ScrollToElement,
    DeliverViaWebhook,
    ExtractDataWithAi,
    ReadPropertyFromJson,
    AddPropertyToJson,
}

impl TaskType {
    /// All built-in task types, in catalog order.
    pub const ALL: [Self; 12] = [
        Self::LaunchBrowser,
        Self::PageToHtml,
        Self::ExtractTextFromElement,
        Self::FillInput,
        Self::ClickElement,
        Self::WaitForElement,
        Self::NavigateUrl,
        Self::ScrollToElement,
        Self::DeliverViaWebhook,
        Self::ExtractDataWithAi,
        Self::ReadPropertyFromJson,
        Self::AddPropertyToJson,
    ];

    /// Returns the wire identifier of this task type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LaunchBrowser => "LAUNCH_BROWSER",
            Self::PageToHtml => "PAGE_TO_HTML",
            Self::ExtractTextFromElement => "EXTRACT_TEXT_FROM_ELEMENT",
            Self::FillInput => "FILL_INPUT",
            Self::ClickElement => "CLICK_ELEMENT",
            Self::WaitForElement => "WAIT_FOR_ELEMENT",
            Self::NavigateUrl => "NAVIGATE_URL",
            Self::ScrollToElement => "SCROLL_TO_ELEMENT",
            Self::DeliverViaWebhook => "DELIVER_VIA_WEBHOOK",
            Self::ExtractDataWithAi => "EXTRACT_DATA_WITH_AI",
            Self::ReadPropertyFromJson => "READ_PROPERTY_FROM_JSON",
            Self::AddPropertyToJson => "ADD_PROPERTY_TO_JSON",
        }
    }

    /// Builds the definition (ports and entry-point flag) for this task type.
    #[must_use]
    pub fn definition(&self) -> TaskDefinition {
        let web_page_in = || InputPort::required(WEB_PAGE, PortType::BrowserInstance);
        let web_page_out = || OutputPort::new(WEB_PAGE, PortType::BrowserInstance);
        let selector = || InputPort::required("Selector", PortType::String);

        match self {
            Self::LaunchBrowser => TaskDefinition::new("Open browser")
                .entry_point()
                .input(
                    InputPort::required("Website URL", PortType::String)
                        .with_helper_text("eg: https://www.google.com")
                        .hidden_handle(),
                )
                .output(web_page_out()),
            Self::PageToHtml => TaskDefinition::new("Get HTML from page")
                .input(web_page_in())
                .output(OutputPort::new("Html", PortType::String))
                .output(web_page_out()),
            Self::ExtractTextFromElement => TaskDefinition::new("Extract text from element")
                .input(InputPort::required("Html", PortType::String))
                .input(selector())
                .output(OutputPort::new("Extracted text", PortType::String)),
            Self::FillInput => TaskDefinition::new("Fill input")
                .input(web_page_in())
                .input(selector())
                .input(InputPort::required("Value", PortType::String))
                .output(web_page_out()),
            Self::ClickElement => TaskDefinition::new("Click element")
                .input(web_page_in())
                .input(selector())
                .output(web_page_out()),
            Self::WaitForElement => TaskDefinition::new("Wait for element")
                .input(web_page_in())
                .input(selector())
                .input(InputPort::required("Visibility", PortType::Select).hidden_handle())
                .output(web_page_out()),
            Self::NavigateUrl => TaskDefinition::new("Navigate URL")
                .input(web_page_in())
                .input(InputPort::required("URL", PortType::String))
                .output(web_page_out()),
            Self::ScrollToElement => TaskDefinition::new("Scroll to element")
                .input(web_page_in())
                .input(selector())
                .output(web_page_out()),
            Self::DeliverViaWebhook => TaskDefinition::new("Deliver via webhook")
                .input(InputPort::required("Target URL", PortType::String))
                .input(InputPort::required("Body", PortType::String)),
            Self::ExtractDataWithAi => TaskDefinition::new("Extract data with AI")
                .input(InputPort::required("Content", PortType::String))
                .input(InputPort::required("Credentials", PortType::Credential).hidden_handle())
                .input(InputPort::required("Prompt", PortType::String))
                .output(OutputPort::new("Extracted data", PortType::String)),
            Self::ReadPropertyFromJson => TaskDefinition::new("Read property from JSON")
                .input(InputPort::required("JSON", PortType::String))
                .input(InputPort::required("Property name", PortType::String))
                .output(OutputPort::new("Property value", PortType::String)),
            Self::AddPropertyToJson => TaskDefinition::new("Add property to JSON")
                .input(InputPort::required("JSON", PortType::String))
                .input(InputPort::required("Property name", PortType::String))
                .input(InputPort::required("Property value", PortType::String))
                .output(OutputPort::new("Update JSON", PortType::String)),
        }
    }
}

const WEB_PAGE: &str = "Web page";

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a built-in task type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTaskType(pub String);

impl fmt::Display for UnknownTaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown task type: {}", self.0)
    }
}

impl std::error::Error for UnknownTaskType {}

impl FromStr for TaskType {
    type Err = UnknownTaskType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownTaskType(s.to_string()))
    }
}

/// The schema of a task type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDefinition {
    /// Display name shown in the editor.
    pub label: String,
    /// Declared inputs, in declaration order.
    pub inputs: Vec<InputPort>,
    /// Declared outputs.
    pub outputs: Vec<OutputPort>,
    /// Whether a node of this type may start a workflow.
    pub is_entry_point: bool,
}

impl TaskDefinition {
    /// Creates a definition with no ports that is not an entry point.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            is_entry_point: false,
        }
    }

    /// Flags the task type as an entry point.
    #[must_use]
    pub fn entry_point(mut self) -> Self {
        self.is_entry_point = true;
        self
    }

    /// Appends an input port.
    #[must_use]
    pub fn input(mut self, port: InputPort) -> Self {
        self.inputs.push(port);
        self
    }

    /// Appends an output port.
    #[must_use]
    pub fn output(mut self, port: OutputPort) -> Self {
        self.outputs.push(port);
        self
    }

    /// Returns the input port with the given name, if any.
    #[must_use]
    pub fn input_port(&self, name: &str) -> Option<&InputPort> {
        self.inputs.iter().find(|p| p.name == name)
    }

    /// Returns the output port with the given name, if any.
    #[must_use]
    pub fn output_port(&self, name: &str) -> Option<&OutputPort> {
        self.outputs.iter().find(|p| p.name == name)
    }
}

/// Read-only lookup from a task-type identifier to its definition.
///
/// Implementations must be deterministic: the same identifier always yields
/// the same definition for the lifetime of the registry.
pub trait TaskRegistry {
    /// Returns the definition for `task_type`, or `None` if it is unknown.
    fn lookup(&self, task_type: &str) -> Option<&TaskDefinition>;
}

impl TaskRegistry for HashMap<String, TaskDefinition> {
    fn lookup(&self, task_type: &str) -> Option<&TaskDefinition> {
        self.get(task_type)
    }
}

/// A registry of task definitions keyed by task-type identifier.
#[derive(Debug, Clone, Default)]
pub struct TaskCatalog {
    tasks: HashMap<String, TaskDefinition>,
}

impl TaskCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding every built-in task type.
    #[must_use]
    pub fn builtin() -> Self {
        TaskType::ALL
            .into_iter()
            .fold(Self::new(), |catalog, task_type| {
                catalog.with_task(task_type.as_str(), task_type.definition())
            })
    }

    /// Registers (or replaces) a task definition.
    pub fn register(&mut self, task_type: impl Into<String>, definition: TaskDefinition) {
        self.tasks.insert(task_type.into(), definition);
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with_task(mut self, task_type: impl Into<String>, definition: TaskDefinition) -> Self {
        self.register(task_type, definition);
        self
    }

    /// Returns the number of registered task types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true if no task type is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns all registered entries sorted by identifier.
    #[must_use]
    pub fn entries(&self) -> Vec<(&str, &TaskDefinition)> {
        let mut entries: Vec<_> = self
            .tasks
            .iter()
            .map(|(name, definition)| (name.as_str(), definition))
            .collect();
        entries.sort_by_key(|(name, _)| *name);
        entries
    }
}

impl TaskRegistry for TaskCatalog {
    fn lookup(&self, task_type: &str) -> Option<&TaskDefinition> {
        self.tasks.get(task_type)
    }
}
