//! Rendering port - the page's element tree.
//!
//! Controllers compute plain view models and push them through this trait;
//! the browser build binds it to the DOM, the headless build to an
//! in-memory tree.

use crate::domain::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// One `<option>` of a `<select>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// The empty "choose one" entry every dropdown starts with.
    pub fn placeholder(label: impl Into<String>) -> Self {
        Self::new("", label)
    }

    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }
}

/// A rendered list row or card: cells plus the actions offered inline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub key: String,
    pub cells: Vec<String>,
    pub actions: Vec<String>,
}

impl Row {
    pub fn new(key: impl Into<String>, cells: Vec<String>) -> Self {
        Self {
            key: key.into(),
            cells,
            actions: Vec::new(),
        }
    }

    pub fn with_actions(mut self, actions: &[&str]) -> Self {
        self.actions = actions.iter().map(|a| a.to_string()).collect();
        self
    }
}

/// Element operations the client needs. Missing elements are ignored,
/// never an error.
pub trait Document: Send + Sync {
    /// Show the given page section and hide every other one.
    fn activate_section(&self, section_id: &str);

    fn set_title(&self, title: &str);

    fn set_visible(&self, id: &str, visible: bool);

    fn set_text(&self, id: &str, text: &str);

    /// Current value of a form control.
    fn value(&self, id: &str) -> Option<String>;

    fn set_value(&self, id: &str, value: &str);

    fn set_disabled(&self, id: &str, disabled: bool);

    fn set_href(&self, id: &str, href: &str);

    /// Replace the options of a `<select>`.
    fn set_options(&self, id: &str, options: &[SelectOption]);

    /// Ids of every `<select>` bound to a catalog category.
    fn selects_for(&self, category: Category) -> Vec<String>;

    /// Replace the rows of a list container.
    fn render_rows(&self, id: &str, rows: Vec<Row>);

    fn row_count(&self, id: &str) -> usize;

    /// Highlight one row of a list container, or clear the highlight.
    fn highlight_row(&self, id: &str, index: Option<usize>);

    /// Transient toast notification.
    fn notify(&self, message: &str, kind: NoticeKind);

    /// Blocking yes/no question, like `window.confirm`.
    fn confirm(&self, message: &str) -> bool;

    /// Checkbox state of a form control.
    fn checked(&self, id: &str) -> bool {
        matches!(self.value(id).as_deref(), Some("true" | "on" | "1"))
    }

    /// Trimmed value, empty when the control is missing.
    fn text_value(&self, id: &str) -> String {
        self.value(id).map(|v| v.trim().to_string()).unwrap_or_default()
    }
}
