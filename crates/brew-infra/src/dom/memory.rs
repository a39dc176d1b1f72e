//! In-memory element tree.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use brew_core::domain::Category;
use brew_core::ports::{Document, NoticeKind, Row, SelectOption};

/// Oldest notices are dropped past this many.
const MAX_NOTICES: usize = 100;

#[derive(Debug, Clone)]
struct Element {
    visible: bool,
    text: String,
    value: String,
    disabled: bool,
    href: String,
    options: Vec<SelectOption>,
    rows: Vec<Row>,
    highlight: Option<usize>,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            visible: true,
            text: String::new(),
            value: String::new(),
            disabled: false,
            href: String::new(),
            options: Vec::new(),
            rows: Vec::new(),
            highlight: None,
        }
    }
}

#[derive(Default)]
struct Tree {
    elements: HashMap<String, Element>,
    sections: Vec<String>,
    active_section: Option<String>,
    title: String,
    notices: Vec<(String, NoticeKind)>,
    confirm_answer: bool,
    bindings: Vec<(Category, String)>,
}

/// A document held in memory.
///
/// Only declared elements exist; operations on any other id are ignored,
/// as they would be against a page missing that element.
pub struct InMemoryDocument {
    tree: Mutex<Tree>,
}

impl InMemoryDocument {
    pub fn new() -> Self {
        Self {
            tree: Mutex::new(Tree {
                confirm_answer: true,
                ..Tree::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Tree> {
        self.tree.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn with_element(&self, id: &str, f: impl FnOnce(&mut Element)) {
        let mut tree = self.lock();
        if let Some(element) = tree.elements.get_mut(id) {
            f(element);
        }
    }

    fn read<T>(&self, id: &str, f: impl FnOnce(&Element) -> T) -> Option<T> {
        self.lock().elements.get(id).map(f)
    }

    /// Declare an element.
    pub fn add_element(&self, id: &str) {
        self.lock().elements.entry(id.to_string()).or_default();
    }

    /// Declare a page section. Sections start hidden.
    pub fn add_section(&self, id: &str) {
        let mut tree = self.lock();
        tree.elements.insert(
            id.to_string(),
            Element {
                visible: false,
                ..Element::default()
            },
        );
        tree.sections.push(id.to_string());
    }

    /// Declare a `<select>` filled from a catalog category.
    pub fn bind_select(&self, category: Category, id: &str) {
        let mut tree = self.lock();
        tree.elements.entry(id.to_string()).or_default();
        tree.bindings.push((category, id.to_string()));
    }

    /// What the next `confirm` returns.
    pub fn set_confirm_answer(&self, answer: bool) {
        self.lock().confirm_answer = answer;
    }

    pub fn has_element(&self, id: &str) -> bool {
        self.lock().elements.contains_key(id)
    }

    pub fn active_section(&self) -> Option<String> {
        self.lock().active_section.clone()
    }

    pub fn title(&self) -> String {
        self.lock().title.clone()
    }

    pub fn text(&self, id: &str) -> Option<String> {
        self.read(id, |e| e.text.clone())
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.read(id, |e| e.visible).unwrap_or(false)
    }

    pub fn is_disabled(&self, id: &str) -> bool {
        self.read(id, |e| e.disabled).unwrap_or(false)
    }

    pub fn href(&self, id: &str) -> Option<String> {
        self.read(id, |e| e.href.clone())
    }

    pub fn options(&self, id: &str) -> Vec<SelectOption> {
        self.read(id, |e| e.options.clone()).unwrap_or_default()
    }

    pub fn rows(&self, id: &str) -> Vec<Row> {
        self.read(id, |e| e.rows.clone()).unwrap_or_default()
    }

    pub fn highlighted(&self, id: &str) -> Option<usize> {
        self.read(id, |e| e.highlight).flatten()
    }

    pub fn notices(&self) -> Vec<(String, NoticeKind)> {
        self.lock().notices.clone()
    }

    pub fn last_notice(&self) -> Option<(String, NoticeKind)> {
        self.lock().notices.last().cloned()
    }

    /// Remove and return every pending notice, oldest first.
    pub fn take_notices(&self) -> Vec<(String, NoticeKind)> {
        std::mem::take(&mut self.lock().notices)
    }
}

impl Default for InMemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Document for InMemoryDocument {
    fn activate_section(&self, section_id: &str) {
        let mut tree = self.lock();
        if !tree.sections.iter().any(|s| s == section_id) {
            tracing::warn!(section = section_id, "Unknown section");
            return;
        }
        let sections = tree.sections.clone();
        for section in &sections {
            if let Some(element) = tree.elements.get_mut(section) {
                element.visible = section == section_id;
            }
        }
        tree.active_section = Some(section_id.to_string());
    }

    fn set_title(&self, title: &str) {
        self.lock().title = title.to_string();
    }

    fn set_visible(&self, id: &str, visible: bool) {
        self.with_element(id, |e| e.visible = visible);
    }

    fn set_text(&self, id: &str, text: &str) {
        self.with_element(id, |e| e.text = text.to_string());
    }

    fn value(&self, id: &str) -> Option<String> {
        self.read(id, |e| e.value.clone())
    }

    fn set_value(&self, id: &str, value: &str) {
        self.with_element(id, |e| e.value = value.to_string());
    }

    fn set_disabled(&self, id: &str, disabled: bool) {
        self.with_element(id, |e| e.disabled = disabled);
    }

    fn set_href(&self, id: &str, href: &str) {
        self.with_element(id, |e| e.href = href.to_string());
    }

    fn set_options(&self, id: &str, options: &[SelectOption]) {
        self.with_element(id, |e| {
            e.options = options.to_vec();
            // A select always shows one of its options
            if !e.options.iter().any(|o| o.value == e.value) {
                e.value = e.options.first().map(|o| o.value.clone()).unwrap_or_default();
            }
        });
    }

    fn selects_for(&self, category: Category) -> Vec<String> {
        self.lock()
            .bindings
            .iter()
            .filter(|(c, _)| *c == category)
            .map(|(_, id)| id.clone())
            .collect()
    }

    fn render_rows(&self, id: &str, rows: Vec<Row>) {
        self.with_element(id, |e| {
            e.rows = rows;
            e.highlight = None;
        });
    }

    fn row_count(&self, id: &str) -> usize {
        self.read(id, |e| e.rows.len()).unwrap_or(0)
    }

    fn highlight_row(&self, id: &str, index: Option<usize>) {
        self.with_element(id, |e| {
            e.highlight = index.filter(|i| *i < e.rows.len());
        });
    }

    fn notify(&self, message: &str, kind: NoticeKind) {
        tracing::info!(?kind, text = message, "Notice");
        let mut tree = self.lock();
        tree.notices.push((message.to_string(), kind));
        if tree.notices.len() > MAX_NOTICES {
            tree.notices.remove(0);
        }
    }

    fn confirm(&self, message: &str) -> bool {
        let answer = self.lock().confirm_answer;
        tracing::debug!(question = message, answer, "Confirm");
        answer
    }
}
