//! In-memory page

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use super::Page;
use crate::models::SelectOption;

#[derive(Debug, Default)]
struct Select {
    options: Vec<SelectOption>,
    selected: Option<String>,
}

#[derive(Debug, Default)]
struct Form {
    /// Field names with their initial values
    fields: Vec<(String, String)>,
}

#[derive(Debug, Default)]
struct PageState {
    elements: HashSet<String>,
    inputs: HashMap<String, String>,
    forms: HashMap<String, Form>,
    selects: HashMap<String, Select>,
    texts: HashMap<String, String>,
    disabled: HashMap<String, bool>,
    reloads: usize,
}

/// Page held entirely in memory.
///
/// Built with the `with_*` methods; the inspection getters (`selected`,
/// `text`, `is_disabled`, `reload_count`) expose what the behaviors did.
#[derive(Debug, Default)]
pub struct MemoryPage {
    state: Mutex<PageState>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn with_element(self, id: &str) -> Self {
        self.state().elements.insert(id.to_string());
        self
    }

    pub fn with_input(self, name: &str, value: &str) -> Self {
        self.state().inputs.insert(name.to_string(), value.to_string());
        self
    }

    /// Form posting to `action`; each field becomes an input with its initial value
    pub fn with_form(self, action: &str, fields: &[(&str, &str)]) -> Self {
        {
            let mut state = self.state();
            let fields: Vec<(String, String)> = fields
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect();
            for (name, value) in &fields {
                state.inputs.insert(name.clone(), value.clone());
            }
            state.forms.insert(action.to_string(), Form { fields });
        }
        self
    }

    pub fn with_select(self, name: &str, options: Vec<SelectOption>) -> Self {
        let selected = options.first().map(|o| o.value.clone());
        self.state()
            .selects
            .insert(name.to_string(), Select { options, selected });
        self
    }

    pub fn with_text(self, id: &str, text: &str) -> Self {
        self.state().texts.insert(id.to_string(), text.to_string());
        self
    }

    pub fn with_button(self, id: &str, disabled: bool) -> Self {
        {
            let mut state = self.state();
            state.elements.insert(id.to_string());
            state.disabled.insert(id.to_string(), disabled);
        }
        self
    }

    pub fn selected(&self, name: &str) -> Option<String> {
        self.state().selects.get(name).and_then(|s| s.selected.clone())
    }

    pub fn text(&self, id: &str) -> Option<String> {
        self.state().texts.get(id).cloned()
    }

    pub fn is_disabled(&self, id: &str) -> Option<bool> {
        self.state().disabled.get(id).copied()
    }

    pub fn reload_count(&self) -> usize {
        self.state().reloads
    }
}

impl Page for MemoryPage {
    fn has_element(&self, id: &str) -> bool {
        let state = self.state();
        state.elements.contains(id)
            || state.inputs.contains_key(id)
            || state.selects.contains_key(id)
            || state.texts.contains_key(id)
    }

    fn input_value(&self, name: &str) -> Option<String> {
        self.state().inputs.get(name).cloned()
    }

    fn set_input_value(&self, name: &str, value: &str) -> bool {
        match self.state().inputs.get_mut(name) {
            Some(current) => {
                *current = value.to_string();
                true
            }
            None => false,
        }
    }

    fn form_fields(&self, action: &str) -> Option<Vec<(String, String)>> {
        let state = self.state();
        let form = state.forms.get(action)?;
        Some(
            form.fields
                .iter()
                .map(|(name, _)| {
                    let value = state.inputs.get(name).cloned().unwrap_or_default();
                    (name.clone(), value)
                })
                .collect(),
        )
    }

    fn reset_form(&self, action: &str) {
        let mut state = self.state();
        let Some(fields) = state.forms.get(action).map(|f| f.fields.clone()) else {
            return;
        };
        for (name, initial) in fields {
            state.inputs.insert(name, initial);
        }
    }

    fn select_options(&self, name: &str) -> Option<Vec<SelectOption>> {
        self.state().selects.get(name).map(|s| s.options.clone())
    }

    fn append_option(&self, name: &str, option: SelectOption) {
        if let Some(select) = self.state().selects.get_mut(name) {
            select.options.push(option);
        }
    }

    fn select_value(&self, name: &str, value: &str) {
        if let Some(select) = self.state().selects.get_mut(name) {
            // Like a browser, an unknown value leaves nothing selected
            select.selected = select
                .options
                .iter()
                .any(|o| o.value == value)
                .then(|| value.to_string());
        }
    }

    fn set_text(&self, id: &str, text: &str) {
        let mut state = self.state();
        if state.texts.contains_key(id) || state.elements.contains(id) {
            state.texts.insert(id.to_string(), text.to_string());
        }
    }

    fn set_disabled(&self, id: &str, disabled: bool) {
        let mut state = self.state();
        if state.elements.contains(id) {
            state.disabled.insert(id.to_string(), disabled);
        }
    }

    fn reload(&self) {
        self.state().reloads += 1;
    }
}
