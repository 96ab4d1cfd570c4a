//! Page abstraction the interaction layer drives
//!
//! A browser binding implements [`Page`] on top of the real document; the
//! in-memory [`MemoryPage`] backs the tests and the command-line driver.
//! Elements are addressed by the identifiers in
//! [`PageBindings`](crate::config::PageBindings): an element id, an input or
//! select `name`, or a form `action`, depending on the element.

pub mod memory;

pub use memory::MemoryPage;

use crate::models::SelectOption;

/// Document operations needed by the page behaviors.
///
/// Methods addressing a missing element are no-ops; getters return `None`.
pub trait Page: Send + Sync {
    fn has_element(&self, id: &str) -> bool;

    fn input_value(&self, name: &str) -> Option<String>;

    /// Returns false when the input does not exist
    fn set_input_value(&self, name: &str, value: &str) -> bool;

    /// Fields of the form posting to `action`, in document order
    fn form_fields(&self, action: &str) -> Option<Vec<(String, String)>>;

    fn reset_form(&self, action: &str);

    fn select_options(&self, name: &str) -> Option<Vec<SelectOption>>;

    fn append_option(&self, name: &str, option: SelectOption);

    fn select_value(&self, name: &str, value: &str);

    fn set_text(&self, id: &str, text: &str);

    fn set_disabled(&self, id: &str, disabled: bool);

    /// Full navigation to the current location
    fn reload(&self);
}

/// What happened to the companion select after a creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionInsert {
    Appended,
    AlreadyPresent,
    NoSelect,
}

/// Append `option` unless its value is already listed, then select it.
pub fn upsert_option(page: &dyn Page, select: &str, option: SelectOption) -> OptionInsert {
    let Some(options) = page.select_options(select) else {
        return OptionInsert::NoSelect;
    };

    let value = option.value.clone();
    let result = if options.iter().any(|o| o.value == value) {
        OptionInsert::AlreadyPresent
    } else {
        page.append_option(select, option);
        OptionInsert::Appended
    };
    page.select_value(select, &value);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_never_duplicates() {
        let page = MemoryPage::new().with_select("isbn", vec![SelectOption::new("1", "One — 1")]);

        let first = upsert_option(&page, "isbn", SelectOption::new("2", "Two — 2"));
        let second = upsert_option(&page, "isbn", SelectOption::new("2", "Two — 2"));

        assert_eq!(first, OptionInsert::Appended);
        assert_eq!(second, OptionInsert::AlreadyPresent);
        let options = page.select_options("isbn").unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(options[1].value, "2");
        assert_eq!(page.selected("isbn").as_deref(), Some("2"));
    }

    #[test]
    fn test_upsert_without_select() {
        let page = MemoryPage::new();
        assert_eq!(
            upsert_option(&page, "isbn", SelectOption::new("2", "Two")),
            OptionInsert::NoSelect
        );
    }
}
