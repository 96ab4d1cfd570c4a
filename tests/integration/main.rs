//! Integration tests

mod api_tests;
mod page_tests;
