//! Glossary module - investment terms per language.

mod glossary_model;
mod glossary_service;
mod glossary_traits;

pub use glossary_model::{normalize_language, GlossaryTerm, NewGlossaryTerm};
pub use glossary_service::GlossaryService;
pub use glossary_traits::{GlossaryRepositoryTrait, GlossaryServiceTrait};
