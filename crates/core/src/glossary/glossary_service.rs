use async_trait::async_trait;
use std::sync::Arc;

use super::glossary_model::{normalize_language, GlossaryTerm, NewGlossaryTerm};
use super::glossary_traits::{GlossaryRepositoryTrait, GlossaryServiceTrait};
use crate::errors::{Error, Result};

pub struct GlossaryService {
    repository: Arc<dyn GlossaryRepositoryTrait>,
}

impl GlossaryService {
    pub fn new(repository: Arc<dyn GlossaryRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl GlossaryServiceTrait for GlossaryService {
    fn list_terms(&self, language: Option<&str>) -> Result<Vec<GlossaryTerm>> {
        let language = normalize_language(language)?;
        self.repository.list(&language)
    }

    fn get_term(&self, term: &str, language: Option<&str>) -> Result<Option<GlossaryTerm>> {
        let language = normalize_language(language)?;
        self.repository.get(term.trim(), &language)
    }

    async fn create_term(&self, mut term: NewGlossaryTerm) -> Result<GlossaryTerm> {
        term.validate()?;
        term.language = normalize_language(Some(&term.language))?;
        term.term = term.term.trim().to_string();
        if self.repository.get(&term.term, &term.language)?.is_some() {
            return Err(Error::ConstraintViolation(format!(
                "Glossary term '{}' already exists for language '{}'",
                term.term, term.language
            )));
        }
        self.repository.create(term).await
    }
}
