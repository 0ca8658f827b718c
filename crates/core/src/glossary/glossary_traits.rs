use async_trait::async_trait;

use super::glossary_model::{GlossaryTerm, NewGlossaryTerm};
use crate::errors::Result;

#[async_trait]
pub trait GlossaryRepositoryTrait: Send + Sync {
    fn list(&self, language: &str) -> Result<Vec<GlossaryTerm>>;
    /// Term matching is case-insensitive.
    fn get(&self, term: &str, language: &str) -> Result<Option<GlossaryTerm>>;
    async fn create(&self, term: NewGlossaryTerm) -> Result<GlossaryTerm>;
}

#[async_trait]
pub trait GlossaryServiceTrait: Send + Sync {
    fn list_terms(&self, language: Option<&str>) -> Result<Vec<GlossaryTerm>>;
    fn get_term(&self, term: &str, language: Option<&str>) -> Result<Option<GlossaryTerm>>;
    async fn create_term(&self, term: NewGlossaryTerm) -> Result<GlossaryTerm>;
}
