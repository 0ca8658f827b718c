use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel::SqliteConnection;
use std::sync::Arc;

use super::model::{GlossaryTermDB, NewGlossaryTermDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::investment_glossary;
use wealthdesk_core::glossary::{GlossaryRepositoryTrait, GlossaryTerm, NewGlossaryTerm};
use wealthdesk_core::Result;

diesel::define_sql_function!(fn lower(x: Text) -> Text);

pub struct GlossaryRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GlossaryRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl GlossaryRepositoryTrait for GlossaryRepository {
    fn list(&self, language: &str) -> Result<Vec<GlossaryTerm>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = investment_glossary::table
            .filter(investment_glossary::language.eq(language))
            .order(investment_glossary::term.asc())
            .select(GlossaryTermDB::as_select())
            .load::<GlossaryTermDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(GlossaryTerm::from).collect())
    }

    /// Term matching ignores ASCII case.
    fn get(&self, term: &str, language: &str) -> Result<Option<GlossaryTerm>> {
        let mut conn = get_connection(&self.pool)?;
        let row = investment_glossary::table
            .filter(lower(investment_glossary::term).eq(term.to_lowercase()))
            .filter(investment_glossary::language.eq(language))
            .select(GlossaryTermDB::as_select())
            .first::<GlossaryTermDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(GlossaryTerm::from))
    }

    async fn create(&self, term: NewGlossaryTerm) -> Result<GlossaryTerm> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<GlossaryTerm> {
                let row = NewGlossaryTermDB::from(term);
                let created = diesel::insert_into(investment_glossary::table)
                    .values(&row)
                    .returning(GlossaryTermDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(GlossaryTerm::from(created))
            })
            .await
    }
}
