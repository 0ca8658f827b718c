use diesel::prelude::*;

use wealthdesk_core::glossary::{GlossaryTerm, NewGlossaryTerm};

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::investment_glossary)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GlossaryTermDB {
    pub id: i32,
    pub term: String,
    pub definition: String,
    pub category: String,
    pub language: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::investment_glossary)]
pub struct NewGlossaryTermDB {
    pub term: String,
    pub definition: String,
    pub category: String,
    pub language: String,
}

impl From<NewGlossaryTerm> for NewGlossaryTermDB {
    fn from(term: NewGlossaryTerm) -> Self {
        Self {
            term: term.term,
            definition: term.definition,
            category: term.category,
            language: term.language,
        }
    }
}

impl From<GlossaryTermDB> for GlossaryTerm {
    fn from(db: GlossaryTermDB) -> Self {
        Self {
            id: db.id,
            term: db.term,
            definition: db.definition,
            category: db.category,
            language: db.language,
        }
    }
}
