mod model;
mod repository;

pub use model::{GlossaryTermDB, NewGlossaryTermDB};
pub use repository::GlossaryRepository;
