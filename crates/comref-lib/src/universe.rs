//! Resolution of raw JSON universe documents into a [`TypeDb`].
//!
//! Two passes: every class name is registered first so bases may refer
//! forward, then bases are resolved and conversion spellings parsed.

use comref_core::{ClassId, TypeDb, parse_universe};

use crate::parse::{ParseError, parse_type};

/// Errors produced while loading a universe document.
#[derive(Debug, thiserror::Error)]
pub enum UniverseError {
    #[error("invalid universe document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("class `{class}` lists unknown base `{base}`")]
    UnknownBase { class: String, base: String },

    #[error("class `{class}`: bad conversion spelling `{spelling}`: {source}")]
    Conversion {
        class: String,
        spelling: String,
        source: ParseError,
    },
}

/// Load a universe document, registering its classes into `db`.
/// Returns the registered ids in document order.
pub fn load_universe(db: &mut TypeDb, json: &str) -> Result<Vec<ClassId>, UniverseError> {
    let raw = parse_universe(json)?;

    let ids: Vec<ClassId> = raw.iter().map(|c| db.register_class(&c.name)).collect();

    for (class, &id) in raw.iter().zip(&ids) {
        for base in &class.bases {
            let base_id =
                db.class_by_name(base)
                    .ok_or_else(|| UniverseError::UnknownBase {
                        class: class.name.clone(),
                        base: base.clone(),
                    })?;
            db.add_base(id, base_id);
        }
        for spelling in &class.converts_to {
            let ty = parse_type(db, spelling).map_err(|source| UniverseError::Conversion {
                class: class.name.clone(),
                spelling: spelling.clone(),
                source,
            })?;
            db.add_conversion_to(id, ty);
        }
        for spelling in &class.converts_from {
            let ty = parse_type(db, spelling).map_err(|source| UniverseError::Conversion {
                class: class.name.clone(),
                spelling: spelling.clone(),
                source,
            })?;
            db.add_conversion_from(id, ty);
        }
    }

    Ok(ids)
}
