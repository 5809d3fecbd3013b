//! View request DTOs

use serde::Deserialize;

/// Query of the view resolver
#[derive(Debug, Deserialize)]
pub struct ResolveViewQuery {
    /// In-app path, e.g. `/jury/notation/<id>`
    pub path: String,
}
