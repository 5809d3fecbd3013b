//! View response DTOs

use serde::Serialize;

use crate::models::{View, ViewDecision};

/// Either the view to render or where to go instead
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ViewResponse {
    Render(View),
    Redirect { redirect: &'static str },
}

impl From<ViewDecision> for ViewResponse {
    fn from(decision: ViewDecision) -> Self {
        match decision {
            ViewDecision::Render(view) => Self::Render(view),
            ViewDecision::Redirect(redirect) => Self::Redirect { redirect },
        }
    }
}
