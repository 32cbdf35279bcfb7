use serde::Serialize;

use super::navigation::Navigation;

/// Progress of the most recent collection fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded,
    Failed(String),
}

/// What a list page renders. A failed fetch never shows stale rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum ListView<T> {
    Loading,
    Failed(String),
    Empty { action: Option<Navigation> },
    Populated(Vec<T>),
}

impl<T> ListView<T> {
    pub(crate) fn from_rows(load: &LoadState, rows: Vec<T>, empty_action: Option<Navigation>) -> Self {
        match load {
            LoadState::Loading => ListView::Loading,
            LoadState::Failed(message) => ListView::Failed(message.clone()),
            LoadState::Loaded if rows.is_empty() => ListView::Empty {
                action: empty_action,
            },
            LoadState::Loaded => ListView::Populated(rows),
        }
    }

    pub fn rows(&self) -> &[T] {
        match self {
            ListView::Populated(rows) => rows,
            _ => &[],
        }
    }
}
