//! Map catalog cache.
//!
//! The client never asks for maps itself; it just keeps whatever map
//! listings and details the server sends so a UI can show them.

use std::collections::BTreeMap;

use lobbysync_protocol::{MapDetail, MapEntry};

/// One mutation of [`MapCatalog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapAction {
    SetList(Vec<MapEntry>),
    FailList(String),
    SetDetail(MapDetail),
    FailDetail { path: String, message: String },
}

/// Map listings and per-map details, keyed by map path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MapCatalog {
    list: Option<Vec<MapEntry>>,
    list_error: Option<String>,
    details: BTreeMap<String, MapDetail>,
    detail_errors: BTreeMap<String, String>,
}

impl MapCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, action: MapAction) {
        match action {
            MapAction::SetList(maps) => {
                tracing::debug!(count = maps.len(), "map list received");
                self.list = Some(maps);
                self.list_error = None;
            }
            MapAction::FailList(message) => {
                self.list_error = Some(message);
            }
            MapAction::SetDetail(detail) => {
                self.detail_errors.remove(&detail.path);
                self.details.insert(detail.path.clone(), detail);
            }
            MapAction::FailDetail { path, message } => {
                self.details.remove(&path);
                self.detail_errors.insert(path, message);
            }
        }
    }

    pub fn list(&self) -> Option<&[MapEntry]> {
        self.list.as_deref()
    }

    pub fn list_error(&self) -> Option<&str> {
        self.list_error.as_deref()
    }

    pub fn detail(&self, path: &str) -> Option<&MapDetail> {
        self.details.get(path)
    }

    pub fn detail_error(&self, path: &str) -> Option<&str> {
        self.detail_errors.get(path).map(String::as_str)
    }
}
