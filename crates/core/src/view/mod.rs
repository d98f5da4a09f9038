//! Catalog/detail navigation.
//!
//! A [`Session`] owns the [`ViewState`] of one viewer and the URL that
//! mirrors it. Navigation calls mutate the session; [`Session::render`] turns
//! it into a [`RenderState`] for the presentation layer.

mod render;
mod router;
mod session;
mod state;

pub use render::{
    CardView, CatalogPage, DetailView, Notice, NoticeLevel, RenderState, Trailer, View,
};
pub use router::{detail_link, parse_deep_link, MalformedDeepLink, UrlParams, ITEM_INDEX_PARAM};
pub use session::Session;
pub use state::{ViewMode, ViewState};

use thiserror::Error;

/// The detail view points at a record that is not in the table.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum RecordNotFound {
    #[error("Item {0} not found")]
    Missing(u64),

    #[error("No item selected")]
    NoSelection,
}
