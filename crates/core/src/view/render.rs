//! What a render cycle hands to the presentation layer.

use std::collections::BTreeMap;

use serde::Serialize;

use super::router::detail_link;
use super::ViewMode;
use crate::catalog::{Field, Record};
use crate::media::{youtube_id, ScaleRating};

/// Everything needed to draw one screen.
#[derive(Debug, Clone, Serialize)]
pub struct RenderState {
    pub mode: ViewMode,
    pub view: View,
    /// Messages to show above the view.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<Notice>,
    /// URL the browser should display, e.g. `?item_index=7` or empty.
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum View {
    Catalog(CatalogPage),
    Detail(Box<DetailView>),
    /// Nothing to browse: the table is empty or failed to load.
    Unavailable { message: String },
}

/// One page of the catalog grid.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogPage {
    pub query: String,
    pub cards: Vec<CardView>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub page_size: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

/// A catalog grid card.
#[derive(Debug, Clone, Serialize)]
pub struct CardView {
    pub index: u64,
    /// Relative link opening the detail view.
    pub link: String,
    pub cover_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub year: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footage_icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<ScaleRating>,
}

impl CardView {
    /// None for records without a cover; those never appear in the grid.
    pub fn from_record(record: &Record) -> Option<Self> {
        let cover_url = record.get(Field::Cover)?.to_string();
        Some(Self {
            index: record.index,
            link: detail_link(record.index),
            cover_url,
            title: owned(record, Field::Title),
            year: record.year,
            director: owned(record, Field::Director),
            genre: owned(record, Field::Genre),
            runtime: owned(record, Field::Runtime),
            flag: owned(record, Field::Flag),
            footage_icon: owned(record, Field::FootageIcon),
            scale: record.get(Field::Scale).map(ScaleRating::parse),
        })
    }
}

/// The detail page of one record.
#[derive(Debug, Clone, Serialize)]
pub struct DetailView {
    pub index: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    pub year: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footage_icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<ScaleRating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailer: Option<Trailer>,
    /// Every column of the row, including ones without a dedicated slot.
    pub fields: BTreeMap<String, String>,
}

impl From<&Record> for DetailView {
    fn from(record: &Record) -> Self {
        Self {
            index: record.index,
            title: owned(record, Field::Title),
            original_title: owned(record, Field::OriginalTitle),
            year: record.year,
            director: owned(record, Field::Director),
            genre: owned(record, Field::Genre),
            country: owned(record, Field::Country),
            runtime: owned(record, Field::Runtime),
            synopsis: owned(record, Field::Synopsis),
            flag: owned(record, Field::Flag),
            footage_icon: owned(record, Field::FootageIcon),
            scale: record.get(Field::Scale).map(ScaleRating::parse),
            cover_url: owned(record, Field::Cover),
            stream_url: owned(record, Field::Stream),
            trailer: record.get(Field::Trailer).map(Trailer::new),
            fields: record.fields.clone(),
        }
    }
}

/// Trailer link, with the embeddable id when it points at YouTube.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trailer {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_id: Option<String>,
}

impl Trailer {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            youtube_id: youtube_id(url).map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A transient message for the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

fn owned(record: &Record, field: Field) -> Option<String> {
    record.get(field).map(str::to_string)
}
