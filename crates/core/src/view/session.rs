//! A browser session: view state, its URL, and the render step.

use chrono::NaiveDate;
use tracing::{debug, warn};

use super::render::{CardView, CatalogPage, DetailView, Notice, RenderState, View};
use super::router::{parse_deep_link, UrlParams, ITEM_INDEX_PARAM};
use super::{RecordNotFound, ViewMode, ViewState};
use crate::catalog::{Record, RecordTable};
use crate::metrics::DEEP_LINKS;
use crate::paginate::{self, PageMove, PageOutOfRange};
use crate::search::{self, SearchQuery};
use crate::shuffle::DailyOrder;
use crate::source::DataSourceError;

/// One viewer's navigation state plus the URL that reflects it.
///
/// Every mutating call should be followed by [`Session::render`], which
/// recomputes the screen from the current table.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: ViewState,
    url: UrlParams,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session opened at a URL, honouring any deep link in it.
    pub fn from_url(params: &UrlParams) -> Self {
        let mut session = Self::new();
        session.load(params);
        session
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn url(&self) -> &UrlParams {
        &self.url
    }

    /// Apply the URL of a page load.
    ///
    /// A valid `item_index` always opens the detail view, whatever the
    /// session was doing. A malformed one falls back to the catalog without
    /// telling the viewer. Without one, the stored state is kept and the
    /// URL is pointed back at the open record.
    pub fn load(&mut self, params: &UrlParams) {
        self.url = params.clone();
        match parse_deep_link(params) {
            Ok(Some(index)) => {
                DEEP_LINKS.with_label_values(&["valid"]).inc();
                self.state.mode = ViewMode::Detail;
                self.state.selected = Some(index);
            }
            Ok(None) => {
                if let (ViewMode::Detail, Some(index)) = (self.state.mode, self.state.selected) {
                    self.url.set(ITEM_INDEX_PARAM, index.to_string());
                }
            }
            Err(err) => {
                DEEP_LINKS.with_label_values(&["malformed"]).inc();
                debug!("{}; showing catalog", err);
                self.state.mode = ViewMode::Catalog;
                self.state.selected = None;
                self.url.remove(ITEM_INDEX_PARAM);
            }
        }
    }

    /// Show the detail view of `index` and point the URL at it.
    pub fn open_detail(&mut self, index: u64) {
        self.state.mode = ViewMode::Detail;
        self.state.selected = Some(index);
        self.url.clear();
        self.url.set(ITEM_INDEX_PARAM, index.to_string());
    }

    /// Back to the first catalog page with a clean URL.
    pub fn return_to_catalog(&mut self) {
        self.state.mode = ViewMode::Catalog;
        self.state.selected = None;
        self.state.page = 1;
        self.url.clear();
    }

    /// Submit search text. Returns true when it differs from the last query.
    pub fn set_query(&mut self, raw: &str) -> bool {
        self.state.set_query(raw)
    }

    /// Move the catalog pager.
    ///
    /// Targets outside the current result pages leave the state untouched.
    pub fn navigate(
        &mut self,
        table: &RecordTable,
        today: NaiveDate,
        page_size: usize,
        mv: PageMove,
    ) -> Result<usize, PageOutOfRange> {
        let total_items = self.catalog_records(table, today).len();
        let total_pages = paginate::total_pages(total_items, page_size);
        let current = paginate::reconcile_page(self.state.page, total_pages);

        let target = paginate::navigate(current, total_pages, mv)?;
        self.state.page = target;
        Ok(target)
    }

    /// The record selected for the detail view.
    pub fn resolve_detail<'t>(&self, table: &'t RecordTable) -> Result<&'t Record, RecordNotFound> {
        let index = self.state.selected.ok_or(RecordNotFound::NoSelection)?;
        table.get(index).ok_or(RecordNotFound::Missing(index))
    }

    /// Recompute the screen from the current table.
    ///
    /// A detail view whose record is missing falls back to the catalog within
    /// the same render, so no broken detail page is ever emitted.
    pub fn render(
        &mut self,
        table: &RecordTable,
        today: NaiveDate,
        page_size: usize,
        load_error: Option<&DataSourceError>,
    ) -> RenderState {
        let mut notices = Vec::new();

        if table.is_empty() {
            let message = match load_error {
                Some(err) => format!("Failed to load catalog: {}", err),
                None => "No titles found.".to_string(),
            };
            return self.emit(View::Unavailable { message }, notices);
        }

        if self.state.mode == ViewMode::Detail {
            match self.resolve_detail(table) {
                Ok(record) => {
                    let detail = DetailView::from(record);
                    if let Some(trailer) = &detail.trailer {
                        if trailer.youtube_id.is_none() {
                            notices.push(Notice::warning(format!(
                                "Trailer link '{}' is not a valid YouTube URL",
                                trailer.url
                            )));
                        }
                    }
                    return self.emit(View::Detail(Box::new(detail)), notices);
                }
                Err(err) => {
                    if matches!(err, RecordNotFound::Missing(_)) {
                        DEEP_LINKS.with_label_values(&["not_found"]).inc();
                    }
                    warn!("{}; returning to catalog", err);
                    notices.push(Notice::warning(err.to_string()));
                    self.return_to_catalog();
                }
            }
        }

        let catalog = self.render_catalog(table, today, page_size);
        self.emit(View::Catalog(catalog), notices)
    }

    fn render_catalog(
        &mut self,
        table: &RecordTable,
        today: NaiveDate,
        page_size: usize,
    ) -> CatalogPage {
        let records = self.catalog_records(table, today);
        let page = paginate::paginate(&records, page_size, self.state.page);
        self.state.page = page.page;

        CatalogPage {
            query: self.state.last_query.clone(),
            cards: page
                .items
                .iter()
                .filter_map(|r| CardView::from_record(r))
                .collect(),
            page: page.page,
            total_pages: page.total_pages,
            total_items: page.total_items,
            page_size,
            has_previous: page.has_previous(),
            has_next: page.has_next(),
        }
    }

    /// Records shown in the grid: daily order, covers only, current query.
    fn catalog_records<'t>(&mut self, table: &'t RecordTable, today: NaiveDate) -> Vec<&'t Record> {
        let current = self
            .state
            .daily_order
            .as_ref()
            .is_some_and(|order| order.is_current(table, today));
        if !current {
            self.state.daily_order = Some(DailyOrder::compute(table, today));
        }

        let ordered = self
            .state
            .daily_order
            .iter()
            .flat_map(|order| order.ids.iter())
            .filter_map(|&id| table.get(id))
            .filter(|record| record.has_cover());

        search::filter(ordered, &SearchQuery::parse(&self.state.last_query))
    }

    fn emit(&self, view: View, notices: Vec<Notice>) -> RenderState {
        RenderState {
            mode: self.state.mode,
            view,
            notices,
            url: self.url.to_query_string(),
        }
    }
}
