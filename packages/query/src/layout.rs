//! The structured fallback query layout.
//!
//! [`StructuredFallbackQuery`] combines the fallback cascade with
//! caller-registered score and filter views and renders them into a single
//! [`SearchRequest`].

use fallback_query_models::{SIZE_KEY, SearchRequest, TRACK_SCORES_KEY, VarValue, VariableStore};

use crate::cascade;
use crate::view::{View, render_views};

/// Query layout for structured geocoding input.
///
/// Score and filter views accumulate in registration order. Rendering does
/// not modify the layout, so one instance can render any number of stores.
#[derive(Default)]
pub struct StructuredFallbackQuery {
    score: Vec<Box<dyn View>>,
    filter: Vec<Box<dyn View>>,
}

impl std::fmt::Debug for StructuredFallbackQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StructuredFallbackQuery")
            .field("score_views", &self.score.len())
            .field("filter_views", &self.filter.len())
            .finish()
    }
}

impl StructuredFallbackQuery {
    /// Creates a layout with no registered views.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a view whose fragments become scoring functions.
    pub fn score(&mut self, view: impl View + 'static) -> &mut Self {
        self.score.push(Box::new(view));
        self
    }

    /// Registers a view whose fragments become mandatory filters.
    pub fn filter(&mut self, view: impl View + 'static) -> &mut Self {
        self.filter.push(Box::new(view));
        self
    }

    /// Renders the request for `vs`.
    ///
    /// The should-list comes from the fallback cascade, the filter list
    /// and scoring functions from the registered views. Every registered
    /// view is invoked once per call and empty fragments are dropped.
    #[must_use]
    pub fn render(&self, vs: &VariableStore) -> SearchRequest {
        let should = cascade::evaluate(vs);
        let filters = render_views(&self.filter, vs);
        let functions = render_views(&self.score, vs);

        log::debug!(
            "rendered structured fallback query: {} should, {} filter, {} functions",
            should.len(),
            filters.len(),
            functions.len()
        );

        let mut request = SearchRequest::new(should, filters, functions);
        request.size = vs.var(SIZE_KEY).map(VarValue::to_json);
        request.track_scores = vs.var(TRACK_SCORES_KEY).map(VarValue::to_json);
        request
    }
}
