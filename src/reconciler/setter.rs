//! Imperative query updates
//!
//! The setter merges into whatever the navigator reports as current at call
//! time, then pushes. It never validates: the next render pass corrects
//! anything the merge made invalid.

use serde_json::Value;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::codec::{QueryCodec, QueryMap};
use crate::navigation::{LocationPatch, Navigator};
use crate::observability::{log_event_with_fields, Event, ReconcilerMetrics};

/// Handle given to wrapped components for changing query parameters.
#[derive(Clone)]
pub struct QuerySetter {
    navigator: Rc<dyn Navigator>,
    codec: Arc<dyn QueryCodec>,
    metrics: Arc<ReconcilerMetrics>,
}

impl QuerySetter {
    pub fn new(
        navigator: Rc<dyn Navigator>,
        codec: Arc<dyn QueryCodec>,
        metrics: Arc<ReconcilerMetrics>,
    ) -> Self {
        Self {
            navigator,
            codec,
            metrics,
        }
    }

    /// Shallow-merge `patch` over the current query and push the result.
    ///
    /// Keys in `patch` win; every other current key is kept. Unknown keys are
    /// accepted. Returns the pushed href.
    pub fn set_query_params<I, K, V>(&self, patch: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.navigate(|query| {
            for (key, value) in patch {
                query.insert(key.into(), value.into());
            }
        })
    }

    /// Set a single parameter. Returns the pushed href.
    pub fn set_query_param(&self, key: impl Into<String>, value: impl Into<Value>) -> String {
        self.set_query_params([(key.into(), value.into())])
    }

    /// Remove the named parameters from the current query and push the result.
    pub fn remove_query_params<I, K>(&self, keys: I) -> String
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        self.navigate(|query| {
            for key in keys {
                query.remove(key.as_ref());
            }
        })
    }

    fn navigate(&self, apply: impl FnOnce(&mut QueryMap)) -> String {
        let current = self.navigator.location();
        let mut query = self.codec.parse(&current.search);
        apply(&mut query);

        let search = self.codec.stringify(&query);
        let href = self
            .navigator
            .create_href(&LocationPatch::new(current.pathname, search));
        self.navigator.push(&href);

        self.metrics.increment_pushes();
        log_event_with_fields(Event::QueryPush, &[("href", href.as_str())]);
        href
    }
}

impl fmt::Debug for QuerySetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuerySetter").finish_non_exhaustive()
    }
}
