//! Enhancer factory and wrapped instances
//!
//! ```ignore
//! let enhancer = with_query_params(
//!     EnhancerConfig::new()
//!         .param("page", ParamSpec::new(Validator::IntegerRange { min: Some(1), max: None }).with_default(1))
//!         .strip_unknown_keys(true),
//! )?;
//! let list = enhancer.wrap(ItemList, history.clone());
//! let output = list.settle(&props)?;
//! ```

use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use super::canonical::{canonicalize, Canonicalization, Outcome};
use super::component::{Component, QueryProps};
use super::errors::{ReconcileError, ReconcileResult};
use super::gating::RenderGate;
use super::setter::QuerySetter;
use crate::codec::{QueryCodec, StandardCodec};
use crate::navigation::{Location, Navigator};
use crate::observability::{log_event_with_fields, Event, MetricsSnapshot, ReconcilerMetrics};
use crate::schema::{EnhancerConfig, SchemaResult, SchemaValidator};

/// Define an enhancer.
///
/// # Errors
///
/// Returns a `ConfigurationError` when the configuration is rejected by
/// [`SchemaValidator`]; no enhancer exists in that case.
pub fn with_query_params(config: EnhancerConfig) -> SchemaResult<Enhancer> {
    Enhancer::new(config)
}

/// A validated configuration, ready to wrap components.
#[derive(Clone)]
pub struct Enhancer {
    config: Arc<EnhancerConfig>,
    codec: Arc<dyn QueryCodec>,
    metrics: Arc<ReconcilerMetrics>,
}

impl Enhancer {
    /// Validate `config` and build an enhancer using [`StandardCodec`].
    pub fn new(config: EnhancerConfig) -> SchemaResult<Self> {
        if let Err(e) = SchemaValidator::new(&config).validate() {
            log_event_with_fields(
                Event::ConfigRejected,
                &[("code", e.code()), ("reason", e.to_string().as_str())],
            );
            return Err(e);
        }

        log_event_with_fields(
            Event::EnhancerDefined,
            &[
                ("params", config.param_count().to_string().as_str()),
                ("strip_unknown_keys", config.strip_unknown_keys.to_string().as_str()),
            ],
        );

        let codec = Arc::new(StandardCodec::new(config.codec_options.clone()));
        Ok(Self {
            config: Arc::new(config),
            codec,
            metrics: Arc::new(ReconcilerMetrics::new()),
        })
    }

    /// Replace the query codec.
    pub fn with_codec(mut self, codec: Arc<dyn QueryCodec>) -> Self {
        self.codec = codec;
        self
    }

    pub fn config(&self) -> &EnhancerConfig {
        &self.config
    }

    /// Counters shared by every instance this enhancer wrapped
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Run one canonicalization pass without rendering anything.
    pub fn canonicalize(&self, location: &Location, props: &Value) -> Canonicalization {
        canonicalize(&self.config, self.codec.as_ref(), location, props)
    }

    /// Wrap a component, binding it to a navigator.
    pub fn wrap<C: Component>(&self, inner: C, navigator: Rc<dyn Navigator>) -> WithQueryParams<C> {
        let setter = QuerySetter::new(navigator.clone(), self.codec.clone(), self.metrics.clone());
        WithQueryParams {
            enhancer: self.clone(),
            inner,
            navigator,
            setter,
            gate: RefCell::new(RenderGate::new()),
        }
    }
}

impl std::fmt::Debug for Enhancer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enhancer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Result of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered<O> {
    /// The location was not canonical; nothing was rendered
    Redirect(Location),
    /// The wrapped component's output
    Component(O),
}

impl<O> Rendered<O> {
    pub fn is_redirect(&self) -> bool {
        matches!(self, Rendered::Redirect(_))
    }

    pub fn redirect_target(&self) -> Option<&Location> {
        match self {
            Rendered::Redirect(to) => Some(to),
            Rendered::Component(_) => None,
        }
    }

    pub fn into_output(self) -> Option<O> {
        match self {
            Rendered::Component(out) => Some(out),
            Rendered::Redirect(_) => None,
        }
    }
}

/// A component wrapped by an [`Enhancer`].
pub struct WithQueryParams<C> {
    enhancer: Enhancer,
    inner: C,
    navigator: Rc<dyn Navigator>,
    setter: QuerySetter,
    gate: RefCell<RenderGate>,
}

impl<C: Component> WithQueryParams<C> {
    /// `withQueryParams(<inner display name>)`
    pub fn display_name(&self) -> String {
        format!("withQueryParams({})", self.inner.display_name())
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// The setter handed to the wrapped component
    pub fn setter(&self) -> &QuerySetter {
        &self.setter
    }

    /// Whether new inputs warrant another pass.
    ///
    /// True when the props differ structurally from the last pass, or the
    /// incoming search differs from the one the last pass started with.
    pub fn should_update(&self, next_props: &Value, next_location: &Location) -> bool {
        let update = self.gate.borrow().should_update(next_props, next_location);
        if !update {
            self.enhancer.metrics.increment_skipped_updates();
            log_event_with_fields(Event::RenderSkipped, &[("location", next_location.href().as_str())]);
        }
        update
    }

    /// One evaluation pass against an explicit location.
    ///
    /// Either redirects to the canonical location or renders the wrapped
    /// component with the canonical query.
    pub fn render(&self, location: &Location, props: &Value) -> Rendered<C::Output> {
        self.gate.borrow_mut().record(props, location);

        let result = self.enhancer.canonicalize(location, props);
        match result.outcome {
            Outcome::Redirect(to) => {
                self.enhancer.metrics.increment_redirects();
                log_event_with_fields(
                    Event::QueryRedirect,
                    &[("from", location.href().as_str()), ("to", to.href().as_str())],
                );
                Rendered::Redirect(to)
            }
            Outcome::Render => {
                self.enhancer.metrics.increment_renders();
                log_event_with_fields(Event::QueryCanonical, &[("location", location.href().as_str())]);
                let query_props = QueryProps {
                    props,
                    location,
                    query_params: &result.canonical,
                    set_query_params: &self.setter,
                };
                Rendered::Component(self.inner.render(&query_props))
            }
        }
    }

    /// Render against the navigator's location, following redirects until a
    /// fixed point.
    ///
    /// # Errors
    ///
    /// `QS_REDIRECT_LOOP` when more than `max_redirects` consecutive
    /// redirects are needed, which only happens with impure validators or
    /// defaults.
    pub fn settle(&self, props: &Value) -> ReconcileResult<C::Output> {
        let limit = self.enhancer.config.max_redirects;
        let mut redirects = 0;
        loop {
            let location = self.navigator.location();
            match self.render(&location, props) {
                Rendered::Component(out) => return Ok(out),
                Rendered::Redirect(to) => {
                    if redirects >= limit {
                        log_event_with_fields(
                            Event::RedirectLoop,
                            &[("limit", limit.to_string().as_str()), ("to", to.href().as_str())],
                        );
                        return Err(ReconcileError::RedirectLoop {
                            limit,
                            location: to,
                        });
                    }
                    self.navigator.redirect(&to);
                    redirects += 1;
                }
            }
        }
    }
}
