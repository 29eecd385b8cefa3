//! Query reconciler
//!
//! Keeps a wrapped component's query parameters canonical. Every render pass
//! parses the location's query, validates and defaults the declared
//! parameters, filters undeclared ones and compares the serialized result
//! with the location:
//!
//! - equal: the wrapped component renders with the canonical parameters
//! - different: the pass yields a redirect to the canonical location and
//!   nothing renders
//!
//! The wrapped component therefore never observes an invalid or unfiltered
//! query value. Redirect targets are fixed points, so a settle pass
//! terminates after at most one redirect when validators are pure.

mod canonical;
mod component;
mod enhancer;
mod errors;
mod gating;
mod setter;

pub use canonical::{canonicalize, Canonicalization, Outcome};
pub use component::{short_type_name, Component, QueryProps};
pub use enhancer::{with_query_params, Enhancer, Rendered, WithQueryParams};
pub use errors::{ReconcileError, ReconcileResult};
pub use gating::{props_equal, RenderGate};
pub use setter::QuerySetter;
