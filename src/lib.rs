//! querysync - schema-enforced query-string state for navigable components
//!
//! An enhancer validates a parameter schema once, then keeps every wrapped
//! component's query parameters canonical: invalid values are replaced by
//! defaults, undeclared keys are optionally stripped, and any location that
//! is not canonical is redirected before the component renders.

pub mod codec;
pub mod navigation;
pub mod observability;
pub mod reconciler;
pub mod schema;

pub use codec::{QueryCodec, QueryMap, StandardCodec};
pub use navigation::{Location, MemoryHistory, Navigator};
pub use reconciler::{with_query_params, Component, Enhancer, QueryProps, Rendered, WithQueryParams};
pub use schema::{ConfigurationError, EnhancerConfig, ParamDefault, ParamSpec, Validator};
