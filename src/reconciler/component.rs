//! Wrapped component interface

use serde_json::Value;
use std::borrow::Cow;

use super::setter::QuerySetter;
use crate::codec::QueryMap;
use crate::navigation::Location;

/// Props handed to a wrapped component on every render.
#[derive(Debug, Clone, Copy)]
pub struct QueryProps<'a> {
    /// Host props, passed through unchanged
    pub props: &'a Value,
    /// Location the pass was evaluated against
    pub location: &'a Location,
    /// Canonical query parameters
    pub query_params: &'a QueryMap,
    /// Imperative query updates
    pub set_query_params: &'a QuerySetter,
}

impl<'a> QueryProps<'a> {
    /// Canonical value of one parameter
    pub fn param(&self, name: &str) -> Option<&'a Value> {
        self.query_params.get(name)
    }

    /// Canonical value of one parameter as a string, if it is one
    pub fn param_str(&self, name: &str) -> Option<&'a str> {
        self.param(name).and_then(Value::as_str)
    }
}

/// A component the enhancer can wrap.
pub trait Component {
    type Output;

    fn render(&self, props: &QueryProps<'_>) -> Self::Output;

    /// Name used in the wrapper's display name
    fn display_name(&self) -> Cow<'static, str> {
        Cow::Borrowed(short_type_name::<Self>())
    }
}

impl<F, O> Component for F
where
    F: Fn(&QueryProps<'_>) -> O,
{
    type Output = O;

    fn render(&self, props: &QueryProps<'_>) -> O {
        self(props)
    }
}

/// Last path segment of a type's name, without generics.
///
/// Anonymous types such as closures are named `Component`.
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    let short = base.rsplit("::").next().unwrap_or(base);
    if short.is_empty() || short.contains('{') {
        "Component"
    } else {
        short
    }
}
