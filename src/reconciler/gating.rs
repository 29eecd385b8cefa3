//! Render gating
//!
//! Skips re-evaluation when neither the host props nor the search string
//! changed since the last pass. Purely an optimization: rendering is always
//! safe to repeat.

use serde_json::{Number, Value};

use crate::navigation::{normalize_search, Location};

/// Structural equality over host props.
///
/// Numbers compare by value (`1 == 1.0`); objects compare independent of key
/// order. Props are plain acyclic data.
pub fn props_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(p, q)| props_equal(p, q))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(k, v)| y.get(k).map_or(false, |w| props_equal(v, w)))
        }
        _ => false,
    }
}

fn numbers_equal(x: &Number, y: &Number) -> bool {
    if let (Some(a), Some(b)) = (x.as_i64(), y.as_i64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (x.as_u64(), y.as_u64()) {
        return a == b;
    }
    match (x.as_f64(), y.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Inputs of the last evaluation pass.
#[derive(Debug, Clone, Default)]
pub struct RenderGate {
    last: Option<(Value, String)>,
}

impl RenderGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a pass with these inputs could produce a different result.
    ///
    /// The incoming search is compared with the search recorded when the
    /// last pass started, not with the navigator's live location.
    pub fn should_update(&self, next_props: &Value, next_location: &Location) -> bool {
        match &self.last {
            None => true,
            Some((props, search)) => {
                !props_equal(props, next_props) || normalize_search(&next_location.search) != *search
            }
        }
    }

    /// Record the inputs of a pass that is starting.
    pub fn record(&mut self, props: &Value, location: &Location) {
        self.last = Some((props.clone(), normalize_search(&location.search)));
    }
}
