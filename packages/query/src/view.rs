//! The view contract: a pure function from a [`VariableStore`] to an
//! optional query fragment.
//!
//! A view that does not apply returns `None` or a falsy value. Falsy values
//! are the JSON equivalents of `false`, `""`, `0`, `null` and `NaN` (see
//! [`is_empty_fragment`]); they are dropped from rendered output but the
//! view is still invoked.

use fallback_query_models::VariableStore;
use serde_json::Value;

/// One structured piece of a rendered query.
pub type Fragment = Value;

/// Produces an optional [`Fragment`] from the variables in a store.
///
/// Implemented for every `Fn(&VariableStore) -> Option<Fragment>` closure
/// that is `Send + Sync`, so plain closures can be registered directly.
pub trait View: Send + Sync {
    /// Renders this view against `vs`.
    fn render(&self, vs: &VariableStore) -> Option<Fragment>;
}

impl<F> View for F
where
    F: Fn(&VariableStore) -> Option<Fragment> + Send + Sync,
{
    fn render(&self, vs: &VariableStore) -> Option<Fragment> {
        self(vs)
    }
}

/// Returns `true` for values that must not appear in rendered output:
/// `null`, `false`, the empty string, zero and `NaN`.
///
/// Objects and arrays are never empty fragments, even when they have no
/// entries.
#[must_use]
pub fn is_empty_fragment(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64().is_none_or(|f| f == 0.0 || f.is_nan()),
        Value::Bool(true) | Value::Array(_) | Value::Object(_) => false,
    }
}

/// Invokes `view` once and keeps its result only when it is a non-empty
/// fragment.
pub fn render_view(view: &dyn View, vs: &VariableStore) -> Option<Fragment> {
    view.render(vs).filter(|fragment| !is_empty_fragment(fragment))
}

/// Renders every view in order, keeping the non-empty fragments.
///
/// Every view is invoked exactly once, whatever the earlier views returned.
pub fn render_views(views: &[Box<dyn View>], vs: &VariableStore) -> Vec<Fragment> {
    views
        .iter()
        .filter_map(|view| render_view(&**view, vs))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use super::*;

    #[test]
    fn falsy_values_are_empty_fragments() {
        assert!(is_empty_fragment(&Value::Null));
        assert!(is_empty_fragment(&json!(false)));
        assert!(is_empty_fragment(&json!("")));
        assert!(is_empty_fragment(&json!(0)));
        assert!(is_empty_fragment(&json!(0.0)));
        assert!(is_empty_fragment(&json!(-0.0)));
    }

    #[test]
    fn nan_converts_to_an_empty_fragment() {
        assert!(is_empty_fragment(&json!(f64::NAN)));
    }

    #[test]
    fn truthy_values_are_kept() {
        assert!(!is_empty_fragment(&json!(true)));
        assert!(!is_empty_fragment(&json!("0")));
        assert!(!is_empty_fragment(&json!(" ")));
        assert!(!is_empty_fragment(&json!(1)));
        assert!(!is_empty_fragment(&json!(-3.5)));
        assert!(!is_empty_fragment(&json!({})));
        assert!(!is_empty_fragment(&json!([])));
        assert!(!is_empty_fragment(&json!({ "match": {} })));
    }

    #[test]
    fn closures_implement_view() {
        let view = |vs: &VariableStore| vs.var("size").map(Value::from);
        let mut vs = VariableStore::new();
        assert!(view.render(&vs).is_none());
        vs.set("size", 10);
        assert_eq!(view.render(&vs), Some(json!(10)));
    }

    #[test]
    fn render_views_invokes_every_view_in_order() {
        let calls = Arc::new(AtomicUsize::new(0));
        let outputs = vec![
            Some(json!({ "first": 1 })),
            None,
            Some(json!(0)),
            Some(json!({ "second": 2 })),
        ];

        let views: Vec<Box<dyn View>> = outputs
            .into_iter()
            .map(|output| {
                let calls = Arc::clone(&calls);
                Box::new(move |_: &VariableStore| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    output.clone()
                }) as Box<dyn View>
            })
            .collect();

        let rendered = render_views(&views, &VariableStore::new());

        assert_eq!(rendered, vec![json!({ "first": 1 }), json!({ "second": 2 })]);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }
}
