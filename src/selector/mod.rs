//! Selectors: extracting keys and predicate results from values.
//!
//! Generator combinators accept plain closures. A *field selector* built with
//! [`field`] is a closure too, so a field name can be used anywhere a key or
//! predicate function is expected.
//!
//! # Examples
//!
//! ```rust
//! use lazyseq::generator::Generator;
//! use lazyseq::selector::field;
//! use serde_json::{Value, json};
//!
//! let users = Generator::from_vec(vec![
//!     json!({"name": "ada", "admin": true}),
//!     json!({"name": "bob", "admin": false}),
//! ]);
//!
//! let admins = users.filter(field::<Value>("admin")).pluck("name");
//! assert_eq!(admins.to_vec().unwrap(), vec![json!("ada")]);
//! ```

mod truthy;

pub use truthy::Truthy;

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// A value with named fields.
///
/// Implemented for string-keyed maps and, with the `json` feature, for
/// [`serde_json::Value`].
pub trait Record {
    /// The type of a selected field.
    type Field;

    /// Returns the field called `name`.
    fn field(&self, name: &str) -> Self::Field;
}

impl<V: Clone> Record for BTreeMap<String, V> {
    type Field = Option<V>;

    fn field(&self, name: &str) -> Option<V> {
        self.get(name).cloned()
    }
}

impl<V: Clone, H: BuildHasher> Record for HashMap<String, V, H> {
    type Field = Option<V>;

    fn field(&self, name: &str) -> Option<V> {
        self.get(name).cloned()
    }
}

#[cfg(feature = "json")]
impl Record for serde_json::Value {
    type Field = Self;

    /// Object members are looked up by key and array elements by their
    /// decimal index. Anything missing selects `null`.
    fn field(&self, name: &str) -> Self {
        let selected = match self {
            Self::Array(items) => name.parse::<usize>().ok().and_then(|index| items.get(index)),
            _ => self.get(name),
        };
        selected.cloned().unwrap_or(Self::Null)
    }
}

/// Builds a selector that extracts the field called `name`.
///
/// # Examples
///
/// ```rust
/// use lazyseq::selector::field;
/// use std::collections::BTreeMap;
///
/// let age = field::<BTreeMap<String, u32>>("age");
/// let person = BTreeMap::from([("age".to_string(), 36)]);
/// assert_eq!(age(&person), Some(36));
/// ```
pub fn field<R>(name: impl Into<Cow<'static, str>>) -> impl Fn(&R) -> R::Field + Clone + 'static
where
    R: Record + ?Sized + 'static,
{
    let name = name.into();
    move |record: &R| record.field(&name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn field_reads_map_entries() {
        let price = field::<HashMap<String, f64>>("price".to_string());
        let item = HashMap::from([("price".to_string(), 2.5)]);
        assert_eq!(price(&item), Some(2.5));
        assert_eq!(price(&HashMap::new()), None);
    }

    #[cfg(feature = "json")]
    #[rstest]
    #[case(serde_json::json!({"id": 7}), "id", serde_json::json!(7))]
    #[case(serde_json::json!({"id": 7}), "missing", serde_json::json!(null))]
    #[case(serde_json::json!(["a", "b"]), "1", serde_json::json!("b"))]
    #[case(serde_json::json!(["a", "b"]), "x", serde_json::json!(null))]
    #[case(serde_json::json!(3), "id", serde_json::json!(null))]
    fn json_field_lookup(
        #[case] record: serde_json::Value,
        #[case] name: &'static str,
        #[case] expected: serde_json::Value,
    ) {
        assert_eq!(field::<serde_json::Value>(name)(&record), expected);
    }
}
