//! Construction from dynamically shaped JSON values.
//!
//! The statically typed constructors cannot receive a value of the wrong
//! shape. JSON input can, so these constructors check the shape up front and
//! report a [`TypeError`] instead.

use serde_json::Value;

use super::{Flow, Generator, Scope, TypeError};

/// Name of the kind of a JSON value, as used in error messages.
const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Generator<Value> {
    /// Creates a generator from a JSON array or object.
    ///
    /// An array yields its elements in order. An object yields one
    /// `[key, value]` array per member in the object's own order; use
    /// [`Generator::from_map`] on the [`serde_json::Map`] directly for
    /// `(String, Value)` tuples.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::NotIterable`] for any other kind of value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::generator::Generator;
    /// use serde_json::json;
    ///
    /// let items = Generator::from_json(json!([1, "two"])).unwrap();
    /// assert_eq!(items.to_vec().unwrap(), vec![json!(1), json!("two")]);
    ///
    /// let entries = Generator::from_json(json!({"a": 1})).unwrap();
    /// assert_eq!(entries.pluck("0").to_vec().unwrap(), vec![json!("a")]);
    ///
    /// assert!(Generator::from_json(json!(42)).is_err());
    /// ```
    pub fn from_json(value: Value) -> Result<Self, TypeError> {
        match value {
            Value::Array(items) => Ok(Self::from_vec(items)),
            Value::Object(members) => Ok(Self::from_vec(
                members
                    .into_iter()
                    .map(|(key, member)| Value::Array(vec![Value::String(key), member]))
                    .collect(),
            )),
            other => Err(TypeError::NotIterable { found: kind(&other) }),
        }
    }
}

impl<T: 'static> Generator<T> {
    /// Creates a generator from a routine whose fixed parameters arrive as a
    /// JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::ParamsNotList`] if `params` is not an array.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::generator::Generator;
    /// use serde_json::json;
    ///
    /// let repeated = Generator::with_json_params(json!(["x", 3]), |params, scope| {
    ///     let times = params[1].as_u64().unwrap_or(0);
    ///     for _ in 0..times {
    ///         scope.yield_value(params[0].clone())?;
    ///     }
    ///     Ok(())
    /// })
    /// .unwrap();
    /// assert_eq!(repeated.count().unwrap(), 3);
    ///
    /// let rejected = Generator::<()>::with_json_params(json!({"x": 3}), |_, _| Ok(()));
    /// assert_eq!(
    ///     rejected.unwrap_err().to_string(),
    ///     "params must be in array, found object"
    /// );
    /// ```
    pub fn with_json_params<F>(params: Value, routine: F) -> Result<Self, TypeError>
    where
        F: Fn(&[Value], &mut Scope<'_, T>) -> Flow + 'static,
    {
        match params {
            Value::Array(params) => Ok(Self::with_params(params, move |params, scope| {
                routine(params, scope)
            })),
            other => Err(TypeError::ParamsNotList { found: kind(&other) }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(null), "null")]
    #[case(json!(true), "boolean")]
    #[case(json!(1.5), "number")]
    #[case(json!("text"), "string")]
    fn scalars_are_not_iterable(#[case] value: Value, #[case] found: &'static str) {
        assert_eq!(
            Generator::from_json(value).unwrap_err(),
            TypeError::NotIterable { found }
        );
    }

    #[rstest]
    fn objects_yield_entries_in_insertion_order() {
        let entries = Generator::from_json(json!({"zeta": 1, "alpha": 2, "mid": 3})).unwrap();
        let keys = entries.pluck("0").to_vec().unwrap();
        assert_eq!(keys, vec![json!("zeta"), json!("alpha"), json!("mid")]);
        assert_eq!(
            entries.first().unwrap(),
            Some(json!(["zeta", 1]))
        );

        let total = entries
            .pluck("1")
            .fold(0, |sum, value| sum + value.as_i64().unwrap_or(0));
        assert_eq!(total.unwrap(), 6);
    }

    #[rstest]
    fn empty_collections_produce_nothing() {
        assert_eq!(Generator::from_json(json!([])).unwrap().count().unwrap(), 0);
        assert_eq!(Generator::from_json(json!({})).unwrap().count().unwrap(), 0);
    }

    #[rstest]
    fn json_params_are_lent_to_every_drive() {
        let generator: Generator<i64> =
            Generator::with_json_params(json!([1, 2, 3]), |params, scope| {
                for param in params {
                    scope.yield_value(param.as_i64().unwrap_or_default())?;
                }
                Ok(())
            })
            .unwrap();
        assert_eq!(generator.to_vec().unwrap(), vec![1, 2, 3]);
        assert_eq!(generator.to_vec().unwrap(), vec![1, 2, 3]);
    }

    #[rstest]
    #[case(json!(null), "null")]
    #[case(json!("abc"), "string")]
    fn non_array_params_are_rejected(#[case] params: Value, #[case] found: &'static str) {
        let result = Generator::<u8>::with_json_params(params, |_, _| Ok(()));
        assert_eq!(result.unwrap_err(), TypeError::ParamsNotList { found });
    }
}
