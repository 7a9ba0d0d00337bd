//! Lazy combinators.
//!
//! Every combinator returns a new [`Generator`] whose routine drives the
//! source with a freshly built consumer. No work happens until the result is
//! driven, and nothing is buffered.

use super::{Flow, Generator, IntoGenerator, Scope};
use crate::selector::{Record, Truthy};

impl<T: 'static, S: Default + 'static> Generator<T, S> {
    /// Forwards each value of this generator through `forward`.
    fn relay<U, F>(&self, forward: F) -> Generator<U>
    where
        U: 'static,
        F: Fn(&mut Scope<'_, U>, T, usize, &super::Stop) -> Flow + 'static,
    {
        let source = self.clone();
        Generator::from_fn(move |scope| {
            source.drive(|value, index, stop| {
                forward(scope, value, index, stop)?;
                Ok(S::default())
            })
        })
    }

    /// Keeps the values for which `predicate` is truthy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::generator::Generator;
    ///
    /// let words = Generator::from_vec(vec!["", "kept", "", "too"]);
    /// assert_eq!(words.filter(|word| *word).to_vec().unwrap(), vec!["kept", "too"]);
    /// ```
    pub fn filter<P, B>(&self, predicate: P) -> Generator<T>
    where
        P: Fn(&T) -> B + 'static,
        B: Truthy,
    {
        self.relay(move |scope, value, _, _| {
            if predicate(&value).is_truthy() {
                scope.yield_value(value)?;
            }
            Ok(())
        })
    }

    /// Transforms each value with `function`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::generator::Generator;
    ///
    /// let lengths = Generator::from_vec(vec!["a", "bcd"]).map(str::len);
    /// assert_eq!(lengths.to_vec().unwrap(), vec![1, 3]);
    /// ```
    pub fn map<U, F>(&self, function: F) -> Generator<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        self.relay(move |scope, value, _, _| {
            scope.yield_value(function(value))?;
            Ok(())
        })
    }

    /// Replaces each record with its field called `name`.
    pub fn pluck(&self, name: impl Into<std::borrow::Cow<'static, str>>) -> Generator<T::Field>
    where
        T: Record,
        T::Field: 'static,
    {
        let name = name.into();
        self.map(move |record| record.field(&name))
    }

    /// Forwards the first `count` values, then halts the source.
    ///
    /// The source is halted right after delivering its `count`-th value, so it
    /// never produces more than `count` values. `take(0)` does not drive the
    /// source at all.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::generator::count;
    ///
    /// assert_eq!(count(7).take(3).to_vec().unwrap(), vec![7, 8, 9]);
    /// ```
    pub fn take(&self, count: usize) -> Generator<T> {
        let source = self.clone();
        Generator::from_fn(move |scope| {
            if count == 0 {
                return Ok(());
            }
            source.drive(|value, index, stop| {
                scope.yield_value(value)?;
                if index + 1 >= count {
                    return stop.halt();
                }
                Ok(S::default())
            })
        })
    }

    /// Drops the first `count` values.
    pub fn skip(&self, count: usize) -> Generator<T> {
        self.relay(move |scope, value, index, _| {
            if index >= count {
                scope.yield_value(value)?;
            }
            Ok(())
        })
    }

    /// Forwards values while `predicate` holds and halts the source on the
    /// first failure. The failing value is not forwarded.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::generator::count;
    ///
    /// let small = count(1).take_while(|value: &i32| *value * *value < 20);
    /// assert_eq!(small.to_vec().unwrap(), vec![1, 2, 3, 4]);
    /// ```
    pub fn take_while<P, B>(&self, predicate: P) -> Generator<T>
    where
        P: Fn(&T) -> B + 'static,
        B: Truthy,
    {
        self.relay(move |scope, value, _, stop| {
            if predicate(&value).is_truthy() {
                scope.yield_value(value)?;
                Ok(())
            } else {
                stop.halt()
            }
        })
    }

    /// Drops the leading values for which `predicate` holds.
    ///
    /// Once `predicate` fails, every later value is forwarded, even those for
    /// which it would hold again.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::generator::Generator;
    ///
    /// let readings = Generator::from_vec(vec![0, 0, 3, 0, 5]);
    /// assert_eq!(readings.skip_while(|x| *x == 0).to_vec().unwrap(), vec![3, 0, 5]);
    /// ```
    pub fn skip_while<P, B>(&self, predicate: P) -> Generator<T>
    where
        P: Fn(&T) -> B + 'static,
        B: Truthy,
    {
        let source = self.clone();
        Generator::from_fn(move |scope| {
            let mut skipping = true;
            source.drive(|value, _, _| {
                skipping = skipping && predicate(&value).is_truthy();
                if !skipping {
                    scope.yield_value(value)?;
                }
                Ok(S::default())
            })
        })
    }

    /// Pairs each value with the element of `items` at the same position.
    ///
    /// The result ends with `items`, so an infinite source is fine.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::generator::count;
    ///
    /// let labelled = count(1).zip_with_array(vec!["one", "two"]);
    /// assert_eq!(labelled.to_vec().unwrap(), vec![(1, "one"), (2, "two")]);
    /// ```
    pub fn zip_with_array<U>(&self, items: Vec<U>) -> Generator<(T, U)>
    where
        U: Clone + 'static,
    {
        self.zip_with_array_by(items, |value, item| (value, item))
    }

    /// Like [`zip_with_array`](Self::zip_with_array), combining each pair with
    /// `zipper`.
    pub fn zip_with_array_by<U, V, Z>(&self, items: Vec<U>, zipper: Z) -> Generator<V>
    where
        U: Clone + 'static,
        V: 'static,
        Z: Fn(T, U) -> V + 'static,
    {
        let source = self.clone();
        let items: std::rc::Rc<[U]> = items.into();
        Generator::from_fn(move |scope| {
            let length = items.len();
            if length == 0 {
                return Ok(());
            }
            source.drive(|value, index, stop| {
                let Some(item) = items.get(index) else {
                    return stop.halt();
                };
                scope.yield_value(zipper(value, item.clone()))?;
                if index + 1 >= length {
                    return stop.halt();
                }
                Ok(S::default())
            })
        })
    }

    /// Yields every value of this generator, then every value of `other`.
    ///
    /// Both sides stay lazy: `other` is not driven until this generator ends,
    /// and not at all if the consumer stops first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::generator::{Generator, count};
    ///
    /// let joined = Generator::from_vec(vec![-1]).and(count(0));
    /// assert_eq!(joined.take(3).to_vec().unwrap(), vec![-1, 0, 1]);
    /// ```
    #[doc(alias = "concat")]
    pub fn and<G>(&self, other: G) -> Generator<T>
    where
        G: IntoGenerator<T>,
    {
        let first = self.map(std::convert::identity);
        let second = other.into_generator();
        Generator::from_fn(move |scope| {
            scope.yield_many(&first)?;
            scope.yield_many(&second)
        })
    }

    /// Removes every value equal to `excluded`.
    pub fn except(&self, excluded: T) -> Generator<T>
    where
        T: PartialEq,
    {
        self.filter(move |value| *value != excluded)
    }
}
