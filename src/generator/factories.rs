//! Infinite arithmetic sources.

use std::ops::Add;

use super::Generator;

/// Yields `start, start + step, start + 2·step, ...` forever.
///
/// Every drive restarts from `start`. Bound the result with
/// [`take`](Generator::take), [`take_while`](Generator::take_while) or a
/// short-circuiting terminal.
///
/// # Examples
///
/// ```rust
/// use lazyseq::generator::count_by;
///
/// let evens = count_by(10, 2).take(3);
/// assert_eq!(evens.to_vec().unwrap(), vec![10, 12, 14]);
/// assert_eq!(evens.to_vec().unwrap(), vec![10, 12, 14]);
///
/// let halves = count_by(0.0, 0.5).take(3);
/// assert_eq!(halves.to_vec().unwrap(), vec![0.0, 0.5, 1.0]);
/// ```
pub fn count_by<N>(start: N, step: N) -> Generator<N>
where
    N: Copy + Add<Output = N> + 'static,
{
    Generator::from_fn(move |scope| {
        let mut current = start;
        loop {
            scope.yield_value(current)?;
            current = current + step;
        }
    })
}

/// Yields `start, start + 1, start + 2, ...` forever.
///
/// # Examples
///
/// ```rust
/// use lazyseq::generator::count;
///
/// assert_eq!(count(3).take(2).to_vec().unwrap(), vec![3, 4]);
/// ```
pub fn count<N>(start: N) -> Generator<N>
where
    N: Copy + Add<Output = N> + From<u8> + 'static,
{
    count_by(start, N::from(1))
}

/// Yields the `length` consecutive values starting at `start`.
///
/// # Examples
///
/// ```rust
/// use lazyseq::generator::range;
///
/// assert_eq!(range(0, 5).to_vec().unwrap(), vec![0, 1, 2, 3, 4]);
/// assert!(range(7, 0).to_vec().unwrap().is_empty());
/// ```
pub fn range<N>(start: N, length: usize) -> Generator<N>
where
    N: Copy + Add<Output = N> + From<u8> + 'static,
{
    count(start).take(length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 5, vec![0, 1, 2, 3, 4])]
    #[case(-2, 3, vec![-2, -1, 0])]
    #[case(9, 1, vec![9])]
    #[case(9, 0, vec![])]
    fn range_yields_consecutive_values(
        #[case] start: i64,
        #[case] length: usize,
        #[case] expected: Vec<i64>,
    ) {
        assert_eq!(range(start, length).to_vec().unwrap(), expected);
    }

    #[rstest]
    fn count_restarts_on_every_drive() {
        let naturals = count(1_u32);
        assert_eq!(naturals.take(2).to_vec().unwrap(), vec![1, 2]);
        assert_eq!(naturals.take(3).to_vec().unwrap(), vec![1, 2, 3]);
    }

    #[rstest]
    fn count_by_supports_negative_steps() {
        let down = count_by(5_i8, -2).take(4);
        assert_eq!(down.to_vec().unwrap(), vec![5, 3, 1, -1]);
    }

    #[rstest]
    fn count_is_infinite_but_lazy() {
        let large = count(0_u64).skip(1_000).first().unwrap();
        assert_eq!(large, Some(1_000));
    }
}
