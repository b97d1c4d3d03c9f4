use std::cmp::Ordering;

/// Returns the index of the first item that sorts before its predecessor.
///
/// Ties are in order, so `[1, 1, 2]` is sorted ascending.
///
/// ```
/// use structeq_util::sort::first_unsorted_by;
///
/// let prices = [7.99, 9.99, 15.99, 29.99, 49.99, 15.99];
/// assert_eq!(first_unsorted_by(&prices, |a: &f64, b: &f64| a.total_cmp(b)), Some(5));
/// ```
pub fn first_unsorted_by<T, F>(items: &[T], mut compare: F) -> Option<usize>
where
    F: FnMut(&T, &T) -> Ordering,
{
    items
        .windows(2)
        .position(|pair| compare(&pair[0], &pair[1]) == Ordering::Greater)
        .map(|i| i + 1)
}

pub fn is_sorted_by<T, F>(items: &[T], compare: F) -> bool
where
    F: FnMut(&T, &T) -> Ordering,
{
    first_unsorted_by(items, compare).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_slices_are_sorted() {
        let empty: [i32; 0] = [];
        assert!(is_sorted_by(&empty, i32::cmp));
        assert!(is_sorted_by(&[1], i32::cmp));
    }

    #[test]
    fn test_ties_are_sorted() {
        assert!(is_sorted_by(&[1, 1, 2], i32::cmp));
    }

    #[test]
    fn test_reports_first_break() {
        assert_eq!(first_unsorted_by(&[1, 3, 2, 0], i32::cmp), Some(2));
        assert_eq!(first_unsorted_by(&[3, 2, 1], |a: &i32, b: &i32| b.cmp(a)), None);
    }
}
