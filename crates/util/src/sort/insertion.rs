use std::cmp::Ordering;

/// Stable insertion sort with a custom comparator.
///
/// Equal items keep their relative order, which matters when a listing
/// contains ties (two products at the same price). Listings checked here are
/// a handful of items long, where this beats the allocation in `sort_by`.
///
/// # Examples
///
/// ```
/// use structeq_util::sort::insertion_sort_by;
///
/// let mut prices = vec![29.99, 7.99, 15.99];
/// insertion_sort_by(&mut prices, |a: &f64, b: &f64| b.total_cmp(a));
/// assert_eq!(prices, vec![29.99, 15.99, 7.99]);
/// ```
pub fn insertion_sort_by<T, F>(arr: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..arr.len() {
        let mut j = i;
        while j > 0 && compare(&arr[j - 1], &arr[j]) == Ordering::Greater {
            arr.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Stable insertion sort by an extracted key.
///
/// ```
/// use structeq_util::sort::insertion_sort_by_key;
///
/// let mut names = vec!["Sauce Labs Onesie", "Sauce Labs Backpack"];
/// insertion_sort_by_key(&mut names, |s| s.len());
/// assert_eq!(names, vec!["Sauce Labs Onesie", "Sauce Labs Backpack"]);
/// ```
pub fn insertion_sort_by_key<T, K, F>(arr: &mut [T], mut key: F)
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    insertion_sort_by(arr, |a, b| key(a).cmp(&key(b)));
}
