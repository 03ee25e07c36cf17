use std::collections::HashMap;
use std::hash::Hash;

/// Buckets `items` by `key_fn`, keeping buckets in the order their key was
/// first seen and items in input order within each bucket.
pub fn group_by<T, K, F>(items: impl IntoIterator<Item = T>, mut key_fn: F) -> Vec<(K, Vec<T>)>
where
    K: Eq + Hash + Clone,
    F: FnMut(&T) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();

    for item in items {
        let key = key_fn(&item);
        match index.get(&key) {
            Some(&i) => groups[i].1.push(item),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![item]));
            }
        }
    }

    groups
}

/// Computes `part / total` as a percentage. Returns 0.0 when `total` is zero.
pub fn pct(part: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by_keeps_first_seen_order() {
        let groups = group_by(vec![3, 1, 4, 1, 5, 9, 2, 6], |n| n % 3);
        let keys: Vec<_> = groups.iter().map(|(k, _)| *k).collect();

        assert_eq!(keys, vec![0, 1, 2]);
        assert_eq!(groups[0].1, vec![3, 9, 6]);
        assert_eq!(groups[1].1, vec![1, 4, 1]);
        assert_eq!(groups[2].1, vec![5, 2]);
    }

    #[test]
    fn test_group_by_empty_input() {
        let groups = group_by(Vec::<u8>::new(), |n| *n);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_pct() {
        assert_eq!(pct(10, 0), 0.0);
        assert_eq!(pct(30, 60), 50.0);
        assert_eq!(pct(90, 60), 150.0);
    }
}
