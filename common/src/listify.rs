//! Coercion of arbitrary values into a `Vec`.
//!
//! A `Vec` is returned as is, other collections are collected in iteration order and anything
//! else, text included, is wrapped in a one element `Vec`.

use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::ops::{Range, RangeInclusive};
use std::path::PathBuf;

pub trait Listify {
    type Item;

    fn listify(self) -> Vec<Self::Item>;
}

/// ```
/// use cinante::listify::listify;
///
/// assert_eq!(listify(0..3), vec![0, 1, 2]);
/// assert_eq!(listify("https://www.rust-lang.org"), vec!["https://www.rust-lang.org"]);
/// ```
pub fn listify<L: Listify>(obj: L) -> Vec<L::Item> {
    obj.listify()
}

/// Collects any iterator, including the ones [`Listify`] knows nothing about.
pub fn listify_iter<I: IntoIterator>(iter: I) -> Vec<I::Item> {
    iter.into_iter().collect()
}

impl<T> Listify for Vec<T> {
    type Item = T;

    fn listify(self) -> Vec<T> {
        self
    }
}

macro_rules! listify_collected {
    ($($collection:ty => $item:ty, [$($generics:tt)*]);* $(;)?) => {
        $(
            impl<$($generics)*> Listify for $collection {
                type Item = $item;

                fn listify(self) -> Vec<$item> {
                    self.into_iter().collect()
                }
            }
        )*
    };
}

listify_collected! {
    VecDeque<T> => T, [T];
    LinkedList<T> => T, [T];
    BTreeSet<T> => T, [T];
    HashSet<T, S> => T, [T, S];
    std::vec::IntoIter<T> => T, [T];
}

macro_rules! listify_ranges {
    ($($t:ty),* $(,)?) => {
        $(
            impl Listify for Range<$t> {
                type Item = $t;

                fn listify(self) -> Vec<$t> {
                    self.collect()
                }
            }

            impl Listify for RangeInclusive<$t> {
                type Item = $t;

                fn listify(self) -> Vec<$t> {
                    self.collect()
                }
            }
        )*
    };
}

listify_ranges!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, char);

impl<T, const N: usize> Listify for [T; N] {
    type Item = T;

    fn listify(self) -> Vec<T> {
        self.into_iter().collect()
    }
}

impl<'a, T: Clone> Listify for &'a [T] {
    type Item = T;

    fn listify(self) -> Vec<T> {
        self.to_vec()
    }
}

/// Iterating a map yields its keys.
impl<K, V> Listify for BTreeMap<K, V> {
    type Item = K;

    fn listify(self) -> Vec<K> {
        self.into_keys().collect()
    }
}

impl<K, V, S> Listify for HashMap<K, V, S> {
    type Item = K;

    fn listify(self) -> Vec<K> {
        self.into_keys().collect()
    }
}

macro_rules! listify_wrapped {
    ($($t:ty),* $(,)?) => {
        $(
            impl Listify for $t {
                type Item = $t;

                fn listify(self) -> Vec<$t> {
                    vec![self]
                }
            }
        )*
    };
}

listify_wrapped!(
    bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, String,
    PathBuf, (),
);

impl<'a> Listify for &'a str {
    type Item = &'a str;

    fn listify(self) -> Vec<&'a str> {
        vec![self]
    }
}

impl<T> Listify for Option<T> {
    type Item = Option<T>;

    fn listify(self) -> Vec<Option<T>> {
        vec![self]
    }
}

/// Arrays are returned without copy, objects yield their keys and every other value is wrapped.
impl Listify for Value {
    type Item = Value;

    fn listify(self) -> Vec<Value> {
        match self {
            Value::Array(items) => items,
            Value::Object(map) => map.into_iter().map(|(key, _)| Value::String(key)).collect(),
            other => vec![other],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_iterables() {
        assert_eq!(listify(0..3), vec![0, 1, 2]);
        assert_eq!(listify(1..=3u8), vec![1, 2, 3]);
        assert_eq!(listify(['a', 'b']), vec!['a', 'b']);
        assert_eq!(listify(&[1, 2, 3][..]), vec![1, 2, 3]);
        assert_eq!(listify(VecDeque::from(vec![3, 1, 2])), vec![3, 1, 2]);
        assert_eq!(
            listify(BTreeSet::from(["b", "a", "c"])),
            vec!["a", "b", "c"]
        );
        assert_eq!(listify(vec![1, 2].into_iter()), vec![1, 2]);
    }

    #[test]
    fn test_maps_yield_keys() {
        let map = BTreeMap::from([("k2", 2), ("k1", 1)]);
        assert_eq!(listify(map), vec!["k1", "k2"]);
        let mut keys = listify(HashMap::from([(1, "one"), (2, "two")]));
        keys.sort();
        assert_eq!(keys, vec![1, 2]);
    }

    #[test]
    fn test_vec_is_not_copied() {
        let v = vec![String::from("a"), String::from("b")];
        let ptr = v.as_ptr();
        let listified = listify(v);
        assert_eq!(listified.as_ptr(), ptr);
        assert_eq!(listified, vec!["a", "b"]);
    }

    #[test]
    fn test_scalars_and_text_are_wrapped() {
        assert_eq!(listify("abc"), vec!["abc"]);
        assert_eq!(listify(String::from("abc")), vec![String::from("abc")]);
        assert_eq!(listify(42), vec![42]);
        assert_eq!(listify(1.5), vec![1.5]);
        assert_eq!(listify(true), vec![true]);
        assert_eq!(listify(None::<u8>), vec![None]);
        assert_eq!(listify(Some(3)), vec![Some(3)]);
        assert_eq!(
            listify(PathBuf::from("/tmp")),
            vec![PathBuf::from("/tmp")]
        );
    }

    #[test]
    fn test_json_values() {
        let array = json!([1, "two", null]);
        assert_eq!(listify(array), vec![json!(1), json!("two"), json!(null)]);
        assert_eq!(
            listify(json!({"b": 1, "a": 2})),
            vec![json!("a"), json!("b")]
        );
        assert_eq!(listify(json!("abc")), vec![json!("abc")]);
        assert_eq!(listify(json!(3)), vec![json!(3)]);
        assert_eq!(listify(json!(null)), vec![json!(null)]);
    }

    #[test]
    fn test_listify_iter() {
        let doubled = listify_iter((0..3).map(|i| i * 2));
        assert_eq!(doubled, vec![0, 2, 4]);
        assert_eq!(listify_iter("ab".chars()), vec!['a', 'b']);
    }
}
