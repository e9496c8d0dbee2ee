use sscont::{super_fast_hash, ContainerError, HashTable, Iter, DEFAULT_BUCKET_CAPACITY};
use std::cell::Cell;
use std::rc::Rc;

const KEY_VALUES: [(&str, &str); 6] = [
    ("red", "Roses are red"),
    ("red", "Apples are red"),
    ("red", "Books are read"),
    ("blue", "The sky is blue"),
    ("green", "Grass is green"),
    ("green", "Avacadoes are green"),
];

#[test]
fn put_get_remove_walkthrough() {
    let mut t = HashTable::new(10).expect("create");
    assert_eq!(t.bucket_count(), 10);
    assert!(t.is_empty());

    for (k, v) in KEY_VALUES {
        let e = t.put(k, v).expect("put");
        assert_eq!(e.key(), k);
    }
    assert_eq!(t.keys().expect("keys").len(), 6);

    let reds = t.get_all("red").expect("get_all");
    assert_eq!(reds.len(), 3);
    for (i, v) in reds.iter().enumerate() {
        assert_eq!(**v, KEY_VALUES[i].1);
    }

    assert_eq!(t.get("blue"), Some(&"The sky is blue"));
    assert_eq!(t.remove("blue"), Some("The sky is blue"));
    assert_eq!(t.get("blue"), None);
    assert!(!t.contains_key("blue"));
    assert_eq!(t.len(), 5);

    t.teardown(None);
}

#[test]
fn same_key_k_times() {
    let mut t = HashTable::new(3).unwrap();
    for i in 0..5 {
        t.put("k", i).unwrap();
    }
    let all: Vec<i32> = t.get_all("k").unwrap().iter().map(|v| **v).collect();
    assert_eq!(all, [0, 1, 2, 3, 4]);

    for expected in 0..5 {
        assert_eq!(t.get("k"), Some(&expected));
        assert_eq!(t.remove("k"), Some(expected));
    }
    assert_eq!(t.get("k"), None);
    assert!(t.is_empty());
}

#[test]
fn single_put_then_remove_clears_key() {
    let mut t = HashTable::new(4).unwrap();
    t.put("only", 1).unwrap();
    assert_eq!(t.remove("only"), Some(1));
    assert_eq!(t.get("only"), None);
    assert!(t.get_all("only").unwrap().is_empty());
}

#[test]
fn keys_borrow_table_storage() {
    let mut t = HashTable::new(16).unwrap();
    let owned: Vec<String> = (0..100).map(|i| format!("item{i}")).collect();
    for (i, k) in owned.iter().enumerate() {
        t.put(k, i).unwrap();
    }
    let keys = t.keys().unwrap();
    let mut sorted: Vec<&str> = keys.iter().copied().collect();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), 100);
    for k in &keys {
        assert_eq!(owned[*t.get(k).unwrap()], *k);
    }
}

#[test]
fn caller_key_is_copied() {
    let mut t = HashTable::new(2).unwrap();
    let mut key = String::from("abc");
    t.put(&key, 1).unwrap();
    key.push('d');
    assert_eq!(t.get("abc"), Some(&1));
    assert_eq!(t.get(&key), None);
}

#[test]
fn iteration_skips_tombstones() {
    let mut t = HashTable::new(1).unwrap();
    for (i, k) in ["a", "b", "c", "d"].into_iter().enumerate() {
        t.put(k, i).unwrap();
    }
    t.remove("b");
    t.remove("d");
    let seen: Vec<(&str, usize)> = t.iter().map(|(k, v)| (k, *v)).collect();
    assert_eq!(seen, [("a", 0), ("c", 2)]);
}

#[test]
fn teardown_disposes_each_live_value_once() {
    let disposed = Rc::new(Cell::new(0usize));
    let mut t = HashTable::with_bucket_capacity(5, DEFAULT_BUCKET_CAPACITY).unwrap();
    for i in 0..40 {
        t.put(&format!("k{}", i % 13), i).unwrap();
    }
    for i in 0..6 {
        t.remove(&format!("k{i}"));
    }
    let live = t.len();
    let counter = Rc::clone(&disposed);
    t.teardown(Some(&mut |_v| counter.set(counter.get() + 1)));
    assert_eq!(disposed.get(), live);
    assert_eq!(live, 34);
}

#[test]
fn zero_buckets_is_an_error() {
    match HashTable::<u8>::new(0) {
        Err(ContainerError::ZeroBuckets) => {}
        other => panic!("unexpected result: {:?}", other.map(|t| t.len())),
    }
}

#[test]
fn hash_is_deterministic() {
    assert_eq!(super_fast_hash(b"green"), super_fast_hash(b"green"));
    assert_eq!(super_fast_hash(b"green"), 0x8dac_d2bf);
    assert_eq!(super_fast_hash(b"hello"), 0xb09d_c87b);

    let mut t = HashTable::new(10).unwrap();
    assert_eq!(t.put("green", ()).unwrap().hash(), 0x8dac_d2bf);
}

#[test]
fn borrowed_table_iterates_live_pairs() {
    let mut t = HashTable::new(10).unwrap();
    for (k, v) in KEY_VALUES {
        t.put(k, v).unwrap();
    }
    t.remove("red").unwrap();

    let mut seen: Vec<(&str, &str)> = Vec::new();
    let mut it: Iter<'_, &str> = (&t).into_iter();
    for (k, v) in it.by_ref() {
        seen.push((k, *v));
    }
    assert!(it.next().is_none());
    // Bucket order: blue (4), red (7), green (9).
    assert_eq!(
        seen,
        [
            ("blue", "The sky is blue"),
            ("red", "Apples are red"),
            ("red", "Books are read"),
            ("green", "Grass is green"),
            ("green", "Avacadoes are green"),
        ]
    );
    assert_eq!(t.iter().count(), t.len());
}
