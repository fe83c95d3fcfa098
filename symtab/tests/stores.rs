use rand::{distributions::Alphanumeric, rngs::SmallRng, Rng, SeedableRng};
use std::collections::BTreeMap;
use symtab::{
    BinaryTreeStore, ChainedHashStore, Result, SortedArrayStore, SymbolTable, SymtabErrorKind,
};

// this seed is used for generating the operation sequence
const OPS_SEED: u64 = 757;
// this seed is used for generating keys
const KEY_SEED: u64 = 233;

fn random_keys(seed: u64, count: usize) -> Vec<String> {
    let mut r: SmallRng = SeedableRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let len = r.gen_range(1, 4);
            r.sample_iter(&Alphanumeric).take(len).collect()
        })
        .collect()
}

fn assert_not_found<T: SymbolTable<String, i32>>(table: &T, key: &str) {
    let key = key.to_owned();
    assert!(!table.contains(&key));
    let err = table.get(&key).expect_err("lookup of an absent key succeeded");
    assert_eq!(SymtabErrorKind::KeyNotFound, err.kind());
}

// Should agree with each other and with a BTreeMap on every lookup
#[test]
fn contract_equivalence() -> Result<()> {
    // small key space, so overwrites are frequent
    let keys = random_keys(KEY_SEED, 200);
    let mut r: SmallRng = SeedableRng::seed_from_u64(OPS_SEED);

    let mut sorted = SortedArrayStore::new();
    let mut tree = BinaryTreeStore::new();
    let mut hash = ChainedHashStore::with_buckets(7);
    let mut model = BTreeMap::new();

    for step in 0..5000 {
        let key = keys[r.gen_range(0, keys.len())].clone();
        if r.gen_range(0, 3) == 0 {
            let value: i32 = step;
            sorted.put(key.clone(), value);
            tree.put(key.clone(), value);
            hash.put(key.clone(), value);
            model.insert(key, value);
        } else {
            let expected = model.get(&key);
            assert_eq!(expected.is_some(), SymbolTable::contains(&sorted, &key));
            assert_eq!(expected.is_some(), SymbolTable::contains(&tree, &key));
            assert_eq!(expected.is_some(), SymbolTable::contains(&hash, &key));
            if let Some(value) = expected {
                assert_eq!(value, SymbolTable::get(&sorted, &key)?);
                assert_eq!(value, SymbolTable::get(&tree, &key)?);
                assert_eq!(value, SymbolTable::get(&hash, &key)?);
            }
        }
    }

    assert_eq!(model.len(), sorted.len());
    assert_eq!(model.len(), tree.len());
    assert_eq!(model.len(), hash.size());
    Ok(())
}

// Should overwrite existent value without changing the size
#[test]
fn overwrite_value() -> Result<()> {
    fn check<T: SymbolTable<String, i32>>(mut table: T) -> Result<()> {
        table.put("key1".to_owned(), 1);
        table.put("key2".to_owned(), 2);
        table.put("key1".to_owned(), 10);
        assert_eq!(10, *table.get(&"key1".to_owned())?);
        assert_eq!(2, *table.get(&"key2".to_owned())?);
        assert_eq!(2, table.len());
        Ok(())
    }

    check(SortedArrayStore::new())?;
    check(BinaryTreeStore::new())?;
    check(ChainedHashStore::new())?;
    Ok(())
}

// Should report absent keys on fresh stores instead of faulting
#[test]
fn not_found_on_empty() {
    assert_not_found(&SortedArrayStore::new(), "key");
    assert_not_found(&BinaryTreeStore::new(), "key");
    assert_not_found(&ChainedHashStore::new(), "key");
    assert_not_found(&ChainedHashStore::with_buckets(1), "");
}

// Should keep the store usable after a failed lookup
#[test]
fn failed_get_leaves_store_intact() -> Result<()> {
    let mut table = SortedArrayStore::new();
    table.put("b".to_owned(), 2);
    assert!(table.get("a").is_err());
    assert!(table.get("c").is_err());
    table.put("a".to_owned(), 1);
    assert_eq!(1, *table.get("a")?);
    assert_eq!(2, *table.get("b")?);
    Ok(())
}

#[test]
fn sorted_store_example() -> Result<()> {
    let mut table = SortedArrayStore::new();
    table.put("a".to_owned(), 1);
    table.put("c".to_owned(), 3);
    table.put("b".to_owned(), 2);

    let pairs: Vec<(&str, i32)> = table.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    assert_eq!(vec![("a", 1), ("b", 2), ("c", 3)], pairs);
    assert_eq!(2, *table.get("b")?);
    assert!(!table.contains("z"));
    Ok(())
}

// Should keep the occupied region strictly ascending whatever the order of puts
#[test]
fn sorted_invariant() {
    let keys = random_keys(KEY_SEED, 1000);
    let mut table = SortedArrayStore::new();
    for (i, key) in keys.iter().enumerate() {
        table.put(key.clone(), i);
    }

    let stored: Vec<&String> = table.keys().collect();
    assert!(stored.windows(2).all(|pair| pair[0] < pair[1]));

    let mut expected = keys.clone();
    expected.sort();
    expected.dedup();
    assert_eq!(expected.len(), table.len());
    assert!(table.capacity() >= 2 * table.len());
}

// Should degenerate into a right-only chain on ascending inserts
#[test]
fn tree_is_not_balanced() {
    let mut tree = BinaryTreeStore::new();
    for key in 0..1000 {
        tree.put(key, key);
    }
    assert_eq!(1000, tree.depth());
    assert_eq!(1000, tree.len());

    let mut descending = BinaryTreeStore::new();
    for key in (0..1000).rev() {
        descending.put(key, key);
    }
    assert_eq!(1000, descending.depth());
    assert_eq!(
        (0..1000).collect::<Vec<_>>(),
        descending.inorder_keys().into_iter().copied().collect::<Vec<_>>()
    );
}

// Should neither overflow the stack on lookup nor on drop
#[test]
fn deep_tree() -> Result<()> {
    let mut tree = BinaryTreeStore::new();
    for key in 0..20_000u32 {
        tree.put(key, ());
    }
    assert!(tree.contains(&19_999));
    tree.get(&0)?;
    assert!(!tree.contains(&20_000));
    assert_eq!(20_000, tree.depth());
    drop(tree);
    Ok(())
}

// Should yield every key exactly once, as many as `size` reports
#[test]
fn hash_iteration_is_exhaustive() {
    let keys = random_keys(KEY_SEED, 2000);
    for &buckets in &[1, 3, 64, 4096] {
        let mut table = ChainedHashStore::with_buckets(buckets);
        for key in &keys {
            table.put(key.clone(), key.len());
        }

        let mut yielded: Vec<&String> = table.keys().collect();
        assert_eq!(table.size(), yielded.len());
        yielded.sort();
        yielded.dedup();
        assert_eq!(table.size(), yielded.len());
        assert!(keys.iter().all(|key| yielded.binary_search(&key).is_ok()));
        assert_eq!(table.size(), table.chain_lengths().iter().sum::<usize>());
    }
}

// Should stop after the last entry even if it sits in the first bucket
#[test]
fn hash_iteration_with_trailing_empty_buckets() {
    let mut table = ChainedHashStore::with_buckets(10_000);
    table.put(42u64, "answer");
    let pairs: Vec<_> = table.iter().collect();
    assert_eq!(vec![(&42, &"answer")], pairs);

    let empty: ChainedHashStore<u64, ()> = ChainedHashStore::with_buckets(16);
    assert_eq!(0, empty.keys().count());
}

#[test]
fn stores_as_trait_objects() -> Result<()> {
    let mut tables: Vec<Box<dyn SymbolTable<String, i32>>> = vec![
        Box::new(SortedArrayStore::<String, i32>::new()),
        Box::new(BinaryTreeStore::<String, i32>::new()),
        Box::new(ChainedHashStore::<String, i32>::new()),
    ];
    for table in tables.iter_mut() {
        assert!(table.is_empty());
        table.put("x".to_owned(), 1);
        assert_eq!(1, *table.get(&"x".to_owned())?);
        assert!(!table.is_empty());
    }
    Ok(())
}
