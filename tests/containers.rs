//! Cross-cutting container tests, run against the `dsa` facade rather than
//! an individual `dsa-*` crate, keeping per-component unit tests under
//! `crates/*/src` and reserving root-level `tests/` for exercising the
//! public facade a downstream caller would actually depend on.

use dsa::ordered::{Map, Sequence, Set};
use dsa::trie::Trie;
use dsa::unordered::UnorderedMap;

#[test]
fn ordered_map_keeps_keys_sorted_regardless_of_insertion_order() {
    let mut m: Map<i32, &str> = Map::new();
    for (k, v) in [(5, "e"), (1, "a"), (3, "c"), (2, "b"), (4, "d")] {
        m.insert(k, v).unwrap();
    }
    let collected: Vec<_> = m.iter().map(|(&k, _)| k).collect();
    assert_eq!(collected, vec![1, 2, 3, 4, 5]);
    assert_eq!(m.at(2), Ok((&3, &"c")));
    assert_eq!(m.position_of(&4), 3);
}

#[test]
fn ordered_set_and_unordered_map_agree_on_membership() {
    let mut set: Set<&str> = Set::new();
    let mut table: UnorderedMap<&str, usize> = UnorderedMap::new();
    for (i, word) in ["pear", "apple", "plum", "apple"].into_iter().enumerate() {
        set.insert(word).ok();
        table.insert(word, i).ok();
    }
    assert_eq!(set.iter().count(), 3);
    assert!(set.contains(&"apple"));
    assert!(table.contains(&"plum"));
    assert!(!table.contains(&"cherry"));
}

#[test]
fn map_save_and_load_round_trips_through_the_facade() {
    let mut m: Map<u32, String> = Map::new();
    for (k, v) in [(10, "ten"), (2, "two"), (7, "seven")] {
        m.insert(k, v.to_string()).unwrap();
    }
    let mut buf = Vec::new();
    m.save(
        &mut buf,
        |k| k.to_be_bytes().to_vec(),
        |v| v.as_bytes().to_vec(),
    )
    .unwrap();

    let loaded: Map<u32, String> = Map::load(
        &buf[..],
        |bytes| u32::from_be_bytes(bytes.try_into().unwrap()),
        |bytes| String::from_utf8(bytes.to_vec()).unwrap(),
    )
    .unwrap();

    let original_entries: Vec<(u32, String)> =
        m.iter().map(|(&k, v)| (k, v.clone())).collect();
    assert_eq!(loaded.iter().count(), original_entries.len());

    let mut loaded = loaded;
    for (k, v) in original_entries {
        assert_eq!(loaded.search(&k), Some(&v));
    }
}

#[test]
fn sequence_supports_positional_edits_a_comparator_ordered_map_cannot() {
    let mut seq: Sequence<char> = "helloworld".chars().collect();
    seq.insert_at(5, ' ').unwrap();
    let removed = seq.remove_at(0).unwrap();
    assert_eq!(removed, 'h');
    let (left, right) = seq.split_at(4);
    let left_str: String = left.iter().collect();
    let right_str: String = right.iter().collect();
    assert_eq!(format!("{left_str}{right_str}"), "ello world");
}

#[test]
fn trie_prefix_search_feeds_an_ordered_set_of_completions() {
    let trie: Trie = ["cat", "car", "cart", "dog", "do"].into_iter().collect();
    let mut completions: Set<String> = Set::new();
    for word in trie.words_with_prefix("ca") {
        completions.insert(word).ok();
    }
    assert_eq!(completions.iter().count(), 3);
    assert!(completions.contains(&"cart".to_string()));

    let mut buf = Vec::new();
    trie.save(&mut buf).unwrap();
    let reloaded = Trie::load(&buf[..]).unwrap();
    assert_eq!(reloaded.len(), trie.len());
    assert!(reloaded.has_prefix("do"));
}
