use nexus_rigid::{Full, RigidList, Shortfall};

type Names = RigidList<String>;

/// Key at position `n`, or `None` (the end position) past the last element.
fn at(list: &Names, n: usize) -> Option<u32> {
    list.keys().nth(n)
}

fn names(list: &Names) -> Vec<&str> {
    list.iter().map(String::as_str).collect()
}

fn push(list: &mut Names, name: &str) -> Result<u32, Full<String>> {
    list.try_push_back(name.to_string())
}

fn assert_state(list: &Names, len: usize, capacity: usize) {
    assert_eq!(list.len(), len, "len");
    assert_eq!(list.free_len(), capacity - len, "free_len");
    assert_eq!(list.capacity(), capacity, "capacity");
}

fn vegetables() -> Names {
    let mut list = Names::with_capacity(5);
    push(&mut list, "carrot").unwrap();
    push(&mut list, "beetroot").unwrap();
    push(&mut list, "kohlrabi").unwrap();
    assert_state(&list, 3, 5);
    list
}

fn fruit() -> Names {
    let mut list = Names::with_capacity(10);
    list.try_insert_n(None, 5, "banana".to_string()).unwrap();
    list.try_insert_n(None, 5, "pineapple".to_string()).unwrap();
    assert_state(&list, 10, 10);
    list
}

// =============================================================================
// Capacity
// =============================================================================

#[test]
fn push_until_full_then_reserve() {
    let mut list = Names::with_capacity(3);
    assert_state(&list, 0, 3);

    push(&mut list, "ahoj").unwrap();
    push(&mut list, "pepo").unwrap();
    push(&mut list, "venco").unwrap();
    assert_state(&list, 3, 3);

    let rejected = push(&mut list, "franto").unwrap_err();
    assert_eq!(rejected.into_inner(), "franto");
    assert_state(&list, 3, 3);

    list.reserve(5);
    assert_state(&list, 3, 5);

    push(&mut list, "joudo").unwrap();
    assert_state(&list, 4, 5);
    assert_eq!(names(&list), ["ahoj", "pepo", "venco", "joudo"]);

    list.sort();
    assert_eq!(names(&list), ["ahoj", "joudo", "pepo", "venco"]);
    assert_state(&list, 4, 5);
}

#[test]
fn bulk_insert_waits_for_reserve() {
    let mut list = vegetables();
    list.reserve(7);
    push(&mut list, "leek").unwrap();
    assert_eq!(list.free_len(), 3);

    let before = names(&list).join(",");
    let pos = at(&list, 1);

    let err = list.try_insert_n(pos, 4, "onion".to_string()).unwrap_err();
    assert_eq!(
        err,
        Shortfall {
            requested: 4,
            available: 3
        }
    );
    assert_eq!(names(&list).join(","), before);
    assert_state(&list, 4, 7);

    list.reserve(8);
    list.try_insert_n(pos, 4, "onion".to_string()).unwrap();
    assert_eq!(
        names(&list),
        ["carrot", "onion", "onion", "onion", "onion", "beetroot", "kohlrabi", "leek"]
    );
    assert_state(&list, 8, 8);
}

#[test]
fn shrink_drops_most_recent_elements() {
    let mut list = Names::with_capacity(4);
    for name in ["first", "second", "third", "fourth"] {
        push(&mut list, name).unwrap();
    }

    list.reserve(3);
    list.reserve(5);
    list.reserve(2);

    assert_eq!(names(&list), ["first", "second"]);
    assert_state(&list, 2, 2);
}

// =============================================================================
// Splice
// =============================================================================

#[test]
fn splice_one_within_and_across() {
    let mut bowl = fruit();

    assert_eq!(bowl.get(at(&bowl, 5).unwrap()).unwrap(), "pineapple");
    assert_eq!(bowl.get(at(&bowl, 2).unwrap()).unwrap(), "banana");

    let last = at(&bowl, 9).unwrap();
    bowl.splice(at(&bowl, 2), last);
    assert_eq!(bowl.get(at(&bowl, 2).unwrap()).unwrap(), "pineapple");
    assert_eq!(bowl.get(at(&bowl, 5).unwrap()).unwrap(), "banana");
    assert_state(&bowl, 10, 10);

    let mut bowl = fruit();
    let mut basket = vegetables();

    let pineapple = at(&bowl, 6).unwrap();
    let key = basket
        .splice_from(at(&basket, 1), &mut bowl, pineapple)
        .unwrap();

    assert_eq!(basket.get(key).unwrap(), "pineapple");
    assert_eq!(names(&basket), ["carrot", "pineapple", "beetroot", "kohlrabi"]);
    assert_state(&basket, 4, 5);
    assert_state(&bowl, 9, 10);
}

#[test]
fn splice_many_needs_room() {
    let mut bowl = fruit();
    let mut basket = vegetables();

    let pos = at(&basket, 2);
    let (first, last) = (at(&bowl, 3).unwrap(), at(&bowl, 7));

    let err = basket
        .splice_range_from(pos, &mut bowl, first, last)
        .unwrap_err();
    assert_eq!(err.requested, 4);
    assert_eq!(err.available, 2);
    assert_state(&basket, 3, 5);
    assert_state(&bowl, 10, 10);

    basket.reserve(7);
    let moved = basket
        .splice_range_from(pos, &mut bowl, first, last)
        .unwrap();

    assert_eq!(moved, 4);
    assert_eq!(
        names(&basket),
        ["carrot", "beetroot", "banana", "banana", "pineapple", "pineapple", "kohlrabi"]
    );
    assert_state(&basket, 7, 7);
    assert_state(&bowl, 6, 10);
    assert_eq!(
        names(&bowl),
        ["banana", "banana", "banana", "pineapple", "pineapple", "pineapple"]
    );
}

#[test]
fn freed_nodes_are_reusable_after_splice() {
    let mut bowl = fruit();
    let mut basket = vegetables();

    let first = bowl.front_key().unwrap();
    let last = at(&bowl, 2);
    basket
        .splice_range_from(None, &mut bowl, first, last)
        .unwrap();

    // The source got two free nodes back and can refill without reserve
    push(&mut bowl, "mango").unwrap();
    push(&mut bowl, "kiwi").unwrap();
    assert!(push(&mut bowl, "fig").is_err());
    assert_state(&bowl, 10, 10);
    assert_state(&basket, 5, 5);
}

// =============================================================================
// Erase, pop, insert
// =============================================================================

#[test]
fn erase_pop_and_insert_sequence() {
    let mut list = Names::with_capacity(5);
    for name in ["ahoj", "joudo", "pepo", "venco"] {
        push(&mut list, name).unwrap();
    }

    assert_eq!(list.erase_range(at(&list, 1).unwrap(), at(&list, 3)), 2);
    assert_eq!(names(&list), ["ahoj", "venco"]);
    push(&mut list, "kamile").unwrap();
    assert_state(&list, 3, 5);

    assert!(list.erase(at(&list, 1).unwrap()));
    assert_eq!(names(&list), ["ahoj", "kamile"]);

    for name in ["rudo", "cendo", "ignaci"] {
        push(&mut list, name).unwrap();
    }
    assert!(list.erase(at(&list, 0).unwrap()));
    assert_eq!(list.front().unwrap(), "kamile");
    assert_state(&list, 4, 5);

    assert!(list.pop_back());
    assert_state(&list, 3, 5);
    assert_eq!(list.back().unwrap(), "cendo");
    list.pop_back();
    push(&mut list, "jardo").unwrap();
    list.pop_back();
    list.pop_back();
    assert_state(&list, 1, 5);
    assert!(list.pop_back());
    assert_state(&list, 0, 5);
    assert!(!list.pop_back());
    assert_state(&list, 0, 5);

    for name in ["blazeji", "isztvane", "gadzo"] {
        list.try_push_front(name.to_string()).unwrap();
    }
    list.try_insert(at(&list, 2), "bedrichu".to_string()).unwrap();
    assert_state(&list, 4, 5);
    assert_eq!(names(&list), ["gadzo", "isztvane", "bedrichu", "blazeji"]);

    list.try_insert(at(&list, 0), "Zdarec".to_string()).unwrap();
    assert_state(&list, 5, 5);
    assert!(list.erase(at(&list, 4).unwrap()));
    list.try_insert(at(&list, 0), "Zdarec".to_string()).unwrap();
    assert_state(&list, 5, 5);
    assert_eq!(list.front().unwrap(), "Zdarec");

    list.pop_back();
    list.try_insert_n(at(&list, 4), 1, "honzo".to_string()).unwrap();
    assert_state(&list, 5, 5);
    assert_eq!(list.back().unwrap(), "honzo");

    let full = list.try_insert_n(at(&list, 0), 3, "honzo".to_string());
    assert!(full.is_err());

    let first = list.front_key().unwrap();
    assert_eq!(list.erase_range(first, at(&list, 3)), 3);
    list.try_insert_n(at(&list, 0), 3, "honzo".to_string()).unwrap();
    assert_state(&list, 5, 5);
    assert_eq!(names(&list), ["honzo", "honzo", "honzo", "isztvane", "honzo"]);

    list.clear();
    assert_state(&list, 0, 5);
}

#[test]
fn stale_keys_never_expose_old_values() {
    let mut list = vegetables();
    let carrot = list.front_key().unwrap();

    assert_eq!(list.take_front().as_deref(), Some("carrot"));
    assert_eq!(list.get(carrot), None);
    assert_eq!(list.next_key(carrot), None);
    assert!(!list.erase(carrot));
    assert_state(&list, 2, 5);
}
