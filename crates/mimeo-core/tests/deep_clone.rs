//! End-to-end deep-clone tests over whole value graphs.

use std::any::Any;
use std::sync::Arc;

use mimeo_core::{
    DeepCloner, ForeignValue, Pattern, PropertyKey, Symbol, Timestamp, Value, deep_clone,
};

fn record_with(entries: Vec<(&str, Value)>) -> Value {
    let record = Value::record();
    if let Some(r) = record.as_record() {
        for (name, value) in entries {
            r.set(name.into(), value);
        }
    }
    record
}

#[test]
fn test_primitives_clone_to_themselves() {
    for value in [
        Value::Null,
        Value::boolean(false),
        Value::number(-12.75),
        Value::number(f64::INFINITY),
        Value::text(""),
        Value::text("héllo"),
    ] {
        assert_eq!(deep_clone(&value), value);
    }
}

#[test]
fn test_text_shares_backing_storage() {
    let text = Value::text("immutable");
    let clone = deep_clone(&text);
    assert!(clone.ptr_eq(&text));
}

#[test]
fn test_symbols_pass_through_by_identity() {
    let sym = Symbol::new(Some("marker"));
    let value = Value::symbol(sym.clone());
    let clone = deep_clone(&value);
    assert_eq!(clone, value);
    assert!(clone.ptr_eq(&value));

    let record = record_with(vec![("tag", value)]);
    let cloned_tag = deep_clone(&record)
        .as_record()
        .and_then(|r| r.get_own(&"tag".into()))
        .unwrap();
    assert_eq!(cloned_tag.as_symbol().unwrap().id(), sym.id());
}

#[test]
fn test_timestamp_round_trip() {
    let ts = Value::timestamp(Timestamp::from_millis(1_700_000_000_000.0));
    let clone = deep_clone(&ts);
    assert!(!clone.ptr_eq(&ts));
    assert_eq!(
        clone.as_timestamp().unwrap().millis(),
        ts.as_timestamp().unwrap().millis()
    );
}

#[test]
fn test_timestamp_clone_is_independent() {
    let ts = Value::timestamp(Timestamp::from_millis(0.0));
    let clone = deep_clone(&ts);
    ts.as_timestamp().unwrap().set_millis(5_000.0);
    assert_eq!(clone.as_timestamp().unwrap().millis(), 0.0);
}

#[test]
fn test_invalid_timestamp_stays_invalid() {
    let ts = Value::timestamp(Timestamp::from_millis(f64::NAN));
    let clone = deep_clone(&ts);
    assert!(!clone.as_timestamp().unwrap().is_valid());
}

#[test]
fn test_pattern_round_trip_resets_cursor() {
    let pattern = Pattern::with_flags("\\w+", "gi").unwrap();
    assert!(pattern.exec("one two").is_some());
    assert_eq!(pattern.last_index(), 3);

    let value = Value::pattern(pattern);
    let clone = deep_clone(&value);
    assert!(!clone.ptr_eq(&value));

    let original = value.as_pattern().unwrap();
    let copied = clone.as_pattern().unwrap();
    assert_eq!(copied.source(), original.source());
    assert_eq!(copied.flags(), original.flags());
    assert_eq!(copied.last_index(), 0);
    assert_eq!(original.last_index(), 3);
    assert_eq!(copied.exec("one two").unwrap().text, "one");
}

#[test]
fn test_list_round_trip_in_order() {
    let list = Value::list_from(vec![
        Value::number(1.0),
        Value::text("two"),
        Value::boolean(true),
        Value::Null,
    ]);
    let clone = deep_clone(&list);
    assert!(!clone.ptr_eq(&list));
    assert_eq!(
        clone.as_list().unwrap().to_vec(),
        list.as_list().unwrap().to_vec()
    );
}

#[test]
fn test_nested_list_cloned_deeply() {
    let inner = Value::list_from(vec![Value::number(1.0)]);
    let outer = Value::list_from(vec![inner.clone()]);
    let clone = deep_clone(&outer);
    let cloned_inner = clone.as_list().unwrap().get(0).unwrap();
    assert!(!cloned_inner.ptr_eq(&inner));

    inner.as_list().unwrap().push(Value::number(2.0));
    assert_eq!(cloned_inner.as_list().unwrap().len(), 1);
}

#[test]
fn test_map_round_trip_in_order() {
    let map = Value::map();
    if let Some(m) = map.as_map() {
        m.insert(Value::text("b"), Value::number(2.0));
        m.insert(Value::text("a"), Value::number(1.0));
        m.insert(Value::number(f64::NAN), Value::text("nan"));
    }
    let clone = deep_clone(&map);
    let entries = clone.as_map().unwrap().entries();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].0, Value::text("b"));
    assert_eq!(entries[1].0, Value::text("a"));
    assert!(entries[2].0.as_number().unwrap().is_nan());
    assert_eq!(entries[2].1, Value::text("nan"));
}

#[test]
fn test_map_keys_are_cloned_too() {
    let key = Value::list_from(vec![Value::number(1.0)]);
    let map = Value::map();
    if let Some(m) = map.as_map() {
        m.insert(key.clone(), Value::text("v"));
    }
    let clone = deep_clone(&map);
    let entries = clone.as_map().unwrap().entries();
    let cloned_key = &entries[0].0;
    assert!(!cloned_key.ptr_eq(&key));
    assert_eq!(cloned_key.as_list().unwrap().to_vec(), vec![Value::number(1.0)]);
    assert!(!clone.as_map().unwrap().has(&key));
}

#[test]
fn test_set_round_trip_in_order() {
    let set = Value::set();
    if let Some(s) = set.as_set() {
        s.add(Value::number(3.0));
        s.add(Value::number(1.0));
        s.add(Value::text("x"));
    }
    let clone = deep_clone(&set);
    assert_eq!(
        clone.as_set().unwrap().values(),
        vec![Value::number(3.0), Value::number(1.0), Value::text("x")]
    );
}

#[test]
fn test_set_composite_elements_cloned() {
    let element = Value::record();
    let set = Value::set();
    if let Some(s) = set.as_set() {
        s.add(element.clone());
    }
    let clone = deep_clone(&set);
    let values = clone.as_set().unwrap().values();
    assert_eq!(values.len(), 1);
    assert!(!values[0].ptr_eq(&element));
}

#[test]
fn test_record_round_trip_in_order() {
    let record = record_with(vec![
        ("z", Value::number(26.0)),
        ("a", Value::number(1.0)),
        ("m", Value::number(13.0)),
    ]);
    let clone = deep_clone(&record);
    let entries = clone.as_record().unwrap().own_entries();
    let names: Vec<_> = entries
        .iter()
        .filter_map(|(k, _)| k.as_name().map(str::to_string))
        .collect();
    assert_eq!(names, vec!["z", "a", "m"]);
    let values: Vec<_> = entries.into_iter().map(|(_, v)| v).collect();
    assert_eq!(
        values,
        vec![Value::number(26.0), Value::number(1.0), Value::number(13.0)]
    );
}

#[test]
fn test_record_symbol_properties_carried() {
    let sym = Symbol::new(Some("meta"));
    let record = Value::record();
    if let Some(r) = record.as_record() {
        r.set("plain".into(), Value::number(1.0));
        r.set(PropertyKey::symbol(sym.clone()), Value::text("tagged"));
    }
    let clone = deep_clone(&record);
    assert_eq!(
        clone
            .as_record()
            .unwrap()
            .get_own(&PropertyKey::symbol(sym)),
        Some(Value::text("tagged"))
    );
}

#[test]
fn test_clone_copies_own_properties_only() {
    let proto = Arc::new(mimeo_core::Record::new());
    proto.set("inherited".into(), Value::text("base"));
    let leaf = Value::record_with_prototype(proto);
    if let Some(r) = leaf.as_record() {
        r.set("own".into(), Value::number(7.0));
        assert_eq!(r.get(&"inherited".into()), Some(Value::text("base")));
    }

    let clone = deep_clone(&leaf);
    let r = clone.as_record().unwrap();
    assert!(r.prototype().is_none());
    assert_eq!(r.get(&"own".into()), Some(Value::number(7.0)));
    assert!(r.get(&"inherited".into()).is_none());
}

#[test]
fn test_mutating_original_leaves_clone_alone() {
    let record = record_with(vec![("list", Value::list())]);
    let clone = deep_clone(&record);
    if let Some(r) = record.as_record() {
        r.set("added".into(), Value::number(1.0));
        if let Some(list) = r.get_own(&"list".into()).and_then(|v| v.as_list().cloned()) {
            list.push(Value::number(9.0));
        }
    }
    let r = clone.as_record().unwrap();
    assert_eq!(r.len(), 1);
    let cloned_list = r.get_own(&"list".into()).unwrap();
    assert!(cloned_list.as_list().unwrap().is_empty());
}

#[test]
fn test_mutating_clone_leaves_original_alone() {
    let record = record_with(vec![("n", Value::number(1.0))]);
    let clone = deep_clone(&record);
    if let Some(r) = clone.as_record() {
        r.set("n".into(), Value::number(2.0));
        r.set("extra".into(), Value::Null);
    }
    let original = record.as_record().unwrap();
    assert_eq!(original.get_own(&"n".into()), Some(Value::number(1.0)));
    assert_eq!(original.len(), 1);
}

#[test]
fn test_self_referential_record_terminates() {
    let record = Value::record();
    if let Some(r) = record.as_record() {
        r.set("me".into(), record.clone());
    }
    let clone = deep_clone(&record);
    let inner = clone
        .as_record()
        .unwrap()
        .get_own(&"me".into())
        .unwrap();
    assert!(inner.ptr_eq(&clone));
    assert!(!inner.ptr_eq(&record));
}

#[test]
fn test_mutual_cycle_terminates() {
    let a = Value::record();
    let b = Value::list();
    if let Some(r) = a.as_record() {
        r.set("next".into(), b.clone());
    }
    if let Some(l) = b.as_list() {
        l.push(a.clone());
    }

    let clone = deep_clone(&a);
    let cloned_b = clone.as_record().unwrap().get_own(&"next".into()).unwrap();
    let back = cloned_b.as_list().unwrap().get(0).unwrap();
    assert!(back.ptr_eq(&clone));
    assert!(!cloned_b.ptr_eq(&b));
}

#[test]
fn test_map_keyed_by_itself() {
    let map = Value::map();
    if let Some(m) = map.as_map() {
        m.insert(map.clone(), Value::text("self"));
    }
    let clone = deep_clone(&map);
    let entries = clone.as_map().unwrap().entries();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].0.ptr_eq(&clone));
}

#[test]
fn test_shared_reference_becomes_one_copy() {
    let shared = Value::list_from(vec![Value::number(1.0)]);
    let record = record_with(vec![
        ("left", shared.clone()),
        ("right", shared.clone()),
    ]);

    let clone = deep_clone(&record);
    let r = clone.as_record().unwrap();
    let left = r.get_own(&"left".into()).unwrap();
    let right = r.get_own(&"right".into()).unwrap();
    assert!(left.ptr_eq(&right));
    assert!(!left.ptr_eq(&shared));

    left.as_list().unwrap().push(Value::number(2.0));
    assert_eq!(right.as_list().unwrap().len(), 2);
    assert_eq!(shared.as_list().unwrap().len(), 1);
}

#[test]
fn test_shared_reference_across_collection_kinds() {
    let shared = Value::record();
    let map = Value::map();
    if let Some(m) = map.as_map() {
        m.insert(Value::text("r"), shared.clone());
    }
    let root = Value::list_from(vec![shared.clone(), map, shared.clone()]);

    let clone = deep_clone(&root);
    let list = clone.as_list().unwrap();
    let first = list.get(0).unwrap();
    let last = list.get(2).unwrap();
    let via_map = list
        .get(1)
        .and_then(|v| v.as_map().map(|m| m.get(&Value::text("r"))))
        .flatten()
        .unwrap();
    assert!(first.ptr_eq(&last));
    assert!(first.ptr_eq(&via_map));
}

#[test]
fn test_cloner_preserves_identity_across_calls() {
    let shared = Value::record();
    let mut cloner = DeepCloner::new();
    let first = cloner.clone_value(&shared);
    let second = cloner.clone_value(&shared);
    assert!(first.ptr_eq(&second));

    let fresh = deep_clone(&shared);
    assert!(!fresh.ptr_eq(&first));
}

#[derive(Debug, PartialEq)]
struct Blob {
    bytes: Vec<u8>,
}

impl ForeignValue for Blob {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn test_foreign_handle_is_shared() {
    let blob: Arc<dyn ForeignValue> = Arc::new(Blob {
        bytes: vec![1, 2, 3],
    });
    let value = Value::foreign(blob);
    let record = record_with(vec![("payload", value.clone())]);

    let clone = deep_clone(&record);
    let copied = clone
        .as_record()
        .unwrap()
        .get_own(&"payload".into())
        .unwrap();
    assert!(copied.ptr_eq(&value));
    let blob = copied
        .as_foreign()
        .and_then(|h| h.as_any().downcast_ref::<Blob>())
        .unwrap();
    assert_eq!(blob.bytes, vec![1, 2, 3]);
}

#[test]
fn test_deeply_nested_graph() {
    let root = Value::list();
    let mut current = root.clone();
    for depth in 0..1_000 {
        let next = Value::list();
        if let Some(l) = current.as_list() {
            l.push(Value::number(depth as f64));
            l.push(next.clone());
        }
        current = next;
    }

    let clone = deep_clone(&root);
    let mut walker = clone;
    let mut seen = 0;
    while let Some(list) = walker.as_list().cloned() {
        if list.is_empty() {
            break;
        }
        assert_eq!(list.get(0), Some(Value::number(seen as f64)));
        seen += 1;
        match list.get(1) {
            Some(next) => walker = next,
            None => break,
        }
    }
    assert_eq!(seen, 1_000);
}

#[test]
fn test_mixed_graph_keeps_shape() {
    let shared_list = Value::list_from(vec![Value::text("shared")]);
    let map = Value::map();
    if let Some(m) = map.as_map() {
        m.insert(Value::text("list"), shared_list.clone());
        m.insert(Value::number(0.0), Value::timestamp(Timestamp::from_millis(1_000.0)));
    }
    let set = Value::set();
    if let Some(s) = set.as_set() {
        s.add(shared_list.clone());
        s.add(Value::number(-0.0));
    }
    let root = record_with(vec![
        ("map", map),
        ("set", set),
        ("list", shared_list.clone()),
    ]);

    let clone = deep_clone(&root);
    let r = clone.as_record().unwrap();
    let via_record = r.get_own(&"list".into()).unwrap();
    let via_map = r
        .get_own(&"map".into())
        .and_then(|m| m.as_map().map(|m| m.get(&Value::text("list"))))
        .flatten()
        .unwrap();
    let via_set = r
        .get_own(&"set".into())
        .and_then(|s| s.as_set().map(|s| s.values()))
        .unwrap()
        .into_iter()
        .find(|v| v.is_list())
        .unwrap();

    assert!(via_record.ptr_eq(&via_map));
    assert!(via_record.ptr_eq(&via_set));
    assert!(!via_record.ptr_eq(&shared_list));

    let ts = r
        .get_own(&"map".into())
        .and_then(|m| m.as_map().map(|m| m.get(&Value::number(0.0))))
        .flatten()
        .unwrap();
    assert_eq!(ts.as_timestamp().unwrap().millis(), 1_000.0);
}
