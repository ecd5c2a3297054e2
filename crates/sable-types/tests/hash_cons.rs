use std::thread;

use sable_types::registry;
use sable_types::{
    FltType, FunPtrType, IntType, Kind, NameType, StrType, StructType, TupleType, Type, TypeId,
};

#[test]
fn test_factories_return_canonical_handles() {
    assert_eq!(IntType::con(12), IntType::con(12));
    assert_eq!(FltType::con(2.5), FltType::con(2.5));
    assert_eq!(StrType::con("abc"), StrType::con("abc"));
    assert_ne!(StrType::con("abc"), StrType::con("abd"));
    assert_eq!(FunPtrType::make([3, 1, 3], false), FunPtrType::make([1, 3], false));
}

#[test]
fn test_struct_field_order_is_irrelevant() {
    let a = StructType::make([("b", TypeId::INT8), ("a", TypeId::STR)], false);
    let b = StructType::make([("a", TypeId::STR), ("b", TypeId::INT8)], false);
    assert_eq!(a, b);
}

#[test]
fn test_handle_resolves_to_interned_structure() {
    let tuple = TupleType::make(vec![TypeId::BOOL, TypeId::FLT32], true);
    let ty = tuple.get();
    assert_eq!(ty.kind(), Kind::Tuple);
    assert_eq!(registry::lookup(&ty), Some(tuple));
    assert_eq!(registry::intern(Type::clone(&ty)), tuple);
}

#[test]
fn test_named_types_differ_by_name() {
    let a = NameType::make("Celsius", TypeId::FLT64);
    let b = NameType::make("Kelvin", TypeId::FLT64);
    assert_ne!(a, b);
    assert_eq!(a, NameType::make("Celsius", TypeId::FLT64));
}

#[test]
fn test_registry_grows_only_on_new_types() {
    let id = IntType::con(-123_456);
    let before = registry::stats();
    assert_eq!(IntType::con(-123_456), id);
    let after = registry::stats();
    assert!(after.hits > before.hits);
    assert!(after.types >= before.types);
    assert!(registry::len() >= after.types);
}

#[test]
fn test_interning_is_unique_across_threads() {
    let ids: Vec<Vec<TypeId>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    (0..64)
                        .map(|i| {
                            let field = IntType::con(10_000 + i);
                            StructType::make([("f", field), ("g", TypeId::STR)], false)
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("worker panicked"))
            .collect()
    });

    for other in &ids[1..] {
        assert_eq!(other, &ids[0]);
    }
    let mut distinct = ids[0].clone();
    distinct.sort_unstable();
    distinct.dedup();
    assert_eq!(distinct.len(), 64);
}

#[test]
fn test_concurrent_lattice_operations_agree() {
    let samples = sable_types::standard_types();
    let results: Vec<Vec<Option<TypeId>>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let samples = &samples;
                scope.spawn(move || {
                    samples
                        .iter()
                        .flat_map(|&a| samples.iter().map(move |&b| a.join(b).ok()))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("worker panicked"))
            .collect()
    });

    for other in &results[1..] {
        assert_eq!(other, &results[0]);
    }
}
