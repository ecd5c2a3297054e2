use sable_types::{
    classify, require_conversion, standard_types, BitShape, FltType, IntType, NilType, TupleType,
    TypeId,
};

#[test]
fn test_classifier_is_total_below_center() {
    let settled: Vec<TypeId> = standard_types()
        .into_iter()
        .filter(|t| !t.above_center())
        .collect();

    for &from in &settled {
        for &to in &settled {
            let shape = classify(from, to);
            assert_ne!(shape, BitShape::UnknownTop, "{} -> {}", from, to);
            assert!([0, 1, 99].contains(&shape.code()));
            assert_eq!(require_conversion(from, to).is_err(), shape == BitShape::Incompatible);
        }
        assert_eq!(classify(from, from), BitShape::Free, "{} -> {}", from, from);
    }
}

#[test]
fn test_any_top_side_is_unknown() {
    let samples = standard_types();
    for &a in &samples {
        for &b in &samples {
            if a.above_center() || b.above_center() {
                assert_eq!(classify(a, b), BitShape::UnknownTop, "{} -> {}", a, b);
            }
        }
    }
}

#[test]
fn test_numeric_widening_chain() {
    assert_eq!(classify(TypeId::BOOL, TypeId::INT8), BitShape::Free);
    assert_eq!(classify(TypeId::INT8, TypeId::INT32), BitShape::Free);
    assert_eq!(classify(TypeId::INT32, TypeId::FLT64), BitShape::BitChanging);
    assert_eq!(classify(TypeId::FLT32, TypeId::FLT64), BitShape::BitChanging);
    assert_eq!(classify(TypeId::FLT64, TypeId::INT64), BitShape::Incompatible);
}

#[test]
fn test_constants_fit_by_value() {
    assert_eq!(classify(IntType::con(1), TypeId::BOOL), BitShape::Free);
    assert_eq!(classify(IntType::con(-7), TypeId::BOOL), BitShape::Incompatible);
    assert_eq!(classify(IntType::con(-7), TypeId::FLT32), BitShape::BitChanging);
    assert_eq!(classify(FltType::con(0.5), TypeId::FLT32), BitShape::Free);
}

#[test]
fn test_nullable_tuples() {
    let pair = TupleType::make(vec![TypeId::INT8, TypeId::INT8], false);
    let wide = TupleType::make(vec![TypeId::INT64, TypeId::FLT32], false);
    assert_eq!(classify(pair, wide), BitShape::BitChanging);
    assert_eq!(classify(TypeId::NIL, pair), BitShape::Free);

    let maybe = NilType::nullable(TypeId::INT8, false);
    assert_eq!(classify(TypeId::NIL, maybe), BitShape::Free);
    assert_eq!(classify(maybe, TypeId::INT8), BitShape::Incompatible);
}

#[test]
fn test_incompatible_is_a_user_error() {
    let err = require_conversion(TypeId::STR, TypeId::INT64).unwrap_err();
    assert!(!err.is_internal());
    assert_eq!(err.to_string(), "cannot convert str to int64");
}
