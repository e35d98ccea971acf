use quay_types::{CastContext, TypeContext, normalize};

#[test]
fn test_any_accepts_and_is_accepted_everywhere() {
    let mut ctx = TypeContext::new();
    let any = ctx.any_type();
    let num = ctx.f64_type();
    let string = ctx.string_type();
    let animal = ctx.class_type("Animal", None);
    let dog = ctx.class_type("Dog", Some(animal));
    let union = ctx.union_type(vec![num, string]).unwrap();
    let arr = ctx.array_type(dog);
    let func = ctx.function_type(vec![dog], animal);

    let cast = CastContext::new(&ctx);
    for ty in [num, string, animal, dog, union, arr, func] {
        assert!(cast.can_cast(ty, any), "every type casts to any");
        assert!(cast.can_cast(any, ty), "any casts to every type");
    }
}

#[test]
fn test_union_source_is_conjunction() {
    let mut ctx = TypeContext::new();
    let animal = ctx.class_type("Animal", None);
    let dog = ctx.class_type("Dog", Some(animal));
    let cat = ctx.class_type("Cat", Some(animal));
    let num = ctx.f64_type();
    let union = ctx.union_type(vec![dog, cat]).unwrap();

    let cast = CastContext::new(&ctx);
    for target in [animal, dog, cat, num] {
        let expected = cast.can_cast(dog, target) && cast.can_cast(cat, target);
        assert_eq!(
            cast.can_cast(union, target),
            expected,
            "CanCast(Dog | Cat, {:?}) must equal the conjunction",
            target
        );
    }
}

#[test]
fn test_union_destination_is_disjunction() {
    let mut ctx = TypeContext::new();
    let animal = ctx.class_type("Animal", None);
    let dog = ctx.class_type("Dog", Some(animal));
    let num = ctx.f64_type();
    let string = ctx.string_type();
    let union = ctx.union_type(vec![dog, string]).unwrap();

    let cast = CastContext::new(&ctx);
    for source in [animal, dog, num, string] {
        let expected = cast.can_cast(source, dog) || cast.can_cast(source, string);
        assert_eq!(
            cast.can_cast(source, union),
            expected,
            "CanCast({:?}, Dog | String) must equal the disjunction",
            source
        );
    }
}

#[test]
fn test_function_variance_is_asymmetric() {
    let mut ctx = TypeContext::new();
    let animal = ctx.class_type("Animal", None);
    let dog = ctx.class_type("Dog", Some(animal));

    let dog_of_animal = ctx.function_type(vec![animal], dog);
    let animal_of_dog = ctx.function_type(vec![dog], animal);

    let cast = CastContext::new(&ctx);
    assert!(cast.can_cast(dog_of_animal, animal_of_dog));
    assert!(!cast.can_cast(animal_of_dog, dog_of_animal));
}

#[test]
fn test_normalization_is_idempotent_over_shapes() {
    let mut ctx = TypeContext::new();
    let num = ctx.f64_type();
    let string = ctx.string_type();
    let animal = ctx.class_type("Animal", None);
    let union = ctx.union_type(vec![num, string]).unwrap();
    let arr = ctx.array_type(animal);
    let func = ctx.function_type(vec![num], string);
    let any = ctx.any_type();

    let mut shapes = vec![num, string, animal, union, arr, func, any];
    for base in shapes.clone() {
        let p = ctx.ptr_type(base);
        let c = ctx.const_type(p);
        let r = ctx.ref_type(c);
        shapes.extend([p, c, r]);
    }

    for id in shapes {
        let once = normalize(&ctx, id);
        assert_eq!(normalize(&ctx, once), once);
    }
}

#[test]
fn test_qualified_and_bare_sides_agree() {
    // Symmetric normalization: wrapping either side in qualifiers must
    // not change the oracle's answer.
    let mut ctx = TypeContext::new();
    let animal = ctx.class_type("Animal", None);
    let dog = ctx.class_type("Dog", Some(animal));
    let dog_ptr = ctx.ptr_type(dog);
    let const_animal = ctx.const_type(animal);
    let animal_ref = ctx.ref_type(const_animal);

    let cast = CastContext::new(&ctx);
    assert_eq!(cast.can_cast(dog, animal), cast.can_cast(dog_ptr, animal));
    assert_eq!(cast.can_cast(dog, animal), cast.can_cast(dog, animal_ref));
    assert_eq!(
        cast.can_cast(animal, dog),
        cast.can_cast(animal_ref, dog_ptr)
    );
}

#[test]
fn test_literal_promotion_scope() {
    let mut ctx = TypeContext::new();
    let literal = ctx.char_ptr_type();
    let string = ctx.string_type();
    let node = ctx.class_type("Node", None);

    let cast = CastContext::new(&ctx);

    // Promotion targets the String wrapper itself, at the top level...
    assert!(cast.can_cast_args(literal, &[string]));
    assert!(!cast.can_cast_any(literal, &[string]));

    // ...and inside container element comparisons
    let literal_arr = ctx.array_type(literal);
    let string_arr = ctx.array_type(string);
    let cast = CastContext::new(&ctx);
    assert!(cast.can_cast_args(literal_arr, &[string_arr]));
    assert!(!cast.can_cast_any(literal_arr, &[string_arr]));

    // A union destination is not a String-like site; the literal shape is
    // gone by the time variants are compared
    let union = ctx.union_type(vec![node, string]).unwrap();
    let cast = CastContext::new(&ctx);
    assert!(!cast.can_cast_args(literal, &[union]));
}
