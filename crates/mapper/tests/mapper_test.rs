//! End-to-end mapping tests against the public surface.

use std::collections::HashMap;

use mapper::{reflect_struct, MapMode, Mapper, MapperError};

#[derive(Debug, Default, Clone, PartialEq)]
struct Person {
    name: String,
    age: i64,
}

#[derive(Debug, Default, Clone, PartialEq)]
struct PersonDto {
    name: String,
    age: i64,
}

reflect_struct!(Person { name: String, age: i64 });
reflect_struct!(PersonDto { name: String, age: i64 });

#[derive(Debug, Default, Clone, PartialEq)]
struct Item {
    sku: String,
    quantity: u32,
}

#[derive(Debug, Default, Clone, PartialEq)]
struct ItemDto {
    sku: String,
    quantity: u32,
}

reflect_struct!(Item { sku: String, quantity: u32 });
reflect_struct!(ItemDto { sku: String, quantity: u32 });

#[derive(Debug, Default, Clone, PartialEq)]
struct Order {
    id: i64,
    items: Vec<Item>,
    shipping: Option<Item>,
}

#[derive(Debug, Default, Clone, PartialEq)]
struct OrderDto {
    id: i64,
    items: Vec<ItemDto>,
    shipping: Option<ItemDto>,
}

reflect_struct!(Order {
    id: i64,
    items: Vec<Item>,
    shipping: Option<Item>,
});
reflect_struct!(OrderDto {
    id: i64,
    items: Vec<ItemDto>,
    shipping: Option<ItemDto>,
});

fn person() -> Person {
    Person {
        name: "Alice".into(),
        age: 30,
    }
}

#[test]
fn test_field_correspondence() {
    let mapper = Mapper::new();
    mapper.create_map::<Person, PersonDto>().unwrap();

    let dto: PersonDto = mapper.map(&person()).unwrap();
    assert_eq!(
        dto,
        PersonDto {
            name: "Alice".into(),
            age: 30,
        }
    );
}

#[test]
fn test_registration_uniqueness() {
    let mapper = Mapper::new();
    mapper.create_map::<Person, PersonDto>().unwrap();

    let err = mapper.create_map::<Person, PersonDto>().unwrap_err();
    assert!(matches!(err, MapperError::MapAlreadyExists { .. }));
}

#[test]
fn test_pointer_and_value_variants_share_one_registration() {
    let mapper = Mapper::new();
    mapper.create_map::<Person, PersonDto>().unwrap();

    // The optional variant is the same canonical pair.
    let err = mapper
        .create_map::<Option<Person>, Option<PersonDto>>()
        .unwrap_err();
    assert!(matches!(err, MapperError::MapAlreadyExists { .. }));

    // And the one registration serves optional and collection call sites.
    let some: Option<PersonDto> = mapper.map(&Some(person())).unwrap();
    assert_eq!(some.unwrap().name, "Alice");

    let list: Vec<PersonDto> = mapper.map(&vec![person(), person()]).unwrap();
    assert_eq!(list.len(), 2);
}

#[test]
fn test_unregistered_lookup() {
    let mapper = Mapper::new();
    let result: Result<PersonDto, _> = mapper.map(&person());
    assert!(matches!(result, Err(MapperError::MapNotExist { .. })));
}

#[test]
fn test_nil_pointer_propagation() {
    let mapper = Mapper::new();
    mapper.create_map::<Person, PersonDto>().unwrap();

    let none: Option<PersonDto> = mapper.map(&Option::<Person>::None).unwrap();
    assert_eq!(none, None);
}

#[test]
fn test_custom_function_precedence() {
    let mapper = Mapper::new();
    mapper
        .create_custom_map::<Person, PersonDto>(|p| PersonDto {
            name: p.name.to_uppercase(),
            age: p.age + 1,
        })
        .unwrap();

    // The custom function supplies the whole conversion; the automatic
    // engine never runs for this pair.
    let dto: PersonDto = mapper.map(&person()).unwrap();
    assert_eq!(dto.name, "ALICE");
    assert_eq!(dto.age, 31);

    // Re-registering the pair automatically is still a duplicate.
    let err = mapper.create_map::<Person, PersonDto>().unwrap_err();
    assert!(matches!(err, MapperError::MapAlreadyExists { .. }));
}

#[test]
fn test_custom_function_requires_exact_call_types() {
    let mapper = Mapper::new();
    mapper
        .create_custom_map::<Person, PersonDto>(|p| PersonDto {
            name: p.name.clone(),
            age: p.age,
        })
        .unwrap();

    // Element-wise application over a collection stays the caller's job.
    let result: Result<Vec<PersonDto>, _> = mapper.map(&vec![person()]);
    assert!(matches!(result, Err(MapperError::MapNotExist { .. })));

    let mapped: Vec<PersonDto> = vec![person(), person()]
        .iter()
        .map(|p| mapper.map(p))
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(mapped.len(), 2);
}

#[test]
fn test_reset_semantics() {
    let mapper = Mapper::new();
    mapper.create_map::<Person, PersonDto>().unwrap();
    let _: PersonDto = mapper.map(&person()).unwrap();

    mapper.clear_mappings();

    let result: Result<PersonDto, _> = mapper.map(&person());
    assert!(matches!(result, Err(MapperError::MapNotExist { .. })));

    // The pair can be registered again after a clear.
    mapper.create_map::<Person, PersonDto>().unwrap();
    let dto: PersonDto = mapper.map(&person()).unwrap();
    assert_eq!(dto.name, "Alice");
}

#[test]
fn test_nested_collections() {
    let mapper = Mapper::new();
    mapper.create_map::<Item, ItemDto>().unwrap();
    mapper.create_map::<Order, OrderDto>().unwrap();

    let order = Order {
        id: 99,
        items: vec![
            Item {
                sku: "a".into(),
                quantity: 1,
            },
            Item {
                sku: "b".into(),
                quantity: 2,
            },
            Item {
                sku: "c".into(),
                quantity: 3,
            },
        ],
        shipping: Some(Item {
            sku: "ship".into(),
            quantity: 1,
        }),
    };

    let dto: OrderDto = mapper.map(&order).unwrap();
    assert_eq!(dto.id, 99);
    assert_eq!(dto.items.len(), 3);
    assert_eq!(
        dto.items.iter().map(|i| i.sku.as_str()).collect::<Vec<_>>(),
        vec!["a", "b", "c"]
    );
    assert_eq!(dto.items[2].quantity, 3);
    assert_eq!(dto.shipping.unwrap().sku, "ship");
}

#[test]
fn test_map_kind_conversion() {
    let mapper = Mapper::new();
    mapper.create_map::<Item, ItemDto>().unwrap();

    let mut source = HashMap::new();
    source.insert(
        "first".to_string(),
        Item {
            sku: "a".into(),
            quantity: 1,
        },
    );
    source.insert(
        "second".to_string(),
        Item {
            sku: "b".into(),
            quantity: 2,
        },
    );

    let converted: HashMap<String, ItemDto> = mapper.map(&source).unwrap();
    assert_eq!(converted.len(), 2);
    assert_eq!(converted["first"].sku, "a");
    assert_eq!(converted["second"].quantity, 2);
}

#[test]
fn test_idempotence_and_source_untouched() {
    let mapper = Mapper::new();
    mapper.create_map::<Person, PersonDto>().unwrap();

    let source = person();
    let first: PersonDto = mapper.map(&source).unwrap();
    let second: PersonDto = mapper.map(&source).unwrap();

    assert_eq!(first, second);
    assert_eq!(source, person());
}

// =============================================================================
// Tag matching and partial shapes
// =============================================================================

#[derive(Debug, Default, Clone, PartialEq)]
struct LegacyRecord {
    user_name: String,
    mail: String,
    internal_code: i64,
}

#[derive(Debug, Default, Clone, PartialEq)]
#[allow(non_snake_case)]
struct Contact {
    UserName: String,
    email: String,
}

reflect_struct!(LegacyRecord {
    user_name: String,
    mail: String => "email",
    internal_code: i64,
});
reflect_struct!(Contact {
    UserName: String,
    email: String,
});

#[test]
fn test_tag_and_pascal_matching() {
    let mapper = Mapper::new();
    mapper.create_map::<LegacyRecord, Contact>().unwrap();

    let record = LegacyRecord {
        user_name: "alice".into(),
        mail: "alice@example.com".into(),
        internal_code: 42,
    };

    // user_name reaches UserName through the PascalCase rule, mail
    // reaches email through its tag; internal_code is silently dropped.
    let contact: Contact = mapper.map(&record).unwrap();
    assert_eq!(contact.UserName, "alice");
    assert_eq!(contact.email, "alice@example.com");
}

#[test]
fn test_strict_mode_rejects_unmatched_fields_at_registration() {
    let mapper = Mapper::with_mode(MapMode::Strict);
    let err = mapper.create_map::<LegacyRecord, Contact>().unwrap_err();
    assert_eq!(
        err,
        MapperError::unmatched_field(std::any::type_name::<LegacyRecord>(), "internal_code")
    );
}

#[derive(Debug, Default, Clone, PartialEq)]
struct AgeRecord {
    age: i64,
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Mismatched {
    age: String,
}

reflect_struct!(AgeRecord { age: i64 });
reflect_struct!(Mismatched { age: String });

#[test]
fn test_lenient_kind_mismatch_keeps_default() {
    let mapper = Mapper::new();
    mapper.create_map::<Person, Mismatched>().unwrap();

    // Person.age is an int, Mismatched.age a string: the field is left
    // at its default, nothing fails.
    let out: Mismatched = mapper.map(&person()).unwrap();
    assert_eq!(out.age, "");
}

#[test]
fn test_strict_kind_mismatch_fails_at_conversion() {
    // Every field matches by name, so strict registration succeeds; the
    // int-to-string mismatch only surfaces at conversion time.
    let mapper = Mapper::with_mode(MapMode::Strict);
    mapper.create_map::<AgeRecord, Mismatched>().unwrap();

    let result: Result<Mismatched, _> = mapper.map(&AgeRecord { age: 30 });
    assert_eq!(result, Err(MapperError::incompatible_kinds("int", "string")));
}

#[test]
fn test_per_instance_isolation() {
    // Two mappers share nothing; clearing one leaves the other intact.
    let a = Mapper::new();
    let b = Mapper::new();
    a.create_map::<Person, PersonDto>().unwrap();
    b.create_map::<Person, PersonDto>().unwrap();

    a.clear_mappings();

    assert!(matches!(
        a.map::<Person, PersonDto>(&person()),
        Err(MapperError::MapNotExist { .. })
    ));
    assert!(b.map::<Person, PersonDto>(&person()).is_ok());
}
