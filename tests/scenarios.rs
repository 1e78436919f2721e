mod common;

use deepfreeze::{
    build, build_named, freeze, BuildOptions, Builder, ConstPolicy, Error, FrozenValue, Key,
    Value,
};

#[test]
fn test_nested_mapping_with_sequence() {
    common::init_logging();
    let mut source = Value::mapping([(
        "a",
        Value::mapping([("b", Value::sequence([1, 2, 3]))]),
    )]);
    let result = build_named("Result", &mut source, false, true, true).unwrap();

    let a = result.attr("a").unwrap();
    assert!(matches!(a, Value::Frozen(FrozenValue::Mapping(_))));

    let b = a.get("b").unwrap();
    let expected = freeze(Value::sequence([1, 2, 3]), true).unwrap();
    assert_eq!(b, &expected);
    assert_eq!(b.len(), Some(3));

    let mut a = a.clone();
    assert!(matches!(
        a.insert("b", Value::sequence([4])),
        Err(Error::Mutation { .. })
    ));
}

#[test]
fn test_set_attribute() {
    let mut source = Value::mapping([("h", Value::set(["x", "y"]))]);
    let result = build_named("Result", &mut source, false, true, true).unwrap();
    let h = result.attr("h").unwrap();
    assert_eq!(h, &freeze(Value::set(["y", "x"]), true).unwrap());
    assert!(h.contains(&Value::from("x")));
    assert!(!h.contains(&Value::from("z")));
}

#[test]
fn test_shallow_build_freezes_top_level_values_only() {
    let mut source = Value::mapping([(
        "outer",
        Value::mapping([("inner", Value::sequence([1]))]),
    )]);
    let result = build_named("Result", &mut source, false, false, true).unwrap();
    let outer = result.attr("outer").unwrap();
    assert!(outer.is_frozen());
    assert!(!outer.get("inner").unwrap().is_frozen());
    assert!(!result.is_deeply_frozen());
}

#[test]
fn test_unhashable_set_element_fails_build() {
    let mut source = Value::mapping([("bad", Value::set([Value::mapping([("k", 1)])]))]);
    assert!(matches!(
        build_named("Result", &mut source, false, true, true),
        Err(Error::TypeConversion { .. })
    ));
}

#[test]
fn test_invalid_attribute_name_fails_build() {
    let mut source = Value::mapping([("django.request", 1)]);
    let err = build_named("Result", &mut source, false, true, true).unwrap_err();
    assert_eq!(
        err,
        Error::NameConflict {
            name: "django.request".to_string(),
            reason: "not a valid identifier".to_string()
        }
    );
}

#[test]
fn test_frozen_sequence_keys() {
    let origin = Key::try_from(freeze(Value::sequence([0, 0]), true).unwrap()).unwrap();
    let corner = Key::try_from(freeze(Value::sequence([1, 1]), true).unwrap()).unwrap();
    let mut source = Value::mapping([(
        "grid",
        Value::mapping([
            (origin.clone(), Value::sequence(["start"])),
            (corner.clone(), Value::from("end")),
        ]),
    )]);
    let result = build_named("Board", &mut source, false, true, true).unwrap();
    let grid = result.attr("grid").unwrap();
    assert!(grid.is_deeply_frozen());
    assert_eq!(grid.get(&corner), Some(&Value::from("end")));
    assert!(grid.get(&origin).unwrap().is_frozen());
    assert_eq!(grid.to_string(), r#"mappingproxy({(0, 0): ("start",), (1, 1): "end"})"#);
}

#[test]
fn test_keyword_keys_become_attributes() {
    #[derive(serde::Deserialize)]
    struct Database {
        r#type: String,
        port: i64,
    }

    let mut source = Value::mapping([
        ("type", Value::from("postgres")),
        ("port", Value::from(5432)),
    ]);
    let result = build_named("Db", &mut source, false, true, true).unwrap();
    assert_eq!(result.attr("type"), Some(&Value::from("postgres")));

    let db: Database = result.record().unwrap();
    assert_eq!(db.r#type, "postgres");
    assert_eq!(db.port, 5432);
}

#[test]
fn test_only_const_allows_non_identifier_keys() {
    let mut source = Value::mapping([
        ("django.request", Value::from("ERROR")),
        ("TIMEOUT", Value::from(30)),
    ]);
    let options = BuildOptions::new().with_only_const(ConstPolicy::UpperCase);
    let result = build("Settings", &mut source, &options).unwrap();
    assert_eq!(result.field_names().collect::<Vec<_>>(), vec!["TIMEOUT"]);
    assert_eq!(result.item("django.request"), Some(&Value::from("ERROR")));
}

#[test]
fn test_opaque_values_pass_through() {
    let handle = Value::opaque(std::sync::Mutex::new(0u32));
    let mut source = Value::mapping([("lock", handle.clone())]);
    let result = build_named("Result", &mut source, false, true, true).unwrap();
    assert_eq!(result.attr("lock"), Some(&handle));
    assert!(result.is_deeply_frozen());
}

#[test]
fn test_typed_record() {
    #[derive(serde::Deserialize)]
    struct Handler {
        level: String,
        filters: Vec<String>,
    }

    #[derive(serde::Deserialize)]
    struct Config {
        version: i64,
        console: Handler,
    }

    let mut source = Value::mapping([
        ("version", Value::from(1)),
        (
            "console",
            Value::mapping([
                ("level", Value::from("INFO")),
                ("filters", Value::set(["special"])),
            ]),
        ),
    ]);
    let result = build_named("Config", &mut source, false, true, true).unwrap();
    let config: Config = result.record().unwrap();
    assert_eq!(config.version, 1);
    assert_eq!(config.console.level, "INFO");
    assert_eq!(config.console.filters, vec!["special".to_string()]);
}

#[test]
fn test_builder_is_reusable() {
    let builder = Builder::new(BuildOptions::new().with_clone(false)).unwrap();
    let mut first = Value::mapping([("a", Value::sequence([1]))]);
    let mut second = Value::mapping([("b", Value::sequence([2]))]);
    let one = builder.build("One", &mut first).unwrap();
    let two = builder.build("Two", &mut second).unwrap();
    assert_eq!(one.type_name(), "One");
    assert_eq!(two.type_name(), "Two");
    assert!(first.get("a").unwrap().is_frozen());
    assert!(second.get("b").unwrap().is_frozen());
}

#[test]
fn test_serialize_named_object() {
    let mut source = Value::mapping([
        ("name", Value::from("app")),
        ("tags", Value::sequence(["a", "b"])),
    ]);
    let result = build_named("App", &mut source, false, true, true).unwrap();
    assert_eq!(
        serde_json::to_string(&result).unwrap(),
        r#"{"name":"app","tags":["a","b"]}"#
    );
}
