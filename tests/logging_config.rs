mod common;

use common::{init_logging, logging_config};
use deepfreeze::{build_named, freeze, Error, FrozenValue, NamedObject, Value};

fn frozen_config() -> NamedObject {
    init_logging();
    build_named("LoggingConfig", &mut logging_config(), false, true, true).unwrap()
}

#[test]
fn test_dict_becomes_frozen_mapping() {
    let config = frozen_config();
    let result = config
        .attr("loggers")
        .unwrap()
        .get("myproject.custom")
        .unwrap();
    assert!(matches!(result, Value::Frozen(FrozenValue::Mapping(_))));
}

#[test]
fn test_list_becomes_frozen_sequence() {
    let config = frozen_config();
    let result = config
        .attr("handlers")
        .unwrap()
        .get("console")
        .and_then(|console| console.get("filters"))
        .unwrap();
    assert!(matches!(result, Value::Frozen(FrozenValue::Sequence(_))));
}

#[test]
fn test_set_becomes_frozen_set() {
    let config = frozen_config();
    let handlers = config
        .attr("loggers")
        .and_then(|loggers| loggers.get("myproject.custom"))
        .and_then(|logger| logger.get("handlers"))
        .unwrap();
    assert!(matches!(handlers, Value::Frozen(FrozenValue::Set(_))));
    assert!(handlers.contains(&Value::from("console")));
    assert!(handlers.contains(&Value::from("mail_admins")));
}

#[test]
fn test_frozen_sequence_contents() {
    let config = frozen_config();
    let filters = config
        .attr("handlers")
        .and_then(|handlers| handlers.get("console"))
        .and_then(|console| console.get("filters"))
        .and_then(Value::as_frozen)
        .and_then(FrozenValue::as_sequence)
        .unwrap();
    assert_eq!(filters.as_slice(), &[Value::from("require_debug_true")]);
    assert_eq!(filters[0], Value::from("require_debug_true"));
}

#[test]
fn test_frozen_mapping_rejects_assignment() {
    let config = frozen_config();
    let mut console = config
        .attr("handlers")
        .and_then(|handlers| handlers.get("console"))
        .cloned()
        .unwrap();
    assert_eq!(
        console.insert("level", "DEBUG"),
        Err(Error::Mutation {
            operation: "assign item",
            kind: "frozen mapping"
        })
    );
    assert_eq!(
        console.get("level").and_then(Value::as_str),
        Some("INFO")
    );
}

#[test]
fn test_frozen_set_rejects_add() {
    let config = frozen_config();
    let mut handlers = config
        .attr("loggers")
        .and_then(|loggers| loggers.get("myproject.custom"))
        .and_then(|logger| logger.get("handlers"))
        .cloned()
        .unwrap();
    assert!(matches!(
        handlers.add("DUMMY"),
        Err(Error::Mutation { kind: "frozen set", .. })
    ));
    assert_eq!(handlers.len(), Some(2));
}

#[test]
fn test_freeze_sequence_keeps_items() {
    let data = Value::sequence([Value::from("console"), Value::set(["mail_admins"])]);
    let result = freeze(data.clone(), true).unwrap();
    assert_eq!(result.len(), data.len());
    assert_eq!(result.at(0), data.at(0));
    assert!(result
        .at(1)
        .unwrap()
        .contains(&Value::from("mail_admins")));
}

#[test]
fn test_freeze_mapping_freezes_nested_mapping() {
    let data = Value::mapping([(
        "mail_admins",
        Value::mapping([
            ("level", Value::from("ERROR")),
            ("class", Value::from("django.utils.log.AdminEmailHandler")),
            ("filters", Value::sequence(["special"])),
        ]),
    )]);
    let result = freeze(data, true).unwrap();
    let mut admins = result.get("mail_admins").cloned().unwrap();
    assert!(matches!(admins, Value::Frozen(FrozenValue::Mapping(_))));
    assert!(matches!(
        admins.insert("level", "DEBUG"),
        Err(Error::Mutation { .. })
    ));
}

#[test]
fn test_clone_true_leaves_source_unchanged() {
    init_logging();
    let mut logging = logging_config();
    build_named("LoggingConfig", &mut logging, false, true, true).unwrap();
    assert_eq!(logging, logging_config());
}

#[test]
fn test_clone_false_consumes_source() {
    init_logging();
    let mut logging = logging_config();
    let config = build_named("LoggingConfig", &mut logging, false, true, false).unwrap();
    assert_ne!(logging, logging_config());

    // Every top-level container was replaced by the frozen value the object holds
    let handlers = logging.get("handlers").unwrap();
    assert!(handlers.is_frozen());
    assert!(handlers
        .as_frozen()
        .unwrap()
        .ptr_eq(config.attr("handlers").unwrap().as_frozen().unwrap()));
    assert_eq!(logging.get("version"), Some(&Value::Int(1)));
}

#[test]
fn test_only_const_skips_lower_case_keys() {
    init_logging();
    let config = build_named("LoggingConfig", &mut logging_config(), true, true, true).unwrap();
    assert!(config.is_empty());
    assert_eq!(config.mapping().len(), 6);
    assert!(config.item("loggers").unwrap().is_deeply_frozen());
}

#[test]
fn test_display() {
    let config = frozen_config();
    let text = config.to_string();
    assert!(text.starts_with("LoggingConfig(version=1, disable_existing_loggers=False, "));
    assert!(text.contains(r#""filters": ("require_debug_true",)"#));
}
