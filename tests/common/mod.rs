#![allow(dead_code)]

use deepfreeze::Value;

/// Route library logging to the test output
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Django-style logging configuration used across the integration tests
pub fn logging_config() -> Value {
    let mut config = Value::from_json(
        r#"{
            "version": 1,
            "disable_existing_loggers": false,
            "formatters": {
                "verbose": {
                    "format": "{levelname} {asctime} {module} {process:d} {thread:d} {message}",
                    "style": "{"
                },
                "simple": {
                    "format": "{levelname} {message}",
                    "style": "{"
                }
            },
            "filters": {
                "special": {
                    "()": "project.logging.SpecialFilter",
                    "foo": "bar"
                },
                "require_debug_true": {
                    "()": "django.utils.log.RequireDebugTrue"
                }
            },
            "handlers": {
                "console": {
                    "level": "INFO",
                    "filters": ["require_debug_true"],
                    "class": "logging.StreamHandler",
                    "formatter": "simple"
                },
                "mail_admins": {
                    "level": "ERROR",
                    "class": "django.utils.log.AdminEmailHandler",
                    "filters": ["special"]
                }
            },
            "loggers": {
                "django": {
                    "handlers": ["console"],
                    "propagate": true
                },
                "django.request": {
                    "handlers": ["mail_admins"],
                    "level": "ERROR",
                    "propagate": false
                },
                "myproject.custom": {
                    "handlers": null,
                    "level": "INFO",
                    "filters": ["special"]
                }
            }
        }"#,
    )
    .expect("fixture is valid JSON");

    // JSON has no sets
    config
        .get_mut("loggers")
        .and_then(|loggers| loggers.get_mut("myproject.custom"))
        .expect("fixture has myproject.custom")
        .insert("handlers", Value::set(["console", "mail_admins"]))
        .expect("fixture logger is a mapping");
    config
}
