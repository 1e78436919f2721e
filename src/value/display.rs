use std::fmt;

use super::{Key, Value};

/// Write `items` separated by ", "
pub(crate) fn write_joined<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = T>,
) -> fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// Write mapping entries as `key: value` pairs
pub(crate) fn write_entries<'a>(
    f: &mut fmt::Formatter<'_>,
    entries: impl IntoIterator<Item = (&'a Key, &'a Value)>,
) -> fmt::Result {
    for (i, (key, value)) in entries.into_iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        match key {
            Key::Str(s) => write!(f, "{:?}: {}", s, value)?,
            other => write!(f, "{}: {}", other, value)?,
        }
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "None"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Mapping(map) => {
                write!(f, "{{")?;
                write_entries(f, map)?;
                write!(f, "}}")
            }
            Value::Sequence(items) => {
                write!(f, "[")?;
                write_joined(f, items)?;
                write!(f, "]")
            }
            Value::Set(set) if set.is_empty() => write!(f, "set()"),
            Value::Set(set) => {
                write!(f, "{{")?;
                write_joined(f, set)?;
                write!(f, "}}")
            }
            Value::Frozen(frozen) => write!(f, "{}", frozen),
            Value::Other(opaque) => write!(f, "<{}>", opaque.type_name()),
        }
    }
}
