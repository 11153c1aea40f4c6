use serde_json::{Map, Value};

/// One step of a response-shape translation.
///
/// Key matches are whole-key and value text is never rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeRule {
    /// Rename `from` to `to` in every object of the body.
    RenameKey {
        from: &'static str,
        to: &'static str,
    },
    /// Replace a boolean `from` with the string `to`, valued by the flag.
    MapFlag {
        from: &'static str,
        to: &'static str,
        when_true: &'static str,
        when_false: &'static str,
    },
    /// If top-level `key` holds a single object, wrap it in a one-element list.
    WrapInList { key: &'static str },
    /// If top-level `key` holds a one-element list, replace it with that element.
    UnwrapSingleton { key: &'static str },
    /// Rename `from` to `to` only inside the subtree held by `parent`.
    RenameNested {
        parent: &'static str,
        from: &'static str,
        to: &'static str,
    },
}

impl ShapeRule {
    pub const fn rename(from: &'static str, to: &'static str) -> Self {
        Self::RenameKey { from, to }
    }

    pub fn apply(&self, body: &mut Value) {
        match *self {
            Self::RenameKey { from, to } => rename_everywhere(body, from, to),
            Self::MapFlag {
                from,
                to,
                when_true,
                when_false,
            } => map_flag_everywhere(body, from, to, when_true, when_false),
            Self::WrapInList { key } => {
                if let Some(slot) = body.as_object_mut().and_then(|map| map.get_mut(key)) {
                    if slot.is_object() {
                        let single = slot.take();
                        *slot = Value::Array(vec![single]);
                    }
                }
            }
            Self::UnwrapSingleton { key } => {
                if let Some(slot) = body.as_object_mut().and_then(|map| map.get_mut(key)) {
                    let single = match slot {
                        Value::Array(items) if items.len() == 1 => items.pop(),
                        _ => None,
                    };
                    if let Some(single) = single {
                        *slot = single;
                    }
                }
            }
            Self::RenameNested { parent, from, to } => {
                rename_under_parent(body, parent, from, to);
            }
        }
    }
}

fn rename_in_object(map: &mut Map<String, Value>, from: &str, to: &str) {
    if let Some(value) = map.remove(from) {
        map.insert(to.to_owned(), value);
    }
}

fn rename_everywhere(value: &mut Value, from: &str, to: &str) {
    match value {
        Value::Object(map) => {
            rename_in_object(map, from, to);
            map.values_mut()
                .for_each(|child| rename_everywhere(child, from, to));
        }
        Value::Array(items) => items
            .iter_mut()
            .for_each(|child| rename_everywhere(child, from, to)),
        _ => {}
    }
}

fn map_flag_everywhere(value: &mut Value, from: &str, to: &str, when_true: &str, when_false: &str) {
    match value {
        Value::Object(map) => {
            if let Some(flag) = map.get(from).and_then(Value::as_bool) {
                map.remove(from);
                let text = if flag { when_true } else { when_false };
                map.insert(to.to_owned(), Value::String(text.to_owned()));
            }
            map.values_mut()
                .for_each(|child| map_flag_everywhere(child, from, to, when_true, when_false));
        }
        Value::Array(items) => items
            .iter_mut()
            .for_each(|child| map_flag_everywhere(child, from, to, when_true, when_false)),
        _ => {}
    }
}

fn rename_under_parent(value: &mut Value, parent: &str, from: &str, to: &str) {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                if key == parent {
                    rename_everywhere(child, from, to);
                } else {
                    rename_under_parent(child, parent, from, to);
                }
            }
        }
        Value::Array(items) => items
            .iter_mut()
            .for_each(|child| rename_under_parent(child, parent, from, to)),
        _ => {}
    }
}
