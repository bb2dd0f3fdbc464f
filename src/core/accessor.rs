//! Dotted-path access into a document
//!
//! Pure functions: nothing here performs I/O. Existence is decided by key
//! presence, so stored `0`, `""`, `false` and `null` values are found like
//! any other value.

use crate::core::errors::{Result, StoreError};
use crate::core::path::{Path, PathSegment};
use crate::core::value::{Document, Value};

/// Move one level down without creating anything
fn step<'a>(current: &'a Value, segment: &PathSegment) -> Option<&'a Value> {
    match current {
        Value::Object(map) => map.get(segment.as_str()),
        Value::Array(items) => segment.as_index().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn step_mut<'a>(current: &'a mut Value, segment: &PathSegment) -> Option<&'a mut Value> {
    match current {
        Value::Object(map) => map.get_mut(segment.as_str()),
        Value::Array(items) => segment.as_index().and_then(move |i| items.get_mut(i)),
        _ => None,
    }
}

/// Get the slot for `segment`, creating it when absent.
///
/// A non-container `current` is replaced by an empty object first.
fn slot<'a>(current: &'a mut Value, segment: &PathSegment, path: &Path) -> Result<&'a mut Value> {
    match current {
        Value::Object(map) => Ok(map.entry(segment.as_str()).or_insert(Value::Null)),
        Value::Array(items) => {
            let len = items.len();
            match segment.as_index() {
                Some(index) if index < len => Ok(&mut items[index]),
                Some(index) if index == len => {
                    items.push(Value::Null);
                    Ok(&mut items[index])
                }
                _ => Err(out_of_bounds(segment, len, path)),
            }
        }
        other => {
            *other = Value::Object(Document::new());
            slot(other, segment, path)
        }
    }
}

fn out_of_bounds(segment: &PathSegment, len: usize, path: &Path) -> StoreError {
    StoreError::InvalidArgument(format!(
        "'{}' in '{}' is not a valid index for an array of length {}",
        segment.as_str(),
        path,
        len
    ))
}

/// Reject writes through existing arrays before anything is mutated
fn check_writable(doc: &Document, path: &Path) -> Result<()> {
    let mut current = match doc.get(path.root().as_str()) {
        Some(value) => value,
        None => return Ok(()),
    };

    for segment in &path.segments()[1..] {
        match current {
            Value::Array(items) => match segment.as_index() {
                Some(index) if index < items.len() => current = &items[index],
                Some(index) if index == items.len() => return Ok(()),
                _ => return Err(out_of_bounds(segment, items.len(), path)),
            },
            Value::Object(map) => match map.get(segment.as_str()) {
                Some(value) => current = value,
                None => return Ok(()),
            },
            // Scalars get replaced, everything below is fresh
            _ => return Ok(()),
        }
    }

    Ok(())
}

/// Get the value at `path`, or `None` as soon as a segment is missing or
/// not traversable
pub fn get<'a>(doc: &'a Document, path: &Path) -> Option<&'a Value> {
    let mut current = doc.get(path.root().as_str())?;

    for segment in &path.segments()[1..] {
        current = step(current, segment)?;
    }

    Some(current)
}

/// Mutable counterpart of [`get`]
pub fn get_mut<'a>(doc: &'a mut Document, path: &Path) -> Option<&'a mut Value> {
    let mut current = doc.get_mut(path.root().as_str())?;

    for segment in &path.segments()[1..] {
        current = step_mut(current, segment)?;
    }

    Some(current)
}

/// Assign `value` at `path`.
///
/// Missing intermediate segments are created as empty objects; an
/// intermediate holding a scalar is overwritten by an empty object.
/// Arrays are walked by index, and an index equal to the array length
/// appends.
pub fn set(doc: &mut Document, path: &Path, value: Value) -> Result<()> {
    check_writable(doc, path)?;

    let mut current = doc
        .entry(path.root().as_str())
        .or_insert(Value::Null);

    for segment in &path.segments()[1..] {
        current = slot(current, segment, path)?;
    }

    *current = value;
    Ok(())
}

/// Check whether `path` resolves to a value
pub fn has(doc: &Document, path: &Path) -> bool {
    get(doc, path).is_some()
}

/// Remove the value at `path`.
///
/// Returns `false` without touching the document when an intermediate
/// segment is absent or not traversable. Otherwise returns `true`, also
/// when the final key was not present. A path ending inside an array is
/// refused with `false` and no mutation; elements leave an array through
/// `Database::pull`.
pub fn unset(doc: &mut Document, path: &Path) -> bool {
    if path.len() == 1 {
        doc.shift_remove(path.root().as_str());
        return true;
    }

    let mut current = match doc.get_mut(path.root().as_str()) {
        Some(value) => value,
        None => return false,
    };

    for segment in &path.parents()[1..] {
        current = match step_mut(current, segment) {
            Some(value) => value,
            None => return false,
        };
    }

    let last = path.last();
    match current {
        Value::Object(map) => {
            map.shift_remove(last.as_str());
            true
        }
        _ => false,
    }
}

/// Deep-merge `source` into `target`. Objects present on both sides are
/// merged recursively; any other value from `source` replaces the target's.
pub fn merge(target: &mut Document, source: Document) {
    for (key, value) in source {
        let both_objects = matches!(
            (target.get(&key), &value),
            (Some(Value::Object(_)), Value::Object(_))
        );

        if both_objects {
            if let (Some(Value::Object(existing)), Value::Object(incoming)) =
                (target.get_mut(&key), value)
            {
                merge(existing, incoming);
            }
        } else {
            target.insert(key, value);
        }
    }
}
