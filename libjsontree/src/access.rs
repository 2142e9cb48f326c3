//! Typed accessors for reading a parsed tree.
//!
//! Callers are expected to know the shape of the document they read. A
//! missing member or out-of-range index is an ordinary outcome and yields a
//! "not found" value (`None`, `0.0`, `false`, or `true` for the null checks,
//! which treat "missing" like an explicit `null`). Asking an object accessor
//! of a non-object, an index accessor of a non-array, or finding a member of
//! the wrong kind is a caller bug and panics.

use std::collections::BTreeMap;

use crate::value::{Kind, Value};

impl Value {
    fn members_of(&self, accessor: &str) -> &BTreeMap<String, Value> {
        match self {
            Value::Object(obj) => obj,
            other => panic!("{} called on {}, expected object", accessor, other.kind()),
        }
    }

    fn elements_of(&self, accessor: &str) -> &[Value] {
        match self {
            Value::Array(arr) => arr,
            other => panic!("{} called on {}, expected array", accessor, other.kind()),
        }
    }

    fn member(&self, accessor: &str, name: &str, expected: Kind) -> Option<&Value> {
        let child = self.members_of(accessor).get(name)?;
        assert_eq!(
            child.kind(),
            expected,
            "member {:?} is {}, expected {}",
            name,
            child.kind(),
            expected
        );
        Some(child)
    }

    fn element(&self, accessor: &str, index: usize, expected: Kind) -> Option<&Value> {
        let child = self.elements_of(accessor).get(index)?;
        assert_eq!(
            child.kind(),
            expected,
            "element {} is {}, expected {}",
            index,
            child.kind(),
            expected
        );
        Some(child)
    }

    // ========================================================================
    // By name
    // ========================================================================

    /// String member `name`, or `None` if absent.
    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.member("get_string", name, Kind::String)
            .and_then(Value::as_str)
    }

    /// Number member `name`, or `0.0` if absent.
    pub fn get_number(&self, name: &str) -> f64 {
        self.member("get_number", name, Kind::Number)
            .and_then(Value::as_number)
            .unwrap_or(0.0)
    }

    /// Object member `name`, or `None` if absent.
    pub fn get_object(&self, name: &str) -> Option<&Value> {
        self.member("get_object", name, Kind::Object)
    }

    /// Array member `name`, or `None` if absent.
    pub fn get_array(&self, name: &str) -> Option<&Value> {
        self.member("get_array", name, Kind::Array)
    }

    /// Boolean member `name`, or `false` if absent.
    pub fn get_boolean(&self, name: &str) -> bool {
        self.member("get_boolean", name, Kind::Boolean)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Whether member `name` is `null` or absent. Any kind is accepted.
    pub fn is_null_member(&self, name: &str) -> bool {
        self.members_of("is_null_member")
            .get(name)
            .is_none_or(Value::is_null)
    }

    // ========================================================================
    // By index
    // ========================================================================

    /// Number of elements in this array.
    pub fn array_len(&self) -> usize {
        self.elements_of("array_len").len()
    }

    /// String element at `index`, or `None` if out of range.
    pub fn get_string_at(&self, index: usize) -> Option<&str> {
        self.element("get_string_at", index, Kind::String)
            .and_then(Value::as_str)
    }

    /// Number element at `index`, or `0.0` if out of range.
    pub fn get_number_at(&self, index: usize) -> f64 {
        self.element("get_number_at", index, Kind::Number)
            .and_then(Value::as_number)
            .unwrap_or(0.0)
    }

    /// Object element at `index`, or `None` if out of range.
    pub fn get_object_at(&self, index: usize) -> Option<&Value> {
        self.element("get_object_at", index, Kind::Object)
    }

    /// Array element at `index`, or `None` if out of range.
    pub fn get_array_at(&self, index: usize) -> Option<&Value> {
        self.element("get_array_at", index, Kind::Array)
    }

    /// Boolean element at `index`, or `false` if out of range.
    pub fn get_boolean_at(&self, index: usize) -> bool {
        self.element("get_boolean_at", index, Kind::Boolean)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Whether the element at `index` is `null` or out of range.
    pub fn is_null_at(&self, index: usize) -> bool {
        self.elements_of("is_null_at")
            .get(index)
            .is_none_or(Value::is_null)
    }

    // ========================================================================
    // By path
    // ========================================================================

    /// Walk `/`-separated member names from this object.
    ///
    /// Empty segments are skipped, so `""` and `"/"` address `self`. Every
    /// value walked through must be an object.
    fn walk(&self, path: &str) -> Option<&Value> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |current, segment| {
                current.members_of("path lookup").get(segment)
            })
    }

    /// Object at `path`, or `None` if some segment is missing.
    pub fn get_object_by_path(&self, path: &str) -> Option<&Value> {
        let found = self.walk(path)?;
        assert_eq!(found.kind(), Kind::Object, "path {:?} is not an object", path);
        Some(found)
    }

    /// Array at `path`, or `None` if some segment is missing.
    pub fn get_array_by_path(&self, path: &str) -> Option<&Value> {
        let found = self.walk(path)?;
        assert_eq!(found.kind(), Kind::Array, "path {:?} is not an array", path);
        Some(found)
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;

    #[test]
    fn test_walk_skips_empty_segments() {
        let root = parse(r#"{"a": {"b": {"c": "x"}}}"#).unwrap();
        let b = root.get_object_by_path("/a//b/").unwrap();
        assert_eq!(b.get_string("c"), Some("x"));
        assert_eq!(root.get_object_by_path(""), Some(&root));
    }

    #[test]
    #[should_panic(expected = "path lookup called on string, expected object")]
    fn test_walk_through_string_panics() {
        let root = parse(r#"{"a": "leaf"}"#).unwrap();
        root.get_object_by_path("a/b");
    }
}
