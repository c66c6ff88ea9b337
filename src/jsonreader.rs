//! Cursor-based navigation over a parsed JSON document (component B).
//!
//! Mirrors `JsonParserAgent` from the original poller: a stack of borrowed
//! positions into the document, descended into by name or by index, with
//! typed scalar reads at the current position. Numeric upstream fields
//! arrive as JSON strings as often as JSON numbers; both are accepted.

use serde_json::Value;

use crate::error::ParseError;

pub struct JsonReader<'a> {
    stack: Vec<&'a Value>,
    path: Vec<String>,
}

impl<'a> JsonReader<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self { stack: vec![root], path: vec!["$".to_string()] }
    }

    fn top(&self) -> &'a Value {
        self.stack.last().copied().expect("reader stack is never empty")
    }

    fn current_path(&self, member: &str) -> String {
        format!("{}.{}", self.path.last().map(String::as_str).unwrap_or("$"), member)
    }

    /// Descend into a named member. Tolerates the member being an object
    /// or an array — the upstream's `result` member is itself an array,
    /// and the original parser used the same "enter" call for both.
    pub fn enter_object(&mut self, name: &str) -> Result<(), ParseError> {
        let member = self
            .top()
            .get(name)
            .ok_or_else(|| ParseError::missing(self.current_path(name)))?;
        if !member.is_object() && !member.is_array() {
            return Err(ParseError::wrong_kind(self.current_path(name), "object or array"));
        }
        let path = self.current_path(name);
        self.stack.push(member);
        self.path.push(path);
        Ok(())
    }

    pub fn leave_object(&mut self) {
        assert!(self.stack.len() > 1, "leave_object() without a matching enter_object()");
        self.stack.pop();
        self.path.pop();
    }

    /// Size of the array at the current position.
    pub fn count_elements(&self) -> Result<usize, ParseError> {
        self.top()
            .as_array()
            .map(|a| a.len())
            .ok_or_else(|| ParseError::wrong_kind(self.path.last().cloned().unwrap_or_default(), "array"))
    }

    /// Descend into the i-th element of the array at the current position.
    pub fn enter_element(&mut self, index: usize) -> Result<(), ParseError> {
        let base = self.path.last().cloned().unwrap_or_default();
        let element = self
            .top()
            .as_array()
            .and_then(|a| a.get(index))
            .ok_or_else(|| ParseError::missing(format!("{base}[{index}]")))?;
        self.stack.push(element);
        self.path.push(format!("{base}[{index}]"));
        Ok(())
    }

    pub fn leave_element(&mut self) {
        assert!(self.stack.len() > 1, "leave_element() without a matching enter_element()");
        self.stack.pop();
        self.path.pop();
    }

    pub fn read_string(&self, name: &str) -> Result<String, ParseError> {
        let v = self
            .top()
            .get(name)
            .ok_or_else(|| ParseError::missing(self.current_path(name)))?;
        v.as_str()
            .map(str::to_string)
            .ok_or_else(|| ParseError::wrong_kind(self.current_path(name), "string"))
    }

    pub fn read_int(&self, name: &str) -> Result<i32, ParseError> {
        let v = self
            .top()
            .get(name)
            .ok_or_else(|| ParseError::missing(self.current_path(name)))?;
        read_i32(v, || self.current_path(name))
    }

    pub fn read_uint64(&self, name: &str) -> Result<u64, ParseError> {
        let v = self
            .top()
            .get(name)
            .ok_or_else(|| ParseError::missing(self.current_path(name)))?;
        read_u64(v, || self.current_path(name))
    }
}

fn read_i32(v: &Value, path: impl Fn() -> String) -> Result<i32, ParseError> {
    match v {
        Value::Number(n) => n
            .as_i64()
            .and_then(|x| i32::try_from(x).ok())
            .ok_or_else(|| ParseError::invalid_number(path(), &n.to_string())),
        Value::String(s) => s.parse::<i32>().map_err(|_| ParseError::invalid_number(path(), s)),
        _ => Err(ParseError::wrong_kind(path(), "int")),
    }
}

fn read_u64(v: &Value, path: impl Fn() -> String) -> Result<u64, ParseError> {
    match v {
        Value::Number(n) => n.as_u64().ok_or_else(|| ParseError::invalid_number(path(), &n.to_string())),
        Value::String(s) => s.parse::<u64>().map_err(|_| ParseError::invalid_number(path(), s)),
        _ => Err(ParseError::wrong_kind(path(), "uint64")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_string_and_numeric_fields() {
        let doc = json!({"name": "cpu load", "status": 1, "templateid": "12345"});
        let reader = JsonReader::new(&doc);
        assert_eq!(reader.read_string("name").unwrap(), "cpu load");
        assert_eq!(reader.read_int("status").unwrap(), 1);
        assert_eq!(reader.read_uint64("templateid").unwrap(), 12345);
    }

    #[test]
    fn accepts_numeric_fields_as_either_strings_or_numbers() {
        let doc = json!({"a": "42", "b": 42});
        let reader = JsonReader::new(&doc);
        assert_eq!(reader.read_int("a").unwrap(), reader.read_int("b").unwrap());
    }

    #[test]
    fn rejects_malformed_numeric_strings() {
        let doc = json!({"lastchange": "not-a-number"});
        let reader = JsonReader::new(&doc);
        let err = reader.read_int("lastchange").unwrap_err();
        assert_eq!(err.path, "$.lastchange");
    }

    #[test]
    fn missing_member_is_a_parse_error() {
        let doc = json!({});
        let reader = JsonReader::new(&doc);
        assert!(reader.read_string("missing").is_err());
    }

    #[test]
    fn navigates_nested_arrays_and_objects() {
        let doc = json!({
            "result": [
                {"triggerid": "1", "hosts": [{"hostid": "10"}]},
                {"triggerid": "2", "hosts": []}
            ]
        });
        let mut reader = JsonReader::new(&doc);
        reader.enter_object("result").unwrap();
        assert_eq!(reader.count_elements().unwrap(), 2);

        reader.enter_element(0).unwrap();
        assert_eq!(reader.read_uint64("triggerid").unwrap(), 1);
        reader.enter_object("hosts").unwrap();
        assert_eq!(reader.count_elements().unwrap(), 1);
        reader.enter_element(0).unwrap();
        assert_eq!(reader.read_uint64("hostid").unwrap(), 10);
        reader.leave_element();
        reader.leave_object();
        reader.leave_element();

        reader.enter_element(1).unwrap();
        reader.enter_object("hosts").unwrap();
        assert_eq!(reader.count_elements().unwrap(), 0);
        reader.leave_object();
        reader.leave_element();
    }
}
