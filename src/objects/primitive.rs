use crate::objects::Dictionary;
use std::fmt;

/// Identifies one indirect object as `(object number, generation)`.
///
/// This engine always writes generation 0; generations only become relevant
/// with incremental updates, which are out of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId {
    number: u32,
    generation: u16,
}

impl ObjectId {
    pub fn new(number: u32, generation: u16) -> Self {
        Self { number, generation }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn generation(&self) -> u16 {
        self.generation
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} R", self.number, self.generation)
    }
}

/// The tagged PDF value representation.
///
/// Dictionaries keep insertion order so serialization is deterministic.
#[derive(Debug, Clone)]
pub enum Object {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    String(String),
    Name(String),
    Array(Vec<Object>),
    Dictionary(Dictionary),
    Stream(Dictionary, Vec<u8>),
    Reference(ObjectId),
}

impl Object {
    pub fn is_null(&self) -> bool {
        matches!(self, Object::Null)
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Object::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            Object::Real(f) => Some(*f),
            Object::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Object::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Object::Name(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Object]> {
        match self {
            Object::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dictionary> {
        match self {
            Object::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<ObjectId> {
        match self {
            Object::Reference(id) => Some(*id),
            _ => None,
        }
    }
}

impl From<bool> for Object {
    fn from(b: bool) -> Self {
        Object::Boolean(b)
    }
}

impl From<i64> for Object {
    fn from(i: i64) -> Self {
        Object::Integer(i)
    }
}

impl From<f64> for Object {
    fn from(f: f64) -> Self {
        Object::Real(f)
    }
}

impl From<&str> for Object {
    fn from(s: &str) -> Self {
        Object::String(s.to_string())
    }
}

impl From<String> for Object {
    fn from(s: String) -> Self {
        Object::String(s)
    }
}

impl From<Vec<Object>> for Object {
    fn from(v: Vec<Object>) -> Self {
        Object::Array(v)
    }
}

impl From<Dictionary> for Object {
    fn from(d: Dictionary) -> Self {
        Object::Dictionary(d)
    }
}

impl From<ObjectId> for Object {
    fn from(id: ObjectId) -> Self {
        Object::Reference(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id() {
        let id = ObjectId::new(5, 0);
        assert_eq!(id.number(), 5);
        assert_eq!(id.generation(), 0);
        assert_eq!(id.to_string(), "5 0 R");
    }

    #[test]
    fn test_accessors() {
        assert!(Object::Null.is_null());
        assert_eq!(Object::Integer(42).as_integer(), Some(42));
        assert_eq!(Object::Integer(42).as_real(), Some(42.0));
        assert_eq!(Object::Real(1.5).as_real(), Some(1.5));
        assert_eq!(Object::String("hi".into()).as_string(), Some("hi"));
        assert_eq!(Object::Name("Type".into()).as_name(), Some("Type"));
        assert!(Object::Boolean(true).as_integer().is_none());
    }

    #[test]
    fn test_reference_accessor() {
        let id = ObjectId::new(3, 0);
        assert_eq!(Object::Reference(id).as_reference(), Some(id));
        assert_eq!(Object::Null.as_reference(), None);
    }

    #[test]
    fn test_from_conversions() {
        assert!(matches!(Object::from(true), Object::Boolean(true)));
        assert!(matches!(Object::from(7i64), Object::Integer(7)));
        assert!(matches!(Object::from("x"), Object::String(_)));
        assert!(matches!(
            Object::from(ObjectId::new(1, 0)),
            Object::Reference(_)
        ));
    }
}
