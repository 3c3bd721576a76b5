//! Scoped variable environment
//!
//! A stack of frames, innermost last. Lookups and writes search from the
//! innermost frame outward and never create bindings on their own; only
//! [`Environment::declare`] does, and only in the innermost frame.

use indexmap::IndexMap;

use super::value::Value;
use crate::diagnostics::{Error, Result};

/// One scope level: names declared in it and their values
pub type Frame = IndexMap<String, Value>;

#[derive(Debug, Clone)]
pub struct Environment {
    frames: Vec<Frame>,
}

impl Environment {
    /// Create an environment holding a single global frame
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::new()],
        }
    }

    /// Push a new empty frame
    pub fn push(&mut self) {
        self.frames.push(Frame::new());
        tracing::trace!(depth = self.frames.len(), "push frame");
    }

    /// Discard the innermost frame and its bindings
    pub fn pop(&mut self) {
        self.frames.pop();
        tracing::trace!(depth = self.frames.len(), "pop frame");
    }

    /// Bind `name` with no value in the innermost frame, resetting any
    /// binding that frame already had
    pub fn declare(&mut self, name: &str) {
        if self.frames.is_empty() {
            self.frames.push(Frame::new());
        }
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name.to_string(), Value::Nil);
        }
    }

    /// Read the innermost visible binding of `name`
    pub fn read(&self, name: &str) -> Result<Value> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(name))
            .cloned()
            .ok_or_else(|| Error::name_not_found(name))
    }

    /// Overwrite the innermost visible binding of `name`
    pub fn write(&mut self, name: &str, value: Value) -> Result<()> {
        let slot = self
            .frames
            .iter_mut()
            .rev()
            .find_map(|frame| frame.get_mut(name))
            .ok_or_else(|| Error::name_not_found(name))?;
        *slot = value;
        Ok(())
    }

    /// Number of frames currently on the stack
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Visible bindings, innermost first; shadowed names are skipped
    pub fn bindings(&self) -> Vec<(&str, &Value)> {
        let mut seen = IndexMap::new();
        for frame in self.frames.iter().rev() {
            for (name, value) in frame {
                seen.entry(name.as_str()).or_insert(value);
            }
        }
        seen.into_iter().collect()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_declare_then_read_is_nil() {
        let mut env = Environment::new();
        env.declare("x");
        assert_eq!(env.read("x").unwrap(), Value::Nil);
    }

    #[test]
    fn test_read_undeclared_fails() {
        let env = Environment::new();
        assert_eq!(env.read("y").unwrap_err(), Error::name_not_found("y"));
    }

    #[test]
    fn test_write_never_creates_binding() {
        let mut env = Environment::new();
        assert_eq!(
            env.write("y", Value::Int(1)).unwrap_err(),
            Error::name_not_found("y")
        );
        assert!(env.read("y").is_err());
    }

    #[test]
    fn test_inner_frame_shadows_and_pops() {
        let mut env = Environment::new();
        env.declare("x");
        env.write("x", Value::Int(1)).unwrap();

        env.push();
        env.declare("x");
        env.write("x", Value::Int(2)).unwrap();
        assert_eq!(env.read("x").unwrap(), Value::Int(2));
        env.pop();

        assert_eq!(env.read("x").unwrap(), Value::Int(1));
    }

    #[test]
    fn test_write_reaches_outer_frame() {
        let mut env = Environment::new();
        env.declare("x");
        env.push();
        env.write("x", Value::Str("outer".into())).unwrap();
        env.pop();
        assert_eq!(env.read("x").unwrap(), Value::Str("outer".into()));
    }

    #[test]
    fn test_redeclare_resets_value() {
        let mut env = Environment::new();
        env.declare("x");
        env.write("x", Value::Int(5)).unwrap();
        env.declare("x");
        assert_eq!(env.read("x").unwrap(), Value::Nil);
    }

    #[test]
    fn test_bindings_skip_shadowed_names() {
        let mut env = Environment::new();
        env.declare("a");
        env.declare("b");
        env.push();
        env.declare("a");
        env.write("a", Value::Int(1)).unwrap();

        let names: Vec<_> = env.bindings().into_iter().map(|(n, v)| (n, v.clone())).collect();
        assert_eq!(names, vec![("a", Value::Int(1)), ("b", Value::Nil)]);
        assert_eq!(env.depth(), 2);
    }
}
