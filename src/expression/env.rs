//! Variable bindings for quantifiers and comprehensions.

/// Ordered stack of `name -> value` bindings.
///
/// Lookups scan from the newest binding to the oldest, so a later binding
/// shadows an earlier one with the same name until it is popped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    bindings: Vec<(String, i32)>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, shadowing any earlier binding of `name`
    pub fn push(&mut self, name: impl Into<String>, value: i32) {
        self.bindings.push((name.into(), value));
    }

    /// Remove the most recent binding
    pub fn pop(&mut self) -> Option<(String, i32)> {
        self.bindings.pop()
    }

    /// Value of the most recent binding of `name`
    pub fn lookup(&self, name: &str) -> Option<i32> {
        self.bindings
            .iter()
            .rev()
            .find(|(bound, _)| bound == name)
            .map(|(_, value)| *value)
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Whether `name` has any binding
    pub fn is_bound(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Run `f` with `name` bound to `value`.
    ///
    /// The stack is cut back to its prior depth when `f` returns, whatever it
    /// returns, so a body that fails part way cannot leak bindings into its
    /// siblings or its caller.
    pub fn with_binding<T>(
        &mut self,
        name: &str,
        value: i32,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let depth = self.bindings.len();
        self.push(name, value);
        let result = f(self);
        self.bindings.truncate(depth);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_lookup() {
        let mut env = Environment::new();
        assert!(env.is_empty());
        assert_eq!(env.lookup("x"), None);

        env.push("x", 1);
        env.push("y", 2);
        assert_eq!(env.len(), 2);
        assert_eq!(env.lookup("x"), Some(1));
        assert_eq!(env.lookup("y"), Some(2));

        assert_eq!(env.pop(), Some(("y".to_string(), 2)));
        assert_eq!(env.lookup("y"), None);
        assert!(env.is_bound("x"));
    }

    #[test]
    fn test_shadowing() {
        let mut env = Environment::new();
        env.push("x", 1);
        env.push("x", 2);
        assert_eq!(env.lookup("x"), Some(2));

        env.pop();
        assert_eq!(env.lookup("x"), Some(1));
    }

    #[test]
    fn test_pop_empty() {
        let mut env = Environment::new();
        assert_eq!(env.pop(), None);
        assert!(env.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut env = Environment::new();
        env.push("a", 1);
        env.push("b", 2);
        env.clear();
        assert!(env.is_empty());
        assert_eq!(env.lookup("a"), None);
    }

    #[test]
    fn test_with_binding_restores() {
        let mut env = Environment::new();
        env.push("x", 10);

        let seen = env.with_binding("x", 20, |env| env.lookup("x"));
        assert_eq!(seen, Some(20));
        assert_eq!(env.lookup("x"), Some(10));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_with_binding_restores_after_inner_pushes() {
        let mut env = Environment::new();

        let result: Result<(), &str> = env.with_binding("x", 1, |env| {
            env.push("leaked", 2);
            Err("failed")
        });
        assert!(result.is_err());
        assert!(env.is_empty());
    }
}
