use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::object::Object;
use crate::token::Token;

/// A single lexical scope: a mapping from names to values plus a link to the
/// enclosing scope. Scopes are shared (`Rc<RefCell<_>>`) because closures
/// keep their defining scope alive and observe later assignments through it.
/// The chain is acyclic by construction, children only point outwards.
#[derive(Debug, Clone)]
pub struct Environment {
    pub enclosing: Option<Rc<RefCell<Environment>>>,
    pub variables: HashMap<String, Object>,
}

impl Environment {
    pub fn new(enclosing: Option<Rc<RefCell<Environment>>>) -> Self {
        Environment {
            enclosing,
            variables: HashMap::new(),
        }
    }

    /// Defines a variable in this scope. Redefinition is allowed and simply
    /// overwrites, which is how globals can be redeclared freely.
    pub fn define(&mut self, name: &str, value: Object) {
        self.variables.insert(name.to_string(), value);
    }

    /// Walks exactly `distance` enclosing links and returns that scope.
    /// Only called with `distance >= 1`; the resolver guarantees the chain
    /// is deep enough.
    fn ancestor(&self, distance: usize) -> Rc<RefCell<Environment>> {
        let mut environment = self.enclosing.clone()
            .unwrap_or_else(|| panic!("enclosing environment to exist at depth {}", 1));

        for depth in 2..=distance {
            let parent = environment.borrow().enclosing.clone()
                .unwrap_or_else(|| panic!("enclosing environment to exist at depth {depth}"));
            environment = parent;
        }

        environment
    }

    /// Assigns to an existing variable, searching outwards from this scope.
    /// Used for names the resolver left to the globals.
    pub fn assign(&mut self, name: &Token, value: Object) -> Result<(), RuntimeError> {
        if self.variables.contains_key(&name.lexeme) {
            self.variables.insert(name.lexeme.clone(), value);
            return Ok(());
        }

        if let Some(enclosing) = &mut self.enclosing {
            return enclosing.borrow_mut().assign(name, value);
        }

        Err(RuntimeError {
            token: name.clone(),
            message: format!("Undefined variable '{}'.", name.lexeme),
        })
    }

    /// Assigns to the variable in the scope exactly `distance` links away.
    /// The resolver already proved the name lives there.
    pub fn assign_at(&mut self, distance: usize, name: &Token, value: Object) {
        if distance > 0 {
            self.ancestor(distance).borrow_mut().variables.insert(name.lexeme.clone(), value);
        } else {
            self.variables.insert(name.lexeme.clone(), value);
        }
    }

    /// Looks a variable up, searching outwards from this scope.
    /// Used for names the resolver left to the globals.
    pub fn get(&self, name: &Token) -> Result<Object, RuntimeError> {
        if let Some(variable) = self.variables.get(&name.lexeme) {
            return Ok(variable.clone());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow().get(name);
        }

        Err(RuntimeError {
            token: name.clone(),
            message: format!("Undefined variable '{}'.", name.lexeme),
        })
    }

    /// Reads the variable from the scope exactly `distance` links away.
    pub fn get_at(&self, distance: usize, name: &Token) -> Result<Object, RuntimeError> {
        let variable = if distance > 0 {
            self.ancestor(distance).borrow().variables.get(&name.lexeme).cloned()
        } else {
            self.variables.get(&name.lexeme).cloned()
        };

        variable.ok_or_else(|| RuntimeError {
            token: name.clone(),
            message: format!("Undefined variable '{}'.", name.lexeme),
        })
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::literal::Literal;

    #[test]
    fn define_and_get() {
        let mut environment = Environment::default();
        environment.define("a", Object::from(1.0));

        assert_eq!(environment.get(&Token::from("a")).unwrap(), Object::from(1.0));
    }

    #[test]
    fn get_from_enclosing() {
        let mut globals = Environment::default();
        globals.define("a", Object::from("outer"));

        let inner = Environment::new(Some(Rc::new(RefCell::new(globals))));

        assert_eq!(inner.get(&Token::from("a")).unwrap(), Object::from("outer"));
    }

    #[test]
    fn get_undefined() {
        let environment = Environment::default();

        assert!(environment.get(&Token::from("missing")).is_err());
    }

    #[test]
    fn assign_walks_outwards() {
        let globals = Rc::new(RefCell::new(Environment::default()));
        globals.borrow_mut().define("a", Object::from(1.0));

        let mut inner = Environment::new(Some(Rc::clone(&globals)));
        inner.assign(&Token::from("a"), Object::from(2.0)).unwrap();

        assert_eq!(globals.borrow().get(&Token::from("a")).unwrap(), Object::from(2.0));
    }

    #[test]
    fn get_at_distance() {
        let outer = Rc::new(RefCell::new(Environment::default()));
        outer.borrow_mut().define("a", Object::from("outer"));

        let middle = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&outer)))));
        let mut inner = Environment::new(Some(Rc::clone(&middle)));
        inner.define("a", Object::from("inner"));

        assert_eq!(inner.get_at(0, &Token::from("a")).unwrap(), Object::from("inner"));
        assert_eq!(inner.get_at(2, &Token::from("a")).unwrap(), Object::from("outer"));
    }

    #[test]
    fn shadowing_does_not_touch_enclosing() {
        let globals = Rc::new(RefCell::new(Environment::default()));
        globals.borrow_mut().define("a", Object::from(Literal::Nil));

        let mut inner = Environment::new(Some(Rc::clone(&globals)));
        inner.define("a", Object::from(true));

        assert_eq!(globals.borrow().get(&Token::from("a")).unwrap(), Object::from(Literal::Nil));
    }
}
