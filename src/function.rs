use std::cell::RefCell;
use std::fmt::{Debug, Display};
use std::rc::Rc;

use crate::environment::Environment;
use crate::error::{RuntimeError, Unwind};
use crate::expr::FunctionExprData;
use crate::interpreter::Interpreter;
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::{FunctionData, Stmt};
use crate::token::Token;

/// A function value: the declaration's parameters and body plus the
/// environment that was active when the function was created. Methods carry
/// `is_initializer` so that `init` can always hand back `this`.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: Option<Token>,
    pub params: Vec<Token>,
    pub body: Vec<Stmt>,
    pub closure: Rc<RefCell<Environment>>,
    pub is_initializer: bool,
}

impl Function {
    /// Creates a function value from a function or method declaration.
    pub fn new(declaration: &FunctionData, closure: Rc<RefCell<Environment>>, is_initializer: bool) -> Self {
        Function {
            name: Some(declaration.name.clone()),
            params: declaration.params.clone(),
            body: declaration.body.clone(),
            closure,
            is_initializer,
        }
    }

    /// Creates a function value from a function expression.
    pub fn from_expr(declaration: &FunctionExprData, closure: Rc<RefCell<Environment>>) -> Self {
        Function {
            name: declaration.name.clone(),
            params: declaration.params.clone(),
            body: declaration.body.clone(),
            closure,
            is_initializer: false,
        }
    }

    /// Binds the function to an instance by wrapping its closure in a new
    /// environment that defines `this`. The bound copy shares everything
    /// else with the original.
    pub fn bind(&self, instance: &Object) -> Function {
        let mut environment = Environment::new(Some(Rc::clone(&self.closure)));
        environment.define("this", instance.clone());

        Function {
            closure: Rc::new(RefCell::new(environment)),
            ..self.clone()
        }
    }
}

impl Callable for Function {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        // Each call gets a fresh environment under the closure, otherwise
        // recursive calls would share their locals.
        let mut environment = Environment::new(Some(Rc::clone(&self.closure)));

        self.params.iter().zip(arguments).for_each(|(param, argument)| {
            environment.define(&param.lexeme, argument);
        });

        match interpreter.execute_block(&self.body, Rc::new(RefCell::new(environment))) {
            Ok(()) => (),
            Err(Unwind::Return(value)) => {
                if !self.is_initializer {
                    return Ok(value);
                }
            },
            Err(Unwind::Error(error)) => return Err(error),
        }

        // An initializer always evaluates to `this`, whether it returned
        // early or fell off the end.
        if self.is_initializer {
            return self.closure.borrow().get_at(0, &Token::from("this"));
        }

        Ok(Object::from(Literal::Nil))
    }

    fn arity(&self) -> usize {
        self.params.len()
    }
}

/// Functions compare by identity: same declaration name and same captured
/// environment. Binding a method produces a distinct function value.
impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Rc::ptr_eq(&self.closure, &other.closure)
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "<fn {}>", name.lexeme),
            None => write!(f, "<fn>"),
        }
    }
}

/// A function implemented by the interpreter itself rather than in the
/// language.
#[derive(Clone)]
pub struct NativeFunction {
    pub name: Token,
    pub arity: usize,
    pub function: fn(&mut Interpreter, Vec<Object>) -> Result<Object, RuntimeError>,
}

impl Callable for NativeFunction {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        (self.function)(interpreter, arguments)
    }

    fn arity(&self) -> usize {
        self.arity
    }
}

impl NativeFunction {
    /// Returns the native functions registered in the global environment
    /// when an interpreter is constructed.
    pub fn get_globals() -> Vec<NativeFunction> {
        vec![
            NativeFunction {
                name: Token::from("clock"),
                arity: 0,
                function: |_, _| {
                    let now = std::time::SystemTime::now()
                        .duration_since(std::time::UNIX_EPOCH)
                        .expect("system clock to be past the epoch")
                        .as_secs();
                    Ok(Object::from(now as f64))
                },
            },
        ]
    }
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name.lexeme == other.name.lexeme && self.function == other.function
    }
}

impl Display for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fn {}>", self.name.lexeme)
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fn {}>", self.name.lexeme)
    }
}
