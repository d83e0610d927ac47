use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::mem;
use std::rc::Rc;

use crate::class::{Class, Instance};
use crate::environment::Environment;
use crate::error::{Error, RuntimeError, Unwind};
use crate::expr::{
    AssignData, BinaryData, CallData, Expr, ExprVisitor, FunctionExprData, GetData, GroupingData,
    LogicalData, SetData, SuperData, ThisData, UnaryData, VariableData,
};
use crate::function::{Function, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::{Stmt, StmtVisitor};
use crate::token::{Token, Type};

type ExprResult = Result<Object, Unwind>;
type StmtResult = Result<(), Unwind>;

/// Walks the AST and evaluates it against a chain of environments.
///
/// The `locals` side table is filled in by the resolver before `interpret`
/// runs: it maps every local variable use (keyed by its token, whose source
/// location makes it unique) to the number of environments between the use
/// and the declaration. References without an entry are global.
pub struct Interpreter<'a> {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<Token, usize>,
    out: &'a mut dyn Write,
}

impl<'a> Interpreter<'a> {
    /// Creates a new interpreter that writes program output to `out`.
    /// Native functions are registered in the globals here.
    pub fn new(out: &'a mut dyn Write) -> Self {
        let globals = Rc::new(RefCell::new(Environment::default()));

        for native in NativeFunction::get_globals() {
            let name = native.name.lexeme.clone();
            globals.borrow_mut().define(&name, Object::from(native));
        }

        Interpreter {
            globals: Rc::clone(&globals),
            environment: globals,
            locals: HashMap::new(),
            out,
        }
    }

    /// Executes a program. A runtime error stops execution and is reported
    /// with the line it came from.
    pub fn interpret(&mut self, statements: &[Stmt]) {
        for statement in statements {
            match self.execute(statement) {
                Ok(()) => (),
                Err(Unwind::Error(error)) => {
                    error.throw();
                    return;
                },
                Err(Unwind::Return(_)) => unreachable!("return cannot unwind past a function call"),
            }
        }
    }

    /// Evaluates a single expression and prints its value, the back end of
    /// the `evaluate` subcommand.
    pub fn interpret_expression(&mut self, expression: &Expr) {
        match self.evaluate(expression) {
            Ok(value) => {
                writeln!(self.out, "{value}").expect("output stream to be writable");
            },
            Err(Unwind::Error(error)) => error.throw(),
            Err(Unwind::Return(_)) => unreachable!("return cannot unwind past a function call"),
        }
    }

    /// Records the scope distance of a variable use. Called by the resolver.
    pub fn resolve(&mut self, name: &Token, depth: usize) {
        self.locals.insert(name.clone(), depth);
    }

    /// The writer program output goes to.
    pub(crate) fn out(&mut self) -> &mut dyn Write {
        &mut *self.out
    }

    fn execute(&mut self, stmt: &Stmt) -> StmtResult {
        stmt.accept(self)
    }

    fn evaluate(&mut self, expr: &Expr) -> ExprResult {
        expr.accept(self)
    }

    /// Executes statements in the given environment, restoring the previous
    /// environment on every exit path, including an unwinding `return` or
    /// runtime error.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> StmtResult {
        let previous = mem::replace(&mut self.environment, environment);

        let result = statements.iter().try_for_each(|statement| self.execute(statement));

        self.environment = previous;
        result
    }

    /// Reads a variable through the side table: resolved locals at their
    /// recorded distance, everything else from the globals.
    fn look_up_variable(&self, name: &Token) -> Result<Object, RuntimeError> {
        match self.locals.get(name) {
            Some(distance) => self.environment.borrow().get_at(*distance, name),
            None => self.globals.borrow().get(name),
        }
    }

    /// Extracts two number operands or fails with the operator's line.
    fn number_operands(operator: &Token, left: &Object, right: &Object) -> Result<(f64, f64), Unwind> {
        match (left.as_number(), right.as_number()) {
            (Some(left), Some(right)) => Ok((left, right)),
            _ => Err(RuntimeError {
                token: operator.clone(),
                message: "Operands must be numbers.".to_string(),
            }.into()),
        }
    }
}

impl<'a> ExprVisitor<ExprResult> for Interpreter<'a> {
    fn visit_literal_expr(&mut self, literal: &Literal) -> ExprResult {
        Ok(Object::from(literal.clone()))
    }

    fn visit_logical_expr(&mut self, logical: &LogicalData) -> ExprResult {
        let left = self.evaluate(&logical.left)?;

        // Short-circuiting returns the deciding operand itself, not a
        // coerced boolean.
        match logical.operator.r#type {
            Type::Or if left.is_truthy() => Ok(left),
            Type::And if !left.is_truthy() => Ok(left),
            _ => self.evaluate(&logical.right),
        }
    }

    fn visit_unary_expr(&mut self, unary: &UnaryData) -> ExprResult {
        let right = self.evaluate(&unary.expr)?;

        match unary.operator.r#type {
            Type::Minus => (-right).ok_or_else(|| RuntimeError {
                token: unary.operator.clone(),
                message: "Operand must be a number.".to_string(),
            }.into()),
            Type::Bang => Ok(Object::from(!right.is_truthy())),
            _ => unreachable!(),
        }
    }

    fn visit_binary_expr(&mut self, binary: &BinaryData) -> ExprResult {
        let left = self.evaluate(&binary.left)?;
        let right = self.evaluate(&binary.right)?;

        match binary.operator.r#type {
            Type::Greater => {
                let (left, right) = Self::number_operands(&binary.operator, &left, &right)?;
                Ok(Object::from(left > right))
            },
            Type::GreaterEqual => {
                let (left, right) = Self::number_operands(&binary.operator, &left, &right)?;
                Ok(Object::from(left >= right))
            },
            Type::Less => {
                let (left, right) = Self::number_operands(&binary.operator, &left, &right)?;
                Ok(Object::from(left < right))
            },
            Type::LessEqual => {
                let (left, right) = Self::number_operands(&binary.operator, &left, &right)?;
                Ok(Object::from(left <= right))
            },
            Type::EqualEqual => Ok(Object::from(left == right)),
            Type::BangEqual => Ok(Object::from(left != right)),
            Type::Minus => (left - right).ok_or_else(|| RuntimeError {
                token: binary.operator.clone(),
                message: "Operands must be numbers.".to_string(),
            }.into()),
            Type::Slash => (left / right).ok_or_else(|| RuntimeError {
                token: binary.operator.clone(),
                message: "Operands must be numbers.".to_string(),
            }.into()),
            Type::Star => (left * right).ok_or_else(|| RuntimeError {
                token: binary.operator.clone(),
                message: "Operands must be numbers.".to_string(),
            }.into()),
            Type::Plus => (left + right).ok_or_else(|| RuntimeError {
                token: binary.operator.clone(),
                message: "Operands must be two numbers or two strings.".to_string(),
            }.into()),
            _ => unreachable!(),
        }
    }

    fn visit_grouping_expr(&mut self, grouping: &GroupingData) -> ExprResult {
        self.evaluate(&grouping.expr)
    }

    fn visit_variable_expr(&mut self, variable: &VariableData) -> ExprResult {
        self.look_up_variable(&variable.name).map_err(Unwind::from)
    }

    fn visit_assign_expr(&mut self, assign: &AssignData) -> ExprResult {
        let value = self.evaluate(&assign.value)?;

        match self.locals.get(&assign.name) {
            Some(distance) => {
                self.environment.borrow_mut().assign_at(*distance, &assign.name, value.clone());
            },
            None => {
                self.globals.borrow_mut().assign(&assign.name, value.clone())?;
            },
        }

        // Assignment is an expression; it evaluates to the assigned value.
        Ok(value)
    }

    fn visit_call_expr(&mut self, call: &CallData) -> ExprResult {
        let callee = self.evaluate(&call.callee)?;

        let mut arguments = Vec::with_capacity(call.arguments.len());
        for argument in &call.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        let callable: &dyn Callable = match &callee {
            Object::Function(function) => function,
            Object::NativeFunction(native) => native,
            Object::Class(class) => class,
            _ => return Err(RuntimeError {
                token: call.paren.clone(),
                message: "Can only call functions and classes.".to_string(),
            }.into()),
        };

        if arguments.len() != callable.arity() {
            return Err(RuntimeError {
                token: call.paren.clone(),
                message: format!("Expected {} arguments but got {}.", callable.arity(), arguments.len()),
            }.into());
        }

        callable.call(self, arguments).map_err(Unwind::from)
    }

    fn visit_get_expr(&mut self, get: &GetData) -> ExprResult {
        let object = self.evaluate(&get.object)?;

        if let Object::Instance(instance) = &object {
            return instance.borrow().get(&get.name, &object).map_err(Unwind::from);
        }

        Err(RuntimeError {
            token: get.name.clone(),
            message: "Only instances have properties.".to_string(),
        }.into())
    }

    fn visit_set_expr(&mut self, set: &SetData) -> ExprResult {
        let object = self.evaluate(&set.object)?;

        let Object::Instance(instance) = object else {
            return Err(RuntimeError {
                token: set.name.clone(),
                message: "Only instances have fields.".to_string(),
            }.into());
        };

        let value = self.evaluate(&set.value)?;
        instance.borrow_mut().set(&set.name, value.clone());

        Ok(value)
    }

    fn visit_this_expr(&mut self, this: &ThisData) -> ExprResult {
        self.look_up_variable(&this.keyword).map_err(Unwind::from)
    }

    fn visit_super_expr(&mut self, super_expr: &SuperData) -> ExprResult {
        let distance = *self.locals.get(&super_expr.keyword)
            .expect("'super' to have a resolved distance");

        // `super` lives one environment outside `this`; the class statement
        // built the chain that way.
        let (superclass, this) = {
            let environment = self.environment.borrow();
            let superclass = environment.get_at(distance, &super_expr.keyword)?;
            let this = environment.get_at(distance - 1, &Token::from("this"))?;
            (superclass, this)
        };

        let Object::Class(superclass) = superclass else {
            unreachable!("'super' resolves to a class");
        };

        let method = superclass.borrow().find_method(&super_expr.method.lexeme)
            .ok_or_else(|| RuntimeError {
                token: super_expr.method.clone(),
                message: format!("Undefined property '{}'.", super_expr.method.lexeme),
            })?;

        Ok(Object::from(method.bind(&this)))
    }

    fn visit_function_expr(&mut self, function: &FunctionExprData) -> ExprResult {
        // The wrapper environment holds the function's own name so a named
        // function expression can recurse; it mirrors the extra scope the
        // resolver pushed.
        let closure = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.environment)))));
        let value = Function::from_expr(function, Rc::clone(&closure));

        if let Some(name) = &function.name {
            closure.borrow_mut().define(&name.lexeme, Object::from(value.clone()));
        }

        Ok(Object::from(value))
    }
}

impl<'a> StmtVisitor<StmtResult> for Interpreter<'a> {
    fn visit_expression_stmt(&mut self, stmt: &Stmt) -> StmtResult {
        let Stmt::Expression(data) = stmt else { unreachable!() };

        self.evaluate(&data.expr)?;
        Ok(())
    }

    fn visit_print_stmt(&mut self, stmt: &Stmt) -> StmtResult {
        let Stmt::Print(data) = stmt else { unreachable!() };

        let value = self.evaluate(&data.expr)?;
        writeln!(self.out, "{value}").expect("output stream to be writable");

        Ok(())
    }

    fn visit_var_stmt(&mut self, stmt: &Stmt) -> StmtResult {
        let Stmt::Var(data) = stmt else { unreachable!() };

        // A declaration without an initializer defaults to nil.
        let value = match &data.initializer {
            Some(initializer) => self.evaluate(initializer)?,
            None => Object::from(Literal::Nil),
        };

        self.environment.borrow_mut().define(&data.name.lexeme, value);
        Ok(())
    }

    fn visit_block_stmt(&mut self, stmt: &Stmt) -> StmtResult {
        let Stmt::Block(data) = stmt else { unreachable!() };

        let environment = Environment::new(Some(Rc::clone(&self.environment)));
        self.execute_block(&data.statements, Rc::new(RefCell::new(environment)))
    }

    fn visit_if_stmt(&mut self, stmt: &Stmt) -> StmtResult {
        let Stmt::If(data) = stmt else { unreachable!() };

        if self.evaluate(&data.condition)?.is_truthy() {
            self.execute(&data.then_branch)?;
        } else if let Some(else_branch) = &data.else_branch {
            self.execute(else_branch)?;
        }

        Ok(())
    }

    fn visit_while_stmt(&mut self, stmt: &Stmt) -> StmtResult {
        let Stmt::While(data) = stmt else { unreachable!() };

        while self.evaluate(&data.condition)?.is_truthy() {
            self.execute(&data.body)?;
        }

        Ok(())
    }

    fn visit_function_stmt(&mut self, stmt: &Stmt) -> StmtResult {
        let Stmt::Function(data) = stmt else { unreachable!() };

        let function = Function::new(data, Rc::clone(&self.environment), false);
        self.environment.borrow_mut().define(&data.name.lexeme, Object::from(function));

        Ok(())
    }

    fn visit_return_stmt(&mut self, stmt: &Stmt) -> StmtResult {
        let Stmt::Return(data) = stmt else { unreachable!() };

        let value = match &data.value {
            Some(value) => self.evaluate(value)?,
            None => Object::from(Literal::Nil),
        };

        // Unwinds to the nearest function call boundary; every block on the
        // way restores its environment as the error propagates.
        Err(Unwind::Return(value))
    }

    fn visit_class_stmt(&mut self, stmt: &Stmt) -> StmtResult {
        let Stmt::Class(data) = stmt else { unreachable!() };

        let superclass = match &data.superclass {
            Some(expr) => {
                let Expr::Variable(variable) = expr else { unreachable!() };

                match self.evaluate(expr)? {
                    Object::Class(class) => Some(class),
                    _ => return Err(RuntimeError {
                        token: variable.name.clone(),
                        message: "Superclass must be a class.".to_string(),
                    }.into()),
                }
            },
            None => None,
        };

        // The name is declared before the methods are installed so they can
        // refer to the class itself.
        self.environment.borrow_mut().define(&data.name.lexeme, Object::from(Literal::Nil));

        // Methods of a subclass close over an extra environment that binds
        // `super`, shared by all of them.
        let enclosing = match &superclass {
            Some(class) => {
                let previous = Rc::clone(&self.environment);
                let mut environment = Environment::new(Some(Rc::clone(&previous)));
                environment.define("super", Object::from(Rc::clone(class)));
                self.environment = Rc::new(RefCell::new(environment));
                Some(previous)
            },
            None => None,
        };

        let mut methods = HashMap::new();
        for method in &data.methods {
            let Stmt::Function(function) = method else { unreachable!() };

            let is_initializer = function.name.lexeme == "init";
            methods.insert(
                function.name.lexeme.clone(),
                Function::new(function, Rc::clone(&self.environment), is_initializer),
            );
        }

        let class = Rc::new(RefCell::new(Class::new(data.name.lexeme.clone(), superclass, methods)));

        if let Some(previous) = enclosing {
            self.environment = previous;
        }

        self.environment.borrow_mut().assign(&data.name, Object::from(class))?;
        Ok(())
    }
}
