use std::collections::HashMap;
use std::mem;

use crate::error::{Error, ResolveError};
use crate::expr::{
    AssignData, BinaryData, CallData, Expr, ExprVisitor, FunctionExprData, GetData, GroupingData,
    LogicalData, SetData, SuperData, ThisData, UnaryData, VariableData,
};
use crate::interpreter::Interpreter;
use crate::literal::Literal;
use crate::stmt::{Stmt, StmtVisitor};
use crate::token::Token;

/// What kind of function body the resolver is currently inside, used to
/// reject `return` statements that make no sense where they appear.
enum FunctionType {
    None,
    Function,
    Initializer,
    Method,
}

/// What kind of class body the resolver is currently inside, used to reject
/// `this` and `super` outside their classes.
enum ClassType {
    None,
    Class,
    Subclass,
}

/// A static pass over the AST that computes, for every local variable use,
/// how many scopes out its declaration lives. The distances go straight into
/// the interpreter's side table; names that match no scope are left for the
/// global environment at runtime. The same walk also checks the handful of
/// rules that are only decidable with scope information.
///
/// Each scope maps a name to whether its initializer has finished; a name
/// that is declared but not yet defined may not be read, which catches
/// `var a = a;`.
pub struct Resolver<'a, 'w> {
    interpreter: &'a mut Interpreter<'w>,
    scopes: Vec<HashMap<String, bool>>,
    current_function: FunctionType,
    current_class: ClassType,
}

impl<'a, 'w> Resolver<'a, 'w> {
    pub fn new(interpreter: &'a mut Interpreter<'w>) -> Self {
        Resolver {
            interpreter,
            scopes: vec![],
            current_function: FunctionType::None,
            current_class: ClassType::None,
        }
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        expr.accept(self);
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        stmt.accept(self);
    }

    pub fn resolve(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.resolve_stmt(statement)
        }
    }

    /// Resolves a function or method body: one new scope holding the
    /// parameters, with the body statements resolved directly inside it.
    fn resolve_function(&mut self, function: &Stmt, r#type: FunctionType) {
        let Stmt::Function(function) = function else { unreachable!() };

        let enclosing_function = mem::replace(&mut self.current_function, r#type);

        self.begin_scope();
        for param in &function.params {
            self.declare(param);
            self.define(param);
        }
        self.resolve(&function.body);
        self.end_scope();

        self.current_function = enclosing_function;
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    /// Adds the name to the innermost scope, not yet readable.
    /// Globals are exempt from the redeclaration check.
    fn declare(&mut self, name: &Token) {
        if self.scopes.is_empty() {
            return;
        }

        let scope = self.scopes.last_mut().expect("stack to be not empty");
        if scope.contains_key(&name.lexeme) {
            ResolveError {
                token: name.clone(),
                message: "Already a variable with this name in this scope.".to_string(),
            }.throw();
        }
        scope.insert(name.lexeme.to_owned(), false);
    }

    /// Marks the name as fully initialized and readable.
    fn define(&mut self, name: &Token) {
        if self.scopes.is_empty() {
            return;
        }

        self.scopes
            .last_mut()
            .expect("stack to be not empty")
            .insert(name.lexeme.to_owned(), true);
    }

    /// Walks the scopes from innermost outward; on a hit, records how many
    /// scopes out the name was found. On a miss the reference is left for
    /// the globals.
    fn resolve_local(&mut self, name: &Token) {
        for (i, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name.lexeme) {
                self.interpreter.resolve(name, i);
                return;
            }
        }
    }
}

impl<'a, 'w> ExprVisitor<()> for Resolver<'a, 'w> {
    fn visit_literal_expr(&mut self, _literal: &Literal) {}

    fn visit_logical_expr(&mut self, logical: &LogicalData) {
        self.resolve_expr(&logical.left);
        self.resolve_expr(&logical.right);
    }

    fn visit_unary_expr(&mut self, unary: &UnaryData) {
        self.resolve_expr(&unary.expr);
    }

    fn visit_binary_expr(&mut self, binary: &BinaryData) {
        self.resolve_expr(&binary.left);
        self.resolve_expr(&binary.right);
    }

    fn visit_grouping_expr(&mut self, grouping: &GroupingData) {
        self.resolve_expr(&grouping.expr);
    }

    fn visit_variable_expr(&mut self, variable: &VariableData) {
        if let Some(scope) = self.scopes.last() {
            if let Some(defined) = scope.get(&variable.name.lexeme) {
                if !defined {
                    ResolveError {
                        token: variable.name.to_owned(),
                        message: "Can't read local variable in its own initializer.".to_string(),
                    }.throw();
                }
            }
        }

        self.resolve_local(&variable.name);
    }

    fn visit_assign_expr(&mut self, assign: &AssignData) {
        self.resolve_expr(&assign.value);
        self.resolve_local(&assign.name);
    }

    fn visit_call_expr(&mut self, call: &CallData) {
        self.resolve_expr(&call.callee);

        for argument in &call.arguments {
            self.resolve_expr(argument);
        }
    }

    fn visit_get_expr(&mut self, get: &GetData) {
        // Properties are looked up dynamically, only the object resolves.
        self.resolve_expr(&get.object);
    }

    fn visit_set_expr(&mut self, set: &SetData) {
        self.resolve_expr(&set.value);
        self.resolve_expr(&set.object);
    }

    fn visit_this_expr(&mut self, this: &ThisData) {
        if let ClassType::None = self.current_class {
            ResolveError {
                token: this.keyword.clone(),
                message: "Can't use 'this' outside of a class.".to_string(),
            }.throw();

            return;
        }

        self.resolve_local(&this.keyword);
    }

    fn visit_super_expr(&mut self, super_expr: &SuperData) {
        match self.current_class {
            ClassType::Subclass => (),
            ClassType::None => ResolveError {
                token: super_expr.keyword.clone(),
                message: "Can't use 'super' outside of a class.".to_string(),
            }.throw(),
            ClassType::Class => ResolveError {
                token: super_expr.keyword.clone(),
                message: "Can't use 'super' in a class with no superclass.".to_string(),
            }.throw(),
        }

        self.resolve_local(&super_expr.keyword);
    }

    fn visit_function_expr(&mut self, function: &FunctionExprData) {
        let enclosing_function = mem::replace(&mut self.current_function, FunctionType::Function);

        // An outer scope holds the function's own name (if any) so a named
        // function expression can recurse; the interpreter mirrors it with
        // a wrapper environment around the closure.
        self.begin_scope();
        if let Some(name) = &function.name {
            self.declare(name);
            self.define(name);
        }

        self.begin_scope();
        for param in &function.params {
            self.declare(param);
            self.define(param);
        }
        self.resolve(&function.body);
        self.end_scope();

        self.end_scope();

        self.current_function = enclosing_function;
    }
}

impl<'a, 'w> StmtVisitor<()> for Resolver<'a, 'w> {
    fn visit_block_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Block(block) = stmt else { unreachable!() };

        self.begin_scope();
        self.resolve(&block.statements);
        self.end_scope();
    }

    fn visit_var_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Var(var) = stmt else { unreachable!() };

        self.declare(&var.name);
        if let Some(initializer) = &var.initializer {
            self.resolve_expr(initializer);
        }
        self.define(&var.name);
    }

    fn visit_function_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Function(function) = stmt else { unreachable!() };

        // Defined before its body resolves so the function can recurse.
        self.declare(&function.name);
        self.define(&function.name);

        self.resolve_function(stmt, FunctionType::Function);
    }

    fn visit_expression_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Expression(expr) = stmt else { unreachable!() };

        self.resolve_expr(&expr.expr);
    }

    fn visit_if_stmt(&mut self, stmt: &Stmt) {
        let Stmt::If(if_stmt) = stmt else { unreachable!() };

        self.resolve_expr(&if_stmt.condition);
        self.resolve_stmt(&if_stmt.then_branch);
        if let Some(else_branch) = &if_stmt.else_branch {
            self.resolve_stmt(else_branch);
        }
    }

    fn visit_print_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Print(print) = stmt else { unreachable!() };

        self.resolve_expr(&print.expr);
    }

    fn visit_return_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Return(return_stmt) = stmt else { unreachable!() };

        if let FunctionType::None = self.current_function {
            ResolveError {
                token: return_stmt.keyword.clone(),
                message: "Can't return from top-level code.".to_string(),
            }.throw();
        }

        if let Some(value) = &return_stmt.value {
            if let FunctionType::Initializer = self.current_function {
                ResolveError {
                    token: return_stmt.keyword.clone(),
                    message: "Can't return a value from an initializer.".to_string(),
                }.throw();
                return;
            }

            self.resolve_expr(value);
        }
    }

    fn visit_while_stmt(&mut self, stmt: &Stmt) {
        let Stmt::While(while_stmt) = stmt else { unreachable!() };

        self.resolve_expr(&while_stmt.condition);
        self.resolve_stmt(&while_stmt.body);
    }

    fn visit_class_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Class(class_stmt) = stmt else { unreachable!() };

        let enclosing_class = mem::replace(&mut self.current_class, ClassType::Class);

        self.declare(&class_stmt.name);
        self.define(&class_stmt.name);

        if let Some(superclass) = &class_stmt.superclass {
            let Expr::Variable(variable) = superclass else { unreachable!() };

            if class_stmt.name.lexeme == variable.name.lexeme {
                ResolveError {
                    token: variable.name.clone(),
                    message: "A class can't inherit from itself.".to_string(),
                }.throw();
            }

            self.current_class = ClassType::Subclass;

            self.resolve_expr(superclass);

            // The scope holding `super` sits outside the one holding
            // `this`, mirroring the environment chain the interpreter
            // builds for methods of a subclass.
            self.begin_scope();
            self.scopes
                .last_mut()
                .expect("stack to be not empty")
                .insert("super".to_string(), true);
        }

        self.begin_scope();
        self.scopes
            .last_mut()
            .expect("stack to be not empty")
            .insert("this".to_string(), true);

        for method in &class_stmt.methods {
            let Stmt::Function(function) = method else { unreachable!() };

            let declaration = if function.name.lexeme.eq("init") {
                FunctionType::Initializer
            } else {
                FunctionType::Method
            };
            self.resolve_function(method, declaration);
        }

        self.end_scope();

        if class_stmt.superclass.is_some() {
            self.end_scope();
        }

        self.current_class = enclosing_class;
    }
}
