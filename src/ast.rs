use crate::expr::{
    AssignData, BinaryData, CallData, Expr, ExprVisitor, FunctionExprData, GetData, GroupingData,
    LogicalData, SetData, SuperData, ThisData, UnaryData, VariableData,
};
use crate::literal::Literal;
use crate::stmt::{Stmt, StmtVisitor};

/// Returns a string representation of the expression in parentheses.
macro_rules! parenthesize {
    ( $self:ident, $name:expr, $( $x:expr ),+ ) => {
        {
            let mut string = String::new();
            string += "(";
            string += $name;
            $(
                string += " ";
                string += &$x.accept($self);
            )*
            string += ")";

            string
        }
    };
}

/// Renders an expression tree as an S-expression, the output of the `parse`
/// subcommand.
pub struct ASTPrinter;

impl ASTPrinter {
    /// Prints the expression using visitor pattern.
    pub fn print(&mut self, expr: &Expr) -> String {
        expr.accept(self)
    }
}

impl ExprVisitor<String> for ASTPrinter {
    fn visit_literal_expr(&mut self, literal: &Literal) -> String {
        literal.canonical()
    }

    fn visit_logical_expr(&mut self, logical: &LogicalData) -> String {
        parenthesize!(self, &logical.operator.lexeme, &logical.left, &logical.right)
    }

    fn visit_unary_expr(&mut self, unary: &UnaryData) -> String {
        parenthesize!(self, &unary.operator.lexeme, &unary.expr)
    }

    fn visit_binary_expr(&mut self, binary: &BinaryData) -> String {
        parenthesize!(self, &binary.operator.lexeme, &binary.left, &binary.right)
    }

    fn visit_grouping_expr(&mut self, grouping: &GroupingData) -> String {
        parenthesize!(self, "group", grouping.expr)
    }

    fn visit_variable_expr(&mut self, variable: &VariableData) -> String {
        variable.name.lexeme.clone()
    }

    fn visit_assign_expr(&mut self, assign: &AssignData) -> String {
        parenthesize!(self, format!("= {}", &assign.name.lexeme).as_str(), assign.value)
    }

    fn visit_call_expr(&mut self, call: &CallData) -> String {
        let mut string = String::new();
        string += &call.callee.accept(self);
        string += "(";
        for arg in &call.arguments {
            string += &arg.accept(self);
            string += " ";
        }
        string = string.trim_end().to_string();
        string += ")";
        string
    }

    fn visit_get_expr(&mut self, get: &GetData) -> String {
        format!("(. {} {})", get.object.accept(self), get.name.lexeme)
    }

    fn visit_set_expr(&mut self, set: &SetData) -> String {
        format!(
            "(set {} {} {})",
            set.object.accept(self),
            set.name.lexeme,
            set.value.accept(self)
        )
    }

    fn visit_this_expr(&mut self, _this: &ThisData) -> String {
        String::from("this")
    }

    fn visit_super_expr(&mut self, super_expr: &SuperData) -> String {
        format!("(super {})", super_expr.method.lexeme)
    }

    fn visit_function_expr(&mut self, function: &FunctionExprData) -> String {
        let mut string = String::new();
        string += "(fun";
        if let Some(name) = &function.name {
            string += " ";
            string += &name.lexeme;
        }
        string += " (";
        string += &function.params.iter()
            .map(|param| param.lexeme.clone())
            .collect::<Vec<String>>()
            .join(" ");
        string += ")";
        for stmt in &function.body {
            string += " ";
            string += &stmt.accept(self);
        }
        string += ")";

        string
    }
}

impl StmtVisitor<String> for ASTPrinter {
    fn visit_expression_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::Expression(data) = stmt else { unreachable!() };

        parenthesize!(self, "expr", data.expr)
    }

    fn visit_print_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::Print(data) = stmt else { unreachable!() };

        parenthesize!(self, "print", data.expr)
    }

    fn visit_var_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::Var(data) = stmt else { unreachable!() };

        let mut string = String::new();
        string += "(var ";
        string += &data.name.lexeme;
        if let Some(initializer) = &data.initializer {
            string += " = ";
            string += &initializer.accept(self);
        }
        string += ")";

        string
    }

    fn visit_block_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::Block(data) = stmt else { unreachable!() };

        let mut string = String::new();
        string += "{";
        for stmt in &data.statements {
            string += " ";
            string += &stmt.accept(self);
        }
        string += " }";

        string
    }

    fn visit_if_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::If(data) = stmt else { unreachable!() };

        let mut string = String::new();
        string += "(if ";
        string += &data.condition.accept(self);
        string += " ";
        string += &data.then_branch.accept(self);
        if let Some(else_branch) = &data.else_branch {
            string += " else ";
            string += &else_branch.accept(self);
        }
        string += ")";

        string
    }

    fn visit_while_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::While(data) = stmt else { unreachable!() };

        parenthesize!(self, "while", data.condition, data.body)
    }

    fn visit_function_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::Function(data) = stmt else { unreachable!() };

        let mut string = String::new();
        string += "(fun ";
        string += &data.name.lexeme;
        string += "(";
        for param in &data.params {
            string += &param.lexeme;
            string += " ";
        }
        string = string.trim_end().to_string();
        string += ") { ";
        string += &data.body.iter().map(|stmt| stmt.accept(self)).collect::<Vec<String>>().join(" ");
        string += " })";

        string
    }

    fn visit_return_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::Return(data) = stmt else { unreachable!() };

        match &data.value {
            Some(value) => parenthesize!(self, "return", value),
            None => String::from("(return)"),
        }
    }

    fn visit_class_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::Class(data) = stmt else { unreachable!() };

        let mut string = String::new();
        string += "(class ";
        string += &data.name.lexeme;
        if let Some(Expr::Variable(superclass)) = &data.superclass {
            string += " < ";
            string += &superclass.name.lexeme;
        }
        for method in &data.methods {
            string += " ";
            string += &method.accept(self);
        }
        string += ")";

        string
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::Parser;
    use crate::scanner::Scanner;
    use crate::token::{Location, Token, Type};

    fn parse_expr(source: &str) -> Expr {
        Parser::new(Scanner::new(source).scan_tokens())
            .parse_expression()
            .expect("expression to parse")
    }

    #[test]
    fn print_binary_with_grouping() {
        // (1 + 2) * -3
        let expr = Expr::Binary(BinaryData {
            left: Box::new(Expr::Grouping(GroupingData {
                expr: Box::new(Expr::Binary(BinaryData {
                    left: Box::new(Expr::Literal(Literal::Number(1.0))),
                    operator: Token::new(Type::Plus, String::from("+"), None, Location::new(1, 3)),
                    right: Box::new(Expr::Literal(Literal::Number(2.0))),
                })),
            })),
            operator: Token::new(Type::Star, String::from("*"), None, Location::new(1, 8)),
            right: Box::new(Expr::Unary(UnaryData {
                operator: Token::new(Type::Minus, String::from("-"), None, Location::new(1, 10)),
                expr: Box::new(Expr::Literal(Literal::Number(3.0))),
            })),
        });

        assert_eq!(ASTPrinter.print(&expr), "(* (group (+ 1.0 2.0)) (- 3.0))");
    }

    #[test]
    fn print_literals() {
        assert_eq!(ASTPrinter.print(&Expr::Literal(Literal::Nil)), "nil");
        assert_eq!(ASTPrinter.print(&Expr::Literal(Literal::Bool(true))), "true");
        assert_eq!(ASTPrinter.print(&Expr::Literal(Literal::from("hi"))), "hi");
        assert_eq!(ASTPrinter.print(&Expr::Literal(Literal::Number(42.0))), "42.0");
    }

    #[test]
    fn print_get_object_first() {
        let get = Expr::Get(GetData {
            object: Box::new(Expr::Variable(VariableData { name: Token::from("point") })),
            name: Token::from("x"),
        });

        assert_eq!(ASTPrinter.print(&get), "(. point x)");
    }

    #[test]
    fn print_set_object_name_value() {
        let set = Expr::Set(SetData {
            object: Box::new(Expr::Variable(VariableData { name: Token::from("point") })),
            name: Token::from("x"),
            value: Box::new(Expr::Literal(Literal::Number(1.0))),
        });

        assert_eq!(ASTPrinter.print(&set), "(set point x 1.0)");
    }

    #[test]
    fn print_function_expression_with_body() {
        let expr = parse_expr("fun double(n) { return n * 2; }");

        assert_eq!(ASTPrinter.print(&expr), "(fun double (n) (return (* n 2.0)))");
    }

    #[test]
    fn print_anonymous_function_expression() {
        let expr = parse_expr("fun (a, b) { print a + b; }");

        assert_eq!(ASTPrinter.print(&expr), "(fun (a b) (print (+ a b)))");
    }

    #[test]
    fn print_call() {
        let expr = Expr::Call(CallData {
            callee: Box::new(Expr::Variable(VariableData { name: Token::from("f") })),
            paren: Token::new(Type::RightParen, String::from(")"), None, Location::new(1, 4)),
            arguments: vec![
                Expr::Literal(Literal::Number(1.0)),
                Expr::Literal(Literal::Number(2.5)),
            ],
        });

        assert_eq!(ASTPrinter.print(&expr), "f(1.0 2.5)");
    }
}
