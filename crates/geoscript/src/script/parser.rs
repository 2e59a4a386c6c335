//! Statement parser.
//!
//! Grammar (informal):
//! ```text
//! program   := { statement (SEP | END) }
//! statement := [ ["let" | "const" | "var"] IDENT "=" ] IDENT "(" [ arg { "," arg } [","] ] ")"
//! arg       := IDENT "=" value | value
//! value     := STRING | "true" | "false" | IDENT | "[" values "]" | "<" expr "," expr ">" | expr
//! expr      := precedence climbing over + - * /, unary minus, parentheses,
//!              numbers and calls of sqrt sin cos tan abs pi
//! ```
//! Numeric expressions are folded to a single `f64` while parsing; scripts
//! have no numeric variables.

use super::error::{ScriptError, ScriptErrorKind};
use super::lexer::{tokenize, Spanned, Token};

/// A parsed argument.
#[derive(Clone, Debug, PartialEq)]
pub enum Arg {
    Num(f64),
    /// Quoted string.
    Str(String),
    /// Bare identifier: a binding or an entity name.
    Ident(String),
    /// `[x, y]`
    Pair(f64, f64),
    /// `<dx, dy>`
    Vector(f64, f64),
    Bool(bool),
    /// `[a, b, c]` with anything other than exactly two numbers.
    List(Vec<Arg>),
}

impl Arg {
    pub fn describe(&self) -> &'static str {
        match self {
            Arg::Num(_) => "a number",
            Arg::Str(_) => "a string",
            Arg::Ident(_) => "a name",
            Arg::Pair(..) => "a coordinate",
            Arg::Vector(..) => "a vector",
            Arg::Bool(_) => "a boolean",
            Arg::List(_) => "a list",
        }
    }
}

/// One `op(args)` statement.
#[derive(Clone, Debug, PartialEq)]
pub struct Command {
    pub line: usize,
    /// Variable bound to the result (`let g = Line(A, B)`).
    pub binding: Option<String>,
    pub op: String,
    pub args: Vec<Arg>,
    pub kwargs: Vec<(String, Arg)>,
}

pub fn parse(src: &str) -> Result<Vec<Command>, ScriptError> {
    let tokens = tokenize(src)?;
    Parser { tokens, pos: 0 }.program()
}

const BINDING_KEYWORDS: [&str; 3] = ["let", "const", "var"];

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).map(|s| &s.tok).unwrap_or(&Token::End)
    }

    fn peek_at(&self, offset: usize) -> &Token {
        self.tokens
            .get(self.pos + offset)
            .map(|s| &s.tok)
            .unwrap_or(&Token::End)
    }

    fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|s| s.line)
            .unwrap_or(1)
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn error<T>(&self, msg: String) -> Result<T, ScriptError> {
        Err(ScriptError::new(self.line(), ScriptErrorKind::Syntax { msg }))
    }

    fn expect(&mut self, want: Token) -> Result<(), ScriptError> {
        if *self.peek() == want {
            self.advance();
            Ok(())
        } else {
            self.error(format!("expected {}, found {}", want.describe(), self.peek().describe()))
        }
    }

    fn ident(&mut self) -> Result<String, ScriptError> {
        match self.peek().clone() {
            Token::Ident(s) => {
                self.advance();
                Ok(s)
            }
            other => self.error(format!("expected identifier, found {}", other.describe())),
        }
    }

    fn program(mut self) -> Result<Vec<Command>, ScriptError> {
        let mut out = Vec::new();
        loop {
            while *self.peek() == Token::Sep {
                self.advance();
            }
            if *self.peek() == Token::End {
                return Ok(out);
            }
            out.push(self.statement()?);
            match self.peek() {
                Token::Sep | Token::End => {}
                other => {
                    return self.error(format!("expected end of statement, found {}", other.describe()))
                }
            }
        }
    }

    fn statement(&mut self) -> Result<Command, ScriptError> {
        let line = self.line();
        let keyword = matches!(self.peek(), Token::Ident(kw) if BINDING_KEYWORDS.contains(&kw.as_str()))
            && matches!(self.peek_at(1), Token::Ident(_))
            && *self.peek_at(2) == Token::Assign;
        if keyword {
            self.advance();
        }
        let binding = if matches!(self.peek(), Token::Ident(_)) && *self.peek_at(1) == Token::Assign {
            let var = self.ident()?;
            self.advance();
            Some(var)
        } else {
            None
        };
        let op = self.ident()?;
        self.expect(Token::LParen)?;
        let mut args = Vec::new();
        let mut kwargs = Vec::new();
        while *self.peek() != Token::RParen {
            if let (Token::Ident(key), Token::Assign) = (self.peek().clone(), self.peek_at(1).clone()) {
                self.advance();
                self.advance();
                kwargs.push((key, self.value()?));
            } else {
                if !kwargs.is_empty() {
                    return self.error("positional argument after keyword argument".to_string());
                }
                args.push(self.value()?);
            }
            if *self.peek() == Token::Comma {
                self.advance();
            } else if *self.peek() != Token::RParen {
                return self.error(format!("expected `,` or `)`, found {}", self.peek().describe()));
            }
        }
        self.expect(Token::RParen)?;
        Ok(Command {
            line,
            binding,
            op,
            args,
            kwargs,
        })
    }

    fn value(&mut self) -> Result<Arg, ScriptError> {
        match self.peek().clone() {
            Token::Str(s) => {
                self.advance();
                Ok(Arg::Str(s))
            }
            Token::Ident(s) if *self.peek_at(1) != Token::LParen => {
                self.advance();
                Ok(match s.as_str() {
                    "true" => Arg::Bool(true),
                    "false" => Arg::Bool(false),
                    _ => Arg::Ident(s),
                })
            }
            Token::LBracket => {
                self.advance();
                let mut items = Vec::new();
                while *self.peek() != Token::RBracket {
                    items.push(self.value()?);
                    if *self.peek() == Token::Comma {
                        self.advance();
                    } else if *self.peek() != Token::RBracket {
                        return self.error(format!("expected `,` or `]`, found {}", self.peek().describe()));
                    }
                }
                self.advance();
                Ok(match items.as_slice() {
                    [Arg::Num(x), Arg::Num(y)] => Arg::Pair(*x, *y),
                    _ => Arg::List(items),
                })
            }
            Token::LAngle => {
                self.advance();
                let dx = self.expr(0)?;
                self.expect(Token::Comma)?;
                let dy = self.expr(0)?;
                self.expect(Token::RAngle)?;
                Ok(Arg::Vector(dx, dy))
            }
            _ => Ok(Arg::Num(self.expr(0)?)),
        }
    }

    fn binary_op(&self) -> Option<(u8, Token)> {
        match self.peek() {
            Token::Plus | Token::Minus => Some((1, self.peek().clone())),
            Token::Star | Token::Slash => Some((2, self.peek().clone())),
            _ => None,
        }
    }

    fn expr(&mut self, min_prec: u8) -> Result<f64, ScriptError> {
        let mut left = self.atom()?;
        while let Some((prec, op)) = self.binary_op() {
            if prec < min_prec {
                break;
            }
            self.advance();
            let right = self.expr(prec + 1)?;
            left = match op {
                Token::Plus => left + right,
                Token::Minus => left - right,
                Token::Star => left * right,
                _ => left / right,
            };
        }
        Ok(left)
    }

    fn atom(&mut self) -> Result<f64, ScriptError> {
        match self.advance() {
            Token::Num(v) => Ok(v),
            Token::Minus => Ok(-self.expr(3)?),
            Token::Plus => self.expr(3),
            Token::LParen => {
                let v = self.expr(0)?;
                self.expect(Token::RParen)?;
                Ok(v)
            }
            Token::Ident(f) => {
                self.expect(Token::LParen)?;
                let mut args = Vec::new();
                while *self.peek() != Token::RParen {
                    args.push(self.expr(0)?);
                    if *self.peek() == Token::Comma {
                        self.advance();
                    } else if *self.peek() != Token::RParen {
                        return self.error(format!("expected `,` or `)`, found {}", self.peek().describe()));
                    }
                }
                self.advance();
                call(&f, &args).or_else(|msg| self.error(msg))
            }
            other => self.error(format!("expected a number, found {}", other.describe())),
        }
    }
}

fn call(f: &str, args: &[f64]) -> Result<f64, String> {
    let unary = |g: fn(f64) -> f64| match args {
        [x] => Ok(g(*x)),
        _ => Err(format!("{}() takes 1 argument, got {}", f, args.len())),
    };
    match f {
        "sqrt" => unary(f64::sqrt),
        "sin" => unary(f64::sin),
        "cos" => unary(f64::cos),
        "tan" => unary(f64::tan),
        "abs" => unary(f64::abs),
        "pi" if args.is_empty() => Ok(std::f64::consts::PI),
        "pi" => Err(format!("pi() takes no arguments, got {}", args.len())),
        _ => Err(format!("unknown function `{}`", f)),
    }
}
