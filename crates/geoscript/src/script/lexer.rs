//! Tokenizer for construction scripts.
//!
//! Produces a flat token stream with 1-based line numbers. Newlines are
//! significant (they end statements); `//` and `#` comments run to the end of
//! the line.

use std::iter::Peekable;
use std::str::Chars;

use super::error::{ScriptError, ScriptErrorKind};

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Num(f64),
    Ident(String),
    Str(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    LBracket,
    RBracket,
    /// `<` opening a direction literal.
    LAngle,
    /// `>` closing a direction literal.
    RAngle,
    Comma,
    Assign,
    /// Statement separator: newline or `;`.
    Sep,
    End,
}

impl Token {
    pub fn describe(&self) -> String {
        match self {
            Token::Num(v) => format!("number {}", v),
            Token::Ident(s) => format!("identifier `{}`", s),
            Token::Str(s) => format!("string \"{}\"", s),
            Token::Plus => "`+`".into(),
            Token::Minus => "`-`".into(),
            Token::Star => "`*`".into(),
            Token::Slash => "`/`".into(),
            Token::LParen => "`(`".into(),
            Token::RParen => "`)`".into(),
            Token::LBracket => "`[`".into(),
            Token::RBracket => "`]`".into(),
            Token::LAngle => "`<`".into(),
            Token::RAngle => "`>`".into(),
            Token::Comma => "`,`".into(),
            Token::Assign => "`=`".into(),
            Token::Sep => "end of statement".into(),
            Token::End => "end of input".into(),
        }
    }
}

/// A token and the line it starts on.
#[derive(Clone, Debug, PartialEq)]
pub struct Spanned {
    pub tok: Token,
    pub line: usize,
}

fn syntax(line: usize, msg: String) -> ScriptError {
    ScriptError::new(line, ScriptErrorKind::Syntax { msg })
}

pub fn tokenize(src: &str) -> Result<Vec<Spanned>, ScriptError> {
    let mut out = Vec::new();
    let mut chars = src.chars().peekable();
    let mut line = 1usize;

    while let Some(&ch) = chars.peek() {
        let tok = match ch {
            '\n' => {
                chars.next();
                out.push(Spanned { tok: Token::Sep, line });
                line += 1;
                continue;
            }
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '#' => {
                skip_line(&mut chars);
                continue;
            }
            '/' => {
                chars.next();
                if chars.peek() == Some(&'/') {
                    skip_line(&mut chars);
                    continue;
                }
                Token::Slash
            }
            '0'..='9' | '.' => Token::Num(number(&mut chars, line)?),
            c if c.is_alphabetic() || c == '_' => {
                let mut ident = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_alphanumeric() || c == '_' {
                        ident.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                Token::Ident(ident)
            }
            '"' | '\'' => {
                chars.next();
                Token::Str(string(&mut chars, ch, line)?)
            }
            _ => {
                chars.next();
                match ch {
                    '+' => Token::Plus,
                    '-' => Token::Minus,
                    '*' => Token::Star,
                    '(' => Token::LParen,
                    ')' => Token::RParen,
                    '[' => Token::LBracket,
                    ']' => Token::RBracket,
                    '<' => Token::LAngle,
                    '>' => Token::RAngle,
                    ',' => Token::Comma,
                    '=' => Token::Assign,
                    ';' => Token::Sep,
                    other => return Err(syntax(line, format!("unexpected character '{}'", other))),
                }
            }
        };
        out.push(Spanned { tok, line });
    }
    out.push(Spanned { tok: Token::End, line });
    Ok(out)
}

fn skip_line(chars: &mut Peekable<Chars<'_>>) {
    while let Some(&c) = chars.peek() {
        if c == '\n' {
            break;
        }
        chars.next();
    }
}

fn number(chars: &mut Peekable<Chars<'_>>, line: usize) -> Result<f64, ScriptError> {
    let mut s = String::new();
    let mut has_dot = false;
    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            s.push(c);
        } else if c == '.' && !has_dot {
            has_dot = true;
            s.push(c);
        } else {
            break;
        }
        chars.next();
    }
    // exponent: 1e-3, 2E5
    if matches!(chars.peek(), Some('e') | Some('E')) {
        let mut lookahead = chars.clone();
        lookahead.next();
        let mut exp = String::from("e");
        if let Some(&sign @ ('+' | '-')) = lookahead.peek() {
            exp.push(sign);
            lookahead.next();
        }
        if lookahead.peek().is_some_and(|c| c.is_ascii_digit()) {
            while let Some(&c) = lookahead.peek() {
                if !c.is_ascii_digit() {
                    break;
                }
                exp.push(c);
                lookahead.next();
            }
            s.push_str(&exp);
            *chars = lookahead;
        }
    }
    s.parse()
        .map_err(|_| syntax(line, format!("invalid number '{}'", s)))
}

fn string(chars: &mut Peekable<Chars<'_>>, quote: char, line: usize) -> Result<String, ScriptError> {
    let mut s = String::new();
    loop {
        match chars.next() {
            Some(c) if c == quote => return Ok(s),
            Some('\\') => match chars.next() {
                Some('n') => s.push('\n'),
                Some('t') => s.push('\t'),
                Some(c) => s.push(c),
                None => break,
            },
            Some('\n') | None => break,
            Some(c) => s.push(c),
        }
    }
    Err(syntax(line, "unterminated string".to_string()))
}
