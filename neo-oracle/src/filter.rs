//! JSONPath filtering of fetched payloads.
//!
//! Supports `$`, `.name`, `.*`, `..name`, `['name']`, `[n]` (negative indices
//! count from the end), `[a:b]` slices and `[a,b]` / `['a','b']` unions.

use serde_json::Value;
use std::collections::VecDeque;
use thiserror::Error;

/// Deepest JSON nesting accepted in a fetched payload.
pub const FILTER_MAX_NEST: usize = 64;

const MAX_PATH_DEPTH: usize = 6;
const MAX_OBJECTS: usize = 1024;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("invalid json: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("json nesting exceeds {0}")]
    TooDeep(usize),

    #[error("invalid json path: {0}")]
    InvalidPath(String),

    #[error("json path exceeds {0} segments")]
    PathTooDeep(usize),

    #[error("json path matched more than {0} values")]
    TooManyObjects(usize),
}

/// Applies `filter` to `input` and returns the compact JSON array of matches.
///
/// An empty or missing filter returns the payload bytes unchanged.
pub fn filter_json(input: &str, filter: Option<&str>) -> Result<Vec<u8>, FilterError> {
    let Some(filter) = filter.filter(|value| !value.is_empty()) else {
        return Ok(input.as_bytes().to_vec());
    };

    let value: Value = serde_json::from_str(input)?;
    if nesting_depth(&value) > FILTER_MAX_NEST {
        return Err(FilterError::TooDeep(FILTER_MAX_NEST));
    }
    let path: JPath = filter.parse()?;
    let matches = path.apply(&value)?;
    Ok(serde_json::to_vec(&Value::Array(matches))?)
}

fn nesting_depth(value: &Value) -> usize {
    match value {
        Value::Array(items) => 1 + items.iter().map(nesting_depth).max().unwrap_or(0),
        Value::Object(map) => 1 + map.values().map(nesting_depth).max().unwrap_or(0),
        _ => 0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenType {
    Root,
    Dot,
    LeftBracket,
    RightBracket,
    Asterisk,
    Comma,
    Colon,
    Identifier,
    String,
    Number,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    token_type: TokenType,
    content: String,
}

impl Token {
    fn symbol(token_type: TokenType) -> Self {
        Self {
            token_type,
            content: String::new(),
        }
    }

    fn with_content(token_type: TokenType, content: String) -> Self {
        Self {
            token_type,
            content,
        }
    }

    fn number(&self) -> Result<i64, FilterError> {
        self.content
            .parse::<i64>()
            .map_err(|_| FilterError::InvalidPath(format!("bad index {}", self.content)))
    }
}

fn tokenize(expr: &str) -> Result<Vec<Token>, FilterError> {
    let mut tokens = Vec::new();
    let mut chars = expr.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '$' => tokens.push(Token::symbol(TokenType::Root)),
            '.' => tokens.push(Token::symbol(TokenType::Dot)),
            '[' => tokens.push(Token::symbol(TokenType::LeftBracket)),
            ']' => tokens.push(Token::symbol(TokenType::RightBracket)),
            '*' => tokens.push(Token::symbol(TokenType::Asterisk)),
            ',' => tokens.push(Token::symbol(TokenType::Comma)),
            ':' => tokens.push(Token::symbol(TokenType::Colon)),
            '\'' => {
                let mut content = String::new();
                let mut closed = false;
                for ch in chars.by_ref() {
                    if ch == '\'' {
                        closed = true;
                        break;
                    }
                    content.push(ch);
                }
                if !closed {
                    return Err(FilterError::InvalidPath("unterminated string".into()));
                }
                tokens.push(Token::with_content(TokenType::String, content));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut content = c.to_string();
                while let Some(&next) = chars.peek() {
                    if !(next.is_ascii_alphanumeric() || next == '_') {
                        break;
                    }
                    content.push(next);
                    chars.next();
                }
                tokens.push(Token::with_content(TokenType::Identifier, content));
            }
            c if c.is_ascii_digit() || c == '-' => {
                let mut content = c.to_string();
                while let Some(&next) = chars.peek() {
                    if !next.is_ascii_digit() {
                        break;
                    }
                    content.push(next);
                    chars.next();
                }
                tokens.push(Token::with_content(TokenType::Number, content));
            }
            other => {
                return Err(FilterError::InvalidPath(format!(
                    "unexpected character '{other}'"
                )))
            }
        }
    }

    Ok(tokens)
}

/// A parsed JSONPath expression.
#[derive(Debug, Clone)]
pub struct JPath(Vec<Token>);

impl std::str::FromStr for JPath {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(tokenize(s)?))
    }
}

impl JPath {
    /// Evaluates the path against `root`.
    pub fn apply(&self, root: &Value) -> Result<Vec<Value>, FilterError> {
        let mut tokens: VecDeque<Token> = self.0.iter().cloned().collect();
        let mut objects = vec![root.clone()];

        match tokens.pop_front() {
            None => return Ok(objects),
            Some(first) if first.token_type == TokenType::Root => {}
            Some(_) => return Err(FilterError::InvalidPath("path must start with '$'".into())),
        }

        let mut depth = 0;
        while let Some(token) = tokens.pop_front() {
            depth += 1;
            if depth > MAX_PATH_DEPTH {
                return Err(FilterError::PathTooDeep(MAX_PATH_DEPTH));
            }
            match token.token_type {
                TokenType::Dot => process_dot(&mut objects, &mut tokens)?,
                TokenType::LeftBracket => process_bracket(&mut objects, &mut tokens)?,
                _ => return Err(unexpected(&token)),
            }
            if objects.len() > MAX_OBJECTS {
                return Err(FilterError::TooManyObjects(MAX_OBJECTS));
            }
        }

        Ok(objects)
    }
}

fn unexpected(token: &Token) -> FilterError {
    FilterError::InvalidPath(format!("unexpected token {:?}", token.token_type))
}

fn next_token(tokens: &mut VecDeque<Token>) -> Result<Token, FilterError> {
    tokens
        .pop_front()
        .ok_or_else(|| FilterError::InvalidPath("unexpected end of path".into()))
}

fn expect_right_bracket(tokens: &mut VecDeque<Token>) -> Result<(), FilterError> {
    let token = next_token(tokens)?;
    if token.token_type == TokenType::RightBracket {
        Ok(())
    } else {
        Err(unexpected(&token))
    }
}

fn process_dot(objects: &mut Vec<Value>, tokens: &mut VecDeque<Token>) -> Result<(), FilterError> {
    let token = next_token(tokens)?;
    match token.token_type {
        TokenType::Asterisk => {
            descent(objects);
            Ok(())
        }
        TokenType::Dot => process_recursive_descent(objects, tokens),
        TokenType::Identifier => {
            descent_by_names(objects, &[token.content]);
            Ok(())
        }
        _ => Err(unexpected(&token)),
    }
}

fn process_bracket(
    objects: &mut Vec<Value>,
    tokens: &mut VecDeque<Token>,
) -> Result<(), FilterError> {
    let token = next_token(tokens)?;
    match token.token_type {
        TokenType::Asterisk => {
            expect_right_bracket(tokens)?;
            descent(objects);
            Ok(())
        }
        TokenType::Colon => process_slice(objects, tokens, 0),
        TokenType::Number => {
            let next = next_token(tokens)?;
            match next.token_type {
                TokenType::Colon => process_slice(objects, tokens, token.number()?),
                TokenType::Comma => process_union(objects, tokens, token),
                TokenType::RightBracket => {
                    descent_by_indices(objects, &[token.number()?]);
                    Ok(())
                }
                _ => Err(unexpected(&next)),
            }
        }
        TokenType::String => {
            let next = next_token(tokens)?;
            match next.token_type {
                TokenType::Comma => process_union(objects, tokens, token),
                TokenType::RightBracket => {
                    descent_by_names(objects, &[token.content]);
                    Ok(())
                }
                _ => Err(unexpected(&next)),
            }
        }
        _ => Err(unexpected(&token)),
    }
}

fn process_recursive_descent(
    objects: &mut Vec<Value>,
    tokens: &mut VecDeque<Token>,
) -> Result<(), FilterError> {
    let token = next_token(tokens)?;
    if token.token_type != TokenType::Identifier {
        return Err(unexpected(&token));
    }

    let mut results = Vec::new();
    let mut frontier = std::mem::take(objects);
    while !frontier.is_empty() {
        let mut next = Vec::new();
        for value in frontier {
            match value {
                Value::Object(map) => {
                    if let Some(found) = map.get(&token.content) {
                        results.push(found.clone());
                    }
                    next.extend(map.into_iter().map(|(_, v)| v));
                }
                Value::Array(items) => next.extend(items),
                _ => {}
            }
        }
        if results.len() > MAX_OBJECTS {
            return Err(FilterError::TooManyObjects(MAX_OBJECTS));
        }
        frontier = next;
    }
    *objects = results;
    Ok(())
}

fn process_slice(
    objects: &mut Vec<Value>,
    tokens: &mut VecDeque<Token>,
    start: i64,
) -> Result<(), FilterError> {
    let token = next_token(tokens)?;
    let end = match token.token_type {
        TokenType::Number => {
            let end = token.number()?;
            expect_right_bracket(tokens)?;
            end
        }
        TokenType::RightBracket => 0,
        _ => return Err(unexpected(&token)),
    };

    let mut selected = Vec::new();
    for value in objects.iter() {
        if let Value::Array(items) = value {
            let len = items.len() as i64;
            let from = if start >= 0 { start } else { start + len }.clamp(0, len);
            let to = if end > 0 { end } else { end + len }.clamp(0, len);
            if from < to {
                selected.extend(items[from as usize..to as usize].iter().cloned());
            }
        }
    }
    *objects = selected;
    Ok(())
}

fn process_union(
    objects: &mut Vec<Value>,
    tokens: &mut VecDeque<Token>,
    first: Token,
) -> Result<(), FilterError> {
    let mut items = vec![first.clone()];
    loop {
        let token = next_token(tokens)?;
        if token.token_type != first.token_type {
            return Err(unexpected(&token));
        }
        items.push(token);
        let separator = next_token(tokens)?;
        match separator.token_type {
            TokenType::RightBracket => break,
            TokenType::Comma => continue,
            _ => return Err(unexpected(&separator)),
        }
    }

    match first.token_type {
        TokenType::Number => {
            let indices = items
                .iter()
                .map(Token::number)
                .collect::<Result<Vec<_>, _>>()?;
            descent_by_indices(objects, &indices);
        }
        TokenType::String => {
            let names: Vec<String> = items.into_iter().map(|t| t.content).collect();
            descent_by_names(objects, &names);
        }
        _ => return Err(unexpected(&first)),
    }
    Ok(())
}

fn descent(objects: &mut Vec<Value>) {
    let mut children = Vec::new();
    for value in objects.drain(..) {
        match value {
            Value::Array(items) => children.extend(items),
            Value::Object(map) => children.extend(map.into_iter().map(|(_, v)| v)),
            _ => {}
        }
    }
    *objects = children;
}

fn descent_by_names(objects: &mut Vec<Value>, names: &[String]) {
    let mut children = Vec::new();
    for value in objects.iter() {
        if let Value::Object(map) = value {
            for name in names {
                if let Some(child) = map.get(name) {
                    children.push(child.clone());
                }
            }
        }
    }
    *objects = children;
}

fn descent_by_indices(objects: &mut Vec<Value>, indices: &[i64]) {
    let mut children = Vec::new();
    for value in objects.iter() {
        if let Value::Array(items) = value {
            let len = items.len() as i64;
            for &index in indices {
                let i = if index >= 0 { index } else { index + len };
                if (0..len).contains(&i) {
                    children.push(items[i as usize].clone());
                }
            }
        }
    }
    *objects = children;
}
