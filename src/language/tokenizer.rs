/*!
The tokenizer --- source text to tokens.

Whitespace is space, tab, or carriage return, and a newline is whitespace which advances the line count.
A `%` begins a comment which extends to the end of the line.
Open and close braces are single-character tokens.
Anything else begins a name: a maximal run of characters excluding whitespace, braces, and `%`.
A run consisting entirely of digits is a number --- so `a_1` is one name, while `1` followed by a brace or whitespace is the number one.
*/

use crate::types::err::{self, TokenizerError};

/// A position in source text, with lines and columns counted from one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A token of the constraint language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: Location,
}

/// The kinds of token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// An open brace.
    Open,

    /// A close brace.
    Close,

    /// A name.
    Name(String),

    /// A number.
    Number(i64),
}

/// True for a character which may not occur within a name.
fn is_delimiter(character: char) -> bool {
    matches!(character, ' ' | '\t' | '\r' | '\n' | '(' | ')' | '%')
}

/// Splits source text into tokens.
pub fn tokenize(source: &str) -> Result<Vec<Token>, err::ErrorKind> {
    let mut tokens = Vec::default();
    let mut characters = source.chars().peekable();

    let mut line = 1;
    let mut column = 1;

    while let Some(character) = characters.next() {
        let location = Location { line, column };

        match character {
            '\n' => {
                line += 1;
                column = 1;
                continue;
            }

            ' ' | '\t' | '\r' => {}

            '%' => {
                while let Some(commented) = characters.peek() {
                    if *commented == '\n' {
                        break;
                    }
                    characters.next();
                    column += 1;
                }
            }

            '(' => tokens.push(Token {
                kind: TokenKind::Open,
                location,
            }),

            ')' => tokens.push(Token {
                kind: TokenKind::Close,
                location,
            }),

            first => {
                let mut text = String::from(first);
                while let Some(next) = characters.peek() {
                    if is_delimiter(*next) {
                        break;
                    }
                    text.push(*next);
                    characters.next();
                    column += 1;
                }

                if text.is_empty() {
                    return Err(err::ErrorKind::from(TokenizerError::EmptyName(location)));
                }

                let kind = match text.chars().all(|c| c.is_ascii_digit()) {
                    true => match text.parse::<i64>() {
                        Ok(number) => TokenKind::Number(number),
                        Err(_) => {
                            return Err(err::ErrorKind::from(TokenizerError::NumberRange(location)))
                        }
                    },
                    false => TokenKind::Name(text),
                };

                tokens.push(Token { kind, location });
            }
        }

        column += 1;
    }

    log::trace!(target: crate::misc::log::targets::TOKENIZER, "{} tokens", tokens.len());

    Ok(tokens)
}
