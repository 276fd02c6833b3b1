use chumsky::prelude::*;
use std::rc::Rc;

use crate::diagnostic::SyntaxError;
use crate::token::{Literal, Token, TokenKind};

/// Raw lexeme classes produced by the combinator lexer. The lexeme text and
/// line number are recovered from the span afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lexeme {
    Token(TokenKind),
    Identifier,
    Number,
    String,
    UnterminatedString,
    Unexpected(char),
}

pub fn lexer<'src>()
-> impl Parser<'src, &'src str, Vec<(Lexeme, SimpleSpan)>, extra::Err<Simple<'src, char>>> {
    // Digits with an optional fraction; `1.` leaves the dot for the next token.
    let number = text::digits(10)
        .then(just('.').then(text::digits(10)).or_not())
        .to(Lexeme::Number);

    let string = just('"')
        .ignore_then(none_of("\"").repeated())
        .ignore_then(just('"').or_not())
        .map(|closing: Option<char>| match closing {
            Some(_) => Lexeme::String,
            None => Lexeme::UnterminatedString,
        });

    // Letters and digits are Unicode-aware: `café` and `π` are identifiers.
    let word = any()
        .filter(|c: &char| c.is_alphabetic() || *c == '_')
        .then(any().filter(|c: &char| c.is_alphanumeric() || *c == '_').repeated())
        .to_slice()
        .map(|ident: &str| match TokenKind::keyword(ident) {
            Some(kind) => Lexeme::Token(kind),
            None => Lexeme::Identifier,
        });

    let op_double = choice((
        just("==").to(TokenKind::EqualEqual),
        just("!=").to(TokenKind::BangEqual),
        just("<=").to(TokenKind::LessEqual),
        just(">=").to(TokenKind::GreaterEqual),
        just("**").to(TokenKind::StarStar),
    ));

    let op_single = choice((
        just('(').to(TokenKind::LeftParen),
        just(')').to(TokenKind::RightParen),
        just('{').to(TokenKind::LeftBrace),
        just('}').to(TokenKind::RightBrace),
        just(',').to(TokenKind::Comma),
        just('.').to(TokenKind::Dot),
        just('-').to(TokenKind::Minus),
        just('+').to(TokenKind::Plus),
        just(';').to(TokenKind::Semicolon),
        just('/').to(TokenKind::Slash),
        just('*').to(TokenKind::Star),
        just('!').to(TokenKind::Bang),
        just('=').to(TokenKind::Equal),
        just('<').to(TokenKind::Less),
        just('>').to(TokenKind::Greater),
    ));

    let op = op_double.or(op_single).map(Lexeme::Token);

    let unexpected = any().map(Lexeme::Unexpected);

    // Only these count as whitespace; anything else is an unexpected character.
    let whitespace = one_of(" \t\r\n").repeated().at_least(1);

    let comment = just("//").then(any().and_is(just('\n').not()).repeated());

    let trivia = whitespace.ignored().or(comment.ignored()).repeated();

    let token = number
        .or(string)
        .or(word)
        .or(op)
        .or(unexpected)
        .map_with(|lexeme, e| (lexeme, e.span()))
        .padded_by(trivia.clone());

    token
        .repeated()
        .collect()
        .padded_by(trivia)
        .then_ignore(end())
}

pub struct ScanResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<SyntaxError>,
}

impl ScanResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Byte offsets of every newline, for mapping spans back to line numbers.
struct LineIndex {
    newlines: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        Self {
            newlines: source.match_indices('\n').map(|(offset, _)| offset).collect(),
        }
    }

    /// Line on which the byte range ending at `end` finishes.
    fn line_at(&self, end: usize) -> usize {
        self.newlines.partition_point(|&offset| offset < end) + 1
    }

    fn last_line(&self) -> usize {
        self.newlines.len() + 1
    }
}

/// Turns source text into tokens. Never fails: bad characters and
/// unterminated strings become errors and scanning carries on. The last
/// token is always `EOF`.
pub fn scan(source: &str) -> ScanResult {
    let lines = LineIndex::new(source);
    let (raw, parse_errors) = lexer().parse(source).into_output_errors();

    let mut tokens = Vec::new();
    let mut errors: Vec<SyntaxError> = parse_errors
        .iter()
        .map(|error| {
            let span = error.span();
            SyntaxError::lexical(lines.line_at(span.end), format!("Unexpected input at offset {}.", span.start))
        })
        .collect();

    for (lexeme, span) in raw.unwrap_or_default() {
        let text = &source[span.start..span.end];
        let line = lines.line_at(span.end);

        match lexeme {
            Lexeme::Token(kind) => tokens.push(Token::simple(kind, text, line)),
            Lexeme::Identifier => tokens.push(Token::simple(TokenKind::Identifier, text, line)),
            Lexeme::Number => {
                let value: f64 = text.parse().unwrap_or_default();
                tokens.push(Token::new(TokenKind::Number, text, Some(Literal::Number(value)), line));
            }
            Lexeme::String => {
                let contents = &text[1..text.len() - 1];
                tokens.push(Token::new(
                    TokenKind::String,
                    text,
                    Some(Literal::String(Rc::from(contents))),
                    line,
                ));
            }
            Lexeme::UnterminatedString => {
                errors.push(SyntaxError::lexical(line, "Unterminated string."));
            }
            Lexeme::Unexpected(c) => {
                errors.push(SyntaxError::lexical(line, format!("Unexpected character: {}", c)));
            }
        }
    }

    tokens.push(Token::simple(TokenKind::Eof, "", lines.last_line()));

    tracing::debug!(tokens = tokens.len(), errors = errors.len(), "scanned source");

    ScanResult { tokens, errors }
}
