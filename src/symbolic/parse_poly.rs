/// a module turns a String expression into a multivariate polynomial
///# Example
/// ```
/// use RustedSymbolMath::symbolic::polynomial::MVPolynomial;
/// let input = "1 + (a + cos)(a - cos) + (a+1)(a-1) - sin sin";
/// let poly = MVPolynomial::parse(input).unwrap();
/// assert_eq!(poly, MVPolynomial::parse("2 a a - cos cos - sin sin").unwrap());
/// ```
//  grammar (implicit multiplication binds like '*'):
//    Expr   := ['+'|'-']* Term (('+'|'-')+ Term)*
//    Term   := Factor (('*' | adjacency) Factor)*
//    Factor := ('+'|'-')* ( Number? Identifier | Number | '(' Expr ')' )
//  "6a - -4 * -a"  ->  [6][a] - -[4] * -[a]  ->  6a + (4 * (-a))  ->  2a
use crate::symbolic::polynomial::MVPolynomial;
use crate::symbolic::symbolic_errors::{Result, SymbolicError};
use crate::symbolic::term::Term;
use log::warn;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{alpha1, alphanumeric1, char},
    combinator::{recognize, value},
    multi::many0,
    sequence::pair,
};

/// typed tokens of the expression grammar
#[derive(Debug, Clone, PartialEq, strum_macros::Display)]
pub enum Token {
    Number(f64),
    Ident(String),
    #[strum(to_string = "+")]
    Plus,
    #[strum(to_string = "-")]
    Minus,
    #[strum(to_string = "*")]
    Star,
    #[strum(to_string = "(")]
    LParen,
    #[strum(to_string = ")")]
    RParen,
}

/// deepest bracket nesting accepted by [`parse_polynomial`]
pub const MAX_NESTING: usize = 256;

/// symbol name: letter or underscore followed by letters, digits, underscores
pub(crate) fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))
    .parse(input)
}

pub(crate) fn is_identifier(s: &str) -> bool {
    matches!(identifier(s), Ok((rest, _)) if rest.is_empty())
}

fn number_literal(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_digit() || c == '.').parse(input)
}

fn operator(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::Plus, char('+')),
        value(Token::Minus, alt((char('-'), char('−')))),
        value(Token::Star, char('*')),
        value(Token::LParen, char('(')),
        value(Token::RParen, char(')')),
    ))
    .parse(input)
}

/// Split the text into tokens. An atom like `2.5abc` gives `Number(2.5)` followed by
/// `Ident("abc")`. Characters outside the grammar are skipped with a warning.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut rest = input.trim_start();
    while !rest.is_empty() {
        if let Ok((remaining, token)) = operator(rest) {
            tokens.push(token);
            rest = remaining;
        } else if let Ok((remaining, literal)) = number_literal(rest) {
            let k = literal
                .parse::<f64>()
                .map_err(|_| SymbolicError::NumberFormat(format!("'{}' in '{}'", literal, input)))?;
            tokens.push(Token::Number(k));
            rest = remaining;
        } else if let Ok((remaining, name)) = identifier(rest) {
            tokens.push(Token::Ident(name.to_string()));
            rest = remaining;
        } else {
            let mut chars = rest.chars();
            if let Some(c) = chars.next() {
                warn!("skipping unrecognized character '{}' in '{}'", c, input);
            }
            rest = chars.as_str();
        }
        rest = rest.trim_start();
    }
    Ok(tokens)
}

struct PolyParser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

/// outcome of reading one factor
enum Factor {
    Value(MVPolynomial),
    /// `()` or a group cut off by the end of input, contributes nothing
    Empty,
}

impl<'a> PolyParser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    /// consumes a run of '+'/'-' and returns the resulting sign
    fn signs(&mut self) -> f64 {
        let mut sign = 1.0;
        while let Some(token) = self.peek() {
            match token {
                Token::Plus => {}
                Token::Minus => sign = -sign,
                _ => break,
            }
            self.advance();
        }
        sign
    }

    /// Expr: stops in front of ')' or at the end of input. None if no term was read.
    fn parse_sum(&mut self) -> Result<Option<MVPolynomial>> {
        let mut sum: Option<MVPolynomial> = None;
        let mut pending = 1.0;
        loop {
            let before = self.pos;
            let sign = pending * self.signs();
            pending = 1.0;
            match self.parse_product()? {
                Some(product) => sum
                    .get_or_insert_with(MVPolynomial::zero)
                    .accumulate_scaled(&product, sign),
                None => match self.peek() {
                    Some(Token::Star) => {
                        warn!("dangling '{}' ignored", Token::Star);
                        self.advance();
                        pending = sign;
                        continue;
                    }
                    _ => {
                        if self.pos > before {
                            warn!("dangling sign ignored");
                        }
                        break;
                    }
                },
            }
            if !matches!(self.peek(), Some(Token::Plus) | Some(Token::Minus)) {
                break;
            }
        }
        Ok(sum)
    }

    /// Term: factors joined by '*' or by adjacency. None if no factor with a value was read.
    fn parse_product(&mut self) -> Result<Option<MVPolynomial>> {
        let mut product: Option<MVPolynomial> = None;
        loop {
            match self.parse_factor()? {
                Some(Factor::Value(factor)) => {
                    product = Some(match product {
                        Some(p) => p.multiply(&factor),
                        None => factor,
                    })
                }
                Some(Factor::Empty) => warn!("empty brackets ignored"),
                None => break,
            }
            match self.peek() {
                Some(Token::Star) => {
                    self.advance();
                    if !matches!(
                        self.peek(),
                        Some(Token::Number(_) | Token::Ident(_) | Token::LParen | Token::Plus | Token::Minus)
                    ) {
                        warn!("dangling '{}' ignored", Token::Star);
                        break;
                    }
                }
                // implicit multiplication
                Some(Token::Number(_) | Token::Ident(_) | Token::LParen) => {}
                _ => break,
            }
        }
        Ok(product)
    }

    fn parse_factor(&mut self) -> Result<Option<Factor>> {
        let sign = self.signs();
        let Some(token) = self.peek() else {
            return Ok(None);
        };
        let primary = match token {
            Token::Number(k) => {
                self.advance();
                match self.peek() {
                    Some(Token::Ident(name)) => {
                        self.advance();
                        MVPolynomial::from_term(Term::from_symbols([name.as_str()]), *k)
                    }
                    _ => MVPolynomial::constant(*k),
                }
            }
            Token::Ident(name) => {
                self.advance();
                MVPolynomial::from_term(Term::from_symbols([name.as_str()]), 1.0)
            }
            Token::LParen => {
                if self.depth >= MAX_NESTING {
                    return Err(SymbolicError::InvalidFormat(format!(
                        "brackets nested deeper than {}",
                        MAX_NESTING
                    )));
                }
                self.advance();
                self.depth += 1;
                let inner = self.parse_sum()?;
                self.depth -= 1;
                if self.peek() == Some(&Token::RParen) {
                    self.advance();
                } else {
                    warn!("missing '{}' closed at end of input", Token::RParen);
                }
                match inner {
                    Some(inner) => inner,
                    None => return Ok(Some(Factor::Empty)),
                }
            }
            _ => return Ok(None),
        };
        Ok(Some(Factor::Value(primary.scale(sign))))
    }
}

/// Parse an expression into a polynomial.
///
/// An invalid numeric literal or brackets nested deeper than [`MAX_NESTING`] are errors;
/// other malformed input is read leniently: unknown characters, dangling operators and empty
/// brackets are skipped, a missing `)` is closed at the end, a stray `)` is skipped,
/// and text without any atom gives the zero polynomial.
pub fn parse_polynomial(input: &str) -> Result<MVPolynomial> {
    let tokens = tokenize(input)?;
    let mut parser = PolyParser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
    };
    let mut poly = parser.parse_sum()?.unwrap_or_else(MVPolynomial::zero);
    while let Some(token) = parser.peek() {
        warn!("unbalanced '{}' skipped in '{}'", token, input);
        parser.advance();
        if let Some(rest) = parser.parse_sum()? {
            poly = poly.add(&rest);
        }
    }
    Ok(poly)
}
