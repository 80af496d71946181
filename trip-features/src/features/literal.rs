//! bounded parser for the textual list literals stored in the trip tables,
//! such as `[-8.61, 41.14]` or `[[5,2],[7,3]]`.
//!
//! only numeric literals nested inside `[...]` or `(...)` and separated by
//! commas are accepted. anything else is a [LiteralError].
use geo::Point;

use crate::features::grid::GridCoord;

/// maximum nesting of lists accepted by [parse_literal].
pub const MAX_DEPTH: usize = 8;

/// a parsed literal: a number or a (possibly empty) list of literals.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    List(Vec<Literal>),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LiteralError {
    #[error("unexpected end of input at position {0}")]
    UnexpectedEnd(usize),
    #[error("unexpected character '{1}' at position {0}")]
    UnexpectedCharacter(usize, char),
    #[error("invalid number '{1}' at position {0}")]
    InvalidNumber(usize, String),
    #[error("lists nested deeper than {0} levels")]
    TooDeep(usize),
    #[error("expected {0}, found {1}")]
    UnexpectedShape(String, String),
}

impl Literal {
    fn describe(&self) -> String {
        match self {
            Literal::Number(n) => format!("number {n}"),
            Literal::List(items) => format!("list of {} elements", items.len()),
        }
    }

    fn as_number(&self) -> Result<f64, LiteralError> {
        match self {
            Literal::Number(n) => Ok(*n),
            other => Err(LiteralError::UnexpectedShape(
                String::from("number"),
                other.describe(),
            )),
        }
    }

    fn as_pair(&self) -> Result<(&Literal, &Literal), LiteralError> {
        match self {
            Literal::List(items) if items.len() == 2 => Ok((&items[0], &items[1])),
            other => Err(LiteralError::UnexpectedShape(
                String::from("list of 2 elements"),
                other.describe(),
            )),
        }
    }

    fn as_integer(&self) -> Result<i64, LiteralError> {
        let n = self.as_number()?;
        if n.fract() != 0.0 || !n.is_finite() || n.abs() > i64::MAX as f64 {
            return Err(LiteralError::UnexpectedShape(
                String::from("integer"),
                self.describe(),
            ));
        }
        Ok(n as i64)
    }

    /// interprets a `[lon, lat]` literal as a point.
    pub fn to_point(&self) -> Result<Point<f64>, LiteralError> {
        let (lon, lat) = self.as_pair()?;
        Ok(Point::new(lon.as_number()?, lat.as_number()?))
    }

    /// interprets a `[column, row]` literal as a grid coordinate.
    pub fn to_grid_coord(&self) -> Result<GridCoord, LiteralError> {
        let (column, row) = self.as_pair()?;
        Ok(GridCoord::new(column.as_integer()?, row.as_integer()?))
    }

    /// interprets a list of `[column, row]` literals as a grid polyline.
    pub fn to_grid_polyline(&self) -> Result<Vec<GridCoord>, LiteralError> {
        match self {
            Literal::List(items) => items.iter().map(Literal::to_grid_coord).collect(),
            other => Err(LiteralError::UnexpectedShape(
                String::from("list of grid coordinates"),
                other.describe(),
            )),
        }
    }
}

/// parses a complete literal; trailing non-whitespace input is an error.
pub fn parse_literal(s: &str) -> Result<Literal, LiteralError> {
    let mut parser = LiteralParser {
        chars: s.chars().collect(),
        pos: 0,
    };
    let literal = parser.parse_value(0)?;
    parser.skip_whitespace();
    match parser.peek() {
        None => Ok(literal),
        Some(c) => Err(LiteralError::UnexpectedCharacter(parser.pos, c)),
    }
}

pub fn parse_point(s: &str) -> Result<Point<f64>, LiteralError> {
    parse_literal(s)?.to_point()
}

pub fn parse_grid_polyline(s: &str) -> Result<Vec<GridCoord>, LiteralError> {
    parse_literal(s)?.to_grid_polyline()
}

struct LiteralParser {
    chars: Vec<char>,
    pos: usize,
}

impl LiteralParser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn parse_value(&mut self, depth: usize) -> Result<Literal, LiteralError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(LiteralError::UnexpectedEnd(self.pos)),
            Some('[') => self.parse_list(']', depth + 1),
            Some('(') => self.parse_list(')', depth + 1),
            Some(c) if c == '-' || c == '+' || c == '.' || c.is_ascii_digit() => {
                self.parse_number()
            }
            Some(c) => Err(LiteralError::UnexpectedCharacter(self.pos, c)),
        }
    }

    fn parse_list(&mut self, close: char, depth: usize) -> Result<Literal, LiteralError> {
        if depth > MAX_DEPTH {
            return Err(LiteralError::TooDeep(MAX_DEPTH));
        }
        // consume the opening bracket
        self.pos += 1;
        let mut items = vec![];
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(LiteralError::UnexpectedEnd(self.pos)),
                Some(c) if c == close => {
                    self.pos += 1;
                    return Ok(Literal::List(items));
                }
                Some(_) => {}
            }
            items.push(self.parse_value(depth)?);
            self.skip_whitespace();
            match self.peek() {
                None => return Err(LiteralError::UnexpectedEnd(self.pos)),
                Some(',') => self.pos += 1,
                Some(c) if c == close => {}
                Some(c) => return Err(LiteralError::UnexpectedCharacter(self.pos, c)),
            }
        }
    }

    fn parse_number(&mut self) -> Result<Literal, LiteralError> {
        let start = self.pos;
        if matches!(self.peek(), Some('-') | Some('+')) {
            self.pos += 1;
        }
        let mut prev = None;
        while let Some(c) = self.peek() {
            let exponent_sign = (c == '-' || c == '+') && matches!(prev, Some('e') | Some('E'));
            if c.is_ascii_digit() || c == '.' || c == 'e' || c == 'E' || exponent_sign {
                prev = Some(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        // f64::from_str also accepts "inf" and "nan", which the scan above never admits
        text.parse::<f64>()
            .map(Literal::Number)
            .map_err(|_| LiteralError::InvalidNumber(start, text))
    }
}
