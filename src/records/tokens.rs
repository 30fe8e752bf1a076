use crate::foundation::error::{ReelError, ReelResult};

/// Field delimiter of the geometry and frame tables.
pub const DELIMITER: char = ',';

/// One non-blank table line split into tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenRow<'a> {
    /// Zero-based line number in the source text.
    pub row: usize,
    pub tokens: Vec<&'a str>,
}

/// Split table text into rows of trimmed tokens.
///
/// Rows may be ragged. Trailing empty tokens and blank lines are dropped. Interior empty
/// tokens (`1,,3`) are kept in place so positional decoding rejects them instead of shifting
/// every later field.
pub fn tokenize(text: &str) -> Vec<TokenRow<'_>> {
    text.lines()
        .enumerate()
        .filter_map(|(row, line)| {
            let mut tokens: Vec<&str> = line.split(DELIMITER).map(str::trim).collect();
            while tokens.last().is_some_and(|t| t.is_empty()) {
                tokens.pop();
            }
            (!tokens.is_empty()).then_some(TokenRow { row, tokens })
        })
        .collect()
}

/// Sequential reader over one row's tokens.
pub(crate) struct TokenCursor<'r, 'a> {
    row: &'r TokenRow<'a>,
    pos: usize,
}

impl<'r, 'a> TokenCursor<'r, 'a> {
    pub(crate) fn new(row: &'r TokenRow<'a>) -> Self {
        Self { row, pos: 0 }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.row.tokens.len() - self.pos
    }

    pub(crate) fn skip(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.row.tokens.len());
    }

    /// Read the next token as an integer of type `T`, naming `field` on failure.
    pub(crate) fn next_int<T: TryFrom<i64>>(&mut self, field: &str) -> ReelResult<T> {
        let Some(raw) = self.row.tokens.get(self.pos) else {
            return Err(ReelError::malformed(
                self.row.row,
                format!("missing token for '{field}'"),
            ));
        };
        self.pos += 1;
        if raw.is_empty() {
            return Err(ReelError::malformed(
                self.row.row,
                format!("'{field}' is empty"),
            ));
        }
        let v: i64 = raw.parse().map_err(|_| {
            ReelError::malformed(
                self.row.row,
                format!("'{field}' is not an integer: '{raw}'"),
            )
        })?;
        T::try_from(v).map_err(|_| {
            ReelError::malformed(self.row.row, format!("'{field}' out of range: {v}"))
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/records/tokens.rs"]
mod tests;
