//! Cell address codec.
//!
//! Converts between zero-based (row, column) pairs and spreadsheet-style
//! coordinate strings such as `B6`. Column letters are bijective base-26
//! (`A`..`Z`, `AA`, ..): there is no zero digit, so `Z` is followed by `AA`.

use crate::error::{Result, SiftError};
use std::fmt;

/// A zero-based cell position within a grid.
///
/// Row 0 / column 0 corresponds to `A1`. The string form round-trips
/// losslessly: `CellAddress::parse(addr.to_string())` yields `addr` for any
/// address, and parsing then re-encoding a well-formed reference reproduces
/// it byte for byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellAddress {
    pub row: usize,
    pub col: usize,
}

impl CellAddress {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Parse a reference like `A6` or `AB12`.
    ///
    /// # Errors
    ///
    /// Fails with [`SiftError::MalformedAddress`] unless the input matches
    /// `[A-Z]+[1-9][0-9]*`.
    pub fn parse(reference: &str) -> Result<Self> {
        let letters_len = reference
            .chars()
            .take_while(|c| c.is_ascii_uppercase())
            .count();
        let (letters, digits) = reference.split_at(letters_len);

        if letters.is_empty()
            || digits.is_empty()
            || digits.starts_with('0')
            || !digits.chars().all(|c| c.is_ascii_digit())
        {
            return Err(SiftError::MalformedAddress(reference.to_owned()));
        }

        let row: usize = digits
            .parse()
            .map_err(|_| SiftError::MalformedAddress(reference.to_owned()))?;

        let mut col: usize = 0;
        for c in letters.chars() {
            col = col * 26 + (c as usize - 'A' as usize + 1);
        }

        Ok(Self::new(row - 1, col - 1))
    }

    /// The bijective base-26 letter part for a zero-based column index.
    pub fn column_letters(col: usize) -> String {
        let mut n = col + 1;
        let mut letters = Vec::new();
        while n > 0 {
            let rem = (n - 1) % 26;
            letters.push(b'A' + rem as u8);
            n = (n - 1) / 26;
        }
        letters.reverse();
        String::from_utf8(letters).unwrap_or_default()
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::column_letters(self.col), self.row + 1)
    }
}
