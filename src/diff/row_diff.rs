//! Row matching algorithm

/// A pair of rows matched by position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowPair<'a> {
    /// Both tables have a row at this index
    Both {
        index: usize,
        expected: &'a [String],
        actual: &'a [String],
    },
    /// Only the expected table has a row at this index
    Missing { index: usize, expected: &'a [String] },
    /// Only the actual table has a row at this index
    Additional { index: usize, actual: &'a [String] },
}

impl RowPair<'_> {
    /// 1-based row number within the data rows
    pub fn row_number(&self) -> usize {
        match self {
            RowPair::Both { index, .. }
            | RowPair::Missing { index, .. }
            | RowPair::Additional { index, .. } => index + 1,
        }
    }
}

/// Positional row matcher: row N of one table pairs with row N of the other.
///
/// A row inserted or removed in the middle shifts every following pair, so the
/// rest of the table reports as changed rather than as a single insertion.
pub struct RowMatcher;

impl RowMatcher {
    /// Match data rows between expected and actual tables.
    /// Pairs come in index order: shared rows first, then missing or additional ones.
    pub fn match_rows<'a>(expected: &'a [Vec<String>], actual: &'a [Vec<String>]) -> Vec<RowPair<'a>> {
        let mut matches = Vec::with_capacity(expected.len().max(actual.len()));

        for (index, expected_row) in expected.iter().enumerate() {
            match actual.get(index) {
                Some(actual_row) => matches.push(RowPair::Both {
                    index,
                    expected: expected_row,
                    actual: actual_row,
                }),
                None => matches.push(RowPair::Missing {
                    index,
                    expected: expected_row,
                }),
            }
        }

        for (index, actual_row) in actual.iter().enumerate().skip(expected.len()) {
            matches.push(RowPair::Additional {
                index,
                actual: actual_row,
            });
        }

        matches
    }
}
