//! Affected-row policy for UPDATE and DELETE.

use std::fmt;

use crate::executor::RowError;

/// How many rows a by-ID mutation must affect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpectedRows {
    /// Exactly one.
    #[default]
    One,
    /// Zero or one; deleting something already gone is fine.
    ZeroOrOne,
    /// Any count.
    Ignore,
}

impl ExpectedRows {
    pub fn check(self, actual: u64) -> Result<(), RowError> {
        let ok = match self {
            ExpectedRows::One => actual == 1,
            ExpectedRows::ZeroOrOne => actual <= 1,
            ExpectedRows::Ignore => true,
        };
        if ok {
            Ok(())
        } else {
            Err(RowError::UnexpectedRowCount {
                expected: self.to_string(),
                actual,
            })
        }
    }
}

impl fmt::Display for ExpectedRows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedRows::One => f.write_str("exactly 1"),
            ExpectedRows::ZeroOrOne => f.write_str("at most 1"),
            ExpectedRows::Ignore => f.write_str("any number of"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_is_default() {
        assert_eq!(ExpectedRows::default(), ExpectedRows::One);
    }

    #[test]
    fn test_policies() {
        assert!(ExpectedRows::One.check(1).is_ok());
        assert!(ExpectedRows::One.check(0).is_err());
        assert!(ExpectedRows::One.check(2).is_err());
        assert!(ExpectedRows::ZeroOrOne.check(0).is_ok());
        assert!(ExpectedRows::ZeroOrOne.check(2).is_err());
        assert!(ExpectedRows::Ignore.check(40).is_ok());
    }

    #[test]
    fn test_violation_reports_counts() {
        match ExpectedRows::One.check(0) {
            Err(RowError::UnexpectedRowCount { expected, actual }) => {
                assert_eq!(expected, "exactly 1");
                assert_eq!(actual, 0);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
