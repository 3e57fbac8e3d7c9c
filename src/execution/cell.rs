//! Result Cell
//!
//! The single slot that threads a value through the sequential steps of
//! one branch. Each step hands back a [`CellWrite`] describing what it
//! did to the slot instead of mutating shared state.

/// What a step did with the result cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellWrite<T> {
    /// Leave the previous value untouched.
    Keep,
    /// Overwrite the cell with a new value.
    Set(T),
}

impl<T> CellWrite<T> {
    /// Shorthand for [`CellWrite::Set`].
    pub fn set(value: T) -> Self {
        CellWrite::Set(value)
    }

    /// Returns true if this write replaces the cell's value.
    pub fn is_set(&self) -> bool {
        matches!(self, CellWrite::Set(_))
    }
}

/// Holds the current value of a branch (`None` means no value yet).
#[derive(Debug, Clone, PartialEq)]
pub struct ResultCell<T> {
    value: Option<T>,
    writes: usize,
}

impl<T> ResultCell<T> {
    /// Creates an empty cell.
    pub fn new() -> Self {
        Self {
            value: None,
            writes: 0,
        }
    }

    /// Current value, if any step has written one.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Returns true once any step has set a value.
    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Number of `Set` writes applied so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Applies a step's write.
    pub fn apply(&mut self, write: CellWrite<T>) {
        if let CellWrite::Set(value) = write {
            self.value = Some(value);
            self.writes += 1;
        }
    }

    /// Consumes the cell, yielding the branch's terminal value.
    pub fn into_value(self) -> Option<T> {
        self.value
    }
}

impl<T: Clone> ResultCell<T> {
    /// Clones the current value for handing to the next step.
    pub fn snapshot(&self) -> Option<T> {
        self.value.clone()
    }
}

impl<T> Default for ResultCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_is_empty() {
        let cell: ResultCell<i64> = ResultCell::new();
        assert!(!cell.has_value());
        assert_eq!(cell.writes(), 0);
        assert_eq!(cell.into_value(), None);
    }

    #[test]
    fn test_keep_carries_value_forward() {
        let mut cell = ResultCell::new();
        cell.apply(CellWrite::set(42));
        cell.apply(CellWrite::Keep);

        assert_eq!(cell.value(), Some(&42));
        assert_eq!(cell.writes(), 1);
    }

    #[test]
    fn test_last_write_wins() {
        let mut cell = ResultCell::new();
        cell.apply(CellWrite::set("a".to_string()));
        cell.apply(CellWrite::set("b".to_string()));

        assert_eq!(cell.snapshot(), Some("b".to_string()));
        assert_eq!(cell.writes(), 2);
    }

    #[test]
    fn test_zero_is_a_value() {
        let mut cell = ResultCell::new();
        cell.apply(CellWrite::set(0));
        assert!(cell.has_value());
        assert_eq!(cell.into_value(), Some(0));
    }

    #[test]
    fn test_is_set() {
        assert!(CellWrite::set(1).is_set());
        assert!(!CellWrite::<i32>::Keep.is_set());
    }
}
