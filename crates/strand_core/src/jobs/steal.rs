//! Outcome of a single steal attempt

/// Result of one [`Stealer::steal`](super::Stealer::steal) attempt.
///
/// `Empty` and `Retry` both mean "no item this time"; `Retry` additionally
/// says the queue was not empty and another thread won the race, so trying
/// again (here or on another queue) may succeed.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steal<T> {
    Empty,
    Retry,
    Success(T),
}

impl<T> Steal<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Steal::Empty)
    }

    pub fn is_retry(&self) -> bool {
        matches!(self, Steal::Retry)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Steal::Success(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            Steal::Success(item) => Some(item),
            Steal::Empty | Steal::Retry => None,
        }
    }

    /// Falls back to `f` unless this attempt succeeded.
    ///
    /// A `Retry` is remembered: if the fallback comes back `Empty`, the
    /// combined result is still `Retry`.
    pub fn or_else<F>(self, f: F) -> Steal<T>
    where
        F: FnOnce() -> Steal<T>,
    {
        match self {
            Steal::Success(_) => self,
            Steal::Empty => f(),
            Steal::Retry => match f() {
                Steal::Empty => Steal::Retry,
                other => other,
            },
        }
    }
}

impl<T> From<Steal<T>> for Option<T> {
    fn from(steal: Steal<T>) -> Self {
        steal.success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_else_keeps_first_success() {
        let steal = Steal::Success(1).or_else(|| Steal::Success(2));
        assert_eq!(steal, Steal::Success(1));
    }

    #[test]
    fn test_or_else_remembers_retry() {
        assert_eq!(Steal::<u8>::Retry.or_else(|| Steal::Empty), Steal::Retry);
        assert_eq!(Steal::<u8>::Empty.or_else(|| Steal::Empty), Steal::Empty);
        assert_eq!(Steal::Retry.or_else(|| Steal::Success(3)), Steal::Success(3));
    }

    #[test]
    fn test_into_option() {
        assert_eq!(Option::from(Steal::Success("job")), Some("job"));
        assert_eq!(Option::<u8>::from(Steal::Retry), None);
        assert!(Steal::<u8>::Empty.is_empty());
        assert!(Steal::<u8>::Retry.is_retry());
        assert!(Steal::Success(0).is_success());
    }
}
