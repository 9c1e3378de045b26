use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Result of one optional fan-out branch
///
/// A failed or timed-out branch is `Absent`; it never fails the aggregation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Present(T),
    Absent,
}

impl<T> Outcome<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Outcome::Present(value) => Some(value),
            Outcome::Absent => None,
        }
    }

    pub fn unwrap_or(self, default: T) -> T {
        self.into_option().unwrap_or(default)
    }
}

impl<T> Outcome<Option<T>> {
    pub fn flatten(self) -> Outcome<T> {
        match self {
            Outcome::Present(Some(value)) => Outcome::Present(value),
            _ => Outcome::Absent,
        }
    }
}

impl<T> From<Option<T>> for Outcome<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Outcome::Present(v),
            None => Outcome::Absent,
        }
    }
}

/// Run a branch under a time limit; running out of time reads as `Absent`
pub async fn bounded<T, F>(branch: &str, limit: Duration, future: F) -> Outcome<T>
where
    F: Future<Output = T>,
{
    match tokio::time::timeout(limit, future).await {
        Ok(value) => Outcome::Present(value),
        Err(_) => {
            warn!("{} timed out after {:?}", branch, limit);
            Outcome::Absent
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bounded_completes() {
        let outcome = bounded("fast", Duration::from_secs(1), async { 7 }).await;
        assert_eq!(outcome, Outcome::Present(7));
    }

    #[tokio::test]
    async fn test_bounded_times_out() {
        let outcome = bounded("slow", Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            7
        })
        .await;
        assert_eq!(outcome, Outcome::Absent);
    }

    #[test]
    fn test_flatten() {
        assert_eq!(Outcome::Present(Some(1)).flatten(), Outcome::Present(1));
        assert_eq!(Outcome::<Option<i32>>::Present(None).flatten(), Outcome::Absent);
        assert_eq!(Outcome::<Option<i32>>::Absent.flatten(), Outcome::Absent);
        assert_eq!(Outcome::from(None::<u8>), Outcome::Absent);
    }
}
