//! Tagged outcome for calculations that may never finish

use serde::{Deserialize, Serialize};

/// Result of a calculation that can legitimately have no finite answer
///
/// `Unreachable` means the goal can never be met under the inputs (no savings
/// and no contributions). `Indefinite` means a drawdown never exhausts the
/// balance. Neither is an error, and neither is encoded as an infinite float.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum Outcome<T> {
    Finite(T),
    Unreachable,
    Indefinite,
}

impl<T> Outcome<T> {
    pub fn is_finite(&self) -> bool {
        matches!(self, Outcome::Finite(_))
    }

    /// The finite value, if any
    pub fn finite(self) -> Option<T> {
        match self {
            Outcome::Finite(v) => Some(v),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Finite(v) => Outcome::Finite(f(v)),
            Outcome::Unreachable => Outcome::Unreachable,
            Outcome::Indefinite => Outcome::Indefinite,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_preserves_sentinels() {
        let never: Outcome<f64> = Outcome::Unreachable;
        assert_eq!(never.map(|y| y.ceil() as u32), Outcome::Unreachable);

        let forever: Outcome<f64> = Outcome::Indefinite;
        assert_eq!(forever.map(|y| y * 12.0), Outcome::Indefinite);

        assert_eq!(Outcome::Finite(2.5).map(|y: f64| y.ceil() as u32), Outcome::Finite(3));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_string(&Outcome::Finite(17.5)).unwrap();
        assert_eq!(json, r#"{"outcome":"finite","value":17.5}"#);

        let json = serde_json::to_string(&Outcome::<f64>::Indefinite).unwrap();
        assert_eq!(json, r#"{"outcome":"indefinite"}"#);
    }
}
