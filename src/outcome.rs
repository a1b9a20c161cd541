use crate::scheduler::Quality;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The three answer buttons a reviewer is offered.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ReviewOutcome {
    Fail,
    Medium,
    Success,
}

impl ReviewOutcome {
    /// Calibration from buttons to the SM-2 quality scale.
    pub fn quality(self) -> Quality {
        match self {
            ReviewOutcome::Fail => Quality::clamped(2),
            ReviewOutcome::Medium => Quality::clamped(3),
            ReviewOutcome::Success => Quality::clamped(5),
        }
    }
}

pub fn map_outcome(outcome: ReviewOutcome) -> Quality {
    outcome.quality()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn mapping() {
        let qualities = ReviewOutcome::iter()
            .map(|o| map_outcome(o).value())
            .collect::<Vec<_>>();
        assert_eq!(qualities, [2, 3, 5]);
    }

    #[test]
    fn only_fail_is_a_failure() {
        assert!(ReviewOutcome::Fail.quality().is_failure());
        assert!(!ReviewOutcome::Medium.quality().is_failure());
        assert!(!ReviewOutcome::Success.quality().is_failure());
    }

    #[test]
    fn names() {
        assert_eq!(ReviewOutcome::Medium.to_string(), "medium");
        assert_eq!(
            "Success".parse::<ReviewOutcome>().unwrap(),
            ReviewOutcome::Success
        );
        assert!("easy".parse::<ReviewOutcome>().is_err());
        let name: &'static str = ReviewOutcome::Fail.into();
        assert_eq!(name, "fail");
    }
}
