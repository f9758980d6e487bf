//! Moments - the mood/context a question is meant for.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The closed set of moments a player can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Moment {
    DateNight,
    DeepTalk,
    ChillNight,
    RandomFun,
    /// Long drives; also accepted as `road-trip`.
    #[serde(alias = "road-trip")]
    TooManyHoursOnRoad,
    Birthday,
    WorkIcebreakers,
    Reflections,
}

impl Moment {
    /// Every moment, in selector order.
    pub const ALL: [Moment; 8] = [
        Moment::DateNight,
        Moment::DeepTalk,
        Moment::ChillNight,
        Moment::RandomFun,
        Moment::TooManyHoursOnRoad,
        Moment::Birthday,
        Moment::WorkIcebreakers,
        Moment::Reflections,
    ];

    /// Wire name used in catalog data and persisted state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Moment::DateNight => "date-night",
            Moment::DeepTalk => "deep-talk",
            Moment::ChillNight => "chill-night",
            Moment::RandomFun => "random-fun",
            Moment::TooManyHoursOnRoad => "too-many-hours-on-road",
            Moment::Birthday => "birthday",
            Moment::WorkIcebreakers => "work-icebreakers",
            Moment::Reflections => "reflections",
        }
    }

    /// Label shown in the moment selector.
    pub fn label(&self) -> &'static str {
        match self {
            Moment::DateNight => "Date night",
            Moment::DeepTalk => "Deep talk",
            Moment::ChillNight => "Chill night",
            Moment::RandomFun => "Random / fun",
            Moment::TooManyHoursOnRoad => "On the Road",
            Moment::Birthday => "Birthday",
            Moment::WorkIcebreakers => "Work Icebreakers",
            Moment::Reflections => "Reflections",
        }
    }
}

impl std::fmt::Display for Moment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known moment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown moment `{0}`")]
pub struct UnknownMoment(pub String);

impl FromStr for Moment {
    type Err = UnknownMoment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "road-trip" {
            return Ok(Moment::TooManyHoursOnRoad);
        }
        Moment::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownMoment(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip_through_from_str() {
        for moment in Moment::ALL {
            assert_eq!(moment.as_str().parse::<Moment>(), Ok(moment));
        }
    }

    #[test]
    fn test_road_trip_alias() {
        assert_eq!("road-trip".parse::<Moment>(), Ok(Moment::TooManyHoursOnRoad));
        assert_eq!(Moment::TooManyHoursOnRoad.to_string(), "too-many-hours-on-road");
    }

    #[test]
    fn test_unknown_moment() {
        let err = "brunch".parse::<Moment>().unwrap_err();
        assert_eq!(err, UnknownMoment("brunch".to_string()));
        assert_eq!(err.to_string(), "unknown moment `brunch`");
    }

    #[test]
    fn test_serde_uses_wire_names() {
        #[derive(Deserialize)]
        struct Row {
            moments: Vec<Moment>,
        }

        let row: Row = toml::from_str(r#"moments = ["work-icebreakers", "road-trip"]"#).unwrap();
        assert_eq!(row.moments, vec![Moment::WorkIcebreakers, Moment::TooManyHoursOnRoad]);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Moment::RandomFun.label(), "Random / fun");
        assert_eq!(Moment::TooManyHoursOnRoad.label(), "On the Road");
    }
}
