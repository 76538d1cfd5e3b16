//! Filter command set
//!
//! [`FilterKind`] is the fixed menu of transforms; [`Filter`] pairs a kind
//! with its parameter and dispatches to the matching function in
//! [`transforms`](super::transforms).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FilterError, Result};
use crate::filters::transforms;
use crate::sound::{Amplitude, Sound};

/// The available transforms, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    RemoveVocals,
    FadeIn,
    FadeOut,
    Fade,
    LeftToRight,
}

impl FilterKind {
    /// All kinds in menu order
    pub const ALL: [FilterKind; 5] = [
        FilterKind::RemoveVocals,
        FilterKind::FadeIn,
        FilterKind::FadeOut,
        FilterKind::Fade,
        FilterKind::LeftToRight,
    ];

    /// Function name shown in menus and accepted on the command line
    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::RemoveVocals => "remove_vocals",
            FilterKind::FadeIn => "fade_in",
            FilterKind::FadeOut => "fade_out",
            FilterKind::Fade => "fade",
            FilterKind::LeftToRight => "left_to_right",
        }
    }

    /// 1-based menu number
    pub fn menu_number(&self) -> u32 {
        match self {
            FilterKind::RemoveVocals => 1,
            FilterKind::FadeIn => 2,
            FilterKind::FadeOut => 3,
            FilterKind::Fade => 4,
            FilterKind::LeftToRight => 5,
        }
    }

    /// Look up a kind by its menu number
    pub fn from_menu_number(number: u32) -> Option<FilterKind> {
        Self::ALL.into_iter().find(|k| k.menu_number() == number)
    }

    /// Name of the integer parameter this filter takes, if any
    pub fn param_name(&self) -> Option<&'static str> {
        match self {
            FilterKind::RemoveVocals => None,
            FilterKind::FadeIn | FilterKind::FadeOut | FilterKind::Fade => Some("fade_length"),
            FilterKind::LeftToRight => Some("pan_length"),
        }
    }

    /// True when the parameter counts samples and may not exceed the sound length
    pub fn param_bounded_by_length(&self) -> bool {
        matches!(
            self,
            FilterKind::FadeIn | FilterKind::FadeOut | FilterKind::Fade
        )
    }

    /// One-line description for `list`
    pub fn description(&self) -> &'static str {
        match self {
            FilterKind::RemoveVocals => "Cancel center-panned content by differencing the channels",
            FilterKind::FadeIn => "Linear fade-in over the first fade_length samples",
            FilterKind::FadeOut => "Linear fade-out over the last fade_length samples",
            FilterKind::Fade => "Fade in, then fade out, with the same fade_length",
            FilterKind::LeftToRight => "Pan from the left channel to the right over the whole sound",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = FilterError;

    /// Accepts the function name (`fade_in`, `fade-in`) or the menu number
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(number) = trimmed.parse::<u32>() {
            return Self::from_menu_number(number).ok_or_else(|| FilterError::UnknownFilter {
                name: trimmed.to_string(),
            });
        }

        let normalized = trimmed.to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|k| k.name() == normalized)
            .ok_or_else(|| FilterError::UnknownFilter {
                name: trimmed.to_string(),
            })
    }
}

/// A transform together with its parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "filter", rename_all = "snake_case")]
pub enum Filter {
    RemoveVocals,
    FadeIn { fade_length: usize },
    FadeOut { fade_length: usize },
    Fade { fade_length: usize },
    LeftToRight { pan_length: usize },
}

impl Filter {
    /// Build a filter from its kind and the user-supplied parameter
    ///
    /// Filters with a parameter require it to be a positive integer; the
    /// parameter of `remove_vocals` is ignored.
    pub fn new(kind: FilterKind, param: Option<i64>) -> Result<Self> {
        let Some(param_name) = kind.param_name() else {
            return Ok(Filter::RemoveVocals);
        };

        let value = param.ok_or(FilterError::MissingParameter {
            filter: kind.name(),
            param: param_name,
        })?;
        if value < 1 {
            return Err(FilterError::InvalidParameter {
                param: param_name,
                value,
            });
        }
        let value = usize::try_from(value).map_err(|_| FilterError::InvalidParameter {
            param: param_name,
            value,
        })?;

        Ok(match kind {
            FilterKind::RemoveVocals => Filter::RemoveVocals,
            FilterKind::FadeIn => Filter::FadeIn { fade_length: value },
            FilterKind::FadeOut => Filter::FadeOut { fade_length: value },
            FilterKind::Fade => Filter::Fade { fade_length: value },
            FilterKind::LeftToRight => Filter::LeftToRight { pan_length: value },
        })
    }

    /// The kind of this filter
    pub fn kind(&self) -> FilterKind {
        match self {
            Filter::RemoveVocals => FilterKind::RemoveVocals,
            Filter::FadeIn { .. } => FilterKind::FadeIn,
            Filter::FadeOut { .. } => FilterKind::FadeOut,
            Filter::Fade { .. } => FilterKind::Fade,
            Filter::LeftToRight { .. } => FilterKind::LeftToRight,
        }
    }

    /// The parameter value, if the filter takes one
    pub fn param(&self) -> Option<usize> {
        match *self {
            Filter::RemoveVocals => None,
            Filter::FadeIn { fade_length }
            | Filter::FadeOut { fade_length }
            | Filter::Fade { fade_length } => Some(fade_length),
            Filter::LeftToRight { pan_length } => Some(pan_length),
        }
    }

    /// Apply the filter to a sound, returning a new sound
    pub fn apply<T: Amplitude>(&self, sound: &Sound<T>) -> Result<Sound<T>> {
        match *self {
            Filter::RemoveVocals => Ok(transforms::remove_vocals(sound)),
            Filter::FadeIn { fade_length } => transforms::fade_in(sound, fade_length),
            Filter::FadeOut { fade_length } => transforms::fade_out(sound, fade_length),
            Filter::Fade { fade_length } => transforms::fade(sound, fade_length),
            Filter::LeftToRight { pan_length } => transforms::left_to_right(sound, pan_length),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind().param_name(), self.param()) {
            (Some(name), Some(value)) => write!(f, "{}({}={})", self.kind(), name, value),
            _ => write!(f, "{}", self.kind()),
        }
    }
}
