use std::fmt;
use std::str::FromStr;

use crate::foundation::error::ReelError;

/// The fixed set of animation tables a unit may ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnimationName {
    Atk,
    Dead,
    Dying,
    Idle,
    Jump,
    LimitAtk,
    MagicAtk,
    MagicStandby,
    Move,
    Standby,
    WinBefore,
    Win,
}

impl AnimationName {
    pub const ALL: [AnimationName; 12] = [
        Self::Atk,
        Self::Dead,
        Self::Dying,
        Self::Idle,
        Self::Jump,
        Self::LimitAtk,
        Self::MagicAtk,
        Self::MagicStandby,
        Self::Move,
        Self::Standby,
        Self::WinBefore,
        Self::Win,
    ];

    /// Name as it appears in table and video file names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Atk => "atk",
            Self::Dead => "dead",
            Self::Dying => "dying",
            Self::Idle => "idle",
            Self::Jump => "jump",
            Self::LimitAtk => "limit_atk",
            Self::MagicAtk => "magic_atk",
            Self::MagicStandby => "magic_standby",
            Self::Move => "move",
            Self::Standby => "standby",
            Self::WinBefore => "win_before",
            Self::Win => "win",
        }
    }
}

impl FromStr for AnimationName {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| ReelError::UnknownAnimation(s.to_string()))
    }
}

impl fmt::Display for AnimationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One timeline entry: which sprite to show and for how many ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationFrameRef {
    /// Position of the referenced sprite in the decode-ordered sprite collection.
    pub sprite_index: usize,
    /// Decoded and carried, but neither compositing nor expansion reads them.
    pub offset_x: i32,
    pub offset_y: i32,
    /// Number of output frames this entry expands to; always ≥ 1.
    pub duration: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Animation {
    pub name: AnimationName,
    pub frames: Vec<AnimationFrameRef>,
}

impl Animation {
    /// Total output frames after duration expansion.
    pub fn total_ticks(&self) -> u64 {
        self.frames.iter().map(|f| u64::from(f.duration)).sum()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/animation.rs"]
mod tests;
