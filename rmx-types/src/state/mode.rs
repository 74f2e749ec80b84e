//! Channel behavior modes.

use serde::{Deserialize, Serialize};

/// How a channel reacts to admitted clock edges.
///
/// The `Prev*` modes read the output the preceding channel produced for the
/// same edge. Integer ids follow declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChannelMode {
    /// Coin toss on rising edge drives high, falling edge drives low.
    #[default]
    Trigger,
    /// Coin toss on rising edge toggles the output.
    Flip,
    /// Every Nth rising edge drives high, falling edge drives low.
    ClockDiv,
    /// Every Nth rising edge toggles the output.
    ClockDivFlip,
    /// Mirror the previous channel on both edges.
    PrevCopy,
    /// Invert the previous channel on both edges.
    PrevBernoulli,
    /// Invert the previous channel on rising edges only.
    PrevBernoulliFlip,
    /// Coin toss gated by the previous channel being high.
    PrevFollow,
    /// Coin-toss toggle gated by the previous channel being high.
    PrevFollowFlip,
    /// Clock division counting only edges where the previous channel is high.
    PrevClockDiv,
    /// Division toggle counting only edges where the previous channel is high.
    PrevClockDivFlip,
    /// Output held low; the chain value passes through untouched.
    Off,
}

impl ChannelMode {
    pub const ALL: [ChannelMode; 12] = [
        ChannelMode::Trigger,
        ChannelMode::Flip,
        ChannelMode::ClockDiv,
        ChannelMode::ClockDivFlip,
        ChannelMode::PrevCopy,
        ChannelMode::PrevBernoulli,
        ChannelMode::PrevBernoulliFlip,
        ChannelMode::PrevFollow,
        ChannelMode::PrevFollowFlip,
        ChannelMode::PrevClockDiv,
        ChannelMode::PrevClockDivFlip,
        ChannelMode::Off,
    ];

    /// Highest valid integer id.
    pub const MAX_ID: u8 = 11;

    pub fn id(&self) -> u8 {
        match self {
            ChannelMode::Trigger => 0,
            ChannelMode::Flip => 1,
            ChannelMode::ClockDiv => 2,
            ChannelMode::ClockDivFlip => 3,
            ChannelMode::PrevCopy => 4,
            ChannelMode::PrevBernoulli => 5,
            ChannelMode::PrevBernoulliFlip => 6,
            ChannelMode::PrevFollow => 7,
            ChannelMode::PrevFollowFlip => 8,
            ChannelMode::PrevClockDiv => 9,
            ChannelMode::PrevClockDivFlip => 10,
            ChannelMode::Off => 11,
        }
    }

    /// Out-of-range ids clamp to `Off`.
    pub fn from_id(id: u8) -> Self {
        Self::ALL[id.min(Self::MAX_ID) as usize]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ChannelMode::Trigger => "Trigger",
            ChannelMode::Flip => "Flip",
            ChannelMode::ClockDiv => "ClkDiv",
            ChannelMode::ClockDivFlip => "ClkDiv (f)",
            ChannelMode::PrevCopy => "Copy (p)",
            ChannelMode::PrevBernoulli => "Bernoul (p)",
            ChannelMode::PrevBernoulliFlip => "Bernoul (f/p)",
            ChannelMode::PrevFollow => "Follow (p)",
            ChannelMode::PrevFollowFlip => "Follow (f/p)",
            ChannelMode::PrevClockDiv => "ClkDiv (p)",
            ChannelMode::PrevClockDivFlip => "ClkDiv (f/p)",
            ChannelMode::Off => "Off",
        }
    }

    /// Compact symbol for the overview screen.
    pub fn short_name(&self) -> &'static str {
        match self {
            ChannelMode::Trigger => "T",
            ChannelMode::Flip => "F",
            ChannelMode::ClockDiv => "/",
            ChannelMode::ClockDivFlip => "/f",
            ChannelMode::PrevCopy => "=",
            ChannelMode::PrevBernoulli => "B",
            ChannelMode::PrevBernoulliFlip => "Bf",
            ChannelMode::PrevFollow => ">",
            ChannelMode::PrevFollowFlip => ">f",
            ChannelMode::PrevClockDiv => ">/",
            ChannelMode::PrevClockDivFlip => ">/f",
            ChannelMode::Off => "0",
        }
    }

    /// Parse a mode from a config string: display name, variant name, short
    /// symbol or integer id. Numeric ids clamp like [`ChannelMode::from_id`].
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(id) = s.parse::<i64>() {
            return Some(Self::from_id(id.clamp(0, u8::MAX as i64) as u8));
        }
        let norm: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match norm.as_str() {
            "trigger" => Some(ChannelMode::Trigger),
            "flip" => Some(ChannelMode::Flip),
            "clockdiv" | "clkdiv" => Some(ChannelMode::ClockDiv),
            "clockdivflip" | "clkdivf" => Some(ChannelMode::ClockDivFlip),
            "prevcopy" | "copyp" | "copy" => Some(ChannelMode::PrevCopy),
            "prevbernoulli" | "bernoulp" | "bernoulli" => Some(ChannelMode::PrevBernoulli),
            "prevbernoulliflip" | "bernoulfp" => Some(ChannelMode::PrevBernoulliFlip),
            "prevfollow" | "followp" | "follow" => Some(ChannelMode::PrevFollow),
            "prevfollowflip" | "followfp" => Some(ChannelMode::PrevFollowFlip),
            "prevclockdiv" | "clkdivp" => Some(ChannelMode::PrevClockDiv),
            "prevclockdivflip" | "clkdivfp" => Some(ChannelMode::PrevClockDivFlip),
            "off" => Some(ChannelMode::Off),
            _ => None,
        }
    }

    /// Modes whose parameter is a division index rather than a probability.
    pub fn is_division(&self) -> bool {
        matches!(
            self,
            ChannelMode::ClockDiv
                | ChannelMode::ClockDivFlip
                | ChannelMode::PrevClockDiv
                | ChannelMode::PrevClockDivFlip
        )
    }

    pub fn cycle(&self) -> Self {
        Self::ALL[(self.id() as usize + 1) % Self::ALL.len()]
    }

    pub fn cycle_reverse(&self) -> Self {
        Self::ALL[(self.id() as usize + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_declaration_order() {
        for (i, mode) in ChannelMode::ALL.iter().enumerate() {
            assert_eq!(mode.id() as usize, i);
            assert_eq!(ChannelMode::from_id(i as u8), *mode);
        }
    }

    #[test]
    fn from_id_clamps_to_off() {
        assert_eq!(ChannelMode::from_id(12), ChannelMode::Off);
        assert_eq!(ChannelMode::from_id(u8::MAX), ChannelMode::Off);
    }

    #[test]
    fn cycle_round_trip() {
        let mut mode = ChannelMode::PrevFollow;
        for _ in 0..ChannelMode::ALL.len() {
            mode = mode.cycle();
        }
        assert_eq!(mode, ChannelMode::PrevFollow);
        assert_eq!(ChannelMode::Off.cycle(), ChannelMode::Trigger);
        assert_eq!(ChannelMode::Trigger.cycle_reverse(), ChannelMode::Off);
    }

    #[test]
    fn division_family() {
        assert!(!ChannelMode::Off.is_division());
        assert!(ChannelMode::PrevClockDivFlip.is_division());
        assert_eq!(
            ChannelMode::ALL.iter().filter(|m| m.is_division()).count(),
            4
        );
    }

    #[test]
    fn parse_names() {
        assert_eq!(ChannelMode::parse("Trigger"), Some(ChannelMode::Trigger));
        assert_eq!(ChannelMode::parse("ClkDiv (f)"), Some(ChannelMode::ClockDivFlip));
        assert_eq!(ChannelMode::parse("PrevBernoulliFlip"), Some(ChannelMode::PrevBernoulliFlip));
        assert_eq!(ChannelMode::parse("Follow (f/p)"), Some(ChannelMode::PrevFollowFlip));
        assert_eq!(ChannelMode::parse("9"), Some(ChannelMode::PrevClockDiv));
        assert_eq!(ChannelMode::parse("12"), Some(ChannelMode::Off));
        assert_eq!(ChannelMode::parse("4000"), Some(ChannelMode::Off));
        assert_eq!(ChannelMode::parse("-3"), Some(ChannelMode::Trigger));
        assert_eq!(ChannelMode::parse("nope"), None);
    }

    #[test]
    fn every_display_name_parses_back() {
        for mode in ChannelMode::ALL {
            assert_eq!(ChannelMode::parse(mode.name()), Some(mode), "{}", mode.name());
        }
    }
}
