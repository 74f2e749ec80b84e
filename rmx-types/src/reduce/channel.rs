use crate::{ChannelAction, ChannelConfig};

/// What a reduced action asks of the runtime state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduced {
    /// Only the configuration changed.
    Config,
    /// The division index may have changed; the counter must be rewrapped.
    Division,
    /// The division counter must be zeroed.
    ResetCounter,
}

/// Apply a ChannelAction to a channel's configuration.
pub fn reduce_channel(action: &ChannelAction, cfg: &mut ChannelConfig) -> Reduced {
    match action {
        ChannelAction::SetMode(id) => {
            cfg.set_mode_id(*id);
        }
        ChannelAction::CycleMode => {
            cfg.set_mode(cfg.mode.cycle());
        }
        ChannelAction::CycleModeReverse => {
            cfg.set_mode(cfg.mode.cycle_reverse());
        }
        ChannelAction::SetProbability(p) => {
            cfg.set_probability(*p);
        }
        ChannelAction::SetDivisionIndex(idx) => {
            cfg.set_division_index(*idx);
            return Reduced::Division;
        }
        ChannelAction::SetClockSource(id) => {
            cfg.set_clock_source_id(*id);
        }
        ChannelAction::CycleClockSource => {
            cfg.set_clock_source(cfg.clock_source.cycle());
        }
        ChannelAction::AdjustParameter(delta) => {
            let division = cfg.mode.is_division();
            cfg.adjust_parameter(*delta);
            if division {
                return Reduced::Division;
            }
        }
        ChannelAction::Reset => return Reduced::ResetCounter,
    }
    Reduced::Config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChannelMode, ClockSource};

    #[test]
    fn set_mode_clamps() {
        let mut cfg = ChannelConfig::default();
        assert_eq!(reduce_channel(&ChannelAction::SetMode(4), &mut cfg), Reduced::Config);
        assert_eq!(cfg.mode, ChannelMode::PrevCopy);
        reduce_channel(&ChannelAction::SetMode(99), &mut cfg);
        assert_eq!(cfg.mode, ChannelMode::Off);
    }

    #[test]
    fn cycle_mode_both_ways() {
        let mut cfg = ChannelConfig::default();
        reduce_channel(&ChannelAction::CycleModeReverse, &mut cfg);
        assert_eq!(cfg.mode, ChannelMode::Off);
        reduce_channel(&ChannelAction::CycleMode, &mut cfg);
        assert_eq!(cfg.mode, ChannelMode::Trigger);
    }

    #[test]
    fn clock_source_actions() {
        let mut cfg = ChannelConfig::default();
        reduce_channel(&ChannelAction::SetClockSource(7), &mut cfg);
        assert_eq!(cfg.clock_source, ClockSource::Both);
        reduce_channel(&ChannelAction::CycleClockSource, &mut cfg);
        assert_eq!(cfg.clock_source, ClockSource::A);
    }

    #[test]
    fn division_changes_are_reported() {
        let mut cfg = ChannelConfig::default();
        assert_eq!(
            reduce_channel(&ChannelAction::SetDivisionIndex(30), &mut cfg),
            Reduced::Division
        );
        assert_eq!(cfg.division_index, 18);

        // Trigger mode: adjust touches probability only
        cfg.set_probability(10);
        assert_eq!(
            reduce_channel(&ChannelAction::AdjustParameter(-20), &mut cfg),
            Reduced::Config
        );
        assert_eq!(cfg.probability, 0);

        cfg.set_mode(ChannelMode::ClockDiv);
        assert_eq!(
            reduce_channel(&ChannelAction::AdjustParameter(-3), &mut cfg),
            Reduced::Division
        );
        assert_eq!(cfg.division_index, 15);
    }

    #[test]
    fn reset_leaves_config_alone() {
        let mut cfg = ChannelConfig::default();
        let before = cfg;
        assert_eq!(reduce_channel(&ChannelAction::Reset, &mut cfg), Reduced::ResetCounter);
        assert_eq!(cfg, before);
    }

    #[test]
    fn probability_clamps() {
        let mut cfg = ChannelConfig::default();
        reduce_channel(&ChannelAction::SetProbability(200), &mut cfg);
        assert_eq!(cfg.probability, 100);
    }
}
