use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Named operations a modifier or sheet attribute answers.
    ///
    /// Callers query with `supports` before invoking; invoking an operation
    /// outside the set fails with
    /// [`StatsError::UnsupportedCapability`](super::StatsError::UnsupportedCapability).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u8 {
        const CONSUME                = 1 << 0;
        const REFUND                 = 1 << 1;
        const MODIFY_INCOMING_DAMAGE = 1 << 2;
        const ADD_ACTION             = 1 << 3;
        const PERIODIC_TICK          = 1 << 4;
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::Capabilities;

    #[test]
    fn display_lists_flag_names() {
        assert_eq!(Capabilities::CONSUME.to_string(), "CONSUME");
        assert_eq!(
            (Capabilities::CONSUME | Capabilities::REFUND).to_string(),
            "CONSUME | REFUND"
        );
    }
}
