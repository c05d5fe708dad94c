//! Control → chart subscriptions.
//!
//! Each dashboard control is a named state cell. Each chart output lists
//! the cells it depends on and is rebuilt in full whenever one of them
//! changes.

/// The user-editable state cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Site,
    PayloadRange,
}

/// The chart outputs published to the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartSlot {
    SuccessPie,
    PayloadScatter,
}

/// Which controls each chart is subscribed to.
pub const SUBSCRIPTIONS: &[(ChartSlot, &[Control])] = &[
    (ChartSlot::SuccessPie, &[Control::Site]),
    (
        ChartSlot::PayloadScatter,
        &[Control::Site, Control::PayloadRange],
    ),
];

/// Charts that must be rebuilt after `control` changes, in publish order.
pub fn subscribers(control: Control) -> impl Iterator<Item = ChartSlot> {
    SUBSCRIPTIONS
        .iter()
        .filter(move |(_, inputs)| inputs.contains(&control))
        .map(|(slot, _)| *slot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_change_reaches_both_charts() {
        let slots: Vec<ChartSlot> = subscribers(Control::Site).collect();
        assert_eq!(slots, vec![ChartSlot::SuccessPie, ChartSlot::PayloadScatter]);
    }

    #[test]
    fn payload_change_reaches_only_scatter() {
        let slots: Vec<ChartSlot> = subscribers(Control::PayloadRange).collect();
        assert_eq!(slots, vec![ChartSlot::PayloadScatter]);
    }
}
