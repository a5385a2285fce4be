//! Status-line classification
//!
//! liquidctl reports each measurement as a labeled line. The label vocabulary
//! recognized here is closed; anything else is dropped so newer utility
//! versions can add lines without breaking the model.

/// Classification of one status-line label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `"Fan N speed"` (rpm readback)
    FanSpeed(u8),
    /// `"Fan N duty"` (duty readback)
    FanDuty(u8),
    /// `"Pump speed"` (rpm readback)
    PumpSpeed,
    /// `"Pump duty"` (duty readback)
    PumpDuty,
    /// `"Liquid temperature"`
    LiquidTemp,
    /// Any label outside the recognized vocabulary
    Unrecognized,
}

impl LineKind {
    /// Classify a status-line label
    pub fn classify(label: &str) -> Self {
        let label = label.trim();

        if label.eq_ignore_ascii_case("Pump speed") {
            return Self::PumpSpeed;
        }
        if label.eq_ignore_ascii_case("Pump duty") {
            return Self::PumpDuty;
        }
        if label.eq_ignore_ascii_case("Liquid temperature") {
            return Self::LiquidTemp;
        }

        if let Some(rest) = label.strip_prefix("Fan ") {
            let mut parts = rest.splitn(2, ' ');
            if let (Some(number), Some(role)) = (parts.next(), parts.next()) {
                if let Ok(channel) = number.parse::<u8>() {
                    match role.trim() {
                        "speed" => return Self::FanSpeed(channel),
                        "duty" => return Self::FanDuty(channel),
                        _ => {}
                    }
                }
            }
        }

        Self::Unrecognized
    }

    /// The liquidctl write channel this line belongs to, if any
    pub fn channel(&self) -> Option<String> {
        match self {
            Self::FanSpeed(n) | Self::FanDuty(n) => Some(format!("fan{}", n)),
            Self::PumpSpeed | Self::PumpDuty => Some("pump".to_string()),
            _ => None,
        }
    }
}
