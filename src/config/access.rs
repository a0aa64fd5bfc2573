//! Door access and member display settings

use serde::Deserialize;

use crate::domain::foundation::GymClock;

use super::error::ValidationError;

pub const MIN_QR_SIZE_PX: u32 = 64;
pub const MAX_QR_SIZE_PX: u32 = 2048;

#[derive(Debug, Clone, Deserialize)]
pub struct AccessConfig {
    /// Offset of the gym's local time from UTC. Decides what "today" is for
    /// membership expiry.
    #[serde(default)]
    pub utc_offset_minutes: i32,

    /// Minimum side of the rendered QR image
    #[serde(default = "default_qr_size")]
    pub qr_size_px: u32,

    /// Active memberships ending within this many days are flagged
    #[serde(default = "default_expiring_soon_days")]
    pub expiring_soon_days: u32,
}

impl AccessConfig {
    /// The gym's calendar.
    pub fn clock(&self) -> Result<GymClock, ValidationError> {
        GymClock::with_offset_minutes(self.utc_offset_minutes)
            .map_err(|_| ValidationError::InvalidUtcOffset(self.utc_offset_minutes))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.clock()?;
        if !(MIN_QR_SIZE_PX..=MAX_QR_SIZE_PX).contains(&self.qr_size_px) {
            return Err(ValidationError::InvalidQrSize {
                min: MIN_QR_SIZE_PX,
                max: MAX_QR_SIZE_PX,
            });
        }
        Ok(())
    }
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            qr_size_px: default_qr_size(),
            expiring_soon_days: default_expiring_soon_days(),
        }
    }
}

fn default_qr_size() -> u32 {
    320
}

fn default_expiring_soon_days() -> u32 {
    7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_defaults() {
        let config = AccessConfig::default();
        assert_eq!(config.qr_size_px, 320);
        assert_eq!(config.expiring_soon_days, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_offset_out_of_range() {
        let config = AccessConfig {
            utc_offset_minutes: 24 * 60,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidUtcOffset(24 * 60))
        );
    }

    #[test]
    fn test_qr_size_bounds() {
        let config = AccessConfig {
            qr_size_px: 8,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
