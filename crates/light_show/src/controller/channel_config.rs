use crate::config::{DEFAULT_DMA, MAX_CHANNELS, TARGET_FREQUENCY};
use crate::error::Result;

use super::{ControllerError, StripType};

/// Configuration for one channel: a strip on its own pin.
#[derive(Clone, Debug, derive_builder::Builder)]
#[builder(pattern = "owned")]
pub struct ChannelConfig {
    /// The GPIO pin driving this channel.
    pub gpio: u8,

    /// Number of pixels on the strip.
    pub count: usize,

    #[builder(default)]
    pub strip_type: StripType,

    /// Global brightness applied on the way out, where 255 leaves pixels as they are.
    #[builder(default = "255")]
    pub brightness: u8,

    /// Invert every transmitted byte, for strips driven through an inverting level shifter.
    #[builder(default)]
    pub invert: bool,
}

/// Configuration for a whole controller.
#[derive(Clone, Debug, derive_builder::Builder)]
#[builder(pattern = "owned")]
pub struct ControllerConfig {
    #[builder(setter(custom), default)]
    pub channels: Vec<ChannelConfig>,

    #[builder(default = "DEFAULT_DMA")]
    pub dma: u32,

    /// Transmission frequency in Hz.
    #[builder(default = "TARGET_FREQUENCY")]
    pub frequency: u32,
}

impl ControllerConfigBuilder {
    pub fn add_channel(mut self, channel: ChannelConfig) -> Self {
        self.channels.get_or_insert_with(Vec::new).push(channel);
        self
    }
}

impl ControllerConfig {
    /// A controller driving one strip.
    pub fn single(gpio: u8, count: usize, strip_type: StripType) -> Self {
        ControllerConfig {
            channels: vec![ChannelConfig {
                gpio,
                count,
                strip_type,
                brightness: 255,
                invert: false,
            }],
            dma: DEFAULT_DMA,
            frequency: TARGET_FREQUENCY,
        }
    }

    /// Build a configuration from parallel per-channel arrays, as a scripting binding would pass them.
    ///
    /// Counts are signed because that is what such callers have; negative ones are rejected.
    pub fn from_arrays(
        gpio: &[u8],
        counts: &[i64],
        strip_types: &[StripType],
        dma: u32,
    ) -> Result<Self> {
        if gpio.len() != counts.len() || gpio.len() != strip_types.len() {
            return Err(ControllerError::LengthMismatch {
                gpio: gpio.len(),
                counts: counts.len(),
                types: strip_types.len(),
            }
            .into());
        }

        let config = ControllerConfig {
            channels: gpio
                .iter()
                .zip(counts.iter())
                .zip(strip_types.iter())
                .enumerate()
                .map(|(channel, ((gpio, count), strip_type))| -> Result<ChannelConfig> {
                    let count = usize::try_from(*count).map_err(|_| {
                        ControllerError::NegativeLength {
                            channel,
                            count: *count,
                        }
                    })?;
                    Ok(ChannelConfig {
                        gpio: *gpio,
                        count,
                        strip_type: *strip_type,
                        brightness: 255,
                        invert: false,
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            dma,
            frequency: TARGET_FREQUENCY,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check the parts of the configuration the builders can't.
    pub fn validate(&self) -> Result<()> {
        if self.channels.len() > MAX_CHANNELS {
            return Err(ControllerError::TooManyChannels {
                requested: self.channels.len(),
                max: MAX_CHANNELS,
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let config = ControllerConfigBuilder::default()
            .add_channel(
                ChannelConfigBuilder::default()
                    .gpio(18)
                    .count(30)
                    .build()
                    .unwrap(),
            )
            .dma(5)
            .build()
            .unwrap();

        assert_eq!(config.channels.len(), 1);
        assert_eq!(config.dma, 5);
        assert_eq!(config.frequency, TARGET_FREQUENCY);
        assert_eq!(config.channels[0].strip_type, StripType::Grb);
        assert_eq!(config.channels[0].brightness, 255);
        assert!(!config.channels[0].invert);

        assert!(ChannelConfigBuilder::default().gpio(18).build().is_err());
    }

    #[test]
    fn test_from_arrays() {
        let types = [StripType::Grb, StripType::Rgbw];
        let config = ControllerConfig::from_arrays(&[18, 13], &[10, 20], &types, 10).unwrap();
        assert_eq!(config.channels[1].count, 20);
        assert_eq!(config.channels[1].strip_type, StripType::Rgbw);

        let err = ControllerConfig::from_arrays(&[18, 13], &[10], &types[..1], 10).unwrap_err();
        assert!(err.is_length_mismatch());

        let err = ControllerConfig::from_arrays(&[18], &[-1], &types[..1], 10).unwrap_err();
        assert!(err.is_controller());
        assert!(err.to_string().contains("negative"));

        let err = ControllerConfig::from_arrays(
            &[18, 13, 12],
            &[1, 1, 1],
            &[StripType::Grb; 3],
            10,
        )
        .unwrap_err();
        assert!(err.to_string().contains("at most 2"));
    }
}
