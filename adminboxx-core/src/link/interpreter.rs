//! Command interpretation
//!
//! Validates field ranges of a classified frame and decides what the
//! controller has to do about it. Only a fully valid command counts as
//! proof that the host is alive; anything rejected here leaves the
//! heartbeat alone, so a confused host cannot look healthy by sending
//! garbage.

use adminboxx_protocol::{Color, Coordinate, Frame, FramingError, RangeError};

/// Why a frame was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InvalidCommand {
    /// Buffer shape did not match any command
    Framing(FramingError),
    /// Known command with a field out of range
    Range(RangeError),
}

/// What to do about one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    /// Ping: refresh the heartbeat only
    RefreshHeartbeat(u32),
    /// Paint one cell and refresh the heartbeat
    SetPixel {
        coordinate: Coordinate,
        color: Color,
        at: u32,
    },
    /// Log and discard
    ReportInvalid(InvalidCommand),
}

impl Effect {
    /// Heartbeat timestamp carried by this effect, if it proves liveness
    pub fn heartbeat(&self) -> Option<u32> {
        match self {
            Effect::RefreshHeartbeat(at) | Effect::SetPixel { at, .. } => Some(*at),
            Effect::ReportInvalid(_) => None,
        }
    }

    /// Check if this effect rejects the command
    pub fn is_invalid(&self) -> bool {
        matches!(self, Effect::ReportInvalid(_))
    }
}

/// Turn a classified frame into an effect
pub fn interpret(frame: Frame, now_ms: u32) -> Effect {
    match frame {
        Frame::Ping => Effect::RefreshHeartbeat(now_ms),
        Frame::SetColor { led, r, g, b } => match validate_set_color(led, r, g, b) {
            Ok((coordinate, color)) => Effect::SetPixel {
                coordinate,
                color,
                at: now_ms,
            },
            Err(e) => Effect::ReportInvalid(InvalidCommand::Range(e)),
        },
        Frame::Malformed(e) => Effect::ReportInvalid(InvalidCommand::Framing(e)),
    }
}

fn validate_set_color(led: u8, r: u8, g: u8, b: u8) -> Result<(Coordinate, Color), RangeError> {
    let coordinate = Coordinate::from_led_index(led)?;
    let color = Color::new(r, g, b)?;
    Ok((coordinate, color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_refreshes_heartbeat_only() {
        let effect = interpret(Frame::Ping, 1234);
        assert_eq!(effect, Effect::RefreshHeartbeat(1234));
        assert_eq!(effect.heartbeat(), Some(1234));
    }

    #[test]
    fn test_set_color_last_cell() {
        let effect = interpret(
            Frame::SetColor {
                led: 31,
                r: 127,
                g: 127,
                b: 127,
            },
            50,
        );
        match effect {
            Effect::SetPixel {
                coordinate,
                color,
                at,
            } => {
                assert_eq!((coordinate.row(), coordinate.column()), (3, 7));
                assert_eq!(color.to_array(), [127, 127, 127]);
                assert_eq!(at, 50);
            }
            other => panic!("unexpected effect {:?}", other),
        }
        assert_eq!(effect.heartbeat(), Some(50));
    }

    #[test]
    fn test_led_out_of_range() {
        let effect = interpret(
            Frame::SetColor {
                led: 32,
                r: 0,
                g: 0,
                b: 0,
            },
            50,
        );
        assert_eq!(
            effect,
            Effect::ReportInvalid(InvalidCommand::Range(RangeError::LedIndex(32)))
        );
        assert_eq!(effect.heartbeat(), None);
    }

    #[test]
    fn test_channel_out_of_range() {
        let effect = interpret(
            Frame::SetColor {
                led: 0,
                r: 10,
                g: 128,
                b: 0,
            },
            50,
        );
        assert_eq!(
            effect,
            Effect::ReportInvalid(InvalidCommand::Range(RangeError::Channel(128)))
        );
        assert!(effect.is_invalid());
    }

    #[test]
    fn test_malformed_is_framing_error() {
        let effect = interpret(
            Frame::Malformed(FramingError::UnknownCommand(0x01)),
            50,
        );
        assert_eq!(
            effect,
            Effect::ReportInvalid(InvalidCommand::Framing(FramingError::UnknownCommand(0x01)))
        );
        assert_eq!(effect.heartbeat(), None);
    }
}
