//! Property tests for the frame decoder

use adminboxx_protocol::{
    Color, Coordinate, Frame, FrameDecoder, FramingError, HostCommand, MAX_BUFFER_LEN, TERMINATOR,
};
use proptest::prelude::*;

/// A run of non-terminator bytes short enough to never hit the buffer cap
fn segment() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..TERMINATOR, 0..MAX_BUFFER_LEN)
}

proptest! {
    #[test]
    fn one_frame_per_terminator(segments in prop::collection::vec(segment(), 1..16)) {
        let mut decoder = FrameDecoder::new();

        for segment in &segments {
            for &byte in segment {
                prop_assert_eq!(decoder.feed(byte), None);
            }
            prop_assert_eq!(decoder.len(), segment.len());

            prop_assert!(decoder.feed(TERMINATOR).is_some());
            prop_assert!(decoder.is_empty());
        }
    }

    #[test]
    fn unknown_opcodes_are_malformed(opcode in 0u8..0x80, tail in prop::collection::vec(0u8..TERMINATOR, 0..8)) {
        let mut decoder = FrameDecoder::new();
        let mut bytes = vec![opcode];
        bytes.extend_from_slice(&tail);
        bytes.push(TERMINATOR);

        let frames: Vec<Frame> = decoder.decode(&bytes).collect();
        prop_assert_eq!(frames, vec![Frame::Malformed(FramingError::UnknownCommand(opcode))]);
    }

    #[test]
    fn encoded_set_color_decodes(led in 0u8..32, r in 0u8..=127, g in 0u8..=127, b in 0u8..=127) {
        let cmd = HostCommand::SetColor {
            coordinate: Coordinate::from_led_index(led).unwrap(),
            color: Color::new(r, g, b).unwrap(),
        };
        let bytes = cmd.encode_to_vec();

        // Encoded payloads never contain the terminator
        prop_assert!(!bytes[..bytes.len() - 1].contains(&TERMINATOR));

        let mut decoder = FrameDecoder::new();
        let frames: Vec<Frame> = decoder.decode(&bytes).collect();
        prop_assert_eq!(frames, vec![Frame::SetColor { led, r, g, b }]);
    }

    #[test]
    fn garbage_never_poisons_next_ping(garbage in segment()) {
        let mut decoder = FrameDecoder::new();
        let mut bytes = garbage.clone();
        bytes.push(TERMINATOR);
        bytes.extend_from_slice(&[0x80, TERMINATOR]);

        let frames: Vec<Frame> = decoder.decode(&bytes).collect();
        prop_assert_eq!(frames.len(), 2);
        prop_assert_eq!(frames[1], Frame::Ping);
    }
}

#[test]
fn keepalive_text_without_terminator_is_bounded() {
    // A host that keeps sending text with no terminator must not grow the buffer forever
    let mut decoder = FrameDecoder::new();
    let mut overflows = 0;
    for _ in 0..1000 {
        if let Some(frame) = decoder.feed(b'u') {
            assert_eq!(frame, Frame::Malformed(FramingError::Overflow));
            overflows += 1;
        }
        assert!(decoder.len() <= MAX_BUFFER_LEN);
    }
    assert!(overflows > 0);
}
