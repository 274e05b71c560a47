//! Property tests for redraw-on-transition behavior

use adminboxx_core::{DisplayState, LivenessSupervisor, Render};
use proptest::prelude::*;

const TIMEOUT: u32 = 2_000;

#[derive(Debug, Clone, Copy)]
struct Tick {
    elapsed_ms: u32,
    command: bool,
    attached: bool,
}

fn tick() -> impl Strategy<Value = Tick> {
    (0u32..3_000, any::<bool>(), prop::bool::weighted(0.9)).prop_map(
        |(elapsed_ms, command, attached)| Tick {
            elapsed_ms,
            command,
            attached,
        },
    )
}

proptest! {
    #[test]
    fn redraw_only_on_signal_change(ticks in prop::collection::vec(tick(), 1..200)) {
        let mut sup = LivenessSupervisor::new(TIMEOUT, 0);
        let mut now = 0u32;
        prop_assert!(sup.update(true, now).is_some());

        for tick in ticks {
            now = now.wrapping_add(tick.elapsed_ms);
            if tick.command {
                sup.refresh_heartbeat(now);
            }

            let before = (sup.transport_present(), sup.peer_alive());
            let render = sup.update(tick.attached, now);
            let after = (sup.transport_present(), sup.peer_alive());

            prop_assert_eq!(render.is_some(), before != after);
            if let Some(render) = render {
                prop_assert_eq!(
                    render,
                    Render::Status(DisplayState::from_signals(after.0, after.1))
                );
            }
        }
    }

    #[test]
    fn silence_kills_peer_exactly_at_timeout(start in any::<u32>(), extra in 0u32..10_000) {
        let mut sup = LivenessSupervisor::new(TIMEOUT, start);
        sup.update(true, start);

        prop_assert_eq!(sup.update(true, start.wrapping_add(TIMEOUT - 1)), None);
        prop_assert_eq!(
            sup.update(true, start.wrapping_add(TIMEOUT + extra)),
            Some(Render::Status(DisplayState::PeerLost))
        );
    }
}
