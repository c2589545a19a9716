//! End-to-end behavior: controllers, strips and sets working over the same buffers.
use light_show::colors::*;
use light_show::controller::{ControllerConfig, StripType};
use light_show::{LedPixels, MemoryController, Render, Rgb, Strip, StripSet};

use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn three_strips_as_one() {
    init_logging();

    let mut buffers = [3usize, 2, 4].map(|n| vec![0u8; n * 4]);
    let strips = buffers
        .iter_mut()
        .map(|b| Strip::from_bytes(b.as_mut_slice()).unwrap())
        .collect::<Vec<_>>();
    let set = StripSet::new(strips).unwrap();
    assert_eq!(set.len(), 9);

    // Global index 4 is the second pixel of the middle strip.
    set.set(4, Rgb::new(10, 20, 30)).unwrap();
    assert_eq!(set.locate(4).unwrap(), (1, 1));
    assert_eq!(set.strips()[1].get(1).unwrap(), Rgb::new(10, 20, 30));

    // Every other pixel from 2 to 6 touches all three strips.
    let sliced = set.slice(2, 7, 2).unwrap();
    assert_eq!(sliced.len(), 3);
    sliced.fill(GOLD);
    drop(sliced);
    drop(set);

    // Global 2 is strip 0 pixel 2, global 4 is strip 1 pixel 1, global 6 is strip 2 pixel 1.
    assert_eq!(&buffers[0][8..12], &[0, 215, 255, 0]);
    assert_eq!(&buffers[1][4..8], &[0, 215, 255, 0]);
    assert_eq!(&buffers[2][4..8], &[0, 215, 255, 0]);
    assert_eq!(&buffers[2][0..4], &[0, 0, 0, 0]);
}

#[test]
fn right_shift_keeps_order() {
    let mut buffer = vec![0u8; 5 * 4];
    let strip = Strip::from_bytes(&mut buffer[..]).unwrap();
    strip.paint([WHITE, PINK, SKY, AQUA, BROWN]);

    strip.right(2, RED);
    assert_eq!(strip.colors(), vec![RED, RED, WHITE, PINK, SKY]);
}

#[test]
fn controller_round_trip() {
    init_logging();

    let config = ControllerConfig::from_arrays(&[18, 13], &[3, 2], &[StripType::Grb, StripType::Rgb], 10)
        .unwrap();
    let controller = MemoryController::new(config).unwrap();

    {
        let all = controller.all().unwrap();
        all.paint([RED, GREEN, BLUE, WHITE, CYAN]);
        all.right(1, BLACK);
    }
    controller.render(true).unwrap();

    assert_eq!(
        controller.last_frame(0),
        Some(vec![0, 0, 0, 0, 255, 0, 255, 0, 0])
    );
    assert_eq!(
        controller.last_frame(1),
        Some(vec![0, 0, 255, 255, 255, 255])
    );

    controller.off().unwrap();
    assert_eq!(controller.last_frame(1), Some(vec![0; 6]));
    assert_eq!(controller.render_count(), 2);
}

#[test]
fn bad_configurations() {
    let err = ControllerConfig::from_arrays(&[18], &[3, 2], &[StripType::Grb], 10).unwrap_err();
    assert!(err.is_length_mismatch());

    let err = ControllerConfig::from_arrays(&[18], &[-1], &[StripType::Grb], 10).unwrap_err();
    assert!(err.is_controller());
}

#[derive(Clone, Debug)]
enum Shift {
    Left(usize),
    Right(usize),
}

fn shifts() -> impl Strategy<Value = Vec<Shift>> {
    prop::collection::vec(
        prop_oneof![
            (0usize..12).prop_map(Shift::Left),
            (0usize..12).prop_map(Shift::Right),
        ],
        1..8,
    )
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 300, ..Default::default() })]

    #[test]
    fn set_shifts_match_model(lengths in prop::collection::vec(0usize..4, 1..5), ops in shifts()) {
        let mut buffers = lengths.iter().map(|n| vec![0u8; n * 4]).collect::<Vec<_>>();
        let strips = buffers
            .iter_mut()
            .map(|b| Strip::from_bytes(b.as_mut_slice()).unwrap())
            .collect::<Vec<_>>();
        let set = StripSet::new(strips).unwrap();

        let mut model = (0..set.len())
            .map(|i| Rgb::new(i as u8 + 1, 0, 255 - i as u8))
            .collect::<Vec<_>>();
        set.paint(model.iter().copied());

        let fill = Rgb::new(1, 2, 3);
        for op in ops {
            match op {
                Shift::Left(n) => {
                    set.left(n, fill);
                    let n = n.min(model.len());
                    model.drain(..n);
                    model.extend(std::iter::repeat(fill).take(n));
                }
                Shift::Right(n) => {
                    set.right(n, fill);
                    let n = n.min(model.len());
                    model.truncate(model.len() - n);
                    model.splice(0..0, std::iter::repeat(fill).take(n));
                }
            }
            prop_assert_eq!(set.colors(), model.clone());
        }
    }
}
