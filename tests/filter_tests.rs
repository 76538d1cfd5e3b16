//! Filter Tests
//!
//! Behavioral checks for the sample transforms: length preservation,
//! non-mutation and the exact per-sample arithmetic.

use audio_filters::{
    fade, fade_in, fade_out, left_to_right, remove_vocals, FilterError, Sample, Sound,
};
use pretty_assertions::assert_eq;
use test_case::test_case;

/// Helper to create a sound whose samples differ per index and channel
fn varied_sound(len: usize) -> Sound {
    Sound::from_pairs((0..len as i16).map(|i| (1000 + i * 37, -500 + i * 11)))
}

fn constant(len: usize, left: i16, right: i16) -> Sound {
    Sound::new(vec![Sample::new(left, right); len], 44100)
}

// === Length Preservation and Non-Mutation ===

#[test_case(1 ; "single sample")]
#[test_case(10 ; "short")]
#[test_case(257 ; "odd length")]
fn test_all_transforms_preserve_length_and_input(len: usize) {
    let sound = varied_sound(len);
    let snapshot = sound.clone();
    let n = (len / 2).max(1);

    let outputs = vec![
        remove_vocals(&sound),
        fade_in(&sound, n).unwrap(),
        fade_out(&sound, n).unwrap(),
        fade(&sound, n).unwrap(),
        left_to_right(&sound, n).unwrap(),
    ];

    for out in &outputs {
        assert_eq!(out.len(), len, "Sample count must be preserved");
        assert_eq!(out.sample_rate(), sound.sample_rate());
    }
    assert_eq!(sound, snapshot, "Input sound must not be mutated");
}

// === remove_vocals ===

#[test]
fn test_remove_vocals_reference_values() {
    let out = remove_vocals(&Sound::from_pairs([(100, 60), (50, 50)]));
    assert_eq!(out.get(0).unwrap(), Sample::new(20, 20));
    assert_eq!(out.get(1).unwrap(), Sample::new(0, 0));
}

#[test]
fn test_remove_vocals_cancels_centered_content() {
    let centered = constant(64, 12345, 12345);
    let out = remove_vocals(&centered);
    assert!(out.iter().all(|s| *s == Sample::new(0, 0)));
}

#[test]
fn test_remove_vocals_wider_samples() {
    let sound: Sound<i32> = Sound::from_pairs([(i32::MAX, i32::MIN), (7, -8)]);
    let out = remove_vocals(&sound);
    assert_eq!(out.get(0).unwrap(), Sample::mono(i32::MAX));
    assert_eq!(out.get(1).unwrap(), Sample::mono(7));
}

// === fade_in ===

#[test]
fn test_fade_in_reference_values() {
    let sound = constant(8, 100, 100);
    let out = fade_in(&sound, 4).unwrap();

    assert_eq!(out.get(0).unwrap(), Sample::new(0, 0));
    assert_eq!(out.get(2).unwrap(), Sample::new(50, 50));
    for i in 4..8 {
        assert_eq!(out.get(i).unwrap(), sound.get(i).unwrap());
    }
}

#[test]
fn test_fade_in_first_sample_silent_regardless_of_input() {
    let out = fade_in(&varied_sound(20), 5).unwrap();
    assert_eq!(out.get(0).unwrap(), Sample::new(0, 0));
}

#[test]
fn test_fade_in_never_reaches_full_amplitude() {
    let out = fade_in(&constant(10, 1000, 1000), 10).unwrap();
    // Last faded sample uses 9/10
    assert_eq!(out.get(9).unwrap(), Sample::new(900, 900));
}

// === fade_out ===

#[test]
fn test_fade_out_reference_values() {
    let sound = constant(10, 300, -300);
    let out = fade_out(&sound, 3).unwrap();

    // Iteration 0 lands on index 0 with factor 0
    assert_eq!(out.get(0).unwrap(), Sample::new(0, 0));

    let third = 1.0 / 3.0;
    let two_thirds = 2.0 / 3.0;
    assert_eq!(
        out.get(9).unwrap(),
        Sample::new((300.0 * third) as i16, (-300.0 * third) as i16)
    );
    assert_eq!(
        out.get(8).unwrap(),
        Sample::new((300.0 * two_thirds) as i16, (-300.0 * two_thirds) as i16)
    );

    for i in 1..8 {
        assert_eq!(out.get(i).unwrap(), sound.get(i).unwrap());
    }
}

#[test]
fn test_fade_out_full_length() {
    let out = fade_out(&constant(4, 100, 100), 4).unwrap();
    assert_eq!(out.left_channel(), vec![0, 75, 50, 25]);
}

// === fade ===

#[test_case(20, 1 ; "minimal fade")]
#[test_case(20, 5 ; "separate fades")]
#[test_case(20, 15 ; "overlapping fades")]
#[test_case(20, 20 ; "full length")]
fn test_fade_equals_fade_out_of_fade_in(len: usize, n: usize) {
    let sound = varied_sound(len);
    let expected = fade_out(&fade_in(&sound, n).unwrap(), n).unwrap();
    assert_eq!(fade(&sound, n).unwrap(), expected);
}

// === left_to_right ===

#[test]
fn test_left_to_right_reference_values() {
    let sound = constant(4, 400, 400);
    let out = left_to_right(&sound, 1).unwrap();

    assert_eq!(out.get(0).unwrap(), Sample::new(400, 0));
    assert_eq!(out.get(3).unwrap(), Sample::new(100, 300));
}

#[test]
fn test_left_to_right_ignores_pan_length() {
    let sound = varied_sound(50);
    assert_eq!(
        left_to_right(&sound, 1).unwrap(),
        left_to_right(&sound, 10_000).unwrap()
    );
}

// === Error Handling ===

#[test_case(0 ; "zero")]
#[test_case(11 ; "longer than sound")]
fn test_fade_length_out_of_range(n: usize) {
    let sound = varied_sound(10);
    for result in [fade_in(&sound, n), fade_out(&sound, n), fade(&sound, n)] {
        match result {
            Err(FilterError::InvalidFadeLength { fade_length, len }) => {
                assert_eq!(fade_length, n);
                assert_eq!(len, 10);
            }
            other => panic!("Expected InvalidFadeLength, got: {:?}", other),
        }
    }
}

#[test]
fn test_left_to_right_requires_samples() {
    let empty: Sound = Sound::silence(0, 44100);
    assert!(matches!(
        left_to_right(&empty, 1),
        Err(FilterError::EmptySound)
    ));
    assert_eq!(remove_vocals(&empty).len(), 0);
}
