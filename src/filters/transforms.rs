//! Sample transforms
//!
//! Each transform clones its input, rewrites the clone in a single pass and
//! returns it. The input sound is never mutated and the output always has
//! the same length. All scaling truncates toward zero.

use log::debug;

use crate::error::{FilterError, Result};
use crate::sound::{Amplitude, Sample, Sound};

fn check_fade_length<T: Amplitude>(sound: &Sound<T>, fade_length: usize) -> Result<()> {
    if fade_length == 0 || fade_length > sound.len() {
        return Err(FilterError::InvalidFadeLength {
            fade_length,
            len: sound.len(),
        });
    }
    Ok(())
}

/// Remove center-panned content by channel differencing
///
/// Each output sample carries `(left - right) / 2` (integer division) on
/// both channels. The difference is taken in `i64` so extreme values cannot
/// overflow.
pub fn remove_vocals<T: Amplitude>(sound: &Sound<T>) -> Sound<T> {
    let mut out = sound.clone();

    for sample in out.samples_mut() {
        let diff = (sample.left.as_i64() - sample.right.as_i64()) / 2;
        *sample = Sample::mono(T::from_i64(diff));
    }

    out
}

fn apply_fade_in<T: Amplitude>(samples: &mut [Sample<T>], fade_length: usize) {
    for (i, sample) in samples.iter_mut().take(fade_length).enumerate() {
        let factor = i as f64 / fade_length as f64;
        *sample = sample.scaled(factor);
    }
}

fn apply_fade_out<T: Amplitude>(samples: &mut [Sample<T>], fade_length: usize) {
    let len = samples.len();
    for i in 0..fade_length {
        let factor = i as f64 / fade_length as f64;
        // End-relative position -i: -0 lands on the first sample, -1 on the
        // last, -2 on the one before it.
        let index = if i == 0 { 0 } else { len - i };
        samples[index] = samples[index].scaled(factor);
    }
}

/// Linear fade-in over the first `fade_length` samples
///
/// Sample `i` is scaled by `i / fade_length`, so the first sample is silent
/// and the last faded sample stops one step short of full volume.
///
/// # Errors
/// * `InvalidFadeLength` - unless `1 <= fade_length <= sound.len()`
pub fn fade_in<T: Amplitude>(sound: &Sound<T>, fade_length: usize) -> Result<Sound<T>> {
    check_fade_length(sound, fade_length)?;

    let mut out = sound.clone();
    apply_fade_in(out.samples_mut(), fade_length);

    debug!("fade_in over {} of {} samples", fade_length, sound.len());
    Ok(out)
}

/// Linear fade-out over the last `fade_length` samples
///
/// Iteration `i` scales the sample at end-relative position `-i` by
/// `i / fade_length`. Position `-0` is the first sample, so iteration 0
/// silences sample 0 rather than the last sample; iterations `1..fade_length`
/// scale samples `len - 1` down to `len - fade_length + 1` by `1/n`, `2/n`,
/// and so on. The last sample is therefore the quietest of the tail.
///
/// # Errors
/// * `InvalidFadeLength` - unless `1 <= fade_length <= sound.len()`
pub fn fade_out<T: Amplitude>(sound: &Sound<T>, fade_length: usize) -> Result<Sound<T>> {
    check_fade_length(sound, fade_length)?;

    let mut out = sound.clone();
    apply_fade_out(out.samples_mut(), fade_length);

    debug!("fade_out over {} of {} samples", fade_length, sound.len());
    Ok(out)
}

/// Fade in, then fade out, on a single working copy
///
/// Equivalent to `fade_out(&fade_in(sound, n)?, n)`. Overlapping fades
/// (`2 * fade_length > len`) are allowed and simply compound.
///
/// # Errors
/// * `InvalidFadeLength` - unless `1 <= fade_length <= sound.len()`
pub fn fade<T: Amplitude>(sound: &Sound<T>, fade_length: usize) -> Result<Sound<T>> {
    check_fade_length(sound, fade_length)?;

    let mut out = sound.clone();
    apply_fade_in(out.samples_mut(), fade_length);
    apply_fade_out(out.samples_mut(), fade_length);

    debug!("fade over {} of {} samples", fade_length, sound.len());
    Ok(out)
}

/// Pan linearly from the left channel to the right across the whole sound
///
/// At sample `i` of `len`, the left channel is scaled by `(len - i) / len`
/// and the right channel by `i / len`. `pan_length` is accepted for
/// interface compatibility and has no effect.
///
/// # Errors
/// * `EmptySound` - if the sound has no samples
pub fn left_to_right<T: Amplitude>(sound: &Sound<T>, pan_length: usize) -> Result<Sound<T>> {
    if sound.is_empty() {
        return Err(FilterError::EmptySound);
    }

    let mut out = sound.clone();
    let len = out.len() as f64;

    for (i, sample) in out.samples_mut().iter_mut().enumerate() {
        let i = i as f64;
        sample.left = T::from_f64_trunc(sample.left.as_f64() * (len - i) / len);
        sample.right = T::from_f64_trunc(sample.right.as_f64() * (i / len));
    }

    debug!(
        "left_to_right over {} samples (pan_length {} ignored)",
        sound.len(),
        pan_length
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn constant(len: usize, value: i16) -> Sound<i16> {
        Sound::new(vec![Sample::mono(value); len], 44100)
    }

    #[test]
    fn test_remove_vocals_examples() {
        let sound = Sound::<i16>::from_pairs([(100, 60), (50, 50)]);
        let out = remove_vocals(&sound);
        assert_eq!(out.samples(), &[Sample::mono(20), Sample::mono(0)]);
    }

    #[test]
    fn test_remove_vocals_truncates_toward_zero() {
        let sound = Sound::<i16>::from_pairs([(-3, 0), (3, 0), (0, 5)]);
        let out = remove_vocals(&sound);
        assert_eq!(
            out.samples(),
            &[Sample::mono(-1), Sample::mono(1), Sample::mono(-2)]
        );
    }

    #[test]
    fn test_remove_vocals_extremes_do_not_overflow() {
        let sound = Sound::<i16>::from_pairs([(i16::MAX, i16::MIN), (i16::MIN, i16::MAX)]);
        let out = remove_vocals(&sound);
        assert_eq!(out.get(0).unwrap(), Sample::mono(32767));
        assert_eq!(out.get(1).unwrap(), Sample::mono(-32767));
    }

    #[test]
    fn test_fade_in_ramp() {
        let out = fade_in(&constant(6, 100), 4).unwrap();
        assert_eq!(
            out.left_channel(),
            vec![0, 25, 50, 75, 100, 100],
            "fade_in should ramp the first four samples"
        );
        assert_eq!(out.left_channel(), out.right_channel());
    }

    #[test]
    fn test_fade_in_full_length() {
        let out = fade_in(&constant(4, 100), 4).unwrap();
        assert_eq!(out.left_channel(), vec![0, 25, 50, 75]);
    }

    #[test]
    fn test_fade_out_tail_and_first_sample() {
        let out = fade_out(&constant(10, 100), 4).unwrap();
        assert_eq!(
            out.left_channel(),
            vec![0, 100, 100, 100, 100, 100, 100, 75, 50, 25]
        );
    }

    #[test]
    fn test_fade_out_length_one_only_touches_first_sample() {
        let out = fade_out(&constant(5, 100), 1).unwrap();
        assert_eq!(out.left_channel(), vec![0, 100, 100, 100, 100]);
    }

    #[test]
    fn test_fade_rejects_bad_lengths() {
        let sound = constant(5, 100);
        for result in [
            fade_in(&sound, 0),
            fade_in(&sound, 6),
            fade_out(&sound, 0),
            fade_out(&sound, 6),
            fade(&sound, 6),
        ] {
            match result {
                Err(FilterError::InvalidFadeLength { len, .. }) => assert_eq!(len, 5),
                other => panic!("Expected InvalidFadeLength, got: {:?}", other),
            }
        }
    }

    #[test]
    fn test_fade_on_empty_sound() {
        let empty = constant(0, 0);
        assert!(fade_in(&empty, 1).is_err());
        assert!(fade_out(&empty, 1).is_err());
    }

    #[test]
    fn test_left_to_right_four_samples() {
        let out = left_to_right(&constant(4, 100), 0).unwrap();
        assert_eq!(out.left_channel(), vec![100, 75, 50, 25]);
        assert_eq!(out.right_channel(), vec![0, 25, 50, 75]);
    }

    #[test]
    fn test_left_to_right_empty() {
        assert!(matches!(
            left_to_right(&constant(0, 0), 3),
            Err(FilterError::EmptySound)
        ));
    }

    #[test]
    fn test_negative_amplitudes_truncate_toward_zero() {
        let out = fade_in(&constant(4, -7), 4).unwrap();
        // -7 * 0.25 = -1.75, -7 * 0.5 = -3.5, -7 * 0.75 = -5.25
        assert_eq!(out.left_channel(), vec![0, -1, -3, -5]);
    }
}
