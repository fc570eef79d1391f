//! Mixer — folds track buffers into a normalized stereo master.

use super::effects::EffectsProcessor;
use super::track::Track;
use super::MIX_NORMALIZE_TARGET;

/// Mix all tracks down to a stereo master pair.
///
/// Every track — muted or not — counts toward the output length; muted
/// tracks just contribute silence. Shorter tracks are zero-padded to the
/// longest, never truncated. The mono sum is normalized to
/// [`MIX_NORMALIZE_TARGET`], scaled by `master_volume`, and duplicated
/// into identical left/right channels (per-track pan is not consumed by
/// the mix path).
pub fn mix_down(
    tracks: &[Track],
    master_volume: f64,
    effects: &EffectsProcessor,
) -> (Vec<f64>, Vec<f64>) {
    let max_len = tracks.iter().map(|t| t.samples.len()).max().unwrap_or(0);
    if max_len == 0 {
        return (Vec::new(), Vec::new());
    }

    let mut mono = vec![0.0_f64; max_len];
    for track in tracks.iter().filter(|t| !t.muted) {
        for (acc, &s) in mono.iter_mut().zip(&track.samples) {
            *acc += s;
        }
    }

    let mono = effects.normalize(&mono, MIX_NORMALIZE_TARGET);
    let left: Vec<f64> = mono.iter().map(|&s| s * master_volume).collect();
    let right = left.clone();
    (left, right)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track_with(name: &str, samples: Vec<f64>) -> Track {
        let mut t = Track::new(name);
        t.samples = samples;
        t
    }

    #[test]
    fn empty_tracks_mix_to_empty() {
        let tracks = vec![Track::new("track_0"), Track::new("track_1")];
        let (l, r) = mix_down(&tracks, 1.0, &EffectsProcessor::new(44100.0));
        assert!(l.is_empty() && r.is_empty());
    }

    #[test]
    fn output_length_is_longest_track_even_if_muted() {
        let short = track_with("track_0", vec![1.0; 100]);
        let mut long = track_with("track_1", vec![1.0; 200]);
        long.muted = true;
        let (l, r) = mix_down(&[short, long], 1.0, &EffectsProcessor::new(44100.0));
        assert_eq!(l.len(), 200);
        assert_eq!(r.len(), 200);
    }

    #[test]
    fn muted_track_contributes_nothing() {
        let a = track_with("track_0", vec![0.5; 100]);
        let mut b = track_with("track_1", vec![0.5; 200]);
        b.muted = true;
        let (l, _) = mix_down(&[a, b], 1.0, &EffectsProcessor::new(44100.0));
        // Only track_0's padded contribution: constant head, silent tail
        assert!((l[0] - l[50]).abs() < 1e-12);
        assert!(l[..100].iter().all(|&s| s > 0.0));
        assert!(l[100..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn shorter_track_is_zero_padded() {
        let a = track_with("track_0", vec![0.2; 4]);
        let b = track_with("track_1", vec![0.2; 2]);
        let (l, _) = mix_down(&[a, b], 1.0, &EffectsProcessor::new(44100.0));
        assert_eq!(l.len(), 4);
        // First half sums both tracks, second half only track_0
        assert!((l[0] / l[3] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn normalized_to_target_peak() {
        let a = track_with("track_0", vec![0.1, 0.3, -0.2]);
        let (l, _) = mix_down(&[a], 1.0, &EffectsProcessor::new(44100.0));
        let peak = l.iter().fold(0.0_f64, |m, &s| m.max(s.abs()));
        assert!(
            (peak - MIX_NORMALIZE_TARGET).abs() < 1e-12,
            "peak should be {MIX_NORMALIZE_TARGET}, got {peak}"
        );
    }

    #[test]
    fn master_volume_scales_after_normalize() {
        let a = track_with("track_0", vec![0.5; 8]);
        let (half, _) = mix_down(&[a.clone()], 0.5, &EffectsProcessor::new(44100.0));
        let (full, _) = mix_down(&[a], 1.0, &EffectsProcessor::new(44100.0));
        for (h, f) in half.iter().zip(&full) {
            assert!((h * 2.0 - f).abs() < 1e-12);
        }
    }

    #[test]
    fn channels_are_identical() {
        let a = track_with("track_0", (0..64).map(|i| (i as f64 * 0.1).sin()).collect());
        let (l, r) = mix_down(&[a], 0.8, &EffectsProcessor::new(44100.0));
        assert_eq!(l, r);
    }

    #[test]
    fn all_muted_yields_silence_of_max_len() {
        let mut a = track_with("track_0", vec![0.5; 10]);
        a.muted = true;
        let (l, _) = mix_down(&[a], 1.0, &EffectsProcessor::new(44100.0));
        assert_eq!(l.len(), 10);
        assert!(l.iter().all(|&s| s == 0.0));
    }
}
