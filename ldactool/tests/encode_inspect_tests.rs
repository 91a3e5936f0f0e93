#[cfg(test)]
mod tests {
    use ldactool::audio::{read_audio_from_bytes, write_wav_to_bytes};
    use ldactool::{encode_from_audio, encode_from_samples, inspect_stream};
    use libldac_bt::{ChannelMode, EncoderConfig, QualityMode};

    fn sine(sample_rate: u32, channels: usize, seconds: f32) -> Vec<f32> {
        let frames = (sample_rate as f32 * seconds) as usize;
        let mut samples = Vec::with_capacity(frames * channels);
        for i in 0..frames {
            let t = i as f32 / sample_rate as f32;
            let sample = (t * 440.0 * 2.0 * std::f32::consts::PI).sin() * 0.5;
            for _ in 0..channels {
                samples.push(sample);
            }
        }
        samples
    }

    #[test]
    fn test_wav_through_symphonia() {
        let samples = sine(48000, 2, 0.1);
        let wav = write_wav_to_bytes(&samples, 48000, 2).unwrap();

        let audio = read_audio_from_bytes(&wav).unwrap();
        assert_eq!(audio.sample_rate, 48000);
        assert_eq!(audio.channels, 2);
        assert_eq!(audio.samples.len(), samples.len());
        for (a, b) in samples.iter().zip(audio.samples.iter()) {
            assert!((a - b).abs() < 1e-3);
        }
    }

    #[test]
    fn test_encode_wav_then_inspect() {
        let samples = sine(44100, 2, 0.5);
        let wav = write_wav_to_bytes(&samples, 44100, 2).unwrap();

        let config = EncoderConfig::default().with_quality(QualityMode::High);
        let report = encode_from_audio(&wav, config, 1000).unwrap();

        // 22050 frames -> 172 full blocks + one padded
        assert_eq!(report.stats.frames, 173);
        assert_eq!(report.stream.len(), 173 * 333);
        assert_eq!(report.config.sampling_frequency, 44100);

        let info = inspect_stream(&report.stream).unwrap();
        assert_eq!(info.frames, 173);
        assert_eq!(info.sampling_frequency, 44100);
        assert_eq!(info.quality, "high");
        assert_eq!(info.channel_mode, "stereo");
        assert_eq!(info.bitrate, 909_562);
        assert!(info.consistent);
        assert!(info.truncated.is_none());
        assert_eq!(info.skipped_bytes, 0);
        assert_eq!(info.blake3.len(), 64);
    }

    #[test]
    fn test_unsupported_rate_is_rejected() {
        let samples = sine(22050, 2, 0.1);
        let err = encode_from_samples(&samples, 22050, 2, EncoderConfig::default(), 1024)
            .unwrap_err();
        assert!(format!("{:#}", err).contains("22050"));
    }

    #[test]
    fn test_mono_input_to_stereo_and_back() {
        let samples = sine(96000, 1, 0.05);

        let stereo = encode_from_samples(&samples, 96000, 1, EncoderConfig::default(), 512).unwrap();
        let mono = encode_from_samples(
            &samples,
            96000,
            1,
            EncoderConfig::default().with_channel_mode(ChannelMode::Mono),
            512,
        )
        .unwrap();

        // same block count, same frame size: only the channel count differs
        assert_eq!(stereo.stats.frames, mono.stats.frames);
        assert_eq!(stereo.stream.len(), mono.stream.len());
        assert_eq!(inspect_stream(&mono.stream).unwrap().channel_mode, "mono");
    }

    #[test]
    fn test_packets_follow_mtu() {
        let samples = sine(48000, 2, 0.05);
        // 2400 frames = 19 blocks
        let config = EncoderConfig::default().with_quality(QualityMode::Mobile);
        let report = encode_from_samples(&samples, 48000, 2, config, 100_000).unwrap();

        // 679 / 113 = 6 frames per packet: 18 frames in 3 packets + the padded tail
        assert_eq!(report.stats.frames, 19);
        assert_eq!(report.packets, 4);
    }

    #[test]
    fn test_inspect_flags_truncation_and_digest() {
        let samples = sine(48000, 2, 0.02);
        let report = encode_from_samples(&samples, 48000, 2, EncoderConfig::default(), 256).unwrap();

        let cut = &report.stream[..report.stream.len() - 10];
        let info = inspect_stream(cut).unwrap();
        assert_eq!(info.frames as u64, report.stats.frames - 1);
        assert!(info.truncated.is_some());

        let full = inspect_stream(&report.stream).unwrap();
        assert_ne!(full.blake3, info.blake3);
    }

    #[test]
    fn test_inspect_rejects_garbage() {
        assert!(inspect_stream(&[0u8; 64]).is_err());
    }
}
