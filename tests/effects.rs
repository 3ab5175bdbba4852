mod tests {
    use embassy_time::{Duration, Instant};
    use led_segment_engine::{
        EffectId, EffectSlot, PixelBuffer, Segment, SegmentBounds, SegmentId,
        color::{BLACK, Palette, Rgb, wheel},
        effect::{
            EffectParams, FLICKER_TICKS, LEVEL_STEP, MAX_LEVEL, MIN_LEVEL, ONE_SHOT_FRAMES,
            SoundPhase, StrikePhase, TiltRainbowEffect,
        },
        sensor::Accel,
    };

    const RED: Rgb = Rgb::new(255, 0, 0);
    const GREEN: Rgb = Rgb::new(0, 255, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);
    const WHITE: Rgb = Rgb::new(255, 255, 255);

    fn setup(len: u16, start: u16, end: u16) -> (PixelBuffer<32>, Segment<32>) {
        let buffer = PixelBuffer::new(len).unwrap();
        let bounds = SegmentBounds::new(start, end, len).unwrap();
        let segment = Segment::new(SegmentId::new(1), "test", bounds, 7).unwrap();
        (buffer, segment)
    }

    fn lit(buffer: &PixelBuffer<32>) -> Vec<usize> {
        buffer
            .live()
            .iter()
            .enumerate()
            .filter(|(_, color)| **color != BLACK)
            .map(|(index, _)| index)
            .collect()
    }

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn test_update_at_start_time_is_safe() {
        for id in EffectId::ALL {
            let (mut buffer, mut segment) = setup(6, 0, 5);
            segment.start_effect(id, &EffectParams::default(), at(0), &mut buffer);
            segment.update(at(0), &mut buffer);
        }
    }

    #[test]
    fn test_wipe_fills_and_stops() {
        let (mut buffer, mut segment) = setup(10, 0, 9);
        let params = EffectParams::new()
            .with_color(RED)
            .with_interval(Duration::from_millis(10));
        segment.start_effect(EffectId::Wipe, &params, at(0), &mut buffer);

        // Same timestamp: gate not yet open
        segment.update(at(0), &mut buffer);
        assert!(lit(&buffer).is_empty());

        for tick in 1..=10 {
            assert!(!segment.is_idle());
            segment.update(at(tick * 10), &mut buffer);
        }
        assert!(segment.is_idle());
        assert!(buffer.live().iter().all(|color| *color == RED));

        segment.update(at(110), &mut buffer);
        assert!(segment.is_idle());
        assert!(buffer.live().iter().all(|color| *color == RED));
    }

    #[test]
    fn test_wipe_skips_ticks_before_interval() {
        let (mut buffer, mut segment) = setup(10, 0, 9);
        let params = EffectParams::new()
            .with_color(RED)
            .with_interval(Duration::from_millis(10));
        segment.start_effect(EffectId::Wipe, &params, at(0), &mut buffer);

        segment.update(at(10), &mut buffer);
        segment.update(at(15), &mut buffer);
        assert_eq!(lit(&buffer), vec![0]);
        segment.update(at(20), &mut buffer);
        assert_eq!(lit(&buffer), vec![0, 1]);
    }

    #[test]
    fn test_looping_wipe_clears_each_pass() {
        let (mut buffer, mut segment) = setup(3, 0, 2);
        let params = EffectParams::new()
            .with_color(RED)
            .with_interval(Duration::from_millis(10))
            .with_looping(true);
        segment.start_effect(EffectId::Wipe, &params, at(0), &mut buffer);

        for tick in 1..=3 {
            segment.update(at(tick * 10), &mut buffer);
        }
        assert_eq!(lit(&buffer), vec![0, 1, 2]);
        segment.update(at(40), &mut buffer);
        assert_eq!(lit(&buffer), vec![0]);
        assert!(!segment.is_idle());
    }

    #[test]
    fn test_theater_chase_pattern() {
        let (mut buffer, mut segment) = setup(5, 0, 4);
        let params = EffectParams::new()
            .with_color(BLUE)
            .with_interval(Duration::from_millis(50))
            .with_size(3)
            .with_looping(true);
        segment.start_effect(EffectId::TheaterChase, &params, at(0), &mut buffer);

        segment.update(at(50), &mut buffer);
        assert_eq!(lit(&buffer), vec![0, 3]);
        assert_eq!(buffer.get(0), Some(BLUE));
        segment.update(at(100), &mut buffer);
        assert_eq!(lit(&buffer), vec![1, 4]);
        segment.update(at(150), &mut buffer);
        assert_eq!(lit(&buffer), vec![2]);
        segment.update(at(200), &mut buffer);
        assert_eq!(lit(&buffer), vec![0, 3]);
    }

    #[test]
    fn test_jump_bounces_when_looping() {
        let (mut buffer, mut segment) = setup(6, 0, 5);
        let params = EffectParams::new()
            .with_color(GREEN)
            .with_interval(Duration::from_millis(10))
            .with_size(2)
            .with_looping(true);
        segment.start_effect(EffectId::Jump, &params, at(0), &mut buffer);

        let mut frames = Vec::new();
        for tick in 1..=6 {
            segment.update(at(tick * 10), &mut buffer);
            frames.push(lit(&buffer));
        }
        assert_eq!(
            frames,
            vec![
                vec![0, 1],
                vec![2, 3],
                vec![4, 5],
                vec![2, 3],
                vec![0, 1],
                vec![2, 3]
            ]
        );
    }

    #[test]
    fn test_jump_stops_at_end() {
        let (mut buffer, mut segment) = setup(6, 0, 5);
        let params = EffectParams::new()
            .with_interval(Duration::from_millis(10))
            .with_size(3);
        segment.start_effect(EffectId::Jump, &params, at(0), &mut buffer);

        segment.update(at(10), &mut buffer);
        assert!(!segment.is_idle());
        segment.update(at(20), &mut buffer);
        assert!(segment.is_idle());
        assert_eq!(lit(&buffer), vec![3, 4, 5]);
    }

    #[test]
    fn test_flash_ends_dark() {
        let (mut buffer, mut segment) = setup(4, 0, 3);
        let params = EffectParams::new()
            .with_color(WHITE)
            .with_interval(Duration::from_millis(10));
        segment.start_effect(EffectId::Flash, &params, at(0), &mut buffer);

        for tick in 1..6 {
            segment.update(at(tick * 10), &mut buffer);
            assert!(!segment.is_idle());
        }
        segment.update(at(60), &mut buffer);
        assert!(segment.is_idle());
        assert!(lit(&buffer).is_empty());
    }

    #[test]
    fn test_fire_on_single_pixel() {
        let (mut buffer, mut segment) = setup(4, 2, 2);
        let params = EffectParams::new().with_looping(true).with_fire(255, 255);
        segment.start_effect(EffectId::Fire, &params, at(0), &mut buffer);

        for tick in 1..=200 {
            segment.update(at(tick * 15), &mut buffer);
        }
        match segment.effect() {
            EffectSlot::Fire(fire) => assert_eq!(fire.heat().len(), 1),
            other => panic!("unexpected slot {other:?}"),
        }
        assert_eq!(buffer.get(0), Some(BLACK));
        assert_eq!(buffer.get(1), Some(BLACK));
        assert_eq!(buffer.get(3), Some(BLACK));
    }

    #[test]
    fn test_fire_heat_sized_to_segment() {
        let (mut buffer, mut segment) = setup(20, 5, 14);
        let params = EffectParams::new().with_looping(true);
        segment.start_effect(EffectId::ColoredFire, &params, at(0), &mut buffer);

        for tick in 1..=100 {
            segment.update(at(tick * 15), &mut buffer);
        }
        match segment.effect() {
            EffectSlot::ColoredFire(fire) => assert_eq!(fire.heat().len(), 10),
            other => panic!("unexpected slot {other:?}"),
        }
        assert!(lit(&buffer).iter().all(|index| (5..=14).contains(index)));
    }

    #[test]
    fn test_one_shot_fire_stops() {
        let (mut buffer, mut segment) = setup(8, 0, 7);
        segment.start_effect(EffectId::Fire, &EffectParams::default(), at(0), &mut buffer);

        for tick in 1..u64::from(ONE_SHOT_FRAMES) {
            segment.update(at(tick * 15), &mut buffer);
        }
        assert!(!segment.is_idle());
        segment.update(at(u64::from(ONE_SHOT_FRAMES) * 15), &mut buffer);
        assert!(segment.is_idle());
    }

    #[test]
    fn test_fire_is_deterministic() {
        let run = || {
            let (mut buffer, mut segment) = setup(12, 0, 11);
            let params = EffectParams::new().with_looping(true);
            segment.start_effect(EffectId::Fire, &params, at(0), &mut buffer);
            for tick in 1..=40 {
                segment.update(at(tick * 15), &mut buffer);
            }
            buffer.live().to_vec()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_breathe_completes_one_cycle() {
        let (mut buffer, mut segment) = setup(3, 0, 2);
        let params = EffectParams::new()
            .with_color(WHITE)
            .with_interval(Duration::from_millis(10));
        segment.start_effect(EffectId::Breathe, &params, at(0), &mut buffer);

        // One rise and one fall
        let ticks = 2 * u64::from((MAX_LEVEL - MIN_LEVEL) / LEVEL_STEP);
        for tick in 1..ticks {
            segment.update(at(tick * 10), &mut buffer);
            assert!(!segment.is_idle());
        }
        segment.update(at(ticks * 10), &mut buffer);
        assert!(segment.is_idle());
        assert_eq!(buffer.get(0), Some(Rgb::new(MIN_LEVEL, MIN_LEVEL, MIN_LEVEL)));
    }

    #[test]
    fn test_falling_star_trail() {
        let (mut buffer, mut segment) = setup(8, 0, 7);
        let params = EffectParams::new()
            .with_color(WHITE)
            .with_interval(Duration::from_millis(10))
            .with_size(3);
        segment.start_effect(EffectId::FallingStar, &params, at(0), &mut buffer);

        for tick in 1..=4 {
            segment.update(at(tick * 10), &mut buffer);
        }
        assert_eq!(lit(&buffer), vec![1, 2, 3]);
        let head = buffer.get(3).unwrap();
        let tail = buffer.get(1).unwrap();
        assert_eq!(head, WHITE);
        assert!(tail.r < head.r);
    }

    #[test]
    fn test_bounce_stays_in_range_under_extreme_accel() {
        let (mut buffer, mut segment) = setup(12, 3, 8);
        let params = EffectParams::new().with_looping(true);
        segment.start_effect(EffectId::BounceAccel, &params, at(0), &mut buffer);

        let readings = [
            Accel::new(f32::INFINITY, f32::NAN, -1.0e9),
            Accel::new(1.0e30, 0.0, 0.0),
            Accel::new(f32::NAN, f32::NAN, f32::NAN),
            Accel::new(0.0, -16.0, 3.0),
        ];
        let mut now = 0;
        for reading in readings {
            segment.feed_accel(reading);
            for _ in 0..50 {
                now += 10;
                segment.update(at(now), &mut buffer);
                let painted = lit(&buffer);
                assert!(painted.len() <= 1);
                assert!(painted.iter().all(|index| (3..=8).contains(index)));
            }
        }
    }

    #[test]
    fn test_bounce_uses_dominant_axis_color() {
        let (mut buffer, mut segment) = setup(10, 0, 9);
        segment.feed_accel(Accel::new(0.1, 0.0, -2.0));
        segment.start_effect(EffectId::BounceAccel, &EffectParams::default(), at(0), &mut buffer);

        segment.update(at(50), &mut buffer);
        assert_eq!(buffer.get(0), Some(BLUE));
    }

    #[test]
    fn test_lightning_phases_and_timing() {
        let (mut buffer, mut segment) = setup(5, 0, 4);
        let params = EffectParams::new().with_color(WHITE);
        segment.start_effect(EffectId::LightningStrike, &params, at(0), &mut buffer);

        let mut phases = Vec::new();
        let mut idle_at = None;
        for now in (10..=1200).step_by(10) {
            segment.update(at(now), &mut buffer);
            match segment.effect() {
                EffectSlot::LightningStrike(strike) => {
                    if phases.last() != Some(&strike.phase()) {
                        phases.push(strike.phase());
                    }
                }
                EffectSlot::Idle => {
                    idle_at = Some(now);
                    break;
                }
                other => panic!("unexpected slot {other:?}"),
            }
        }

        assert_eq!(
            phases,
            vec![StrikePhase::Sweep, StrikePhase::Flash, StrikePhase::Cooldown]
        );
        // (len + 1) * speed + flash + cooldown
        assert_eq!(idle_at, Some(6 * 50 + 100 + 500));
        assert_eq!(buffer.get(0), Some(Rgb::new(50, 50, 50)));
    }

    #[test]
    fn test_sound_lightning_waits_for_threshold() {
        let (mut buffer, mut segment) = setup(3, 0, 2);
        segment.feed_sound(20);
        segment.start_effect(
            EffectId::SoundLightning,
            &EffectParams::default(),
            at(0),
            &mut buffer,
        );

        for now in (0..200).step_by(5) {
            segment.update(at(now), &mut buffer);
        }
        match segment.effect() {
            EffectSlot::SoundLightning(strike) => assert_eq!(strike.phase(), SoundPhase::Armed),
            other => panic!("unexpected slot {other:?}"),
        }
        assert!(lit(&buffer).is_empty());
    }

    #[test]
    fn test_sound_lightning_strike_sequence() {
        let (mut buffer, mut segment) = setup(3, 0, 2);
        segment.feed_sound(137);
        segment.start_effect(
            EffectId::SoundLightning,
            &EffectParams::default(),
            at(0),
            &mut buffer,
        );

        segment.update(at(0), &mut buffer);
        match segment.effect() {
            EffectSlot::SoundLightning(strike) => {
                assert_eq!(strike.phase(), SoundPhase::Grow);
                assert_eq!(strike.strike_brightness(), 152);
                assert_eq!(strike.strike_flash(), Duration::from_millis(74));
            }
            other => panic!("unexpected slot {other:?}"),
        }
    }

    #[test]
    fn test_sound_lightning_completes() {
        let (mut buffer, mut segment) = setup(3, 0, 2);
        segment.feed_sound(255);
        segment.start_effect(
            EffectId::SoundLightning,
            &EffectParams::default(),
            at(0),
            &mut buffer,
        );

        let mut phases = Vec::new();
        let mut idle_at = None;
        for now in (0..=1000).step_by(5) {
            segment.update(at(now), &mut buffer);
            match segment.effect() {
                EffectSlot::SoundLightning(strike) => {
                    if phases.last() != Some(&strike.phase()) {
                        phases.push(strike.phase());
                    }
                }
                EffectSlot::Idle => {
                    idle_at = Some(now);
                    break;
                }
                other => panic!("unexpected slot {other:?}"),
            }
        }

        assert_eq!(
            phases,
            vec![
                SoundPhase::Grow,
                SoundPhase::Flicker,
                SoundPhase::Flash,
                SoundPhase::Cooldown
            ]
        );
        // Grow 3 * 50, flicker 4 * 25, flash tick 25, flash hold 100, cooldown 500
        assert_eq!(idle_at, Some(875));
        assert!(lit(&buffer).is_empty());
    }

    #[test]
    fn test_sound_lightning_shows_every_flicker_frame() {
        let (mut buffer, mut segment) = setup(3, 0, 2);
        segment.feed_sound(255);
        segment.start_effect(
            EffectId::SoundLightning,
            &EffectParams::default(),
            at(0),
            &mut buffer,
        );

        let phase = |segment: &Segment<32>| match segment.effect() {
            EffectSlot::SoundLightning(strike) => Some(strike.phase()),
            _ => None,
        };

        let mut flicker_frames = 0;
        let mut flash_painted = false;
        for now in (5..=500).step_by(5) {
            let before = phase(&segment);
            segment.update(at(now), &mut buffer);
            if segment.last_update() != at(now) {
                continue;
            }
            let after = phase(&segment);
            if before == Some(SoundPhase::Flicker) && after == Some(SoundPhase::Flicker) {
                flicker_frames += 1;
            }
            if before == Some(SoundPhase::Flicker) && after == Some(SoundPhase::Flash) {
                flash_painted = true;
                assert_eq!(lit(&buffer), vec![0, 1, 2]);
            }
        }

        assert_eq!(flicker_frames, usize::from(FLICKER_TICKS));
        assert!(flash_painted);
    }

    #[test]
    fn test_intensity_meter_bars() {
        let (mut buffer, mut segment) = setup(8, 0, 7);
        let palette = Palette::new(&[RED, GREEN, BLUE, WHITE]).unwrap();
        let params = EffectParams::new().with_palette(palette);
        segment.feed_sound(128);
        segment.start_effect(EffectId::IntensityMeter, &params, at(0), &mut buffer);

        segment.update(at(20), &mut buffer);
        assert_eq!(lit(&buffer), vec![0, 1, 2, 3]);
        assert_eq!(buffer.get(1), Some(RED));
        assert_eq!(buffer.get(2), Some(GREEN));

        segment.feed_sound(255);
        segment.update(at(40), &mut buffer);
        assert_eq!(buffer.get(7), Some(WHITE));
        assert!(!segment.is_idle());
    }

    #[test]
    fn test_intensity_meter_empty_palette() {
        let (mut buffer, mut segment) = setup(8, 0, 7);
        segment.feed_sound(255);
        segment.start_effect(
            EffectId::IntensityMeter,
            &EffectParams::default(),
            at(0),
            &mut buffer,
        );

        segment.update(at(20), &mut buffer);
        assert!(lit(&buffer).is_empty());
    }

    #[test]
    fn test_trigger_flash_follows_trigger() {
        let (mut buffer, mut segment) = setup(4, 0, 3);
        segment.start_effect(EffectId::TriggerFlash, &EffectParams::default(), at(0), &mut buffer);

        segment.feed_trigger(true, 128);
        segment.update(at(10), &mut buffer);
        assert_eq!(buffer.get(3), Some(Rgb::new(128, 128, 128)));

        segment.feed_trigger(false, 128);
        segment.update(at(20), &mut buffer);
        assert!(lit(&buffer).is_empty());
    }

    #[test]
    fn test_solid_paints_immediately() {
        let (mut buffer, mut segment) = setup(6, 1, 3);
        let params = EffectParams::new().with_color(GREEN);
        segment.start_effect(EffectId::Solid, &params, at(0), &mut buffer);

        segment.update(at(0), &mut buffer);
        assert!(segment.is_idle());
        assert_eq!(lit(&buffer), vec![1, 2, 3]);
    }

    #[test]
    fn test_rainbow_runs_one_revolution() {
        let (mut buffer, mut segment) = setup(4, 0, 3);
        let params = EffectParams::new().with_interval(Duration::from_millis(10));
        segment.start_effect(EffectId::Rainbow, &params, at(0), &mut buffer);

        segment.update(at(10), &mut buffer);
        assert_eq!(buffer.get(0), Some(RED));
        for tick in 2..=4 {
            segment.update(at(tick * 10), &mut buffer);
        }
        assert!(segment.is_idle());
    }

    #[test]
    fn test_restart_discards_state() {
        let (mut buffer, mut segment) = setup(10, 0, 9);
        let params = EffectParams::new()
            .with_color(RED)
            .with_interval(Duration::from_millis(10));
        segment.start_effect(EffectId::Wipe, &params, at(0), &mut buffer);
        for tick in 1..=5 {
            segment.update(at(tick * 10), &mut buffer);
        }

        segment.start_effect(EffectId::Wipe, &params, at(100), &mut buffer);
        assert!(lit(&buffer).is_empty());
        segment.update(at(110), &mut buffer);
        assert_eq!(lit(&buffer), vec![0]);
    }

    #[test]
    fn test_tilt_rainbow_offset() {
        assert_eq!(TiltRainbowEffect::offset(-1.0, 9), 0);
        assert_eq!(TiltRainbowEffect::offset(0.0, 9), 4);
        assert_eq!(TiltRainbowEffect::offset(1.0, 9), 8);
        // Out of range tilt is clamped, NaN counts as level
        assert_eq!(TiltRainbowEffect::offset(5.0, 9), 8);
        assert_eq!(TiltRainbowEffect::offset(-3.0, 9), 0);
        assert_eq!(TiltRainbowEffect::offset(f32::NAN, 9), 4);
        assert_eq!(TiltRainbowEffect::offset(0.5, 1), 0);
    }

    #[test]
    fn test_tilt_rainbow_one_shot() {
        let (mut buffer, mut segment) = setup(4, 0, 3);
        let params = EffectParams::new().with_interval(Duration::from_millis(10));
        segment.feed_accel(Accel::new(1.0, 0.0, 0.0));
        segment.start_effect(EffectId::TiltRainbow, &params, at(0), &mut buffer);

        segment.update(at(10), &mut buffer);
        assert!(segment.is_idle());
        assert_eq!(buffer.get(0), Some(wheel(3, 4)));
        assert_eq!(buffer.get(1), Some(wheel(4, 4)));
    }

    #[test]
    fn test_tilt_rainbow_repaints_when_looping() {
        let (mut buffer, mut segment) = setup(4, 0, 3);
        let params = EffectParams::new()
            .with_interval(Duration::from_millis(10))
            .with_looping(true);
        segment.feed_accel(Accel::new(-1.0, 0.0, 0.0));
        segment.start_effect(EffectId::TiltRainbow, &params, at(0), &mut buffer);

        segment.update(at(10), &mut buffer);
        assert_eq!(buffer.get(0), Some(RED));

        // Tilt changes are picked up on the next gated tick only
        segment.feed_accel(Accel::new(1.0, 0.0, 0.0));
        segment.update(at(15), &mut buffer);
        assert_eq!(buffer.get(0), Some(RED));
        segment.update(at(20), &mut buffer);
        assert_eq!(buffer.get(0), Some(wheel(3, 4)));
        assert!(!segment.is_idle());
    }

    #[test]
    fn test_gate_survives_clock_wrap() {
        let (mut buffer, mut segment) = setup(4, 0, 3);
        let params = EffectParams::new()
            .with_color(RED)
            .with_interval(Duration::from_millis(10));
        let start = u64::MAX - 5;
        let interval = Duration::from_millis(10).as_ticks();
        segment.start_effect(EffectId::Wipe, &params, Instant::from_ticks(start), &mut buffer);

        segment.update(Instant::from_ticks(start.wrapping_add(interval - 1)), &mut buffer);
        assert!(lit(&buffer).is_empty());

        segment.update(Instant::from_ticks(start.wrapping_add(interval)), &mut buffer);
        assert_eq!(lit(&buffer), vec![0]);

        segment.update(Instant::from_ticks(start.wrapping_add(interval + 1)), &mut buffer);
        assert_eq!(lit(&buffer), vec![0]);
        assert_eq!(buffer.get(1), Some(BLACK));
    }
}
