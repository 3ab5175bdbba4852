mod tests {
    use led_segment_engine::{EffectId, EffectSlot, effect::EffectParams};

    #[test]
    fn test_effect_id_parse_fire() {
        assert_eq!(EffectId::parse_from_str("fire"), Some(EffectId::Fire));
        assert_eq!(
            EffectId::parse_from_str("sound_lightning"),
            Some(EffectId::SoundLightning)
        );
        assert_eq!(EffectId::parse_from_str("aurora"), None);
    }

    #[test]
    fn test_effect_id_from_raw() {
        assert_eq!(EffectId::from_raw(0), Some(EffectId::Wipe));
        assert_eq!(EffectId::from_raw(5), Some(EffectId::Fire));
        assert_eq!(EffectId::from_raw(16), Some(EffectId::Solid));
        assert_eq!(EffectId::from_raw(17), None);
    }

    #[test]
    fn test_effect_id_names_round_trip() {
        for (index, id) in EffectId::ALL.iter().enumerate() {
            assert_eq!(usize::from(id.raw()), index);
            assert_eq!(EffectId::parse_from_str(id.as_str()), Some(*id));
        }
    }

    #[test]
    fn test_effect_id_next_wraps() {
        assert_eq!(EffectId::Wipe.next(), EffectId::Rainbow);
        assert_eq!(EffectId::Solid.next(), EffectId::Wipe);
    }

    #[test]
    fn test_to_slot_matches_id() {
        let params = EffectParams::default();
        for id in EffectId::ALL {
            let slot: EffectSlot<16> = id.to_slot(&params, 8, 1);
            assert_eq!(slot.id(), Some(id));
            assert!(!slot.is_idle());
        }
        assert_eq!(EffectSlot::<16>::Idle.id(), None);
    }
}
