use bevy_tumble::*;

#[test]
fn defaults_are_valid() {
    let config = TumbleControllerConfig::default();
    assert_eq!(config.validate(), Ok(()));
    assert_eq!(config.jump_style.max_jumps(), 2);
    assert_eq!(config.dash_style.max_dashes(), 1);
    assert_eq!(
        config.grounding,
        TumbleGroundingStrategy::ContactWindow { window: 0.1 }
    );
}

#[test]
fn negative_magnitudes_are_rejected() {
    let config = TumbleControllerConfig {
        move_force: -1.0,
        ..Default::default()
    };
    assert_eq!(
        config.validate(),
        Err(TumbleConfigError::InvalidMagnitude {
            field: "move_force",
            value: -1.0
        })
    );

    let config = TumbleControllerConfig {
        jump_force: bevy_tumble::math::Float::NAN,
        ..Default::default()
    };
    assert!(config.validate().is_err());

    let config = TumbleControllerConfig {
        grounding: TumbleGroundingStrategy::Raycast { distance: -1.1 },
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn zero_charges_are_rejected() {
    let config = TumbleControllerConfig {
        jump_style: TumbleJumpStyle::Charges {
            max_jumps: 0,
            trigger_delay: 0.5,
        },
        ..Default::default()
    };
    assert_eq!(
        config.validate(),
        Err(TumbleConfigError::ZeroCharges("max_jumps"))
    );

    let config = TumbleControllerConfig {
        dash_style: TumbleDashStyle::Charges {
            max_dashes: 0,
            regen_time: 1.0,
        },
        ..Default::default()
    };
    assert_eq!(
        config.validate(),
        Err(TumbleConfigError::ZeroCharges("max_dashes"))
    );
}

#[test]
fn coyote_time_is_a_single_jump() {
    assert_eq!(
        TumbleJumpStyle::CoyoteTime { coyote_time: 0.2 }.max_jumps(),
        1
    );
    assert_eq!(TumbleDashStyle::Disabled.max_dashes(), 0);
}

#[test]
fn session_lifecycle() {
    let mut session = TumbleSession::default();
    assert!(session.is_running());

    assert!(session.toggle_pause());
    assert!(!session.is_running());
    assert!(!session.toggle_pause());

    session.toggle_pause();
    let final_time = session.complete_level();
    assert!(session.is_level_complete());
    assert!(!session.is_paused());
    assert!(!session.is_running());
    assert!(!session.toggle_pause());
    assert_eq!(session.complete_level(), final_time);

    session.restart();
    assert_eq!(session, TumbleSession::default());
}

#[cfg(feature = "serialize")]
#[test]
fn config_survives_serialization() {
    let config = TumbleControllerConfig {
        jump_style: TumbleJumpStyle::CoyoteTime { coyote_time: 0.15 },
        dash_style: TumbleDashStyle::Charges {
            max_dashes: 3,
            regen_time: 2.0,
        },
        grounding: TumbleGroundingStrategy::Raycast { distance: 1.1 },
        surfaces: TumbleSurfaceRules {
            ground: TumbleSurfaceCategories::category(0) | TumbleSurfaceCategories::category(4),
            disallow_regen: TumbleSurfaceCategories::category(1),
            allow_regen: TumbleSurfaceCategories::NONE,
        },
        ..Default::default()
    };

    let serialized = ron::to_string(&config).expect("Unable to serialize");
    let deserialized: TumbleControllerConfig =
        ron::from_str(&serialized).expect(&format!("Could not deserialize {serialized}"));
    assert_eq!(deserialized, config);

    let checkpoint = TumbleCheckpoint {
        offset: bevy_tumble::math::Vector3::Y,
        gravity: TumbleGravity::new(bevy_tumble::math::Vector3::X, 3.0).unwrap(),
    };
    let serialized = ron::to_string(&checkpoint).expect("Unable to serialize");
    let deserialized: TumbleCheckpoint =
        ron::from_str(&serialized).expect(&format!("Could not deserialize {serialized}"));
    assert_eq!(deserialized, checkpoint);
}
