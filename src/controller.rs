use bevy::ecs::schedule::{InternedScheduleLabel, ScheduleLabel};
use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use crate::math::{AdjustPrecision, AsF32, Float, Vector3};
use crate::session::tumble_session_is_running;
use crate::{
    TumbleActionsPerformed, TumbleCameraRig, TumbleCheckpoint, TumbleCheckpointSnapshot,
    TumbleCheckpointTracker, TumbleContactClass, TumbleContactKind, TumbleContactPhase, TumbleContactQueue,
    TumbleControllerConfig, TumbleEvent, TumbleEventQueue, TumbleGravity, TumbleGravityCandidate,
    TumbleGravitySource, TumbleGravityTrigger, TumbleGroundingStrategy, TumbleGroundingTracker,
    TumbleGroundingUpdate, TumbleMotionContext, TumbleMotionInput, TumbleMotionState,
    TumbleMotor, TumbleOcclusionAvoidance, TumblePipelineSystems, TumbleProximitySensor,
    TumbleResetVolume, TumbleRigidBodyTracker, TumbleSession, TumbleSurface, TumbleSystems, TumbleTeleport, TumbleToggle, TumbleView,
};

/// The user controls should be placed in this system set.
#[derive(SystemSet, Clone, PartialEq, Eq, Debug, Hash)]
pub struct TumbleUserControlsSystems;

/// The camera rigs are updated in this system set.
#[derive(SystemSet, Clone, PartialEq, Eq, Debug, Hash)]
pub struct TumbleCameraSystems;

/// The main bevy-tumble plugin.
///
/// The motion tick runs in the schedule passed to [`new`](Self::new) - this should be the
/// schedule the physics backend runs in, typically [`FixedUpdate`]. The camera rigs run in the
/// presentation schedule, [`PostUpdate`] by default, so they see the gravity committed by the
/// motion ticks of the same frame.
pub struct TumbleControllerPlugin {
    schedule: InternedScheduleLabel,
    presentation_schedule: InternedScheduleLabel,
}

impl TumbleControllerPlugin {
    pub fn new(schedule: impl ScheduleLabel) -> Self {
        Self {
            schedule: schedule.intern(),
            presentation_schedule: PostUpdate.intern(),
        }
    }

    pub fn with_presentation_schedule(self, schedule: impl ScheduleLabel) -> Self {
        Self {
            presentation_schedule: schedule.intern(),
            ..self
        }
    }
}

impl Plugin for TumbleControllerPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            self.schedule,
            (
                TumblePipelineSystems::Sensors,
                TumblePipelineSystems::Events,
                TumbleUserControlsSystems,
                TumblePipelineSystems::Logic,
                TumblePipelineSystems::Motors,
            )
                .chain()
                .in_set(TumbleSystems),
        );
        app.configure_sets(
            self.schedule,
            TumbleSystems.run_if(tumble_session_is_running),
        );
        app.add_systems(
            self.schedule,
            (resolve_contacts_system, apply_events_system)
                .chain()
                .in_set(TumblePipelineSystems::Events),
        );
        app.add_systems(
            self.schedule,
            (apply_controller_system, advance_session_system).in_set(TumblePipelineSystems::Logic),
        );

        app.configure_sets(
            self.presentation_schedule,
            TumbleCameraSystems
                .run_if(tumble_session_is_running)
                .before(bevy::transform::TransformSystem::TransformPropagate),
        );
        app.add_systems(
            self.presentation_schedule,
            update_camera_rigs_system.in_set(TumbleCameraSystems),
        );
    }
}

/// The main component used for interaction with the controls and the motion tick.
///
/// Feed it input every motion tick (in [`TumbleUserControlsSystems`]) - input is consumed by the
/// tick and has to be fed again for the next one:
///
/// ```no_run
/// # use bevy::prelude::*;
/// # use bevy_tumble::prelude::*;
/// fn player_controls(keyboard: Res<ButtonInput<KeyCode>>, mut query: Query<&mut TumbleController>) {
///     for mut controller in query.iter_mut() {
///         let mut horizontal = 0.0;
///         if keyboard.pressed(KeyCode::KeyA) {
///             horizontal -= 1.0;
///         }
///         if keyboard.pressed(KeyCode::KeyD) {
///             horizontal += 1.0;
///         }
///         controller.roll(horizontal, 0.0);
///         if keyboard.just_pressed(KeyCode::Space) {
///             controller.jump();
///         }
///     }
/// }
/// ```
#[derive(Component, Default, Debug)]
#[require(
    TumbleControllerConfig,
    TumbleMotor,
    TumbleRigidBodyTracker,
    TumbleProximitySensor,
    TumbleContactQueue,
    TumbleEventQueue,
    TumbleGravity,
    TumbleCheckpointTracker,
    TumbleView
)]
pub struct TumbleController {
    input: TumbleMotionInput,
    state: Option<TumbleMotionState>,
    grounding: TumbleGroundingTracker,
    open_contacts: HashMap<Entity, OpenContact>,
    last_actions: TumbleActionsPerformed,
}

impl TumbleController {
    /// Set the stick input for this tick.
    pub fn roll(&mut self, horizontal: Float, vertical: Float) -> &mut Self {
        self.input.horizontal = horizontal;
        self.input.vertical = vertical;
        self
    }

    /// Request a jump this tick. Ignored if no jump is available.
    pub fn jump(&mut self) -> &mut Self {
        self.input.jump = true;
        self
    }

    /// Request a dash this tick. Ignored if no dash is available.
    pub fn dash(&mut self) -> &mut Self {
        self.input.dash = true;
        self
    }

    /// Request a ground slam this tick. Ignored on the ground or if already slammed since the last
    /// landing.
    pub fn slam(&mut self) -> &mut Self {
        self.input.slam = true;
        self
    }

    /// The input fed so far for the upcoming tick.
    pub fn input(&self) -> &TumbleMotionInput {
        &self.input
    }

    /// Charges and cooldowns. `None` until the first motion tick.
    pub fn motion_state(&self) -> Option<&TumbleMotionState> {
        self.state.as_ref()
    }

    pub fn grounding(&self) -> &TumbleGroundingTracker {
        &self.grounding
    }

    pub fn is_grounded(&self) -> bool {
        self.grounding.is_grounded()
    }

    /// The actions performed on the last motion tick - useful for sounds and animations.
    pub fn last_actions(&self) -> TumbleActionsPerformed {
        self.last_actions
    }

    /// Throw away all charges, cooldowns and contacts. The next tick starts with full charges.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A collider the actor touches. The backend may report several contact pairs with the same
/// collider (e.g. a compound actor), and the contact stays open until all of them have ended.
#[derive(Debug, Clone, Copy)]
struct OpenContact {
    class: TumbleContactClass,
    pairs: u32,
}

fn is_disabled(toggle: Option<&TumbleToggle>) -> bool {
    matches!(toggle.copied().unwrap_or_default(), TumbleToggle::Disabled)
}

#[allow(clippy::type_complexity)]
fn resolve_contacts_system(
    mut actors_query: Query<(
        &mut TumbleController,
        &TumbleControllerConfig,
        &mut TumbleContactQueue,
        &mut TumbleEventQueue,
        &TumbleRigidBodyTracker,
        Option<&TumbleToggle>,
    )>,
    others_query: Query<(
        Option<&TumbleSurface>,
        Option<&TumbleGravitySource>,
        Option<&TumbleCheckpoint>,
        Has<TumbleResetVolume>,
        Option<&GlobalTransform>,
    )>,
) {
    for (mut controller, config, mut contacts, mut events, tracker, toggle) in
        actors_query.iter_mut()
    {
        if is_disabled(toggle) {
            continue;
        }
        for contact in contacts.drain() {
            let other = others_query.get(contact.other).ok();
            match contact.kind {
                TumbleContactKind::Collision { .. } => {
                    let known_class = config.surfaces.classify(
                        other
                            .and_then(|(surface, ..)| surface.copied())
                            .unwrap_or_default()
                            .0,
                    );
                    let open_contacts = &mut controller.open_contacts;
                    match contact.phase {
                        TumbleContactPhase::Enter => {
                            let open = open_contacts.entry(contact.other).or_insert(OpenContact {
                                class: known_class,
                                pairs: 0,
                            });
                            open.pairs += 1;
                            if open.pairs == 1 {
                                events.push(TumbleEvent::ContactBegan(open.class));
                            } else {
                                events.push(TumbleEvent::ContactPersisted(open.class));
                            }
                        }
                        TumbleContactPhase::Stay => {
                            let class = open_contacts
                                .get(&contact.other)
                                .map_or(known_class, |open| open.class);
                            events.push(TumbleEvent::ContactPersisted(class));
                        }
                        TumbleContactPhase::Exit => {
                            // Unmatched exits are ignored.
                            let Some(open) = open_contacts.get_mut(&contact.other) else {
                                continue;
                            };
                            open.pairs = open.pairs.saturating_sub(1);
                            if open.pairs == 0 {
                                let class = open.class;
                                open_contacts.remove(&contact.other);
                                events.push(TumbleEvent::ContactEnded(class));
                            }
                        }
                    }
                }
                TumbleContactKind::Overlap => {
                    let Some((_, gravity_source, checkpoint, is_reset, transform)) = other else {
                        continue;
                    };
                    let other_position = transform
                        .map(|transform| transform.translation().adjust_precision())
                        .unwrap_or_default();
                    if let Some(source) = gravity_source {
                        let fires = match (source.trigger(), contact.phase) {
                            (_, TumbleContactPhase::Exit) => false,
                            (TumbleGravityTrigger::OnEnter, phase) => {
                                phase == TumbleContactPhase::Enter
                            }
                            (TumbleGravityTrigger::WhileInside, _) => true,
                        };
                        if fires {
                            if let Some(field) = source.field_at(other_position, tracker.translation)
                            {
                                events.push(TumbleEvent::Gravity(TumbleGravityCandidate {
                                    field,
                                    priority: source.priority,
                                    distance: other_position.distance(tracker.translation),
                                }));
                            }
                        }
                    }
                    if contact.phase == TumbleContactPhase::Enter {
                        if let Some(checkpoint) = checkpoint {
                            events.push(TumbleEvent::CheckpointEntered(
                                TumbleCheckpointSnapshot::new(other_position, checkpoint),
                            ));
                        }
                        if is_reset {
                            events.push(TumbleEvent::ResetEntered);
                        }
                    }
                }
            }
        }
    }
}

#[allow(clippy::type_complexity)]
fn apply_events_system(
    mut query: Query<(
        Entity,
        &mut TumbleController,
        &mut TumbleEventQueue,
        &mut TumbleGravity,
        &mut TumbleCheckpointTracker,
        &mut TumbleRigidBodyTracker,
        &mut TumbleMotor,
        Option<&TumbleToggle>,
    )>,
) {
    for (
        entity,
        mut controller,
        mut events,
        mut gravity,
        mut checkpoints,
        mut tracker,
        mut motor,
        toggle,
    ) in query.iter_mut()
    {
        if is_disabled(toggle) || events.is_empty() {
            continue;
        }
        let events = events.take_sorted();

        if let Some(new_gravity) = TumbleGravityCandidate::resolve(events.gravity) {
            if *gravity != new_gravity {
                debug!(
                    "{entity} gravity set to {} x {}",
                    new_gravity.direction(),
                    new_gravity.strength()
                );
                gravity.set(new_gravity);
            }
        }

        for event in events.contacts {
            match event {
                TumbleEvent::ContactBegan(class) => controller.grounding.contact_began(class),
                TumbleEvent::ContactPersisted(class) => {
                    controller.grounding.contact_persisted(class)
                }
                TumbleEvent::ContactEnded(class) => controller.grounding.contact_ended(class),
                _ => {}
            }
        }

        for event in events.checkpoints {
            match event {
                TumbleEvent::CheckpointEntered(snapshot) => {
                    debug!("{entity} reached checkpoint at {}", snapshot.anchor);
                    checkpoints.record(snapshot);
                }
                TumbleEvent::ResetEntered => {
                    match checkpoints.transfer(tracker.velocity, &gravity) {
                        Ok(outcome) => {
                            info!(
                                "{entity} sent back to checkpoint at {}",
                                outcome.translation
                            );
                            tracker.translation = outcome.translation;
                            tracker.velocity = outcome.velocity;
                            gravity.set(outcome.gravity);
                            motor.teleport = Some(TumbleTeleport {
                                translation: outcome.translation,
                                velocity: outcome.velocity,
                            });
                        }
                        Err(err) => {
                            warn!("{entity} entered a reset volume but was not reset: {err}");
                        }
                    }
                }
                _ => {}
            }
        }
    }
}

#[allow(clippy::type_complexity)]
fn apply_controller_system(
    time: Res<Time>,
    mut query: Query<(
        &mut TumbleController,
        &TumbleControllerConfig,
        &TumbleRigidBodyTracker,
        &TumbleGravity,
        &TumbleView,
        &mut TumbleProximitySensor,
        &mut TumbleMotor,
        Option<&TumbleToggle>,
    )>,
    surfaces_query: Query<&TumbleSurface>,
) {
    let frame_duration = time.delta().as_secs_f64() as Float;
    if frame_duration == 0.0 {
        return;
    }
    for (mut controller, config, tracker, gravity, view, mut sensor, mut motor, toggle) in
        query.iter_mut()
    {
        if is_disabled(toggle) {
            continue;
        }
        let controller = controller.as_mut();

        sensor.cast_direction = gravity.direction();
        sensor.cast_range = match config.grounding {
            TumbleGroundingStrategy::Raycast { distance } => distance,
            _ => 0.0,
        };
        let ground_probe = sensor.output.as_ref().and_then(|output| {
            let surface = surfaces_query
                .get(output.entity)
                .copied()
                .unwrap_or_default()
                .0;
            config
                .surfaces
                .is_ground(surface)
                .then_some(output.proximity)
        });

        let grounding_update =
            controller
                .grounding
                .update(frame_duration, &config.grounding, ground_probe);
        match grounding_update {
            TumbleGroundingUpdate::NoChange => {}
            TumbleGroundingUpdate::Landed => trace!("Landed"),
            TumbleGroundingUpdate::LeftGround => trace!("Left ground"),
        }

        let state = controller
            .state
            .get_or_insert_with(|| TumbleMotionState::new(config));
        controller.last_actions = state.step(
            config,
            &controller.input,
            TumbleMotionContext {
                frame_duration,
                tracker,
                gravity,
                basis: view.basis(gravity.direction()),
                view,
                grounded: controller.grounding.is_grounded(),
                grounding_update,
                regen_blocked: controller.grounding.regen_blocked(),
            },
            motor.as_mut(),
        );
        controller.input = Default::default();
    }
}

fn advance_session_system(time: Res<Time>, session: Option<ResMut<TumbleSession>>) {
    if let Some(mut session) = session {
        session.advance(time.delta().as_secs_f64() as Float);
    }
}

#[allow(clippy::type_complexity)]
fn update_camera_rigs_system(
    time: Res<Time>,
    mut rigs_query: Query<(
        &mut TumbleCameraRig,
        &mut Transform,
        &mut TumbleOcclusionAvoidance,
    )>,
    mut actors_query: Query<(
        &GlobalTransform,
        &TumbleGravity,
        Option<&TumbleCheckpointTracker>,
        &mut TumbleView,
    )>,
) {
    let frame_duration = time.delta().as_secs_f64() as Float;
    for (mut rig, mut transform, mut occlusion_avoidance) in rigs_query.iter_mut() {
        let Ok((actor_transform, gravity, checkpoints, mut view)) =
            actors_query.get_mut(rig.target)
        else {
            continue;
        };
        let pose = rig.update(
            frame_duration,
            gravity.direction(),
            checkpoints.map_or(0, |checkpoints| checkpoints.transfers()),
            actor_transform.translation().adjust_precision(),
        );
        transform.translation = pose.translation.f32();
        transform.rotation = pose.rotation.f32();
        if occlusion_avoidance.enabled != pose.occlusion_avoidance {
            occlusion_avoidance.enabled = pose.occlusion_avoidance;
        }
        *view = TumbleView {
            forward: pose.rotation * Vector3::NEG_Z,
            right: pose.rotation * Vector3::X,
            smoothed_up: Some(pose.up),
        };
    }
}
