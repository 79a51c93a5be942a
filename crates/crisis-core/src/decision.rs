//! Actor Decision Model
//!
//! Each tick an actor picks exactly one action from its scalars, its
//! personality and the current tension. The pipeline mirrors a weighted
//! utility pick:
//!
//! 1. Impulsive roll: with probability `impulsiveness`, pick uniformly from
//!    every kind.
//! 2. Candidate set: aggressive kinds when stress exceeds the threshold,
//!    diplomatic kinds otherwise.
//! 3. Weighting: configured base weight times personality modifiers.
//! 4. Noise and weighted random selection.
//! 5. Magnitude: configured base times a jitter factor.

use rand::Rng;

use crisis_events::{clamp_scalar, Action, ActionKind};

use crate::actor::Actor;
use crate::config::Config;

/// Lowest weight a candidate can carry after noise.
const MIN_WEIGHT: f32 = 0.01;

/// A candidate action with its selection weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedAction {
    pub kind: ActionKind,
    pub weight: f32,
}

impl WeightedAction {
    pub fn new(kind: ActionKind, weight: f32) -> Self {
        Self { kind, weight }
    }
}

/// Chooses one action for `actor`.
pub fn decide<R: Rng>(actor: &Actor, tension: f32, config: &Config, rng: &mut R) -> Action {
    let tension = clamp_scalar(tension);
    let policy = &actor.policy;

    let impulsive = rng.gen::<f32>() < policy.impulsiveness;
    let kind = if impulsive {
        let kind = ActionKind::ALL[rng.gen_range(0..ActionKind::ALL.len())];
        tracing::trace!(actor = %actor.id, %kind, "impulsive decision");
        kind
    } else {
        let mut candidates = candidate_weights(actor, tension, config);
        add_noise(rng, &mut candidates, config.dynamics.weight_noise);
        weighted_random_choice(rng, &candidates).kind
    };

    let base = config.actions.tuning(kind).magnitude;
    let jitter = config.dynamics.delta_jitter;
    let factor = if jitter > 0.0 {
        1.0 + rng.gen_range(-jitter..=jitter)
    } else {
        1.0
    };

    Action::new(actor.id, kind, base * factor)
}

/// Weighted candidate set before noise.
pub fn candidate_weights(actor: &Actor, tension: f32, config: &Config) -> Vec<WeightedAction> {
    let kinds = if actor.is_stressed() {
        ActionKind::AGGRESSIVE
    } else {
        ActionKind::DIPLOMATIC
    };

    kinds
        .iter()
        .map(|&kind| {
            let base = config.actions.tuning(kind).weight;
            WeightedAction::new(kind, base * modifier(actor, kind, tension))
        })
        .collect()
}

/// Personality and situation multiplier for one kind.
fn modifier(actor: &Actor, kind: ActionKind, tension: f32) -> f32 {
    let policy = &actor.policy;
    let approval = clamp_scalar(actor.approval()) / 100.0;
    let tension = clamp_scalar(tension);

    match kind {
        ActionKind::Escalate | ActionKind::Deploy => 0.5 + policy.aggression,
        ActionKind::Cyberattack => (0.5 + policy.aggression) * (1.0 + tension / 200.0),
        ActionKind::Negotiate => 0.5 + policy.caution,
        ActionKind::Deescalate => (0.5 + policy.caution) * (1.0 + tension / 100.0),
        // Unpopular leaders reach for the microphone
        ActionKind::Propaganda => 0.5 + policy.populism * (1.0 - approval) * 2.0,
    }
}

/// Adds +/- `factor` multiplicative noise to each weight
pub fn add_noise<R: Rng>(rng: &mut R, candidates: &mut [WeightedAction], factor: f32) {
    for candidate in candidates.iter_mut() {
        let noise: f32 = 1.0 + (rng.gen::<f32>() - 0.5) * 2.0 * factor;
        candidate.weight *= noise;
        candidate.weight = candidate.weight.max(MIN_WEIGHT);
    }
}

/// Weighted random selection from a non-empty candidate list
pub fn weighted_random_choice<'a, R: Rng>(
    rng: &mut R,
    candidates: &'a [WeightedAction],
) -> &'a WeightedAction {
    let total_weight: f32 = candidates.iter().map(|c| c.weight).sum();

    if !(total_weight > 0.0) {
        return &candidates[0];
    }

    let mut roll: f32 = rng.gen::<f32>() * total_weight;

    for candidate in candidates {
        roll -= candidate.weight;
        if roll <= 0.0 {
            return candidate;
        }
    }

    &candidates[candidates.len() - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ActorConfig;
    use crisis_events::{ActorId, Posture};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn calm_actor() -> Actor {
        let config = ActorConfig {
            impulsiveness: 0.0,
            ..ActorConfig::united_states()
        };
        let mut actor = Actor::new(ActorId::UnitedStates, &config);
        actor.set_stress(10.0);
        actor
    }

    #[test]
    fn test_weighted_random_choice() {
        let mut rng = SmallRng::seed_from_u64(12345);
        let candidates = vec![
            WeightedAction::new(ActionKind::Negotiate, 0.1),
            WeightedAction::new(ActionKind::Propaganda, 0.9),
        ];

        let mut negotiate = 0;
        let mut propaganda = 0;
        for _ in 0..1000 {
            match weighted_random_choice(&mut rng, &candidates).kind {
                ActionKind::Negotiate => negotiate += 1,
                _ => propaganda += 1,
            }
        }

        assert!(propaganda > negotiate * 5);
    }

    #[test]
    fn test_zero_weights_fall_back_to_first() {
        let mut rng = SmallRng::seed_from_u64(1);
        let candidates = vec![
            WeightedAction::new(ActionKind::Deploy, 0.0),
            WeightedAction::new(ActionKind::Escalate, 0.0),
        ];
        assert_eq!(
            weighted_random_choice(&mut rng, &candidates).kind,
            ActionKind::Deploy
        );
    }

    #[test]
    fn test_noise_keeps_weights_positive() {
        let mut rng = SmallRng::seed_from_u64(9);
        let mut candidates = vec![
            WeightedAction::new(ActionKind::Deploy, 0.0),
            WeightedAction::new(ActionKind::Escalate, 1.0),
        ];
        add_noise(&mut rng, &mut candidates, 0.2);
        assert!(candidates[0].weight >= MIN_WEIGHT);
        assert!(candidates[1].weight >= 0.8 && candidates[1].weight <= 1.2);
    }

    #[test]
    fn test_calm_actor_stays_diplomatic() {
        let config = Config::default();
        let actor = calm_actor();
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..200 {
            let action = decide(&actor, 50.0, &config, &mut rng);
            assert_eq!(action.kind.posture(), Posture::Diplomatic);
            assert_eq!(action.actor, ActorId::UnitedStates);
        }
    }

    #[test]
    fn test_stressed_actor_turns_aggressive() {
        let config = Config::default();
        let mut actor = calm_actor();
        actor.set_stress(95.0);
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..200 {
            let action = decide(&actor, 80.0, &config, &mut rng);
            assert_eq!(action.kind.posture(), Posture::Aggressive);
        }
    }

    #[test]
    fn test_magnitude_within_jitter() {
        let config = Config::default();
        let actor = calm_actor();
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..200 {
            let action = decide(&actor, 50.0, &config, &mut rng);
            let base = config.actions.tuning(action.kind).magnitude;
            assert!(action.magnitude >= base * 0.75 - 1e-4);
            assert!(action.magnitude <= base * 1.25 + 1e-4);
        }
    }

    #[test]
    fn test_impulsive_actor_can_break_posture() {
        let mut config = Config::default();
        config.united_states.impulsiveness = 1.0;
        let mut actor = Actor::new(ActorId::UnitedStates, &config.united_states);
        actor.set_stress(0.0);
        let mut rng = SmallRng::seed_from_u64(11);
        let aggressive = (0..200)
            .map(|_| decide(&actor, 50.0, &config, &mut rng))
            .filter(|a| a.kind.posture() == Posture::Aggressive)
            .count();
        assert!(aggressive > 0);
    }

    #[test]
    fn test_low_approval_favours_propaganda() {
        let config = Config::default();
        let mut actor = calm_actor();
        actor.set_approval(100.0);
        let popular = candidate_weights(&actor, 50.0, &config);
        actor.set_approval(0.0);
        let unpopular = candidate_weights(&actor, 50.0, &config);

        let weight = |c: &[WeightedAction]| {
            c.iter()
                .find(|w| w.kind == ActionKind::Propaganda)
                .map(|w| w.weight)
                .unwrap()
        };
        assert!(weight(&unpopular) > weight(&popular));
    }

    #[test]
    fn test_high_tension_favours_deescalation() {
        let config = Config::default();
        let actor = calm_actor();
        let low = candidate_weights(&actor, 0.0, &config);
        let high = candidate_weights(&actor, 100.0, &config);
        let weight = |c: &[WeightedAction]| {
            c.iter()
                .find(|w| w.kind == ActionKind::Deescalate)
                .map(|w| w.weight)
                .unwrap()
        };
        assert!(weight(&high) > weight(&low));
    }

    #[test]
    fn test_decide_deterministic() {
        let config = Config::default();
        let actor = Actor::new(ActorId::NorthKorea, &config.north_korea);
        let mut rng1 = SmallRng::seed_from_u64(99);
        let mut rng2 = SmallRng::seed_from_u64(99);
        let a: Vec<_> = (0..50).map(|_| decide(&actor, 60.0, &config, &mut rng1)).collect();
        let b: Vec<_> = (0..50).map(|_| decide(&actor, 60.0, &config, &mut rng2)).collect();
        assert_eq!(a, b);
    }
}
