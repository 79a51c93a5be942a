//! Actor state: the two presidents.

use std::collections::VecDeque;

use crisis_events::{clamp_scalar, ActionKind, ActorId, ActorSnapshot};

use crate::config::{ActorConfig, Policy};

/// Decisions kept per actor for display.
pub const RECENT_DECISIONS: usize = 5;

/// One of the two decision makers.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub id: ActorId,
    approval: f32,
    stress: f32,
    pub policy: Policy,
    /// Most recent decision; display only
    pub current_action: Option<ActionKind>,
    recent_decisions: VecDeque<ActionKind>,
}

impl Actor {
    pub fn new(id: ActorId, config: &ActorConfig) -> Self {
        Self {
            id,
            approval: clamp_scalar(config.initial_approval),
            stress: clamp_scalar(config.initial_stress),
            policy: config.policy(),
            current_action: None,
            recent_decisions: VecDeque::with_capacity(RECENT_DECISIONS),
        }
    }

    pub fn approval(&self) -> f32 {
        self.approval
    }

    pub fn stress(&self) -> f32 {
        self.stress
    }

    pub fn set_approval(&mut self, value: f32) {
        self.approval = clamp_scalar(value);
    }

    pub fn set_stress(&mut self, value: f32) {
        self.stress = clamp_scalar(value);
    }

    pub fn adjust_approval(&mut self, delta: f32) {
        self.set_approval(self.approval + delta);
    }

    pub fn adjust_stress(&mut self, delta: f32) {
        self.set_stress(self.stress + delta);
    }

    /// Whether stress exceeds this actor's threshold.
    pub fn is_stressed(&self) -> bool {
        self.stress > self.policy.stress_threshold
    }

    /// Records a decision as current and pushes it onto the bounded history.
    pub fn record(&mut self, kind: ActionKind) {
        self.current_action = Some(kind);
        if self.recent_decisions.len() == RECENT_DECISIONS {
            self.recent_decisions.pop_back();
        }
        self.recent_decisions.push_front(kind);
    }

    /// Recent decisions, newest first.
    pub fn recent_decisions(&self) -> impl Iterator<Item = ActionKind> + '_ {
        self.recent_decisions.iter().copied()
    }

    pub fn snapshot(&self) -> ActorSnapshot {
        ActorSnapshot {
            actor: self.id,
            approval: self.approval,
            stress: self.stress,
            current_action: self
                .current_action
                .map(|k| k.label().to_string())
                .unwrap_or_else(|| "none".to_string()),
            recent_decisions: self.recent_decisions().map(|k| k.label().to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_values_clamped() {
        let config = ActorConfig {
            initial_approval: 140.0,
            initial_stress: -5.0,
            ..ActorConfig::default()
        };
        let actor = Actor::new(ActorId::UnitedStates, &config);
        assert_eq!(actor.approval(), 100.0);
        assert_eq!(actor.stress(), 0.0);
    }

    #[test]
    fn test_adjust_clamps() {
        let mut actor = Actor::new(ActorId::NorthKorea, &ActorConfig::north_korea());
        actor.adjust_approval(50.0);
        assert_eq!(actor.approval(), 100.0);
        actor.adjust_stress(-500.0);
        assert_eq!(actor.stress(), 0.0);
        actor.adjust_stress(f32::NAN);
        assert_eq!(actor.stress(), 0.0);
    }

    #[test]
    fn test_recent_decisions_bounded() {
        let mut actor = Actor::new(ActorId::UnitedStates, &ActorConfig::united_states());
        for kind in ActionKind::ALL {
            actor.record(kind);
        }
        let recent: Vec<_> = actor.recent_decisions().collect();
        assert_eq!(recent.len(), RECENT_DECISIONS);
        assert_eq!(recent[0], ActionKind::Propaganda);
        assert_eq!(actor.current_action, Some(ActionKind::Propaganda));
        assert!(!recent.contains(&ActionKind::Escalate));
    }

    #[test]
    fn test_stressed_threshold() {
        let mut actor = Actor::new(ActorId::UnitedStates, &ActorConfig::united_states());
        actor.set_stress(60.0);
        assert!(!actor.is_stressed());
        actor.set_stress(60.5);
        assert!(actor.is_stressed());
    }

    #[test]
    fn test_snapshot() {
        let mut actor = Actor::new(ActorId::NorthKorea, &ActorConfig::north_korea());
        assert_eq!(actor.snapshot().current_action, "none");
        actor.record(ActionKind::Deploy);
        let snap = actor.snapshot();
        assert_eq!(snap.current_action, "deploy");
        assert_eq!(snap.recent_decisions, vec!["deploy".to_string()]);
    }
}
