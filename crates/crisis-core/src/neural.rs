//! Neural Activity Mapping
//!
//! A cosmetic "brain scan" for each president. Activations are a pure
//! function of stress and approval: a posture is read from the scalars, its
//! activation pattern is amplified by stress, and a couple of regions track
//! the scalars directly. Nothing here feeds back into decisions.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

use crisis_events::clamp_scalar;

/// Regions drawn on a neural panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrainRegion {
    Amygdala,
    Prefrontal,
    Hippocampus,
    AnteriorCingulate,
    Insula,
    Striatum,
    Thalamus,
    Hypothalamus,
}

impl BrainRegion {
    pub const ALL: [BrainRegion; 8] = [
        BrainRegion::Amygdala,
        BrainRegion::Prefrontal,
        BrainRegion::Hippocampus,
        BrainRegion::AnteriorCingulate,
        BrainRegion::Insula,
        BrainRegion::Striatum,
        BrainRegion::Thalamus,
        BrainRegion::Hypothalamus,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            BrainRegion::Amygdala => "Amygdala",
            BrainRegion::Prefrontal => "Prefrontal",
            BrainRegion::Hippocampus => "Hippocampus",
            BrainRegion::AnteriorCingulate => "Anterior Cingulate",
            BrainRegion::Insula => "Insula",
            BrainRegion::Striatum => "Striatum",
            BrainRegion::Thalamus => "Thalamus",
            BrainRegion::Hypothalamus => "Hypothalamus",
        }
    }

    /// Short label for small node sizes.
    pub fn abbreviation(self) -> &'static str {
        match self {
            BrainRegion::Amygdala => "AMY",
            BrainRegion::Prefrontal => "PFC",
            BrainRegion::Hippocampus => "HIP",
            BrainRegion::AnteriorCingulate => "ACC",
            BrainRegion::Insula => "INS",
            BrainRegion::Striatum => "STR",
            BrainRegion::Thalamus => "THA",
            BrainRegion::Hypothalamus => "HYP",
        }
    }

    /// What the region stands for on the panel.
    pub fn description(self) -> &'static str {
        match self {
            BrainRegion::Amygdala => "Fear & Aggression",
            BrainRegion::Prefrontal => "Decision Making",
            BrainRegion::Hippocampus => "Memory",
            BrainRegion::AnteriorCingulate => "Conflict Monitoring",
            BrainRegion::Insula => "Risk Assessment",
            BrainRegion::Striatum => "Reward Processing",
            BrainRegion::Thalamus => "Information Relay",
            BrainRegion::Hypothalamus => "Stress Response",
        }
    }

    /// Position in `[0, 1]` panel coordinates (y grows upward).
    pub fn position(self, layout: NeuralLayout) -> (f32, f32) {
        match layout {
            NeuralLayout::Circular => {
                let angle = std::f32::consts::TAU * self.index() as f32 / 8.0;
                (0.5 + 0.35 * angle.cos(), 0.5 + 0.35 * angle.sin())
            }
            NeuralLayout::Hierarchical => match self {
                BrainRegion::Prefrontal => (0.5, 0.9),
                BrainRegion::AnteriorCingulate => (0.3, 0.7),
                BrainRegion::Insula => (0.7, 0.7),
                BrainRegion::Thalamus => (0.5, 0.5),
                BrainRegion::Amygdala => (0.25, 0.3),
                BrainRegion::Hippocampus => (0.75, 0.3),
                BrainRegion::Striatum => (0.4, 0.1),
                BrainRegion::Hypothalamus => (0.6, 0.1),
            },
        }
    }
}

impl fmt::Display for BrainRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pathways drawn between regions.
pub const CONNECTIONS: [(BrainRegion, BrainRegion); 6] = [
    (BrainRegion::Amygdala, BrainRegion::Prefrontal),
    (BrainRegion::Prefrontal, BrainRegion::AnteriorCingulate),
    (BrainRegion::AnteriorCingulate, BrainRegion::Insula),
    (BrainRegion::Insula, BrainRegion::Hypothalamus),
    (BrainRegion::Hypothalamus, BrainRegion::Amygdala),
    (BrainRegion::Thalamus, BrainRegion::Prefrontal),
];

/// Node arrangement on a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeuralLayout {
    #[default]
    Circular,
    Hierarchical,
}

impl NeuralLayout {
    pub fn next(self) -> Self {
        match self {
            NeuralLayout::Circular => NeuralLayout::Hierarchical,
            NeuralLayout::Hierarchical => NeuralLayout::Circular,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NeuralLayout::Circular => "Circular",
            NeuralLayout::Hierarchical => "Hierarchical",
        }
    }
}

/// Mental posture read from the scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeuralPosture {
    Aggressive,
    Diplomatic,
    Defensive,
}

impl NeuralPosture {
    pub fn classify(stress: f32, approval: f32) -> Self {
        if stress >= 60.0 {
            NeuralPosture::Aggressive
        } else if approval < 40.0 {
            NeuralPosture::Defensive
        } else {
            NeuralPosture::Diplomatic
        }
    }

    fn pattern(self) -> &'static [(BrainRegion, f32)] {
        match self {
            NeuralPosture::Aggressive => &[
                (BrainRegion::Amygdala, 0.8),
                (BrainRegion::Prefrontal, 0.3),
                (BrainRegion::Striatum, 0.7),
                (BrainRegion::Hypothalamus, 0.6),
            ],
            NeuralPosture::Diplomatic => &[
                (BrainRegion::Prefrontal, 0.9),
                (BrainRegion::AnteriorCingulate, 0.7),
                (BrainRegion::Amygdala, 0.3),
                (BrainRegion::Insula, 0.6),
            ],
            NeuralPosture::Defensive => &[
                (BrainRegion::Insula, 0.8),
                (BrainRegion::Hippocampus, 0.6),
                (BrainRegion::Thalamus, 0.7),
                (BrainRegion::AnteriorCingulate, 0.5),
            ],
        }
    }
}

/// Activation per region, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RegionActivations(pub [f32; 8]);

impl RegionActivations {
    pub fn get(&self, region: BrainRegion) -> f32 {
        self.0[region.index()]
    }

    /// Whole-number percentage for labels.
    pub fn percent(&self, region: BrainRegion) -> u32 {
        (self.get(region) * 100.0).round() as u32
    }

    /// Moves each activation a fraction `rate` of the way toward `target`.
    pub fn ease_toward(&mut self, target: &RegionActivations, rate: f32) {
        let rate = rate.clamp(0.0, 1.0);
        for (current, goal) in self.0.iter_mut().zip(target.0.iter()) {
            *current = (*current + (goal - *current) * rate).clamp(0.0, 1.0);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (BrainRegion, f32)> + '_ {
        BrainRegion::ALL.iter().map(move |&r| (r, self.get(r)))
    }
}

/// Samples kept by an [`ActivationHistory`].
pub const HISTORY_LEN: usize = 60;

/// Recent activation samples for one panel, oldest first.
///
/// Holds at most `capacity` samples; pushing onto a full history drops the
/// oldest.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationHistory {
    samples: VecDeque<RegionActivations>,
    capacity: usize,
}

impl Default for ActivationHistory {
    fn default() -> Self {
        Self::new(HISTORY_LEN)
    }
}

impl ActivationHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, sample: RegionActivations) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn latest(&self) -> Option<&RegionActivations> {
        self.samples.back()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &RegionActivations> + ExactSizeIterator {
        self.samples.iter()
    }

    /// One region's values across the history, oldest first.
    pub fn series(&self, region: BrainRegion) -> impl Iterator<Item = f32> + '_ {
        self.samples.iter().map(move |sample| sample.get(region))
    }

    /// Mean activation of one region over the history.
    pub fn mean(&self, region: BrainRegion) -> Option<f32> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.series(region).sum::<f32>() / self.samples.len() as f32)
    }
}

/// Display bucket for an activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ActivationLevel {
    Inactive,
    Low,
    Medium,
    High,
}

impl ActivationLevel {
    pub fn from_activation(value: f32) -> Self {
        match value {
            v if v < 0.2 => ActivationLevel::Inactive,
            v if v < 0.5 => ActivationLevel::Low,
            v if v < 0.8 => ActivationLevel::Medium,
            _ => ActivationLevel::High,
        }
    }
}

/// Target activations for the given stress and approval.
pub fn activations(stress: f32, approval: f32) -> RegionActivations {
    let stress = clamp_scalar(stress);
    let approval = clamp_scalar(approval);
    let s = stress / 100.0;

    let mut values = [0.0f32; 8];
    for &(region, base) in NeuralPosture::classify(stress, approval).pattern() {
        values[region.index()] = base * (1.0 + s * 0.5);
    }

    // The stress response and reward centres follow the scalars directly
    let hyp = BrainRegion::Hypothalamus.index();
    values[hyp] = values[hyp].max(0.9 * s);
    let str_ = BrainRegion::Striatum.index();
    values[str_] = values[str_].max(0.5 * approval / 100.0);

    for v in values.iter_mut() {
        *v = v.clamp(0.0, 1.0);
    }
    RegionActivations(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(NeuralPosture::classify(75.0, 90.0), NeuralPosture::Aggressive);
        assert_eq!(NeuralPosture::classify(30.0, 20.0), NeuralPosture::Defensive);
        assert_eq!(NeuralPosture::classify(30.0, 60.0), NeuralPosture::Diplomatic);
    }

    #[test]
    fn test_activations_bounded() {
        for stress in [0.0, 25.0, 59.9, 60.0, 100.0, 250.0, -10.0, f32::NAN] {
            for approval in [0.0, 39.0, 40.0, 100.0, f32::NAN] {
                let acts = activations(stress, approval);
                for (region, v) in acts.iter() {
                    assert!((0.0..=1.0).contains(&v), "{} = {}", region, v);
                }
            }
        }
    }

    #[test]
    fn test_activations_deterministic() {
        assert_eq!(activations(63.2, 47.0), activations(63.2, 47.0));
    }

    #[test]
    fn test_aggressive_pattern() {
        let acts = activations(80.0, 90.0);
        assert!(acts.get(BrainRegion::Amygdala) > acts.get(BrainRegion::Prefrontal));
        assert!(acts.get(BrainRegion::Hypothalamus) >= 0.72 - 1e-6);
        assert_eq!(acts.get(BrainRegion::Insula), 0.0);
    }

    #[test]
    fn test_diplomatic_pattern() {
        let acts = activations(0.0, 60.0);
        assert!((acts.get(BrainRegion::Prefrontal) - 0.9).abs() < 1e-6);
        assert_eq!(acts.percent(BrainRegion::Prefrontal), 90);
        assert!((acts.get(BrainRegion::Striatum) - 0.3).abs() < 1e-6);
        assert_eq!(acts.get(BrainRegion::Hypothalamus), 0.0);
    }

    #[test]
    fn test_ease_toward() {
        let mut current = RegionActivations::default();
        let target = activations(0.0, 60.0);
        current.ease_toward(&target, 0.5);
        assert!((current.get(BrainRegion::Prefrontal) - 0.45).abs() < 1e-6);
        for _ in 0..200 {
            current.ease_toward(&target, 0.05);
        }
        assert!((current.get(BrainRegion::Prefrontal) - 0.9).abs() < 1e-3);
    }

    #[test]
    fn test_region_descriptions() {
        assert_eq!(BrainRegion::Amygdala.description(), "Fear & Aggression");
        assert_eq!(BrainRegion::Hypothalamus.description(), "Stress Response");
        let mut seen: Vec<_> = BrainRegion::ALL.iter().map(|r| r.description()).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), BrainRegion::ALL.len());
    }

    #[test]
    fn test_history_bounded() {
        let mut history = ActivationHistory::new(3);
        assert!(history.is_empty());
        assert_eq!(history.mean(BrainRegion::Insula), None);
        for stress in [0.0, 20.0, 40.0, 80.0, 100.0] {
            history.push(activations(stress, 60.0));
            assert!(history.len() <= 3);
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.latest(), Some(&activations(100.0, 60.0)));

        // Oldest retained sample is the third push
        let hyp: Vec<f32> = history.series(BrainRegion::Hypothalamus).collect();
        assert_eq!(hyp.len(), 3);
        assert_eq!(hyp[0], activations(40.0, 60.0).get(BrainRegion::Hypothalamus));
        assert!(hyp.windows(2).all(|w| w[0] <= w[1]));

        let mean = history.mean(BrainRegion::Hypothalamus).unwrap();
        assert!((mean - hyp.iter().sum::<f32>() / 3.0).abs() < 1e-6);

        history.clear();
        assert!(history.is_empty());
        assert_eq!(ActivationHistory::new(0).capacity(), 1);
        assert_eq!(ActivationHistory::default().capacity(), HISTORY_LEN);
    }

    #[test]
    fn test_activation_levels() {
        assert_eq!(ActivationLevel::from_activation(0.1), ActivationLevel::Inactive);
        assert_eq!(ActivationLevel::from_activation(0.2), ActivationLevel::Low);
        assert_eq!(ActivationLevel::from_activation(0.5), ActivationLevel::Medium);
        assert_eq!(ActivationLevel::from_activation(0.95), ActivationLevel::High);
    }

    #[test]
    fn test_layouts_inside_panel() {
        for layout in [NeuralLayout::Circular, NeuralLayout::Hierarchical] {
            for region in BrainRegion::ALL {
                let (x, y) = region.position(layout);
                assert!((0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y));
            }
        }
        assert_eq!(NeuralLayout::Circular.next().next(), NeuralLayout::Circular);
    }
}
