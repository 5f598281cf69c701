//! Frame-driven tweening of card transforms.
//!
//! Tweens never call back into the deck. When a tween that carries a
//! completion value finishes, [`Animator::tick`] hands that value back so the
//! owner can apply the deferred state change in order.

use super::card::{CardSet, Transform};

/// Animatable card property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    X,
    Rotation,
    Scale,
    Opacity,
}

impl Property {
    pub const ALL: [Property; 4] = [
        Property::X,
        Property::Rotation,
        Property::Scale,
        Property::Opacity,
    ];

    fn read(self, transform: &Transform) -> f32 {
        match self {
            Property::X => transform.x,
            Property::Rotation => transform.rotation,
            Property::Scale => transform.scale,
            Property::Opacity => transform.opacity,
        }
    }

    fn write(self, transform: &mut Transform, value: f32) {
        match self {
            Property::X => transform.x = value,
            Property::Rotation => transform.rotation = value,
            Property::Scale => transform.scale = value,
            Property::Opacity => transform.opacity = value,
        }
    }
}

/// Sparse set of property values.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Props {
    pub x: Option<f32>,
    pub rotation: Option<f32>,
    pub scale: Option<f32>,
    pub opacity: Option<f32>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offset 0, rotation 0, scale 1.
    pub fn neutral() -> Self {
        Self::new().x(0.0).rotation(0.0).scale(1.0)
    }

    pub fn x(mut self, value: f32) -> Self {
        self.x = Some(value);
        self
    }

    pub fn rotation(mut self, value: f32) -> Self {
        self.rotation = Some(value);
        self
    }

    pub fn scale(mut self, value: f32) -> Self {
        self.scale = Some(value);
        self
    }

    pub fn opacity(mut self, value: f32) -> Self {
        self.opacity = Some(value);
        self
    }

    pub fn get(&self, property: Property) -> Option<f32> {
        match property {
            Property::X => self.x,
            Property::Rotation => self.rotation,
            Property::Scale => self.scale,
            Property::Opacity => self.opacity,
        }
    }

    pub fn contains(&self, property: Property) -> bool {
        self.get(property).is_some()
    }

    /// Assign every present value to `transform`.
    pub fn apply(&self, transform: &mut Transform) {
        for property in Property::ALL {
            if let Some(value) = self.get(property) {
                property.write(transform, value);
            }
        }
    }

    fn entries(&self) -> impl Iterator<Item = (Property, f32)> + '_ {
        Property::ALL
            .into_iter()
            .filter_map(|property| self.get(property).map(|value| (property, value)))
    }
}

/// Easing curve applied to normalized progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ease {
    Linear,
    /// Quadratic deceleration.
    #[default]
    Power1Out,
    /// Cubic deceleration.
    Power2Out,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power1Out => 1.0 - (1.0 - t).powi(2),
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// Duration and easing of one tween.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenSpec {
    pub duration: f32,
    pub ease: Ease,
}

impl TweenSpec {
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            ease: Ease::default(),
        }
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}

#[derive(Debug)]
struct Track {
    property: Property,
    from: Option<f32>,
    to: f32,
}

#[derive(Debug)]
struct Tween<E> {
    target: usize,
    tracks: Vec<Track>,
    spec: TweenSpec,
    elapsed: f32,
    started: bool,
    on_complete: Option<E>,
}

impl<E> Tween<E> {
    /// Advance by `dt`; returns true once the end values have been written.
    fn advance(&mut self, dt: f32, transform: &mut Transform) -> bool {
        if !self.started {
            for track in &mut self.tracks {
                match track.from {
                    Some(from) => track.property.write(transform, from),
                    None => track.from = Some(track.property.read(transform)),
                }
            }
            self.started = true;
        }
        self.elapsed += dt.max(0.0);
        let progress = if self.spec.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.spec.duration).min(1.0)
        };
        let eased = self.spec.ease.apply(progress);
        for track in &self.tracks {
            let from = track.from.unwrap_or(track.to);
            let value = if progress >= 1.0 {
                track.to
            } else {
                from + (track.to - from) * eased
            };
            track.property.write(transform, value);
        }
        progress >= 1.0
    }
}

/// Runs tweens against a [`CardSet`], keyed by card position.
///
/// A new tween takes over the properties it animates from any older tween on
/// the same card. An older tween stripped of all its tracks is dropped; if it
/// carried a completion value, that value is still delivered on the next tick.
#[derive(Debug)]
pub struct Animator<E> {
    tweens: Vec<Tween<E>>,
    orphaned: Vec<E>,
}

impl<E> Default for Animator<E> {
    fn default() -> Self {
        Self {
            tweens: Vec::new(),
            orphaned: Vec::new(),
        }
    }
}

impl<E> Animator<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Animate from the card's values at the first tick to `to`.
    pub fn to(&mut self, target: usize, to: Props, spec: TweenSpec, on_complete: Option<E>) {
        self.from_to(target, Props::new(), to, spec, on_complete);
    }

    /// Animate from `from` (falling back to current values) to `to`.
    pub fn from_to(
        &mut self,
        target: usize,
        from: Props,
        to: Props,
        spec: TweenSpec,
        on_complete: Option<E>,
    ) {
        self.kill(target, &to);
        let tracks = to
            .entries()
            .map(|(property, value)| Track {
                property,
                from: from.get(property),
                to: value,
            })
            .collect();
        self.tweens.push(Tween {
            target,
            tracks,
            spec,
            elapsed: 0.0,
            started: false,
            on_complete,
        });
    }

    /// Stop animating the properties present in `props` on `target`.
    pub fn kill(&mut self, target: usize, props: &Props) {
        for tween in self.tweens.iter_mut().filter(|tween| tween.target == target) {
            tween.tracks.retain(|track| !props.contains(track.property));
        }
        self.drop_empty();
    }

    /// Stop every tween on `target`.
    pub fn kill_target(&mut self, target: usize) {
        self.kill(target, &Props::neutral().opacity(1.0));
    }

    /// Drop every tween without delivering completions.
    pub fn clear(&mut self) {
        self.tweens.clear();
        self.orphaned.clear();
    }

    pub fn is_animating(&self) -> bool {
        !self.tweens.is_empty() || !self.orphaned.is_empty()
    }

    /// Advance every tween by `dt` seconds and return completions in creation order.
    pub fn tick(&mut self, dt: f32, cards: &mut CardSet) -> Vec<E> {
        let mut completed = std::mem::take(&mut self.orphaned);
        let mut remaining = Vec::with_capacity(self.tweens.len());
        for mut tween in self.tweens.drain(..) {
            let finished = match cards.get_mut(tween.target) {
                Some(card) => tween.advance(dt, &mut card.transform),
                None => true,
            };
            if finished {
                completed.extend(tween.on_complete.take());
            } else {
                remaining.push(tween);
            }
        }
        self.tweens = remaining;
        completed
    }

    fn drop_empty(&mut self) {
        let mut index = 0;
        while index < self.tweens.len() {
            if self.tweens[index].tracks.is_empty() {
                let tween = self.tweens.remove(index);
                self.orphaned.extend(tween.on_complete);
            } else {
                index += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn eases_hit_endpoints() {
        for ease in [Ease::Linear, Ease::Power1Out, Ease::Power2Out] {
            assert_eq!(ease.apply(0.0), 0.0);
            assert_eq!(ease.apply(1.0), 1.0);
        }
        assert!(Ease::Power2Out.apply(0.5) > Ease::Power1Out.apply(0.5));
        assert!(Ease::Power1Out.apply(0.5) > Ease::Linear.apply(0.5));
    }

    #[test]
    fn tween_reaches_target_and_reports_completion_once() {
        let mut cards = CardSet::numbered(1);
        let mut animator = Animator::new();
        animator.to(
            0,
            Props::new().x(100.0).rotation(20.0),
            TweenSpec::new(0.5).ease(Ease::Linear),
            Some("done"),
        );

        assert!(animator.tick(0.25, &mut cards).is_empty());
        let transform = cards.get(0).unwrap().transform;
        assert!(approx(transform.x, 50.0));
        assert!(approx(transform.rotation, 10.0));

        assert_eq!(animator.tick(0.25, &mut cards), vec!["done"]);
        assert_eq!(cards.get(0).unwrap().transform.x, 100.0);
        assert!(!animator.is_animating());
        assert!(animator.tick(0.25, &mut cards).is_empty());
    }

    #[test]
    fn from_to_starts_at_given_values() {
        let mut cards = CardSet::numbered(1);
        let mut animator: Animator<()> = Animator::new();
        animator.from_to(
            0,
            Props::new().opacity(0.0),
            Props::new().opacity(1.0).scale(1.0),
            TweenSpec::new(0.3).ease(Ease::Linear),
            None,
        );
        animator.tick(0.0, &mut cards);
        assert_eq!(cards.get(0).unwrap().transform.opacity, 0.0);
        animator.tick(0.15, &mut cards);
        assert!(approx(cards.get(0).unwrap().transform.opacity, 0.5));
        animator.tick(0.15, &mut cards);
        assert_eq!(cards.get(0).unwrap().transform.opacity, 1.0);
    }

    #[test]
    fn newer_tween_takes_over_overlapping_properties() {
        let mut cards = CardSet::numbered(1);
        let mut animator: Animator<()> = Animator::new();
        animator.to(0, Props::new().rotation(10.0).scale(0.5), TweenSpec::new(1.0), None);
        animator.to(0, Props::new().rotation(-5.0), TweenSpec::new(0.1), None);

        animator.tick(1.0, &mut cards);
        let transform = cards.get(0).unwrap().transform;
        assert_eq!(transform.rotation, -5.0);
        assert_eq!(transform.scale, 0.5);
    }

    #[test]
    fn completion_survives_full_overwrite() {
        let mut cards = CardSet::numbered(1);
        let mut animator = Animator::new();
        animator.to(0, Props::new().x(10.0), TweenSpec::new(1.0), Some(7));
        animator.to(0, Props::new().x(0.0), TweenSpec::new(1.0), None);
        assert_eq!(animator.tick(0.01, &mut cards), vec![7]);
    }

    #[test]
    fn zero_duration_completes_on_next_tick() {
        let mut cards = CardSet::numbered(1);
        let mut animator = Animator::new();
        animator.to(0, Props::new().scale(0.0), TweenSpec::new(0.0), Some(()));
        assert_eq!(animator.tick(0.0, &mut cards), vec![()]);
        assert_eq!(cards.get(0).unwrap().transform.scale, 0.0);
    }

    #[test]
    fn clear_discards_pending_completions() {
        let mut cards = CardSet::numbered(1);
        let mut animator = Animator::new();
        animator.to(0, Props::new().x(10.0), TweenSpec::new(1.0), Some(1));
        animator.clear();
        assert!(animator.tick(2.0, &mut cards).is_empty());
        assert_eq!(cards.get(0).unwrap().transform.x, 0.0);
    }

    #[test]
    fn missing_card_finishes_immediately() {
        let mut cards = CardSet::numbered(1);
        let mut animator = Animator::new();
        animator.to(5, Props::new().x(10.0), TweenSpec::new(1.0), Some("gone"));
        assert_eq!(animator.tick(0.01, &mut cards), vec!["gone"]);
    }
}
