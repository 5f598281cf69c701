//! Horizontal drag binding for the active card and release classification.

/// Swipe direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// -1 for left, +1 for right.
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Outcome of a drag release.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseAction {
    Commit(Direction),
    SnapBack,
}

/// Classify a release by its final horizontal offset. The threshold itself does not commit.
pub fn classify_release(end_x: f32, threshold: f32) -> ReleaseAction {
    if end_x > threshold {
        ReleaseAction::Commit(Direction::Right)
    } else if end_x < -threshold {
        ReleaseAction::Commit(Direction::Left)
    } else {
        ReleaseAction::SnapBack
    }
}

/// Rotation (degrees) for a drag offset: `max_deg` per viewport width of travel.
pub fn drag_rotation(x: f32, viewport_width: f32, max_deg: f32) -> f32 {
    if viewport_width <= 0.0 {
        return 0.0;
    }
    x / viewport_width * max_deg
}

/// Scale for a drag offset, shrinking linearly to 0 at `span_factor` viewport widths.
pub fn drag_scale(x: f32, viewport_width: f32, span_factor: f32) -> f32 {
    let span = viewport_width * span_factor;
    if span <= 0.0 {
        return 1.0;
    }
    (1.0 - x.abs() / span).max(0.0)
}

/// Drag constraints. Only the x axis moves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragConfig {
    pub min_x: f32,
    pub max_x: f32,
    pub inertia: bool,
    /// How far ahead (seconds) the release velocity is projected when inertia is on.
    pub inertia_projection_secs: f32,
}

impl DragConfig {
    /// Bounds of one viewport width on either side.
    pub fn horizontal(viewport_width: f32, inertia: bool, inertia_projection_secs: f32) -> Self {
        let width = viewport_width.max(0.0);
        Self {
            min_x: -width,
            max_x: width,
            inertia,
            inertia_projection_secs,
        }
    }

    fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min_x, self.max_x)
    }
}

/// Live drag state bound to one card.
#[derive(Clone, Debug, PartialEq)]
pub struct DragBinding {
    position: usize,
    config: DragConfig,
    offset: f32,
    velocity: f32,
    dragging: bool,
}

impl DragBinding {
    fn new(position: usize, config: DragConfig) -> Self {
        Self {
            position,
            config,
            offset: 0.0,
            velocity: 0.0,
            dragging: false,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn set_config(&mut self, config: DragConfig) {
        self.config = config;
        self.offset = self.config.clamp(self.offset);
    }

    /// Start a gesture from the card's current offset.
    pub fn begin(&mut self, start_x: f32) {
        self.dragging = true;
        self.offset = self.config.clamp(start_x);
        self.velocity = 0.0;
    }

    /// Move by `delta_x`, remembering the pointer velocity; returns the clamped offset.
    pub fn move_by(&mut self, delta_x: f32, velocity_x: f32) -> f32 {
        self.offset = self.config.clamp(self.offset + delta_x);
        self.velocity = if velocity_x.is_finite() { velocity_x } else { 0.0 };
        self.offset
    }

    /// End the gesture and return where the card comes to rest.
    pub fn finish(&mut self) -> f32 {
        self.dragging = false;
        let end_x = if self.config.inertia {
            self.config
                .clamp(self.offset + self.velocity * self.config.inertia_projection_secs)
        } else {
            self.offset
        };
        self.velocity = 0.0;
        end_x
    }
}

/// Holder of the single draggable binding. Acquiring always releases first.
#[derive(Debug, Default)]
pub struct ActiveSlot {
    binding: Option<DragBinding>,
}

impl ActiveSlot {
    pub fn acquire(&mut self, position: usize, config: DragConfig) -> &mut DragBinding {
        if let Some(previous) = self.release() {
            tracing::trace!("Released drag binding on card {}", previous.position);
        }
        tracing::trace!("Bound drag to card {position}");
        self.binding.insert(DragBinding::new(position, config))
    }

    pub fn release(&mut self) -> Option<DragBinding> {
        self.binding.take()
    }

    pub fn get(&self) -> Option<&DragBinding> {
        self.binding.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut DragBinding> {
        self.binding.as_mut()
    }

    pub fn position(&self) -> Option<usize> {
        self.binding.as_ref().map(DragBinding::position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_threshold_is_strict() {
        assert_eq!(classify_release(150.0, 150.0), ReleaseAction::SnapBack);
        assert_eq!(classify_release(-150.0, 150.0), ReleaseAction::SnapBack);
        assert_eq!(
            classify_release(151.0, 150.0),
            ReleaseAction::Commit(Direction::Right)
        );
        assert_eq!(
            classify_release(-151.0, 150.0),
            ReleaseAction::Commit(Direction::Left)
        );
        assert_eq!(classify_release(0.0, 150.0), ReleaseAction::SnapBack);
        assert_eq!(classify_release(149.9, 150.0), ReleaseAction::SnapBack);
    }

    #[test]
    fn rotation_and_scale_follow_offset() {
        assert_eq!(drag_rotation(400.0, 800.0, 20.0), 10.0);
        assert_eq!(drag_rotation(-800.0, 800.0, 20.0), -20.0);
        assert_eq!(drag_rotation(100.0, 0.0, 20.0), 0.0);

        assert_eq!(drag_scale(0.0, 800.0, 2.0), 1.0);
        assert_eq!(drag_scale(-800.0, 800.0, 2.0), 0.5);
        assert_eq!(drag_scale(1600.0, 800.0, 2.0), 0.0);
        assert_eq!(drag_scale(5000.0, 800.0, 2.0), 0.0);
    }

    #[test]
    fn offset_is_clamped_to_one_viewport_width() {
        let mut slot = ActiveSlot::default();
        let binding = slot.acquire(0, DragConfig::horizontal(300.0, false, 0.2));
        binding.begin(0.0);
        assert_eq!(binding.move_by(500.0, 0.0), 300.0);
        assert_eq!(binding.move_by(-900.0, 0.0), -300.0);
        assert_eq!(binding.finish(), -300.0);
    }

    #[test]
    fn inertia_projects_release_along_velocity() {
        let mut slot = ActiveSlot::default();
        let binding = slot.acquire(0, DragConfig::horizontal(1000.0, true, 0.2));
        binding.begin(0.0);
        binding.move_by(100.0, 400.0);
        assert_eq!(binding.finish(), 180.0);

        binding.begin(0.0);
        binding.move_by(100.0, 400.0);
        binding.set_config(DragConfig::horizontal(1000.0, false, 0.2));
        assert_eq!(binding.finish(), 100.0);
    }

    #[test]
    fn acquiring_replaces_previous_binding() {
        let mut slot = ActiveSlot::default();
        slot.acquire(0, DragConfig::horizontal(100.0, true, 0.2)).begin(0.0);
        slot.acquire(1, DragConfig::horizontal(100.0, true, 0.2));
        let binding = slot.get().unwrap();
        assert_eq!(binding.position(), 1);
        assert!(!binding.is_dragging());
        assert_eq!(slot.release().map(|b| b.position()), Some(1));
        assert!(slot.position().is_none());
    }
}
