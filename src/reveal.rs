//! Visibility observation for reveal-on-scroll effects
//!
//! Targets register a rectangle; each evaluation against a viewport reports
//! only the targets whose visibility changed since the previous evaluation.
//! Nothing here touches a real window, so the effect is testable headless.

/// Axis-aligned rectangle, origin top-left, in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        (right >= x && bottom >= y).then(|| Rect::new(x, y, right - x, bottom - y))
    }
}

/// Grows (positive) or shrinks (negative) the viewport before testing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RootMargin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl RootMargin {
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn apply(&self, root: Rect) -> Rect {
        Rect::new(
            root.x - self.left,
            root.y - self.top,
            root.width + self.left + self.right,
            root.height + self.top + self.bottom,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityChange<T> {
    pub target: T,
    pub visibility: Visibility,
    /// Fraction of the target inside the margin-adjusted viewport
    pub ratio: f32,
}

/// Reports visible / hidden transitions for observed targets
pub trait VisibilityObserver<T> {
    /// Start observing `target`, or move it if already observed
    fn observe(&mut self, target: T, rect: Rect);

    /// Stop observing; returns false if `target` was not observed
    fn unobserve(&mut self, target: &T) -> bool;

    /// Test every target against `viewport` and report the ones that changed
    fn evaluate(&mut self, viewport: Rect) -> Vec<VisibilityChange<T>>;
}

#[derive(Debug, Clone)]
struct Observed<T> {
    target: T,
    rect: Rect,
    last: Option<Visibility>,
}

/// Ratio-threshold observer with a root margin
///
/// A target is visible when at least `threshold` of its area lies inside the
/// viewport after the margin is applied. The first evaluation after
/// `observe` always reports the target's state.
#[derive(Debug, Clone)]
pub struct IntersectionObserver<T> {
    threshold: f32,
    margin: RootMargin,
    targets: Vec<Observed<T>>,
}

impl<T> IntersectionObserver<T> {
    pub const DEFAULT_THRESHOLD: f32 = 0.1;
    pub const DEFAULT_MARGIN: RootMargin = RootMargin::new(0.0, 0.0, -50.0, 0.0);

    pub fn new(threshold: f32, margin: RootMargin) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            margin,
            targets: Vec::new(),
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn margin(&self) -> RootMargin {
        self.margin
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Fraction of `rect` inside `root`; degenerate targets count as fully in or out
    fn ratio(rect: &Rect, root: &Rect) -> f32 {
        let Some(overlap) = rect.intersection(root) else {
            return 0.0;
        };
        let area = rect.area();
        if area == 0.0 {
            return 1.0;
        }
        overlap.area() / area
    }

    fn classify(&self, ratio: f32, intersects: bool) -> Visibility {
        if intersects && ratio >= self.threshold {
            Visibility::Visible
        } else {
            Visibility::Hidden
        }
    }
}

impl<T> Default for IntersectionObserver<T> {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD, Self::DEFAULT_MARGIN)
    }
}

impl<T: Clone + PartialEq> VisibilityObserver<T> for IntersectionObserver<T> {
    fn observe(&mut self, target: T, rect: Rect) {
        match self.targets.iter_mut().find(|o| o.target == target) {
            Some(observed) => observed.rect = rect,
            None => self.targets.push(Observed {
                target,
                rect,
                last: None,
            }),
        }
    }

    fn unobserve(&mut self, target: &T) -> bool {
        let before = self.targets.len();
        self.targets.retain(|o| o.target != *target);
        self.targets.len() != before
    }

    fn evaluate(&mut self, viewport: Rect) -> Vec<VisibilityChange<T>> {
        let root = self.margin.apply(viewport);
        let mut changes = Vec::new();

        for i in 0..self.targets.len() {
            let rect = self.targets[i].rect;
            let intersects = rect.intersection(&root).is_some() && root.area() > 0.0;
            let ratio = if intersects { Self::ratio(&rect, &root) } else { 0.0 };
            let visibility = self.classify(ratio, intersects);

            let observed = &mut self.targets[i];
            if observed.last != Some(visibility) {
                observed.last = Some(visibility);
                changes.push(VisibilityChange {
                    target: observed.target.clone(),
                    visibility,
                    ratio,
                });
            }
        }

        changes
    }
}

/// Remembers every target that has ever been visible
///
/// Mirrors a one-way "reveal" class: once set it is never removed.
#[derive(Debug, Clone)]
pub struct RevealLatch<T> {
    revealed: Vec<T>,
}

impl<T: Clone + PartialEq> RevealLatch<T> {
    pub fn new() -> Self {
        Self {
            revealed: Vec::new(),
        }
    }

    /// Latch the visible changes; returns the targets revealed for the first time
    pub fn apply(&mut self, changes: &[VisibilityChange<T>]) -> Vec<T> {
        let mut newly = Vec::new();
        for change in changes {
            if change.visibility == Visibility::Visible && !self.is_revealed(&change.target) {
                self.revealed.push(change.target.clone());
                newly.push(change.target.clone());
            }
        }
        newly
    }

    pub fn is_revealed(&self, target: &T) -> bool {
        self.revealed.contains(target)
    }

    pub fn revealed(&self) -> &[T] {
        &self.revealed
    }
}

impl<T: Clone + PartialEq> Default for RevealLatch<T> {
    fn default() -> Self {
        Self::new()
    }
}
