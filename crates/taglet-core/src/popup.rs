// ABOUTME: Constraint-aware placement of the suggestion panel around its anchor
// ABOUTME: Scores each side by available space with a fixed preference order

use taglet_types::{Bounds, Point, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupPlacement {
    Below,
    Above,
    Right,
    Left,
    /// Pick the best-scoring side
    Auto,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopupConstraints {
    /// Minimum distance from the viewport edges and the anchor
    pub margin: f32,
    /// Height of the text line the anchor sits on; the panel never covers it
    pub line_height: f32,
    pub max_width: f32,
    pub max_height: f32,
    pub min_width: f32,
    pub min_height: f32,
    pub placement: PopupPlacement,
}

impl Default for PopupConstraints {
    fn default() -> Self {
        Self {
            margin: 8.0,
            line_height: 20.0,
            max_width: 400.0,
            max_height: 300.0,
            min_width: 200.0,
            min_height: 100.0,
            placement: PopupPlacement::Auto,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvailableSpace {
    pub above: f32,
    pub below: f32,
    pub left: f32,
    pub right: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopupPosition {
    pub bounds: Bounds,
    /// Side actually used; never `Auto`
    pub placement: PopupPlacement,
    /// The panel did not fully fit on the chosen side
    pub constrained: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PopupPositioner {
    constraints: PopupConstraints,
}

impl PopupPositioner {
    pub fn new(constraints: PopupConstraints) -> Self {
        Self { constraints }
    }

    pub fn with_placement(mut self, placement: PopupPlacement) -> Self {
        self.constraints.placement = placement;
        self
    }

    pub fn constraints(&self) -> &PopupConstraints {
        &self.constraints
    }

    pub fn calculate_position(
        &self,
        anchor: Point,
        content_size: Size,
        viewport: Bounds,
    ) -> PopupPosition {
        let space = self.available_space(anchor, viewport);
        let size = self.clamp_size(content_size);

        let placement = match self.constraints.placement {
            PopupPlacement::Auto => self.best_placement(size, &space),
            placement => placement,
        };

        let margin = self.constraints.margin;
        let (origin, constrained) = match placement {
            PopupPlacement::Above => (
                Point::new(
                    self.constrain_horizontal(anchor.x, size.width, viewport),
                    anchor.y - size.height - margin,
                ),
                space.above < size.height,
            ),
            PopupPlacement::Right => (
                Point::new(
                    anchor.x + margin,
                    self.off_anchor_line(anchor.y, size.height, viewport),
                ),
                space.right < size.width,
            ),
            PopupPlacement::Left => (
                Point::new(
                    anchor.x - size.width - margin,
                    self.off_anchor_line(anchor.y, size.height, viewport),
                ),
                space.left < size.width,
            ),
            PopupPlacement::Below | PopupPlacement::Auto => (
                Point::new(
                    self.constrain_horizontal(anchor.x, size.width, viewport),
                    anchor.y + self.constraints.line_height + margin,
                ),
                space.below < size.height,
            ),
        };

        let placement = match placement {
            PopupPlacement::Auto => PopupPlacement::Below,
            placement => placement,
        };

        PopupPosition {
            bounds: Bounds::new(origin, size),
            placement,
            constrained,
        }
    }

    fn available_space(&self, anchor: Point, viewport: Bounds) -> AvailableSpace {
        let margin = self.constraints.margin;
        AvailableSpace {
            above: (anchor.y - viewport.origin.y - margin).max(0.0),
            below: (viewport.bottom() - anchor.y - self.constraints.line_height - margin).max(0.0),
            left: (anchor.x - viewport.origin.x - margin).max(0.0),
            right: (viewport.right() - anchor.x - margin).max(0.0),
        }
    }

    fn clamp_size(&self, content: Size) -> Size {
        let c = &self.constraints;
        Size::new(
            content.width.max(c.min_width).min(c.max_width),
            content.height.max(c.min_height).min(c.max_height),
        )
    }

    fn best_placement(&self, size: Size, space: &AvailableSpace) -> PopupPlacement {
        [
            PopupPlacement::Below,
            PopupPlacement::Right,
            PopupPlacement::Above,
            PopupPlacement::Left,
        ]
        .into_iter()
        .map(|placement| (placement, score_placement(placement, size, space)))
        .fold(None, |best: Option<(PopupPlacement, f32)>, candidate| match best {
            Some(best) if best.1 >= candidate.1 => Some(best),
            _ => Some(candidate),
        })
        .map_or(PopupPlacement::Below, |(placement, _)| placement)
    }

    /// Left-align on the anchor, shifted back inside the viewport if needed
    fn constrain_horizontal(&self, anchor_x: f32, width: f32, viewport: Bounds) -> f32 {
        let margin = self.constraints.margin;
        let max_x = viewport.right() - margin - width;
        anchor_x.min(max_x).max(viewport.origin.x + margin)
    }

    /// Top edge for a side placement: under the anchor line if it fits, else above it
    fn off_anchor_line(&self, anchor_y: f32, height: f32, viewport: Bounds) -> f32 {
        let margin = self.constraints.margin;
        let under = anchor_y + self.constraints.line_height + margin;
        let over = anchor_y - margin - height;

        if under + height <= viewport.bottom() - margin || over < viewport.origin.y + margin {
            under
        } else {
            over
        }
    }
}

/// Higher is better; full fit dominates, ties go Below > Right > Above > Left
fn score_placement(placement: PopupPlacement, size: Size, space: &AvailableSpace) -> f32 {
    let (room, needed) = match placement {
        PopupPlacement::Below => (space.below, size.height),
        PopupPlacement::Above => (space.above, size.height),
        PopupPlacement::Right => (space.right, size.width),
        PopupPlacement::Left => (space.left, size.width),
        PopupPlacement::Auto => (0.0, 1.0),
    };

    let fit = if needed <= 0.0 {
        1.0
    } else {
        (room / needed).min(1.0)
    };

    let preference = match placement {
        PopupPlacement::Below => 3.0,
        PopupPlacement::Right => 2.0,
        PopupPlacement::Above => 1.0,
        PopupPlacement::Left | PopupPlacement::Auto => 0.0,
    };

    fit * 10.0 + preference
}
