//! Toolbar placement near a selection.
//!
//! The toolbar sits centered above the selection rectangle. Near the left and
//! right edges it is clamped inside its container (or the viewport); when
//! there is no room above, it flips below the selection.

use floatbar_core::{Point, Rect, Size};

/// Vertical gap between the selection and the toolbar.
pub const OFFSET_Y: f32 = 8.0;

/// Minimum distance kept from the container's edges.
pub const EDGE_MARGIN: f32 = 4.0;

/// Compute the toolbar's top-left corner for a selection rectangle.
///
/// `selection` and `container` are in the same (viewport) space. With a
/// container the result is container-relative and the horizontal range is
/// `[4, container.width - toolbar.width - 4]`; without one the viewport width
/// bounds the range. When the range is empty the left margin wins.
///
/// ```
/// use floatbar::position::place_near;
/// use floatbar_core::{Point, Rect, Size};
///
/// let toolbar = Size::new(200.0, 40.0);
/// let viewport = Size::new(1024.0, 768.0);
/// let selection = Rect::new(400.0, 300.0, 100.0, 20.0);
/// assert_eq!(place_near(selection, toolbar, None, viewport), Point::new(350.0, 252.0));
/// ```
pub fn place_near(selection: Rect, toolbar: Size, container: Option<Rect>, viewport: Size) -> Point {
    let mut left = selection.left() + selection.width() / 2.0 - toolbar.width / 2.0;
    let mut top = selection.top() - toolbar.height - OFFSET_Y;

    let bound_width = match container {
        Some(container) => {
            left -= container.left();
            top -= container.top();
            container.width()
        }
        None => viewport.width,
    };
    left = left
        .min(bound_width - toolbar.width - EDGE_MARGIN)
        .max(EDGE_MARGIN);

    if top < EDGE_MARGIN {
        let container_top = container.map_or(0.0, |c| c.top());
        top = selection.bottom() + OFFSET_Y - container_top;
    }

    Point::new(left, top)
}

/// Space the host keeps between the edited element and its own toolbar.
const HOST_PADDING: f32 = 10.0;

/// Extra headroom the host toolbar needs above the element.
const HOST_HEADROOM: f32 = 40.0;

/// Offset of a host-positioned toolbar relative to the edited element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostAnchor {
    /// Above the element, `top` px from its top edge.
    Above { top: f32 },
    /// Below the element, `bottom` px from its bottom edge.
    Below { bottom: f32 },
}

impl HostAnchor {
    pub const ABOVE: Self = Self::Above { top: -60.0 };
    pub const BELOW: Self = Self::Below { bottom: -6.0 };
}

/// Decide whether a host-positioned toolbar sits above or below the element.
///
/// The decision compares the room above the element inside the canvas with a
/// fixed threshold of `target_height + 50`; it does not measure the toolbar.
/// Without a canvas rectangle the canvas top is taken as 0.
pub fn host_anchor(element: Rect, target_height: f32, canvas: Option<Rect>) -> HostAnchor {
    let canvas_top = canvas.map_or(0.0, |c| c.top());
    if element.top() - canvas_top > target_height + HOST_PADDING + HOST_HEADROOM {
        HostAnchor::ABOVE
    } else {
        HostAnchor::BELOW
    }
}
