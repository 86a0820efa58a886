//! Window inset state for the layout pass.
//!
//! The host reports how far system UI intrudes into the drawable area. The
//! engine keeps the last report and a revision that only advances when the
//! report actually changes, so repeating a notification is harmless.

/// Edge insets in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Insets {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Insets {
    pub const ZERO: Self = Self {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };

    /// Build from signed platform values. Negative values clamp to zero.
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        let clamp = |v: i32| v.max(0) as u32;
        Self {
            left: clamp(left),
            top: clamp(top),
            right: clamp(right),
            bottom: clamp(bottom),
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Per-edge maximum of two inset quads.
    pub fn max(self, other: Self) -> Self {
        Self {
            left: self.left.max(other.left),
            top: self.top.max(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// `[left, top, right, bottom]` as platform integers.
    pub fn to_array(self) -> [i32; 4] {
        let cast = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
        [
            cast(self.left),
            cast(self.top),
            cast(self.right),
            cast(self.bottom),
        ]
    }
}

/// The three inset regions reported with every layout-affecting event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WindowInsets {
    pub system_bars: Insets,
    pub ime: Insets,
    pub display_cutout: Insets,
}

impl WindowInsets {
    /// Parse the flat form: system bars, ime and cutout, each as left, top,
    /// right, bottom.
    pub fn from_args(args: [i32; 12]) -> Self {
        let quad = |i: usize| Insets::new(args[i], args[i + 1], args[i + 2], args[i + 3]);
        Self {
            system_bars: quad(0),
            ime: quad(4),
            display_cutout: quad(8),
        }
    }

    pub fn to_args(&self) -> [i32; 12] {
        let mut args = [0; 12];
        args[0..4].copy_from_slice(&self.system_bars.to_array());
        args[4..8].copy_from_slice(&self.ime.to_array());
        args[8..12].copy_from_slice(&self.display_cutout.to_array());
        args
    }

    /// Padding that keeps content clear of every region.
    pub fn safe_area(&self) -> Insets {
        self.system_bars.max(self.ime).max(self.display_cutout)
    }
}

/// Engine-side layout inputs.
#[derive(Debug, Clone, Default)]
pub struct LayoutState {
    insets: WindowInsets,
    revision: u64,
}

impl LayoutState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store new insets. Returns true if they differ from the stored ones,
    /// in which case the revision advances.
    pub fn apply_insets(&mut self, insets: WindowInsets) -> bool {
        if self.insets == insets {
            return false;
        }
        self.insets = insets;
        self.revision += 1;
        true
    }

    pub fn insets(&self) -> &WindowInsets {
        &self.insets
    }

    /// Advances once per effective inset change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn safe_area(&self) -> Insets {
        self.insets.safe_area()
    }
}
