//! Shape selection policy for hint outlines.

use crate::hints::bounds::HotspotBounds;

/// Outline shape drawn around a single hotspot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintShape {
    Circle,
    Rectangle,
}

/// Which shape the highlighter draws around hotspots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeMode {
    /// Every hotspot gets a circle
    Circle,
    /// Every hotspot gets a rectangle
    Rectangle,
    /// Per-hotspot choice: elongated boxes get a rectangle, squarish ones a
    /// circle, split by the configured aspect-ratio threshold
    #[default]
    Mixed,
}

impl ShapeMode {
    /// Parse a config-file value. Unknown values are a configuration error
    /// the caller must treat as fatal - there is no silent default here.
    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "circle" => Ok(ShapeMode::Circle),
            "rectangle" => Ok(ShapeMode::Rectangle),
            "mixed" => Ok(ShapeMode::Mixed),
            other => Err(format!(
                "unrecognized shape mode {:?} (expected \"circle\", \"rectangle\" or \"mixed\")",
                other
            )),
        }
    }

    /// The config-file spelling of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeMode::Circle => "circle",
            ShapeMode::Rectangle => "rectangle",
            ShapeMode::Mixed => "mixed",
        }
    }
}

/// Pick the outline shape for one hotspot box.
///
/// In mixed mode a zero dimension counts as 1 so degenerate boxes (single
/// pixel row or column) select deterministically instead of dividing by
/// zero - and being maximally elongated they always pick a rectangle.
pub fn select_shape(bounds: &HotspotBounds, mode: ShapeMode, ratio_threshold: f32) -> HintShape {
    match mode {
        ShapeMode::Circle => HintShape::Circle,
        ShapeMode::Rectangle => HintShape::Rectangle,
        ShapeMode::Mixed => {
            let h = bounds.height().max(1) as f32;
            let w = bounds.width().max(1) as f32;
            if h / w > ratio_threshold || w / h > ratio_threshold {
                HintShape::Rectangle
            } else {
                HintShape::Circle
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(width: u32, height: u32) -> HotspotBounds {
        HotspotBounds {
            top: 0,
            left: 0,
            bottom: height,
            right: width,
            seen: true,
        }
    }

    #[test]
    fn test_parse_known_modes() {
        assert_eq!(ShapeMode::parse("circle").unwrap(), ShapeMode::Circle);
        assert_eq!(ShapeMode::parse("rectangle").unwrap(), ShapeMode::Rectangle);
        assert_eq!(ShapeMode::parse("mixed").unwrap(), ShapeMode::Mixed);
    }

    #[test]
    fn test_parse_unknown_mode_is_an_error() {
        let err = ShapeMode::parse("triangle").unwrap_err();
        assert!(err.contains("triangle"));
    }

    #[test]
    fn test_parse_round_trips_as_str() {
        for mode in [ShapeMode::Circle, ShapeMode::Rectangle, ShapeMode::Mixed] {
            assert_eq!(ShapeMode::parse(mode.as_str()).unwrap(), mode);
        }
    }

    #[test]
    fn test_forced_modes_ignore_geometry() {
        let b = boxed(100, 20);
        assert_eq!(select_shape(&b, ShapeMode::Circle, 1.5), HintShape::Circle);
        assert_eq!(
            select_shape(&b, ShapeMode::Rectangle, 1.5),
            HintShape::Rectangle
        );
    }

    #[test]
    fn test_mixed_elongated_box_gets_rectangle() {
        // height 100, width 20: ratio 5 > 1.5
        let b = boxed(20, 100);
        assert_eq!(
            select_shape(&b, ShapeMode::Mixed, 1.5),
            HintShape::Rectangle
        );
    }

    #[test]
    fn test_mixed_squarish_box_gets_circle() {
        // height 40, width 36: ratio ~1.11 < 1.5
        let b = boxed(36, 40);
        assert_eq!(select_shape(&b, ShapeMode::Mixed, 1.5), HintShape::Circle);
    }

    #[test]
    fn test_mixed_wide_box_gets_rectangle() {
        let b = boxed(100, 20);
        assert_eq!(
            select_shape(&b, ShapeMode::Mixed, 1.5),
            HintShape::Rectangle
        );
    }

    #[test]
    fn test_mixed_zero_height_does_not_divide_by_zero() {
        // height 0 counts as 1, ratio 10/1 = 10 > threshold
        let b = boxed(10, 0);
        assert_eq!(
            select_shape(&b, ShapeMode::Mixed, 1.5),
            HintShape::Rectangle
        );
    }

    #[test]
    fn test_mixed_zero_both_dimensions_gets_circle() {
        // 1x1 after substitution, ratio 1 below any sensible threshold
        let b = boxed(0, 0);
        assert_eq!(select_shape(&b, ShapeMode::Mixed, 1.5), HintShape::Circle);
    }
}
