//! The function families the graph can plot.

use serde::{Deserialize, Serialize};
use std::fmt;

/// World-space function `y = f(x)`.
pub trait Curve {
    fn eval(&self, x: f32) -> f32;

    /// Evaluates the curve in pixel terms: `p` and the result are both
    /// distances from the origin in pixels, with `scaled_unit` pixels per
    /// world unit.
    fn eval_pixels(&self, p: f32, scaled_unit: f32) -> f32 {
        self.eval(p / scaled_unit) * scaled_unit
    }
}

impl<F: Fn(f32) -> f32> Curve for F {
    fn eval(&self, x: f32) -> f32 {
        self(x)
    }
}

/// The built-in curves, selected from configuration or the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum CurveKind {
    #[default]
    Exponential,
    Sine,
    Cosine,
    Tangent,
    /// Natural logarithm. Undefined for `x <= 0`.
    Logarithm,
    Power {
        exponent: f32,
    },
}

impl CurveKind {
    /// One of each family, for pickers.
    pub const ALL: [CurveKind; 6] = [
        CurveKind::Exponential,
        CurveKind::Sine,
        CurveKind::Cosine,
        CurveKind::Tangent,
        CurveKind::Logarithm,
        CurveKind::Power { exponent: 2.0 },
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CurveKind::Exponential => "Exponential",
            CurveKind::Sine => "Sine",
            CurveKind::Cosine => "Cosine",
            CurveKind::Tangent => "Tangent",
            CurveKind::Logarithm => "Logarithm",
            CurveKind::Power { .. } => "Power",
        }
    }

    /// Whether `other` is the same family, ignoring parameters.
    pub fn same_family(&self, other: &CurveKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Parses a family name as accepted on the command line, e.g. `exp`,
    /// `sine` or `power:3`.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim().to_lowercase();
        let (name, arg) = match input.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (input.as_str(), None),
        };

        let kind = match name {
            "exp" | "exponential" => CurveKind::Exponential,
            "sin" | "sine" => CurveKind::Sine,
            "cos" | "cosine" => CurveKind::Cosine,
            "tan" | "tangent" => CurveKind::Tangent,
            "ln" | "log" | "logarithm" => CurveKind::Logarithm,
            "pow" | "power" => {
                let exponent = match arg {
                    Some(arg) => arg.parse().ok()?,
                    None => 2.0,
                };
                return Some(CurveKind::Power { exponent });
            }
            _ => return None,
        };

        arg.is_none().then_some(kind)
    }
}

impl Curve for CurveKind {
    fn eval(&self, x: f32) -> f32 {
        match *self {
            CurveKind::Exponential => x.exp(),
            CurveKind::Sine => x.sin(),
            CurveKind::Cosine => x.cos(),
            CurveKind::Tangent => x.tan(),
            CurveKind::Logarithm => x.ln(),
            CurveKind::Power { exponent } => x.powf(exponent),
        }
    }
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveKind::Exponential => f.write_str("e^x"),
            CurveKind::Sine => f.write_str("sin(x)"),
            CurveKind::Cosine => f.write_str("cos(x)"),
            CurveKind::Tangent => f.write_str("tan(x)"),
            CurveKind::Logarithm => f.write_str("ln(x)"),
            CurveKind::Power { exponent } => write!(f, "x^{exponent}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponential_in_pixels_is_one_unit_at_origin() {
        let exp = CurveKind::Exponential;
        assert_eq!(exp.eval_pixels(0.0, 50.0), 50.0);
        assert_eq!(exp.eval_pixels(0.0, 100.0), 100.0);
    }

    #[test]
    fn pixel_shape_is_zoom_invariant() {
        let exp = CurveKind::Exponential;
        for scaled_unit in [2.5, 25.0, 50.0, 100.0, 400.0] {
            for x in [-3.0_f32, -0.5, 0.0, 0.75, 2.0] {
                let normalized = exp.eval_pixels(x * scaled_unit, scaled_unit) / scaled_unit;
                assert!((normalized - x.exp()).abs() < 1e-4 * x.exp().max(1.0));
            }
        }
    }

    #[test]
    fn logarithm_is_undefined_left_of_zero() {
        assert!(CurveKind::Logarithm.eval(-1.0).is_nan());
        assert_eq!(CurveKind::Logarithm.eval(1.0), 0.0);
    }

    #[test]
    fn closures_are_curves() {
        let line = |x: f32| 2.0 * x + 1.0;
        assert_eq!(line.eval(3.0), 7.0);
        assert_eq!(line.eval_pixels(50.0, 50.0), 150.0);
    }

    #[test]
    fn parses_cli_names() {
        assert_eq!(CurveKind::parse("exp"), Some(CurveKind::Exponential));
        assert_eq!(CurveKind::parse(" Sine "), Some(CurveKind::Sine));
        assert_eq!(CurveKind::parse("ln"), Some(CurveKind::Logarithm));
        assert_eq!(CurveKind::parse("power"), Some(CurveKind::Power { exponent: 2.0 }));
        assert_eq!(CurveKind::parse("pow:3"), Some(CurveKind::Power { exponent: 3.0 }));
        assert_eq!(CurveKind::parse("pow:x"), None);
        assert_eq!(CurveKind::parse("sin:2"), None);
        assert_eq!(CurveKind::parse("sinc"), None);
    }

    #[test]
    fn family_comparison_ignores_exponent() {
        let square = CurveKind::Power { exponent: 2.0 };
        let cube = CurveKind::Power { exponent: 3.0 };
        assert!(square.same_family(&cube));
        assert!(!square.same_family(&CurveKind::Sine));
    }
}
