/// Shown in place of the value of a cell whose formula is malformed.
pub const INVALID_FORMULA_TEXT: &str = "#INVALID FORMULA";

/// Shown in place of the value of a cell caught in a reference cycle.
pub const CYCLIC_TEXT: &str = "#ERROR CYCLIC";

/// Format a number for display.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "#NAN!".to_string()
    } else if n.is_infinite() {
        "#INF!".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e10 {
        format!("{:.0}", n)
    } else {
        format!("{:.2}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(14.0), "14");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(0.1 + 0.2), "0.30");
        assert_eq!(format_number(2.5), "2.50");
        assert_eq!(format_number(1e12), "1000000000000.00");
    }

    #[test]
    fn test_format_ieee_faults() {
        assert_eq!(format_number(f64::INFINITY), "#INF!");
        assert_eq!(format_number(f64::NEG_INFINITY), "#INF!");
        assert_eq!(format_number(f64::NAN), "#NAN!");
    }
}
