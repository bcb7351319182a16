/// Formats an optional statistic to 2 decimal places, or "—" if None or NaN.
/// Infinities print as `inf` and `-inf`.
pub fn fmt_stat(v: Option<f64>) -> String {
    match v {
        Some(x) if !x.is_nan() => format!("{x:.2}"),
        _ => "—".to_owned(),
    }
}

/// Compact axis tick text: integers without a fraction, others trimmed.
pub fn fmt_tick(v: f64) -> String {
    if !v.is_finite() {
        return String::new();
    }
    if v.fract() == 0.0 && v.abs() < 1e15 {
        return format!("{v:.0}");
    }
    let text = format!("{v:.4}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

/// Text carried by a caught panic payload.
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "the renderer panicked".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_stat() {
        assert_eq!(fmt_stat(Some(2.5)), "2.50");
        assert_eq!(fmt_stat(Some(1.0 / 3.0)), "0.33");
        assert_eq!(fmt_stat(None), "—");
        assert_eq!(fmt_stat(Some(f64::NAN)), "—");
        assert_eq!(fmt_stat(Some(f64::INFINITY)), "inf");
        assert_eq!(fmt_stat(Some(f64::NEG_INFINITY)), "-inf");
    }

    #[test]
    fn test_fmt_tick() {
        assert_eq!(fmt_tick(2020.0), "2020");
        assert_eq!(fmt_tick(0.25), "0.25");
        assert_eq!(fmt_tick(-1.5), "-1.5");
    }

    #[test]
    fn test_panic_message() {
        let caught = std::panic::catch_unwind(|| panic!("boom")).err();
        let text = caught.map(|p| panic_message(p.as_ref()));
        assert_eq!(text.as_deref(), Some("boom"));
    }
}
