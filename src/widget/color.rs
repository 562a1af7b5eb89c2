use egui::Color32;

/// Parses a CSS color: hex forms, named colors, `rgb()`/`hsl()` and friends.
pub fn parse_color(s: &str) -> Option<Color32> {
    let color: csscolorparser::Color = s.trim().parse().ok()?;
    let [r, g, b, a] = color.to_rgba8();
    Some(Color32::from_rgba_unmultiplied(r, g, b, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(parse_color("#fff"), Some(Color32::WHITE));
        assert_eq!(parse_color("#1E90FF"), Some(Color32::from_rgb(30, 144, 255)));
        assert_eq!(
            parse_color("#ff000080"),
            Some(Color32::from_rgba_unmultiplied(255, 0, 0, 128))
        );
    }

    #[test]
    fn test_parse_named_colors() {
        assert_eq!(parse_color("grey"), parse_color("gray"));
        assert_eq!(parse_color(" White "), Some(Color32::WHITE));
        assert_eq!(parse_color("steelblue"), Some(Color32::from_rgb(70, 130, 180)));
        assert_eq!(parse_color("navy"), Some(Color32::from_rgb(0, 0, 128)));
        assert_eq!(parse_color("transparent").map(|c| c.a()), Some(0));
    }

    #[test]
    fn test_parse_functional_forms() {
        assert_eq!(
            parse_color("rgb(10, 20, 30)"),
            Some(Color32::from_rgb(10, 20, 30))
        );
        assert_eq!(parse_color("hsl(0, 100%, 50%)"), Some(Color32::from_rgb(255, 0, 0)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_color("#12"), None);
        assert_eq!(parse_color("#zzzzzz"), None);
        assert_eq!(parse_color("chartreuse-ish"), None);
        assert_eq!(parse_color(""), None);
    }
}
