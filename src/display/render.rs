use crate::error::{Result, ShowktsError};
use crate::types::RenderedFrame;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::Point;
use u8g2_fonts::types::{FontColor, VerticalPosition};
use u8g2_fonts::{fonts, FontRenderer};

const LABEL_BASELINE: Point = Point::new(60, 80);
const VALUE_BASELINE: Point = Point::new(60, 160);

/// Draw a label with its value underneath on a blank frame
pub fn render_reading(label: &str, value: &str) -> Result<RenderedFrame> {
    let font = FontRenderer::new::<fonts::u8g2_font_logisoso42_tr>();
    let mut frame = RenderedFrame::new();
    draw_line(&font, &mut frame, label, LABEL_BASELINE)?;
    draw_line(&font, &mut frame, value, VALUE_BASELINE)?;
    Ok(frame)
}

fn draw_line(
    font: &FontRenderer,
    frame: &mut RenderedFrame,
    text: &str,
    baseline: Point,
) -> Result<()> {
    font.render(
        text,
        baseline,
        VerticalPosition::Baseline,
        FontColor::Transparent(BinaryColor::On),
        frame,
    )
    .map(|_| ())
    .map_err(|err| ShowktsError::Render(format!("cannot draw {:?}: {:?}", text, err)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_puts_ink_on_both_lines() {
        let frame = render_reading("Speed", "22.4").unwrap();

        let upper = (0..80).any(|y| (0..264).any(|x| frame.pixel(x, y)));
        let lower = (90..176).any(|y| (0..264).any(|x| frame.pixel(x, y)));
        assert!(upper, "label should be drawn above the first baseline");
        assert!(lower, "value should be drawn below the label");
    }

    #[test]
    fn test_nothing_left_of_margin() {
        let frame = render_reading("Speed", "0").unwrap();
        assert!((0..176).all(|y| (0..55).all(|x| !frame.pixel(x, y))));
    }

    #[test]
    fn test_empty_text_is_blank() {
        let frame = render_reading("", "").unwrap();
        assert_eq!(frame.ink(), 0);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        assert_eq!(
            render_reading("Speed", "6.3").unwrap(),
            render_reading("Speed", "6.3").unwrap()
        );
    }

    #[test]
    fn test_missing_glyph_is_an_error() {
        assert!(matches!(
            render_reading("Speed", "\u{2603}"),
            Err(ShowktsError::Render(_))
        ));
    }
}
