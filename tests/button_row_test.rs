use wave_folio::page::{ButtonRow, LinkButton, Rect, Theme, default_links};

fn row() -> ButtonRow {
    ButtonRow::new(Theme::default(), default_links())
}

#[test]
fn default_links_point_to_the_contacts() {
    let links = default_links();
    let labels: Vec<_> = links.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, ["Contact", "Github", "LinkedIn"]);
    assert_eq!(links[0].href, "mailto:me@alejandrina.me");
    assert_eq!(links[1].href, "https://www.github.com/agonzalezreyes/");
    assert_eq!(links[2].href, "https://www.linkedin.com/in/alegore/");
}

#[test]
fn buttons_are_at_least_min_width() {
    let row = row();
    let theme = row.theme();
    assert_eq!(row.button_width(""), theme.min_width);
    let long = row.button_width("LinkedIn");
    assert_eq!(long, 8.0 * theme.glyph_width + 2.0 * theme.padding_x);
}

#[test]
fn row_is_centred_with_gaps_only_between_buttons() {
    let row = row();
    let theme = row.theme().clone();
    let rects = row.layout(1000, 800, 1.0);
    assert_eq!(rects.len(), 3);

    for pair in rects.windows(2) {
        assert!((pair[1].x - pair[0].right() - theme.spacing).abs() < 1e-4);
    }
    let left = rects[0].x;
    let right = 1000.0 - rects[2].right();
    assert!((left - right).abs() < 1e-4, "left margin {left}, right margin {right}");

    for rect in &rects {
        assert_eq!(rect.height, theme.button_height);
        assert_eq!(rect.y + rect.height, 800.0 - theme.bottom_margin);
    }
}

#[test]
fn layout_scales_with_the_scale_factor() {
    let row = row();
    let single = row.layout(2000, 1000, 1.0);
    let double = row.layout(2000, 1000, 2.0);
    for (a, b) in single.iter().zip(&double) {
        assert!((b.width - 2.0 * a.width).abs() < 1e-4);
        assert!((b.height - 2.0 * a.height).abs() < 1e-4);
    }
}

#[test]
fn empty_row_has_no_layout() {
    let row = ButtonRow::new(Theme::default(), Vec::new());
    assert!(row.is_empty());
    assert!(row.layout(800, 600, 1.0).is_empty());
}

#[test]
fn hit_testing_finds_the_button_under_the_cursor() {
    let rects = row().layout(1000, 800, 1.0);
    for (i, rect) in rects.iter().enumerate() {
        let (x, y) = rect.center();
        assert_eq!(ButtonRow::hit(&rects, x, y), Some(i));
    }
    // the gap between two buttons
    let gap_x = rects[0].right() + 1.0;
    assert_eq!(ButtonRow::hit(&rects, gap_x, rects[0].center().1), None);
    assert_eq!(ButtonRow::hit(&rects, 0.0, 0.0), None);
}

#[test]
fn rect_edges() {
    let rect = Rect {
        x: 10.0,
        y: 20.0,
        width: 30.0,
        height: 40.0,
    };
    assert!(rect.contains(10.0, 20.0));
    assert!(!rect.contains(40.0, 30.0));
    assert!(!rect.contains(20.0, 60.0));
    assert!(rect.contains(39.9, 59.9));
}

#[test]
fn hovered_button_is_highlighted() {
    let row = row();
    let theme = row.theme().clone();
    let rects = row.layout(1000, 800, 1.0);
    let outlines = row.outlines(&rects, 1.0, Some(1));
    assert_eq!(outlines.len(), 3);

    assert_eq!(outlines[1].color[3], theme.primary[3]);
    assert_eq!(outlines[1].shape[2], theme.hover_fill);
    for i in [0, 2] {
        assert_eq!(outlines[i].color[3], theme.primary[3] * theme.border_opacity);
        assert_eq!(outlines[i].shape[2], 0.0);
    }
    assert_eq!(outlines[0].rect, [rects[0].x, rects[0].y, rects[0].width, rects[0].height]);
}

#[test]
fn captions_are_upper_case() {
    let row = row();
    assert_eq!(row.caption(0).as_deref(), Some("CONTACT"));
    assert_eq!(row.caption(3), None);
}

#[test]
fn opening_links() {
    assert!(LinkButton::new("Github", "https://www.github.com/agonzalezreyes/").open().is_ok());
    assert!(LinkButton::new("Nowhere", "").open().is_err());
}
