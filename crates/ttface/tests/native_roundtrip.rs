//! Faces over the in-process engine and the synthesized test fonts

use pretty_assertions::assert_eq;
use ttface::{
    fonts_in_collection, Face, GlyphClass, LineMetrics, Module, ModuleConfig, Rect,
    ScriptMetrics, SharedModule, TableName, Tag,
};
use ttface_engine::NativeEngine;
use ttface_test_data::fonts;

fn module() -> SharedModule<NativeEngine> {
    let _ = env_logger::builder().is_test(true).try_init();
    Module::with_config(NativeEngine::new(), ModuleConfig::new(2).unwrap())
        .unwrap()
        .shared()
}

fn face(data: Vec<u8>, index: u32) -> Face<NativeEngine> {
    Face::new(module(), data, index)
}

#[test]
fn test_simple_font_properties() {
    let face = face(fonts::simple(), 0);

    assert!(face.is_regular().unwrap());
    assert!(!face.is_italic().unwrap());
    assert!(!face.is_variable().unwrap());
    assert_eq!(face.weight().unwrap(), 400);
    assert_eq!(face.width().unwrap(), 5);
    assert_eq!(face.italic_angle().unwrap(), None);
    assert_eq!(face.ascender().unwrap(), 800);
    assert_eq!(face.descender().unwrap(), -200);
    assert_eq!(face.height().unwrap(), 1000);
    assert_eq!(face.line_gap().unwrap(), 90);
    assert_eq!(face.typographic_ascender().unwrap(), Some(780));
    assert_eq!(face.typographic_descender().unwrap(), Some(-220));
    assert_eq!(face.vertical_ascender().unwrap(), Some(500));
    assert_eq!(face.vertical_line_gap().unwrap(), None);
    assert_eq!(face.units_per_em().unwrap(), Some(1000));
    assert_eq!(face.x_height().unwrap(), Some(500));
    assert_eq!(face.capital_height().unwrap(), Some(700));
    assert_eq!(face.number_of_glyphs().unwrap(), fonts::GLYPH_COUNT);
    assert!(face.has_table(TableName::VerticalOrigin).unwrap());
    assert!(!face.has_table(TableName::FontVariations).unwrap());
}

#[test]
fn test_simple_font_records() {
    let face = face(fonts::simple(), 0);

    assert_eq!(
        face.underline_metrics().unwrap(),
        Some(LineMetrics {
            position: -75,
            thickness: 50
        })
    );
    assert_eq!(
        face.strikeout_metrics().unwrap(),
        Some(LineMetrics {
            position: 300,
            thickness: 50
        })
    );
    assert_eq!(
        face.subscript_metrics().unwrap(),
        Some(ScriptMetrics {
            x_size: 650,
            y_size: 600,
            x_offset: 0,
            y_offset: 75
        })
    );
    assert_eq!(face.superscript_metrics().unwrap().map(|m| m.y_offset), Some(350));
    assert_eq!(
        face.global_bounding_box().unwrap(),
        Rect {
            x_min: -50,
            y_min: -250,
            x_max: 1050,
            y_max: 950
        }
    );
}

#[test]
fn test_names_decode() {
    let face = face(fonts::simple(), 0);
    let names = face.names().unwrap();

    assert_eq!(names.len(), 3);
    assert_eq!(names[0].platform_id, 1);
    assert_eq!(names[0].to_string_lossy(), None);
    assert_eq!(names[1].to_string_lossy().as_deref(), Some(fonts::FAMILY_NAME));
    assert_eq!(names[2].name_id, 2);
    assert_eq!(names[2].to_string_lossy().as_deref(), Some(fonts::SUBFAMILY_NAME));
}

#[test]
fn test_broken_name_record_is_dropped() {
    let face = face(fonts::broken_name(), 0);
    let names = face.names().unwrap();

    assert_eq!(names.len(), 2);
    assert_eq!(names[0].platform_id, 1);
    assert_eq!(names[1].name_id, 2);
}

#[test]
fn test_glyph_queries() {
    let face = face(fonts::simple(), 0);

    assert_eq!(face.glyph_index('A').unwrap(), Some(fonts::GLYPH_A));
    assert_eq!(face.glyph_index('B').unwrap(), None);
    assert_eq!(
        face.glyph_variation_index('A', fonts::VS1).unwrap(),
        Some(fonts::GLYPH_A_ALT)
    );
    assert_eq!(
        face.glyph_variation_index('A', fonts::VS2).unwrap(),
        Some(fonts::GLYPH_A)
    );

    let acute = face.glyph_index('\u{0301}').unwrap().unwrap();
    assert_eq!(face.glyph_class(acute).unwrap(), Some(GlyphClass::Mark));
    assert_eq!(face.glyph_mark_attachment_class(acute).unwrap(), 2);
    assert!(face.is_mark_glyph(acute).unwrap());
    assert_eq!(face.glyph_hor_advance(acute).unwrap(), None);
    assert_eq!(face.glyph_hor_side_bearing(acute).unwrap(), Some(150));
    assert_eq!(face.glyph_name(acute).unwrap(), Some(b"acutecomb".to_vec()));

    assert_eq!(face.glyph_hor_advance(fonts::GLYPH_A).unwrap(), Some(500));
    assert_eq!(face.glyph_ver_advance(fonts::GLYPH_A).unwrap(), Some(1000));
    assert_eq!(face.glyph_ver_side_bearing(fonts::GLYPH_A).unwrap(), Some(100));
    assert_eq!(face.glyph_y_origin(fonts::GLYPH_A).unwrap(), Some(900));
    assert_eq!(face.glyph_name(fonts::GLYPH_A).unwrap(), Some(b"A".to_vec()));
    assert_eq!(face.glyph_class(fonts::GLYPH_A).unwrap(), Some(GlyphClass::Base));
}

#[test]
fn test_glyph_past_the_last_is_unknown() {
    let face = face(fonts::simple(), 0);
    let past = fonts::GLYPH_COUNT;

    assert_eq!(face.glyph_hor_advance(past).unwrap(), None);
    assert_eq!(face.glyph_ver_advance(past).unwrap(), None);
    assert_eq!(face.glyph_y_origin(past).unwrap(), None);
    assert_eq!(face.glyph_name(past).unwrap(), None);
    assert_eq!(face.glyph_bounding_box(past).unwrap(), None);
    assert_eq!(face.glyph_svg_image(past).unwrap(), None);
}

#[test]
fn test_glyph_images_and_boxes() {
    let face = face(fonts::simple(), 0);
    let [x_min, y_min, x_max, y_max] = fonts::A_BBOX;

    assert_eq!(
        face.glyph_bounding_box(fonts::GLYPH_A).unwrap(),
        Some(Rect {
            x_min,
            y_min,
            x_max,
            y_max
        })
    );
    assert_eq!(face.glyph_bounding_box(fonts::NOTDEF).unwrap(), None);
    assert_eq!(
        face.glyph_svg_image(fonts::GLYPH_A).unwrap().as_deref(),
        Some(fonts::SVG_DOCUMENT)
    );
    assert_eq!(face.glyph_svg_image(fonts::GLYPH_ACUTE).unwrap(), None);
}

#[test]
fn test_variable_font() {
    let face = face(fonts::variable(), 0);

    assert!(face.is_variable().unwrap());
    assert!(face.is_italic().unwrap());
    assert!(face.is_bold().unwrap());
    assert!(face.is_monospaced().unwrap());
    assert_eq!(face.italic_angle().unwrap(), Some(-12.0));
    assert_eq!(face.x_height().unwrap(), None);
    assert_eq!(face.vertical_ascender().unwrap(), None);
    assert_eq!(face.glyph_name(fonts::GLYPH_A).unwrap(), None);

    let axes = face.variation_axes().unwrap();
    assert_eq!(axes.len(), 2);
    assert_eq!(axes[0].tag, Tag::new(b"wght"));
    assert_eq!(
        (axes[0].min_value, axes[0].default_value, axes[0].max_value),
        (100.0, 400.0, 900.0)
    );
    assert!(!axes[0].hidden);
    assert!(axes[1].hidden);

    let opaque = face.variation_axis_by_tag(Tag::new(b"XOPQ")).unwrap();
    assert_eq!(opaque.map(|axis| axis.name_id), Some(257));
    assert_eq!(face.variation_axis_by_tag(Tag::new(b"ital")).unwrap(), None);
}

#[test]
fn test_units_per_em_bounds_on_real_fonts() {
    for (upem, expected) in [(15, None), (16, Some(16)), (16384, Some(16384)), (16385, None)] {
        let face = face(fonts::bare(upem), 0);
        assert_eq!(face.units_per_em().unwrap(), expected, "upem {upem}");
    }
}

#[test]
fn test_collection_members() {
    let shared = module();
    let ttc = fonts::collection();

    assert_eq!(fonts_in_collection(&shared, &ttc).unwrap(), Some(2));
    assert_eq!(
        fonts_in_collection(&shared, &fonts::simple()).unwrap(),
        None
    );

    let first = Face::new(shared.clone(), ttc.clone(), 0);
    let second = Face::new(shared, ttc, 1);
    assert!(!first.is_variable().unwrap());
    assert!(second.is_variable().unwrap());
    assert_eq!(first.weight().unwrap(), 400);
    assert_eq!(second.weight().unwrap(), 700);
}

#[test]
fn test_faces_sharing_a_module_see_their_own_font() {
    let shared = module();
    let simple = Face::new(shared.clone(), fonts::simple(), 0);
    let bare = Face::new(shared, fonts::bare(2048), 0);

    assert_eq!(simple.units_per_em().unwrap(), Some(1000));
    assert_eq!(bare.units_per_em().unwrap(), Some(2048));
    assert_eq!(simple.glyph_index('A').unwrap(), Some(fonts::GLYPH_A));
    assert_eq!(bare.glyph_index('A').unwrap(), None);
    assert_eq!(bare.names().unwrap(), Vec::new());
}
