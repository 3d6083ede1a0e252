use serde::Deserialize;
use tinct_theme::{
    apply_custom_properties, derive_properties, expand_custom_properties, Contrast, OutputFormat,
    RootStylesheet, StyleBlock, DEFAULT_PROPERTY_NAMES,
};

const THEME_CSS: &str = r#"
    :root {
        --primary: #1e66f5;
        --primary-light: #7287fd;
        --primary-dark: #114ab3;
        --secondary: #8839ef;
        --secondary-light: not-a-color;
        /* secondary-dark intentionally missing */
        --radius: 4px;
    }

    body { background: var(--primary); }
"#;

#[test]
fn default_names_expand_from_root_stylesheet() {
    let sheet = RootStylesheet::parse(THEME_CSS).unwrap();
    let block = expand_custom_properties(DEFAULT_PROPERTY_NAMES, &sheet);

    let names: Vec<&str> = block.properties().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["primary", "primary-light", "primary-dark", "secondary"]);
    assert_eq!(block.declarations().len(), 4 * 6);
}

#[test]
fn light_half_color_uses_its_own_saturation_divisor() {
    let sheet = RootStylesheet::parse(THEME_CSS).unwrap();
    let block = expand_custom_properties(["primary"], &sheet);
    let primary = block.get("primary").unwrap();

    assert_eq!(primary.derived.rgb_triplet, "30,102,245");
    assert_eq!(
        (primary.derived.h, primary.derived.s_percent, primary.derived.l_percent),
        (220, 73, 54)
    );
    assert_eq!(primary.derived.contrast(), Contrast::Black);
}

#[test]
fn accepted_string_forms_expand_identically() {
    let long = derive_properties("#ffffff").unwrap();
    for raw in ["#fff", "fff", "#ffff", "ffffff;", "  #FFFFFFFF  "] {
        assert_eq!(derive_properties(raw).unwrap(), long, "{raw}");
    }
}

#[test]
fn skipped_names_do_not_abort_the_batch() {
    let sheet = RootStylesheet::parse(THEME_CSS).unwrap();
    let mut sink = String::new();
    let count = apply_custom_properties(
        ["secondary-light", "primary-dark", "secondary-dark"],
        &sheet,
        &mut sink,
    );

    assert_eq!(count, 1);
    assert!(sink.contains("--primary-dark-rgb:17,74,179;"));
    assert!(!sink.contains("secondary-light"));
}

#[test]
fn render_formats_agree_on_declarations() {
    let sheet = RootStylesheet::parse(":root { --accent: #336699; }").unwrap();
    let block = expand_custom_properties(["accent"], &sheet);

    let css = block.render(OutputFormat::Css);
    assert_eq!(
        css,
        ":root {--accent-rgb:51,102,153;--accent-contrast:#ffffff;\
         --accent-contrast-rgb:255,255,255;--accent-h:210;--accent-s:50%;--accent-l:40%;}"
    );
    assert_eq!(
        block.render(OutputFormat::StyleTag),
        format!("<style x-extend-custom-properties>{css}</style>")
    );

    let pretty = block.render(OutputFormat::Pretty);
    for declaration in block.declarations() {
        assert!(pretty.contains(&declaration.to_css()), "{pretty}");
    }
    assert!(pretty.contains("--accent: #336699ff;"));
}

#[test]
fn empty_block_still_renders() {
    assert_eq!(StyleBlock::new().render(OutputFormat::StyleTag), "<style x-extend-custom-properties>:root {}</style>");
}

#[test]
fn output_format_deserializes_from_kebab_case() {
    #[derive(Deserialize)]
    struct Settings {
        format: OutputFormat,
    }

    let settings: Settings = toml::from_str(r#"format = "style-tag""#).unwrap();
    assert_eq!(settings.format, OutputFormat::StyleTag);
}
