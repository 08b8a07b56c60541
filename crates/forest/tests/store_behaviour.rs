use forest::prelude::*;
use tracing_test::traced_test;

fn english() -> FocusForest {
    FocusForest::new(&ForestConfig {
        language: "en".into(),
        ..ForestConfig::default()
    })
    .unwrap()
}

#[test]
fn narrow_navigation_collapses_the_sidebar() {
    let app = english();
    app.on_viewport_changed(true);
    assert!(!app.sidebar_open());
    app.toggle_sidebar();
    app.set_page(Page::Rooms);
    assert_eq!(app.current_page(), Page::Rooms);
    assert!(!app.sidebar_open());

    app.on_viewport_changed(false);
    assert!(app.sidebar_open());
    app.set_page(Page::Stats);
    assert!(app.sidebar_open());
}

#[test]
fn starting_on_a_small_screen_hides_the_sidebar() {
    let app = FocusForest::new(&ForestConfig {
        viewport_width_px: 375,
        language: "en".into(),
        ..ForestConfig::default()
    })
    .unwrap();
    assert_eq!(app.layout(), LayoutMode::Narrow);
    assert!(!app.sidebar_open());
}

#[test]
fn unknown_page_id_is_a_validation_error() {
    let app = english();
    assert_eq!(
        app.set_page_id("garden"),
        Err(FocusError::Validation(ValidationError::UnknownPage(
            "garden".into()
        )))
    );
    assert_eq!(app.current_page(), Page::Dashboard);
}

#[test]
fn language_switch_retranslates_derived_text() {
    let app = english();
    app.set_page(Page::Settings);
    assert_eq!(app.page_title(), "Settings");

    app.set_language("zh-TW").unwrap();
    assert_eq!(app.language(), Language::TraditionalChinese);
    assert_eq!(app.page_title(), "設定");

    assert!(app.set_language("xx").is_err());
    assert_eq!(app.language(), Language::TraditionalChinese);
}

#[test]
fn forest_summary_counts_trees() {
    let app = english();
    for task in ["essay", "reading"] {
        app.start_session(task).unwrap();
        app.finish_session().unwrap();
    }
    assert_eq!(app.forest_summary(), "Task Completed! 2 tasks");
    app.set_language("zh-CN").unwrap();
    assert_eq!(app.forest_summary(), "任务完成！ 2 项任务");
}

#[test]
fn username_and_font_size_by_name() {
    let app = english();
    assert_eq!(app.username(), "Guest");
    app.set_username("Ada");
    assert_eq!(app.username(), "Ada");
    assert_eq!(app.set_font_size_named("small"), Ok(FontSize::Small));
    assert_eq!(app.font_size_units(), 14);
    assert!(app.set_font_size_named("tiny").is_err());
}

#[test]
fn style_vars_snapshot() {
    let app = english();
    app.set_theme_color("#3b82f6").unwrap();
    let vars = app.style_vars();
    assert_eq!(vars.primary_color, "#3b82f6");
    assert_eq!(vars.hover_color, "#3b82f6dd");
    assert_eq!(vars.base_font_size, 16);
}

#[cfg(feature = "config-file")]
#[test]
fn store_from_toml() {
    let app = forest::from_toml(
        r##"
        theme_color = "#f97316"
        language = "es"
        username = "Lina"
        font_size = "large"
        initial_page = "forest"
        "##,
    )
    .unwrap();
    assert_eq!(app.username(), "Lina");
    assert_eq!(app.font_size_units(), 18);
    assert_eq!(app.hover_color(), "#f97316dd");
    assert_eq!(app.current_page(), Page::Forest);
    assert_eq!(app.language(), Language::Spanish);
}

#[cfg(feature = "config-file")]
#[test]
fn bad_toml_fails_to_initialize() {
    assert!(matches!(
        forest::from_toml("language = \"xx\""),
        Err(InitError::Config(ConfigError::UnsupportedLanguage(_)))
    ));
}

#[traced_test]
#[test]
fn rejected_start_logs_a_warning() {
    let app = english();
    let _ = app.start_session("");
    assert!(logs_contain("intent rejected"));
    assert!(logs_contain("start_session"));
}
