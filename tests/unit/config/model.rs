use super::*;
use crate::{
    animation::tween::Tweener,
    host::scene::SceneGraph,
    transition::{player::Direction, spec::TransitionKind},
};

const MENU: &str = r#"{
  "pages": [
    {
      "name": "Menu",
      "show_order": "reverse",
      "elements": [
        {
          "name": "Title",
          "transform": { "position": { "x": 0, "y": 120 } },
          "show": [
            { "kind": "move_y", "begin": 40, "end": 0, "duration": 0.4 },
            { "kind": "fade", "begin": 0, "end": 1, "duration": 0.3 }
          ],
          "derive_hide": "reversed_show",
          "delay_after_show": 0.1
        },
        {
          "name": "Play",
          "show": [{ "kind": "zoom", "begin": 0.5, "end": 1, "duration": 0.25, "ease": "OutBack" }],
          "hide": [{ "kind": "fade", "begin": 1, "end": 0, "duration": 0.2 }]
        }
      ]
    },
    { "name": "Settings", "registered": false }
  ],
  "first_page": { "page": "Menu" }
}"#;

#[test]
fn parses_with_defaults() {
    let cfg = StageConfig::from_json_str(MENU).unwrap();
    assert!(cfg.record_events);
    assert!(!cfg.log_requests);
    let first = cfg.first_page.as_ref().unwrap();
    assert_eq!(first.delay, DEFAULT_FIRST_PAGE_DELAY);

    let menu = &cfg.pages[0];
    assert!(menu.registered);
    assert_eq!(menu.show_order, Order::Reverse);
    assert_eq!(menu.hide_order, Order::Forward);
    assert!(menu.deactivate_on_hide_finished);
    assert!(menu.hide_on_init);
    assert_eq!(menu.elements[0].show[0].kind(), &TransitionKind::MoveY);
    assert_eq!(menu.elements[1].delay_after_show, None);
    assert!(!cfg.pages[1].registered);
    assert!(cfg.pages[1].elements.is_empty());
}

#[test]
fn load_spawns_nodes_and_resolves_defaults() {
    let cfg = StageConfig::from_json_str(MENU).unwrap();
    let stage = cfg.load(SceneGraph::new(), Tweener::new()).unwrap();

    let g = stage.host();
    assert_eq!(g.len(), 4);
    let menu_node = g.find("Menu").unwrap();
    let title = g.find("Title").unwrap();
    assert_eq!(g.node(title).unwrap().parent, Some(menu_node));
    assert_eq!(g.node(title).unwrap().transform.position.y, 120.0);

    let menu = stage.page_by_name("Menu").unwrap();
    // derived hide of Title mirrors its show set
    assert_eq!(menu.element(0).unwrap().hide_duration(), 0.4);
    // Play has no explicit delay: its own show duration
    assert_eq!(menu.chain_delay(1, Direction::Show), Some(0.25));
    // reverse show order: Play's chain delay, then Title's own duration
    assert!((menu.show_duration() - (0.25 + 0.4)).abs() < 1e-12);
    // forward hide order: Title's default delay (0.4) then Play's hide duration
    assert!((menu.hide_duration() - (0.4 + 0.2)).abs() < 1e-12);

    let settings = stage.page_by_name("Settings").unwrap();
    assert!(!stage.is_registered(settings.id()));
    assert!(stage.is_registered(menu.id()));
}

#[test]
fn rejects_duplicate_pages() {
    let json = r#"{ "pages": [ { "name": "A" }, { "name": "A" } ] }"#;
    let err = StageConfig::from_json_str(json).unwrap_err();
    assert!(matches!(err, PageflowError::Validation(_)));
}

#[test]
fn rejects_unknown_first_page() {
    let json = r#"{ "pages": [ { "name": "A" } ], "first_page": { "page": "B" } }"#;
    let err = StageConfig::from_json_str(json).unwrap_err();
    assert!(matches!(err, PageflowError::Config(_)));
}

#[test]
fn rejects_negative_durations_and_delays() {
    let bad_duration = r#"{ "pages": [ { "name": "A", "elements": [
        { "name": "e", "show": [ { "kind": "fade", "duration": -1 } ] } ] } ] }"#;
    assert!(matches!(
        StageConfig::from_json_str(bad_duration),
        Err(PageflowError::Serde(_))
    ));

    let bad_delay = r#"{ "pages": [ { "name": "A", "elements": [
        { "name": "e", "delay_after_hide": -0.5 } ] } ] }"#;
    assert!(matches!(
        StageConfig::from_json_str(bad_delay),
        Err(PageflowError::Validation(_))
    ));
}

#[test]
fn rejects_hide_and_derive_hide_together() {
    let json = r#"{ "pages": [ { "name": "A", "elements": [ {
        "name": "e",
        "show": [ { "kind": "fade", "duration": 0.2 } ],
        "hide": [ { "kind": "fade", "duration": 0.2 } ],
        "derive_hide": "same_as_show"
    } ] } ] }"#;
    assert!(StageConfig::from_json_str(json).is_err());
}

#[test]
fn unknown_kinds_load_and_still_count() {
    let json = r#"{ "pages": [ { "name": "A", "elements": [ {
        "name": "e",
        "show": [ { "kind": "wobble", "duration": 0.7 } ]
    } ] } ] }"#;
    let cfg = StageConfig::from_json_str(json).unwrap();
    let stage = cfg.load(SceneGraph::new(), Tweener::new()).unwrap();
    assert_eq!(stage.page_by_name("A").unwrap().show_duration(), 0.7);
}
