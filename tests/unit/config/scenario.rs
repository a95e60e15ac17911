use super::*;

fn scenario(steps: &str, until: Option<f64>) -> Scenario {
    let until = until.map_or(String::new(), |u| format!(r#", "until": {u}"#));
    let json = format!(
        r#"{{
  "stage": {{
    "pages": [
      {{ "name": "A", "elements": [
        {{ "name": "a0", "show": [{{ "kind": "fade", "duration": 0.5 }}],
           "hide": [{{ "kind": "fade", "begin": 1, "end": 0, "duration": 0.4 }}],
           "delay_after_show": 0.2 }},
        {{ "name": "a1", "show": [{{ "kind": "fade", "duration": 0.3 }}], "delay_after_show": 0 }}
      ] }},
      {{ "name": "B", "elements": [
        {{ "name": "b0", "show": [{{ "kind": "move_x", "begin": -100, "end": 0, "duration": 0.25 }}] }}
      ] }}
    ]
  }},
  "steps": {steps}{until}
}}"#
    );
    Scenario::from_json_str(&json).unwrap()
}

fn first(report: &ScenarioReport, source: &str, signal: &str) -> f64 {
    report
        .timeline
        .iter()
        .find(|e| e.source == source && e.signal == signal)
        .map(|e| e.at)
        .unwrap()
}

#[test]
fn replays_requests_and_names_the_timeline() {
    let s = scenario(
        r#"[
          { "at": 0, "request": "keep_current_and_open", "page": "A" },
          { "at": 1, "request": "close_current_and_open", "page": "B" }
        ]"#,
        None,
    );
    let report = s.run(DEFAULT_STEP).unwrap();

    assert_eq!(report.steps.len(), 2);
    assert!(report.steps.iter().all(|s| s.outcome.is_applied()));
    assert_eq!(report.open_pages, vec!["B".to_string()]);

    assert!((first(&report, "A/a1", "show") - 0.2).abs() < 1e-6);
    assert!((first(&report, "A", "show_finished") - 0.5).abs() < 1e-6);
    assert!((first(&report, "A", "hide_start") - 1.0).abs() < 1e-6);
    // A's hide: a0's default chain delay (0.4) then a1, which has nothing to hide
    assert!((first(&report, "B", "show_start") - 1.4).abs() < 1e-6);
    assert!((first(&report, "B", "show_finished") - 1.65).abs() < 1e-6);

    let a = &report.durations[0];
    assert_eq!(a.page, "A");
    assert!((a.show - 0.5).abs() < 1e-12);
    assert!(report.end >= 1.65);
}

#[test]
fn rejected_requests_are_reported() {
    let s = scenario(
        r#"[ { "at": 0.5, "request": "close_current_only", "page": "A" } ]"#,
        Some(1.0),
    );
    let report = s.run(0.1).unwrap();
    assert_eq!(
        report.steps[0].outcome,
        StackOutcome::Rejected(crate::stage::stack::RejectReason::StackEmpty)
    );
    assert!((report.end - 1.0).abs() < 1e-9);
    assert!(report.open_pages.is_empty());
}

#[test]
fn same_input_same_timeline() {
    let s = scenario(
        r#"[
          { "at": 0, "request": "keep_current_and_open", "page": "A" },
          { "at": 0.1, "request": "keep_current_and_open", "page": "B" },
          { "at": 0.7, "request": "force_close", "page": "A" }
        ]"#,
        None,
    );
    assert_eq!(s.run(DEFAULT_STEP).unwrap(), s.run(DEFAULT_STEP).unwrap());
}

#[test]
fn validation_catches_bad_steps() {
    let mut s = scenario("[]", None);
    s.steps.push(ScenarioStep {
        at: 1.0,
        request: ScenarioRequest::ShowWithoutAnimation,
        page: "Nope".to_string(),
    });
    assert!(matches!(s.validate(), Err(PageflowError::Config(_))));

    s.steps[0].page = "A".to_string();
    s.steps.push(ScenarioStep {
        at: 0.5,
        request: ScenarioRequest::HideWithoutAnimation,
        page: "A".to_string(),
    });
    assert!(matches!(s.validate(), Err(PageflowError::Validation(_))));
    assert!(s.run(0.0).is_err());
}
