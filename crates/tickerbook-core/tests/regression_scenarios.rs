// crates/tickerbook-core/tests/regression_scenarios.rs
mod common;

use tickerbook_script::{format_output, parse_input_line, replay};

const INPUT: &str = include_str!("data/scenarios.csv");

struct Scenario {
    name: String,
    script: String,
    expected: Vec<String>,
}

/// Split the fixture on `#name:` headers; `#> ` lines are expected output.
fn load_scenarios() -> Vec<Scenario> {
    let mut scenarios: Vec<Scenario> = Vec::new();

    for line in INPUT.lines() {
        if let Some(name) = line.strip_prefix("#name:") {
            scenarios.push(Scenario {
                name: name.trim().to_string(),
                script: String::new(),
                expected: Vec::new(),
            });
            continue;
        }

        let Some(current) = scenarios.last_mut() else {
            continue;
        };
        if let Some(out) = line.strip_prefix("#> ") {
            current.expected.push(out.trim().to_string());
        } else if !line.starts_with('#') && !line.trim().is_empty() {
            current.script.push_str(line);
            current.script.push('\n');
        }
    }

    scenarios
}

#[test]
fn every_scenario_matches_reference_output() {
    let scenarios = load_scenarios();
    assert_eq!(scenarios.len(), 5, "fixture should hold five scenarios");

    for scenario in scenarios {
        let engine = common::engine();
        let actual = replay(&engine, &scenario.script);
        assert_eq!(
            actual, scenario.expected,
            "scenario {:?} diverged from reference output",
            scenario.name
        );
    }
}

#[test]
fn every_command_line_in_fixture_parses() {
    for scenario in load_scenarios() {
        for line in scenario.script.lines() {
            assert!(
                parse_input_line(line).is_some(),
                "scenario {:?}: unparsable line {line:?}",
                scenario.name
            );
        }
    }
}

#[test]
fn whole_fixture_on_one_engine_keeps_log_contiguous() {
    // Ids and execution sequences keep counting across scenarios when they
    // share an engine; the log must stay gap-free.
    let engine = common::engine();
    let lines = replay(&engine, INPUT);

    let trades = lines.iter().filter(|l| l.starts_with("T, ")).count();
    let acks = lines.iter().filter(|l| l.starts_with("A, ")).count();
    assert!(trades > 0, "should have some trades");
    assert_eq!(acks, 17, "every valid order is acknowledged");

    let log = engine.list_executions(0);
    let seqs: Vec<u64> = log.iter().map(|e| e.sequence).collect();
    let expected: Vec<u64> = (1..=log.len() as u64).collect();
    assert_eq!(seqs, expected);

    let listed = engine
        .process_message(tickerbook_core::InputMessage::ListExecutions(
            tickerbook_core::ExecutionQuery { since: 0 },
        ))
        .iter()
        .map(format_output)
        .count();
    assert_eq!(listed, log.len());
}
