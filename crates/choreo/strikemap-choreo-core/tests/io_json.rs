//! Host-protocol JSON shapes for commands and emitted events.

use serde_json::json;
use strikemap_choreo_core::{Command, CoreEvent, Inputs, Outputs};

#[test]
fn commands_parse_from_host_json() {
    let raw = json!({
        "commands": [
            { "JumpTo": { "index": 2 } },
            "PlayAll",
            { "SetStyle": { "key": "darkmatter" } }
        ]
    });
    let inputs: Inputs = serde_json::from_value(raw).expect("inputs should parse");
    assert_eq!(inputs.commands.len(), 3);
    assert!(matches!(inputs.commands[0], Command::JumpTo { index: 2 }));
    assert!(matches!(inputs.commands[1], Command::PlayAll));
}

#[test]
fn empty_commands_default_when_absent() {
    let inputs: Inputs = serde_json::from_str("{}").expect("empty inputs should parse");
    assert!(inputs.commands.is_empty());
}

#[test]
fn events_serialize_with_stable_tags() {
    let mut out = Outputs::default();
    out.push_event(CoreEvent::TimelineJumped { index: 3 });
    out.push_event(CoreEvent::AutoplayFinished);
    let value = serde_json::to_value(&out).expect("outputs should serialize");
    assert_eq!(
        value["events"][0],
        json!({ "TimelineJumped": { "index": 3 } })
    );
    assert_eq!(value["events"][1], json!("AutoplayFinished"));
}
