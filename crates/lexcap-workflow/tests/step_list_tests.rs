use lexcap_workflow::export::write_export;
use lexcap_workflow::{BuilderState, NodeCategory, Palette, StepListBuilder, WorkflowError, UNTITLED};
use tempfile::TempDir;

fn palette() -> Palette {
    Palette::builtin().expect("palette")
}

fn labels(builder: &StepListBuilder) -> Vec<&str> {
    builder.steps().iter().map(|s| s.node.label.as_str()).collect()
}

fn orders_match_positions(builder: &StepListBuilder) -> bool {
    builder.steps().iter().enumerate().all(|(i, s)| s.order == i)
}

#[test]
fn builtin_palette_and_templates() {
    let p = palette();
    assert_eq!(p.nodes().len(), 15);
    for category in NodeCategory::ALL {
        assert_eq!(p.by_category(Some(category)).len(), 3, "{category}");
    }
    assert_eq!(p.by_category(None).len(), 15);

    assert_eq!(p.templates().len(), 3);
    for t in p.templates() {
        assert_eq!(t.nodes.len(), 7);
        assert_eq!(t.connections.len(), 7);
    }
    assert!(matches!(p.template("nope"), Err(WorkflowError::UnknownTemplate(_))));
    assert_eq!(p.node("risk-analysis").unwrap().category, NodeCategory::Process);
}

#[test]
fn append_then_remove_restores_prior_steps() {
    let p = palette();
    let mut b = StepListBuilder::new();
    assert_eq!(b.state(), BuilderState::Empty);
    b.append(p.node("doc-upload").unwrap());
    b.append(p.node("doc-review").unwrap());
    let before = labels(&b).iter().map(|s| (*s).to_string()).collect::<Vec<_>>();

    let id = b.append(p.node("generate-report").unwrap());
    assert_eq!(b.len(), 3);
    assert_eq!(b.steps()[2].order, 2);

    b.remove(&id).unwrap();
    assert_eq!(labels(&b), before);
    assert!(orders_match_positions(&b));
    assert_eq!(b.state(), BuilderState::HasSteps);
}

#[test]
fn insert_and_remove_renumber_orders() {
    let p = palette();
    let mut b = StepListBuilder::new();
    let first = b.append(p.node("doc-upload").unwrap());
    b.append(p.node("store-document").unwrap());
    b.insert_at(1, p.node("risk-analysis").unwrap());
    b.insert_at(99, p.node("case-update").unwrap());
    assert_eq!(labels(&b), vec!["Document Upload", "Risk Analysis", "Store Document", "Update Case"]);
    assert!(orders_match_positions(&b));

    b.remove(&first).unwrap();
    assert_eq!(b.steps()[0].order, 0);
    assert!(orders_match_positions(&b));
    assert!(matches!(b.remove("step-missing"), Err(WorkflowError::UnknownStep(_))));
}

#[test]
fn drag_and_drop_inserts_at_the_drop_slot() {
    let p = palette();
    let mut b = StepListBuilder::new();
    b.append(p.node("doc-upload").unwrap());
    b.append(p.node("store-document").unwrap());

    assert_eq!(b.drop(0), None);
    assert_eq!(b.len(), 2);

    b.begin_drag(p.node("compliance-check").unwrap());
    b.drag_over(1);
    assert_eq!(b.drop_target(), Some(1));
    let id = b.drop(1).expect("dropped");
    assert!(!b.is_dragging());
    assert_eq!(b.steps()[1].id, id);
    assert_eq!(b.steps()[1].node.label, "Compliance Check");
    assert!(orders_match_positions(&b));
}

#[test]
fn move_step_reorders() {
    let p = palette();
    let mut b = StepListBuilder::new();
    let a = b.append(p.node("doc-upload").unwrap());
    b.append(p.node("doc-review").unwrap());
    b.append(p.node("store-document").unwrap());
    b.move_step(&a, 2).unwrap();
    assert_eq!(labels(&b), vec!["Document Review", "Store Document", "Document Upload"]);
    assert!(orders_match_positions(&b));
}

#[test]
fn step_nodes_get_fresh_ids() {
    let p = palette();
    let mut b = StepListBuilder::new();
    let node = p.node("doc-upload").unwrap();
    b.append(node);
    b.append(node);
    assert_ne!(b.steps()[0].node.id, node.id);
    assert_ne!(b.steps()[0].node.id, b.steps()[1].node.id);
    assert_ne!(b.steps()[0].id, b.steps()[1].id);
}

#[test]
fn template_load_clear_and_run() {
    let p = palette();
    let mut b = StepListBuilder::new();
    b.load_template(p.template("contract-review").unwrap());
    assert_eq!(b.name(), "Contract Review");
    assert_eq!(b.len(), 7);
    assert!(orders_match_positions(&b));

    let summary = b.run().unwrap();
    assert!(summary.starts_with("Running workflow: Contract Review\n\nSteps:\n1. "));
    assert_eq!(summary.lines().count(), 3 + 7);

    b.clear();
    assert_eq!(b.name(), UNTITLED);
    assert!(matches!(b.run(), Err(WorkflowError::EmptyWorkflow)));
}

#[test]
fn export_document_shape() {
    let p = palette();
    let mut b = StepListBuilder::new();
    b.set_name("Intake Flow");
    b.append(p.node("email-trigger").unwrap());
    let doc = b.export("2024-05-01T09:30:00.000Z").unwrap();
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["name"], "Intake Flow");
    assert_eq!(json["timestamp"], "2024-05-01T09:30:00.000Z");
    assert_eq!(json["steps"][0]["order"], 0);
    assert_eq!(json["steps"][0]["nodeType"], "email-trigger");
    assert_eq!(json["steps"][0]["category"], "input");
    assert!(json["steps"][0].get("description").is_some());
}

#[test]
fn empty_export_fails_and_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let b = StepListBuilder::new();
    let result = b.export("ts").and_then(|doc| write_export(tmp.path(), b.name(), &doc));
    assert!(matches!(result, Err(WorkflowError::EmptyWorkflow)));
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[test]
fn export_is_written_as_pretty_json() {
    let tmp = TempDir::new().unwrap();
    let p = palette();
    let mut b = StepListBuilder::new();
    b.load_template(p.template("ma-due-diligence").unwrap());
    let doc = b.export("ts").unwrap();
    let path = write_export(&tmp.path().join("exports"), b.name(), &doc).unwrap();
    assert_eq!(path.file_name().unwrap(), "m&a-due-diligence-workflow.json");
    let text = std::fs::read_to_string(path).unwrap();
    assert!(text.contains("\n  \"steps\""));
    let back: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(back["steps"].as_array().unwrap().len(), 7);
}
