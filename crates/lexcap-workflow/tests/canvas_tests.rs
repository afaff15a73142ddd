use lexcap_workflow::{CanvasBuilder, ClickOutcome, ConnectMode, Palette, Position, WorkflowError, UNTITLED};

fn canvas_with_two_nodes() -> (CanvasBuilder, String, String) {
    let p = Palette::builtin().unwrap();
    let mut c = CanvasBuilder::new();
    let a = c.drop_node(p.node("doc-upload").unwrap(), Position::new(10.0, 20.0));
    let b = c.drop_node(p.node("doc-review").unwrap(), Position::new(200.0, 20.0));
    (c, a, b)
}

#[test]
fn dropped_nodes_get_fresh_ids_and_positions() {
    let (c, a, b) = canvas_with_two_nodes();
    assert_ne!(a, b);
    assert_eq!(c.nodes()[0].position, Some(Position::new(10.0, 20.0)));
    assert_eq!(c.nodes()[1].label, "Document Review");
}

#[test]
fn click_to_connect_creates_one_connection() {
    let (mut c, a, b) = canvas_with_two_nodes();
    c.start_connect(&a).unwrap();
    assert_eq!(c.mode(), &ConnectMode::ConnectingFrom(a.clone()));

    assert_eq!(c.click_node(&a).unwrap(), ClickOutcome::Ignored);
    assert_eq!(c.mode(), &ConnectMode::ConnectingFrom(a.clone()));

    let outcome = c.click_node(&b).unwrap();
    assert!(matches!(outcome, ClickOutcome::Connected(_)));
    assert_eq!(c.mode(), &ConnectMode::Idle);
    assert_eq!(c.connections().len(), 1);
    assert_eq!(c.connections()[0].source, a);
    assert_eq!(c.connections()[0].target, b);
}

#[test]
fn duplicate_connections_are_not_created() {
    let (mut c, a, b) = canvas_with_two_nodes();
    c.start_connect(&a).unwrap();
    c.click_node(&b).unwrap();
    c.start_connect(&a).unwrap();
    assert_eq!(c.click_node(&b).unwrap(), ClickOutcome::AlreadyConnected);
    assert_eq!(c.connections().len(), 1);
    assert_eq!(c.mode(), &ConnectMode::Idle);

    // The reverse direction is a different connection.
    c.start_connect(&b).unwrap();
    c.click_node(&a).unwrap();
    assert_eq!(c.connections().len(), 2);
}

#[test]
fn escape_cancels_connect_mode() {
    let (mut c, a, b) = canvas_with_two_nodes();
    c.start_connect(&a).unwrap();
    c.on_key("Enter");
    assert_ne!(c.mode(), &ConnectMode::Idle);
    c.on_key("Escape");
    assert_eq!(c.mode(), &ConnectMode::Idle);

    assert_eq!(c.click_node(&b).unwrap(), ClickOutcome::Selected(b.clone()));
    assert!(c.connections().is_empty());
    assert_eq!(c.selected(), Some(b.as_str()));
}

#[test]
fn unknown_nodes_are_rejected() {
    let (mut c, _, _) = canvas_with_two_nodes();
    assert!(matches!(c.start_connect("ghost"), Err(WorkflowError::UnknownNode(_))));
    assert!(matches!(c.click_node("ghost"), Err(WorkflowError::UnknownNode(_))));
}

#[test]
fn deleting_a_node_removes_its_connections() {
    let p = Palette::builtin().unwrap();
    let (mut c, a, b) = canvas_with_two_nodes();
    let d = c.drop_node(p.node("store-document").unwrap(), Position::new(400.0, 20.0));
    for (from, to) in [(&a, &b), (&b, &d), (&a, &d)] {
        c.start_connect(from).unwrap();
        c.click_node(to).unwrap();
    }
    assert_eq!(c.connections().len(), 3);

    c.click_node(&b).unwrap();
    let removed = c.delete_selected().expect("removed");
    assert_eq!(removed.id, b);
    assert_eq!(c.nodes().len(), 2);
    assert_eq!(c.connections().len(), 1);
    assert!(c.connections().iter().all(|x| x.source != b && x.target != b));
    assert_eq!(c.selected(), None);
    assert!(c.delete_selected().is_none());
}

#[test]
fn delete_connection_by_id() {
    let (mut c, a, b) = canvas_with_two_nodes();
    c.start_connect(&a).unwrap();
    let ClickOutcome::Connected(id) = c.click_node(&b).unwrap() else { panic!("expected connection") };
    assert!(!c.delete_connection("nope"));
    assert!(c.delete_connection(&id));
    assert!(c.connections().is_empty());
}

#[test]
fn template_then_drop_keeps_ids_unique() {
    let p = Palette::builtin().unwrap();
    let mut c = CanvasBuilder::new();
    c.load_template(p.template("litigation-discovery").unwrap());
    assert_eq!(c.name(), "Litigation Discovery");
    assert_eq!(c.nodes().len(), 7);
    let id = c.drop_node(p.node("assign-task").unwrap(), Position::default());
    assert_eq!(c.nodes().iter().filter(|n| n.id == id).count(), 1);
    assert_eq!(c.run().unwrap(), "Running workflow: Litigation Discovery\n\nThis would execute the workflow with 8 nodes and 7 connections.");
}

#[test]
fn clear_resets_everything() {
    let (mut c, a, _) = canvas_with_two_nodes();
    c.set_name("Scratch");
    c.start_connect(&a).unwrap();
    c.clear();
    assert!(c.nodes().is_empty());
    assert_eq!(c.mode(), &ConnectMode::Idle);
    assert_eq!(c.name(), UNTITLED);
    assert!(matches!(c.export("ts"), Err(WorkflowError::EmptyWorkflow)));
    assert!(matches!(c.run(), Err(WorkflowError::EmptyWorkflow)));
}

#[test]
fn empty_canvas_cannot_run() {
    let c = CanvasBuilder::new();
    assert!(matches!(c.run(), Err(WorkflowError::EmptyWorkflow)));
}

#[test]
fn moving_a_node_updates_its_position_only() {
    let (mut c, a, b) = canvas_with_two_nodes();
    c.move_node(&a, Position::new(300.0, 400.0)).unwrap();
    assert_eq!(c.nodes()[0].position, Some(Position::new(300.0, 400.0)));
    assert_eq!(c.nodes()[1].position, Some(Position::new(200.0, 20.0)));
    assert_eq!(c.nodes()[1].id, b);
    assert!(matches!(c.move_node("node-99", Position::default()), Err(WorkflowError::UnknownNode(_))));

    let doc = c.export("ts").unwrap();
    assert_eq!(doc.nodes[0].position, Some(Position::new(300.0, 400.0)));
}

#[test]
fn export_includes_positions_properties_and_labels() {
    let p = Palette::builtin().unwrap();
    let mut c = CanvasBuilder::new();
    c.load_template(p.template("ma-due-diligence").unwrap());
    let doc = c.export("2024-05-01T09:30:00.000Z").unwrap();
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["name"], "M&A Due Diligence");
    assert_eq!(json["nodes"][0]["id"], "node-1");
    assert_eq!(json["nodes"][0]["type"], "document-upload");
    assert_eq!(json["nodes"][0]["position"]["x"], 100.0);
    assert!(json["nodes"][0]["properties"].as_object().unwrap().is_empty());
    assert_eq!(json["connections"][3]["label"], "Yes");
    assert!(json["connections"][0].get("label").is_none());
}
