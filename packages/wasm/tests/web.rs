//! Browser tests, run with `wasm-pack test --headless --firefox`

#![cfg(target_arch = "wasm32")]

use arbor_wasm::TreeEditor;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const TREE: &str = r#"{"id":"root","type":"Root","text":"R","children":[]}"#;

#[wasm_bindgen_test]
fn add_element_generates_id_and_activates() {
    let editor = TreeEditor::new(TREE, None).unwrap();

    let handled = editor
        .execute(r#"{"command":"addElement","type":"Folder","text":"Inbox"}"#)
        .unwrap();

    assert_eq!(handled, 1);
    let active = editor.active_id().unwrap();
    assert_eq!(active.len(), 36);
    assert!(editor.tree_json().unwrap().contains(&active));
}

#[wasm_bindgen_test]
fn unknown_command_is_an_error() {
    let editor = TreeEditor::new(TREE, None).unwrap();
    assert!(editor.execute(r#"{"command":"explode"}"#).is_err());
}
