use arbor_editor::{Command, Editor, EditorConfig, EditorResult, Event, MemoryLogger};
use arbor_tree::codec;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Editor state behind the JS class, free of `JsValue` so it can be tested natively
struct Session {
    editor: Editor,
    log: Rc<MemoryLogger>,
    events: Rc<RefCell<Vec<serde_json::Value>>>,
}

impl Session {
    fn open(tree_json: &str, config_json: Option<&str>) -> EditorResult<Self> {
        let config = match config_json {
            Some(json) => serde_json::from_str(json)?,
            None => EditorConfig::default(),
        };
        let log = Rc::new(MemoryLogger::new());
        let root = codec::from_json(tree_json)?;
        let editor = Editor::with_default_plugins(root, config, log.clone())?;

        // Buffer domain events for the renderer to pick up after each call
        let events = Rc::new(RefCell::new(Vec::new()));
        for name in Event::DOMAIN_EVENTS {
            let sink = Rc::clone(&events);
            editor.on(name, move |event| {
                sink.borrow_mut().push(serde_json::to_value(event)?);
                Ok(())
            });
        }

        Ok(Self { editor, log, events })
    }

    fn execute(&self, command_json: &str) -> EditorResult<usize> {
        // Loads may carry a whole document, so parse without the default depth cap
        let command: Command = serde_json::from_value(codec::parse_value(command_json)?)?;
        Ok(self.editor.execute(command))
    }

    fn drain_events(&self) -> EditorResult<String> {
        let events = std::mem::take(&mut *self.events.borrow_mut());
        Ok(serde_json::to_string(&events)?)
    }

    fn drain_log(&self) -> EditorResult<String> {
        Ok(serde_json::to_string(&self.log.drain())?)
    }
}

fn to_js(err: arbor_editor::EditorError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct TreeEditor {
    session: Session,
}

#[wasm_bindgen]
impl TreeEditor {
    /// Open a document; `config_json` follows the `arbor.config.json` format
    #[wasm_bindgen(constructor)]
    pub fn new(tree_json: &str, config_json: Option<String>) -> Result<TreeEditor, JsValue> {
        let session = Session::open(tree_json, config_json.as_deref()).map_err(to_js)?;
        Ok(TreeEditor { session })
    }

    /// Execute a JSON command; returns how many plugins received it
    pub fn execute(&self, command_json: &str) -> Result<usize, JsValue> {
        self.session.execute(command_json).map_err(to_js)
    }

    #[wasm_bindgen(js_name = treeJson)]
    pub fn tree_json(&self) -> Result<String, JsValue> {
        self.session.editor.to_json().map_err(to_js)
    }

    #[wasm_bindgen(js_name = activeId)]
    pub fn active_id(&self) -> Option<String> {
        self.session.editor.active().map(|id| id.into_string())
    }

    /// Color configured for a node type
    #[wasm_bindgen(js_name = typeColor)]
    pub fn type_color(&self, node_type: &str) -> String {
        self.session
            .editor
            .context()
            .config
            .types
            .color_of(node_type)
            .to_string()
    }

    /// JSON array of events emitted since the last call
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&self) -> Result<String, JsValue> {
        self.session.drain_events().map_err(to_js)
    }

    /// JSON array of log lines written since the last call
    #[wasm_bindgen(js_name = drainLog)]
    pub fn drain_log(&self) -> Result<String, JsValue> {
        self.session.drain_log().map_err(to_js)
    }
}
