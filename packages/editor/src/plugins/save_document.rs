use super::SAVE_DOCUMENT;
use crate::{EditorResult, Event, HostContext, Plugin, Subscriptions};
use std::rc::Rc;

/// File name stem from a node's text: characters that are unsafe in file
/// names become `_`, and blank text falls back to `fallback`
pub fn sanitize_file_name(text: &str, fallback: &str) -> String {
    let cleaned: String = text
        .chars()
        .map(|c| match c {
            '/' | '\\' | '?' | '%' | '*' | ':' | '|' | '"' | '<' | '>' => '_',
            other => other,
        })
        .collect();

    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        fallback.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Whole-tree export
pub struct SaveDocument {
    ctx: HostContext,
}

impl SaveDocument {
    pub fn save(&self) -> EditorResult<String> {
        let json = self.ctx.config.render_json(self.ctx.tree.borrow().root())?;
        self.ctx.log("Tree saved to JSON");
        Ok(json)
    }

    /// Name the download after the root's text
    pub fn file_name(&self) -> String {
        let stem = sanitize_file_name(&self.ctx.tree.borrow().root().text, "tree");
        format!("{}.json", stem)
    }

    /// Hand the document to the download collaborator
    pub fn download(&self) -> EditorResult<String> {
        let json = self.save()?;
        let file_name = self.file_name();

        self.ctx.emit(Event::DocumentExported {
            file_name: file_name.clone(),
            json,
        });
        self.ctx.log(format!("File {} saved", file_name));
        Ok(file_name)
    }
}

#[derive(Debug, Default)]
pub struct SaveDocumentPlugin {
    subscriptions: Subscriptions,
}

impl Plugin for SaveDocumentPlugin {
    fn init(&mut self, ctx: &HostContext) -> EditorResult<()> {
        let api = Rc::new(SaveDocument { ctx: ctx.clone() });
        ctx.modules.register(SAVE_DOCUMENT, Rc::clone(&api));

        let handler = Rc::clone(&api);
        self.subscriptions.on(&ctx.events, "saveTreeToJson", move |_| {
            handler.save()?;
            Ok(())
        });

        self.subscriptions.on(&ctx.events, "downloadTreeAsJson", move |_| {
            api.download()?;
            Ok(())
        });

        Ok(())
    }

    fn destroy(&mut self, ctx: &HostContext) -> EditorResult<()> {
        self.subscriptions.release(&ctx.events);
        ctx.modules.unregister(SAVE_DOCUMENT);
        Ok(())
    }
}
