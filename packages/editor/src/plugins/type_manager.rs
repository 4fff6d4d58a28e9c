use super::TYPE_MANAGER;
use crate::{EditorResult, HostContext, Plugin, Subscriptions, TypeCatalog};
use std::rc::Rc;

/// Publishes the configured type catalog; its presence turns on type checks
/// in the add and change-type plugins
#[derive(Debug, Default)]
pub struct TypeManagerPlugin {
    subscriptions: Subscriptions,
}

fn describe(catalog: &TypeCatalog) -> Vec<String> {
    catalog
        .types()
        .iter()
        .map(|entry| {
            let mut line = format!("{} ({})", entry.name, entry.color);
            if let Some(description) = &entry.description {
                line.push_str(&format!(": {}", description));
            }
            if !entry.props.is_empty() {
                let props: Vec<String> = entry
                    .props
                    .iter()
                    .map(|p| if p.required { format!("{}*", p.name) } else { p.name.clone() })
                    .collect();
                line.push_str(&format!(" [{}]", props.join(", ")));
            }
            line
        })
        .collect()
}

impl Plugin for TypeManagerPlugin {
    fn init(&mut self, ctx: &HostContext) -> EditorResult<()> {
        let catalog = Rc::new(ctx.config.types.clone());
        ctx.modules.register(TYPE_MANAGER, Rc::clone(&catalog));

        let logger = Rc::clone(&ctx.logger);
        self.subscriptions.on(&ctx.events, "listTypes", move |_| {
            logger.log(&format!("Available types ({}):", catalog.len()));
            for line in describe(&catalog) {
                logger.log(&line);
            }
            Ok(())
        });

        Ok(())
    }

    fn destroy(&mut self, ctx: &HostContext) -> EditorResult<()> {
        self.subscriptions.release(&ctx.events);
        ctx.modules.unregister(TYPE_MANAGER);
        Ok(())
    }
}
