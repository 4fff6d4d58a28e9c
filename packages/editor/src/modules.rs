//! # Module Registry
//!
//! Name-keyed directory of capability handles. Plugins publish their API
//! under a well-known name at init and withdraw it at teardown; other
//! plugins look it up at call time, so a missing module only degrades the
//! caller.
//!
//! Handles are stored as `Rc<T>`; `get::<T>` hands back a clone of the
//! same `Rc` when the stored type matches.

use crate::Logger;
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::debug;

/// Name of the core tree-access module
pub const TREE_MANAGER: &str = "treeManager";

/// Name of the core activation module
pub const ACTIVATE_ITEM: &str = "activateItem";

pub struct ModuleRegistry {
    modules: RefCell<HashMap<String, Box<dyn Any>>>,
    logger: Rc<dyn Logger>,
}

impl ModuleRegistry {
    pub fn new(logger: Rc<dyn Logger>) -> Self {
        Self {
            modules: RefCell::new(HashMap::new()),
            logger,
        }
    }

    /// Publish a handle; last registration under a name wins
    pub fn register<T: ?Sized + 'static>(&self, name: &str, module: Rc<T>) {
        let previous = self
            .modules
            .borrow_mut()
            .insert(name.to_string(), Box::new(module));

        if previous.is_some() {
            self.logger
                .log(&format!("Module {} was overwritten", name));
        }
        debug!(module = name, replaced = previous.is_some(), "Registered module");
    }

    /// Handle registered under `name`, if present and of type `T`
    pub fn get<T: ?Sized + 'static>(&self, name: &str) -> Option<Rc<T>> {
        self.modules
            .borrow()
            .get(name)
            .and_then(|module| module.downcast_ref::<Rc<T>>())
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.borrow().contains_key(name)
    }

    pub fn unregister(&self, name: &str) -> bool {
        let removed = self.modules.borrow_mut().remove(name);
        debug!(module = name, removed = removed.is_some(), "Unregistered module");
        removed.is_some()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.modules.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn clear(&self) {
        // Take the map out first so handle destructors run without a borrow held
        let modules = std::mem::take(&mut *self.modules.borrow_mut());
        drop(modules);
    }
}
