//! # Plugin Host
//!
//! Owns plugin lifecycle. Registration is by name; registering a name twice
//! tears down the old plugin first. A plugin whose `init` fails is torn
//! down again and never listed, so one bad plugin cannot abort startup.

use crate::{EditorResult, HostContext};
use tracing::{info, warn};

pub trait Plugin {
    /// Subscribe handlers and publish modules
    fn init(&mut self, ctx: &HostContext) -> EditorResult<()>;

    /// Release everything `init` set up
    fn destroy(&mut self, _ctx: &HostContext) -> EditorResult<()> {
        Ok(())
    }
}

pub struct PluginHost {
    ctx: HostContext,
    plugins: Vec<(String, Box<dyn Plugin>)>,
}

impl PluginHost {
    pub fn new(ctx: HostContext) -> Self {
        Self {
            ctx,
            plugins: Vec::new(),
        }
    }

    /// Register and initialize a plugin; false if `init` failed
    pub fn register(&mut self, name: &str, mut plugin: Box<dyn Plugin>) -> bool {
        if self.unregister(name) {
            self.ctx.log(format!("Plugin {} replaced", name));
        }

        if let Err(err) = plugin.init(&self.ctx) {
            warn!(plugin = name, error = %err, "Plugin init failed");
            self.ctx
                .log(format!("Failed to initialize plugin {}: {}", name, err));
            // Undo whatever the plugin managed to set up before failing
            if let Err(err) = plugin.destroy(&self.ctx) {
                warn!(plugin = name, error = %err, "Plugin rollback failed");
            }
            return false;
        }

        info!(plugin = name, "Plugin registered");
        self.ctx.log(format!("Plugin {} registered", name));
        self.plugins.push((name.to_string(), plugin));
        true
    }

    /// Tear down and remove a plugin; false if no such plugin
    pub fn unregister(&mut self, name: &str) -> bool {
        let Some(index) = self.plugins.iter().position(|(n, _)| n == name) else {
            return false;
        };

        let (name, mut plugin) = self.plugins.remove(index);
        self.teardown(&name, plugin.as_mut());
        true
    }

    /// Registered plugin names, in registration order
    pub fn list(&self) -> Vec<String> {
        let names: Vec<String> = self.plugins.iter().map(|(n, _)| n.clone()).collect();
        self.ctx
            .log(format!("Registered plugins: {}", names.join(", ")));
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.plugins.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Destroy every plugin, newest first
    pub fn shutdown(&mut self) {
        while let Some((name, mut plugin)) = self.plugins.pop() {
            self.teardown(&name, plugin.as_mut());
        }
    }

    fn teardown(&self, name: &str, plugin: &mut dyn Plugin) {
        match plugin.destroy(&self.ctx) {
            Ok(()) => info!(plugin = name, "Plugin destroyed"),
            Err(err) => {
                warn!(plugin = name, error = %err, "Plugin teardown failed");
                self.ctx
                    .log(format!("Failed to destroy plugin {}: {}", name, err));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EditorConfig, EditorError, MemoryLogger};
    use arbor_tree::TreeNode;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Journal = Rc<RefCell<Vec<String>>>;

    struct Recording {
        tag: &'static str,
        journal: Journal,
        fail_init: bool,
        fail_destroy: bool,
    }

    impl Recording {
        fn boxed(tag: &'static str, journal: &Journal) -> Box<dyn Plugin> {
            Box::new(Self {
                tag,
                journal: Rc::clone(journal),
                fail_init: false,
                fail_destroy: false,
            })
        }
    }

    impl Plugin for Recording {
        fn init(&mut self, _ctx: &HostContext) -> EditorResult<()> {
            self.journal.borrow_mut().push(format!("init {}", self.tag));
            if self.fail_init {
                return Err(EditorError::Handler("init refused".to_string()));
            }
            Ok(())
        }

        fn destroy(&mut self, _ctx: &HostContext) -> EditorResult<()> {
            self.journal.borrow_mut().push(format!("destroy {}", self.tag));
            if self.fail_destroy {
                return Err(EditorError::Handler("destroy refused".to_string()));
            }
            Ok(())
        }
    }

    fn host() -> (PluginHost, Rc<MemoryLogger>) {
        let logger = Rc::new(MemoryLogger::new());
        let ctx = HostContext::new(
            TreeNode::new("root", "Root", "R"),
            EditorConfig::default(),
            logger.clone(),
        )
        .unwrap();
        (PluginHost::new(ctx), logger)
    }

    #[test]
    fn test_register_replaces_existing() {
        let (mut host, logger) = host();
        let journal = Journal::default();

        assert!(host.register("p", Recording::boxed("old", &journal)));
        assert!(host.register("p", Recording::boxed("new", &journal)));

        assert_eq!(*journal.borrow(), vec!["init old", "destroy old", "init new"]);
        assert_eq!(host.list(), vec!["p"]);
        assert!(logger.contains("Plugin p replaced"));
    }

    #[test]
    fn test_failed_init_is_rolled_back() {
        let (mut host, logger) = host();
        let journal = Journal::default();

        let failing = Box::new(Recording {
            tag: "bad",
            journal: Rc::clone(&journal),
            fail_init: true,
            fail_destroy: false,
        });

        assert!(!host.register("bad", failing));
        assert!(host.register("good", Recording::boxed("good", &journal)));

        assert!(!host.contains("bad"));
        assert!(host.contains("good"));
        assert!(logger.contains("Failed to initialize plugin bad: init refused"));
    }

    #[test]
    fn test_teardown_failure_is_logged() {
        let (mut host, logger) = host();
        let journal = Journal::default();

        let stubborn = Box::new(Recording {
            tag: "stubborn",
            journal: Rc::clone(&journal),
            fail_init: false,
            fail_destroy: true,
        });
        host.register("stubborn", stubborn);

        assert!(host.unregister("stubborn"));
        assert!(!host.unregister("stubborn"));
        assert!(logger.contains("Failed to destroy plugin stubborn"));
    }

    #[test]
    fn test_shutdown_runs_in_reverse_order() {
        let (mut host, _) = host();
        let journal = Journal::default();

        host.register("a", Recording::boxed("a", &journal));
        host.register("b", Recording::boxed("b", &journal));
        journal.borrow_mut().clear();

        host.shutdown();

        assert_eq!(*journal.borrow(), vec!["destroy b", "destroy a"]);
        assert!(host.is_empty());
    }
}
