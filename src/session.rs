//! Compilation session.
//!
//! A [`Session`] holds everything one compilation mutates: the tree arena,
//! the list of registered modules and the collected diagnostics. Two
//! sessions never share state.

use log::debug;

use crate::{
    ast::ast::{Arena, Tree, TreeId},
    errors::errors::Error,
    Location,
};

/// Errors and warnings reported during a compilation, in report order.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<Error>,
    warnings: Vec<Error>,
}

impl Diagnostics {
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Error] {
        &self.warnings
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

#[derive(Debug)]
pub struct Session {
    arena: Arena,
    module_list: TreeId,
    diagnostics: Diagnostics,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let module_list = arena.make_list(Location::default());

        Session {
            arena,
            module_list,
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn report_error(&mut self, err: Error) {
        debug!("error {}: {}", err.get_error_name(), err);
        self.diagnostics.errors.push(err);
    }

    pub fn report_warning(&mut self, warning: Error) {
        debug!("warning {}: {}", warning.get_error_name(), warning);
        self.diagnostics.warnings.push(warning);
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.error_count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.warning_count()
    }

    /// Registered modules, in source order.
    pub fn modules(&self) -> &[TreeId] {
        self.arena.children(self.module_list)
    }

    /// Looks a registered module up by name.
    pub fn module_exists(&self, name: &str) -> Option<TreeId> {
        self.modules()
            .iter()
            .copied()
            .find(|module| self.arena.name_of(*module) == name)
    }

    pub fn register_module(&mut self, module: TreeId) {
        assert!(
            matches!(self.arena.get(module), Tree::Module { .. }),
            "only modules can be registered"
        );
        self.arena.list_append(self.module_list, module);
    }
}
