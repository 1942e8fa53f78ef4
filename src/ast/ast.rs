use std::fmt::{self, Debug, Display};

use log::trace;

use crate::{lexer::tokens::Token, Location};

/// Index of a node inside an [`Arena`].
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct TreeId(u32);

impl TreeId {
    /// The error sentinel. Slot 0 of every arena holds `Tree::ErrorMark`;
    /// grammar rules return it when a construct could not be built.
    pub const ERROR_MARK: TreeId = TreeId(0);

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub fn is_error(self) -> bool {
        self == TreeId::ERROR_MARK
    }
}

impl Debug for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_error() {
            write!(f, "TreeId(ERROR_MARK)")
        } else {
            write!(f, "TreeId({})", self.0)
        }
    }
}

/// Tree Node
///
/// Every variant has a fixed number of operand slots; children are
/// referenced by [`TreeId`] and may be shared between parents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tree {
    Module { name: TreeId, functions: TreeId },
    Function { name: TreeId, arg_groups: TreeId },
    List { children: Vec<TreeId> },
    Value { text: String },
    /// Sentinel for "no valid tree".
    ErrorMark,
    /// Tombstone left behind by [`Arena::free_tree`].
    EmptyMark,
}

impl Tree {
    /// Number of operand slots of the variant.
    pub fn arity(&self) -> usize {
        match self {
            Tree::Module { .. } | Tree::Function { .. } => 2,
            _ => 0,
        }
    }

    pub fn code_name(&self) -> &'static str {
        match self {
            Tree::Module { .. } => "module",
            Tree::Function { .. } => "function",
            Tree::List { .. } => "list",
            Tree::Value { .. } => "value",
            Tree::ErrorMark => "error_mark",
            Tree::EmptyMark => "empty_mark",
        }
    }
}

impl Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tree::Value { text } => write!(f, "value `{}`", text),
            Tree::List { children } => write!(f, "list of {}", children.len()),
            other => write!(f, "{}", other.code_name()),
        }
    }
}

/// Owner of every tree node built during a compilation.
///
/// Nodes live in `nodes` with their locations in the parallel `locations`
/// table. Tearing a tree down tombstones its nodes and logs their ids in
/// `reclaimed`; the storage itself is released when the arena is dropped.
#[derive(Debug, Clone)]
pub struct Arena {
    nodes: Vec<Tree>,
    locations: Vec<Location>,
    reclaimed: Vec<TreeId>,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl Arena {
    pub fn new() -> Self {
        Arena {
            nodes: vec![Tree::ErrorMark],
            locations: vec![Location::default()],
            reclaimed: vec![],
        }
    }

    fn push(&mut self, tree: Tree, location: Location) -> TreeId {
        let id = TreeId(self.nodes.len() as u32);
        self.nodes.push(tree);
        self.locations.push(location);
        id
    }

    /// Number of slots, sentinel and tombstones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn get(&self, id: TreeId) -> &Tree {
        match self.nodes.get(id.index()) {
            Some(tree) => tree,
            None => panic!("tree {:?} is out of range of the arena", id),
        }
    }

    pub fn location(&self, id: TreeId) -> Location {
        self.locations[id.index()]
    }

    pub fn make_value(&mut self, text: impl Into<String>, location: Location) -> TreeId {
        self.push(Tree::Value { text: text.into() }, location)
    }

    /// Builds a value node that takes over the token's text.
    pub fn make_value_token(&mut self, token: Token) -> TreeId {
        let location = token.location;
        self.make_value(token.into_text(), location)
    }

    pub fn make_list(&mut self, location: Location) -> TreeId {
        self.push(Tree::List { children: vec![] }, location)
    }

    pub fn make_module(&mut self, name: TreeId, functions: TreeId, location: Location) -> TreeId {
        self.push(Tree::Module { name, functions }, location)
    }

    pub fn make_function(&mut self, name: TreeId, arg_groups: TreeId, location: Location) -> TreeId {
        self.push(Tree::Function { name, arg_groups }, location)
    }

    pub fn list_append(&mut self, list: TreeId, element: TreeId) {
        match &mut self.nodes[list.index()] {
            Tree::List { children } => children.push(element),
            other => panic!("appending to a `{}` node", other.code_name()),
        }
    }

    pub fn children(&self, list: TreeId) -> &[TreeId] {
        match self.get(list) {
            Tree::List { children } => children,
            other => panic!("`{}` node has no children", other.code_name()),
        }
    }

    pub fn value(&self, id: TreeId) -> &str {
        match self.get(id) {
            Tree::Value { text } => text,
            other => panic!("`{}` node has no value", other.code_name()),
        }
    }

    /// The name of a module or function node.
    pub fn name_of(&self, id: TreeId) -> &str {
        match self.get(id) {
            Tree::Module { name, .. } | Tree::Function { name, .. } => self.value(*name),
            other => panic!("`{}` node has no name", other.code_name()),
        }
    }

    /// The function list of a module, or the argument groups of a function.
    pub fn body_of(&self, id: TreeId) -> &[TreeId] {
        match self.get(id) {
            Tree::Module { functions: body, .. } | Tree::Function { arg_groups: body, .. } => {
                self.children(*body)
            }
            other => panic!("`{}` node has no body", other.code_name()),
        }
    }

    /// Tears `id` and everything below it down.
    ///
    /// Children go first, then the node becomes `EmptyMark` and is logged as
    /// reclaimed. The error sentinel and nodes that are already tombstoned
    /// are left alone, so a node reachable through several parents is
    /// reclaimed once.
    pub fn free_tree(&mut self, id: TreeId) {
        if id.is_error() {
            return;
        }

        let tree = std::mem::replace(&mut self.nodes[id.index()], Tree::EmptyMark);
        match tree {
            Tree::EmptyMark => return,
            Tree::ErrorMark => unreachable!("error sentinel outside of slot 0"),
            Tree::Module { name, functions } => {
                self.free_tree(name);
                self.free_tree(functions);
            }
            Tree::Function { name, arg_groups } => {
                self.free_tree(name);
                self.free_tree(arg_groups);
            }
            Tree::List { children } => {
                for child in children {
                    self.free_tree(child);
                }
            }
            Tree::Value { .. } => {}
        }

        trace!("reclaimed tree {:?}", id);
        self.reclaimed.push(id);
    }

    pub fn is_reclaimed(&self, id: TreeId) -> bool {
        matches!(self.get(id), Tree::EmptyMark)
    }

    /// Ids torn down so far, in teardown order.
    pub fn reclaimed(&self) -> &[TreeId] {
        &self.reclaimed
    }
}
