/// AST (Abstract Syntax Tree) module
/// Contains the tree nodes built by the parser and the arena that owns them
///
/// Submodules:
/// - ast: Tree variants, node ids and the arena
pub mod ast;

#[cfg(test)]
mod tests;
