//! Built-in commands.
//!
//! Each command is a unit struct implementing [`Tool`](super::Tool). Error
//! strings follow the familiar coreutils wording, since the terminal prints
//! them verbatim.

mod cat;
mod cd;
mod clear;
mod cp;
mod echo;
mod help;
mod ls;
mod mkdir;
mod mv;
mod pwd;
mod rm;
mod touch;

use super::ToolRegistry;

/// Command names in the order `help` lists them.
pub const COMMAND_NAMES: &[&str] = &[
    "ls", "cd", "pwd", "cat", "touch", "mkdir", "rm", "mv", "cp", "echo", "clear", "help",
];

/// Register all built-in tools with the registry.
pub fn register_builtins(registry: &mut ToolRegistry) {
    registry.register(cat::Cat);
    registry.register(cd::Cd);
    registry.register(clear::Clear);
    registry.register(cp::Cp);
    registry.register(echo::Echo);
    registry.register(help::Help);
    registry.register(ls::Ls);
    registry.register(mkdir::Mkdir);
    registry.register(mv::Mv);
    registry.register(pwd::Pwd);
    registry.register(rm::Rm);
    registry.register(touch::Touch);
}

#[cfg(test)]
pub(crate) fn make_ctx(files: &[(&str, &str)]) -> super::ExecContext {
    use pocket_vfs::{Tree, Vfs};

    let tree = Tree::from_files(files.iter().copied()).expect("test tree");
    super::ExecContext::new(Vfs::with_tree(tree))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_command_is_registered() {
        let mut registry = ToolRegistry::new();
        register_builtins(&mut registry);
        for name in COMMAND_NAMES {
            assert!(registry.contains(name), "{name} not registered");
        }
        assert_eq!(registry.names().len(), COMMAND_NAMES.len());
    }
}
