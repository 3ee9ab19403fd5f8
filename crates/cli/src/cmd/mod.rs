mod build;
mod rules;

pub use build::cmd_build;
pub use rules::cmd_print_rules;
