//! Workspace and global variable module

mod api;
mod models;
pub mod resolver;

pub use models::{VariableAttributes, VariableList, VariableRecord};
pub use resolver::{
    find_variable_id, var_path, workspace_var_path, workspace_vars_path, VariableRef,
};
