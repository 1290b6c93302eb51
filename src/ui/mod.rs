//! User interface module - status output on stderr.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_error, display_status, display_success, format_run_summary,
};
