//! Command implementations for the ideasjar CLI

pub mod ideas;

pub use ideas::{
    run_add, run_edit, run_health, run_improve, run_list, run_remove, run_search, run_show,
    run_stats, ApiContext,
};
